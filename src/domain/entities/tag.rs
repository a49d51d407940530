use serde::{Deserialize, Serialize};

pub const TAG_CATEGORY_EXTERNAL: &str = "external";
pub const TAG_CATEGORY_SYSTEM: &str = "system";

/// A categorized label with a numeric ordering hint, associated with a
/// candidate. Categories other than `external` and `system` are opaque
/// strings and pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub order: i64,
}

/// Selects the tags that go onto an application.
///
/// Drops `external` tags, bumps the order of `system` tags by 1 so they
/// rank after equal-order tags of other categories, and keeps everything
/// else as-is. Relative input order is preserved; the ascending sort by
/// `order` happens later, when the application payload is built.
///
/// Returns new values; the retrieved collection is never mutated.
pub fn select_application_tags(tags: &[Tag]) -> Vec<Tag> {
    tags.iter()
        .filter(|tag| tag.category != TAG_CATEGORY_EXTERNAL)
        .map(|tag| {
            let mut tag = tag.clone();
            if tag.category == TAG_CATEGORY_SYSTEM {
                tag.order += 1;
            }
            tag
        })
        .collect()
}
