use serde::{Deserialize, Serialize};

pub const LISTING_STATUS_ACTIVE: &str = "active";

/// A job posting. Read-only within this service; only the activation
/// state matters for submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    #[serde(default)]
    pub status: String,
}

impl Listing {
    pub fn is_active(&self) -> bool {
        self.status == LISTING_STATUS_ACTIVE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_listing() {
        let listing = Listing {
            id: "listing1".into(),
            status: "active".into(),
        };
        assert!(listing.is_active());
    }

    #[test]
    fn test_closed_listing() {
        let listing = Listing {
            id: "listing1".into(),
            status: "closed".into(),
        };
        assert!(!listing.is_active());
    }
}
