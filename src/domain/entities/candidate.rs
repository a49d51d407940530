use serde::{Deserialize, Serialize};

/// A person profile owned by the internal API, uniquely identified by email.
///
/// The id is issued by the remote service and treated as opaque.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}
