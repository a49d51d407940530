use serde::{Deserialize, Serialize};

/// The kind of document attached to an application. Doubles as the path
/// segment of the upload endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    #[serde(rename = "cv")]
    Cv,
    #[serde(rename = "coverLetter")]
    CoverLetter,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cv => "cv",
            Self::CoverLetter => "coverLetter",
        }
    }
}

/// The remote representation of an uploaded document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: DocumentKind,
}
