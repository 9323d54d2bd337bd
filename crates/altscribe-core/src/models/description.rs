use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Persisted alt-text document. `id` is also the partition key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionRecord {
    pub id: String,
    pub url: String,
    pub description: String,
}

/// Description produced by the model, keyed by the unsigned object URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedDescription {
    pub url: String,
    pub description: String,
}

impl GeneratedDescription {
    /// Last path segment of `url`, percent-decoded so it matches the object's
    /// file name.
    pub fn id(&self) -> String {
        let segment = self.url.rsplit('/').next().unwrap_or(&self.url);
        urlencoding::decode(segment)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| segment.to_string())
    }

    pub fn into_record(self) -> DescriptionRecord {
        DescriptionRecord {
            id: self.id(),
            url: self.url,
            description: self.description,
        }
    }
}

/// Time-limited read URL for a single object. Never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedAccessUrl(String);

impl SignedAccessUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Object address with the signature query removed.
    pub fn canonical(&self) -> &str {
        self.0.split('?').next().unwrap_or(&self.0)
    }
}

impl Display for SignedAccessUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

// The query string is a bearer credential; keep it out of logs.
impl std::fmt::Debug for SignedAccessUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_tuple("SignedAccessUrl")
            .field(&format_args!("{}?<redacted>", self.canonical()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_is_last_segment() {
        let generated = GeneratedDescription {
            url: "https://acct.blob.core.windows.net/images-description/shoes/red.png".to_string(),
            description: "Chaussure rouge".to_string(),
        };
        let record = generated.into_record();
        assert_eq!(record.id, "red.png");
        assert!(record.url.ends_with("/shoes/red.png"));
    }

    #[test]
    fn test_record_id_is_decoded() {
        let generated = GeneratedDescription {
            url: "https://acct.blob.core.windows.net/images-description/red%20shoe.png".to_string(),
            description: "Chaussure rouge".to_string(),
        };
        assert_eq!(generated.id(), "red shoe.png");
    }

    #[test]
    fn test_signed_url_canonical_and_debug() {
        let url = SignedAccessUrl::new("https://acct.blob.core.windows.net/c/a.png?sv=2021&sig=abc");
        assert_eq!(url.canonical(), "https://acct.blob.core.windows.net/c/a.png");
        let debug = format!("{:?}", url);
        assert!(!debug.contains("sig=abc"));
    }
}
