//! Shared key validation for storage backends.

use crate::traits::{StorageError, StorageResult};

/// Reject keys that are empty or could escape the container root.
pub fn validate_object_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("Object key is empty".to_string()));
    }
    if key.starts_with('/') || key.split('/').any(|segment| segment == "..") {
        return Err(StorageError::InvalidKey(format!(
            "Object key contains invalid segments: {}",
            key
        )));
    }
    Ok(())
}

/// Percent-encode each path segment, keeping the separators.
pub fn encode_key(key: &str) -> String {
    key.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_object_key() {
        assert!(validate_object_key("shoes/red.png").is_ok());
        assert!(validate_object_key("red..png").is_ok());
        assert!(matches!(validate_object_key(""), Err(StorageError::InvalidKey(_))));
        assert!(matches!(validate_object_key("/etc/passwd"), Err(StorageError::InvalidKey(_))));
        assert!(matches!(validate_object_key("a/../b"), Err(StorageError::InvalidKey(_))));
    }

    #[test]
    fn test_encode_key_keeps_separators() {
        assert_eq!(encode_key("dir one/é.png"), "dir%20one/%C3%A9.png");
    }
}
