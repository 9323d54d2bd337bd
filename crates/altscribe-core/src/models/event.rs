use serde::{Deserialize, Serialize};

/// Notification for one uploaded object.
///
/// `path` is the full path as reported by the storage trigger, container
/// segment included (`images-description/shoes/red.png`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestEvent {
    pub path: String,
    pub length: u64,
}

impl IngestEvent {
    pub fn new(path: impl Into<String>, length: u64) -> Self {
        Self {
            path: path.into(),
            length,
        }
    }

    /// Base name of the object; doubles as the description id.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Container segment of the path.
    pub fn container(&self) -> &str {
        self.path.split('/').next().unwrap_or_default()
    }

    /// Path relative to the container (first segment dropped).
    pub fn object_key(&self) -> String {
        container_relative(&self.path)
    }
}

/// Drop the leading container segment of a trigger path.
pub fn container_relative(full_path: &str) -> String {
    match full_path.split_once('/') {
        Some((_, rest)) => rest.to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_parts() {
        let event = IngestEvent::new("images-description/shoes/red.PNG", 2048);
        assert_eq!(event.file_name(), "red.PNG");
        assert_eq!(event.container(), "images-description");
        assert_eq!(event.object_key(), "shoes/red.PNG");
    }

    #[test]
    fn test_path_without_container() {
        let event = IngestEvent::new("orphan.png", 1);
        assert_eq!(event.file_name(), "orphan.png");
        assert_eq!(event.object_key(), "");
    }
}
