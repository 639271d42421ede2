//! Storage key composition shared by all backends.

use crate::traits::{StorageError, StorageResult};

/// Join an orientation prefix and an asset identifier into a storage key.
pub fn compose_storage_key(prefix: &str, asset: &str) -> String {
    format!(
        "{}/{}",
        prefix.trim_matches('/'),
        asset.trim_start_matches('/')
    )
}

/// Reject keys that could escape a backend's root.
pub fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
    }
    if key.contains("..") || key.starts_with('/') {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_storage_key() {
        assert_eq!(
            compose_storage_key("landscape", "abc.mp4"),
            "landscape/abc.mp4"
        );
        assert_eq!(compose_storage_key("other/", "/abc.bin"), "other/abc.bin");
    }

    #[test]
    fn test_validate_key_rejects_traversal() {
        assert!(validate_key("portrait/abc.mp4").is_ok());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("/absolute.mp4").is_err());
        assert!(validate_key("").is_err());
    }
}
