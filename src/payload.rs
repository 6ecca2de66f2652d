//! Client-side validation of upload candidates.
//!
//! Oversized and empty files are rejected here, before the passphrase prompt
//! and before any network call.

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::ports::filesystem::FileSystem;

/// An image accepted for upload, with its content pre-encoded for the
/// hosting API's blob endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    /// File name of the source image (used in the commit message).
    pub file_name: String,
    /// Base64-encoded file content.
    pub content_b64: String,
    /// Size of the raw content in bytes.
    pub byte_len: usize,
}

/// Reads and validates an image file for upload.
///
/// # Errors
///
/// Returns an error string if the file cannot be read, is empty, or exceeds
/// the size ceiling.
pub fn load_image(
    fs: &dyn FileSystem,
    path: &Path,
    max_bytes: usize,
) -> Result<ImagePayload, String> {
    let bytes = fs.read(path).map_err(|e| format!("Failed to read image {}: {e}", path.display()))?;

    if bytes.is_empty() {
        return Err(format!("Image {} is empty", path.display()));
    }
    if bytes.len() > max_bytes {
        return Err(format!(
            "Image {} is {} bytes, over the {max_bytes} byte upload ceiling",
            path.display(),
            bytes.len()
        ));
    }

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| format!("Image path {} has no file name", path.display()))?
        .to_string();

    Ok(ImagePayload { file_name, content_b64: BASE64.encode(&bytes), byte_len: bytes.len() })
}

/// Builds the commit message recorded for an upload.
#[must_use]
pub fn commit_message(file_name: &str, dest_path: &str) -> String {
    format!("uploaded {file_name} to {dest_path}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;

    struct MapFileSystem(HashMap<PathBuf, Vec<u8>>);

    impl MapFileSystem {
        fn with_file(path: &str, bytes: &[u8]) -> Self {
            Self(HashMap::from([(PathBuf::from(path), bytes.to_vec())]))
        }
    }

    impl FileSystem for MapFileSystem {
        fn read(
            &self,
            path: &Path,
        ) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>> {
            self.0.get(path).cloned().ok_or_else(|| "no such file".into())
        }

        fn exists(&self, path: &Path) -> bool {
            self.0.contains_key(path)
        }
    }

    #[test]
    fn loads_and_encodes_image_content() {
        let fs = MapFileSystem::with_file("photos/x.jpg", b"hi");
        let payload = load_image(&fs, Path::new("photos/x.jpg"), 1024).unwrap();
        assert_eq!(payload.file_name, "x.jpg");
        assert_eq!(payload.content_b64, "aGk=");
        assert_eq!(payload.byte_len, 2);
    }

    #[test]
    fn accepts_file_exactly_at_ceiling() {
        let fs = MapFileSystem::with_file("x.jpg", &[0u8; 16]);
        assert!(load_image(&fs, Path::new("x.jpg"), 16).is_ok());
    }

    #[test]
    fn rejects_file_over_ceiling() {
        let fs = MapFileSystem::with_file("x.jpg", &[0u8; 17]);
        let err = load_image(&fs, Path::new("x.jpg"), 16).unwrap_err();
        assert!(err.contains("17 bytes"));
        assert!(err.contains("16 byte upload ceiling"));
    }

    #[test]
    fn rejects_empty_file() {
        let fs = MapFileSystem::with_file("x.jpg", b"");
        let err = load_image(&fs, Path::new("x.jpg"), 16).unwrap_err();
        assert!(err.contains("is empty"));
    }

    #[test]
    fn surfaces_read_failure() {
        let fs = MapFileSystem(HashMap::new());
        let err = load_image(&fs, Path::new("missing.jpg"), 16).unwrap_err();
        assert!(err.contains("Failed to read image"));
    }

    #[test]
    fn commit_message_names_source_and_destination() {
        assert_eq!(
            commit_message("x.jpg", "exp4/upload.jpg"),
            "uploaded x.jpg to exp4/upload.jpg"
        );
    }
}
