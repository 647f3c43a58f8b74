use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs::{self, File};

use crate::error::{Result, UploadError};

/// Flat directory of uploaded files keyed by their original name.
#[derive(Clone, Debug)]
pub struct UploadStore {
    root: PathBuf,
}

/// An opened upload ready to be streamed back.
pub struct StoredFile {
    pub file: File,
    pub len: u64,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Creates (or truncates) the file for `file_name`, creating the upload
    /// directory first if it is missing. `file_name` must already be a plain
    /// name as returned by [`sanitize_file_name`].
    pub async fn create(&self, file_name: &str) -> Result<File> {
        self.ensure_dir().await?;
        Ok(File::create(self.root.join(file_name)).await?)
    }

    pub async fn open(&self, file_name: &str) -> Result<StoredFile> {
        if sanitize_file_name(file_name).as_deref() != Some(file_name) {
            return Err(UploadError::NotFound);
        }
        let path = self.root.join(file_name);
        let metadata = match fs::metadata(&path).await {
            Ok(m) => m,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(UploadError::NotFound),
            Err(e) => return Err(e.into()),
        };
        if !metadata.is_file() {
            return Err(UploadError::NotFound);
        }
        let file = File::open(&path).await?;
        Ok(StoredFile {
            file,
            len: metadata.len(),
        })
    }
}

/// Reduces a client supplied filename to its last path component.
///
/// Returns `None` when nothing usable is left (empty, `.` or `..`).
pub fn sanitize_file_name(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or("").trim();
    if base.is_empty() || base == "." || base == ".." || base.contains('\0') {
        return None;
    }
    Some(base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[test]
    fn plain_names_pass_through() {
        assert_eq!(sanitize_file_name("a.txt").as_deref(), Some("a.txt"));
        assert_eq!(sanitize_file_name(" song.mp3 ").as_deref(), Some("song.mp3"));
    }

    #[test]
    fn directories_are_stripped() {
        assert_eq!(sanitize_file_name("../../etc/passwd").as_deref(), Some("passwd"));
        assert_eq!(sanitize_file_name("C:\\Users\\me\\clip.m4a").as_deref(), Some("clip.m4a"));
    }

    #[test]
    fn unusable_names_are_rejected() {
        assert_eq!(sanitize_file_name(""), None);
        assert_eq!(sanitize_file_name("   "), None);
        assert_eq!(sanitize_file_name(".."), None);
        assert_eq!(sanitize_file_name("dir/"), None);
    }

    #[tokio::test]
    async fn create_makes_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let store = UploadStore::new(tmp.path().join("nested").join("uploads"));

        let mut file = store.create("a.txt").await.unwrap();
        file.write_all(b"hello").await.unwrap();
        file.flush().await.unwrap();

        let mut stored = store.open("a.txt").await.unwrap();
        assert_eq!(stored.len, 5);
        let mut body = String::new();
        stored.file.read_to_string(&mut body).await.unwrap();
        assert_eq!(body, "hello");
    }

    #[tokio::test]
    async fn open_rejects_missing_and_non_plain_names() {
        let tmp = tempfile::tempdir().unwrap();
        let store = UploadStore::new(tmp.path());
        store.ensure_dir().await.unwrap();
        std::fs::create_dir(tmp.path().join("sub")).unwrap();

        assert!(matches!(store.open("nope.bin").await, Err(UploadError::NotFound)));
        assert!(matches!(store.open("..").await, Err(UploadError::NotFound)));
        assert!(matches!(store.open("sub").await, Err(UploadError::NotFound)));
    }
}
