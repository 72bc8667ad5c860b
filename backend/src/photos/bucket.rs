use super::{ObjectStore, PhotoError};
use std::io::ErrorKind;
use std::path::PathBuf;

/// A cloud bucket reached through a mounted directory.
///
/// Objects are files under `root` and are publicly served from
/// `public_url`. The bucket counts as available only while the mount point
/// exists, so an unmounted bucket sends uploads to local storage.
#[derive(Debug, Clone)]
pub struct MountedBucket {
    root: PathBuf,
    public_url: String,
}

impl MountedBucket {
    pub fn new(root: impl Into<PathBuf>, public_url: impl Into<String>) -> Self {
        MountedBucket {
            root: root.into(),
            public_url: public_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl ObjectStore for MountedBucket {
    fn available(&self) -> bool {
        self.root.is_dir()
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PhotoError> {
        match std::fs::read(self.root.join(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, key: &str, bytes: &[u8]) -> Result<String, PhotoError> {
        let path = self.root.join(key);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, bytes)?;
        Ok(self.public_url(key))
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_url, key)
    }
}
