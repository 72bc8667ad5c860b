use super::PhotoError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Photos kept in a directory on the server's own disk.
#[derive(Debug, Clone)]
pub struct LocalPhotoStore {
    dir: PathBuf,
}

impl LocalPhotoStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        LocalPhotoStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, photo_ref: &str) -> PathBuf {
        self.dir.join(photo_ref)
    }

    pub fn write(&self, photo_ref: &str, bytes: &[u8]) -> Result<(), PhotoError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_of(photo_ref), bytes)?;
        Ok(())
    }

    pub fn read(&self, photo_ref: &str) -> Result<Vec<u8>, PhotoError> {
        match std::fs::read(self.path_of(photo_ref)) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(PhotoError::NotFound(photo_ref.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
