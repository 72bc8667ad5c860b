//! # Photo Resolver
//!
//! Photos are stored by reference on the student record: the md5 of the
//! uploaded bytes followed by the sanitised file name. The bytes live either in a cloud bucket or in the local upload
//! directory; [`PhotoStorage`] prefers the bucket whenever it is reachable
//! and falls back to the local directory otherwise.

mod bucket;
mod local;

pub use bucket::MountedBucket;
pub use local::LocalPhotoStore;

use log::{info, warn};
use md5::Context;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// URL prefix under which the local upload directory is served.
pub const LOCAL_URL_PREFIX: &str = "/static/uploads";

#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("photo {0:?} not found")]
    NotFound(String),
    #[error("photo storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("photo could not be decoded: {0}")]
    Decode(#[from] image::ImageError),
    #[error("photo could not be encoded: {0}")]
    Encode(#[from] png::EncodingError),
}

/// What the report engine needs from photo storage.
pub trait PhotoResolver: Send + Sync {
    /// Returns the bytes behind a photo reference.
    fn resolve(&self, photo_ref: &str) -> Result<Vec<u8>, PhotoError>;

    /// Whether display URLs should point at cloud storage.
    fn cloud_available(&self) -> bool;

    /// Browser-facing location of the photo.
    fn display_url(&self, photo_ref: &str) -> String;
}

/// A remote object store holding photos under `photos/<file>`.
pub trait ObjectStore: Send + Sync {
    fn available(&self) -> bool;
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PhotoError>;
    /// Stores `bytes` and returns the public URL of the object.
    fn put(&self, key: &str, bytes: &[u8]) -> Result<String, PhotoError>;
    fn public_url(&self, key: &str) -> String;
}

pub struct PhotoStorage {
    cloud: Option<Box<dyn ObjectStore>>,
    local: LocalPhotoStore,
}

impl PhotoStorage {
    pub fn new(local: LocalPhotoStore, cloud: Option<Box<dyn ObjectStore>>) -> Self {
        PhotoStorage { cloud, local }
    }

    pub fn local(&self) -> &LocalPhotoStore {
        &self.local
    }

    fn reachable_cloud(&self) -> Option<&dyn ObjectStore> {
        self.cloud.as_deref().filter(|c| c.available())
    }

    /// Stores an uploaded photo and returns the reference to record.
    ///
    /// The upload goes to the cloud first; if the cloud is unreachable or
    /// rejects it, the bytes are written to the local directory instead.
    pub fn save(&self, filename: &str, bytes: &[u8]) -> Result<String, PhotoError> {
        let photo_ref = photo_reference(filename, bytes);
        if let Some(cloud) = self.reachable_cloud() {
            match cloud.put(&object_key(&photo_ref), bytes) {
                Ok(url) => {
                    info!("Stored photo {} in cloud at {}", photo_ref, url);
                    return Ok(photo_ref);
                }
                Err(e) => warn!("Cloud upload of {} failed, storing locally: {}", photo_ref, e),
            }
        }
        self.local.write(&photo_ref, bytes)?;
        info!("Stored photo {} locally", photo_ref);
        Ok(photo_ref)
    }
}

impl PhotoResolver for PhotoStorage {
    fn resolve(&self, photo_ref: &str) -> Result<Vec<u8>, PhotoError> {
        if let Some(cloud) = self.reachable_cloud() {
            match cloud.get(&object_key(photo_ref)) {
                Ok(Some(bytes)) => return Ok(bytes),
                Ok(None) => {}
                Err(e) => warn!("Cloud lookup of {} failed, trying local: {}", photo_ref, e),
            }
        }
        self.local.read(photo_ref)
    }

    fn cloud_available(&self) -> bool {
        self.reachable_cloud().is_some()
    }

    fn display_url(&self, photo_ref: &str) -> String {
        match self.reachable_cloud() {
            Some(cloud) => cloud.public_url(&object_key(photo_ref)),
            None => format!("{}/{}", LOCAL_URL_PREFIX, urlencoding::encode(photo_ref)),
        }
    }
}

/// `<md5 of bytes>_<sanitised name>`; uploads sharing a name stay apart.
fn photo_reference(filename: &str, bytes: &[u8]) -> String {
    let mut hasher = Context::new();
    hasher.consume(bytes);
    format!("{:x}_{}", hasher.finalize(), secure_filename(filename))
}

fn object_key(photo_ref: &str) -> String {
    format!("photos/{}", photo_ref)
}

/// Reduces an uploaded file name to a safe, flat reference.
///
/// Directory components are dropped and anything outside `[A-Za-z0-9._-]`
/// becomes `_`. Leading dots are removed so a name can never be hidden or
/// refer to a parent directory.
pub fn secure_filename(filename: &str) -> String {
    static UNSAFE: OnceLock<Regex> = OnceLock::new();
    let unsafe_chars = UNSAFE.get_or_init(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("valid regex"));

    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let cleaned = unsafe_chars.replace_all(base.trim(), "_");
    let cleaned = cleaned.trim_start_matches('.').trim_matches('_');
    if cleaned.is_empty() {
        "photo".to_string()
    } else {
        cleaned.to_string()
    }
}
