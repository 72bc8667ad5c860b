//! Shared application state, built once at startup and handed to every
//! worker as `web::Data<AppState>`.

use crate::config::AppConfig;
use crate::photos::{LocalPhotoStore, MountedBucket, ObjectStore, PhotoStorage};
use crate::report::RenderContext;
use crate::store::{StoreError, StudentStore};
use crate::templates::{TemplateLibrary, TemplateSessions};
use log::{info, warn};

pub struct AppState {
    pub config: AppConfig,
    pub store: StudentStore,
    pub photos: PhotoStorage,
    pub templates: TemplateLibrary,
    pub sessions: TemplateSessions,
    /// Institution logo bytes, loaded once.
    pub logo: Option<Vec<u8>>,
}

impl AppState {
    pub fn from_config(config: AppConfig) -> Result<Self, StoreError> {
        config.ensure_dirs()?;
        let store = StudentStore::open(&config.database_path)?;

        let cloud = config.bucket.as_ref().map(|bucket| {
            info!(
                "Cloud photo bucket at {} served from {}",
                bucket.root.display(),
                bucket.public_url
            );
            Box::new(MountedBucket::new(&bucket.root, bucket.public_url.as_str()))
                as Box<dyn ObjectStore>
        });
        let photos = PhotoStorage::new(LocalPhotoStore::new(&config.upload_dir), cloud);

        let logo = config
            .logo_path
            .as_ref()
            .and_then(|path| match std::fs::read(path) {
                Ok(bytes) => Some(bytes),
                Err(e) => {
                    warn!("Logo {} could not be read, certificates will omit it: {}", path.display(), e);
                    None
                }
            });

        Ok(AppState {
            templates: TemplateLibrary::new(&config.template_dir),
            sessions: TemplateSessions::new(),
            store,
            photos,
            logo,
            config,
        })
    }

    /// Rendering inputs backed by this state.
    pub fn render_context(&self) -> RenderContext<'_> {
        RenderContext::new(&self.photos).with_logo(self.logo.as_deref())
    }
}
