//! Runtime configuration read from the environment.
//!
//! An optional `.env` file in the working directory is loaded first, so a
//! deployment can keep its settings next to the database.

use log::warn;
use std::env;
use std::path::PathBuf;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATABASE: &str = "sportsdesk.sqlite";
const DEFAULT_UPLOAD_DIR: &str = "static/uploads";
const DEFAULT_TEMPLATE_DIR: &str = "static/templates";

/// Location of a mounted copy of the cloud photo bucket.
#[derive(Debug, Clone)]
pub struct BucketConfig {
    pub root: PathBuf,
    pub public_url: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub upload_dir: PathBuf,
    pub template_dir: PathBuf,
    /// Where serialized reports are written before download.
    pub scratch_dir: PathBuf,
    /// Institution logo placed on HOD certificates.
    pub logo_path: Option<PathBuf>,
    pub bucket: Option<BucketConfig>,
    pub open_browser: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let port = match env::var("SPORTSDESK_PORT") {
            Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!("Invalid SPORTSDESK_PORT {:?}, using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            Err(_) => DEFAULT_PORT,
        };

        let bucket = match (var("SPORTSDESK_BUCKET_DIR"), var("SPORTSDESK_BUCKET_URL")) {
            (Some(root), Some(public_url)) => Some(BucketConfig {
                root: PathBuf::from(root),
                public_url,
            }),
            (Some(_), None) | (None, Some(_)) => {
                warn!("SPORTSDESK_BUCKET_DIR and SPORTSDESK_BUCKET_URL must be set together; cloud photos disabled");
                None
            }
            (None, None) => None,
        };

        AppConfig {
            host: var("SPORTSDESK_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            database_path: path_var("SPORTSDESK_DATABASE", DEFAULT_DATABASE),
            upload_dir: path_var("SPORTSDESK_UPLOAD_DIR", DEFAULT_UPLOAD_DIR),
            template_dir: path_var("SPORTSDESK_TEMPLATE_DIR", DEFAULT_TEMPLATE_DIR),
            scratch_dir: var("SPORTSDESK_SCRATCH_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(env::temp_dir),
            logo_path: var("SPORTSDESK_LOGO").map(PathBuf::from),
            bucket,
            open_browser: var("SPORTSDESK_OPEN_BROWSER")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }

    /// A configuration rooted in `dir`, used by tests and local tooling.
    pub fn in_dir(dir: &std::path::Path) -> Self {
        AppConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_path: dir.join(DEFAULT_DATABASE),
            upload_dir: dir.join("uploads"),
            template_dir: dir.join("templates"),
            scratch_dir: dir.join("scratch"),
            logo_path: None,
            bucket: None,
            open_browser: false,
        }
    }

    /// Creates every directory the server writes into.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        for dir in [&self.upload_dir, &self.template_dir, &self.scratch_dir] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Reads a variable, treating blank values as unset.
fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn path_var(name: &str, default: &str) -> PathBuf {
    PathBuf::from(var(name).unwrap_or_else(|| default.to_string()))
}
