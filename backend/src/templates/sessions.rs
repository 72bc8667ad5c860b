//! Per-session memory of the last uploaded template.
//!
//! A session is identified by a random cookie value. The map is shared by
//! every worker as `web::Data` and guarded by an async `RwLock`: lookups from
//! fill requests read concurrently, uploads write.
//!
//! Entries are never evicted; the map lives until the process restarts.

use super::UploadedTemplate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "sportsdesk_session";

#[derive(Clone, Default)]
pub struct TemplateSessions {
    templates: Arc<RwLock<HashMap<String, UploadedTemplate>>>,
}

impl TemplateSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_session_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Records `template` for `session`, returning the one it replaces.
    pub async fn set(&self, session: &str, template: UploadedTemplate) -> Option<UploadedTemplate> {
        let mut templates = self.templates.write().await;
        templates.insert(session.to_string(), template)
    }

    pub async fn get(&self, session: &str) -> Option<UploadedTemplate> {
        let templates = self.templates.read().await;
        templates.get(session).cloned()
    }
}
