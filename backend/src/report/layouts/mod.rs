pub mod detailed;
pub mod edited;
pub mod eligibility;
pub mod hod_bonafide;
pub mod tournament;

pub use edited::EditedContent;

use crate::photos::PhotoResolver;

/// External inputs a layout may draw on while rendering.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub photos: &'a dyn PhotoResolver,
    /// Institution logo printed on HOD certificates.
    pub logo: Option<&'a [u8]>,
    /// Title and content of a free-form report.
    pub edited: Option<EditedContent<'a>>,
}

impl<'a> RenderContext<'a> {
    pub fn new(photos: &'a dyn PhotoResolver) -> Self {
        RenderContext {
            photos,
            logo: None,
            edited: None,
        }
    }

    pub fn with_logo(mut self, logo: Option<&'a [u8]>) -> Self {
        self.logo = logo;
        self
    }

    pub fn with_edited(mut self, title: &'a str, content: &'a str) -> Self {
        self.edited = Some(EditedContent { title, content });
        self
    }
}

pub(crate) fn or_empty(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("")
}
