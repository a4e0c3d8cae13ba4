//! Compiled-in character content and the loading seam hosts plug into.

use std::convert::Infallible;
use std::sync::OnceLock;

use crate::data::ContentData;

const BUILTIN_CONTENT_DATA: &str = include_str!("../assets/characters.json");

/// Source of character content. Platform-specific implementations
/// provide this; the session validates whatever a source produces
/// before play starts.
pub trait ContentSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Produce a full content set.
    ///
    /// # Errors
    ///
    /// Returns an error if the content cannot be loaded or parsed.
    fn load_content(&self) -> Result<ContentData, Self::Error>;
}

/// The compiled-in content set: deer, turtle, bear, and bee.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinContent;

impl ContentSource for BuiltinContent {
    type Error = Infallible;

    fn load_content(&self) -> Result<ContentData, Self::Error> {
        Ok(builtin().clone())
    }
}

/// Content parsed from host-supplied JSON text.
#[derive(Debug, Clone)]
pub struct JsonContent(pub String);

impl ContentSource for JsonContent {
    type Error = serde_json::Error;

    fn load_content(&self) -> Result<ContentData, Self::Error> {
        ContentData::from_json(&self.0)
    }
}

/// The compiled-in content, parsed once.
#[must_use]
pub fn builtin() -> &'static ContentData {
    static CONTENT: OnceLock<ContentData> = OnceLock::new();
    CONTENT.get_or_init(|| serde_json::from_str(BUILTIN_CONTENT_DATA).unwrap_or_default())
}
