use derive_more::{Display, Error};
use test_strategy::Arbitrary;

/// An image delivered by the upload collaborator.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Arbitrary)]
pub struct Upload {
    #[strategy("image/(png|jpeg|gif)")]
    media_type: String,
    #[strategy("file://[a-z]{1,8}\\.png")]
    reference: String,
}

/// The reason why an [`Upload`] was rejected.
#[derive(Debug, Display, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "only PNG uploads are allowed, got `{}`", _0)]
pub struct UnsupportedMedia(#[error(not(source))] pub String);

impl Upload {
    /// Constructs an [`Upload`] from its media type and embeddable reference.
    pub fn new(media_type: impl Into<String>, reference: impl Into<String>) -> Self {
        Upload {
            media_type: media_type.into(),
            reference: reference.into(),
        }
    }

    /// The media type the collaborator sniffed out of the content.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// The embeddable reference to the content.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Whether this upload holds a PNG image.
    pub fn is_png(&self) -> bool {
        self.media_type == "image/png"
    }
}
