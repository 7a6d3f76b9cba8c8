use quire_traits::ResourceError;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum FontError {
    /// The offline bundle as a whole is unusable.
    #[error("Invalid offline font bundle: {0}")]
    InvalidBundle(String),

    #[error("Font {family}: normal weight is required but not found")]
    MissingNormal { family: String },

    #[error("No fonts available for fallback")]
    NoFontsAvailable,

    #[error("Failed to fetch font: {0}")]
    Fetch(#[from] ResourceError),
}
