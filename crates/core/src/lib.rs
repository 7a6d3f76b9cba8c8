//! # quire-core
//!
//! Turns a parsed markdown/HTML tree into a complete document definition
//! for the print-layout engine:
//! - **converter**: maps content, resolves fonts and registers them
//! - **options**: serde configuration for one conversion
//! - **document**: the definition handed to the engine
//! - **error**: the pipeline error type

pub use quire_fonts as fonts;
pub use quire_idf as idf;
pub use quire_mapping as mapping;
pub use quire_style as style;
pub use quire_traits as traits;

pub mod converter;
pub mod document;
pub mod error;
pub mod options;

pub use converter::Converter;
pub use document::{DefaultStyle, DocumentDefinition};
pub use error::PipelineError;
pub use options::ConversionOptions;
