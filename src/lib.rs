//! # quire
//!
//! Converts a parsed markdown/HTML tree into a document definition for a
//! print-layout engine, resolving images and fonts along the way.
//!
//! ```no_run
//! use quire::{ConversionOptions, Converter};
//!
//! # async fn run(hast: &str) -> Result<(), quire::PipelineError> {
//! let converter = Converter::new(ConversionOptions::default());
//! let document = converter.convert_json(hast, None).await?;
//! println!("{}", document.to_json_pretty()?);
//! # Ok(())
//! # }
//! ```

pub use quire_core::{ConversionOptions, Converter, DefaultStyle, DocumentDefinition, PipelineError};

pub use quire_fonts as fonts;
pub use quire_idf as idf;
pub use quire_mapping as mapping;
pub use quire_resource as resource;
pub use quire_style as style;
pub use quire_traits as traits;
pub use quire_types as types;

pub use quire_idf::{ContentNode, SemanticNode};
pub use quire_mapping::{MapContext, map_tree_to_content};
