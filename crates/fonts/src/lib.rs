//! Font resources, offline bundles and CJK fallback.
//!
//! Fonts reach the rendering engine as a virtual file system (file name to
//! base64 payload) plus per-family definitions naming the file of each
//! variant. This crate builds both from explicit byte resources, offline
//! bundles and network fetches, backfills missing variants, and writes the
//! result into a shared [`FontRegistry`].

pub mod cjk;
pub mod detect;
pub mod error;
pub mod fallback;
pub mod loader;
pub mod offline;
pub mod registry;
pub mod resolver;
pub mod resource;
pub mod vfs;

pub use cjk::{DEFAULT_CJK_FAMILY, DEFAULT_CJK_FONT_URL, DefaultCjkOptions, load_default_cjk_font};
pub use detect::{
    DocumentFontCheck, RequiredFontTypes, detect_fonts_from_vfs, detect_required_font_types,
    select_best_font, validate_offline_fonts_for_document,
};
pub use error::FontError;
pub use fallback::{
    FontFallbackConfig, create_font_fallback, ensure_font_definition_complete, merge_font_configs,
    merge_with_priority, resolve_font_fallback,
};
pub use loader::{FontUrlSet, build_font_resource_from_urls};
pub use offline::{OfflineFontsOptions, ProcessedOfflineFonts, VfsSource, process_offline_fonts};
pub use registry::FontRegistry;
pub use resolver::{FontResolver, ResolvedFonts};
pub use resource::{
    FontDefinition, FontDefinitions, FontResource, FontVariant, OfflineFontConfig, Vfs,
    build_font_definitions, build_vfs_for_font, config_from_resources,
};
pub use vfs::{VfsConsistency, validate_font_definitions, validate_vfs, validate_vfs_consistency};
