//! Completeness backfill, the family fallback chain and config merging.

use crate::error::FontError;
use crate::resource::{FontDefinition, FontDefinitions, FontVariant, OfflineFontConfig, Vfs};

/// Fills the missing variants of a family from the ones it has.
///
/// Bold and italics fall back to normal; bold-italic tries bold, then
/// italics, then normal. A variant naming a file absent from `vfs` counts
/// as missing.
///
/// # Errors
///
/// Returns `FontError::MissingNormal` when the normal face itself is absent.
pub fn ensure_font_definition_complete(
    family: &str,
    definition: &FontDefinition,
    vfs: &Vfs,
) -> Result<FontDefinition, FontError> {
    let present = |variant: FontVariant| {
        definition
            .get(variant)
            .filter(|file| vfs.contains_key(*file))
            .map(str::to_string)
    };

    let normal = present(FontVariant::Normal).ok_or_else(|| FontError::MissingNormal {
        family: family.to_string(),
    })?;
    let bold = present(FontVariant::Bold);
    let italics = present(FontVariant::Italics);
    let bolditalics = present(FontVariant::BoldItalics)
        .or_else(|| bold.clone())
        .or_else(|| italics.clone())
        .unwrap_or_else(|| normal.clone());

    Ok(FontDefinition {
        bold: Some(bold.unwrap_or_else(|| normal.clone())),
        italics: Some(italics.unwrap_or_else(|| normal.clone())),
        bolditalics: Some(bolditalics),
        normal,
    })
}

/// Backfills every family, dropping those without a normal face.
///
/// Returns the surviving definitions and one warning per dropped family.
pub fn complete_definitions(definitions: &FontDefinitions, vfs: &Vfs) -> (FontDefinitions, Vec<String>) {
    let mut complete = FontDefinitions::new();
    let mut warnings = Vec::new();
    for (family, definition) in definitions {
        match ensure_font_definition_complete(family, definition, vfs) {
            Ok(def) => {
                complete.insert(family.clone(), def);
            }
            Err(e) => {
                log::warn!("Dropping font family {}: {}", family, e);
                warnings.push(format!("Font {} skipped: {}", family, e));
            }
        }
    }
    (complete, warnings)
}

/// Ordered families to try when a requested one is unavailable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFallbackConfig {
    pub primary_font: Option<String>,
    pub fallback_fonts: Vec<String>,
    /// Permit the engine's built-in `Helvetica` as the last resort.
    pub allow_system_fonts: bool,
}

const SYSTEM_FALLBACKS: [&str; 3] = ["Helvetica", "Arial", "sans-serif"];

impl Default for FontFallbackConfig {
    fn default() -> Self {
        Self {
            primary_font: None,
            fallback_fonts: SYSTEM_FALLBACKS.iter().map(|s| s.to_string()).collect(),
            allow_system_fonts: true,
        }
    }
}

impl FontFallbackConfig {
    /// The chain used for CJK documents.
    pub fn cjk() -> Self {
        Self {
            primary_font: None,
            fallback_fonts: ["NotoSansSC", "Microsoft YaHei", "SimHei", "sans-serif"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            allow_system_fonts: true,
        }
    }
}

/// Builds a chain headed by `preferred` when it is available, otherwise by
/// the first available family.
pub fn create_font_fallback(config: &OfflineFontConfig, preferred: Option<&str>) -> FontFallbackConfig {
    let available = &config.available_fonts;
    if let Some(preferred) = preferred.filter(|p| config.has_family(p)) {
        return FontFallbackConfig {
            primary_font: Some(preferred.to_string()),
            fallback_fonts: available.iter().filter(|f| *f != preferred).cloned().collect(),
            allow_system_fonts: true,
        };
    }
    FontFallbackConfig {
        primary_font: available.first().cloned(),
        fallback_fonts: available
            .iter()
            .skip(1)
            .cloned()
            .chain(SYSTEM_FALLBACKS.iter().map(|s| s.to_string()))
            .collect(),
        allow_system_fonts: true,
    }
}

/// Resolves `requested` to a usable family.
///
/// Tries the request, the primary font, each fallback, then the first
/// available family, then `Helvetica` if system fonts are allowed.
///
/// # Errors
///
/// Returns `FontError::NoFontsAvailable` when every step fails.
pub fn resolve_font_fallback(
    requested: &str,
    config: &OfflineFontConfig,
    fallback: &FontFallbackConfig,
) -> Result<String, FontError> {
    let candidates = std::iter::once(requested)
        .chain(fallback.primary_font.as_deref())
        .chain(fallback.fallback_fonts.iter().map(String::as_str));
    for candidate in candidates {
        if config.has_family(candidate) {
            return Ok(candidate.to_string());
        }
    }
    if let Some(first) = config.available_fonts.first() {
        return Ok(first.clone());
    }
    if fallback.allow_system_fonts {
        return Ok("Helvetica".to_string());
    }
    Err(FontError::NoFontsAvailable)
}

/// Merges configs in order. The first config to define a family or a file
/// keeps it; later duplicates are logged and skipped.
pub fn merge_font_configs(configs: &[&OfflineFontConfig]) -> OfflineFontConfig {
    let mut merged = OfflineFontConfig::default();
    for config in configs {
        for (file, payload) in &config.vfs {
            if merged.vfs.contains_key(file) {
                log::debug!("Font file {} already present, keeping the first copy", file);
                continue;
            }
            merged.vfs.insert(file.clone(), payload.clone());
        }
        for (family, definition) in &config.font_definitions {
            if merged.font_definitions.contains_key(family) {
                log::warn!("Font conflict: {} already exists, skipping duplicate", family);
                continue;
            }
            merged.font_definitions.insert(family.clone(), definition.clone());
        }
        for family in &config.available_fonts {
            if !merged.has_family(family) {
                merged.available_fonts.push(family.clone());
            }
        }
    }
    merged
}

/// `primary` wins every collision with `secondary`.
pub fn merge_with_priority(primary: &OfflineFontConfig, secondary: &OfflineFontConfig) -> OfflineFontConfig {
    merge_font_configs(&[primary, secondary])
}
