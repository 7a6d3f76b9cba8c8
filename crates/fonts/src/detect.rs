//! Family detection from VFS file names and script detection from text.

use crate::resource::{FontDefinition, FontDefinitions, OfflineFontConfig, Vfs};
use indexmap::IndexMap;

/// Families tried, in order, when text needs CJK coverage.
pub const KNOWN_CJK_FAMILIES: &[&str] = &[
    "NotoSansSC",
    "NotoSansTC",
    "NotoSansJP",
    "NotoSansKR",
    "SourceHanSans",
    "PingFang",
    "Hiragino",
    "Microsoft YaHei",
    "SimHei",
    "SimSun",
];

/// Name prefixes of families assumed to include CJK glyphs.
const CJK_FAMILY_PREFIXES: &[&str] = &[
    "noto", "source", "pingfang", "hiragino", "microsoft", "simhei", "simsun",
];

const FONT_EXTENSIONS: &[&str] = &[".ttf", ".otf", ".woff2", ".woff"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum FileWeight {
    Normal,
    Bold,
    Italic,
    BoldItalic,
    Medium,
}

/// Suffixes checked against the end of the stem. `BoldItalic` must come
/// before `Italic` so the longer match wins.
const WEIGHT_SUFFIXES: &[(&str, FileWeight)] = &[
    ("-regular", FileWeight::Normal),
    ("-normal", FileWeight::Normal),
    ("-bolditalic", FileWeight::BoldItalic),
    ("-boldoblique", FileWeight::BoldItalic),
    ("-bold", FileWeight::Bold),
    ("-italic", FileWeight::Italic),
    ("-oblique", FileWeight::Italic),
    ("-medium", FileWeight::Medium),
];

/// Splits `Family-Weight.ext` into the family and its weight. Files without
/// a recognised suffix are the family's normal face.
fn parse_font_file_name(file: &str) -> (String, FileWeight) {
    let lower = file.to_ascii_lowercase();
    let stem_len = FONT_EXTENSIONS
        .iter()
        .find(|ext| lower.ends_with(*ext))
        .map_or(file.len(), |ext| file.len() - ext.len());
    let stem = &file[..stem_len];
    let lower_stem = &lower[..stem_len];

    for (suffix, weight) in WEIGHT_SUFFIXES {
        if lower_stem.ends_with(suffix) {
            return (stem[..stem.len() - suffix.len()].to_string(), *weight);
        }
    }
    (stem.to_string(), FileWeight::Normal)
}

/// Groups VFS files into families by their suffix convention.
///
/// A family without a regular face borrows its medium face, or failing
/// that its first file.
pub fn detect_fonts_from_vfs(vfs: &Vfs) -> OfflineFontConfig {
    let mut groups: IndexMap<String, IndexMap<FileWeight, String>> = IndexMap::new();
    for file in vfs.keys() {
        let (family, weight) = parse_font_file_name(file);
        if family.is_empty() {
            log::debug!("Ignoring font file without a family name: {}", file);
            continue;
        }
        groups.entry(family).or_default().insert(weight, file.clone());
    }

    let mut font_definitions = FontDefinitions::new();
    for (family, weights) in groups {
        let normal = weights
            .get(&FileWeight::Normal)
            .or_else(|| weights.get(&FileWeight::Medium))
            .or_else(|| weights.values().next())
            .cloned();
        let Some(normal) = normal else {
            continue;
        };
        let definition = FontDefinition {
            normal,
            bold: weights.get(&FileWeight::Bold).cloned(),
            italics: weights.get(&FileWeight::Italic).cloned(),
            bolditalics: weights.get(&FileWeight::BoldItalic).cloned(),
        };
        font_definitions.insert(family, definition);
    }

    OfflineFontConfig {
        vfs: vfs.clone(),
        available_fonts: font_definitions.keys().cloned().collect(),
        font_definitions,
    }
}

/// Scripts present in a document's source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredFontTypes {
    pub needs_cjk: bool,
    pub needs_latin: bool,
    pub detected_languages: Vec<String>,
}

/// Kana, CJK unified ideographs with their extensions, and the
/// compatibility ideographs.
pub fn is_cjk_char(c: char) -> bool {
    matches!(
        c as u32,
        0x3040..=0x30FF
            | 0x3400..=0x4DBF
            | 0x4E00..=0x9FFF
            | 0xF900..=0xFAFF
            | 0x20000..=0x2A6DF
            | 0x2A700..=0x2EBEF
            | 0x2F800..=0x2FA1F
            | 0x30000..=0x3134F
    )
}

pub fn detect_required_font_types(text: &str) -> RequiredFontTypes {
    let needs_cjk = text.chars().any(is_cjk_char);
    let needs_latin = text.chars().any(|c| c.is_ascii_alphabetic());
    let mut detected_languages = Vec::new();
    if needs_cjk {
        detected_languages.push("cjk".to_string());
    }
    if needs_latin {
        detected_languages.push("latin".to_string());
    }
    RequiredFontTypes {
        needs_cjk,
        needs_latin,
        detected_languages,
    }
}

/// Whether a family name suggests CJK coverage.
pub fn covers_cjk(family: &str) -> bool {
    let lower = family.to_lowercase();
    CJK_FAMILY_PREFIXES.iter().any(|p| lower.starts_with(p))
}

/// Picks the default family for a document.
///
/// CJK text prefers `preferred_cjk`, then the known CJK families; anything
/// else takes the first available family.
pub fn select_best_font(
    required: &RequiredFontTypes,
    available: &[String],
    preferred_cjk: Option<&str>,
) -> Option<String> {
    if required.needs_cjk {
        let candidates = preferred_cjk.into_iter().chain(KNOWN_CJK_FAMILIES.iter().copied());
        for candidate in candidates {
            if available.iter().any(|f| f == candidate) {
                return Some(candidate.to_string());
            }
        }
    }
    available.first().cloned()
}

/// Whether a bundle can render a document on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFontCheck {
    pub can_satisfy: bool,
    pub required_types: RequiredFontTypes,
    pub recommendations: Vec<String>,
}

pub fn validate_offline_fonts_for_document(config: &OfflineFontConfig, text: &str) -> DocumentFontCheck {
    let required_types = detect_required_font_types(text);
    let mut recommendations = Vec::new();

    if required_types.needs_cjk && !config.available_fonts.iter().any(|f| covers_cjk(f)) {
        recommendations.push(
            "Consider adding a CJK font (e.g., NotoSansSC) for Chinese/Japanese/Korean text".to_string(),
        );
    }
    if required_types.needs_latin && config.available_fonts.is_empty() {
        recommendations.push("At least one font is required for Latin text".to_string());
    }

    DocumentFontCheck {
        can_satisfy: recommendations.is_empty(),
        required_types,
        recommendations,
    }
}
