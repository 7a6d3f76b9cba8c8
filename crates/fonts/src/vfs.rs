//! Structural checks for caller-supplied font bundles.

use crate::resource::{FontDefinitions, Vfs};

/// Result of checking that every referenced file exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VfsConsistency {
    pub is_valid: bool,
    pub missing_files: Vec<String>,
}

/// Every value must look like non-empty base64.
pub fn validate_vfs(vfs: &Vfs) -> bool {
    vfs.values().all(|payload| looks_like_base64(payload))
}

/// Only the alphabet and up to two trailing `=` are checked, not the length.
fn looks_like_base64(payload: &str) -> bool {
    let body = payload.trim_end_matches('=');
    !payload.is_empty()
        && payload.len() - body.len() <= 2
        && body
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/')
}

/// Every family must name a `normal` file.
pub fn validate_font_definitions(definitions: &FontDefinitions) -> bool {
    definitions
        .iter()
        .all(|(family, def)| !family.is_empty() && !def.normal.is_empty())
}

pub fn validate_vfs_consistency(vfs: &Vfs, definitions: &FontDefinitions) -> VfsConsistency {
    let missing_files: Vec<String> = definitions
        .values()
        .flat_map(|def| def.files())
        .filter(|file| !vfs.contains_key(*file))
        .map(str::to_string)
        .collect();
    VfsConsistency {
        is_valid: missing_files.is_empty(),
        missing_files,
    }
}
