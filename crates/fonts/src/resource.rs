//! Font data as it travels to the rendering engine.
//!
//! The engine reads fonts from a virtual file system (logical file name to
//! base64 payload) and a per-family table naming the file for each variant.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Logical file name → base64 font payload, in insertion order.
pub type Vfs = IndexMap<String, String>;

/// Family name → definition, in insertion order.
pub type FontDefinitions = IndexMap<String, FontDefinition>;

/// The four faces the engine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontVariant {
    Normal,
    Bold,
    Italics,
    BoldItalics,
}

impl FontVariant {
    pub const ALL: [FontVariant; 4] = [
        FontVariant::Normal,
        FontVariant::Bold,
        FontVariant::Italics,
        FontVariant::BoldItalics,
    ];

    /// The suffix used in VFS file names.
    pub fn file_suffix(self) -> &'static str {
        match self {
            FontVariant::Normal => "Regular",
            FontVariant::Bold => "Bold",
            FontVariant::Italics => "Italic",
            FontVariant::BoldItalics => "BoldItalic",
        }
    }

    /// `{family}-{Suffix}.ttf`
    pub fn file_name(self, family: &str) -> String {
        format!("{}-{}.ttf", family, self.file_suffix())
    }
}

/// Raw font bytes for one family, supplied by the caller.
///
/// In JSON the byte fields are base64 strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontResource {
    #[serde(alias = "name")]
    pub family: String,
    #[serde(with = "base64_bytes")]
    pub normal: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "base64_bytes::option")]
    pub bold: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "base64_bytes::option")]
    pub italics: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "base64_bytes::option")]
    pub bolditalics: Option<Vec<u8>>,
}

impl FontResource {
    pub fn new(family: impl Into<String>, normal: Vec<u8>) -> Self {
        Self {
            family: family.into(),
            normal,
            bold: None,
            italics: None,
            bolditalics: None,
        }
    }

    pub fn with_variant(mut self, variant: FontVariant, data: Vec<u8>) -> Self {
        match variant {
            FontVariant::Normal => self.normal = data,
            FontVariant::Bold => self.bold = Some(data),
            FontVariant::Italics => self.italics = Some(data),
            FontVariant::BoldItalics => self.bolditalics = Some(data),
        }
        self
    }

    pub fn variant(&self, variant: FontVariant) -> Option<&[u8]> {
        match variant {
            FontVariant::Normal => Some(&self.normal),
            FontVariant::Bold => self.bold.as_deref(),
            FontVariant::Italics => self.italics.as_deref(),
            FontVariant::BoldItalics => self.bolditalics.as_deref(),
        }
    }
}

/// VFS file names for each variant of one family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontDefinition {
    pub normal: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italics: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bolditalics: Option<String>,
}

impl FontDefinition {
    pub fn new(normal: impl Into<String>) -> Self {
        Self {
            normal: normal.into(),
            ..Default::default()
        }
    }

    pub fn get(&self, variant: FontVariant) -> Option<&str> {
        match variant {
            FontVariant::Normal => Some(self.normal.as_str()).filter(|n| !n.is_empty()),
            FontVariant::Bold => self.bold.as_deref(),
            FontVariant::Italics => self.italics.as_deref(),
            FontVariant::BoldItalics => self.bolditalics.as_deref(),
        }
    }

    pub fn set(&mut self, variant: FontVariant, file: impl Into<String>) {
        let file = file.into();
        match variant {
            FontVariant::Normal => self.normal = file,
            FontVariant::Bold => self.bold = Some(file),
            FontVariant::Italics => self.italics = Some(file),
            FontVariant::BoldItalics => self.bolditalics = Some(file),
        }
    }

    /// Every referenced file name.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        FontVariant::ALL.into_iter().filter_map(|v| self.get(v))
    }

    /// All four variants are set and present in `vfs`.
    pub fn is_complete(&self, vfs: &Vfs) -> bool {
        FontVariant::ALL
            .into_iter()
            .all(|v| self.get(v).is_some_and(|f| vfs.contains_key(f)))
    }
}

/// A VFS paired with the families defined over it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfflineFontConfig {
    pub vfs: Vfs,
    pub font_definitions: FontDefinitions,
    pub available_fonts: Vec<String>,
}

impl OfflineFontConfig {
    pub fn is_empty(&self) -> bool {
        self.font_definitions.is_empty()
    }

    pub fn has_family(&self, family: &str) -> bool {
        self.available_fonts.iter().any(|f| f == family)
    }
}

/// Writes each supplied variant of `resource` under the naming convention.
pub fn build_vfs_for_font(resource: &FontResource) -> Vfs {
    FontVariant::ALL
        .into_iter()
        .filter_map(|variant| {
            resource
                .variant(variant)
                .map(|data| (variant.file_name(&resource.family), STANDARD.encode(data)))
        })
        .collect()
}

/// Definitions for explicit resources. Missing variants point at the
/// closest supplied file; bold-italic prefers bold over regular.
pub fn build_font_definitions(resources: &[FontResource]) -> FontDefinitions {
    resources
        .iter()
        .map(|r| {
            let name = |v: FontVariant| v.file_name(&r.family);
            let regular = name(FontVariant::Normal);
            let bold = if r.bold.is_some() { name(FontVariant::Bold) } else { regular.clone() };
            let definition = FontDefinition {
                bold: Some(bold.clone()),
                italics: Some(if r.italics.is_some() {
                    name(FontVariant::Italics)
                } else {
                    regular.clone()
                }),
                bolditalics: Some(if r.bolditalics.is_some() {
                    name(FontVariant::BoldItalics)
                } else {
                    bold
                }),
                normal: regular,
            };
            (r.family.clone(), definition)
        })
        .collect()
}

/// The VFS and definitions for a set of explicit resources.
pub fn config_from_resources(resources: &[FontResource]) -> OfflineFontConfig {
    let mut vfs = Vfs::new();
    for resource in resources {
        vfs.extend(build_vfs_for_font(resource));
    }
    let font_definitions = build_font_definitions(resources);
    OfflineFontConfig {
        vfs,
        available_fonts: font_definitions.keys().cloned().collect(),
        font_definitions,
    }
}

mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded.trim()).map_err(de::Error::custom)
    }

    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(bytes: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match bytes {
                Some(bytes) => super::serialize(bytes, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            #[derive(Deserialize)]
            struct Wrapper(#[serde(deserialize_with = "super::deserialize")] Vec<u8>);

            Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|Wrapper(bytes)| bytes))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_vfs_naming_convention() {
        let resource = FontResource::new("Inter", vec![1, 2, 3])
            .with_variant(FontVariant::Italics, vec![4]);
        let vfs = build_vfs_for_font(&resource);
        assert_eq!(
            vfs.keys().collect::<Vec<_>>(),
            ["Inter-Regular.ttf", "Inter-Italic.ttf"]
        );
        assert_eq!(vfs["Inter-Regular.ttf"], "AQID");
    }

    #[test]
    fn test_definitions_point_missing_variants_at_neighbours() {
        let defs = build_font_definitions(&[
            FontResource::new("A", vec![0]).with_variant(FontVariant::Bold, vec![1]),
            FontResource::new("B", vec![0]),
        ]);
        assert_eq!(defs["A"].bolditalics.as_deref(), Some("A-Bold.ttf"));
        assert_eq!(defs["A"].italics.as_deref(), Some("A-Regular.ttf"));
        assert_eq!(defs["B"].bold.as_deref(), Some("B-Regular.ttf"));
        assert_eq!(defs["B"].bolditalics.as_deref(), Some("B-Regular.ttf"));
    }

    #[test]
    fn test_resource_json_uses_base64() {
        let resource: FontResource =
            serde_json::from_value(json!({"name": "X", "normal": "AQID", "bold": "BA=="})).unwrap();
        assert_eq!(resource.family, "X");
        assert_eq!(resource.normal, vec![1, 2, 3]);
        assert_eq!(resource.bold, Some(vec![4]));
        assert_eq!(resource.italics, None);
        assert!(serde_json::from_value::<FontResource>(json!({"family": "X", "normal": "***"})).is_err());
    }

    #[test]
    fn test_completeness_check() {
        let mut vfs = Vfs::new();
        vfs.insert("F-Regular.ttf".into(), "AA==".into());
        let mut def = FontDefinition::new("F-Regular.ttf");
        assert!(!def.is_complete(&vfs));
        for v in [FontVariant::Bold, FontVariant::Italics, FontVariant::BoldItalics] {
            def.set(v, "F-Regular.ttf");
        }
        assert!(def.is_complete(&vfs));
    }
}
