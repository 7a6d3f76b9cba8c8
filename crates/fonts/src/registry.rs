//! The rendering engine's runtime font tables.
//!
//! Conversions write their resolved fonts here just before the document is
//! generated. Entries accumulate across conversions: registering merges into
//! the existing tables and never clears them.

use std::sync::{Arc, RwLock};

use tokio::sync::{Mutex, MutexGuard};

use crate::resource::{FontDefinition, FontDefinitions, OfflineFontConfig, Vfs};

/// A cheaply cloneable handle to the shared VFS and family tables.
#[derive(Debug, Clone, Default)]
pub struct FontRegistry {
    vfs: Arc<RwLock<Vfs>>,
    fonts: Arc<RwLock<FontDefinitions>>,
    registration: Arc<Mutex<()>>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds files to the VFS, overwriting files of the same name.
    pub fn add_virtual_file_system(&self, files: &Vfs) {
        if let Ok(mut vfs) = self.vfs.write() {
            vfs.extend(files.iter().map(|(k, v)| (k.clone(), v.clone())));
        } else {
            log::warn!("Font VFS lock poisoned, {} files not registered", files.len());
        }
    }

    /// Merges a config's files and families into the tables.
    pub fn register(&self, config: &OfflineFontConfig) {
        self.add_virtual_file_system(&config.vfs);
        if let Ok(mut fonts) = self.fonts.write() {
            for (family, definition) in &config.font_definitions {
                fonts.insert(family.clone(), definition.clone());
            }
            log::debug!(
                "Registered {} font families ({} total)",
                config.font_definitions.len(),
                fonts.len()
            );
        } else {
            log::warn!("Font table lock poisoned, families not registered");
        }
    }

    /// Held by a caller across resolve-and-register so concurrent
    /// conversions sharing this registry do not interleave.
    pub async fn registration_lock(&self) -> MutexGuard<'_, ()> {
        self.registration.lock().await
    }

    pub fn vfs_snapshot(&self) -> Vfs {
        self.vfs.read().map(|v| v.clone()).unwrap_or_default()
    }

    pub fn fonts_snapshot(&self) -> FontDefinitions {
        self.fonts.read().map(|f| f.clone()).unwrap_or_default()
    }

    pub fn font_definition(&self, family: &str) -> Option<FontDefinition> {
        self.fonts.read().ok()?.get(family).cloned()
    }

    pub fn file(&self, name: &str) -> Option<String> {
        self.vfs.read().ok()?.get(name).cloned()
    }

    pub fn families(&self) -> Vec<String> {
        self.fonts
            .read()
            .map(|f| f.keys().cloned().collect())
            .unwrap_or_default()
    }
}
