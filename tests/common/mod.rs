pub mod fixtures;

use quire::fonts::DEFAULT_CJK_FONT_URL;
use quire::traits::InMemoryFetcher;
use std::sync::Arc;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub const PNG_BYTES: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A fetcher serving the default CJK font and one PNG image.
pub fn offline_web() -> Result<Arc<InMemoryFetcher>, Box<dyn std::error::Error>> {
    let fetcher = InMemoryFetcher::new()
        .with(DEFAULT_CJK_FONT_URL, vec![0, 1, 0, 0])?
        .with("https://img.test/logo.png", PNG_BYTES.to_vec())?;
    Ok(Arc::new(fetcher))
}
