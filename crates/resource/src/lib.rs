//! Resource acquisition for the quire pipeline.
//!
//! ## Available Implementations
//!
//! - [`HttpFetcher`]: fetches bytes over HTTP(S) with reqwest
//! - [`DefaultImageResolver`]: turns image sources into data URLs
//!
//! The in-memory fetcher from quire-traits is re-exported for offline use.

mod http;
mod image;

pub use http::HttpFetcher;
pub use image::{DefaultImageResolver, sniff_mime_type, to_data_url};

pub use quire_traits::InMemoryFetcher;
