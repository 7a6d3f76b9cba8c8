pub mod image;
pub mod resource;

pub use image::{FnImageResolver, ImageResolver, PassthroughImageResolver};
pub use resource::{InMemoryFetcher, ResourceError, ResourceFetcher, SharedResourceData};
