//! The image resolution collaborator the mapping engine calls for every
//! block-level `img`.

use crate::resource::ResourceError;
use async_trait::async_trait;
use std::fmt::Debug;
use std::future::Future;

/// Turns an image `src` into something the rendering engine can embed,
/// normally a `data:` URL.
#[async_trait]
pub trait ImageResolver: Send + Sync + Debug {
    async fn resolve(&self, src: &str) -> Result<String, ResourceError>;
}

/// Hands every `src` back unchanged. Performs no I/O.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughImageResolver;

#[async_trait]
impl ImageResolver for PassthroughImageResolver {
    async fn resolve(&self, src: &str) -> Result<String, ResourceError> {
        Ok(src.to_string())
    }
}

/// Adapts an async closure into an [`ImageResolver`].
pub struct FnImageResolver<F> {
    resolve: F,
}

impl<F> FnImageResolver<F> {
    pub fn new(resolve: F) -> Self {
        Self { resolve }
    }
}

impl<F> Debug for FnImageResolver<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnImageResolver")
    }
}

#[async_trait]
impl<F, Fut> ImageResolver for FnImageResolver<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, ResourceError>> + Send,
{
    async fn resolve(&self, src: &str) -> Result<String, ResourceError> {
        (self.resolve)(src.to_string()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_passthrough_keeps_src() {
        let resolver = PassthroughImageResolver;
        assert_eq!(resolver.resolve("logo.png").await.unwrap(), "logo.png");
    }

    #[tokio::test]
    async fn test_closure_resolver() {
        let resolver = FnImageResolver::new(|src: String| async move {
            if src.starts_with("http") {
                Ok(format!("data:image/png;base64,{}", src.len()))
            } else {
                Err(ResourceError::NotFound(src))
            }
        });
        assert_eq!(
            resolver.resolve("http://x").await.unwrap(),
            "data:image/png;base64,8"
        );
        assert!(matches!(
            resolver.resolve("nope").await,
            Err(ResourceError::NotFound(_))
        ));
    }
}
