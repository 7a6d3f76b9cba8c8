//! The tree-mapping engine.
//!
//! [`map_tree_to_content`] walks a [`SemanticNode`] tree through a
//! [`ProcessorManager`] and returns the ordered content nodes the rendering
//! engine lays out. Images are resolved through the [`ImageResolver`] in the
//! [`MapContext`]; everything else is pure.

pub mod blocks;
pub mod buffer;
pub mod inline;
pub mod processor;
pub mod processors;
pub mod svg;
pub mod utils;

use quire_idf::{ContentNode, SemanticNode};
use quire_traits::{ImageResolver, PassthroughImageResolver};
use std::sync::Arc;
use thiserror::Error;

pub use buffer::RunBuffer;
pub use inline::{TextStyle, inline};
pub use processor::{NodeProcessor, ProcessContext, ProcessorManager};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapError {
    #[error("Cannot map a tree whose root is a {0} node")]
    InvalidRoot(&'static str),
}

/// Collaborators for a single mapping call.
#[derive(Debug, Clone, Default)]
pub struct MapContext {
    /// Defaults to a pass-through resolver that performs no I/O.
    pub image_resolver: Option<Arc<dyn ImageResolver>>,
}

impl MapContext {
    pub fn with_image_resolver(resolver: Arc<dyn ImageResolver>) -> Self {
        Self {
            image_resolver: Some(resolver),
        }
    }
}

/// Maps a document tree to content nodes with the default processors.
///
/// The only failure is a root that is not a document or element node.
pub async fn map_tree_to_content(
    tree: &SemanticNode,
    ctx: &MapContext,
) -> Result<Vec<ContentNode>, MapError> {
    ProcessorManager::with_defaults().map_tree(tree, ctx).await
}

impl ProcessorManager {
    /// Maps a document tree with this manager's processors.
    pub async fn map_tree(
        &self,
        tree: &SemanticNode,
        ctx: &MapContext,
    ) -> Result<Vec<ContentNode>, MapError> {
        if let SemanticNode::Text(_) = tree {
            return Err(MapError::InvalidRoot(tree.kind()));
        }
        let passthrough = PassthroughImageResolver;
        let resolver: &dyn ImageResolver = match &ctx.image_resolver {
            Some(resolver) => resolver.as_ref(),
            None => &passthrough,
        };
        let process_ctx = ProcessContext::new(self, resolver);
        let content = self.process_node(tree, &process_ctx).await;
        log::debug!("Mapped tree to {} top-level content nodes", content.len());
        Ok(content)
    }
}
