//! Processor dispatch.
//!
//! Handlers are tried in registration order and the first whose
//! [`NodeProcessor::can_handle`] accepts an element wins. Elements nobody
//! claims are flattened to a paragraph so no text is dropped.

use async_trait::async_trait;
use futures::future::BoxFuture;
use quire_idf::{ContentNode, Element, SemanticNode};
use quire_traits::ImageResolver;
use std::fmt::Debug;

use crate::processors::{
    BlockquoteProcessor, BreakProcessor, CodeProcessor, HeadingProcessor,
    HorizontalRuleProcessor, ImageProcessor, ListProcessor, ParagraphProcessor, SvgProcessor,
    TableProcessor,
};

/// Builds content for one family of elements.
#[async_trait]
pub trait NodeProcessor: Send + Sync + Debug {
    fn can_handle(&self, element: &Element) -> bool;

    async fn process(&self, element: &Element, ctx: &ProcessContext<'_>) -> Vec<ContentNode>;
}

/// What a processor can reach while it runs: the image resolver, and
/// [`visit`](Self::visit) to map arbitrary subtrees through the same
/// dispatcher.
#[derive(Debug, Clone, Copy)]
pub struct ProcessContext<'a> {
    manager: &'a ProcessorManager,
    image_resolver: &'a dyn ImageResolver,
}

impl<'a> ProcessContext<'a> {
    pub fn new(manager: &'a ProcessorManager, image_resolver: &'a dyn ImageResolver) -> Self {
        Self {
            manager,
            image_resolver,
        }
    }

    pub fn image_resolver(&self) -> &'a dyn ImageResolver {
        self.image_resolver
    }

    pub fn visit<'b>(&'b self, node: &'b SemanticNode) -> BoxFuture<'b, Vec<ContentNode>> {
        self.manager.process_node(node, self)
    }

    /// [`visit`](Self::visit) for an element that is not wrapped in a node.
    pub async fn visit_element(&self, element: &Element) -> Vec<ContentNode> {
        self.manager.process_element(element, self).await
    }
}

#[derive(Debug, Default)]
pub struct ProcessorManager {
    processors: Vec<Box<dyn NodeProcessor>>,
}

impl ProcessorManager {
    /// A manager with no processors; every element takes the fallback path.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut manager = Self::new();
        manager.register(HeadingProcessor);
        manager.register(ParagraphProcessor);
        manager.register(BlockquoteProcessor);
        manager.register(ListProcessor);
        manager.register(TableProcessor);
        manager.register(ImageProcessor);
        manager.register(CodeProcessor);
        manager.register(BreakProcessor);
        manager.register(HorizontalRuleProcessor);
        manager.register(SvgProcessor);
        manager
    }

    pub fn register(&mut self, processor: impl NodeProcessor + 'static) {
        self.processors.push(Box::new(processor));
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// Maps one node. Roots flatten their children in order; bare text
    /// outside a block produces nothing.
    pub fn process_node<'b>(
        &'b self,
        node: &'b SemanticNode,
        ctx: &'b ProcessContext<'_>,
    ) -> BoxFuture<'b, Vec<ContentNode>> {
        Box::pin(async move {
            match node {
                SemanticNode::Root { children } => {
                    let mut results = Vec::new();
                    for child in children {
                        results.extend(self.process_node(child, ctx).await);
                    }
                    results
                }
                SemanticNode::Element(element) => self.process_element(element, ctx).await,
                SemanticNode::Text(_) => Vec::new(),
            }
        })
    }

    pub fn process_element<'b>(
        &'b self,
        element: &'b Element,
        ctx: &'b ProcessContext<'_>,
    ) -> BoxFuture<'b, Vec<ContentNode>> {
        Box::pin(async move {
            match self.processors.iter().find(|p| p.can_handle(element)) {
                Some(processor) => processor.process(element, ctx).await,
                None => fallback(element),
            }
        })
    }
}

fn fallback(element: &Element) -> Vec<ContentNode> {
    let text = element.text_content();
    if text.is_empty() {
        return Vec::new();
    }
    log::debug!("No processor for <{}>, flattening its text", element.tag);
    vec![ContentNode::text(text, "p")]
}
