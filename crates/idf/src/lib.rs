//! Intermediate Document Format (IDF)
//!
//! The two trees the mapping engine works between: the parser-produced
//! [`SemanticNode`] tree it reads, and the [`ContentNode`] tree it writes
//! for the rendering engine.

pub mod content;
pub mod semantic;

pub use content::{
    BlockProps, CanvasLine, CanvasShape, ContentNode, ImageNode, Inline, ListItems, ListNode,
    RuleNode, StackNode, StyleRefs, StyledText, SvgNode, TableBody, TableNode, TextContent,
    TextNode,
};
pub use semantic::{Element, SemanticNode, TreeError};
