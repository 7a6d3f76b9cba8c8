//! Pending inline runs and the blocks already built from them.
//!
//! Paragraphs and list items interleave text with block children. Runs
//! accumulate until a block child arrives; the buffer is then flushed into
//! a text node through its finalizer and the block is committed after it.

use quire_idf::{ContentNode, Inline};

pub struct RunBuffer<F>
where
    F: Fn(Vec<Inline>) -> Option<ContentNode>,
{
    pending: Vec<Inline>,
    committed: Vec<ContentNode>,
    finalize: F,
}

impl<F> RunBuffer<F>
where
    F: Fn(Vec<Inline>) -> Option<ContentNode>,
{
    pub fn new(finalize: F) -> Self {
        Self {
            pending: Vec::new(),
            committed: Vec::new(),
            finalize,
        }
    }

    pub fn push(&mut self, run: Inline) {
        self.pending.push(run);
    }

    pub fn push_runs(&mut self, runs: impl IntoIterator<Item = Inline>) {
        self.pending.extend(runs);
    }

    pub fn pending(&self) -> &[Inline] {
        &self.pending
    }

    /// True before anything was pushed or committed.
    pub fn is_untouched(&self) -> bool {
        self.pending.is_empty() && self.committed.is_empty()
    }

    /// Turns pending runs into a block. A finalizer returning `None`
    /// discards them.
    pub fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let runs = std::mem::take(&mut self.pending);
        if let Some(node) = (self.finalize)(runs) {
            self.committed.push(node);
        }
    }

    /// Flushes, then appends `blocks` after the flushed text.
    pub fn commit(&mut self, blocks: impl IntoIterator<Item = ContentNode>) {
        self.flush();
        self.committed.extend(blocks);
    }

    pub fn finish(mut self) -> Vec<ContentNode> {
        self.flush();
        self.committed
    }
}
