//! Undo/redo history of whole-canvas snapshots.
//!
//! Each entry is the full raster as it looked before an edit. Snapshots
//! share their buffers, so moving one between stacks never copies pixels.

use std::collections::VecDeque;

use crate::surface::{Snapshot, Surface};

/// Manages the undo/redo stacks for one canvas
#[derive(Debug, Default)]
pub struct HistoryManager {
    /// Oldest entry at the front.
    undo_stack: VecDeque<Snapshot>,
    redo_stack: Vec<Snapshot>,
    /// Maximum undo depth; 0 keeps every entry.
    max_depth: usize,
}

impl HistoryManager {
    /// Unbounded history
    pub fn new() -> Self {
        Self::default()
    }

    /// History that drops its oldest entry beyond `max_depth` (0 = unbounded)
    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    /// Record the canvas as it is now, before an edit is applied
    pub fn record_state(&mut self, canvas: &Surface) {
        self.push(canvas.snapshot());
    }

    /// Record an already captured pre-edit snapshot
    pub fn push(&mut self, snapshot: Snapshot) {
        self.redo_stack.clear();
        self.undo_stack.push_back(snapshot);

        if self.max_depth > 0 && self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front();
        }
    }

    /// Step back one edit. Returns false (and leaves the canvas alone) when
    /// there is nothing to undo.
    pub fn undo(&mut self, canvas: &mut Surface) -> bool {
        let Some(previous) = self.undo_stack.pop_back() else {
            return false;
        };
        self.redo_stack.push(canvas.snapshot());
        canvas.restore(&previous);
        tracing::debug!(
            undo = self.undo_stack.len(),
            redo = self.redo_stack.len(),
            "Undo applied"
        );
        true
    }

    /// Re-apply the most recently undone edit
    pub fn redo(&mut self, canvas: &mut Surface) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        self.undo_stack.push_back(canvas.snapshot());
        canvas.restore(&next);
        tracing::debug!(
            undo = self.undo_stack.len(),
            redo = self.redo_stack.len(),
            "Redo applied"
        );
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
