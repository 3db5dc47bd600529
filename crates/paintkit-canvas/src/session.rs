//! One open canvas: pixels, overlay, history, tool and file state.

use std::path::{Path, PathBuf};

use paintkit_core::{CanvasError, Point, Rgba};

use crate::file_io::{self, FileIoError, FileIoResult, SaveDecision};
use crate::history::HistoryManager;
use crate::style::ShapeStyle;
use crate::surface::{Snapshot, Surface};
use crate::tools::{Layers, ToolController, ToolKind, ToolOutcome, ToolParams};
use crate::transform::CanvasTransform;

/// Result of a save-as request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(PathBuf),
    /// Nothing was written; the caller must confirm and retry with `force`.
    NeedsConfirmation(SaveDecision),
}

/// Editing state for a single canvas.
///
/// Each session owns its history, so undo in one tab never touches another.
#[derive(Debug)]
pub struct EditorSession {
    canvas: Surface,
    overlay: Surface,
    history: HistoryManager,
    style: ShapeStyle,
    params: ToolParams,
    controller: Option<ToolController>,
    file: Option<PathBuf>,
    dirty: bool,
}

impl EditorSession {
    /// A white canvas of the given size.
    pub fn new(width: u32, height: u32) -> Result<Self, CanvasError> {
        Self::with_background(width, height, Rgba::WHITE)
    }

    pub fn with_background(width: u32, height: u32, background: Rgba) -> Result<Self, CanvasError> {
        Ok(Self {
            canvas: Surface::filled(width, height, background)?,
            overlay: Surface::transparent(width, height)?,
            history: HistoryManager::new(),
            style: ShapeStyle::default(),
            params: ToolParams::default(),
            controller: None,
            file: None,
            dirty: false,
        })
    }

    /// Cap the undo stack (0 = unbounded). Existing history is discarded.
    pub fn with_history_depth(mut self, depth: usize) -> Self {
        self.history = HistoryManager::with_depth(depth);
        self
    }

    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_params(mut self, params: ToolParams) -> Self {
        self.params = params;
        self
    }

    pub fn canvas(&self) -> &Surface {
        &self.canvas
    }

    pub fn overlay(&self) -> &Surface {
        &self.overlay
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn style(&self) -> &ShapeStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    pub fn params(&self) -> &ToolParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut ToolParams {
        &mut self.params
    }

    pub fn snapshot(&self) -> Snapshot {
        self.canvas.snapshot()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn tool(&self) -> Option<ToolKind> {
        self.controller.as_ref().map(ToolController::kind)
    }

    pub fn tool_active(&self) -> bool {
        self.controller.as_ref().is_some_and(ToolController::is_active)
    }

    /// Switch to `kind` and activate it. Any gesture of the previous tool is
    /// discarded first.
    pub fn select_tool(&mut self, kind: ToolKind) {
        if let Some(previous) = self.controller.as_mut() {
            previous.set_active(false, &mut self.canvas, &mut self.overlay);
        }
        let mut controller = ToolController::new(kind.create());
        controller.set_active(true, &mut self.canvas, &mut self.overlay);
        self.controller = Some(controller);
        tracing::debug!("Selected {} tool", kind);
    }

    /// Toggle the current tool. Returns false when no tool is selected.
    pub fn set_tool_active(&mut self, active: bool) -> bool {
        match self.controller.as_mut() {
            Some(controller) => {
                controller.set_active(active, &mut self.canvas, &mut self.overlay);
                true
            }
            None => false,
        }
    }

    pub fn press(&mut self, at: Point) -> ToolOutcome {
        self.pointer(at, ToolController::press)
    }

    pub fn drag(&mut self, at: Point) -> ToolOutcome {
        self.pointer(at, ToolController::drag)
    }

    pub fn release(&mut self, at: Point) -> ToolOutcome {
        self.pointer(at, ToolController::release)
    }

    fn pointer(
        &mut self,
        at: Point,
        event: fn(&mut ToolController, Layers<'_>, Point) -> ToolOutcome,
    ) -> ToolOutcome {
        let Some(controller) = self.controller.as_mut() else {
            return ToolOutcome::Ignored;
        };
        let layers = Layers {
            canvas: &mut self.canvas,
            overlay: &mut self.overlay,
            style: &self.style,
            params: &self.params,
        };
        let outcome = event(controller, layers, at);
        if let ToolOutcome::Committed { before } = &outcome {
            self.history.push(before.clone());
            self.dirty = true;
        }
        outcome
    }

    fn abort_gesture(&mut self) {
        if let Some(controller) = self.controller.as_mut() {
            controller.abort(&mut self.canvas, &mut self.overlay);
        }
    }

    pub fn undo(&mut self) -> bool {
        self.abort_gesture();
        let undone = self.history.undo(&mut self.canvas);
        if undone {
            self.dirty = true;
            self.sync_overlay();
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        self.abort_gesture();
        let redone = self.history.redo(&mut self.canvas);
        if redone {
            self.dirty = true;
            self.sync_overlay();
        }
        redone
    }

    /// Apply a whole-canvas transform as one history step.
    pub fn apply_transform(&mut self, transform: CanvasTransform) -> Result<(), CanvasError> {
        self.abort_gesture();
        let before = self.canvas.snapshot();
        transform.apply(&mut self.canvas)?;
        self.history.push(before);
        self.dirty = true;
        self.sync_overlay();
        tracing::debug!("{}", transform.description());
        Ok(())
    }

    /// Replace the canvas with an image file. The canvas takes the image's
    /// size and the replacement is undoable.
    pub fn open(&mut self, path: &Path) -> FileIoResult<()> {
        let loaded = file_io::load_surface(path)?;
        self.abort_gesture();
        let before = self.canvas.snapshot();
        self.canvas = loaded;
        self.history.push(before);
        self.sync_overlay();
        self.file = Some(path.to_path_buf());
        self.dirty = false;
        Ok(())
    }

    /// Save to the file the canvas came from or was last saved to.
    pub fn save(&mut self) -> FileIoResult<PathBuf> {
        let path = self.file.clone().ok_or(FileIoError::NoFile)?;
        self.write_to(&path)?;
        Ok(path)
    }

    /// Save to `path`. A conversion that drops transparency is only written
    /// when `force` is set.
    pub fn save_as(&mut self, path: &Path, force: bool) -> FileIoResult<SaveOutcome> {
        let decision = file_io::save_decision(self.file.as_deref(), path)?;
        if !force && decision != SaveDecision::Proceed {
            return Ok(SaveOutcome::NeedsConfirmation(decision));
        }
        self.write_to(path)?;
        self.file = Some(path.to_path_buf());
        Ok(SaveOutcome::Saved(path.to_path_buf()))
    }

    fn write_to(&mut self, path: &Path) -> FileIoResult<()> {
        file_io::save_surface(&self.canvas, path)?;
        self.dirty = false;
        Ok(())
    }

    fn sync_overlay(&mut self) {
        let (w, h) = (self.canvas.width(), self.canvas.height());
        if self.overlay.width() != w || self.overlay.height() != h {
            match Surface::transparent(w, h) {
                Ok(overlay) => self.overlay = overlay,
                Err(e) => tracing::warn!("Overlay not resized: {}", e),
            }
        } else {
            self.overlay.clear(Rgba::TRANSPARENT);
        }
    }
}
