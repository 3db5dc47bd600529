//! Tool activation and the press/drag/release state machine.
//!
//! The controller snapshots the canvas on press and hands that baseline to
//! the tool for previews, so a committed gesture always reports the canvas
//! as it was before the gesture started.

use paintkit_core::{Point, Rgba};

use super::{Progress, ShapeTool, ToolContext, ToolKind, ToolParams};
use crate::style::ShapeStyle;
use crate::surface::{Snapshot, Surface};

/// Activation state of the selected tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolState {
    /// Pointer events are ignored.
    Inactive,
    /// Active, waiting for a press.
    Idle,
    /// A press has been seen and its release has not.
    Dragging,
}

/// Result of forwarding one pointer event.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    /// The event was not for this tool (inactive, or out of sequence).
    Ignored,
    /// A live preview was drawn.
    Preview,
    /// The first phase of a two-phase operation finished.
    Pending,
    /// An edit finished; `before` is the canvas as it was before it started.
    Committed { before: Snapshot },
}

/// The surfaces and settings a tool draws with.
pub struct Layers<'a> {
    pub canvas: &'a mut Surface,
    pub overlay: &'a mut Surface,
    pub style: &'a ShapeStyle,
    pub params: &'a ToolParams,
}

impl<'a> Layers<'a> {
    fn context<'b>(&'b mut self, baseline: &'b Snapshot) -> ToolContext<'b> {
        ToolContext {
            canvas: self.canvas,
            overlay: self.overlay,
            baseline,
            style: self.style,
            params: self.params,
        }
    }
}

/// Drives one [`ShapeTool`] through its gestures.
pub struct ToolController {
    tool: Box<dyn ShapeTool>,
    state: ToolState,
    baseline: Option<Snapshot>,
}

impl ToolController {
    /// Controller for `tool`, starting inactive.
    pub fn new(tool: Box<dyn ShapeTool>) -> Self {
        Self {
            tool,
            state: ToolState::Inactive,
            baseline: None,
        }
    }

    pub fn kind(&self) -> ToolKind {
        self.tool.kind()
    }

    pub fn state(&self) -> ToolState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != ToolState::Inactive
    }

    /// True while a gesture or a two-phase operation is unfinished.
    pub fn in_flight(&self) -> bool {
        self.state == ToolState::Dragging || self.tool.has_pending()
    }

    /// Turn the tool on or off. Turning it off mid-gesture restores the
    /// canvas to the gesture baseline.
    pub fn set_active(&mut self, active: bool, canvas: &mut Surface, overlay: &mut Surface) {
        if active {
            if self.state == ToolState::Inactive {
                self.state = ToolState::Idle;
            }
        } else {
            self.abort(canvas, overlay);
            self.state = ToolState::Inactive;
        }
    }

    /// Discard any unfinished gesture, leaving the last committed pixels.
    /// Returns whether anything was discarded.
    pub fn abort(&mut self, canvas: &mut Surface, overlay: &mut Surface) -> bool {
        let in_flight = self.in_flight();
        if in_flight {
            if let Some(baseline) = self.baseline.as_ref() {
                canvas.restore(baseline);
            }
            overlay.clear(Rgba::TRANSPARENT);
            self.tool.cancel();
            tracing::debug!("{} gesture discarded", self.kind());
        }
        self.baseline = None;
        if self.state == ToolState::Dragging {
            self.state = ToolState::Idle;
        }
        in_flight
    }

    pub fn press(&mut self, mut layers: Layers<'_>, at: Point) -> ToolOutcome {
        if self.state != ToolState::Idle {
            return ToolOutcome::Ignored;
        }
        if !self.tool.has_pending() || self.baseline.is_none() {
            self.baseline = Some(layers.canvas.snapshot());
        }
        let Some(baseline) = self.baseline.as_ref() else {
            return ToolOutcome::Ignored;
        };

        self.state = ToolState::Dragging;
        let progress = self.tool.on_press(&mut layers.context(baseline), at);
        match progress {
            Progress::Commit => self.commit(),
            Progress::Continue => ToolOutcome::Preview,
        }
    }

    pub fn drag(&mut self, mut layers: Layers<'_>, at: Point) -> ToolOutcome {
        if self.state != ToolState::Dragging {
            return ToolOutcome::Ignored;
        }
        let Some(baseline) = self.baseline.as_ref() else {
            return ToolOutcome::Ignored;
        };

        self.tool.on_drag(&mut layers.context(baseline), at);
        ToolOutcome::Preview
    }

    pub fn release(&mut self, mut layers: Layers<'_>, at: Point) -> ToolOutcome {
        if self.state != ToolState::Dragging {
            return ToolOutcome::Ignored;
        }
        let Some(baseline) = self.baseline.as_ref() else {
            return ToolOutcome::Ignored;
        };

        let progress = self.tool.on_release(&mut layers.context(baseline), at);
        self.state = ToolState::Idle;
        match progress {
            Progress::Commit => self.commit(),
            Progress::Continue if self.tool.has_pending() => ToolOutcome::Pending,
            Progress::Continue => {
                self.baseline = None;
                ToolOutcome::Ignored
            }
        }
    }

    fn commit(&mut self) -> ToolOutcome {
        self.state = ToolState::Idle;
        match self.baseline.take() {
            Some(before) => {
                tracing::debug!("{} committed", self.kind());
                ToolOutcome::Committed { before }
            }
            None => ToolOutcome::Ignored,
        }
    }
}

impl std::fmt::Debug for ToolController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolController")
            .field("kind", &self.kind())
            .field("state", &self.state)
            .field("pending", &self.tool.has_pending())
            .finish()
    }
}
