//! The set of open canvas tabs and the operations the shell runs on them.
//!
//! The workbench lives on the UI thread. Every user-visible change is
//! published on the event bus with the tab title attached, which is how
//! the activity log learns what happened.

use std::path::Path;

use paintkit_canvas::{
    CanvasTransform, EditorSession, SaveOutcome, ShapeStyle, Snapshot, ToolKind, ToolOutcome,
    ToolParams,
};
use paintkit_core::{
    event_bus, AppEvent, CanvasError, CanvasEvent, EventBus, FileEvent, Point, Rgba, TabEvent,
    UiError,
};
use paintkit_settings::Config;
use uuid::Uuid;

use crate::error::{ShellError, ShellResult};

/// Stable identity of a tab; titles are for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabId(Uuid);

impl TabId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// What every new tab starts with.
#[derive(Debug, Clone)]
pub struct TabDefaults {
    pub width: u32,
    pub height: u32,
    pub background: Rgba,
    pub style: ShapeStyle,
    pub params: ToolParams,
    pub history_depth: usize,
}

impl Default for TabDefaults {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: Rgba::WHITE,
            style: ShapeStyle::default(),
            params: ToolParams::default(),
            history_depth: 0,
        }
    }
}

impl TabDefaults {
    pub fn from_config(config: &Config) -> Self {
        let tools = &config.tools;
        Self {
            width: config.canvas.width,
            height: config.canvas.height,
            background: config.canvas.background,
            style: ShapeStyle {
                fill: tools.fill_color,
                border: tools.border_color,
                border_width: tools.border_width,
                dashed: tools.dashed,
                line_color: tools.line_color,
                line_width: tools.line_width,
                eraser_width: tools.eraser_width,
            },
            params: ToolParams {
                polygon_sides: tools.polygon_sides,
                star_points: tools.star_points,
                text: None,
                font_size: tools.font_size,
                font_family: tools.font_family.clone(),
            },
            history_depth: config.history.max_depth,
        }
    }
}

struct Tab {
    id: TabId,
    title: String,
    session: EditorSession,
}

pub struct Workbench {
    tabs: Vec<Tab>,
    active: Option<usize>,
    opened: usize,
    defaults: TabDefaults,
    bus: &'static EventBus,
}

impl Workbench {
    /// Empty workbench publishing on the global event bus.
    pub fn new(defaults: TabDefaults) -> Self {
        Self::with_event_bus(defaults, event_bus())
    }

    pub fn with_event_bus(defaults: TabDefaults, bus: &'static EventBus) -> Self {
        Self {
            tabs: Vec::new(),
            active: None,
            opened: 0,
            defaults,
            bus,
        }
    }

    fn publish(&self, event: AppEvent) {
        // nobody listening is fine
        let _ = self.bus.publish(event);
    }

    pub fn defaults(&self) -> &TabDefaults {
        &self.defaults
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn titles(&self) -> Vec<String> {
        self.tabs.iter().map(|t| t.title.clone()).collect()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_id(&self) -> Option<TabId> {
        self.active_tab().map(|t| t.id)
    }

    pub fn active_title(&self) -> Option<&str> {
        self.active_tab().map(|t| t.title.as_str())
    }

    fn active_tab(&self) -> Option<&Tab> {
        self.active.and_then(|i| self.tabs.get(i))
    }

    fn active_tab_mut(&mut self) -> ShellResult<&mut Tab> {
        self.active
            .and_then(|i| self.tabs.get_mut(i))
            .ok_or(ShellError::Ui(UiError::NoActiveTab))
    }

    pub fn active_session(&self) -> Option<&EditorSession> {
        self.active_tab().map(|t| &t.session)
    }

    pub fn active_session_mut(&mut self) -> Option<&mut EditorSession> {
        self.active_tab_mut().ok().map(|t| &mut t.session)
    }

    /// Open a blank tab titled "Canvas N" and make it active.
    pub fn new_tab(&mut self) -> Result<TabId, CanvasError> {
        let d = &self.defaults;
        let session = EditorSession::with_background(d.width, d.height, d.background)?
            .with_history_depth(d.history_depth)
            .with_style(d.style.clone())
            .with_params(d.params.clone());

        self.opened += 1;
        let tab = Tab {
            id: TabId::new(),
            title: format!("Canvas {}", self.opened),
            session,
        };
        let id = tab.id;
        let title = tab.title.clone();
        self.tabs.push(tab);
        self.active = Some(self.tabs.len() - 1);

        tracing::info!("Opened tab {}", title);
        self.publish(AppEvent::Tab(TabEvent::Opened { title }));
        Ok(id)
    }

    /// Close the active tab. Its left neighbour (or the new first tab)
    /// becomes active. Returns the closed tab's title.
    pub fn close_active(&mut self) -> ShellResult<String> {
        let index = self.active.ok_or(ShellError::Ui(UiError::NoActiveTab))?;
        let tab = self.tabs.remove(index);
        self.active = if self.tabs.is_empty() {
            None
        } else {
            Some(index.saturating_sub(1).min(self.tabs.len() - 1))
        };

        if tab.session.is_dirty() {
            tracing::warn!("Closed {} with unsaved changes", tab.title);
        }
        self.publish(AppEvent::Tab(TabEvent::Closed {
            title: tab.title.clone(),
        }));
        Ok(tab.title)
    }

    pub fn select(&mut self, index: usize) -> ShellResult<()> {
        let title = self
            .tabs
            .get(index)
            .map(|t| t.title.clone())
            .ok_or(ShellError::UnknownTab(index))?;
        self.active = Some(index);
        self.publish(AppEvent::Tab(TabEvent::Selected { title }));
        Ok(())
    }

    /// Titles of tabs with edits that have not been saved.
    pub fn unsaved_tabs(&self) -> Vec<String> {
        self.tabs
            .iter()
            .filter(|t| t.session.is_dirty())
            .map(|t| t.title.clone())
            .collect()
    }

    /// Current pixels of the active tab.
    pub fn active_snapshot(&self) -> Result<Snapshot, UiError> {
        self.active_capture().map(|(_, snapshot)| snapshot)
    }

    /// Title and current pixels of the active tab.
    pub fn active_capture(&self) -> Result<(String, Snapshot), UiError> {
        self.active_tab()
            .map(|t| (t.title.clone(), t.session.snapshot()))
            .ok_or(UiError::NoActiveTab)
    }

    pub fn select_tool(&mut self, kind: ToolKind) -> ShellResult<()> {
        let tab = self.active_tab_mut()?;
        tab.session.select_tool(kind);
        let event = CanvasEvent::ToolSelected {
            tab: tab.title.clone(),
            tool: kind.display_name().to_string(),
        };
        self.publish(AppEvent::Canvas(event));
        Ok(())
    }

    pub fn set_tool_active(&mut self, active: bool) -> ShellResult<bool> {
        Ok(self.active_tab_mut()?.session.set_tool_active(active))
    }

    pub fn press(&mut self, at: Point) -> ShellResult<ToolOutcome> {
        self.pointer(at, EditorSession::press)
    }

    pub fn drag(&mut self, at: Point) -> ShellResult<ToolOutcome> {
        self.pointer(at, EditorSession::drag)
    }

    pub fn release(&mut self, at: Point) -> ShellResult<ToolOutcome> {
        self.pointer(at, EditorSession::release)
    }

    fn pointer(
        &mut self,
        at: Point,
        event: fn(&mut EditorSession, Point) -> ToolOutcome,
    ) -> ShellResult<ToolOutcome> {
        let tab = self.active_tab_mut()?;
        let outcome = event(&mut tab.session, at);
        if let ToolOutcome::Committed { .. } = outcome {
            let tool = tab.session.tool().map(|k| k.display_name()).unwrap_or("Tool");
            let event = CanvasEvent::ShapeCommitted {
                tab: tab.title.clone(),
                tool: tool.to_string(),
            };
            self.publish(AppEvent::Canvas(event));
        }
        Ok(outcome)
    }

    pub fn undo(&mut self) -> ShellResult<bool> {
        let tab = self.active_tab_mut()?;
        let undone = tab.session.undo();
        if undone {
            let event = CanvasEvent::Undone {
                tab: tab.title.clone(),
            };
            self.publish(AppEvent::Canvas(event));
        }
        Ok(undone)
    }

    pub fn redo(&mut self) -> ShellResult<bool> {
        let tab = self.active_tab_mut()?;
        let redone = tab.session.redo();
        if redone {
            let event = CanvasEvent::Redone {
                tab: tab.title.clone(),
            };
            self.publish(AppEvent::Canvas(event));
        }
        Ok(redone)
    }

    pub fn apply_transform(&mut self, transform: CanvasTransform) -> ShellResult<()> {
        let tab = self.active_tab_mut()?;
        tab.session.apply_transform(transform)?;
        let event = CanvasEvent::Transformed {
            tab: tab.title.clone(),
            action: transform.description(),
        };
        self.publish(AppEvent::Canvas(event));
        Ok(())
    }

    /// Load an image into the active tab.
    pub fn open(&mut self, path: &Path) -> ShellResult<()> {
        let tab = self.active_tab_mut()?;
        tab.session.open(path)?;
        let event = FileEvent::Opened {
            tab: tab.title.clone(),
            path: path.to_path_buf(),
        };
        self.publish(AppEvent::File(event));
        Ok(())
    }

    /// Save the active tab to its current file.
    pub fn save(&mut self) -> ShellResult<()> {
        let tab = self.active_tab_mut()?;
        let title = tab.title.clone();
        let target = tab.session.file_path().map(Path::to_path_buf);
        let result = tab.session.save();
        match result {
            Ok(path) => {
                self.publish(AppEvent::File(FileEvent::Saved { tab: title, path }));
                Ok(())
            }
            Err(e) => {
                if let Some(path) = target {
                    self.publish(AppEvent::File(FileEvent::SaveFailed {
                        tab: title,
                        path,
                        error: e.to_string(),
                    }));
                }
                Err(e.into())
            }
        }
    }

    /// Save the active tab to `path`. Lossy format changes come back as
    /// [`SaveOutcome::NeedsConfirmation`] unless `force` is set.
    pub fn save_as(&mut self, path: &Path, force: bool) -> ShellResult<SaveOutcome> {
        let tab = self.active_tab_mut()?;
        let title = tab.title.clone();
        let result = tab.session.save_as(path, force);
        match result {
            Ok(SaveOutcome::Saved(saved)) => {
                self.publish(AppEvent::File(FileEvent::Saved {
                    tab: title,
                    path: saved.clone(),
                }));
                Ok(SaveOutcome::Saved(saved))
            }
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                self.publish(AppEvent::File(FileEvent::SaveFailed {
                    tab: title,
                    path: path.to_path_buf(),
                    error: e.to_string(),
                }));
                Err(e.into())
            }
        }
    }
}

impl std::fmt::Debug for Workbench {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workbench")
            .field("tabs", &self.titles())
            .field("active", &self.active)
            .finish()
    }
}
