//! Line-oriented command console.
//!
//! Each line is parsed off the UI thread, then executed on it through the
//! dispatcher. `save-now` and `quit` never reach the UI thread: the first
//! pokes the autosave task, the second stops the UI loop.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use paintkit_canvas::{CanvasTransform, SaveDecision, SaveOutcome, ToolKind, ToolOutcome};
use paintkit_core::{Point, Rgba};
use tokio::sync::Notify;

use crate::dispatcher::UiDispatcher;
use crate::error::{ShellError, ShellResult};
use crate::shortcuts::{Action, KeyChord, ShortcutMap, HELP_TEXT};
use crate::workbench::Workbench;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Tool(ToolKind),
    Activate,
    Deactivate,
    Press(Point),
    Drag(Point),
    Release(Point),
    Fill(Rgba),
    Border(Rgba),
    LineColor(Rgba),
    Width(f32),
    LineWidth(f32),
    EraserWidth(f32),
    Dashed(bool),
    /// Raw input; bad counts fall back to the default.
    Sides(String),
    Points(String),
    Text(String),
    FontSize(f32),
    Undo,
    Redo,
    Key(KeyChord),
    NewTab,
    CloseTab,
    SelectTab(usize),
    Tabs,
    Open(PathBuf),
    Save,
    SaveAs { path: PathBuf, force: bool },
    Transform(CanvasTransform),
    SaveNow,
    Help,
    Quit,
}

fn usage(text: &str) -> ShellError {
    ShellError::Command(format!("Usage: {}", text))
}

fn number<T: std::str::FromStr>(arg: Option<&str>, text: &str) -> ShellResult<T> {
    arg.and_then(|a| a.parse().ok()).ok_or_else(|| usage(text))
}

fn point(args: &[&str], name: &str) -> ShellResult<Point> {
    let text = format!("{} <x> <y>", name);
    match args {
        [x, y] => Ok(Point::new(
            number(Some(*x), &text)?,
            number(Some(*y), &text)?,
        )),
        _ => Err(usage(&text)),
    }
}

fn color(args: &[&str], name: &str) -> ShellResult<Rgba> {
    match args {
        [hex] => Ok(hex.parse()?),
        _ => Err(usage(&format!("{} #rrggbb", name))),
    }
}

fn width(args: &[&str], name: &str) -> ShellResult<f32> {
    let text = format!("{} <n>", name);
    let value: f32 = match args {
        [n] => number(Some(*n), &text)?,
        _ => return Err(usage(&text)),
    };
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(usage(&text))
    }
}

/// `save-as <path> [--force]`. The path is every non-flag word, so it may
/// contain single spaces.
fn save_as_args(args: &[&str]) -> ShellResult<Command> {
    let text = "save-as <path> [--force]";
    let mut words = Vec::new();
    let mut force = false;
    for arg in args {
        match *arg {
            "--force" => force = true,
            flag if flag.starts_with("--") => {
                return Err(ShellError::Command(format!(
                    "Unknown option '{}'. {}",
                    flag,
                    usage(text)
                )));
            }
            word => words.push(word),
        }
    }
    if words.is_empty() {
        return Err(usage(text));
    }
    Ok(Command::SaveAs {
        path: PathBuf::from(words.join(" ")),
        force,
    })
}

/// Parse one console line. Blank lines are an error the caller may ignore.
pub fn parse_command(line: &str) -> ShellResult<Command> {
    let line = line.trim();
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();
    let no_args = |command: Command| {
        if args.is_empty() {
            Ok(command)
        } else {
            Err(usage(name))
        }
    };

    match name.to_ascii_lowercase().as_str() {
        "" => Err(ShellError::Command("Empty command".to_string())),
        "tool" => match args.as_slice() {
            [kind] => kind.parse().map(Command::Tool).map_err(ShellError::Command),
            _ => Err(usage("tool <kind>")),
        },
        "activate" => no_args(Command::Activate),
        "deactivate" => no_args(Command::Deactivate),
        "press" => point(&args, "press").map(Command::Press),
        "drag" => point(&args, "drag").map(Command::Drag),
        "release" => point(&args, "release").map(Command::Release),
        "fill" => color(&args, "fill").map(Command::Fill),
        "border" => color(&args, "border").map(Command::Border),
        "line-color" => color(&args, "line-color").map(Command::LineColor),
        "width" => width(&args, "width").map(Command::Width),
        "line-width" => width(&args, "line-width").map(Command::LineWidth),
        "eraser-width" => width(&args, "eraser-width").map(Command::EraserWidth),
        "font-size" => width(&args, "font-size").map(Command::FontSize),
        "dashed" => match args.as_slice() {
            ["on"] => Ok(Command::Dashed(true)),
            ["off"] => Ok(Command::Dashed(false)),
            _ => Err(usage("dashed on|off")),
        },
        "sides" => Ok(Command::Sides(rest.to_string())),
        "points" => Ok(Command::Points(rest.to_string())),
        "text" => Ok(Command::Text(rest.to_string())),
        "undo" => no_args(Command::Undo),
        "redo" => no_args(Command::Redo),
        "key" => match args.as_slice() {
            [chord] => chord.parse().map(Command::Key).map_err(ShellError::Command),
            _ => Err(usage("key <chord>")),
        },
        "new-tab" => no_args(Command::NewTab),
        "close-tab" => no_args(Command::CloseTab),
        "select-tab" => match args.as_slice() {
            [n] => number(Some(*n), "select-tab <n>").map(Command::SelectTab),
            _ => Err(usage("select-tab <n>")),
        },
        "tabs" => no_args(Command::Tabs),
        "open" if !rest.is_empty() => Ok(Command::Open(PathBuf::from(rest))),
        "open" => Err(usage("open <path>")),
        "save" => no_args(Command::Save),
        "save-as" => save_as_args(&args),
        "rotate-left" => no_args(Command::Transform(CanvasTransform::RotateLeft)),
        "rotate-right" => no_args(Command::Transform(CanvasTransform::RotateRight)),
        "mirror-h" => no_args(Command::Transform(CanvasTransform::MirrorHorizontal)),
        "mirror-v" => no_args(Command::Transform(CanvasTransform::MirrorVertical)),
        "resize" => {
            let text = "resize <width> <height>";
            match args.as_slice() {
                [w, h] => Ok(Command::Transform(CanvasTransform::Resize {
                    width: number(Some(*w), text)?,
                    height: number(Some(*h), text)?,
                })),
                _ => Err(usage(text)),
            }
        }
        "clear" => no_args(Command::Transform(CanvasTransform::Clear)),
        "save-now" => no_args(Command::SaveNow),
        "help" => no_args(Command::Help),
        "quit" | "exit" => no_args(Command::Quit),
        other => Err(ShellError::Command(format!("Unknown command '{}'", other))),
    }
}

fn style_of(wb: &mut Workbench) -> ShellResult<&mut paintkit_canvas::ShapeStyle> {
    wb.active_session_mut()
        .map(|s| s.style_mut())
        .ok_or(ShellError::Ui(paintkit_core::UiError::NoActiveTab))
}

fn params_of(wb: &mut Workbench) -> ShellResult<&mut paintkit_canvas::ToolParams> {
    wb.active_session_mut()
        .map(|s| s.params_mut())
        .ok_or(ShellError::Ui(paintkit_core::UiError::NoActiveTab))
}

fn describe(outcome: ToolOutcome) -> String {
    match outcome {
        ToolOutcome::Ignored => "Ignored".to_string(),
        ToolOutcome::Preview => "Preview".to_string(),
        ToolOutcome::Pending => "Selection made; drag again to place it".to_string(),
        ToolOutcome::Committed { .. } => "Committed".to_string(),
    }
}

fn save_as(wb: &mut Workbench, path: PathBuf, force: bool) -> ShellResult<String> {
    match wb.save_as(&path, force)? {
        SaveOutcome::Saved(saved) => Ok(format!("Saved {}", saved.display())),
        SaveOutcome::NeedsConfirmation(SaveDecision::ConfirmLossy { from, to }) => Ok(format!(
            "Saving {} as {} loses transparency; repeat with --force to continue",
            from.extension(),
            to.extension()
        )),
        SaveOutcome::NeedsConfirmation(SaveDecision::Proceed) => {
            Ok(format!("Not saved: {}", path.display()))
        }
    }
}

/// Run `command` against the workbench. Returns the text to show.
pub fn execute(
    wb: &mut Workbench,
    shortcuts: &ShortcutMap,
    command: Command,
) -> ShellResult<String> {
    match command {
        Command::Tool(kind) => {
            wb.select_tool(kind)?;
            Ok(format!("{} tool selected", kind.display_name()))
        }
        Command::Activate => {
            wb.set_tool_active(true)?;
            Ok("Tool active".to_string())
        }
        Command::Deactivate => {
            wb.set_tool_active(false)?;
            Ok("Tool inactive".to_string())
        }
        Command::Press(at) => wb.press(at).map(describe),
        Command::Drag(at) => wb.drag(at).map(describe),
        Command::Release(at) => wb.release(at).map(describe),
        Command::Fill(c) => {
            style_of(wb)?.fill = c;
            Ok(format!("Fill {}", c))
        }
        Command::Border(c) => {
            style_of(wb)?.border = c;
            Ok(format!("Border {}", c))
        }
        Command::LineColor(c) => {
            style_of(wb)?.line_color = c;
            Ok(format!("Line colour {}", c))
        }
        Command::Width(w) => {
            style_of(wb)?.border_width = w;
            Ok(format!("Border width {}", w))
        }
        Command::LineWidth(w) => {
            style_of(wb)?.line_width = w;
            Ok(format!("Line width {}", w))
        }
        Command::EraserWidth(w) => {
            style_of(wb)?.eraser_width = w;
            Ok(format!("Eraser width {}", w))
        }
        Command::Dashed(on) => {
            style_of(wb)?.dashed = on;
            Ok(if on { "Dashed outline" } else { "Solid outline" }.to_string())
        }
        Command::Sides(input) => {
            let sides = params_of(wb)?.set_polygon_sides(&input);
            Ok(format!("Polygon sides {}", sides))
        }
        Command::Points(input) => {
            let points = params_of(wb)?.set_star_points(&input);
            Ok(format!("Star points {}", points))
        }
        Command::Text(input) => {
            params_of(wb)?.set_text(&input);
            Ok(if input.is_empty() {
                "Text cleared".to_string()
            } else {
                format!("Text '{}'", input)
            })
        }
        Command::FontSize(size) => {
            params_of(wb)?.font_size = size;
            Ok(format!("Font size {}", size))
        }
        Command::Undo => Ok(if wb.undo()? { "Undone" } else { "Nothing to undo" }.to_string()),
        Command::Redo => Ok(if wb.redo()? { "Redone" } else { "Nothing to redo" }.to_string()),
        Command::Key(chord) => match shortcuts.lookup(&chord) {
            Some(Action::Undo) => execute(wb, shortcuts, Command::Undo),
            Some(Action::Redo) => execute(wb, shortcuts, Command::Redo),
            Some(Action::Help) => Ok(HELP_TEXT.to_string()),
            Some(Action::SaveAs) => {
                let current = wb
                    .active_session()
                    .and_then(|s| s.file_path())
                    .map(Path::to_path_buf);
                match current {
                    Some(path) => save_as(wb, path, false),
                    None => Err(ShellError::Command(
                        "No file yet; use save-as <path>".to_string(),
                    )),
                }
            }
            None => Err(ShellError::Command(format!("{} is not bound", chord))),
        },
        Command::NewTab => {
            wb.new_tab()?;
            Ok(format!("Opened {}", wb.active_title().unwrap_or_default()))
        }
        Command::CloseTab => {
            let title = wb.close_active()?;
            Ok(format!("Closed {}", title))
        }
        Command::SelectTab(index) => {
            wb.select(index)?;
            Ok(format!("Selected {}", wb.active_title().unwrap_or_default()))
        }
        Command::Tabs => {
            let active = wb.active_index();
            let lines: Vec<String> = wb
                .titles()
                .iter()
                .enumerate()
                .map(|(i, title)| {
                    let marker = if Some(i) == active { '*' } else { ' ' };
                    format!("{} {} {}", marker, i, title)
                })
                .collect();
            Ok(lines.join("\n"))
        }
        Command::Open(path) => {
            wb.open(&path)?;
            Ok(format!("Opened {}", path.display()))
        }
        Command::Save => {
            wb.save()?;
            Ok("Saved".to_string())
        }
        Command::SaveAs { path, force } => save_as(wb, path, force),
        Command::Transform(transform) => {
            wb.apply_transform(transform)?;
            Ok(transform.description())
        }
        Command::Help => Ok(HELP_TEXT.to_string()),
        Command::SaveNow | Command::Quit => Err(ShellError::Command(
            "Not available on the UI thread".to_string(),
        )),
    }
}

/// Read commands from `input` until `quit` or end of input, writing replies
/// to `output`. Stops the UI loop on exit.
pub fn run_console<R, W>(
    input: R,
    mut output: W,
    dispatcher: &UiDispatcher<Workbench>,
    save_now: Option<Arc<Notify>>,
    timeout: Duration,
) -> std::io::Result<()>
where
    R: BufRead,
    W: Write,
{
    let shortcuts = Arc::new(ShortcutMap::default());
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(output, "error: {}", e)?;
                continue;
            }
        };

        let reply = match command {
            Command::Quit => break,
            Command::SaveNow => match &save_now {
                Some(notify) => {
                    notify.notify_one();
                    Ok("Autosave requested".to_string())
                }
                None => Err(ShellError::Command("Autosave is disabled".to_string())),
            },
            command => {
                let shortcuts = Arc::clone(&shortcuts);
                dispatcher
                    .call(move |wb| execute(wb, &shortcuts, command), timeout)
                    .map_err(ShellError::from)
                    .and_then(|result| result)
            }
        };
        match reply {
            Ok(text) => writeln!(output, "{}", text)?,
            Err(e) => {
                tracing::debug!("Console command failed: {}", e);
                writeln!(output, "error: {}", e)?;
            }
        }
    }

    tracing::info!("Console closed");
    dispatcher.shutdown();
    Ok(())
}
