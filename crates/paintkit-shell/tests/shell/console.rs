use std::io::Cursor;
use std::thread;
use std::time::Duration;

use paintkit_core::{EventBus, Rgba};
use paintkit_shell::{
    channel, execute, parse_command, run_console, ShortcutMap, TabDefaults, Workbench, HELP_TEXT,
};
use tempfile::TempDir;

fn workbench() -> Workbench {
    let bus: &'static EventBus = Box::leak(Box::new(EventBus::new()));
    let defaults = TabDefaults {
        width: 100,
        height: 100,
        ..TabDefaults::default()
    };
    let mut wb = Workbench::with_event_bus(defaults, bus);
    wb.new_tab().unwrap();
    wb
}

fn run(wb: &mut Workbench, line: &str) -> Result<String, String> {
    let shortcuts = ShortcutMap::default();
    parse_command(line)
        .and_then(|command| execute(wb, &shortcuts, command))
        .map_err(|e| e.to_string())
}

#[test]
fn test_rectangle_session_from_commands() {
    let mut wb = workbench();
    for line in [
        "tool rectangle",
        "fill #ff0000",
        "press 10 10",
        "drag 30 30",
        "drag 60 40",
    ] {
        run(&mut wb, line).unwrap();
    }
    assert_eq!(run(&mut wb, "release 60 40").unwrap(), "Committed");

    let snapshot = wb.active_snapshot().unwrap();
    assert_eq!(snapshot.pixel(35, 25), Some(Rgba::rgb(255, 0, 0)));
    assert_eq!(snapshot.pixel(10, 25), Some(Rgba::BLACK));

    assert_eq!(run(&mut wb, "key ctrl+z").unwrap(), "Undone");
    assert_eq!(
        wb.active_snapshot().unwrap().pixel(10, 25),
        Some(Rgba::WHITE)
    );
    assert_eq!(run(&mut wb, "key Ctrl+Y").unwrap(), "Redone");
    assert_eq!(run(&mut wb, "redo").unwrap(), "Nothing to redo");
}

#[test]
fn test_bad_input_is_an_error_not_a_panic() {
    let mut wb = workbench();
    assert!(run(&mut wb, "press").is_err());
    assert!(run(&mut wb, "select-tab 9").is_err());
    assert!(run(&mut wb, "key ctrl+q").is_err());
    assert!(run(&mut wb, "open /definitely/not/here.png").is_err());
    assert_eq!(run(&mut wb, "sides lots").unwrap(), "Polygon sides 5");
    assert_eq!(run(&mut wb, "sides 1").unwrap(), "Polygon sides 3");
}

#[test]
fn test_help_and_save_shortcuts() {
    let mut wb = workbench();
    assert_eq!(run(&mut wb, "key ctrl+h").unwrap(), HELP_TEXT);
    assert!(run(&mut wb, "key ctrl+s").is_err());

    let dir = TempDir::new().unwrap();
    let png = dir.path().join("art.png");
    run(&mut wb, &format!("save-as {}", png.display())).unwrap();
    assert!(png.exists());
    assert!(run(&mut wb, "key ctrl+s").unwrap().starts_with("Saved"));

    let jpg = dir.path().join("art.jpg");
    let reply = run(&mut wb, &format!("save-as {}", jpg.display())).unwrap();
    assert!(reply.contains("--force"));
    assert!(!jpg.exists());
    run(&mut wb, &format!("save-as {} --force", jpg.display())).unwrap();
    assert!(jpg.exists());
}

#[test]
fn test_tab_commands() {
    let mut wb = workbench();
    assert_eq!(run(&mut wb, "new-tab").unwrap(), "Opened Canvas 2");
    assert_eq!(run(&mut wb, "tabs").unwrap(), "  0 Canvas 1\n* 1 Canvas 2");
    assert_eq!(run(&mut wb, "select-tab 0").unwrap(), "Selected Canvas 1");
    assert_eq!(run(&mut wb, "close-tab").unwrap(), "Closed Canvas 1");
    assert_eq!(wb.active_title(), Some("Canvas 2"));
}

#[test]
fn test_console_loop_runs_on_ui_thread() {
    let (dispatcher, ui) = channel::<Workbench>();
    let script = "tool square\npress 0 0\nbogus\n\nrotate-left\nsave-now\nquit\nundo\n";
    let console = thread::spawn(move || {
        let mut out = Vec::new();
        run_console(
            Cursor::new(script),
            &mut out,
            &dispatcher,
            None,
            Duration::from_secs(5),
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    });

    let mut wb = workbench();
    ui.run(&mut wb);
    let out = console.join().unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Square tool selected",
            "Preview",
            "error: Unknown command 'bogus'",
            "Rotate Left",
            "error: Autosave is disabled",
        ]
    );
    assert_eq!(wb.active_session().unwrap().history().undo_depth(), 1);
}
