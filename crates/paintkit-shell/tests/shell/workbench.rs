use std::sync::Arc;

use paintkit_canvas::{CanvasTransform, ToolKind, ToolOutcome};
use paintkit_core::{
    thread_safe, AppEvent, CanvasEvent, EventBus, EventFilter, FileEvent, Point, Rgba, TabEvent,
    ThreadSafe,
};
use paintkit_shell::{ActivityLog, TabDefaults, Workbench};
use tempfile::TempDir;

fn recorded() -> (&'static EventBus, ThreadSafe<Vec<AppEvent>>) {
    let bus: &'static EventBus = Box::leak(Box::new(EventBus::new()));
    let events = thread_safe(Vec::new());
    let sink = Arc::clone(&events);
    bus.subscribe(EventFilter::All, move |event| sink.lock().push(event));
    (bus, events)
}

fn workbench(bus: &'static EventBus) -> Workbench {
    let defaults = TabDefaults {
        width: 100,
        height: 100,
        ..TabDefaults::default()
    };
    let mut wb = Workbench::with_event_bus(defaults, bus);
    wb.new_tab().unwrap();
    wb
}

fn draw_rect(wb: &mut Workbench, from: (f32, f32), to: (f32, f32)) -> ToolOutcome {
    wb.press(Point::new(from.0, from.1)).unwrap();
    wb.drag(Point::new(to.0, to.1)).unwrap();
    wb.release(Point::new(to.0, to.1)).unwrap()
}

#[test]
fn test_commit_publishes_tab_and_tool() {
    let (bus, events) = recorded();
    let mut wb = workbench(bus);
    wb.select_tool(ToolKind::Rectangle).unwrap();
    assert!(matches!(
        draw_rect(&mut wb, (10.0, 10.0), (60.0, 40.0)),
        ToolOutcome::Committed { .. }
    ));
    wb.undo().unwrap();
    wb.redo().unwrap();

    let events = events.lock();
    assert_eq!(
        events[0],
        AppEvent::Tab(TabEvent::Opened {
            title: "Canvas 1".to_string()
        })
    );
    assert!(events.contains(&AppEvent::Canvas(CanvasEvent::ShapeCommitted {
        tab: "Canvas 1".to_string(),
        tool: "Rectangle".to_string(),
    })));
    let last: Vec<String> = events.iter().rev().take(2).map(|e| e.description()).collect();
    assert_eq!(last, vec!["Redo", "Undo"]);
}

#[test]
fn test_tabs_keep_separate_histories() {
    let (bus, _) = recorded();
    let mut wb = workbench(bus);
    wb.select_tool(ToolKind::Rectangle).unwrap();
    draw_rect(&mut wb, (10.0, 10.0), (60.0, 40.0));

    wb.new_tab().unwrap();
    assert_eq!(wb.active_title(), Some("Canvas 2"));
    assert!(!wb.undo().unwrap());

    wb.select(0).unwrap();
    assert!(wb.undo().unwrap());
    let snapshot = wb.active_snapshot().unwrap();
    assert_eq!(snapshot.pixel(10, 25), Some(Rgba::WHITE));
}

#[test]
fn test_unsaved_tabs_clear_after_save() {
    let (bus, events) = recorded();
    let dir = TempDir::new().unwrap();
    let mut wb = workbench(bus);
    assert!(wb.unsaved_tabs().is_empty());

    wb.apply_transform(CanvasTransform::MirrorVertical).unwrap();
    assert_eq!(wb.unsaved_tabs(), vec!["Canvas 1"]);

    let path = dir.path().join("out.png");
    wb.save_as(&path, false).unwrap();
    assert!(wb.unsaved_tabs().is_empty());
    assert!(events.lock().contains(&AppEvent::File(FileEvent::Saved {
        tab: "Canvas 1".to_string(),
        path,
    })));
}

#[test]
fn test_save_without_file_fails_quietly() {
    let (bus, events) = recorded();
    let mut wb = workbench(bus);
    assert!(wb.save().is_err());
    // no path, so nothing to report a failure against
    assert!(!events
        .lock()
        .iter()
        .any(|e| matches!(e, AppEvent::File(FileEvent::SaveFailed { .. }))));
}

#[test]
fn test_failed_save_as_is_published() {
    let (bus, events) = recorded();
    let mut wb = workbench(bus);
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("no-such-dir").join("out.png");
    assert!(wb.save_as(&missing, false).is_err());
    assert!(events
        .lock()
        .iter()
        .any(|e| matches!(e, AppEvent::File(FileEvent::SaveFailed { .. }))));
}

#[test]
fn test_transform_event_names_the_action() {
    let (bus, events) = recorded();
    let mut wb = workbench(bus);
    wb.apply_transform(CanvasTransform::RotateLeft).unwrap();
    assert_eq!(
        events.lock().last().map(|e| e.description()),
        Some("Rotate Left".to_string())
    );
}

#[test]
fn test_activity_log_records_tab_and_action() {
    let (bus, _) = recorded();
    let dir = TempDir::new().unwrap();
    let log = ActivityLog::start(&dir.path().join("logs"), bus).unwrap();
    let path = log.path().to_path_buf();
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("log_") && name.ends_with(".txt"));

    let mut wb = workbench(bus);
    wb.select_tool(ToolKind::Ellipse).unwrap();
    draw_rect(&mut wb, (10.0, 10.0), (60.0, 40.0));
    wb.apply_transform(CanvasTransform::Clear).unwrap();
    log.close();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert!(lines.iter().any(|l| l.ends_with("[Canvas 1] Ellipse drawn")));
    assert!(lines.last().unwrap().ends_with("[Canvas 1] Canvas cleared"));
    // MM/DD/YYYY HH:MM:SS
    let stamp = &lines[0][..19];
    assert_eq!(stamp.as_bytes()[2], b'/');
    assert_eq!(stamp.as_bytes()[10], b' ');
    assert_eq!(stamp.as_bytes()[13], b':');
}
