use paintkit_canvas::{CanvasTransform, EditorSession, ToolKind, ToolOutcome};
use paintkit_core::{Point, Rgba};

fn p(x: f32, y: f32) -> Point {
    Point::new(x, y)
}

fn gesture(session: &mut EditorSession, from: Point, to: Point) -> ToolOutcome {
    session.press(from);
    session.drag(to);
    session.release(to)
}

/// Session with a solid black 10x10 block at (10, 10).
fn with_block() -> EditorSession {
    let mut session = EditorSession::new(100, 100).unwrap();
    session.style_mut().fill = Rgba::BLACK;
    session.style_mut().border_width = 0.0;
    session.select_tool(ToolKind::Rectangle);
    gesture(&mut session, p(10.0, 10.0), p(20.0, 20.0));
    session
}

#[test]
fn test_rectangle_then_undo_back_to_white() {
    let mut session = EditorSession::new(100, 100).unwrap();
    let blank = session.snapshot();
    session.select_tool(ToolKind::Rectangle);

    session.press(p(10.0, 10.0));
    session.drag(p(30.0, 30.0));
    session.drag(p(60.0, 40.0));
    let outcome = session.release(p(60.0, 40.0));
    assert!(matches!(outcome, ToolOutcome::Committed { .. }));

    let canvas = session.canvas();
    assert_eq!(canvas.pixel(35, 25), Some(Rgba::WHITE));
    assert_eq!(canvas.pixel(10, 25), Some(Rgba::BLACK));
    assert_eq!(canvas.pixel(35, 10), Some(Rgba::BLACK));
    assert_eq!(canvas.pixel(80, 80), Some(Rgba::WHITE));
    // the intermediate outline's bottom edge at y=30 is gone
    assert_eq!(canvas.pixel(20, 30), Some(Rgba::WHITE));
    assert_eq!(session.history().undo_depth(), 1);
    assert!(session.is_dirty());

    assert!(session.undo());
    assert!(session.canvas().matches(&blank));
    assert!(session.history().can_redo());

    assert!(session.redo());
    assert_eq!(session.canvas().pixel(10, 25), Some(Rgba::BLACK));
}

#[test]
fn test_deactivate_mid_drag_restores_pre_press_pixels() {
    let mut session = with_block();
    let before = session.snapshot();
    session.select_tool(ToolKind::Star);

    session.press(p(0.0, 0.0));
    session.drag(p(90.0, 90.0));
    assert!(!session.canvas().matches(&before));

    assert!(session.set_tool_active(false));
    assert!(session.canvas().matches(&before));
    assert_eq!(session.release(p(90.0, 90.0)), ToolOutcome::Ignored);
    assert_eq!(session.history().undo_depth(), 1);
}

#[test]
fn test_switching_tool_mid_drag_discards_gesture() {
    let mut session = EditorSession::new(50, 50).unwrap();
    let before = session.snapshot();
    session.select_tool(ToolKind::Circle);
    session.press(p(25.0, 25.0));
    session.drag(p(40.0, 25.0));

    session.select_tool(ToolKind::Rectangle);
    assert!(session.canvas().matches(&before));
    assert_eq!(session.tool(), Some(ToolKind::Rectangle));
    assert!(session.tool_active());
}

#[test]
fn test_undo_mid_drag_discards_gesture_first() {
    let mut session = with_block();
    session.select_tool(ToolKind::Ellipse);
    session.press(p(50.0, 50.0));
    session.drag(p(90.0, 90.0));

    assert!(session.undo());
    assert_eq!(session.canvas().pixel(15, 15), Some(Rgba::WHITE));
    assert_eq!(session.canvas().pixel(70, 70), Some(Rgba::WHITE));
    assert_eq!(session.release(p(90.0, 90.0)), ToolOutcome::Ignored);
}

#[test]
fn test_move_selection_is_one_history_step() {
    let mut session = with_block();
    session.select_tool(ToolKind::MoveSelection);

    assert_eq!(
        gesture(&mut session, p(5.0, 5.0), p(25.0, 25.0)),
        ToolOutcome::Pending
    );
    // lifted: the source area is white while the region floats
    assert_eq!(session.canvas().pixel(15, 15), Some(Rgba::WHITE));
    assert_eq!(session.history().undo_depth(), 1);

    // grab 10px inside the selection and drop it 40px further on
    assert!(matches!(
        gesture(&mut session, p(15.0, 15.0), p(55.0, 55.0)),
        ToolOutcome::Committed { .. }
    ));
    assert_eq!(session.canvas().pixel(55, 55), Some(Rgba::BLACK));
    assert_eq!(session.canvas().pixel(15, 15), Some(Rgba::WHITE));
    assert_eq!(session.history().undo_depth(), 2);

    assert!(session.undo());
    assert_eq!(session.canvas().pixel(15, 15), Some(Rgba::BLACK));
    assert_eq!(session.canvas().pixel(55, 55), Some(Rgba::WHITE));
}

#[test]
fn test_copy_paste_keeps_source() {
    let mut session = with_block();
    session.select_tool(ToolKind::CopyPaste);

    assert_eq!(
        gesture(&mut session, p(10.0, 10.0), p(20.0, 20.0)),
        ToolOutcome::Pending
    );
    assert_eq!(session.canvas().pixel(15, 15), Some(Rgba::BLACK));
    assert_eq!(session.canvas().pixel(40, 40), Some(Rgba::WHITE));

    assert!(matches!(
        gesture(&mut session, p(70.0, 70.0), p(50.0, 50.0)),
        ToolOutcome::Committed { .. }
    ));
    assert_eq!(session.canvas().pixel(15, 15), Some(Rgba::BLACK));
    assert_eq!(session.canvas().pixel(55, 55), Some(Rgba::BLACK));
    // the drag position was only a preview
    assert_eq!(session.canvas().pixel(75, 75), Some(Rgba::WHITE));

    assert!(session.undo());
    assert_eq!(session.canvas().pixel(55, 55), Some(Rgba::WHITE));
    assert_eq!(session.canvas().pixel(15, 15), Some(Rgba::BLACK));
}

#[test]
fn test_transforms_record_history() {
    let mut session = with_block();
    session
        .apply_transform(CanvasTransform::MirrorHorizontal)
        .unwrap();
    assert_eq!(session.canvas().pixel(85, 15), Some(Rgba::BLACK));
    assert_eq!(session.canvas().pixel(15, 15), Some(Rgba::WHITE));

    session
        .apply_transform(CanvasTransform::Resize {
            width: 40,
            height: 30,
        })
        .unwrap();
    assert_eq!(session.canvas().width(), 40);
    assert_eq!(session.overlay().height(), 30);

    session.apply_transform(CanvasTransform::Clear).unwrap();
    assert_eq!(session.history().undo_depth(), 4);

    assert!(session.undo());
    assert!(session.undo());
    assert_eq!(session.canvas().width(), 100);
    assert_eq!(session.canvas().pixel(85, 15), Some(Rgba::BLACK));
}

#[test]
fn test_failed_transform_leaves_history_alone() {
    let mut session = with_block();
    let result = session.apply_transform(CanvasTransform::Resize {
        width: 0,
        height: 0,
    });
    assert!(result.is_err());
    assert_eq!(session.history().undo_depth(), 1);
}

#[test]
fn test_polygon_sides_fall_back_on_bad_input() {
    let mut session = EditorSession::new(100, 100).unwrap();
    assert_eq!(session.params_mut().set_polygon_sides("six"), 5);
    assert_eq!(session.params_mut().set_polygon_sides("6"), 6);
    session.select_tool(ToolKind::Polygon);
    assert!(matches!(
        gesture(&mut session, p(10.0, 10.0), p(90.0, 90.0)),
        ToolOutcome::Committed { .. }
    ));
    // top vertex of the hexagon sits at (50, 10)
    assert_eq!(session.canvas().pixel(50, 11), Some(Rgba::BLACK));
}
