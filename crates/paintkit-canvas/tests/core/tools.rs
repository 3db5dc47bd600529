use paintkit_canvas::tools::{
    parse_count, Layers, ToolController, ToolKind, ToolOutcome, ToolParams, ToolState,
};
use paintkit_canvas::{ShapeStyle, Surface};
use paintkit_core::{Point, Rgba};

struct Fixture {
    canvas: Surface,
    overlay: Surface,
    style: ShapeStyle,
    params: ToolParams,
}

impl Fixture {
    fn new() -> Self {
        Self {
            canvas: Surface::new(100, 100).unwrap(),
            overlay: Surface::transparent(100, 100).unwrap(),
            style: ShapeStyle::default(),
            params: ToolParams::default(),
        }
    }

    fn layers(&mut self) -> Layers<'_> {
        Layers {
            canvas: &mut self.canvas,
            overlay: &mut self.overlay,
            style: &self.style,
            params: &self.params,
        }
    }
}

fn p(x: f32, y: f32) -> Point {
    Point::new(x, y)
}

#[test]
fn test_inactive_controller_ignores_pointer() {
    let mut fx = Fixture::new();
    let mut controller = ToolController::new(ToolKind::Rectangle.create());
    assert_eq!(controller.state(), ToolState::Inactive);

    assert_eq!(controller.press(fx.layers(), p(10.0, 10.0)), ToolOutcome::Ignored);
    assert_eq!(controller.drag(fx.layers(), p(50.0, 50.0)), ToolOutcome::Ignored);
    assert_eq!(controller.release(fx.layers(), p(50.0, 50.0)), ToolOutcome::Ignored);
    assert_eq!(fx.canvas, Surface::new(100, 100).unwrap());
}

#[test]
fn test_drag_without_press_is_ignored() {
    let mut fx = Fixture::new();
    let mut controller = ToolController::new(ToolKind::Rectangle.create());
    controller.set_active(true, &mut fx.canvas, &mut fx.overlay);
    assert_eq!(controller.drag(fx.layers(), p(50.0, 50.0)), ToolOutcome::Ignored);
    assert_eq!(controller.release(fx.layers(), p(50.0, 50.0)), ToolOutcome::Ignored);
}

#[test]
fn test_rectangle_gesture_commits_pre_press_snapshot() {
    let mut fx = Fixture::new();
    let blank = fx.canvas.snapshot();
    let mut controller = ToolController::new(ToolKind::Rectangle.create());
    controller.set_active(true, &mut fx.canvas, &mut fx.overlay);

    assert_eq!(controller.press(fx.layers(), p(10.0, 10.0)), ToolOutcome::Preview);
    assert_eq!(controller.state(), ToolState::Dragging);
    assert_eq!(controller.drag(fx.layers(), p(60.0, 40.0)), ToolOutcome::Preview);

    match controller.release(fx.layers(), p(60.0, 40.0)) {
        ToolOutcome::Committed { before } => assert_eq!(before, blank),
        other => panic!("expected a commit, got {:?}", other),
    }
    assert_eq!(controller.state(), ToolState::Idle);
    assert_eq!(fx.canvas.pixel(10, 25), Some(Rgba::BLACK));
}

#[test]
fn test_deactivating_mid_drag_restores_baseline() {
    let mut fx = Fixture::new();
    let before = fx.canvas.clone();
    let mut controller = ToolController::new(ToolKind::Ellipse.create());
    controller.set_active(true, &mut fx.canvas, &mut fx.overlay);

    controller.press(fx.layers(), p(10.0, 10.0));
    controller.drag(fx.layers(), p(80.0, 70.0));
    assert_ne!(fx.canvas, before);

    controller.set_active(false, &mut fx.canvas, &mut fx.overlay);
    assert_eq!(fx.canvas, before);
    assert_eq!(controller.state(), ToolState::Inactive);
    assert_eq!(controller.release(fx.layers(), p(80.0, 70.0)), ToolOutcome::Ignored);
}

#[test]
fn test_line_preview_does_not_accumulate() {
    let mut fx = Fixture::new();
    let mut controller = ToolController::new(ToolKind::Line.create());
    controller.set_active(true, &mut fx.canvas, &mut fx.overlay);

    controller.press(fx.layers(), p(0.0, 50.0));
    controller.drag(fx.layers(), p(99.0, 0.0));
    assert_eq!(fx.canvas.pixel(80, 10), Some(Rgba::BLACK));

    controller.drag(fx.layers(), p(99.0, 99.0));
    assert_eq!(fx.canvas.pixel(80, 10), Some(Rgba::WHITE));
    assert!(matches!(
        controller.release(fx.layers(), p(99.0, 99.0)),
        ToolOutcome::Committed { .. }
    ));
}

#[test]
fn test_pencil_then_eraser() {
    let mut fx = Fixture::new();
    let mut pencil = ToolController::new(ToolKind::Pencil.create());
    pencil.set_active(true, &mut fx.canvas, &mut fx.overlay);
    pencil.press(fx.layers(), p(10.0, 20.0));
    pencil.drag(fx.layers(), p(50.0, 20.0));
    assert!(matches!(
        pencil.release(fx.layers(), p(90.0, 20.0)),
        ToolOutcome::Committed { .. }
    ));
    assert_eq!(fx.canvas.pixel(30, 20), Some(Rgba::BLACK));
    assert_eq!(fx.canvas.pixel(70, 20), Some(Rgba::BLACK));

    let mut eraser = ToolController::new(ToolKind::Eraser.create());
    eraser.set_active(true, &mut fx.canvas, &mut fx.overlay);
    eraser.press(fx.layers(), p(20.0, 20.0));
    eraser.drag(fx.layers(), p(40.0, 20.0));
    eraser.release(fx.layers(), p(40.0, 20.0));
    assert_eq!(fx.canvas.pixel(30, 20), Some(Rgba::WHITE));
    assert_eq!(fx.canvas.pixel(70, 20), Some(Rgba::BLACK));
}

#[test]
fn test_text_without_content_draws_nothing() {
    let mut fx = Fixture::new();
    let before = fx.canvas.clone();
    let mut controller = ToolController::new(ToolKind::Text.create());
    controller.set_active(true, &mut fx.canvas, &mut fx.overlay);

    assert_eq!(controller.press(fx.layers(), p(20.0, 60.0)), ToolOutcome::Preview);
    assert_eq!(controller.release(fx.layers(), p(20.0, 60.0)), ToolOutcome::Ignored);
    assert_eq!(fx.canvas, before);
}

#[test]
fn test_move_selection_marquee_lives_on_overlay() {
    let mut fx = Fixture::new();
    let before = fx.canvas.clone();
    let mut controller = ToolController::new(ToolKind::MoveSelection.create());
    controller.set_active(true, &mut fx.canvas, &mut fx.overlay);

    controller.press(fx.layers(), p(10.0, 10.0));
    controller.drag(fx.layers(), p(50.0, 50.0));
    assert_eq!(fx.canvas, before);
    let marquee_drawn = |overlay: &Surface| {
        (10..50).any(|x| overlay.pixel(x, 10) != Some(Rgba::TRANSPARENT))
    };
    assert!(marquee_drawn(&fx.overlay));

    assert_eq!(controller.release(fx.layers(), p(50.0, 50.0)), ToolOutcome::Pending);
    assert!(!marquee_drawn(&fx.overlay));
    assert!(controller.in_flight());

    controller.set_active(false, &mut fx.canvas, &mut fx.overlay);
    assert!(!controller.in_flight());
    assert_eq!(fx.canvas, before);
}

#[test]
fn test_count_parsing() {
    assert_eq!(parse_count("8", 3), 8);
    assert_eq!(parse_count(" 2 ", 3), 3);
    assert_eq!(parse_count("-4", 5), 5);
    assert_eq!(parse_count("many", 3), 5);

    let mut params = ToolParams::default();
    assert_eq!(params.set_polygon_sides("1"), 3);
    assert_eq!(params.set_star_points("3"), 5);
    assert_eq!(params.set_star_points("9"), 9);
}
