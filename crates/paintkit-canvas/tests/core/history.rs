use paintkit_canvas::{Bounds, HistoryManager, Surface};
use paintkit_core::Rgba;
use proptest::prelude::*;

/// One edit: a filled square of `color` at (x, y).
type Edit = (u8, u8, u8);

fn apply(canvas: &mut Surface, (x, y, shade): Edit) {
    canvas.fill_rect(
        Bounds::new(f32::from(x % 12), f32::from(y % 12), 4.0, 4.0),
        Rgba::rgb(shade, 255 - shade, shade / 2),
    );
}

fn edits() -> impl Strategy<Value = Vec<Edit>> {
    prop::collection::vec(any::<Edit>(), 1..12)
}

#[test]
fn test_history_starts_empty() {
    let history = HistoryManager::new();
    assert!(!history.can_undo());
    assert!(!history.can_redo());
    assert_eq!(history.undo_depth(), 0);
    assert_eq!(history.redo_depth(), 0);
}

#[test]
fn test_empty_undo_and_redo_leave_pixels_alone() {
    let mut history = HistoryManager::new();
    let mut canvas = Surface::new(16, 16).unwrap();
    apply(&mut canvas, (2, 2, 0));
    let before = canvas.clone();

    assert!(!history.undo(&mut canvas));
    assert!(!history.redo(&mut canvas));
    assert_eq!(canvas, before);
}

#[test]
fn test_depth_cap_drops_oldest() {
    let mut history = HistoryManager::with_depth(2);
    let mut canvas = Surface::new(16, 16).unwrap();
    let mut oldest_kept = canvas.clone();
    for i in 0..4u8 {
        if i == 2 {
            oldest_kept = canvas.clone();
        }
        history.record_state(&canvas);
        apply(&mut canvas, (i, i, i * 40));
    }
    assert_eq!(history.undo_depth(), 2);
    assert!(history.undo(&mut canvas));
    assert!(history.undo(&mut canvas));
    assert!(!history.undo(&mut canvas));
    assert_eq!(canvas, oldest_kept);
}

#[test]
fn test_clear_discards_both_stacks() {
    let mut history = HistoryManager::new();
    let mut canvas = Surface::new(16, 16).unwrap();
    history.record_state(&canvas);
    apply(&mut canvas, (1, 1, 1));
    history.undo(&mut canvas);
    history.clear();
    assert!(!history.can_undo());
    assert!(!history.can_redo());
}

proptest! {
    #[test]
    fn undo_all_returns_to_the_start(edits in edits()) {
        let mut history = HistoryManager::new();
        let mut canvas = Surface::new(16, 16).unwrap();
        let start = canvas.clone();

        for edit in &edits {
            history.record_state(&canvas);
            apply(&mut canvas, *edit);
        }
        for _ in &edits {
            prop_assert!(history.undo(&mut canvas));
        }
        prop_assert_eq!(&canvas, &start);
        prop_assert!(!history.can_undo());
        prop_assert_eq!(history.redo_depth(), edits.len());
    }

    #[test]
    fn redo_after_undo_restores_pre_undo_pixels(edits in edits()) {
        let mut history = HistoryManager::new();
        let mut canvas = Surface::new(16, 16).unwrap();
        for edit in &edits {
            history.record_state(&canvas);
            apply(&mut canvas, *edit);
        }
        let latest = canvas.clone();

        prop_assert!(history.undo(&mut canvas));
        prop_assert!(history.redo(&mut canvas));
        prop_assert_eq!(&canvas, &latest);
    }

    #[test]
    fn recording_after_undo_clears_redo(edits in edits(), extra in any::<Edit>()) {
        let mut history = HistoryManager::new();
        let mut canvas = Surface::new(16, 16).unwrap();
        for edit in &edits {
            history.record_state(&canvas);
            apply(&mut canvas, *edit);
        }
        history.undo(&mut canvas);
        prop_assert!(history.can_redo());

        history.record_state(&canvas);
        apply(&mut canvas, extra);
        prop_assert!(!history.can_redo());
        let current = canvas.clone();
        prop_assert!(!history.redo(&mut canvas));
        prop_assert_eq!(&canvas, &current);
    }
}
