//! Integration tests for contour-core.
//!
//! Full gestures across the drag controller, the geometry, the parameter
//! descriptors and the renderer, driven through the public API only.

use contour_core::{
    ControlLayout, DragEvent, DragHandle, DragState, EnvelopeAccess, EnvelopePath,
    EnvelopeParams, GraphGeometry, GraphStyle, Ink, Point, PointerEvent, Rect, RenderOptions,
    Size, Stage, Surface, render_graph,
};

const BOUNDS: Size = Size::new(400.0, 200.0);
const HIT: f32 = 10.0;

/// Parameter store that records every write, like a host with listeners.
#[derive(Default)]
struct RecordingStore {
    values: EnvelopeParams,
    writes: Vec<(Stage, f32)>,
}

impl EnvelopeAccess for RecordingStore {
    fn normalized(&self, stage: Stage) -> f32 {
        self.values.get(stage)
    }

    fn set_normalized(&mut self, stage: Stage, value: f32) {
        self.writes.push((stage, value));
        self.values.set(stage, value);
    }
}

fn store(values: EnvelopeParams) -> RecordingStore {
    RecordingStore {
        values,
        writes: Vec::new(),
    }
}

fn drag_to(state: &mut DragState, access: &mut impl EnvelopeAccess, to: Point, origin: Point) {
    state.apply(DragEvent::Drag(PointerEvent::new(to, origin)), access, BOUNDS, HIT);
}

// ============================================================================
// Reference scenarios
// ============================================================================

#[test]
fn reference_geometry_400_by_200() {
    let g = GraphGeometry::compute(&EnvelopeParams::splat(0.5), BOUNDS);
    assert_eq!(g.section, 100.0);
    assert_eq!(g.x_attack, 50.0);
    assert_eq!(g.x_decay, 100.0);
    assert_eq!(g.x_sustain, 200.0);
    assert_eq!(g.x_release, 250.0);
    assert_eq!(g.y_sustain, 70.0);
}

#[test]
fn release_from_zero_to_full() {
    let mut access = store(EnvelopeParams::new(0.5, 0.5, 0.5, 0.0));
    let g = GraphGeometry::compute(&access.values, BOUNDS);
    let origin = g.release_end();
    assert_eq!(origin, Point::new(200.0, 140.0));

    let mut state = DragState::default();
    state.apply(DragEvent::Down(origin), &mut access, BOUNDS, HIT);
    assert_eq!(state.handle(), DragHandle::ReleaseEnd);

    drag_to(&mut state, &mut access, Point::new(g.x_sustain + g.section, origin.y), origin);
    assert_eq!(access.values.release, 1.0);
}

#[test]
fn attack_clamps_exactly_at_both_ends() {
    let mut access = store(EnvelopeParams::splat(0.5));
    let origin = Point::new(50.0, 0.0);
    let mut state = DragState::default();
    state.apply(DragEvent::Down(origin), &mut access, BOUNDS, HIT);

    drag_to(&mut state, &mut access, Point::new(-10_000.0, 0.0), origin);
    assert_eq!(access.values.attack, 0.0);

    drag_to(&mut state, &mut access, Point::new(10_000.0, 0.0), origin);
    assert_eq!(access.values.attack, 1.0);
}

// ============================================================================
// Junction disambiguation across a whole gesture
// ============================================================================

#[test]
fn junction_stays_on_decay_for_the_whole_gesture() {
    let mut access = store(EnvelopeParams::splat(0.5));
    let origin = Point::new(100.0, 70.0);
    let mut state = DragState::default();
    state.apply(DragEvent::Down(origin), &mut access, BOUNDS, HIT);

    drag_to(&mut state, &mut access, Point::new(110.0, 72.0), origin);
    drag_to(&mut state, &mut access, Point::new(112.0, 5.0), origin);
    drag_to(&mut state, &mut access, Point::new(140.0, 130.0), origin);
    state.apply(DragEvent::Up, &mut access, BOUNDS, HIT);

    assert!(access.writes.iter().all(|(stage, _)| *stage == Stage::Decay));
    assert!((access.values.decay - 0.9).abs() < 1e-6);
    assert_eq!(access.values.sustain, 0.5);
    assert!(!state.is_active());
}

#[test]
fn decay_tracks_a_moving_attack() {
    // Decay is measured from the live attack peak, so changing attack
    // between samples moves the reference point.
    let mut access = store(EnvelopeParams::splat(0.5));
    let origin = Point::new(100.0, 70.0);
    let mut state = DragState::default();
    state.apply(DragEvent::Down(origin), &mut access, BOUNDS, HIT);
    drag_to(&mut state, &mut access, Point::new(130.0, 70.0), origin);
    assert!((access.values.decay - 0.8).abs() < 1e-6);

    access.set_normalized(Stage::Attack, 1.0);
    drag_to(&mut state, &mut access, Point::new(130.0, 70.0), origin);
    assert!((access.values.decay - 0.3).abs() < 1e-6);
}

// ============================================================================
// Gesture protocol
// ============================================================================

#[test]
fn gesture_edges_bracket_the_edits() {
    let mut access = store(EnvelopeParams::splat(0.5));
    let origin = Point::new(100.0, 70.0);
    let mut state = DragState::default();

    let down = state.apply(DragEvent::Down(origin), &mut access, BOUNDS, HIT);
    assert_eq!(down.gesture.begin, None);

    let first = state.apply(
        DragEvent::Drag(PointerEvent::new(Point::new(100.0, 60.0), origin)),
        &mut access,
        BOUNDS,
        HIT,
    );
    assert_eq!(first.gesture.begin, Some(Stage::Sustain));

    let second = state.apply(
        DragEvent::Drag(PointerEvent::new(Point::new(100.0, 50.0), origin)),
        &mut access,
        BOUNDS,
        HIT,
    );
    assert_eq!(second.gesture.begin, None);

    let up = state.apply(DragEvent::Up, &mut access, BOUNDS, HIT);
    assert_eq!(up.gesture.end, Some(Stage::Sustain));
}

#[test]
fn missed_grab_never_writes() {
    let mut access = store(EnvelopeParams::splat(0.5));
    let mut state = DragState::default();
    let down = state.apply(DragEvent::Down(Point::new(350.0, 10.0)), &mut access, BOUNDS, HIT);
    assert!(down.redraw);
    assert_eq!(state.handle(), DragHandle::None);

    let t = state.apply(
        DragEvent::Drag(PointerEvent::new(Point::new(10.0, 10.0), Point::new(350.0, 10.0))),
        &mut access,
        BOUNDS,
        HIT,
    );
    assert!(!t.redraw);
    assert!(access.writes.is_empty());
}

// ============================================================================
// Rendering against live values
// ============================================================================

#[derive(Default)]
struct TextSurface {
    texts: Vec<String>,
    fills: usize,
}

impl Surface for TextSurface {
    fn fill_rect(&mut self, _rect: Rect, _ink: Ink) {}
    fn fill_path(&mut self, _path: &EnvelopePath, _ink: Ink) {
        self.fills += 1;
    }
    fn stroke_path(&mut self, _path: &EnvelopePath, _ink: Ink, _width: f32) {}
    fn fill_circle(&mut self, _center: Point, _radius: f32, _ink: Ink) {}
    fn text(&mut self, _rect: Rect, text: &str, _ink: Ink, _font_size: f32) {
        self.texts.push(text.to_string());
    }
    fn set_clip(&mut self, _clip: Option<Rect>) {}
}

#[test]
fn readout_follows_the_drag() {
    let mut access = store(EnvelopeParams::splat(0.5));
    let origin = Point::new(250.0, 140.0);
    let mut state = DragState::default();
    state.apply(DragEvent::Down(origin), &mut access, BOUNDS, HIT);
    drag_to(&mut state, &mut access, Point::new(300.0, 140.0), origin);

    let mut surface = TextSurface::default();
    let style = GraphStyle::default();
    render_graph(&mut surface, &access, BOUNDS, &state, &style, RenderOptions::default());
    assert_eq!(surface.texts, vec!["5.000 s".to_string()]);

    state.apply(DragEvent::Up, &mut access, BOUNDS, HIT);
    let mut surface = TextSurface::default();
    render_graph(&mut surface, &access, BOUNDS, &state, &style, RenderOptions::default());
    assert!(surface.texts.is_empty());
    assert_eq!(surface.fills, 1);
}

#[test]
fn rendering_does_not_write() {
    let access = store(EnvelopeParams::splat(0.25));
    let mut surface = TextSurface::default();
    render_graph(
        &mut surface,
        &access,
        BOUNDS,
        &DragState::grabbed(DragHandle::AttackPeak),
        &GraphStyle::default(),
        RenderOptions::default(),
    );
    assert!(access.writes.is_empty());
}

#[test]
fn controls_fit_under_the_graph() {
    let g = GraphGeometry::compute(&EnvelopeParams::splat(0.5), BOUNDS);
    let layout = ControlLayout::compute(BOUNDS);
    for slot in &layout.slots {
        assert!(slot.label.y >= g.area.bottom() - 1e-4);
        assert!(slot.knob.y >= slot.label.bottom() - 1e-4);
        assert!(slot.knob.x >= slot.label.x && slot.knob.right() <= slot.label.right() + 1e-4);
    }
}
