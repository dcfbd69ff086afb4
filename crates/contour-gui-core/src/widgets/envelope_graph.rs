//! Interactive ADSR graph widget.
//!
//! [`EnvelopeGraph`] draws one envelope slot of an [`EnvelopeBridge`] and lets
//! the user drag its three handles. egui input is reduced to a
//! [`PointerFrame`] each frame; [`GraphDrag::handle_frame`] turns that into
//! drag events, forwards gestures to the bridge and writes the edits.
//!
//! Gesture notifications reach the host before the edit they belong to, so
//! an automation-recording host sees `begin_set`, then the writes, then
//! `end_set`.

use contour_core::{
    DragEvent, DragHandle, DragState, EnvelopeAccess, GraphGeometry, GraphStyle, Point,
    PointerEvent, RenderOptions, Size, hit_test, render_graph,
};
use egui::{CursorIcon, Response, Sense, Ui, Vec2, Widget};

use crate::surface::EguiSurface;
use crate::{BridgeAccess, EnvelopeBridge, SlotIndex, Theme};

/// Primary-button pointer input for one frame, in widget-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerFrame {
    /// Pointer position, `None` when the pointer is gone.
    pub position: Option<Point>,
    /// Pointer is inside the widget rectangle.
    pub inside: bool,
    /// Widget is hovered and not covered by another widget.
    pub hovered: bool,
    /// Primary button went down this frame.
    pub pressed: bool,
    /// Primary button is held.
    pub down: bool,
    /// Primary button went up this frame.
    pub released: bool,
    /// Pointer moved since the previous frame.
    pub moved: bool,
}

impl PointerFrame {
    /// Read the pointer state for a widget occupying `rect`.
    pub fn capture(ui: &Ui, response: &Response, rect: egui::Rect) -> Self {
        ui.input(|i| {
            let pos = i.pointer.interact_pos();
            Self {
                position: pos.map(|p| Point::new(p.x - rect.min.x, p.y - rect.min.y)),
                inside: pos.is_some_and(|p| rect.contains(p)),
                hovered: response.hovered(),
                pressed: i.pointer.primary_pressed(),
                down: i.pointer.primary_down(),
                released: i.pointer.primary_released(),
                moved: i.pointer.delta() != Vec2::ZERO,
            }
        })
    }
}

/// What a frame of input did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameOutcome {
    /// A parameter was written.
    pub changed: bool,
    /// The graph needs repainting.
    pub redraw: bool,
}

/// Drag state of one graph plus the position where the current press began.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GraphDrag {
    state: DragState,
    origin: Point,
}

impl GraphDrag {
    /// Current drag state.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Drop any drag in progress without notifying the host.
    pub fn reset(&mut self) {
        self.state = DragState::IDLE;
    }

    /// Feed one frame of pointer input.
    ///
    /// Per frame, in order: a press over the widget grabs; a move with the
    /// button held drags; a release ends the drag, otherwise leaving the
    /// widget ends it.
    pub fn handle_frame(
        &mut self,
        frame: &PointerFrame,
        bridge: &dyn EnvelopeBridge,
        slot: SlotIndex,
        bounds: Size,
        hit_radius: f32,
    ) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();

        if frame.pressed && frame.hovered {
            if let Some(position) = frame.position {
                self.origin = position;
                self.feed(DragEvent::Down(position), bridge, slot, bounds, hit_radius, &mut outcome);
            }
        }

        if self.state.is_active() && frame.down && frame.moved {
            // A sample at the press point carries no direction for the junction.
            if let Some(position) = frame.position.filter(|p| *p != self.origin) {
                let event = DragEvent::Drag(PointerEvent::new(position, self.origin));
                self.feed(event, bridge, slot, bounds, hit_radius, &mut outcome);
            }
        }

        if self.state.is_active() {
            if frame.released {
                self.feed(DragEvent::Up, bridge, slot, bounds, hit_radius, &mut outcome);
            } else if !frame.inside {
                self.feed(DragEvent::Exit, bridge, slot, bounds, hit_radius, &mut outcome);
            }
        }

        outcome
    }

    fn feed(
        &mut self,
        event: DragEvent,
        bridge: &dyn EnvelopeBridge,
        slot: SlotIndex,
        bounds: Size,
        hit_radius: f32,
        outcome: &mut FrameOutcome,
    ) {
        let mut access = BridgeAccess::new(bridge, slot);
        let params = access.snapshot();
        let transition = self.state.transition(event, &params, bounds, hit_radius);

        if let Some(stage) = transition.gesture.end {
            bridge.end_set(slot, stage);
        }
        if let Some(stage) = transition.gesture.begin {
            bridge.begin_set(slot, stage);
        }
        if let Some(edit) = transition.edit {
            edit.apply(&mut access);
            outcome.changed = true;
        }
        outcome.redraw |= transition.redraw;
        self.state = transition.state;
    }
}

/// ADSR graph bound to one slot of a bridge.
pub struct EnvelopeGraph<'a> {
    bridge: &'a dyn EnvelopeBridge,
    slot: SlotIndex,
    drag: &'a mut GraphDrag,
    style: &'a GraphStyle,
    theme: &'a Theme,
    interactive: bool,
    size: Vec2,
}

impl<'a> EnvelopeGraph<'a> {
    /// Interactive graph of `size` for `slot`.
    pub fn new(
        bridge: &'a dyn EnvelopeBridge,
        slot: SlotIndex,
        drag: &'a mut GraphDrag,
        style: &'a GraphStyle,
        theme: &'a Theme,
    ) -> Self {
        Self {
            bridge,
            slot,
            drag,
            style,
            theme,
            interactive: true,
            size: Vec2::new(400.0, 200.0),
        }
    }

    /// Whether the handles can be dragged. Display-only graphs draw the curve alone.
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Widget size; the graph takes the top 70%.
    pub fn size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }
}

impl Widget for EnvelopeGraph<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let sense = if self.interactive { Sense::click_and_drag() } else { Sense::hover() };
        let (rect, mut response) = ui.allocate_exact_size(self.size, sense);
        let bounds = Size::new(rect.width(), rect.height());

        if self.interactive {
            let frame = PointerFrame::capture(ui, &response, rect);
            let outcome = self
                .drag
                .handle_frame(&frame, self.bridge, self.slot, bounds, self.style.hit_radius);
            if outcome.changed {
                response.mark_changed();
            }
            if outcome.redraw {
                ui.ctx().request_repaint();
            }

            if self.drag.state().is_active() {
                ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
            } else if let (true, Some(position)) = (response.hovered(), frame.position) {
                let access = BridgeAccess::new(self.bridge, self.slot);
                let geometry = GraphGeometry::compute(&access.snapshot(), bounds);
                if hit_test(&geometry, position, self.style.hit_radius) != DragHandle::None {
                    ui.ctx().set_cursor_icon(CursorIcon::Grab);
                }
            }
        } else {
            self.drag.reset();
        }

        if ui.is_rect_visible(rect) {
            let mut surface =
                EguiSurface::new(ui.painter(), rect, self.theme, self.style.curve_segments);
            let options = if self.interactive {
                RenderOptions::default()
            } else {
                RenderOptions::DISPLAY_ONLY
            };
            render_graph(
                &mut surface,
                &BridgeAccess::new(self.bridge, self.slot),
                bounds,
                &self.drag.state(),
                self.style,
                options,
            );
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contour_core::{DecayAxis, Stage};
    use std::sync::Mutex;

    const BOUNDS: Size = Size::new(400.0, 200.0);
    const RADIUS: f32 = 10.0;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Call {
        Begin(Stage),
        Set(Stage),
        End(Stage),
    }

    struct TestBridge {
        values: Mutex<[f32; 4]>,
        calls: Mutex<Vec<Call>>,
    }

    impl TestBridge {
        /// All stages at normalized 0.5.
        fn new() -> Self {
            Self {
                values: Mutex::new(Stage::ALL.map(|s| s.descriptor().denormalize(0.5))),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl EnvelopeBridge for TestBridge {
        fn slot_count(&self) -> usize {
            1
        }
        fn get(&self, _slot: SlotIndex, stage: Stage) -> f32 {
            self.values.lock().unwrap()[stage.index()]
        }
        fn set(&self, _slot: SlotIndex, stage: Stage, value: f32) {
            self.values.lock().unwrap()[stage.index()] = stage.descriptor().clamp(value);
            self.calls.lock().unwrap().push(Call::Set(stage));
        }
        fn is_looping(&self, _slot: SlotIndex) -> bool {
            false
        }
        fn set_looping(&self, _slot: SlotIndex, _looping: bool) {}
        fn begin_set(&self, _slot: SlotIndex, stage: Stage) {
            self.calls.lock().unwrap().push(Call::Begin(stage));
        }
        fn end_set(&self, _slot: SlotIndex, stage: Stage) {
            self.calls.lock().unwrap().push(Call::End(stage));
        }
    }

    fn press(x: f32, y: f32) -> PointerFrame {
        PointerFrame {
            position: Some(Point::new(x, y)),
            inside: true,
            hovered: true,
            pressed: true,
            down: true,
            moved: false,
            released: false,
        }
    }

    fn move_to(x: f32, y: f32) -> PointerFrame {
        PointerFrame {
            position: Some(Point::new(x, y)),
            inside: true,
            hovered: true,
            down: true,
            moved: true,
            ..PointerFrame::default()
        }
    }

    fn release(x: f32, y: f32) -> PointerFrame {
        PointerFrame {
            position: Some(Point::new(x, y)),
            inside: true,
            hovered: true,
            released: true,
            ..PointerFrame::default()
        }
    }

    fn run(drag: &mut GraphDrag, bridge: &TestBridge, frame: PointerFrame) -> FrameOutcome {
        drag.handle_frame(&frame, bridge, SlotIndex(0), BOUNDS, RADIUS)
    }

    #[test]
    fn attack_drag_sends_gesture_then_writes() {
        let bridge = TestBridge::new();
        let mut drag = GraphDrag::default();

        let outcome = run(&mut drag, &bridge, press(50.0, 0.0));
        assert!(outcome.redraw && !outcome.changed);
        assert_eq!(drag.state().handle(), DragHandle::AttackPeak);

        let outcome = run(&mut drag, &bridge, move_to(25.0, 0.0));
        assert!(outcome.changed);
        assert!((bridge.get_normalized(SlotIndex(0), Stage::Attack) - 0.25).abs() < 1e-4);

        run(&mut drag, &bridge, release(25.0, 0.0));
        assert!(!drag.state().is_active());
        assert_eq!(
            bridge.calls(),
            vec![Call::Begin(Stage::Attack), Call::Set(Stage::Attack), Call::End(Stage::Attack)]
        );
    }

    #[test]
    fn junction_press_without_motion_stays_pending() {
        let bridge = TestBridge::new();
        let mut drag = GraphDrag::default();

        run(&mut drag, &bridge, press(100.0, 70.0));
        let outcome = run(&mut drag, &bridge, move_to(100.0, 70.0));
        assert!(!outcome.changed);
        assert_eq!(drag.state().axis(), DecayAxis::Pending);
        assert!(bridge.calls().is_empty());
    }

    #[test]
    fn junction_vertical_drag_sets_sustain() {
        let bridge = TestBridge::new();
        let mut drag = GraphDrag::default();

        run(&mut drag, &bridge, press(100.0, 70.0));
        run(&mut drag, &bridge, move_to(101.0, 35.0));
        assert_eq!(drag.state().axis(), DecayAxis::Sustain);
        assert!((bridge.get_normalized(SlotIndex(0), Stage::Sustain) - 0.75).abs() < 1e-4);
        assert_eq!(bridge.calls(), vec![Call::Begin(Stage::Sustain), Call::Set(Stage::Sustain)]);
    }

    #[test]
    fn leaving_the_widget_ends_the_drag() {
        let bridge = TestBridge::new();
        let mut drag = GraphDrag::default();

        run(&mut drag, &bridge, press(250.0, 140.0));
        let outside = PointerFrame {
            position: Some(Point::new(500.0, 140.0)),
            inside: false,
            down: true,
            moved: true,
            ..PointerFrame::default()
        };
        let outcome = run(&mut drag, &bridge, outside);

        assert!(!drag.state().is_active());
        assert!(outcome.redraw);
        // The sample before the exit still lands and clamps.
        assert!((bridge.get_normalized(SlotIndex(0), Stage::Release) - 1.0).abs() < 1e-4);
        assert_eq!(bridge.calls().last(), Some(&Call::End(Stage::Release)));

        let outcome = run(&mut drag, &bridge, move_to(200.0, 140.0));
        assert!(!outcome.changed);
    }

    #[test]
    fn press_while_covered_is_ignored() {
        let bridge = TestBridge::new();
        let mut drag = GraphDrag::default();
        let frame = PointerFrame {
            hovered: false,
            ..press(50.0, 0.0)
        };
        let outcome = run(&mut drag, &bridge, frame);
        assert_eq!(outcome, FrameOutcome::default());
        assert!(!drag.state().is_active());
    }

    #[test]
    fn missed_press_redraws_but_never_writes() {
        let bridge = TestBridge::new();
        let mut drag = GraphDrag::default();

        let outcome = run(&mut drag, &bridge, press(350.0, 20.0));
        assert!(outcome.redraw);
        let outcome = run(&mut drag, &bridge, move_to(300.0, 60.0));
        assert!(!outcome.changed);
        assert!(bridge.calls().is_empty());
    }

    #[test]
    fn click_in_one_frame_grabs_and_releases() {
        let bridge = TestBridge::new();
        let mut drag = GraphDrag::default();
        let frame = PointerFrame {
            released: true,
            down: false,
            ..press(50.0, 0.0)
        };
        run(&mut drag, &bridge, frame);
        assert!(!drag.state().is_active());
        // Attack commits on grab, so its gesture opens and closes.
        assert_eq!(bridge.calls(), vec![Call::Begin(Stage::Attack), Call::End(Stage::Attack)]);
    }
}
