//! Hit testing and drag handling for the envelope graph handles.
//!
//! Drag state is an explicit value. Each pointer event goes in together with
//! the current state and the live parameter values, and a [`Transition`] comes
//! out: the next state, at most one parameter edit, whether to redraw and
//! which host gestures to open or close. Nothing here touches a toolkit.
//!
//! ```rust
//! use contour_core::{DragEvent, DragHandle, DragState, EnvelopeParams, Point, PointerEvent, Size};
//!
//! let mut params = EnvelopeParams::splat(0.5);
//! let bounds = Size::new(400.0, 200.0);
//! let mut drag = DragState::default();
//!
//! // Grab the attack peak at (50, 0) and pull it left.
//! drag.apply(DragEvent::Down(Point::new(52.0, 3.0)), &mut params, bounds, 10.0);
//! assert_eq!(drag.handle(), DragHandle::AttackPeak);
//!
//! let event = PointerEvent::new(Point::new(25.0, 3.0), Point::new(52.0, 3.0));
//! drag.apply(DragEvent::Drag(event), &mut params, bounds, 10.0);
//! assert_eq!(params.attack, 0.25);
//! ```

use crate::envelope::{EnvelopeAccess, EnvelopeParams, ParamEdit, Stage};
use crate::geometry::{GraphGeometry, Point, Size};

/// Which handle, if any, is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragHandle {
    /// No drag in progress.
    #[default]
    None,
    /// Attack peak: horizontal motion sets attack.
    AttackPeak,
    /// Decay/sustain junction: sets decay or sustain, see [`DecayAxis`].
    DecayEnd,
    /// Release end: horizontal motion sets release.
    ReleaseEnd,
}

/// Which parameter a junction drag controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecayAxis {
    /// Not decided yet; resolved by the first drag sample.
    #[default]
    Pending,
    /// Horizontal: decay time.
    Decay,
    /// Vertical: sustain level.
    Sustain,
}

/// Current drag handle plus the junction axis resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragState {
    handle: DragHandle,
    axis: DecayAxis,
}

/// A pointer sample during a drag, in local widget coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Current pointer position.
    pub position: Point,
    /// Position of the pointer-down that started the gesture.
    pub origin: Point,
}

impl PointerEvent {
    /// Create a drag sample.
    pub const fn new(position: Point, origin: Point) -> Self {
        Self { position, origin }
    }
}

/// Input to [`DragState::transition`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    /// Primary button pressed at a position.
    Down(Point),
    /// Pointer moved with the button held.
    Drag(PointerEvent),
    /// Button released.
    Up,
    /// Pointer left the widget.
    Exit,
}

/// Host gesture edges produced by a transition.
///
/// `end` is delivered before `begin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Gesture {
    /// Stage whose gesture has finished.
    pub end: Option<Stage>,
    /// Stage whose gesture has started.
    pub begin: Option<Stage>,
}

/// Result of feeding one event to a [`DragState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// State after the event.
    pub state: DragState,
    /// Parameter write to perform, if any.
    pub edit: Option<ParamEdit>,
    /// Whether the graph should be repainted.
    pub redraw: bool,
    /// Gesture begin/end notifications for the parameter host.
    pub gesture: Gesture,
}

impl Transition {
    fn unchanged(state: DragState) -> Self {
        Self {
            state,
            edit: None,
            redraw: false,
            gesture: Gesture::default(),
        }
    }
}

/// Handle within `radius` of `point`, checked attack, junction, release.
///
/// The comparison is strict: a pointer exactly `radius` away misses.
pub fn hit_test(geometry: &GraphGeometry, point: Point, radius: f32) -> DragHandle {
    let radius_sq = radius * radius;
    let handles = [DragHandle::AttackPeak, DragHandle::DecayEnd, DragHandle::ReleaseEnd];
    geometry
        .handles()
        .into_iter()
        .zip(handles)
        .find(|(pos, _)| pos.distance_sq(point) < radius_sq)
        .map_or(DragHandle::None, |(_, handle)| handle)
}

impl DragState {
    /// No drag in progress.
    pub const IDLE: Self = Self {
        handle: DragHandle::None,
        axis: DecayAxis::Pending,
    };

    /// State for a freshly grabbed `handle`.
    pub const fn grabbed(handle: DragHandle) -> Self {
        Self {
            handle,
            axis: DecayAxis::Pending,
        }
    }

    /// The active handle.
    pub const fn handle(&self) -> DragHandle {
        self.handle
    }

    /// Junction axis resolution; [`DecayAxis::Pending`] for other handles.
    pub const fn axis(&self) -> DecayAxis {
        self.axis
    }

    /// Whether a handle is held.
    pub fn is_active(&self) -> bool {
        self.handle != DragHandle::None
    }

    /// Stage the drag writes to, once known.
    pub const fn committed_stage(&self) -> Option<Stage> {
        match (self.handle, self.axis) {
            (DragHandle::AttackPeak, _) => Some(Stage::Attack),
            (DragHandle::ReleaseEnd, _) => Some(Stage::Release),
            (DragHandle::DecayEnd, DecayAxis::Decay) => Some(Stage::Decay),
            (DragHandle::DecayEnd, DecayAxis::Sustain) => Some(Stage::Sustain),
            (DragHandle::DecayEnd, DecayAxis::Pending) | (DragHandle::None, _) => None,
        }
    }

    /// Stage whose value the readout shows; a pending junction shows sustain.
    pub const fn readout_stage(&self) -> Option<Stage> {
        match (self.handle, self.axis) {
            (DragHandle::DecayEnd, DecayAxis::Pending) => Some(Stage::Sustain),
            _ => self.committed_stage(),
        }
    }

    /// Position of the held handle in `geometry`.
    pub fn handle_position(&self, geometry: &GraphGeometry) -> Option<Point> {
        match self.handle {
            DragHandle::None => None,
            DragHandle::AttackPeak => Some(geometry.attack_peak()),
            DragHandle::DecayEnd => Some(geometry.decay_end()),
            DragHandle::ReleaseEnd => Some(geometry.release_end()),
        }
    }

    /// Feed one event. Pure: the caller performs `edit` and stores `state`.
    ///
    /// `params` are the live values; `hit_radius` is only used by
    /// [`DragEvent::Down`].
    pub fn transition(
        self,
        event: DragEvent,
        params: &EnvelopeParams,
        bounds: Size,
        hit_radius: f32,
    ) -> Transition {
        match event {
            DragEvent::Down(position) => self.pointer_down(position, params, bounds, hit_radius),
            DragEvent::Drag(pointer) => self.pointer_drag(pointer, params, bounds),
            DragEvent::Up => self.pointer_up(),
            DragEvent::Exit => self.pointer_exit(),
        }
    }

    /// Grab the first handle within `hit_radius` of `position`, or none.
    ///
    /// Always requests a redraw.
    pub fn pointer_down(
        self,
        position: Point,
        params: &EnvelopeParams,
        bounds: Size,
        hit_radius: f32,
    ) -> Transition {
        let geometry = GraphGeometry::compute(params, bounds);
        let state = Self::grabbed(hit_test(&geometry, position, hit_radius));

        #[cfg(feature = "tracing")]
        {
            if state.is_active() {
                tracing::debug!(handle = ?state.handle, x = position.x, y = position.y, "envelope handle grabbed");
            }
        }

        Transition {
            state,
            edit: None,
            redraw: true,
            gesture: Gesture {
                end: self.committed_stage(),
                begin: state.committed_stage(),
            },
        }
    }

    /// Translate one drag sample into a parameter edit.
    ///
    /// Boundaries are recomputed from `params` on every call. A pending
    /// junction commits on this sample: horizontal displacement strictly
    /// larger than vertical picks decay, anything else picks sustain.
    pub fn pointer_drag(self, pointer: PointerEvent, params: &EnvelopeParams, bounds: Size) -> Transition {
        if !self.is_active() {
            return Transition::unchanged(self);
        }
        let geometry = GraphGeometry::compute(params, bounds);
        if geometry.is_degenerate() {
            return Transition::unchanged(self);
        }

        let mut state = self;
        if state.handle == DragHandle::DecayEnd && state.axis == DecayAxis::Pending {
            let dx = libm::fabsf(pointer.position.x - pointer.origin.x);
            let dy = libm::fabsf(pointer.position.y - pointer.origin.y);
            state.axis = if dx > dy { DecayAxis::Decay } else { DecayAxis::Sustain };

            #[cfg(feature = "tracing")]
            tracing::debug!(axis = ?state.axis, dx, dy, "junction drag committed");
        }

        let Some(stage) = state.committed_stage() else {
            return Transition::unchanged(state);
        };
        let p = pointer.position;
        let value = match stage {
            Stage::Attack => geometry.attack_from_x(p.x),
            Stage::Decay => geometry.decay_from_x(p.x),
            Stage::Sustain => geometry.sustain_from_y(p.y),
            Stage::Release => geometry.release_from_x(p.x),
        };
        let edit = value.map(|v| ParamEdit::new(stage, v));

        #[cfg(feature = "tracing")]
        {
            if let Some(edit) = edit {
                tracing::trace!(stage = ?edit.stage, value = edit.value, "envelope drag edit");
            }
        }

        Transition {
            state,
            edit,
            redraw: edit.is_some(),
            gesture: Gesture {
                end: None,
                begin: if self.committed_stage().is_none() {
                    state.committed_stage()
                } else {
                    None
                },
            },
        }
    }

    /// Release: back to idle.
    pub fn pointer_up(self) -> Transition {
        self.release("up")
    }

    /// Pointer left the widget: back to idle, identical to [`pointer_up`](Self::pointer_up).
    pub fn pointer_exit(self) -> Transition {
        self.release("exit")
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn release(self, cause: &'static str) -> Transition {
        #[cfg(feature = "tracing")]
        {
            if self.is_active() {
                tracing::debug!(handle = ?self.handle, cause, "envelope handle released");
            }
        }

        Transition {
            state: Self::IDLE,
            edit: None,
            redraw: true,
            gesture: Gesture {
                end: self.committed_stage(),
                begin: None,
            },
        }
    }

    /// Feed `event` using the live values behind `access`, write the edit
    /// back through it and store the new state.
    pub fn apply(
        &mut self,
        event: DragEvent,
        access: &mut impl EnvelopeAccess,
        bounds: Size,
        hit_radius: f32,
    ) -> Transition {
        let params = access.snapshot();
        let transition = self.transition(event, &params, bounds, hit_radius);
        if let Some(edit) = transition.edit {
            edit.apply(access);
        }
        *self = transition.state;
        transition
    }
}
