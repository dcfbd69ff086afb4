//! Envelope stage model and the parameter accessor seam.
//!
//! The four stages of an ADSR envelope are described by [`Stage`]. Attack,
//! decay and release are *durations* and map to horizontal extents on the
//! graph; sustain is a *level* and maps to vertical position.
//!
//! The editor never owns authoritative parameter values. It reads and writes
//! them through [`EnvelopeAccess`], implemented by whatever parameter store the
//! host provides. [`EnvelopeParams`] is the plain-struct implementation used in
//! tests and by display-only graphs.

#[cfg(not(feature = "std"))]
use alloc::{format, string::String};

use crate::param_info::{ParamDescriptor, ParamScale, clamp_unit};

/// One stage of an ADSR envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Rise from zero to full amplitude.
    Attack,
    /// Fall from full amplitude to the sustain level.
    Decay,
    /// Level held while the note is on.
    Sustain,
    /// Fall from the sustain level to zero after note-off.
    Release,
}

impl Stage {
    /// All stages in graph order, left to right.
    pub const ALL: [Stage; 4] = [Stage::Attack, Stage::Decay, Stage::Sustain, Stage::Release];

    /// Position of this stage in [`Stage::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Stage::Attack => 0,
            Stage::Decay => 1,
            Stage::Sustain => 2,
            Stage::Release => 3,
        }
    }

    /// Stage at `index` in [`Stage::ALL`], if any.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Stage::Attack),
            1 => Some(Stage::Decay),
            2 => Some(Stage::Sustain),
            3 => Some(Stage::Release),
            _ => None,
        }
    }

    /// Parameter key used in string ids (`"attack"`, `"decay"`, ...).
    pub const fn key(self) -> &'static str {
        match self {
            Stage::Attack => "attack",
            Stage::Decay => "decay",
            Stage::Sustain => "sustain",
            Stage::Release => "release",
        }
    }

    /// Whether the stage is a level rather than a duration.
    pub const fn is_level(self) -> bool {
        matches!(self, Stage::Sustain)
    }

    /// Range, skew and display format of this stage's parameter.
    ///
    /// | Stage   | Range (plain)  | Default | Mid point |
    /// |---------|----------------|---------|-----------|
    /// | Attack  | 0.001 – 10 s   | 0.03 s  | 1 s       |
    /// | Decay   | 0.001 – 10 s   | 1 s     | 1 s       |
    /// | Sustain | 0 – 1          | 0.5     | 0.3       |
    /// | Release | 0.001 – 5 s    | 0.03 s  | 1 s       |
    ///
    /// The mid point is the plain value that sits at normalized 0.5.
    pub fn descriptor(self) -> ParamDescriptor {
        match self {
            Stage::Attack => ParamDescriptor::seconds("Attack", "A", 0.001, 10.0, 0.03)
                .with_scale(ParamScale::from_mid_point(0.001, 10.0, 1.0)),
            Stage::Decay => ParamDescriptor::seconds("Decay", "D", 0.001, 10.0, 1.0)
                .with_scale(ParamScale::from_mid_point(0.001, 10.0, 1.0)),
            Stage::Sustain => ParamDescriptor::level("Sustain", "S", 0.0, 1.0, 0.5)
                .with_scale(ParamScale::from_mid_point(0.0, 1.0, 0.3)),
            Stage::Release => ParamDescriptor::seconds("Release", "R", 0.001, 5.0, 0.03)
                .with_scale(ParamScale::from_mid_point(0.001, 5.0, 1.0)),
        }
    }

    /// Hover help for the stage control.
    pub const fn tooltip(self) -> &'static str {
        match self {
            Stage::Attack => "Attack\nDefines how long the envelope\ntakes to reach the top peak",
            Stage::Decay => {
                "Decay\nDefines how long the\nenvelope takes to fall from the top\npeak to the sustain level"
            }
            Stage::Sustain => {
                "Sustain\nDefines the height of the envelope\nafter the decay section is finished"
            }
            Stage::Release => {
                "Release\nDefines how long the envelope takes\nto fall back to zero after\nthe key is released"
            }
        }
    }

    /// Stable string id of this stage for envelope `number` (e.g. `"env1_attack"`).
    pub fn param_id(self, number: u8) -> String {
        format!("env{number}_{}", self.key())
    }
}

/// Stable string id of the loop toggle for envelope `number` (e.g. `"env1_loop"`).
pub fn loop_param_id(number: u8) -> String {
    format!("env{number}_loop")
}

/// Read/write access to the four normalized stage values.
///
/// Writes are synchronous: by the time `set_normalized` returns, any
/// downstream listeners have been notified and a subsequent
/// [`normalized`](Self::normalized) read returns the new value.
pub trait EnvelopeAccess {
    /// Current normalized value of `stage`.
    ///
    /// Implementations may return out-of-range values; callers clamp.
    fn normalized(&self, stage: Stage) -> f32;

    /// Write a normalized value for `stage`. Callers pass values in `[0, 1]`.
    fn set_normalized(&mut self, stage: Stage, value: f32);

    /// Denormalized, unit-suffixed text for a normalized value of `stage`.
    ///
    /// Defaults to the stage descriptor's formatting (e.g. `"1.000 s"`).
    fn display_text(&self, stage: Stage, value: f32) -> String {
        stage.descriptor().display_text(value)
    }

    /// Snapshot of all four values, each clamped to `[0, 1]`.
    fn snapshot(&self) -> EnvelopeParams {
        EnvelopeParams {
            attack: self.normalized(Stage::Attack),
            decay: self.normalized(Stage::Decay),
            sustain: self.normalized(Stage::Sustain),
            release: self.normalized(Stage::Release),
        }
        .clamped()
    }
}

/// Four normalized stage values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeParams {
    /// Normalized attack time.
    pub attack: f32,
    /// Normalized decay time.
    pub decay: f32,
    /// Normalized sustain level.
    pub sustain: f32,
    /// Normalized release time.
    pub release: f32,
}

impl EnvelopeParams {
    /// Create from four normalized values (not clamped).
    pub const fn new(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack,
            decay,
            sustain,
            release,
        }
    }

    /// All four stages at the same normalized value.
    pub const fn splat(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Normalized values of each stage descriptor's default.
    pub fn from_defaults() -> Self {
        let mut params = Self::splat(0.0);
        for stage in Stage::ALL {
            let desc = stage.descriptor();
            params.set(stage, desc.normalize(desc.default));
        }
        params
    }

    /// Value of `stage`.
    pub const fn get(&self, stage: Stage) -> f32 {
        match stage {
            Stage::Attack => self.attack,
            Stage::Decay => self.decay,
            Stage::Sustain => self.sustain,
            Stage::Release => self.release,
        }
    }

    /// Overwrite the value of `stage`.
    pub fn set(&mut self, stage: Stage, value: f32) {
        match stage {
            Stage::Attack => self.attack = value,
            Stage::Decay => self.decay = value,
            Stage::Sustain => self.sustain = value,
            Stage::Release => self.release = value,
        }
    }

    /// Copy with every value clamped to `[0, 1]`; NaN reads as 0.
    pub fn clamped(self) -> Self {
        Self {
            attack: clamp_unit(self.attack),
            decay: clamp_unit(self.decay),
            sustain: clamp_unit(self.sustain),
            release: clamp_unit(self.release),
        }
    }
}

impl Default for EnvelopeParams {
    fn default() -> Self {
        Self::from_defaults()
    }
}

impl EnvelopeAccess for EnvelopeParams {
    fn normalized(&self, stage: Stage) -> f32 {
        self.get(stage)
    }

    fn set_normalized(&mut self, stage: Stage, value: f32) {
        self.set(stage, clamp_unit(value));
    }
}

/// A single normalized write produced by a drag step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamEdit {
    /// Stage being written.
    pub stage: Stage,
    /// New normalized value, always in `[0, 1]`.
    pub value: f32,
}

impl ParamEdit {
    /// Create an edit, clamping `value` to `[0, 1]`.
    pub fn new(stage: Stage, value: f32) -> Self {
        Self {
            stage,
            value: clamp_unit(value),
        }
    }

    /// Write this edit through `access`.
    pub fn apply(self, access: &mut impl EnvelopeAccess) {
        access.set_normalized(self.stage, self.value);
    }
}
