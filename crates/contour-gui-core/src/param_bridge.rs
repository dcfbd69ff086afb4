//! Parameter bridge trait for decoupled GUI-to-host parameter communication.
//!
//! [`EnvelopeBridge`] abstracts over where envelope parameters live, so the
//! same graph and knobs work against the standalone atomic store or a plugin
//! host's parameter objects.
//!
//! # Architecture
//!
//! The bridge models a fixed number of **slots**, one per envelope. Each slot
//! exposes the four [`Stage`] parameters plus a loop flag.
//!
//! ```text
//! graph / knobs ──► EnvelopeBridge::set(slot, stage, value)
//!                          │
//!                     ┌────┴────┐
//!                     │ Atomic  │  (standalone)
//!                     │ Host    │  (plugin)
//!                     └────┬────┘
//!                          │
//! audio thread  ◄── EnvelopeBridge::get(slot, stage)
//! ```
//!
//! Values crossing the bridge are **plain** (seconds, level). The normalized
//! helpers map through each stage's [`ParamDescriptor`](contour_core::ParamDescriptor).

use contour_core::{EnvelopeAccess, Stage};
use core::fmt;

/// Type-safe index of an envelope slot.
///
/// Slot `0` is envelope number 1 in string ids (`env1_attack`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotIndex(pub usize);

impl SlotIndex {
    /// One-based envelope number used in parameter ids.
    pub fn envelope_number(self) -> u8 {
        u8::try_from(self.0 + 1).unwrap_or(u8::MAX)
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for SlotIndex {
    fn from(v: usize) -> Self {
        Self(v)
    }
}

/// Trait for bridging envelope parameter values between GUI and host.
///
/// Implementations must be thread-safe: `get` and `set` may be called from
/// different threads simultaneously. `set` is synchronous; once it returns,
/// a `get` on any thread observes the new value.
pub trait EnvelopeBridge: Send + Sync {
    /// Number of envelope slots.
    fn slot_count(&self) -> usize;

    /// Read the plain value of a stage.
    ///
    /// Returns `0.0` if the slot index is out of range.
    fn get(&self, slot: SlotIndex, stage: Stage) -> f32;

    /// Write a plain value for a stage.
    ///
    /// Out-of-range slots are silently ignored. Values are clamped to the
    /// stage's range by the implementation.
    fn set(&self, slot: SlotIndex, stage: Stage, value: f32);

    /// Whether the envelope loops its attack and decay sections.
    ///
    /// Returns `false` if the slot index is out of range.
    fn is_looping(&self, slot: SlotIndex) -> bool;

    /// Set the loop flag. Out-of-range slots are silently ignored.
    fn set_looping(&self, slot: SlotIndex, looping: bool);

    /// Begin an edit gesture on a stage (host automation recording).
    fn begin_set(&self, _slot: SlotIndex, _stage: Stage) {}

    /// End an edit gesture on a stage.
    fn end_set(&self, _slot: SlotIndex, _stage: Stage) {}

    /// Normalized value of a stage, through its descriptor's scale.
    fn get_normalized(&self, slot: SlotIndex, stage: Stage) -> f32 {
        stage.descriptor().normalize(self.get(slot, stage))
    }

    /// Write a normalized value, denormalized through the descriptor's scale.
    fn set_normalized(&self, slot: SlotIndex, stage: Stage, value: f32) {
        self.set(slot, stage, stage.descriptor().denormalize(value));
    }

    /// Unit-suffixed display text for a normalized value (e.g. `"1.000 s"`).
    fn display_text(&self, _slot: SlotIndex, stage: Stage, normalized: f32) -> String {
        stage.descriptor().display_text(normalized)
    }

    /// Stable string id of a stage parameter (e.g. `"env2_decay"`).
    fn param_id(&self, slot: SlotIndex, stage: Stage) -> String {
        stage.param_id(slot.envelope_number())
    }
}

/// One slot of an [`EnvelopeBridge`] seen as an [`EnvelopeAccess`].
///
/// This is what the graph renderer and drag controller talk to.
#[derive(Clone, Copy)]
pub struct BridgeAccess<'a> {
    bridge: &'a dyn EnvelopeBridge,
    slot: SlotIndex,
}

impl<'a> BridgeAccess<'a> {
    /// View `slot` of `bridge`.
    pub fn new(bridge: &'a dyn EnvelopeBridge, slot: SlotIndex) -> Self {
        Self { bridge, slot }
    }

    /// The slot this access reads and writes.
    pub fn slot(&self) -> SlotIndex {
        self.slot
    }
}

impl EnvelopeAccess for BridgeAccess<'_> {
    fn normalized(&self, stage: Stage) -> f32 {
        self.bridge.get_normalized(self.slot, stage)
    }

    fn set_normalized(&mut self, stage: Stage, value: f32) {
        self.bridge.set_normalized(self.slot, stage, value);
    }

    fn display_text(&self, stage: Stage, value: f32) -> String {
        self.bridge.display_text(self.slot, stage, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Minimal single-slot bridge for exercising the default methods.
    struct TestBridge {
        values: Mutex<[f32; 4]>,
        gestures: Mutex<Vec<(bool, Stage)>>,
    }

    impl TestBridge {
        fn new() -> Self {
            Self {
                values: Mutex::new(Stage::ALL.map(|s| s.descriptor().default)),
                gestures: Mutex::new(Vec::new()),
            }
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
        }
        fn is_looping(&self, _slot: SlotIndex) -> bool {
            false
        }
        fn set_looping(&self, _slot: SlotIndex, _looping: bool) {}
        fn begin_set(&self, _slot: SlotIndex, stage: Stage) {
            self.gestures.lock().unwrap().push((true, stage));
        }
        fn end_set(&self, _slot: SlotIndex, stage: Stage) {
            self.gestures.lock().unwrap().push((false, stage));
        }
    }

    #[test]
    fn normalized_round_trip_through_descriptor() {
        let bridge = TestBridge::new();
        bridge.set_normalized(SlotIndex(0), Stage::Decay, 0.5);
        assert!((bridge.get(SlotIndex(0), Stage::Decay) - 1.0).abs() < 1e-3);
        assert!((bridge.get_normalized(SlotIndex(0), Stage::Decay) - 0.5).abs() < 1e-4);
    }

    #[test]
    fn access_reads_and_writes_the_slot() {
        let bridge = TestBridge::new();
        let mut access = BridgeAccess::new(&bridge, SlotIndex(0));
        access.set_normalized(Stage::Release, 1.0);
        assert!((bridge.get(SlotIndex(0), Stage::Release) - 5.0).abs() < 1e-5);
        assert!((access.normalized(Stage::Release) - 1.0).abs() < 1e-5);
        assert_eq!(access.display_text(Stage::Release, 1.0), "5.000 s");
    }

    #[test]
    fn param_ids_are_one_based() {
        let bridge = TestBridge::new();
        assert_eq!(bridge.param_id(SlotIndex(0), Stage::Attack), "env1_attack");
        assert_eq!(bridge.param_id(SlotIndex(3), Stage::Sustain), "env4_sustain");
    }

    #[test]
    fn gesture_defaults_are_overridable() {
        let bridge = TestBridge::new();
        bridge.begin_set(SlotIndex(0), Stage::Sustain);
        bridge.end_set(SlotIndex(0), Stage::Sustain);
        assert_eq!(
            *bridge.gestures.lock().unwrap(),
            vec![(true, Stage::Sustain), (false, Stage::Sustain)]
        );
    }
}
