//! Standalone `EnvelopeBridge` implementation backed by atomic floats.
//!
//! [`AtomicEnvelopeBridge`] stores plain stage values in lock-free atomics.
//! The GUI thread calls `set()`, an audio thread may call `get()` at any time.
//! Change listeners run synchronously inside `set()` on the writing thread.

use contour_core::{Stage, loop_param_id};
use contour_gui_core::{EnvelopeBridge, SlotIndex};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Per-envelope storage.
struct SlotState {
    /// Plain values in [`Stage::ALL`] order.
    values: [AtomicU32; 4],
    looping: AtomicBool,
}

impl SlotState {
    fn new() -> Self {
        Self {
            values: Stage::ALL.map(|stage| AtomicU32::new(stage.descriptor().default.to_bits())),
            looping: AtomicBool::new(false),
        }
    }
}

/// A parameter write observed by a listener.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamChange {
    /// Envelope slot.
    pub slot: SlotIndex,
    /// Stable parameter id, e.g. `"env1_decay"` or `"env1_loop"`.
    pub id: String,
    /// Value text as the user sees it, e.g. `"1.000 s"` or `"on"`.
    pub display: String,
}

type Listener = Box<dyn Fn(&ParamChange) + Send + Sync>;

/// Thread-safe envelope parameter store for the standalone editor.
///
/// Slots are created once; the slot count never changes, so no lock guards
/// the values themselves.
pub struct AtomicEnvelopeBridge {
    slots: Vec<SlotState>,
    listeners: Mutex<Vec<Listener>>,
}

impl AtomicEnvelopeBridge {
    /// Bridge with `slot_count` envelopes at their default values.
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: (0..slot_count).map(|_| SlotState::new()).collect(),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Register a callback run after every successful write.
    ///
    /// Listeners run on the writing thread while the listener list is locked,
    /// so they must not write to the bridge themselves.
    pub fn add_listener(&self, listener: impl Fn(&ParamChange) + Send + Sync + 'static) {
        self.listeners.lock().push(Box::new(listener));
    }

    /// Restore every stage and the loop flag of `slot` to defaults.
    pub fn reset(&self, slot: SlotIndex) {
        for stage in Stage::ALL {
            self.set(slot, stage, stage.descriptor().default);
        }
        self.set_looping(slot, false);
    }

    fn notify(&self, change: &ParamChange) {
        for listener in self.listeners.lock().iter() {
            listener(change);
        }
    }
}

impl EnvelopeBridge for AtomicEnvelopeBridge {
    fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn get(&self, slot: SlotIndex, stage: Stage) -> f32 {
        self.slots
            .get(slot.0)
            .map_or(0.0, |s| f32::from_bits(s.values[stage.index()].load(Ordering::Acquire)))
    }

    fn set(&self, slot: SlotIndex, stage: Stage, value: f32) {
        let Some(state) = self.slots.get(slot.0) else {
            return;
        };
        let desc = stage.descriptor();
        let clamped = if value.is_nan() { desc.default } else { desc.clamp(value) };
        state.values[stage.index()].store(clamped.to_bits(), Ordering::Release);

        self.notify(&ParamChange {
            slot,
            id: self.param_id(slot, stage),
            display: desc.format_value(clamped),
        });
    }

    fn is_looping(&self, slot: SlotIndex) -> bool {
        self.slots
            .get(slot.0)
            .is_some_and(|s| s.looping.load(Ordering::Acquire))
    }

    fn set_looping(&self, slot: SlotIndex, looping: bool) {
        let Some(state) = self.slots.get(slot.0) else {
            return;
        };
        state.looping.store(looping, Ordering::Release);

        self.notify(&ParamChange {
            slot,
            id: loop_param_id(slot.envelope_number()),
            display: if looping { "on" } else { "off" }.to_owned(),
        });
    }

    fn begin_set(&self, slot: SlotIndex, stage: Stage) {
        tracing::trace!(id = %self.param_id(slot, stage), "begin edit");
    }

    fn end_set(&self, slot: SlotIndex, stage: Stage) {
        tracing::trace!(id = %self.param_id(slot, stage), "end edit");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn starts_at_defaults() {
        let bridge = AtomicEnvelopeBridge::new(2);
        assert_eq!(bridge.slot_count(), 2);
        for stage in Stage::ALL {
            assert_eq!(bridge.get(SlotIndex(1), stage), stage.descriptor().default);
        }
        assert!(!bridge.is_looping(SlotIndex(0)));
    }

    #[test]
    fn get_set_clamps() {
        let bridge = AtomicEnvelopeBridge::new(1);

        bridge.set(SlotIndex(0), Stage::Decay, 2.5);
        assert_eq!(bridge.get(SlotIndex(0), Stage::Decay), 2.5);

        bridge.set(SlotIndex(0), Stage::Release, 99.0);
        assert_eq!(bridge.get(SlotIndex(0), Stage::Release), 5.0);

        bridge.set(SlotIndex(0), Stage::Sustain, -1.0);
        assert_eq!(bridge.get(SlotIndex(0), Stage::Sustain), 0.0);

        bridge.set(SlotIndex(0), Stage::Attack, f32::NAN);
        assert_eq!(bridge.get(SlotIndex(0), Stage::Attack), 0.03);
    }

    #[test]
    fn slots_are_independent() {
        let bridge = AtomicEnvelopeBridge::new(2);
        bridge.set(SlotIndex(1), Stage::Sustain, 0.9);
        bridge.set_looping(SlotIndex(1), true);

        assert_eq!(bridge.get(SlotIndex(0), Stage::Sustain), 0.5);
        assert!(!bridge.is_looping(SlotIndex(0)));
        assert_eq!(bridge.get(SlotIndex(1), Stage::Sustain), 0.9);
        assert!(bridge.is_looping(SlotIndex(1)));
    }

    #[test]
    fn out_of_range_safe() {
        let bridge = AtomicEnvelopeBridge::new(1);
        assert_eq!(bridge.get(SlotIndex(9), Stage::Attack), 0.0);
        assert!(!bridge.is_looping(SlotIndex(9)));

        // These should not panic
        bridge.set(SlotIndex(9), Stage::Attack, 1.0);
        bridge.set_looping(SlotIndex(9), true);
    }

    #[test]
    fn listeners_see_every_write() {
        let bridge = AtomicEnvelopeBridge::new(2);
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        bridge.add_listener(move |change| sink.lock().push(change.clone()));

        bridge.set(SlotIndex(1), Stage::Decay, 1.0);
        bridge.set_looping(SlotIndex(0), true);
        bridge.set(SlotIndex(7), Stage::Decay, 1.0);

        let seen = seen.lock();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].id, "env2_decay");
        assert_eq!(seen[0].display, "1.000 s");
        assert_eq!(seen[1].id, "env1_loop");
        assert_eq!(seen[1].display, "on");
    }

    #[test]
    fn reset_restores_defaults() {
        let bridge = AtomicEnvelopeBridge::new(1);
        bridge.set_normalized(SlotIndex(0), Stage::Attack, 1.0);
        bridge.set_looping(SlotIndex(0), true);

        bridge.reset(SlotIndex(0));
        assert_eq!(bridge.get(SlotIndex(0), Stage::Attack), 0.03);
        assert!(!bridge.is_looping(SlotIndex(0)));
    }

    #[test]
    fn readable_from_another_thread() {
        let bridge = Arc::new(AtomicEnvelopeBridge::new(1));
        bridge.set(SlotIndex(0), Stage::Release, 2.0);

        let reader = Arc::clone(&bridge);
        let value = std::thread::spawn(move || reader.get(SlotIndex(0), Stage::Release))
            .join()
            .unwrap();
        assert_eq!(value, 2.0);
    }
}
