use super::payload::{Payload, PayloadKind};
use super::slot::Slot;
use std::time::{Duration, Instant};

/// The slots of a single lobby (pure, no locking).
///
/// Always holds at least the host slot. Slots are only ever appended.
pub struct SlotTable {
    slots: Vec<Slot>,
    last_active: Instant,
}

impl SlotTable {
    pub fn new() -> Self {
        Self::created_at(Instant::now())
    }

    pub fn created_at(now: Instant) -> Self {
        Self {
            slots: vec![Slot::new(0)],
            last_active: now,
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Append a peer slot and return its index.
    pub fn join(&mut self) -> usize {
        let index = self.slots.len();
        self.slots.push(Slot::new(index));
        self.touch();
        index
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn post(&mut self, index: usize, kind: PayloadKind, payload: Payload) -> bool {
        let Some(slot) = self.slots.get_mut(index) else {
            return false;
        };
        slot.set_payload(kind, payload);
        self.touch();
        true
    }

    /// Non-host slots the host has not answered yet, in index order.
    pub fn unregistered_peers(&self) -> Vec<usize> {
        self.slots
            .iter()
            .filter(|slot| !slot.is_host && !slot.has_answer())
            .map(|slot| slot.index)
            .collect()
    }

    pub fn touch(&mut self) {
        self.last_active = Instant::now();
    }

    pub fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_active)
    }
}

impl Default for SlotTable {
    fn default() -> Self {
        Self::new()
    }
}
