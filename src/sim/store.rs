//! Body storage with stable, reusable slots
//!
//! Bodies live in a dense slot vector; a [`BodyId`] is a slot index plus a
//! generation counter, so destroying one body never invalidates the handles
//! of the others. Freed slots are reused by later `create` calls with a
//! bumped generation, which makes stale handles observably dead.
//!
//! Iteration order is slot order and is stable across a pass. A system
//! borrows the store for the duration of one pass, so no body can be
//! inserted while that pass is underway.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A simulated circular body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub affected_by_gravity: bool,
}

/// Stable handle to a body in a [`BodyStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyId {
    index: u32,
    generation: u32,
}

impl BodyId {
    /// Slot index, for display/debugging only
    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Slot {
    generation: u32,
    body: Option<Body>,
}

/// Dense slot-reuse store owning all body state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BodyStore {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl BodyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Add a body, reusing a freed slot if one exists.
    ///
    /// Panics if `radius` is not strictly positive.
    pub fn create(&mut self, pos: Vec2, radius: f32, affected_by_gravity: bool) -> BodyId {
        assert!(radius > 0.0, "body radius must be positive");

        let body = Body {
            pos,
            vel: Vec2::ZERO,
            radius,
            affected_by_gravity,
        };

        self.live += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.generation += 1;
            slot.body = Some(body);
            BodyId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                body: Some(body),
            });
            BodyId {
                index,
                generation: 0,
            }
        }
    }

    /// Remove a body. Returns false if the handle was already dead.
    pub fn destroy(&mut self, id: BodyId) -> bool {
        match self.slots.get_mut(id.index as usize) {
            Some(slot) if slot.generation == id.generation && slot.body.is_some() => {
                slot.body = None;
                self.free.push(id.index);
                self.live -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.body.as_ref())
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.body.as_mut())
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live bodies
    #[inline]
    pub fn count(&self) -> usize {
        self.live
    }

    /// Number of slots, live or not. Upper bound for index-based passes.
    #[inline]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Live bodies in slot order
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            let id = BodyId {
                index: i as u32,
                generation: slot.generation,
            };
            slot.body.as_ref().map(|body| (id, body))
        })
    }

    /// Live bodies in slot order, mutable
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BodyId, &mut Body)> {
        self.slots.iter_mut().enumerate().filter_map(|(i, slot)| {
            let id = BodyId {
                index: i as u32,
                generation: slot.generation,
            };
            slot.body.as_mut().map(|body| (id, body))
        })
    }

    /// Simultaneous mutable access to two distinct slots.
    ///
    /// Returns None unless `a < b` and both slots hold a live body.
    pub(crate) fn pair_mut(&mut self, a: usize, b: usize) -> Option<(&mut Body, &mut Body)> {
        if a >= b || b >= self.slots.len() {
            return None;
        }
        let (left, right) = self.slots.split_at_mut(b);
        match (left[a].body.as_mut(), right[0].body.as_mut()) {
            (Some(first), Some(second)) => Some((first, second)),
            _ => None,
        }
    }
}
