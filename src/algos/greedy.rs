use super::scoring::Candidate;
use crate::model::{Allocation, Room, RoomId, RoomType, StudentId};
use std::collections::HashMap;
use tracing::{debug, instrument, trace};

/// Available room slots, grouped by room type.
///
/// Room types are kept in order of first appearance in the inventory, and
/// each type holds a stack of slots. A room contributes as many slots as its
/// capacity, pushed in inventory order, and slots are taken from the top of
/// the stack: the last room of a type in the inventory is filled first.
#[derive(Clone, Debug, Default)]
pub struct RoomPool {
    types: Vec<RoomType>,
    slots: HashMap<RoomType, Vec<RoomId>>,
}

impl RoomPool {
    pub fn new(rooms: &[Room]) -> RoomPool {
        let mut pool = RoomPool::default();
        for room in rooms {
            let n = room.slots();
            if n == 0 {
                continue;
            }
            let slots = pool.slots.entry(room.room_type.clone()).or_insert_with(|| {
                pool.types.push(room.room_type.clone());
                Vec::new()
            });
            slots.extend(std::iter::repeat_n(room.id.clone(), n));
        }
        pool
    }

    /// Room types in fallback order.
    pub fn room_types(&self) -> &[RoomType] {
        &self.types
    }

    pub fn available(&self, room_type: &RoomType) -> usize {
        self.slots.get(room_type).map_or(0, Vec::len)
    }

    pub fn remaining(&self) -> usize {
        self.slots.values().map(Vec::len).sum()
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Take one slot of the given type, if any is left.
    pub fn take(&mut self, room_type: &RoomType) -> Option<RoomId> {
        self.slots.get_mut(room_type).and_then(Vec::pop)
    }

    /// Take one slot of the first room type which still has some.
    pub fn take_any(&mut self) -> Option<(RoomType, RoomId)> {
        let room_type = self
            .types
            .iter()
            .find(|&t| self.available(t) > 0)?
            .clone();
        let room = self.take(&room_type)?;
        Some((room_type, room))
    }
}

/// Give every candidate, best first, one slot of the first preferred type
/// still available, or of any type if none of their preferences is. Return
/// the allocations and the candidates left without a room.
#[instrument(skip_all)]
pub fn assign(candidates: &[Candidate], pool: &mut RoomPool) -> (Vec<Allocation>, Vec<StudentId>) {
    let mut allocations = Vec::with_capacity(candidates.len());
    let mut unallocated = Vec::new();
    for c in candidates {
        let preferred = c
            .preferences
            .iter()
            .find_map(|t| pool.take(t).map(|room| (t.clone(), room)));
        let slot = match preferred {
            Some(slot) => Some(slot),
            None => {
                let slot = pool.take_any();
                if let Some((room_type, _)) = &slot {
                    debug!(
                        student = %c.student_id,
                        room_type = %room_type,
                        "no preferred room type left, falling back",
                    );
                }
                slot
            }
        };
        match slot {
            Some((room_type, room_id)) => {
                trace!(
                    student = %c.student_id,
                    room_type = %room_type,
                    room = %room_id,
                    score = c.score,
                    "allocating room",
                );
                allocations.push(Allocation::allocated(
                    c.student_id.clone(),
                    room_type,
                    room_id,
                ));
            }
            None => {
                trace!(student = %c.student_id, "no room left");
                unallocated.push(c.student_id.clone());
            }
        }
    }
    (allocations, unallocated)
}
