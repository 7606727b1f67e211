use crate::algos::Plan;
use eyre::{Error, bail};
use std::collections::HashMap;
use tracing::warn;

pub fn check_unallocated(plan: &Plan) {
    for s in &plan.unallocated {
        warn!(student = %s, "no room left for student");
    }
}

/// Make sure no room holds more students than its capacity, and that every
/// allocation points to a room of the allocated type.
pub fn ensure_within_capacity(plan: &Plan) -> Result<(), Error> {
    let rooms = plan
        .rooms
        .iter()
        .map(|r| (&r.id, r))
        .collect::<HashMap<_, _>>();
    let mut used = HashMap::new();
    for a in &plan.allocations {
        let Some(room) = rooms.get(&a.room_id) else {
            bail!("student {} was allocated unknown room {}", a.student_id, a.room_id);
        };
        if room.room_type != a.room_type {
            bail!(
                "room {} is of type {}, not {}",
                room.id,
                room.room_type,
                a.room_type
            );
        }
        let n = used.entry(&a.room_id).or_insert(0);
        *n += 1;
        if *n > room.slots() {
            bail!("room {} holds more than {} students", room.id, room.slots());
        }
    }
    Ok(())
}
