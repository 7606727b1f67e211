//! Room allocation engine.

use crate::model::{Allocation, Room, StudentId};
use crate::store::{AllocationStore, AttendanceStore, FormStore, RoomStore, StudentStore};
use eyre::{Error, WrapErr};
use tracing::{debug, info, instrument, warn};

pub use self::greedy::{RoomPool, assign};
pub use self::scoring::{Candidate, candidates, rank};

pub mod distance;
mod greedy;
mod scoring;

/// Outcome of an allocation run.
#[derive(Debug, Default)]
pub struct Plan {
    /// Inventory the run was computed against.
    pub rooms: Vec<Room>,
    /// Candidates, best first.
    pub candidates: Vec<Candidate>,
    /// Students whose form was ignored for lack of a profile or of an
    /// attendance record.
    pub skipped: Vec<StudentId>,
    pub allocations: Vec<Allocation>,
    pub unallocated: Vec<StudentId>,
}

impl Plan {
    pub fn candidate(&self, student: &StudentId) -> Option<&Candidate> {
        self.candidates.iter().find(|c| &c.student_id == student)
    }

    /// Rank of the allocated room type in the student's preferences, or
    /// `None` if the student got a fallback room.
    pub fn rank_of(&self, allocation: &Allocation) -> Option<usize> {
        self.candidate(&allocation.student_id)
            .and_then(|c| c.rank_of(&allocation.room_type))
    }
}

/// Compute the allocations without writing anything.
#[instrument(skip_all)]
pub async fn plan<S>(store: &mut S) -> Result<Plan, Error>
where
    S: FormStore + StudentStore + AttendanceStore + RoomStore,
{
    let forms = store.forms().await.wrap_err("cannot load forms")?;
    let rooms = store.rooms().await.wrap_err("cannot load rooms")?;
    let mut pool = RoomPool::new(&rooms);
    info!(
        forms = forms.len(),
        rooms = rooms.len(),
        slots = pool.remaining(),
        "loaded allocation input"
    );
    debug!(room_types = ?pool.room_types(), "fallback order");
    if pool.is_exhausted() {
        warn!("no room available, nobody will be allocated");
    }
    let (mut candidates, skipped) = candidates(store, forms).await?;
    rank(&mut candidates);
    let (allocations, unallocated) = assign(&candidates, &mut pool);
    info!(
        candidates = candidates.len(),
        skipped = skipped.len(),
        allocated = allocations.len(),
        unallocated = unallocated.len(),
        "computed allocations"
    );
    Ok(Plan {
        rooms,
        candidates,
        skipped,
        allocations,
        unallocated,
    })
}

/// Compute the allocations and replace every stored allocation with them.
///
/// Previous allocations are deleted before the new ones are inserted, without
/// any transaction: a storage failure in the middle of the run leaves the
/// allocations written so far in place.
#[instrument(skip_all)]
pub async fn run_allocation<S>(store: &mut S) -> Result<Plan, Error>
where
    S: FormStore + StudentStore + AttendanceStore + RoomStore + AllocationStore,
{
    let plan = plan(store).await?;
    let removed = store
        .delete_allocations()
        .await
        .wrap_err("cannot delete previous allocations")?;
    info!(removed, "deleted previous allocations");
    for allocation in &plan.allocations {
        store
            .insert_allocation(allocation)
            .await
            .wrap_err_with(|| format!("cannot save allocation of {}", allocation.student_id))?;
    }
    Ok(plan)
}
