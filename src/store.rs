//! Storage collaborators of an allocation run.
//!
//! Each trait exposes the minimal read or write operations the engine needs,
//! so that a run can be performed against the SQL [`Loader`](crate::loaders::Loader)
//! or against an in-memory store in tests.
#![allow(async_fn_in_trait)]

use crate::model::{
    Allocation, AttendanceRecord, PreferenceForm, Room, RoomType, Student, StudentId,
};
use eyre::Error;

#[cfg(test)]
pub use self::memory::MemoryStore;

#[cfg(test)]
mod memory;

pub trait FormStore {
    /// Return every submitted form, in the order in which they were submitted.
    async fn forms(&mut self) -> Result<Vec<PreferenceForm>, Error>;

    /// Record a new form, stamped with the current time, after every existing
    /// one. Return the stored form.
    async fn submit_form(
        &mut self,
        student_id: &StudentId,
        preferences: &[RoomType],
    ) -> Result<PreferenceForm, Error>;

    /// Remove every form and return how many were removed.
    async fn delete_forms(&mut self) -> Result<u64, Error>;
}

pub trait StudentStore {
    async fn student(&mut self, id: &StudentId) -> Result<Option<Student>, Error>;
}

pub trait AttendanceStore {
    async fn attendance(&mut self, id: &StudentId) -> Result<Option<AttendanceRecord>, Error>;
}

pub trait RoomStore {
    async fn rooms(&mut self) -> Result<Vec<Room>, Error>;
}

pub trait AllocationStore {
    /// Remove every allocation record and return how many were removed.
    async fn delete_allocations(&mut self) -> Result<u64, Error>;

    async fn insert_allocation(&mut self, allocation: &Allocation) -> Result<(), Error>;

    async fn allocations(&mut self) -> Result<Vec<Allocation>, Error>;
}
