use super::{AllocationStore, AttendanceStore, FormStore, RoomStore, StudentStore};
use crate::model::{
    Allocation, AttendanceRecord, PreferenceForm, Room, RoomType, Student, StudentId,
};
use eyre::{Error, bail};
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Default)]
pub struct MemoryStore {
    pub students: HashMap<StudentId, Student>,
    pub attendance: HashMap<StudentId, AttendanceRecord>,
    pub rooms: Vec<Room>,
    pub forms: Vec<PreferenceForm>,
    pub allocations: Vec<Allocation>,
    /// Make every insertion fail once this many allocations have been written.
    pub fail_after: Option<usize>,
    /// Make student and attendance lookups fail.
    pub fail_lookups: bool,
    /// Make allocation deletion fail.
    pub fail_deletes: bool,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    pub fn with_student(mut self, id: &str, home_lat: f64, home_lon: f64) -> MemoryStore {
        let id = StudentId::from(id);
        self.students.insert(
            id.clone(),
            Student::new(id, String::new(), home_lat, home_lon),
        );
        self
    }

    pub fn with_attendance(mut self, id: &str, attendance_percentage: f64) -> MemoryStore {
        self.attendance.insert(
            StudentId::from(id),
            AttendanceRecord {
                attendance_percentage,
            },
        );
        self
    }

    pub fn with_room(mut self, id: &str, room_type: &str, capacity: i64) -> MemoryStore {
        self.rooms.push(Room::new(id, room_type, capacity));
        self
    }

    pub fn with_form(mut self, id: &str, preferences: &[&str]) -> MemoryStore {
        self.forms.push(PreferenceForm::new(id, preferences));
        self
    }
}

impl FormStore for MemoryStore {
    async fn forms(&mut self) -> Result<Vec<PreferenceForm>, Error> {
        Ok(self.forms.clone())
    }

    async fn submit_form(
        &mut self,
        student_id: &StudentId,
        preferences: &[RoomType],
    ) -> Result<PreferenceForm, Error> {
        let form = PreferenceForm {
            student_id: student_id.clone(),
            preferences: preferences.to_vec(),
            submitted_at: SystemTime::now()
                .duration_since(UNIX_EPOCH)?
                .as_secs()
                .to_string(),
        };
        self.forms.push(form.clone());
        Ok(form)
    }

    async fn delete_forms(&mut self) -> Result<u64, Error> {
        let removed = self.forms.len() as u64;
        self.forms.clear();
        Ok(removed)
    }
}

impl StudentStore for MemoryStore {
    async fn student(&mut self, id: &StudentId) -> Result<Option<Student>, Error> {
        if self.fail_lookups {
            bail!("student store is unavailable");
        }
        Ok(self.students.get(id).cloned())
    }
}

impl AttendanceStore for MemoryStore {
    async fn attendance(&mut self, id: &StudentId) -> Result<Option<AttendanceRecord>, Error> {
        if self.fail_lookups {
            bail!("attendance store is unavailable");
        }
        Ok(self.attendance.get(id).cloned())
    }
}

impl RoomStore for MemoryStore {
    async fn rooms(&mut self) -> Result<Vec<Room>, Error> {
        Ok(self.rooms.clone())
    }
}

impl AllocationStore for MemoryStore {
    async fn delete_allocations(&mut self) -> Result<u64, Error> {
        if self.fail_deletes {
            bail!("allocation store is unavailable");
        }
        let removed = self.allocations.len() as u64;
        self.allocations.clear();
        Ok(removed)
    }

    async fn insert_allocation(&mut self, allocation: &Allocation) -> Result<(), Error> {
        if self.fail_after.is_some_and(|n| self.allocations.len() >= n) {
            bail!("allocation store is unavailable");
        }
        self.allocations.push(allocation.clone());
        Ok(())
    }

    async fn allocations(&mut self) -> Result<Vec<Allocation>, Error> {
        Ok(self.allocations.clone())
    }
}
