use super::{RoomId, RoomType, StudentId};
use eyre::bail;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AllocationStatus {
    Allocated,
}

impl AllocationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AllocationStatus::Allocated => "ALLOCATED",
        }
    }
}

impl fmt::Display for AllocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AllocationStatus {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALLOCATED" => Ok(AllocationStatus::Allocated),
            other => bail!("unknown allocation status: {other}"),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Allocation {
    pub student_id: StudentId,
    pub room_type: RoomType,
    pub room_id: RoomId,
    pub status: AllocationStatus,
}

impl Allocation {
    pub fn allocated(student_id: StudentId, room_type: RoomType, room_id: RoomId) -> Allocation {
        Allocation {
            student_id,
            room_type,
            room_id,
            status: AllocationStatus::Allocated,
        }
    }
}
