pub use self::allocation::{Allocation, AllocationStatus};
pub use self::form::PreferenceForm;
pub use self::room::{Room, RoomId, RoomType};
pub use self::student::{AttendanceRecord, Student, StudentId};

mod allocation;
mod form;
mod room;
mod student;
