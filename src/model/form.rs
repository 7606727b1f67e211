use super::{RoomType, StudentId};

/// A room preference form as submitted by a student. The position of the form
/// in the list returned by the form store is its submission rank.
#[derive(Clone, Debug)]
pub struct PreferenceForm {
    pub student_id: StudentId,
    pub preferences: Vec<RoomType>,
    pub submitted_at: String,
}

impl PreferenceForm {
    #[cfg(test)]
    pub fn new(student_id: impl Into<StudentId>, preferences: &[&str]) -> PreferenceForm {
        PreferenceForm {
            student_id: student_id.into(),
            preferences: preferences.iter().map(|&p| RoomType::from(p)).collect(),
            submitted_at: String::new(),
        }
    }
}
