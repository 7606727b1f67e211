use super::distance::distance_to_hostel;
use crate::model::{PreferenceForm, RoomType, StudentId};
use crate::store::{AttendanceStore, StudentStore};
use eyre::{Error, WrapErr};
use tracing::{instrument, trace};

pub const SUBMISSION_WEIGHT: f64 = 0.5;
pub const ATTENDANCE_WEIGHT: f64 = 0.3;
pub const DISTANCE_WEIGHT: f64 = 0.2;

/// Distance at which the distance term reaches its nominal weight. The term
/// keeps growing past this distance.
pub const DISTANCE_SCALE_KM: f64 = 2000.0;

/// A student eligible for allocation in the current run.
#[derive(Clone, Debug)]
pub struct Candidate {
    pub student_id: StudentId,
    pub preferences: Vec<RoomType>,
    pub score: f64,
}

impl Candidate {
    pub fn rank_of(&self, room_type: &RoomType) -> Option<usize> {
        self.preferences.iter().position(|p| p == room_type)
    }
}

/// Desirability of a student, higher is better. Earlier submissions, better
/// attendance and longer distances from home all increase the score.
pub fn score(submission_rank: usize, attendance_percentage: f64, distance_km: f64) -> f64 {
    SUBMISSION_WEIGHT * (1.0 / (1.0 + submission_rank as f64))
        + ATTENDANCE_WEIGHT * (attendance_percentage / 100.0)
        + DISTANCE_WEIGHT * (distance_km / DISTANCE_SCALE_KM)
}

/// Build the candidates for the given forms, in form order. The submission
/// rank of a form is its index in `forms`. Forms whose student has no profile
/// or no attendance record are skipped and their student returned separately.
#[instrument(skip_all)]
pub async fn candidates<S>(
    store: &mut S,
    forms: Vec<PreferenceForm>,
) -> Result<(Vec<Candidate>, Vec<StudentId>), Error>
where
    S: StudentStore + AttendanceStore,
{
    let mut candidates = Vec::with_capacity(forms.len());
    let mut skipped = Vec::new();
    for (submission_rank, form) in forms.into_iter().enumerate() {
        let Some(student) = store
            .student(&form.student_id)
            .await
            .wrap_err_with(|| format!("cannot load student {}", form.student_id))?
        else {
            trace!(student = %form.student_id, "no student profile, skipping form");
            skipped.push(form.student_id);
            continue;
        };
        let Some(attendance) = store
            .attendance(&form.student_id)
            .await
            .wrap_err_with(|| format!("cannot load attendance of {}", form.student_id))?
        else {
            trace!(student = %form.student_id, "no attendance record, skipping form");
            skipped.push(form.student_id);
            continue;
        };
        let distance_km = distance_to_hostel(student.home_lat, student.home_lon);
        let score = score(
            submission_rank,
            attendance.attendance_percentage,
            distance_km,
        );
        trace!(
            student = %form.student_id,
            submission_rank,
            attendance = attendance.attendance_percentage,
            distance_km,
            score,
            "scored candidate",
        );
        candidates.push(Candidate {
            student_id: form.student_id,
            preferences: form.preferences,
            score,
        });
    }
    Ok((candidates, skipped))
}

/// Sort candidates by decreasing score. Candidates with equal scores keep
/// their relative order.
pub fn rank(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
}
