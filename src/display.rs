use crate::algos::Plan;
use crate::model::{Allocation, PreferenceForm, RoomType, StudentId};
use crate::stats;
use std::collections::BTreeMap;

pub fn display_details(plan: &Plan) {
    let mut by_type: BTreeMap<&RoomType, Vec<&Allocation>> = BTreeMap::new();
    for a in &plan.allocations {
        by_type.entry(&a.room_type).or_default().push(a);
    }
    for (room_type, mut allocations) in by_type {
        allocations.sort_by(|a, b| {
            (&a.room_id, &a.student_id).cmp(&(&b.room_id, &b.student_id))
        });
        println!("{room_type}:");
        for a in allocations {
            print!("  - {} in {}", a.student_id, a.room_id);
            match plan.rank_of(a) {
                Some(rank) => print!(" (rank {})", rank + 1),
                None => print!(" (fallback)"),
            }
            println!();
        }
        println!();
    }
}

pub fn display_stats(plan: &Plan) {
    let considered = plan.candidates.len();
    let skipped = plan.skipped.len();
    println!(
        "Students considered/skipped/total: {}/{}/{}",
        considered,
        skipped,
        considered + skipped
    );
    println!(
        "Students allocated/unallocated: {}/{}",
        plan.allocations.len(),
        plan.unallocated.len()
    );
    let ranks = stats::statistics(plan);
    let cumul = ranks.iter().scan(0, |s, &r| {
        *s += r;
        Some(*s)
    });
    let total = plan.allocations.len();
    println!("Final ranking:");
    for (rank, (n, c)) in ranks.iter().zip(cumul).enumerate() {
        if *n != 0 {
            println!(
                "  - rank {}: {} (cumulative {} - {:.2}%)",
                rank + 1,
                n,
                c,
                100.0 * c as f32 / total as f32
            );
        }
    }
    let fallbacks = stats::fallbacks(plan);
    if fallbacks != 0 {
        println!("  - fallback: {fallbacks}");
    }
}

pub fn display_unallocated(plan: &Plan) {
    if !plan.unallocated.is_empty() {
        println!("Students without a room:");
        for s in &plan.unallocated {
            println!("  - {s}");
        }
    }
}

pub fn display_allocations(allocations: &[Allocation]) {
    for a in allocations {
        println!("{}", describe_allocation(&a.student_id, Some(a)));
    }
}

pub fn describe_allocation(student: &StudentId, allocation: Option<&Allocation>) -> String {
    match allocation {
        Some(a) => format!("{student}: {} {} ({})", a.room_type, a.room_id, a.status),
        None => format!("{student}: no allocation"),
    }
}

/// Print forms in submission order, which is the order used to rank them.
pub fn display_forms(forms: &[PreferenceForm]) {
    if forms.is_empty() {
        println!("No form submitted");
    }
    for (rank, form) in forms.iter().enumerate() {
        println!("{}", describe_form(rank, form));
    }
}

pub fn describe_form(rank: usize, form: &PreferenceForm) -> String {
    let preferences = form
        .preferences
        .iter()
        .map(RoomType::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{}. {} (submitted {}): {}",
        rank + 1,
        form.student_id,
        form.submitted_at,
        preferences
    )
}

pub fn display_summary(forms: usize, allocations: &[Allocation]) {
    println!("Forms submitted: {forms}");
    println!("Allocations: {}", allocations.len());
    let by_type = stats::by_room_type(allocations);
    if !by_type.is_empty() {
        println!("Allocations by room type:");
        for (room_type, n) in by_type {
            println!("  - {room_type}: {n}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RoomId;

    #[test]
    fn test_describe_allocation() {
        let student = StudentId::from("STU001");
        let allocation = Allocation::allocated(
            student.clone(),
            RoomType::from("SINGLE_AC"),
            RoomId::from("R_SAC_01"),
        );
        assert_eq!(
            describe_allocation(&student, Some(&allocation)),
            "STU001: SINGLE_AC R_SAC_01 (ALLOCATED)"
        );
        assert_eq!(describe_allocation(&student, None), "STU001: no allocation");
    }

    #[test]
    fn test_describe_form() {
        let form = PreferenceForm {
            student_id: StudentId::from("STU002"),
            preferences: vec![RoomType::from("THREE_AC"), RoomType::from("SINGLE_AC")],
            submitted_at: "2025-03-01 10:01:00".to_owned(),
        };
        assert_eq!(
            describe_form(1, &form),
            "2. STU002 (submitted 2025-03-01 10:01:00): THREE_AC, SINGLE_AC"
        );
    }
}
