use crate::algos::Plan;
use crate::model::{Allocation, RoomType};
use std::collections::BTreeMap;

/// Number of students who got their first, second, … preference. Students
/// placed in a room type they did not ask for are not counted.
pub fn statistics(plan: &Plan) -> Vec<usize> {
    let mut ranks = Vec::new();
    for allocation in &plan.allocations {
        if let Some(rank) = plan.rank_of(allocation) {
            if ranks.len() <= rank {
                ranks.resize(rank + 1, 0);
            }
            ranks[rank] += 1;
        }
    }
    ranks
}

pub fn fallbacks(plan: &Plan) -> usize {
    plan.allocations
        .iter()
        .filter(|a| plan.rank_of(a).is_none())
        .count()
}

pub fn by_room_type(allocations: &[Allocation]) -> BTreeMap<RoomType, usize> {
    let mut counts = BTreeMap::new();
    for allocation in allocations {
        *counts.entry(allocation.room_type.clone()).or_default() += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algos::Candidate;
    use crate::model::{RoomId, StudentId};

    fn plan() -> Plan {
        let candidate = |id: &str, prefs: &[&str]| Candidate {
            student_id: StudentId::from(id),
            preferences: prefs.iter().map(|&p| RoomType::from(p)).collect(),
            score: 0.5,
        };
        let allocation = |id: &str, t: &str, r: &str| {
            Allocation::allocated(StudentId::from(id), RoomType::from(t), RoomId::from(r))
        };
        Plan {
            candidates: vec![
                candidate("A", &["SINGLE_AC", "THREE_AC"]),
                candidate("B", &["SINGLE_AC", "THREE_AC"]),
                candidate("C", &["SINGLE_AC"]),
                candidate("D", &["SINGLE_AC"]),
            ],
            allocations: vec![
                allocation("A", "SINGLE_AC", "R_SAC_01"),
                allocation("B", "THREE_AC", "R_TAC_01"),
                allocation("C", "THREE_AC", "R_TAC_01"),
            ],
            unallocated: vec![StudentId::from("D")],
            ..Plan::default()
        }
    }

    #[test]
    fn test_statistics() {
        let plan = plan();
        assert_eq!(statistics(&plan), vec![1, 1]);
        assert_eq!(fallbacks(&plan), 1);
    }

    #[test]
    fn test_by_room_type() {
        let counts = by_room_type(&plan().allocations);
        assert_eq!(
            counts.into_iter().collect::<Vec<_>>(),
            vec![
                (RoomType::from("SINGLE_AC"), 1),
                (RoomType::from("THREE_AC"), 2)
            ]
        );
    }
}
