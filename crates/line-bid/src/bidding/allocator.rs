use super::domain::{AllocationResult, AwardStatus, BidRecord};
use std::collections::HashSet;
use tracing::debug;

/// Awards lines in seniority order: each employee receives the highest-ranked
/// preference no more senior employee has claimed.
///
/// Results come back sorted by `seniority_position`. The sort is stable, so
/// equal positions keep their submitted order. Input is assumed to have passed
/// parser validation.
pub fn allocate_lines(bids: &[BidRecord]) -> Vec<AllocationResult> {
    let mut ordered: Vec<&BidRecord> = bids.iter().collect();
    ordered.sort_by_key(|bid| bid.seniority_position);

    let mut claimed: HashSet<&str> = HashSet::new();
    ordered
        .into_iter()
        .map(|bid| {
            let status = claim_line(bid, &mut claimed);
            debug!(
                seniority = bid.seniority_position,
                employee = %bid.employee_id,
                outcome = %status.message(),
                "processed bid"
            );
            AllocationResult::from_status(bid, status)
        })
        .collect()
}

fn claim_line<'a>(bid: &'a BidRecord, claimed: &mut HashSet<&'a str>) -> AwardStatus {
    if bid.preferences.is_empty() {
        return AwardStatus::NoPreferences;
    }

    for (idx, line) in bid.preferences.iter().enumerate() {
        if claimed.insert(line.as_str()) {
            return AwardStatus::Awarded {
                line: line.clone(),
                choice: idx + 1,
            };
        }
    }

    AwardStatus::LinesUnavailable
}
