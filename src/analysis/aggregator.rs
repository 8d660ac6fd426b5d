//! Roster aggregation and statistics.
//!
//! Pure functions over a roster slice. Every function here is total over any
//! well-formed roster, including the empty one.

use crate::models::{
    CommunityStats, HealthTrend, Member, MemberDetail, Status, StatusDistribution,
};
use std::collections::BTreeMap;

/// Compute the dashboard statistics cards.
///
/// `engagement` and `top_concern` are not derivable from member data and are
/// passed in by the caller.
pub fn compute_stats(roster: &[Member], engagement: u8, top_concern: &str) -> CommunityStats {
    CommunityStats {
        total_members: roster.len(),
        active_participation: count_with_status(roster, Status::Active),
        avg_engagement_score: engagement.min(100),
        top_condition_concern: top_concern.to_string(),
    }
}

/// Count members with the given status.
pub fn count_with_status(roster: &[Member], status: Status) -> usize {
    roster.iter().filter(|m| m.status == status).count()
}

/// Count and share of the roster in each status.
pub fn status_distribution(roster: &[Member]) -> StatusDistribution {
    let mut dist = StatusDistribution::default();
    for member in roster {
        dist.get_mut(member.status).count += 1;
    }

    let total = roster.len();
    if total > 0 {
        for status in Status::ALL {
            let bucket = dist.get_mut(status);
            bucket.percentage = (bucket.count as f64 * 100.0) / total as f64;
        }
    }

    dist
}

/// Members grouped by status, keeping roster order within each group.
pub fn group_by_status(roster: &[Member]) -> BTreeMap<Status, Vec<&Member>> {
    let mut grouped: BTreeMap<Status, Vec<&Member>> =
        Status::ALL.into_iter().map(|s| (s, Vec::new())).collect();

    for member in roster {
        grouped.entry(member.status).or_default().push(member);
    }

    grouped
}

/// The first `limit` members in roster order.
///
/// No recency sort is applied; `last_activity` is a free-text label.
pub fn recent_activity(roster: &[Member], limit: usize) -> &[Member] {
    &roster[..limit.min(roster.len())]
}

/// Project a member onto the fields shown in the detail card.
pub fn member_detail_view(member: &Member) -> MemberDetail {
    MemberDetail {
        id: member.id.clone(),
        name: member.name.clone(),
        age: member.age,
        status: member.status,
        avg_steps: member.metrics.avg_steps,
        heart_rate: member.metrics.heart_rate,
        sleep_hours: member.metrics.sleep_hours,
        stress_level: member.metrics.stress_level,
    }
}

/// Mean engagement over a trend series, or `None` if it is empty.
pub fn mean_engagement(trends: &[HealthTrend]) -> Option<f64> {
    if trends.is_empty() {
        return None;
    }
    let sum: f64 = trends.iter().map(|t| f64::from(t.engagement)).sum();
    Some(sum / trends.len() as f64)
}

/// Number of filled segments in a stress gauge of `segments` cells.
pub fn stress_gauge(stress_level: u8, segments: usize) -> usize {
    usize::from(stress_level).min(segments)
}
