//! Data models for the community dashboard.
//!
//! This module contains the core data structures used throughout the
//! application for representing members, their health metrics, and the
//! statistics derived from the roster.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Engagement/health classification of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Regularly engaged with the community
    Active,
    /// Metrics or engagement need attention
    #[serde(rename = "At-Risk")]
    AtRisk,
    /// No recent participation
    Inactive,
}

impl Status {
    /// Every status, in the order the dashboard displays them.
    pub const ALL: [Status; 3] = [Status::Active, Status::AtRisk, Status::Inactive];

    /// Returns the display label used in tables and prompts.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::AtRisk => "At-Risk",
            Status::Inactive => "Inactive",
        }
    }

    /// Returns an emoji representation of the status.
    pub fn emoji(&self) -> &'static str {
        match self {
            Status::Active => "🟢",
            Status::AtRisk => "🔴",
            Status::Inactive => "⚪",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Status::Active),
            "at-risk" | "at_risk" | "atrisk" | "at risk" => Ok(Status::AtRisk),
            "inactive" => Ok(Status::Inactive),
            other => Err(format!("unknown member status: {}", other)),
        }
    }
}

/// Daily health averages tracked for a member.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetrics {
    /// Average daily step count.
    pub avg_steps: u32,
    /// Resting heart rate in beats per minute (must be positive).
    pub heart_rate: u32,
    /// Average nightly sleep in hours.
    pub sleep_hours: f64,
    /// Self-reported stress on a 0-10 scale.
    pub stress_level: u8,
}

/// A tracked individual in the community.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Stable unique identifier.
    pub id: String,
    pub name: String,
    pub age: u32,
    pub email: String,
    pub status: Status,
    /// Free-text recency label, e.g. "2 hours ago".
    pub last_activity: String,
    /// Avatar image URI.
    pub avatar: String,
    pub metrics: HealthMetrics,
}

/// One day's aggregate figures in the community trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthTrend {
    /// Day label, e.g. "Mon".
    pub date: String,
    pub steps: u32,
    /// Average sleep in hours.
    pub sleep: f64,
    /// Engagement score (0-100).
    pub engagement: u8,
}

/// Community-level statistics shown on the dashboard cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityStats {
    /// Number of members in the roster.
    pub total_members: usize,
    /// Number of members whose status is Active.
    pub active_participation: usize,
    /// Engagement score (0-100), supplied from outside the roster.
    pub avg_engagement_score: u8,
    /// Configured focus label for the community.
    pub top_condition_concern: String,
}

/// Count and share of members in one status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusBucket {
    pub count: usize,
    /// Share of the roster in percent (0.0 when the roster is empty).
    pub percentage: f64,
}

/// Status breakdown of a roster. Always holds a bucket for every status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusDistribution {
    pub active: StatusBucket,
    pub at_risk: StatusBucket,
    pub inactive: StatusBucket,
}

impl StatusDistribution {
    /// Returns the bucket for a status.
    pub fn get(&self, status: Status) -> &StatusBucket {
        match status {
            Status::Active => &self.active,
            Status::AtRisk => &self.at_risk,
            Status::Inactive => &self.inactive,
        }
    }

    pub(crate) fn get_mut(&mut self, status: Status) -> &mut StatusBucket {
        match status {
            Status::Active => &mut self.active,
            Status::AtRisk => &mut self.at_risk,
            Status::Inactive => &mut self.inactive,
        }
    }

    /// Iterates buckets in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Status, &StatusBucket)> {
        Status::ALL.into_iter().map(move |s| (s, self.get(s)))
    }

    /// Sum of all bucket counts.
    pub fn total(&self) -> usize {
        self.iter().map(|(_, b)| b.count).sum()
    }
}

/// Flat projection of a member for the detail card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberDetail {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub status: Status,
    pub avg_steps: u32,
    pub heart_rate: u32,
    pub sleep_hours: f64,
    pub stress_level: u8,
}

/// The subset of a member that is sent to the insight model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberSummary {
    pub name: String,
    pub status: Status,
    pub metrics: HealthMetrics,
}

impl From<&Member> for MemberSummary {
    fn from(member: &Member) -> Self {
        Self {
            name: member.name.clone(),
            status: member.status,
            metrics: member.metrics,
        }
    }
}
