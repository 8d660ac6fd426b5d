//! Rendering of dashboard views.
//!
//! A [`DashboardReport`] is the serializable view model of one tab; the
//! generator turns it into Markdown or JSON.

pub mod generator;

pub use generator::{generate_json_report, generate_markdown_report};

use crate::analysis::group_by_status;
use crate::app::{ActionState, Dashboard};
use crate::cli::View;
use crate::insight::split_paragraphs;
use crate::models::{
    CommunityStats, HealthTrend, Member, MemberDetail, Status, StatusDistribution,
};
use std::collections::BTreeMap;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Metadata about a rendered view.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub view: String,
    /// Model used for insight actions; `None` when offline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Dashboard tab: statistics, trends and recent activity.
#[derive(Debug, Clone, Serialize)]
pub struct OverviewSection {
    pub stats: CommunityStats,
    pub trends: Vec<HealthTrend>,
    pub distribution: StatusDistribution,
    pub recent_activity: Vec<Member>,
    pub stress_gauge_segments: usize,
}

/// Members tab: the roster and the selected member's card.
#[derive(Debug, Clone, Serialize)]
pub struct MembersSection {
    pub members: Vec<Member>,
    /// Member ids per status, in roster order.
    pub by_status: BTreeMap<Status, Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<MemberDetail>,
    pub tip: InsightSection,
}

/// State and text of one insight action.
#[derive(Debug, Clone, Serialize)]
pub struct InsightSection {
    #[serde(flatten)]
    pub state: ActionState,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub paragraphs: Vec<String>,
}

impl From<&ActionState> for InsightSection {
    fn from(state: &ActionState) -> Self {
        Self {
            state: state.clone(),
            paragraphs: state
                .displayed_text()
                .map(split_paragraphs)
                .unwrap_or_default(),
        }
    }
}

/// View model of one dashboard tab.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub metadata: ReportMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<OverviewSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<MembersSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<InsightSection>,
}

impl DashboardReport {
    /// Build the view model for the dashboard's current view.
    pub fn from_dashboard(dashboard: &Dashboard) -> Self {
        let state = dashboard.state();
        let metadata = ReportMetadata {
            generated_at: Utc::now(),
            view: view_title(state.view).to_string(),
            model: dashboard.model().map(String::from),
        };

        let mut report = Self {
            metadata,
            overview: None,
            members: None,
            insights: None,
        };

        match state.view {
            View::Dashboard => {
                report.overview = Some(OverviewSection {
                    stats: dashboard.stats(),
                    trends: dashboard.trends().to_vec(),
                    distribution: dashboard.distribution(),
                    recent_activity: dashboard.recent_activity().to_vec(),
                    stress_gauge_segments: dashboard.settings().stress_gauge_segments,
                });
            }
            View::Members => {
                let roster = dashboard.store().list();
                let by_status = group_by_status(roster)
                    .into_iter()
                    .map(|(status, members)| {
                        (status, members.iter().map(|m| m.id.clone()).collect())
                    })
                    .collect();
                report.members = Some(MembersSection {
                    members: roster.to_vec(),
                    by_status,
                    selected: dashboard.selected_detail(),
                    tip: InsightSection::from(state.tip.state()),
                });
            }
            View::Insights => {
                report.insights = Some(InsightSection::from(state.community.state()));
            }
        }

        report
    }
}

/// Title shown in the report header.
pub fn view_title(view: View) -> &'static str {
    match view {
        View::Dashboard => "Dashboard",
        View::Members => "Members",
        View::Insights => "Insights",
    }
}

/// Subtitle shown under the report header.
pub fn view_subtitle(view: View) -> &'static str {
    match view {
        View::Dashboard => "Monitor your community's pulse in real-time.",
        View::Members => "Manage and support individual community members.",
        View::Insights => "AI-driven analytics and wellness predictions.",
    }
}
