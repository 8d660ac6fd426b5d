//! Dashboard controller.
//!
//! Ties the roster store, the aggregation functions and the insight
//! requestor to the explicit [`AppState`]. Each UI event (tab switch, member
//! selection, analyze/tip buttons) is a method here.

pub mod state;

pub use state::{ActionState, AppState, InsightOutcome};

use crate::analysis;
use crate::cli::View;
use crate::config::{DashboardConfig, EngagementSource};
use crate::error::RosterError;
use crate::insight::InsightRequestor;
use crate::models::{
    CommunityStats, HealthTrend, Member, MemberDetail, MemberSummary, StatusDistribution,
};
use crate::roster::RosterStore;
use std::sync::Arc;
use tracing::{debug, info};

/// The dashboard application: data, settings and UI state.
pub struct Dashboard {
    store: RosterStore,
    trends: Vec<HealthTrend>,
    settings: DashboardConfig,
    /// `None` when running offline.
    requestor: Option<Arc<InsightRequestor>>,
    state: AppState,
}

impl Dashboard {
    pub fn new(
        store: RosterStore,
        trends: Vec<HealthTrend>,
        settings: DashboardConfig,
        requestor: Option<Arc<InsightRequestor>>,
    ) -> Self {
        Self {
            store,
            trends,
            settings,
            requestor,
            state: AppState::default(),
        }
    }

    pub fn store(&self) -> &RosterStore {
        &self.store
    }

    pub fn trends(&self) -> &[HealthTrend] {
        &self.trends
    }

    pub fn settings(&self) -> &DashboardConfig {
        &self.settings
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn model(&self) -> Option<&str> {
        self.requestor.as_deref().map(InsightRequestor::model)
    }

    pub fn switch_view(&mut self, view: View) {
        self.state.switch_view(view);
    }

    /// Select a member by id. Unknown ids leave the selection unchanged.
    pub fn select_member(&mut self, id: &str) -> Result<(), RosterError> {
        self.store.get(id)?;
        self.state.select_member(id);
        Ok(())
    }

    /// The currently selected member, if it still exists.
    pub fn selected_member(&self) -> Option<&Member> {
        self.state
            .selected_member
            .as_deref()
            .and_then(|id| self.store.get(id).ok())
    }

    /// Engagement score according to the configured source.
    pub fn engagement_score(&self) -> u8 {
        match self.settings.engagement {
            EngagementSource::Fixed { value } => value,
            EngagementSource::TrendMean => analysis::mean_engagement(&self.trends)
                .map(|mean| mean.round().clamp(0.0, 100.0) as u8)
                .unwrap_or(0),
        }
    }

    pub fn stats(&self) -> CommunityStats {
        analysis::compute_stats(
            self.store.list(),
            self.engagement_score(),
            &self.settings.top_condition_concern,
        )
    }

    pub fn distribution(&self) -> StatusDistribution {
        analysis::status_distribution(self.store.list())
    }

    pub fn recent_activity(&self) -> &[Member] {
        analysis::recent_activity(self.store.list(), self.settings.recent_activity_limit)
    }

    pub fn selected_detail(&self) -> Option<MemberDetail> {
        self.selected_member().map(analysis::member_detail_view)
    }

    /// Start the community analysis over a snapshot of the roster.
    ///
    /// Returns `false` when running offline.
    pub fn start_community_analysis(&mut self) -> bool {
        let Some(requestor) = self.requestor.clone() else {
            debug!("Offline: community analysis skipped");
            return false;
        };

        let snapshot = self.store.snapshot();
        info!("Starting community analysis over {} members", snapshot.len());

        let task = tokio::spawn(async move {
            let summaries: Vec<MemberSummary> = snapshot.iter().map(MemberSummary::from).collect();
            InsightOutcome::from(requestor.request_community_insight(&summaries).await)
        });
        self.state.community.start(task);
        true
    }

    /// Start a tip request for the selected member.
    ///
    /// Returns `Ok(false)` when running offline.
    pub fn start_member_tip(&mut self) -> Result<bool, RosterError> {
        let member = match self.state.selected_member.as_deref() {
            Some(id) => self.store.get(id)?,
            None => return Err(RosterError::NoSelection),
        };
        let summary = MemberSummary::from(member);

        let Some(requestor) = self.requestor.clone() else {
            debug!("Offline: member tip skipped");
            return Ok(false);
        };

        let task = tokio::spawn(async move {
            InsightOutcome::from(requestor.request_member_tip(&summary).await)
        });
        self.state.tip.start(task);
        Ok(true)
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Wait for all in-flight insight requests.
    pub async fn settle(&mut self) {
        self.state.settle().await;
    }
}
