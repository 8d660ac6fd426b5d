//! Application state and the per-action insight state machine.
//!
//! Each insight action owns one [`ActionSlot`]. A slot moves
//! `Idle -> Loading -> Loaded | Failed`, and back to `Idle` when the user
//! navigates away. At most one task is in flight per slot; starting the
//! action again aborts the previous task so an older response can never
//! replace a newer one.

use crate::cli::View;
use crate::error::InsightError;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Result returned by an insight task.
#[derive(Debug)]
pub enum InsightOutcome {
    Success(String),
    Failure(InsightError),
}

impl From<Result<String, InsightError>> for InsightOutcome {
    fn from(result: Result<String, InsightError>) -> Self {
        match result {
            Ok(text) => InsightOutcome::Success(text),
            Err(err) => InsightOutcome::Failure(err),
        }
    }
}

/// The two insight actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightAction {
    CommunityAnalysis,
    MemberTip,
}

impl InsightAction {
    /// Message shown in place of a failed or empty response.
    pub fn fallback_message(&self, err: &InsightError) -> &'static str {
        match (self, err) {
            (InsightAction::CommunityAnalysis, InsightError::Empty) => "No insights found.",
            (InsightAction::CommunityAnalysis, _) => {
                "Error generating community insights. Please check your API key."
            }
            (InsightAction::MemberTip, _) => "Could not generate a tip at this moment.",
        }
    }
}

/// Display state of one insight action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ActionState {
    Idle,
    Loading,
    Loaded { text: String },
    /// `message` is what the user sees; `reason` is only logged.
    Failed {
        message: String,
        #[serde(skip)]
        reason: String,
    },
}

impl ActionState {
    /// Text to display for this state, if any.
    pub fn displayed_text(&self) -> Option<&str> {
        match self {
            ActionState::Loaded { text } => Some(text),
            ActionState::Failed { message, .. } => Some(message),
            ActionState::Idle | ActionState::Loading => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ActionState::Loading)
    }
}

/// One insight action and its in-flight task.
#[derive(Debug)]
pub struct ActionSlot {
    action: InsightAction,
    state: ActionState,
    task: Option<JoinHandle<InsightOutcome>>,
}

impl ActionSlot {
    pub fn new(action: InsightAction) -> Self {
        Self {
            action,
            state: ActionState::Idle,
            task: None,
        }
    }

    pub fn state(&self) -> &ActionState {
        &self.state
    }

    /// Track a freshly spawned task, aborting any previous one.
    pub fn start(&mut self, task: JoinHandle<InsightOutcome>) {
        if let Some(previous) = self.task.take() {
            debug!("Aborting in-flight {:?} request", self.action);
            previous.abort();
        }
        self.task = Some(task);
        self.state = ActionState::Loading;
    }

    /// Abort any in-flight task and clear the displayed text.
    pub fn reset(&mut self) {
        if let Some(task) = self.task.take() {
            debug!("Cancelling {:?} request", self.action);
            task.abort();
        }
        self.state = ActionState::Idle;
    }

    /// Wait for the in-flight task, if any, and record its outcome.
    pub async fn settle(&mut self) -> &ActionState {
        if let Some(task) = self.task.take() {
            self.state = match task.await {
                Ok(outcome) => self.resolve(outcome),
                Err(e) if e.is_cancelled() => ActionState::Idle,
                Err(e) => self.resolve(InsightOutcome::Failure(InsightError::Request(
                    e.to_string(),
                ))),
            };
        }
        &self.state
    }

    fn resolve(&self, outcome: InsightOutcome) -> ActionState {
        match outcome {
            InsightOutcome::Success(text) => ActionState::Loaded { text },
            InsightOutcome::Failure(err) => {
                warn!("{:?} failed: {}", self.action, err);
                ActionState::Failed {
                    message: self.action.fallback_message(&err).to_string(),
                    reason: err.to_string(),
                }
            }
        }
    }
}

/// Everything the event-handling layer mutates.
#[derive(Debug)]
pub struct AppState {
    pub view: View,
    pub selected_member: Option<String>,
    pub community: ActionSlot,
    pub tip: ActionSlot,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            view: View::Dashboard,
            selected_member: None,
            community: ActionSlot::new(InsightAction::CommunityAnalysis),
            tip: ActionSlot::new(InsightAction::MemberTip),
        }
    }
}

impl AppState {
    /// Switch tabs. Leaving a view cancels its pending actions.
    pub fn switch_view(&mut self, view: View) {
        if self.view == view {
            return;
        }
        debug!("Switching view {:?} -> {:?}", self.view, view);
        self.community.reset();
        self.tip.reset();
        self.selected_member = None;
        self.view = view;
    }

    /// Select a member. Any tip for the previous selection is discarded.
    pub fn select_member(&mut self, id: impl Into<String>) {
        self.tip.reset();
        self.selected_member = Some(id.into());
    }

    pub fn is_loading(&self) -> bool {
        self.community.state().is_loading() || self.tip.state().is_loading()
    }

    /// Wait for both actions to finish.
    pub async fn settle(&mut self) {
        let AppState { community, tip, .. } = self;
        futures::future::join(community.settle(), tip.settle()).await;
    }
}
