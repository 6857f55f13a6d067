use crate::domain::analysis::entities::{AnalysisReport, Command};

/// Top-level position in the app flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    /// Camera view: collecting frames for one item.
    Scanning,
    /// A scanned candidate awaits the user's commit or discard.
    ReviewingCandidate,
    /// Looking at the committed inventory.
    Browsing,
    /// An inventory-wide report request is on screen.
    RunningReport(ReportKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Reminders,
    Nutrition,
    Recipes,
}

impl ReportKind {
    pub fn command(&self) -> Command {
        match self {
            ReportKind::Reminders => Command::ShowReminders,
            ReportKind::Nutrition => Command::ShowNutrition,
            ReportKind::Recipes => Command::SuggestRecipes,
        }
    }
}

/// The single analysis result currently awaiting user action. A new scan or
/// navigation replaces it; there is never more than one.
#[derive(Debug, Clone)]
pub struct PendingAnalysis {
    pub command: Command,
    pub report: AnalysisReport,
}

/// What a scan submission came back with.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// An identified item is parked for review.
    CandidateReady,
    /// The model answered but identified nothing usable. The buffer is kept
    /// so the user can add a clearer shot and resubmit.
    NoCandidate,
    /// The call failed. The buffer is kept for resubmission.
    Failed { reason: String },
    /// The user moved on while the call was in flight; the response was
    /// discarded unused.
    Superseded,
}

/// What a report request came back with. Failure is an outcome here, not an
/// error: the user just sees a notice and navigates on.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    Ready(AnalysisReport),
    Failed { reason: String },
    Superseded,
}
