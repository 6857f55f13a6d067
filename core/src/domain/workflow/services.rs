use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::{
    analysis::{
        entities::{AnalysisReport, Command},
        ports::ModelClient,
        prompt::VALIDATION_FALLBACK_REACTION,
        services::AnalysisService,
        value_objects::{AnalyzeInput, UserProfile},
    },
    capture::{
        entities::CaptureOutcome,
        ports::CameraDevice,
        services::CaptureSession,
    },
    common::{CaptureConfig, entities::app_errors::CoreError},
    inventory::{entities::FoodItem, ports::LocalStore, services::InventoryService},
    workflow::entities::{
        PendingAnalysis, ReportKind, ReportOutcome, SubmitOutcome, WorkflowState,
    },
};

/// Drives the whole app flow: camera, analysis and inventory behind one
/// state machine.
///
/// Model calls run outside the internal lock so the user can navigate away
/// mid-call. Every dispatch takes a ticket from a monotonic counter; a
/// response whose ticket is no longer current is discarded unused.
pub struct Workflow<C: CameraDevice, M: ModelClient, S: LocalStore> {
    inner: Mutex<WorkflowInner<C, S>>,
    analysis: AnalysisService<M>,
}

struct WorkflowInner<C: CameraDevice, S: LocalStore> {
    session: CaptureSession<C>,
    inventory: InventoryService<S>,
    state: WorkflowState,
    pending: Option<PendingAnalysis>,
    profile: Option<UserProfile>,
    dispatch_seq: u64,
    in_flight: Option<u64>,
}

impl<C: CameraDevice, S: LocalStore> WorkflowInner<C, S> {
    fn bump(&mut self) -> u64 {
        self.dispatch_seq += 1;
        self.dispatch_seq
    }

    fn submission_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    fn leave_scanning(&mut self) {
        if self.state == WorkflowState::Scanning {
            self.session.reset();
        }
    }
}

impl<C: CameraDevice, M: ModelClient, S: LocalStore> Workflow<C, M, S> {
    pub fn new(camera: C, model: M, store: S, capture: CaptureConfig) -> Self {
        Self {
            inner: Mutex::new(WorkflowInner {
                session: CaptureSession::new(camera, capture),
                inventory: InventoryService::bootstrap(store),
                state: WorkflowState::Scanning,
                pending: None,
                profile: None,
                dispatch_seq: 0,
                in_flight: None,
            }),
            analysis: AnalysisService::new(model),
        }
    }

    pub async fn state(&self) -> WorkflowState {
        self.inner.lock().await.state
    }

    pub async fn pending(&self) -> Option<PendingAnalysis> {
        self.inner.lock().await.pending.clone()
    }

    pub async fn items(&self) -> Vec<FoodItem> {
        self.inner.lock().await.inventory.items().to_vec()
    }

    pub async fn frames_buffered(&self) -> usize {
        self.inner.lock().await.session.frame_count()
    }

    pub async fn set_profile(&self, profile: Option<UserProfile>) {
        self.inner.lock().await.profile = profile;
    }

    /// Switches to the scanner view. Any pending result is dropped and any
    /// in-flight call is invalidated. No-op when already scanning.
    pub async fn select_scan(&self) {
        let mut inner = self.inner.lock().await;
        if inner.state == WorkflowState::Scanning {
            return;
        }
        inner.bump();
        inner.pending = None;
        inner.state = WorkflowState::Scanning;
    }

    pub async fn start_camera(&self) -> Result<(), CoreError> {
        let mut inner = self.inner.lock().await;
        if inner.state != WorkflowState::Scanning {
            return Err(CoreError::InvalidState(
                "camera is only available while scanning".to_string(),
            ));
        }
        inner.session.start().await
    }

    /// Releasing the camera is never refused, whatever the state.
    pub async fn stop_camera(&self) {
        self.inner.lock().await.session.stop();
    }

    pub async fn capture_frame(&self) -> Result<CaptureOutcome, CoreError> {
        let mut inner = self.inner.lock().await;
        if inner.state != WorkflowState::Scanning {
            return Err(CoreError::InvalidState(
                "camera is only available while scanning".to_string(),
            ));
        }
        if inner.submission_in_flight() {
            return Err(CoreError::InvalidState(
                "analysis submission in progress".to_string(),
            ));
        }
        inner.session.capture().await
    }

    pub async fn remove_frame(&self, index: usize) -> Result<(), CoreError> {
        let mut inner = self.inner.lock().await;
        if inner.state != WorkflowState::Scanning {
            return Err(CoreError::InvalidState(
                "frames can only be edited while scanning".to_string(),
            ));
        }
        if inner.submission_in_flight() {
            return Err(CoreError::InvalidState(
                "analysis submission in progress".to_string(),
            ));
        }
        inner.session.remove_frame(index)
    }

    /// Sends the buffered frames for identification.
    ///
    /// On a usable candidate the buffer is cleared and the flow moves to
    /// review. On `NoCandidate` or `Failed` the buffer survives untouched so
    /// the user can adjust a frame and resubmit.
    pub async fn submit_scan(&self) -> Result<SubmitOutcome, CoreError> {
        // 1. Validate and snapshot everything the call needs under the lock
        let (frames, first_source, profile, ticket) = {
            let mut inner = self.inner.lock().await;
            if inner.state != WorkflowState::Scanning {
                return Err(CoreError::InvalidState(
                    "scan submission is only available while scanning".to_string(),
                ));
            }
            if inner.session.frame_count() == 0 {
                return Err(CoreError::InvalidState("no frames buffered".to_string()));
            }

            let frames = inner.session.frames().to_vec();
            let first_source = frames[0].source.clone();
            let ticket = inner.bump();
            inner.in_flight = Some(ticket);
            (frames, first_source, inner.profile.clone(), ticket)
        };

        // 2. Call the model without the lock so navigation stays live
        let result = self
            .analysis
            .analyze(AnalyzeInput {
                command: Command::ScanItem,
                frames,
                snapshot: Vec::new(),
                free_text: None,
                profile,
            })
            .await;

        // 3. Apply only if nothing moved on while the call was out
        let mut inner = self.inner.lock().await;
        if inner.in_flight == Some(ticket) {
            inner.in_flight = None;
        }
        if inner.dispatch_seq != ticket {
            debug!("discarding stale scan response");
            return Ok(SubmitOutcome::Superseded);
        }

        match result {
            Ok(mut report) => {
                if report.candidate.is_none() {
                    return Ok(SubmitOutcome::NoCandidate);
                }
                if let Some(draft) = report.candidate.as_mut() {
                    draft.image_ref = first_source;
                }
                inner.pending = Some(PendingAnalysis {
                    command: Command::ScanItem,
                    report,
                });
                inner.session.reset();
                inner.state = WorkflowState::ReviewingCandidate;
                Ok(SubmitOutcome::CandidateReady)
            }
            Err(err) => {
                warn!("scan analysis failed: {}", err);
                Ok(SubmitOutcome::Failed {
                    reason: err.to_string(),
                })
            }
        }
    }

    /// Writes the reviewed candidate into the inventory and moves to
    /// browsing. A persistence failure leaves the candidate under review for
    /// another attempt.
    pub async fn commit_candidate(&self) -> Result<FoodItem, CoreError> {
        let mut inner = self.inner.lock().await;
        if inner.state != WorkflowState::ReviewingCandidate {
            return Err(CoreError::InvalidState(
                "no candidate under review".to_string(),
            ));
        }
        let draft = inner
            .pending
            .as_ref()
            .and_then(|pending| pending.report.candidate.clone())
            .ok_or_else(|| CoreError::InvalidState("no candidate under review".to_string()))?;

        let item = inner.inventory.add(draft)?;
        inner.pending = None;
        inner.state = WorkflowState::Browsing;
        Ok(item)
    }

    /// Drops the reviewed candidate and returns to the scanner.
    pub async fn discard_candidate(&self) -> Result<(), CoreError> {
        let mut inner = self.inner.lock().await;
        if inner.state != WorkflowState::ReviewingCandidate {
            return Err(CoreError::InvalidState(
                "no candidate under review".to_string(),
            ));
        }
        inner.pending = None;
        inner.state = WorkflowState::Scanning;
        Ok(())
    }

    /// Navigates to the inventory list. Purely local; never calls the model.
    pub async fn show_inventory(&self) -> Vec<FoodItem> {
        let mut inner = self.inner.lock().await;
        inner.bump();
        inner.leave_scanning();
        inner.pending = None;
        inner.state = WorkflowState::Browsing;
        inner.inventory.items().to_vec()
    }

    pub async fn remove_item(&self, id: Uuid) -> Result<bool, CoreError> {
        self.inner.lock().await.inventory.remove(id)
    }

    /// Runs an inventory-wide report. Failure is reported as a value so the
    /// view can show a notice and stay navigable.
    pub async fn run_report(&self, kind: ReportKind) -> ReportOutcome {
        // 1. Navigate and snapshot under the lock
        let (snapshot, profile, ticket) = {
            let mut inner = self.inner.lock().await;
            inner.leave_scanning();
            inner.pending = None;
            inner.state = WorkflowState::RunningReport(kind);
            let ticket = inner.bump();
            inner.in_flight = Some(ticket);
            (inner.inventory.snapshot(), inner.profile.clone(), ticket)
        };

        // 2. Model call without the lock
        let result = self
            .analysis
            .analyze(AnalyzeInput {
                command: kind.command(),
                frames: Vec::new(),
                snapshot,
                free_text: None,
                profile,
            })
            .await;

        // 3. Apply only if still current
        let mut inner = self.inner.lock().await;
        if inner.in_flight == Some(ticket) {
            inner.in_flight = None;
        }
        if inner.dispatch_seq != ticket {
            debug!("discarding stale report response");
            return ReportOutcome::Superseded;
        }

        match result {
            Ok(report) => {
                inner.pending = Some(PendingAnalysis {
                    command: kind.command(),
                    report: report.clone(),
                });
                ReportOutcome::Ready(report)
            }
            Err(err) => {
                warn!("report command {} failed: {}", kind.command().as_str(), err);
                ReportOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Checks a free-text onboarding answer with the model. A failed call
    /// substitutes the canned reaction and accepts the input; onboarding is
    /// never blocked by a flaky network. This is the one place a failure is
    /// papered over, and deliberately so.
    pub async fn validate_input(&self, text: String) -> AnalysisReport {
        let profile = self.inner.lock().await.profile.clone();

        let result = self
            .analysis
            .analyze(AnalyzeInput {
                command: Command::ValidateInput,
                frames: Vec::new(),
                snapshot: Vec::new(),
                free_text: Some(text),
                profile,
            })
            .await;

        match result {
            Ok(report) => report,
            Err(err) => {
                warn!("input validation failed, substituting canned reaction: {}", err);
                AnalysisReport {
                    chef_reaction: Some(VALIDATION_FALLBACK_REACTION.to_string()),
                    input_valid: Some(true),
                    ..Default::default()
                }
            }
        }
    }
}
