//! Crack-job orchestration
//!
//! A [`CrackEngine`] owns at most one background job. Submitting a job while
//! another is running supersedes the older one: its cancellation token goes
//! stale and its event channel is dropped, so nothing it produces can reach
//! the caller.
//!
//! ```text
//! idle --submit--> running --success--> complete --take_outcome--> idle
//!                          --failure--> error    --take_outcome--> idle
//!                          --submit---> running (prior job discarded)
//! ```

use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use tracing::{debug, warn};

use crate::cancel::CancelToken;
use crate::candidate::CandidateResult;
use crate::cipher::ProductOptions;
use crate::config::EngineConfig;
use crate::error::{CrackboxError, ErrorCategory, ErrorKind, Result};
use crate::score;
use crate::search::{CrackTarget, KeySearch};

/// A request to break one ciphertext.
#[derive(Debug, Clone, PartialEq)]
pub struct CrackJob {
    pub target: CrackTarget,
    pub ciphertext: String,
    /// Leg types, used only when `target` is a product cipher.
    pub options: ProductOptions,
}

impl CrackJob {
    pub fn new(target: impl Into<CrackTarget>, ciphertext: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ciphertext: ciphertext.into(),
            options: ProductOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ProductOptions) -> Self {
        self.options = options;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Idle,
    Running,
    Complete,
    Error,
}

/// What [`CrackEngine::poll`] observed.
#[derive(Debug, Clone, PartialEq)]
pub enum JobUpdate {
    /// Advisory status text.
    Progress(String),
    /// The job reached `Complete` or `Error`; collect it with
    /// [`CrackEngine::take_outcome`].
    Finished(JobState),
}

enum WorkerEvent {
    Progress(String),
    Done(Result<Vec<CandidateResult>>),
}

struct ActiveJob {
    generation: u64,
    events: Receiver<WorkerEvent>,
}

pub struct CrackEngine {
    config: EngineConfig,
    generation: Arc<AtomicU64>,
    state: JobState,
    active: Option<ActiveJob>,
    outcome: Option<Result<Vec<CandidateResult>>>,
}

impl Default for CrackEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl CrackEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            generation: Arc::new(AtomicU64::new(0)),
            state: JobState::Idle,
            active: None,
            outcome: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    /// Starts `job` on a background thread and returns its generation.
    ///
    /// Any running job is superseded first, and any uncollected outcome is
    /// discarded.
    pub fn submit(&mut self, job: CrackJob) -> Result<u64> {
        self.supersede();
        let token = CancelToken::advance(&self.generation);
        let generation = token.generation();
        let (tx, rx) = mpsc::channel();
        let config = self.config.clone();
        debug!(generation, target = %job.target, letters = job.ciphertext.len(), "crack job submitted");

        thread::Builder::new()
            .name(format!("crackbox-job-{}", generation))
            .spawn(move || run_job(&config, &job, &token, &tx))
            .map_err(|e| {
                CrackboxError::with_kind_and_source(
                    ErrorCategory::Internal,
                    ErrorKind::EngineFault,
                    format!("failed to start crack job: {}", e),
                    e,
                )
            })?;

        self.active = Some(ActiveJob {
            generation,
            events: rx,
        });
        self.state = JobState::Running;
        Ok(generation)
    }

    /// Abandons the running job, if any, and returns to `Idle`.
    pub fn cancel(&mut self) {
        self.supersede();
    }

    fn supersede(&mut self) {
        if let Some(active) = self.active.take() {
            debug!(generation = active.generation, "crack job superseded");
            // The stale token stops the worker at its next checkpoint. The
            // dropped receiver discards anything it sends before that.
            drop(active.events);
            let _ = CancelToken::advance(&self.generation);
        }
        self.outcome = None;
        self.state = JobState::Idle;
    }

    /// Non-blocking check for news from the running job.
    pub fn poll(&mut self) -> Option<JobUpdate> {
        let active = self.active.as_ref()?;
        match active.events.try_recv() {
            Ok(WorkerEvent::Progress(status)) => Some(JobUpdate::Progress(status)),
            Ok(WorkerEvent::Done(outcome)) => Some(JobUpdate::Finished(self.finish(outcome))),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                Some(JobUpdate::Finished(self.finish(Err(worker_lost()))))
            }
        }
    }

    /// Blocks until the running job finishes, forwarding progress to
    /// `on_progress`, then collects its outcome.
    pub fn wait(&mut self, mut on_progress: impl FnMut(&str)) -> Result<Vec<CandidateResult>> {
        while let Some(active) = self.active.as_ref() {
            match active.events.recv() {
                Ok(WorkerEvent::Progress(status)) => on_progress(&status),
                Ok(WorkerEvent::Done(outcome)) => {
                    self.finish(outcome);
                }
                Err(_) => {
                    self.finish(Err(worker_lost()));
                }
            }
        }
        self.take_outcome().unwrap_or_else(|| {
            Err(CrackboxError::with_kind(
                ErrorCategory::User,
                ErrorKind::InvalidInput,
                "no crack job has been submitted",
            ))
        })
    }

    /// Consumes a `Complete` or `Error` outcome, returning the engine to `Idle`.
    pub fn take_outcome(&mut self) -> Option<Result<Vec<CandidateResult>>> {
        let outcome = self.outcome.take()?;
        self.state = JobState::Idle;
        Some(outcome)
    }

    fn finish(&mut self, outcome: Result<Vec<CandidateResult>>) -> JobState {
        let generation = self.active.take().map(|a| a.generation);
        self.state = match &outcome {
            Ok(results) => {
                debug!(?generation, results = results.len(), "crack job complete");
                JobState::Complete
            }
            Err(e) => {
                debug!(?generation, error = %e, "crack job failed");
                JobState::Error
            }
        };
        self.outcome = Some(outcome);
        self.state
    }
}

fn worker_lost() -> CrackboxError {
    warn!("crack worker exited without reporting a result");
    CrackboxError::engine_fault("crack job terminated unexpectedly")
}

/// Body of the background thread. Sends nothing once `token` is stale.
fn run_job(
    config: &EngineConfig,
    job: &CrackJob,
    token: &CancelToken,
    tx: &Sender<WorkerEvent>,
) {
    let send = |event: WorkerEvent| {
        if !token.is_cancelled() {
            let _ = tx.send(event);
        }
    };

    send(WorkerEvent::Progress(format!("Searching {} key space", job.target)));
    let outcome = KeySearch::new(config, token)
        .run(job.target, &job.ciphertext, &job.options)
        .and_then(|candidates| {
            debug!(
                generation = token.generation(),
                candidates = candidates.len(),
                "candidates enumerated"
            );
            send(WorkerEvent::Progress(format!(
                "Scoring {} candidates",
                candidates.len()
            )));
            let ranked = score::rank(candidates, config.max_results);
            token.check()?;
            Ok(ranked)
        });

    if matches!(&outcome, Err(e) if e.kind == Some(ErrorKind::JobSuperseded)) {
        debug!(generation = token.generation(), "crack worker stopped");
        return;
    }
    send(WorkerEvent::Done(outcome));
}
