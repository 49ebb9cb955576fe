// ABOUTME: Coalescing analysis scheduler running at most one pass per subject at a time
// ABOUTME: Latest-wins queuing of triggers that arrive mid-pass, results published over watch channels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Analysis scheduling.
//!
//! The engine is passive: the host decides when new data warrants a
//! recompute and calls [`AnalysisScheduler::request`]. Per subject, at most
//! one pass is in flight. A request arriving mid-pass is parked; a later
//! request replaces the parked one, so exactly one more pass runs after the
//! current one, always on the freshest input. Subjects with no subscribers
//! are dropped once they go idle.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use headway_intelligence::{AnalysisInput, AnalysisOutcome, HeadacheAnalysisEngine};
use serde::{Deserialize, Serialize};
use tokio::sync::{watch, Mutex};
use tokio::task;
use tracing::{debug, warn};

use crate::logging::AnalysisLogger;

/// Published result of one analysis pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassReport {
    /// Id of the request whose input this pass analysed
    pub request_id: u64,
    /// Pass outcome
    pub outcome: PassOutcome,
    /// Wall-clock duration of the pass
    pub duration_ms: u64,
}

/// Outcome of a scheduled pass
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PassOutcome {
    /// The engine produced an outcome
    Analyzed {
        /// Engine outcome
        outcome: AnalysisOutcome,
    },
    /// The input was rejected or the pass did not finish
    Failed {
        /// Error description
        message: String,
    },
}

impl PassOutcome {
    fn status(&self) -> &'static str {
        match self {
            Self::Analyzed {
                outcome: AnalysisOutcome::Complete(_),
            } => "complete",
            Self::Analyzed {
                outcome: AnalysisOutcome::InsufficientData { .. },
            } => "insufficient_data",
            Self::Analyzed {
                outcome: AnalysisOutcome::NoDataSource { .. },
            } => "no_data_source",
            Self::Failed { .. } => "failed",
        }
    }
}

/// What happened to a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestDisposition {
    /// A pass started immediately
    Started {
        /// Request id
        request_id: u64,
    },
    /// A pass is running; this request runs next unless superseded
    Queued {
        /// Request id
        request_id: u64,
    },
}

impl RequestDisposition {
    /// Request id
    #[must_use]
    pub const fn request_id(self) -> u64 {
        match self {
            Self::Started { request_id } | Self::Queued { request_id } => request_id,
        }
    }
}

/// Counter snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerStats {
    /// Requests received
    pub requests: u64,
    /// Passes started
    pub passes_started: u64,
    /// Passes finished and published
    pub passes_completed: u64,
    /// Parked requests replaced by fresher ones
    pub coalesced: u64,
}

type ReportSender = watch::Sender<Option<Arc<PassReport>>>;

/// Receiver of a subject's latest pass report
pub type ReportReceiver = watch::Receiver<Option<Arc<PassReport>>>;

struct SubjectState {
    running: bool,
    pending: Option<(u64, AnalysisInput)>,
    sender: ReportSender,
}

impl SubjectState {
    fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            running: false,
            pending: None,
            sender,
        }
    }
}

#[derive(Default)]
struct Counters {
    requests: AtomicU64,
    passes_started: AtomicU64,
    passes_completed: AtomicU64,
    coalesced: AtomicU64,
}

struct SchedulerInner {
    engine: Arc<HeadacheAnalysisEngine>,
    subjects: Mutex<HashMap<String, SubjectState>>,
    next_request_id: AtomicU64,
    counters: Counters,
}

/// Coalescing per-subject scheduler
#[derive(Clone)]
pub struct AnalysisScheduler {
    inner: Arc<SchedulerInner>,
}

impl AnalysisScheduler {
    /// Create a scheduler around a shared engine
    #[must_use]
    pub fn new(engine: Arc<HeadacheAnalysisEngine>) -> Self {
        Self {
            inner: Arc::new(SchedulerInner {
                engine,
                subjects: Mutex::new(HashMap::new()),
                next_request_id: AtomicU64::new(1),
                counters: Counters::default(),
            }),
        }
    }

    /// Request a pass for `subject` over `input`
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn request(&self, subject: &str, input: AnalysisInput) -> RequestDisposition {
        let counters = &self.inner.counters;
        counters.requests.fetch_add(1, Ordering::Relaxed);
        let request_id = self.inner.next_request_id.fetch_add(1, Ordering::Relaxed);

        let mut subjects = self.inner.subjects.lock().await;
        let state = subjects
            .entry(subject.to_owned())
            .or_insert_with(SubjectState::new);

        if state.running {
            if let Some((superseded, _)) = state.pending.replace((request_id, input)) {
                let total = counters.coalesced.fetch_add(1, Ordering::Relaxed) + 1;
                debug!(subject, superseded, request_id, "Parked request superseded");
                AnalysisLogger::log_coalesced(subject, total);
            }
            return RequestDisposition::Queued { request_id };
        }

        state.running = true;
        drop(subjects);

        let scheduler = self.clone();
        let subject = subject.to_owned();
        tokio::spawn(async move {
            scheduler.drive(subject, request_id, input).await;
        });

        RequestDisposition::Started { request_id }
    }

    /// Subscribe to a subject's pass reports
    pub async fn subscribe(&self, subject: &str) -> ReportReceiver {
        let mut subjects = self.inner.subjects.lock().await;
        subjects
            .entry(subject.to_owned())
            .or_insert_with(SubjectState::new)
            .sender
            .subscribe()
    }

    /// Latest published report for a subject
    ///
    /// A subject nobody subscribes to is released once its last pass
    /// completes, after which this returns `None`.
    pub async fn latest(&self, subject: &str) -> Option<Arc<PassReport>> {
        let subjects = self.inner.subjects.lock().await;
        subjects
            .get(subject)
            .and_then(|state| state.sender.borrow().clone())
    }

    /// Whether a pass is in flight for a subject
    pub async fn is_running(&self, subject: &str) -> bool {
        let subjects = self.inner.subjects.lock().await;
        subjects.get(subject).is_some_and(|state| state.running)
    }

    /// Number of subjects currently held by the scheduler
    pub async fn tracked_subjects(&self) -> usize {
        self.inner.subjects.lock().await.len()
    }

    /// Counter snapshot
    #[must_use]
    pub fn stats(&self) -> SchedulerStats {
        let counters = &self.inner.counters;
        SchedulerStats {
            requests: counters.requests.load(Ordering::Relaxed),
            passes_started: counters.passes_started.load(Ordering::Relaxed),
            passes_completed: counters.passes_completed.load(Ordering::Relaxed),
            coalesced: counters.coalesced.load(Ordering::Relaxed),
        }
    }

    async fn drive(&self, subject: String, mut request_id: u64, mut input: AnalysisInput) {
        loop {
            let report = self.run_pass(request_id, input).await;
            AnalysisLogger::log_pass(&subject, report.outcome.status(), report.duration_ms);

            let mut subjects = self.inner.subjects.lock().await;
            let Some(state) = subjects.get_mut(&subject) else {
                return;
            };
            state.sender.send_replace(Some(Arc::new(report)));
            self.inner
                .counters
                .passes_completed
                .fetch_add(1, Ordering::Relaxed);

            match state.pending.take() {
                Some((next_id, next_input)) => {
                    request_id = next_id;
                    input = next_input;
                }
                None => {
                    state.running = false;
                    if state.sender.receiver_count() == 0 {
                        subjects.remove(&subject);
                        debug!(subject, "Released idle subject without subscribers");
                    }
                    return;
                }
            }
        }
    }

    async fn run_pass(&self, request_id: u64, input: AnalysisInput) -> PassReport {
        self.inner
            .counters
            .passes_started
            .fetch_add(1, Ordering::Relaxed);
        let engine = Arc::clone(&self.inner.engine);
        let started = Instant::now();

        let outcome = match task::spawn_blocking(move || engine.analyze(&input)).await {
            Ok(Ok(outcome)) => PassOutcome::Analyzed { outcome },
            Ok(Err(error)) => PassOutcome::Failed {
                message: error.to_string(),
            },
            Err(join_error) => {
                warn!(request_id, error = %join_error, "Analysis pass did not finish");
                PassOutcome::Failed {
                    message: join_error.to_string(),
                }
            }
        };

        PassReport {
            request_id,
            outcome,
            duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        }
    }
}
