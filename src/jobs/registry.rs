use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::assets::decode::ImageEntry;
use crate::convert::batch::{BatchOptions, ImageFailure, OutputInfo, run_batch};
use crate::encode::sink::FrameSink;
use crate::foundation::error::{Error, Result};

/// Opaque job identifier issued by [`JobRegistry::submit`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct JobId(uuid::Uuid);

impl JobId {
    pub(crate) fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Lifecycle state of one job. `Done` and `Error` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    /// Created, worker not yet running.
    Queued,
    /// Worker executing the batch.
    Running,
    /// Batch completed; per-image failures do not prevent this state.
    Done,
    /// Fatal condition (empty input set, worker panic).
    Error,
}

impl JobState {
    /// `true` for `Done` and `Error`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Error)
    }
}

/// Immutable copy of one job record, safe to hand to any reader.
#[derive(Clone, Debug, serde::Serialize)]
pub struct JobSnapshot {
    /// Job identifier.
    pub id: JobId,
    /// Lifecycle state.
    pub state: JobState,
    /// Overall completion in percent; exactly 100 only once `Done`.
    pub progress: f64,
    /// Clips produced so far (populated at completion).
    pub outputs: Vec<OutputInfo>,
    /// Per-image failures recorded by the batch runner.
    pub failures: Vec<ImageFailure>,
    /// Fatal error text, verbatim, when the state is `Error`.
    pub error: Option<String>,
    /// Submission time, unix milliseconds.
    pub created_at_ms: u64,
    /// Last mutation time, unix milliseconds.
    pub updated_at_ms: u64,
}

/// Everything a worker needs to execute one batch.
///
/// `open_sink` maps an image name to its output path and a fresh sink; it is
/// the one capability the engine uses to touch the filesystem.
pub struct BatchRequest {
    /// Input images in batch order, each with its per-file decode outcome.
    pub entries: Vec<ImageEntry>,
    /// Shared clip parameters.
    pub options: BatchOptions,
    /// Sink factory, called once per decodable image.
    pub open_sink: Box<dyn FnMut(&str) -> Result<(PathBuf, Box<dyn FrameSink>)> + Send>,
}

struct JobRecord {
    state: JobState,
    progress: f64,
    outputs: Vec<OutputInfo>,
    failures: Vec<ImageFailure>,
    error: Option<String>,
    created_at_ms: u64,
    updated_at_ms: u64,
}

impl JobRecord {
    fn touch(&mut self) {
        self.updated_at_ms = now_ms();
    }

    fn snapshot(&self, id: JobId) -> JobSnapshot {
        JobSnapshot {
            id,
            state: self.state,
            progress: self.progress,
            outputs: self.outputs.clone(),
            failures: self.failures.clone(),
            error: self.error.clone(),
            created_at_ms: self.created_at_ms,
            updated_at_ms: self.updated_at_ms,
        }
    }
}

/// Progress stored while `Running` parks just under 100; exactly 100 is
/// written only together with the `Done` transition.
const RUNNING_PROGRESS_CAP: f64 = 99.9;

/// In-memory table of job records with background execution.
///
/// The registry is an explicit value: create one at process start, clone it
/// wherever submissions or polls happen (clones share the table), and drop it
/// at process stop. Tests create isolated registries freely. Records are
/// never deleted by the registry itself.
///
/// Each submitted batch runs on its own worker thread; the owning worker is
/// the only writer of its record, and every access goes through the registry
/// mutex, so readers never observe a torn update.
#[derive(Clone, Default)]
pub struct JobRegistry {
    jobs: Arc<Mutex<HashMap<JobId, JobRecord>>>,
}

impl JobRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `Queued` record, schedule the batch on a background worker,
    /// and return its id immediately.
    pub fn submit(&self, request: BatchRequest) -> Result<JobId> {
        let id = JobId::new();
        let now = now_ms();
        lock(&self.jobs).insert(
            id,
            JobRecord {
                state: JobState::Queued,
                progress: 0.0,
                outputs: Vec::new(),
                failures: Vec::new(),
                error: None,
                created_at_ms: now,
                updated_at_ms: now,
            },
        );

        let jobs = Arc::clone(&self.jobs);
        let spawned = std::thread::Builder::new()
            .name(format!("job-{id}"))
            .spawn(move || run_job(jobs, id, request));
        if let Err(e) = spawned {
            lock(&self.jobs).remove(&id);
            return Err(Error::Other(anyhow::anyhow!(
                "failed to spawn batch worker: {e}"
            )));
        }

        tracing::info!(job = %id, "job submitted");
        Ok(id)
    }

    /// Return an immutable snapshot of a job record.
    ///
    /// Never blocks beyond registry lock acquisition.
    pub fn get(&self, id: JobId) -> Result<JobSnapshot> {
        lock(&self.jobs)
            .get(&id)
            .map(|record| record.snapshot(id))
            .ok_or_else(|| Error::unknown_job(id.to_string()))
    }
}

type JobTable = Mutex<HashMap<JobId, JobRecord>>;

fn lock(jobs: &JobTable) -> std::sync::MutexGuard<'_, HashMap<JobId, JobRecord>> {
    jobs.lock().unwrap_or_else(PoisonError::into_inner)
}

fn run_job(jobs: Arc<JobTable>, id: JobId, mut request: BatchRequest) {
    if let Some(record) = lock(&jobs).get_mut(&id) {
        record.state = JobState::Running;
        record.touch();
    }

    let outcome = std::panic::catch_unwind(AssertUnwindSafe(|| {
        run_batch(
            &request.entries,
            &request.options,
            &mut request.open_sink,
            |progress| {
                if let Some(record) = lock(&jobs).get_mut(&id) {
                    record.progress = record.progress.max(progress.min(RUNNING_PROGRESS_CAP));
                    record.touch();
                }
            },
        )
    }));

    let mut table = lock(&jobs);
    let Some(record) = table.get_mut(&id) else {
        return;
    };
    match outcome {
        Ok(Ok(report)) => {
            record.state = JobState::Done;
            record.progress = 100.0;
            record.outputs = report.outputs;
            record.failures = report.failures;
            record.touch();
            tracing::info!(
                job = %id,
                outputs = record.outputs.len(),
                failures = record.failures.len(),
                "job done"
            );
        }
        Ok(Err(e)) => {
            record.state = JobState::Error;
            record.error = Some(e.to_string());
            record.touch();
            tracing::warn!(job = %id, error = %e, "job failed");
        }
        Err(panic) => {
            let message = panic_message(panic.as_ref());
            record.state = JobState::Error;
            record.error = Some(message.clone());
            record.touch();
            tracing::error!(job = %id, error = %message, "batch worker panicked");
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "batch worker panicked".to_owned()
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "../../tests/unit/jobs/registry.rs"]
mod tests;
