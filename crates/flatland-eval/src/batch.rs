//! Parallel evaluation of a population of policies.
//!
//! [`evaluate_batch`] fans jobs out over a scoped worker pool fed by a
//! crossbeam channel and collects results back in input order. All
//! workers share one cancel token: cancelling it drains the remaining
//! jobs as [`EvalError::Cancelled`] without tearing the pool down
//! mid-episode.

use flatland_core::{EvalError, Policy};
use flatland_world::Mode;

use crate::context::{CancelToken, EvalContext};
use crate::driver::{evaluate, Evaluation};

/// One unit of batch work: an agent identity and its policy.
pub struct BatchJob<P> {
    /// Agent identifier, keyed into the layout in benchmark mode.
    pub agent_id: String,
    /// The policy under evaluation.
    pub policy: P,
}

impl<P> BatchJob<P> {
    /// Pair an agent id with its policy.
    pub fn new(agent_id: impl Into<String>, policy: P) -> Self {
        Self {
            agent_id: agent_id.into(),
            policy,
        }
    }
}

/// Worker-pool sizing and shared cancellation for one batch.
#[derive(Clone, Debug, Default)]
pub struct BatchOptions {
    /// Number of worker threads. `None` = auto-detect
    /// (`available_parallelism / 2`, clamped to `[2, 16]`).
    pub workers: Option<usize>,
    /// Token shared by every evaluation in the batch.
    pub cancel: CancelToken,
}

impl BatchOptions {
    /// Resolve the actual worker count, applying auto-detection if
    /// `None`.
    ///
    /// Explicit values are clamped to `[1, 64]`. Zero workers would
    /// deadlock the batch.
    pub fn resolved_worker_count(&self) -> usize {
        match self.workers {
            Some(n) => n.clamp(1, 64),
            None => {
                let cpus = std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(4);
                (cpus / 2).clamp(2, 16)
            }
        }
    }
}

/// Evaluate every job in `jobs` under `mode`, in parallel.
///
/// Results come back in the same order as the input regardless of
/// which worker finished first. Each job fails or succeeds
/// independently; one policy's error never poisons its neighbours.
pub fn evaluate_batch<P>(
    mode: Mode,
    jobs: Vec<BatchJob<P>>,
    options: &BatchOptions,
) -> Vec<Result<Evaluation, EvalError>>
where
    P: Policy + Send,
{
    let total = jobs.len();
    if total == 0 {
        return Vec::new();
    }
    let workers = options.resolved_worker_count().min(total);

    let (job_tx, job_rx) = crossbeam_channel::bounded::<(usize, BatchJob<P>)>(total);
    let (result_tx, result_rx) =
        crossbeam_channel::bounded::<(usize, Result<Evaluation, EvalError>)>(total);
    for (index, job) in jobs.into_iter().enumerate() {
        // capacity == total, cannot block
        let _ = job_tx.send((index, job));
    }
    drop(job_tx);

    std::thread::scope(|scope| {
        for _ in 0..workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            let cancel = options.cancel.clone();
            scope.spawn(move || {
                while let Ok((index, mut job)) = job_rx.recv() {
                    let ctx = EvalContext::new(job.agent_id).with_cancel(cancel.clone());
                    let result = evaluate(mode, &ctx, &mut job.policy);
                    if result_tx.send((index, result)).is_err() {
                        break;
                    }
                }
            });
        }
    });
    drop(result_tx);

    let mut slots: Vec<Option<Result<Evaluation, EvalError>>> =
        (0..total).map(|_| None).collect();
    while let Ok((index, result)) = result_rx.recv() {
        slots[index] = Some(result);
    }
    slots
        .into_iter()
        .map(|slot| slot.unwrap_or(Err(EvalError::Cancelled)))
        .collect()
}
