//! Parallel runtime seam: rank identity, barriers and abort.
//!
//! Setup runs identically on every rank. Each rank reads the same
//! configuration and computes a bit-identical record, so nothing is
//! communicated; ranks only rendezvous after each phase. A rank that fails
//! aborts the group, which releases every peer waiting at a barrier with
//! [`SprayError::Aborted`] instead of leaving it blocked.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use tracing::{trace, warn};

use crate::error::{SprayError, SprayResult};

/// Rank identity and synchronization for one participant.
pub trait ParallelContext: Send + Sync {
    fn rank(&self) -> usize;

    fn size(&self) -> usize;

    /// The single participant allowed to report.
    fn is_io_rank(&self) -> bool {
        self.rank() == 0
    }

    /// Block until every participant arrives, or fail once the group aborted.
    fn barrier(&self) -> SprayResult<()>;

    /// Mark the group failed and release every participant blocked at a barrier.
    fn abort(&self);
}

/// One-rank context; barriers return immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialContext;

impl ParallelContext for SerialContext {
    fn rank(&self) -> usize {
        0
    }

    fn size(&self) -> usize {
        1
    }

    fn barrier(&self) -> SprayResult<()> {
        Ok(())
    }

    fn abort(&self) {}
}

#[derive(Debug, Default)]
struct BarrierState {
    arrived: usize,
    generation: u64,
    aborted: bool,
}

/// Reusable barrier that can be torn down by any participant.
#[derive(Debug)]
struct AbortableBarrier {
    size: usize,
    state: Mutex<BarrierState>,
    released: Condvar,
}

impl AbortableBarrier {
    fn new(size: usize) -> Self {
        Self {
            size,
            state: Mutex::new(BarrierState::default()),
            released: Condvar::new(),
        }
    }

    // A panicking rank aborts before unwinding, so a poisoned lock still
    // holds a consistent state.
    fn lock(&self) -> MutexGuard<'_, BarrierState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn wait(&self) -> SprayResult<()> {
        let mut state = self.lock();
        if state.aborted {
            return Err(SprayError::Aborted);
        }
        state.arrived += 1;
        if state.arrived == self.size {
            state.arrived = 0;
            state.generation += 1;
            self.released.notify_all();
            return Ok(());
        }
        let generation = state.generation;
        while state.generation == generation && !state.aborted {
            state = self
                .released
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        if state.generation == generation {
            return Err(SprayError::Aborted);
        }
        Ok(())
    }

    fn abort(&self) {
        let mut state = self.lock();
        state.aborted = true;
        self.released.notify_all();
    }
}

/// Aborts the group if the rank's closure unwinds.
struct AbortOnPanic<'a>(&'a AbortableBarrier);

impl Drop for AbortOnPanic<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.abort();
        }
    }
}

/// In-process group of ranks, one thread each, sharing a barrier.
#[derive(Debug, Clone, Copy)]
pub struct LocalGroup {
    size: usize,
}

impl LocalGroup {
    /// A group of `size` ranks; zero is treated as one.
    pub fn new(size: usize) -> Self {
        Self { size: size.max(1) }
    }

    /// Run `f` on every rank concurrently; results come back in rank order.
    ///
    /// A panic on any rank aborts the group and is re-raised here once every
    /// rank has finished.
    pub fn run<R, Func>(&self, f: Func) -> Vec<R>
    where
        R: Send,
        Func: Fn(&LocalRank<'_>) -> R + Sync,
    {
        let barrier = AbortableBarrier::new(self.size);
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..self.size)
                .map(|rank| {
                    let ctx = LocalRank {
                        rank,
                        size: self.size,
                        barrier: &barrier,
                    };
                    let f = &f;
                    scope.spawn(move || {
                        let _guard = AbortOnPanic(ctx.barrier);
                        f(&ctx)
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| match h.join() {
                    Ok(r) => r,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        })
    }
}

/// Context handed to each rank of a [`LocalGroup`].
#[derive(Debug)]
pub struct LocalRank<'a> {
    rank: usize,
    size: usize,
    barrier: &'a AbortableBarrier,
}

impl ParallelContext for LocalRank<'_> {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    fn barrier(&self) -> SprayResult<()> {
        trace!(rank = self.rank, "waiting at barrier");
        self.barrier.wait()
    }

    fn abort(&self) {
        warn!(rank = self.rank, "aborting spray setup group");
        self.barrier.abort();
    }
}
