//! Main-thread dispatch for asynchronous user loads.
//!
//! The grid is owned by a single thread and is never locked. Work that
//! finishes elsewhere (a user load on a worker thread) posts a task through a
//! `Dispatcher`; the owning thread runs queued tasks against its grid with
//! `MainQueue::run_pending` or `MainQueue::run_next`.
//!
//! Selection loads are numbered by a `LoadSequence`. A load that finishes
//! after a newer one was started is dropped instead of overwriting the
//! newer selection.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, mpsc};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::grid::ScoreGrid;
use crate::store::{SharedUserStore, User, UserBackend};

/// A unit of work to run on the grid-owning thread.
pub type GridTask = Box<dyn FnOnce(&mut ScoreGrid) + Send + 'static>;

/// Sending half of the main queue. Cheap to clone and safe to move to other
/// threads.
#[derive(Clone)]
pub struct Dispatcher {
    tx: mpsc::Sender<GridTask>,
}

impl Dispatcher {
    /// Queue a task for the grid thread.
    pub fn dispatch<F>(&self, task: F) -> Result<()>
    where
        F: FnOnce(&mut ScoreGrid) + Send + 'static,
    {
        self.tx.send(Box::new(task)).map_err(|_| Error::QueueClosed)
    }
}

/// Receiving half of the main queue, held by the grid-owning thread.
pub struct MainQueue {
    rx: mpsc::Receiver<GridTask>,
}

impl MainQueue {
    pub fn new() -> (Self, Dispatcher) {
        let (tx, rx) = mpsc::channel();
        (Self { rx }, Dispatcher { tx })
    }

    /// Run every task already queued. Returns how many ran.
    pub fn run_pending(&self, grid: &mut ScoreGrid) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.rx.try_recv() {
            task(grid);
            ran += 1;
        }
        ran
    }

    /// Wait up to `timeout` for one task and run it.
    ///
    /// Returns `Ok(false)` on timeout and `Error::QueueClosed` once every
    /// dispatcher is gone and the queue is empty.
    pub fn run_next(&self, grid: &mut ScoreGrid, timeout: Duration) -> Result<bool> {
        match self.rx.recv_timeout(timeout) {
            Ok(task) => {
                task(grid);
                Ok(true)
            }
            Err(mpsc::RecvTimeoutError::Timeout) => Ok(false),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(Error::QueueClosed),
        }
    }

    /// Run queued tasks until `done` holds or `timeout` elapses.
    ///
    /// Returns whether `done` held before the deadline.
    pub fn run_until<F>(&self, grid: &mut ScoreGrid, timeout: Duration, done: F) -> Result<bool>
    where
        F: Fn() -> bool,
    {
        let deadline = Instant::now() + timeout;
        while !done() {
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() || !self.run_next(grid, left)? {
                return Ok(done());
            }
        }
        Ok(true)
    }
}

/// Numbers selection loads issued from the grid thread.
#[derive(Debug, Clone, Default)]
pub struct LoadSequence {
    inner: Arc<SequenceState>,
}

#[derive(Debug, Default)]
struct SequenceState {
    issued: AtomicU64,
    applied: AtomicU64,
}

impl LoadSequence {
    pub fn new() -> Self {
        Self::default()
    }

    fn issue(&self) -> u64 {
        self.inner.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether `id` is the newest load issued.
    pub fn is_current(&self, id: u64) -> bool {
        self.inner.issued.load(Ordering::SeqCst) == id
    }

    /// Whether load `id` (or a newer one) has reached the grid.
    pub fn is_applied(&self, id: u64) -> bool {
        self.inner.applied.load(Ordering::SeqCst) >= id
    }

    fn mark_applied(&self, id: u64) {
        self.inner.applied.fetch_max(id, Ordering::SeqCst);
    }
}

/// Load users on a worker thread and hand the result to `on_loaded` there.
///
/// `on_loaded` runs on the worker; it must go through a `Dispatcher` before
/// touching the grid.
pub fn spawn_load<B, F>(store: SharedUserStore<B>, on_loaded: F) -> JoinHandle<()>
where
    B: UserBackend + Send + 'static,
    F: FnOnce(Vec<User>) + Send + 'static,
{
    thread::spawn(move || {
        let users = match store.lock() {
            Ok(mut store) => store.load_users(),
            Err(_) => {
                warn!("User store lock poisoned, reporting no users");
                Vec::new()
            }
        };
        debug!("Load finished with {} users", users.len());
        on_loaded(users);
    })
}

/// Load users, narrow them to `names` (every loaded user when empty), and
/// assign the result to the grid's name cells on the grid thread.
///
/// Returns the load's number in `sequence`. The assignment is skipped if a
/// newer load was issued before this one reached the grid.
pub fn load_then_assign<B>(
    store: SharedUserStore<B>,
    names: Vec<String>,
    dispatcher: Dispatcher,
    sequence: &LoadSequence,
) -> u64
where
    B: UserBackend + Send + 'static,
{
    let id = sequence.issue();
    let sequence = sequence.clone();
    let selection_store = store.clone();
    spawn_load(store, move |users| {
        let selected = if names.is_empty() {
            users
        } else {
            match selection_store.lock() {
                Ok(mut store) => store.select_users(&names),
                Err(_) => {
                    warn!("User store lock poisoned, skipping selection");
                    Vec::new()
                }
            }
        };
        let assign = move |grid: &mut ScoreGrid| {
            if sequence.is_current(id) {
                grid.assign_users(&selected);
                sequence.mark_applied(id);
            } else {
                debug!("Dropping selection load {}, a newer one was started", id);
            }
        };
        if dispatcher.dispatch(assign).is_err() {
            warn!("Main queue closed before users could be assigned");
        }
    });
    id
}
