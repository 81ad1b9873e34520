//! Async driver: one tokio task per session.
//!
//! The task owns the session's tick cadence.  While paused it waits only
//! for commands; while running it waits for whichever comes first, the next
//! command or the next tick deadline.  Commands are applied between ticks,
//! never during one, and a tick never overlaps another tick of the same
//! world.
//!
//! Ticks and commands run on tokio's blocking pool: a tick may spend the
//! sandbox's full call budget on every custom agent, and the runtime's
//! worker threads are shared with every other session.
//!
//! ```text
//!  client ──send(cmd)──▶ mpsc ──▶ ┌──────────────┐ ──oneshot──▶ CommandReply
//!                                 │  drive loop  │
//!  timer ──tick deadline────────▶ └──────────────┘ ──watch────▶ WorldSnapshot
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

use gs_sim::{Command, CommandReply, Sim, TickOutcome, WorldSnapshot};

use crate::{SessionError, SessionId, SessionResult, SharedSim, lock_sim};

/// Pending commands per session before `send` waits.
const COMMAND_QUEUE: usize = 64;

enum Request {
    Apply(Command, oneshot::Sender<CommandReply>),
    Shutdown,
}

/// Handle to a running session task.  Dropping it ends the task once the
/// queued commands are drained.
pub struct SessionDriver {
    id:        SessionId,
    requests:  mpsc::Sender<Request>,
    snapshots: watch::Receiver<WorldSnapshot>,
    task:      JoinHandle<()>,
}

impl SessionDriver {
    /// Start driving `sim`.  Must be called from within a tokio runtime.
    pub fn spawn(id: SessionId, sim: SharedSim) -> Self {
        let (requests, inbox) = mpsc::channel(COMMAND_QUEUE);
        let (snapshot, cadence) = {
            let s = lock_sim(&sim);
            (s.snapshot(), Cadence::of(&s))
        };
        let (publish, snapshots) = watch::channel(snapshot);
        let task = tokio::spawn(drive(id.clone(), sim, cadence, inbox, publish));
        info!(session = %id, "Session driver started");
        Self { id, requests, snapshots, task }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Apply `cmd` between ticks and wait for the reply.
    pub async fn send(&self, cmd: Command) -> SessionResult<CommandReply> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(Request::Apply(cmd, reply))
            .await
            .map_err(|_| SessionError::Closed)?;
        response.await.map_err(|_| SessionError::Closed)
    }

    /// Receiver of every state published after a command or tick.
    pub fn subscribe(&self) -> watch::Receiver<WorldSnapshot> {
        self.snapshots.clone()
    }

    /// Most recently published state.
    pub fn latest(&self) -> WorldSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Stop the task and wait for it to finish.
    pub async fn shutdown(self) {
        let _ = self.requests.send(Request::Shutdown).await;
        let _ = self.task.await;
        info!(session = %self.id, "Session driver stopped");
    }
}

/// Whether the world wants ticks, and how often.
#[derive(Clone, Copy)]
struct Cadence {
    running:  bool,
    interval: Duration,
}

impl Cadence {
    fn of(sim: &Sim) -> Self {
        Self {
            running:  sim.is_running(),
            interval: Duration::from_millis(sim.config.tick_interval_ms.max(1)),
        }
    }
}

async fn drive(
    id:          SessionId,
    sim:         SharedSim,
    mut cadence: Cadence,
    mut inbox:   mpsc::Receiver<Request>,
    publish:     watch::Sender<WorldSnapshot>,
) {
    let mut next_tick: Option<Instant> = None;

    loop {
        if !cadence.running {
            next_tick = None;
        } else if next_tick.is_none() {
            next_tick = Some(Instant::now() + cadence.interval);
        }

        let request = match next_tick {
            Some(deadline) => tokio::select! {
                request = inbox.recv() => request,
                _ = sleep_until(deadline) => {
                    let tick = on_blocking_pool(&sim, |s| {
                        let halted = match s.step() {
                            TickOutcome::Halted(reason) => Some(reason),
                            TickOutcome::Advanced(_) => None,
                        };
                        (halted, s.snapshot(), Cadence::of(s))
                    });
                    if let Some((halted, snapshot, now)) = tick.await {
                        if let Some(reason) = halted {
                            debug!(session = %id, %reason, "Run halted");
                        }
                        publish.send_replace(snapshot);
                        cadence = now;
                    }
                    next_tick = Some(deadline + cadence.interval);
                    continue;
                }
            },
            None => inbox.recv().await,
        };

        match request {
            Some(Request::Apply(cmd, reply)) => {
                let applied = on_blocking_pool(&sim, move |s| (s.apply(cmd), Cadence::of(s))).await;
                // On failure `reply` is dropped and the caller sees `Closed`.
                let Some((response, now)) = applied else { continue };
                cadence = now;
                publish.send_replace(response.state.clone());
                // The caller may have given up waiting; the command still applied.
                let _ = reply.send(response);
            }
            Some(Request::Shutdown) | None => break,
        }
    }
    debug!(session = %id, "Session task exiting");
}

/// Run `work` against the locked world on the blocking pool.  `None` if it
/// panicked; the world stays usable because [`lock_sim`] ignores poisoning.
async fn on_blocking_pool<T, F>(sim: &SharedSim, work: F) -> Option<T>
where
    T: Send + 'static,
    F: FnOnce(&mut Sim) -> T + Send + 'static,
{
    let sim = Arc::clone(sim);
    let task = tokio::task::spawn_blocking(move || {
        let mut guard = lock_sim(&sim);
        work(&mut *guard)
    });
    match task.await {
        Ok(out) => Some(out),
        Err(err) => {
            warn!(%err, "Session work failed");
            None
        }
    }
}
