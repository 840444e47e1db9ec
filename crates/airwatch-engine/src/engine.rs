//! The tick scheduler and engine actor.
//!
//! One task owns the registry and runs the advance → detect → publish
//! pipeline serially, so aircraft state is never touched from two places at
//! once. Feed updates, subscriptions and shutdown arrive as commands on an
//! mpsc channel and are applied between ticks, never mid-detection.

use std::sync::Arc;
use std::time::Duration;

use airwatch_domain::{Aircraft, Snapshot};
use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::broadcast::{Broadcaster, Subscription};
use crate::config::EngineConfig;
use crate::detector;
use crate::error::{EngineError, EngineResult};
use crate::motion;
use crate::registry::Registry;

/// Command queue depth between feed callers and the engine task.
const COMMAND_BUFFER: usize = 256;

enum Command {
    Upsert(Aircraft),
    Remove {
        callsign: String,
        reply: oneshot::Sender<bool>,
    },
    Subscribe {
        reply: oneshot::Sender<Subscription>,
    },
    Unsubscribe(Uuid),
    Stop,
}

/// Clonable front door to a running engine.
///
/// All methods go through the engine's command queue; none of them can
/// observe a half-updated registry.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<Command>,
}

impl EngineHandle {
    /// Submit an aircraft report. Malformed reports are refused here and
    /// never reach the tick pipeline.
    pub async fn upsert(&self, aircraft: Aircraft) -> EngineResult<()> {
        aircraft.validate()?;
        self.cmd_tx
            .send(Command::Upsert(aircraft))
            .await
            .map_err(|_| EngineError::Stopped)
    }

    /// Remove a callsign from coverage. Returns whether it was tracked.
    pub async fn remove(&self, callsign: &str) -> EngineResult<bool> {
        let (reply, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Remove {
                callsign: callsign.to_string(),
                reply,
            })
            .await
            .map_err(|_| EngineError::Stopped)?;
        rx.await.map_err(|_| EngineError::Stopped)
    }

    /// Register a new viewer; it receives every snapshot from the next
    /// tick on.
    pub async fn subscribe(&self) -> EngineResult<Subscription> {
        let (reply, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Subscribe { reply })
            .await
            .map_err(|_| EngineError::Stopped)?;
        rx.await.map_err(|_| EngineError::Stopped)
    }

    /// Release a viewer's slot eagerly instead of waiting for the
    /// broadcaster to notice the dropped receiver. Idempotent, and a no-op
    /// on a stopped engine.
    pub async fn unsubscribe(&self, id: Uuid) {
        let _ = self.cmd_tx.send(Command::Unsubscribe(id)).await;
    }

    /// Stop the engine. No further snapshots are produced; in-flight
    /// deliveries drain normally. Idempotent.
    pub async fn stop(&self) {
        let _ = self.cmd_tx.send(Command::Stop).await;
    }
}

/// The surveillance engine: registry + tick scheduler + broadcaster, as one
/// explicit instance. Tests run several of these side by side.
pub struct Engine {
    config: EngineConfig,
    registry: Registry,
    broadcaster: Broadcaster,
    cmd_tx: Option<mpsc::Sender<Command>>,
    cmd_rx: Option<mpsc::Receiver<Command>>,
}

impl Engine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_BUFFER);
        let broadcaster = Broadcaster::new(config.subscriber_buffer);
        Self {
            config,
            registry: Registry::new(),
            broadcaster,
            cmd_tx: Some(cmd_tx),
            cmd_rx: Some(cmd_rx),
        }
    }

    /// Create a handle for feeds and viewers. Must be called before
    /// [`run`](Engine::run) consumes the engine.
    ///
    /// # Panics
    ///
    /// Panics if called after the engine started running.
    #[must_use]
    pub fn handle(&self) -> EngineHandle {
        EngineHandle {
            cmd_tx: self
                .cmd_tx
                .clone()
                .expect("engine handle requested after start"),
        }
    }

    /// Convenience: build an engine, spawn its task, return the handle.
    #[must_use]
    pub fn spawn(config: EngineConfig) -> EngineHandle {
        let engine = Self::new(config);
        let handle = engine.handle();
        tokio::spawn(engine.run());
        handle
    }

    /// Drive the periodic loop until [`EngineHandle::stop`] is called or
    /// every handle is gone.
    pub async fn run(mut self) {
        let mut cmd_rx = self.cmd_rx.take().expect("engine runs only once");
        // Only external handles keep the command channel open.
        drop(self.cmd_tx.take());

        info!(
            tick_period_ms = self.config.tick_period.as_millis() as u64,
            horizontal_nm = self.config.horizontal_threshold_nm,
            vertical_ft = self.config.vertical_threshold_ft,
            coverage_radius_km = self.config.coverage_radius_km,
            "engine running"
        );

        let mut ticker = time::interval(self.config.tick_period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;
        let mut last_tick = Instant::now();

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let now = Instant::now();
                    let dt = now.duration_since(last_tick);
                    last_tick = now;
                    self.tick(dt);
                }
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(cmd) => {
                            if !self.apply(cmd) {
                                break;
                            }
                        }
                        None => break,
                    }
                }
            }
        }

        info!("engine stopped");
    }

    /// One tick: advance all aircraft by the *measured* elapsed time (so
    /// scheduling jitter does not accumulate into position drift), detect
    /// conflicts, publish the assembled snapshot.
    fn tick(&mut self, dt: Duration) {
        for plane in self.registry.all_mut() {
            if let Err(err) = motion::advance(plane, dt) {
                warn!(callsign = %plane.callsign, %err, "motion step failed, holding last position");
            }
        }

        let alerts = detector::detect(
            self.registry.all(),
            self.config.horizontal_threshold_nm,
            self.config.vertical_threshold_ft,
        );
        if !alerts.is_empty() {
            debug!(alerts = alerts.len(), planes = self.registry.len(), "separation conflicts present");
        }

        let snapshot = Arc::new(Snapshot {
            planes: self.registry.all().to_vec(),
            alerts,
        });
        self.broadcaster.publish(&snapshot);
    }

    /// Apply one queued command. Returns false when the engine should stop.
    fn apply(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Upsert(aircraft) => {
                // Handles validate before queueing; a refusal here means a
                // caller bypassed the handle.
                if let Err(err) = self.registry.upsert(aircraft) {
                    warn!(%err, "refused aircraft report");
                }
            }
            Command::Remove { callsign, reply } => {
                let known = self.registry.remove(&callsign);
                if known {
                    debug!(%callsign, "aircraft left coverage");
                }
                let _ = reply.send(known);
            }
            Command::Subscribe { reply } => {
                let subscription = self.broadcaster.subscribe();
                if let Err(sub) = reply.send(subscription) {
                    // Viewer vanished before the reply; free its slot now.
                    self.broadcaster.unsubscribe(sub.id());
                }
            }
            Command::Unsubscribe(id) => self.broadcaster.unsubscribe(id),
            Command::Stop => return false,
        }
        true
    }
}
