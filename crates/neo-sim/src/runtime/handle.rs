//! Runtime Handle
//!
//! A handle to communicate with a running device.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use tokio::sync::{mpsc, oneshot};

use crate::physics::BuildingState;
use crate::points::{Point, PointId, PointValue};
use crate::types::{Error, Result, RuntimeState};

// ─────────────────────────────────────────────────────────────────────────────
// Tick Report
// ─────────────────────────────────────────────────────────────────────────────

/// Outcome of one tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Tick number, starting at 1
    pub tick: u64,
    /// Status line after the tick
    pub status: String,
    /// Set when the update or sync failed
    pub error: Option<String>,
}

impl TickReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Runtime Command
// ─────────────────────────────────────────────────────────────────────────────

/// Commands that can be sent to a running device
pub enum RuntimeCommand {
    /// Write a commandable point; applied to the state at the next sync
    WritePoint {
        id: PointId,
        value: PointValue,
        reply: oneshot::Sender<Result<()>>,
    },

    /// Snapshot of all points, in order
    Points(oneshot::Sender<Vec<Point>>),

    /// Snapshot of the building state
    Building(oneshot::Sender<BuildingState>),

    /// Run one tick now
    Tick(oneshot::Sender<TickReport>),

    /// Stop the loop
    Shutdown,
}

// ─────────────────────────────────────────────────────────────────────────────
// Runtime Handle
// ─────────────────────────────────────────────────────────────────────────────

/// Handle to a running device
///
/// Cloneable; every clone talks to the same loop. The loop owns the building
/// state and the points, so requests from any number of handles are applied
/// one at a time between ticks.
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<RuntimeCommand>,
    state: Arc<AtomicU8>,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<RuntimeCommand>, state: Arc<AtomicU8>) -> Self {
        Self { command_tx, state }
    }

    /// Current lifecycle state
    pub fn state(&self) -> RuntimeState {
        RuntimeState::from_u8(self.state.load(Ordering::SeqCst))
    }

    pub fn is_running(&self) -> bool {
        self.state() == RuntimeState::Running
    }

    /// Write a commandable point
    pub async fn write(&self, id: PointId, value: PointValue) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.send(RuntimeCommand::WritePoint {
            id,
            value,
            reply: tx,
        })
        .await?;
        rx.await.map_err(|_| Self::closed())?
    }

    /// Ordered point snapshot
    pub async fn points(&self) -> Result<Vec<Point>> {
        let (tx, rx) = oneshot::channel();
        self.send(RuntimeCommand::Points(tx)).await?;
        rx.await.map_err(|_| Self::closed())
    }

    /// Building state snapshot
    pub async fn building(&self) -> Result<BuildingState> {
        let (tx, rx) = oneshot::channel();
        self.send(RuntimeCommand::Building(tx)).await?;
        rx.await.map_err(|_| Self::closed())
    }

    /// Trigger a tick outside the timer
    pub async fn tick(&self) -> Result<TickReport> {
        let (tx, rx) = oneshot::channel();
        self.send(RuntimeCommand::Tick(tx)).await?;
        rx.await.map_err(|_| Self::closed())
    }

    /// Request the loop to stop
    pub async fn shutdown(&self) -> Result<()> {
        self.send(RuntimeCommand::Shutdown).await
    }

    async fn send(&self, cmd: RuntimeCommand) -> Result<()> {
        self.command_tx.send(cmd).await.map_err(|_| Self::closed())
    }

    fn closed() -> Error {
        Error::Runtime("device runtime is not running".to_string())
    }
}

impl std::fmt::Debug for RuntimeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeHandle")
            .field("state", &self.state())
            .finish()
    }
}
