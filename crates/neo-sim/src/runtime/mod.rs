//! Device Runtime
//!
//! Binds one equipment profile and its points to a periodic tick.
//!
//! # Lifecycle
//!
//! - `Initializing`: [`DeviceRuntime::new`] builds the building state, selects
//!   the profile and creates the points. An unknown selector fails here.
//! - `Running`: the loop started by [`DeviceRuntime::spawn`] ticks
//!   (update, sync, status) and serves [`RuntimeCommand`]s in between.
//! - `Stopped`: after a shutdown request or once every handle is dropped.

mod handle;
mod sink;

pub use handle::{RuntimeCommand, RuntimeHandle, TickReport};
pub use sink::{MemorySink, SinkRecord, StatusSink, TracingSink};

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::config::{Equipment, SimConfig};
use crate::physics::{BuildingState, Clock, Noise, SystemClock};
use crate::points::{PointRegistrar, PointTable};
use crate::profile::{self, EquipmentProfile};
use crate::types::{Result, RuntimeState};

/// One simulated device: building model, profile and points
pub struct DeviceRuntime {
    equipment: Equipment,
    profile: Box<dyn EquipmentProfile>,
    building: BuildingState,
    points: PointTable,
    noise: Noise,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn StatusSink>,
    /// Physics step per tick
    interval: Duration,
    /// Timer period; `None` ticks only on request
    tick_interval: Option<Duration>,
    ticks: u64,
    state: Arc<AtomicU8>,
}

impl DeviceRuntime {
    /// Initialize a device from config.
    ///
    /// Fails before any point exists if the selector or interval is invalid.
    pub fn new(config: &SimConfig, sink: Arc<dyn StatusSink>) -> Result<Self> {
        let equipment = config.equipment()?;
        let interval = config.interval()?;
        let profile = profile::for_equipment(equipment)?;

        let building = BuildingState::new();
        let points = profile.create_points(&building);

        Ok(Self {
            equipment,
            profile,
            building,
            points,
            noise: config.make_noise(),
            clock: Arc::new(SystemClock),
            sink,
            interval,
            tick_interval: Some(interval),
            ticks: 0,
            state: Arc::new(AtomicU8::new(RuntimeState::Initializing as u8)),
        })
    }

    /// Replace the wall clock used by the occupancy and weather loops
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the noise source
    pub fn with_noise(mut self, noise: Noise) -> Self {
        self.noise = noise;
        self
    }

    /// Disable the timer; ticks then only run through [`RuntimeHandle::tick`]
    pub fn manual_ticks(mut self) -> Self {
        self.tick_interval = None;
        self
    }

    pub fn equipment(&self) -> Equipment {
        self.equipment
    }

    pub fn state(&self) -> RuntimeState {
        RuntimeState::from_u8(self.state.load(Ordering::SeqCst))
    }

    pub fn building(&self) -> &BuildingState {
        &self.building
    }

    pub fn points(&self) -> &PointTable {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut PointTable {
        &mut self.points
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Announce every point to the exposure service
    pub fn register_points(&self, registrar: &mut dyn PointRegistrar) -> Result<()> {
        self.points.register_all(registrar)
    }

    /// Run one tick: physics update, point sync, status.
    ///
    /// A failure is reported to the sink and in the returned report; whatever
    /// the tick changed before failing is kept.
    pub fn tick(&mut self) -> TickReport {
        self.ticks += 1;
        let now = self.clock.now();
        let dt = self.interval.as_secs_f64();

        let result = self
            .building
            .update(now, dt, &mut self.noise)
            .and_then(|()| {
                self.profile
                    .sync(&mut self.building, &mut self.points, &mut self.noise)
            });

        let status = self.profile.status(&self.building);
        let error = match result {
            Ok(()) => {
                self.sink.status(self.equipment, self.ticks, &status);
                None
            }
            Err(e) => {
                let message = e.to_string();
                self.sink.tick_failed(self.equipment, self.ticks, &message);
                Some(message)
            }
        };

        TickReport {
            tick: self.ticks,
            status,
            error,
        }
    }

    /// Move the runtime into its own task
    pub fn spawn(self) -> (RuntimeHandle, JoinHandle<()>) {
        let (command_tx, command_rx) = mpsc::channel(256);
        let handle = RuntimeHandle::new(command_tx, Arc::clone(&self.state));
        let join_handle = tokio::spawn(self.run(command_rx));
        (handle, join_handle)
    }

    /// Main device loop
    async fn run(mut self, mut command_rx: mpsc::Receiver<RuntimeCommand>) {
        self.state
            .store(RuntimeState::Running as u8, Ordering::SeqCst);
        tracing::info!(
            equipment = %self.equipment,
            points = self.points.len(),
            "Device running"
        );

        // First timer tick fires immediately
        let mut tick_timer = self.tick_interval.map(|period| {
            let mut timer = tokio::time::interval(period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            timer
        });

        loop {
            tokio::select! {
                cmd = command_rx.recv() => {
                    match cmd {
                        Some(RuntimeCommand::Shutdown) => {
                            tracing::debug!(equipment = %self.equipment, "Received shutdown command");
                            break;
                        }
                        None => {
                            tracing::debug!(equipment = %self.equipment, "All handles dropped");
                            break;
                        }
                        Some(RuntimeCommand::WritePoint { id, value, reply }) => {
                            let result = self.points.write(id, value);
                            if let Err(e) = &result {
                                tracing::warn!(equipment = %self.equipment, point = %id, error = %e, "Rejected point write");
                            }
                            let _ = reply.send(result);
                        }
                        Some(RuntimeCommand::Points(reply)) => {
                            let _ = reply.send(self.points.points().to_vec());
                        }
                        Some(RuntimeCommand::Building(reply)) => {
                            let _ = reply.send(self.building.clone());
                        }
                        Some(RuntimeCommand::Tick(reply)) => {
                            let report = self.tick();
                            let _ = reply.send(report);
                        }
                    }
                }

                _ = async {
                    if let Some(ref mut timer) = tick_timer {
                        timer.tick().await
                    } else {
                        std::future::pending::<tokio::time::Instant>().await
                    }
                } => {
                    self.tick();
                }
            }
        }

        self.state
            .store(RuntimeState::Stopped as u8, Ordering::SeqCst);
        tracing::info!(equipment = %self.equipment, ticks = self.ticks, "Device stopped");
    }
}
