//! Neo Sim - Simulated Building Equipment
//!
//! This crate simulates the HVAC and electrical equipment of one office
//! building and exposes each device as a set of points, including:
//! - A first-order physics model driven by coupled control loops
//! - Equipment profiles mapping state onto ordered point lists
//! - A device runtime that ticks the model and serves point writes

// Shared error and state types
pub mod types;

// Settings and equipment selection
pub mod config;

// Building physics and control loops
pub mod physics;

// Point model
pub mod points;

// Equipment profiles
pub mod profile;

// Device runtime
pub mod runtime;

pub use config::{Equipment, SimConfig};
pub use types::{Error, Result, RuntimeState};
