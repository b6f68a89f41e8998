//! LaserTarget firmware library.
//!
//! Exposes the game core, the Port Access Layer and the adapters for
//! integration testing.  All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod fsm;
pub mod pins;
pub mod targets;

pub mod adapters;
pub mod drivers;
