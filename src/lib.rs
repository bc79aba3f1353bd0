//! # AURA Rust Backend
//!
//! Carbon-aware scheduling engine for next-day electricity demand.
//!
//! This crate provides a Rust-based backend for the AURA energy optimization
//! system. It forecasts the next 24 hours of grid demand, derives per-hour
//! carbon intensity against a seasonal renewable baseline, classifies hours
//! into green (low-carbon) and dirty (high-carbon) windows, and selects the
//! best windows for running flexible household loads. The backend exposes a
//! REST API via Axum for the React frontend.
//!
//! ## Features
//!
//! - **Forecast Assembly**: 24-hour demand forecast anchored at the last
//!   observed load, with a persistence fallback when the model is unusable
//! - **Carbon Accounting**: per-hour fossil-fuel share and carbon intensity
//!   (gCO2/kWh) from the seasonal renewable baseload
//! - **Window Classification**: green/dirty labelling against the current
//!   month's baseline threshold
//! - **Window Selection**: longest contiguous green run, range-constrained
//!   optimization, and least-carbon fallbacks
//! - **Appliance Scheduling**: batch validation of proposed placements with
//!   per-item accept/reject semantics and CO2 savings estimates
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Data Transfer Objects (DTOs) for API responses
//! - [`models`]: Core domain types (forecast records, baseline table, time)
//! - [`sources`]: Data source abstraction and swappable backends
//! - [`services`]: Business logic (carbon math, classification, selection)
//! - [`routes`]: Route-specific response types and assembly logic
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod api;

pub mod models;
pub mod sources;

pub mod routes;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
