//! Route-specific response types and assembly logic.
//!
//! Each submodule owns the payload types for one endpoint family and the
//! pure functions that assemble them from service results. The HTTP layer
//! only validates requests, runs the services, and serializes these types;
//! their field names are the external contract and must not drift.

pub mod compute;
pub mod green_windows;
pub mod helpers;
pub mod optimize;
pub mod predict;
pub mod ranges;
pub mod schedule;
