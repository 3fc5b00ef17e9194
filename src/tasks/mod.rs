//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Lookup sweep: Drops stale entity lookups at configured intervals

mod sweep;

pub use sweep::spawn_sweep_task;
