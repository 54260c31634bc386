//! The sync engine: channel registry, pass orchestration, and scheduling.
//!
//! A pass walks the registry in order, resolving each channel to its stable
//! ID, fetching eligible uploads, and upserting them into the video cache.
//! Failures are absorbed per channel and per record; a pass never errors.
//! The scheduler fires a pass on startup and on a fixed interval, and
//! exposes a manual trigger that may run concurrently with the timer.

pub mod registry;
pub mod report;
pub mod scheduler;
pub mod service;

pub use {
    registry::ChannelRegistry,
    report::{ChannelReport, ChannelStatus, PassSummary},
    scheduler::SyncScheduler,
    service::SyncService,
};
