//! Bounded-buffer producer/consumer pipeline for sales records
//!
//! Producers generate random sales records under a shared work budget and
//! push them through a fixed-capacity queue. Consumers drain the queue,
//! aggregating per-store and per-month totals both locally and into a shared
//! global accumulator, then report their results.

pub mod app;
pub mod domain;
pub mod engine;
pub mod io;
pub mod pipeline;
pub mod prelude;
pub mod queue;
pub mod storage;
