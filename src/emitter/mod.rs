//! Bridge from store change broadcasts to `event_emitter_rs`.
//!
//! Enabled by the `emitter` feature.

mod bridge;

pub use bridge::{EmitterBridge, STORE_CHANGED};
