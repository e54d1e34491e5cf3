//! Controller layer: listing state machine, worker events, and command
//! dispatch.

pub mod events;
pub mod orchestration;
pub mod reducer;
