//! AR point measurement: a platform-independent measurement model plus a
//! Bevy host that feeds it placement positions and renders its state.

pub mod engine;
pub mod measurement;
pub mod rpc;
pub mod tools;
