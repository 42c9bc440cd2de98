//! Persisted accent colour and the background it drives.

pub mod background;
pub mod state;
pub mod storage;
