/// Looping background track and its mute toggle.
pub mod audio;

/// Development-only readout of the loading flags.
pub mod debug_readout;

/// Alpha bookkeeping for UI nodes that fade.
pub mod opacity;
