//! Frame timeline assembly.

/// Per-frame snapshot list built from the agent mapping.
pub mod frames;
