//! Shared foundation types and the crate-wide error taxonomy.

/// Small copy types used across the crate (ids, positions, colors).
pub mod core;
/// `ReplayError` / `ReplayResult`.
pub mod error;
