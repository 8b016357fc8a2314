//! Log and map ingestion.
//!
//! Both parsers read a complete, static resource once; any failure here is
//! fatal and nothing downstream of ingestion is constructed.

/// Color-assignment strategies for newly recorded agents.
pub mod color;
/// Trajectory log parser.
pub mod log;
/// Grid map parser.
pub mod map;
