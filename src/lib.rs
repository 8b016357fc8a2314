//! mapf-replay replays multi-agent path-finding solutions frame by frame.
//!
//! Given a trajectory log (per-agent position sequences plus a `Map:`
//! reference) and the grid map it was planned against, the crate:
//!
//! - ingests both text formats into an immutable [`SolutionLog`] and
//!   [`GridMap`]
//! - reprojects the per-agent sequences onto a common frame
//!   [`Timeline`]
//! - drives a looping, pull-based [`PlaybackController`] that pushes one
//!   frame snapshot per `advance()` to a [`ReplaySurface`]
//!
//! The surface is the only rendering seam; the bundled
//! [`render::raster::RasterSurface`] turns pushes into PNG-encodable RGBA
//! images, and tests use the in-memory recording surface instead.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Shared foundation types and errors.
pub mod foundation;
/// Log/map ingestion.
pub mod ingest;
/// Playback state machine.
pub mod playback;
/// Rendering collaborators.
pub mod render;
/// Session front door.
pub mod session;
/// Frame timeline assembly.
pub mod timeline;

pub use crate::foundation::core::{AgentId, FrameIndex, GridPos, Rgb};
pub use crate::foundation::error::{ReplayError, ReplayResult};
pub use crate::ingest::color::{ColorAssigner, HashedHue, PaletteCycle};
pub use crate::ingest::log::{Agent, SolutionLog};
pub use crate::ingest::map::GridMap;
pub use crate::playback::controller::{PlaybackController, PlaybackState};
pub use crate::render::surface::{RecordingSurface, ReplaySurface};
pub use crate::session::ReplaySession;
pub use crate::timeline::frames::{AgentMark, FrameSnapshot, Timeline};
