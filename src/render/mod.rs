//! Rendering collaborators.
//!
//! The playback core only knows the [`surface::ReplaySurface`] trait; the
//! raster implementation here turns pushes into RGBA images.

/// PNG/RGBA raster surface.
pub mod raster;
/// Surface trait and the in-memory test surface.
pub mod surface;
