use crate::foundation::core::FrameIndex;
use crate::foundation::error::ReplayResult;
use crate::render::surface::ReplaySurface;
use crate::timeline::frames::Timeline;

/// Where playback currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    /// Before the first frame has been shown.
    Idle,
    /// Frame `t` is the one most recently pushed to the surface.
    Playing(FrameIndex),
    /// Terminal state, reached only when the timeline is empty.
    Finished,
}

/// Looping playback over an assembled [`Timeline`].
///
/// The controller is pull-driven: an external loop (a render timer, a test)
/// calls [`PlaybackController::advance`] at whatever cadence it likes, and
/// each call pushes exactly one frame snapshot to the surface. Stopping is
/// simply ceasing to call `advance` — there is nothing to clean up.
#[derive(Debug)]
pub struct PlaybackController<'t> {
    timeline: &'t Timeline,
    state: PlaybackState,
}

impl<'t> PlaybackController<'t> {
    /// Create a controller positioned before the first frame.
    ///
    /// An empty timeline starts (and stays) in `Finished`.
    pub fn new(timeline: &'t Timeline) -> Self {
        let state = if timeline.is_empty() {
            PlaybackState::Finished
        } else {
            PlaybackState::Idle
        };
        Self { timeline, state }
    }

    /// Current playback state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Step to the next frame and push its snapshot to `surface`.
    ///
    /// `Idle` enters `Playing(0)`; `Playing(t)` wraps to
    /// `Playing((t + 1) % len)`, so playback loops indefinitely. In
    /// `Finished` this is a no-op. The push is the controller's only side
    /// effect, and any error it returns comes from the surface.
    pub fn advance(&mut self, surface: &mut dyn ReplaySurface) -> ReplayResult<()> {
        let next = match self.state {
            PlaybackState::Finished => return Ok(()),
            PlaybackState::Idle => FrameIndex(0),
            PlaybackState::Playing(t) => FrameIndex((t.0 + 1) % self.timeline.len()),
        };
        surface.present_frame(self.timeline.frame(next))?;
        self.state = PlaybackState::Playing(next);
        Ok(())
    }

    /// Run `count` consecutive `advance` steps.
    ///
    /// Convenience for offline playback (e.g. rendering one full loop of
    /// frames to disk).
    pub fn run(&mut self, count: usize, surface: &mut dyn ReplaySurface) -> ReplayResult<()> {
        for _ in 0..count {
            self.advance(surface)?;
        }
        Ok(())
    }
}
