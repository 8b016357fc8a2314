use crate::foundation::error::ReplayResult;
use crate::ingest::map::GridMap;
use crate::timeline::frames::{AgentMark, FrameSnapshot};

/// Presentation surface the playback controller pushes to.
///
/// Call contract: `set_background` once, then `draw_goals` once, then
/// `present_frame` every time the controller enters a frame. Frames arrive
/// in playback order, wrapping back to index 0 on each loop.
pub trait ReplaySurface {
    /// Render the fixed background derived from the map's traversability
    /// grid (passable cells light, obstacles dark).
    fn set_background(&mut self, map: &GridMap) -> ReplayResult<()>;

    /// Render the static goal-marker overlay once.
    fn draw_goals(&mut self, goals: &[AgentMark]) -> ReplayResult<()>;

    /// Re-render the dynamic agent marks for the active frame.
    fn present_frame(&mut self, snapshot: &FrameSnapshot) -> ReplayResult<()>;
}

/// In-memory surface for tests and debugging.
///
/// Records every push so tests can assert on the exact sequence of frames
/// the controller emitted.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    background: Option<(usize, usize)>,
    goals: Vec<AgentMark>,
    presented: Vec<FrameSnapshot>,
}

impl RecordingSurface {
    /// Create an empty recording surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// `(height, width)` of the background map, if one was set.
    pub fn background(&self) -> Option<(usize, usize)> {
        self.background
    }

    /// Goal marks captured by `draw_goals`.
    pub fn goals(&self) -> &[AgentMark] {
        &self.goals
    }

    /// Every snapshot presented so far, in push order.
    pub fn presented(&self) -> &[FrameSnapshot] {
        &self.presented
    }
}

impl ReplaySurface for RecordingSurface {
    fn set_background(&mut self, map: &GridMap) -> ReplayResult<()> {
        self.background = Some((map.height(), map.width()));
        Ok(())
    }

    fn draw_goals(&mut self, goals: &[AgentMark]) -> ReplayResult<()> {
        self.goals = goals.to_vec();
        Ok(())
    }

    fn present_frame(&mut self, snapshot: &FrameSnapshot) -> ReplayResult<()> {
        self.presented.push(snapshot.clone());
        Ok(())
    }
}
