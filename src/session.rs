use crate::foundation::error::ReplayResult;
use crate::ingest::color::{ColorAssigner, PaletteCycle};
use crate::ingest::log::SolutionLog;
use crate::ingest::map::GridMap;
use crate::playback::controller::PlaybackController;
use crate::timeline::frames::Timeline;
use std::path::Path;

/// A fully ingested replay: map, solution log, and assembled timeline.
///
/// `load` front-loads every fallible step — log parse, map resolution, map
/// parse, timeline assembly — so a constructed session can play back without
/// further errors. The map file name comes from the log's `Map:` directive
/// and is resolved relative to the log file's directory.
#[derive(Debug, Clone)]
pub struct ReplaySession {
    map: GridMap,
    log: SolutionLog,
    timeline: Timeline,
}

impl ReplaySession {
    /// Load a session with the default deterministic palette colors.
    pub fn load(log_path: &Path) -> ReplayResult<Self> {
        Self::load_with_colors(log_path, &mut PaletteCycle::new())
    }

    /// Load a session using `colors` for agent color assignment.
    #[tracing::instrument(skip(colors))]
    pub fn load_with_colors(
        log_path: &Path,
        colors: &mut dyn ColorAssigner,
    ) -> ReplayResult<Self> {
        let log = SolutionLog::from_path(log_path, colors)?;
        let map_path = match log_path.parent() {
            Some(dir) => dir.join(log.map_name()),
            None => Path::new(log.map_name()).to_path_buf(),
        };
        let map = GridMap::from_path(&map_path)?;
        let timeline = Timeline::build(log.agents());
        tracing::info!(
            agents = log.agents().len(),
            frames = timeline.len(),
            map = log.map_name(),
            "replay session loaded"
        );
        Ok(Self { map, log, timeline })
    }

    /// The decoded traversability grid.
    pub fn map(&self) -> &GridMap {
        &self.map
    }

    /// The ingested trajectory log.
    pub fn log(&self) -> &SolutionLog {
        &self.log
    }

    /// The assembled frame timeline.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// A fresh playback controller over this session's timeline.
    pub fn controller(&self) -> PlaybackController<'_> {
        PlaybackController::new(&self.timeline)
    }
}
