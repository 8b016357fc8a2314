use crate::foundation::core::{AgentId, FrameIndex, GridPos, Rgb};
use crate::ingest::log::Agent;
use std::collections::BTreeMap;

/// One agent's contribution to a frame (or to the goal overlay).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct AgentMark {
    /// Which agent this mark belongs to.
    pub id: AgentId,
    /// Cell the mark is placed on.
    pub pos: GridPos,
    /// The agent's display color.
    pub color: Rgb,
}

/// All agent marks for a single timeline index.
///
/// Marks are ordered by ascending agent id, the same order in every frame,
/// so a surface keying colors off mark order stays consistent.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FrameSnapshot {
    /// Timeline index of this snapshot.
    pub index: FrameIndex,
    /// Agents present at this index.
    pub marks: Vec<AgentMark>,
}

/// The assembled playback timeline: one snapshot per frame plus the static
/// goal overlay.
///
/// `Timeline::build` is a pure function of the agent mapping; building twice
/// from the same mapping yields identical values.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Timeline {
    frames: Vec<FrameSnapshot>,
    goals: Vec<AgentMark>,
}

impl Timeline {
    /// Reproject per-agent position sequences onto a common frame timeline.
    ///
    /// The timeline length is the maximum sequence length across agents
    /// (zero agents give an empty timeline). Frame `t` contains exactly the
    /// agents whose sequence is longer than `t`, each at its own position
    /// `t`; an agent whose sequence is exhausted contributes nothing to
    /// later frames.
    pub fn build(agents: &BTreeMap<AgentId, Agent>) -> Self {
        let max_length = agents.values().map(|a| a.path().len()).max().unwrap_or(0);
        let mut frames: Vec<FrameSnapshot> = (0..max_length)
            .map(|t| FrameSnapshot {
                index: FrameIndex(t),
                marks: Vec::new(),
            })
            .collect();

        // BTreeMap iteration is ascending by id, so every frame sees agents
        // in the same order.
        let mut goals = Vec::with_capacity(agents.len());
        for agent in agents.values() {
            for (t, &pos) in agent.path().iter().enumerate() {
                frames[t].marks.push(AgentMark {
                    id: agent.id(),
                    pos,
                    color: agent.color(),
                });
            }
            goals.push(AgentMark {
                id: agent.id(),
                pos: agent.goal(),
                color: agent.color(),
            });
        }

        Self { frames, goals }
    }

    /// Number of frames (`max_length`).
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the timeline has no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The snapshot for frame `t`.
    ///
    /// # Panics
    /// Panics if `t` is outside `[0, len)`; the playback controller only
    /// produces in-range indices.
    pub fn frame(&self, t: FrameIndex) -> &FrameSnapshot {
        &self.frames[t.0]
    }

    /// All snapshots in timeline order.
    pub fn frames(&self) -> &[FrameSnapshot] {
        &self.frames
    }

    /// The static goal overlay, one mark per agent in ascending id order.
    pub fn goals(&self) -> &[AgentMark] {
        &self.goals
    }

    /// Extent of the visited cells as `(rows, cols)`: one past the largest
    /// row and column any mark touches.
    pub fn bounding_cells(&self) -> (u32, u32) {
        let mut rows = 0;
        let mut cols = 0;
        for mark in self.frames.iter().flat_map(|f| f.marks.iter()) {
            rows = rows.max(mark.pos.row + 1);
            cols = cols.max(mark.pos.col + 1);
        }
        (rows, cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::color::PaletteCycle;
    use crate::ingest::log::SolutionLog;

    fn agents_from(text: &str) -> BTreeMap<AgentId, Agent> {
        SolutionLog::parse(text, &mut PaletteCycle::new())
            .unwrap()
            .agents()
            .clone()
    }

    #[test]
    fn timeline_length_is_the_longest_sequence() {
        let agents = agents_from("Map: m\nAgent r0 0 0 0 1 0 2\nAgent r1 5 5\n");
        let tl = Timeline::build(&agents);
        assert_eq!(tl.len(), 3);
    }

    #[test]
    fn zero_agents_give_an_empty_timeline() {
        let tl = Timeline::build(&BTreeMap::new());
        assert!(tl.is_empty());
        assert!(tl.goals().is_empty());
    }

    #[test]
    fn frame_contains_exactly_the_agents_still_moving() {
        let agents = agents_from("Map: m\nAgent r0 0 0 0 1 0 2\nAgent r1 5 5 5 6\n");
        let tl = Timeline::build(&agents);

        let f1 = tl.frame(FrameIndex(1));
        assert_eq!(f1.marks.len(), 2);
        assert_eq!(f1.marks[0].id, AgentId(0));
        assert_eq!(f1.marks[0].pos, GridPos::new(0, 1));
        assert_eq!(f1.marks[1].id, AgentId(1));
        assert_eq!(f1.marks[1].pos, GridPos::new(5, 6));
    }

    #[test]
    fn short_agent_vanishes_after_its_last_frame() {
        let agents = agents_from("Map: m\nAgent r0 0 0 0 1 0 2\nAgent r1 5 5\n");
        let tl = Timeline::build(&agents);

        // r1 has a single position: present at frame 0, absent afterwards
        // (not frozen at its goal).
        assert_eq!(tl.frame(FrameIndex(0)).marks.len(), 2);
        let f2 = tl.frame(FrameIndex(2));
        assert_eq!(f2.marks.len(), 1);
        assert_eq!(f2.marks[0].id, AgentId(0));
    }

    #[test]
    fn goals_cover_every_agent_in_id_order() {
        let agents = agents_from("Map: m\nAgent r9 1 1 2 2\nAgent r3 7 7\n");
        let tl = Timeline::build(&agents);
        let goals = tl.goals();
        assert_eq!(goals.len(), 2);
        assert_eq!(goals[0].id, AgentId(3));
        assert_eq!(goals[0].pos, GridPos::new(7, 7));
        assert_eq!(goals[1].id, AgentId(9));
        assert_eq!(goals[1].pos, GridPos::new(2, 2));
    }

    #[test]
    fn rebuilding_yields_a_byte_identical_timeline() {
        let agents = agents_from("Map: m\nAgent r0 0 0 0 1\nAgent r1 5 5 5 6 5 7\n");
        let a = Timeline::build(&agents);
        let b = Timeline::build(&agents);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn bounding_cells_cover_every_visited_position() {
        let agents = agents_from("Map: m\nAgent r0 0 0 3 9\n");
        let tl = Timeline::build(&agents);
        assert_eq!(tl.bounding_cells(), (4, 10));
    }
}
