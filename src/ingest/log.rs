use crate::foundation::core::{AgentId, GridPos, Rgb};
use crate::foundation::error::{ReplayError, ReplayResult};
use crate::ingest::color::ColorAssigner;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// A single moving entity reconstructed from the trajectory log.
///
/// Immutable once recorded: the timeline and playback stages only read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    id: AgentId,
    path: Vec<GridPos>,
    goal: GridPos,
    color: Rgb,
}

impl Agent {
    /// Agent identifier extracted from the log tag.
    pub fn id(&self) -> AgentId {
        self.id
    }

    /// The full position sequence, in log order.
    pub fn path(&self) -> &[GridPos] {
        &self.path
    }

    /// The goal, defined as the last position of this agent's own sequence.
    pub fn goal(&self) -> GridPos {
        self.goal
    }

    /// Display color, stable for the agent's lifetime.
    pub fn color(&self) -> Rgb {
        self.color
    }
}

/// One classified line of the trajectory log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LogLine<'a> {
    /// `Map: <name>` directive.
    MapRef(&'a str),
    /// `Agent <tag> <coords...>` line; coordinates still undecoded.
    Agent { tag: &'a str },
    /// Empty or whitespace-only line.
    Blank,
    /// Any other first token; skipped for forward compatibility.
    Unknown,
}

pub(crate) fn classify_line(line: &str) -> ReplayResult<LogLine<'_>> {
    let mut words = line.split_whitespace();
    match words.next() {
        None => Ok(LogLine::Blank),
        Some("Map:") => {
            let name = words
                .next()
                .ok_or_else(|| ReplayError::malformed_log("`Map:` directive has no name"))?;
            Ok(LogLine::MapRef(name))
        }
        Some("Agent") => {
            let tag = words
                .next()
                .ok_or_else(|| ReplayError::malformed_log("`Agent` line has no tag"))?;
            Ok(LogLine::Agent { tag })
        }
        Some(_) => Ok(LogLine::Unknown),
    }
}

/// The fully ingested trajectory log: every agent plus the map reference.
///
/// Built by one accumulation pass over the log text and returned only when
/// the whole log decoded cleanly; there is no partially populated value.
#[derive(Debug, Clone)]
pub struct SolutionLog {
    agents: BTreeMap<AgentId, Agent>,
    map_name: String,
}

impl SolutionLog {
    /// Parse a trajectory log from a reader using `colors` for new agents.
    pub fn from_reader<R: Read>(mut r: R, colors: &mut dyn ColorAssigner) -> ReplayResult<Self> {
        let mut text = String::new();
        r.read_to_string(&mut text)
            .map_err(|e| ReplayError::malformed_log(format!("read log resource: {e}")))?;
        Self::parse(&text, colors)
    }

    /// Parse a trajectory log file on disk.
    #[tracing::instrument(skip(colors))]
    pub fn from_path(path: &Path, colors: &mut dyn ColorAssigner) -> ReplayResult<Self> {
        let f = File::open(path).map_err(|e| {
            ReplayError::resource_not_found(format!("open log '{}': {e}", path.display()))
        })?;
        Self::from_reader(f, colors)
    }

    /// Parse log text.
    ///
    /// `Agent` lines record a new agent keyed by the first digit run in the
    /// tag; later lines reusing an already-seen id are silently ignored
    /// (first occurrence wins). `Map:` records the map-file name, last
    /// occurrence winning. Any other line shape is skipped.
    pub fn parse(text: &str, colors: &mut dyn ColorAssigner) -> ReplayResult<Self> {
        let mut agents: BTreeMap<AgentId, Agent> = BTreeMap::new();
        let mut map_name: Option<String> = None;

        for line in text.lines() {
            match classify_line(line)? {
                LogLine::MapRef(name) => map_name = Some(name.to_owned()),
                LogLine::Agent { tag } => {
                    let id = agent_id_from_tag(tag)?;
                    if agents.contains_key(&id) {
                        tracing::debug!(id = id.0, tag, "ignoring repeated agent line");
                        continue;
                    }
                    let path = decode_positions(id, after_tag(line, tag))?;
                    let goal = path[path.len() - 1];
                    let color = colors.assign(id);
                    agents.insert(
                        id,
                        Agent {
                            id,
                            path,
                            goal,
                            color,
                        },
                    );
                }
                LogLine::Blank | LogLine::Unknown => {}
            }
        }

        let map_name = map_name
            .ok_or_else(|| ReplayError::missing_map_reference("log contains no `Map:` line"))?;
        Ok(Self { agents, map_name })
    }

    /// All recorded agents, keyed (and iterated) by ascending id.
    pub fn agents(&self) -> &BTreeMap<AgentId, Agent> {
        &self.agents
    }

    /// Name of the map file the log was produced against.
    pub fn map_name(&self) -> &str {
        &self.map_name
    }
}

/// Extract the agent id: the first run of ASCII digits embedded in the tag.
fn agent_id_from_tag(tag: &str) -> ReplayResult<AgentId> {
    let start = tag
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| ReplayError::malformed_log(format!("agent tag '{tag}' has no digits")))?;
    let run = tag[start..]
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .unwrap_or("");
    let id = run
        .parse::<u32>()
        .map_err(|_| ReplayError::malformed_log(format!("agent id in '{tag}' is out of range")))?;
    Ok(AgentId(id))
}

/// The remainder of an `Agent` line after its tag token.
fn after_tag<'a>(line: &'a str, tag: &str) -> &'a str {
    match line.find(tag) {
        Some(at) => &line[at + tag.len()..],
        None => "",
    }
}

/// Decode the coordinate run into `(row, col)` pairs.
///
/// Every digit run in the remainder of the line is one integer, so both
/// space-separated (`0 0 0 1`) and punctuated (`(0,0)->(0,1)`) coordinate
/// spellings decode identically.
fn decode_positions(id: AgentId, rest: &str) -> ReplayResult<Vec<GridPos>> {
    let mut values = Vec::new();
    for run in rest
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
    {
        let v = run.parse::<u32>().map_err(|_| {
            ReplayError::malformed_log(format!("agent {}: coordinate '{run}' out of range", id.0))
        })?;
        values.push(v);
    }
    if values.is_empty() {
        return Err(ReplayError::malformed_log(format!(
            "agent {} has no positions",
            id.0
        )));
    }
    if values.len() % 2 != 0 {
        return Err(ReplayError::malformed_log(format!(
            "agent {} has {} coordinates, cannot form (row, col) pairs",
            id.0,
            values.len()
        )));
    }
    Ok(values
        .chunks_exact(2)
        .map(|pair| GridPos::new(pair[0], pair[1]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::color::PaletteCycle;

    fn parse(text: &str) -> ReplayResult<SolutionLog> {
        SolutionLog::parse(text, &mut PaletteCycle::new())
    }

    #[test]
    fn records_agents_and_map_reference() {
        let log = parse("Map: maze.map\nAgent r0 0 0 0 1 1 1\nAgent r1 2 2 2 1\n").unwrap();
        assert_eq!(log.map_name(), "maze.map");
        assert_eq!(log.agents().len(), 2);
        let a0 = &log.agents()[&AgentId(0)];
        assert_eq!(
            a0.path(),
            &[GridPos::new(0, 0), GridPos::new(0, 1), GridPos::new(1, 1)]
        );
    }

    #[test]
    fn goal_is_the_last_position_of_each_agents_own_sequence() {
        let log = parse("Map: m\nAgent a1 0 0 5 7\nAgent a2 9 9\n").unwrap();
        assert_eq!(log.agents()[&AgentId(1)].goal(), GridPos::new(5, 7));
        assert_eq!(log.agents()[&AgentId(2)].goal(), GridPos::new(9, 9));
    }

    #[test]
    fn punctuated_coordinate_spelling_decodes_identically() {
        let spaced = parse("Map: m\nAgent r3 0 0 0 1 1 1\n").unwrap();
        let arrows = parse("Map: m\nAgent r3 (0,0)->(0,1)->(1,1)\n").unwrap();
        assert_eq!(
            spaced.agents()[&AgentId(3)].path(),
            arrows.agents()[&AgentId(3)].path()
        );
    }

    #[test]
    fn repeated_agent_id_keeps_the_first_sequence() {
        let log = parse("Map: m\nAgent r1 0 0 1 1\nAgent r1 5 5\n").unwrap();
        assert_eq!(log.agents().len(), 1);
        assert_eq!(
            log.agents()[&AgentId(1)].path(),
            &[GridPos::new(0, 0), GridPos::new(1, 1)]
        );
    }

    #[test]
    fn odd_coordinate_count_is_rejected() {
        let err = parse("Map: m\nAgent a7 1 2 3\n").unwrap_err();
        assert!(matches!(err, ReplayError::MalformedLog(_)));
    }

    #[test]
    fn tag_without_digits_is_rejected() {
        let err = parse("Map: m\nAgent abc 1 2\n").unwrap_err();
        assert!(err.to_string().contains("no digits"));
    }

    #[test]
    fn agent_without_positions_is_rejected() {
        let err = parse("Map: m\nAgent r4\n").unwrap_err();
        assert!(matches!(err, ReplayError::MalformedLog(_)));
    }

    #[test]
    fn missing_map_line_is_rejected() {
        let err = parse("Agent r0 0 0\n").unwrap_err();
        assert!(matches!(err, ReplayError::MissingMapReference(_)));
    }

    #[test]
    fn last_map_reference_wins() {
        let log = parse("Map: first.map\nAgent r0 0 0\nMap: second.map\n").unwrap();
        assert_eq!(log.map_name(), "second.map");
    }

    #[test]
    fn unrecognized_lines_are_skipped() {
        let log = parse("# solver: cbs\ncost 42\n\nMap: m\nAgent r0 0 0\n").unwrap();
        assert_eq!(log.agents().len(), 1);
    }

    #[test]
    fn id_digits_are_extracted_from_inside_the_tag() {
        let log = parse("Map: m\nAgent robot12b 3 4\n").unwrap();
        assert!(log.agents().contains_key(&AgentId(12)));
    }

    #[test]
    fn colors_are_assigned_in_recording_order() {
        let log = parse("Map: m\nAgent r5 0 0\nAgent r2 1 1\nAgent r5 9 9\n").unwrap();
        // r5 recorded first gets the first palette entry; the repeat draws
        // no color at all.
        let mut fresh = PaletteCycle::new();
        assert_eq!(log.agents()[&AgentId(5)].color(), fresh.assign(AgentId(5)));
        assert_eq!(log.agents()[&AgentId(2)].color(), fresh.assign(AgentId(2)));
    }
}
