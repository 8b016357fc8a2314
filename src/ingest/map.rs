use crate::foundation::error::{ReplayError, ReplayResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Immutable traversability grid decoded from a map file.
///
/// Cells are stored row-major; `true` is passable, `false` is an obstacle.
/// The dimensional invariant `cells.len() == height * width` holds for every
/// constructed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMap {
    height: usize,
    width: usize,
    cells: Vec<bool>,
}

impl GridMap {
    /// Parse a map from a reader.
    pub fn from_reader<R: Read>(mut r: R) -> ReplayResult<Self> {
        let mut text = String::new();
        r.read_to_string(&mut text)
            .map_err(|e| ReplayError::malformed_map(format!("read map resource: {e}")))?;
        Self::parse(&text)
    }

    /// Parse a map file on disk.
    #[tracing::instrument]
    pub fn from_path(path: &Path) -> ReplayResult<Self> {
        let f = File::open(path).map_err(|e| {
            ReplayError::resource_not_found(format!("open map '{}': {e}", path.display()))
        })?;
        Self::from_reader(f)
    }

    /// Parse map text.
    ///
    /// Header: `height <int>` and `width <int>` directives in any order,
    /// then the `map` sentinel; unrecognized header lines are skipped.
    /// Body: exactly `height` rows follow the sentinel, each read verbatim
    /// with trailing whitespace trimmed, `.` passable and any other
    /// character an obstacle. A row whose length differs from `width`, a
    /// body with fewer than `height` rows, or a missing directive is a
    /// [`ReplayError::MalformedMap`].
    pub fn parse(text: &str) -> ReplayResult<Self> {
        let mut height: Option<usize> = None;
        let mut width: Option<usize> = None;
        let mut lines = text.lines();

        let mut saw_sentinel = false;
        for line in lines.by_ref() {
            let mut words = line.split_whitespace();
            match words.next() {
                Some("height") => height = Some(parse_dimension("height", words.next())?),
                Some("width") => width = Some(parse_dimension("width", words.next())?),
                Some("map") => {
                    saw_sentinel = true;
                    break;
                }
                _ => {} // unknown directives and blank lines are skipped
            }
        }
        if !saw_sentinel {
            return Err(ReplayError::malformed_map("missing `map` sentinel"));
        }
        let height =
            height.ok_or_else(|| ReplayError::malformed_map("missing `height` directive"))?;
        let width = width.ok_or_else(|| ReplayError::malformed_map("missing `width` directive"))?;

        let mut cells = Vec::with_capacity(height * width);
        for row in 0..height {
            let line = lines.next().ok_or_else(|| {
                ReplayError::malformed_map(format!("grid body ends after {row} of {height} rows"))
            })?;
            let line = line.trim_end();
            let len = line.chars().count();
            if len != width {
                return Err(ReplayError::malformed_map(format!(
                    "grid row {row} has {len} cells, expected {width}"
                )));
            }
            cells.extend(line.chars().map(|c| c == '.'));
        }

        Ok(Self {
            height,
            width,
            cells,
        })
    }

    /// Map height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Map width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether the cell at `(row, col)` is passable; out-of-range cells are
    /// treated as obstacles.
    pub fn is_passable(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[row * self.width + col]
    }

    /// Row-major cell storage.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }
}

fn parse_dimension(name: &str, token: Option<&str>) -> ReplayResult<usize> {
    let token =
        token.ok_or_else(|| ReplayError::malformed_map(format!("`{name}` has no value")))?;
    let v: usize = token.parse().map_err(|_| {
        ReplayError::malformed_map(format!("`{name}` value '{token}' is not an integer"))
    })?;
    if v == 0 {
        return Err(ReplayError::malformed_map(format!("`{name}` must be > 0")));
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_small_grid() {
        let map = GridMap::parse("height 2\nwidth 3\nmap\n.#.\n#..\n").unwrap();
        assert_eq!(map.height(), 2);
        assert_eq!(map.width(), 3);
        assert_eq!(map.cells(), &[true, false, true, false, true, true]);
    }

    #[test]
    fn directives_in_any_order_and_unknown_lines_skipped() {
        let map = GridMap::parse("type octile\nwidth 2\nheight 1\nmap\n.@\n").unwrap();
        assert_eq!(map.cells(), &[true, false]);
    }

    #[test]
    fn trailing_whitespace_is_trimmed_from_rows() {
        let map = GridMap::parse("height 1\nwidth 2\nmap\n..   \n").unwrap();
        assert_eq!(map.cells(), &[true, true]);
    }

    #[test]
    fn missing_sentinel_is_rejected() {
        let err = GridMap::parse("height 1\nwidth 1\n.\n").unwrap_err();
        assert!(matches!(err, ReplayError::MalformedMap(_)));
    }

    #[test]
    fn missing_dimension_is_rejected() {
        let err = GridMap::parse("height 1\nmap\n.\n").unwrap_err();
        assert!(err.to_string().contains("width"));
    }

    #[test]
    fn short_grid_row_is_rejected() {
        let err = GridMap::parse("height 1\nwidth 3\nmap\n..\n").unwrap_err();
        assert!(matches!(err, ReplayError::MalformedMap(_)));
    }

    #[test]
    fn over_long_grid_row_is_rejected() {
        let err = GridMap::parse("height 1\nwidth 2\nmap\n...\n").unwrap_err();
        assert!(matches!(err, ReplayError::MalformedMap(_)));
    }

    #[test]
    fn truncated_grid_body_is_rejected() {
        let err = GridMap::parse("height 3\nwidth 2\nmap\n..\n..\n").unwrap_err();
        assert!(err.to_string().contains("2 of 3"));
    }

    #[test]
    fn is_passable_treats_out_of_range_as_obstacle() {
        let map = GridMap::parse("height 1\nwidth 1\nmap\n.\n").unwrap();
        assert!(map.is_passable(0, 0));
        assert!(!map.is_passable(0, 1));
        assert!(!map.is_passable(1, 0));
    }
}
