//! ASCII map templates (`des.map`)

use crate::dungeon::CellType;
use crate::error::ScriptError;

/// Terrain for a template character.
pub fn terrain_for(c: char) -> Option<CellType> {
    let typ = match c {
        ' ' => CellType::Stone,
        '-' => CellType::HWall,
        '|' => CellType::VWall,
        '.' => CellType::Room,
        '#' => CellType::Corridor,
        '+' => CellType::Door,
        'S' => CellType::SecretDoor,
        '{' => CellType::Fountain,
        '\\' => CellType::Throne,
        'K' => CellType::Sink,
        '}' => CellType::Moat,
        'P' => CellType::Pool,
        'L' => CellType::Lava,
        'I' => CellType::Ice,
        'W' => CellType::Water,
        'T' => CellType::Tree,
        'F' => CellType::IronBars,
        'A' => CellType::Air,
        'C' => CellType::Cloud,
        'B' => CellType::CrossWall,
        _ => return None,
    };
    Some(typ)
}

/// A validated rectangular block of terrain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapTemplate {
    width: usize,
    height: usize,
    /// Indexed `[y][x]`
    rows: Vec<Vec<CellType>>,
}

impl MapTemplate {
    /// Parse `text`, one row per line. A single leading and trailing
    /// newline are ignored. Ragged rows and unknown characters are
    /// rejected with the owning script's name.
    pub fn parse(script: &str, text: &str) -> Result<Self, ScriptError> {
        let malformed = |reason: String| ScriptError::MalformedTemplate {
            script: script.to_string(),
            reason,
        };
        let text = text.strip_prefix('\n').unwrap_or(text);
        let text = text.strip_suffix('\n').unwrap_or(text);
        if text.is_empty() {
            return Err(malformed("empty map".to_string()));
        }

        let mut rows = Vec::new();
        let mut width = None;
        for (y, line) in text.lines().enumerate() {
            let row = line
                .chars()
                .enumerate()
                .map(|(x, c)| terrain_for(c).ok_or_else(|| malformed(format!("unknown symbol '{c}' at ({x},{y})"))))
                .collect::<Result<Vec<_>, _>>()?;
            match width {
                None => width = Some(row.len()),
                Some(w) if w != row.len() => {
                    return Err(malformed(format!("row {y} is {} wide, expected {w}", row.len())));
                }
                Some(_) => {}
            }
            rows.push(row);
        }

        Ok(Self {
            width: width.unwrap_or(0),
            height: rows.len(),
            rows,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> CellType {
        self.rows[y][x]
    }

    /// Every square with its terrain, column first.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, CellType)> + '_ {
        (0..self.width).flat_map(move |x| (0..self.height).map(move |y| (x, y, self.rows[y][x])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_box() {
        let map = MapTemplate::parse("t", "\n---\n|.|\n---\n").unwrap();
        assert_eq!((map.width(), map.height()), (3, 3));
        assert_eq!(map.get(1, 1), CellType::Room);
        assert_eq!(map.get(0, 1), CellType::VWall);
        assert_eq!(map.cells().count(), 9);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = MapTemplate::parse("castle", "---\n|..|\n---").unwrap_err();
        match err {
            ScriptError::MalformedTemplate { script, reason } => {
                assert_eq!(script, "castle");
                assert!(reason.contains("row 1"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unknown_symbol_rejected() {
        let err = MapTemplate::parse("oracle", "..?..").unwrap_err();
        assert!(matches!(err, ScriptError::MalformedTemplate { ref script, .. } if script == "oracle"));
        assert!(err.to_string().contains("'?'"));
    }

    #[test]
    fn test_empty_rejected() {
        assert!(MapTemplate::parse("x", "\n").is_err());
    }
}
