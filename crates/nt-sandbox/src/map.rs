//! Hand-drawn map, line of sight and path search

use std::collections::VecDeque;

use nt_client::glyph::CellKind;
use thiserror::Error;

/// The town the sandbox starts in.
///
/// `#` wall, `.` street, `,` grass, `T` tree, `_` indoor floor, `+` door.
pub const TOWN: [&str; 14] = [
    "################################",
    "#,,,,T,,,,,,,,,,,,,,,,,,,T,,,,,#",
    "#,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,#",
    "#..............................#",
    "#..............................#",
    "#,,,,,,#########+#######,,,,,,,#",
    "#,,T,,,#_______________#,,,,,,,#",
    "#,,,,,,#_______________#,,,T,,,#",
    "#,,,,,,#_______________#,,,,,,,#",
    "#,,,,,,#_______________#,,,,,,,#",
    "#,,,,,,#########+#######,,,,,,,#",
    "#..............................#",
    "#,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,#",
    "################################",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("Map has no rows")]
    Empty,

    #[error("Row {row} is {len} cells wide, expected {expected}")]
    Ragged { row: usize, len: usize, expected: usize },

    #[error("Unknown map character '{ch}' at {x},{y}")]
    UnknownTile { ch: char, x: usize, y: usize },
}

fn tile_for(ch: char) -> Option<CellKind> {
    match ch {
        '#' => Some(CellKind::Wall),
        '.' => Some(CellKind::Floor),
        ',' => Some(CellKind::Grass),
        'T' => Some(CellKind::Tree),
        '_' => Some(CellKind::FloorIndoor),
        '+' => Some(CellKind::Door),
        _ => None,
    }
}

/// Parse rows of map characters into `(width, height, cell codes)`.
pub fn parse_rows(rows: &[&str]) -> Result<(u32, u32, Vec<u8>), MapError> {
    let expected = rows.first().ok_or(MapError::Empty)?.chars().count();
    let mut cells = Vec::with_capacity(expected * rows.len());
    for (y, row) in rows.iter().enumerate() {
        let len = row.chars().count();
        if len != expected {
            return Err(MapError::Ragged { row: y, len, expected });
        }
        for (x, ch) in row.chars().enumerate() {
            let kind = tile_for(ch).ok_or(MapError::UnknownTile { ch, x, y })?;
            cells.push(kind as u8);
        }
    }
    Ok((expected as u32, rows.len() as u32, cells))
}

/// Read-only view of a parsed map.
#[derive(Debug, Clone, Copy)]
pub struct Grid<'a> {
    pub width: u32,
    pub height: u32,
    pub cells: &'a [u8],
}

impl Grid<'_> {
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn kind(&self, x: i32, y: i32) -> Option<CellKind> {
        self.index(x, y)
            .and_then(|idx| self.cells.get(idx).copied())
            .and_then(CellKind::from_code)
    }

    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        !matches!(self.kind(x, y), None | Some(CellKind::Wall | CellKind::Tree))
    }

    pub fn blocks_sight(&self, x: i32, y: i32) -> bool {
        matches!(self.kind(x, y), None | Some(CellKind::Wall | CellKind::Tree))
    }

    /// Bresenham line from `(x0, y0)` to `(x1, y1)`. A blocking cell is
    /// itself visible but hides everything behind it.
    pub fn has_line_of_sight(&self, x0: i32, y0: i32, x1: i32, y1: i32) -> bool {
        let (mut x, mut y) = (x0, y0);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            if (x, y) != (x0, y0) && self.blocks_sight(x, y) {
                return (x, y) == (x1, y1);
            }
            if (x, y) == (x1, y1) {
                return true;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Cells in view from `(px, py)` within `radius` (Chebyshev).
    pub fn field_of_view(&self, px: i32, py: i32, radius: i32) -> Vec<bool> {
        let mut visible = vec![false; self.cells.len()];
        for y in (py - radius)..=(py + radius) {
            for x in (px - radius)..=(px + radius) {
                if let Some(idx) = self.index(x, y) {
                    visible[idx] = self.has_line_of_sight(px, py, x, y);
                }
            }
        }
        visible
    }

    /// Shortest 4-connected walk from `from` to `to`, as cell indices,
    /// excluding the start. Empty when there is no way.
    pub fn find_path(&self, from: (i32, i32), to: (i32, i32)) -> Vec<usize> {
        let (Some(start), Some(goal)) = (self.index(from.0, from.1), self.index(to.0, to.1)) else {
            return Vec::new();
        };
        if start == goal || !self.is_walkable(to.0, to.1) {
            return Vec::new();
        }

        let mut came_from: Vec<Option<usize>> = vec![None; self.cells.len()];
        let mut queue = VecDeque::from([start]);
        came_from[start] = Some(start);

        while let Some(current) = queue.pop_front() {
            if current == goal {
                break;
            }
            let (cx, cy) = self.coords(current);
            for (dx, dy) in [(0, -1), (1, 0), (0, 1), (-1, 0)] {
                let (nx, ny) = (cx + dx, cy + dy);
                let Some(next) = self.index(nx, ny) else {
                    continue;
                };
                if came_from[next].is_none() && self.is_walkable(nx, ny) {
                    came_from[next] = Some(current);
                    queue.push_back(next);
                }
            }
        }

        if came_from[goal].is_none() {
            return Vec::new();
        }
        let mut path = Vec::new();
        let mut current = goal;
        while current != start {
            path.push(current);
            match came_from[current] {
                Some(prev) => current = prev,
                None => return Vec::new(),
            }
        }
        path.reverse();
        path
    }

    pub fn coords(&self, index: usize) -> (i32, i32) {
        let width = self.width.max(1) as usize;
        ((index % width) as i32, (index / width) as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn town() -> (u32, u32, Vec<u8>) {
        parse_rows(&TOWN).unwrap()
    }

    #[test]
    fn test_town_parses() {
        let (w, h, cells) = town();
        assert_eq!((w, h), (32, 14));
        assert_eq!(cells.len(), 32 * 14);
        let grid = Grid { width: w, height: h, cells: &cells };
        assert_eq!(grid.kind(16, 5), Some(CellKind::Door));
        assert_eq!(grid.kind(10, 7), Some(CellKind::FloorIndoor));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_rows(&[]), Err(MapError::Empty));
        assert_eq!(
            parse_rows(&["##", "#"]),
            Err(MapError::Ragged { row: 1, len: 1, expected: 2 })
        );
        assert_eq!(
            parse_rows(&["#x"]),
            Err(MapError::UnknownTile { ch: 'x', x: 1, y: 0 })
        );
    }

    #[test]
    fn test_walls_block_sight_but_are_seen() {
        let (w, h, cells) = parse_rows(&["......", "..#...", "......"]).unwrap();
        let grid = Grid { width: w, height: h, cells: &cells };
        assert!(grid.has_line_of_sight(0, 1, 2, 1));
        assert!(!grid.has_line_of_sight(0, 1, 4, 1));
        assert!(grid.has_line_of_sight(0, 0, 5, 0));
    }

    #[test]
    fn test_path_goes_around_walls() {
        let (w, h, cells) = parse_rows(&[".....", ".###.", "....."]).unwrap();
        let grid = Grid { width: w, height: h, cells: &cells };
        let path = grid.find_path((0, 1), (4, 1));
        assert_eq!(path.len(), 6);
        assert_eq!(path.last().copied(), grid.index(4, 1));
        assert!(!path.contains(&grid.index(0, 1).unwrap_or(usize::MAX)));
    }

    #[test]
    fn test_no_path_into_wall() {
        let (w, h, cells) = town();
        let grid = Grid { width: w, height: h, cells: &cells };
        assert!(grid.find_path((4, 3), (0, 0)).is_empty());
        assert!(grid.find_path((4, 3), (4, 3)).is_empty());
    }

    #[test]
    fn test_path_through_door() {
        let (w, h, cells) = town();
        let grid = Grid { width: w, height: h, cells: &cells };
        let path = grid.find_path((16, 4), (16, 6));
        assert_eq!(path, vec![grid.index(16, 5).unwrap(), grid.index(16, 6).unwrap()]);
    }
}
