//! Tile map and static collision geometry
//!
//! The map collaborator hands the core a grid of wall/open cells. The grid
//! is validated up front: an empty or jagged grid is a caller defect and
//! fails construction with a descriptive error, never a half-built world.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::TILE_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Wall,
    Open,
}

#[derive(Debug, Error)]
pub enum MapError {
    #[error("map grid is empty")]
    Empty,
    #[error("map grid is jagged: row {row} has {found} cells, expected {expected}")]
    Jagged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("map has no open edge cells to spawn hostiles from")]
    NoSpawnPoints,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileMap {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl TileMap {
    pub fn new(grid: Vec<Vec<Tile>>) -> Result<Self, MapError> {
        if grid.is_empty() || grid[0].is_empty() {
            return Err(MapError::Empty);
        }
        let width = grid[0].len();
        for (row, cells) in grid.iter().enumerate() {
            if cells.len() != width {
                return Err(MapError::Jagged {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
        }
        let height = grid.len();
        let tiles = grid.into_iter().flatten().collect();
        let map = Self {
            width,
            height,
            tiles,
        };
        if map.edge_spawn_points().is_empty() {
            return Err(MapError::NoSpawnPoints);
        }
        Ok(map)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Map extent in world units
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * TILE_SIZE
    }

    /// World-space center of a cell
    pub fn cell_center(&self, x: usize, y: usize) -> Vec2 {
        Vec2::new((x as f32 + 0.5) * TILE_SIZE, (y as f32 + 0.5) * TILE_SIZE)
    }

    /// Anything outside the grid counts as wall.
    fn is_wall_cell(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return true;
        }
        self.tiles[y as usize * self.width + x as usize] == Tile::Wall
    }

    /// True if a circle at `pos` overlaps any wall cell or the map border.
    pub fn blocked(&self, pos: Vec2, radius: f32) -> bool {
        let min_x = ((pos.x - radius) / TILE_SIZE).floor() as i32;
        let max_x = ((pos.x + radius) / TILE_SIZE).floor() as i32;
        let min_y = ((pos.y - radius) / TILE_SIZE).floor() as i32;
        let max_y = ((pos.y + radius) / TILE_SIZE).floor() as i32;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                if !self.is_wall_cell(x, y) {
                    continue;
                }
                // Circle vs cell rectangle: closest point on the cell
                let cell_min = Vec2::new(x as f32, y as f32) * TILE_SIZE;
                let cell_max = cell_min + Vec2::splat(TILE_SIZE);
                let closest = pos.clamp(cell_min, cell_max);
                if pos.distance_squared(closest) < radius * radius {
                    return true;
                }
            }
        }
        false
    }

    /// Move a circle by `delta` with axis-separated sliding collision: a
    /// blocked axis is dropped, the other still applies.
    pub fn slide(&self, pos: Vec2, delta: Vec2, radius: f32) -> Vec2 {
        let mut out = pos;
        let try_x = Vec2::new(out.x + delta.x, out.y);
        if !self.blocked(try_x, radius) {
            out.x = try_x.x;
        }
        let try_y = Vec2::new(out.x, out.y + delta.y);
        if !self.blocked(try_y, radius) {
            out.y = try_y.y;
        }
        out
    }

    /// Open cells along the outer two rings of the grid - the hostile
    /// spawn ring. With the usual wall border this is the first open ring
    /// inside it.
    pub fn edge_spawn_points(&self) -> Vec<Vec2> {
        let mut points = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let on_edge =
                    x < 2 || y < 2 || x + 2 >= self.width || y + 2 >= self.height;
                if !on_edge {
                    continue;
                }
                if self.tiles[y * self.width + x] == Tile::Open {
                    points.push(self.cell_center(x, y));
                }
            }
        }
        points
    }

    /// The open cell closest to the map's pixel center - the player start.
    pub fn center_open_cell(&self) -> Option<Vec2> {
        let center = self.pixel_size() * 0.5;
        let mut best: Option<(f32, Vec2)> = None;
        for y in 0..self.height {
            for x in 0..self.width {
                if self.tiles[y * self.width + x] != Tile::Open {
                    continue;
                }
                let pos = self.cell_center(x, y);
                let dist = pos.distance_squared(center);
                if best.is_none_or(|(d, _)| dist < d) {
                    best = Some((dist, pos));
                }
            }
        }
        best.map(|(_, pos)| pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// w x h grid of open cells with a one-cell wall border
    fn bordered(w: usize, h: usize) -> Vec<Vec<Tile>> {
        (0..h)
            .map(|y| {
                (0..w)
                    .map(|x| {
                        if x == 0 || y == 0 || x == w - 1 || y == h - 1 {
                            Tile::Wall
                        } else {
                            Tile::Open
                        }
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_empty_grid_is_fatal() {
        assert!(matches!(TileMap::new(Vec::new()), Err(MapError::Empty)));
        assert!(matches!(TileMap::new(vec![Vec::new()]), Err(MapError::Empty)));
    }

    #[test]
    fn test_jagged_grid_is_fatal() {
        let mut grid = bordered(6, 6);
        grid[3].pop();
        match TileMap::new(grid) {
            Err(MapError::Jagged {
                row,
                expected,
                found,
            }) => {
                assert_eq!(row, 3);
                assert_eq!(expected, 6);
                assert_eq!(found, 5);
            }
            other => panic!("expected jagged error, got {other:?}"),
        }
    }

    #[test]
    fn test_all_wall_grid_has_no_spawn_points() {
        let grid = vec![vec![Tile::Wall; 5]; 5];
        assert!(matches!(TileMap::new(grid), Err(MapError::NoSpawnPoints)));
    }

    #[test]
    fn test_blocked_against_walls_and_border() {
        let map = TileMap::new(bordered(8, 8)).unwrap();

        // Center of an open cell, small circle
        assert!(!map.blocked(map.cell_center(3, 3), 10.0));
        // Center of a wall cell
        assert!(map.blocked(map.cell_center(0, 3), 10.0));
        // Open cell adjacent to the border wall, radius reaching into it
        let near_wall = Vec2::new(TILE_SIZE + 4.0, 4.0 * TILE_SIZE);
        assert!(map.blocked(near_wall, 10.0));
        // Outside the grid entirely
        assert!(map.blocked(Vec2::new(-50.0, -50.0), 10.0));
    }

    #[test]
    fn test_slide_stops_at_wall_but_keeps_free_axis() {
        let map = TileMap::new(bordered(8, 8)).unwrap();
        let start = map.cell_center(1, 3);

        // Pushing left into the border wall: x clamped, y still moves
        let out = map.slide(start, Vec2::new(-TILE_SIZE, 8.0), 10.0);
        assert_eq!(out.x, start.x);
        assert_eq!(out.y, start.y + 8.0);

        // Free movement passes through
        let out = map.slide(start, Vec2::new(6.0, 0.0), 10.0);
        assert_eq!(out.x, start.x + 6.0);
    }

    #[test]
    fn test_edge_spawn_points_are_open_ring_cells() {
        let map = TileMap::new(bordered(8, 8)).unwrap();
        let points = map.edge_spawn_points();
        assert!(!points.is_empty());
        // The border itself is wall, so the ring just inside it qualifies
        assert!(points.contains(&map.cell_center(1, 1)));
        assert!(!points.contains(&map.cell_center(4, 4)));
        for point in &points {
            assert!(!map.blocked(*point, 1.0));
        }
    }

    #[test]
    fn test_center_open_cell() {
        let map = TileMap::new(bordered(9, 9)).unwrap();
        assert_eq!(map.center_open_cell(), Some(map.cell_center(4, 4)));
    }
}
