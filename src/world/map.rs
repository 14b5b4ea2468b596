//! Tile grid, doors, and the text format maps are authored in.
//!
//! ```text
//! ##########
//! #@.......#
//! #...|....#
//! #######-##
//! ```
//!
//! `#` or a digit is a wall (the digit picks the wall texture, `#` = 1),
//! `.`/space is floor, `@` the starting position, `|` a door that slides
//! along the y axis and `-` one that slides along x.

use std::collections::HashMap;

use glam::{Vec2, vec2};
use thiserror::Error;

use crate::world::texture::TextureId;

/// One grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Floor,
    StartingPosition,
    Door,
    Wall(TextureId),
}

impl Tile {
    /// Does a ray stop here? Doors are seen through and composited later.
    #[inline(always)]
    pub fn is_opaque(self) -> bool {
        matches!(self, Tile::Wall(_))
    }
}

/// Returned for coordinates outside the grid so traversal always ends.
pub const OUTSIDE: Tile = Tile::Wall(0);

/// Sliding door state. Owned by game logic; the renderer only reads it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Door {
    /// Face lies along the y axis (crossed by rays stepping in x).
    pub is_vertical: bool,
    /// 0 = closed, 1 = fully open.
    pub open_amount: f32,
}

impl Door {
    pub fn new(is_vertical: bool) -> Self {
        Self {
            is_vertical,
            open_amount: 0.0,
        }
    }

    #[inline]
    pub fn is_blocking(&self) -> bool {
        self.open_amount < 1.0
    }
}

/// What the renderer needs from a map.
pub trait TileMap {
    fn tile_at(&self, col: i32, row: i32) -> Tile;
    fn door_at(&self, col: i32, row: i32) -> Option<&Door>;
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MapError {
    #[error("map has no rows")]
    Empty,

    #[error("unknown tile `{ch}` at column {col}, row {row}")]
    BadTile { ch: char, col: usize, row: usize },

    #[error("border tile at column {col}, row {row} is not a wall")]
    OpenBorder { col: usize, row: usize },

    #[error("map has no starting position")]
    NoStart,
}

/// Runtime tile grid, row-major.
#[derive(Clone, Debug)]
pub struct Map {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
    doors: HashMap<(i32, i32), Door>,
}

impl Map {
    /// Build from explicit tiles. Every `Tile::Door` gets a closed door
    /// facing `vertical_doors(col,row)`.
    pub fn from_tiles(
        width: usize,
        height: usize,
        tiles: Vec<Tile>,
        mut vertical_doors: impl FnMut(usize, usize) -> bool,
    ) -> Result<Self, MapError> {
        if width == 0 || height == 0 || tiles.len() != width * height {
            return Err(MapError::Empty);
        }
        let mut doors = HashMap::new();
        for (i, t) in tiles.iter().enumerate() {
            if *t == Tile::Door {
                let (col, row) = (i % width, i / width);
                doors.insert(
                    (col as i32, row as i32),
                    Door::new(vertical_doors(col, row)),
                );
            }
        }
        Ok(Self {
            width,
            height,
            tiles,
            doors,
        })
    }

    /// Parse the text format. Short lines are padded with floor.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let lines: Vec<&str> = text
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.trim().is_empty())
            .collect();
        let height = lines.len();
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(MapError::Empty);
        }

        let mut tiles = vec![Tile::Floor; width * height];
        let mut vertical = HashMap::new();
        for (row, line) in lines.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let tile = match ch {
                    '.' | ' ' => Tile::Floor,
                    '@' => Tile::StartingPosition,
                    '#' => Tile::Wall(1),
                    '|' | '-' => {
                        vertical.insert((col, row), ch == '|');
                        Tile::Door
                    }
                    d if d.is_ascii_digit() => Tile::Wall(d as TextureId - '0' as TextureId),
                    ch => return Err(MapError::BadTile { ch, col, row }),
                };
                tiles[row * width + col] = tile;
            }
        }

        Self::from_tiles(width, height, tiles, |c, r| {
            vertical.get(&(c, r)).copied().unwrap_or(true)
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Every border cell must be a wall, otherwise rays can leave the grid.
    pub fn validate_border(&self) -> Result<(), MapError> {
        let (w, h) = (self.width, self.height);
        let border = (0..w)
            .flat_map(|c| [(c, 0), (c, h - 1)])
            .chain((0..h).flat_map(|r| [(0, r), (w - 1, r)]));
        for (col, row) in border {
            if !self.tiles[row * w + col].is_opaque() {
                return Err(MapError::OpenBorder { col, row });
            }
        }
        Ok(())
    }

    /// Centre of the first `@` cell.
    pub fn start_position(&self) -> Result<Vec2, MapError> {
        self.tiles
            .iter()
            .position(|t| *t == Tile::StartingPosition)
            .map(|i| vec2((i % self.width) as f32 + 0.5, (i / self.width) as f32 + 0.5))
            .ok_or(MapError::NoStart)
    }

    pub fn door_at_mut(&mut self, col: i32, row: i32) -> Option<&mut Door> {
        self.doors.get_mut(&(col, row))
    }

    /// Can a body stand in this cell? Open doors are passable.
    pub fn is_passable(&self, col: i32, row: i32) -> bool {
        match self.tile_at(col, row) {
            Tile::Floor | Tile::StartingPosition => true,
            Tile::Door => self.door_at(col, row).is_none_or(|d| !d.is_blocking()),
            Tile::Wall(_) => false,
        }
    }
}

impl TileMap for Map {
    #[inline(always)]
    fn tile_at(&self, col: i32, row: i32) -> Tile {
        if col < 0 || row < 0 || col as usize >= self.width || row as usize >= self.height {
            return OUTSIDE;
        }
        self.tiles[row as usize * self.width + col as usize]
    }

    #[inline]
    fn door_at(&self, col: i32, row: i32) -> Option<&Door> {
        self.doors.get(&(col, row))
    }
}
