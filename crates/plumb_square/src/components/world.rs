//! World block компоненты: BlockPos, BlockFacing, BlockSelection, WorldBlocks
//!
//! `WorldBlocks` — минимальный block accessor хоста: код блока + флаг
//! reinforcable. Незаданные позиции считаются воздухом.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// BlockPos
// ============================================================================

/// Integer block coordinate
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Сдвиг с wrap-around на границе i32
    pub const fn add(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x.wrapping_add(dx), self.y.wrapping_add(dy), self.z.wrapping_add(dz))
    }

    /// Координата вдоль оси
    pub const fn get(self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// World-space угол блока
    pub fn as_vec3(self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }
}

impl std::fmt::Display for BlockPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ============================================================================
// Axis / BlockFacing
// ============================================================================

/// Principal axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

/// Грань блока, по которой кликнул игрок
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum BlockFacing {
    North,
    East,
    South,
    West,
    Up,
    Down,
}

impl BlockFacing {
    /// Ось, перпендикулярная грани
    pub fn axis(self) -> Axis {
        match self {
            BlockFacing::East | BlockFacing::West => Axis::X,
            BlockFacing::Up | BlockFacing::Down => Axis::Y,
            BlockFacing::North | BlockFacing::South => Axis::Z,
        }
    }
}

/// Block под прицелом игрока в момент интеракции
#[derive(Clone, Copy, Debug, PartialEq, Eq, Reflect)]
pub struct BlockSelection {
    pub position: BlockPos,
    pub face: BlockFacing,
}

impl BlockSelection {
    pub fn new(position: BlockPos, face: BlockFacing) -> Self {
        Self { position, face }
    }
}

// ============================================================================
// WorldBlocks (Resource)
// ============================================================================

/// Блок в мире
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub code: String,
    /// Есть ли у блока reinforcable behavior
    pub reinforcable: bool,
}

/// Block accessor: позиция → блок
#[derive(Resource, Clone, Debug, Default)]
pub struct WorldBlocks {
    blocks: HashMap<BlockPos, Block>,
}

impl WorldBlocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, pos: BlockPos, code: impl Into<String>, reinforcable: bool) {
        self.blocks.insert(
            pos,
            Block {
                code: code.into(),
                reinforcable,
            },
        );
    }

    pub fn remove(&mut self, pos: BlockPos) -> Option<Block> {
        self.blocks.remove(&pos)
    }

    pub fn get(&self, pos: BlockPos) -> Option<&Block> {
        self.blocks.get(&pos)
    }

    /// Воздух и неизвестные позиции не reinforcable
    pub fn is_reinforcable(&self, pos: BlockPos) -> bool {
        self.blocks.get(&pos).is_some_and(|b| b.reinforcable)
    }

    /// Заполнить прямоугольник [min, max] (включительно) одним блоком
    pub fn fill(&mut self, min: BlockPos, max: BlockPos, code: &str, reinforcable: bool) {
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                for z in min.z..=max.z {
                    self.set(BlockPos::new(x, y, z), code, reinforcable);
                }
            }
        }
    }
}
