//! ECS компоненты и host-state ресурсы
//!
//! Организация по доменам:
//! - world: позиции блоков, грани, block accessor (BlockPos, BlockSelection, WorldBlocks)
//! - player: identity, game mode, группы (Player, GameMode, GroupMemberships)
//! - inventory: слоты, стак в руке, выброшенные предметы (Inventory, HeldTool, DroppedItem)

pub mod world;
pub mod player;
pub mod inventory;

// Re-exports для удобного импорта
pub use world::*;
pub use player::*;
pub use inventory::*;
