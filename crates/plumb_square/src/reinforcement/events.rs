//! Reinforcement tool events
//!
//! # Architecture
//!
//! **Intents (вход от хоста/ввода):**
//! - `ReinforceIntent` → ПКМ инструментом по блоку (held interact start)
//! - `RemoveReinforcementIntent` → ЛКМ инструментом по блоку (held attack start)
//! - `SetToolModeIntent` → выбор режима в меню
//! - `OpenToolModeMenuIntent` → построить меню режимов
//! - `ToolItemUnloaded` → предмет выгружен, освободить иконки
//!
//! **Outputs (хосту):**
//! - `IngameError` → сообщение игроку
//! - `SoundPlayed` → позиционный звук
//! - `ReinforcementBatchCompleted` → итог batch'а

use bevy::prelude::*;
use crate::components::{BlockPos, BlockSelection};
use crate::item_system::ItemId;
use crate::reinforcement::error::ReinforceError;

// ============================================================================
// Intents
// ============================================================================

/// Применить укрепление инструментом в руке
///
/// `block_sel == None` (игрок смотрит в пустоту) → игнорируется
#[derive(Event, Clone, Debug)]
pub struct ReinforceIntent {
    pub player: Entity,
    pub block_sel: Option<BlockSelection>,
}

/// Снять укрепление инструментом в руке
#[derive(Event, Clone, Debug)]
pub struct RemoveReinforcementIntent {
    pub player: Entity,
    pub block_sel: Option<BlockSelection>,
}

/// Сохранить tool mode на стаке в руке
#[derive(Event, Clone, Debug)]
pub struct SetToolModeIntent {
    pub player: Entity,
    pub mode: i32,
}

/// Построить `ToolModeMenu` для игрока
#[derive(Event, Clone, Debug)]
pub struct OpenToolModeMenuIntent {
    pub player: Entity,
}

/// Tool item выгружен, освободить его иконки
#[derive(Event, Clone, Debug)]
pub struct ToolItemUnloaded {
    pub item: ItemId,
}

// ============================================================================
// Outputs
// ============================================================================

/// Ошибка, показываемая игроку в игре
#[derive(Event, Clone, Debug, PartialEq, Eq)]
pub struct IngameError {
    pub player: Entity,
    pub code: &'static str,
    pub message: String,
    pub error: ReinforceError,
}

impl IngameError {
    pub fn new(player: Entity, error: ReinforceError) -> Self {
        Self {
            player,
            code: error.code(),
            message: error.to_string(),
            error,
        }
    }
}

/// Позиционный звук
#[derive(Event, Clone, Debug, PartialEq, Eq)]
pub struct SoundPlayed {
    pub sound: String,
    pub position: BlockPos,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchKind {
    Apply,
    Remove,
}

/// Итог одного batch'а (для UI/статистики хоста)
#[derive(Event, Clone, Debug, PartialEq, Eq)]
pub struct ReinforcementBatchCompleted {
    pub player: Entity,
    pub kind: BatchKind,
    pub succeeded: usize,
    pub failed: usize,
    pub resource_units_used: u32,
}
