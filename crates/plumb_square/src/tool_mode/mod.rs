//! Tool mode — на кого записывается укрепление
//!
//! # Хранение
//! `toolMode` — integer атрибут стака инструмента:
//! - 0 → укрепить на себя
//! - 1..N → укрепить на группу `groups[mode - 1]`
//!
//! # Clamp
//! Игрок мог выйти из групп после выбора режима. Эффективный режим
//! всегда `min(stored, group_count)`, так что индекс группы не выходит
//! за пределы списка.
//!
//! # Menu
//! `1 + group_count` пунктов, у каждого своя иконка из `IconCache`
//! (seed = позиция пункта + 1).

use bevy::prelude::*;

pub mod icons;

pub use icons::*;

use crate::components::GroupMembership;
use crate::item_system::{ItemStack, TOOL_MODE_ATTRIBUTE};

/// Режим "на себя"
pub const TOOL_MODE_SELF: i32 = 0;

// ============================================================================
// Stored / effective mode
// ============================================================================

pub fn set_tool_mode(stack: &mut ItemStack, mode: i32) {
    stack.set_int(TOOL_MODE_ATTRIBUTE, mode);
}

/// Эффективный режим: `min(stored, group_count)`, отрицательные → self
pub fn get_tool_mode(stack: &ItemStack, group_count: usize) -> i32 {
    let group_count = i32::try_from(group_count).unwrap_or(i32::MAX);
    stack.get_int(TOOL_MODE_ATTRIBUTE).min(group_count).max(TOOL_MODE_SELF)
}

/// Владелец нового укрепления
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReinforceFor<'a> {
    Player,
    Group(&'a GroupMembership),
}

impl ReinforceFor<'_> {
    pub fn group_uid(&self) -> Option<i32> {
        match self {
            ReinforceFor::Player => None,
            ReinforceFor::Group(group) => Some(group.group_uid),
        }
    }
}

/// Разрешить stored mode в владельца (с clamp)
pub fn resolve_owner<'a>(stack: &ItemStack, groups: &'a [GroupMembership]) -> ReinforceFor<'a> {
    match get_tool_mode(stack, groups.len()) {
        TOOL_MODE_SELF => ReinforceFor::Player,
        mode => groups
            .get(mode as usize - 1)
            .map_or(ReinforceFor::Player, ReinforceFor::Group),
    }
}

// ============================================================================
// Menu
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolModeCode {
    SelfOwned,
    Group,
}

impl ToolModeCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolModeCode::SelfOwned => "self",
            ToolModeCode::Group => "group",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolModeEntry {
    pub code: ToolModeCode,
    pub label: String,
    pub icon: IconHandle,
}

/// Построить меню режимов для игрока
pub fn build_tool_modes(
    groups: &[GroupMembership],
    cache: &mut IconCache,
    renderer: &mut impl IconRenderer,
) -> Vec<ToolModeEntry> {
    let mut modes = Vec::with_capacity(1 + groups.len());

    modes.push(ToolModeEntry {
        code: ToolModeCode::SelfOwned,
        label: "Reinforce for yourself".to_string(),
        icon: cache.fetch_or_create(1, renderer),
    });

    for (i, group) in groups.iter().enumerate() {
        modes.push(ToolModeEntry {
            code: ToolModeCode::Group,
            label: format!("Reinforce for group {}", group.group_name),
            icon: cache.fetch_or_create(i as u32 + 2, renderer),
        });
    }

    modes
}

/// Последнее построенное меню режимов (на entity игрока)
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolModeMenu {
    pub entries: Vec<ToolModeEntry>,
    /// Текущий эффективный режим (подсветка в UI)
    pub selected: i32,
}
