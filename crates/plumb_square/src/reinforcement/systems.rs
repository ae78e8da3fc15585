//! Reinforcement tool systems
//!
//! # Systems
//!
//! **Lifecycle:**
//! - `load_tool_items` — Startup: иконка seed 1 для каждого tool item + interaction help
//! - `release_tool_item_icons` — unload одного предмета
//! - `release_on_exit` — AppExit: все иконки + инвалидация interaction help
//!
//! **Actions:**
//! - `process_reinforce_intents` — apply (admin / area)
//! - `process_remove_intents` — remove (admin / area)
//! - `process_set_tool_mode` — сохранить toolMode на стаке
//! - `process_open_tool_mode_menu` — построить `ToolModeMenu`

use bevy::prelude::*;
use crate::{
    components::*,
    config::ReinforcementSettings,
    interaction_help::{held_interaction_help, InteractionHelpCache},
    item_system::{ItemDefinitions, ReinforceToolKind},
    logger::{log, log_error, log_info, log_warning, set_log_level},
    reinforcement::{
        applier::{apply_admin, apply_area, remove_admin, remove_area, LockRefund, ReinforcementReport, ToolUser},
        error::ReinforceError,
        events::*,
        registry::BlockReinforcements,
    },
    tool_mode::{build_tool_modes, get_tool_mode, set_tool_mode, SymbolIcons, ToolModeIcons, ToolModeMenu},
};

// ============================================================================
// Lifecycle
// ============================================================================

/// Startup: применить настройки (уровень логов, размер иконок)
pub fn apply_settings(settings: Res<ReinforcementSettings>, mut renderer: ResMut<SymbolIcons>) {
    set_log_level(settings.log_level);

    // Иконок ещё нет → можно пересоздать renderer с другим размером
    if renderer.size() != settings.icon_size && renderer.live_count() == 0 {
        *renderer = SymbolIcons::new(settings.icon_size);
    }
}

/// Startup: подготовить tool items (иконка "self" + interaction help)
pub fn load_tool_items(
    definitions: Res<ItemDefinitions>,
    mut icons: ResMut<ToolModeIcons>,
    mut renderer: ResMut<SymbolIcons>,
    mut help: ResMut<InteractionHelpCache>,
) {
    let tools = definitions.tool_items();
    for item in &tools {
        icons.cache_mut(item).fetch_or_create(1, &mut *renderer);
    }

    let interactions = held_interaction_help(&mut help, &definitions);
    log_info(&format!(
        "Loaded {} reinforcement tools, {} resource items",
        tools.len(),
        interactions.first().map_or(0, |i| i.stacks.len())
    ));
}

/// Unload одного tool item
pub fn release_tool_item_icons(
    mut events: EventReader<ToolItemUnloaded>,
    mut icons: ResMut<ToolModeIcons>,
    mut renderer: ResMut<SymbolIcons>,
) {
    for event in events.read() {
        icons.release(&event.item, &mut *renderer);
        log(&format!("Released tool mode icons for {}", event.item));
    }
}

/// AppExit: освободить всё
pub fn release_on_exit(
    mut exit: EventReader<AppExit>,
    mut icons: ResMut<ToolModeIcons>,
    mut renderer: ResMut<SymbolIcons>,
    mut help: ResMut<InteractionHelpCache>,
) {
    if exit.read().last().is_none() {
        return;
    }
    icons.release_all(&mut *renderer);
    help.invalidate_all();
    log_info("Reinforcement tools unloaded");
}

// ============================================================================
// Outcome reporting
// ============================================================================

/// Выходные события для batch'а
#[derive(bevy::ecs::system::SystemParam)]
pub struct ReinforcementFeedback<'w> {
    errors: EventWriter<'w, IngameError>,
    sounds: EventWriter<'w, SoundPlayed>,
    completed: EventWriter<'w, ReinforcementBatchCompleted>,
    settings: Res<'w, ReinforcementSettings>,
}

impl ReinforcementFeedback<'_> {
    fn report(
        &mut self,
        player: Entity,
        kind: BatchKind,
        result: &Result<ReinforcementReport, ReinforceError>,
    ) {
        let report = match result {
            Ok(report) => report,
            Err(err) => {
                if err.is_fatal() {
                    log_warning(&format!("{:?} rejected for {:?}: {}", kind, player, err.code()));
                } else {
                    log_error(&format!("{:?} aborted for {:?} by per-block error: {}", kind, player, err.code()));
                }
                self.errors.write(IngameError::new(player, *err));
                return;
            }
        };

        for (pos, err) in &report.failures {
            log(&format!("{:?} at {} failed for {:?}: {}", kind, pos, player, err.code()));
            self.errors.write(IngameError::new(player, *err));
        }

        if let Some(position) = report.sound_at {
            self.sounds.write(SoundPlayed {
                sound: self.settings.reinforce_sound.clone(),
                position,
            });
        }

        self.completed.write(ReinforcementBatchCompleted {
            player,
            kind,
            succeeded: report.succeeded.len(),
            failed: report.failures.len(),
            resource_units_used: report.resource_units_used,
        });

        log_info(&format!(
            "{:?} batch for {:?}: {} ok, {} failed, {} skipped",
            kind,
            player,
            report.succeeded.len(),
            report.failures.len(),
            report.skipped
        ));
    }
}

// ============================================================================
// Apply / Remove
// ============================================================================

/// Process reinforce intents (ПКМ инструментом)
pub fn process_reinforce_intents(
    mut events: EventReader<ReinforceIntent>,
    mut players: Query<(&Player, &GameMode, &GroupMemberships, &mut Inventory, &mut HeldTool)>,
    definitions: Res<ItemDefinitions>,
    blocks: Res<WorldBlocks>,
    mut registry: ResMut<BlockReinforcements>,
    mut feedback: ReinforcementFeedback,
) {
    for intent in events.read() {
        let Some(selection) = intent.block_sel else {
            continue;
        };
        let Ok((player, game_mode, groups, mut inventory, mut held)) = players.get_mut(intent.player) else {
            log_error(&format!("Entity {:?} is not a tool user", intent.player));
            continue;
        };
        // Не инструмент укрепления → не наше событие
        let Some(kind) = definitions.tool_kind(&held.stack.item) else {
            continue;
        };

        let user = ToolUser {
            player: ActingPlayer::new(player, groups),
            game_mode: *game_mode,
            inventory: &mut *inventory,
        };

        let result = match kind {
            ReinforceToolKind::Admin => apply_admin(&mut *registry, &blocks, user, &*held, selection.position),
            ReinforceToolKind::Area => apply_area(&mut *registry, &blocks, &definitions, user, &mut *held, selection),
        };

        feedback.report(intent.player, BatchKind::Apply, &result);
    }
}

/// Process remove intents (ЛКМ инструментом)
pub fn process_remove_intents(
    mut commands: Commands,
    mut events: EventReader<RemoveReinforcementIntent>,
    mut players: Query<(&Player, &GameMode, &GroupMemberships, &mut Inventory, &HeldTool, Option<&Transform>)>,
    definitions: Res<ItemDefinitions>,
    mut registry: ResMut<BlockReinforcements>,
    mut feedback: ReinforcementFeedback,
) {
    for intent in events.read() {
        let Some(selection) = intent.block_sel else {
            continue;
        };
        let Ok((player, game_mode, groups, mut inventory, held, transform)) = players.get_mut(intent.player) else {
            log_error(&format!("Entity {:?} is not a tool user", intent.player));
            continue;
        };
        let Some(kind) = definitions.tool_kind(&held.stack.item) else {
            continue;
        };

        let user = ToolUser {
            player: ActingPlayer::new(player, groups),
            game_mode: *game_mode,
            inventory: &mut *inventory,
        };

        let result = match kind {
            ReinforceToolKind::Admin => remove_admin(&mut *registry, &definitions, user, selection.position),
            ReinforceToolKind::Area => remove_area(&mut *registry, &definitions, user, selection),
        };

        // Inventory полон → замок падает в мир у игрока (без Transform: у target блока)
        if let Ok(ReinforcementReport { lock_refund: Some(LockRefund::Dropped(stack)), .. }) = &result {
            let at = transform.map_or(selection.position.as_vec3(), |t| t.translation);
            commands.spawn((DroppedItem { stack: stack.clone() }, Transform::from_translation(at)));
            log(&format!("Dropped {} at {:?}: inventory full", stack.item, at));
        }

        feedback.report(intent.player, BatchKind::Remove, &result);
    }
}

// ============================================================================
// Tool mode
// ============================================================================

pub fn process_set_tool_mode(
    mut events: EventReader<SetToolModeIntent>,
    mut players: Query<&mut HeldTool>,
    definitions: Res<ItemDefinitions>,
) {
    for intent in events.read() {
        let Ok(mut held) = players.get_mut(intent.player) else {
            continue;
        };
        if definitions.tool_kind(&held.stack.item).is_none() {
            continue;
        }
        set_tool_mode(&mut held.stack, intent.mode);
    }
}

pub fn process_open_tool_mode_menu(
    mut commands: Commands,
    mut events: EventReader<OpenToolModeMenuIntent>,
    players: Query<(&GroupMemberships, &HeldTool)>,
    definitions: Res<ItemDefinitions>,
    mut icons: ResMut<ToolModeIcons>,
    mut renderer: ResMut<SymbolIcons>,
) {
    for intent in events.read() {
        let Ok((groups, held)) = players.get(intent.player) else {
            continue;
        };
        if definitions.tool_kind(&held.stack.item).is_none() {
            continue;
        }

        let cache = icons.cache_mut(&held.stack.item);
        let entries = build_tool_modes(groups.groups(), cache, &mut *renderer);
        let selected = get_tool_mode(&held.stack, groups.groups().len());

        commands.entity(intent.player).insert(ToolModeMenu { entries, selected });
    }
}
