//! Reinforcement applier — применение/снятие укреплений по набору координат
//!
//! # Apply (area)
//! 1. Найти ресурс в inventory (иначе `NoResource`)
//! 2. Target должен быть reinforcable (иначе `NotReinforceable`)
//! 3. Для каждой из 25 координат:
//!    - не reinforcable блок (воздух и т.п.) → пропуск без оплаты
//!    - счётчик исчерпан → списать 1 ресурс, счётчик = 25
//!    - strengthen → успех: счётчик - 1; отказ: `AlreadyReinforced`, дальше
//!
//! # Apply (admin)
//! Только Creative, одна координата, clear → strengthen с `ADMIN_REINFORCE_STRENGTH`.
//!
//! # Remove
//! Ошибки по координатам не прерывают batch. Если target был заперт
//! предметом, предмет возвращается игроку (inventory или мир).

use crate::components::{ActingPlayer, BlockPos, BlockSelection, GameMode, HeldTool, Inventory, WorldBlocks};
use crate::item_system::{ItemDefinitions, ItemStack};
use crate::logger::log;
use crate::reinforcement::area::reinforce_area;
use crate::reinforcement::error::ReinforceError;
use crate::reinforcement::registry::{BlockReinforcement, ReinforcementRegistry};
use crate::tool_mode::{resolve_owner, ReinforceFor};

/// Прочность admin укрепления
pub const ADMIN_REINFORCE_STRENGTH: i32 = 99999;

// ============================================================================
// Report
// ============================================================================

/// Куда ушёл предмет-замок после снятия укрепления
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockRefund {
    /// Положен в inventory
    Given(ItemStack),
    /// Inventory полон → выбросить в мир у игрока
    Dropped(ItemStack),
}

/// Итог одного вызова (batch)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReinforcementReport {
    /// Координаты с успешной операцией
    pub succeeded: Vec<BlockPos>,
    /// Non-fatal ошибки по координатам
    pub failures: Vec<(BlockPos, ReinforceError)>,
    /// Пропущенные не-reinforcable блоки
    pub skipped: usize,
    /// Сколько единиц ресурса списано
    pub resource_units_used: u32,
    pub lock_refund: Option<LockRefund>,
    /// Позиция звука (один раз на batch)
    pub sound_at: Option<BlockPos>,
}

/// Кто применяет инструмент
pub struct ToolUser<'a> {
    pub player: ActingPlayer<'a>,
    pub game_mode: GameMode,
    pub inventory: &'a mut Inventory,
}

fn strengthen_as<R: ReinforcementRegistry>(
    registry: &mut R,
    pos: BlockPos,
    player: ActingPlayer<'_>,
    strength: i32,
    owner: ReinforceFor<'_>,
) -> bool {
    match owner.group_uid() {
        Some(group_uid) if group_uid > 0 => registry.strengthen_for_group(pos, player, strength, group_uid),
        _ => registry.strengthen(pos, player, strength),
    }
}

fn give_or_drop(inventory: &mut Inventory, definitions: &ItemDefinitions, stack: ItemStack) -> LockRefund {
    match inventory.try_give(stack.clone(), definitions) {
        Ok(()) => LockRefund::Given(stack),
        Err(rest) => LockRefund::Dropped(rest),
    }
}

// ============================================================================
// Apply
// ============================================================================

/// Admin вариант: один блок, максимальная прочность, без ресурса
pub fn apply_admin<R: ReinforcementRegistry>(
    registry: &mut R,
    blocks: &WorldBlocks,
    user: ToolUser<'_>,
    tool: &HeldTool,
    target: BlockPos,
) -> Result<ReinforcementReport, ReinforceError> {
    if !user.game_mode.is_privileged() {
        return Err(ReinforceError::NotAuthorized);
    }
    if !blocks.is_reinforcable(target) {
        return Err(ReinforceError::NotReinforceable);
    }

    let owner = resolve_owner(&tool.stack, user.player.groups);
    let mut report = ReinforcementReport::default();

    // clear-then-set: старое укрепление (чьё угодно) заменяется
    registry.clear(target);

    if strengthen_as(registry, target, user.player, ADMIN_REINFORCE_STRENGTH, owner) {
        report.succeeded.push(target);
        report.sound_at = Some(target);
    } else {
        report.failures.push((target, ReinforceError::AlreadyReinforced));
    }

    Ok(report)
}

/// Area вариант: плоскость 5x5, одна единица ресурса на 25 укреплений
pub fn apply_area<R: ReinforcementRegistry>(
    registry: &mut R,
    blocks: &WorldBlocks,
    definitions: &ItemDefinitions,
    user: ToolUser<'_>,
    tool: &mut HeldTool,
    selection: BlockSelection,
) -> Result<ReinforcementReport, ReinforceError> {
    let ToolUser { player, inventory, .. } = user;

    let Some(resource_slot) = inventory.find_resource_slot(definitions) else {
        return Err(ReinforceError::NoResource);
    };
    let strength = inventory
        .slot(resource_slot)
        .map_or(0, |stack| definitions.reinforcement_strength(&stack.item));

    let target = selection.position;
    if !blocks.is_reinforcable(target) {
        return Err(ReinforceError::NotReinforceable);
    }

    let owner = resolve_owner(&tool.stack, player.groups);
    let mut report = ReinforcementReport::default();

    for pos in reinforce_area(target, selection.face.axis()) {
        if !blocks.is_reinforcable(pos) {
            report.skipped += 1;
            continue;
        }

        // Списание до попытки, даже если координата уже укреплена.
        // За batch максимум 25 успехов → не больше одного списания.
        if tool.counter.needs_refill() && inventory.take_out(resource_slot, 1) == 1 {
            report.resource_units_used += 1;
            tool.counter.refill();
        }

        if strengthen_as(registry, pos, player, strength, owner) {
            tool.counter.consume();
            report.succeeded.push(pos);
        } else {
            log(&format!("Block {} already reinforced, skipping", pos));
            report.failures.push((pos, ReinforceError::AlreadyReinforced));
        }
    }

    report.sound_at = Some(target);
    Ok(report)
}

// ============================================================================
// Remove
// ============================================================================

/// Admin вариант: снять укрепление с одного блока (чьё угодно)
pub fn remove_admin<R: ReinforcementRegistry>(
    registry: &mut R,
    definitions: &ItemDefinitions,
    user: ToolUser<'_>,
    target: BlockPos,
) -> Result<ReinforcementReport, ReinforceError> {
    if !user.game_mode.is_privileged() {
        return Err(ReinforceError::NotAuthorized);
    }

    let mut report = ReinforcementReport::default();
    let Some(existing) = registry.get(target).cloned() else {
        return Ok(report);
    };

    if let (true, Some(item)) = (existing.locked, existing.locked_by_item) {
        report.lock_refund = Some(give_or_drop(user.inventory, definitions, ItemStack::new(item, 1)));
    }

    registry.clear(target);
    report.succeeded.push(target);
    report.sound_at = Some(target);
    Ok(report)
}

/// Area вариант: снять укрепления с плоскости 5x5
pub fn remove_area<R: ReinforcementRegistry>(
    registry: &mut R,
    definitions: &ItemDefinitions,
    user: ToolUser<'_>,
    selection: BlockSelection,
) -> Result<ReinforcementReport, ReinforceError> {
    let target = selection.position;
    let target_record = registry.get(target).cloned();
    let mut report = ReinforcementReport::default();

    for pos in reinforce_area(target, selection.face.axis()) {
        match registry.try_remove(pos, user.player) {
            Ok(()) => report.succeeded.push(pos),
            Err(err) => report.failures.push((pos, err.into())),
        }
    }

    // Замок target'а возвращаем один раз после batch'а, независимо от исхода снятия
    if let Some(BlockReinforcement { locked: true, locked_by_item: Some(item), .. }) = target_record {
        report.lock_refund = Some(give_or_drop(user.inventory, definitions, ItemStack::new(item, 1)));
    }

    report.sound_at = Some(target);
    Ok(report)
}
