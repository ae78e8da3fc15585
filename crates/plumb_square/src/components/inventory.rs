//! Inventory компоненты
//!
//! **Inventory** — слоты игрока (фиксированная вместимость):
//! - `find_resource_slot` — первый слот с ресурсом укрепления
//! - `take_out` — списать N штук из слота
//! - `try_give` — положить стак (merge → пустые слоты), остаток возвращается
//!
//! **HeldTool** — стак в руке + счётчик использований ресурса.
//!
//! **DroppedItem** — стак, выброшенный в мир (когда inventory полон).

use bevy::prelude::*;
use crate::item_system::{ItemDefinitions, ItemId, ItemStack};
use crate::reinforcement::counter::ResourceCounter;

// ============================================================================
// Inventory
// ============================================================================

#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    slots: Vec<Option<ItemStack>>,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

impl Inventory {
    pub const DEFAULT_CAPACITY: usize = 16;

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn slot(&self, index: usize) -> Option<&ItemStack> {
        self.slots.get(index)?.as_ref()
    }

    pub fn set_slot(&mut self, index: usize, stack: Option<ItemStack>) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = stack;
        }
    }

    /// Сколько всего штук предмета во всех слотах
    pub fn count(&self, item: &ItemId) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|s| &s.item == item)
            .map(|s| s.stack_size)
            .sum()
    }

    /// Первый слот, чей предмет объявляет `reinforcement_strength > 0`
    pub fn find_resource_slot(&self, definitions: &ItemDefinitions) -> Option<usize> {
        self.slots.iter().position(|slot| {
            slot.as_ref().is_some_and(|stack| {
                stack.stack_size > 0 && definitions.reinforcement_strength(&stack.item) > 0
            })
        })
    }

    /// Списать до `amount` штук из слота. Пустой слот очищается.
    ///
    /// Возвращает сколько реально списано.
    pub fn take_out(&mut self, index: usize, amount: u32) -> u32 {
        let Some(slot) = self.slots.get_mut(index) else {
            return 0;
        };
        let Some(stack) = slot.as_mut() else {
            return 0;
        };

        let taken = stack.stack_size.min(amount);
        stack.stack_size -= taken;
        if stack.stack_size == 0 {
            *slot = None;
        }
        taken
    }

    /// Положить стак в inventory.
    ///
    /// Сначала доливаем в совместимые стаки, потом занимаем пустые слоты.
    /// Если места не хватило, `Err` с остатком.
    pub fn try_give(&mut self, mut stack: ItemStack, definitions: &ItemDefinitions) -> Result<(), ItemStack> {
        let max = definitions.max_stack_size(&stack.item);

        for existing in self.slots.iter_mut().flatten() {
            if stack.stack_size == 0 {
                break;
            }
            if !existing.can_merge_with(&stack) || existing.stack_size >= max {
                continue;
            }
            let moved = (max - existing.stack_size).min(stack.stack_size);
            existing.stack_size += moved;
            stack.stack_size -= moved;
        }

        for slot in self.slots.iter_mut() {
            if stack.stack_size == 0 {
                break;
            }
            if slot.is_some() {
                continue;
            }
            let moved = max.min(stack.stack_size);
            let mut placed = stack.clone();
            placed.stack_size = moved;
            *slot = Some(placed);
            stack.stack_size -= moved;
        }

        if stack.stack_size == 0 {
            Ok(())
        } else {
            Err(stack)
        }
    }
}

// ============================================================================
// HeldTool
// ============================================================================

/// Стак в активной руке игрока
///
/// `counter` живёт вместе со стаком: каждый инструмент в игре считает
/// свои оплаченные использования отдельно.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct HeldTool {
    pub stack: ItemStack,
    pub counter: ResourceCounter,
}

impl HeldTool {
    pub fn new(stack: ItemStack) -> Self {
        Self {
            stack,
            counter: ResourceCounter::default(),
        }
    }
}

// ============================================================================
// DroppedItem
// ============================================================================

/// Стак, лежащий в мире (spawn рядом с игроком)
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct DroppedItem {
    pub stack: ItemStack,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_resource_slot_skips_non_resources() {
        let defs = ItemDefinitions::default();
        let mut inv = Inventory::with_capacity(4);
        inv.set_slot(0, Some(ItemStack::new("stick", 10)));
        inv.set_slot(2, Some(ItemStack::new("metalplate-iron", 3)));

        assert_eq!(inv.find_resource_slot(&defs), Some(2));
    }

    #[test]
    fn test_find_resource_slot_none() {
        let defs = ItemDefinitions::default();
        let mut inv = Inventory::with_capacity(2);
        inv.set_slot(0, Some(ItemStack::new("stick", 10)));

        assert_eq!(inv.find_resource_slot(&defs), None);
    }

    #[test]
    fn test_take_out_clears_empty_slot() {
        let mut inv = Inventory::with_capacity(2);
        inv.set_slot(0, Some(ItemStack::new("metalplate-iron", 2)));

        assert_eq!(inv.take_out(0, 1), 1);
        assert_eq!(inv.slot(0).map(|s| s.stack_size), Some(1));

        assert_eq!(inv.take_out(0, 5), 1);
        assert!(inv.slot(0).is_none());

        assert_eq!(inv.take_out(0, 1), 0);
        assert_eq!(inv.take_out(99, 1), 0);
    }

    #[test]
    fn test_try_give_merges_then_fills() {
        let defs = ItemDefinitions::default();
        let mut inv = Inventory::with_capacity(2);
        inv.set_slot(1, Some(ItemStack::new("padlock-iron", 15)));

        // max_stack_size padlock = 16: 1 в существующий стак, 3 в пустой слот
        assert!(inv.try_give(ItemStack::new("padlock-iron", 4), &defs).is_ok());
        assert_eq!(inv.slot(1).map(|s| s.stack_size), Some(16));
        assert_eq!(inv.slot(0).map(|s| s.stack_size), Some(3));
        assert_eq!(inv.count(&"padlock-iron".into()), 19);
    }

    #[test]
    fn test_try_give_full_returns_remainder() {
        let defs = ItemDefinitions::default();
        let mut inv = Inventory::with_capacity(1);
        inv.set_slot(0, Some(ItemStack::new("stick", 64)));

        let rest = inv.try_give(ItemStack::new("padlock-iron", 1), &defs);
        assert_eq!(rest, Err(ItemStack::new("padlock-iron", 1)));
    }
}
