//! Held interaction help — подсказки UI для инструментов укрепления
//!
//! Список ресурсов укрепления вычисляется по всему каталогу один раз и
//! кэшируется под фиксированным ключом. Кэш общий для обоих tool items.
//! Инвалидируется явно (`invalidate_all`) при teardown приложения.

use bevy::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

use crate::item_system::{ItemDefinitions, ItemStack};

/// Ключ кэша (общий для admin и area инструмента)
pub const INTERACTIONS_CACHE_KEY: &str = "plumbAndSquareInteractions";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionButton {
    Left,
    Right,
}

/// Одна подсказка: кнопка + действие + подходящие стаки
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldInteraction {
    pub action_lang_code: &'static str,
    pub button: InteractionButton,
    pub stacks: Vec<ItemStack>,
}

/// Process-wide memoized cache (один экземпляр на App)
#[derive(Resource, Debug, Default)]
pub struct InteractionHelpCache {
    entries: HashMap<&'static str, Arc<[WorldInteraction]>>,
    computed: u32,
}

impl InteractionHelpCache {
    pub fn get_or_create(
        &mut self,
        key: &'static str,
        create: impl FnOnce() -> Vec<WorldInteraction>,
    ) -> Arc<[WorldInteraction]> {
        if let Some(cached) = self.entries.get(key) {
            return Arc::clone(cached);
        }
        self.computed += 1;
        let value: Arc<[WorldInteraction]> = create().into();
        self.entries.insert(key, Arc::clone(&value));
        value
    }

    pub fn get(&self, key: &str) -> Option<Arc<[WorldInteraction]>> {
        self.entries.get(key).cloned()
    }

    /// Сколько раз реально вычислялось значение
    pub fn computed_count(&self) -> u32 {
        self.computed
    }

    pub fn invalidate_all(&mut self) {
        self.entries.clear();
    }
}

/// Подсказки для инструмента в руке (ПКМ: укрепить, ЛКМ: снять)
pub fn held_interaction_help(
    cache: &mut InteractionHelpCache,
    definitions: &ItemDefinitions,
) -> Arc<[WorldInteraction]> {
    cache.get_or_create(INTERACTIONS_CACHE_KEY, || {
        let stacks: Vec<ItemStack> = definitions
            .iter_sorted()
            .into_iter()
            .filter(|def| def.is_reinforcement_resource())
            .map(|def| ItemStack::new(def.id.clone(), 1))
            .collect();

        vec![
            WorldInteraction {
                action_lang_code: "heldhelp-reinforceblock",
                button: InteractionButton::Right,
                stacks: stacks.clone(),
            },
            WorldInteraction {
                action_lang_code: "heldhelp-removereinforcement",
                button: InteractionButton::Left,
                stacks,
            },
        ]
    })
}
