//! Item System — каталог предметов и стаки
//!
//! # Архитектура
//!
//! **ItemDefinition** — статический blueprint:
//! - Хранится в `ItemDefinitions` resource (HashMap lookup)
//! - `reinforcement_strength > 0` → предмет годится как ресурс для укрепления
//! - `tool` → предмет является инструментом укрепления (admin или area)
//! - Создаются hardcoded в `ItemDefinitions::default()` или из RON (`config`)
//!
//! **ItemStack** — runtime стак:
//! - Ссылается на `ItemDefinition` через `ItemId`
//! - Integer атрибуты (`toolMode`) сериализуются вместе со стаком

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

// ============================================================================
// ItemId
// ============================================================================

/// Item code (unique string ID)
///
/// # Examples
/// - "plumbandsquare-area"
/// - "metalplate-iron"
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// ReinforceToolKind
// ============================================================================

/// Вариант инструмента укрепления
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReinforceToolKind {
    /// Один блок, максимальная прочность, только Creative
    Admin,
    /// Плоскость 5x5, тратит ресурс
    Area,
}

// ============================================================================
// ItemDefinition
// ============================================================================

/// Static item definition (blueprint)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub id: ItemId,
    pub name: String,
    #[serde(default = "default_max_stack")]
    pub max_stack_size: u32,
    /// 0 = не ресурс для укрепления
    #[serde(default)]
    pub reinforcement_strength: i32,
    #[serde(default)]
    pub tool: Option<ReinforceToolKind>,
}

fn default_max_stack() -> u32 {
    64
}

impl ItemDefinition {
    pub fn is_reinforcement_resource(&self) -> bool {
        self.reinforcement_strength > 0
    }
}

// ============================================================================
// ItemStack
// ============================================================================

/// Атрибут стака: выбранный tool mode
pub const TOOL_MODE_ATTRIBUTE: &str = "toolMode";

/// Runtime стак предметов
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item: ItemId,
    pub stack_size: u32,
    #[serde(default)]
    pub attributes: BTreeMap<String, i32>,
}

impl ItemStack {
    pub fn new(item: impl Into<ItemId>, stack_size: u32) -> Self {
        Self {
            item: item.into(),
            stack_size,
            attributes: BTreeMap::new(),
        }
    }

    /// Отсутствующий атрибут читается как 0
    pub fn get_int(&self, key: &str) -> i32 {
        self.attributes.get(key).copied().unwrap_or(0)
    }

    pub fn set_int(&mut self, key: &str, value: i32) {
        self.attributes.insert(key.to_string(), value);
    }

    /// Стаки объединяются если совпадают item и атрибуты
    pub fn can_merge_with(&self, other: &ItemStack) -> bool {
        self.item == other.item && self.attributes == other.attributes
    }
}

// ============================================================================
// ItemDefinitions (Resource)
// ============================================================================

/// Item catalog (resource)
#[derive(Resource, Clone, Debug)]
pub struct ItemDefinitions {
    definitions: HashMap<ItemId, ItemDefinition>,
}

impl ItemDefinitions {
    pub fn new() -> Self {
        Self {
            definitions: HashMap::new(),
        }
    }

    pub fn get(&self, id: &ItemId) -> Option<&ItemDefinition> {
        self.definitions.get(id)
    }

    pub fn add(&mut self, definition: ItemDefinition) {
        self.definitions.insert(definition.id.clone(), definition);
    }

    /// Все definitions, отсортированные по ID (детерминированный порядок)
    pub fn iter_sorted(&self) -> Vec<&ItemDefinition> {
        let mut defs: Vec<_> = self.definitions.values().collect();
        defs.sort_by(|a, b| a.id.cmp(&b.id));
        defs
    }

    /// Сила укрепления ресурса (0 если предмета нет в каталоге)
    pub fn reinforcement_strength(&self, id: &ItemId) -> i32 {
        self.get(id).map_or(0, |def| def.reinforcement_strength)
    }

    pub fn tool_kind(&self, id: &ItemId) -> Option<ReinforceToolKind> {
        self.get(id).and_then(|def| def.tool)
    }

    /// Все инструменты укрепления в каталоге
    pub fn tool_items(&self) -> Vec<ItemId> {
        self.iter_sorted()
            .into_iter()
            .filter(|def| def.tool.is_some())
            .map(|def| def.id.clone())
            .collect()
    }

    pub fn max_stack_size(&self, id: &ItemId) -> u32 {
        self.get(id).map_or(1, |def| def.max_stack_size.max(1))
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for ItemDefinitions {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ItemDefinitions {
    /// Hardcoded каталог: два инструмента + ресурсы укрепления
    pub fn builtin() -> Self {
        let mut defs = Self::new();

        // === TOOLS ===

        defs.add(ItemDefinition {
            id: "plumbandsquare-admin".into(),
            name: "Admin Plumb and Square".to_string(),
            max_stack_size: 1,
            reinforcement_strength: 0,
            tool: Some(ReinforceToolKind::Admin),
        });

        defs.add(ItemDefinition {
            id: "plumbandsquare-area".into(),
            name: "Big Plumb and Square".to_string(),
            max_stack_size: 1,
            reinforcement_strength: 0,
            tool: Some(ReinforceToolKind::Area),
        });

        // === REINFORCEMENT RESOURCES ===

        defs.add(ItemDefinition {
            id: "metalchain-iron".into(),
            name: "Iron Chain".to_string(),
            max_stack_size: 64,
            reinforcement_strength: 100,
            tool: None,
        });

        defs.add(ItemDefinition {
            id: "metalplate-iron".into(),
            name: "Iron Plate".to_string(),
            max_stack_size: 64,
            reinforcement_strength: 150,
            tool: None,
        });

        defs.add(ItemDefinition {
            id: "metalplate-steel".into(),
            name: "Steel Plate".to_string(),
            max_stack_size: 64,
            reinforcement_strength: 300,
            tool: None,
        });

        // === LOCKS ===

        defs.add(ItemDefinition {
            id: "padlock-iron".into(),
            name: "Iron Padlock".to_string(),
            max_stack_size: 16,
            reinforcement_strength: 0,
            tool: None,
        });

        // === MISC ===

        defs.add(ItemDefinition {
            id: "stick".into(),
            name: "Stick".to_string(),
            max_stack_size: 64,
            reinforcement_strength: 0,
            tool: None,
        });

        defs
    }
}

// ============================================================================
// Tests
// ============================================================================
