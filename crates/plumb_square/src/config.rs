//! Configuration loading (RON)
//!
//! - Item catalog: RON список `ItemDefinition`
//! - `ReinforcementSettings`: звук укрепления, размер иконок, уровень логов
//!
//! Отсутствующие поля берутся из `Default`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::item_system::{ItemDefinition, ItemDefinitions};
use crate::logger::LogLevel;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("Duplicate item id in catalog: {0}")]
    DuplicateItem(String),
}

/// Настройки инструментов укрепления (resource)
#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReinforcementSettings {
    /// Asset path звука, проигрываемого один раз на batch
    pub reinforce_sound: String,
    /// Сторона иконки режима в пикселях
    pub icon_size: u32,
    pub log_level: LogLevel,
}

impl Default for ReinforcementSettings {
    fn default() -> Self {
        Self {
            reinforce_sound: "sounds/tool/reinforce".to_string(),
            icon_size: 48,
            log_level: LogLevel::Info,
        }
    }
}

/// Распарсить каталог предметов из RON текста
pub fn load_item_definitions_ron(text: &str) -> Result<ItemDefinitions, ConfigError> {
    let list: Vec<ItemDefinition> = ron::from_str(text)?;

    let mut defs = ItemDefinitions::new();
    for def in list {
        if defs.get(&def.id).is_some() {
            return Err(ConfigError::DuplicateItem(def.id.0));
        }
        defs.add(def);
    }
    Ok(defs)
}

pub fn load_item_definitions(path: impl AsRef<Path>) -> Result<ItemDefinitions, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    load_item_definitions_ron(&text)
}

pub fn load_settings_ron(text: &str) -> Result<ReinforcementSettings, ConfigError> {
    Ok(ron::from_str(text)?)
}

pub fn load_settings(path: impl AsRef<Path>) -> Result<ReinforcementSettings, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    load_settings_ron(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item_system::ReinforceToolKind;

    const CATALOG: &str = r#"[
        (id: "plumbandsquare-area", name: "Big Plumb and Square", max_stack_size: 1, tool: Some(Area)),
        (id: "metalplate-copper", name: "Copper Plate", reinforcement_strength: 75),
    ]"#;

    #[test]
    fn test_load_catalog() {
        let defs = load_item_definitions_ron(CATALOG).unwrap();

        assert_eq!(defs.len(), 2);
        assert_eq!(defs.tool_kind(&"plumbandsquare-area".into()), Some(ReinforceToolKind::Area));
        assert_eq!(defs.reinforcement_strength(&"metalplate-copper".into()), 75);
        // max_stack_size по умолчанию
        assert_eq!(defs.max_stack_size(&"metalplate-copper".into()), 64);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let text = r#"[
            (id: "stick", name: "Stick"),
            (id: "stick", name: "Another Stick"),
        ]"#;
        assert!(matches!(
            load_item_definitions_ron(text),
            Err(ConfigError::DuplicateItem(id)) if id == "stick"
        ));
    }

    #[test]
    fn test_bad_ron_is_error() {
        assert!(matches!(load_item_definitions_ron("[ (id: "), Err(ConfigError::Ron(_))));
    }

    #[test]
    fn test_settings_defaults_for_missing_fields() {
        let settings = load_settings_ron("(log_level: Debug)").unwrap();
        assert_eq!(settings.log_level, LogLevel::Debug);
        assert_eq!(settings.reinforce_sound, "sounds/tool/reinforce");
        assert_eq!(settings.icon_size, 48);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            load_item_definitions("/nonexistent/items.ron"),
            Err(ConfigError::Io(_))
        ));
    }
}
