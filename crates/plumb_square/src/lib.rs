//! Plumb and Square — инструменты укрепления блоков
//!
//! ECS-логика на Bevy 0.16 (headless, без рендера)
//!
//! Два инструмента:
//! - Admin plumb and square → один блок, непробиваемое укрепление (Creative)
//! - Area plumb and square → плоскость 5x5 вокруг цели, расходует ресурс
//!
//! Хост (игровой сервер) шлёт intent events и получает обратно
//! `IngameError` / `SoundPlayed`. Мир, инвентарь и реестр укреплений
//! живут в ECS как resources/components.

use bevy::prelude::*;

// Публичные модули
pub mod components;
pub mod config;
pub mod interaction_help;
pub mod item_system;
pub mod logger;
pub mod reinforcement;
pub mod tool_mode;

// Re-export для удобства
pub use components::*;
pub use config::{ConfigError, ReinforcementSettings};
pub use interaction_help::{held_interaction_help, InteractionHelpCache, WorldInteraction};
pub use item_system::{ItemDefinition, ItemDefinitions, ItemId, ItemStack, ReinforceToolKind};
pub use logger::{init_logger, log, log_error, log_info, log_warning, LogLevel};
pub use reinforcement::{
    BlockReinforcement, BlockReinforcements, IngameError, ReinforceError, ReinforceIntent,
    ReinforcementBatchCompleted, ReinforcementPlugin, ReinforcementRegistry, ReinforcementSystems,
    RemoveReinforcementIntent, SoundPlayed, ADMIN_REINFORCE_STRENGTH, AREA_RADIUS, USES_PER_RESOURCE_UNIT,
};
pub use tool_mode::{SymbolIcons, ToolModeIcons, ToolModeMenu};

/// Главный plugin (resources + reinforcement подсистема)
///
/// Resources, уже вставленные до plugin'а (например каталог из RON), не перезаписываются.
pub struct ReinforcementToolsPlugin;

impl Plugin for ReinforcementToolsPlugin {
    fn build(&self, app: &mut App) {
        app
            // Каталог и настройки
            .init_resource::<ItemDefinitions>()
            .init_resource::<ReinforcementSettings>()
            // Состояние мира
            .init_resource::<WorldBlocks>()
            .init_resource::<BlockReinforcements>()
            // Клиентские кэши
            .init_resource::<ToolModeIcons>()
            .init_resource::<SymbolIcons>()
            .init_resource::<InteractionHelpCache>()
            .add_plugins(ReinforcementPlugin);
    }
}

/// Создаёт minimal Bevy App для headless работы
pub fn create_headless_app() -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins);

    app
}
