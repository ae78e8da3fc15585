//! Reinforcement module — применение и снятие укреплений
//!
//! # Architecture
//!
//! **Events → Systems flow:**
//! - Хост/ввод шлёт intent events (`ReinforceIntent`, `RemoveReinforcementIntent`)
//! - Системы вызывают applier (чистые функции над registry + inventory)
//! - Итог уходит обратно событиями (`IngameError`, `SoundPlayed`)
//!
//! **Variants:**
//! - Admin → один блок, `ADMIN_REINFORCE_STRENGTH`, только Creative
//! - Area → плоскость 5x5, 1 ресурс на 25 укреплений
//!
//! Вариант выбирается по `ReinforceToolKind` предмета в руке.

use bevy::prelude::*;

pub mod applier;
pub mod area;
pub mod counter;
pub mod error;
pub mod events;
pub mod registry;
pub mod systems;

mod applier_tests;

// Re-exports
pub use applier::*;
pub use area::*;
pub use counter::*;
pub use error::*;
pub use events::*;
pub use registry::*;
pub use systems::*;

/// Системы инструментов (для ordering снаружи)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReinforcementSystems;

/// Reinforcement plugin (events + systems)
pub struct ReinforcementPlugin;

impl Plugin for ReinforcementPlugin {
    fn build(&self, app: &mut App) {
        app
            // Events
            .add_event::<ReinforceIntent>()
            .add_event::<RemoveReinforcementIntent>()
            .add_event::<SetToolModeIntent>()
            .add_event::<OpenToolModeMenuIntent>()
            .add_event::<ToolItemUnloaded>()
            .add_event::<IngameError>()
            .add_event::<SoundPlayed>()
            .add_event::<ReinforcementBatchCompleted>()
            // Lifecycle
            .add_systems(Startup, (apply_settings, load_tool_items).chain())
            // Actions (последовательно: tool mode до apply)
            .add_systems(
                Update,
                (
                    process_set_tool_mode,
                    process_reinforce_intents,
                    process_remove_intents,
                    process_open_tool_mode_menu,
                    release_tool_item_icons,
                )
                    .chain()
                    .in_set(ReinforcementSystems),
            )
            .add_systems(Last, release_on_exit);
    }
}
