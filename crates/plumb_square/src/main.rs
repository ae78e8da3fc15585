//! Headless демо инструментов укрепления
//!
//! Загружает каталог из assets/, ставит стену 9x9, укрепляет её
//! area-инструментом и печатает итог.

use bevy::prelude::*;
use plumb_square::config::{load_item_definitions, load_settings};
use plumb_square::reinforcement::{BatchKind, ReinforcementBatchCompleted};
use plumb_square::*;

fn main() {
    let assets = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");

    let mut app = create_headless_app();

    match load_item_definitions(assets.join("items.ron")) {
        Ok(defs) => {
            app.insert_resource(defs);
        }
        Err(err) => log_warning(&format!("items.ron not loaded ({}), using builtin catalog", err)),
    }
    match load_settings(assets.join("settings.ron")) {
        Ok(settings) => {
            app.insert_resource(settings);
        }
        Err(err) => log_warning(&format!("settings.ron not loaded ({}), using defaults", err)),
    }

    app.add_plugins(ReinforcementToolsPlugin);

    // Стена 9x9 в плоскости z = 0
    app.world_mut().resource_mut::<WorldBlocks>().fill(
        BlockPos::new(-4, 6, 0),
        BlockPos::new(4, 14, 0),
        "cobblestone",
        true,
    );

    let mut inventory = Inventory::default();
    inventory.set_slot(0, Some(ItemStack::new("metalplate-iron", 4)));

    let player = app
        .world_mut()
        .spawn((
            Player::new("uid-alice", "Alice"),
            GameMode::Survival,
            GroupMemberships::default(),
            inventory,
            HeldTool::new(ItemStack::new("plumbandsquare-area", 1)),
            Transform::from_xyz(0.0, 10.0, 3.0),
        ))
        .id();

    // Startup
    app.update();

    println!("Starting plumb and square demo");

    for target in [BlockPos::new(0, 10, 0), BlockPos::new(2, 10, 0), BlockPos::new(0, 20, 0)] {
        app.world_mut().send_event(ReinforceIntent {
            player,
            block_sel: Some(BlockSelection::new(target, BlockFacing::North)),
        });
        app.update();

        let reinforced = app.world().resource::<BlockReinforcements>().len();
        let plates = app
            .world()
            .get::<Inventory>(player)
            .map_or(0, |inv| inv.count(&"metalplate-iron".into()));
        println!("Reinforce at {}: {} blocks reinforced, {} plates left", target, reinforced, plates);
    }

    let events = app.world().resource::<Events<ReinforcementBatchCompleted>>();
    let applied = events
        .iter_current_update_events()
        .filter(|e| e.kind == BatchKind::Apply)
        .count();
    log(&format!("Last update completed {} apply batches", applied));

    app.world_mut().send_event(AppExit::Success);
    app.update();

    println!("Demo complete!");
}
