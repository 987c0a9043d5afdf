use anyhow::Context;
use bevy::log::LogPlugin;
use bevy::prelude::*;

mod character;
mod core;
mod data;
mod interface;
mod inventory;
mod pickup;

use character::CharacterPlugin;
use crate::core::CorePlugin;
use crate::core::resources::{GameConfig, CONFIG_PATH};
use interface::debug_cli::DebugCliPlugin;
use inventory::InventoryPlugin;
use pickup::PickupPlugin;
use crate::core::states;

fn main() -> anyhow::Result<()> {
    let config = GameConfig::load_or_default(CONFIG_PATH)
        .with_context(|| format!("loading {CONFIG_PATH}"))?;

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        visible: false,
                        ..default()
                    }),   // 隐藏主窗口，实现"无 UI"
                    ..default()
                })
                .set(LogPlugin {
                    filter: config.log.filter.clone(),
                    ..default()
                }),
        )
        .insert_resource(config)
        .add_plugins(CorePlugin)
        .add_plugins(DebugCliPlugin)
        .add_plugins(data::DataPlugin)
        .add_plugins((InventoryPlugin, PickupPlugin, CharacterPlugin))
        .add_systems(Update, forward_log_event) // 简单打印
        .add_systems(Startup, |mut next: ResMut<NextState<states::AppState>>| {
            next.set(states::AppState::Loading);
        })
        .run();

    Ok(())
}

fn forward_log_event(mut reader: EventReader<crate::core::events::LogEvent>) {
    for e in reader.read() {
        println!("> {}", e.0);
    }
}
