use super::{components::*, events::*};
use crate::core::{events::LogEvent, resources::GameConfig};
use crate::data::{schema::ItemList, ItemAssets};
use crate::inventory::components::{AddOutcome, Inventory};
use bevy::prelude::*;

/// 进入游戏时生成配置里摆好的拾取物
pub fn spawn_placed_pickups(mut commands: Commands, config: Res<GameConfig>) {
    for placed in &config.pickup.placed {
        let quantity = placed.quantity.unwrap_or(config.pickup.default_quantity);
        commands.spawn((
            Pickup::from_row(placed.row.clone(), quantity),
            Transform::from_translation(Vec3::from_array(placed.position)),
        ));
    }
}

/// 处理 CLI 等发来的生成请求
pub fn spawn_pickup(mut ev_spawn: EventReader<SpawnPickupEvent>, mut commands: Commands) {
    for ev in ev_spawn.read() {
        commands.spawn((
            Pickup::from_row(ev.row.clone(), ev.quantity),
            Transform::from_translation(ev.position),
        ));
    }
}

/// 新出现、还没有物品的拾取物按物品表初始化；查不到就保持原样
pub fn initialize_pickups(
    mut pickups: Query<(Entity, &mut Pickup, &mut PickupVisual), Added<Pickup>>,
    item_assets: Res<ItemAssets>,
    lists: Res<Assets<ItemList>>,
) {
    let Some(catalog) = item_assets.catalog(&lists) else {
        return;
    };

    for (entity, mut pickup, mut visual) in &mut pickups {
        if pickup.item.is_some() {
            continue;
        }
        if let Err(e) = pickup.initialize_from_catalog(catalog, &mut visual) {
            debug!("pickup {entity} not initialized: {e}");
        }
    }
}

pub fn handle_focus(
    mut ev_begin: EventReader<BeginFocus>,
    mut ev_end: EventReader<EndFocus>,
    mut visuals: Query<&mut PickupVisual>,
) {
    for ev in ev_end.read() {
        if let Ok(mut visual) = visuals.get_mut(ev.pickup) {
            visual.end_focus();
        }
    }
    for ev in ev_begin.read() {
        if let Ok(mut visual) = visuals.get_mut(ev.pickup) {
            visual.begin_focus();
        }
    }
}

/// 拾取：全部放进背包就移出世界，部分放进就让玩家刷新提示
pub fn handle_interact(
    mut ev_interact: EventReader<InteractWithPickup>,
    mut ev_refresh: EventWriter<RefreshInteractionPrompt>,
    mut log: EventWriter<LogEvent>,
    mut commands: Commands,
    mut pickups: Query<&mut Pickup>,
    mut interactors: Query<Option<&mut Inventory>>,
) {
    for ev in ev_interact.read() {
        let Ok(mut pickup) = pickups.get_mut(ev.pickup) else {
            debug!("interaction target {} is not a pickup", ev.pickup);
            continue;
        };

        let mut inventory = interactors.get_mut(ev.interactor).ok().flatten();

        match pickup.take(inventory.as_deref_mut()) {
            Ok(None) => {}
            Ok(Some(result)) => {
                match result.outcome {
                    AddOutcome::NoneAdded => {}
                    AddOutcome::PartiallyAdded { .. } => {
                        ev_refresh.write(RefreshInteractionPrompt { interactor: ev.interactor });
                    }
                    AddOutcome::FullyAdded { .. } => {
                        commands.entity(ev.pickup).despawn();
                    }
                }
                info!("{}", result.message);
                log.write(LogEvent(result.message));
            }
            Err(e) => error!("pickup {} interaction aborted: {e}", ev.pickup),
        }
    }
}
