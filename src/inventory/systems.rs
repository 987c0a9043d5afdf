use super::{components::*, events::*};
use crate::character::components::Player;
use crate::core::events::LogEvent;
use crate::data::{schema::{ItemCatalog, ItemList}, ItemAssets};
use crate::pickup::components::{Pickup, PickupVisual};
use crate::pickup::error::PickupError;
use bevy::prelude::*;

/// 处理"give"——按物品表 id 直接往玩家背包里塞；放不下的部分掉在玩家面前
pub fn give_item(
    mut ev_give: EventReader<GiveItemEvent>,
    mut log: EventWriter<LogEvent>,
    mut commands: Commands,
    mut player: Query<(&mut Inventory, Option<&Transform>), With<Player>>,
    item_assets: Res<ItemAssets>,
    lists: Res<Assets<ItemList>>,
) {
    let Some(catalog) = item_assets.catalog(&lists) else {
        return;
    };

    for ev in ev_give.read() {
        let Ok((mut inventory, transform)) = player.single_mut() else {
            warn!("no player inventory to give {} to", ev.id);
            continue;
        };
        let Some(proto) = catalog.lookup(&ev.id) else {
            log.write(LogEvent(format!("Unknown item id {}", ev.id)));
            continue;
        };

        let mut stack = ItemStack::new(proto.clone(), ev.count);
        let result = inventory.add_item(&mut stack);
        info!("{}", result.message);
        log.write(LogEvent(result.message));

        if let AddOutcome::PartiallyAdded { remaining, .. } = result.outcome {
            let name = stack.name().to_string();
            match spawn_dropped(&mut commands, stack, in_front_of(transform)) {
                Ok(()) => {
                    log.write(LogEvent(format!("{remaining} {name} did not fit and fell on the ground")));
                }
                Err(e) => error!("could not drop leftover {name}: {e}"),
            }
        }
    }
}

/// 从背包取出物品并在玩家面前生成拾取物
pub fn drop_item(
    mut ev_drop: EventReader<DropItemEvent>,
    mut log: EventWriter<LogEvent>,
    mut commands: Commands,
    mut player: Query<(&mut Inventory, Option<&Transform>), With<Player>>,
) {
    for ev in ev_drop.read() {
        if ev.count == 0 {
            log.write(LogEvent("Nothing to drop: count is zero".into()));
            continue;
        }
        let Ok((mut inventory, transform)) = player.single_mut() else {
            warn!("no player inventory to drop from");
            continue;
        };
        let Some(item) = inventory.remove_amount(ev.index, ev.count) else {
            log.write(LogEvent(format!("Slot {} is empty", ev.index)));
            continue;
        };

        let dropped = item.count;
        let name = item.name().to_string();
        match spawn_dropped(&mut commands, item, in_front_of(transform)) {
            Ok(()) => {
                log.write(LogEvent(format!("Dropped {dropped} {name}")));
            }
            Err(e) => error!("drop failed: {e}"),
        }
    }
}

fn in_front_of(transform: Option<&Transform>) -> Vec3 {
    transform
        .map(|t| t.translation + t.forward() * 1.0)
        .unwrap_or_default()
}

/// 把一份已经离开背包的物品变成地上的拾取物
fn spawn_dropped(commands: &mut Commands, item: ItemStack, at: Vec3) -> Result<(), PickupError> {
    let quantity = item.count as i32;
    let mut pickup = Pickup::default();
    let mut visual = PickupVisual::default();
    pickup.initialize_from_drop(Some(item), quantity, &mut visual)?;
    commands.spawn((pickup, visual, Transform::from_translation(at)));
    Ok(())
}

/// 打印背包内容
pub fn print_inventory(
    mut ev_list: EventReader<ListInventoryEvent>,
    mut log: EventWriter<LogEvent>,
    player: Query<&Inventory, With<Player>>,
) {
    if ev_list.is_empty() {
        return;
    }
    ev_list.clear();

    let Ok(inventory) = player.single() else {
        return;
    };

    if inventory.slots.is_empty() {
        log.write(LogEvent("  (empty)".into()));
        return;
    }
    for (idx, stack) in inventory.iter().enumerate() {
        log.write(LogEvent(format!(
            "[{idx}] {} ×{} (id={}, {:.1}kg)",
            stack.name(), stack.count, stack.proto.id, stack.stack_weight()
        )));
    }
    log.write(LogEvent(format!(
        "Slots {}/{}, weight {:.1}/{:.1}",
        inventory.slots.len(),
        inventory.slot_capacity,
        inventory.total_weight(),
        inventory.weight_capacity
    )));
}
