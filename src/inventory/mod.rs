pub mod components;
pub mod events;
mod systems;

use bevy::prelude::*;
use crate::core::states::AppState;
use events::*;
use systems::*;

pub struct InventoryPlugin;
impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        app
            .add_event::<GiveItemEvent>()
            .add_event::<ListInventoryEvent>()
            .add_event::<DropItemEvent>()
            .add_systems(
                Update,
                (
                    give_item,
                    drop_item,
                    print_inventory,
                ).run_if(in_state(AppState::InGame)),
            );
    }
}
