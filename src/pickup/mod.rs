pub mod components;
pub mod error;
pub mod events;
mod systems;

use crate::core::states::AppState;
use bevy::prelude::*;
use events::*;
use systems::*;

pub struct PickupPlugin;
impl Plugin for PickupPlugin {
    fn build(&self, app: &mut App) {
        app
            .add_event::<BeginFocus>()
            .add_event::<EndFocus>()
            .add_event::<InteractWithPickup>()
            .add_event::<RefreshInteractionPrompt>()
            .add_event::<SpawnPickupEvent>()
            .add_systems(OnEnter(AppState::InGame), spawn_placed_pickups)
            .add_systems(
                Update,
                (
                    spawn_pickup,
                    initialize_pickups,
                    handle_focus,
                    handle_interact,
                )
                    .chain()
                    .run_if(in_state(AppState::InGame)),
            );
    }
}
