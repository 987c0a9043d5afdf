use super::{components::*, events::*};
use crate::core::{events::LogEvent, resources::GameConfig};
use crate::inventory::components::Inventory;
use crate::pickup::components::Pickup;
use crate::pickup::events::{BeginFocus, EndFocus, InteractWithPickup, RefreshInteractionPrompt};
use bevy::prelude::*;

/// 初始化玩家实体
pub fn spawn_player(mut commands: Commands, config: Res<GameConfig>) {
    commands.spawn((
        Player,
        Interactor::default(),
        InteractionPrompt::default(),
        Inventory::new(config.inventory.slot_capacity, config.inventory.weight_capacity),
        Transform::default(),
    ));
}

/// 被看着的拾取物已经消失时，清掉焦点和提示
pub fn clear_stale_focus(
    mut interactors: Query<(&mut Interactor, Option<&mut InteractionPrompt>)>,
    pickups: Query<(), With<Pickup>>,
) {
    for (mut interactor, prompt) in &mut interactors {
        let Some(focused) = interactor.focused else {
            continue;
        };
        if pickups.get(focused).is_err() {
            interactor.focused = None;
            if let Some(mut prompt) = prompt {
                prompt.shown = None;
            }
        }
    }
}

pub fn change_focus(
    mut ev_focus: EventReader<FocusPickup>,
    mut ev_begin: EventWriter<BeginFocus>,
    mut ev_end: EventWriter<EndFocus>,
    mut ev_refresh: EventWriter<RefreshInteractionPrompt>,
    mut player: Query<(Entity, &mut Interactor), With<Player>>,
    pickups: Query<(), With<Pickup>>,
) {
    for ev in ev_focus.read() {
        let Ok((entity, mut interactor)) = player.single_mut() else {
            continue;
        };
        let target = ev.target.filter(|t| pickups.get(*t).is_ok());
        if target == interactor.focused {
            continue;
        }

        if let Some(old) = interactor.focused.take() {
            ev_end.write(EndFocus { pickup: old });
        }
        if let Some(new) = target {
            ev_begin.write(BeginFocus { pickup: new });
        }
        interactor.focused = target;
        ev_refresh.write(RefreshInteractionPrompt { interactor: entity });
    }
}

pub fn interact_with_focus(
    mut ev_interact: EventReader<InteractFocused>,
    mut ev_pickup: EventWriter<InteractWithPickup>,
    mut log: EventWriter<LogEvent>,
    player: Query<(Entity, &Interactor), With<Player>>,
) {
    for _ in ev_interact.read() {
        let Ok((entity, interactor)) = player.single() else {
            continue;
        };
        match interactor.focused {
            Some(pickup) => {
                ev_pickup.write(InteractWithPickup { pickup, interactor: entity });
            }
            None => {
                log.write(LogEvent("Nothing to interact with".into()));
            }
        }
    }
}

/// 用当前焦点的展示数据重建交互提示
pub fn refresh_interaction_prompt(
    mut ev_refresh: EventReader<RefreshInteractionPrompt>,
    mut log: EventWriter<LogEvent>,
    mut interactors: Query<(&Interactor, &mut InteractionPrompt)>,
    pickups: Query<&Pickup>,
) {
    for ev in ev_refresh.read() {
        let Ok((interactor, mut prompt)) = interactors.get_mut(ev.interactor) else {
            continue;
        };
        prompt.shown = interactor
            .focused
            .and_then(|e| pickups.get(e).ok())
            .map(|p| p.interactable.clone());

        if let Some(data) = &prompt.shown {
            log.write(LogEvent(format!("[{}] {} ×{}", data.action, data.name, data.quantity)));
        }
    }
}
