use bevy::prelude::*;
use crate::pickup::components::InteractableData;

/// 玩家标记组件
#[derive(Component)]
pub struct Player;

/// 能与拾取物交互的一方，记录当前看着哪个
#[derive(Component, Debug, Default)]
pub struct Interactor {
    pub focused: Option<Entity>,
}

/// 当前显示的交互提示
#[derive(Component, Debug, Default)]
pub struct InteractionPrompt {
    pub shown: Option<InteractableData>,
}
