use bevy::prelude::*;

/// 玩家开始看向某个拾取物
#[derive(Event, Debug, Clone, Copy)]
pub struct BeginFocus {
    pub pickup: Entity,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct EndFocus {
    pub pickup: Entity,
}

/// `interactor` 想把 `pickup` 捡进自己的背包
#[derive(Event, Debug, Clone, Copy)]
pub struct InteractWithPickup {
    pub pickup: Entity,
    pub interactor: Entity,
}

/// 请求 `interactor` 刷新交互提示（部分拾取后数量变了）
#[derive(Event, Debug, Clone, Copy)]
pub struct RefreshInteractionPrompt {
    pub interactor: Entity,
}

/// 按物品表 id 在世界里生成一个拾取物
#[derive(Event, Debug, Clone)]
pub struct SpawnPickupEvent {
    pub row: String,
    pub quantity: i32,
    pub position: Vec3,
}
