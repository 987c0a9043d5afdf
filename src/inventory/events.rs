use bevy::prelude::*;

#[derive(Event)]
pub struct GiveItemEvent {
    pub id:    String,
    pub count: u32,
}

#[derive(Event)]
pub struct ListInventoryEvent;   // 让 CLI 请求打印背包

/// 把背包第 `index` 格丢 `count` 个到地上
#[derive(Event)]
pub struct DropItemEvent {
    pub index: usize,
    pub count: u32,
}
