use bevy::prelude::*;

/// 玩家把视线移到 `target`（None 表示移开）
#[derive(Event, Debug, Clone, Copy)]
pub struct FocusPickup {
    pub target: Option<Entity>,
}

/// 与当前看着的拾取物交互
#[derive(Event, Debug, Clone, Copy)]
pub struct InteractFocused;
