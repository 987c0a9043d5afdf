use bevy::prelude::*;

pub mod states;
pub mod events;
pub mod resources;

/// 核心插件：注册全局资源 / 事件 / 状态
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        use states::AppState;

        // main 里已经插入了从文件读到的 GameConfig 时，init_resource 不会覆盖
        app
            .init_state::<AppState>()
            .add_event::<events::LogEvent>()
            .init_resource::<resources::GameConfig>()
            .add_systems(Startup, events::announce_start);
    }
}
