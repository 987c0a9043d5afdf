pub mod schema;
pub mod loader;

use bevy::prelude::*;
use schema::ItemList;
use crate::core::{events::LogEvent, resources::GameConfig, states::AppState};

// --------------------------- 资源 ---------------------------
#[derive(Resource, Default)]
pub struct ItemAssets {
    pub handle: Option<Handle<ItemList>>,
}

impl ItemAssets {
    /// 已加载完成的物品表；加载前为 None
    pub fn catalog<'a>(&self, lists: &'a Assets<ItemList>) -> Option<&'a ItemList> {
        self.handle.as_ref().and_then(|h| lists.get(h))
    }
}

// --------------------------- 插件 ---------------------------
pub struct DataPlugin;
impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app
            // 注册资产类型 & Loader
            .init_asset::<ItemList>()
            .register_asset_loader(loader::RonItemLoader)
            .init_resource::<ItemAssets>()
            // Loading 流程
            .add_systems(OnEnter(AppState::Loading), start_loading)
            .add_systems(
                Update,
                check_loaded.run_if(in_state(AppState::Loading)),
            );
    }
}

// --------------------------- 系统 ---------------------------
fn start_loading(
    mut item_assets: ResMut<ItemAssets>,
    asset_server: Res<AssetServer>,
    config: Res<GameConfig>,
) {
    info!("loading item catalog from {}", config.data.items);
    let handle: Handle<ItemList> = asset_server.load(config.data.items.clone());
    item_assets.handle = Some(handle);
}

fn check_loaded(
    mut next: ResMut<NextState<AppState>>,
    mut log: EventWriter<LogEvent>,
    item_assets: Res<ItemAssets>,
    lists: Res<Assets<ItemList>>,
) {
    if let Some(list) = item_assets.catalog(&lists) {
        log.write(LogEvent(format!("✔ Items loaded: {}", list.items.len())));
        next.set(AppState::InGame);
    }
}
