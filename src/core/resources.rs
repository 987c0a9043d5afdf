use bevy::prelude::*;
use serde_derive::Deserialize;
use std::path::Path;
use thiserror::Error;

/// 默认配置文件位置（相对工作目录）
pub const CONFIG_PATH: &str = "config/game.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// 全局配置，来自 config/game.toml
#[derive(Resource, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct GameConfig {
    pub log: LogConfig,
    pub data: DataConfig,
    pub inventory: InventoryConfig,
    pub pickup: PickupConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct LogConfig {
    /// 传给 LogPlugin 的 EnvFilter 字符串
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "wgpu=error,naga=warn,pickup_demo=info".into(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DataConfig {
    /// 物品表（相对 assets/）
    pub items: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            items: "data/items.ron".into(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct InventoryConfig {
    pub slot_capacity: usize,
    pub weight_capacity: f32,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            slot_capacity: 20,
            weight_capacity: 50.0,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PickupConfig {
    /// 地图上摆放的拾取物未写数量时使用
    pub default_quantity: i32,
    pub placed: Vec<PlacedPickup>,
}

impl Default for PickupConfig {
    fn default() -> Self {
        Self {
            default_quantity: 1,
            placed: Vec::new(),
        }
    }
}

/// 进入 InGame 时生成在世界里的拾取物
#[derive(Deserialize, Debug, Clone)]
pub struct PlacedPickup {
    pub row: String,
    #[serde(default)]
    pub quantity: Option<i32>,
    #[serde(default)]
    pub position: [f32; 3],
}

impl GameConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let s = std::fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// 文件不存在时退回默认值，其它错误照常返回
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg = GameConfig::from_toml_str(
            r#"
            [inventory]
            slot_capacity = 4

            [[pickup.placed]]
            row = "apple"
            quantity = 3
            "#,
        )
        .unwrap();

        assert_eq!(cfg.inventory.slot_capacity, 4);
        assert_eq!(cfg.inventory.weight_capacity, 50.0);
        assert_eq!(cfg.pickup.default_quantity, 1);
        assert_eq!(cfg.pickup.placed.len(), 1);
        assert_eq!(cfg.pickup.placed[0].quantity, Some(3));
        assert_eq!(cfg.pickup.placed[0].position, [0.0; 3]);
        assert_eq!(cfg.data.items, "data/items.ron");
    }

    #[test]
    fn bad_toml_is_an_error() {
        let err = GameConfig::from_toml_str("[inventory\nslot_capacity = ").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let cfg = GameConfig::load_or_default("definitely/not/here.toml").unwrap();
        assert_eq!(cfg.inventory.slot_capacity, 20);
    }
}
