use bevy::asset::Asset;
use bevy::reflect::TypePath;
use serde_derive::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ItemType {
    Armor,
    Weapon,
    Shield,
    Spell,
    Consumable,
    Quest,
    #[default]
    Mundane,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ItemQuality {
    Shoddy,
    #[default]
    Common,
    Quality,
    Masterwork,
    Grandmaster,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemText {
    pub name: String,
    #[serde(default)] pub description: String,
    /// 拾取提示里的动作文字，比如 "Pick up"
    #[serde(default)] pub interaction_text: String,
    #[serde(default)] pub usage_text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemNumeric {
    #[serde(default)] pub weight: f32,
    #[serde(default = "one")] pub max_stack_size: u32,
    #[serde(default)] pub is_stackable: bool,
}

impl Default for ItemNumeric {
    fn default() -> Self {
        Self { weight: 0.0, max_stack_size: 1, is_stackable: false }
    }
}

fn one() -> u32 {
    1
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemAsset {
    #[serde(default)] pub icon: Option<String>,
    /// 世界里显示用的模型路径
    #[serde(default)] pub mesh: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemStatistics {
    #[serde(default)] pub armor_rating: f32,
    #[serde(default)] pub damage_value: f32,
    #[serde(default)] pub restoration_amount: f32,
    #[serde(default)] pub sell_value: f32,
}

/// 物品表里的一行
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemEntry {
    pub id: String,
    #[serde(default)] pub item_type: ItemType,
    #[serde(default)] pub quality: ItemQuality,
    pub text: ItemText,
    #[serde(default)] pub numeric: ItemNumeric,
    #[serde(default)] pub asset: ItemAsset,
    #[serde(default)] pub stats: ItemStatistics,
}

#[derive(Asset, TypePath, Deserialize, Debug, Default)]
pub struct ItemList {
    pub items: Vec<ItemEntry>,
}

/// 按行 id 查物品表
pub trait ItemCatalog {
    fn lookup(&self, row: &str) -> Option<&ItemEntry>;
}

impl ItemCatalog for ItemList {
    fn lookup(&self, row: &str) -> Option<&ItemEntry> {
        self.items.iter().find(|e| e.id.eq_ignore_ascii_case(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::asset::ron;

    const SAMPLE: &str = r#"(
        items: [
            (
                id: "apple",
                item_type: Consumable,
                text: (name: "Apple", interaction_text: "Pick up"),
                numeric: (weight: 0.2, max_stack_size: 10, is_stackable: true),
                asset: (mesh: Some("models/apple.glb")),
            ),
            (
                id: "sword",
                text: (name: "Sword"),
            ),
        ],
    )"#;

    #[test]
    fn parses_rows_and_fills_defaults() {
        let list: ItemList = ron::de::from_str(SAMPLE).unwrap();
        assert_eq!(list.items.len(), 2);

        let apple = list.lookup("apple").unwrap();
        assert_eq!(apple.item_type, ItemType::Consumable);
        assert_eq!(apple.numeric.max_stack_size, 10);
        assert_eq!(apple.asset.mesh.as_deref(), Some("models/apple.glb"));

        let sword = list.lookup("SWORD").unwrap();
        assert_eq!(sword.quality, ItemQuality::Common);
        assert_eq!(sword.numeric.max_stack_size, 1);
        assert!(!sword.numeric.is_stackable);
        assert!(sword.asset.mesh.is_none());
    }

    #[test]
    fn unknown_row_is_none() {
        let list: ItemList = ron::de::from_str(SAMPLE).unwrap();
        assert!(list.lookup("pear").is_none());
    }
}
