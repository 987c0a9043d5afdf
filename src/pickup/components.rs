use bevy::prelude::*;
use serde_derive::Serialize;

use super::error::PickupError;
use crate::data::schema::ItemCatalog;
use crate::inventory::components::{AddOutcome, ItemAddResult, ItemReceiver, ItemStack};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum InteractableType {
    #[default]
    Pickup,
}

/// 交互提示用的展示数据，始终由当前持有的物品推导
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct InteractableData {
    pub kind: InteractableType,
    pub name: String,
    pub action: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickupState {
    #[default]
    Active,
    /// 已经全部进了背包，等着被 despawn
    Consumed,
}

/// 世界里的外观：模型路径 + 高亮开关
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PickupVisual {
    pub mesh: Option<String>,
    pub highlighted: bool,
    pub simulate_physics: bool,
}

impl Default for PickupVisual {
    fn default() -> Self {
        Self { mesh: None, highlighted: false, simulate_physics: true }
    }
}

impl PickupVisual {
    pub fn begin_focus(&mut self) {
        self.highlighted = true;
    }

    pub fn end_focus(&mut self) {
        self.highlighted = false;
    }
}

/// 地上可以捡的物品
#[derive(Component, Debug, Clone, Default)]
#[require(PickupVisual)]
pub struct Pickup {
    pub row: Option<String>,
    pub quantity: i32,
    pub item: Option<ItemStack>,
    pub state: PickupState,
    pub interactable: InteractableData,
}

fn clamp_quantity(quantity: i32) -> u32 {
    quantity.max(1) as u32
}

impl Pickup {
    /// 摆在地图上、等待按物品表初始化的拾取物
    pub fn from_row(row: impl Into<String>, quantity: i32) -> Self {
        Self { row: Some(row.into()), quantity, ..default() }
    }

    pub fn is_consumed(&self) -> bool {
        self.state == PickupState::Consumed
    }

    pub fn initialize_from_catalog(
        &mut self,
        catalog: &impl ItemCatalog,
        visual: &mut PickupVisual,
    ) -> Result<(), PickupError> {
        let row = self.row.as_deref().ok_or(PickupError::MissingCatalogRow)?;
        let entry = catalog
            .lookup(row)
            .ok_or_else(|| PickupError::InvalidCatalogReference(row.to_string()))?;

        visual.mesh = entry.asset.mesh.clone();
        self.item = Some(ItemStack::new(entry.clone(), clamp_quantity(self.quantity)));
        self.update_interactable_data();
        Ok(())
    }

    /// 从背包里丢出来的物品：直接接管这份 ItemStack
    pub fn initialize_from_drop(
        &mut self,
        item: Option<ItemStack>,
        quantity: i32,
        visual: &mut PickupVisual,
    ) -> Result<(), PickupError> {
        let mut item = item.ok_or(PickupError::MissingItemOnDrop)?;
        item.set_quantity(clamp_quantity(quantity));

        self.row = Some(item.proto.id.clone());
        self.quantity = item.count as i32;
        visual.mesh = item.proto.asset.mesh.clone();
        self.item = Some(item);
        self.update_interactable_data();
        Ok(())
    }

    pub fn update_interactable_data(&mut self) {
        if let Some(item) = &self.item {
            self.interactable = InteractableData {
                kind: InteractableType::Pickup,
                name: item.proto.text.name.clone(),
                action: item.proto.text.interaction_text.clone(),
                quantity: item.count,
            };
        }
    }

    /// 尝试把物品放进 `inventory`。
    ///
    /// 已经被消耗的拾取物返回 `Ok(None)`，不做任何事。全部放入后状态变为
    /// `Consumed`，物品的所有权交给背包；部分放入时刷新展示数据。
    pub fn take<R: ItemReceiver + ?Sized>(
        &mut self,
        inventory: Option<&mut R>,
    ) -> Result<Option<ItemAddResult>, PickupError> {
        if self.is_consumed() {
            return Ok(None);
        }
        let item = self.item.as_mut().ok_or(PickupError::MissingItemReference)?;
        let inventory = inventory.ok_or(PickupError::MissingInventoryCapability)?;

        let result = inventory.add_item(item);
        match result.outcome {
            AddOutcome::NoneAdded => {}
            AddOutcome::PartiallyAdded { remaining, .. } => {
                item.set_quantity(remaining);
                self.update_interactable_data();
            }
            AddOutcome::FullyAdded { .. } => {
                self.state = PickupState::Consumed;
                self.item = None;
            }
        }
        Ok(Some(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::ItemList;
    use crate::inventory::components::tests::entry;
    use crate::inventory::components::Inventory;
    use rstest::rstest;

    fn catalog() -> ItemList {
        let mut apple = entry("apple", 0.5, 10, true);
        apple.asset.mesh = Some("models/apple.glb".into());
        ItemList { items: vec![apple, entry("sword", 3.0, 1, false)] }
    }

    /// 按脚本返回固定结果的背包
    struct Scripted {
        outcome: AddOutcome,
        calls: u32,
    }

    impl ItemReceiver for Scripted {
        fn add_item(&mut self, item: &mut ItemStack) -> ItemAddResult {
            self.calls += 1;
            match self.outcome {
                AddOutcome::NoneAdded => ItemAddResult::none_added("nothing"),
                AddOutcome::PartiallyAdded { added, remaining } => {
                    item.set_quantity(remaining);
                    ItemAddResult::partially_added(added, remaining, "some")
                }
                AddOutcome::FullyAdded { added } => ItemAddResult::fully_added(added, "all"),
            }
        }
    }

    fn initialized(quantity: i32) -> (Pickup, PickupVisual) {
        let mut pickup = Pickup::from_row("apple", quantity);
        let mut visual = PickupVisual::default();
        pickup.initialize_from_catalog(&catalog(), &mut visual).unwrap();
        (pickup, visual)
    }

    #[rstest]
    #[case(-5, 1)]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(7, 7)]
    fn catalog_quantity_is_at_least_one(#[case] requested: i32, #[case] held: u32) {
        let (pickup, visual) = initialized(requested);
        assert_eq!(pickup.item.as_ref().unwrap().count, held);
        assert_eq!(pickup.interactable.quantity, held);
        assert_eq!(visual.mesh.as_deref(), Some("models/apple.glb"));
    }

    #[rstest]
    #[case(-1, 1)]
    #[case(0, 1)]
    #[case(4, 4)]
    fn drop_quantity_is_at_least_one(#[case] requested: i32, #[case] held: u32) {
        let mut pickup = Pickup::default();
        let mut visual = PickupVisual::default();
        let item = ItemStack::new(entry("sword", 3.0, 1, false), 9);

        pickup.initialize_from_drop(Some(item), requested, &mut visual).unwrap();

        let held_item = pickup.item.as_ref().unwrap();
        assert_eq!(held_item.count, held);
        assert_eq!(held_item.single_weight(), 3.0);
        assert_eq!(pickup.row.as_deref(), Some("sword"));
        assert_eq!(pickup.interactable.name, "SWORD");
    }

    #[test]
    fn unknown_row_leaves_pickup_untouched() {
        let mut pickup = Pickup::from_row("pear", 3);
        let mut visual = PickupVisual::default();

        let err = pickup.initialize_from_catalog(&catalog(), &mut visual).unwrap_err();
        assert_eq!(err, PickupError::InvalidCatalogReference("pear".into()));
        assert!(pickup.item.is_none());
        assert_eq!(pickup.interactable, InteractableData::default());
        assert!(visual.mesh.is_none());
    }

    #[test]
    fn unset_row_is_reported_separately() {
        let mut pickup = Pickup { quantity: 2, ..Default::default() };
        let mut visual = PickupVisual::default();

        let err = pickup.initialize_from_catalog(&catalog(), &mut visual).unwrap_err();
        assert_eq!(err, PickupError::MissingCatalogRow);
        assert!(pickup.item.is_none());
    }

    #[test]
    fn drop_without_item_is_rejected() {
        let mut pickup = Pickup::default();
        let mut visual = PickupVisual::default();
        let err = pickup.initialize_from_drop(None, 2, &mut visual).unwrap_err();
        assert_eq!(err, PickupError::MissingItemOnDrop);
        assert!(pickup.item.is_none());
    }

    #[test]
    fn snapshot_reflects_item_text() {
        let (pickup, _) = initialized(2);
        assert_eq!(
            pickup.interactable,
            InteractableData {
                kind: InteractableType::Pickup,
                name: "APPLE".into(),
                action: "Pick up".into(),
                quantity: 2,
            }
        );
    }

    #[test]
    fn focus_toggles_highlight_only() {
        let (pickup, mut visual) = initialized(2);
        let before = visual.clone();

        visual.begin_focus();
        visual.begin_focus();
        assert!(visual.highlighted);
        visual.end_focus();

        assert_eq!(visual, before);
        assert_eq!(pickup.interactable.quantity, 2);
    }

    #[test]
    fn take_without_item_reports_missing_reference() {
        let mut pickup = Pickup::from_row("apple", 1);
        let mut inv = Inventory::new(4, 10.0);
        assert_eq!(pickup.take(Some(&mut inv)), Err(PickupError::MissingItemReference));
        assert!(!pickup.is_consumed());
        assert!(inv.slots.is_empty());
    }

    #[test]
    fn take_without_inventory_reports_missing_capability() {
        let (mut pickup, _) = initialized(2);
        assert_eq!(
            pickup.take(None::<&mut Inventory>),
            Err(PickupError::MissingInventoryCapability)
        );
        assert_eq!(pickup.item.as_ref().unwrap().count, 2);
    }

    #[test]
    fn none_added_changes_nothing() {
        let (mut pickup, _) = initialized(3);
        let mut inv = Scripted { outcome: AddOutcome::NoneAdded, calls: 0 };

        let res = pickup.take(Some(&mut inv)).unwrap().unwrap();
        assert_eq!(res.outcome, AddOutcome::NoneAdded);
        assert_eq!(pickup.state, PickupState::Active);
        assert_eq!(pickup.item.as_ref().unwrap().count, 3);
        assert_eq!(pickup.interactable.quantity, 3);
    }

    #[test]
    fn partial_add_updates_snapshot() {
        let (mut pickup, _) = initialized(5);
        let mut inv = Scripted {
            outcome: AddOutcome::PartiallyAdded { added: 3, remaining: 2 },
            calls: 0,
        };

        pickup.take(Some(&mut inv)).unwrap();
        assert_eq!(pickup.state, PickupState::Active);
        assert_eq!(pickup.item.as_ref().unwrap().count, 2);
        assert_eq!(pickup.interactable.quantity, 2);
    }

    #[test]
    fn full_add_consumes_once() {
        let (mut pickup, _) = initialized(5);
        let mut inv = Scripted { outcome: AddOutcome::FullyAdded { added: 5 }, calls: 0 };

        assert!(pickup.take(Some(&mut inv)).unwrap().is_some());
        assert!(pickup.is_consumed());
        assert!(pickup.item.is_none());

        assert_eq!(pickup.take(Some(&mut inv)), Ok(None));
        assert_eq!(inv.calls, 1);
    }

    #[test]
    fn real_inventory_partial_then_full() {
        let (mut pickup, _) = initialized(6);
        // 0.5 * 4 = 2.0，只放得下 4 个
        let mut inv = Inventory::new(4, 2.0);

        let res = pickup.take(Some(&mut inv)).unwrap().unwrap();
        assert_eq!(res.outcome, AddOutcome::PartiallyAdded { added: 4, remaining: 2 });
        assert_eq!(pickup.interactable.quantity, 2);

        inv.weight_capacity = 10.0;
        let res = pickup.take(Some(&mut inv)).unwrap().unwrap();
        assert_eq!(res.outcome, AddOutcome::FullyAdded { added: 2 });
        assert!(pickup.is_consumed());
        assert_eq!(inv.count_of("apple"), 6);
    }
}
