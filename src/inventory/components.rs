use bevy::prelude::*;
use crate::data::schema::ItemEntry;

/// 运行时物品实例（背包格子 / 地上的拾取物都持有它）
#[derive(Clone, Debug)]
pub struct ItemStack {
    pub proto: ItemEntry,  // 直接复制静态表条目即可
    pub count: u32,
}

impl ItemStack {
    pub fn new(proto: ItemEntry, count: u32) -> Self {
        Self { proto, count }
    }

    pub fn set_quantity(&mut self, count: u32) {
        self.count = count;
    }

    pub fn single_weight(&self) -> f32 {
        self.proto.numeric.weight
    }

    pub fn stack_weight(&self) -> f32 {
        self.single_weight() * self.count as f32
    }

    /// 每格最多能放多少个；不可堆叠的物品一格一个
    pub fn max_stack(&self) -> u32 {
        if self.proto.numeric.is_stackable {
            self.proto.numeric.max_stack_size.max(1)
        } else {
            1
        }
    }

    pub fn is_full_stack(&self) -> bool {
        self.count >= self.max_stack()
    }

    pub fn name(&self) -> &str {
        &self.proto.text.name
    }
}

/// 往背包里加物品的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    NoneAdded,
    PartiallyAdded { added: u32, remaining: u32 },
    FullyAdded { added: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemAddResult {
    pub outcome: AddOutcome,
    pub message: String,
}

impl ItemAddResult {
    pub fn none_added(message: impl Into<String>) -> Self {
        Self { outcome: AddOutcome::NoneAdded, message: message.into() }
    }

    pub fn partially_added(added: u32, remaining: u32, message: impl Into<String>) -> Self {
        Self {
            outcome: AddOutcome::PartiallyAdded { added, remaining },
            message: message.into(),
        }
    }

    pub fn fully_added(added: u32, message: impl Into<String>) -> Self {
        Self { outcome: AddOutcome::FullyAdded { added }, message: message.into() }
    }
}

/// 能接收物品的一方。部分加入时会把 `item.count` 改成剩余数量
pub trait ItemReceiver {
    fn add_item(&mut self, item: &mut ItemStack) -> ItemAddResult;
}

/// 按"个"计的容差：差不到万分之一个也算放得下
const WEIGHT_TOLERANCE: f32 = 1e-4;

/// 玩家背包（挂在玩家实体上）
#[derive(Component, Debug, Clone)]
pub struct Inventory {
    pub slots: Vec<ItemStack>,
    pub slot_capacity: usize,
    pub weight_capacity: f32,
}

impl Inventory {
    pub fn new(slot_capacity: usize, weight_capacity: f32) -> Self {
        Self { slots: Vec::with_capacity(slot_capacity), slot_capacity, weight_capacity }
    }

    pub fn total_weight(&self) -> f32 {
        self.slots.iter().map(ItemStack::stack_weight).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemStack> {
        self.slots.iter()
    }

    pub fn count_of(&self, id: &str) -> u32 {
        self.slots.iter().filter(|s| s.proto.id == id).map(|s| s.count).sum()
    }

    pub fn find_partial_stack(&mut self, id: &str) -> Option<&mut ItemStack> {
        self.slots
            .iter_mut()
            .find(|s| s.proto.id == id && !s.is_full_stack())
    }

    /// 在重量上限内还能再放多少个单重为 `single_weight` 的物品。
    ///
    /// 累加的 f32 重量会有舍入误差，刚好装满的情况要按能放下算
    fn weight_room(&self, single_weight: f32) -> u32 {
        if single_weight <= 0.0 {
            return u32::MAX;
        }
        let free = self.weight_capacity - self.total_weight();
        if free <= 0.0 {
            return 0;
        }
        (free / single_weight + WEIGHT_TOLERANCE).floor() as u32
    }

    /// 从第 `index` 格取出至多 `amount` 个；格子空了就移除
    pub fn remove_amount(&mut self, index: usize, amount: u32) -> Option<ItemStack> {
        let stack = self.slots.get_mut(index)?;
        let taken = amount.min(stack.count);
        if taken == 0 {
            return None;
        }
        if taken == stack.count {
            return Some(self.slots.remove(index));
        }
        stack.count -= taken;
        Some(ItemStack::new(stack.proto.clone(), taken))
    }
}

impl ItemReceiver for Inventory {
    fn add_item(&mut self, item: &mut ItemStack) -> ItemAddResult {
        let requested = item.count;
        let name = item.name().to_string();

        if requested == 0 {
            return ItemAddResult::none_added(format!(
                "Could not add {name} to inventory. Quantity is zero."
            ));
        }

        let single_weight = item.single_weight();
        let max_stack = item.max_stack();
        let mut remaining = requested;
        let mut weight_blocked = false;

        // 先补满已有的同类格子
        while remaining > 0 {
            let room = self.weight_room(single_weight);
            if room == 0 {
                weight_blocked = true;
                break;
            }
            let Some(stack) = self.find_partial_stack(&item.proto.id) else {
                break;
            };
            let n = (max_stack - stack.count).min(remaining).min(room);
            stack.count += n;
            remaining -= n;
        }

        // 再开新格子
        while remaining > 0 && !weight_blocked {
            if self.slots.len() >= self.slot_capacity {
                break;
            }
            let room = self.weight_room(single_weight);
            if room == 0 {
                weight_blocked = true;
                break;
            }
            let n = max_stack.min(remaining).min(room);
            self.slots.push(ItemStack::new(item.proto.clone(), n));
            remaining -= n;
        }

        let added = requested - remaining;
        item.set_quantity(remaining);

        if remaining == 0 {
            ItemAddResult::fully_added(added, format!("Added all {added} {name} to inventory."))
        } else if added > 0 {
            ItemAddResult::partially_added(
                added,
                remaining,
                format!("Partial amount of {name} added to inventory. Number added = {added}"),
            )
        } else if weight_blocked {
            ItemAddResult::none_added(format!(
                "Could not add {name} to inventory. Item would overflow weight limit."
            ))
        } else {
            ItemAddResult::none_added(format!(
                "Could not add {name} to inventory. All inventory slots are full."
            ))
        }
    }
}
