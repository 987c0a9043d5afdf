//! 文字 CLI：读取 stdin → 解析命令 → 执行并打印

use bevy::app::AppExit;
use bevy::prelude::*;
use once_cell::sync::Lazy;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::character::events::{FocusPickup, InteractFocused};
use crate::core::{events::LogEvent, resources::GameConfig, states::AppState};
use crate::data::{schema::ItemList, ItemAssets};
use crate::inventory::events::{DropItemEvent, GiveItemEvent, ListInventoryEvent};
use crate::pickup::components::{Pickup, PickupVisual};
use crate::pickup::events::SpawnPickupEvent;

static CLI_BUFFER: Lazy<Arc<Mutex<VecDeque<String>>>> =
    Lazy::new(|| Arc::new(Mutex::new(VecDeque::new())));

/// 插件入口
pub struct DebugCliPlugin;
impl Plugin for DebugCliPlugin {
    fn build(&self, app: &mut App) {
        {
            let buffer = CLI_BUFFER.clone();
            std::thread::spawn(move || {
                use std::io::{self, BufRead};
                let stdin = io::stdin();
                for line in stdin.lock().lines().map_while(Result::ok) {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    match buffer.lock() {
                        Ok(mut buf) => buf.push_back(line.to_string()),
                        Err(_) => break,
                    }
                }
            });
        }
        app
            // 事件：原始输入行
            .add_event::<CliLine>()
            // 每帧从 buffer 取出所有命令行写入事件
            .add_systems(Update, read_stdin)
            // 仅在 InGame 处理命令
            .add_systems(
                Update,
                execute_cli_commands.run_if(in_state(AppState::InGame)),
            );
    }
}

/* ---------------------------- 事件与枚举 ---------------------------- */

/// 终端敲的一整行
#[derive(Event)]
struct CliLine(String);

/// 我们支持的命令
#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Status,
    Exit,
    Items(Option<String>), // None=全部；Some(token)=按 id/uuid/name 查询
    Give { id: String, count: u32 },
    Inventory,
    Spawn { id: String, count: Option<i32> },
    Pickups,
    Look(usize),
    Unlook,
    Take,
    Drop { index: usize, count: u32 },
    Inspect(usize),
    Unsupported(String),
}

const HELP: &str = "Commands:
  help                   show this help
  status                 current state
  exit / quit            quit
  items [token]          list catalog, or look up by id / uuid / name
  give <id> [count]      put items straight into the inventory
  inventory              show inventory
  spawn <id> [count]     place a pickup in the world
  pickups                list pickups in the world
  look <n> / unlook      focus pickup n / stop focusing
  take                   pick up the focused pickup
  drop <slot> [count]    drop items from an inventory slot
  inspect <n>            dump pickup n as JSON";

/* ---------------------------- 读取 stdin ---------------------------- */

fn read_stdin(mut writer: EventWriter<CliLine>) {
    let Ok(mut buffer) = CLI_BUFFER.lock() else {
        return;
    };
    while let Some(line) = buffer.pop_front() {
        writer.write(CliLine(line));
    }
}

/* ---------------------------- 命令执行 ---------------------------- */

#[allow(clippy::too_many_arguments)]
fn execute_cli_commands(
    mut line_reader: EventReader<CliLine>,
    mut app_exit: EventWriter<AppExit>,
    mut log: EventWriter<LogEvent>,
    state: Res<State<AppState>>,
    config: Res<GameConfig>,
    item_assets: Res<ItemAssets>,
    lists: Res<Assets<ItemList>>,
    mut ev_give: EventWriter<GiveItemEvent>,
    mut ev_list: EventWriter<ListInventoryEvent>,
    mut ev_drop: EventWriter<DropItemEvent>,
    mut ev_spawn: EventWriter<SpawnPickupEvent>,
    mut ev_focus: EventWriter<FocusPickup>,
    mut ev_interact: EventWriter<InteractFocused>,
    pickups: Query<(Entity, &Pickup, &PickupVisual, &Transform)>,
) {
    // 按实体排序，让 `pickups` 列出的编号在两次命令之间保持一致
    let mut world_pickups: Vec<_> = pickups.iter().collect();
    world_pickups.sort_by_key(|(e, ..)| *e);

    for CliLine(input) in line_reader.read() {
        match parse_command(input) {
            Command::Help => {
                log.write(LogEvent(HELP.into()));
            }

            Command::Status => {
                let cnt = item_assets.catalog(&lists).map_or(0, |list| list.items.len());
                log.write(LogEvent(format!(
                    "State: {:?}, Items Loaded: {}, Pickups: {}",
                    state.get(),
                    cnt,
                    world_pickups.len()
                )));
            }

            Command::Exit => {
                log.write(LogEvent("Bye~".into()));
                app_exit.write(AppExit::Success);
            }

            Command::Items(token) => {
                let Some(list) = item_assets.catalog(&lists) else {
                    continue;
                };
                match token {
                    None => {
                        for entry in &list.items {
                            log.write(LogEvent(format!(
                                "{} | {} | {}",
                                uuid_from_id(&entry.id),
                                entry.id,
                                entry.text.name
                            )));
                        }
                    }
                    Some(t) => {
                        // 按三种字段匹配
                        let t_low = t.to_lowercase();
                        if let Some(e) = list.items.iter().find(|e| {
                            e.id.eq_ignore_ascii_case(&t_low)
                                || e.text.name.eq_ignore_ascii_case(&t_low)
                                || uuid_from_id(&e.id).to_string() == t_low
                        }) {
                            log.write(LogEvent(format!(
                                "==================================================
UUID     : {}
ID       : {}
Name     : {}
Type     : {:?} ({:?})
Weight   : {}
Stack    : {} (stackable: {})
Mesh     : {}
Icon     : {}
Stats    : armor {} / damage {} / restore {} / value {}
Text     : {} {}
==================================================",
                                uuid_from_id(&e.id),
                                e.id,
                                e.text.name,
                                e.item_type,
                                e.quality,
                                e.numeric.weight,
                                e.numeric.max_stack_size,
                                e.numeric.is_stackable,
                                e.asset.mesh.as_deref().unwrap_or("-"),
                                e.asset.icon.as_deref().unwrap_or("-"),
                                e.stats.armor_rating,
                                e.stats.damage_value,
                                e.stats.restoration_amount,
                                e.stats.sell_value,
                                e.text.description,
                                e.text.usage_text,
                            )));
                        } else {
                            log.write(LogEvent("No matching item".into()));
                        }
                    }
                }
            }

            Command::Give { id, count } => {
                ev_give.write(GiveItemEvent { id, count });
            }

            Command::Inventory => {
                ev_list.write(ListInventoryEvent);
            }

            Command::Spawn { id, count } => {
                ev_spawn.write(SpawnPickupEvent {
                    row: id,
                    quantity: count.unwrap_or(config.pickup.default_quantity),
                    position: Vec3::ZERO,
                });
            }

            Command::Pickups => {
                if world_pickups.is_empty() {
                    log.write(LogEvent("  (no pickups)".into()));
                }
                for (idx, (entity, pickup, visual, transform)) in world_pickups.iter().enumerate() {
                    let data = &pickup.interactable;
                    log.write(LogEvent(format!(
                        "[{idx}] {} ×{} at {:?} ({entity}{})",
                        data.name,
                        data.quantity,
                        transform.translation,
                        if visual.highlighted { ", focused" } else { "" }
                    )));
                }
            }

            Command::Look(idx) => match world_pickups.get(idx) {
                Some((entity, ..)) => {
                    ev_focus.write(FocusPickup { target: Some(*entity) });
                }
                None => {
                    log.write(LogEvent(format!("No pickup #{idx}")));
                }
            },

            Command::Unlook => {
                ev_focus.write(FocusPickup { target: None });
            }

            Command::Take => {
                ev_interact.write(InteractFocused);
            }

            Command::Drop { index, count } => {
                ev_drop.write(DropItemEvent { index, count });
            }

            Command::Inspect(idx) => match world_pickups.get(idx) {
                Some((_, pickup, ..)) => match serde_json::to_string_pretty(&pickup.interactable) {
                    Ok(json) => {
                        log.write(LogEvent(json));
                    }
                    Err(e) => error!("could not serialize pickup: {e}"),
                },
                None => {
                    log.write(LogEvent(format!("No pickup #{idx}")));
                }
            },

            Command::Unsupported(cmd) => {
                log.write(LogEvent(format!("Unsupported command: {cmd}")));
            }
        }
    }
}

/* ---------------------------- 工具函数 ---------------------------- */

fn parse_command(input: &str) -> Command {
    let mut parts = input.split_whitespace();
    let cmd = parts.next().unwrap_or("").to_lowercase();
    match cmd.as_str() {
        "help" | "h" | "?" => Command::Help,
        "status" | "s" => Command::Status,
        "exit" | "quit" | "q" => Command::Exit,
        "items" | "item" | "i" => {
            let token = parts.next().map(|s| s.to_string());
            Command::Items(token)
        }
        "give" => {
            let id = parts.next().unwrap_or("").to_string();
            let cnt = parts.next().unwrap_or("1").parse().unwrap_or(1);
            Command::Give { id, count: cnt }
        }
        "inventory" | "inv" => Command::Inventory,
        "spawn" => {
            let id = parts.next().unwrap_or("").to_string();
            let count = parts.next().and_then(|s| s.parse().ok());
            Command::Spawn { id, count }
        }
        "pickups" | "p" => Command::Pickups,
        "look" => match parts.next().and_then(|s| s.parse().ok()) {
            Some(idx) => Command::Look(idx),
            None => Command::Unsupported(input.trim().into()),
        },
        "unlook" => Command::Unlook,
        "take" | "e" => Command::Take,
        "drop" => {
            let idx = parts.next().unwrap_or("0").parse().unwrap_or(0);
            let cnt = parts.next().unwrap_or("1").parse().unwrap_or(1);
            Command::Drop { index: idx, count: cnt }
        }
        "inspect" => Command::Inspect(parts.next().unwrap_or("0").parse().unwrap_or(0)),
        other => Command::Unsupported(other.into()),
    }
}

fn uuid_from_id(id: &str) -> Uuid {
    // 用固定 namespace + id 字节生成版本 5 UUID，保证可重复得到同一值
    Uuid::new_v5(&Uuid::NAMESPACE_OID, id.as_bytes())
}
