use bevy::prelude::*;

/// 面向终端的一行输出（由 main 中的 forward_log_event 打印）
#[derive(Event, Debug, Clone)]
pub struct LogEvent(pub String);

pub fn announce_start(mut writer: EventWriter<LogEvent>) {
    writer.write(LogEvent("Pickup sandbox started, type `help`".into()));
}
