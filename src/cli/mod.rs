//! 交互式命令行
//!
//! 会话状态、命令解析、补全和结果打印

mod commands;
mod completer;
mod printer;

pub use commands::{parse_edge_spec, CommandResult, Session};
pub use completer::CommandCompleter;
pub use printer::{palette_name, Printer, PALETTE};
