//! External process execution.

pub mod command;
pub mod process;
pub mod resolve;

pub use command::{
    command_line, execute, CancelToken, CommandOptions, CommandResult, Termination,
};
pub use process::ChildGuard;
pub use resolve::{is_executable, parse_system_path, resolve_tool_path, search_path};
