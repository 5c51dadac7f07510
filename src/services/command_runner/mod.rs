//! CommandRunner: the only place where external processes are spawned.
//!
//! Everything above this module talks to xdotool/xwininfo/xkill through
//! [`Tool`], so backends can be swapped for dry-run emulation or scripted
//! test doubles without touching parsing or polling code.

mod dry_run;
#[cfg(test)]
pub(crate) mod scripted;
mod system;
mod tool;
mod r#trait;

pub use self::dry_run::DryRunRunner;
pub use self::r#trait::{create_command_runner, CommandOutput, CommandRunner};
pub use self::system::SystemRunner;
pub use self::tool::Tool;
