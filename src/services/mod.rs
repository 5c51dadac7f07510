pub mod command_runner;
pub mod desktop;
pub mod window_locator;
pub mod x_window;
pub mod xdo;
pub mod xdotool;
pub mod xwininfo;

pub use command_runner::{create_command_runner, CommandOutput, CommandRunner, Tool};
pub use desktop::Desktop;
pub use window_locator::WindowLocator;
pub use x_window::XWindow;
pub use xdo::Xdo;
pub use xdotool::{WindowProperty, Xdotool};
pub use xwininfo::{parse_info_report, parse_root_id, Xwininfo};
