use super::r#trait::{CommandOutput, CommandRunner};
use crate::config::ToolsConfig;
use crate::error::Result;
use crate::window::{Position, Size, WindowId};
use parking_lot::Mutex;
use regex::RegexBuilder;
use tracing::info;

const ROOT_ID: u64 = 0x1e3;
const DISPLAY: Size = Size { width: 1920, height: 1080 };

#[derive(Debug, Clone)]
struct FakeWindow {
    id: u64,
    title: String,
    icon_name: String,
    class: String,
    classname: String,
    position: Position,
    size: Size,
    mapped: bool,
    desktop: u32,
}

impl FakeWindow {
    fn new(id: u64, title: &str, class: &str, desktop: u32) -> Self {
        Self {
            id,
            title: title.to_string(),
            icon_name: title.to_string(),
            class: class.to_string(),
            classname: class.to_lowercase(),
            position: Position::new(100, 80),
            size: Size::new(800, 600),
            mapped: true,
            desktop,
        }
    }
}

#[derive(Debug)]
struct FakeDesktop {
    windows: Vec<FakeWindow>,
    active: u64,
    desktops: u32,
    current: u32,
}

/// Эмуляция xdotool/xwininfo/xkill поверх небольшого вымышленного рабочего стола
pub struct DryRunRunner {
    tools: ToolsConfig,
    state: Mutex<FakeDesktop>,
}

impl DryRunRunner {
    pub fn new(tools: ToolsConfig) -> Self {
        info!("Dry-run режим - внешние утилиты не запускаются");

        let windows = vec![
            FakeWindow::new(20971523, "Terminal - dry_run", "Gnome-terminal", 0),
            FakeWindow::new(23068675, "Browser - dry_run", "Firefox", 0),
            FakeWindow::new(25165827, "Editor - dry_run", "Gedit", 1),
            FakeWindow::new(27262979, "Home", "Nautilus", 1),
        ];
        let active = windows[0].id;

        Self {
            tools,
            state: Mutex::new(FakeDesktop {
                windows,
                active,
                desktops: 4,
                current: 0,
            }),
        }
    }

    fn xdotool(&self, args: &[String]) -> CommandOutput {
        let mut state = self.state.lock();
        let command = args.first().map(String::as_str).unwrap_or_default();
        // Флаги вида --sync не влияют на эмуляцию; отрицательные числа остаются
        let operands: Vec<&str> = args
            .iter()
            .skip(1)
            .map(String::as_str)
            .filter(|a| !a.starts_with('-') || a.parse::<i64>().is_ok())
            .collect();

        match command {
            "search" => Self::search(&state, args),
            "getactivewindow" | "getwindowfocus" => CommandOutput::success(format!("{}\n", state.active)),
            "get_num_desktops" => CommandOutput::success(format!("{}\n", state.desktops)),
            "get_desktop" => CommandOutput::success(format!("{}\n", state.current)),
            "getdisplaygeometry" => {
                CommandOutput::success(format!("{} {}\n", DISPLAY.width, DISPLAY.height))
            }
            "set_num_desktops" => match operands.first().and_then(|n| n.parse().ok()) {
                Some(n) => {
                    state.desktops = n;
                    CommandOutput::success("")
                }
                None => usage_error(command),
            },
            "set_desktop" => match operands.first().and_then(|n| n.parse().ok()) {
                Some(n) if n < state.desktops => {
                    state.current = n;
                    CommandOutput::success("")
                }
                _ => usage_error(command),
            },
            "set_window" => Self::set_window(&mut state, &args[1..]),
            _ => Self::window_command(&mut state, command, &operands),
        }
    }

    /// `set_window [--name|--icon-name|--classname VALUE]... WINDOW`
    fn set_window(state: &mut FakeDesktop, args: &[String]) -> CommandOutput {
        let Some((id, options)) = args.split_last() else {
            return usage_error("set_window");
        };
        let Ok(id) = id.parse::<WindowId>() else {
            return usage_error("set_window");
        };
        if options.is_empty() || options.len() % 2 != 0 {
            return usage_error("set_window");
        }
        let Some(window) = state.windows.iter_mut().find(|w| w.id == id.value()) else {
            return bad_window(id);
        };

        for pair in options.chunks_exact(2) {
            let value = pair[1].clone();
            match pair[0].as_str() {
                "--name" => window.title = value,
                "--icon-name" => window.icon_name = value,
                "--classname" => window.classname = value,
                _ => return usage_error("set_window"),
            }
        }
        info!(
            "Dry-run: окно {} теперь '{}' (иконка '{}', classname '{}')",
            id, window.title, window.icon_name, window.classname
        );
        CommandOutput::success("")
    }

    fn search(state: &FakeDesktop, args: &[String]) -> CommandOutput {
        let Some(pattern) = args.last() else {
            return usage_error("search");
        };
        let re = match RegexBuilder::new(pattern).case_insensitive(true).build() {
            Ok(re) => re,
            Err(e) => return CommandOutput::failure(1, format!("Invalid pattern: {}\n", e)),
        };
        let only_visible = args.iter().any(|a| a == "--onlyvisible");
        let by = |flag: &str| args.iter().any(|a| a == flag);
        let any_field = !(by("--name") || by("--class") || by("--classname"));

        let ids: String = state
            .windows
            .iter()
            .filter(|w| !only_visible || w.mapped)
            .filter(|w| {
                ((any_field || by("--name")) && re.is_match(&w.title))
                    || ((any_field || by("--class")) && re.is_match(&w.class))
                    || ((any_field || by("--classname")) && re.is_match(&w.classname))
            })
            .map(|w| format!("{}\n", w.id))
            .collect();

        if ids.is_empty() {
            CommandOutput::failure(1, "")
        } else {
            CommandOutput::success(ids)
        }
    }

    fn window_command(state: &mut FakeDesktop, command: &str, operands: &[&str]) -> CommandOutput {
        let Some(id) = operands.first().and_then(|id| id.parse::<WindowId>().ok()) else {
            info!("Dry-run: пропускаем {}", command);
            return CommandOutput::success("");
        };

        // Фокус на нулевое окно снимает фокус
        if id.is_null() && command == "windowfocus" {
            state.active = 0;
            return CommandOutput::success("");
        }

        let active = &mut state.active;
        let Some(window) = state.windows.iter_mut().find(|w| w.id == id.value()) else {
            return bad_window(id);
        };
        let numbers: Vec<i64> = operands[1..].iter().filter_map(|n| n.parse().ok()).collect();

        info!("Dry-run: эмулируем {} для окна {}", command, id);
        match (command, numbers.as_slice()) {
            ("windowfocus" | "windowactivate", _) => *active = window.id,
            ("windowmap", _) => window.mapped = true,
            ("windowunmap", _) => window.mapped = false,
            ("windowraise", _) => {}
            ("windowmove", [x, y]) => window.position = Position::new(*x as i32, *y as i32),
            ("windowsize", [w, h]) => window.size = Size::new(*w as u32, *h as u32),
            ("get_desktop_for_window", _) => {
                return CommandOutput::success(format!("{}\n", window.desktop))
            }
            ("set_desktop_for_window", [desktop]) => window.desktop = *desktop as u32,
            _ => return usage_error(command),
        }
        CommandOutput::success("")
    }

    fn xwininfo(&self, args: &[String]) -> CommandOutput {
        let state = self.state.lock();
        match args.first().map(String::as_str) {
            Some("-root") => CommandOutput::success(format!(
                "\nxwininfo: Window id: {:#x} (the root window) (has no name)\n\n  Absolute upper-left X:  0\n  Absolute upper-left Y:  0\n  Relative upper-left X:  0\n  Relative upper-left Y:  0\n  Width: {}\n  Height: {}\n  Map State: IsViewable\n",
                ROOT_ID, DISPLAY.width, DISPLAY.height
            )),
            Some("-id") => {
                let Some(id) = args.get(1).and_then(|id| id.parse::<WindowId>().ok()) else {
                    return usage_error("xwininfo");
                };
                match state.windows.iter().find(|w| w.id == id.value()) {
                    Some(w) => CommandOutput::success(format!(
                        "\nxwininfo: Window id: {:#x} \"{}\"\n\n  Absolute upper-left X:  {}\n  Absolute upper-left Y:  {}\n  Relative upper-left X:  0\n  Relative upper-left Y:  0\n  Width: {}\n  Height: {}\n  Depth: 24\n  Map State: {}\n",
                        w.id,
                        w.title,
                        w.position.x,
                        w.position.y,
                        w.size.width,
                        w.size.height,
                        if w.mapped { "IsViewable" } else { "IsUnMapped" }
                    )),
                    None => bad_window(id),
                }
            }
            _ => usage_error("xwininfo"),
        }
    }

    fn xkill(&self, args: &[String]) -> CommandOutput {
        let mut state = self.state.lock();
        let Some(id) = args.get(1).and_then(|id| id.parse::<WindowId>().ok()) else {
            return usage_error("xkill");
        };
        let before = state.windows.len();
        state.windows.retain(|w| w.id != id.value());
        if state.windows.len() == before {
            return bad_window(id);
        }
        info!("Dry-run: эмулируем закрытие окна {}", id);
        CommandOutput::success(format!("xkill:  killing creator of resource {:#x}\n", id.value()))
    }
}

fn usage_error(command: &str) -> CommandOutput {
    CommandOutput::failure(1, format!("Usage error: {}\n", command))
}

fn bad_window(id: WindowId) -> CommandOutput {
    CommandOutput::failure(1, format!("X Error: BadWindow (invalid Window parameter) {:#x}\n", id.value()))
}

#[async_trait::async_trait]
impl CommandRunner for DryRunRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        let output = if program == self.tools.xdotool {
            self.xdotool(args)
        } else if program == self.tools.xwininfo {
            self.xwininfo(args)
        } else if program == self.tools.xkill {
            self.xkill(args)
        } else {
            info!("Dry-run: неизвестная утилита {}, пропускаем", program);
            CommandOutput::success("")
        };
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn runner() -> DryRunRunner {
        DryRunRunner::new(Config::default().tools)
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_search_by_name_and_visibility() {
        let runner = runner();
        let out = runner.run("xdotool", &args(&["search", "--name", "dry_run"])).await.unwrap();
        assert_eq!(out.stdout.lines().count(), 3);

        runner.run("xdotool", &args(&["windowunmap", "--sync", "23068675"])).await.unwrap();
        let out = runner
            .run("xdotool", &args(&["search", "--onlyvisible", "--name", "dry_run"]))
            .await
            .unwrap();
        assert_eq!(out.stdout.lines().count(), 2);
    }

    #[tokio::test]
    async fn test_windowmove_keeps_negative_coordinates() {
        let runner = runner();
        let out = runner
            .run("xdotool", &args(&["windowmove", "--sync", "27262979", "-10", "-20"]))
            .await
            .unwrap();
        assert!(out.is_success(), "{}", out.stderr);

        let out = runner.run("xwininfo", &args(&["-id", "27262979"])).await.unwrap();
        assert!(out.stdout.contains("Absolute upper-left X:  -10"));
        assert!(out.stdout.contains("Absolute upper-left Y:  -20"));
    }

    #[tokio::test]
    async fn test_set_window_updates_properties() {
        let runner = runner();
        runner
            .run("xdotool", &args(&["set_window", "--icon-name", "Док", "--classname", "files", "27262979"]))
            .await
            .unwrap();

        {
            let state = runner.state.lock();
            let home = state.windows.iter().find(|w| w.id == 27262979).unwrap();
            assert_eq!(home.icon_name, "Док");
            assert_eq!(home.classname, "files");
            assert_eq!(home.title, "Home");
        }

        let out = runner.run("xdotool", &args(&["set_window", "--name", "27262979"])).await.unwrap();
        assert!(out.stderr.contains("Usage error"));
        let out = runner.run("xdotool", &args(&["set_window", "--name", "X", "99"])).await.unwrap();
        assert!(out.stderr.contains("BadWindow"));
    }

    #[tokio::test]
    async fn test_xkill_removes_window() {
        let runner = runner();
        runner.run("xkill", &args(&["-id", "27262979"])).await.unwrap();
        let out = runner.run("xwininfo", &args(&["-id", "27262979"])).await.unwrap();
        assert!(!out.is_success());
        assert!(out.stderr.contains("BadWindow"));
    }
}
