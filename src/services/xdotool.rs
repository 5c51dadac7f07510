use crate::error::Result;
use crate::services::command_runner::{CommandOutput, Tool};
use crate::window::{MatchSpec, Position, Size, WindowId};
use crate::xdo_error;
use std::str::FromStr;
use tracing::debug;

/// Свойство окна, которое меняет `xdotool set_window`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowProperty {
    Name,
    IconName,
    Classname,
}

impl WindowProperty {
    fn flag(&self) -> &'static str {
        match self {
            WindowProperty::Name => "--name",
            WindowProperty::IconName => "--icon-name",
            WindowProperty::Classname => "--classname",
        }
    }
}

/// Типизированная обёртка над командами xdotool
#[derive(Debug, Clone)]
pub struct Xdotool {
    tool: Tool,
}

impl Xdotool {
    pub fn new(tool: Tool) -> Self {
        Self { tool }
    }

    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    /// `xdotool search` без проверки результата: решение принимает вызывающий
    pub async fn search(&self, spec: &MatchSpec) -> Result<CommandOutput> {
        debug!("xdotool search: {}", spec);
        self.tool.run(&spec.search_args()).await
    }

    async fn query<T: FromStr>(&self, args: &[&str]) -> Result<T> {
        let out = self.tool.run_checked(args).await?;
        let value = out.trim();
        value.parse::<T>().map_err(|_| {
            xdo_error!(tool self.tool.program(), "неожиданный вывод {}: '{}'", args[0], value)
        })
    }

    async fn command(&self, name: &str, sync: bool, rest: &[String]) -> Result<()> {
        let mut args = vec![name.to_string()];
        if sync {
            args.push("--sync".to_string());
        }
        args.extend_from_slice(rest);
        self.tool.run_checked(&args).await.map(|_| ())
    }

    pub async fn focused_window(&self, notice_children: bool) -> Result<WindowId> {
        if notice_children {
            self.query(&["getwindowfocus", "-f"]).await
        } else {
            self.query(&["getwindowfocus"]).await
        }
    }

    /// Часть EWMH: работает не со всеми оконными менеджерами
    pub async fn active_window(&self) -> Result<WindowId> {
        self.query(&["getactivewindow"]).await
    }

    pub async fn desktop_count(&self) -> Result<u32> {
        self.query(&["get_num_desktops"]).await
    }

    pub async fn set_desktop_count(&self, count: u32) -> Result<()> {
        self.command("set_num_desktops", false, &[count.to_string()]).await
    }

    pub async fn current_desktop(&self) -> Result<u32> {
        self.query(&["get_desktop"]).await
    }

    pub async fn set_current_desktop(&self, desktop: u32) -> Result<()> {
        self.command("set_desktop", false, &[desktop.to_string()]).await
    }

    pub async fn display_geometry(&self) -> Result<Size> {
        let out = self.tool.run_checked(&["getdisplaygeometry"]).await?;
        let mut parts = out.split_whitespace().map(str::parse::<u32>);
        match (parts.next(), parts.next()) {
            (Some(Ok(width)), Some(Ok(height))) => Ok(Size::new(width, height)),
            _ => Err(xdo_error!(
                tool self.tool.program(),
                "неожиданный вывод getdisplaygeometry: '{}'",
                out.trim()
            )),
        }
    }

    pub async fn move_window(&self, id: WindowId, to: Position, sync: bool) -> Result<()> {
        self.command("windowmove", sync, &[id.as_arg(), to.x.to_string(), to.y.to_string()])
            .await
    }

    pub async fn resize_window(
        &self,
        id: WindowId,
        size: Size,
        use_hints: bool,
        sync: bool,
    ) -> Result<()> {
        let mut rest = Vec::with_capacity(4);
        if use_hints {
            rest.push("--usehints".to_string());
        }
        rest.extend([id.as_arg(), size.width.to_string(), size.height.to_string()]);
        self.command("windowsize", sync, &rest).await
    }

    pub async fn focus_window(&self, id: WindowId, sync: bool) -> Result<()> {
        self.command("windowfocus", sync, &[id.as_arg()]).await
    }

    pub async fn map_window(&self, id: WindowId, sync: bool) -> Result<()> {
        self.command("windowmap", sync, &[id.as_arg()]).await
    }

    pub async fn unmap_window(&self, id: WindowId, sync: bool) -> Result<()> {
        self.command("windowunmap", sync, &[id.as_arg()]).await
    }

    pub async fn raise_window(&self, id: WindowId) -> Result<()> {
        self.command("windowraise", false, &[id.as_arg()]).await
    }

    /// Часть EWMH
    pub async fn activate_window(&self, id: WindowId, sync: bool) -> Result<()> {
        self.command("windowactivate", sync, &[id.as_arg()]).await
    }

    pub async fn window_desktop(&self, id: WindowId) -> Result<u32> {
        let id = id.as_arg();
        self.query(&["get_desktop_for_window", id.as_str()]).await
    }

    pub async fn set_window_desktop(&self, id: WindowId, desktop: u32) -> Result<()> {
        self.command("set_desktop_for_window", false, &[id.as_arg(), desktop.to_string()])
            .await
    }

    pub async fn set_window_property(
        &self,
        id: WindowId,
        property: WindowProperty,
        value: &str,
    ) -> Result<()> {
        self.command(
            "set_window",
            false,
            &[property.flag().to_string(), value.to_string(), id.as_arg()],
        )
        .await
    }
}
