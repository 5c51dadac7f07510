use crate::error::{Result, XdoError};
use crate::services::command_runner::Tool;
use crate::services::xdotool::{WindowProperty, Xdotool};
use crate::services::xwininfo::Xwininfo;
use crate::window::{InfoReport, Position, Size, WindowId};
use std::fmt;
use tracing::{debug, info};

/// Ссылка на конкретное окно по его id.
///
/// Ничего не кэширует: каждый запрос заново спрашивает xwininfo/xdotool,
/// так что после закрытия окна методы начинают возвращать ошибки.
#[derive(Clone)]
pub struct XWindow {
    id: WindowId,
    xdotool: Xdotool,
    xwininfo: Xwininfo,
    xkill: Tool,
}

impl XWindow {
    pub fn new(id: WindowId, xdotool: Xdotool, xwininfo: Xwininfo, xkill: Tool) -> Self {
        Self {
            id,
            xdotool,
            xwininfo,
            xkill,
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn is_null(&self) -> bool {
        self.id.is_null()
    }

    pub async fn info(&self) -> Result<InfoReport> {
        self.xwininfo.report(self.id).await
    }

    /// Заголовок окна; пустая строка для окна без имени
    pub async fn title(&self) -> Result<String> {
        if self.id.is_null() {
            return Ok("(NULL window)".to_string());
        }
        if self.id == self.xwininfo.root_id().await? {
            return Ok("(the root window)".to_string());
        }
        Ok(self.info().await?.title.unwrap_or_default())
    }

    pub async fn abs_position(&self) -> Result<Position> {
        Ok(self.info().await?.absolute)
    }

    pub async fn rel_position(&self) -> Result<Position> {
        Ok(self.info().await?.relative)
    }

    pub async fn size(&self) -> Result<Size> {
        Ok(self.info().await?.size)
    }

    pub async fn is_visible(&self) -> Result<bool> {
        Ok(self.info().await?.mapped)
    }

    pub async fn exists(&self) -> bool {
        self.xwininfo.id_exists(self.id).await
    }

    pub async fn move_to(&self, position: Position, sync: bool) -> Result<()> {
        self.xdotool.move_window(self.id, position, sync).await
    }

    pub async fn resize(&self, size: Size, use_hints: bool, sync: bool) -> Result<()> {
        self.xdotool.resize_window(self.id, size, use_hints, sync).await
    }

    pub async fn focus(&self, sync: bool) -> Result<()> {
        self.xdotool.focus_window(self.id, sync).await
    }

    pub async fn map(&self, sync: bool) -> Result<()> {
        self.xdotool.map_window(self.id, sync).await
    }

    pub async fn unmap(&self, sync: bool) -> Result<()> {
        self.xdotool.unmap_window(self.id, sync).await
    }

    /// Часть EWMH: многие оконные менеджеры это игнорируют
    pub async fn raise(&self) -> Result<()> {
        self.xdotool.raise_window(self.id).await
    }

    /// Активирует окно; если менеджер отказал, один раз пробует focus и повторяет
    pub async fn activate(&self, sync: bool) -> Result<()> {
        match self.xdotool.activate_window(self.id, sync).await {
            Ok(()) => Ok(()),
            Err(XdoError::ExternalTool { message, .. }) => {
                debug!("windowactivate {} не удался ({}), пробуем focus", self.id, message);
                self.focus(sync).await?;
                self.xdotool.activate_window(self.id, sync).await
            }
            Err(e) => Err(e),
        }
    }

    pub async fn desktop(&self) -> Result<u32> {
        self.xdotool.window_desktop(self.id).await
    }

    pub async fn move_to_desktop(&self, desktop: u32) -> Result<()> {
        self.xdotool.set_window_desktop(self.id, desktop).await
    }

    pub async fn set_title(&self, title: &str) -> Result<()> {
        self.xdotool
            .set_window_property(self.id, WindowProperty::Name, title)
            .await
    }

    pub async fn set_icon_title(&self, title: &str) -> Result<()> {
        self.xdotool
            .set_window_property(self.id, WindowProperty::IconName, title)
            .await
    }

    pub async fn set_classname(&self, classname: &str) -> Result<()> {
        self.xdotool
            .set_window_property(self.id, WindowProperty::Classname, classname)
            .await
    }

    /// Принудительно закрывает клиента окна через xkill
    pub async fn kill(&self) -> Result<()> {
        info!("Закрываем окно {} через xkill", self.id);
        self.xkill.run_checked(&["-id", self.id.as_arg().as_str()]).await?;
        Ok(())
    }
}

impl fmt::Debug for XWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("XWindow").field(&self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::command_runner::scripted::ScriptedRunner;
    use crate::services::command_runner::CommandOutput;
    use std::sync::Arc;

    const ROOT: &str = "xwininfo: Window id: 0x1e3 (the root window) (has no name)\n";

    fn window(runner: &Arc<ScriptedRunner>, id: u64) -> XWindow {
        XWindow::new(
            WindowId::new(id),
            Xdotool::new(Tool::new("xdotool", runner.clone())),
            Xwininfo::new(Tool::new("xwininfo", runner.clone())),
            Tool::new("xkill", runner.clone()),
        )
    }

    #[tokio::test]
    async fn test_title_of_special_windows() {
        let runner = Arc::new(ScriptedRunner::new());
        runner.respond_with("xwininfo", |_, _| CommandOutput::success(ROOT));

        assert_eq!(window(&runner, 0).title().await.unwrap(), "(NULL window)");
        assert_eq!(runner.call_count("xwininfo"), 0);
        assert_eq!(window(&runner, 0x1e3).title().await.unwrap(), "(the root window)");
    }

    #[tokio::test]
    async fn test_activate_falls_back_to_focus_once() {
        let runner = Arc::new(ScriptedRunner::new());
        runner
            .push("xdotool", CommandOutput::failure(1, "XGetWindowProperty[_NET_ACTIVE_WINDOW] failed\n"))
            .push("xdotool", CommandOutput::success(""))
            .push("xdotool", CommandOutput::success(""));

        window(&runner, 42).activate(true).await.unwrap();

        let commands: Vec<String> = runner.calls().into_iter().map(|(_, args)| args[0].clone()).collect();
        assert_eq!(commands, vec!["windowactivate", "windowfocus", "windowactivate"]);
    }

    #[tokio::test]
    async fn test_activate_gives_up_after_retry() {
        let runner = Arc::new(ScriptedRunner::new());
        runner.respond_with("xdotool", |_, args| {
            if args[0] == "windowactivate" {
                CommandOutput::failure(1, "not supported\n")
            } else {
                CommandOutput::success("")
            }
        });

        let err = window(&runner, 42).activate(false).await.unwrap_err();
        assert!(matches!(err, XdoError::ExternalTool { .. }));
        assert_eq!(runner.call_count("xdotool"), 3);
    }

    #[tokio::test]
    async fn test_kill_uses_xkill() {
        let runner = Arc::new(ScriptedRunner::new());
        window(&runner, 77).kill().await.unwrap();
        assert_eq!(runner.calls(), vec![("xkill".to_string(), vec!["-id".to_string(), "77".to_string()])]);
    }
}
