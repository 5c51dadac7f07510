use crate::config::Config;
use crate::error::Result;
use crate::services::command_runner::{CommandRunner, Tool};
use crate::services::desktop::Desktop;
use crate::services::window_locator::WindowLocator;
use crate::services::x_window::XWindow;
use crate::services::xdotool::Xdotool;
use crate::services::xwininfo::Xwininfo;
use crate::window::{MatchSpec, Pattern, WindowId};
use std::sync::Arc;
use tracing::info;

/// Точка входа: утилиты, настроенные из конфигурации, и фабрики поверх них
#[derive(Debug, Clone)]
pub struct Xdo {
    xdotool: Xdotool,
    xwininfo: Xwininfo,
    xkill: Tool,
    locator: WindowLocator,
}

impl Xdo {
    pub fn new(config: &Config, runner: Arc<dyn CommandRunner>) -> Self {
        info!(
            "Инициализация Xdo (xdotool: {}, xwininfo: {}, xkill: {})",
            config.tools.xdotool, config.tools.xwininfo, config.tools.xkill
        );

        let xdotool = Xdotool::new(Tool::new(config.tools.xdotool.clone(), runner.clone()));
        let xwininfo = Xwininfo::new(Tool::new(config.tools.xwininfo.clone(), runner.clone()));
        let xkill = Tool::new(config.tools.xkill.clone(), runner);
        let locator =
            WindowLocator::new(xdotool.clone()).with_poll_interval(config.wait.poll_interval());

        Self {
            xdotool,
            xwininfo,
            xkill,
            locator,
        }
    }

    pub fn locator(&self) -> &WindowLocator {
        &self.locator
    }

    pub fn desktop(&self) -> Desktop {
        Desktop::new(self.xdotool.clone(), self.xwininfo.clone())
    }

    pub fn window(&self, id: WindowId) -> XWindow {
        XWindow::new(id, self.xdotool.clone(), self.xwininfo.clone(), self.xkill.clone())
    }

    /// Нулевое окно: фокус на него снимает фокус со всех окон
    pub fn null_window(&self) -> XWindow {
        self.window(WindowId::NULL)
    }

    /// Первое окно под `spec` или [`crate::error::XdoError::NotFound`]
    pub async fn from_search(&self, spec: &MatchSpec) -> Result<XWindow> {
        let id = self.locator.resolve_first(spec).await?;
        Ok(self.window(id))
    }

    pub async fn from_title(&self, pattern: Pattern) -> Result<XWindow> {
        self.from_search(&MatchSpec::title(pattern)).await
    }

    pub async fn from_active(&self) -> Result<XWindow> {
        let id = self.xdotool.active_window().await?;
        Ok(self.window(id))
    }

    pub async fn from_focused(&self, notice_children: bool) -> Result<XWindow> {
        let id = self.xdotool.focused_window(notice_children).await?;
        Ok(self.window(id))
    }

    pub async fn from_root(&self) -> Result<XWindow> {
        let id = self.xwininfo.root_id().await?;
        Ok(self.window(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::command_runner::DryRunRunner;
    use crate::window::{MatchField, Position, Size};

    fn dry_xdo() -> Xdo {
        let config = Config::default();
        let runner = Arc::new(DryRunRunner::new(config.tools.clone()));
        Xdo::new(&config, runner)
    }

    #[tokio::test]
    async fn test_from_title_and_geometry_roundtrip() {
        let xdo = dry_xdo();
        let window = xdo.from_title(Pattern::exact("Home")).await.unwrap();

        window.move_to(Position::new(87, 57), true).await.unwrap();
        window.resize(Size::new(500, 500), false, true).await.unwrap();

        assert_eq!(window.title().await.unwrap(), "Home");
        assert_eq!(window.abs_position().await.unwrap(), Position::new(87, 57));
        assert_eq!(window.size().await.unwrap(), Size::new(500, 500));
    }

    #[tokio::test]
    async fn test_move_to_negative_position() {
        let xdo = dry_xdo();
        let window = xdo.from_title(Pattern::exact("Home")).await.unwrap();

        window.move_to(Position::new(-10, 20), true).await.unwrap();
        assert_eq!(window.abs_position().await.unwrap(), Position::new(-10, 20));
    }

    #[tokio::test]
    async fn test_renamed_window_found_by_new_title() {
        let xdo = dry_xdo();
        let window = xdo.from_title(Pattern::exact("Home")).await.unwrap();

        window.set_title("Renamed").await.unwrap();
        assert_eq!(window.title().await.unwrap(), "Renamed");
        assert_eq!(xdo.from_title(Pattern::exact("Renamed")).await.unwrap().id(), window.id());
        assert!(!xdo.locator().exists(&MatchSpec::title(Pattern::regex("^Home$").unwrap())).await);

        window.set_classname("files-renamed").await.unwrap();
        let by_classname = MatchSpec::new(Pattern::exact("files-renamed")).with_field(MatchField::Classname);
        assert_eq!(xdo.locator().search(&by_classname).await, vec![window.id()]);
    }

    #[tokio::test]
    async fn test_map_unmap_visibility() {
        let xdo = dry_xdo();
        let window = xdo.from_title(Pattern::containing("Editor")).await.unwrap();

        window.unmap(true).await.unwrap();
        assert!(!window.is_visible().await.unwrap());
        window.map(true).await.unwrap();
        assert!(window.is_visible().await.unwrap());
    }

    #[tokio::test]
    async fn test_focus_and_active_window() {
        let xdo = dry_xdo();
        let window = xdo.from_title(Pattern::exact("Home")).await.unwrap();

        window.activate(true).await.unwrap();
        assert_eq!(xdo.from_active().await.unwrap().id(), window.id());

        xdo.null_window().focus(true).await.unwrap();
        window.focus(true).await.unwrap();
        assert_eq!(xdo.from_focused(false).await.unwrap().id(), window.id());
    }

    #[tokio::test]
    async fn test_desktops() {
        let xdo = dry_xdo();
        let desktop = xdo.desktop();

        assert_eq!(desktop.desktop_count().await.unwrap(), 4);
        desktop.switch_desktop(2).await.unwrap();
        assert_eq!(desktop.current_desktop().await.unwrap(), 2);
        assert!(desktop.switch_desktop(9).await.is_err());
        assert_eq!(desktop.display_geometry().await.unwrap(), Size::new(1920, 1080));
        assert_eq!(xdo.from_root().await.unwrap().title().await.unwrap(), "(the root window)");
    }

    #[tokio::test]
    async fn test_kill_then_wait_for_close() {
        let xdo = dry_xdo();
        let spec = MatchSpec::title(Pattern::exact("Home"));
        let window = xdo.from_search(&spec).await.unwrap();

        assert!(window.exists().await);
        window.kill().await.unwrap();
        xdo.locator()
            .wait_for_disappearance_within(&spec, std::time::Duration::from_secs(1))
            .await
            .unwrap();
        assert!(!window.exists().await);
        assert!(xdo.from_search(&spec).await.unwrap_err().is_not_found());
    }
}
