use crate::error::Result;
use crate::services::xdotool::Xdotool;
use crate::services::xwininfo::Xwininfo;
use crate::window::{Size, WindowId};
use tracing::info;

/// Глобальные операции над экраном и рабочими столами.
///
/// Состояния не хранит: всё, что нужно, каждый раз спрашивается у утилит.
/// Операции с рабочими столами и активным окном — часть EWMH и
/// возвращают ошибку, если оконный менеджер их не поддерживает.
#[derive(Debug, Clone)]
pub struct Desktop {
    xdotool: Xdotool,
    xwininfo: Xwininfo,
}

impl Desktop {
    pub fn new(xdotool: Xdotool, xwininfo: Xwininfo) -> Self {
        Self { xdotool, xwininfo }
    }

    pub async fn focused_window(&self, notice_children: bool) -> Result<WindowId> {
        self.xdotool.focused_window(notice_children).await
    }

    pub async fn active_window(&self) -> Result<WindowId> {
        self.xdotool.active_window().await
    }

    pub async fn desktop_count(&self) -> Result<u32> {
        self.xdotool.desktop_count().await
    }

    pub async fn set_desktop_count(&self, count: u32) -> Result<()> {
        info!("Устанавливаем число рабочих столов: {}", count);
        self.xdotool.set_desktop_count(count).await
    }

    pub async fn current_desktop(&self) -> Result<u32> {
        self.xdotool.current_desktop().await
    }

    pub async fn switch_desktop(&self, desktop: u32) -> Result<()> {
        info!("Переключаемся на рабочий стол {}", desktop);
        self.xdotool.set_current_desktop(desktop).await
    }

    pub async fn display_geometry(&self) -> Result<Size> {
        self.xdotool.display_geometry().await
    }

    pub async fn root_id(&self) -> Result<WindowId> {
        self.xwininfo.root_id().await
    }

    /// Снимает фокус со всех окон (фокус на нулевое окно)
    pub async fn unfocus(&self, sync: bool) -> Result<()> {
        self.xdotool.focus_window(WindowId::NULL, sync).await
    }
}
