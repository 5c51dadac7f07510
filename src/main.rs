use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::time::Duration;
use tracing::{info, warn};

use xdo_rust::services::create_command_runner;
use xdo_rust::{Config, MatchField, MatchSpec, Pattern, Position, Size, WindowId, Xdo};

#[derive(Parser, Debug)]
#[command(name = "xdo-rust")]
#[command(about = "Поиск и управление окнами X11 через xdotool/xwininfo")]
struct Args {
    /// Путь к файлу конфигурации
    #[arg(short, long, default_value = "xdo.toml")]
    config: String,

    /// Режим сухого запуска (эмуляция утилит)
    #[arg(long)]
    dry_run: bool,

    /// Уровень логирования (по умолчанию из конфигурации)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(ClapArgs, Debug)]
struct SearchArgs {
    /// Шаблон: точное имя или регулярное выражение (с --regex)
    pattern: String,

    /// Трактовать шаблон как регулярное выражение
    #[arg(long)]
    regex: bool,

    /// Поля для поиска (по умолчанию все)
    #[arg(long = "field", value_enum)]
    fields: Vec<Field>,

    /// Только видимые окна
    #[arg(long)]
    only_visible: bool,
}

impl SearchArgs {
    fn to_spec(&self) -> Result<MatchSpec> {
        let pattern = if self.regex {
            Pattern::regex(&self.pattern)?
        } else {
            Pattern::exact(self.pattern.as_str())
        };
        let mut spec =
            MatchSpec::new(pattern).with_fields(self.fields.iter().map(|f| MatchField::from(*f)));
        if self.only_visible {
            spec = spec.only_visible();
        }
        Ok(spec)
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Field {
    Name,
    Class,
    Classname,
}

impl From<Field> for MatchField {
    fn from(field: Field) -> Self {
        match field {
            Field::Name => MatchField::Name,
            Field::Class => MatchField::Class,
            Field::Classname => MatchField::Classname,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Вывести id всех подходящих окон
    Search(SearchArgs),
    /// Код выхода 0, если окно существует
    Exists(SearchArgs),
    /// Дождаться появления (или закрытия) окна
    Wait {
        #[command(flatten)]
        search: SearchArgs,
        /// Ждать закрытия вместо появления
        #[arg(long)]
        close: bool,
        /// Дедлайн ожидания, мс (по умолчанию из конфигурации)
        #[arg(long)]
        timeout_ms: Option<u64>,
        /// Интервал опроса, мс (по умолчанию из конфигурации)
        #[arg(long)]
        interval_ms: Option<u64>,
    },
    /// Отчёт xwininfo по окну
    Info { id: WindowId },
    /// Заголовок окна
    Title { id: WindowId },
    /// Активное окно (EWMH)
    Active,
    /// Окно с фокусом ввода
    Focused {
        /// Учитывать дочерние окна
        #[arg(short = 'f', long)]
        children: bool,
    },
    /// Текущий рабочий стол или переключение на другой
    Desktop {
        #[arg(long)]
        set: Option<u32>,
    },
    /// Число рабочих столов или его изменение
    Desktops {
        #[arg(long)]
        set: Option<u32>,
    },
    /// Размер экрана
    Geometry,
    /// Id корневого окна
    Root,
    Move {
        id: WindowId,
        #[arg(allow_hyphen_values = true)]
        x: i32,
        #[arg(allow_hyphen_values = true)]
        y: i32,
    },
    Resize {
        id: WindowId,
        width: u32,
        height: u32,
        /// Учитывать size hints окна
        #[arg(long)]
        use_hints: bool,
    },
    Focus { id: WindowId },
    Activate { id: WindowId },
    Map { id: WindowId },
    Unmap { id: WindowId },
    Raise { id: WindowId },
    /// Принудительно закрыть окно (xkill)
    Kill { id: WindowId },
    /// Снять фокус со всех окон
    Unfocus,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Загрузка конфигурации
    let config = Config::load(&args.config)?;

    // Инициализация системы логирования
    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    init_tracing(level, &config.logging.format)?;

    info!("Запуск xdo-rust v{}", env!("CARGO_PKG_VERSION"));

    if args.dry_run {
        warn!("Режим сухого запуска - утилиты эмулируются");
    }

    let runner = create_command_runner(&config, args.dry_run);
    let xdo = Xdo::new(&config, runner);

    run(&xdo, &config, args.command).await
}

async fn run(xdo: &Xdo, config: &Config, command: Command) -> Result<()> {
    match command {
        Command::Search(search) => {
            for id in xdo.locator().search(&search.to_spec()?).await {
                println!("{}", id);
            }
        }
        Command::Exists(search) => {
            if !xdo.locator().exists(&search.to_spec()?).await {
                std::process::exit(1);
            }
        }
        Command::Wait {
            search,
            close,
            timeout_ms,
            interval_ms,
        } => {
            let spec = search.to_spec()?;
            let deadline = timeout_ms.map(Duration::from_millis).unwrap_or(config.wait.timeout());
            let interval = config
                .wait
                .poll_interval_or(interval_ms)
                .context("Неверный --interval-ms")?;
            let locator = xdo.locator().clone().with_poll_interval(interval);

            if close {
                locator.wait_for_disappearance_within(&spec, deadline).await?;
            } else {
                let id = locator.wait_for_appearance_within(&spec, deadline).await?;
                println!("{}", id);
            }
        }
        Command::Info { id } => {
            let report = xdo.window(id).info().await?;
            println!("title:    {}", report.title.as_deref().unwrap_or(""));
            println!("absolute: {}", report.absolute);
            println!("relative: {}", report.relative);
            println!("size:     {}", report.size);
            println!("mapped:   {}", report.mapped);
        }
        Command::Title { id } => println!("{}", xdo.window(id).title().await?),
        Command::Active => println!("{}", xdo.desktop().active_window().await?),
        Command::Focused { children } => {
            println!("{}", xdo.desktop().focused_window(children).await?)
        }
        Command::Desktop { set: Some(n) } => xdo.desktop().switch_desktop(n).await?,
        Command::Desktop { set: None } => println!("{}", xdo.desktop().current_desktop().await?),
        Command::Desktops { set: Some(n) } => xdo.desktop().set_desktop_count(n).await?,
        Command::Desktops { set: None } => println!("{}", xdo.desktop().desktop_count().await?),
        Command::Geometry => {
            let Size { width, height } = xdo.desktop().display_geometry().await?;
            println!("{} {}", width, height);
        }
        Command::Root => println!("{}", xdo.desktop().root_id().await?),
        Command::Move { id, x, y } => xdo.window(id).move_to(Position::new(x, y), true).await?,
        Command::Resize {
            id,
            width,
            height,
            use_hints,
        } => {
            xdo.window(id)
                .resize(Size::new(width, height), use_hints, true)
                .await?
        }
        Command::Focus { id } => xdo.window(id).focus(true).await?,
        Command::Activate { id } => xdo.window(id).activate(true).await?,
        Command::Map { id } => xdo.window(id).map(true).await?,
        Command::Unmap { id } => xdo.window(id).unmap(true).await?,
        Command::Raise { id } => xdo.window(id).raise().await?,
        Command::Kill { id } => xdo
            .window(id)
            .kill()
            .await
            .with_context(|| format!("Не удалось закрыть окно {}", id))?,
        Command::Unfocus => xdo.desktop().unfocus(true).await?,
    }

    Ok(())
}

fn init_tracing(level: &str, format: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))?;

    // Логи в stderr, чтобы не смешиваться с выводом команд
    let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        "full" => registry.with(layer).init(),
        _ => registry.with(layer.compact()).init(),
    }

    Ok(())
}
