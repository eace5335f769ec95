mod logger;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use logger::AppLogger;
use pdf_view_core::render::PageCanvasLifecycle;
use pdf_view_core::{
    DocumentSource, LopdfDocument, PageSource, ViewerOptions, ZoomDirection, ZoomSpec,
    viewport_math,
};
use pdf_view_runtime::{
    Point, Size, ViewerCommand, ViewerGeometry, ViewerSnapshot, ViewerUpdate, worker_task,
};
use std::path::PathBuf;
use std::str::FromStr;
use tokio::sync::mpsc;

const MAX_LOG_ENTRIES: usize = 1000;

#[derive(Parser)]
#[command(name = "pdfv", about = "Headless PDF viewer harness", version)]
struct Cli {
    /// Log debug messages
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print captured log entries after the run
    #[arg(long, global = true)]
    show_log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print page, container and surface geometry for every page
    Inspect {
        /// Input PDF file
        input: PathBuf,

        /// Zoom: a percentage, pageFit or pageWidth
        #[arg(short, long, default_value = "100", value_parser = parse_zoom)]
        zoom: ZoomSpec,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Replay viewer interactions and print every update
    Simulate {
        /// Input PDF file
        input: PathBuf,

        /// Operation to replay; repeat for a sequence (e.g. --op zoom-in --op goto=3)
        #[arg(long = "op", num_args = 1)]
        ops: Vec<Op>,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Write the default viewer options as JSON
    Config {
        /// Output JSON file
        output: PathBuf,
    },
}

#[derive(clap::Args)]
struct ViewArgs {
    /// Viewing container width in pixels
    #[arg(long, default_value = "1024")]
    width: f64,

    /// Viewing container height in pixels
    #[arg(long, default_value = "768")]
    height: f64,

    /// Device pixel ratio
    #[arg(long)]
    dpr: Option<f64>,

    /// Viewer options JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ViewArgs {
    async fn options(&self) -> Result<ViewerOptions> {
        let mut options = match &self.config {
            Some(path) => ViewerOptions::load(path)
                .await
                .with_context(|| format!("Failed to load {}", path.display()))?,
            None => ViewerOptions::default(),
        };
        if let Some(dpr) = self.dpr {
            options.device_pixel_ratio = dpr;
        }
        options.validate()?;
        Ok(options)
    }

    fn geometry(&self) -> ViewerGeometry {
        ViewerGeometry {
            container: Size::new(self.width, self.height),
            thumbnail_panel_height: self.height,
            ..Default::default()
        }
    }
}

/// One scripted interaction
#[derive(Debug, Clone, PartialEq)]
enum Op {
    ZoomIn,
    ZoomOut,
    Zoom(ZoomSpec),
    Wheel(f64),
    CtrlWheel(f64),
    ManualZoom(String),
    GoTo(usize),
    Page(String),
    Next,
    Prev,
    Thumb(usize),
    Scroll(f64),
    Resize(f64, f64),
    ToggleMenu,
    Click(f64, f64),
    ToggleThumbnails,
}

impl FromStr for Op {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = match s.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (s, None),
        };
        let number = |v: Option<&str>| -> Result<f64, String> {
            let v = v.ok_or_else(|| format!("{} needs a value", name))?;
            v.trim().parse().map_err(|_| format!("Invalid number: {}", v))
        };
        let pair = |v: Option<&str>, sep: char| -> Result<(f64, f64), String> {
            let v = v.ok_or_else(|| format!("{} needs a value", name))?;
            let (a, b) = v
                .split_once(sep)
                .ok_or_else(|| format!("Expected two values separated by '{}': {}", sep, v))?;
            Ok((number(Some(a))?, number(Some(b))?))
        };

        match name {
            "zoom-in" => Ok(Op::ZoomIn),
            "zoom-out" => Ok(Op::ZoomOut),
            "zoom" => parse_zoom(value.unwrap_or_default()).map(Op::Zoom),
            "wheel" => number(value).map(Op::Wheel),
            "ctrl-wheel" => number(value).map(Op::CtrlWheel),
            "manual-zoom" => Ok(Op::ManualZoom(value.unwrap_or_default().to_string())),
            "goto" => number(value).map(|n| Op::GoTo(n.max(0.0) as usize)),
            "page" => Ok(Op::Page(value.unwrap_or_default().to_string())),
            "next" => Ok(Op::Next),
            "prev" => Ok(Op::Prev),
            "thumb" => number(value).map(|n| Op::Thumb(n.max(0.0) as usize)),
            "scroll" => number(value).map(Op::Scroll),
            "resize" => pair(value, 'x').map(|(w, h)| Op::Resize(w, h)),
            "toggle-menu" => Ok(Op::ToggleMenu),
            "click" => pair(value, ',').map(|(x, y)| Op::Click(x, y)),
            "toggle-thumbnails" => Ok(Op::ToggleThumbnails),
            _ => Err(format!("Unknown operation: {}", s)),
        }
    }
}

impl Op {
    fn command(&self, view: &ViewArgs) -> ViewerCommand {
        match self {
            Op::ZoomIn => ViewerCommand::StepZoom(ZoomDirection::In),
            Op::ZoomOut => ViewerCommand::StepZoom(ZoomDirection::Out),
            Op::Zoom(spec) => ViewerCommand::SelectZoom(*spec),
            Op::Wheel(delta_y) => ViewerCommand::Wheel {
                delta_y: *delta_y,
                ctrl: false,
            },
            Op::CtrlWheel(delta_y) => ViewerCommand::Wheel {
                delta_y: *delta_y,
                ctrl: true,
            },
            Op::ManualZoom(text) => ViewerCommand::ManualZoom(text.clone()),
            Op::GoTo(page) => ViewerCommand::GoTo(*page),
            Op::Page(text) => ViewerCommand::ManualPage(text.clone()),
            Op::Next => ViewerCommand::NextPage,
            Op::Prev => ViewerCommand::PrevPage,
            Op::Thumb(page) => ViewerCommand::ClickThumbnail(*page),
            Op::Scroll(top) => ViewerCommand::Scroll { top: *top },
            Op::Resize(width, height) => ViewerCommand::WindowResized(ViewerGeometry {
                container: Size::new(*width, *height),
                thumbnail_panel_height: *height,
                ..view.geometry()
            }),
            Op::ToggleMenu => ViewerCommand::ToggleZoomMenu,
            Op::Click(x, y) => ViewerCommand::PointerDown(Point::new(*x, *y)),
            Op::ToggleThumbnails => ViewerCommand::ToggleThumbnails,
        }
    }
}

fn parse_zoom(value: &str) -> Result<ZoomSpec, String> {
    ZoomSpec::parse(value).ok_or_else(|| format!("Unknown zoom value: {}", value))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let logger = AppLogger::new(MAX_LOG_ENTRIES, level);
    logger.clone().init()?;

    let result = run(cli.command).await;

    if cli.show_log {
        logger.dump();
    }
    result
}

async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Inspect { input, zoom, view } => {
            let options = view.options().await?;
            let document = LopdfDocument::load(&input)
                .await
                .with_context(|| format!("Failed to open {}", input.display()))?;

            let first = document.page(1).await?;
            let page_size = first.viewport(options.base_scale).size();
            let factor = viewport_math::factor_for(zoom, view.geometry().container, page_size);
            let lifecycle = PageCanvasLifecycle::new(&options);

            println!(
                "{}: {} pages, zoom {} (factor {:.4}, shown as {}%)",
                input.display(),
                document.page_count(),
                zoom,
                factor,
                viewport_math::display_percent(factor)
            );
            for page_number in 1..=document.page_count() {
                let page = document.page(page_number).await?;
                let node = lifecycle.build_node(page.as_ref(), page_number, factor);
                println!(
                    "  Page {}: {:.1} x {:.1} pt, container {:.1} x {:.1}, surface {} x {} (ratio {:.3})",
                    page_number,
                    page.size().width,
                    page.size().height,
                    node.container.width,
                    node.container.height,
                    node.surface.width(),
                    node.surface.height(),
                    node.pixel_ratio
                );
            }
        }

        Commands::Simulate { input, ops, view } => {
            let options = view.options().await?;
            let debounce = options.resize_debounce();
            let document = LopdfDocument::load(&input)
                .await
                .with_context(|| format!("Failed to open {}", input.display()))?;

            let (command_tx, command_rx) = mpsc::unbounded_channel();
            let (update_tx, mut update_rx) = mpsc::unbounded_channel();
            let worker = tokio::spawn(worker_task(
                document,
                options,
                view.geometry(),
                command_rx,
                update_tx,
            ));
            let printer = tokio::spawn(async move {
                let mut failed = false;
                while let Some(update) = update_rx.recv().await {
                    failed |= matches!(update, ViewerUpdate::Error { .. });
                    print_update(&update);
                }
                failed
            });

            for op in &ops {
                println!("> {:?}", op);
                command_tx.send(op.command(&view))?;
                if let Op::Resize(..) = op {
                    // Let the resize burst settle before snapshotting
                    tokio::time::sleep(debounce * 2).await;
                }
                command_tx.send(ViewerCommand::Snapshot)?;
            }
            drop(command_tx);

            worker.await?;
            if printer.await? {
                bail!("Simulation reported errors");
            }
        }

        Commands::Config { output } => {
            ViewerOptions::default().save(&output).await?;
            println!("Wrote default options → {}", output.display());
        }
    }

    Ok(())
}

fn print_update(update: &ViewerUpdate) {
    match update {
        ViewerUpdate::Loaded {
            page_count,
            zoom_factor,
        } => println!("loaded: {} pages at zoom {:.4}", page_count, zoom_factor),
        ViewerUpdate::ZoomChanged { factor, display } => {
            println!("zoomChanged: {:.4} ({}%)", factor, display)
        }
        ViewerUpdate::PageChanged { page } => println!("pageChanged: {}", page),
        ViewerUpdate::ResizeFinished { outcome } => println!("resize: {:?}", outcome),
        ViewerUpdate::Snapshot(snapshot) => print_snapshot(snapshot),
        ViewerUpdate::Error { message } => eprintln!("error: {}", message),
    }
}

fn print_snapshot(snapshot: &ViewerSnapshot) {
    println!(
        "  page {}/{} [{}] prev={} next={} | zoom {} ({:.4}, {}) in={} out={} menu={:?} | thumb {:?}{} | scroll {:.1}",
        snapshot.current_page,
        snapshot.page_count,
        snapshot.page_display,
        snapshot.nav.prev_enabled,
        snapshot.nav.next_enabled,
        snapshot.zoom_display,
        snapshot.zoom_factor,
        snapshot.zoom_active,
        snapshot.zoom_controls.zoom_in_enabled,
        snapshot.zoom_controls.zoom_out_enabled,
        snapshot.menu_state,
        snapshot.active_thumbnail,
        if snapshot.thumbnails_open { " (open)" } else { "" },
        snapshot.scroll_top
    );
}
