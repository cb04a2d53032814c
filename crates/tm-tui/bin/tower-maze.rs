//! Tower maze generator
//!
//! Generates one tower and writes it out as ASCII, PNG, a JSON report or an
//! interactive replay of the build.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor, event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_subscriber::EnvFilter;

use tm_core::{GeneratorConfig, ProgressSink, Snapshot, SnapshotRecorder, TowerGenerator};
use tm_tui::png::{PngFrameSink, save_png};
use tm_tui::widgets::CellStyle;
use tm_tui::{ReplayApp, Theme};

/// Circular tower maze generator
#[derive(Parser, Debug)]
#[command(name = "tower-maze")]
#[command(author, version, about = "Generate a circular tower maze", long_about = None)]
struct Args {
    /// JSON configuration file; missing options keep their defaults
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// JSON object merged over the configuration, e.g. '{"straightBias":0.5}'
    #[arg(long = "set", value_name = "JSON")]
    set: Option<String>,

    /// Random seed (a fresh one is drawn and reported when absent)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Grid side length (odd)
    #[arg(short = 'g', long = "grid-size")]
    grid_size: Option<usize>,

    /// Prune dead-end corridors after generation
    #[arg(long = "remove-dead-ends")]
    remove_dead_ends: bool,

    /// Pixels per cell in PNG output
    #[arg(long = "cell-size")]
    cell_size: Option<u32>,

    /// Write the finished tower as a PNG image
    #[arg(long = "png", value_name = "FILE")]
    png: Option<PathBuf>,

    /// Write every progress snapshot as a PNG into this directory
    #[arg(long = "frames", value_name = "DIR")]
    frames: Option<PathBuf>,

    /// Print the finished tower as text (default when no other output is chosen)
    #[arg(long = "ascii")]
    ascii: bool,

    /// Print the generation report as JSON
    #[arg(long = "report")]
    report: bool,

    /// Replay the build in the terminal
    #[arg(long = "replay")]
    replay: bool,

    /// Milliseconds between replay frames
    #[arg(long = "delay-ms", default_value_t = 30)]
    delay_ms: u64,

    /// Most snapshots kept for replay
    #[arg(long = "max-frames", default_value_t = 2000)]
    max_frames: usize,

    /// Draw the replay with glyphs instead of colored half blocks
    #[arg(long = "glyphs")]
    glyphs: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long = "print-config")]
    print_config: bool,

    /// More log output on stderr (-v info, -vv debug); RUST_LOG wins when set
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(&args)?;
    if args.print_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    let generator = TowerGenerator::new(config);
    let mut rng = generator.rng();
    tracing::info!(seed = rng.seed(), "starting generation");

    let frames = match &args.frames {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating frame directory {}", dir.display()))?;
            Some(PngFrameSink::new(dir))
        }
        None => None,
    };
    let mut sink = TeeSink {
        recorder: args
            .replay
            .then(|| SnapshotRecorder::with_limit(args.max_frames)),
        frames,
    };

    let result = generator.generate(&mut rng, &mut sink);
    let TeeSink { recorder, frames } = sink;

    if let Some(frames) = frames {
        let written = frames.finish().context("writing snapshot frames")?;
        tracing::info!(frames = written, "snapshot frames written");
    }

    let cell_size = generator.config().cell_size;
    if let Some(path) = &args.png {
        save_png(&result.grid, cell_size, path)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), "png written");
    }

    let any_output = args.png.is_some() || args.frames.is_some() || args.report || args.replay;
    if args.ascii || !any_output {
        print!("{}", result.grid.to_ascii());
    }
    if args.report {
        println!("{}", serde_json::to_string_pretty(&result.report)?);
    }

    if let Some(recorder) = recorder {
        let style = if args.glyphs {
            CellStyle::Glyph
        } else {
            CellStyle::HalfBlock
        };
        let app = ReplayApp::new(recorder.into_frames(), result.report.seed, Theme::detect())
            .with_cell_style(style);
        run_replay(app, Duration::from_millis(args.delay_ms))?;
    }

    Ok(())
}

/// Forwards snapshots to the replay recorder and the PNG frame writer
struct TeeSink {
    recorder: Option<SnapshotRecorder>,
    frames: Option<PngFrameSink>,
}

impl ProgressSink for TeeSink {
    fn snapshot(&mut self, snapshot: &Snapshot<'_>) {
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.snapshot(snapshot);
        }
        if let Some(frames) = self.frames.as_mut() {
            frames.snapshot(snapshot);
        }
    }
}

/// Logs go to stderr so stdout stays clean for ASCII and JSON
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Defaults, then the config file, then `--set`, then individual flags
fn load_config(args: &Args) -> Result<GeneratorConfig> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::from_path(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => GeneratorConfig::default(),
    };
    if let Some(json) = &args.set {
        config = config.with_overrides(json).context("applying --set")?;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(grid_size) = args.grid_size {
        config.grid_size = grid_size;
    }
    if let Some(cell_size) = args.cell_size {
        config.cell_size = cell_size;
    }
    if args.remove_dead_ends {
        config.remove_dead_ends = true;
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn run_replay(app: ReplayApp, delay: Duration) -> Result<()> {
    enable_raw_mode()?;
    with_restore(
        || {
            execute!(io::stdout(), EnterAlternateScreen)?;
            let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
            replay_loop(&mut terminal, app, delay)
        },
        restore_terminal,
    )
}

/// Run `body`, then `restore` whatever happened. The body's error wins.
fn with_restore<T>(body: impl FnOnce() -> Result<T>, restore: impl FnOnce() -> Result<()>) -> Result<T> {
    let outcome = body();
    let restored = restore();
    let value = outcome?;
    restored?;
    Ok(value)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)?;
    Ok(())
}

fn replay_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: ReplayApp,
    delay: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|frame| app.render(frame))?;

        let timeout = delay.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            app.handle_event(event::read()?);
            if app.should_quit() {
                break;
            }
        }
        if last_tick.elapsed() >= delay {
            app.tick();
            last_tick = Instant::now();
        }
    }
    Ok(())
}
