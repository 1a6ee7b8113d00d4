// neuromesh - ambient particle-network background for the terminal

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use neuromesh::app::config::DEFAULT_FRAME_MS;
use neuromesh::app::{event::handle_key_event, AppState, FrameConfig, STATUS_BAR_HEIGHT};
use neuromesh::engine::config::{
    DEFAULT_CONNECTION_THRESHOLD, DEFAULT_MAX_SPEED, DEFAULT_PARTICLE_COUNT,
};
use neuromesh::{ui, EngineConfig, TerminalContainer, Theme};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "neuromesh")]
#[command(about = "Ambient particle-network background for the terminal")]
#[command(version)]
struct Cli {
    /// Number of particles
    #[arg(short = 'n', long, default_value_t = DEFAULT_PARTICLE_COUNT)]
    particles: usize,

    /// Distance (px) beyond which connections are hidden
    #[arg(long, default_value_t = DEFAULT_CONNECTION_THRESHOLD)]
    threshold: f64,

    /// Per-axis velocity bound (px per frame)
    #[arg(long, default_value_t = DEFAULT_MAX_SPEED)]
    max_speed: f64,

    /// Seed for a reproducible field
    #[arg(short = 'S', long)]
    seed: Option<u64>,

    /// Colour theme
    #[arg(long, value_enum, default_value = "dark")]
    theme: ThemeArg,

    /// Frame interval in milliseconds
    #[arg(long, default_value_t = DEFAULT_FRAME_MS)]
    frame_ms: u64,

    /// Disable radius pulsation
    #[arg(long)]
    no_pulse: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

impl Cli {
    fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig {
            particle_count: self.particles,
            connection_threshold: self.threshold,
            max_speed: self.max_speed,
            seed: self.seed,
            ..Default::default()
        };
        if self.no_pulse {
            config.pulse_amplitude = 0.0;
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let engine_config = cli.engine_config();
    engine_config
        .validate()
        .context("invalid engine configuration")?;

    let (cols, rows) = crossterm::terminal::size().context("cannot query terminal size")?;
    let mut app = AppState::mount(
        engine_config,
        cli.theme.into(),
        TerminalContainer::new(cols, rows, STATUS_BAR_HEIGHT),
        FrameConfig::new(cli.frame_ms),
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, &mut app);
    app.unmount();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
) -> Result<()> {
    app.start();
    terminal.draw(|f| ui::draw(f, app))?;

    while app.running {
        // Sleep in the event poll until the next frame is due
        let timeout = app.scheduler.time_until_next(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handle_key_event(app, key.code);
                }
                Event::Resize(cols, rows) => app.on_resize(cols, rows),
                _ => {}
            }
        }

        if app.on_frame_due(Instant::now()) {
            terminal.draw(|f| ui::draw(f, app))?;
        }
    }
    Ok(())
}
