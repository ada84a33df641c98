mod ui;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use flappy_neat::build_info;
use flappy_neat::episode::{FrameReport, FrameSnapshot};
use flappy_neat::simulator::{
    run_training_with, FrameObserver, GenerationStats, RandomNetworks, SimConfig,
};
use flappy_neat::SimError;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::ops::ControlFlow;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use ui::{render_flappy, ViewerState};

/// Wait between frames at normal speed (30 fps).
const FRAME_DELAY: Duration = Duration::from_millis(33);
/// Event poll interval while paused.
const PAUSE_POLL: Duration = Duration::from_millis(50);
const DELAY_STEP: Duration = Duration::from_millis(10);

struct Options {
    config: SimConfig,
    delay: Duration,
}

/// Draws every frame of training and handles keys between frames.
struct TerminalViewer {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    state: ViewerState,
    delay: Duration,
    error: Option<io::Error>,
}

impl TerminalViewer {
    fn new(terminal: Terminal<CrosstermBackend<Stdout>>, generations: u32, delay: Duration) -> Self {
        Self {
            terminal,
            state: ViewerState::new(generations, delay),
            delay,
            error: None,
        }
    }

    fn draw(&mut self) -> io::Result<()> {
        let state = &self.state;
        self.terminal.draw(|frame| {
            let area = frame.size();
            render_flappy(frame, area, state);
        })?;
        Ok(())
    }

    /// Draw the current frame, then hold it for the frame delay (or until
    /// unpaused) while handling input.
    fn present(&mut self) -> io::Result<ControlFlow<()>> {
        let deadline = Instant::now() + self.delay;
        loop {
            self.draw()?;

            let wait = if self.state.paused {
                PAUSE_POLL
            } else {
                deadline.saturating_duration_since(Instant::now())
            };
            if event::poll(wait)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        match key.code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(ControlFlow::Break(()));
                            }
                            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(ControlFlow::Break(()));
                            }
                            KeyCode::Char(' ') => {
                                self.state.paused = !self.state.paused;
                            }
                            KeyCode::Char('+') | KeyCode::Char('=') => {
                                self.delay = self.delay.saturating_sub(DELAY_STEP);
                                self.state.frame_delay = self.delay;
                            }
                            KeyCode::Char('-') => {
                                self.delay += DELAY_STEP;
                                self.state.frame_delay = self.delay;
                            }
                            _ => {}
                        }
                    }
                }
            }

            if !self.state.paused && Instant::now() >= deadline {
                return Ok(ControlFlow::Continue(()));
            }
        }
    }
}

impl FrameObserver for TerminalViewer {
    fn on_frame(
        &mut self,
        generation: u32,
        snapshot: &FrameSnapshot,
        _report: &FrameReport,
    ) -> ControlFlow<()> {
        self.state.generation = generation;
        self.state.snapshot = Some(snapshot.clone());
        match self.present() {
            Ok(flow) => flow,
            Err(e) => {
                self.error = Some(e);
                ControlFlow::Break(())
            }
        }
    }

    fn on_generation(&mut self, stats: &GenerationStats) {
        self.state.history.push(stats.clone());
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), SimError> {
    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args)?;
    options.config.validate()?;

    // Logs would tear the alternate screen, so they stay off unless asked for.
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(io::stderr)
            .init();
    }

    enable_raw_mode()?;
    let terminal = restore_on_err(open_terminal(), restore_terminal)?;

    let mut viewer = TerminalViewer::new(terminal, options.config.generations, options.delay);
    let mut source = RandomNetworks::new(&options.config);
    let report = run_training_with(&options.config, &mut source, &mut viewer);

    restore_terminal();
    viewer.terminal.show_cursor()?;

    if let Some(e) = viewer.error.take() {
        return Err(e.into());
    }
    let report = report?;

    println!("{}", report.to_text());
    if let Some((_, fitness)) = source.champion() {
        println!("Champion fitness: {:.2}", fitness);
    }
    Ok(())
}

fn open_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Leave the alternate screen and raw mode. Errors are ignored: this also
/// runs while another error is already being reported.
fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = io::stdout().execute(LeaveAlternateScreen);
}

/// Pass `result` through, running `restore` first if it is an error.
fn restore_on_err<T>(result: io::Result<T>, restore: impl FnOnce()) -> io::Result<T> {
    if result.is_err() {
        restore();
    }
    result
}

fn parse_args(args: &[String]) -> Result<Options, SimError> {
    // A config file is the base; other flags override it wherever they appear.
    let mut config = match args.iter().position(|a| a == "-c" || a == "--config") {
        Some(i) => match args.get(i + 1) {
            Some(path) => SimConfig::from_file(path)?,
            None => return Err(SimError::InvalidConfig("--config needs a path".to_string())),
        },
        None => SimConfig::default(),
    };
    let mut delay = FRAME_DELAY;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--config" => {
                i += 1;
            }
            "-g" | "--generations" => {
                if i + 1 < args.len() {
                    config.generations = args[i + 1].parse().unwrap_or(config.generations);
                    i += 1;
                }
            }
            "-n" | "--population" => {
                if i + 1 < args.len() {
                    config.population_size = args[i + 1].parse().unwrap_or(config.population_size);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-d" | "--delay" => {
                if i + 1 < args.len() {
                    if let Ok(ms) = args[i + 1].parse::<u64>() {
                        delay = Duration::from_millis(ms);
                    }
                    i += 1;
                }
            }
            "--fast" => {
                delay = Duration::ZERO;
            }
            "--version" | "-V" => {
                println!("flappy-neat {}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'flappy-neat --help' for usage.");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    Ok(Options { config, delay })
}

fn print_help() {
    println!("Flappy NEAT - watch a population learn to fly\n");
    println!("Usage: flappy-neat [OPTIONS]\n");
    println!("Options:");
    println!("  -c, --config <FILE>      Load a JSON training config");
    println!("  -g, --generations <N>    Generations to run");
    println!("  -n, --population <N>     Birds per generation");
    println!("  -s, --seed <S>           Random seed for reproducibility");
    println!("  -d, --delay <MS>         Milliseconds between frames (default: 33)");
    println!("      --fast               No delay between frames");
    println!("  -V, --version            Show version information");
    println!("  -h, --help               Show this help message\n");
    println!("Keys:");
    println!("  Space    Pause / resume");
    println!("  + / -    Faster / slower");
    println!("  q, Esc   Quit and print the report");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_restore_runs_on_setup_failure() {
        let restored = Cell::new(false);
        let result: io::Result<()> = restore_on_err(
            Err(io::Error::new(io::ErrorKind::Other, "no tty")),
            || restored.set(true),
        );
        assert!(result.is_err());
        assert!(restored.get());
    }

    #[test]
    fn test_restore_skipped_on_success() {
        let restored = Cell::new(false);
        let result = restore_on_err(Ok(5), || restored.set(true));
        assert_eq!(result.unwrap(), 5);
        assert!(!restored.get());
    }
}
