use std::io::{self, Stdout};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use log::{debug, info};

use munch::game::{Game, StepOutcome};
use munch::maze::{Dir, Maze, LAYOUT};
use munch::render::Renderer;

const DEFAULT_TICK_MS: u64 = 150;
const DEFAULT_RENDER_FPS: u64 = 60;

fn main() -> Result<()> {
    env_logger::init();

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(stdout: &mut Stdout) -> Result<()> {
    let maze = Maze::parse(&LAYOUT)?;
    let mut renderer = Renderer::new(maze.width(), maze.height());
    let mut game = Game::new(maze);
    let mut rng = rand::thread_rng();

    let (tick_ms, render_fps) = read_speed_settings();
    let tick = Duration::from_millis(tick_ms);
    let frame_time = Duration::from_micros(1_000_000 / render_fps.max(1));
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();

        // Drain every pending key event; each one is applied on its own,
        // never batched, so a blocked press still turns the player.
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    code => {
                        if let Some(dir) = dir_for_key(code) {
                            debug!("input: {dir:?}");
                            game.apply_input(dir);
                        }
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            let outcome = game.step(&mut rng);
            renderer.render(stdout, &game)?;
            match outcome {
                StepOutcome::Continue => {}
                StepOutcome::Won(score) => {
                    info!("maze cleared, final score {score}");
                    renderer.banner(stdout, "YOU WIN", score)?;
                    if !wait_for_key()? {
                        return Ok(());
                    }
                    last_tick = Instant::now();
                }
                StepOutcome::Lost(score) => {
                    info!("caught by a ghost, final score {score}");
                    renderer.banner(stdout, "GAME OVER", score)?;
                    if !wait_for_key()? {
                        return Ok(());
                    }
                    last_tick = Instant::now();
                }
            }
        } else {
            renderer.render(stdout, &game)?;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn dir_for_key(code: KeyCode) -> Option<Dir> {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Some(Dir::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Dir::Down),
        KeyCode::Left | KeyCode::Char('h') => Some(Dir::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(Dir::Right),
        _ => None,
    }
}

/// Blocks until a key press. Returns false when the player quits instead.
fn wait_for_key() -> io::Result<bool> {
    loop {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                return Ok(!matches!(key.code, KeyCode::Char('q') | KeyCode::Esc));
            }
        }
    }
}

fn read_speed_settings() -> (u64, u64) {
    let tick_ms = std::env::var("MUNCH_TICK_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_TICK_MS);
    let render_fps = std::env::var("MUNCH_FPS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_RENDER_FPS);
    (tick_ms, render_fps)
}
