//! blockfall terminal runner (default binary).
//!
//! Uses crossterm for input and the framebuffer-based renderer from `blockfall-term`.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};

use blockfall::app::App;
use blockfall::audio::AudioManager;
use blockfall::config::{CliCommand, GameConfig, USAGE};
use blockfall::session_log::SessionLog;
use blockfall::term::{FrameBuffer, TerminalRenderer, Viewport};
use blockfall::types::FRAME_MS;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match GameConfig::from_env().parse_args(&args)? {
        CliCommand::Help => {
            print!("{}", USAGE);
            return Ok(());
        }
        CliCommand::Run(config) => config,
    };

    let mut log_error = None;
    let log = match config.log_path.as_deref() {
        Some(path) => SessionLog::open(path).unwrap_or_else(|e| {
            log_error = Some(e);
            SessionLog::disabled()
        }),
        None => SessionLog::disabled(),
    };
    let audio = AudioManager::open_default(config.audio_settings());
    let mut app = App::new(config.resolve_seed(), audio, log).with_buttons(config.mouse);

    let mut term = TerminalRenderer::new().with_mouse(config.mouse);
    term.enter()?;
    app.set_key_releases_reported(term.keyboard_enhanced());

    let result = run(&mut term, &mut app);

    // Always try to restore terminal state.
    let _ = term.exit();

    if let Some(e) = log_error {
        eprintln!("[Log] {:#}", e);
    }
    for line in app.take_diagnostics() {
        eprintln!("{}", line);
    }
    result
}

fn run(term: &mut TerminalRenderer, app: &mut App) -> Result<()> {
    let frame = Duration::from_millis(FRAME_MS as u64);
    let mut fb = FrameBuffer::new(0, 0);
    let mut last_frame = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        app.render_into(Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next frame.
        let timeout = frame.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
            if app.should_quit() {
                return Ok(());
            }
        }

        // Frame: whole milliseconds only, the remainder carries over.
        let elapsed_ms = last_frame.elapsed().as_millis();
        if elapsed_ms >= FRAME_MS as u128 {
            last_frame += Duration::from_millis(elapsed_ms as u64);
            app.frame(elapsed_ms.min(u32::MAX as u128) as u32);
        }
    }
}
