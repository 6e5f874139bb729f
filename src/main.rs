use anyhow::Context;
use bfruit::app::App;
use bfruit::audio::TerminalAudio;
use bfruit::config::{Args, Settings};
use bfruit::constants::frame_interval_ms;
use bfruit::logging::init_file_logging;
use bfruit::slot::SlotMachine;
use bfruit::ui::draw_ui;
use bfruit::utils::{resolve_pref_dir, FileHighScore};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let pref_dir = resolve_pref_dir(args.pref.as_deref()).context("preferences directory")?;
    let log_path = init_file_logging(&pref_dir, args.log_level.as_deref())
        .with_context(|| format!("opening log in {}", pref_dir.display()))?;
    info!(
        version = bfruit::build_info::BUILD_VERSION,
        log = %log_path.display(),
        "starting"
    );

    let settings = Settings::load(&pref_dir).with_overrides(&args);
    let machine = SlotMachine::new(args.invincible);
    let audio = TerminalAudio::stdout(settings.sound, settings.music);
    let mut app = App::new(
        machine,
        audio,
        FileHighScore::new(&pref_dir),
        settings,
        Some(pref_dir),
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, args.fps);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        error!(error = %err, "terminal loop failed");
    }
    info!(high_score = app.high_score, "exiting");
    result.context("terminal loop")
}

/// Frame loop: draw, drain input until the frame deadline, advance the reels.
fn run<B: ratatui::backend::Backend, S: bfruit::slot::HighScoreStore>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
    fps: u32,
) -> io::Result<()> {
    let frame = Duration::from_millis(frame_interval_ms(fps));
    let mut next_tick = Instant::now() + frame;

    while !app.should_quit() {
        terminal.draw(|f| draw_ui(f, &*app))?;

        loop {
            let timeout = next_tick.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
                if app.should_quit() {
                    return Ok(());
                }
            }
        }

        app.tick();
        next_tick += frame;
        let now = Instant::now();
        if next_tick < now {
            next_tick = now + frame;
        }
    }
    Ok(())
}
