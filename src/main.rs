//! Fretboard Trainer - timed note-location drills for six-string guitar
//!
//! Single-session, single-user terminal application.
//! Shows a note and a string; find the fret before the clock runs out.

mod audio;
mod cli;
mod config;
mod fretboard;
mod session;

use clap::Parser;
use cli::{Command, Display, InputHandler};
use config::{parse_string_list, Settings};
use fretboard::StringId;
use rand::rngs::StdRng;
use rand::SeedableRng;
use session::{Challenge, Controller, Difficulty, GameState, InvalidOperation, Session, SessionSnapshot};
use std::error::Error;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "Fretboard Trainer")]
#[command(about = "Timed note-location drills on the guitar fretboard")]
struct Args {
    /// Difficulty level (overrides the settings file)
    #[arg(short, long, value_enum)]
    difficulty: Option<Difficulty>,

    /// Strings to practice, e.g. "6,5,4" (overrides the settings file)
    #[arg(short, long)]
    strings: Option<String>,

    /// Start with sound off
    #[arg(long)]
    no_audio: bool,

    /// Path to settings file
    #[arg(short, long, default_value = "fretboard.json")]
    config: String,

    /// Seed for a reproducible sequence of notes
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn init_tracing(debug: bool, log_file: Option<&str>) -> Result<(), Box<dyn Error>> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let default_directive = if debug {
        "fretboard_trainer=debug"
    } else {
        "fretboard_trainer=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(std::sync::Mutex::new(file)),
                )
                .try_init()?;
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
                .try_init()?;
        }
    }
    Ok(())
}

/// Settings file, then command-line overrides
fn resolve_settings(args: &Args) -> Result<Settings, Box<dyn Error>> {
    let mut settings = Settings::load(&args.config).unwrap_or_else(|e| {
        warn!("{}; using defaults", e);
        Settings::default()
    });

    if let Some(difficulty) = args.difficulty {
        settings.difficulty = difficulty;
    }
    if let Some(list) = &args.strings {
        settings.strings = parse_string_list(list)?;
    }
    if args.no_audio {
        settings.audio = false;
    }
    Ok(settings)
}

/// Run one key command against the controller
fn apply(
    controller: &mut Controller,
    command: Command,
    now: Instant,
) -> Result<(), InvalidOperation> {
    match command {
        Command::Next if controller.game_state() == GameState::Ended => {
            controller.start_new_session()
        }
        Command::Next => controller.generate_challenge(now).map(|_| ()),
        Command::ShowAnswer => controller.reveal_answer(),
        Command::GotIt => controller.mark_correct(now),
        Command::MissedIt => controller.mark_incorrect(now),
        Command::ToggleString(string) => {
            controller.toggle_string(string);
            Ok(())
        }
        Command::SelectAllStrings => {
            controller.select_all_strings();
            Ok(())
        }
        Command::CycleDifficulty => {
            let next = controller.session().difficulty.next();
            controller.set_difficulty(next);
            Ok(())
        }
        Command::ToggleAudio => {
            let enabled = !controller.session().audio_enabled;
            controller.set_audio_enabled(enabled);
            Ok(())
        }
        Command::ReplayNote => controller.replay_current_note(),
        Command::ResetScore => {
            controller.reset_score();
            Ok(())
        }
        Command::EndGame => controller.end_session(now),
        Command::NewGame => controller.start_new_session(),
    }
}

/// Everything on screen; redraw only when it changes
type Frame = (SessionSnapshot, Option<Challenge>, Option<String>);

fn render(
    display: &Display,
    controller: &Controller,
    notice: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let snapshot = controller.snapshot();
    let score = &controller.session().score;

    display.clear()?;
    display.show_header(&snapshot)?;

    if snapshot.game_state == GameState::Ended {
        display.show_summary(score, controller.duration_secs().unwrap_or(0))?;
        return Ok(());
    }

    match controller.challenge() {
        Some(challenge) => {
            display.show_challenge(&challenge)?;
            if challenge.answer_shown {
                display.show_answer(&challenge)?;
            }
            if challenge.awaiting_response {
                display.show_response_prompt()?;
            }
        }
        None => display.show_ready()?,
    }

    display.show_settings(&snapshot)?;
    if snapshot.total > 0 {
        display.show_string_stats(score)?;
    }

    if snapshot.selected_strings.is_empty() {
        display.show_notice("Please select at least one string to practice")?;
    } else if let Some(notice) = notice {
        display.show_notice(notice)?;
    }

    display.show_help()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.debug, args.log_file.as_deref())?;

    let settings = resolve_settings(&args)?;
    let strings = settings.selected_strings().unwrap_or_else(|e| {
        warn!("{}; practicing all strings", e);
        StringId::ALL.to_vec()
    });

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let session = Session::new(settings.difficulty, &strings, settings.audio);
    let mut controller = Controller::new(session, audio::default_player(), rng);
    info!(
        "starting at {} with {} string(s)",
        settings.difficulty,
        strings.len()
    );

    // Initialize display and input
    let display = Display::fullscreen()?;
    InputHandler::enable_raw_mode()?;
    let input = InputHandler::new();

    let mut notice: Option<String> = None;
    let mut last_frame: Option<Frame> = None;

    // Event loop
    'session: loop {
        controller.tick(Instant::now());

        let frame: Frame = (controller.snapshot(), controller.challenge(), notice.clone());
        if last_frame.as_ref() != Some(&frame) {
            render(&display, &controller, notice.as_deref())?;
            last_frame = Some(frame);
        }

        // Read input
        if let Some(key) = input.read_key()? {
            if InputHandler::is_exit(&key) {
                break 'session;
            }

            if let Some(command) = InputHandler::command(&key) {
                notice = apply(&mut controller, command, Instant::now())
                    .err()
                    .map(|e| e.to_string());
            }
        }
    }

    // Cleanup
    drop(display);
    InputHandler::disable_raw_mode()?;

    // Summary
    let score = &controller.session().score;
    println!(
        "📊 Final Stats: {}/{} correct | {}% accuracy",
        score.correct(),
        score.total(),
        controller.accuracy()
    );
    if let Some(secs) = controller.duration_secs() {
        println!("⏱  Game time: {}", cli::display::format_time(secs));
    }
    println!("🎸 Thanks for practicing!");

    Ok(())
}
