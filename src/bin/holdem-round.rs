use clap::Parser;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use holdem_round::agents::{AgentError, AgentTable, BotAgent, BotProfile};
use holdem_round::config::TableConfig;
use holdem_round::game::{Game, GameError, PlayerId};
use holdem_round::tui::controller::{Term, TerminalAgent};
use log::LevelFilter;
use ratatui::prelude::*;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

/// Play a hand of Texas Hold'em against bots in the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Seats at the table (2-22).
    #[arg(long, default_value_t = 3)]
    players: usize,
    #[arg(long, default_value_t = 1)]
    small_blind: u64,
    #[arg(long, default_value_t = 2)]
    big_blind: u64,
    /// Shuffle seed; each following hand uses the next seed.
    #[arg(long)]
    seed: Option<u64>,
    /// Seat you play from.
    #[arg(long, default_value_t = 1)]
    human_seat: usize,
    /// Let bots play every seat and print the hand.
    #[arg(long)]
    bots_only: bool,
    /// Write logs here; the table owns the terminal otherwise.
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// off, error, warn, info, debug or trace.
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("logger setup failed: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error("unknown log level {0:?}")]
    LogLevel(String),
    #[error("human seat {seat} is not at a {players}-player table")]
    HumanSeat { seat: usize, players: usize },
}

fn init_logging(args: &Args, headless: bool) -> Result<(), CliError> {
    let level: LevelFilter =
        args.log_level.parse().map_err(|_| CliError::LogLevel(args.log_level.clone()))?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    if let Some(path) = &args.log_file {
        simplelog::WriteLogger::init(level, config, std::fs::File::create(path)?)?;
    } else if headless {
        simplelog::TermLogger::init(
            level,
            config,
            simplelog::TerminalMode::Stderr,
            simplelog::ColorChoice::Auto,
        )?;
    }
    Ok(())
}

fn table_config(args: &Args, hand: u64) -> TableConfig {
    let cfg = TableConfig::default()
        .with_players(args.players)
        .with_blinds(args.small_blind, args.big_blind);
    match args.seed {
        Some(seed) => cfg.with_seed(seed.wrapping_add(hand)),
        None => cfg,
    }
}

fn bot_for(args: &Args, seat: usize, hand: u64, delay: bool) -> BotAgent {
    let mut profile = BotProfile::default();
    if let Some(seed) = args.seed {
        profile = profile.with_seed(seed ^ ((seat as u64) << 32) ^ hand);
    }
    if delay {
        profile = profile.with_delay(300, 700);
    }
    BotAgent::new(profile)
}

fn run_headless(args: &Args) -> Result<(), CliError> {
    let cfg = table_config(args, 0);
    let mut game = Game::new(cfg)?;
    let mut table = AgentTable::for_seats(args.players);
    for n in 1..=args.players {
        table.set_agent(PlayerId::new(n), Some(Box::new(bot_for(args, n, 0, false))));
    }
    let outcome = game.play_hand(&mut table)?;
    for p in game.players() {
        println!("{} holds {}", p.id(), p.hole());
    }
    for event in game.history() {
        println!("{event}");
    }
    println!("{outcome}");
    Ok(())
}

fn play_interactive(args: &Args, human: &mut TerminalAgent) -> Result<(), CliError> {
    let human_id = PlayerId::new(args.human_seat);
    for hand in 0u64.. {
        let mut game = Game::new(table_config(args, hand))?;
        if let Some(p) = game.player(human_id) {
            human.app_mut().reveal_hole(p.hole());
        }
        let mut table = AgentTable::for_seats(args.players);
        for n in (1..=args.players).filter(|&n| n != args.human_seat) {
            table.set_agent(PlayerId::new(n), Some(Box::new(bot_for(args, n, hand, true))));
        }
        table.set_agent(human_id, Some(Box::new(&mut *human)));
        let outcome = game.play_hand(&mut table)?;
        drop(table);
        log::info!("hand {hand}: {outcome}");
        if !human.show_outcome()? {
            break;
        }
    }
    Ok(())
}

fn setup_terminal() -> io::Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(mut terminal: Term) -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), crossterm::terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let headless = args.bots_only || !io::stdout().is_terminal();
    init_logging(&args, headless)?;
    table_config(&args, 0).validate().map_err(GameError::from)?;

    if headless {
        return run_headless(&args);
    }
    if args.human_seat == 0 || args.human_seat > args.players {
        return Err(CliError::HumanSeat { seat: args.human_seat, players: args.players });
    }

    let terminal = setup_terminal()?;
    let mut human = TerminalAgent::new(terminal, PlayerId::new(args.human_seat));
    let res = play_interactive(&args, &mut human);

    // Always attempt to restore terminal
    restore_terminal(human.into_terminal())?;
    match res {
        Err(CliError::Game(GameError::Agent(AgentError::Quit))) => Ok(()),
        other => other,
    }
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("holdem-round {}: {e}", holdem_round::VERSION);
            ExitCode::FAILURE
        }
    }
}
