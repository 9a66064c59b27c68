//! `domino` console front-end.
//!
//! Menu-driven play for one operator (the principal player) tracking a
//! four-seat table, plus a scripted `simulate` mode. All rules live in the
//! library; this file only reads lines, parses them and prints.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use domino_tracker::config::Config;
use domino_tracker::ledger::LedgerWriter;
use domino_tracker::simulate;
use domino_tracker::{Move, MoveOutcome, PlayerSetup, Round, Session, Side, Tile, HAND_SIZE};

#[derive(Parser)]
#[command(name = "domino")]
#[command(about = "Dominoes table tracker with pass deduction and rabbit/cat ledger")]
struct Args {
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Results ledger (overrides config)
    #[arg(long)]
    ledger: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive menu (default)
    Play,
    /// Run scripted rounds and record them in the ledger
    Simulate {
        /// Seed for random deals; without it the predefined deal is used
        #[arg(long)]
        seed: Option<u64>,

        /// Number of rounds
        #[arg(long, default_value = "1")]
        rounds: u32,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref()).context("loading config")?;
    if let Some(path) = args.ledger {
        config.ledger_path = path;
    }
    init_logging(if args.verbose { "debug" } else { config.log_level.as_str() });
    info!(version = domino_tracker::version(), ledger = %config.ledger_path.display(), "starting");

    let ledger = LedgerWriter::new(&config.ledger_path);
    let mut session = Session::new();

    match args.command.unwrap_or(Command::Play) {
        Command::Play => {
            let stdin = io::stdin();
            let mut console = Console { lines: stdin.lock().lines() };
            main_menu(&mut console, &config, &mut session, &ledger)
        }
        Command::Simulate { seed, rounds } => {
            let seed = seed.or(config.seed);
            for i in 0..rounds {
                simulate_round(&config, &mut session, &ledger, seed.map(|s| s.wrapping_add(i as u64)))?;
            }
            print_scores(&session);
            Ok(())
        }
    }
}

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .ok();
}

// -------------------------
// Console input
// -------------------------
struct Console<L: Iterator<Item = io::Result<String>>> {
    lines: L,
}

impl<L: Iterator<Item = io::Result<String>>> Console<L> {
    /// None on end of input.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{prompt}");
        io::stdout().flush()?;
        match self.lines.next() {
            Some(line) => Ok(Some(line?.trim().to_string())),
            None => Ok(None),
        }
    }

    fn ask_index(&mut self, prompt: &str, count: usize) -> Result<Option<usize>> {
        loop {
            let Some(s) = self.ask(prompt)? else { return Ok(None) };
            match s.parse::<usize>() {
                Ok(n) if (1..=count).contains(&n) => return Ok(Some(n - 1)),
                _ => println!("Pick a number between 1 and {count}."),
            }
        }
    }
}

fn main_menu<L: Iterator<Item = io::Result<String>>>(
    console: &mut Console<L>,
    config: &Config,
    session: &mut Session,
    ledger: &LedgerWriter,
) -> Result<()> {
    loop {
        println!();
        println!("--- Main menu ---");
        println!("1. New round");
        println!("2. Round history");
        println!("3. Reset history");
        println!("4. Simulate the predefined deal");
        println!("5. Exit");
        let Some(choice) = console.ask_index("Choose an option: ", 5)? else {
            return Ok(());
        };
        match choice {
            0 => {
                if !play_round(console, config, session, ledger)? {
                    return Ok(());
                }
            }
            1 => print_history(session),
            2 => {
                session.reset();
                println!("History reset.");
            }
            3 => simulate_round(config, session, ledger, None)?,
            _ => return Ok(()),
        }
    }
}

// -------------------------
// Interactive round
// -------------------------

/// Returns false when input ran out.
fn play_round<L: Iterator<Item = io::Result<String>>>(
    console: &mut Console<L>,
    config: &Config,
    session: &mut Session,
    ledger: &LedgerWriter,
) -> Result<bool> {
    println!("\n--- Players ---");
    let mut names = Vec::with_capacity(config.max_players);
    for (i, default) in config.player_names.iter().enumerate() {
        let Some(n) = console.ask(&format!("Name of player {} (Enter for \"{default}\"): ", i + 1))? else {
            return Ok(false);
        };
        names.push(if n.is_empty() { default.clone() } else { n });
    }

    println!("\n--- Who are you? ---");
    list_names(&names);
    let Some(principal) = console.ask_index("> ", names.len())? else { return Ok(false) };

    println!("\n--- Tiles of {} ---", names[principal]);
    let mut hand: Vec<Tile> = Vec::with_capacity(HAND_SIZE);
    while hand.len() < HAND_SIZE {
        let Some(s) = console.ask(&format!("Tile {} (x/y): ", hand.len() + 1))? else { return Ok(false) };
        match Tile::parse(&s) {
            Ok(t) if hand.contains(&t) => println!("{t} is already in your hand."),
            Ok(t) => hand.push(t),
            Err(e) => println!("{e}"),
        }
    }

    println!("\n--- Who starts? ---");
    list_names(&names);
    let Some(starting) = console.ask_index("> ", names.len())? else { return Ok(false) };

    let setups = names
        .iter()
        .enumerate()
        .map(|(i, n)| {
            if i == principal {
                PlayerSetup::known(n.clone(), hand.clone())
            } else {
                PlayerSetup::hidden(n.clone())
            }
        })
        .collect();
    let mut round = match session.start_round(setups, principal, starting) {
        Ok(r) => r,
        Err(e) => {
            println!("Cannot start the round: {e}");
            return Ok(true);
        }
    };

    while let Some(idx) = round.current_player() {
        show_turn(&round, idx);
        let Some(input) = console.ask("Tile to play (x/y), 'p' to pass, 'q' to abandon: ")? else {
            return Ok(false);
        };
        let mv = match input.to_ascii_lowercase().as_str() {
            "p" => Move::Pass,
            "q" => {
                println!("Round abandoned; nothing recorded.");
                return Ok(true);
            }
            s => match Tile::parse(s) {
                Ok(t) => Move::play(t),
                Err(e) => {
                    println!("{e}");
                    continue;
                }
            },
        };

        let mut outcome = round.attempt_move(idx, mv);
        let needs_side = matches!(&outcome, MoveOutcome::Rejected(e) if e.needs_side());
        if let (true, Move::Play { tile, .. }) = (needs_side, mv) {
            let Some(side) = ask_side(console)? else { return Ok(false) };
            outcome = round.attempt_move(idx, Move::play_on(tile, side));
        }

        match outcome {
            MoveOutcome::Accepted => {
                if let Move::Play { tile, .. } = mv {
                    println!("{} played {tile}", round.players()[idx].name());
                } else {
                    println!("{} passed.", round.players()[idx].name());
                }
                if round.consecutive_passes() >= round.players().len() {
                    println!("Everyone passed. The round only ends when someone plays their seventh tile ('q' abandons it).");
                }
            }
            MoveOutcome::Rejected(e) => println!("Invalid move: {e}"),
            MoveOutcome::RoundOver { winner } => {
                println!("\n--- Round over ---");
                println!("{} played every tile and wins!", round.players()[winner].name());
                let summary = session.finish_round(&mut round)?;
                if summary.rabbit {
                    println!("{} scored a RABBIT!", summary.winner);
                }
                if summary.cat {
                    println!("Nobody played: a CAT was added.");
                }
                if let Err(e) = ledger.append(&summary) {
                    warn!(error = %e, "could not write results ledger");
                }
                print_scores(session);
            }
        }
    }
    Ok(true)
}

fn ask_side<L: Iterator<Item = io::Result<String>>>(console: &mut Console<L>) -> Result<Option<Side>> {
    loop {
        let Some(s) = console.ask("Fits both ends. Side (L/R): ")? else { return Ok(None) };
        match Side::from_str(&s) {
            Some(side) => return Ok(Some(side)),
            None => println!("Type L or R."),
        }
    }
}

fn show_turn(round: &Round, idx: usize) {
    println!("\n--- Table: {} ---", round.table());
    for (i, p) in round.players().iter().enumerate() {
        if i == round.principal() {
            continue;
        }
        if p.is_hidden() {
            println!("Possible tiles for {} ({} in hand): {}", p.name(), p.tiles_left(), round.candidate_tiles(i));
        } else {
            println!("Possible tiles for {}: {}", p.name(), round.candidate_tiles(i));
        }
    }
    let p = &round.players()[idx];
    println!("> {} to move", p.name());
    match p.known_tiles() {
        Some(tiles) if idx == round.principal() => {
            let hand: Vec<String> = tiles.iter().map(|t| t.to_string()).collect();
            println!("Your tiles: {}", hand.join(" "));
        }
        _ => println!("History: {}", p.formatted_history()),
    }
}

fn list_names(names: &[String]) {
    for (i, n) in names.iter().enumerate() {
        println!("{}. {n}", i + 1);
    }
}

// -------------------------
// Reports
// -------------------------
fn print_history(session: &Session) {
    if session.history().is_empty() {
        println!("\n--- No rounds recorded ---");
        return;
    }
    println!("\n--- Round history ---");
    for rec in session.history() {
        let players: Vec<String> = rec
            .participants
            .iter()
            .map(|p| format!("{} ({} plays)", p.name, p.play_count))
            .collect();
        println!("Round #{} - Winner: {} - Players: {}", rec.round_id, rec.winner, players.join(", "));
    }
}

fn print_scores(session: &Session) {
    println!("\n--- Scores ---");
    for (name, wins) in session.scores() {
        println!("{name}: {wins} wins");
    }
    println!("Rabbits: {}", session.rabbits());
    println!("Cats: {}", session.cats());
}

fn simulate_round(config: &Config, session: &mut Session, ledger: &LedgerWriter, seed: Option<u64>) -> Result<()> {
    let deal = match seed {
        Some(s) => simulate::random_deal(&config.player_names, config.max_players, s),
        None => simulate::predefined_deal(&config.player_names),
    };
    let mut round = session.start_round(deal, 0, 0)?;
    let report = simulate::run(&mut round, 1_000);

    println!("\n--- Simulation ---");
    for p in round.players() {
        println!("{}: {}", p.name(), p.formatted_history());
    }
    println!("Table: {}", round.table());

    match report.winner {
        Some(w) => {
            println!("{} wins after {} turns.", round.players()[w].name(), report.turns);
            let summary = session.finish_round(&mut round)?;
            ledger
                .append(&summary)
                .with_context(|| format!("appending to {}", ledger.path().display()))?;
        }
        None => println!("Blocked after {} turns; not recorded.", report.turns),
    }
    Ok(())
}
