/* A console war game over a small map of territories.
 *
 * Two variants:
 * - duel: every territory is typed in by hand (name, commander, color, troops) and any
 *   territory may attack any other until you stop.
 * - missions: 2-6 players get a color and a secret mission, territories are dealt out
 *   round-robin and battles continue until a mission is met, one player remains, or
 *   you stop.
 *
 * Battles are a single die each. Attacker higher: the defender changes hands. Defender
 * higher: the attacker loses a troop (never the last). Equal: nothing happens.
 */
use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;

use territory_war::config::{self, GameConfig, Variant};
use territory_war::console::{Console, ConsoleStrategy};
use territory_war::dice::{Dice, RandomDice};
use territory_war::strategy::{Dumb, Strategy};
use territory_war::{GameState, Snapshot, TurnReport};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Which rule set to play
    #[arg(long, value_enum, default_value_t = Variant::Missions)]
    variant: Variant,

    /// Number of players (missions variant); asked for when omitted
    #[arg(short, long)]
    players: Option<usize>,

    /// Number of territories; asked for when omitted
    #[arg(short, long)]
    territories: Option<usize>,

    /// Seed for the dice; seeded from the OS when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many turns
    #[arg(long)]
    max_turns: Option<usize>,

    /// Play every attack automatically with generated names
    #[arg(long)]
    auto: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

/// Automatic attacks, narrated to the console.
struct Autopilot<R, W> {
    console: Console<R, W>,
}

impl<R: BufRead, W: Write> Strategy for Autopilot<R, W> {
    fn attack_step(&mut self, view: &Snapshot) -> Option<(usize, usize)> {
        Dumb.attack_step(view)
    }

    fn observe(&mut self, view: &Snapshot, report: &TurnReport) {
        let shown = self
            .console
            .say(&format!("TURN {}", report.turn))
            .and_then(|_| self.console.show_turn(view.board, view.players, report));
        if let Err(e) = shown {
            log::warn!("could not print turn {}: {}", report.turn, e);
        }
    }
}

fn ask_counts<R: BufRead, W: Write>(console: &mut Console<R, W>, args: &Args) -> Result<GameConfig> {
    let variant = args.variant;
    let players = match args.players {
        Some(n) => n,
        None if !variant.has_players() => 0,
        None if args.auto => config::MIN_PLAYERS,
        None => {
            let range = variant.player_range();
            console.read_number(
                &format!("How many players? (min: {}, max: {}): ", range.start(), range.end()),
                range,
            )?
        }
    };
    let territories = match args.territories {
        Some(n) => n,
        None if args.auto => *variant.territory_range().start(),
        None => {
            let range = variant.territory_range();
            console.read_number(
                &format!("How many territories? (min: {}, max: {}): ", range.start(), range.end()),
                range,
            )?
        }
    };
    let mut cfg = GameConfig::new(variant, players, territories);
    cfg.seed = args.seed;
    cfg.max_turns = args.max_turns;
    cfg.auto = args.auto;
    Ok(cfg.normalized())
}

fn register<D: Dice, R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    state: &mut GameState<D>,
) -> Result<()> {
    let cfg = state.config().clone();
    match cfg.variant {
        Variant::Missions => {
            console.say("PLAYER REGISTRATION")?;
            for i in 0..cfg.players {
                let name = console.read_text(&format!("Player {} name: ", i + 1))?;
                let p_i = state.register_player(&name)?;
                let p = state.player(p_i)?;
                console.say(&format!("  Color: {}", p.color))?;
            }
            console.show_missions(state.players())?;
            console.say("TERRITORY REGISTRATION")?;
            for i in 0..cfg.territories {
                let name = console.read_text(&format!("Name of territory {}: ", i + 1))?;
                state.register_territory(&name)?;
            }
        }
        Variant::Duel => {
            console.say("TERRITORY REGISTRATION")?;
            for i in 0..cfg.territories {
                console.say(&format!("TERRITORY #{}", i + 1))?;
                let name = console.read_text("  Territory name: ")?;
                let owner = console.read_text("  Commander name: ")?;
                let color = console.read_text("  Army color: ")?;
                let troops = console.read_troops("  Number of troops: ")?;
                state.register_full_territory(&name, &owner, &color, troops)?;
            }
        }
    }
    state.assign_territories()?;
    Ok(())
}

fn run<D: Dice>(cfg: GameConfig, dice: D) -> Result<()> {
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());

    let mut state = if cfg.auto {
        GameState::with_generated_names(cfg, dice)?
    } else {
        let mut state = GameState::new(cfg, dice)?;
        register(&mut console, &mut state)?;
        state
    };

    console.say("STARTING MAP")?;
    console.show_board(state.board())?;

    let (outcome, mut console) = if state.config().auto {
        let mut pilot = Autopilot { console };
        (state.play(&mut pilot)?, pilot.console)
    } else {
        let mut strategy = ConsoleStrategy::new(console);
        (state.play(&mut strategy)?, strategy.console)
    };

    log::info!("game over: {:?}", outcome);
    console.show_final_report(&state.snapshot(), outcome)?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = std::str::FromStr::from_str(&args.log_level).unwrap_or(log::LevelFilter::Warn);
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    let cfg = {
        let stdin = io::stdin();
        let mut console = Console::new(stdin.lock(), io::stdout());
        ask_counts(&mut console, &args)?
    };

    match cfg.seed {
        Some(seed) => run(cfg, RandomDice::seeded(seed)),
        None => run(cfg, RandomDice::from_entropy()),
    }
}
