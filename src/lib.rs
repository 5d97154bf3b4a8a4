pub mod board;
pub mod config;
pub mod console;
pub mod dice;
pub mod error;
pub mod mission;
pub mod player;
pub mod strategy;
pub mod text;

#[cfg(feature = "python")]
mod python;

pub use board::{resolve_combat, BattleResult, Board, CombatOutcome, MapStatistics, Territory};
pub use config::{GameConfig, Variant};
pub use dice::{Dice, LoadedDice, RandomDice};
pub use error::{GameError, GameResult};
pub use mission::{evaluate_mission, evaluate_mission_text, Mission, MissionKind, CATALOG};
pub use player::{Player, PALETTE};
pub use strategy::Strategy;

use crate::text::Color;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Index of the player whose mission was satisfied first.
    Winner(usize),
    /// At most one player is still on the map.
    Stalemate,
    UserStopped,
    TurnLimit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Setup,
    TerritoryAssignment,
    Battle,
    GameOver(Outcome),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    pub turn: usize,
    pub attacker: usize,
    pub defender: usize,
    pub battle: GameResult<CombatOutcome>,
    /// Players knocked out by this turn's battle.
    pub eliminated: Vec<usize>,
    pub winner: Option<usize>,
}

/// Read-only view of the game handed to strategies.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub variant: Variant,
    pub turn_idx: usize,
    pub board: &'a Board,
    pub players: &'a [Player],
}

#[derive(Debug)]
pub struct GameState<D: Dice> {
    config: GameConfig,
    board: Board,
    players: Vec<Player>,
    dice: D,

    pub turn_idx: usize,
    pub phase: Phase,
}

impl<D: Dice> GameState<D> {
    pub fn new(config: GameConfig, dice: D) -> GameResult<Self> {
        let config = config.normalized();
        let board = Board::with_capacity(config.territories)?;
        let mut players = Vec::new();
        players
            .try_reserve_exact(config.players)
            .map_err(|_| GameError::AllocationFailure {
                what: "players",
                count: config.players,
            })?;
        log::info!(
            "{:?} game: {} territories, {} players",
            config.variant,
            config.territories,
            config.players
        );
        Ok(GameState {
            config,
            board,
            players,
            dice,
            turn_idx: 0,
            phase: Phase::Setup,
        })
    }

    /// Sets up a game with numbered players and territories, ready for battle.
    pub fn with_generated_names(config: GameConfig, dice: D) -> GameResult<Self> {
        let mut state = Self::new(config, dice)?;
        for i in 0..state.config.players {
            state.register_player(&format!("Player {}", i + 1))?;
        }
        for i in 0..state.config.territories {
            let name = format!("Territory {}", i + 1);
            match state.config.variant {
                Variant::Missions => state.register_territory(&name)?,
                Variant::Duel => {
                    let color = player::palette_color(i);
                    let owner = format!("Commander {}", i + 1);
                    let troops = config::STARTING_TROOPS.start()
                        + state.dice.pick(starting_troop_choices()) as u32;
                    state.register_full_territory(&name, &owner, color.as_str(), troops)?
                }
            };
        }
        state.assign_territories()?;
        Ok(state)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn variant(&self) -> Variant {
        self.config.variant
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, idx: usize) -> GameResult<&Player> {
        self.players.get(idx).ok_or(GameError::UnknownPlayer {
            index: idx,
            len: self.players.len(),
        })
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::GameOver(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            variant: self.config.variant,
            turn_idx: self.turn_idx,
            board: &self.board,
            players: &self.players,
        }
    }

    pub fn active_players(&self) -> impl Iterator<Item = usize> + '_ {
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.active)
            .map(|(i, _)| i)
    }

    fn expect_phase(&self, expected: Phase) -> GameResult<()> {
        if self.phase != expected {
            return Err(GameError::WrongPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    pub fn register_player(&mut self, name: &str) -> GameResult<usize> {
        self.expect_phase(Phase::Setup)?;
        if self.players.len() >= self.config.players {
            return Err(GameError::RegistryFull {
                what: "player",
                capacity: self.config.players,
            });
        }
        let idx = self.players.len();
        let mission = Mission::from_catalog(self.dice.pick(CATALOG.len()));
        let player = Player::new(name, player::palette_color(idx), mission);
        log::info!(
            "registered {} as {} with mission {:?}",
            player.name,
            player.color,
            player.mission.kind
        );
        self.players.push(player);
        Ok(idx)
    }

    /// Registers a territory by name only; owner and troops are dealt out by
    /// `assign_territories`.
    pub fn register_territory(&mut self, name: &str) -> GameResult<usize> {
        self.expect_phase(Phase::Setup)?;
        self.board.push(Territory::new(name, "", "", 0))
    }

    pub fn register_full_territory(
        &mut self,
        name: &str,
        owner: &str,
        color: &str,
        troops: u32,
    ) -> GameResult<usize> {
        self.expect_phase(Phase::Setup)?;
        let territory = Territory {
            name: text::Name::new(name),
            owner: text::Name::new(owner),
            color: Color::capitalized(color),
            troops,
        };
        self.board.push(territory)
    }

    /*
     * Missions: deals territories round-robin to the registered players with a
     * random starting garrison. Duel territories already carry their owners,
     * so this only opens the battle phase.
     */
    pub fn assign_territories(&mut self) -> GameResult<()> {
        self.expect_phase(Phase::Setup)?;
        if self.variant().has_players() {
            if self.players.is_empty() {
                return Err(GameError::UnknownPlayer { index: 0, len: 0 });
            }
            self.phase = Phase::TerritoryAssignment;
            let n_players = self.players.len();
            for t_i in 0..self.board.len() {
                let owner = &self.players[t_i % n_players];
                let troops = config::STARTING_TROOPS.start()
                    + self.dice.pick(starting_troop_choices()) as u32;
                let (name, color) = (owner.name.clone(), owner.color.clone());
                let t = self.board.get_mut(t_i)?;
                t.owner = name;
                t.color = color;
                t.troops = troops;
                log::info!("{} -> {} ({}) with {} troops", t.name, t.owner, t.color, troops);
            }
            self.update_player_stats();
        }
        self.begin_battle_phase();
        Ok(())
    }

    fn begin_battle_phase(&mut self) {
        self.phase = Phase::Battle;
        self.turn_idx = 0;
    }

    /// Recounts every player's territories by color. Returns the players this
    /// recount eliminated.
    pub fn update_player_stats(&mut self) -> Vec<usize> {
        let board = &self.board;
        let mut eliminated = Vec::new();
        for (p_i, player) in self.players.iter_mut().enumerate() {
            let n = board.owned_by(player.color.as_str()).count();
            if player.set_controlled(n) {
                log::info!("{} has been eliminated", player.name);
                eliminated.push(p_i);
            }
        }
        eliminated
    }

    /// First active player, in registration order, whose mission is met.
    pub fn check_winner(&self) -> Option<usize> {
        let territories = self.board.territories();
        self.players.iter().position(|p| {
            p.active && evaluate_mission(p.mission.kind, territories, p.color.as_str())
        })
    }

    /// One battle, followed by the statistics update and the win check.
    pub fn play_turn(&mut self, attacker: usize, defender: usize) -> GameResult<TurnReport> {
        self.expect_phase(Phase::Battle)?;
        self.turn_idx += 1;

        let variant = self.variant();
        let battle = self
            .board
            .attack(attacker, defender, &mut self.dice, variant);
        match &battle {
            Ok(outcome) => log::debug!(
                "turn {}: {} -> {} rolled {} vs {}: {:?}",
                self.turn_idx,
                attacker,
                defender,
                outcome.attacker_roll,
                outcome.defender_roll,
                outcome.result
            ),
            Err(e) => log::info!("turn {}: attack skipped: {}", self.turn_idx, e),
        }

        let mut report = TurnReport {
            turn: self.turn_idx,
            attacker,
            defender,
            battle,
            eliminated: Vec::new(),
            winner: None,
        };

        if self.variant().has_players() {
            debug_assert!(self.board.verify_owners(&self.player_colors()));
            report.eliminated = self.update_player_stats();
            report.winner = self.check_winner();
            if let Some(winner) = report.winner {
                log::info!("{} completed their mission", self.players[winner].name);
                self.phase = Phase::GameOver(Outcome::Winner(winner));
            } else if self.active_players().count() <= 1 {
                log::info!("only one player remains");
                self.phase = Phase::GameOver(Outcome::Stalemate);
            }
        }

        if self.phase == Phase::Battle {
            if let Some(max_turns) = self.config.max_turns {
                if self.turn_idx >= max_turns {
                    log::info!("turn limit of {} reached", max_turns);
                    self.phase = Phase::GameOver(Outcome::TurnLimit);
                }
            }
        }
        Ok(report)
    }

    /// The caller declines to play another turn.
    pub fn stop(&mut self) {
        if self.phase == Phase::Battle {
            self.phase = Phase::GameOver(Outcome::UserStopped);
        }
    }

    pub fn play(&mut self, strategy: &mut dyn Strategy) -> GameResult<Outcome> {
        self.expect_phase(Phase::Battle)?;
        while self.phase == Phase::Battle {
            let Some((from, to)) = strategy.attack_step(&self.snapshot()) else {
                self.stop();
                break;
            };
            let report = self.play_turn(from, to)?;
            strategy.observe(&self.snapshot(), &report);
            if self.phase == Phase::Battle && !strategy.keep_playing(&self.snapshot()) {
                self.stop();
            }
        }
        Ok(self.outcome().unwrap_or(Outcome::UserStopped))
    }

    pub fn player_colors(&self) -> Vec<Color> {
        self.players.iter().map(|p| p.color.clone()).collect()
    }
}

fn starting_troop_choices() -> usize {
    (config::STARTING_TROOPS.end() - config::STARTING_TROOPS.start() + 1) as usize
}
