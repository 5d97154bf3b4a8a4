//! Line-oriented console front end.
//!
//! Number prompts never fail on bad input: they print a complaint and ask
//! again. The only errors surfaced are I/O errors, including end of input.

use std::io::{self, BufRead, Write};
use std::ops::RangeInclusive;

use crate::board::{BattleResult, Board};
use crate::config::MAX_TROOPS;
use crate::player::Player;
use crate::strategy::Strategy;
use crate::{Outcome, Snapshot, TurnReport, Variant};

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{}", line)
    }

    fn prompt(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        // Raw bytes so a line that is not UTF-8 is just a bad entry.
        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        let line = String::from_utf8_lossy(&raw);
        Ok(line.trim_end_matches(|c: char| c == '\n' || c == '\r').to_string())
    }

    /// Free text; the caller's bounded fields do any truncation.
    pub fn read_text(&mut self, prompt: &str) -> io::Result<String> {
        self.prompt(prompt)
    }

    pub fn read_number(&mut self, prompt: &str, range: RangeInclusive<usize>) -> io::Result<usize> {
        loop {
            let line = self.prompt(prompt)?;
            match line.trim().parse::<usize>() {
                Ok(n) if range.contains(&n) => return Ok(n),
                Ok(_) => writeln!(
                    self.output,
                    "Out of range! Enter a number between {} and {}.",
                    range.start(),
                    range.end()
                )?,
                Err(_) => writeln!(self.output, "Invalid input! Enter a whole number.")?,
            }
        }
    }

    pub fn read_troops(&mut self, prompt: &str) -> io::Result<u32> {
        loop {
            let line = self.prompt(prompt)?;
            match line.trim().parse::<u32>() {
                Ok(n) if n <= MAX_TROOPS => return Ok(n),
                Ok(_) => writeln!(self.output, "Too many troops! The limit is {}.", MAX_TROOPS)?,
                Err(_) => writeln!(self.output, "Enter a non-negative whole number.")?,
            }
        }
    }

    /// 1-based selection on screen, 0-based index returned.
    pub fn read_index(&mut self, prompt: &str, len: usize) -> io::Result<usize> {
        Ok(self.read_number(prompt, 1..=len.max(1))? - 1)
    }

    pub fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        let line = self.prompt(prompt)?;
        Ok(matches!(
            line.trim().chars().next(),
            Some('y') | Some('Y') | Some('s') | Some('S')
        ))
    }

    pub fn show_board(&mut self, board: &Board) -> io::Result<()> {
        writeln!(self.output, "TERRITORIES:")?;
        for (i, t) in board.territories().iter().enumerate() {
            writeln!(
                self.output,
                "  [{}] {} - {} ({}) - {} troops",
                i + 1,
                t.name,
                t.owner,
                t.color,
                t.troops
            )?;
        }
        Ok(())
    }

    pub fn show_statistics(&mut self, board: &Board) -> io::Result<()> {
        let stats = board.statistics();
        writeln!(self.output, "MAP STATISTICS")?;
        writeln!(self.output, "  Territories: {}", stats.territories)?;
        writeln!(self.output, "  Total troops: {}", stats.total_troops)?;
        writeln!(self.output, "  Mean troops per territory: {:.1}", stats.mean_troops)?;
        if let Some(idx) = stats.strongest {
            let t = &board.territories()[idx];
            writeln!(
                self.output,
                "  Strongest territory: {} ({}) - {} troops",
                t.name, t.owner, t.troops
            )?;
        }
        Ok(())
    }

    pub fn show_players(&mut self, players: &[Player]) -> io::Result<()> {
        for p in players.iter().filter(|p| p.active) {
            writeln!(
                self.output,
                "  {} ({}): {} territories",
                p.name, p.color, p.n_controlled
            )?;
        }
        Ok(())
    }

    pub fn show_missions(&mut self, players: &[Player]) -> io::Result<()> {
        writeln!(self.output, "PLAYER MISSIONS")?;
        for p in players.iter().filter(|p| p.active) {
            writeln!(self.output, "  {} ({}): {}", p.name, p.color, p.mission)?;
        }
        Ok(())
    }

    pub fn show_turn(&mut self, board: &Board, players: &[Player], report: &TurnReport) -> io::Result<()> {
        let territories = board.territories();
        match &report.battle {
            Err(e) => writeln!(self.output, "Attack rejected: {}", e)?,
            Ok(outcome) => {
                let attacker = &territories[report.attacker];
                let defender = &territories[report.defender];
                writeln!(
                    self.output,
                    "Dice: {} rolled {}, {} rolled {}",
                    attacker.name, outcome.attacker_roll, defender.name, outcome.defender_roll
                )?;
                match outcome.result {
                    BattleResult::Conquered { transferred } => writeln!(
                        self.output,
                        "Attacker wins! {} conquers {} and moves in {} troops ({} keeps {}).",
                        defender.owner, defender.name, transferred, attacker.name, attacker.troops
                    )?,
                    BattleResult::Repelled { attacker_losses } => writeln!(
                        self.output,
                        "Defender wins! {} holds; {} loses {} troop(s), {} left.",
                        defender.name, attacker.name, attacker_losses, attacker.troops
                    )?,
                    BattleResult::Tie => writeln!(
                        self.output,
                        "Tie! Both sides rolled {}, nothing changes.",
                        outcome.attacker_roll
                    )?,
                }
            }
        }
        for &p_i in &report.eliminated {
            writeln!(self.output, "{} has been eliminated!", players[p_i].name)?;
        }
        if let Some(w) = report.winner {
            let p = &players[w];
            writeln!(self.output, "WE HAVE A WINNER! {} completed their mission.", p.name)?;
            writeln!(self.output, "  Mission: {}", p.mission)?;
            writeln!(self.output, "  Territories controlled: {}", p.n_controlled)?;
        }
        Ok(())
    }

    pub fn show_final_report(&mut self, view: &Snapshot, outcome: Outcome) -> io::Result<()> {
        writeln!(self.output, "FINAL REPORT")?;
        match outcome {
            Outcome::Winner(w) => writeln!(self.output, "Winner: {}", view.players[w].name)?,
            Outcome::Stalemate => writeln!(self.output, "Game over - only one player left!")?,
            Outcome::UserStopped => writeln!(self.output, "Game stopped.")?,
            Outcome::TurnLimit => writeln!(self.output, "Turn limit reached.")?,
        }
        writeln!(self.output, "Game finished after {} turns", view.turn_idx)?;
        for p in view.players {
            writeln!(
                self.output,
                "  {} ({}): {} - {} territories",
                p.name,
                p.color,
                if p.active { "ACTIVE" } else { "ELIMINATED" },
                p.n_controlled
            )?;
        }
        if view.variant == Variant::Duel {
            self.show_board(view.board)?;
            self.show_statistics(view.board)?;
        }
        Ok(())
    }
}

/// Asks a human for every attack and narrates the results.
pub struct ConsoleStrategy<R, W> {
    pub console: Console<R, W>,
}

impl<R: BufRead, W: Write> ConsoleStrategy<R, W> {
    pub fn new(console: Console<R, W>) -> Self {
        ConsoleStrategy { console }
    }

    fn choose(&mut self, view: &Snapshot) -> io::Result<(usize, usize)> {
        let c = &mut self.console;
        writeln!(c.output, "TURN {}", view.turn_idx + 1)?;
        if view.variant.has_players() {
            c.show_players(view.players)?;
        }
        c.show_board(view.board)?;
        let n = view.board.len();
        let from = c.read_index(&format!("Choose the ATTACKING territory (1-{}): ", n), n)?;
        let to = c.read_index(&format!("Choose the DEFENDING territory (1-{}): ", n), n)?;
        Ok((from, to))
    }

    fn narrate(&mut self, view: &Snapshot, report: &TurnReport) -> io::Result<()> {
        self.console.show_turn(view.board, view.players, report)?;
        if view.variant == Variant::Duel {
            self.console.show_statistics(view.board)?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> Strategy for ConsoleStrategy<R, W> {
    fn attack_step(&mut self, view: &Snapshot) -> Option<(usize, usize)> {
        match self.choose(view) {
            Ok(choice) => Some(choice),
            Err(e) => {
                log::warn!("no attack chosen: {}", e);
                None
            }
        }
    }

    fn observe(&mut self, view: &Snapshot, report: &TurnReport) {
        if let Err(e) = self.narrate(view, report) {
            log::warn!("could not print turn {}: {}", report.turn, e);
        }
    }

    fn keep_playing(&mut self, _view: &Snapshot) -> bool {
        self.console
            .confirm("Play another turn? (y/N): ")
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Territory;

    fn console(input: &str) -> Console<&[u8], Vec<u8>> {
        Console::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn numbers_are_reprompted_until_valid() {
        let mut c = console("abc\n42\n3\n");
        assert_eq!(c.read_number("n? ", 2..=6).unwrap(), 3);
        let out = String::from_utf8(c.into_output()).unwrap();
        assert!(out.contains("Invalid input"));
        assert!(out.contains("Out of range"));
        assert_eq!(out.matches("n? ").count(), 3);
    }

    #[test]
    fn lines_that_are_not_utf8_are_reprompted() {
        let mut c = Console::new(&b"\xff\xfe\n3\n"[..], Vec::new());
        assert_eq!(c.read_number("n? ", 1..=5).unwrap(), 3);
        let out = String::from_utf8(c.into_output()).unwrap();
        assert!(out.contains("Invalid input"));
        assert_eq!(out.matches("n? ").count(), 2);
    }

    #[test]
    fn text_that_is_not_utf8_is_kept_lossily() {
        let mut c = Console::new(&b"Eg\xffito\n"[..], Vec::new());
        assert_eq!(c.read_text("name? ").unwrap(), "Eg\u{FFFD}ito");
    }

    #[test]
    fn negative_troops_are_rejected() {
        let mut c = console("-4\n7\n");
        assert_eq!(c.read_troops("troops? ").unwrap(), 7);
    }

    #[test]
    fn troops_above_the_limit_are_rejected() {
        let mut c = console("4294967295\n5000000000\n1000001\n1000000\n");
        assert_eq!(c.read_troops("troops? ").unwrap(), MAX_TROOPS);
        let out = String::from_utf8(c.into_output()).unwrap();
        assert_eq!(out.matches("Too many troops").count(), 2);
        assert_eq!(out.matches("non-negative").count(), 1);
    }

    #[test]
    fn index_is_zero_based() {
        let mut c = console("0\n2\n");
        assert_eq!(c.read_index("which? ", 3).unwrap(), 1);
    }

    #[test]
    fn end_of_input_is_an_error() {
        let mut c = console("");
        let err = c.read_number("n? ", 1..=2).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn confirm_accepts_yes_and_sim() {
        let mut c = console("y\nS\nn\n\n");
        assert!(c.confirm("? ").unwrap());
        assert!(c.confirm("? ").unwrap());
        assert!(!c.confirm("? ").unwrap());
        assert!(!c.confirm("? ").unwrap());
    }

    #[test]
    fn board_listing_is_one_based() {
        let board = Board::from_territories(vec![Territory::new("Egito", "Ana", "Red", 4)]);
        let mut c = console("");
        c.show_board(&board).unwrap();
        let out = String::from_utf8(c.into_output()).unwrap();
        assert!(out.contains("[1] Egito - Ana (Red) - 4 troops"));
    }

    #[test]
    fn console_strategy_stops_on_closed_input() {
        let board = Board::from_territories(vec![
            Territory::new("A", "Ana", "Red", 4),
            Territory::new("B", "Bia", "Blue", 4),
        ]);
        let view = Snapshot {
            variant: Variant::Missions,
            turn_idx: 0,
            board: &board,
            players: &[],
        };
        let mut s = ConsoleStrategy::new(console("1\n2\n"));
        assert_eq!(s.attack_step(&view), Some((0, 1)));
        assert_eq!(s.attack_step(&view), None);
        assert!(!s.keep_playing(&view));
    }
}
