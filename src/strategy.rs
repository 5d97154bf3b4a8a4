use crate::{Snapshot, TurnReport};

pub trait Strategy {
    /* An attack is specified by the (from, to) tuple referring to the territory we attack from and
     * the territory under attack.
     * Returning None ends the game.
     */
    fn attack_step(&mut self, view: &Snapshot) -> Option<(usize, usize)>;

    /// Called with the result of every turn.
    fn observe(&mut self, _view: &Snapshot, _report: &TurnReport) {}

    fn keep_playing(&mut self, _view: &Snapshot) -> bool {
        true
    }
}

/*
 * Attacks from the first territory able to attack into the weakest enemy
 * territory. Gives up once no territory can attack anyone.
 */
#[derive(Clone, Debug, Default)]
pub struct Dumb;

impl Strategy for Dumb {
    fn attack_step(&mut self, view: &Snapshot) -> Option<(usize, usize)> {
        let territories = view.board.territories();
        for (t_i, from) in territories.iter().enumerate() {
            if !from.can_attack() {
                continue;
            }
            let target = territories
                .iter()
                .enumerate()
                .filter(|(t_i2, to)| *t_i2 != t_i && to.color != from.color)
                .min_by_key(|(_, to)| to.troops)
                .map(|(t_i2, _)| t_i2);
            if let Some(t_i2) = target {
                return Some((t_i, t_i2));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Territory, Variant};

    fn view(board: &Board) -> Snapshot<'_> {
        Snapshot {
            variant: Variant::Missions,
            turn_idx: 0,
            board,
            players: &[],
        }
    }

    #[test]
    fn dumb_attacks_weakest_enemy() {
        let board = Board::from_territories(vec![
            Territory::new("A", "Ana", "Red", 1),
            Territory::new("B", "Ana", "Red", 4),
            Territory::new("C", "Bia", "Blue", 5),
            Territory::new("D", "Bia", "Blue", 2),
        ]);
        assert_eq!(Dumb.attack_step(&view(&board)), Some((1, 3)));
    }

    #[test]
    fn dumb_gives_up_without_moves() {
        let board = Board::from_territories(vec![
            Territory::new("A", "Ana", "Red", 1),
            Territory::new("B", "Bia", "Blue", 1),
        ]);
        assert_eq!(Dumb.attack_step(&view(&board)), None);

        let board = Board::from_territories(vec![
            Territory::new("A", "Ana", "Red", 9),
            Territory::new("B", "Ana", "Red", 1),
        ]);
        assert_eq!(Dumb.attack_step(&view(&board)), None);
    }
}
