use crate::mission::Mission;
use crate::text::{Color, Name};

pub const PALETTE: [&str; 6] = ["Red", "Blue", "Green", "Yellow", "Purple", "Orange"];

pub fn palette_color(player_idx: usize) -> Color {
    Color::new(PALETTE[player_idx % PALETTE.len()])
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: Name,
    pub color: Color,
    pub mission: Mission,
    pub active: bool,
    pub n_controlled: usize,
}

impl Player {
    pub fn new(name: &str, color: Color, mission: Mission) -> Self {
        Player {
            name: Name::new(name),
            color,
            mission,
            active: true,
            n_controlled: 0,
        }
    }

    /*
     * Records a fresh territory count. Returns true exactly when this count
     * eliminates a player that was still active; an eliminated player stays
     * eliminated.
     */
    pub fn set_controlled(&mut self, n_controlled: usize) -> bool {
        self.n_controlled = n_controlled;
        if self.active && n_controlled == 0 {
            self.active = false;
            return true;
        }
        false
    }

    pub fn is_eliminated(&self) -> bool {
        !self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mission::MissionKind;

    #[test]
    fn palette_cycles() {
        assert_eq!(palette_color(0), "Red");
        assert_eq!(palette_color(5), "Orange");
        assert_eq!(palette_color(6), "Red");
    }

    #[test]
    fn elimination_is_one_way() {
        let mut p = Player::new("Ana", palette_color(0), MissionKind::Emperor.into());
        assert!(!p.set_controlled(3));
        assert!(p.set_controlled(0));
        assert!(p.is_eliminated());
        assert!(!p.set_controlled(0));
        assert!(!p.set_controlled(2));
        assert!(p.is_eliminated());
    }
}
