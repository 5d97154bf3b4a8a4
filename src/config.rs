use std::ops::RangeInclusive;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 6;
pub const MIN_TERRITORIES: usize = 5;
pub const MIN_DUEL_TERRITORIES: usize = 2;
pub const MAX_TERRITORIES: usize = 20;
pub const STARTING_TROOPS: RangeInclusive<u32> = 2..=6;
/// Largest garrison accepted when a territory is typed in by hand.
pub const MAX_TROOPS: u32 = 1_000_000;

#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Variant {
    /// Free battles between registered territories, no players or missions.
    Duel,
    /// Players with colors and secret missions fight over a shared map.
    Missions,
}

impl Variant {
    pub fn forbids_friendly_fire(self) -> bool {
        self == Variant::Missions
    }

    pub fn has_players(self) -> bool {
        self == Variant::Missions
    }

    pub fn territory_range(self) -> RangeInclusive<usize> {
        match self {
            Variant::Duel => MIN_DUEL_TERRITORIES..=MAX_TERRITORIES,
            Variant::Missions => MIN_TERRITORIES..=MAX_TERRITORIES,
        }
    }

    pub fn player_range(self) -> RangeInclusive<usize> {
        match self {
            Variant::Duel => 0..=0,
            Variant::Missions => MIN_PLAYERS..=MAX_PLAYERS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub variant: Variant,
    pub players: usize,
    pub territories: usize,
    pub seed: Option<u64>,
    pub max_turns: Option<usize>,
    pub auto: bool,
}

impl GameConfig {
    pub fn new(variant: Variant, players: usize, territories: usize) -> Self {
        GameConfig {
            variant,
            players,
            territories,
            seed: None,
            max_turns: None,
            auto: false,
        }
    }

    /*
     * Clamps counts into the variant's bounds and makes sure every player can
     * start with at least one territory.
     */
    pub fn normalized(mut self) -> Self {
        let players = self.variant.player_range();
        let territories = self.variant.territory_range();
        self.players = self.players.clamp(*players.start(), *players.end());
        self.territories = self
            .territories
            .clamp(*territories.start(), *territories.end());
        if self.variant.has_players() && self.territories < self.players {
            let adjusted = self.players + 2;
            log::warn!(
                "{} territories cannot hold {} players, using {}",
                self.territories,
                self.players,
                adjusted
            );
            self.territories = adjusted;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_clamped_to_variant_bounds() {
        let cfg = GameConfig::new(Variant::Missions, 9, 1).normalized();
        assert_eq!(cfg.players, MAX_PLAYERS);
        assert_eq!(cfg.territories, MAX_PLAYERS + 2);

        let cfg = GameConfig::new(Variant::Missions, 3, 40).normalized();
        assert_eq!((cfg.players, cfg.territories), (3, MAX_TERRITORIES));
    }

    #[test]
    fn duel_has_no_players() {
        let cfg = GameConfig::new(Variant::Duel, 4, 2).normalized();
        assert_eq!(cfg.players, 0);
        assert_eq!(cfg.territories, 2);
        assert!(!Variant::Duel.forbids_friendly_fire());
    }
}
