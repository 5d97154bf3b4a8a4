use ndarray::Array1;

use crate::config::Variant;
use crate::dice::Dice;
use crate::error::{GameError, GameResult};
use crate::text::{Color, Name};

pub const MIN_ATTACKING_TROOPS: u32 = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Territory {
    pub name: Name,
    pub owner: Name,
    pub color: Color,
    pub troops: u32,
}

impl Territory {
    pub fn new(name: &str, owner: &str, color: &str, troops: u32) -> Self {
        Territory {
            name: Name::new(name),
            owner: Name::new(owner),
            color: Color::new(color),
            troops,
        }
    }

    pub fn can_attack(&self) -> bool {
        self.troops >= MIN_ATTACKING_TROOPS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleResult {
    /// The defender changed hands; `transferred` troops moved into it.
    Conquered { transferred: u32 },
    /// The defender held. The attacker lost `attacker_losses` troops (0 when
    /// already at the floor of one troop).
    Repelled { attacker_losses: u32 },
    Tie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatOutcome {
    pub attacker_roll: u32,
    pub defender_roll: u32,
    pub result: BattleResult,
}

impl CombatOutcome {
    pub fn conquered(&self) -> bool {
        matches!(self.result, BattleResult::Conquered { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapStatistics {
    pub territories: usize,
    pub total_troops: u64,
    pub mean_troops: f64,
    /// First territory holding the largest (non-zero) troop count.
    pub strongest: Option<usize>,
}

/// Checks the attack preconditions without touching either record.
pub fn check_attack(attacker: &Territory, defender: &Territory, variant: Variant) -> GameResult<()> {
    if variant.forbids_friendly_fire() && attacker.color == defender.color {
        return Err(GameError::FriendlyFireRejected {
            attacker: attacker.name.to_string(),
            defender: defender.name.to_string(),
            color: attacker.color.to_string(),
        });
    }
    if !attacker.can_attack() {
        return Err(GameError::InsufficientTroops {
            territory: attacker.name.to_string(),
            troops: attacker.troops,
        });
    }
    Ok(())
}

/// Resolves one round of combat between two territories, mutating both in
/// place. Returns an error, leaving both records untouched, when the attack is
/// not allowed.
pub fn resolve_combat<D: Dice + ?Sized>(
    attacker: &mut Territory,
    defender: &mut Territory,
    dice: &mut D,
    variant: Variant,
) -> GameResult<CombatOutcome> {
    check_attack(attacker, defender, variant)?;

    let attacker_roll = dice.roll();
    let defender_roll = dice.roll();

    let result = if attacker_roll > defender_roll {
        let transferred = match variant {
            Variant::Duel => attacker.troops - 1,
            Variant::Missions => std::cmp::max(1, attacker.troops / 2),
        };
        defender.owner = attacker.owner.clone();
        defender.color = attacker.color.clone();
        defender.troops = transferred;
        attacker.troops -= transferred;
        BattleResult::Conquered { transferred }
    } else if defender_roll > attacker_roll {
        let attacker_losses = if attacker.troops > 1 { 1 } else { 0 };
        attacker.troops -= attacker_losses;
        BattleResult::Repelled { attacker_losses }
    } else {
        BattleResult::Tie
    };

    Ok(CombatOutcome {
        attacker_roll,
        defender_roll,
        result,
    })
}

#[derive(Debug, Clone, Default)]
pub struct Board {
    territories: Vec<Territory>,
    capacity: usize,
}

impl Board {
    pub fn with_capacity(capacity: usize) -> GameResult<Board> {
        let mut territories = Vec::new();
        territories
            .try_reserve_exact(capacity)
            .map_err(|_| GameError::AllocationFailure {
                what: "territories",
                count: capacity,
            })?;
        Ok(Board {
            territories,
            capacity,
        })
    }

    pub fn from_territories(territories: Vec<Territory>) -> Board {
        let capacity = territories.len();
        Board {
            territories,
            capacity,
        }
    }

    pub fn push(&mut self, territory: Territory) -> GameResult<usize> {
        if self.territories.len() >= self.capacity {
            return Err(GameError::RegistryFull {
                what: "territory",
                capacity: self.capacity,
            });
        }
        self.territories.push(territory);
        Ok(self.territories.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.territories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.territories.len() == self.capacity
    }

    pub fn territories(&self) -> &[Territory] {
        &self.territories
    }

    pub fn get(&self, idx: usize) -> GameResult<&Territory> {
        self.territories.get(idx).ok_or(GameError::UnknownTerritory {
            index: idx,
            len: self.territories.len(),
        })
    }

    pub fn get_mut(&mut self, idx: usize) -> GameResult<&mut Territory> {
        let len = self.territories.len();
        self.territories
            .get_mut(idx)
            .ok_or(GameError::UnknownTerritory { index: idx, len })
    }

    pub fn is_valid_attack(&self, from: usize, to: usize, variant: Variant) -> GameResult<()> {
        let attacker = self.get(from)?;
        let defender = self.get(to)?;
        if from == to {
            return Err(GameError::SelfAttack { index: from });
        }
        check_attack(attacker, defender, variant)
    }

    pub fn attack<D: Dice + ?Sized>(
        &mut self,
        from: usize,
        to: usize,
        dice: &mut D,
        variant: Variant,
    ) -> GameResult<CombatOutcome> {
        self.is_valid_attack(from, to, variant)?;
        let (attacker, defender) = self.pair_mut(from, to);
        resolve_combat(attacker, defender, dice, variant)
    }

    /* Two distinct mutable records. Callers guarantee from != to and both in range. */
    fn pair_mut(&mut self, from: usize, to: usize) -> (&mut Territory, &mut Territory) {
        if from < to {
            let (left, right) = self.territories.split_at_mut(to);
            (&mut left[from], &mut right[0])
        } else {
            let (left, right) = self.territories.split_at_mut(from);
            (&mut right[0], &mut left[to])
        }
    }

    pub fn owned_by<'a>(&'a self, color: &'a str) -> impl Iterator<Item = &'a Territory> + 'a {
        self.territories.iter().filter(move |t| t.color == color)
    }

    pub fn statistics(&self) -> MapStatistics {
        let total_troops: u64 = self.territories.iter().map(|t| u64::from(t.troops)).sum();
        let mean_troops = if self.territories.is_empty() {
            0.0
        } else {
            total_troops as f64 / self.territories.len() as f64
        };
        let mut strongest = None;
        let mut max_troops = 0;
        for (i, t) in self.territories.iter().enumerate() {
            if t.troops > max_troops {
                max_troops = t.troops;
                strongest = Some(i);
            }
        }
        MapStatistics {
            territories: self.territories.len(),
            total_troops,
            mean_troops,
            strongest,
        }
    }

    /// Every territory is held by exactly one of `colors`.
    pub fn verify_owners(&self, colors: &[Color]) -> bool {
        self.territories
            .iter()
            .all(|t| colors.iter().filter(|c| **c == t.color).count() == 1)
    }

    pub fn to_array(&self, colors: &[Color]) -> Array1<f32> {
        let dof_per_territory = 1 + colors.len();
        let mut out = Array1::zeros(self.territories.len() * dof_per_territory);

        for (i, t) in self.territories.iter().enumerate() {
            out[dof_per_territory * i] = t.troops as f32;
            // one hot encode owner
            for (j, c) in colors.iter().enumerate() {
                out[dof_per_territory * i + 1 + j] = (t.color == *c) as i32 as f32;
            }
        }
        out
    }
}
