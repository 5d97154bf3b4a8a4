//! Property-based tests for combat and turn bookkeeping.

use proptest::prelude::*;

use territory_war::strategy::{Dumb, Strategy as _};
use territory_war::{
    resolve_combat, BattleResult, GameConfig, GameError, GameState, LoadedDice, Phase,
    RandomDice, Territory, Variant,
};

fn any_variant() -> impl Strategy<Value = Variant> {
    prop_oneof![Just(Variant::Duel), Just(Variant::Missions)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// A battle never leaves a territory empty and never creates troops.
    #[test]
    fn prop_combat_conserves_troops(
        a_troops in 2u32..500,
        d_troops in 0u32..500,
        a_roll in 1u32..=6,
        d_roll in 1u32..=6,
        variant in any_variant(),
    ) {
        let mut a = Territory::new("A", "Ana", "Red", a_troops);
        let mut d = Territory::new("D", "Bia", "Blue", d_troops);
        let mut dice = LoadedDice::new(&[a_roll, d_roll]);
        let outcome = resolve_combat(&mut a, &mut d, &mut dice, variant).unwrap();

        prop_assert!(a.troops >= 1);
        match outcome.result {
            BattleResult::Conquered { transferred } => {
                prop_assert!(a_roll > d_roll);
                prop_assert!(transferred >= 1);
                prop_assert!(a.troops + d.troops <= a_troops);
                prop_assert_eq!(d.troops, transferred);
                prop_assert_eq!(d.color.as_str(), "Red");
            }
            BattleResult::Repelled { attacker_losses } => {
                prop_assert!(d_roll > a_roll);
                prop_assert_eq!(a.troops, a_troops - attacker_losses);
                prop_assert_eq!(d.troops, d_troops);
            }
            BattleResult::Tie => {
                prop_assert_eq!(a_roll, d_roll);
                prop_assert_eq!((a.troops, d.troops), (a_troops, d_troops));
                prop_assert_eq!(d.color.as_str(), "Blue");
            }
        }
    }

    /// Attacking your own color is refused without touching anything.
    #[test]
    fn prop_friendly_fire_is_rejected(
        a_troops in 0u32..100,
        d_troops in 0u32..100,
        a_roll in 1u32..=6,
        d_roll in 1u32..=6,
    ) {
        let mut a = Territory::new("A", "Ana", "Red", a_troops);
        let mut d = Territory::new("D", "Ana", "Red", d_troops);
        let (a0, d0) = (a.clone(), d.clone());
        let mut dice = LoadedDice::new(&[a_roll, d_roll]);
        let err = resolve_combat(&mut a, &mut d, &mut dice, Variant::Missions).unwrap_err();
        let is_friendly_fire = matches!(err, GameError::FriendlyFireRejected { .. });
        prop_assert!(is_friendly_fire);
        prop_assert_eq!(a, a0);
        prop_assert_eq!(d, d0);
    }

    /// Eliminated players stay eliminated for the rest of the game, and no
    /// territory is ever emptied along the way.
    #[test]
    fn prop_elimination_is_permanent(
        seed in any::<u64>(),
        players in 2usize..=6,
        territories in 5usize..=20,
    ) {
        let config = GameConfig::new(Variant::Missions, players, territories);
        let mut game = GameState::with_generated_names(config, RandomDice::seeded(seed)).unwrap();
        let mut out = vec![false; game.players().len()];
        for _ in 0..300 {
            if game.phase != Phase::Battle {
                break;
            }
            let Some((from, to)) = Dumb.attack_step(&game.snapshot()) else {
                break;
            };
            let report = game.play_turn(from, to).unwrap();
            for &p_i in &report.eliminated {
                prop_assert!(!out[p_i]);
                out[p_i] = true;
            }
            for (p_i, p) in game.players().iter().enumerate() {
                prop_assert_eq!(p.active, !out[p_i]);
                prop_assert_eq!(p.active, p.n_controlled > 0);
            }
            let total: usize = game.players().iter().map(|p| p.n_controlled).sum();
            prop_assert_eq!(total, game.board().len());
            for t in game.board().territories() {
                prop_assert!(t.troops >= 1);
            }
        }
    }
}
