//! Mission catalog and win-condition checks.
//!
//! Three missions (`TotalDomination`, `Liberator`, `Fortress`) need history the
//! game does not track (eliminations by whom, consecutive defenses), so they
//! never evaluate as satisfied.

use std::fmt;

use crate::board::Territory;

/// Troop count a territory must exceed to count as a stronghold.
pub const STRONGHOLD_TROOPS: u32 = 5;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MissionKind {
    Conqueror,
    TotalDomination,
    Strategist,
    Expansionist,
    SupremeGeneral,
    Liberator,
    Fortress,
    Emperor,
}

pub const CATALOG: [(MissionKind, &str); 8] = [
    (
        MissionKind::Conqueror,
        "CONQUISTADOR: Control at least 5 territories at the same time",
    ),
    (
        MissionKind::TotalDomination,
        "DOMINAÇÃO TOTAL: Eliminate 1 player completely (capture all of their territories)",
    ),
    (
        MissionKind::Strategist,
        "ESTRATEGISTA: Hold 3 territories with more than 5 troops each for 2 turns",
    ),
    (
        MissionKind::Expansionist,
        "EXPANSIONISTA: Conquer 4 territories in a row without losing any",
    ),
    (
        MissionKind::SupremeGeneral,
        "GENERAL SUPREMO: Amass more than 30 troops across your territories",
    ),
    (
        MissionKind::Liberator,
        "LIBERTADOR: Conquer territories from at least 3 different players",
    ),
    (
        MissionKind::Fortress,
        "FORTALEZA: Repel 5 consecutive attacks without losing a territory",
    ),
    (
        MissionKind::Emperor,
        "IMPERADOR: Control more than half of all territories on the map",
    ),
];

impl MissionKind {
    pub fn keyword(self) -> &'static str {
        match self {
            MissionKind::Conqueror => "CONQUISTADOR",
            MissionKind::TotalDomination => "DOMINAÇÃO TOTAL",
            MissionKind::Strategist => "ESTRATEGISTA",
            MissionKind::Expansionist => "EXPANSIONISTA",
            MissionKind::SupremeGeneral => "GENERAL SUPREMO",
            MissionKind::Liberator => "LIBERTADOR",
            MissionKind::Fortress => "FORTALEZA",
            MissionKind::Emperor => "IMPERADOR",
        }
    }

    pub fn text(self) -> &'static str {
        CATALOG
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, text)| *text)
            .unwrap_or("")
    }

    /*
     * Recovers an evaluable mission from free text. Only missions with a
     * predicate are recognized, probed in a fixed order, so text mentioning
     * several keywords resolves to the first of them.
     */
    pub fn from_text(text: &str) -> Option<MissionKind> {
        [
            MissionKind::Conqueror,
            MissionKind::SupremeGeneral,
            MissionKind::Strategist,
            MissionKind::Emperor,
            MissionKind::Expansionist,
        ]
        .iter()
        .copied()
        .find(|kind| text.contains(kind.keyword()))
    }

    pub fn has_predicate(self) -> bool {
        !matches!(
            self,
            MissionKind::TotalDomination | MissionKind::Liberator | MissionKind::Fortress
        )
    }
}

/// A player's private copy of a catalog entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mission {
    pub kind: MissionKind,
    pub text: String,
}

impl Mission {
    pub fn from_catalog(idx: usize) -> Mission {
        let (kind, text) = CATALOG[idx % CATALOG.len()];
        Mission {
            kind,
            text: text.to_string(),
        }
    }
}

impl From<MissionKind> for Mission {
    fn from(kind: MissionKind) -> Self {
        Mission {
            kind,
            text: kind.text().to_string(),
        }
    }
}

impl fmt::Display for Mission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// What one color holds on the map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSummary {
    pub controlled: usize,
    pub total_troops: u32,
    pub strongholds: usize,
    pub map_size: usize,
}

impl ControlSummary {
    pub fn scan(territories: &[Territory], color: &str) -> ControlSummary {
        let mut summary = ControlSummary {
            map_size: territories.len(),
            ..Default::default()
        };
        for t in territories.iter().filter(|t| t.color == color) {
            summary.controlled += 1;
            summary.total_troops = summary.total_troops.saturating_add(t.troops);
            if t.troops > STRONGHOLD_TROOPS {
                summary.strongholds += 1;
            }
        }
        summary
    }
}

pub fn evaluate_mission(kind: MissionKind, territories: &[Territory], color: &str) -> bool {
    if territories.is_empty() {
        return false;
    }
    let s = ControlSummary::scan(territories, color);
    match kind {
        MissionKind::Conqueror => s.controlled >= 5,
        MissionKind::SupremeGeneral => s.total_troops > 30,
        MissionKind::Strategist => s.strongholds >= 3,
        MissionKind::Emperor => s.controlled > s.map_size / 2,
        MissionKind::Expansionist => s.controlled >= 4,
        MissionKind::TotalDomination | MissionKind::Liberator | MissionKind::Fortress => false,
    }
}

pub fn evaluate_mission_text(text: &str, territories: &[Territory], color: &str) -> bool {
    match MissionKind::from_text(text) {
        Some(kind) => evaluate_mission(kind, territories, color),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(owned: &[u32], others: usize) -> Vec<Territory> {
        let mut out: Vec<Territory> = owned
            .iter()
            .enumerate()
            .map(|(i, &troops)| Territory::new(&format!("R{}", i), "Ana", "Red", troops))
            .collect();
        out.extend((0..others).map(|i| Territory::new(&format!("B{}", i), "Bia", "Blue", 3)));
        out
    }

    #[test]
    fn conqueror_needs_five() {
        assert!(evaluate_mission(MissionKind::Conqueror, &map(&[2; 5], 2), "Red"));
        assert!(!evaluate_mission(MissionKind::Conqueror, &map(&[2; 4], 3), "Red"));
    }

    #[test]
    fn supreme_general_needs_more_than_thirty() {
        assert!(!evaluate_mission(MissionKind::SupremeGeneral, &map(&[10, 10, 10], 1), "Red"));
        assert!(evaluate_mission(MissionKind::SupremeGeneral, &map(&[10, 10, 11], 1), "Red"));
        assert!(evaluate_mission(MissionKind::SupremeGeneral, &map(&[u32::MAX, u32::MAX], 0), "Red"));
    }

    #[test]
    fn strategist_counts_territories_above_five() {
        assert!(!evaluate_mission(MissionKind::Strategist, &map(&[6, 6, 5], 1), "Red"));
        assert!(evaluate_mission(MissionKind::Strategist, &map(&[6, 6, 9], 1), "Red"));
    }

    #[test]
    fn emperor_needs_strict_majority() {
        assert!(!evaluate_mission(MissionKind::Emperor, &map(&[2, 2], 3), "Red"));
        assert!(evaluate_mission(MissionKind::Emperor, &map(&[2, 2, 2], 2), "Red"));
        assert!(!evaluate_mission(MissionKind::Emperor, &map(&[2, 2], 2), "Red"));
    }

    #[test]
    fn expansionist_needs_four() {
        assert!(evaluate_mission(MissionKind::Expansionist, &map(&[1; 4], 0), "Red"));
        assert!(!evaluate_mission(MissionKind::Expansionist, &map(&[1; 3], 0), "Red"));
    }

    #[test]
    fn unimplemented_missions_never_pass() {
        let everything = map(&[20; 10], 0);
        for kind in [
            MissionKind::TotalDomination,
            MissionKind::Liberator,
            MissionKind::Fortress,
        ] {
            assert!(!kind.has_predicate());
            assert!(!evaluate_mission(kind, &everything, "Red"));
            assert!(!evaluate_mission_text(kind.text(), &everything, "Red"));
        }
    }

    #[test]
    fn text_dispatch_matches_keywords() {
        let five = map(&[2; 5], 1);
        assert!(evaluate_mission_text(
            "CONQUISTADOR: Control at least 5 territories at the same time",
            &five,
            "Red"
        ));
        assert!(!evaluate_mission_text("no keyword here", &five, "Red"));
        assert_eq!(
            MissionKind::from_text("GENERAL SUPREMO and IMPERADOR"),
            Some(MissionKind::SupremeGeneral)
        );
    }

    #[test]
    fn catalog_copies_are_owned() {
        let mission = Mission::from_catalog(7);
        assert_eq!(mission.kind, MissionKind::Emperor);
        assert!(mission.text.starts_with("IMPERADOR"));
        assert_eq!(Mission::from_catalog(8).kind, MissionKind::Conqueror);
        for (kind, text) in CATALOG.iter() {
            assert!(text.starts_with(kind.keyword()));
        }
    }

    #[test]
    fn empty_map_satisfies_nothing() {
        assert!(!evaluate_mission(MissionKind::Emperor, &[], "Red"));
    }
}
