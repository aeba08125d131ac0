//! Declarative level table
//!
//! A level is an ordered list of phases. Each phase names its mechanics and
//! how it ends; the tick loop advances through the list and never needs
//! per-level code.

use serde::{Deserialize, Serialize};

/// Minigame mechanics of a phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseKind {
    /// Jump on crates to open them and catch the carrots inside
    Carrot,
    /// Throw balls into a wiggling cup
    Shot,
    /// Walk and jump over floor cells to colour them in
    Colouring,
    /// Catch falling coins, avoid the coal
    Donation,
    /// Jump over obstacles rolling down the hallway
    Dodge,
}

impl PhaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseKind::Carrot => "carrot",
            PhaseKind::Shot => "shot",
            PhaseKind::Colouring => "colouring",
            PhaseKind::Donation => "donation",
            PhaseKind::Dodge => "dodge",
        }
    }
}

/// When a phase hands over to the next one
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhaseEnd {
    /// After this many seconds in the phase
    After(f32),
    /// When the phase reports its goal as met
    Goal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseDesc {
    pub kind: PhaseKind,
    pub end: PhaseEnd,
    /// Whether the jump input does anything
    pub allows_jump: bool,
    /// One-line instruction shown above the playfield
    pub banner: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelDesc {
    pub number: u8,
    pub name: &'static str,
    pub phases: &'static [PhaseDesc],
    /// Awarded once when the last phase ends
    pub completion_bonus: u64,
}

pub static LEVELS: &[LevelDesc] = &[
    LevelDesc {
        number: 1,
        name: "Hallway Hustle",
        phases: &[
            PhaseDesc {
                kind: PhaseKind::Carrot,
                end: PhaseEnd::After(40.0),
                allows_jump: true,
                banner: "Carrot in a Box - land on crates to open them!",
            },
            PhaseDesc {
                kind: PhaseKind::Shot,
                end: PhaseEnd::After(30.0),
                allows_jump: false,
                banner: "The Impossible Shot - sink it in the cup!",
            },
            PhaseDesc {
                kind: PhaseKind::Colouring,
                end: PhaseEnd::Goal,
                allows_jump: true,
                banner: "Christmas Colouring - fill squares by walking over them!",
            },
        ],
        completion_bonus: 500,
    },
    LevelDesc {
        number: 2,
        name: "Giving Season",
        phases: &[
            PhaseDesc {
                kind: PhaseKind::Donation,
                end: PhaseEnd::Goal,
                allows_jump: true,
                banner: "Donation Drive - catch the coins, skip the coal!",
            },
            PhaseDesc {
                kind: PhaseKind::Dodge,
                end: PhaseEnd::After(35.0),
                allows_jump: true,
                banner: "Hallway Rush - jump the snowballs and carts!",
            },
        ],
        completion_bonus: 750,
    },
];

/// Level by table index; out-of-range indices clamp to the last level
pub fn level(index: usize) -> &'static LevelDesc {
    &LEVELS[index.min(LEVELS.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_numbers_are_sequential() {
        for (i, level) in LEVELS.iter().enumerate() {
            assert_eq!(level.number as usize, i + 1);
            assert!(!level.phases.is_empty());
        }
    }

    #[test]
    fn test_every_level_can_end() {
        // A level ends when its last phase ends; both end kinds are finite
        for level in LEVELS {
            for phase in level.phases {
                if let PhaseEnd::After(secs) = phase.end {
                    assert!(secs > 0.0);
                }
            }
        }
    }

    #[test]
    fn test_first_level_phase_order() {
        let kinds: Vec<_> = level(0).phases.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            [PhaseKind::Carrot, PhaseKind::Shot, PhaseKind::Colouring]
        );
        assert!(!level(0).phases[1].allows_jump);
    }

    #[test]
    fn test_level_index_clamps() {
        assert_eq!(level(99).number, LEVELS.last().map(|l| l.number).unwrap_or(0));
    }
}
