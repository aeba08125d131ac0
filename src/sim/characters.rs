//! Playable character roster

use serde::{Deserialize, Serialize};

/// Chibi sprite colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub skin: &'static str,
    pub hair: &'static str,
    pub shirt: &'static str,
    pub pants: &'static str,
}

/// A selectable character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Character {
    pub name: &'static str,
    pub tagline: &'static str,
    pub palette: Palette,
}

const SKIN: &str = "#FFD2B5";
const PANTS: &str = "#2B2B2B";

const fn character(
    name: &'static str,
    tagline: &'static str,
    hair: &'static str,
    shirt: &'static str,
) -> Character {
    Character {
        name,
        tagline,
        palette: Palette {
            skin: SKIN,
            hair,
            shirt,
            pants: PANTS,
        },
    }
}

/// Everyone on the select screen, left to right
pub const ROSTER: [Character; 6] = [
    character("Holli", "Calm in the chaos.", "#F2D16B", "#3EE6C1"),
    character("Emily", "Drama. Energy. Motion.", "#6B3B2A", "#FF5EA8"),
    character("Devin", "Built for the long jump.", "#5B3A2A", "#4DA3FF"),
    character("Brandon", "IB approved.", "#A87A4D", "#8E6BFF"),
    character("Colleen", "School mom magic.", "#FF6B6B", "#FFD24D"),
    character("Melissa", "All the pieces in motion.", "#6B3B2A", "#6BFF7A"),
];

/// Index into the roster, wrapping out-of-range values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CharacterId(pub usize);

impl CharacterId {
    pub fn get(self) -> &'static Character {
        &ROSTER[self.0 % ROSTER.len()]
    }

    /// Step through the roster with wraparound
    pub fn cycled(self, delta: isize) -> Self {
        let len = ROSTER.len() as isize;
        let idx = (self.0 as isize % len + delta).rem_euclid(len);
        CharacterId(idx as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps_both_ways() {
        assert_eq!(CharacterId(0).cycled(-1), CharacterId(5));
        assert_eq!(CharacterId(5).cycled(1), CharacterId(0));
        assert_eq!(CharacterId(2).cycled(1), CharacterId(3));
    }

    #[test]
    fn test_names_are_unique() {
        for (i, a) in ROSTER.iter().enumerate() {
            for b in &ROSTER[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_get_wraps_out_of_range() {
        assert_eq!(CharacterId(7).get().name, "Emily");
    }
}
