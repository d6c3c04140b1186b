//! Named starting patterns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::LifeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pattern {
    Block,
    Tub,
    Loaf,
    Beehive,
    Blinker,
    Glider,
    Plus,
}

impl Pattern {
    pub const ALL: [Pattern; 7] = [
        Pattern::Block,
        Pattern::Tub,
        Pattern::Loaf,
        Pattern::Beehive,
        Pattern::Blinker,
        Pattern::Glider,
        Pattern::Plus,
    ];

    /// Live cells as `(dx, dy)` offsets from the pattern's top-left corner.
    pub fn cells(self) -> &'static [(u32, u32)] {
        match self {
            Pattern::Block => &[(0, 0), (1, 0), (0, 1), (1, 1)],
            Pattern::Tub => &[(1, 0), (0, 1), (2, 1), (1, 2)],
            Pattern::Loaf => &[(1, 0), (2, 0), (0, 1), (3, 1), (1, 2), (3, 2), (2, 3)],
            Pattern::Beehive => &[(1, 0), (2, 0), (0, 1), (3, 1), (1, 2), (2, 2)],
            Pattern::Blinker => &[(0, 0), (1, 0), (2, 0)],
            // Travels +1 x, +1 y every four generations.
            Pattern::Glider => &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
            Pattern::Plus => &[(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)],
        }
    }

    /// Bounding box `(width, height)`.
    pub fn extent(self) -> (u32, u32) {
        self.cells()
            .iter()
            .fold((0, 0), |(w, h), &(dx, dy)| (w.max(dx + 1), h.max(dy + 1)))
    }

    pub fn name(self) -> &'static str {
        match self {
            Pattern::Block => "block",
            Pattern::Tub => "tub",
            Pattern::Loaf => "loaf",
            Pattern::Beehive => "beehive",
            Pattern::Blinker => "blinker",
            Pattern::Glider => "glider",
            Pattern::Plus => "plus",
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pattern {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Pattern::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| LifeError::InvalidConfig(format!("unknown pattern: {}", s)))
    }
}
