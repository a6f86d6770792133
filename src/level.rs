//! Level theme palettes
//!
//! Four hardcoded environment palettes, cycling with the level number. Pure
//! data for the presentation layer; nothing here feeds back into gameplay.

use serde::Serialize;

/// Colors and flavor for one environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelTheme {
    pub name: &'static str,
    pub floor_color: &'static str,
    pub grid_color: &'static str,
}

pub const THEMES: [LevelTheme; 4] = [
    LevelTheme {
        name: "Forest",
        floor_color: "#059669",
        grid_color: "#064e3b",
    },
    LevelTheme {
        name: "Ice",
        floor_color: "#0ea5e9",
        grid_color: "#0c4a6e",
    },
    LevelTheme {
        name: "Desert",
        floor_color: "#d97706",
        grid_color: "#78350f",
    },
    LevelTheme {
        name: "Cyber City",
        floor_color: "#7c3aed",
        grid_color: "#4c1d95",
    },
];

/// Theme for a 1-based level, wrapping around the palette list
pub fn theme_for_level(level: u32) -> &'static LevelTheme {
    let index = (level.max(1) - 1) as usize % THEMES.len();
    &THEMES[index]
}
