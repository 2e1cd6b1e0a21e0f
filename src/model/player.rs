use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeCategory {
    Young,
    MiddleAged,
    Elderly,
}

impl AgeCategory {
    pub const ALL: [AgeCategory; 3] = [
        AgeCategory::Young,
        AgeCategory::MiddleAged,
        AgeCategory::Elderly,
    ];

    /// Flavor age used in the character sheet.
    pub fn years(self) -> u32 {
        match self {
            AgeCategory::Young => 15,
            AgeCategory::MiddleAged => 25,
            AgeCategory::Elderly => 60,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeCategory::Young => "Young",
            AgeCategory::MiddleAged => "Middle-aged",
            AgeCategory::Elderly => "Elderly",
        }
    }
}

impl fmt::Display for AgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Strength band for a combat attribute. Each roll adds a little jitter
/// on top of the band's floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatBand {
    Weak,
    Normal,
    Strong,
}

impl StatBand {
    pub const ALL: [StatBand; 3] = [StatBand::Weak, StatBand::Normal, StatBand::Strong];

    pub fn label(self) -> &'static str {
        match self {
            StatBand::Weak => "Weak",
            StatBand::Normal => "Normal",
            StatBand::Strong => "Strong",
        }
    }

    /// Half-open range the rolled value is drawn from.
    pub fn range(self) -> std::ops::Range<u32> {
        match self {
            StatBand::Weak => 20..28,
            StatBand::Normal => 30..35,
            StatBand::Strong => 45..53,
        }
    }

    pub fn roll<R: Rng + ?Sized>(self, rng: &mut R) -> u32 {
        rng.gen_range(self.range())
    }
}

/// The player's persona. Built once during character creation and never
/// changed afterwards, so the fields are only reachable through getters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerDetails {
    name: String,
    backstory: String,
    age: AgeCategory,
    health: u32,
    attack: u32,
    defence: u32,
}

impl PlayerDetails {
    pub fn new(
        name: impl Into<String>,
        backstory: impl Into<String>,
        age: AgeCategory,
        health: u32,
        attack: u32,
        defence: u32,
    ) -> Self {
        Self {
            name: name.into(),
            backstory: backstory.into(),
            age,
            health,
            attack,
            defence,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn backstory(&self) -> &str {
        &self.backstory
    }

    pub fn age(&self) -> AgeCategory {
        self.age
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn attack(&self) -> u32 {
        self.attack
    }

    pub fn defence(&self) -> u32 {
        self.defence
    }
}

impl fmt::Display for PlayerDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Backstory: {}", self.backstory)?;
        writeln!(f, "Age: {} ({})", self.age, self.age.years())?;
        write!(
            f,
            "Health: {}  Attack: {}  Defence: {}",
            self.health, self.attack, self.defence
        )
    }
}
