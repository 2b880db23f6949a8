//! Scheduled event catalog and scoring multipliers
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scheduled activity for a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Meeting,
    Date,
    Party,
    Chill,
    Workout,
}

/// Static description of an event type
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EventDefinition {
    pub id: EventKind,
    pub name: &'static str,
    pub multiplier: f64,
    pub description: &'static str,
    pub icon: &'static str,
}

const MEETING: EventDefinition = EventDefinition {
    id: EventKind::Meeting,
    name: "Client Meeting",
    multiplier: 3.0,
    description: "High stakes professional. Needs Day 0 or 1.",
    icon: "💼",
};

const DATE: EventDefinition = EventDefinition {
    id: EventKind::Date,
    name: "Hot Date",
    multiplier: 2.5,
    description: "High stakes romantic. Needs Day 1 or 2.",
    icon: "❤️",
};

const PARTY: EventDefinition = EventDefinition {
    id: EventKind::Party,
    name: "Social Party",
    multiplier: 1.5,
    description: "Medium stakes. Flexible.",
    icon: "🎉",
};

const CHILL: EventDefinition = EventDefinition {
    id: EventKind::Chill,
    name: "WFH / Chill",
    multiplier: 1.0,
    description: "Low stakes. Maintenance day.",
    icon: "🏠",
};

const WORKOUT: EventDefinition = EventDefinition {
    id: EventKind::Workout,
    name: "Gym / Run",
    multiplier: 0.5,
    description: "Dirty hair bonus (+15pt) if Day 3+.",
    icon: "💪",
};

impl EventKind {
    /// Every event type in catalog order; uniform draws index into this.
    pub const ALL: [Self; 5] = [
        Self::Meeting,
        Self::Date,
        Self::Party,
        Self::Chill,
        Self::Workout,
    ];

    #[must_use]
    pub const fn definition(self) -> &'static EventDefinition {
        match self {
            Self::Meeting => &MEETING,
            Self::Date => &DATE,
            Self::Party => &PARTY,
            Self::Chill => &CHILL,
            Self::Workout => &WORKOUT,
        }
    }

    #[must_use]
    pub const fn multiplier(self) -> f64 {
        self.definition().multiplier
    }

    /// Meetings and dates are the days worth planning a wash around.
    #[must_use]
    pub const fn is_high_stakes(self) -> bool {
        matches!(self, Self::Meeting | Self::Date)
    }

    #[must_use]
    pub const fn has_dirty_hair_bonus(self) -> bool {
        matches!(self, Self::Workout)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.definition().name)
    }
}
