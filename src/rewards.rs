// ABOUTME: Static coin/XP reward table for every reward-granting event type
// ABOUTME: Values are game-balance constants; changing them never changes mechanics
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reward table

use serde::{Deserialize, Serialize};

/// Coin and XP amounts granted for a single reward event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    /// Coins granted
    pub coins: i64,
    /// XP granted
    pub xp: i64,
}

/// Closed set of reward-granting event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RewardEvent {
    /// A single exercise was completed
    ExerciseComplete,
    /// A full workout was completed
    WorkoutComplete,
    /// A new personal record was set
    PersonalRecord,
    /// Streak reached 3 consecutive days
    Streak3,
    /// Streak reached 7 consecutive days
    Streak7,
    /// First session of a new ISO week
    FirstWorkoutOfWeek,
    /// Perceived-exertion data was recorded with the exercise
    RpeLogged,
}

impl RewardEvent {
    /// The coin/XP amounts for this event
    #[must_use]
    pub const fn reward(self) -> Reward {
        match self {
            Self::ExerciseComplete => Reward { coins: 10, xp: 15 },
            Self::WorkoutComplete => Reward { coins: 50, xp: 75 },
            Self::PersonalRecord => Reward { coins: 25, xp: 40 },
            Self::Streak3 => Reward { coins: 30, xp: 50 },
            Self::Streak7 => Reward { coins: 100, xp: 150 },
            Self::FirstWorkoutOfWeek => Reward { coins: 20, xp: 30 },
            Self::RpeLogged => Reward { coins: 5, xp: 5 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reward_table_values() {
        assert_eq!(
            RewardEvent::ExerciseComplete.reward(),
            Reward { coins: 10, xp: 15 }
        );
        assert_eq!(
            RewardEvent::WorkoutComplete.reward(),
            Reward { coins: 50, xp: 75 }
        );
        assert_eq!(
            RewardEvent::PersonalRecord.reward(),
            Reward { coins: 25, xp: 40 }
        );
        assert_eq!(RewardEvent::Streak7.reward(), Reward { coins: 100, xp: 150 });
        assert_eq!(RewardEvent::RpeLogged.reward(), Reward { coins: 5, xp: 5 });
    }
}
