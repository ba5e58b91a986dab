// ABOUTME: Closed achievement identifier set and the static display catalog
// ABOUTME: Unlock predicates live in the gamification engine, not here
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Achievement catalog
//!
//! The identifier set is closed; there is no dynamic registration. The
//! catalog only carries display metadata so API responses can decorate
//! unlocked rows without the UI duplicating it. `week_warrior` is catalog-only
//! and has no engine trigger.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Closed set of achievement identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    /// Complete the first exercise
    FirstBlood,
    /// Complete the first full workout
    FullSend,
    /// Work out 5 days in a week (catalog-only, no engine trigger)
    WeekWarrior,
    /// Reach a 7-day streak
    StreakMaster,
    /// Lift 10,000 kg total volume in a week
    IronCentury,
    /// Hit 5 personal records
    PrMachine,
    /// Earn 1,000 lifetime coins
    CoinCollector,
    /// Reach level 10
    #[serde(rename = "level_10")]
    Level10,
    /// Maintain a 30-day streak
    ConsistencyKing,
}

impl AchievementId {
    /// Stable string form used in storage and API payloads
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstBlood => "first_blood",
            Self::FullSend => "full_send",
            Self::WeekWarrior => "week_warrior",
            Self::StreakMaster => "streak_master",
            Self::IronCentury => "iron_century",
            Self::PrMachine => "pr_machine",
            Self::CoinCollector => "coin_collector",
            Self::Level10 => "level_10",
            Self::ConsistencyKing => "consistency_king",
        }
    }

    /// Display metadata for this achievement
    #[must_use]
    pub const fn def(self) -> &'static AchievementDef {
        match self {
            Self::FirstBlood => &AchievementDef {
                id: Self::FirstBlood,
                title: "First Blood",
                description: "Complete your first exercise",
                icon: "Sword",
                coin_bonus: 10,
                rarity: Rarity::Common,
            },
            Self::FullSend => &AchievementDef {
                id: Self::FullSend,
                title: "Full Send",
                description: "Complete a full workout",
                icon: "Rocket",
                coin_bonus: 25,
                rarity: Rarity::Common,
            },
            Self::WeekWarrior => &AchievementDef {
                id: Self::WeekWarrior,
                title: "Week Warrior",
                description: "Work out 5 days in a week",
                icon: "Shield",
                coin_bonus: 50,
                rarity: Rarity::Rare,
            },
            Self::StreakMaster => &AchievementDef {
                id: Self::StreakMaster,
                title: "Streak Master",
                description: "Hit a 7-day workout streak",
                icon: "Flame",
                coin_bonus: 75,
                rarity: Rarity::Rare,
            },
            Self::IronCentury => &AchievementDef {
                id: Self::IronCentury,
                title: "Iron Century",
                description: "Lift 10,000 kg total volume in a week",
                icon: "Anvil",
                coin_bonus: 100,
                rarity: Rarity::Epic,
            },
            Self::PrMachine => &AchievementDef {
                id: Self::PrMachine,
                title: "PR Machine",
                description: "Hit 5 personal records",
                icon: "TrendingUp",
                coin_bonus: 75,
                rarity: Rarity::Epic,
            },
            Self::CoinCollector => &AchievementDef {
                id: Self::CoinCollector,
                title: "Coin Collector",
                description: "Earn 1,000 lifetime coins",
                icon: "Coins",
                coin_bonus: 50,
                rarity: Rarity::Rare,
            },
            Self::Level10 => &AchievementDef {
                id: Self::Level10,
                title: "Double Digits",
                description: "Reach level 10",
                icon: "Crown",
                coin_bonus: 100,
                rarity: Rarity::Epic,
            },
            Self::ConsistencyKing => &AchievementDef {
                id: Self::ConsistencyKing,
                title: "Consistency King",
                description: "Maintain a 30-day workout streak",
                icon: "Trophy",
                coin_bonus: 200,
                rarity: Rarity::Legendary,
            },
        }
    }

    /// All known achievement identifiers
    #[must_use]
    pub const fn all() -> [Self; 9] {
        [
            Self::FirstBlood,
            Self::FullSend,
            Self::WeekWarrior,
            Self::StreakMaster,
            Self::IronCentury,
            Self::PrMachine,
            Self::CoinCollector,
            Self::Level10,
            Self::ConsistencyKing,
        ]
    }
}

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AchievementId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first_blood" => Ok(Self::FirstBlood),
            "full_send" => Ok(Self::FullSend),
            "week_warrior" => Ok(Self::WeekWarrior),
            "streak_master" => Ok(Self::StreakMaster),
            "iron_century" => Ok(Self::IronCentury),
            "pr_machine" => Ok(Self::PrMachine),
            "coin_collector" => Ok(Self::CoinCollector),
            "level_10" => Ok(Self::Level10),
            "consistency_king" => Ok(Self::ConsistencyKing),
            other => Err(AppError::invalid_input(format!(
                "Unknown achievement identifier: {other}"
            ))),
        }
    }
}

/// Rarity tier used by the UI for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    /// Baseline tier
    Common,
    /// Uncommon accomplishments
    Rare,
    /// Significant accomplishments
    Epic,
    /// The long-haul tier
    Legendary,
}

/// Display metadata for a single achievement
#[derive(Debug, Clone, Serialize)]
pub struct AchievementDef {
    /// Identifier this metadata belongs to
    pub id: AchievementId,
    /// Display title
    pub title: &'static str,
    /// One-line description
    pub description: &'static str,
    /// Lucide icon name used by the UI
    pub icon: &'static str,
    /// Coins the UI shows alongside the unlock toast
    pub coin_bonus: i64,
    /// Rarity tier
    pub rarity: Rarity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_round_trip() {
        for id in AchievementId::all() {
            let parsed: AchievementId = id.as_str().parse().unwrap();
            assert_eq!(parsed, id);
        }
    }

    #[test]
    fn test_unknown_identifier_rejected() {
        assert!("gold_hoarder".parse::<AchievementId>().is_err());
    }

    #[test]
    fn test_def_matches_id() {
        for id in AchievementId::all() {
            assert_eq!(id.def().id, id);
        }
    }
}
