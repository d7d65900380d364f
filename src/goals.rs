//! Weekly goal evaluation
//!
//! Compares a [`WeeklyAggregate`] against the configured [`UserGoals`] to
//! produce per-category completion flags and an overall progress percentage.

use serde::{Deserialize, Serialize};

use crate::aggregate::WeeklyAggregate;
use crate::models::{GoalCategory, UserGoals};

/// Outcome of evaluating one week against the user's goals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalAssessment {
    pub strength_met: bool,
    pub cardio_met: bool,
    pub recovery_met: bool,

    /// True when all three category goals are met
    pub all_goals_met: bool,

    /// Progress toward the combined weekly target, 0..=100.
    ///
    /// Goal credit per category is capped at the category target, so surplus
    /// sessions never inflate the bar.
    pub overall_percent: u8,
}

impl GoalAssessment {
    /// Whether a category's goal is met (`Other` is never met)
    pub fn met(&self, category: GoalCategory) -> bool {
        match category {
            GoalCategory::Strength => self.strength_met,
            GoalCategory::Cardio => self.cardio_met,
            GoalCategory::Recovery => self.recovery_met,
            GoalCategory::Other => false,
        }
    }
}

/// Evaluate a weekly aggregate against the user's goals
pub fn evaluate(aggregate: &WeeklyAggregate, goals: &UserGoals) -> GoalAssessment {
    let strength_met = aggregate.completed.strength >= goals.strength_sessions;
    let cardio_met = aggregate.completed.cardio >= goals.cardio_sessions;
    let recovery_met = aggregate.completed.recovery >= goals.recovery_sessions;

    GoalAssessment {
        strength_met,
        cardio_met,
        recovery_met,
        all_goals_met: strength_met && cardio_met && recovery_met,
        overall_percent: overall_percent(aggregate, goals),
    }
}

/// Capped-credit percentage: `sum(min(completed, goal)) / sum(goal) * 100`,
/// rounded to the nearest whole percent and clamped to 100. Zero combined
/// target yields zero.
fn overall_percent(aggregate: &WeeklyAggregate, goals: &UserGoals) -> u8 {
    let total_target: u64 = u64::from(goals.strength_sessions)
        + u64::from(goals.cardio_sessions)
        + u64::from(goals.recovery_sessions);
    if total_target == 0 {
        return 0;
    }

    let credit: u64 = u64::from(aggregate.completed.strength.min(goals.strength_sessions))
        + u64::from(aggregate.completed.cardio.min(goals.cardio_sessions))
        + u64::from(aggregate.completed.recovery.min(goals.recovery_sessions));

    let percent = (credit * 100 + total_target / 2) / total_target;
    percent.min(100) as u8
}
