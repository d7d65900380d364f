//! Streak tracking
//!
//! Advances the four streak counters on goal-completion transitions and
//! reports what happened so the celebration decider can pick a message.
//! Counters only ever move forward here; the week-close tick in
//! [`close_week`] is the single place a streak can reset.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::goals::GoalAssessment;
use crate::models::{
    GoalCategory, PersonalRecords, RecordEntry, RecordMetric, Streaks,
};

/// Streak increments are milestones at exact multiples of this
const MILESTONE_INTERVAL: u32 = 5;

/// A category goal crossed from below-goal to at-or-above-goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakCompletion {
    pub category: GoalCategory,

    /// Streak value after the increment
    pub streak: u32,

    /// The increment set a new longest-streak record
    pub record_broken: bool,

    /// Non-record increment at an exact multiple of five
    pub milestone: bool,
}

/// All three category goals became met on this evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterCompletion {
    /// Master streak value after the increment
    pub streak: u32,

    pub record_broken: bool,
    pub milestone: bool,
}

/// Everything the streak tracker observed on one evaluation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakEvents {
    /// One entry per category that just completed, in Strength, Cardio,
    /// Recovery order
    pub completions: Vec<StreakCompletion>,

    /// Present only on the not-all-met to all-met transition
    pub master: Option<MasterCompletion>,
}

impl StreakEvents {
    pub fn is_empty(&self) -> bool {
        self.completions.is_empty() && self.master.is_none()
    }
}

/// Advance streaks for goal transitions between two weekly assessments.
///
/// For each category that was unmet before the change and is met after it,
/// the category streak increments and the longest-streak record is checked.
/// The master streak increments only when this same evaluation tips the
/// last remaining category, i.e. on the not-all-met to all-met transition.
pub fn on_activity_change(
    previous: &GoalAssessment,
    next: &GoalAssessment,
    streaks: &mut Streaks,
    records: &mut PersonalRecords,
) -> StreakEvents {
    let mut events = StreakEvents::default();

    for (category, record_metric) in [
        (GoalCategory::Strength, RecordMetric::LongestStrengthStreak),
        (GoalCategory::Cardio, RecordMetric::LongestCardioStreak),
        (GoalCategory::Recovery, RecordMetric::LongestRecoveryStreak),
    ] {
        if !previous.met(category) && next.met(category) {
            let counter = counter_mut(streaks, category);
            *counter += 1;
            let streak = *counter;
            let record_broken = update_longest(records, record_metric, streak);
            debug!(%category, streak, record_broken, "category goal completed");
            events.completions.push(StreakCompletion {
                category,
                streak,
                record_broken,
                milestone: is_milestone(streak, record_broken),
            });
        }
    }

    if !previous.all_goals_met && next.all_goals_met {
        streaks.master += 1;
        let streak = streaks.master;
        let record_broken = update_longest(records, RecordMetric::LongestMasterStreak, streak);
        debug!(streak, record_broken, "master streak advanced");
        events.master = Some(MasterCompletion {
            streak,
            record_broken,
            milestone: is_milestone(streak, record_broken),
        });
    }

    events
}

/// Close out a finished week: reset every counter whose goal the week
/// missed. Longest-streak records are historical peaks and are untouched.
pub fn close_week(final_assessment: &GoalAssessment, streaks: &mut Streaks) {
    if !final_assessment.strength_met {
        streaks.strength = 0;
    }
    if !final_assessment.cardio_met {
        streaks.cardio = 0;
    }
    if !final_assessment.recovery_met {
        streaks.recovery = 0;
    }
    if !final_assessment.all_goals_met {
        streaks.master = 0;
    }
}

fn counter_mut(streaks: &mut Streaks, category: GoalCategory) -> &mut u32 {
    match category {
        GoalCategory::Strength => &mut streaks.strength,
        GoalCategory::Cardio => &mut streaks.cardio,
        GoalCategory::Recovery => &mut streaks.recovery,
        // Transitions are only evaluated for the three goal categories
        GoalCategory::Other => unreachable!("Other carries no streak counter"),
    }
}

fn is_milestone(streak: u32, record_broken: bool) -> bool {
    !record_broken && streak % MILESTONE_INTERVAL == 0
}

/// Record the streak value if it is a new high; returns whether it was
fn update_longest(records: &mut PersonalRecords, metric: RecordMetric, streak: u32) -> bool {
    let value = Decimal::from(streak);
    let improved = match records.get(metric) {
        Some(entry) => value > entry.value,
        None => streak > 0,
    };
    if improved {
        records.set(
            metric,
            Some(RecordEntry {
                value,
                activity_type: None,
            }),
        );
    }
    improved
}
