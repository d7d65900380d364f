//! Engine facade
//!
//! The outbound surface the presentation layer consumes. Every operation is
//! synchronous and runs to completion; streaks and records mutate in place
//! through the `&mut` state the caller passes in, and persisting that state
//! afterwards is the caller's job.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::aggregate::aggregate;
use crate::celebration::{decide, Celebration};
use crate::goals::{evaluate, GoalAssessment};
use crate::models::{Activity, PersonalRecords, Streaks, UserGoals};
use crate::records::{on_activity_added, on_activity_removed, RecordBroken};
use crate::streaks::{close_week, on_activity_change, StreakEvents};
use crate::week::WeekWindow;

/// Completed-versus-goal pair for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryProgress {
    pub completed: u32,
    pub goal: u32,
}

/// Derived week-to-date progress; never persisted, recomputed per query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyProgress {
    pub window: WeekWindow,

    pub strength: CategoryProgress,
    pub cardio: CategoryProgress,
    pub recovery: CategoryProgress,

    pub total_miles: Decimal,
    pub total_calories: u32,
    pub total_activities: u32,

    pub overall_percent: u8,
    pub all_goals_met: bool,
}

/// What one `record_activity` call produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityOutcome {
    pub streak_events: StreakEvents,
    pub records_broken: Vec<RecordBroken>,

    /// The single event, if any, the presentation layer should surface
    pub celebration: Option<Celebration>,
}

/// Stateless computation engine over caller-owned state
#[derive(Debug, Clone, Copy, Default)]
pub struct Engine;

impl Engine {
    pub fn new() -> Self {
        Engine
    }

    /// Week-to-date progress. Read-only and idempotent.
    pub fn weekly_progress(
        &self,
        activities: &[Activity],
        goals: &UserGoals,
        today: NaiveDate,
    ) -> WeeklyProgress {
        let window = WeekWindow::to_date(today);
        let week = aggregate(activities, &window);
        let assessment = evaluate(&week, goals);

        WeeklyProgress {
            window,
            strength: CategoryProgress {
                completed: week.completed.strength,
                goal: goals.strength_sessions,
            },
            cardio: CategoryProgress {
                completed: week.completed.cardio,
                goal: goals.cardio_sessions,
            },
            recovery: CategoryProgress {
                completed: week.completed.recovery,
                goal: goals.recovery_sessions,
            },
            total_miles: week.total_miles,
            total_calories: week.total_calories,
            total_activities: week.total_activities,
            overall_percent: assessment.overall_percent,
            all_goals_met: assessment.all_goals_met,
        }
    }

    /// Evaluate a newly logged activity.
    ///
    /// `existing` is the collection before the new activity; the engine
    /// re-aggregates the current week on both sides of the change to detect
    /// goal transitions, then feeds the record tracker and picks one
    /// celebration. Streaks and records mutate in place.
    pub fn record_activity(
        &self,
        existing: &[Activity],
        activity: &Activity,
        goals: &UserGoals,
        streaks: &mut Streaks,
        records: &mut PersonalRecords,
        today: NaiveDate,
    ) -> ActivityOutcome {
        let window = WeekWindow::to_date(today);

        let previous = self.assess(existing, goals, &window);

        let mut with_new: Vec<Activity> = existing.to_vec();
        with_new.push(activity.clone());
        let week = aggregate(&with_new, &window);
        let next = evaluate(&week, goals);

        let streak_events = on_activity_change(&previous, &next, streaks, records);
        let records_broken = on_activity_added(activity, &week, records);

        debug!(
            completions = streak_events.completions.len(),
            master = streak_events.master.is_some(),
            records = records_broken.len(),
            "activity evaluated"
        );

        let celebration = decide(streak_events.clone(), records_broken.clone());
        if let Some(ref event) = celebration {
            info!(?event, "celebration selected");
        }

        ActivityOutcome {
            streak_events,
            records_broken,
            celebration,
        }
    }

    /// Re-derive records after a deletion.
    ///
    /// `remaining` is the collection with the activity already removed.
    /// Single-activity records are rebuilt from scratch; streaks are not
    /// re-evaluated on removal.
    pub fn remove_activity(&self, remaining: &[Activity], records: &mut PersonalRecords) {
        on_activity_removed(remaining, records);
    }

    /// Week-boundary tick: evaluate the full week containing `week_ending`
    /// and reset every streak whose goal that week missed.
    pub fn close_week(
        &self,
        activities: &[Activity],
        goals: &UserGoals,
        streaks: &mut Streaks,
        week_ending: NaiveDate,
    ) {
        let window = WeekWindow::containing(week_ending);
        let final_assessment = self.assess(activities, goals, &window);
        info!(
            start = %window.start,
            all_goals_met = final_assessment.all_goals_met,
            "closing week"
        );
        close_week(&final_assessment, streaks);
    }

    fn assess(
        &self,
        activities: &[Activity],
        goals: &UserGoals,
        window: &WeekWindow,
    ) -> GoalAssessment {
        evaluate(&aggregate(activities, window), goals)
    }
}
