//! Weekly activity aggregation
//!
//! Reduces the activity collection, scoped to a week window, into
//! per-category counts, display breakdowns, and scalar totals. The
//! breakdowns exist purely for display; goal logic only ever reads the
//! per-category counts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::category::category;
use crate::models::{Activity, ActivityType, GoalCategory};
use crate::week::WeekWindow;

/// Activity counts per goal category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub strength: u32,
    pub cardio: u32,
    pub recovery: u32,
    pub other: u32,
}

impl CategoryCounts {
    pub fn for_category(&self, category: GoalCategory) -> u32 {
        match category {
            GoalCategory::Strength => self.strength,
            GoalCategory::Cardio => self.cardio,
            GoalCategory::Recovery => self.recovery,
            GoalCategory::Other => self.other,
        }
    }
}

/// Cardio sessions bucketed by concrete activity type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardioBreakdown {
    pub running: u32,
    pub cycling: u32,
    pub sports: u32,
    /// Sessions counting toward cardio via an override from another type
    pub other: u32,
}

/// Strength sessions bucketed by sub-kind, inferred from the subtype string
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthBreakdown {
    pub lifting: u32,
    pub bodyweight: u32,
    pub other: u32,
}

/// Recovery sessions bucketed by concrete activity type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryBreakdown {
    pub yoga: u32,
    pub pilates: u32,
    pub cold_plunge: u32,
    pub sauna: u32,
    /// Sessions counting toward recovery via an override from another type
    pub other: u32,
}

/// One week of activity, reduced for goal evaluation and display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyAggregate {
    /// Window the aggregate was computed over
    pub window: WeekWindow,

    /// Sessions completed per goal category
    pub completed: CategoryCounts,

    /// Display-only cardio breakdown
    pub cardio_breakdown: CardioBreakdown,

    /// Display-only strength breakdown
    pub strength_breakdown: StrengthBreakdown,

    /// Display-only recovery breakdown
    pub recovery_breakdown: RecoveryBreakdown,

    /// Sum of distance over Running and Cycling activities, in miles
    pub total_miles: Decimal,

    /// Sum of calories over all included activities
    pub total_calories: u32,

    /// Total activities in the window, all categories included
    pub total_activities: u32,
}

/// Reduce `activities` falling inside `window` into a [`WeeklyAggregate`].
///
/// Missing optional numerics sum as zero; there are no error conditions.
pub fn aggregate(activities: &[Activity], window: &WeekWindow) -> WeeklyAggregate {
    let mut out = WeeklyAggregate {
        window: *window,
        completed: CategoryCounts::default(),
        cardio_breakdown: CardioBreakdown::default(),
        strength_breakdown: StrengthBreakdown::default(),
        recovery_breakdown: RecoveryBreakdown::default(),
        total_miles: Decimal::ZERO,
        total_calories: 0,
        total_activities: 0,
    };

    for activity in activities.iter().filter(|a| window.contains(a.date)) {
        out.total_activities += 1;
        out.total_calories += activity.calories.unwrap_or(0);

        if matches!(
            activity.activity_type,
            ActivityType::Running | ActivityType::Cycle
        ) {
            out.total_miles += activity.distance_miles.unwrap_or(Decimal::ZERO);
        }

        match category(activity) {
            GoalCategory::Strength => {
                out.completed.strength += 1;
                match strength_sub_kind(activity) {
                    StrengthSubKind::Lifting => out.strength_breakdown.lifting += 1,
                    StrengthSubKind::Bodyweight => out.strength_breakdown.bodyweight += 1,
                    StrengthSubKind::Other => out.strength_breakdown.other += 1,
                }
            }
            GoalCategory::Cardio => {
                out.completed.cardio += 1;
                match activity.activity_type {
                    ActivityType::Running => out.cardio_breakdown.running += 1,
                    ActivityType::Cycle => out.cardio_breakdown.cycling += 1,
                    ActivityType::Sports => out.cardio_breakdown.sports += 1,
                    _ => out.cardio_breakdown.other += 1,
                }
            }
            GoalCategory::Recovery => {
                out.completed.recovery += 1;
                match activity.activity_type {
                    ActivityType::Yoga => out.recovery_breakdown.yoga += 1,
                    ActivityType::Pilates => out.recovery_breakdown.pilates += 1,
                    ActivityType::ColdPlunge => out.recovery_breakdown.cold_plunge += 1,
                    ActivityType::Sauna => out.recovery_breakdown.sauna += 1,
                    _ => out.recovery_breakdown.other += 1,
                }
            }
            GoalCategory::Other => {
                out.completed.other += 1;
            }
        }
    }

    out
}

enum StrengthSubKind {
    Lifting,
    Bodyweight,
    Other,
}

/// Infer the strength sub-kind from the free-form subtype string
fn strength_sub_kind(activity: &Activity) -> StrengthSubKind {
    let Some(subtype) = activity.subtype.as_deref() else {
        return StrengthSubKind::Other;
    };
    let subtype = subtype.to_lowercase();
    if subtype.contains("lift") || subtype.contains("weight") {
        StrengthSubKind::Lifting
    } else if subtype.contains("bodyweight") || subtype.contains("calisthenic") {
        StrengthSubKind::Bodyweight
    } else {
        StrengthSubKind::Other
    }
}
