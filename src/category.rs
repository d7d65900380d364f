//! Canonical activity categorization
//!
//! Single source of truth for "which goal bucket does this activity count
//! toward". Every aggregation and record-eligibility decision in the crate
//! goes through [`category`]; nothing else reimplements the default mapping.

use crate::models::{Activity, ActivityType, GoalCategory};

/// Classify an activity into its goal category.
///
/// Resolution order:
/// 1. An explicit `count_toward` override wins regardless of type.
/// 2. `Other`-typed activities honor their `custom_category` override.
/// 3. Otherwise the fixed type default applies.
///
/// Pure and total; every input has a defined output.
pub fn category(activity: &Activity) -> GoalCategory {
    if let Some(overridden) = activity.count_toward {
        return overridden.into();
    }

    if activity.activity_type == ActivityType::Other {
        if let Some(custom) = activity.custom_category {
            return custom.into();
        }
    }

    default_category(activity.activity_type)
}

/// The fixed type-to-category default, ignoring overrides
pub fn default_category(activity_type: ActivityType) -> GoalCategory {
    match activity_type {
        ActivityType::StrengthTraining => GoalCategory::Strength,
        ActivityType::Running | ActivityType::Cycle | ActivityType::Sports => GoalCategory::Cardio,
        ActivityType::ColdPlunge
        | ActivityType::Sauna
        | ActivityType::Yoga
        | ActivityType::Pilates => GoalCategory::Recovery,
        ActivityType::Other => GoalCategory::Other,
    }
}
