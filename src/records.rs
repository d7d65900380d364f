//! Personal-record tracking
//!
//! Evaluates a single new activity (and the current week's aggregate)
//! against the all-time record table, and rebuilds the single-activity
//! records from scratch when an activity is deleted. Streak-derived records
//! are owned by the streak tracker and never touched here.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::WeeklyAggregate;
use crate::category::category;
use crate::models::{
    Activity, ActivityType, GoalCategory, PersonalRecords, RecordDirection, RecordEntry,
    RecordMetric,
};

/// Pace records require at least this much distance, in miles
const MIN_PACE_DISTANCE: Decimal = dec!(0.1);

/// Plausible human pace range, minutes per mile; values outside are bad data
const MIN_PLAUSIBLE_PACE: Decimal = dec!(3);
const MAX_PLAUSIBLE_PACE: Decimal = dec!(30);

/// A record that improved on this evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordBroken {
    pub metric: RecordMetric,

    /// New record value
    pub value: Decimal,

    /// Value it displaced, if the record was previously set
    pub previous: Option<Decimal>,
}

/// Evaluate a newly added activity against every tracked metric.
///
/// Single-activity metrics compare the activity's own fields; weekly
/// metrics compare the whole current week's aggregate, which is why the
/// caller passes the freshly recomputed [`WeeklyAggregate`] rather than a
/// delta. Updated records carry the new activity's type.
pub fn on_activity_added(
    activity: &Activity,
    week: &WeeklyAggregate,
    records: &mut PersonalRecords,
) -> Vec<RecordBroken> {
    let mut broken = Vec::new();

    for metric in RecordMetric::SINGLE_ACTIVITY {
        if let Some(value) = candidate_value(activity, metric) {
            try_update(records, metric, value, Some(activity.activity_type), &mut broken);
        }
    }

    let weekly_candidates = [
        (
            RecordMetric::MostWorkoutsInWeek,
            Decimal::from(week.total_activities),
        ),
        (
            RecordMetric::MostCaloriesInWeek,
            Decimal::from(week.total_calories),
        ),
        (RecordMetric::MostMilesInWeek, week.total_miles),
    ];
    for (metric, value) in weekly_candidates {
        if value > Decimal::ZERO {
            try_update(records, metric, value, Some(activity.activity_type), &mut broken);
        }
    }

    broken
}

/// Rebuild single-activity records after a deletion.
///
/// A full rescan of the remaining collection is required: deleting the
/// record-holding activity must fall back to the next-best value, which an
/// incremental adjustment cannot find. Weekly-aggregate and streak-derived
/// records describe historical peaks and are left untouched.
pub fn on_activity_removed(remaining: &[Activity], records: &mut PersonalRecords) {
    for metric in RecordMetric::SINGLE_ACTIVITY {
        let best = remaining
            .iter()
            .filter_map(|a| candidate_value(a, metric).map(|v| (v, a.activity_type)));

        let best = match metric.direction() {
            RecordDirection::HigherIsBetter => best.max_by(|a, b| a.0.cmp(&b.0)),
            RecordDirection::LowerIsBetter => best.min_by(|a, b| a.0.cmp(&b.0)),
        };

        records.set(
            metric,
            best.map(|(value, activity_type)| RecordEntry {
                value,
                activity_type: Some(activity_type),
            }),
        );
    }
    debug!(remaining = remaining.len(), "rescanned single-activity records");
}

/// The value this activity offers for a single-activity metric, or None if
/// the activity is not eligible.
///
/// Recovery-category activities are eligible only for the calorie record.
/// Missing fields make an activity ineligible rather than contributing
/// zeroes.
fn candidate_value(activity: &Activity, metric: RecordMetric) -> Option<Decimal> {
    let effective_category = category(activity);
    if effective_category == GoalCategory::Recovery && metric != RecordMetric::HighestCalories {
        return None;
    }

    match metric {
        RecordMetric::HighestCalories => activity
            .calories
            .filter(|c| *c > 0)
            .map(Decimal::from),
        RecordMetric::LongestStrengthDuration => (effective_category == GoalCategory::Strength)
            .then(|| activity.duration_minutes.filter(|d| *d > 0))
            .flatten()
            .map(Decimal::from),
        RecordMetric::LongestCardioDuration => (effective_category == GoalCategory::Cardio)
            .then(|| activity.duration_minutes.filter(|d| *d > 0))
            .flatten()
            .map(Decimal::from),
        RecordMetric::LongestDistance => activity
            .distance_miles
            .filter(|d| *d > Decimal::ZERO),
        RecordMetric::FastestRunningPace => {
            (activity.activity_type == ActivityType::Running).then(|| pace(activity)).flatten()
        }
        RecordMetric::FastestCyclingPace => {
            (activity.activity_type == ActivityType::Cycle).then(|| pace(activity)).flatten()
        }
        // Weekly and streak metrics are not single-activity candidates
        _ => None,
    }
}

/// Pace in minutes per mile, if computable and plausible.
///
/// Requires distance at or above the eligibility floor (which also guards
/// the division) and a resulting pace inside the documented 3-30 min/mile
/// range; anything outside is treated as bad data, not a record.
fn pace(activity: &Activity) -> Option<Decimal> {
    let duration = activity.duration_minutes.filter(|d| *d > 0)?;
    let distance = activity.distance_miles.filter(|d| *d >= MIN_PACE_DISTANCE)?;

    let pace = (Decimal::from(duration) / distance).round_dp(2);
    (pace >= MIN_PLAUSIBLE_PACE && pace <= MAX_PLAUSIBLE_PACE).then_some(pace)
}

/// Apply a candidate to a record slot on strict improvement only
fn try_update(
    records: &mut PersonalRecords,
    metric: RecordMetric,
    value: Decimal,
    activity_type: Option<ActivityType>,
    broken: &mut Vec<RecordBroken>,
) {
    let previous = records.get(metric).map(|e| e.value);
    let improved = match (previous, metric.direction()) {
        (None, _) => true,
        (Some(current), RecordDirection::HigherIsBetter) => value > current,
        (Some(current), RecordDirection::LowerIsBetter) => value < current,
    };

    if improved {
        debug!(metric = ?metric, %value, "personal record broken");
        records.set(metric, Some(RecordEntry { value, activity_type }));
        broken.push(RecordBroken {
            metric,
            value,
            previous,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::models::CategoryOverride;
    use crate::week::WeekWindow;
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    fn week_with(activities: &[Activity]) -> WeeklyAggregate {
        aggregate(activities, &WeekWindow::containing(day()))
    }

    fn run(distance: Decimal, duration: u32) -> Activity {
        let mut a = Activity::new(ActivityType::Running, day());
        a.distance_miles = Some(distance);
        a.duration_minutes = Some(duration);
        a
    }

    #[test]
    fn test_first_eligible_activity_sets_records() {
        let mut records = PersonalRecords::default();
        let mut activity = run(dec!(5), 40);
        activity.calories = Some(500);

        let week = week_with(std::slice::from_ref(&activity));
        let broken = on_activity_added(&activity, &week, &mut records);

        let metrics: Vec<_> = broken.iter().map(|b| b.metric).collect();
        assert!(metrics.contains(&RecordMetric::HighestCalories));
        assert!(metrics.contains(&RecordMetric::LongestDistance));
        assert!(metrics.contains(&RecordMetric::FastestRunningPace));
        assert!(metrics.contains(&RecordMetric::LongestCardioDuration));
        assert!(metrics.contains(&RecordMetric::MostWorkoutsInWeek));

        let pace_entry = records.get(RecordMetric::FastestRunningPace).unwrap();
        assert_eq!(pace_entry.value, dec!(8));
        assert_eq!(pace_entry.activity_type, Some(ActivityType::Running));
    }

    #[test]
    fn test_running_pace_record_updates_on_strict_improvement() {
        let mut records = PersonalRecords::default();
        records.set(
            RecordMetric::FastestRunningPace,
            Some(RecordEntry {
                value: dec!(8.5),
                activity_type: Some(ActivityType::Running),
            }),
        );

        // 40 minutes over 5 miles is 8.0 min/mile
        let activity = run(dec!(5), 40);
        let week = week_with(std::slice::from_ref(&activity));
        let broken = on_activity_added(&activity, &week, &mut records);

        let pace_break = broken
            .iter()
            .find(|b| b.metric == RecordMetric::FastestRunningPace)
            .unwrap();
        assert_eq!(pace_break.value, dec!(8.0));
        assert_eq!(pace_break.previous, Some(dec!(8.5)));
        assert_eq!(
            records.get(RecordMetric::FastestRunningPace).unwrap().value,
            dec!(8.0)
        );
    }

    #[test]
    fn test_equal_value_does_not_break_record() {
        let mut records = PersonalRecords::default();
        records.set(
            RecordMetric::LongestDistance,
            Some(RecordEntry {
                value: dec!(5),
                activity_type: Some(ActivityType::Running),
            }),
        );

        let activity = run(dec!(5), 45);
        let week = week_with(std::slice::from_ref(&activity));
        let broken = on_activity_added(&activity, &week, &mut records);

        assert!(!broken
            .iter()
            .any(|b| b.metric == RecordMetric::LongestDistance));
    }

    #[test]
    fn test_pace_requires_distance_floor() {
        let mut records = PersonalRecords::default();

        // 0.05 miles is below the 0.1-mile eligibility floor
        let activity = run(dec!(0.05), 1);
        let week = week_with(std::slice::from_ref(&activity));
        on_activity_added(&activity, &week, &mut records);

        assert!(records.get(RecordMetric::FastestRunningPace).is_none());
    }

    #[test]
    fn test_implausible_pace_ignored() {
        let mut records = PersonalRecords::default();

        // 2 minutes over 1 mile: faster than any human, treated as bad data
        let too_fast = run(dec!(1), 2);
        let week = week_with(std::slice::from_ref(&too_fast));
        on_activity_added(&too_fast, &week, &mut records);
        assert!(records.get(RecordMetric::FastestRunningPace).is_none());

        // 35 min/mile: slower than the plausible range
        let too_slow = run(dec!(1), 35);
        let week = week_with(std::slice::from_ref(&too_slow));
        on_activity_added(&too_slow, &week, &mut records);
        assert!(records.get(RecordMetric::FastestRunningPace).is_none());
    }

    #[test]
    fn test_cycling_pace_separate_from_running() {
        let mut records = PersonalRecords::default();
        let mut ride = Activity::new(ActivityType::Cycle, day());
        ride.distance_miles = Some(dec!(10));
        ride.duration_minutes = Some(40);

        let week = week_with(std::slice::from_ref(&ride));
        on_activity_added(&ride, &week, &mut records);

        assert!(records.get(RecordMetric::FastestRunningPace).is_none());
        assert_eq!(
            records.get(RecordMetric::FastestCyclingPace).unwrap().value,
            dec!(4)
        );
    }

    #[test]
    fn test_recovery_activities_only_count_calories() {
        let mut records = PersonalRecords::default();
        let mut sauna = Activity::new(ActivityType::Sauna, day());
        sauna.duration_minutes = Some(30);
        sauna.distance_miles = Some(dec!(1)); // nonsense data, must not count
        sauna.calories = Some(150);

        let week = week_with(std::slice::from_ref(&sauna));
        let broken = on_activity_added(&sauna, &week, &mut records);

        assert!(records.get(RecordMetric::LongestDistance).is_none());
        assert!(records.get(RecordMetric::LongestCardioDuration).is_none());
        assert_eq!(
            records.get(RecordMetric::HighestCalories).unwrap().value,
            dec!(150)
        );
        assert_eq!(broken.len(), 2); // calories + most calories in week
    }

    #[test]
    fn test_override_to_recovery_excludes_metrics() {
        // A run explicitly counted toward recovery loses duration/distance
        // eligibility; only calories still count.
        let mut records = PersonalRecords::default();
        let mut activity = run(dec!(3), 30);
        activity.count_toward = Some(CategoryOverride::Recovery);
        activity.calories = Some(300);

        let week = week_with(std::slice::from_ref(&activity));
        on_activity_added(&activity, &week, &mut records);

        assert!(records.get(RecordMetric::LongestDistance).is_none());
        assert!(records.get(RecordMetric::FastestRunningPace).is_none());
        assert!(records.get(RecordMetric::HighestCalories).is_some());
    }

    #[test]
    fn test_strength_duration_requires_strength_category() {
        let mut records = PersonalRecords::default();
        let mut lift = Activity::new(ActivityType::StrengthTraining, day());
        lift.duration_minutes = Some(60);

        let week = week_with(std::slice::from_ref(&lift));
        on_activity_added(&lift, &week, &mut records);

        assert_eq!(
            records
                .get(RecordMetric::LongestStrengthDuration)
                .unwrap()
                .value,
            dec!(60)
        );
        assert!(records.get(RecordMetric::LongestCardioDuration).is_none());
    }

    #[test]
    fn test_weekly_records_compare_week_totals() {
        let mut records = PersonalRecords::default();
        records.set(
            RecordMetric::MostCaloriesInWeek,
            Some(RecordEntry {
                value: dec!(2000),
                activity_type: Some(ActivityType::Running),
            }),
        );

        let mut first = run(dec!(4), 36);
        first.calories = Some(1200);
        let mut second = run(dec!(5), 45);
        second.calories = Some(900);

        let week = week_with(&[first.clone(), second.clone()]);
        let broken = on_activity_added(&second, &week, &mut records);

        // 2100 weekly calories beats the stored 2000
        let weekly = broken
            .iter()
            .find(|b| b.metric == RecordMetric::MostCaloriesInWeek)
            .unwrap();
        assert_eq!(weekly.value, dec!(2100));
    }

    #[test]
    fn test_removal_falls_back_to_next_best() {
        let mut records = PersonalRecords::default();

        let mut best = Activity::new(ActivityType::StrengthTraining, day());
        best.calories = Some(800);
        let mut runner_up = Activity::new(ActivityType::Running, day());
        runner_up.calories = Some(650);

        let week = week_with(&[best.clone(), runner_up.clone()]);
        on_activity_added(&best, &week, &mut records);
        on_activity_added(&runner_up, &week, &mut records);
        assert_eq!(
            records.get(RecordMetric::HighestCalories).unwrap().value,
            dec!(800)
        );

        // Deleting the 800-calorie activity must fall back to 650
        on_activity_removed(std::slice::from_ref(&runner_up), &mut records);
        let entry = records.get(RecordMetric::HighestCalories).unwrap();
        assert_eq!(entry.value, dec!(650));
        assert_eq!(entry.activity_type, Some(ActivityType::Running));
    }

    #[test]
    fn test_removal_unsets_record_when_nothing_qualifies() {
        let mut records = PersonalRecords::default();
        let activity = run(dec!(6.2), 50);
        let week = week_with(std::slice::from_ref(&activity));
        on_activity_added(&activity, &week, &mut records);
        assert!(records.get(RecordMetric::LongestDistance).is_some());

        on_activity_removed(&[], &mut records);
        assert!(records.get(RecordMetric::LongestDistance).is_none());
        assert!(records.get(RecordMetric::FastestRunningPace).is_none());
    }

    #[test]
    fn test_removal_leaves_weekly_and_streak_records_alone() {
        let mut records = PersonalRecords::default();
        records.set(
            RecordMetric::MostMilesInWeek,
            Some(RecordEntry {
                value: dec!(40),
                activity_type: Some(ActivityType::Cycle),
            }),
        );
        records.set(
            RecordMetric::LongestMasterStreak,
            Some(RecordEntry {
                value: dec!(7),
                activity_type: None,
            }),
        );

        on_activity_removed(&[], &mut records);

        assert_eq!(
            records.get(RecordMetric::MostMilesInWeek).unwrap().value,
            dec!(40)
        );
        assert_eq!(
            records.get(RecordMetric::LongestMasterStreak).unwrap().value,
            dec!(7)
        );
    }

    #[test]
    fn test_removal_rescan_respects_pace_rules() {
        let mut records = PersonalRecords::default();

        // Remaining collection holds one plausible run and one junk entry
        let good = run(dec!(5), 42); // 8.4 min/mile
        let junk = run(dec!(0.05), 1); // below distance floor

        on_activity_removed(&[good, junk], &mut records);

        assert_eq!(
            records.get(RecordMetric::FastestRunningPace).unwrap().value,
            dec!(8.4)
        );
    }
}
