use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Activity types supported by the habit tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityType {
    StrengthTraining,
    Running,
    Cycle,
    Sports,
    Yoga,
    Pilates,
    ColdPlunge,
    Sauna,
    Other,
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityType::StrengthTraining => write!(f, "Strength Training"),
            ActivityType::Running => write!(f, "Running"),
            ActivityType::Cycle => write!(f, "Cycling"),
            ActivityType::Sports => write!(f, "Sports"),
            ActivityType::Yoga => write!(f, "Yoga"),
            ActivityType::Pilates => write!(f, "Pilates"),
            ActivityType::ColdPlunge => write!(f, "Cold Plunge"),
            ActivityType::Sauna => write!(f, "Sauna"),
            ActivityType::Other => write!(f, "Other"),
        }
    }
}

/// Goal categories an activity can count toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoalCategory {
    Strength,
    Cardio,
    Recovery,
    /// Uncategorized activities; never count toward any weekly goal
    Other,
}

impl fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalCategory::Strength => write!(f, "Strength"),
            GoalCategory::Cardio => write!(f, "Cardio"),
            GoalCategory::Recovery => write!(f, "Recovery"),
            GoalCategory::Other => write!(f, "Other"),
        }
    }
}

/// Explicit per-activity category override
///
/// Unlike `GoalCategory` this has no `Other` arm: an override always points
/// the activity at one of the three goal buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryOverride {
    Strength,
    Cardio,
    Recovery,
}

impl From<CategoryOverride> for GoalCategory {
    fn from(value: CategoryOverride) -> Self {
        match value {
            CategoryOverride::Strength => GoalCategory::Strength,
            CategoryOverride::Cardio => GoalCategory::Cardio,
            CategoryOverride::Recovery => GoalCategory::Recovery,
        }
    }
}

/// A single logged training or recovery session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique identifier, stable for the activity's lifetime
    pub id: Uuid,

    /// Activity type
    pub activity_type: ActivityType,

    /// Free-form descriptive string (focus area, sport name); not used in
    /// category logic
    pub subtype: Option<String>,

    /// Explicit category override; takes precedence over the type default
    pub count_toward: Option<CategoryOverride>,

    /// Category override specifically for `activity_type = Other`
    pub custom_category: Option<CategoryOverride>,

    /// Calendar date in the user's local zone (no time component)
    pub date: NaiveDate,

    /// Duration in minutes
    pub duration_minutes: Option<u32>,

    /// Distance in miles
    pub distance_miles: Option<Decimal>,

    /// Calories burned
    pub calories: Option<u32>,

    /// Average heart rate in beats per minute
    pub avg_heart_rate: Option<u16>,

    /// Maximum heart rate in beats per minute
    pub max_heart_rate: Option<u16>,
}

impl Activity {
    /// Create a minimal activity of the given type on the given date
    pub fn new(activity_type: ActivityType, date: NaiveDate) -> Self {
        Activity {
            id: Uuid::new_v4(),
            activity_type,
            subtype: None,
            count_toward: None,
            custom_category: None,
            date,
            duration_minutes: None,
            distance_miles: None,
            calories: None,
            avg_heart_rate: None,
            max_heart_rate: None,
        }
    }
}

/// Weekly targets configured by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGoals {
    /// Strength sessions per week
    pub strength_sessions: u32,

    /// Cardio sessions per week
    pub cardio_sessions: u32,

    /// Recovery sessions per week
    pub recovery_sessions: u32,

    /// Daily step target (display only; steps come from the device layer)
    pub daily_step_target: u32,

    /// Calorie target (single configured number)
    pub calorie_target: u32,
}

impl Default for UserGoals {
    fn default() -> Self {
        UserGoals {
            strength_sessions: 3,
            cardio_sessions: 3,
            recovery_sessions: 2,
            daily_step_target: 8000,
            calorie_target: 500,
        }
    }
}

impl UserGoals {
    /// Weekly session target for a goal category (`Other` has no target)
    pub fn target_for(&self, category: GoalCategory) -> u32 {
        match category {
            GoalCategory::Strength => self.strength_sessions,
            GoalCategory::Cardio => self.cardio_sessions,
            GoalCategory::Recovery => self.recovery_sessions,
            GoalCategory::Other => 0,
        }
    }
}

/// Consecutive-week goal streak counters
///
/// Mutated only by the streak tracker; the master counter advances only when
/// all three category goals are met in the same week.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streaks {
    pub strength: u32,
    pub cardio: u32,
    pub recovery: u32,
    pub master: u32,
}

impl Streaks {
    /// Current streak for a goal category (`Other` carries no streak)
    pub fn for_category(&self, category: GoalCategory) -> u32 {
        match category {
            GoalCategory::Strength => self.strength,
            GoalCategory::Cardio => self.cardio,
            GoalCategory::Recovery => self.recovery,
            GoalCategory::Other => 0,
        }
    }
}

/// Which direction counts as an improvement for a record metric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordDirection {
    HigherIsBetter,
    LowerIsBetter,
}

/// The fixed set of tracked personal-record metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordMetric {
    // Single-activity metrics
    HighestCalories,
    LongestStrengthDuration,
    LongestCardioDuration,
    LongestDistance,
    FastestRunningPace,
    FastestCyclingPace,
    // Weekly-aggregate metrics
    MostWorkoutsInWeek,
    MostCaloriesInWeek,
    MostMilesInWeek,
    // Streak-derived metrics
    LongestMasterStreak,
    LongestStrengthStreak,
    LongestCardioStreak,
    LongestRecoveryStreak,
}

impl RecordMetric {
    pub const ALL: [RecordMetric; 13] = [
        RecordMetric::HighestCalories,
        RecordMetric::LongestStrengthDuration,
        RecordMetric::LongestCardioDuration,
        RecordMetric::LongestDistance,
        RecordMetric::FastestRunningPace,
        RecordMetric::FastestCyclingPace,
        RecordMetric::MostWorkoutsInWeek,
        RecordMetric::MostCaloriesInWeek,
        RecordMetric::MostMilesInWeek,
        RecordMetric::LongestMasterStreak,
        RecordMetric::LongestStrengthStreak,
        RecordMetric::LongestCardioStreak,
        RecordMetric::LongestRecoveryStreak,
    ];

    /// Metrics evaluated against a single activity's own fields
    pub const SINGLE_ACTIVITY: [RecordMetric; 6] = [
        RecordMetric::HighestCalories,
        RecordMetric::LongestStrengthDuration,
        RecordMetric::LongestCardioDuration,
        RecordMetric::LongestDistance,
        RecordMetric::FastestRunningPace,
        RecordMetric::FastestCyclingPace,
    ];

    /// Every metric has a fixed "better" direction; only the two pace
    /// metrics are lower-is-better
    pub fn direction(&self) -> RecordDirection {
        match self {
            RecordMetric::FastestRunningPace | RecordMetric::FastestCyclingPace => {
                RecordDirection::LowerIsBetter
            }
            _ => RecordDirection::HigherIsBetter,
        }
    }

    /// Human-readable metric name for display
    pub fn label(&self) -> &'static str {
        match self {
            RecordMetric::HighestCalories => "Highest calories",
            RecordMetric::LongestStrengthDuration => "Longest strength workout",
            RecordMetric::LongestCardioDuration => "Longest cardio workout",
            RecordMetric::LongestDistance => "Longest distance",
            RecordMetric::FastestRunningPace => "Fastest running pace",
            RecordMetric::FastestCyclingPace => "Fastest cycling pace",
            RecordMetric::MostWorkoutsInWeek => "Most workouts in a week",
            RecordMetric::MostCaloriesInWeek => "Most calories in a week",
            RecordMetric::MostMilesInWeek => "Most miles in a week",
            RecordMetric::LongestMasterStreak => "Longest master streak",
            RecordMetric::LongestStrengthStreak => "Longest strength streak",
            RecordMetric::LongestCardioStreak => "Longest cardio streak",
            RecordMetric::LongestRecoveryStreak => "Longest recovery streak",
        }
    }
}

/// A personal-record table entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordEntry {
    /// Best value achieved so far, in the metric's natural unit
    pub value: Decimal,

    /// Type of the activity that achieved it; None for streak-derived
    /// records, which no single activity owns
    pub activity_type: Option<ActivityType>,
}

/// All-time personal records, persisted with the user profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalRecords {
    pub highest_calories: Option<RecordEntry>,
    pub longest_strength_duration: Option<RecordEntry>,
    pub longest_cardio_duration: Option<RecordEntry>,
    pub longest_distance: Option<RecordEntry>,
    pub fastest_running_pace: Option<RecordEntry>,
    pub fastest_cycling_pace: Option<RecordEntry>,
    pub most_workouts_in_week: Option<RecordEntry>,
    pub most_calories_in_week: Option<RecordEntry>,
    pub most_miles_in_week: Option<RecordEntry>,
    pub longest_master_streak: Option<RecordEntry>,
    pub longest_strength_streak: Option<RecordEntry>,
    pub longest_cardio_streak: Option<RecordEntry>,
    pub longest_recovery_streak: Option<RecordEntry>,
}

impl PersonalRecords {
    pub fn get(&self, metric: RecordMetric) -> Option<&RecordEntry> {
        match metric {
            RecordMetric::HighestCalories => self.highest_calories.as_ref(),
            RecordMetric::LongestStrengthDuration => self.longest_strength_duration.as_ref(),
            RecordMetric::LongestCardioDuration => self.longest_cardio_duration.as_ref(),
            RecordMetric::LongestDistance => self.longest_distance.as_ref(),
            RecordMetric::FastestRunningPace => self.fastest_running_pace.as_ref(),
            RecordMetric::FastestCyclingPace => self.fastest_cycling_pace.as_ref(),
            RecordMetric::MostWorkoutsInWeek => self.most_workouts_in_week.as_ref(),
            RecordMetric::MostCaloriesInWeek => self.most_calories_in_week.as_ref(),
            RecordMetric::MostMilesInWeek => self.most_miles_in_week.as_ref(),
            RecordMetric::LongestMasterStreak => self.longest_master_streak.as_ref(),
            RecordMetric::LongestStrengthStreak => self.longest_strength_streak.as_ref(),
            RecordMetric::LongestCardioStreak => self.longest_cardio_streak.as_ref(),
            RecordMetric::LongestRecoveryStreak => self.longest_recovery_streak.as_ref(),
        }
    }

    pub fn set(&mut self, metric: RecordMetric, entry: Option<RecordEntry>) {
        let slot = match metric {
            RecordMetric::HighestCalories => &mut self.highest_calories,
            RecordMetric::LongestStrengthDuration => &mut self.longest_strength_duration,
            RecordMetric::LongestCardioDuration => &mut self.longest_cardio_duration,
            RecordMetric::LongestDistance => &mut self.longest_distance,
            RecordMetric::FastestRunningPace => &mut self.fastest_running_pace,
            RecordMetric::FastestCyclingPace => &mut self.fastest_cycling_pace,
            RecordMetric::MostWorkoutsInWeek => &mut self.most_workouts_in_week,
            RecordMetric::MostCaloriesInWeek => &mut self.most_calories_in_week,
            RecordMetric::MostMilesInWeek => &mut self.most_miles_in_week,
            RecordMetric::LongestMasterStreak => &mut self.longest_master_streak,
            RecordMetric::LongestStrengthStreak => &mut self.longest_strength_streak,
            RecordMetric::LongestCardioStreak => &mut self.longest_cardio_streak,
            RecordMetric::LongestRecoveryStreak => &mut self.longest_recovery_streak,
        };
        *slot = entry;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_activity_type_serialization() {
        let activity_type = ActivityType::ColdPlunge;
        let json = serde_json::to_string(&activity_type).unwrap();
        assert_eq!(json, "\"ColdPlunge\"");

        let deserialized: ActivityType = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, ActivityType::ColdPlunge);
    }

    #[test]
    fn test_category_override_lowercase_serialization() {
        let json = serde_json::to_string(&CategoryOverride::Recovery).unwrap();
        assert_eq!(json, "\"recovery\"");

        let deserialized: CategoryOverride = serde_json::from_str("\"cardio\"").unwrap();
        assert_eq!(deserialized, CategoryOverride::Cardio);
    }

    #[test]
    fn test_activity_creation() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let activity = Activity::new(ActivityType::Running, date);

        assert_eq!(activity.activity_type, ActivityType::Running);
        assert_eq!(activity.date, date);
        assert!(activity.duration_minutes.is_none());
        assert!(activity.count_toward.is_none());
    }

    #[test]
    fn test_activity_serialization_round_trip() {
        let mut activity = Activity::new(
            ActivityType::Other,
            NaiveDate::from_ymd_opt(2025, 3, 12).unwrap(),
        );
        activity.subtype = Some("rock climbing".to_string());
        activity.custom_category = Some(CategoryOverride::Strength);
        activity.duration_minutes = Some(75);
        activity.calories = Some(410);

        let json = serde_json::to_string(&activity).unwrap();
        let deserialized: Activity = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, activity);
    }

    #[test]
    fn test_user_goals_target_for() {
        let goals = UserGoals {
            strength_sessions: 4,
            cardio_sessions: 3,
            recovery_sessions: 2,
            daily_step_target: 10000,
            calorie_target: 600,
        };

        assert_eq!(goals.target_for(GoalCategory::Strength), 4);
        assert_eq!(goals.target_for(GoalCategory::Cardio), 3);
        assert_eq!(goals.target_for(GoalCategory::Recovery), 2);
        assert_eq!(goals.target_for(GoalCategory::Other), 0);
    }

    #[test]
    fn test_streaks_default_zero() {
        let streaks = Streaks::default();
        assert_eq!(streaks.strength, 0);
        assert_eq!(streaks.cardio, 0);
        assert_eq!(streaks.recovery, 0);
        assert_eq!(streaks.master, 0);
    }

    #[test]
    fn test_record_metric_directions() {
        for metric in RecordMetric::ALL {
            let expected = match metric {
                RecordMetric::FastestRunningPace | RecordMetric::FastestCyclingPace => {
                    RecordDirection::LowerIsBetter
                }
                _ => RecordDirection::HigherIsBetter,
            };
            assert_eq!(metric.direction(), expected);
        }
    }

    #[test]
    fn test_personal_records_get_set() {
        let mut records = PersonalRecords::default();
        assert!(records.get(RecordMetric::LongestDistance).is_none());

        records.set(
            RecordMetric::LongestDistance,
            Some(RecordEntry {
                value: dec!(13.1),
                activity_type: Some(ActivityType::Running),
            }),
        );

        let entry = records.get(RecordMetric::LongestDistance).unwrap();
        assert_eq!(entry.value, dec!(13.1));
        assert_eq!(entry.activity_type, Some(ActivityType::Running));

        records.set(RecordMetric::LongestDistance, None);
        assert!(records.get(RecordMetric::LongestDistance).is_none());
    }

    #[test]
    fn test_personal_records_serialization() {
        let mut records = PersonalRecords::default();
        records.set(
            RecordMetric::LongestMasterStreak,
            Some(RecordEntry {
                value: dec!(6),
                activity_type: None,
            }),
        );

        let json = serde_json::to_string(&records).unwrap();
        let deserialized: PersonalRecords = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, records);
    }
}
