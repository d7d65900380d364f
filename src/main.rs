use anyhow::{anyhow, bail, Context, Result};
use chrono::{Days, Local, NaiveDate};
use clap::{Parser, Subcommand};
use colored::*;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;
use tabled::{settings::Style, Table, Tabled};

use streakrs::celebration::Celebration;
use streakrs::config::AppConfig;
use streakrs::engine::Engine;
use streakrs::logging::{init_logging, LogLevel};
use streakrs::models::{Activity, ActivityType, CategoryOverride, RecordMetric};
use streakrs::store::DataFile;
use streakrs::week::week_start;

/// streakrs - Fitness Habit Streak Tracker
///
/// Log workouts and recovery sessions, track weekly goals per category,
/// and keep streaks and personal records.
#[derive(Parser)]
#[command(name = "streakrs")]
#[command(version = "0.1.0")]
#[command(about = "Fitness habit streak and record tracker", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a workout or recovery session
    Log {
        /// Activity type (strength, running, cycling, sports, yoga,
        /// pilates, cold-plunge, sauna, other)
        #[arg(short = 't', long = "type")]
        activity_type: String,

        /// Date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,

        /// Free-form focus area or sport name
        #[arg(short, long)]
        subtype: Option<String>,

        /// Duration in minutes
        #[arg(long)]
        duration: Option<u32>,

        /// Distance in miles
        #[arg(long)]
        distance: Option<String>,

        /// Calories burned
        #[arg(long)]
        calories: Option<u32>,

        /// Average heart rate
        #[arg(long)]
        avg_hr: Option<u16>,

        /// Maximum heart rate
        #[arg(long)]
        max_hr: Option<u16>,

        /// Count toward a specific category (strength, cardio, recovery)
        #[arg(long)]
        count_toward: Option<String>,

        /// Category for "other" activities (strength, cardio, recovery)
        #[arg(long)]
        category: Option<String>,
    },

    /// Remove a logged activity by id (prefix accepted)
    Remove {
        /// Activity id or unambiguous prefix
        id: String,
    },

    /// List recent activities
    List {
        /// Number of recent activities to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Show this week's goal progress
    Progress,

    /// Show personal records
    Records,

    /// Show current streaks
    Streaks,

    /// Show or set weekly goals
    Goals {
        /// Strength sessions per week
        #[arg(long)]
        strength: Option<u32>,

        /// Cardio sessions per week
        #[arg(long)]
        cardio: Option<u32>,

        /// Recovery sessions per week
        #[arg(long)]
        recovery: Option<u32>,
    },

    /// Close out a finished week, resetting streaks for missed goals
    Tick {
        /// Last day of the week to close (YYYY-MM-DD, default last Saturday)
        #[arg(long)]
        week_ending: Option<String>,
    },

    /// Export activities to CSV
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config.clone() {
        Some(path) => path,
        None => AppConfig::default_path()?,
    };
    let mut config = AppConfig::load(&config_path)?;

    let level = LogLevel::from_verbosity(config.logging.level, cli.verbose);
    init_logging(level, config.logging.format)?;

    let data_file = match config.data_file.clone() {
        Some(path) => DataFile::at(path),
        None => DataFile::default_path()?,
    };
    let mut data = data_file.load().map_err(|e| anyhow!(e.user_message()))?;
    // Goals live in config; the data file carries the evolving state
    data.goals = config.goals.clone();

    let engine = Engine::new();
    let today = Local::now().date_naive();

    match cli.command {
        Commands::Log {
            activity_type,
            date,
            subtype,
            duration,
            distance,
            calories,
            avg_hr,
            max_hr,
            count_toward,
            category,
        } => {
            let date = match date {
                Some(raw) => parse_date(&raw)?,
                None => today,
            };
            let mut activity = Activity::new(parse_activity_type(&activity_type)?, date);
            activity.subtype = subtype;
            activity.duration_minutes = duration;
            activity.distance_miles = distance.as_deref().map(parse_miles).transpose()?;
            activity.calories = calories;
            activity.avg_heart_rate = avg_hr;
            activity.max_heart_rate = max_hr;
            activity.count_toward = count_toward.as_deref().map(parse_override).transpose()?;
            activity.custom_category = category.as_deref().map(parse_override).transpose()?;

            let outcome = engine.record_activity(
                data.activities.all(),
                &activity,
                &data.goals,
                &mut data.streaks,
                &mut data.records,
                today,
            );
            data.activities.append(activity);
            data_file.save(&data).map_err(|e| anyhow!(e.user_message()))?;

            println!("{}", "✓ Activity logged".green());
            print_celebration(outcome.celebration);
        }

        Commands::Remove { id } => {
            let found = data
                .activities
                .find_by_prefix(&id)
                .map(|a| a.id)
                .with_context(|| format!("no activity matching id '{id}'"))?;
            let removed = data
                .activities
                .remove(found)
                .map_err(|e| anyhow!(e.user_message()))?;

            engine.remove_activity(data.activities.all(), &mut data.records);
            data_file.save(&data).map_err(|e| anyhow!(e.user_message()))?;

            println!(
                "{} {} on {}",
                "✓ Removed".green(),
                removed.activity_type,
                removed.date
            );
        }

        Commands::List { limit } => {
            let rows: Vec<ActivityRow> = data
                .activities
                .all()
                .iter()
                .rev()
                .take(limit)
                .map(ActivityRow::from)
                .collect();
            if rows.is_empty() {
                println!("No activities logged yet.");
            } else {
                println!("{}", Table::new(rows).with(Style::rounded()));
            }
        }

        Commands::Progress => {
            let progress = engine.weekly_progress(data.activities.all(), &data.goals, today);
            println!(
                "{}",
                format!("Week of {}", progress.window.start).bold()
            );

            let rows = vec![
                ProgressRow::new("Strength", progress.strength),
                ProgressRow::new("Cardio", progress.cardio),
                ProgressRow::new("Recovery", progress.recovery),
            ];
            println!("{}", Table::new(rows).with(Style::rounded()));
            println!(
                "  {} miles, {} calories, {} activities",
                progress.total_miles, progress.total_calories, progress.total_activities
            );

            let bar = format!("{}% of weekly goal", progress.overall_percent);
            if progress.all_goals_met {
                println!("{}", format!("{bar} — all goals met!").green().bold());
            } else {
                println!("{}", bar.blue());
            }
        }

        Commands::Records => {
            let rows: Vec<RecordRow> = RecordMetric::ALL
                .iter()
                .filter_map(|metric| {
                    data.records.get(*metric).map(|entry| RecordRow {
                        record: metric.label().to_string(),
                        value: entry.value.to_string(),
                        achieved_by: entry
                            .activity_type
                            .map(|t| t.to_string())
                            .unwrap_or_else(|| "—".to_string()),
                    })
                })
                .collect();

            if rows.is_empty() {
                println!("No personal records yet. Go log something!");
            } else {
                println!("{}", Table::new(rows).with(Style::rounded()));
            }
        }

        Commands::Streaks => {
            let streaks = &data.streaks;
            println!("{}", "Current streaks".bold());
            println!("  Strength: {} weeks", streaks.strength);
            println!("  Cardio:   {} weeks", streaks.cardio);
            println!("  Recovery: {} weeks", streaks.recovery);
            let master = format!("  Master:   {} weeks", streaks.master);
            if streaks.master > 0 {
                println!("{}", master.green().bold());
            } else {
                println!("{master}");
            }
        }

        Commands::Goals {
            strength,
            cardio,
            recovery,
        } => {
            if strength.is_none() && cardio.is_none() && recovery.is_none() {
                println!("{}", "Weekly goals".bold());
                println!("  Strength: {} sessions", config.goals.strength_sessions);
                println!("  Cardio:   {} sessions", config.goals.cardio_sessions);
                println!("  Recovery: {} sessions", config.goals.recovery_sessions);
            } else {
                if let Some(n) = strength {
                    config.goals.strength_sessions = n;
                }
                if let Some(n) = cardio {
                    config.goals.cardio_sessions = n;
                }
                if let Some(n) = recovery {
                    config.goals.recovery_sessions = n;
                }
                config.save(&config_path)?;
                println!("{}", "✓ Goals updated".green());
            }
        }

        Commands::Tick { week_ending } => {
            let week_ending = match week_ending {
                Some(raw) => parse_date(&raw)?,
                // Last Saturday: the day before this week's Sunday
                None => week_start(today)
                    .checked_sub_days(Days::new(1))
                    .context("date out of range")?,
            };

            engine.close_week(
                data.activities.all(),
                &data.goals,
                &mut data.streaks,
                week_ending,
            );
            data_file.save(&data).map_err(|e| anyhow!(e.user_message()))?;
            println!(
                "{} week ending {}",
                "✓ Closed".green(),
                week_ending
            );
        }

        Commands::Export { output } => {
            let mut writer = csv::Writer::from_path(&output)
                .with_context(|| format!("creating {}", output.display()))?;
            for activity in data.activities.all() {
                writer.serialize(activity)?;
            }
            writer.flush()?;
            println!(
                "{} {} activities to {}",
                "✓ Exported".green(),
                data.activities.len(),
                output.display()
            );
        }
    }

    Ok(())
}

fn print_celebration(celebration: Option<Celebration>) {
    let Some(celebration) = celebration else {
        return;
    };
    let message = celebration.message();
    match celebration {
        Celebration::MasterStreak(_) => println!("{}", format!("🏆 {message}").green().bold()),
        Celebration::CategoryGoals(_) => println!("{}", format!("🎉 {message}").green()),
        Celebration::RecordsBroken(_) => println!("{}", format!("⭐ {message}").yellow()),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{raw}', expected YYYY-MM-DD"))
}

fn parse_miles(raw: &str) -> Result<Decimal> {
    let miles = Decimal::from_str(raw).with_context(|| format!("invalid distance '{raw}'"))?;
    if miles < Decimal::ZERO {
        bail!("distance cannot be negative");
    }
    Ok(miles)
}

fn parse_activity_type(raw: &str) -> Result<ActivityType> {
    match raw.to_lowercase().as_str() {
        "strength" | "strength-training" | "lifting" => Ok(ActivityType::StrengthTraining),
        "running" | "run" => Ok(ActivityType::Running),
        "cycling" | "cycle" | "ride" => Ok(ActivityType::Cycle),
        "sports" | "sport" => Ok(ActivityType::Sports),
        "yoga" => Ok(ActivityType::Yoga),
        "pilates" => Ok(ActivityType::Pilates),
        "cold-plunge" | "coldplunge" | "plunge" => Ok(ActivityType::ColdPlunge),
        "sauna" => Ok(ActivityType::Sauna),
        "other" => Ok(ActivityType::Other),
        _ => bail!("unknown activity type '{raw}'"),
    }
}

fn parse_override(raw: &str) -> Result<CategoryOverride> {
    match raw.to_lowercase().as_str() {
        "strength" => Ok(CategoryOverride::Strength),
        "cardio" => Ok(CategoryOverride::Cardio),
        "recovery" => Ok(CategoryOverride::Recovery),
        _ => bail!("unknown category '{raw}', expected strength, cardio, or recovery"),
    }
}

#[derive(Tabled)]
struct ActivityRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Activity")]
    activity: String,
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "Distance")]
    distance: String,
    #[tabled(rename = "Calories")]
    calories: String,
}

impl From<&Activity> for ActivityRow {
    fn from(activity: &Activity) -> Self {
        ActivityRow {
            id: activity.id.to_string()[..8].to_string(),
            date: activity.date.to_string(),
            activity: match &activity.subtype {
                Some(subtype) => format!("{} ({subtype})", activity.activity_type),
                None => activity.activity_type.to_string(),
            },
            duration: activity
                .duration_minutes
                .map(|d| format!("{d} min"))
                .unwrap_or_else(|| "—".to_string()),
            distance: activity
                .distance_miles
                .map(|d| format!("{d} mi"))
                .unwrap_or_else(|| "—".to_string()),
            calories: activity
                .calories
                .map(|c| c.to_string())
                .unwrap_or_else(|| "—".to_string()),
        }
    }
}

#[derive(Tabled)]
struct ProgressRow {
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Done")]
    completed: u32,
    #[tabled(rename = "Goal")]
    goal: u32,
    #[tabled(rename = "Status")]
    status: &'static str,
}

impl ProgressRow {
    fn new(category: &'static str, progress: streakrs::engine::CategoryProgress) -> Self {
        ProgressRow {
            category,
            completed: progress.completed,
            goal: progress.goal,
            status: if progress.completed >= progress.goal {
                "✓"
            } else {
                " "
            },
        }
    }
}

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "Record")]
    record: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Achieved by")]
    achieved_by: String,
}
