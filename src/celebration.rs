//! Celebration selection
//!
//! Merges streak events and broken records from a single user action into at
//! most one celebration. The whole point is collision avoidance: one action
//! never produces a cascade of overlapping popups.

use serde::{Deserialize, Serialize};

use crate::records::RecordBroken;
use crate::streaks::{MasterCompletion, StreakCompletion, StreakEvents};

/// The one event the presentation layer should surface, if any
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Celebration {
    /// All three category goals just became met: the week-level celebration.
    /// Suppresses every lower-priority event from the same action.
    MasterStreak(MasterCompletion),

    /// One or more category goals just completed, without a full week.
    /// Multiple simultaneous completions ride in a single event.
    CategoryGoals(Vec<StreakCompletion>),

    /// Records broke with no goal transition: a lower-weight notification.
    /// Multiple breaks from one activity combine into one message.
    RecordsBroken(Vec<RecordBroken>),
}

/// Pick the single highest-priority celebration for one user action.
///
/// Priority order: master streak, then category completions, then a
/// combined record notification. Returns None when nothing noteworthy
/// happened.
pub fn decide(
    streak_events: StreakEvents,
    records_broken: Vec<RecordBroken>,
) -> Option<Celebration> {
    if let Some(master) = streak_events.master {
        return Some(Celebration::MasterStreak(master));
    }

    if !streak_events.completions.is_empty() {
        return Some(Celebration::CategoryGoals(streak_events.completions));
    }

    if !records_broken.is_empty() {
        return Some(Celebration::RecordsBroken(records_broken));
    }

    None
}

impl Celebration {
    /// User-facing message for terminal display
    pub fn message(&self) -> String {
        match self {
            Celebration::MasterStreak(master) => {
                let base = format!(
                    "Perfect week! All three goals met — {} week master streak",
                    master.streak
                );
                if master.record_broken {
                    format!("{base}. New all-time best!")
                } else if master.milestone {
                    format!("{base}. That's {} in a row!", master.streak)
                } else {
                    base
                }
            }
            Celebration::CategoryGoals(completions) => completions
                .iter()
                .map(|c| {
                    let base = format!(
                        "{} goal complete — {} week streak",
                        c.category, c.streak
                    );
                    if c.record_broken {
                        format!("{base}. Longest yet!")
                    } else if c.milestone {
                        format!("{base}. Milestone week!")
                    } else {
                        base
                    }
                })
                .collect::<Vec<_>>()
                .join("\n"),
            Celebration::RecordsBroken(broken) => {
                let names: Vec<_> = broken.iter().map(|b| b.metric.label()).collect();
                format!("New personal record: {}", names.join(", "))
            }
        }
    }
}
