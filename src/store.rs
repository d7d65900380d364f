//! Activity store and local persistence
//!
//! The engine treats the activity collection as a parameter; this module
//! owns it. `ActivityStore` is the ordered in-memory collection with
//! append/update/remove, and `DataFile` persists the whole user state as a
//! single JSON document in the platform data directory. In-memory state is
//! the source of truth during a session; the CLI saves after each mutation.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{Result, StorageError, StreakrsError};
use crate::models::{Activity, PersonalRecords, Streaks, UserGoals};

/// Ordered collection of a user's logged activities
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityStore {
    activities: Vec<Activity>,
}

impl ActivityStore {
    pub fn new() -> Self {
        ActivityStore::default()
    }

    pub fn from_vec(activities: Vec<Activity>) -> Self {
        ActivityStore { activities }
    }

    /// The full ordered collection
    pub fn all(&self) -> &[Activity] {
        &self.activities
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }

    /// Find an activity by an unambiguous id prefix, for CLI ergonomics
    pub fn find_by_prefix(&self, prefix: &str) -> Option<&Activity> {
        let mut matches = self
            .activities
            .iter()
            .filter(|a| a.id.to_string().starts_with(prefix));
        let first = matches.next()?;
        matches.next().is_none().then_some(first)
    }

    pub fn append(&mut self, activity: Activity) {
        self.activities.push(activity);
    }

    /// Replace an existing activity, matched by id
    pub fn update(&mut self, activity: Activity) -> Result<()> {
        match self.activities.iter_mut().find(|a| a.id == activity.id) {
            Some(slot) => {
                *slot = activity;
                Ok(())
            }
            None => Err(StorageError::ActivityNotFound {
                id: activity.id.to_string(),
            }
            .into()),
        }
    }

    /// Remove by id, returning the removed activity
    pub fn remove(&mut self, id: Uuid) -> Result<Activity> {
        match self.activities.iter().position(|a| a.id == id) {
            Some(index) => Ok(self.activities.remove(index)),
            None => Err(StorageError::ActivityNotFound { id: id.to_string() }.into()),
        }
    }
}

/// Everything persisted for a user, as one document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    pub goals: UserGoals,
    pub streaks: Streaks,
    pub records: PersonalRecords,
    pub activities: ActivityStore,
}

/// JSON-file persistence for [`UserData`]
#[derive(Debug, Clone)]
pub struct DataFile {
    path: PathBuf,
}

impl DataFile {
    pub fn at<P: Into<PathBuf>>(path: P) -> Self {
        DataFile { path: path.into() }
    }

    /// Default location under the platform data directory
    pub fn default_path() -> Result<Self> {
        let base = dirs::data_dir().ok_or_else(|| StorageError::NoDataDir {
            reason: "platform data directory unavailable".to_string(),
        })?;
        Ok(DataFile {
            path: base.join("streakrs").join("data.json"),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load user data, or defaults if no file exists yet
    pub fn load(&self) -> Result<UserData> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no data file, starting fresh");
            return Ok(UserData::default());
        }

        let raw = fs::read_to_string(&self.path)?;
        serde_json::from_str(&raw).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "data file unreadable");
            StreakrsError::Storage(StorageError::Corrupted {
                path: self.path.clone(),
                reason: e.to_string(),
            })
        })
    }

    /// Save atomically: write to a temp file, then rename over the target
    pub fn save(&self, data: &UserData) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(data)?)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), activities = data.activities.len(), "saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityType;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn activity() -> Activity {
        Activity::new(
            ActivityType::Running,
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
        )
    }

    #[test]
    fn test_append_and_get() {
        let mut store = ActivityStore::new();
        let a = activity();
        let id = a.id;
        store.append(a);

        assert_eq!(store.len(), 1);
        assert!(store.get(id).is_some());
    }

    #[test]
    fn test_update_replaces_by_id() {
        let mut store = ActivityStore::new();
        let mut a = activity();
        store.append(a.clone());

        a.calories = Some(400);
        store.update(a.clone()).unwrap();
        assert_eq!(store.get(a.id).unwrap().calories, Some(400));
    }

    #[test]
    fn test_update_missing_is_error() {
        let mut store = ActivityStore::new();
        let err = store.update(activity()).unwrap_err();
        assert!(matches!(
            err,
            StreakrsError::Storage(StorageError::ActivityNotFound { .. })
        ));
    }

    #[test]
    fn test_remove_returns_activity_and_preserves_order() {
        let mut store = ActivityStore::new();
        let first = activity();
        let second = activity();
        let third = activity();
        store.append(first.clone());
        store.append(second.clone());
        store.append(third.clone());

        let removed = store.remove(second.id).unwrap();
        assert_eq!(removed.id, second.id);
        let ids: Vec<_> = store.all().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![first.id, third.id]);
    }

    #[test]
    fn test_find_by_prefix_requires_unambiguous_match() {
        let mut store = ActivityStore::new();
        let a = activity();
        store.append(a.clone());

        let prefix = &a.id.to_string()[..8];
        assert_eq!(store.find_by_prefix(prefix).unwrap().id, a.id);
        assert!(store.find_by_prefix("not-a-prefix").is_none());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let file = DataFile::at(dir.path().join("data.json"));

        let data = file.load().unwrap();
        assert_eq!(data, UserData::default());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let file = DataFile::at(dir.path().join("nested").join("data.json"));

        let mut data = UserData::default();
        data.streaks.master = 3;
        data.activities.append(activity());
        file.save(&data).unwrap();

        let loaded = file.load().unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_corrupted_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = DataFile::at(&path).load().unwrap_err();
        assert!(matches!(
            err,
            StreakrsError::Storage(StorageError::Corrupted { .. })
        ));
    }
}
