use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::bucket::Granularity;
use crate::series::Series;

/// One activity outcome as the activity feed carries it. `date` stays in
/// the feed's `DD-MM-YYYY` form; normalization happens in the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub date: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct WeightSample {
    pub date: String,
    pub weight: f64,
}

/// The two named weight collections the trend chart plots.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WeightLog {
    #[serde(default)]
    pub ideal: Vec<WeightSample>,
    #[serde(default)]
    pub current: Vec<WeightSample>,
}

impl WeightLog {
    /// Append-or-replace into `current`, keeping it sorted by date and
    /// deduplicated — the interpolator's precondition.
    pub fn add_current(&mut self, sample: WeightSample) {
        match self.current.iter_mut().find(|s| s.date == sample.date) {
            Some(existing) => existing.weight = sample.weight,
            None => {
                self.current.push(sample);
                self.current.sort_by(|a, b| a.date.cmp(&b.date));
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Open,
    Blocked,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Collapse the status spellings seen in task feeds onto the four
    /// board columns. Anything unrecognized lands in `Open`.
    pub fn normalize(raw: &str) -> TaskStatus {
        match raw.to_ascii_lowercase().as_str() {
            "done" | "completed" => TaskStatus::Done,
            "in_progress" | "in progress" => TaskStatus::InProgress,
            "blocked" | "block" => TaskStatus::Blocked,
            _ => TaskStatus::Open,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Open => "open",
            TaskStatus::Blocked => "blocked",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }
}

impl Serialize for TaskStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(TaskStatus::normalize(&raw))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    pub status: TaskStatus,
}

/// Everything the service persists, one JSON document.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub activities: BTreeMap<String, Vec<ActivityRecord>>,
    #[serde(default)]
    pub weight: WeightLog,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub next_task_id: u64,
}

impl AppData {
    pub fn claim_task_id(&mut self) -> u64 {
        if self.next_task_id == 0 {
            self.next_task_id = 1;
        }
        let id = self.next_task_id;
        self.next_task_id += 1;
        id
    }
}

// --- wire types ---

#[derive(Debug, Serialize)]
pub struct ActivitiesResponse {
    pub activities: BTreeMap<String, Vec<ActivityRecord>>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub activity: String,
    /// Canonical `YYYY-MM-DD`, as the heatmap cells carry it.
    pub date: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct StatusUpdateResponse {
    pub activity: String,
    pub date: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct BucketSeries {
    pub bucket: String,
    pub dates: Vec<String>,
    pub series: Vec<Series>,
}

#[derive(Debug, Serialize)]
pub struct HeatmapResponse {
    pub granularity: Granularity,
    pub activities: Vec<String>,
    pub buckets: Vec<BucketSeries>,
}

#[derive(Debug, Deserialize)]
pub struct WeightAddRequest {
    /// Canonical `YYYY-MM-DD`.
    pub date: String,
    pub weight: f64,
}

#[derive(Debug, Serialize)]
pub struct WeightSeriesResponse {
    pub series: Vec<Series>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_status_normalizes_feed_spellings() {
        assert_eq!(TaskStatus::normalize("Completed"), TaskStatus::Done);
        assert_eq!(TaskStatus::normalize("in progress"), TaskStatus::InProgress);
        assert_eq!(TaskStatus::normalize("block"), TaskStatus::Blocked);
        assert_eq!(TaskStatus::normalize("OPEN"), TaskStatus::Open);
        assert_eq!(TaskStatus::normalize("whatever"), TaskStatus::Open);
    }

    #[test]
    fn task_status_deserializes_through_normalize() {
        let task: Task = serde_json::from_value(serde_json::json!({
            "id": 3,
            "title": "write report",
            "message": "quarterly numbers",
            "startDate": "2025-02-01",
            "endDate": null,
            "status": "completed"
        }))
        .unwrap();
        assert_eq!(task.status, TaskStatus::Done);
        assert_eq!(task.start_date.as_deref(), Some("2025-02-01"));

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["status"], "done");
        assert!(json.get("startDate").is_some());
    }

    #[test]
    fn weight_add_replaces_same_date_sample() {
        let mut log = WeightLog::default();
        log.add_current(WeightSample {
            date: "2025-02-01".to_string(),
            weight: 80.0,
        });
        log.add_current(WeightSample {
            date: "2025-01-01".to_string(),
            weight: 84.0,
        });
        log.add_current(WeightSample {
            date: "2025-02-01".to_string(),
            weight: 79.5,
        });

        assert_eq!(log.current.len(), 2);
        assert_eq!(log.current[0].date, "2025-01-01");
        assert_eq!(log.current[1].weight, 79.5);
    }

    #[test]
    fn claim_task_id_starts_at_one_and_increments() {
        let mut data = AppData::default();
        assert_eq!(data.claim_task_id(), 1);
        assert_eq!(data.claim_task_id(), 2);
    }
}
