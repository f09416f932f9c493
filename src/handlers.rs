use std::collections::{BTreeMap, BTreeSet};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::Local;
use serde::Deserialize;
use tracing::warn;

use crate::bucket::{BucketIndex, Granularity, Record};
use crate::datekey::{DateKey, SourceFormat};
use crate::errors::AppError;
use crate::interpolate::{self, BoundsPolicy, KnownPoint};
use crate::models::{
    ActivitiesResponse, ActivityRecord, AppData, BucketSeries, CreateTaskRequest, HeatmapResponse,
    StatusUpdateRequest, StatusUpdateResponse, Task, TaskStatus, UpdateTaskRequest,
    WeightAddRequest, WeightLog, WeightSample, WeightSeriesResponse,
};
use crate::series::{self, FillPolicy, Orientation, Point, Series};
use crate::state::AppState;
use crate::status::StatusScale;
use crate::storage::persist_data;
use crate::ui::{render_index, DashboardSummary};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let data = state.data.lock().await;
    let summary = DashboardSummary {
        date: today_string(),
        activity_count: data.activities.len(),
        open_tasks: data
            .tasks
            .iter()
            .filter(|task| task.status != TaskStatus::Done)
            .count(),
        latest_weight: data.weight.current.last().map(|sample| sample.weight),
    };
    Html(render_index(&summary))
}

pub async fn get_activities(State(state): State<AppState>) -> Json<ActivitiesResponse> {
    let data = state.data.lock().await;
    Json(ActivitiesResponse {
        activities: data.activities.clone(),
    })
}

pub async fn update_status(
    State(state): State<AppState>,
    Json(payload): Json<StatusUpdateRequest>,
) -> Result<Json<StatusUpdateResponse>, AppError> {
    let key = DateKey::normalize(&payload.date, SourceFormat::Canonical)
        .ok_or_else(|| AppError::bad_request("date must be YYYY-MM-DD"))?;
    if state.scale.value(&payload.status).is_none() {
        return Err(AppError::bad_request(format!(
            "unknown status '{}'",
            payload.status
        )));
    }

    let mut data = state.data.lock().await;
    let previous = data.clone();

    let records = data.activities.entry(payload.activity.clone()).or_default();
    let existing = records
        .iter()
        .position(|record| DateKey::normalize(&record.date, SourceFormat::DayMonthYear) == Some(key));
    match existing {
        Some(index) => records[index].status = payload.status.clone(),
        None => records.push(ActivityRecord {
            date: key.date().format("%d-%m-%Y").to_string(),
            status: payload.status.clone(),
        }),
    }

    commit(&state, &mut data, previous).await?;

    Ok(Json(StatusUpdateResponse {
        activity: payload.activity,
        date: key.to_string(),
        status: payload.status,
    }))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HeatmapQuery {
    pub granularity: Granularity,
    pub orientation: Orientation,
    pub fill: FillPolicy,
}

pub async fn get_heatmap(
    State(state): State<AppState>,
    Query(query): Query<HeatmapQuery>,
) -> Json<HeatmapResponse> {
    let data = state.data.lock().await;
    Json(build_heatmap(&data, &state.scale, &query))
}

pub async fn get_weight(State(state): State<AppState>) -> Json<WeightLog> {
    let data = state.data.lock().await;
    Json(data.weight.clone())
}

pub async fn add_weight(
    State(state): State<AppState>,
    Json(payload): Json<WeightAddRequest>,
) -> Result<Json<WeightSample>, AppError> {
    let key = DateKey::normalize(&payload.date, SourceFormat::Canonical)
        .ok_or_else(|| AppError::bad_request("date must be YYYY-MM-DD"))?;
    if !payload.weight.is_finite() || payload.weight <= 0.0 {
        return Err(AppError::bad_request("weight must be a positive number"));
    }

    let sample = WeightSample {
        date: key.to_string(),
        weight: payload.weight,
    };

    let mut data = state.data.lock().await;
    let previous = data.clone();
    data.weight.add_current(sample.clone());
    commit(&state, &mut data, previous).await?;

    Ok(Json(sample))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WeightSeriesQuery {
    pub bounds: BoundsPolicy,
}

pub async fn get_weight_series(
    State(state): State<AppState>,
    Query(query): Query<WeightSeriesQuery>,
) -> Json<WeightSeriesResponse> {
    let data = state.data.lock().await;
    Json(build_weight_series(&data.weight, query.bounds))
}

pub async fn list_tasks(State(state): State<AppState>) -> Json<Vec<Task>> {
    let data = state.data.lock().await;
    Json(data.tasks.clone())
}

pub async fn create_task(
    State(state): State<AppState>,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), AppError> {
    if payload.title.trim().is_empty() {
        return Err(AppError::bad_request("title must not be empty"));
    }

    let mut data = state.data.lock().await;
    let previous = data.clone();

    let task = Task {
        id: data.claim_task_id(),
        title: payload.title,
        message: payload.message,
        start_date: payload.start_date,
        end_date: payload.end_date,
        status: payload.status.unwrap_or(TaskStatus::Open),
    };
    data.tasks.push(task.clone());

    commit(&state, &mut data, previous).await?;

    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, AppError> {
    let mut data = state.data.lock().await;
    let previous = data.clone();

    let task = data
        .tasks
        .iter_mut()
        .find(|task| task.id == id)
        .ok_or_else(|| AppError::not_found(format!("no task with id {id}")))?;

    if let Some(title) = payload.title {
        task.title = title;
    }
    if let Some(message) = payload.message {
        task.message = message;
    }
    if let Some(start_date) = payload.start_date {
        task.start_date = Some(start_date);
    }
    if let Some(end_date) = payload.end_date {
        task.end_date = Some(end_date);
    }
    if let Some(status) = payload.status {
        task.status = status;
    }
    let updated = task.clone();

    commit(&state, &mut data, previous).await?;

    Ok(Json(updated))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    let mut data = state.data.lock().await;
    let previous = data.clone();

    let before = data.tasks.len();
    data.tasks.retain(|task| task.id != id);
    if data.tasks.len() == before {
        return Err(AppError::not_found(format!("no task with id {id}")));
    }

    commit(&state, &mut data, previous).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Persist the mutated dataset; on failure restore the previous copy so
/// no unconfirmed state survives in memory.
async fn commit(state: &AppState, data: &mut AppData, previous: AppData) -> Result<(), AppError> {
    if let Err(err) = persist_data(&state.data_path, data).await {
        *data = previous;
        return Err(err);
    }
    Ok(())
}

fn today_string() -> String {
    Local::now().date_naive().to_string()
}

pub(crate) fn build_heatmap(
    data: &AppData,
    scale: &StatusScale,
    query: &HeatmapQuery,
) -> HeatmapResponse {
    let activities: Vec<String> = data.activities.keys().cloned().collect();
    let records = flatten(&data.activities);
    let index = BucketIndex::group(records, query.granularity, SourceFormat::DayMonthYear);

    let buckets = index
        .buckets
        .iter()
        .map(|(bucket, contents)| BucketSeries {
            bucket: bucket.clone(),
            dates: contents
                .date_axis()
                .iter()
                .map(ToString::to_string)
                .collect(),
            series: series::build_series(
                contents,
                &activities,
                scale,
                query.fill,
                query.orientation,
            ),
        })
        .collect();

    HeatmapResponse {
        granularity: query.granularity,
        activities,
        buckets,
    }
}

fn flatten(activities: &BTreeMap<String, Vec<ActivityRecord>>) -> Vec<Record<'_>> {
    activities
        .iter()
        .flat_map(|(activity, records)| {
            records.iter().map(move |record| Record {
                activity: activity.as_str(),
                date: record.date.as_str(),
                status: record.status.as_str(),
            })
        })
        .collect()
}

/// Interpolate both weight collections over the union of their dates.
/// Samples with malformed dates are skipped; measured points are keyed
/// by day so the known sequence reaches the interpolator sorted and
/// deduplicated.
pub(crate) fn build_weight_series(weight: &WeightLog, bounds: BoundsPolicy) -> WeightSeriesResponse {
    let mut axis: BTreeSet<DateKey> = BTreeSet::new();
    for sample in weight.ideal.iter().chain(&weight.current) {
        match DateKey::normalize(&sample.date, SourceFormat::Canonical) {
            Some(key) => {
                axis.insert(key);
            }
            None => warn!(date = %sample.date, "skipping weight sample with malformed date"),
        }
    }

    let axis: Vec<DateKey> = axis.into_iter().collect();
    let targets: Vec<i64> = axis.iter().map(DateKey::day_number).collect();

    let series = [("ideal", &weight.ideal), ("current", &weight.current)]
        .into_iter()
        .map(|(name, samples)| {
            let mut measured: BTreeMap<i64, f64> = BTreeMap::new();
            for sample in samples {
                if let Some(key) = DateKey::normalize(&sample.date, SourceFormat::Canonical) {
                    measured.insert(key.day_number(), sample.weight);
                }
            }
            let known: Vec<KnownPoint> = measured
                .into_iter()
                .map(|(t, value)| KnownPoint::new(t, value))
                .collect();

            let filled = interpolate::fill(&targets, &known, bounds);
            Series {
                name: name.to_string(),
                data: axis
                    .iter()
                    .zip(filled)
                    .map(|(key, (_, y))| Point {
                        x: key.to_string(),
                        y,
                    })
                    .collect(),
            }
        })
        .collect();

    WeightSeriesResponse { series }
}
