use std::{env, path::Path, path::PathBuf};

use tokio::fs;
use tracing::error;

use crate::errors::AppError;
use crate::models::AppData;

const DATA_PATH_ENV: &str = "APP_DATA_PATH";
const DEFAULT_DATA_PATH: &str = "data/board.json";

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var(DATA_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from(DEFAULT_DATA_PATH))
}

/// Load the dataset, falling back to an empty one when the file is
/// missing or unreadable. A corrupt file is logged and left alone; the
/// next successful mutation rewrites it.
pub async fn load_data(path: &Path) -> AppData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file: {err}");
                AppData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            AppData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}
