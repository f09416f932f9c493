use std::{path::PathBuf, sync::Arc};

use tokio::sync::Mutex;

use crate::models::AppData;
use crate::status::StatusScale;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
    /// Injected so deployments can swap the numeric table without
    /// touching the pipeline.
    pub scale: Arc<StatusScale>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: AppData, scale: StatusScale) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
            scale: Arc::new(scale),
        }
    }
}
