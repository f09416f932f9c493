pub mod app;
pub mod bucket;
pub mod datekey;
pub mod errors;
pub mod handlers;
pub mod interpolate;
pub mod models;
pub mod series;
pub mod state;
pub mod status;
pub mod storage;
pub mod ui;

pub use app::router;
pub use state::AppState;
pub use status::StatusScale;
pub use storage::{load_data, resolve_data_path};
