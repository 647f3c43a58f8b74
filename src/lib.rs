pub mod content_type;
pub mod door;
pub mod telemetry;

#[cfg(feature = "web")]
pub mod error;

#[cfg(feature = "web")]
pub mod storage;

#[cfg(feature = "web")]
pub mod web;

pub use content_type::content_type_for;

#[cfg(feature = "web")]
pub use error::{ServerError, UploadError};

#[cfg(feature = "web")]
pub use web::{AppState, ServerConfig, UrlStyle, router, run_server};
