use std::path::PathBuf;

use clap::ValueEnum;

/// How the `url` in an upload response is rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum UrlStyle {
    /// `/uploads/<name>`
    #[default]
    Relative,
    /// `<scheme>://<host>/uploads/<name>`
    Absolute,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub url_style: UrlStyle,
    /// Base used for absolute URLs instead of the request's Host header.
    pub public_url: Option<String>,
    /// Request body cap; `None` leaves uploads unbounded.
    pub max_upload_bytes: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            upload_dir: PathBuf::from("uploads"),
            url_style: UrlStyle::Relative,
            public_url: None,
            max_upload_bytes: None,
        }
    }
}
