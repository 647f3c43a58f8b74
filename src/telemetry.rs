use tracing_subscriber::{EnvFilter, fmt};

/// Installs the fmt subscriber, honoring `RUST_LOG` if present.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info,axum::rejection=trace"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}
