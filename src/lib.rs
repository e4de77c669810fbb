//! aidux: clinical information completeness and prioritization engine.
//!
//! Reads a free-text clinical narrative, finds symptom patterns from a
//! taxonomy, scores how completely each was characterized, ranks the missing
//! information into follow-up questions and flags red-flag phrase
//! combinations. It never produces a diagnosis.

pub mod clinical;
pub mod config;
pub mod models;

use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// [`config::default_log_filter`]. Call once from the host binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}
