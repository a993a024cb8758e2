use std::time::Duration;

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_SEARCH_LATENCY_MS: u64 = 0;
pub const MAX_SEARCH_LATENCY_MS: u64 = 5_000;

/// Simulated network latency applied to async searches
pub fn search_latency() -> Duration {
    let ms = std::env::var("MARKETPLACE_SEARCH_LATENCY_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEARCH_LATENCY_MS)
        .min(MAX_SEARCH_LATENCY_MS);
    Duration::from_millis(ms)
}

/// Fallback log filter when `RUST_LOG` is unset
pub fn log_level() -> String {
    std::env::var("MARKETPLACE_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}
