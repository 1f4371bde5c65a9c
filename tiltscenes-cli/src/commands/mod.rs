pub mod build_cmd;
pub mod sim_cmd;
pub mod watch_cmd;

/// Seed from the command line, then the config, then the clock.
pub fn resolve_seed(flag: Option<u64>, config: Option<u64>) -> u64 {
    flag.or(config)
        .unwrap_or_else(|| chrono::Utc::now().timestamp_millis() as u64)
}
