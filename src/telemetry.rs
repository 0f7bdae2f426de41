//! Subscriber installation. Called once by the binary; library code only emits events.

use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins when set; otherwise `smart_hub=<level>`.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(level)));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn default_directive(level: &str) -> String {
    format!("smart_hub={}", level.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_targets_this_crate() {
        assert_eq!(default_directive("INFO"), "smart_hub=info");
    }
}
