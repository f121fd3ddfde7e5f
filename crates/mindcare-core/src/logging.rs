//! Tracing setup.

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber.
///
/// `RUST_LOG` takes precedence over `filter`. Returns `false` if a subscriber
/// was already installed, so calling this more than once is harmless.
pub fn init(filter: &str) -> bool {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(
            "{} core v{} logging initialised",
            crate::config::APP_NAME,
            crate::config::APP_VERSION
        );
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init("mindcare_core=debug");
        assert!(!init("mindcare_core=debug"));
    }
}
