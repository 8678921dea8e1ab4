//! Logging setup for the Hiroba binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// Both the workspace crates and the calling binary log at `default_log_level`
/// unless `RUST_LOG` is set.
///
/// # Arguments
///
/// * `binary_name` - The binary's crate name (e.g., "hiroba_server")
/// * `default_log_level` - Level used when `RUST_LOG` is absent (e.g., "debug")
///
/// # Examples
///
/// ```no_run
/// use hiroba_shared::logger::setup_logger;
///
/// setup_logger("hiroba_server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the `EnvFilter` directive used when `RUST_LOG` is not set.
fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    let binary = binary_name.replace('-', "_");
    ["hiroba_shared", "hiroba_server", "hiroba_client"]
        .iter()
        .map(|krate| format!("{}={}", krate, default_log_level))
        .chain(std::iter::once(format!("{}={}", binary, default_log_level)))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_covers_workspace_crates_and_binary() {
        // テスト項目: デフォルトのフィルタがワークスペースの全クレートとバイナリを含む
        // given (前提条件):
        let binary_name = "hiroba-server";

        // when (操作):
        let filter = default_filter(binary_name, "info");

        // then (期待する結果):
        assert!(filter.contains("hiroba_shared=info"));
        assert!(filter.contains("hiroba_server=info"));
        assert!(filter.contains("hiroba_client=info"));
        assert!(!filter.contains("hiroba-server"));
    }
}
