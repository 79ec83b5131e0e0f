//! Logging setup utilities for the Irori chat application.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose log output is enabled by default.
const WORKSPACE_CRATES: [&str; 3] = ["irori_shared", "irori_server", "irori_client"];

/// Build the default `EnvFilter` directive used when `RUST_LOG` is not set.
///
/// Binary names contain hyphens (e.g. "irori-server") but tracing targets use
/// the crate path, so hyphens are replaced with underscores. A binary named
/// after a workspace crate is not listed twice.
pub fn default_filter_directive(binary_name: &str, default_log_level: &str) -> String {
    let binary_target = binary_name.replace('-', "_");
    let mut targets: Vec<&str> = WORKSPACE_CRATES.to_vec();
    if !targets.contains(&binary_target.as_str()) {
        targets.push(&binary_target);
    }

    targets
        .iter()
        .map(|target| format!("{}={}", target, default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// This function sets up logging for the workspace crates and the binary.
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "irori-server", "irori-client")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use irori_shared::logger::setup_logger;
///
/// setup_logger("irori-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                default_filter_directive(binary_name, default_log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_directive_does_not_repeat_workspace_binary() {
        // テスト項目: ワークスペースのクレート名と同じバイナリは重複して設定されない
        // given (前提条件):
        let binary_name = "irori-server";

        // when (操作):
        let directive = default_filter_directive(binary_name, "debug");

        // then (期待する結果):
        assert_eq!(
            directive,
            "irori_shared=debug,irori_server=debug,irori_client=debug"
        );
    }

    #[test]
    fn test_default_filter_directive_replaces_hyphens() {
        // テスト項目: バイナリ名のハイフンがアンダースコアに置き換えられる
        // given (前提条件):
        let binary_name = "my-chat-tool";

        // when (操作):
        let directive = default_filter_directive(binary_name, "warn");

        // then (期待する結果):
        assert_eq!(
            directive,
            "irori_shared=warn,irori_server=warn,irori_client=warn,my_chat_tool=warn"
        );
        assert!(!directive.contains('-'));
    }
}
