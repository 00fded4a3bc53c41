//! Skips wiremock tests where localhost sockets cannot be bound.
//!
//! Shared with the integration tests through `tests/support/mod.rs`.
//! Setting `ADDPROJECT_REQUIRE_SOCKET_TESTS=1` turns a skip into a failure.

use std::net::TcpListener;

use wiremock::MockServer;

const STRICT_ENV: &str = "ADDPROJECT_REQUIRE_SOCKET_TESTS";

fn strict_mode() -> bool {
    std::env::var(STRICT_ENV)
        .is_ok_and(|value| ["1", "true", "yes"].iter().any(|flag| value.eq_ignore_ascii_case(flag)))
}

/// Starts a mock server, or returns `None` when the sandbox forbids binding.
pub async fn start_mock_server_or_skip() -> Option<MockServer> {
    if TcpListener::bind("127.0.0.1:0").is_ok() {
        return Some(MockServer::start().await);
    }
    let message = "cannot bind a localhost socket; wiremock test skipped";
    assert!(!strict_mode(), "{message} ({STRICT_ENV} is set)");
    eprintln!("{message}. Set {STRICT_ENV}=1 to fail instead.");
    None
}
