use std::time::Duration;

use reqwest::Client;

const DISABLE_SYSTEM_PROXY_ENV: &str = "COTHINK_DISABLE_SYSTEM_PROXY";

/// The read timeout bounds how long a single socket read may stall, not the
/// total stream duration.
pub(crate) fn build_http_client(read_timeout: Duration) -> Client {
    let mut builder = Client::builder()
        .read_timeout(read_timeout)
        .connect_timeout(read_timeout);
    if should_disable_system_proxy() {
        builder = builder.no_proxy();
    }
    builder.build().expect("Failed to build reqwest client")
}

fn should_disable_system_proxy() -> bool {
    if std::env::var_os(DISABLE_SYSTEM_PROXY_ENV).is_some() {
        return true;
    }

    cfg!(test)
}
