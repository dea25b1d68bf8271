//! Shared utilities for integration tests.

use std::time::Duration;

use product_api::config::AppConfig;
use product_api::lifecycle::{App, AppError, Shutdown};
use tokio::task::JoinHandle;

/// A service instance running on a fixed local port.
pub struct TestApp {
    pub base_url: String,
    pub addr: String,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), AppError>>,
}

/// Default test configuration: in-memory database on the given port.
pub fn test_config(port: u16) -> AppConfig {
    let mut config = AppConfig::default();
    config.listener.bind_address = format!("127.0.0.1:{port}");
    config.database.path = ":memory:".to_string();
    config
}

/// Start the app and wait until it accepts connections.
pub async fn spawn_app(config: AppConfig) -> TestApp {
    let addr = config.listener.bind_address.clone();
    let base_url = format!("http://{addr}");
    let shutdown = Shutdown::new();
    let app = App::initialize(config).await.expect("initialize app");
    let handle = tokio::spawn(app.run(shutdown.clone()));

    for _ in 0..50 {
        if tokio::net::TcpStream::connect(&addr).await.is_ok() {
            return TestApp {
                base_url,
                addr,
                shutdown,
                handle,
            };
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("server did not start listening on {addr}");
}
