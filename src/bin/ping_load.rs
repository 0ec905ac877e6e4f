use std::time::Duration;

use eyre::Result;

use smoke_rust::client::Client;
use smoke_rust::load::{self, LoadOptions};

// number of virtual users and test duration, read once at startup
const OPTIONS: LoadOptions = LoadOptions {
    vus: 10,
    duration: Duration::from_secs(30),
    pause: Duration::from_secs(1),
};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let client = Client::new();
    let report = load::run(&client, OPTIONS).await;
    report.print_summary();
    Ok(())
}
