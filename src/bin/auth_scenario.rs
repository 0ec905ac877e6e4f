use eyre::Result;
use log::warn;

use smoke_rust::client::Client;
use smoke_rust::payloads::Credentials;
use smoke_rust::{check, management, scenario};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let mut client = Client::new();
    // one pair per run, reused by the conflict and login cases
    let credentials = Credentials::random();

    let mut report = scenario::run(&mut client, &credentials).await;

    if client.token.is_some() {
        management::run(&client, &credentials, &mut report).await;
    } else {
        warn!("login produced no session token, skipping management scenario");
    }

    check::log_result(
        &format!("{} of {} checks passed", report.passed, report.total()),
        report.all_passed(),
    );
    Ok(())
}
