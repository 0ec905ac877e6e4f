use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use futures_util::future::join_all;
use log::{debug, error};
use reqwest::StatusCode;
use tap::TapFallible;

use crate::check::log_result;
use crate::client::Client;

/// Static load parameters, read once at startup.
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Number of virtual users.
    pub vus: usize,
    /// Wall-clock duration of the test.
    pub duration: Duration,
    /// Pause between iterations per virtual user.
    pub pause: Duration,
}

#[derive(Debug, Default, Clone, Copy)]
struct VuStats {
    requests: u64,
    failures: u64,
}

#[derive(Debug)]
pub struct LoadReport {
    pub requests: u64,
    pub failures: u64,
    pub elapsed: Duration,
}

impl LoadReport {
    pub fn all_ok(&self) -> bool {
        self.failures == 0
    }

    pub fn print_summary(&self) {
        println!();
        println!("--------- LOAD TEST SUMMARY ---------");
        println!("requests: {}", self.requests);
        println!("failures: {}", self.failures);
        println!("elapsed: {:.1}s", self.elapsed.as_secs_f64());
        log_result("is status 200", self.all_ok());
    }
}

/// Spawns one task per virtual user, each looping `GET /ping` until the
/// configured duration has elapsed from a shared start instant. Failures,
/// connection-level ones included, are tallied and never abort the run.
pub async fn run(client: &Client, options: LoadOptions) -> LoadReport {
    let stats: Arc<DashMap<usize, VuStats>> = Arc::new(DashMap::new());
    let start = Instant::now();

    let handles: Vec<_> = (0..options.vus)
        .map(|vu| {
            let client = client.clone();
            let stats = Arc::clone(&stats);
            tokio::spawn(async move {
                while start.elapsed() < options.duration {
                    let status = client
                        .ping()
                        .await
                        .tap_err(|e| debug!("vu {}: ping failed: {:?}", vu, e))
                        .ok()
                        .map(|response| response.status());
                    let ok = status == Some(StatusCode::OK);
                    debug!("vu {}: is status 200: {}", vu, ok);
                    {
                        let mut entry = stats.entry(vu).or_default();
                        entry.requests += 1;
                        if !ok {
                            entry.failures += 1;
                        }
                    }
                    tokio::time::sleep(options.pause).await;
                }
            })
        })
        .collect();

    for handle in join_all(handles).await {
        if let Err(e) = handle {
            error!("virtual user task failed: {:?}", e);
        }
    }

    let mut requests = 0;
    let mut failures = 0;
    for entry in stats.iter() {
        requests += entry.requests;
        failures += entry.failures;
    }
    LoadReport {
        requests,
        failures,
        elapsed: start.elapsed(),
    }
}
