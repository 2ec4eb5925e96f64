//! Shared test helpers: a scripted fetcher and result waiters.

#![allow(dead_code)]

use async_trait::async_trait;
use photosearch::feed::Fetcher;
use photosearch::{FetchResult, Photo};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::watch;

pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// Fetcher whose latency and outcome are scripted per query.
///
/// Unscripted queries succeed after 50 ms with one photo titled after the query.
/// The query `"boom"` panics.
#[derive(Default)]
pub struct ScriptedFetcher {
    script: Mutex<HashMap<String, (Duration, FetchResult)>>,
    calls: Mutex<Vec<String>>,
    completed: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(&self, query: &str, delay: Duration, result: FetchResult) {
        self.script
            .lock()
            .unwrap()
            .insert(query.to_string(), (delay, result));
    }

    /// Queries whose fetch was started, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Queries whose fetch ran to completion, in order.
    pub fn completed(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }
}

pub fn photo(title: &str) -> Photo {
    Photo {
        link: format!("https://live.staticflickr.com/{title}_m.jpg"),
        title: title.to_string(),
        description: String::new(),
        author: "nobody@flickr.com (\"tester\")".to_string(),
        date_taken: "2025-01-14T10:00:00-08:00".to_string(),
    }
}

pub fn success(title: &str) -> FetchResult {
    FetchResult::Success(vec![photo(title)])
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, query: &str) -> FetchResult {
        self.calls.lock().unwrap().push(query.to_string());

        if query == "boom" {
            panic!("scripted fetch panic");
        }

        let scripted = self.script.lock().unwrap().get(query).cloned();
        let (delay, result) = scripted.unwrap_or_else(|| (Duration::from_millis(50), success(query)));

        tokio::time::sleep(delay).await;
        self.completed.lock().unwrap().push(query.to_string());
        result
    }
}

/// Waits until the result leaves `Idle`/`Loading` and returns it.
pub async fn settled(rx: &mut watch::Receiver<FetchResult>) -> FetchResult {
    rx.wait_for(|r| matches!(r, FetchResult::Success(_) | FetchResult::Failure(_)))
        .await
        .map(|r| r.clone())
        .expect("controller stopped before settling")
}

/// Waits until the result is `Idle`.
pub async fn idle(rx: &mut watch::Receiver<FetchResult>) {
    rx.wait_for(FetchResult::is_idle)
        .await
        .expect("controller stopped before going idle");
}
