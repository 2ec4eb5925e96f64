//! Line-oriented demo consumer.
//!
//! Each line read from stdin becomes a query; every result transition is
//! printed as it is observed. Two commands are understood:
//!
//! - `:select N` selects the Nth photo (1-based) of the current result and
//!   prints its share text
//! - `:reset` resets the session
//!
//! End of input disposes the session and exits.

use clap::Parser;
use photosearch::{initialize, Config, FetchResult};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Parser)]
#[command(name = "photosearch", version, about = "Search the public photo feed as you type")]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, env = "PHOTOSEARCH_CONFIG")]
    config: Option<PathBuf>,

    /// Feed endpoint, overrides the configuration file.
    #[arg(long)]
    endpoint: Option<String>,

    /// Quiet interval in milliseconds, overrides the configuration file.
    #[arg(long)]
    debounce_ms: Option<u64>,

    /// Tracing filter, e.g. `debug`.
    #[arg(long)]
    trace_level: Option<String>,
}

impl Cli {
    fn into_config(self) -> photosearch::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        if let Some(endpoint) = self.endpoint {
            config.endpoint = endpoint;
        }
        if let Some(debounce_ms) = self.debounce_ms {
            config.debounce_ms = debounce_ms;
        }
        if self.trace_level.is_some() {
            config.trace_level = self.trace_level;
        }
        Ok(config)
    }
}

fn describe(result: &FetchResult) -> String {
    match result {
        FetchResult::Idle => "idle".to_string(),
        FetchResult::Loading => "loading...".to_string(),
        FetchResult::Success(photos) => {
            let mut out = format!("{} photos", photos.len());
            for (i, photo) in photos.iter().enumerate() {
                out.push_str(&format!("\n  {:>2}. {} ({})", i + 1, photo.title, photo.author_name()));
            }
            out
        }
        FetchResult::Failure(message) => message.clone(),
    }
}

#[tokio::main]
async fn main() -> photosearch::Result<()> {
    let config = Cli::parse().into_config()?;
    let session = initialize(&config)?;

    let mut results = session.subscribe_results();
    let printer = tokio::spawn(async move {
        while results.changed().await.is_ok() {
            let line = describe(&results.borrow_and_update());
            println!("{line}");
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if let Some(index) = line.strip_prefix(":select ") {
            let result = session.result();
            let chosen = index
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| result.photos().get(i).cloned());
            match chosen {
                Some(photo) => {
                    session.select_photo(photo);
                    println!("{}", session.selected().photo().share_text());
                }
                None => println!("no such photo"),
            }
        } else if line.trim() == ":reset" {
            session.reset()?;
        } else {
            session.set_query(line)?;
        }
    }

    session.dispose().await;
    printer.abort();
    Ok(())
}
