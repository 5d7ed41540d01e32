//! Downloads a few files at once behind the live dashboard.
//!
//! Usage: cargo run --example multi_download [URL...]

use asyncdl::download::DownloadHandler;
use asyncdl::downloader::{FailurePolicy, MultiDownloaderBuilder};
use asyncdl::progress::AnsiTerminal;
use color_eyre::{eyre::bail, Result};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Draw on whichever stream is still attached to the terminal.
    let terminal = [AnsiTerminal::stderr(), AnsiTerminal::stdout()]
        .into_iter()
        .find(AnsiTerminal::is_term);
    let Some(terminal) = terminal else {
        bail!("the dashboard needs a terminal on stderr or stdout");
    };

    let mut urls: Vec<String> = std::env::args().skip(1).collect();
    if urls.is_empty() {
        urls = (1..=4)
            .map(|i| format!("https://httpbin.org/bytes/{}?seed={}", 64_000 * i, i))
            .collect();
    }

    let directory = PathBuf::from("downloads");
    let mut handlers = Vec::with_capacity(urls.len());
    for (i, url) in urls.iter().enumerate() {
        let path = directory.join(format!("file-{}.bin", i));
        handlers.push(DownloadHandler::create(url, path).await?);
    }

    let downloader = MultiDownloaderBuilder::new()
        .chunk_size(4096)
        .failure_policy(FailurePolicy::Continue)
        .build();
    downloader.multi_download_to(&mut handlers, terminal).await?;

    println!("Downloaded {} files into {:?}", handlers.len(), directory);
    Ok(())
}
