use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;
use tracing_subscriber::filter::Directive;

#[derive(Debug, Parser)]
#[command(about = "Fetches remote images and serves them resized as JPEG.")]
pub struct Args {
    #[arg(long)]
    #[arg(default_value = "0.0.0.0:1323")]
    pub listen_address: SocketAddr,
    /// Total time allowed for fetching a source image. Unlimited when omitted.
    #[arg(long)]
    pub fetch_timeout_secs: Option<u64>,
    /// Largest accepted source image body, in bytes.
    #[arg(long)]
    pub max_source_bytes: Option<u64>,
    /// Largest accepted source image, in pixels (width times height).
    #[arg(long)]
    pub max_source_pixels: Option<u64>,
    /// Largest accepted output image, in pixels (width times height).
    #[arg(long)]
    pub max_target_pixels: Option<u64>,
    #[arg(long)]
    #[arg(default_value = "resize_server=info")]
    pub log_directive: Directive,
}

impl Args {
    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs.map(Duration::from_secs)
    }
}
