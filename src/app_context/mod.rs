use crate::cli::Args;
use reqwest::Client;

#[derive(Clone)]
pub struct AppContext {
    pub http_client: Client,
    pub limits: ResourceLimits,
}

/// Upper bounds on what a single request may make the server fetch or allocate.
/// `None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceLimits {
    pub max_source_bytes: Option<u64>,
    pub max_source_pixels: Option<u64>,
    pub max_target_pixels: Option<u64>,
}

impl ResourceLimits {
    pub fn from_args(args: &Args) -> Self {
        Self {
            max_source_bytes: args.max_source_bytes,
            max_source_pixels: args.max_source_pixels,
            max_target_pixels: args.max_target_pixels,
        }
    }
}

pub fn init(args: &Args) -> Result<AppContext, reqwest::Error> {
    let mut client_builder = Client::builder();
    if let Some(timeout) = args.fetch_timeout() {
        client_builder = client_builder.timeout(timeout);
    }
    let app_context = AppContext {
        http_client: client_builder.build()?,
        limits: ResourceLimits::from_args(args),
    };
    tracing::info!(
        fetch_timeout = ?args.fetch_timeout(),
        limits = ?app_context.limits,
        "Initialized application context."
    );
    Ok(app_context)
}
