use clap::Parser;
use tokio::net::TcpListener;

mod app_context;
mod cli;
mod http;
mod logging;
mod resize;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();
    logging::init(&args);
    let app_context = app_context::init(&args).expect("Failed to initialize the HTTP client.");
    let router = http::router::new(app_context);

    let listener = TcpListener::bind(args.listen_address)
        .await
        .expect("Failed to bind the listen address.");
    tracing::info!("Listening on {}.", args.listen_address);
    axum::serve(listener, router)
        .await
        .expect("Failed to start the HTTP server.");
}
