use std::{
    fs::OpenOptions,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
    time::Duration,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use product_reports::{
    AppState, CachedDatasetSource, DatasetSource, HttpDatasetSource, PaginationConfig,
    build_router, graceful_shutdown, logging_middleware,
};

/// The public dataset of product transactions.
const DEFAULT_DATASET_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// The REST API server for the product sales dashboard.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// URL of the JSON array of product transactions to report on.
    #[arg(long, default_value = DEFAULT_DATASET_URL)]
    dataset_url: String,

    /// The address to listen on.
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    host: IpAddr,

    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 5000)]
    port: u16,

    /// Reuse a fetched dataset for this many seconds. The dataset is fetched
    /// on every request when not set.
    #[arg(long)]
    cache_ttl_secs: Option<u64>,

    /// The number of transactions per page when a request does not specify `perPage`.
    #[arg(long, default_value_t = 10)]
    default_page_size: u64,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let addr = SocketAddr::new(args.host, args.port);

    let http_source = HttpDatasetSource::new(args.dataset_url);
    tracing::info!("Fetching the dataset from {}", http_source.url());
    let dataset: Arc<dyn DatasetSource> = match args.cache_ttl_secs {
        Some(ttl_secs) => {
            tracing::info!("Caching the dataset for {ttl_secs} seconds");
            Arc::new(CachedDatasetSource::new(
                http_source,
                Duration::from_secs(ttl_secs),
            ))
        }
        None => Arc::new(http_source),
    };

    let pagination_config = PaginationConfig {
        default_page_size: args.default_page_size,
        ..Default::default()
    };
    let state = AppState::new(dataset, pagination_config);

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(state).layer(middleware::from_fn(logging_middleware));
    let router = add_tracing_layer(router);

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .unwrap();
}

fn setup_logging() {
    let stdout_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(stdout_filter);

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file))
        .with_filter(filter::LevelFilter::DEBUG);

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but upstream failures
        // are already logged where they are converted into responses.
        .on_failure(());

    router.layer(tracing_layer)
}
