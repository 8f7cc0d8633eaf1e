mod auth;
mod error;
mod handlers;
mod library;
mod media;
mod models;
mod session;
mod state;

use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context as _;
use axum::{
    Router,
    http::header,
    middleware,
    routing::get,
};
use clap::{Parser, Subcommand, ValueEnum};
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};

use crate::auth::{AuthCheck, auth_middleware_fn};
use crate::handlers::{
    dashboard_route, healthz_route, index_route, login_form_route, login_route, logout_route,
    movies_route, play_route, seriald_route, show_route, shows_route, user_route, views_route,
};
use crate::library::{AnyRepository, LibraryCache};
use crate::media::MediaClient;
use crate::models::{LINKS_FILE, Link, load_entries};
use crate::state::AppState;

pub use crate::handlers::Healthz;

pub const VERSION: &str = env!("APP_VERSION");
const SITE_CSS: &str = include_str!("../assets/site.css");

type SingleHeader = [(header::HeaderName, &'static str); 1];
const CSS_HEADER: SingleHeader = [(header::CONTENT_TYPE, "text/css")];

#[derive(Parser, Debug)]
#[command(author, version=VERSION, about, long_about=None)]
pub struct Cli {
    /// Bind host & port
    #[arg(long, short = 'b', env = "BIND", default_value = "127.0.0.1:8080")]
    pub bind: Box<str>,

    /// Debug mode
    #[arg(long, short = 'd', env = "DEBUG")]
    pub debug: bool,

    /// Data directory holding links.json and 2308.json
    #[arg(long, env = "DATA_DIR", default_value = "./data")]
    pub data_dir: PathBuf,

    /// Log format
    #[arg(long, env = "LOG_FORMAT", default_value = "full")]
    pub log_format: LogFormat,

    /// No color <https://no-color.org/>
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Base URL of the media server
    #[arg(long, env = "MEDIA_URL", default_value = "http://127.0.0.1:8096")]
    pub media_url: Box<str>,

    /// Device ID announced to the media server
    #[arg(long, env = "DEVICE_ID", default_value = "homepage")]
    pub device_id: Box<str>,

    /// JSON file keeping the library map across restarts, kept in memory when absent
    #[arg(long, env = "LIBRARY_CACHE")]
    pub library_cache: Option<PathBuf>,

    /// Timeout of each media server request, in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT", default_value_t = 10)]
    pub upstream_timeout: u64,

    /// How session cookies are validated
    #[arg(long, env = "AUTH_CHECK", value_enum, default_value_t = AuthCheck::Liveness)]
    pub auth_check: AuthCheck,

    /// Mark session cookies as Secure
    #[arg(long, env = "SECURE_COOKIES")]
    pub secure_cookies: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Full,
    Compact,
    Pretty,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List links
    #[command(alias = "ls")]
    Links {},
    /// Rebuild the persisted library map
    RefreshLibraries {
        /// Media server username
        #[arg(long, short = 'u')]
        username: String,
    },
}

async fn init_state(cli: &Cli) -> anyhow::Result<Arc<AppState>> {
    let client = MediaClient::new(
        &cli.media_url,
        &cli.device_id,
        Duration::from_secs(cli.upstream_timeout),
    )
    .context("failed to build media client")?;
    let libraries = LibraryCache::open(AnyRepository::from_path(cli.library_cache.clone())).await;
    Ok(Arc::new(AppState {
        auth_check: cli.auth_check,
        client,
        data_dir: cli.data_dir.clone(),
        libraries,
        secure_cookies: cli.secure_cookies,
    }))
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/mediamanager", get(dashboard_route))
        .route("/mediamanager/movies", get(movies_route))
        .route("/mediamanager/shows", get(shows_route))
        .route("/mediamanager/shows/{id}", get(show_route))
        .route("/mediamanager/user/{id}", get(user_route))
        .route("/mediamanager/play/{id}", get(play_route))
        .route("/getviews", get(views_route))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware_fn,
        ))
        .route(
            "/mediamanager/login",
            get(login_form_route).post(login_route),
        )
        .route("/mediamanager/logout", get(logout_route))
        .route("/seriald", get(seriald_route))
        .route("/healthz", get(healthz_route))
        .route("/assets/site.css", get(|| async { (CSS_HEADER, SITE_CSS) }))
        .route("/", get(index_route))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

pub async fn init_route(cli: &Cli) -> anyhow::Result<Router> {
    let state = init_state(cli).await?;
    Ok(router(state))
}

pub async fn run_server(cli: &Cli) -> anyhow::Result<()> {
    let addr: SocketAddr = cli
        .bind
        .parse()
        .with_context(|| format!("invalid host:port pair: {}", cli.bind))?;
    let app = init_route(cli).await?;
    if cli.library_cache.is_none() {
        warn!("no library cache configured, library map is kept in memory");
    }
    let version = VERSION;
    let listener = TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, media_url = %cli.media_url, %version, "server started");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!(%err, "failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
            info!("shutdown the server");
        })
        .await
        .context("server stopped unexpectedly")?;
    Ok(())
}

pub async fn list_links(cli: &Cli) {
    let links: Vec<Link> = load_entries(&cli.data_dir, LINKS_FILE).await;
    for link in &links {
        println!("{}\t{}", link.name, link.url);
    }
    println!("{} link(s)", links.len());
}

pub async fn refresh_libraries(cli: &Cli, username: &str) -> anyhow::Result<()> {
    if cli.library_cache.is_none() {
        warn!("no library cache configured, the refreshed map will not be kept");
    }
    let state = init_state(cli).await?;
    let password = rpassword::prompt_password("Password: ")?;
    let session = state.client.authenticate(username, &password).await?;
    let refreshed = state.libraries.refresh(&state.client, &session).await;
    if let Err(err) = state.client.logout(&session).await {
        warn!(%err, "failed to revoke session");
    }
    let map = refreshed?;
    if map.is_empty() {
        warn!("media server reported no typed libraries");
    }
    for (collection_type, id) in &map.libraries {
        println!("{collection_type}\t{id}");
    }
    println!("{} library(ies)", map.len());
    Ok(())
}
