//! # SSE Web Service
//!
//! Thin HTTP plumbing around the search: one streaming endpoint that reports
//! progress as it goes, plus an embedded single-page client.
//!
//! ## Protocol
//!
//! `GET /api/find-connection-stream?actor1Name=..&actor2Name=..` returns a
//! Server-Sent Events stream of JSON messages:
//!
//! | type | payload | meaning |
//! |--------|--------------|----------------------------------------|
//! | update | `message` | human-readable search progress |
//! | result | `path` | the connection, as ordered node records |
//! | error | `message` | unknown actor / no connection / failure |
//!
//! The result event's SSE `id` field carries the remaining GIF lookup budget
//! so clients can display how much of the quota is left.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use clap::Parser;
use futures::stream::Stream;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use tracing::{error, info};

use crate::annotate::{Annotator, GiphyAnnotator};
use crate::model::GraphNode;
use crate::progress::ProgressSink;
use crate::provider::TmdbProvider;
use crate::search::SearchConfig;
use crate::{ConnectionFinder, Error};

// ============================================================================
// Configuration
// ============================================================================

/// Server configuration, from flags or environment.
#[derive(Debug, Parser)]
#[command(name = "costar-server", about = "Co-star connection finder over TMDB")]
pub struct ServerConfig {
    /// TMDB API key.
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
    pub tmdb_api_key: String,

    /// GIPHY API key. Without one, paths are served unannotated.
    #[arg(long, env = "GIPHY_API_KEY", hide_env_values = true)]
    pub giphy_api_key: Option<String>,

    /// Address to listen on.
    #[arg(long, env = "COSTAR_BIND", default_value = "127.0.0.1:3000")]
    pub bind: std::net::SocketAddr,

    /// Search levels per side.
    #[arg(long, default_value_t = 2)]
    pub max_levels: usize,

    /// GIF lookups allowed before annotation goes quiet.
    #[arg(long, default_value_t = 100)]
    pub gif_budget: u64,
}

// ============================================================================
// Application state
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    finder: Arc<ConnectionFinder<TmdbProvider>>,
    annotator: Option<Arc<GiphyAnnotator>>,
    max_levels: usize,
}

impl AppState {
    pub fn from_config(config: &ServerConfig) -> crate::Result<Self> {
        if config.tmdb_api_key.trim().is_empty() {
            return Err(Error::Config("TMDB_API_KEY is empty".into()));
        }
        if config.max_levels == 0 {
            return Err(Error::Config("max-levels must be at least 1".into()));
        }

        let provider = TmdbProvider::new(config.tmdb_api_key.clone());
        let search = SearchConfig::default().with_max_levels(config.max_levels);
        let annotator = config
            .giphy_api_key
            .as_ref()
            .map(|key| Arc::new(GiphyAnnotator::new(key.clone(), config.gif_budget)));

        Ok(Self {
            finder: Arc::new(ConnectionFinder::with_config(provider, search)),
            annotator,
            max_levels: config.max_levels,
        })
    }
}

// ============================================================================
// Wire events
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum StreamEvent {
    Update { message: String },
    Result { path: Vec<GraphNode> },
    Error { message: String },
}

impl StreamEvent {
    fn update(message: impl Into<String>) -> Self {
        StreamEvent::Update { message: message.into() }
    }

    fn error(message: impl Into<String>) -> Self {
        StreamEvent::Error { message: message.into() }
    }

    /// Frame as an SSE event. Serializing our own enum cannot fail.
    fn into_sse(self) -> Event {
        Event::default()
            .json_data(&self)
            .unwrap_or_else(|_| Event::default())
    }
}

/// Progress sink that frames status strings as `update` events. Dropping a
/// message on a full channel is fine; blocking the search is not.
struct ChannelSink {
    tx: mpsc::Sender<Event>,
}

impl ProgressSink for ChannelSink {
    fn update(&self, message: &str) {
        let _ = self.tx.try_send(StreamEvent::update(message).into_sse());
    }
}

// ============================================================================
// Routes
// ============================================================================

#[derive(Debug, Deserialize)]
struct ConnectionQuery {
    #[serde(rename = "actor1Name")]
    actor1_name: String,
    #[serde(rename = "actor2Name")]
    actor2_name: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/find-connection-stream", get(find_connection_stream))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(include_str!("index.html"))
}

async fn find_connection_stream(
    State(state): State<AppState>,
    Query(query): Query<ConnectionQuery>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (tx, rx) = mpsc::channel(32);
    tokio::spawn(run_search(state, query, tx));
    Sse::new(ReceiverStream::new(rx).map(Ok)).keep_alive(KeepAlive::default())
}

/// The streaming pipeline: resolve endpoints, search, annotate, emit.
/// Every exit path sends exactly one terminal `result` or `error` event.
async fn run_search(state: AppState, query: ConnectionQuery, tx: mpsc::Sender<Event>) {
    let send = |event: StreamEvent| {
        let tx = tx.clone();
        async move {
            let _ = tx.send(event.into_sse()).await;
        }
    };

    let from = query.actor1_name.trim().to_string();
    let to = query.actor2_name.trim().to_string();
    if from.is_empty() || to.is_empty() {
        send(StreamEvent::error("Both actor names are required.")).await;
        return;
    }

    send(StreamEvent::update("Finding actors...")).await;

    let sink = ChannelSink { tx: tx.clone() };
    let found = state.finder.find_by_name(&from, &to, &sink).await;

    let path = match found {
        Ok(Some(path)) => path,
        Ok(None) => {
            send(StreamEvent::error(format!(
                "No connection found within {} levels.",
                state.max_levels,
            )))
            .await;
            return;
        }
        Err(Error::InvalidInput(message)) => {
            // unknown endpoint: name the one that failed to resolve
            let name = message.strip_prefix("unknown person: ").unwrap_or(&message);
            send(StreamEvent::error(format!(
                "Could not find an actor named \"{name}\". Please check the spelling.",
            )))
            .await;
            return;
        }
        Err(e) => {
            error!(error = %e, "connection search failed");
            send(StreamEvent::error(
                "An internal server error occurred while contacting the movie database.",
            ))
            .await;
            return;
        }
    };

    let (path, remaining) = match &state.annotator {
        Some(annotator) => {
            send(StreamEvent::update("Connection found! Fetching GIFs...")).await;
            let annotated = annotator.annotate(path).await;
            (annotated, Some(annotator.remaining_requests()))
        }
        None => (path, None),
    };

    let mut event = StreamEvent::Result { path: path.into_nodes() }.into_sse();
    if let Some(remaining) = remaining {
        event = event.id(remaining.to_string());
    }
    let _ = tx.send(event).await;
}

// ============================================================================
// Serve
// ============================================================================

/// Bind and serve until ctrl-c.
pub async fn serve(config: ServerConfig) -> crate::Result<()> {
    let state = AppState::from_config(&config)?;
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(addr = %config.bind, "costar server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
