//! GIPHY annotator.
//!
//! Looks up one GIF per path node through the GIPHY search API. People are
//! searched by name, works by `"{title} movie"`. Every failure path (budget
//! exhausted, transport error, bad status, empty result) yields no image
//! for that node, nothing more.

use async_trait::async_trait;
use futures::future::join_all;
use serde::Deserialize;
use tracing::debug;

use super::{Annotator, RequestBudget};
use crate::model::{GraphNode, Path};

const GIPHY_BASE_URL: &str = "https://api.giphy.com/v1";

/// Annotator backed by the GIPHY search API, with a request budget.
pub struct GiphyAnnotator {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
    budget: RequestBudget,
}

impl GiphyAnnotator {
    pub fn new(api_key: impl Into<String>, budget: u64) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: GIPHY_BASE_URL.to_string(),
            client: reqwest::Client::new(),
            budget: RequestBudget::new(budget),
        }
    }

    /// Point the annotator at a different base URL (test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Lookups left before the annotator goes quiet.
    pub fn remaining_requests(&self) -> u64 {
        self.budget.remaining()
    }

    async fn first_gif_url(&self, term: &str) -> Option<String> {
        if !self.budget.try_acquire() {
            debug!(term, "gif budget exhausted, skipping lookup");
            return None;
        }

        let response = self
            .client
            .get(format!("{}/gifs/search", self.base_url))
            .query(&[("api_key", self.api_key.as_str()), ("q", term), ("limit", "1")])
            .send()
            .await
            .ok()?;
        if !response.status().is_success() {
            debug!(term, status = %response.status(), "gif lookup returned error status");
            return None;
        }

        let body: GifSearchResponse = response.json().await.ok()?;
        body.data
            .into_iter()
            .next()
            .map(|gif| gif.images.fixed_width.url)
    }

    fn search_term(node: &GraphNode) -> String {
        match node {
            GraphNode::Person(p) => p.name.clone(),
            GraphNode::Work(w) => format!("{} movie", w.title),
        }
    }
}

#[async_trait]
impl Annotator for GiphyAnnotator {
    async fn annotate(&self, path: Path) -> Path {
        let nodes = path.into_nodes();
        let lookups = nodes.iter().map(|node| {
            let term = Self::search_term(node);
            async move { self.first_gif_url(&term).await }
        });
        let urls = join_all(lookups).await;

        let decorated = nodes
            .into_iter()
            .zip(urls)
            .map(|(node, url)| match node {
                GraphNode::Person(mut p) => {
                    p.gif_url = url;
                    GraphNode::Person(p)
                }
                GraphNode::Work(mut w) => {
                    w.gif_url = url;
                    GraphNode::Work(w)
                }
            })
            .collect();

        Path::with_nodes(decorated)
    }
}

// ============================================================================
// Wire records
// ============================================================================

#[derive(Debug, Deserialize)]
struct GifSearchResponse {
    #[serde(default)]
    data: Vec<GifRecord>,
}

#[derive(Debug, Deserialize)]
struct GifRecord {
    images: GifImages,
}

#[derive(Debug, Deserialize)]
struct GifImages {
    fixed_width: GifVariant,
}

#[derive(Debug, Deserialize)]
struct GifVariant {
    url: String,
}

// ============================================================================
// Tests
// ============================================================================
