//! TMDB graph provider.
//!
//! Discovers edges through The Movie Database v3 REST API:
//! `/search/person`, `/person/{id}/movie_credits`, `/movie/{id}/credits`.
//! All transport and provider-side failures map to `Error::Lookup`.

use async_trait::async_trait;
use serde::Deserialize;

use super::GraphProvider;
use crate::model::{Person, PersonId, Work, WorkId};
use crate::{Error, Result};

const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Graph provider backed by the TMDB REST API.
pub struct TmdbProvider {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl TmdbProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: TMDB_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Point the provider at a different base URL (test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        entity: &str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .send()
            .await
            .map_err(|e| Error::lookup(entity, e))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Error::Lookup {
                entity: entity.to_string(),
                message: format!("TMDB returned {status}"),
            });
        }

        response.json::<T>().await.map_err(|e| Error::lookup(entity, e))
    }
}

#[async_trait]
impl GraphProvider for TmdbProvider {
    async fn find_person(&self, name: &str) -> Result<Option<Person>> {
        let found: SearchResponse = self
            .get_json(&format!("person search '{name}'"), "/search/person", &[("query", name)])
            .await?;
        Ok(found.results.into_iter().next().map(PersonRecord::into_person))
    }

    async fn works_for(&self, person: PersonId) -> Result<Vec<Work>> {
        let credits: MovieCredits = self
            .get_json(
                &format!("filmography of person {person}"),
                &format!("/person/{person}/movie_credits"),
                &[],
            )
            .await?;
        Ok(credits.cast.into_iter().map(WorkRecord::into_work).collect())
    }

    async fn cast_of(&self, work: WorkId) -> Result<Vec<Person>> {
        let credits: CastCredits = self
            .get_json(
                &format!("cast of movie {work}"),
                &format!("/movie/{work}/credits"),
                &[],
            )
            .await?;
        Ok(credits.cast.into_iter().map(PersonRecord::into_person).collect())
    }
}

// ============================================================================
// Wire records
// ============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<PersonRecord>,
}

#[derive(Debug, Deserialize)]
struct MovieCredits {
    #[serde(default)]
    cast: Vec<WorkRecord>,
}

#[derive(Debug, Deserialize)]
struct CastCredits {
    #[serde(default)]
    cast: Vec<PersonRecord>,
}

#[derive(Debug, Deserialize)]
struct PersonRecord {
    id: u64,
    name: String,
    #[serde(default)]
    known_for_department: Option<String>,
}

impl PersonRecord {
    fn into_person(self) -> Person {
        let mut person = Person::new(PersonId(self.id), self.name);
        person.department = self.known_for_department;
        person
    }
}

#[derive(Debug, Deserialize)]
struct WorkRecord {
    id: u64,
    title: String,
}

impl WorkRecord {
    fn into_work(self) -> Work {
        Work::new(WorkId(self.id), self.title)
    }
}

// ============================================================================
// Tests
// ============================================================================
