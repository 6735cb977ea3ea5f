use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use crate::{error::AppResult, models::Movie};

const BUILTIN_CATALOG: &str = include_str!("../../data/movies.json");

/// Read-only movie catalog shared by every request
///
/// Built once at startup; cloning only bumps a reference count.
#[derive(Debug, Clone)]
pub struct Catalog {
    movies: Arc<[Movie]>,
}

impl Catalog {
    /// Builds a catalog, keeping the first record for each id
    pub fn new(movies: Vec<Movie>) -> Self {
        let mut seen = HashSet::new();
        let movies: Vec<Movie> = movies
            .into_iter()
            .filter(|movie| {
                let fresh = seen.insert(movie.id.clone());
                if !fresh {
                    tracing::warn!(id = %movie.id, title = %movie.title_en, "Dropping duplicate catalog entry");
                }
                fresh
            })
            .collect();

        Self {
            movies: movies.into(),
        }
    }

    /// The ten-title catalog bundled with the binary
    pub fn builtin() -> AppResult<Self> {
        let movies: Vec<Movie> = serde_json::from_str(BUILTIN_CATALOG)?;
        Ok(Self::new(movies))
    }

    /// Reads a JSON array of movies from disk
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let movies: Vec<Movie> = serde_json::from_str(&raw)?;
        Ok(Self::new(movies))
    }

    /// Loads the configured catalog file, falling back to the built-in one
    /// when it is unset, unreadable or malformed
    pub fn load(path: Option<&str>) -> AppResult<Self> {
        let Some(path) = path else {
            return Self::builtin();
        };

        match Self::from_file(path) {
            Ok(catalog) => {
                tracing::info!(path, movies = catalog.len(), "Loaded movie catalog");
                Ok(catalog)
            }
            Err(e) => {
                tracing::warn!(path, error = %e, "Failed to load catalog file, using built-in catalog");
                Self::builtin()
            }
        }
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Catalog entries tagged with `cluster`, in catalog order
    pub fn in_cluster(&self, cluster: u8) -> impl Iterator<Item = &Movie> {
        self.movies
            .iter()
            .filter(move |movie| movie.cluster == Some(cluster))
    }
}
