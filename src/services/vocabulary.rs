use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::{error::AppResult, services::text::normalize};

/// A canonical genre and the query substrings that select it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenreTriggers {
    pub genre: String,
    pub triggers: Vec<String>,
}

/// Keywords whose presence in a synopsis votes for a cluster
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClusterKeywords {
    pub cluster: u8,
    pub keywords: Vec<String>,
}

/// Bilingual (Portuguese/English) word lists driving query analysis
///
/// Loaded once at startup. A JSON file may replace any subset of the fields;
/// missing fields keep their built-in values. Table order matters where noted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Vocabulary {
    pub stop_words: Vec<String>,
    pub recommendation_terms: Vec<String>,
    pub ranking_terms: Vec<String>,
    /// Terms that request highly rated titles
    pub superlative_terms: Vec<String>,
    /// Endings that turn a signal stem into one of its inflected forms
    /// ("melhor" + "es", "recomend" + "acoes", "rank" + "ing")
    pub signal_suffixes: Vec<String>,
    /// Checked in order; the first genre with a matching trigger wins
    pub genres: Vec<GenreTriggers>,
    /// Genres widened to related ones when filtering
    pub genre_aliases: HashMap<String, Vec<String>>,
    pub cluster_keywords: Vec<ClusterKeywords>,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

impl Default for Vocabulary {
    fn default() -> Self {
        let genre = |name: &str, triggers: &[&str]| GenreTriggers {
            genre: name.to_string(),
            triggers: words(triggers),
        };
        let cluster = |id: u8, keywords: &[&str]| ClusterKeywords {
            cluster: id,
            keywords: words(keywords),
        };

        let mut genre_aliases = HashMap::new();
        genre_aliases.insert(
            "horror".to_string(),
            words(&["horror", "terror", "thriller", "suspense"]),
        );
        genre_aliases.insert(
            "thriller".to_string(),
            words(&["thriller", "suspense", "crime", "drama"]),
        );
        genre_aliases.insert(
            "action".to_string(),
            words(&["action", "acao", "adventure", "aventura"]),
        );

        Self {
            stop_words: words(&[
                "filme", "filmes", "movie", "movies", "film", "films", "sobre", "com", "para",
                "que", "uma", "um", "dos", "das", "por", "the", "and", "about", "with", "for",
                "from", "rating", "nota",
            ]),
            recommendation_terms: words(&["recomend", "recommend", "sugest", "suggest", "indica"]),
            ranking_terms: words(&["melhor", "best", "top", "classific", "rank"]),
            superlative_terms: words(&["melhor", "best", "top", "alto", "high"]),
            signal_suffixes: words(&[
                "", "s", "es", "e", "a", "ar", "r", "do", "ado", "ados", "ada", "adas", "ao",
                "oes", "cao", "coes", "acao", "acoes", "ing", "ed", "er", "est", "ion", "ions",
                "ation", "ations",
            ]),
            genres: vec![
                genre("drama", &["drama", "dramatica", "dramatic"]),
                genre("action", &["acao", "action", "aventura", "adventure"]),
                genre("crime", &["crime", "criminoso", "mafia", "gangster"]),
                genre("comedy", &["comedia", "comedy", "engracado", "humor", "funny"]),
                genre("horror", &["terror", "horror", "assustador", "medo", "scary"]),
                genre("romance", &["romance", "romantico", "amor", "love"]),
                genre("thriller", &["thriller", "suspense", "tensao"]),
                genre("western", &["western", "cowboy", "faroeste"]),
                genre("fantasy", &["fantasia", "fantasy", "magico", "magica"]),
                genre(
                    "sci-fi",
                    &["ficcao", "cientifica", "futuro", "espaco", "scifi", "sci-fi"],
                ),
            ],
            genre_aliases,
            cluster_keywords: vec![
                cluster(0, &["western", "cowboy", "ouro", "recompensa", "deserto"]),
                cluster(1, &["prisao", "amizade", "redencao", "esperanca", "drama"]),
                cluster(2, &["juri", "justica", "evidencia", "ceticismo", "tribunal"]),
                cluster(
                    3,
                    &["crime", "familia", "poder", "violencia", "mafia", "vigilante"],
                ),
                cluster(4, &["aventura", "fantasia", "jornada", "heroismo", "aneis"]),
            ],
        }
    }
}

impl Vocabulary {
    /// Reads a vocabulary override file and normalizes its entries
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let vocabulary: Vocabulary = serde_json::from_str(&raw)?;
        Ok(vocabulary.normalized())
    }

    /// Returns a copy with every entry passed through [`normalize`]
    pub fn normalized(self) -> Self {
        let all = |list: Vec<String>| list.iter().map(|w| normalize(w)).collect::<Vec<_>>();

        Self {
            stop_words: all(self.stop_words),
            recommendation_terms: all(self.recommendation_terms),
            ranking_terms: all(self.ranking_terms),
            superlative_terms: all(self.superlative_terms),
            signal_suffixes: all(self.signal_suffixes),
            genres: self
                .genres
                .into_iter()
                .map(|g| GenreTriggers {
                    genre: normalize(&g.genre),
                    triggers: all(g.triggers),
                })
                .collect(),
            genre_aliases: self
                .genre_aliases
                .into_iter()
                .map(|(genre, aliases)| (normalize(&genre), all(aliases)))
                .collect(),
            cluster_keywords: self
                .cluster_keywords
                .into_iter()
                .map(|c| ClusterKeywords {
                    cluster: c.cluster,
                    keywords: all(c.keywords),
                })
                .collect(),
        }
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.iter().any(|w| w == token)
    }

    /// True when `token` is an intent or rating stem, bare or followed by one
    /// of the inflection suffixes. The analyzer consumes such tokens instead of
    /// treating them as keywords; "highlander" or "topazio" stay keywords.
    pub fn is_signal(&self, token: &str) -> bool {
        self.recommendation_terms
            .iter()
            .chain(&self.ranking_terms)
            .chain(&self.superlative_terms)
            .filter_map(|term| token.strip_prefix(term.as_str()))
            .any(|rest| self.signal_suffixes.iter().any(|suffix| suffix == rest))
    }

    /// Genre names a genre filter accepts, itself included
    pub fn aliases_for(&self, genre: &str) -> Vec<String> {
        self.genre_aliases
            .get(genre)
            .cloned()
            .unwrap_or_else(|| vec![genre.to_string()])
    }
}
