use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A movie as returned by list-shaped endpoints (favorite search, genre
/// browsing): title, poster path fragment, TMDB numeric id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    pub poster_path: String,
}

/// Full detail record rendered on the movie screen and in search results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    pub poster_path: String,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// Ranked entry from the trending / top-rated rails.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedMovie {
    pub movie_id: u64,
    pub title: String,
    pub poster_path: String,
}

/// Now-playing entry for the landing carousel (backdrop, not poster).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LatestRelease {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

/// A favorite movie as accumulated by the setup wizard and stored on the
/// account. The wire field is `poster`, not `poster_path`: the stored shape
/// differs from the search shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteMovie {
    pub id: u64,
    pub title: String,
    pub poster: String,
}

impl From<MovieSummary> for FavoriteMovie {
    fn from(movie: MovieSummary) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            poster: movie.poster_path,
        }
    }
}

/// One row of the user's watchlist. `genres` is the comma-joined display
/// string the watchlist endpoints round-trip verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchlistEntry {
    pub id: u64,
    pub title: String,
    pub poster_path: String,
    #[serde(default)]
    pub genres: String,
}

/// A single comment on a movie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub username: String,
    pub comment_text: String,
    pub created_at: String,
}

/// Comment list for a movie plus the viewing user's name (used to stamp
/// optimistic appends).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CommentThread {
    pub user: String,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// The viewer's own rating and the aggregate, both on a 0-10 scale.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct RatingSummary {
    pub rating: f64,
    pub avg_rating: f64,
}

/// Result of the session check gating protected views.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SessionInfo {
    #[serde(rename = "loggedIn")]
    pub logged_in: bool,
    #[serde(default)]
    pub user: Option<String>,
}

/// Genre catalog: display name to TMDB numeric id, plus the signed-in user
/// when a session cookie accompanied the request.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GenreCatalog {
    pub genres: BTreeMap<String, u64>,
    #[serde(default)]
    pub user: Option<String>,
}

/// Stored profile selections: favorite genres and favorite movies.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub genres: Vec<(String, u64)>,
    pub movies: Vec<FavoriteMovie>,
}

/// Aggregate rating stats shown on the profile screen.
#[derive(Debug, Clone, PartialEq)]
pub struct UserStats {
    pub rated_count: u64,
    pub top_title: String,
    pub top_rating: f64,
}

/// Binary handle for a profile-picture upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadAsset {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Accumulated wizard state handed to the transport for the terminal action.
/// The transport picks the endpoint variant: multipart completion when an
/// asset is attached, query-string submission otherwise, with
/// `existing_account` selecting the edit marker over credential material.
#[derive(Debug, Clone, PartialEq)]
pub struct SetupSubmission {
    pub username: String,
    pub password: Option<String>,
    pub existing_account: bool,
    pub genres: Vec<(String, u64)>,
    pub movies: Vec<FavoriteMovie>,
    pub asset: Option<UploadAsset>,
}

impl SetupSubmission {
    /// Genre selections as the JSON object the API stores (`{"Action": 28}`).
    pub fn genres_json(&self) -> String {
        let map: serde_json::Map<String, serde_json::Value> = self
            .genres
            .iter()
            .map(|(name, id)| (name.clone(), serde_json::Value::from(*id)))
            .collect();
        serde_json::Value::Object(map).to_string()
    }

    /// Favorite movies as the JSON array the API stores.
    pub fn movies_json(&self) -> String {
        serde_json::to_string(&self.movies).unwrap_or_else(|_| "[]".to_string())
    }
}
