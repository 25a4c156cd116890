/// Remote movie API abstraction
///
/// Everything non-trivial (recommendation ranking, persistence,
/// authentication) lives behind this boundary. Flows hold an
/// `Arc<dyn MovieApi>` so they can be exercised against a mock without a
/// network; `HttpMovieApi` is the reqwest-backed implementation.
use crate::{
    error::AppResult,
    models::{
        CommentThread, GenreCatalog, LatestRelease, MovieDetails, MovieSummary, RankedMovie,
        RatingSummary, SessionInfo, SetupSubmission, UserProfile, UserStats, WatchlistEntry,
    },
};

pub mod http;

pub use http::HttpMovieApi;

/// Trait covering the full endpoint surface the client consumes.
///
/// Methods map one-to-one onto remote endpoints; none of them retries
/// automatically (account creation in particular must not be retried after a
/// partial failure).
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieApi: Send + Sync {
    /// Session check gating protected views. Returns `{loggedIn, user?}`.
    async fn check_session(&self) -> AppResult<SessionInfo>;

    /// Credential check. `true` also establishes the session cookie.
    async fn sign_in(&self, username: &str, password: &str) -> AppResult<bool>;

    async fn sign_out(&self) -> AppResult<()>;

    /// First registration step: asks the API whether the username is taken.
    /// Returns the raw status tag (`"New user"` / `"User already exists"`).
    async fn register_probe(&self, username: &str, password: &str) -> AppResult<String>;

    /// Wizard terminal action. The implementation picks the endpoint variant
    /// from the submission (multipart completion when an asset is attached,
    /// query-string submission otherwise) and returns the raw status tag
    /// (`"added"` / `"updated"`).
    async fn submit_setup(&self, submission: SetupSubmission) -> AppResult<String>;

    async fn delete_account(&self) -> AppResult<()>;

    /// Recommendations for a seed title, as a list of title strings.
    async fn recommend(&self, title: &str) -> AppResult<Vec<String>>;

    /// Detail records for a list of titles.
    async fn lookup_details(&self, titles: &[String]) -> AppResult<Vec<MovieDetails>>;

    /// Resolves a numeric movie id to its title.
    async fn title_for_id(&self, id: u64) -> AppResult<String>;

    /// Title search for the favorite-movie picker.
    async fn search_favorite(&self, query: &str) -> AppResult<Vec<MovieSummary>>;

    /// Genre catalog: display name to numeric genre id.
    async fn load_genres(&self) -> AppResult<GenreCatalog>;

    async fn latest_releases(&self) -> AppResult<Vec<LatestRelease>>;

    async fn trending(&self) -> AppResult<Vec<RankedMovie>>;

    async fn top_rated(&self, page: u32) -> AppResult<Vec<RankedMovie>>;

    async fn movies_by_genre(&self, genre_id: u64, page: u32) -> AppResult<Vec<MovieSummary>>;

    async fn watchlist(&self) -> AppResult<Vec<WatchlistEntry>>;

    /// Membership check keyed on the poster path, matching the remote
    /// contract.
    async fn watchlist_contains(&self, poster_path: &str) -> AppResult<bool>;

    async fn add_to_watchlist(&self, entry: &WatchlistEntry) -> AppResult<()>;

    async fn remove_from_watchlist(&self, entry: &WatchlistEntry) -> AppResult<()>;

    async fn comments(&self, movie_id: u64) -> AppResult<CommentThread>;

    async fn post_comment(&self, movie_id: u64, text: &str) -> AppResult<()>;

    async fn rating(&self, movie_id: u64) -> AppResult<RatingSummary>;

    /// Stores the viewer's rating for a movie (0-10 scale).
    async fn rate(&self, movie_id: u64, rating: f64) -> AppResult<()>;

    /// Asks the API to recompute the movie's aggregate rating.
    async fn refresh_avg_rating(&self, movie_id: u64) -> AppResult<()>;

    async fn profile(&self) -> AppResult<UserProfile>;

    async fn profile_stats(&self) -> AppResult<UserStats>;

    /// URL of the stored profile picture (a default avatar when none was
    /// uploaded).
    async fn profile_picture(&self) -> AppResult<String>;
}
