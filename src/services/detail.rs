/// Movie detail screen flow
///
/// Resolves the routed movie id to its title, fetches the detail record,
/// then checks watchlist membership: a dependency chain, each stage needing
/// the previous stage's result. The flow also owns the screen's comments,
/// ratings, and watchlist toggle. Notifications go through a parent-owned
/// callback: the flow calls `notify(message)` and implies nothing about how
/// the parent displays it.
use std::sync::Arc;

use crate::{
    api::MovieApi,
    error::{AppError, AppResult},
    models::{Comment, MovieDetails, WatchlistEntry},
    navigation::NavContext,
    services::fetch::FetchState,
};

pub type Notify = Box<dyn Fn(&str) + Send + Sync>;

pub struct MovieDetailFlow {
    api: Arc<dyn MovieApi>,
    movie_id: u64,
    nav: NavContext,
    notify: Notify,
    details: FetchState<Vec<MovieDetails>>,
    comments: Vec<Comment>,
    viewer: String,
    on_watchlist: bool,
    rating: f64,
    avg_rating: f64,
}

impl MovieDetailFlow {
    pub fn new(api: Arc<dyn MovieApi>, movie_id: u64, nav: NavContext, notify: Notify) -> Self {
        Self {
            api,
            movie_id,
            nav,
            notify,
            details: FetchState::Idle,
            comments: Vec::new(),
            viewer: String::new(),
            on_watchlist: false,
            rating: 0.0,
            avg_rating: 0.0,
        }
    }

    /// Mount-time load. Detail failure is the screen's error state; comment
    /// and rating failures stay local and leave their sections empty.
    pub async fn load(&mut self) {
        self.details = FetchState::Pending;
        match self.fetch_details().await {
            Ok(details) => {
                if let Some(movie) = details.first() {
                    match self.api.watchlist_contains(&movie.poster_path).await {
                        Ok(exists) => self.on_watchlist = exists,
                        Err(e) => tracing::warn!(error = %e, "Watchlist check failed"),
                    }
                }
                self.details = FetchState::Success(details);
            }
            Err(e) => {
                tracing::warn!(movie_id = self.movie_id, error = %e, "Detail fetch failed");
                self.details = FetchState::Error(e.to_string());
            }
        }

        match self.api.comments(self.movie_id).await {
            Ok(thread) => {
                self.viewer = thread.user;
                self.comments = thread.comments;
            }
            Err(e) => tracing::warn!(error = %e, "Comment fetch failed"),
        }

        match self.api.rating(self.movie_id).await {
            Ok(summary) => {
                self.rating = summary.rating;
                self.avg_rating = summary.avg_rating;
            }
            Err(e) => tracing::warn!(error = %e, "Rating fetch failed"),
        }
    }

    async fn fetch_details(&self) -> AppResult<Vec<MovieDetails>> {
        let title = self.api.title_for_id(self.movie_id).await?;
        self.api.lookup_details(&[title]).await
    }

    /// Adds or removes the loaded movie, flipping the local flag and firing
    /// the notification only once the call succeeded.
    pub async fn toggle_watchlist(&mut self) -> AppResult<()> {
        let entry = match self.details.data().and_then(|details| details.first()) {
            Some(movie) => WatchlistEntry {
                id: movie.id,
                title: movie.title.clone(),
                poster_path: movie.poster_path.clone(),
                genres: movie.genres.join(","),
            },
            None => {
                return Err(AppError::InvalidInput(
                    "no movie loaded to add to the watchlist".to_string(),
                ))
            }
        };

        if self.on_watchlist {
            self.api.remove_from_watchlist(&entry).await?;
            self.on_watchlist = false;
            (self.notify)("Movie Removed from Watchlist!");
        } else {
            self.api.add_to_watchlist(&entry).await?;
            self.on_watchlist = true;
            (self.notify)("Movie Added to Watchlist!");
        }

        Ok(())
    }

    /// Optimistic append: the comment shows immediately, stamped with the
    /// local clock, and stays even if the submission fails.
    pub async fn post_comment(&mut self, text: &str) -> AppResult<()> {
        let comment = Comment {
            username: self.viewer.clone(),
            comment_text: text.to_string(),
            created_at: chrono::Local::now().format("%-m/%-d/%Y, %r").to_string(),
        };
        self.comments.push(comment);

        if let Err(e) = self.api.post_comment(self.movie_id, text).await {
            tracing::warn!(error = %e, "Comment submission failed");
            return Err(e);
        }

        Ok(())
    }

    /// Stores the viewer's rating and asks the API to refresh the aggregate.
    pub async fn submit_rating(&mut self, value: f64) -> AppResult<()> {
        if !(0.0..=10.0).contains(&value) {
            return Err(AppError::InvalidInput(
                "rating must be between 0 and 10".to_string(),
            ));
        }

        self.api.rate(self.movie_id, value).await?;
        self.api.refresh_avg_rating(self.movie_id).await?;
        self.rating = value;

        Ok(())
    }

    pub fn details(&self) -> &FetchState<Vec<MovieDetails>> {
        &self.details
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn viewer(&self) -> &str {
        &self.viewer
    }

    pub fn on_watchlist(&self) -> bool {
        self.on_watchlist
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn avg_rating(&self) -> f64 {
        self.avg_rating
    }

    /// Where "back" goes, with whatever the originating screen needs.
    pub fn nav(&self) -> &NavContext {
        &self.nav
    }
}
