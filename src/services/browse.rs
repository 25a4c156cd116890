/// Browse screens: landing rails, paginated top-rated and by-genre grids,
/// and the watchlist.
use std::sync::Arc;

use crate::{
    api::MovieApi,
    error::AppResult,
    models::{LatestRelease, MovieSummary, RankedMovie, WatchlistEntry},
    services::fetch::{FetchCoordinator, FetchState},
};

/// Landing-page rails. Fetched concurrently; a failed rail logs and renders
/// empty rather than taking down the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeRails {
    pub latest: Vec<LatestRelease>,
    pub trending: Vec<RankedMovie>,
    pub top_rated: Vec<RankedMovie>,
}

pub async fn load_home_rails(api: &dyn MovieApi) -> HomeRails {
    let (latest, trending, top_rated) =
        tokio::join!(api.latest_releases(), api.trending(), api.top_rated(1));

    HomeRails {
        latest: latest.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Latest releases fetch failed");
            Vec::new()
        }),
        trending: trending.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Trending fetch failed");
            Vec::new()
        }),
        top_rated: top_rated.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Top rated fetch failed");
            Vec::new()
        }),
    }
}

pub async fn load_watchlist(api: &dyn MovieApi) -> AppResult<Vec<WatchlistEntry>> {
    api.watchlist().await
}

/// Top-rated grid with three pages.
pub struct TopRatedBrowse {
    api: Arc<dyn MovieApi>,
    page: u32,
    results: FetchCoordinator<Vec<RankedMovie>>,
}

impl TopRatedBrowse {
    pub const PAGE_COUNT: u32 = 3;

    pub fn new(api: Arc<dyn MovieApi>) -> Self {
        Self {
            api,
            page: 1,
            results: FetchCoordinator::new(),
        }
    }

    /// Fetches a page, clamped to the pagination range. Page flips race
    /// through the coordinator: only the latest selection lands.
    pub fn select_page(&mut self, page: u32) {
        self.page = page.clamp(1, Self::PAGE_COUNT);
        let api = Arc::clone(&self.api);
        let page = self.page;
        self.results.submit(async move { api.top_rated(page).await });
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn results(&self) -> FetchState<Vec<RankedMovie>> {
        self.results.state()
    }
}

/// By-genre grid. Three page slots are exposed to the user; they map onto
/// non-contiguous API pages so each slot shows a fresh slice of the catalog.
pub struct GenreBrowse {
    api: Arc<dyn MovieApi>,
    genre_id: u64,
    slot: usize,
    results: FetchCoordinator<Vec<MovieSummary>>,
}

impl GenreBrowse {
    pub const PAGE_CHOICES: [u32; 3] = [1, 3, 5];

    pub fn new(api: Arc<dyn MovieApi>, genre_id: u64) -> Self {
        let mut browse = Self {
            api,
            genre_id,
            slot: 0,
            results: FetchCoordinator::new(),
        };
        browse.refresh();
        browse
    }

    /// Switches genre (navigation within the same screen) and restarts from
    /// the first slot.
    pub fn set_genre(&mut self, genre_id: u64) {
        self.genre_id = genre_id;
        self.slot = 0;
        self.refresh();
    }

    pub fn select_slot(&mut self, slot: usize) {
        self.slot = slot.min(Self::PAGE_CHOICES.len() - 1);
        self.refresh();
    }

    fn refresh(&mut self) {
        let api = Arc::clone(&self.api);
        let genre_id = self.genre_id;
        let page = Self::PAGE_CHOICES[self.slot];
        self.results
            .submit(async move { api.movies_by_genre(genre_id, page).await });
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn results(&self) -> FetchState<Vec<MovieSummary>> {
        self.results.state()
    }
}
