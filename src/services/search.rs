/// Search screen flow
///
/// A reactive query drives a two-stage chain through one coordinator:
/// recommendations for the seed title, then detail records for every
/// recommended title. Rapid retyping is safe: the coordinator's token keeps
/// only the latest query's results.
use std::sync::Arc;
use std::time::Duration;

use crate::{
    api::MovieApi,
    models::MovieDetails,
    services::fetch::{FetchCoordinator, FetchState, LoadingLadder},
};

const LADDER_SECOND_AFTER: Duration = Duration::from_secs(4);
const LADDER_THIRD_AFTER: Duration = Duration::from_secs(6);

pub struct SearchFlow {
    api: Arc<dyn MovieApi>,
    results: FetchCoordinator<Vec<MovieDetails>>,
}

impl SearchFlow {
    pub fn new(api: Arc<dyn MovieApi>) -> Self {
        let ladder = LoadingLadder::new(
            "Looking for similar movies...",
            "Get some Popcorn while I search",
            "Almost There!!",
            LADDER_SECOND_AFTER,
            LADDER_THIRD_AFTER,
        );

        Self {
            api,
            results: FetchCoordinator::with_ladder(ladder),
        }
    }

    /// Re-invoked on every input change. An all-whitespace query issues no
    /// request and resets to the nothing-to-show state.
    pub fn submit_query(&self, query: &str) {
        let seed = query.trim().to_string();
        if seed.is_empty() {
            self.results.reset_idle();
            return;
        }

        let api = Arc::clone(&self.api);
        self.results.submit(async move {
            let recommendations = api.recommend(&seed).await?;
            if recommendations.is_empty() {
                // Unknown seed title: success with nothing to list; the
                // screen prompts for a different name.
                return Ok(Vec::new());
            }
            api.lookup_details(&recommendations).await
        });
    }

    pub fn results(&self) -> FetchState<Vec<MovieDetails>> {
        self.results.state()
    }

    pub fn loading_message(&self) -> Option<String> {
        self.results.loading_message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockMovieApi;

    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    fn detail(title: &str) -> MovieDetails {
        MovieDetails {
            id: 1,
            title: title.to_string(),
            poster_path: format!("/{}.jpg", title.to_lowercase()),
            backdrop_path: None,
            overview: None,
            release_date: None,
            director: None,
            genres: vec![],
        }
    }

    #[tokio::test]
    async fn test_query_chains_recommendations_into_details() {
        let mut api = MockMovieApi::new();
        api.expect_recommend()
            .withf(|title| title == "Inception")
            .times(1)
            .returning(|_| Ok(vec!["Interstellar".to_string(), "Tenet".to_string()]));
        api.expect_lookup_details()
            .withf(|titles| titles == ["Interstellar".to_string(), "Tenet".to_string()])
            .times(1)
            .returning(|_| Ok(vec![detail("Interstellar"), detail("Tenet")]));

        let flow = SearchFlow::new(Arc::new(api));
        flow.submit_query("Inception");
        settle().await;

        match flow.results() {
            FetchState::Success(details) => assert_eq!(details.len(), 2),
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_blank_query_issues_no_request() {
        // No expectations: any API call would panic the mock.
        let api = MockMovieApi::new();

        let flow = SearchFlow::new(Arc::new(api));
        flow.submit_query("   ");
        settle().await;

        assert_eq!(flow.results(), FetchState::Idle);
        assert_eq!(flow.loading_message(), None);
    }

    #[tokio::test]
    async fn test_unknown_seed_is_empty_success_not_error() {
        let mut api = MockMovieApi::new();
        api.expect_recommend().returning(|_| Ok(vec![]));

        let flow = SearchFlow::new(Arc::new(api));
        flow.submit_query("Nonexistent Movie");
        settle().await;

        assert_eq!(flow.results(), FetchState::Success(vec![]));
    }

    #[tokio::test]
    async fn test_transport_failure_surfaces_error_state() {
        let mut api = MockMovieApi::new();
        api.expect_recommend().returning(|_| {
            Err(crate::error::AppError::ExternalApi(
                "status 502".to_string(),
            ))
        });

        let flow = SearchFlow::new(Arc::new(api));
        flow.submit_query("Inception");
        settle().await;

        assert!(matches!(flow.results(), FetchState::Error(_)));
    }
}
