/// Account-setup wizard
///
/// Three steps: pick genres, pick favorite movies, then upload a profile
/// picture and submit. Runs in two modes, creating a new account or editing
/// an existing profile; the edit path preloads selections from the stored
/// profile. The terminal action variant is chosen by mode and by
/// whether a picture was attached; the outcome routes on the status tag the
/// API returns.
use crate::{
    api::MovieApi,
    error::{AppError, AppResult},
    models::{FavoriteMovie, MovieSummary, SetupSubmission, UploadAsset, UserProfile},
    navigation::Destination,
    services::selection::SelectionSet,
};

/// Title search for the favorites step. A blank query is a no-op rather than
/// a request; results feed `toggle_favorite` via the `FavoriteMovie`
/// conversion.
pub async fn search_favorites(api: &dyn MovieApi, query: &str) -> AppResult<Vec<MovieSummary>> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    api.search_favorite(trimmed).await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupMode {
    Create,
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStep {
    Genres,
    Favorites,
    Finish,
}

/// Discriminated submission outcome: a brand-new account versus an edited
/// profile, each with its own landing place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupOutcome {
    Created,
    Updated,
}

impl SetupOutcome {
    pub fn destination(&self) -> Destination {
        match self {
            SetupOutcome::Created => Destination::Landing,
            SetupOutcome::Updated => Destination::Profile,
        }
    }
}

/// Prior selections carried into edit mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriorSelections {
    pub genres: Vec<(String, u64)>,
    pub movies: Vec<FavoriteMovie>,
}

impl From<UserProfile> for PriorSelections {
    fn from(profile: UserProfile) -> Self {
        Self {
            genres: profile.genres,
            movies: profile.movies,
        }
    }
}

#[derive(Debug)]
pub struct SetupWizard {
    mode: SetupMode,
    step: SetupStep,
    username: String,
    password: Option<String>,
    genres: SelectionSet<String, u64>,
    favorites: SelectionSet<String, FavoriteMovie>,
    asset: Option<UploadAsset>,
    notice: Option<String>,
}

impl SetupWizard {
    /// New-account wizard: empty selections, credential material held for the
    /// terminal submission.
    pub fn create(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            mode: SetupMode::Create,
            step: SetupStep::Genres,
            username: username.into(),
            password: Some(password.into()),
            genres: SelectionSet::new(),
            favorites: SelectionSet::new(),
            asset: None,
            notice: None,
        }
    }

    /// Edit-mode wizard: selections preloaded from the stored profile before
    /// the first step renders. The genre guard still applies.
    pub fn edit(username: impl Into<String>, prior: PriorSelections) -> Self {
        let mut genres = SelectionSet::new();
        genres.preload(prior.genres);
        let mut favorites = SelectionSet::new();
        favorites.preload(
            prior
                .movies
                .into_iter()
                .map(|movie| (movie.title.clone(), movie)),
        );

        Self {
            mode: SetupMode::Edit,
            step: SetupStep::Genres,
            username: username.into(),
            password: None,
            genres,
            favorites,
            asset: None,
            notice: None,
        }
    }

    pub fn mode(&self) -> SetupMode {
        self.mode
    }

    pub fn step(&self) -> SetupStep {
        self.step
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Validation or submission message awaiting display, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn genres(&self) -> &SelectionSet<String, u64> {
        &self.genres
    }

    pub fn favorites(&self) -> &SelectionSet<String, FavoriteMovie> {
        &self.favorites
    }

    pub fn toggle_genre(&mut self, name: impl Into<String>, id: u64) {
        self.genres.toggle(name.into(), id);
    }

    /// Favorites are keyed by title: toggling a movie already in the set
    /// removes it.
    pub fn toggle_favorite(&mut self, movie: FavoriteMovie) {
        self.favorites.toggle(movie.title.clone(), movie);
    }

    pub fn attach_asset(&mut self, asset: UploadAsset) {
        self.asset = Some(asset);
    }

    /// Skipping the upload is offered only while no asset is attached.
    pub fn can_skip(&self) -> bool {
        self.asset.is_none()
    }

    /// Forward navigation. The only guard is on leaving the genre step: at
    /// least one genre must be selected, favorites notwithstanding.
    pub fn advance(&mut self) -> bool {
        match self.step {
            SetupStep::Genres => {
                if self.genres.is_empty() {
                    self.notice =
                        Some("Please select at least one genre to continue.".to_string());
                    return false;
                }
                self.notice = None;
                self.step = SetupStep::Favorites;
                true
            }
            SetupStep::Favorites => {
                self.notice = None;
                self.step = SetupStep::Finish;
                true
            }
            SetupStep::Finish => false,
        }
    }

    /// Backward navigation, unconditional; selections are kept.
    pub fn back(&mut self) {
        self.step = match self.step {
            SetupStep::Genres => SetupStep::Genres,
            SetupStep::Favorites => SetupStep::Genres,
            SetupStep::Finish => SetupStep::Favorites,
        };
    }

    /// Terminal action. Submits the accumulated state and discriminates the
    /// outcome on the tag in the response itself. Any failure (transport,
    /// non-2xx, or an outcome tag the active variant does not allow) leaves
    /// the wizard on the final step with all selections intact.
    pub async fn finish(&mut self, api: &dyn MovieApi) -> AppResult<SetupOutcome> {
        if self.step != SetupStep::Finish {
            return Err(AppError::InvalidInput(
                "setup can only be submitted from the final step".to_string(),
            ));
        }

        let with_asset = self.asset.is_some();
        let submission = SetupSubmission {
            username: self.username.clone(),
            password: self.password.clone(),
            existing_account: self.mode == SetupMode::Edit,
            genres: self.genres.entries().to_vec(),
            movies: self.favorites.values().cloned().collect(),
            asset: self.asset.clone(),
        };

        let tag = match api.submit_setup(submission).await {
            Ok(tag) => tag,
            Err(e) => {
                tracing::warn!(error = %e, "Setup submission failed");
                self.notice = Some(e.to_string());
                return Err(e);
            }
        };

        // The multipart completion upserts, so both tags are reachable with
        // an asset; the skip variants each allow exactly one.
        let outcome = match tag.as_str() {
            "added" if with_asset || self.mode == SetupMode::Create => Some(SetupOutcome::Created),
            "updated" if with_asset || self.mode == SetupMode::Edit => Some(SetupOutcome::Updated),
            _ => None,
        };

        match outcome {
            Some(outcome) => {
                self.notice = None;
                Ok(outcome)
            }
            None => {
                let err = AppError::ExternalApi(format!("Unexpected setup response: {}", tag));
                self.notice = Some(err.to_string());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockMovieApi;

    fn inception() -> FavoriteMovie {
        FavoriteMovie {
            id: 27205,
            title: "Inception".to_string(),
            poster: "/inception.jpg".to_string(),
        }
    }

    fn avatar_png() -> UploadAsset {
        UploadAsset {
            file_name: "avatar.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        }
    }

    #[test]
    fn test_genre_guard_blocks_empty_selection() {
        let mut wizard = SetupWizard::create("ada", "hunter2");
        assert!(!wizard.advance());
        assert_eq!(wizard.step(), SetupStep::Genres);
        assert_eq!(
            wizard.notice(),
            Some("Please select at least one genre to continue.")
        );
    }

    #[test]
    fn test_genre_guard_ignores_favorites_state() {
        let mut wizard = SetupWizard::create("ada", "hunter2");
        wizard.toggle_genre("Action", 28);
        assert!(wizard.advance());
        assert_eq!(wizard.step(), SetupStep::Favorites);
        assert!(wizard.favorites().is_empty());
        assert!(wizard.advance());
        assert_eq!(wizard.step(), SetupStep::Finish);
    }

    #[test]
    fn test_back_navigation_keeps_selections() {
        let mut wizard = SetupWizard::create("ada", "hunter2");
        wizard.toggle_genre("Action", 28);
        wizard.advance();
        wizard.toggle_favorite(inception());
        wizard.advance();

        wizard.back();
        wizard.back();
        assert_eq!(wizard.step(), SetupStep::Genres);
        assert!(wizard.genres().contains(&"Action".to_string()));
        assert_eq!(wizard.favorites().len(), 1);
    }

    #[test]
    fn test_edit_mode_preloads_prior_snapshot() {
        let prior = PriorSelections {
            genres: vec![("Action".to_string(), 28), ("Drama".to_string(), 18)],
            movies: vec![inception()],
        };
        let wizard = SetupWizard::edit("ada", prior.clone());

        assert_eq!(wizard.genres().entries(), prior.genres.as_slice());
        assert!(wizard.favorites().contains(&"Inception".to_string()));
        assert_eq!(wizard.step(), SetupStep::Genres);
    }

    #[test]
    fn test_attaching_asset_withdraws_skip() {
        let mut wizard = SetupWizard::create("ada", "hunter2");
        assert!(wizard.can_skip());
        wizard.attach_asset(avatar_png());
        assert!(!wizard.can_skip());
    }

    #[tokio::test]
    async fn test_blank_favorite_search_issues_no_request() {
        // No expectations: any API call would panic the mock.
        let api = MockMovieApi::new();
        let results = search_favorites(&api, "  ").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_favorite_search_results_toggle_into_the_set() {
        let mut api = MockMovieApi::new();
        api.expect_search_favorite()
            .withf(|query| query == "Inception")
            .return_once(|_| {
                Ok(vec![MovieSummary {
                    id: 27205,
                    title: "Inception".to_string(),
                    poster_path: "/inception.jpg".to_string(),
                }])
            });

        let mut wizard = SetupWizard::create("ada", "hunter2");
        let results = search_favorites(&api, " Inception ").await.unwrap();
        wizard.toggle_favorite(results[0].clone().into());

        assert!(wizard.favorites().contains(&"Inception".to_string()));
        assert_eq!(wizard.favorites().values().next().unwrap().poster, "/inception.jpg");
    }

    #[tokio::test]
    async fn test_finish_rejected_before_final_step() {
        let api = MockMovieApi::new();
        let mut wizard = SetupWizard::create("ada", "hunter2");
        let result = wizard.finish(&api).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_skip_in_create_mode_routes_to_landing() {
        let mut api = MockMovieApi::new();
        api.expect_submit_setup()
            .withf(|submission| {
                !submission.existing_account
                    && submission.password.as_deref() == Some("hunter2")
                    && submission.asset.is_none()
                    && submission.genres == vec![("Action".to_string(), 28)]
                    && submission.movies.is_empty()
            })
            .return_once(|_| Ok("added".to_string()));

        let mut wizard = SetupWizard::create("ada", "hunter2");
        wizard.toggle_genre("Action", 28);
        wizard.advance();
        wizard.advance();

        let outcome = wizard.finish(&api).await.unwrap();
        assert_eq!(outcome, SetupOutcome::Created);
        assert_eq!(outcome.destination(), Destination::Landing);
    }

    #[tokio::test]
    async fn test_skip_in_edit_mode_routes_to_profile() {
        let mut api = MockMovieApi::new();
        api.expect_submit_setup()
            .withf(|submission| {
                submission.existing_account
                    && submission.password.is_none()
                    && submission.asset.is_none()
            })
            .return_once(|_| Ok("updated".to_string()));

        let prior = PriorSelections {
            genres: vec![("Drama".to_string(), 18)],
            movies: vec![],
        };
        let mut wizard = SetupWizard::edit("ada", prior);
        wizard.advance();
        wizard.advance();

        let outcome = wizard.finish(&api).await.unwrap();
        assert_eq!(outcome, SetupOutcome::Updated);
        assert_eq!(outcome.destination(), Destination::Profile);
    }

    #[tokio::test]
    async fn test_completion_with_asset_accepts_both_tags() {
        let mut api = MockMovieApi::new();
        api.expect_submit_setup()
            .withf(|submission| submission.asset.is_some())
            .return_once(|_| Ok("updated".to_string()));

        let mut wizard = SetupWizard::create("ada", "hunter2");
        wizard.toggle_genre("Action", 28);
        wizard.advance();
        wizard.advance();
        wizard.attach_asset(avatar_png());

        let outcome = wizard.finish(&api).await.unwrap();
        assert_eq!(outcome, SetupOutcome::Updated);
    }

    #[tokio::test]
    async fn test_failed_submission_keeps_step_and_selections() {
        let mut api = MockMovieApi::new();
        api.expect_submit_setup()
            .return_once(|_| Err(AppError::ExternalApi("status 500".to_string())));

        let mut wizard = SetupWizard::create("ada", "hunter2");
        wizard.toggle_genre("Action", 28);
        wizard.advance();
        wizard.toggle_favorite(inception());
        wizard.advance();

        let result = wizard.finish(&api).await;
        assert!(result.is_err());
        assert_eq!(wizard.step(), SetupStep::Finish);
        assert_eq!(wizard.genres().len(), 1);
        assert_eq!(wizard.favorites().len(), 1);
        assert!(wizard.notice().is_some());
    }

    #[tokio::test]
    async fn test_unexpected_tag_is_an_error_not_an_outcome() {
        let mut api = MockMovieApi::new();
        api.expect_submit_setup()
            .return_once(|_| Ok("updated".to_string()));

        // Skip in create mode only allows "added".
        let mut wizard = SetupWizard::create("ada", "hunter2");
        wizard.toggle_genre("Action", 28);
        wizard.advance();
        wizard.advance();

        let result = wizard.finish(&api).await;
        assert!(matches!(result, Err(AppError::ExternalApi(_))));
        assert_eq!(wizard.step(), SetupStep::Finish);
    }
}
