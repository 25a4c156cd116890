/// Profile screen flow: stored selections, rating stats, and the profile
/// picture, plus the hand-off into the edit-mode setup wizard.
use crate::{
    api::MovieApi,
    error::AppResult,
    models::{UserProfile, UserStats},
    navigation::{Destination, Redirect},
    services::setup::{PriorSelections, SetupWizard},
};

/// Fallback avatar shown when no picture was uploaded.
pub const DEFAULT_AVATAR_URL: &str = "https://cdn-icons-png.flaticon.com/512/149/149071.png";

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    pub profile: UserProfile,
    pub stats: Option<UserStats>,
    pub picture: String,
}

/// Loads the three profile sections concurrently. The stored selections are
/// required (without them the screen has nothing to show) while stats and
/// picture degrade gracefully.
pub async fn load_profile(api: &dyn MovieApi) -> AppResult<ProfileView> {
    let (profile, stats, picture) =
        tokio::join!(api.profile(), api.profile_stats(), api.profile_picture());

    let profile = profile?;

    let stats = match stats {
        Ok(stats) => Some(stats),
        Err(e) => {
            tracing::warn!(error = %e, "Profile stats fetch failed");
            None
        }
    };

    let picture = picture.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Profile picture fetch failed");
        DEFAULT_AVATAR_URL.to_string()
    });

    Ok(ProfileView {
        profile,
        stats,
        picture,
    })
}

/// Edit entry point: a wizard preloaded with the stored selections, so every
/// step starts from what the account already has.
pub fn edit_wizard(username: &str, view: &ProfileView) -> SetupWizard {
    SetupWizard::edit(
        username,
        PriorSelections {
            genres: view.profile.genres.clone(),
            movies: view.profile.movies.clone(),
        },
    )
}

pub async fn delete_account(api: &dyn MovieApi) -> AppResult<Redirect> {
    api.delete_account().await?;
    Ok(Redirect::replacing(Destination::Entry))
}
