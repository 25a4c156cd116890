/// Reqwest-backed `MovieApi` implementation
///
/// One `reqwest::Client` with a cookie store carries the opaque session
/// cookie across calls; the engine never inspects it. Every endpoint follows
/// the same shape: build URL, send, map 401/403 to `AppError::Unauthorized`
/// and any other non-2xx to `AppError::ExternalApi` with status and body,
/// then deserialize the JSON envelope.
use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::{
    api::MovieApi,
    config::Config,
    error::{AppError, AppResult},
    models::{
        CommentThread, GenreCatalog, LatestRelease, MovieDetails, MovieSummary, RankedMovie,
        RatingSummary, SessionInfo, SetupSubmission, UserProfile, UserStats, WatchlistEntry,
    },
};

#[derive(Clone)]
pub struct HttpMovieApi {
    http_client: HttpClient,
    api_url: String,
}

#[derive(Deserialize)]
struct MessageResponse {
    message: String,
}

#[derive(Deserialize)]
struct ExistsResponse {
    exists: bool,
}

impl HttpMovieApi {
    pub fn new(config: &Config) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            api_url: config.api_base_url.clone(),
        })
    }

    async fn get_json<T, Q>(&self, path: &str, query: &Q) -> AppResult<T>
    where
        T: DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let url = format!("{}/{}", self.api_url, path);

        let response = self.http_client.get(&url).query(query).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(AppError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "API returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl MovieApi for HttpMovieApi {
    async fn check_session(&self) -> AppResult<SessionInfo> {
        self.get_json("check_session", &[] as &[(&str, &str)]).await
    }

    async fn sign_in(&self, username: &str, password: &str) -> AppResult<bool> {
        let response: ExistsResponse = self
            .get_json(
                "search_user",
                &[("username", username), ("password", password)],
            )
            .await?;

        tracing::info!(username = %username, accepted = response.exists, "Sign-in attempted");

        Ok(response.exists)
    }

    async fn sign_out(&self) -> AppResult<()> {
        let _: MessageResponse = self.get_json("logout", &[] as &[(&str, &str)]).await?;
        Ok(())
    }

    async fn register_probe(&self, username: &str, password: &str) -> AppResult<String> {
        let response: MessageResponse = self
            .get_json(
                "add_user",
                &[
                    ("username", username),
                    ("password", password),
                    ("setup", "false"),
                ],
            )
            .await?;

        Ok(response.message)
    }

    async fn submit_setup(&self, submission: SetupSubmission) -> AppResult<String> {
        let genres_json = submission.genres_json();
        let movies_json = submission.movies_json();

        let response = if let Some(asset) = &submission.asset {
            // Completion with a profile picture goes through the multipart
            // endpoint; the API upserts, so no existing-account marker.
            let url = format!("{}/add_user_complete", self.api_url);

            let file = Part::bytes(asset.bytes.clone())
                .file_name(asset.file_name.clone())
                .mime_str(&asset.content_type)?;

            let mut form = Form::new()
                .part("file", file)
                .text("username", submission.username.clone())
                .text("setup", "true")
                .text("genres", genres_json)
                .text("movies", movies_json);
            if let Some(password) = &submission.password {
                form = form.text("password", password.clone());
            }

            self.http_client.post(&url).multipart(form).send().await?
        } else {
            let url = format!("{}/add_user", self.api_url);

            let mut query: Vec<(&str, String)> = vec![
                ("username", submission.username.clone()),
                ("genres", genres_json),
                ("movies", movies_json),
            ];
            if submission.existing_account {
                query.push(("setup", "exists".to_string()));
            } else {
                query.push(("setup", "true".to_string()));
                if let Some(password) = &submission.password {
                    query.push(("password", password.clone()));
                }
            }

            self.http_client.get(&url).query(&query).send().await?
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "API returned status {}: {}",
                status, body
            )));
        }

        let ack: MessageResponse = response.json().await?;

        tracing::info!(
            username = %submission.username,
            with_asset = submission.asset.is_some(),
            tag = %ack.message,
            "Setup submitted"
        );

        Ok(ack.message)
    }

    async fn delete_account(&self) -> AppResult<()> {
        let url = format!("{}/delete_user", self.api_url);

        let response = self.http_client.delete(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::ExternalApi(format!(
                "API returned status {} deleting account",
                status
            )));
        }

        Ok(())
    }

    async fn recommend(&self, title: &str) -> AppResult<Vec<String>> {
        #[derive(Deserialize)]
        struct RecommendResponse {
            recommendations: Vec<String>,
        }

        let response: RecommendResponse =
            self.get_json("recommend", &[("title", title)]).await?;

        tracing::info!(
            title = %title,
            results = response.recommendations.len(),
            "Recommendations fetched"
        );

        Ok(response.recommendations)
    }

    async fn lookup_details(&self, titles: &[String]) -> AppResult<Vec<MovieDetails>> {
        #[derive(Deserialize)]
        struct DetailsResponse {
            details: Vec<MovieDetails>,
        }

        let query: Vec<(&str, &str)> = titles.iter().map(|t| ("movies", t.as_str())).collect();
        let response: DetailsResponse = self.get_json("search_recommended", &query).await?;

        Ok(response.details)
    }

    async fn title_for_id(&self, id: u64) -> AppResult<String> {
        #[derive(Deserialize)]
        struct TitleResponse {
            title: String,
        }

        let response: TitleResponse = self
            .get_json("get_title", &[("id", id.to_string())])
            .await?;

        Ok(response.title)
    }

    async fn search_favorite(&self, query: &str) -> AppResult<Vec<MovieSummary>> {
        #[derive(Deserialize)]
        struct FavoriteSearchResponse {
            movie: Vec<MovieSummary>,
        }

        let response: FavoriteSearchResponse =
            self.get_json("search_fav_movie", &[("movie", query)]).await?;

        Ok(response.movie)
    }

    async fn load_genres(&self) -> AppResult<GenreCatalog> {
        self.get_json("load_genres", &[] as &[(&str, &str)]).await
    }

    async fn latest_releases(&self) -> AppResult<Vec<LatestRelease>> {
        #[derive(Deserialize)]
        struct LatestResponse {
            latest: Vec<LatestRelease>,
        }

        let response: LatestResponse = self
            .get_json("get_latest_releases", &[] as &[(&str, &str)])
            .await?;

        Ok(response.latest)
    }

    async fn trending(&self) -> AppResult<Vec<RankedMovie>> {
        #[derive(Deserialize)]
        struct TrendingResponse {
            trending: Vec<RankedMovie>,
        }

        let response: TrendingResponse =
            self.get_json("trending", &[] as &[(&str, &str)]).await?;

        Ok(response.trending)
    }

    async fn top_rated(&self, page: u32) -> AppResult<Vec<RankedMovie>> {
        #[derive(Deserialize)]
        struct RatedResponse {
            rated: Vec<RankedMovie>,
        }

        let response: RatedResponse = self
            .get_json("more_top_rated", &[("page_num", page.to_string())])
            .await?;

        Ok(response.rated)
    }

    async fn movies_by_genre(&self, genre_id: u64, page: u32) -> AppResult<Vec<MovieSummary>> {
        #[derive(Deserialize)]
        struct ByGenreResponse {
            by_genre: Vec<MovieSummary>,
        }

        let response: ByGenreResponse = self
            .get_json(
                "genre_sort",
                &[
                    ("genre", genre_id.to_string()),
                    ("page", page.to_string()),
                ],
            )
            .await?;

        Ok(response.by_genre)
    }

    async fn watchlist(&self) -> AppResult<Vec<WatchlistEntry>> {
        #[derive(Deserialize)]
        struct WatchlistResponse {
            watchlist: Vec<WatchlistEntry>,
        }

        let response: WatchlistResponse = self
            .get_json("get_watchlist", &[] as &[(&str, &str)])
            .await?;

        Ok(response.watchlist)
    }

    async fn watchlist_contains(&self, poster_path: &str) -> AppResult<bool> {
        let response: ExistsResponse = self
            .get_json("check_watchlist", &[("poster_path", poster_path)])
            .await?;

        Ok(response.exists)
    }

    async fn add_to_watchlist(&self, entry: &WatchlistEntry) -> AppResult<()> {
        let _: MessageResponse = self
            .get_json(
                "add_to_watchlist",
                &[
                    ("title", entry.title.clone()),
                    ("poster_path", entry.poster_path.clone()),
                    ("genres", entry.genres.clone()),
                    ("id", entry.id.to_string()),
                ],
            )
            .await?;

        Ok(())
    }

    async fn remove_from_watchlist(&self, entry: &WatchlistEntry) -> AppResult<()> {
        let _: MessageResponse = self
            .get_json(
                "remove_from_watchlist",
                &[
                    ("title", entry.title.clone()),
                    ("poster_path", entry.poster_path.clone()),
                    ("genres", entry.genres.clone()),
                ],
            )
            .await?;

        Ok(())
    }

    async fn comments(&self, movie_id: u64) -> AppResult<CommentThread> {
        self.get_json("fetch_comments", &[("movie_id", movie_id.to_string())])
            .await
    }

    async fn post_comment(&self, movie_id: u64, text: &str) -> AppResult<()> {
        let _: MessageResponse = self
            .get_json(
                "update_comments",
                &[("comment", text.to_string()), ("movie_id", movie_id.to_string())],
            )
            .await?;

        Ok(())
    }

    async fn rating(&self, movie_id: u64) -> AppResult<RatingSummary> {
        self.get_json("fetch_rating", &[("movie_id", movie_id.to_string())])
            .await
    }

    async fn rate(&self, movie_id: u64, rating: f64) -> AppResult<()> {
        let _: MessageResponse = self
            .get_json(
                "update_user_rating",
                &[
                    ("movie_id", movie_id.to_string()),
                    ("rating", rating.to_string()),
                ],
            )
            .await?;

        Ok(())
    }

    async fn refresh_avg_rating(&self, movie_id: u64) -> AppResult<()> {
        let _: MessageResponse = self
            .get_json("update_avg_rating", &[("movie_id", movie_id.to_string())])
            .await?;

        Ok(())
    }

    async fn profile(&self) -> AppResult<UserProfile> {
        // The API returns `[genres_json_string, movies_list]`: the genre map
        // arrives double-encoded and needs a second parse.
        #[derive(Deserialize)]
        struct UserDataResponse {
            user_data: (String, Vec<crate::models::FavoriteMovie>),
        }

        let response: UserDataResponse = self
            .get_json("get_user_data", &[] as &[(&str, &str)])
            .await?;

        let (genres_raw, movies) = response.user_data;
        let genres: BTreeMap<String, u64> = serde_json::from_str(&genres_raw)
            .map_err(|e| AppError::ExternalApi(format!("Malformed genre selections: {}", e)))?;

        Ok(UserProfile {
            genres: genres.into_iter().collect(),
            movies,
        })
    }

    async fn profile_stats(&self) -> AppResult<UserStats> {
        // `[num_ratings, [top title, top rating]]` on the wire.
        #[derive(Deserialize)]
        struct UserStatsResponse {
            user_stats: (u64, (String, f64)),
        }

        let response: UserStatsResponse = self
            .get_json("get_user_stats", &[] as &[(&str, &str)])
            .await?;

        let (rated_count, (top_title, top_rating)) = response.user_stats;

        Ok(UserStats {
            rated_count,
            top_title,
            top_rating,
        })
    }

    async fn profile_picture(&self) -> AppResult<String> {
        #[derive(Deserialize)]
        struct ProfilePicResponse {
            profile_pic: String,
        }

        let response: ProfilePicResponse = self
            .get_json("fetch_profile_pic", &[] as &[(&str, &str)])
            .await?;

        Ok(response.profile_pic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_response_deserialization() {
        let ack: MessageResponse = serde_json::from_str(r#"{"message": "added"}"#).unwrap();
        assert_eq!(ack.message, "added");
    }

    #[test]
    fn test_exists_response_deserialization() {
        let response: ExistsResponse = serde_json::from_str(r#"{"exists": true}"#).unwrap();
        assert!(response.exists);
    }

    #[test]
    fn test_user_stats_wire_shape() {
        #[derive(Deserialize)]
        struct UserStatsResponse {
            user_stats: (u64, (String, f64)),
        }

        let json = r#"{"user_stats": [12, ["Inception", 9.5]]}"#;
        let response: UserStatsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.user_stats.0, 12);
        assert_eq!(response.user_stats.1 .0, "Inception");
    }

    #[test]
    fn test_double_encoded_genres_parse() {
        let raw = r#"{"Action": 28, "Comedy": 35}"#;
        let genres: BTreeMap<String, u64> = serde_json::from_str(raw).unwrap();
        assert_eq!(genres.get("Comedy"), Some(&35));
    }
}
