/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not signed in")]
    Unauthorized,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// True for failures the owning screen surfaces as an inline message
    /// rather than a redirect.
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, AppError::Unauthorized)
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_user_visible() {
        let err = AppError::InvalidInput("select at least one genre".to_string());
        assert!(err.is_user_visible());
        assert_eq!(err.to_string(), "Invalid input: select at least one genre");
    }

    #[test]
    fn test_unauthorized_redirects_instead_of_messaging() {
        assert!(!AppError::Unauthorized.is_user_visible());
    }
}
