/// Session gate for protected views
///
/// One asynchronous authorization check per activation. The result is never
/// cached across activations; authorization is not assumed monotonic within
/// a browsing session.
use crate::{
    api::MovieApi,
    navigation::{Destination, Redirect},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionAuthorization {
    /// Check still in flight: render a neutral placeholder, no redirect.
    #[default]
    Unknown,
    Authorized,
    Denied,
}

/// What the protected view should do once the check resolves.
#[derive(Debug, Clone, PartialEq)]
pub enum GateOutcome {
    /// Render the guarded children unmodified.
    Render,
    /// One-way redirect to the unauthenticated entry point, replacing
    /// history so the protected view is not reachable via back-navigation.
    Redirect(Redirect),
}

#[derive(Debug, Default)]
pub struct SessionGate {
    status: SessionAuthorization,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> SessionAuthorization {
        self.status
    }

    /// Runs the check for this activation. A failed check denies: the view
    /// must never render guarded content on an unverified session.
    pub async fn activate(&mut self, api: &dyn MovieApi) -> GateOutcome {
        self.status = SessionAuthorization::Unknown;

        match api.check_session().await {
            Ok(info) if info.logged_in => {
                self.status = SessionAuthorization::Authorized;
                GateOutcome::Render
            }
            Ok(_) => {
                self.status = SessionAuthorization::Denied;
                GateOutcome::Redirect(Redirect::replacing(Destination::Entry))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Session check failed");
                self.status = SessionAuthorization::Denied;
                GateOutcome::Redirect(Redirect::replacing(Destination::Entry))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockMovieApi;
    use crate::error::AppError;
    use crate::models::SessionInfo;

    #[tokio::test]
    async fn test_logged_in_session_renders_children() {
        let mut api = MockMovieApi::new();
        api.expect_check_session().return_once(|| {
            Ok(SessionInfo {
                logged_in: true,
                user: Some("ada".to_string()),
            })
        });

        let mut gate = SessionGate::new();
        assert_eq!(gate.status(), SessionAuthorization::Unknown);
        assert_eq!(gate.activate(&api).await, GateOutcome::Render);
        assert_eq!(gate.status(), SessionAuthorization::Authorized);
    }

    #[tokio::test]
    async fn test_logged_out_session_redirects_replacing_history() {
        let mut api = MockMovieApi::new();
        api.expect_check_session().return_once(|| {
            Ok(SessionInfo {
                logged_in: false,
                user: None,
            })
        });

        let mut gate = SessionGate::new();
        let outcome = gate.activate(&api).await;
        assert_eq!(
            outcome,
            GateOutcome::Redirect(Redirect::replacing(Destination::Entry))
        );
        assert_eq!(gate.status(), SessionAuthorization::Denied);
    }

    #[tokio::test]
    async fn test_failed_check_denies() {
        let mut api = MockMovieApi::new();
        api.expect_check_session()
            .return_once(|| Err(AppError::ExternalApi("status 503".to_string())));

        let mut gate = SessionGate::new();
        assert!(matches!(gate.activate(&api).await, GateOutcome::Redirect(_)));
        assert_eq!(gate.status(), SessionAuthorization::Denied);
    }

    #[tokio::test]
    async fn test_each_activation_rechecks() {
        let mut api = MockMovieApi::new();
        let mut logged_in = true;
        api.expect_check_session().times(2).returning(move || {
            let info = SessionInfo {
                logged_in,
                user: None,
            };
            logged_in = false;
            Ok(info)
        });

        let mut gate = SessionGate::new();
        assert_eq!(gate.activate(&api).await, GateOutcome::Render);
        // The session expired in between: the second activation must notice.
        assert!(matches!(gate.activate(&api).await, GateOutcome::Redirect(_)));
    }
}
