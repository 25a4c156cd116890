/// Entry screens: sign-in and account creation
///
/// Sign-in is a single credential check; the session cookie rides along in
/// the transport. Account creation is two-phase: a probe that reserves
/// nothing and only asks whether the username is taken, then the setup
/// wizard, whose terminal action actually creates the account.
use crate::{
    api::MovieApi,
    error::{AppError, AppResult},
    navigation::{Destination, Redirect},
    services::setup::SetupWizard,
};

#[derive(Debug, Clone, PartialEq)]
pub enum SignInOutcome {
    /// Credentials accepted; the session is established.
    SignedIn(Redirect),
    /// Credentials rejected; the screen surfaces a message and stays put.
    Rejected,
}

pub async fn sign_in(
    api: &dyn MovieApi,
    username: &str,
    password: &str,
) -> AppResult<SignInOutcome> {
    if api.sign_in(username, password).await? {
        Ok(SignInOutcome::SignedIn(Redirect::replacing(
            Destination::Landing,
        )))
    } else {
        Ok(SignInOutcome::Rejected)
    }
}

pub async fn sign_out(api: &dyn MovieApi) -> AppResult<Redirect> {
    api.sign_out().await?;
    Ok(Redirect::replacing(Destination::Entry))
}

/// Raw input from the create-account form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> AppResult<()> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(AppError::InvalidInput(
                "Please fill in all fields".to_string(),
            ));
        }
        if self.password != self.confirm_password {
            return Err(AppError::InvalidInput(
                "Passwords do not match".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum RegistrationOutcome {
    /// Username free: hand the caller a create-mode wizard carrying the
    /// credentials for its terminal submission.
    Proceed(SetupWizard),
    /// Username taken: back to the entry point.
    AlreadyExists(Redirect),
}

pub async fn begin_registration(
    api: &dyn MovieApi,
    form: &RegistrationForm,
) -> AppResult<RegistrationOutcome> {
    form.validate()?;

    let tag = api.register_probe(&form.username, &form.password).await?;
    match tag.as_str() {
        "New user" => Ok(RegistrationOutcome::Proceed(SetupWizard::create(
            form.username.clone(),
            form.password.clone(),
        ))),
        "User already exists" => Ok(RegistrationOutcome::AlreadyExists(Redirect::replacing(
            Destination::Entry,
        ))),
        other => Err(AppError::ExternalApi(format!(
            "Unexpected registration response: {}",
            other
        ))),
    }
}
