/// Navigation targets within the client shell.
///
/// The engine never performs navigation itself; flows and the session gate
/// return these values and the embedding UI maps them onto its router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Unauthenticated entry point (login / create account).
    Entry,
    /// Authenticated landing page.
    Landing,
    SearchResults(String),
    Movie(u64),
    Profile,
    Watchlist,
    TopRated,
    GenreBrowse(u64),
    ProfileSetup,
}

/// Explicit route-transition record passed at transition time, replacing the
/// ambient history-state object of a browser router: the path the user came
/// from plus whatever that screen needs to restore itself on "back".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavContext {
    pub from_path: String,
    pub genre_id: Option<u64>,
    pub query: Option<String>,
}

impl NavContext {
    pub fn from_path(path: impl Into<String>) -> Self {
        Self {
            from_path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_genre(mut self, genre_id: u64) -> Self {
        self.genre_id = Some(genre_id);
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }
}

/// A one-way navigation instruction. `replace_history` means the previous
/// entry must not be reachable via back-navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub to: Destination,
    pub replace_history: bool,
}

impl Redirect {
    pub fn replacing(to: Destination) -> Self {
        Self {
            to,
            replace_history: true,
        }
    }

    pub fn pushing(to: Destination) -> Self {
        Self {
            to,
            replace_history: false,
        }
    }
}
