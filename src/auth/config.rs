use clap::ValueEnum;

/// How the auth guard validates session cookies
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum AuthCheck {
    /// Both cookies are present and non-empty
    Presence,
    /// Cookies are present and the media server still accepts the token
    #[default]
    Liveness,
}
