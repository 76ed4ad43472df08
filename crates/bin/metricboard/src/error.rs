//! Command failures reported on exit.

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("not signed in, run `metricboard login` first")]
    NotSignedIn,
    #[error("{0}")]
    Login(String),
    #[error("{0}")]
    Fetch(String),
    #[error("failed to write output")]
    Io(#[from] std::io::Error),
}
