use thiserror::Error;

/// Problems with a presenter command. Remote failures never show up here:
/// they reach the views as plain messages.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AppError {
    #[error("{0}")]
    BadCommand(String),

    #[error("`{command}` is not available on {route}")]
    Unavailable { command: &'static str, route: String },

    #[error("no dialog is open")]
    NoOpenForm,
}
