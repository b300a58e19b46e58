use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("unknown command `{0}`, type `help` for a list of commands")]
    UnknownCommand(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("`{0}` is not a valid number")]
    InvalidNumber(String),

    #[error("invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("invalid word pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("failed to format statistics: {0}")]
    Json(#[from] serde_json::Error),
}
