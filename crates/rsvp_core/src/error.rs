use thiserror::Error;

/// Directory load failures. Every variant is terminal for the load attempt:
/// the user recovers by reloading, never by automatic retry.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("directory request failed: {0}")]
    Transport(String),
    #[error("directory request returned HTTP {0}")]
    Status(u16),
    #[error("directory response was not a guest list")]
    Format,
    #[error("directory returned no usable guest records")]
    Empty,
}

/// A selector value that no longer resolves against the directory.
/// Recoverable: the user simply re-selects.
#[derive(Debug, Error)]
#[error("guest '{0}' not found in directory")]
pub struct SelectionError(pub String);

/// Submit was attempted with nothing rendered to submit. Should not occur
/// while selection keeps the checklist populated, but checked defensively.
#[derive(Debug, Error)]
#[error("no household members rendered to confirm")]
pub struct ValidationError;

/// Confirmation delivery failures. Recoverable: the user retries by
/// resubmitting.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("confirmation request failed: {0}")]
    Transport(String),
    #[error("confirmation returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Everything that can stop a submission, validation and delivery alike.
#[derive(Debug, Error)]
pub enum ConfirmError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Submit(#[from] SubmitError),
}
