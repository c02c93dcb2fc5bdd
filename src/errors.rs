/// Error taxonomy for the booking session.
///
/// `Extraction` and `Validation` are recoverable and handled at the session
/// loop by re-prompting the user. `Config` is fatal and only surfaces at
/// startup, before any session begins. A user abort is not an error: the
/// session reports it as a clean outcome.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("extraction error: {0}")]
    Extraction(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("configuration error: {0}")]
    Config(String),
}
