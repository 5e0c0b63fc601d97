/// Errors surfaced by the Drive gateway. Always fatal for the invocation;
/// there are no retries and no partial-success paths.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// Non-success response from the Drive API.
    #[error("Drive API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure before a full response was received.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// Success response that omitted the created permission's id.
    #[error("permission was created but the response did not include an id")]
    MissingPermissionId,
}
