//! Error contract shared by every pipeline stage.

/// Trait implemented by every stage error type.
///
/// Provides a stable code and a stage name so callers can report failures
/// uniformly without matching on each concrete error type.
///
/// # Example
///
/// ```ignore
/// use epgen_spec::StageError;
///
/// fn report<E: StageError>(err: &E) {
///     eprintln!("[{}] {} stage failed: {}", err.code(), err.stage(), err.message());
/// }
/// ```
pub trait StageError: std::error::Error {
    /// Stable error code such as `GEN_001` or `EXTRACT_002`.
    fn code(&self) -> &'static str;

    /// Human-readable message. Defaults to the `Display` output.
    fn message(&self) -> String {
        self.to_string()
    }

    /// The stage that failed: `generator`, `extraction`, `workspace`,
    /// `config`, or `pipeline`.
    fn stage(&self) -> &'static str;
}
