/// Crate-wide Result alias over anyhow::Error, so adapters and the
/// application layer share one error-handling convention.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
