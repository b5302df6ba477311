#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Connection could not be established or a query failed. Distinct from
    /// a legitimate empty result, which is just an empty Vec.
    #[error("weather store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
}
