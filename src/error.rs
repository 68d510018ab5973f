use thiserror::Error;

use crate::feature::FeatureError;


#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    /// The pool could not be built or a connection could not be acquired.
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("database error: {0}")]
    Query(#[from] diesel::result::Error),

    #[error("invalid record: {0}")]
    Invalid(&'static str),

    #[error("feature error: {0}")]
    Feature(#[from] FeatureError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;


#[cfg(test)]
mod tests {
    use super::*;

    fn format_with_crate_error() -> Result<()> {
        Err::<(), _>(FeatureError::MissingCoordinate("latitude"))?;
        Ok(())
    }

    #[test]
    fn feature_errors_convert() {
        let err = format_with_crate_error().unwrap_err();
        assert!(matches!(err, Error::Feature(FeatureError::MissingCoordinate("latitude"))));
        assert_eq!(err.to_string(), "feature error: incident has no latitude");
    }
}
