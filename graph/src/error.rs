use gitup_core::QueryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("could not read git {category}")]
    Listing {
        category: &'static str,
        #[source]
        source: QueryError,
    },
}
