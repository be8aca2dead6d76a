use thiserror::Error;

pub type Result<T> = std::result::Result<T, QueryError>;

/// Failures raised while querying the repository through the `git` executable
#[derive(Debug, Error)]
pub enum QueryError {
    /// The tool exited non-zero or produced nothing usable
    #[error("command `{command}` failed: {message}")]
    Command { command: String, message: String },

    /// The tool could not be spawned at all
    #[error("could not run `{command}`")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Fixed-format output did not have the expected number of fields
    #[error("expected {expected} fields in git output, got {found}: {line:?}")]
    Parse {
        expected: usize,
        found: usize,
        line: String,
    },

    /// A timestamp field did not match the expected format
    #[error("invalid date {value:?} in git output: {line:?}")]
    Date {
        value: String,
        line: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("cannot resolve a commit from an empty reference")]
    EmptyReference,

    /// Resolution of a named reference failed; wraps the underlying cause
    #[error("failed to resolve {what} {name}")]
    Resolve {
        what: &'static str,
        name: String,
        #[source]
        source: Box<QueryError>,
    },
}

impl QueryError {
    pub(crate) fn resolve(what: &'static str, name: &str, source: QueryError) -> Self {
        QueryError::Resolve {
            what,
            name: name.to_string(),
            source: Box::new(source),
        }
    }
}
