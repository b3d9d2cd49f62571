use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("introspection payload is malformed: {0}")]
    Malformed(String),
    #[error("introspection response carried no schema (errors: {0})")]
    MissingSchema(String),
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("endpoint answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("response is not JSON: {0}")]
    Decode(String),
    #[error("cannot encode request body: {0}")]
    Encode(String),
    #[error("cannot build HTTP client: {0}")]
    Client(String),
    #[error("failed to sign request: {0}")]
    Signing(String),
    #[error("cannot derive an AWS region from endpoint {0}")]
    Region(String),
    #[error("invalid header {0}")]
    Header(String),
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache I/O on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cached schema {path} is unreadable: {reason}")]
    Corrupt { path: PathBuf, reason: String },
    #[error("no home directory to place the schema cache in")]
    NoHome,
}

#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("interrupted by operator")]
    Interrupted,
    #[error("prompt failed: {0}")]
    Terminal(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No AppSync GraphQL endpoint found on the supplied page.")]
    NoEndpoint,
    #[error("No valid authentication mechanisms were detected.")]
    NoAuthMechanism,
    #[error("Unable to perform the introspection query.")]
    Introspection(#[source] TransportError),
    #[error("Nothing to interact with.")]
    NothingToBrowse,
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Cache(#[from] CacheError),
    #[error(transparent)]
    Prompt(#[from] PromptError),
}
