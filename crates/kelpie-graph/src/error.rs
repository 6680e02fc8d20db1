pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Node id already exists: {id}")]
    DuplicateNodeId { id: String },

    #[error("Unknown node kind: {kind}")]
    UnknownNodeKind { kind: String },

    #[error("Malformed graph JSON: {message}")]
    MalformedGraphJson { message: String },
}
