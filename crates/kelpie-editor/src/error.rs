use kelpie_graph::ValidationWarning;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Graph(#[from] kelpie_graph::Error),

    #[error("Invalid config JSON for node {node_id}: {message}")]
    InvalidConfigJson { node_id: String, message: String },

    #[error("Config for node {node_id} must be a JSON object")]
    ConfigNotObject { node_id: String },

    #[error("Graph has unresolved warnings: {}", join_warnings(.warnings))]
    ValidationFailed { warnings: Vec<ValidationWarning> },
}

fn join_warnings(warnings: &[ValidationWarning]) -> String {
    warnings
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" | ")
}
