//! Error types for dataset loading, session construction and form input.

/// Failures while loading the dataset or building a graph session.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
	#[error("no element with id `{0}` in the document")]
	MissingElement(String),
	#[error("element `{0}` is not a script element")]
	NotAScript(String),
	#[error("failed to parse JSON: {0}")]
	Parse(#[from] serde_json::Error),
	#[error("link {from} -> {to} references an unknown node")]
	UnresolvedEndpoint { from: String, to: String },
	#[error("invalid config: {0}")]
	InvalidConfig(String),
}

/// Rejected values from the force-parameter form.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ControlError {
	#[error("{field} is not a number: {value:?}")]
	InvalidNumber { field: &'static str, value: String },
	#[error("unknown sizing metric {0:?}")]
	UnknownMetric(String),
}

pub type Result<T, E = GraphError> = std::result::Result<T, E>;
