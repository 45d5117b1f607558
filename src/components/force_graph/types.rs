//! Dataset structures for the co-authorship graph.

use std::fmt;

use serde::{Deserialize, Deserializer};

/// Node identifier. Datasets use either integer or string ids; both are
/// normalized to their string form so `1` and `"1"` refer to the same author.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub String);

impl NodeId {
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for NodeId {
	fn from(value: &str) -> Self {
		Self(value.to_string())
	}
}

impl From<u64> for NodeId {
	fn from(value: u64) -> Self {
		Self(value.to_string())
	}
}

impl<'de> Deserialize<'de> for NodeId {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum RawId {
			Int(i64),
			Float(f64),
			Str(String),
		}

		Ok(match RawId::deserialize(deserializer)? {
			RawId::Int(n) => NodeId(n.to_string()),
			RawId::Float(n) => NodeId(n.to_string()),
			RawId::Str(s) => NodeId(s),
		})
	}
}

/// An author in the co-authorship network.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
	/// Unique identifier. Used to reference nodes in links.
	pub id: NodeId,
	/// Display name shown in the tooltip.
	#[serde(default, alias = "Name")]
	pub name: Option<String>,
	/// Affiliation country, used for color bucketing.
	#[serde(default)]
	pub country: String,
	#[serde(default)]
	pub num_publications: u64,
	#[serde(default)]
	pub num_citations: u64,
}

/// A collaboration between two authors.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphLink {
	pub source: NodeId,
	pub target: NodeId,
}

/// Complete dataset: authors and collaborations.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// Parse a dataset from its JSON text.
	pub fn from_json(text: &str) -> crate::error::Result<Self> {
		Ok(serde_json::from_str(text)?)
	}
}
