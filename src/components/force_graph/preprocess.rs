//! Degree counting and country bucketing.
//!
//! Runs once when a session is built. The buckets computed here stay fixed
//! for the lifetime of the session, so node colors never shift after load.

use std::collections::HashMap;

use serde::Deserialize;

use super::state::{AuthorInfo, SessionConfig};
use super::theme::{CategoryPalette, Color, OTHER_COLOR};
use super::types::{GraphData, GraphNode, NodeId};

/// Number of countries that get their own color.
pub const DEFAULT_TOP_N: usize = 10;

/// How an edge from a node to itself contributes to that node's degree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfLoopPolicy {
	/// Counted once as source and once as target.
	#[default]
	CountTwice,
	CountOnce,
}

/// Count incident edges for every node id that appears in `data.nodes`.
///
/// Nodes without edges map to zero. Endpoints naming ids that are not in the
/// node list are ignored here.
pub fn degrees(data: &GraphData, policy: SelfLoopPolicy) -> HashMap<NodeId, usize> {
	let mut counts: HashMap<NodeId, usize> =
		data.nodes.iter().map(|n| (n.id.clone(), 0)).collect();

	for link in &data.links {
		if let Some(count) = counts.get_mut(&link.source) {
			*count += 1;
		}
		if link.source == link.target && policy == SelfLoopPolicy::CountOnce {
			continue;
		}
		if let Some(count) = counts.get_mut(&link.target) {
			*count += 1;
		}
	}
	counts
}

/// The `n` most common countries, most common first.
///
/// Ties keep the order in which the countries first appear in `nodes`.
pub fn top_countries(nodes: &[GraphNode], n: usize) -> Vec<String> {
	let mut order: Vec<(&str, usize)> = Vec::new();
	let mut position: HashMap<&str, usize> = HashMap::new();

	for node in nodes {
		let country = node.country.as_str();
		match position.get(country) {
			Some(&i) => order[i].1 += 1,
			None => {
				position.insert(country, order.len());
				order.push((country, 1));
			}
		}
	}

	// sort_by is stable, first occurrence wins ties
	order.sort_by(|a, b| b.1.cmp(&a.1));
	order
		.into_iter()
		.take(n)
		.map(|(country, _)| country.to_string())
		.collect()
}

/// Top countries paired with their palette colors.
#[derive(Clone, Debug, PartialEq)]
pub struct CountryBuckets {
	entries: Vec<(String, Color)>,
}

impl CountryBuckets {
	/// Assign `palette[rank]` to each country in rank order.
	pub fn new(countries: Vec<String>, palette: &CategoryPalette) -> Self {
		let entries = countries
			.into_iter()
			.enumerate()
			.map(|(rank, country)| (country, palette.get(rank)))
			.collect();
		Self { entries }
	}

	/// Rank the countries of `nodes` and bucket the top `n`.
	pub fn from_nodes(nodes: &[GraphNode], n: usize, palette: &CategoryPalette) -> Self {
		Self::new(top_countries(nodes, n), palette)
	}

	pub fn contains(&self, country: &str) -> bool {
		self.entries.iter().any(|(c, _)| c == country)
	}

	/// Bucket color for `country`, or the neutral color when it is not bucketed.
	pub fn color_for(&self, country: &str) -> Color {
		self.entries
			.iter()
			.find(|(c, _)| c == country)
			.map(|(_, color)| *color)
			.unwrap_or(OTHER_COLOR)
	}

	/// Bucketed countries in rank order, for the legend.
	pub fn entries(&self) -> &[(String, Color)] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Annotate every node with its degree and bucket color, in input order.
///
/// Radius is left at zero; it depends on the sizing metric chosen later.
pub fn annotate(
	data: &GraphData,
	config: &SessionConfig,
	palette: &CategoryPalette,
) -> (Vec<AuthorInfo>, CountryBuckets) {
	let degrees = degrees(data, config.self_loops);
	let buckets = CountryBuckets::from_nodes(&data.nodes, config.top_n, palette);

	let authors = data
		.nodes
		.iter()
		.map(|node| AuthorInfo {
			id: node.id.clone(),
			name: node.name.clone(),
			country: node.country.clone(),
			publications: node.num_publications,
			citations: node.num_citations,
			degree: degrees.get(&node.id).copied().unwrap_or(0),
			color: buckets.color_for(&node.country),
			radius: 0.0,
		})
		.collect();
	(authors, buckets)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::GraphLink;

	fn node(id: u64, country: &str) -> GraphNode {
		GraphNode {
			id: id.into(),
			name: None,
			country: country.to_string(),
			num_publications: 0,
			num_citations: 0,
		}
	}

	fn link(source: u64, target: u64) -> GraphLink {
		GraphLink {
			source: source.into(),
			target: target.into(),
		}
	}

	fn countries(counts: &[(&str, usize)]) -> Vec<GraphNode> {
		let mut nodes = Vec::new();
		for &(country, count) in counts {
			for _ in 0..count {
				nodes.push(node(nodes.len() as u64, country));
			}
		}
		nodes
	}

	#[test]
	fn degree_counts_both_endpoints() {
		let data = GraphData {
			nodes: vec![node(1, "A"), node(2, "A"), node(3, "B"), node(4, "B")],
			links: vec![link(1, 2), link(2, 3), link(1, 3)],
		};
		let degrees = degrees(&data, SelfLoopPolicy::default());

		for n in &data.nodes {
			let expected = data
				.links
				.iter()
				.filter(|l| l.source == n.id || l.target == n.id)
				.count();
			assert_eq!(degrees[&n.id], expected, "node {}", n.id);
		}
		assert_eq!(degrees[&NodeId::from(4_u64)], 0);
	}

	#[test]
	fn self_loop_policy_is_respected() {
		let data = GraphData {
			nodes: vec![node(1, "A"), node(2, "A")],
			links: vec![link(1, 1), link(1, 2)],
		};
		assert_eq!(degrees(&data, SelfLoopPolicy::CountTwice)[&NodeId::from(1_u64)], 3);
		assert_eq!(degrees(&data, SelfLoopPolicy::CountOnce)[&NodeId::from(1_u64)], 2);
	}

	#[test]
	fn unknown_endpoints_do_not_create_entries() {
		let data = GraphData {
			nodes: vec![node(1, "A")],
			links: vec![link(1, 9)],
		};
		let degrees = degrees(&data, SelfLoopPolicy::default());
		assert_eq!(degrees.len(), 1);
		assert_eq!(degrees[&NodeId::from(1_u64)], 1);
	}

	#[test]
	fn ties_break_by_first_occurrence() {
		let nodes = countries(&[("A", 5), ("B", 3), ("C", 3), ("D", 1)]);
		assert_eq!(top_countries(&nodes, 2), vec!["A", "B"]);

		let nodes = countries(&[("D", 1), ("C", 3), ("B", 3), ("A", 5)]);
		assert_eq!(top_countries(&nodes, 2), vec!["A", "C"]);
	}

	#[test]
	fn interleaved_countries_are_counted_not_grouped() {
		let nodes = vec![node(1, "X"), node(2, "Y"), node(3, "Y"), node(4, "X"), node(5, "Y")];
		assert_eq!(top_countries(&nodes, 10), vec!["Y", "X"]);
	}

	#[test]
	fn colors_are_stable_and_unbucketed_countries_are_gray() {
		let nodes = countries(&[("A", 3), ("B", 2), ("C", 1)]);
		let palette = CategoryPalette::category10();
		let first = CountryBuckets::from_nodes(&nodes, 2, &palette);
		let second = CountryBuckets::from_nodes(&nodes, 2, &palette);

		assert_eq!(first, second);
		assert_eq!(first.color_for("A"), palette.get(0));
		assert_eq!(first.color_for("B"), palette.get(1));
		assert_eq!(first.color_for("C"), OTHER_COLOR);
		assert!(!first.contains("C"));
		assert_eq!(first.len(), 2);
	}

	#[test]
	fn annotate_attaches_degree_and_color_in_input_order() {
		let data = GraphData {
			nodes: vec![node(1, "A"), node(2, "B"), node(3, "A"), node(4, "C")],
			links: vec![link(1, 2), link(1, 3), link(3, 3)],
		};
		let config = SessionConfig {
			top_n: 2,
			..SessionConfig::default()
		};
		let palette = CategoryPalette::category10();
		let (authors, buckets) = annotate(&data, &config, &palette);

		let ids: Vec<_> = authors.iter().map(|a| a.id.clone()).collect();
		let expected: Vec<NodeId> = (1..=4_u64).map(NodeId::from).collect();
		assert_eq!(ids, expected);

		let degrees: Vec<_> = authors.iter().map(|a| a.degree).collect();
		assert_eq!(degrees, vec![2, 1, 3, 0]);

		assert_eq!(buckets.entries().len(), 2);
		assert_eq!(authors[0].color, palette.get(0));
		assert_eq!(authors[1].color, palette.get(1));
		assert_eq!(authors[2].color, authors[0].color);
		assert_eq!(authors[3].color, OTHER_COLOR);
		assert!(authors.iter().all(|a| a.radius == 0.0));
	}
}
