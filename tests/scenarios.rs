//! End-to-end session scenarios over the public API.

// Test target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use coauthor_graph::components::force_graph::theme::{CategoryPalette, OTHER_COLOR};
use coauthor_graph::components::force_graph::{
	ControllerState, ForceSettings, GraphData, GraphSession, NodeId, SessionConfig, SizeMetric,
};

fn session(json: &str) -> GraphSession {
	let data = GraphData::from_json(json).unwrap();
	GraphSession::new(
		&data,
		800.0,
		600.0,
		SessionConfig::default(),
		&CategoryPalette::category10(),
	)
	.unwrap()
}

fn chain() -> GraphSession {
	session(
		r#"{
			"nodes": [
				{"id": 1, "Name": "Ada", "country": "UK", "num_publications": 10, "num_citations": 1500},
				{"id": 2, "Name": "Grace", "country": "US", "num_publications": 400, "num_citations": 20},
				{"id": 3, "Name": "Edsger", "country": "NL", "num_publications": 75, "num_citations": 12000}
			],
			"links": [{"source": 1, "target": 2}, {"source": 2, "target": 3}]
		}"#,
	)
}

#[test]
fn chain_degrees_drive_initial_radius() {
	let s = chain();
	let author = |id: u64| s.author(&NodeId::from(id)).unwrap();

	assert_eq!(author(1).degree, 1);
	assert_eq!(author(2).degree, 2);
	assert_eq!(author(3).degree, 1);
	assert!(author(2).radius > author(1).radius);
	assert_eq!(author(1).radius, author(3).radius);
	assert_eq!(s.metric(), SizeMetric::Degree);
}

#[test]
fn reconfigure_resizes_by_citations_and_keeps_buckets() {
	let mut s = chain();
	let buckets_before = s.buckets().clone();
	let colors_before: Vec<_> = (1..=3_u64)
		.map(|id| s.author(&NodeId::from(id)).unwrap().color)
		.collect();

	for _ in 0..400 {
		s.tick(0.016);
	}
	assert!(!s.layout().is_running());

	let settings = ForceSettings::parse("0.5", "1.0", "-30", "citations").unwrap();
	s.reconfigure(&settings);

	assert_eq!(s.controller_state(), ControllerState::Idle);
	assert_eq!(s.metric(), SizeMetric::Citations);
	assert_eq!(s.buckets(), &buckets_before);

	let radius = |id: u64| s.author(&NodeId::from(id)).unwrap().radius;
	// citations / 500 + 5, clamped to [3, 20]
	assert_eq!(radius(1), 8.0);
	assert!((radius(2) - 5.04).abs() < 1e-12);
	assert_eq!(radius(3), 20.0);

	let colors_after: Vec<_> = (1..=3_u64)
		.map(|id| s.author(&NodeId::from(id)).unwrap().color)
		.collect();
	assert_eq!(colors_before, colors_after);

	let forces = s.layout().forces();
	assert_eq!((forces.link, forces.collide, forces.charge), (0.5, 1.0, -30.0));
	assert!(s.layout().is_running());
	assert_eq!(s.layout().alpha(), 1.0);
}

#[test]
fn reconfigure_twice_is_idempotent() {
	let mut s = chain();
	let settings = ForceSettings::parse("1", "0.7", "-10", "publications").unwrap();

	s.reconfigure(&settings);
	let first: Vec<_> = (1..=3_u64)
		.map(|id| s.author(&NodeId::from(id)).unwrap())
		.map(|a| (a.radius, a.color))
		.collect();
	s.reconfigure(&settings);
	let second: Vec<_> = (1..=3_u64)
		.map(|id| s.author(&NodeId::from(id)).unwrap())
		.map(|a| (a.radius, a.color))
		.collect();

	assert_eq!(first, second);
	// publications / 50 + 5: 400 -> 13
	assert_eq!(first[1].0, 13.0);
}

#[test]
fn only_top_ten_countries_are_colored() {
	let mut nodes = Vec::new();
	for country in ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"] {
		for j in 0..2 {
			nodes.push(format!(r#"{{"id": "{country}{j}", "country": "{country}"}}"#));
		}
	}
	nodes.push(r#"{"id": "K0", "country": "K"}"#.to_string());
	let s = session(&format!(r#"{{"nodes": [{}], "links": []}}"#, nodes.join(",")));

	assert_eq!(s.buckets().len(), 10);
	assert_eq!(s.author(&NodeId::from("K0")).unwrap().color, OTHER_COLOR);
	assert_eq!(
		s.author(&NodeId::from("A0")).unwrap().color,
		CategoryPalette::category10().get(0)
	);
	assert_eq!(
		s.author(&NodeId::from("J1")).unwrap().color,
		CategoryPalette::category10().get(9)
	);
}

#[test]
fn config_json_overrides_defaults() {
	let config: SessionConfig =
		serde_json::from_str(r#"{"top_n": 3, "zoom": {"max": 8.0}, "forces": {"charge": -30.0}}"#)
			.unwrap();

	assert_eq!(config.top_n, 3);
	assert_eq!(config.zoom.min, 0.5);
	assert_eq!(config.zoom.max, 8.0);
	assert_eq!(config.forces.charge, -30.0);
	assert_eq!(config.forces.link, 1.0);
	assert_eq!(config.tooltip_secs, 3.0);
}
