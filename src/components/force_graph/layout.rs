//! Force layout driven by the `force_graph` solver.
//!
//! The solver provides charge repulsion and spring attraction. This module
//! layers on top of it:
//! - named force strengths (`link`, `charge`, `collide`) that can be replaced
//!   at any time,
//! - a circle collision pass and a centering pass after each solver step,
//! - an energy value (`alpha`) that scales each step and decays towards zero,
//!   after which the layout stops stepping until it is restarted.

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;
use serde::Deserialize;

/// Anything the layout can keep from overlapping.
pub trait Collider {
	/// Radius of the circle this node occupies, in world units.
	fn collision_radius(&self) -> f64;
}

/// Strength of each named force.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ForceConfig {
	/// Spring pull along links.
	pub link: f64,
	/// Many-body strength. Negative values repel.
	pub charge: f64,
	/// Overlap resolution, 0 disables it and 1 fully separates touching nodes.
	pub collide: f64,
}

impl Default for ForceConfig {
	fn default() -> Self {
		Self {
			link: 1.0,
			charge: -1.0,
			collide: 1.0,
		}
	}
}

/// Solver tuning and energy schedule.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
	/// Solver spring constant per unit of link strength.
	pub spring_per_link: f64,
	/// Solver repulsion per unit of (negated) charge strength.
	pub repulsion_per_charge: f64,
	pub force_max: f64,
	pub node_speed: f64,
	pub damping_factor: f64,
	pub node_mass: f64,
	/// Relaxation passes of the collide force per step.
	pub collide_iterations: usize,
	/// Fraction of the remaining energy lost per step.
	pub alpha_decay: f64,
	/// Energy below which the layout stops stepping.
	pub alpha_min: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		let alpha_min: f64 = 0.001;
		Self {
			spring_per_link: 0.05,
			repulsion_per_charge: 5.0,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
			node_mass: 10.0,
			collide_iterations: 2,
			// Reaches alpha_min after 300 steps.
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			alpha_min,
		}
	}
}

/// Positions of every node after one step.
#[derive(Clone, Debug)]
pub struct PositionSnapshot {
	pub alpha: f64,
	pub positions: Vec<(DefaultNodeIdx, f32, f32)>,
}

/// Initial placement on a sunflower spiral around the origin.
pub fn phyllotaxis(i: usize) -> (f32, f32) {
	let radius = 10.0 * (0.5 + i as f64).sqrt();
	let angle = i as f64 * PI * (3.0 - 5f64.sqrt());
	((radius * angle.cos()) as f32, (radius * angle.sin()) as f32)
}

/// Force layout over nodes carrying `N`.
pub struct Layout<N> {
	graph: ForceGraph<N, ()>,
	forces: ForceConfig,
	config: LayoutConfig,
	alpha: f64,
	running: bool,
	node_count: usize,
}

impl<N: Collider> Layout<N> {
	pub fn new(forces: ForceConfig, config: LayoutConfig) -> Self {
		let graph = ForceGraph::new(solver_parameters(&forces, &config));
		Self {
			graph,
			forces,
			config,
			alpha: 1.0,
			running: true,
			node_count: 0,
		}
	}

	/// Add a node at the next spiral position.
	pub fn add_node(&mut self, data: N) -> DefaultNodeIdx {
		let (x, y) = phyllotaxis(self.node_count);
		self.node_count += 1;
		self.graph.add_node(NodeData {
			x,
			y,
			mass: self.config.node_mass as f32,
			is_anchor: false,
			user_data: data,
		})
	}

	pub fn add_edge(&mut self, source: DefaultNodeIdx, target: DefaultNodeIdx) {
		self.graph.add_edge(source, target, EdgeData::default());
	}

	pub fn graph(&self) -> &ForceGraph<N, ()> {
		&self.graph
	}

	/// Mutate per-node data in place. Positions are left untouched.
	pub fn update_nodes(&mut self, mut f: impl FnMut(DefaultNodeIdx, &mut N)) {
		self.graph.visit_nodes_mut(|node| {
			let idx = node.index();
			f(idx, &mut node.data.user_data);
		});
	}

	pub fn forces(&self) -> ForceConfig {
		self.forces
	}

	/// Replace all force strengths. Takes effect on the next step.
	pub fn set_forces(&mut self, forces: ForceConfig) {
		self.forces = forces;
		self.graph.parameters = solver_parameters(&self.forces, &self.config);
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Reset energy to its maximum and resume stepping.
	pub fn restart(&mut self) {
		self.alpha = 1.0;
		self.running = true;
	}

	/// Advance one step. Returns `false` once the layout has converged.
	pub fn step(&mut self, dt: f32) -> bool {
		if !self.running {
			return false;
		}

		self.graph.update(dt * self.alpha as f32);
		self.collide_and_center();

		self.alpha -= self.alpha * self.config.alpha_decay;
		if self.alpha < self.config.alpha_min {
			self.running = false;
			debug!("coauthor-graph: layout converged");
		}
		true
	}

	pub fn snapshot(&self) -> PositionSnapshot {
		let mut positions = Vec::with_capacity(self.node_count);
		self.graph
			.visit_nodes(|node| positions.push((node.index(), node.x(), node.y())));
		PositionSnapshot {
			alpha: self.alpha,
			positions,
		}
	}

	/// Infinite stream of snapshots, one step of `dt` per item.
	pub fn snapshots(&mut self, dt: f32) -> Snapshots<'_, N> {
		Snapshots { layout: self, dt }
	}

	fn collide_and_center(&mut self) {
		let mut circles: Vec<(DefaultNodeIdx, f64, f64, f64)> = Vec::with_capacity(self.node_count);
		self.graph.visit_nodes(|node| {
			circles.push((
				node.index(),
				node.x() as f64,
				node.y() as f64,
				node.data.user_data.collision_radius(),
			));
		});
		if circles.is_empty() {
			return;
		}

		// Above 1 the pass overshoots the contact distance.
		let strength = self.forces.collide.clamp(0.0, 1.0);
		if strength > 0.0 {
			for _ in 0..self.config.collide_iterations {
				resolve_overlaps(&mut circles, strength);
			}
		}

		let n = circles.len() as f64;
		let (mean_x, mean_y) = circles
			.iter()
			.fold((0.0, 0.0), |(sx, sy), &(_, x, y, _)| (sx + x / n, sy + y / n));

		let moved: HashMap<DefaultNodeIdx, (f64, f64)> = circles
			.into_iter()
			.map(|(idx, x, y, _)| (idx, (x - mean_x, y - mean_y)))
			.collect();
		self.graph.visit_nodes_mut(|node| {
			if let Some(&(x, y)) = moved.get(&node.index()) {
				node.data.x = x as f32;
				node.data.y = y as f32;
			}
		});
	}
}

fn solver_parameters(forces: &ForceConfig, config: &LayoutConfig) -> SimulationParameters {
	SimulationParameters {
		force_charge: (-forces.charge * config.repulsion_per_charge) as f32,
		force_spring: (forces.link * config.spring_per_link) as f32,
		force_max: config.force_max as f32,
		node_speed: config.node_speed as f32,
		damping_factor: config.damping_factor as f32,
	}
}

/// One pairwise relaxation pass. Each overlapping pair moves apart along the
/// line between centers, each node taking half of the correction.
fn resolve_overlaps(circles: &mut [(DefaultNodeIdx, f64, f64, f64)], strength: f64) {
	for i in 0..circles.len() {
		for j in (i + 1)..circles.len() {
			let (_, xi, yi, ri) = circles[i];
			let (_, xj, yj, rj) = circles[j];
			let contact = ri + rj;
			let (mut dx, mut dy) = (xj - xi, yj - yi);
			let mut dist = (dx * dx + dy * dy).sqrt();
			if dist >= contact {
				continue;
			}
			if dist < 1e-6 {
				// Coincident centers: separate along a fixed per-pair direction.
				let angle = (i as f64 * 0.618_034 + j as f64 * 0.414_214) * 2.0 * PI;
				(dx, dy, dist) = (angle.cos(), angle.sin(), 1.0);
			}
			let push = (contact - dist) / dist * strength * 0.5;
			circles[i].1 -= dx * push;
			circles[i].2 -= dy * push;
			circles[j].1 += dx * push;
			circles[j].2 += dy * push;
		}
	}
}

/// Lazy, infinite position stream over a [`Layout`].
///
/// After convergence the stream keeps yielding the settled positions;
/// [`Snapshots::restart`] sets them moving again.
pub struct Snapshots<'a, N> {
	layout: &'a mut Layout<N>,
	dt: f32,
}

impl<N: Collider> Snapshots<'_, N> {
	pub fn restart(&mut self) {
		self.layout.restart();
	}

	pub fn is_running(&self) -> bool {
		self.layout.is_running()
	}
}

impl<N: Collider> Iterator for Snapshots<'_, N> {
	type Item = PositionSnapshot;

	fn next(&mut self) -> Option<Self::Item> {
		self.layout.step(self.dt);
		Some(self.layout.snapshot())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Clone, Debug, Default)]
	struct Disc(f64);

	impl Collider for Disc {
		fn collision_radius(&self) -> f64 {
			self.0
		}
	}

	fn distance(snapshot: &PositionSnapshot, a: usize, b: usize) -> f64 {
		let (_, ax, ay) = snapshot.positions[a];
		let (_, bx, by) = snapshot.positions[b];
		((ax - bx) as f64).hypot((ay - by) as f64)
	}

	#[test]
	fn energy_decays_until_the_layout_stops() {
		let mut layout = Layout::new(ForceConfig::default(), LayoutConfig::default());
		let a = layout.add_node(Disc(3.0));
		let b = layout.add_node(Disc(3.0));
		layout.add_edge(a, b);

		let steps = layout.snapshots(0.016).take(400).count();
		assert_eq!(steps, 400);
		assert!(!layout.is_running());
		assert!(layout.alpha() < LayoutConfig::default().alpha_min);
		assert!(!layout.step(0.016));

		layout.restart();
		assert!(layout.is_running());
		assert_eq!(layout.alpha(), 1.0);
	}

	#[test]
	fn snapshots_are_restartable() {
		let mut layout = Layout::new(ForceConfig::default(), LayoutConfig::default());
		layout.add_node(Disc(3.0));

		let mut stream = layout.snapshots(0.016);
		let first = stream.next().unwrap();
		assert!(first.alpha < 1.0);
		let settled = stream.nth(500).unwrap();
		assert!(!stream.is_running());
		assert_eq!(settled.positions.len(), 1);

		stream.restart();
		assert!(stream.is_running());
	}

	#[test]
	fn collide_separates_overlapping_nodes() {
		let forces = ForceConfig {
			link: 0.0,
			charge: 0.0,
			collide: 1.0,
		};
		let mut layout = Layout::new(forces, LayoutConfig::default());
		layout.add_node(Disc(30.0));
		layout.add_node(Disc(30.0));
		assert!(distance(&layout.snapshot(), 0, 1) < 60.0);

		let snapshot = layout.snapshots(0.016).next().unwrap();
		assert!(distance(&snapshot, 0, 1) > 59.0);
	}

	#[test]
	fn layout_stays_centered_on_origin() {
		let mut layout = Layout::new(ForceConfig::default(), LayoutConfig::default());
		let ids: Vec<_> = (0..6).map(|_| layout.add_node(Disc(4.0))).collect();
		for pair in ids.windows(2) {
			layout.add_edge(pair[0], pair[1]);
		}

		let snapshot = layout.snapshots(0.016).nth(20).unwrap();
		let n = snapshot.positions.len() as f64;
		let mean_x: f64 = snapshot.positions.iter().map(|p| p.1 as f64).sum::<f64>() / n;
		let mean_y: f64 = snapshot.positions.iter().map(|p| p.2 as f64).sum::<f64>() / n;
		assert!(mean_x.abs() < 1e-2 && mean_y.abs() < 1e-2);
	}

	#[test]
	fn set_forces_updates_solver_parameters() {
		let mut layout: Layout<Disc> = Layout::new(ForceConfig::default(), LayoutConfig::default());
		layout.set_forces(ForceConfig {
			link: 0.5,
			charge: -30.0,
			collide: 1.0,
		});

		assert_eq!(layout.forces().charge, -30.0);
		assert_eq!(layout.graph().parameters.force_charge, 150.0);
		assert_eq!(layout.graph().parameters.force_spring, 0.025);
	}
}
