//! Graph session state and interaction tracking.
//!
//! A [`GraphSession`] is built once per dataset. It owns the force layout with
//! per-author metadata, the fixed country buckets, the radius scale, the view
//! transform for pan/zoom, and the current click selection.

use std::collections::HashMap;

use force_graph::DefaultNodeIdx;
use log::info;
use serde::Deserialize;

use super::controller::ControllerState;
use super::layout::{Collider, ForceConfig, Layout, LayoutConfig};
use super::preprocess::{self, CountryBuckets, DEFAULT_TOP_N, SelfLoopPolicy};
use super::scale::{AuthorMetrics, RadiusConfig, RadiusScale, SizeMetric};
use super::theme::{CategoryPalette, Color};
use super::types::{GraphData, NodeId};
use crate::error::{GraphError, Result};

/// Smallest on-screen hit radius, so tiny nodes stay clickable when zoomed out.
const MIN_HIT_PX: f64 = 6.0;

/// Fade duration for the tooltip, in and out.
const TOOLTIP_FADE_SECS: f64 = 0.2;

/// Opacity of a fully shown tooltip.
const TOOLTIP_OPACITY: f64 = 0.9;

/// Allowed zoom range.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ZoomExtent {
	pub min: f64,
	pub max: f64,
}

impl Default for ZoomExtent {
	fn default() -> Self {
		Self { min: 0.5, max: 5.0 }
	}
}

/// Everything tunable about a session. Missing JSON fields take defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
	/// How many countries get their own color.
	pub top_n: usize,
	pub self_loops: SelfLoopPolicy,
	pub radius: RadiusConfig,
	/// Initial force strengths.
	pub forces: ForceConfig,
	pub layout: LayoutConfig,
	pub zoom: ZoomExtent,
	/// How long a clicked author's tooltip stays up before fading out.
	pub tooltip_secs: f64,
}

impl SessionConfig {
	/// Reject settings the scales and zoom clamp cannot work with.
	pub fn validate(&self) -> Result<()> {
		let invalid = |msg: String| Err(GraphError::InvalidConfig(msg));
		let radius = &self.radius;
		if radius.min > radius.max {
			return invalid(format!("radius.min {} exceeds radius.max {}", radius.min, radius.max));
		}
		for (name, metric) in [("publications", &radius.publications), ("citations", &radius.citations)] {
			if metric.divisor == 0.0 {
				return invalid(format!("radius.{name}.divisor must be non-zero"));
			}
		}
		let zoom = self.zoom;
		if zoom.min <= 0.0 || zoom.min > zoom.max {
			return invalid(format!(
				"zoom extent [{}, {}] must be positive and ordered",
				zoom.min, zoom.max
			));
		}
		Ok(())
	}
}

impl Default for SessionConfig {
	fn default() -> Self {
		Self {
			top_n: DEFAULT_TOP_N,
			self_loops: SelfLoopPolicy::default(),
			radius: RadiusConfig::default(),
			forces: ForceConfig::default(),
			layout: LayoutConfig::default(),
			zoom: ZoomExtent::default(),
			tooltip_secs: 3.0,
		}
	}
}

/// Per-author data attached to each node in the layout.
#[derive(Clone, Debug, Default)]
pub struct AuthorInfo {
	pub id: NodeId,
	pub name: Option<String>,
	pub country: String,
	pub publications: u64,
	pub citations: u64,
	pub degree: usize,
	pub color: Color,
	/// World-space radius under the current sizing metric.
	pub radius: f64,
}

impl AuthorInfo {
	pub fn metrics(&self) -> AuthorMetrics {
		AuthorMetrics {
			degree: self.degree,
			publications: self.publications,
			citations: self.citations,
		}
	}

	/// Name for display, falling back to the id.
	pub fn display_name(&self) -> String {
		self.name.clone().unwrap_or_else(|| self.id.to_string())
	}
}

impl Collider for AuthorInfo {
	fn collision_radius(&self) -> f64 {
		self.radius
	}
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%), kept within the session's [`ZoomExtent`].
	pub k: f64,
}

impl ViewTransform {
	/// Move the translation to `(x, y)` in screen pixels. Zoom is unchanged.
	pub fn pan_to(&mut self, x: f64, y: f64) {
		self.x = x;
		self.y = y;
	}

	/// Scale by `factor` around the screen point `(sx, sy)`, which stays fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64, extent: ZoomExtent) {
		let new_k = (self.k * factor).clamp(extent.min, extent.max);
		let ratio = new_k / self.k;
		self.x = sx - (sx - self.x) * ratio;
		self.y = sy - (sy - self.y) * ratio;
		self.k = new_k;
	}
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// A clicked author whose details are on screen for a limited time.
#[derive(Clone, Debug)]
pub struct Selection {
	pub node: DefaultNodeIdx,
	/// Screen position of the click that selected the node.
	pub anchor: (f64, f64),
	elapsed: f64,
	display_secs: f64,
}

impl Selection {
	fn new(node: DefaultNodeIdx, anchor: (f64, f64), display_secs: f64) -> Self {
		Self {
			node,
			anchor,
			elapsed: 0.0,
			display_secs,
		}
	}

	/// Advance the display timer. Returns `false` once the tooltip has fully faded.
	fn tick(&mut self, dt: f64) -> bool {
		self.elapsed += dt;
		self.elapsed < self.display_secs + TOOLTIP_FADE_SECS
	}

	/// Current tooltip opacity: fades in, holds, then fades out.
	pub fn opacity(&self) -> f64 {
		let fade_in = (self.elapsed / TOOLTIP_FADE_SECS).min(1.0);
		let fade_out = ((self.display_secs + TOOLTIP_FADE_SECS - self.elapsed) / TOOLTIP_FADE_SECS)
			.clamp(0.0, 1.0);
		TOOLTIP_OPACITY * fade_in.min(fade_out)
	}
}

/// Content of the details overlay for a selected author.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
	pub name: String,
	pub country: String,
	pub publications: u64,
	pub citations: u64,
	/// Screen position of the overlay.
	pub x: f64,
	pub y: f64,
}

/// Session context: layout plus the derived state that feeds it.
///
/// Created once when the canvas mounts, then mutated each frame by the
/// animation loop and by user input between frames.
pub struct GraphSession {
	pub(super) layout: Layout<AuthorInfo>,
	pub(super) buckets: CountryBuckets,
	pub(super) radius_scale: RadiusScale,
	pub(super) metric: SizeMetric,
	pub(super) controller: ControllerState,
	pub transform: ViewTransform,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
	selection: Option<Selection>,
	config: SessionConfig,
	index: HashMap<NodeId, DefaultNodeIdx>,
}

impl GraphSession {
	/// Annotate `data` and build the layout.
	///
	/// Fails if a link references a node id missing from `data.nodes`.
	pub fn new(
		data: &GraphData,
		width: f64,
		height: f64,
		config: SessionConfig,
		palette: &CategoryPalette,
	) -> Result<Self> {
		config.validate()?;
		let (authors, buckets) = preprocess::annotate(data, &config, palette);
		let max_degree = authors.iter().map(|a| a.degree).max().unwrap_or(0);
		let radius_scale = RadiusScale::new(config.radius.clone(), max_degree);
		let metric = SizeMetric::Degree;

		let mut layout = Layout::new(config.forces, config.layout.clone());
		let mut index = HashMap::new();

		for mut author in authors {
			author.radius = radius_scale.radius(metric, author.metrics());
			let id = author.id.clone();
			let idx = layout.add_node(author);
			index.insert(id, idx);
		}

		for link in &data.links {
			match (index.get(&link.source), index.get(&link.target)) {
				(Some(&src), Some(&tgt)) => layout.add_edge(src, tgt),
				_ => {
					return Err(GraphError::UnresolvedEndpoint {
						from: link.source.to_string(),
						to: link.target.to_string(),
					});
				}
			}
		}

		info!(
			"coauthor-graph: session built with {} authors, {} links, {} country buckets",
			data.nodes.len(),
			data.links.len(),
			buckets.len()
		);

		Ok(Self {
			layout,
			buckets,
			radius_scale,
			metric,
			controller: ControllerState::Idle,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			pan: PanState::default(),
			width,
			height,
			selection: None,
			config,
			index,
		})
	}

	pub fn layout(&self) -> &Layout<AuthorInfo> {
		&self.layout
	}

	pub fn buckets(&self) -> &CountryBuckets {
		&self.buckets
	}

	pub fn metric(&self) -> SizeMetric {
		self.metric
	}

	pub fn config(&self) -> &SessionConfig {
		&self.config
	}

	pub fn selection(&self) -> Option<&Selection> {
		self.selection.as_ref()
	}

	/// Author data for a dataset id.
	pub fn author(&self, id: &NodeId) -> Option<AuthorInfo> {
		let idx = *self.index.get(id)?;
		self.author_at(idx)
	}

	fn author_at(&self, idx: DefaultNodeIdx) -> Option<AuthorInfo> {
		let mut found = None;
		self.layout.graph().visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.clone());
			}
		});
		found
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node whose circle contains the screen point.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let min_hit = MIN_HIT_PX / self.transform.k;
		let mut found = None;
		self.layout.graph().visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let hit_radius = node.data.user_data.radius.max(min_hit);
			if (dx * dx + dy * dy).sqrt() < hit_radius {
				found = Some(node.index());
			}
		});
		found
	}

	/// Select the author under the screen point, replacing any previous selection.
	///
	/// Returns the tooltip for the newly selected author, or `None` (leaving the
	/// current selection alone) when the point is over the background.
	pub fn click(&mut self, sx: f64, sy: f64) -> Option<Tooltip> {
		let idx = self.node_at_position(sx, sy)?;
		self.selection = Some(Selection::new(idx, (sx, sy), self.config.tooltip_secs));
		self.tooltip()
	}

	/// Tooltip for the current selection.
	pub fn tooltip(&self) -> Option<Tooltip> {
		let selection = self.selection.as_ref()?;
		let author = self.author_at(selection.node)?;
		Some(Tooltip {
			name: author.display_name(),
			country: author.country,
			publications: author.publications,
			citations: author.citations,
			x: selection.anchor.0,
			y: selection.anchor.1,
		})
	}

	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		self.transform.zoom_at(sx, sy, factor, self.config.zoom);
	}

	/// Begin dragging the background from the screen point.
	pub fn pan_start(&mut self, sx: f64, sy: f64) {
		self.pan = PanState {
			active: true,
			start_x: sx,
			start_y: sy,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	/// Follow the pointer while a drag is active. Layout positions are untouched.
	pub fn pan_move(&mut self, sx: f64, sy: f64) {
		if !self.pan.active {
			return;
		}
		let pan = &self.pan;
		let (x, y) = (
			pan.transform_start_x + (sx - pan.start_x),
			pan.transform_start_y + (sy - pan.start_y),
		);
		self.transform.pan_to(x, y);
	}

	pub fn pan_end(&mut self) {
		self.pan.active = false;
	}

	/// Advance the layout one step and age the selection.
	pub fn tick(&mut self, dt: f64) {
		self.layout.step(dt as f32);
		if let Some(selection) = self.selection.as_mut() {
			if !selection.tick(dt) {
				self.selection = None;
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
