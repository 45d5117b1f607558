//! Radius scales for author nodes.
//!
//! Node radius is in world units: it is the circle drawn on the canvas before
//! the view transform, and the circle the collide force keeps apart.
//!
//! # Sizing strategies
//!
//! - [`SizeMetric::Degree`]: square-root scale over `[0, max degree]`, so the
//!   visual area grows linearly with the number of collaborations.
//! - [`SizeMetric::Publications`] and [`SizeMetric::Citations`]: linear
//!   `value / divisor + offset`.
//!
//! Every strategy clamps its result to `[RadiusConfig::min, RadiusConfig::max]`.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ControlError;

/// Which author attribute drives node radius.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeMetric {
	Publications,
	#[default]
	Degree,
	Citations,
}

impl SizeMetric {
	pub const ALL: [SizeMetric; 3] = [
		SizeMetric::Publications,
		SizeMetric::Degree,
		SizeMetric::Citations,
	];

	/// Form value and label for this metric.
	pub fn as_str(self) -> &'static str {
		match self {
			SizeMetric::Publications => "publications",
			SizeMetric::Degree => "degree",
			SizeMetric::Citations => "citations",
		}
	}
}

impl fmt::Display for SizeMetric {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for SizeMetric {
	type Err = ControlError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		SizeMetric::ALL
			.into_iter()
			.find(|m| m.as_str() == s.trim())
			.ok_or_else(|| ControlError::UnknownMetric(s.to_string()))
	}
}

/// Square-root scale from `[0, domain_max]` onto `range`, clamped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SqrtScale {
	pub domain_max: f64,
	pub range: (f64, f64),
}

impl SqrtScale {
	pub fn new(domain_max: f64, range: (f64, f64)) -> Self {
		Self { domain_max, range }
	}

	pub fn apply(&self, value: f64) -> f64 {
		let (lo, hi) = self.range;
		// A collapsed domain maps everything to the middle of the range.
		let t = if self.domain_max > 0.0 {
			(value.max(0.0) / self.domain_max).sqrt().min(1.0)
		} else {
			0.5
		};
		lo + (hi - lo) * t
	}
}

/// Linear mapping `value / divisor + offset`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct LinearMetric {
	pub divisor: f64,
	pub offset: f64,
}

impl LinearMetric {
	pub fn apply(&self, value: f64) -> f64 {
		value / self.divisor + self.offset
	}
}

/// Tunable radius bounds and per-metric mappings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RadiusConfig {
	/// Lower bound for every metric.
	pub min: f64,
	/// Upper bound for every metric.
	pub max: f64,
	/// Output range of the degree square-root scale.
	pub degree_range: (f64, f64),
	pub publications: LinearMetric,
	pub citations: LinearMetric,
}

impl Default for RadiusConfig {
	fn default() -> Self {
		Self {
			min: 3.0,
			max: 20.0,
			degree_range: (3.0, 12.0),
			publications: LinearMetric {
				divisor: 50.0,
				offset: 5.0,
			},
			citations: LinearMetric {
				divisor: 500.0,
				offset: 5.0,
			},
		}
	}
}

/// Metric values for one author, as seen by the radius scale.
#[derive(Clone, Copy, Debug, Default)]
pub struct AuthorMetrics {
	pub degree: usize,
	pub publications: u64,
	pub citations: u64,
}

/// Radius scale for a specific dataset (the degree domain depends on it).
#[derive(Clone, Debug)]
pub struct RadiusScale {
	config: RadiusConfig,
	degree: SqrtScale,
}

impl RadiusScale {
	pub fn new(config: RadiusConfig, max_degree: usize) -> Self {
		let degree = SqrtScale::new(max_degree as f64, config.degree_range);
		Self { config, degree }
	}

	pub fn config(&self) -> &RadiusConfig {
		&self.config
	}

	/// Radius for `metrics` under `metric`, always within `[min, max]`.
	pub fn radius(&self, metric: SizeMetric, metrics: AuthorMetrics) -> f64 {
		let raw = match metric {
			SizeMetric::Publications => self.config.publications.apply(metrics.publications as f64),
			SizeMetric::Degree => self.degree.apply(metrics.degree as f64),
			SizeMetric::Citations => self.config.citations.apply(metrics.citations as f64),
		};
		raw.clamp(self.config.min, self.config.max)
	}
}
