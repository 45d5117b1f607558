//! Force-parameter update cycle.
//!
//! The controls submit a [`ForceSettings`]; [`GraphSession::reconfigure`]
//! applies it between animation frames:
//! 1. radius is recomputed for every author with the chosen metric,
//! 2. color is recomputed from the session's fixed country buckets,
//! 3. the three strengths replace the layout's named forces,
//! 4. the layout energy is reset so it converges again.

use log::info;

use super::layout::ForceConfig;
use super::scale::SizeMetric;
use super::state::GraphSession;
use crate::error::ControlError;

/// Whether a reconfiguration is being applied.
///
/// Reconfiguration is synchronous, so outside of [`GraphSession::reconfigure`]
/// the controller is always observed `Idle`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControllerState {
	#[default]
	Idle,
	Reconfiguring,
}

/// A submitted set of force strengths and the sizing metric.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceSettings {
	pub link_strength: f64,
	pub collide_strength: f64,
	pub charge_strength: f64,
	pub metric: SizeMetric,
}

impl ForceSettings {
	/// Current settings of a force configuration with a given metric.
	pub fn from_config(forces: ForceConfig, metric: SizeMetric) -> Self {
		Self {
			link_strength: forces.link,
			collide_strength: forces.collide,
			charge_strength: forces.charge,
			metric,
		}
	}

	/// Parse raw form values.
	pub fn parse(link: &str, collide: &str, charge: &str, metric: &str) -> Result<Self, ControlError> {
		Ok(Self {
			link_strength: parse_strength("link strength", link)?,
			collide_strength: parse_strength("collide strength", collide)?,
			charge_strength: parse_strength("charge strength", charge)?,
			metric: metric.parse()?,
		})
	}

	pub fn forces(&self) -> ForceConfig {
		ForceConfig {
			link: self.link_strength,
			charge: self.charge_strength,
			collide: self.collide_strength,
		}
	}
}

impl Default for ForceSettings {
	fn default() -> Self {
		Self::from_config(ForceConfig::default(), SizeMetric::default())
	}
}

fn parse_strength(field: &'static str, value: &str) -> Result<f64, ControlError> {
	value
		.trim()
		.parse::<f64>()
		.ok()
		.filter(|v| v.is_finite())
		.ok_or_else(|| ControlError::InvalidNumber {
			field,
			value: value.to_string(),
		})
}

impl GraphSession {
	pub fn controller_state(&self) -> ControllerState {
		self.controller
	}

	/// Apply submitted settings and restart the layout.
	pub fn reconfigure(&mut self, settings: &ForceSettings) {
		self.controller = ControllerState::Reconfiguring;

		let (scale, buckets) = (&self.radius_scale, &self.buckets);
		self.layout.update_nodes(|_, author| {
			author.radius = scale.radius(settings.metric, author.metrics());
			author.color = buckets.color_for(&author.country);
		});
		self.metric = settings.metric;

		self.layout.set_forces(settings.forces());
		self.layout.restart();

		info!(
			"coauthor-graph: reconfigured link={} collide={} charge={} size={}",
			settings.link_strength, settings.collide_strength, settings.charge_strength, settings.metric
		);
		self.controller = ControllerState::Idle;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn form_values_parse() {
		let settings = ForceSettings::parse("0.5", " 1 ", "-30", "citations").unwrap();
		assert_eq!(
			settings,
			ForceSettings {
				link_strength: 0.5,
				collide_strength: 1.0,
				charge_strength: -30.0,
				metric: SizeMetric::Citations,
			}
		);
	}

	#[test]
	fn non_numeric_strength_is_rejected() {
		let err = ForceSettings::parse("0.5", "lots", "-30", "degree").unwrap_err();
		assert_eq!(
			err,
			ControlError::InvalidNumber {
				field: "collide strength",
				value: "lots".to_string(),
			}
		);
		assert!(ForceSettings::parse("NaN", "1", "-30", "degree").is_err());
		assert!(ForceSettings::parse("", "1", "-30", "degree").is_err());
	}

	#[test]
	fn unknown_metric_is_rejected() {
		assert_eq!(
			ForceSettings::parse("1", "1", "-1", "h-index").unwrap_err(),
			ControlError::UnknownMetric("h-index".to_string())
		);
	}

	#[test]
	fn defaults_mirror_the_initial_forces() {
		let settings = ForceSettings::default();
		assert_eq!(settings.forces(), ForceConfig::default());
		assert_eq!(settings.metric, SizeMetric::Degree);
	}
}
