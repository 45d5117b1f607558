//! Form controls for live force tuning.

use leptos::prelude::*;
use log::warn;

use super::controller::ForceSettings;
use super::scale::SizeMetric;

/// Numeric inputs for the three force strengths, a radio group for the sizing
/// metric, and an apply button.
///
/// Values are only parsed when applied. Valid settings are written to
/// `submit`; invalid ones are reported inline and leave the graph unchanged.
#[component]
pub fn ForceControls(
	submit: WriteSignal<Option<ForceSettings>>,
	#[prop(optional)] initial: ForceSettings,
) -> impl IntoView {
	let (link, set_link) = signal(initial.link_strength.to_string());
	let (collide, set_collide) = signal(initial.collide_strength.to_string());
	let (charge, set_charge) = signal(initial.charge_strength.to_string());
	let (metric, set_metric) = signal(initial.metric);
	let (problem, set_problem) = signal(None::<String>);

	let apply = move |_: leptos::ev::MouseEvent| {
		let parsed = ForceSettings::parse(
			&link.get_untracked(),
			&collide.get_untracked(),
			&charge.get_untracked(),
			metric.get_untracked().as_str(),
		);
		match parsed {
			Ok(settings) => {
				set_problem.set(None);
				submit.set(Some(settings));
			}
			Err(e) => {
				warn!("coauthor-graph: rejected force settings: {}", e);
				set_problem.set(Some(e.to_string()));
			}
		}
	};

	view! {
		<div class="force-controls">
			<label>
				"Link strength "
				<input
					id="linkStrength"
					type="number"
					step="0.1"
					prop:value=link
					on:input=move |ev| set_link.set(event_target_value(&ev))
				/>
			</label>
			<label>
				"Collide force "
				<input
					id="collideForce"
					type="number"
					step="0.1"
					prop:value=collide
					on:input=move |ev| set_collide.set(event_target_value(&ev))
				/>
			</label>
			<label>
				"Charge force "
				<input
					id="chargeForce"
					type="number"
					step="1"
					prop:value=charge
					on:input=move |ev| set_charge.set(event_target_value(&ev))
				/>
			</label>
			<fieldset>
				<legend>"Node size"</legend>
				{SizeMetric::ALL
					.into_iter()
					.map(|m| {
						view! {
							<label>
								<input
									type="radio"
									name="nodeSize"
									value=m.as_str()
									prop:checked=move || metric.get() == m
									on:change=move |_| set_metric.set(m)
								/>
								{m.as_str()}
							</label>
						}
					})
					.collect_view()}
			</fieldset>
			<button id="applyChanges" type="button" on:click=apply>
				"Apply"
			</button>
			{move || problem.get().map(|msg| view! { <p class="control-error">{msg}</p> })}
		</div>
	}
}
