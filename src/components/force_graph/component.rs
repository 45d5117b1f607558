//! Leptos component wrapping the co-authorship graph canvas.
//!
//! The component creates an HTML canvas element and wires up mouse/wheel event
//! handlers for selecting authors, panning, and zooming. An animation loop runs
//! via `requestAnimationFrame`, stepping the layout and redrawing each frame.
//! Submitted force settings are applied from an effect, so they always land
//! between two frames.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::controller::ForceSettings;
use super::render;
use super::state::{GraphSession, SessionConfig, Tooltip};
use super::theme::Theme;
use super::types::GraphData;

/// Longest frame delta fed to the layout, so a backgrounded tab does not
/// produce one huge step when it comes back.
const MAX_FRAME_SECS: f64 = 0.1;

/// Bundles the graph session with its visual theme.
struct GraphContext {
	session: GraphSession,
	theme: Theme,
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// Canvas-relative position of a mouse event.
fn event_position(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Renders the interactive co-authorship graph on a canvas element.
///
/// Pass the dataset via the reactive `data` signal and submitted control
/// values via `settings`; each new `Some` value reconfigures the layout. The
/// component sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the viewport and resize with the window.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(into)] settings: Signal<Option<ForceSettings>>,
	#[prop(optional)] config: SessionConfig,
	#[prop(optional)] theme: Theme,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	let tooltip = RwSignal::new(None::<Tooltip>);
	let tooltip_opacity = RwSignal::new(0.0_f64);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into().ok())
		{
			Some(ctx) => ctx,
			None => {
				error!("coauthor-graph: canvas has no 2d context");
				return;
			}
		};

		let session = match GraphSession::new(&data.get(), w, h, config.clone(), &theme.palette) {
			Ok(session) => session,
			Err(e) => {
				error!("coauthor-graph: cannot build graph: {}", e);
				return;
			}
		};
		*context_init.borrow_mut() = Some(GraphContext {
			session,
			theme: theme.clone(),
		});

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.session.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		let mut last_frame = js_sys::Date::now();
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let now = js_sys::Date::now();
			let dt = ((now - last_frame) / 1000.0).clamp(0.0, MAX_FRAME_SECS);
			last_frame = now;

			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.session.tick(dt);
				render::render(&c.session, &ctx, &c.theme);

				match c.session.selection().map(|s| s.opacity()) {
					Some(opacity) => {
						if (opacity - tooltip_opacity.get_untracked()).abs() > 0.01 {
							tooltip_opacity.set(opacity);
						}
					}
					None => {
						if tooltip.get_untracked().is_some() {
							tooltip.set(None);
						}
					}
				}
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(win) = web_sys::window() {
					let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_cfg = context.clone();
	Effect::new(move |_| {
		let Some(submitted) = settings.get() else {
			return;
		};
		if let Some(ref mut c) = *context_cfg.borrow_mut() {
			c.session.reconfigure(&submitted);
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = event_position(canvas_ref, &ev) else {
			return;
		};

		if let Some(ref mut c) = *context_md.borrow_mut() {
			if let Some(t) = c.session.click(x, y) {
				// Overlay is fixed-positioned, so it takes viewport coordinates.
				tooltip.set(Some(Tooltip {
					x: ev.client_x() as f64,
					y: ev.client_y() as f64,
					..t
				}));
				tooltip_opacity.set(0.0);
			} else {
				c.session.pan_start(x, y);
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = event_position(canvas_ref, &ev) else {
			return;
		};

		if let Some(ref mut c) = *context_mm.borrow_mut() {
			c.session.pan_move(x, y);
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			c.session.pan_end();
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.session.pan_end();
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = event_position(canvas_ref, &ev) else {
			return;
		};

		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			c.session.zoom_at(x, y, factor);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
		{move || {
			tooltip
				.get()
				.map(|t| {
					let (x, y) = (t.x, t.y);
					view! {
						<div
							class="tooltip"
							style=move || {
								format!(
									"position: fixed; left: {x}px; top: {y}px; opacity: {}; padding: 10px; margin: 10px; background-color: grey; border-radius: 5px; color: white; pointer-events: none;",
									tooltip_opacity.get(),
								)
							}
						>
							"Author: "
							{t.name}
							<br />
							"Country: "
							{t.country}
							<br />
							"Publications: "
							{t.publications}
							<br />
							"Citations: "
							{t.citations}
						</div>
					}
				})
		}}
	}
}
