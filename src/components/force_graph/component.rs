//! Leptos component wrapping the pattern graph canvas.
//!
//! The component sizes a canvas to its container, builds a [`GraphSession`]
//! once the pattern document arrives, and drives it with
//! `requestAnimationFrame` until the layout settles. Mouse handlers mutate the
//! same session; a drag on a settled graph restarts the loop.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent, Window};

use super::config::{GraphConfig, PageConfig};
use super::driver::FrameScheduler;
use super::interaction::{PointerDown, PointerMove, PointerUp};
use super::state::GraphSession;
use super::theme::Palette;
use super::types::PatternDocument;

/// Canvas never gets shorter than this, in CSS pixels.
const MIN_HEIGHT: f64 = 500.0;
/// Space left below the canvas when it fills the rest of the viewport.
const BOTTOM_MARGIN: f64 = 60.0;

/// Session plus the canvas it draws on.
struct GraphContext {
	session: GraphSession,
	ctx: CanvasRenderingContext2d,
	frames: FrameScheduler,
}

type Callback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Device pixel ratio to scale the backing store by. Zoomed-out pages report
/// ratios below 1 and keep them; only a missing (zero or NaN) ratio becomes 1.
fn effective_dpr(raw: f64) -> f64 {
	if raw > 0.0 { raw } else { 1.0 }
}

/// Canvas size in CSS pixels: the container's width, and the rest of the
/// viewport below the container's top edge, never less than [`MIN_HEIGHT`].
fn surface_size(container_width: f64, container_top: f64, inner_height: f64) -> (f64, f64) {
	(
		container_width,
		MIN_HEIGHT.max(inner_height - container_top - BOTTOM_MARGIN),
	)
}

/// Cursor affordance for a pointer move, if it changes the cursor.
fn hover_cursor(outcome: PointerMove) -> Option<&'static str> {
	match outcome {
		PointerMove::Dragged => None,
		PointerMove::Hover { over_node: true } => Some("pointer"),
		PointerMove::Hover { over_node: false } => Some("default"),
	}
}

/// Sizes the canvas to its container and the remaining viewport height,
/// scaling the backing store by the device pixel ratio. Returns the size in
/// CSS pixels.
fn fit_canvas(
	window: &Window,
	canvas: &HtmlCanvasElement,
	ctx: &CanvasRenderingContext2d,
) -> Option<(f64, f64)> {
	let rect = canvas.parent_element()?.get_bounding_client_rect();
	let inner_height = window.inner_height().ok()?.as_f64()?;
	let dpr = effective_dpr(window.device_pixel_ratio());
	let (width, height) = surface_size(rect.width(), rect.top(), inner_height);

	let _ = HtmlElement::style(canvas).set_property("height", &format!("{height}px"));
	canvas.set_width((width * dpr) as u32);
	canvas.set_height((height * dpr) as u32);
	let _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
	Some((width, height))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

/// Pointer position relative to the canvas, in CSS pixels.
fn canvas_xy(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		f64::from(ev.client_x()) - rect.left(),
		f64::from(ev.client_y()) - rect.top(),
	)
}

fn request_frame(animate: &Callback) {
	let Some(window) = web_sys::window() else {
		return;
	};
	if let Some(ref cb) = *animate.borrow() {
		let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
	}
}

/// Renders the pattern relationship graph on a canvas.
///
/// Nothing is drawn until `data` holds a document. The session is built once;
/// later changes to `data` are ignored. `root_prefix` overrides the
/// `ROOT_PREFIX` page global for navigation links.
#[component]
pub fn PatternGraph(
	#[prop(into)] data: Signal<Option<PatternDocument>>,
	#[prop(optional, into)] root_prefix: Option<String>,
	#[prop(optional)] config: Option<GraphConfig>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let animate: Callback = Rc::new(RefCell::new(None));
	let resize_cb: Callback = Rc::new(RefCell::new(None));
	let theme_cb: Callback = Rc::new(RefCell::new(None));
	let (context_init, animate_init) = (context.clone(), animate.clone());

	Effect::new(move |_| {
		let Some(doc) = data.get() else {
			return;
		};
		if context_init.borrow().is_some() {
			return;
		}
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("pattern-graph: no browser window");
			return;
		};
		let Some(ctx) = context_2d(&canvas) else {
			warn!("pattern-graph: canvas has no 2d context");
			return;
		};
		let Some((w, h)) = fit_canvas(&window, &canvas, &ctx) else {
			warn!("pattern-graph: could not measure canvas container");
			return;
		};

		let mut page = PageConfig::from_window(&window);
		if let Some(prefix) = root_prefix.clone() {
			page.root_prefix = prefix;
		}
		let palette = Palette::resolve(&window, doc.scale_ids());
		let mut rng = SmallRng::seed_from_u64(js_sys::Date::now() as u64);
		let session = GraphSession::new(
			&doc,
			palette,
			config.clone().unwrap_or_default(),
			page,
			w,
			h,
			&mut rng,
		);
		info!(
			"pattern-graph: {} nodes, {} edges in {}x{}",
			session.graph.nodes.len(),
			session.graph.edges.len(),
			w,
			h
		);
		*context_init.borrow_mut() = Some(GraphContext {
			session,
			ctx,
			frames: FrameScheduler::default(),
		});

		let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
		*resize_cb.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				if let Some((nw, nh)) = fit_canvas(&win, &canvas_resize, &c.ctx) {
					debug!("pattern-graph: resized to {nw}x{nh}");
					c.session.resize(nw, nh);
					c.session.redraw(&mut c.ctx);
				}
			}
		}));
		if let Some(ref cb) = *resize_cb.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let context_theme = context_init.clone();
		*theme_cb.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			if let Some(ref mut c) = *context_theme.borrow_mut() {
				c.session.palette.refresh(&win);
				c.session.redraw(&mut c.ctx);
			}
		}));
		if let (Ok(Some(query)), Some(cb)) = (
			window.match_media("(prefers-color-scheme: dark)"),
			theme_cb.borrow().as_ref(),
		) {
			let _ = query.add_event_listener_with_callback("change", cb.as_ref().unchecked_ref());
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let running = match *context_anim.borrow_mut() {
				Some(ref mut c) => {
					c.frames.delivered();
					let running = c.session.tick(&mut c.ctx).is_running();
					if running {
						c.frames.request();
					}
					running
				}
				None => false,
			};
			if running {
				request_frame(&animate_inner);
			} else {
				info!("pattern-graph: layout settled");
			}
		}));
		if let Some(ref mut c) = *context_init.borrow_mut() {
			c.frames.request();
		}
		request_frame(&animate_init);
	});

	let context_md = context.clone();
	let animate_md = animate.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = canvas_xy(&canvas, &ev);

		let resume = match *context_md.borrow_mut() {
			Some(ref mut c) => match c.session.pointer_down(x, y) {
				PointerDown::Grabbed { resume: true, .. } => c.frames.request(),
				_ => false,
			},
			None => false,
		};
		if resume {
			info!("pattern-graph: resuming layout");
			request_frame(&animate_md);
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = canvas_xy(&canvas, &ev);

		if let Some(ref mut c) = *context_mm.borrow_mut() {
			let outcome = c.session.pointer_move(x, y);
			match hover_cursor(outcome) {
				Some(cursor) => {
					let _ = HtmlElement::style(&canvas).set_property("cursor", cursor);
				}
				None => c.session.redraw(&mut c.ctx),
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = canvas_xy(&canvas, &ev);

		let outcome = match *context_mu.borrow_mut() {
			Some(ref mut c) => c.session.pointer_up(x, y),
			None => PointerUp::Ignored,
		};
		if let PointerUp::Click { url } = outcome {
			if let Some(window) = web_sys::window() {
				if let Err(e) = window.location().set_href(&url) {
					warn!("pattern-graph: navigation to {url} failed: {e:?}");
				}
			}
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.session.pointer_leave();
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="pattern-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			style="display: block; width: 100%;"
		/>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pixel_ratio_keeps_zoomed_out_values() {
		assert_eq!(effective_dpr(2.0), 2.0);
		assert_eq!(effective_dpr(0.5), 0.5);
		assert_eq!(effective_dpr(0.0), 1.0);
		assert_eq!(effective_dpr(f64::NAN), 1.0);
	}

	#[test]
	fn surface_fills_remaining_viewport() {
		assert_eq!(surface_size(960.0, 120.0, 1080.0), (960.0, 900.0));
		// Short windows fall back to the minimum height.
		assert_eq!(surface_size(640.0, 300.0, 700.0), (640.0, MIN_HEIGHT));
	}

	#[test]
	fn cursor_follows_hover_only() {
		assert_eq!(hover_cursor(PointerMove::Hover { over_node: true }), Some("pointer"));
		assert_eq!(hover_cursor(PointerMove::Hover { over_node: false }), Some("default"));
		assert_eq!(hover_cursor(PointerMove::Dragged), None);
	}
}
