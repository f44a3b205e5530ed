//! Leptos component wrapping the graph canvas.
//!
//! Creates an HTML canvas element and wires mouse/wheel events into the
//! interaction state: dragging, panning, hover, menu activation, and
//! ctrl/cmd-wheel zoom. An animation loop runs via `requestAnimationFrame`,
//! ticking the simulation and re-rendering each frame; unmounting cancels
//! the scheduled frame, removes listeners, and drops the state.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::config::GraphConfig;
use super::render;
use super::state::{GraphState, MenuSelection};
use super::theme::Theme;
use super::types::GraphData;

/// Bundles interaction state with the theme used to paint it.
struct GraphContext {
	state: GraphState,
	theme: Theme,
}

/// Renders an interactive force-directed graph with radial node menus on a
/// canvas element.
///
/// Pass graph data via the reactive `data` signal; the view rebuilds from
/// scratch when it changes. The component sizes itself to its parent by
/// default; set `fullscreen = true` to fill the viewport and track window
/// resizes. `on_menu_select` is invoked with the node and entry ids whenever
/// a radial-menu wedge is clicked.
#[component]
pub fn GraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(optional)] config: Option<GraphConfig>,
	#[prop(optional, into)] on_menu_select: Option<Callback<MenuSelection>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let running: Rc<Cell<bool>> = Rc::new(Cell::new(true));
	let raf_handle: Rc<Cell<i32>> = Rc::new(Cell::new(0));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());
	let (running_init, raf_init) = (running.clone(), raf_handle.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		// A data change rebuilds the view; cancel any frame scheduled by
		// the previous run before its closure is replaced below.
		let _ = window.cancel_animation_frame(raf_init.get());

		let (w, h) = if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
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

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		*context_init.borrow_mut() = Some(GraphContext {
			state: GraphState::new(&data.get(), config.clone().unwrap_or_default(), w, h),
			theme: Theme::default(),
		});

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let win: Window = web_sys::window().unwrap();
				let (nw, nh) = (
					win.inner_width().unwrap().as_f64().unwrap(),
					win.inner_height().unwrap().as_f64().unwrap(),
				);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		let (running_anim, raf_anim) = (running_init.clone(), raf_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !running_anim.get() {
				return;
			}
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.state.tick(0.016);
				render::render(&c.state, &ctx, &c.theme);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Ok(handle) = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref())
				{
					raf_anim.set(handle);
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			if let Ok(handle) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				raf_init.set(handle);
			}
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_md.borrow_mut() {
			c.state.pointer_down(x, y);
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_mm.borrow_mut() {
			c.state.pointer_move(x, y);
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			c.state.pointer_up();
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.pointer_leave();
		}
	};

	let context_ck = context.clone();
	let on_click = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_ck.borrow_mut() {
			if let Some(selection) = c.state.click(x, y) {
				if let Some(callback) = on_menu_select {
					callback.run(selection);
				}
			}
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		// Plain wheel stays a scroll; only ctrl/cmd + wheel is a zoom
		// request, so only that variant is consumed.
		let modifier = ev.ctrl_key() || ev.meta_key();
		if modifier {
			ev.prevent_default();
		}
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_wh.borrow_mut() {
			c.state.wheel(x, y, ev.delta_y(), modifier);
		}
	};

	let (context_drop, animate_drop, resize_drop) =
		(context.clone(), animate.clone(), resize_cb.clone());
	let (running_drop, raf_drop) = (running.clone(), raf_handle.clone());
	let cleanup_state = leptos::__reexports::send_wrapper::SendWrapper::new((
		context_drop,
		animate_drop,
		resize_drop,
		running_drop,
		raf_drop,
	));
	on_cleanup(move || {
		let (context_drop, animate_drop, resize_drop, running_drop, raf_drop) = &*cleanup_state;
		running_drop.set(false);
		if let Some(window) = web_sys::window() {
			window.cancel_animation_frame(raf_drop.get()).ok();
			if let Some(cb) = resize_drop.borrow_mut().take() {
				let _ = window
					.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
		*animate_drop.borrow_mut() = None;
		*context_drop.borrow_mut() = None;
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:click=on_click
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
