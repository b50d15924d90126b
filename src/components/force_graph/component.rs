use std::cell::RefCell;
use std::rc::Rc;

use leptos::html::Div;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlDivElement, MouseEvent};

use super::config::GraphConfig;
use super::geometry::Point;
use super::loader::load_scene;
use super::render::{
	self, Frame, LinkFrame, MARKER_PATH, MARKER_REF_X, MARKER_REF_Y, MARKER_SIZE,
	MARKER_VIEW_BOX, NODE_LABEL_DX, NODE_LABEL_DY, Scene,
};
use super::state::{ForceGraphState, TooltipState};
use super::types::MarkerColor;

const FALLBACK_WIDTH: f64 = 800.0;
const FALLBACK_HEIGHT: f64 = 600.0;

#[derive(Clone, Debug, Default, PartialEq)]
enum LoadState {
	#[default]
	Loading,
	Ready(Scene),
	Failed(String),
}

/// Reactive handles shared by every element of one graph.
#[derive(Clone, Copy)]
struct Handles {
	state: StoredValue<Option<ForceGraphState>, LocalStorage>,
	frame: RwSignal<Frame>,
	tooltip: RwSignal<TooltipState>,
	surface: NodeRef<Div>,
}

impl Handles {
	fn with_state(self, f: impl FnOnce(&mut ForceGraphState)) {
		let _ = self.state.try_update_value(|s| {
			if let Some(s) = s {
				f(s)
			}
		});
	}

	fn with_tooltip(self, f: impl FnOnce(&mut TooltipState)) {
		let next = self.state.try_update_value(|s| {
			s.as_mut().map(|s| {
				f(&mut s.tooltip);
				s.tooltip.clone()
			})
		});
		if let Some(Some(tooltip)) = next {
			self.tooltip.set(tooltip);
		}
	}

	/// Pointer position relative to the drawing surface.
	fn pointer(self, ev: &MouseEvent) -> Option<Point> {
		let surface = self.surface.get_untracked()?;
		let rect = surface.get_bounding_client_rect();
		Some(Point::new(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		))
	}
}

fn surface_size(surface: &HtmlDivElement) -> (f64, f64) {
	let (w, h) = (surface.client_width(), surface.client_height());
	(
		if w > 0 { w as f64 } else { FALLBACK_WIDTH },
		if h > 0 { h as f64 } else { FALLBACK_HEIGHT },
	)
}

/// Fetches the graph at `src` and draws it as an animated SVG force layout
/// filling the parent element.
#[component]
pub fn ForceGraphSvg(
	#[prop(into)] src: String,
	#[prop(optional)] config: GraphConfig,
) -> impl IntoView {
	let surface_ref = NodeRef::<Div>::new();
	let load = RwSignal::new(LoadState::Loading);
	let handles = Handles {
		state: StoredValue::new_local(None),
		frame: RwSignal::new(Frame::default()),
		tooltip: RwSignal::new(TooltipState::default()),
		surface: surface_ref,
	};
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	let node_radius = config.node_radius;
	spawn_local(async move {
		match load_scene(&src, node_radius).await {
			Ok(scene) => load.set(LoadState::Ready(scene)),
			Err(e) => {
				error!("graph unavailable: {e}");
				load.set(LoadState::Failed(e.to_string()));
			}
		}
	});

	Effect::new(move |_| {
		let Some(surface) = surface_ref.get() else {
			return;
		};
		let Some(scene) = load.with(|l| match l {
			LoadState::Ready(scene) => Some(scene.clone()),
			_ => None,
		}) else {
			return;
		};
		if handles.state.with_value(Option::is_some) {
			return;
		}
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = surface_size(&surface);
		let state = ForceGraphState::new(&scene, config.clone(), w, h);
		handles.frame.set(render::render(&scene, &state.positions()));
		handles.state.set_value(Some(state));

		*resize_cb.borrow_mut() = Some(Closure::new(move || {
			let Some(surface) = surface_ref.get_untracked() else {
				return;
			};
			let (nw, nh) = surface_size(&surface);
			handles.with_state(|s| s.resize(nw, nh));
		}));
		if let Some(ref cb) = *resize_cb.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let animate_inner = animate.clone();
		*animate.borrow_mut() = Some(Closure::new(move || {
			let next = handles.state.try_update_value(|s| {
				s.as_mut().filter(|s| s.animation_running).map(|s| {
					s.tick();
					render::render(&scene, &s.positions())
				})
			});
			// disposed with its owner
			let Some(next) = next else {
				return;
			};
			if let Some(frame) = next {
				handles.frame.set(frame);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(win) = web_sys::window() {
					let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let Some(ref cb) = *animate.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let on_mousemove = move |ev: MouseEvent| {
		if let Some(p) = handles.pointer(&ev) {
			handles.with_state(|s| s.drag_to(p));
		}
	};
	let on_mouseup = move |_: MouseEvent| handles.with_state(ForceGraphState::end_drag);
	let on_mouseleave = move |_: MouseEvent| {
		handles.with_state(ForceGraphState::end_drag);
		handles.with_tooltip(TooltipState::hide);
	};

	let marker_defs = MarkerColor::ALL
		.into_iter()
		.map(|m| {
			view! {
				<marker
					id=m.id()
					viewBox=MARKER_VIEW_BOX
					refX=MARKER_REF_X.to_string()
					refY=MARKER_REF_Y.to_string()
					markerWidth=MARKER_SIZE.to_string()
					markerHeight=MARKER_SIZE.to_string()
					orient="auto"
				>
					<path d=MARKER_PATH />
				</marker>
			}
		})
		.collect_view();

	let graph_elements = move || {
		load.with(|l| match l {
			LoadState::Ready(scene) => Some(scene_view(scene, handles)),
			_ => None,
		})
	};
	let error_message = move || {
		load.with(|l| match l {
			LoadState::Failed(msg) => Some(view! {
				<p class="graph-error">{format!("Unable to display graph: {msg}")}</p>
			}),
			_ => None,
		})
	};
	let tooltip = handles.tooltip;
	let tooltip_display = move || {
		if tooltip.with(|t| t.visible) {
			"inline"
		} else {
			"none"
		}
	};

	view! {
		<div
			node_ref=surface_ref
			class="graph-surface"
			style="width: 100%; height: 100%;"
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
		>
			{error_message}
			<svg width="100%" height="100%" align="center">
				<g class="graph">
					<defs>{marker_defs}</defs>
					{graph_elements}
					<text
						class="tooltip"
						style:display=tooltip_display
						style:fill="#89a35c"
						style:z-index="1000000"
						style:font-family="sans-serif"
						style:font-size="13px"
						style:font-weight="bold"
						x=move || tooltip.with(|t| t.x.to_string())
						y=move || tooltip.with(|t| t.y.to_string())
					>
						{move || tooltip.with(|t| t.text.clone())}
					</text>
				</g>
			</svg>
		</div>
	}
}

/// Link paths, link labels and node groups, bound to the per-tick frame.
fn scene_view(scene: &Scene, handles: Handles) -> impl IntoView + use<> {
	let frame = handles.frame;
	let link_attr = move |i: usize, pick: fn(&LinkFrame) -> String| {
		move || frame.with(|f| f.links.get(i).map(pick).unwrap_or_default())
	};

	let links = scene
		.links
		.iter()
		.enumerate()
		.map(|(i, link)| {
			view! {
				<path
					id=link.id.clone()
					class=link.class.clone()
					marker-end=link.marker_end.clone()
					d=link_attr(i, |l| l.d.clone())
				/>
			}
		})
		.collect_view();

	let labels = scene
		.links
		.iter()
		.enumerate()
		.map(|(i, link)| {
			view! {
				<text
					class="linklabel"
					style:pointer-events="none"
					text-anchor="middle"
					x=link_attr(i, |l| l.label_x.to_string())
					y=link_attr(i, |l| l.label_y.to_string())
					transform=link_attr(i, |l| l.label_transform.clone())
				>
					{link.label.clone()}
				</text>
			}
		})
		.collect_view();

	let radius = scene.node_radius.to_string();
	let nodes = scene
		.nodes
		.iter()
		.enumerate()
		.map(|(i, node)| {
			let text = node.tooltip.clone();
			view! {
				<g
					class="node"
					transform=move || frame.with(|f| f.nodes.get(i).cloned().unwrap_or_default())
					on:mousedown=move |ev: MouseEvent| {
						ev.prevent_default();
						handles.with_state(|s| s.begin_drag(i));
					}
				>
					<circle
						id=node.id.clone()
						class=node.class.clone()
						r=radius.clone()
						on:mouseover=move |_: MouseEvent| handles.with_tooltip(TooltipState::show)
						on:mousemove=move |ev: MouseEvent| {
							if let Some(p) = handles.pointer(&ev) {
								handles.with_tooltip(|t| t.follow(&text, p));
							}
						}
						on:mouseout=move |_: MouseEvent| handles.with_tooltip(TooltipState::hide)
					/>
					<text class="textClass" dx=NODE_LABEL_DX.to_string() dy=NODE_LABEL_DY.to_string()>
						{node.id.clone()}
					</text>
				</g>
			}
		})
		.collect_view();

	view! {
		{links}
		{labels}
		{nodes}
	}
}
