use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::{debug, info};

use super::config::GraphConfig;
use super::geometry::Point;
use super::render::Scene;

/// Pointer offset of the tooltip in graph units.
pub const TOOLTIP_OFFSET: Point = Point::new(20.0, -20.0);

/// Radius of the ring nodes start on before the first tick.
const INITIAL_RING_RADIUS: f64 = 100.0;

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node: Option<usize>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TooltipState {
	pub visible: bool,
	pub text: String,
	pub x: f64,
	pub y: f64,
}

impl TooltipState {
	pub fn show(&mut self) {
		self.visible = true;
	}

	pub fn follow(&mut self, text: &str, pointer: Point) {
		text.clone_into(&mut self.text);
		self.x = pointer.x + TOOLTIP_OFFSET.x;
		self.y = pointer.y + TOOLTIP_OFFSET.y;
	}

	pub fn hide(&mut self) {
		self.visible = false;
	}
}

/// Everything the renderer mutates after the scene is built: the layout
/// engine, its cooling schedule, drag and tooltip state.
pub struct ForceGraphState {
	pub graph: ForceGraph<usize, ()>,
	pub drag: DragState,
	pub tooltip: TooltipState,
	pub width: f64,
	pub height: f64,
	pub alpha: f64,
	pub animation_running: bool,
	config: GraphConfig,
	nodes: Vec<DefaultNodeIdx>,
	edges: Vec<(usize, usize)>,
}

impl ForceGraphState {
	/// Builds the engine graph for an already resolved scene.
	pub fn new(scene: &Scene, config: GraphConfig, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: (-config.charge) as f32,
			// attraction comes from the link distance pass in `relax_links`
			force_spring: 0.0,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let count = scene.nodes.len();
		let nodes: Vec<DefaultNodeIdx> = (0..count)
			.map(|i| {
				let angle = (i as f64) * 2.0 * PI / count as f64;
				graph.add_node(NodeData {
					x: (width / 2.0 + INITIAL_RING_RADIUS * angle.cos()) as f32,
					y: (height / 2.0 + INITIAL_RING_RADIUS * angle.sin()) as f32,
					mass: 1.0,
					is_anchor: false,
					user_data: i,
				})
			})
			.collect();

		let edges: Vec<(usize, usize)> = scene
			.links
			.iter()
			.map(|link| (link.source, link.target))
			.collect();
		for &(src, tgt) in &edges {
			graph.add_edge(nodes[src], nodes[tgt], EdgeData::default());
		}

		info!(
			"simulation started: {} nodes, {} links, {}x{}",
			nodes.len(),
			edges.len(),
			width,
			height
		);

		Self {
			graph,
			drag: DragState::default(),
			tooltip: TooltipState::default(),
			width,
			height,
			alpha: config.alpha,
			animation_running: true,
			config,
			nodes,
			edges,
		}
	}

	/// Node positions indexed like the document's node list.
	pub fn positions(&self) -> Vec<Point> {
		let mut out = vec![Point::default(); self.nodes.len()];
		self.graph.visit_nodes(|node| {
			out[node.data.user_data] = Point::new(node.x() as f64, node.y() as f64);
		});
		out
	}

	/// Advances the layout one step. Returns whether the simulation is still
	/// running afterwards.
	pub fn tick(&mut self) -> bool {
		if !self.animation_running {
			return false;
		}
		self.graph.update(self.config.time_step);

		let mut positions = self.positions();
		self.relax_links(&mut positions);
		self.apply_gravity(&mut positions);
		self.graph.visit_nodes_mut(|node| {
			if !node.data.is_anchor {
				let p = positions[node.data.user_data];
				node.data.x = p.x as f32;
				node.data.y = p.y as f32;
			}
		});

		self.alpha *= self.config.alpha_decay;
		if self.alpha < self.config.alpha_min {
			self.animation_running = false;
			info!("layout settled");
		}
		self.animation_running
	}

	/// Pulls or pushes both endpoints of every link toward the configured
	/// link distance.
	fn relax_links(&self, positions: &mut [Point]) {
		for &(src, tgt) in &self.edges {
			let (s, t) = (positions[src], positions[tgt]);
			let (dx, dy) = (t.x - s.x, t.y - s.y);
			let len = dx.hypot(dy);
			if len == 0.0 {
				continue;
			}
			let k = self.alpha * (len - self.config.link_distance) / len;
			let (mx, my) = (dx * k * 0.5, dy * k * 0.5);
			positions[tgt].x -= mx;
			positions[tgt].y -= my;
			positions[src].x += mx;
			positions[src].y += my;
		}
	}

	fn apply_gravity(&self, positions: &mut [Point]) {
		let k = self.alpha * self.config.gravity;
		let (cx, cy) = (self.width / 2.0, self.height / 2.0);
		for p in positions {
			p.x += (cx - p.x) * k;
			p.y += (cy - p.y) * k;
		}
	}

	/// Re-heats a cooled or cooling simulation.
	pub fn resume(&mut self) {
		self.alpha = self.alpha.max(self.config.alpha);
		if !self.animation_running {
			debug!("simulation resumed");
		}
		self.animation_running = true;
	}

	pub fn begin_drag(&mut self, node: usize) {
		debug!("drag start: node {node}");
		self.set_anchor(node, true);
		self.drag.node = Some(node);
		self.resume();
	}

	pub fn drag_to(&mut self, pointer: Point) {
		let Some(&idx) = self.drag.node.and_then(|n| self.nodes.get(n)) else {
			return;
		};
		self.graph.visit_nodes_mut(|n| {
			if n.index() == idx {
				n.data.x = pointer.x as f32;
				n.data.y = pointer.y as f32;
			}
		});
		self.resume();
	}

	pub fn end_drag(&mut self) {
		if let Some(node) = self.drag.node.take() {
			debug!("drag end: node {node}");
			self.set_anchor(node, false);
		}
	}

	fn set_anchor(&mut self, node: usize, anchored: bool) {
		let Some(&idx) = self.nodes.get(node) else {
			return;
		};
		self.graph.visit_nodes_mut(|n| {
			if n.index() == idx {
				n.data.is_anchor = anchored;
			}
		});
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.resume();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::GraphData;

	fn sample() -> Scene {
		let data = GraphData::from_json(
			r#"{
				"nodes": [{ "id": "A" }, { "id": "B" }, { "id": "C" }],
				"links": [
					{ "source": "A", "target": "B", "arcStyle": "link red", "value": ["1"] },
					{ "source": "B", "target": "C", "arcStyle": "link blue", "value": ["2"] }
				]
			}"#,
		)
		.unwrap();
		Scene::build(&data, 10.0).unwrap()
	}

	fn is_anchored(s: &ForceGraphState, node: usize) -> bool {
		let mut anchored = false;
		s.graph.visit_nodes(|n| {
			if n.data.user_data == node {
				anchored = n.data.is_anchor;
			}
		});
		anchored
	}

	fn state() -> ForceGraphState {
		ForceGraphState::new(&sample(), GraphConfig::default(), 800.0, 600.0)
	}

	#[test]
	fn nodes_start_on_a_ring_around_the_centre() {
		let s = state();
		let centre = Point::new(400.0, 300.0);
		for p in s.positions() {
			assert!((p.distance(centre) - INITIAL_RING_RADIUS).abs() < 1e-3);
		}
	}

	#[test]
	fn alpha_cools_until_the_layout_settles() {
		let mut s = state();
		let mut last = s.alpha;
		let mut ticks = 0;
		while s.tick() {
			assert!(s.alpha < last);
			last = s.alpha;
			ticks += 1;
			assert!(ticks < 1_000);
		}
		assert!(!s.animation_running);
		assert!(s.alpha < s.config.alpha_min);
		// 0.1 * 0.99^n < 0.005
		assert_eq!(ticks + 1, 299);
		assert!(!s.tick());
	}

	#[test]
	fn positions_stay_finite() {
		let mut s = state();
		for _ in 0..50 {
			s.tick();
		}
		for p in s.positions() {
			assert!(p.x.is_finite() && p.y.is_finite());
		}
	}

	#[test]
	fn link_relaxation_moves_toward_link_distance() {
		let s = state();
		let mut positions = vec![
			Point::new(0.0, 0.0),
			Point::new(10.0, 0.0),
			Point::new(500.0, 0.0),
		];
		let before_ab = positions[0].distance(positions[1]);
		let before_bc = positions[1].distance(positions[2]);
		s.relax_links(&mut positions);
		assert!(positions[0].distance(positions[1]) > before_ab);
		assert!(positions[1].distance(positions[2]) < before_bc);
	}

	#[test]
	fn gravity_pulls_toward_centre() {
		let s = state();
		let mut positions = vec![Point::new(0.0, 0.0)];
		s.apply_gravity(&mut positions);
		assert!(positions[0].distance(Point::new(400.0, 300.0)) < 500.0);
	}

	#[test]
	fn drag_anchors_moves_and_releases() {
		let mut s = state();
		while s.tick() {}
		s.begin_drag(1);
		assert!(s.animation_running);
		assert!(is_anchored(&s, 1));
		s.drag_to(Point::new(42.0, 24.0));
		assert_eq!(s.positions()[1], Point::new(42.0, 24.0));
		s.tick();
		assert_eq!(s.positions()[1], Point::new(42.0, 24.0));
		s.end_drag();
		assert!(!is_anchored(&s, 1));
		assert!(s.drag.node.is_none());
	}

	#[test]
	fn resize_reheats_and_recentres() {
		let mut s = state();
		while s.tick() {}
		assert!(!s.animation_running);
		s.resize(200.0, 100.0);
		assert!(s.animation_running);
		assert_eq!(s.alpha, s.config.alpha);
		let mut positions = vec![Point::new(300.0, 300.0)];
		s.apply_gravity(&mut positions);
		let centre = Point::new(100.0, 50.0);
		assert!(positions[0].distance(centre) < Point::new(300.0, 300.0).distance(centre));
		assert!(positions[0].x < 300.0 && positions[0].y < 300.0);
		assert!(s.tick());
	}

	#[test]
	fn drag_without_grab_is_ignored() {
		let mut s = state();
		let before = s.positions();
		s.drag_to(Point::new(1.0, 1.0));
		assert_eq!(s.positions(), before);
	}

	#[test]
	fn tooltip_follows_pointer_with_offset() {
		let mut t = TooltipState::default();
		assert!(!t.visible);
		t.show();
		t.follow("A", Point::new(100.0, 50.0));
		assert!(t.visible);
		assert_eq!(t.text, "A");
		assert_eq!((t.x, t.y), (120.0, 30.0));
		t.hide();
		assert!(!t.visible);
	}
}
