//! Node data supplied by the node source.
//!
//! Positions use [`kurbo::Point`]; displacements between two positions are
//! [`kurbo::Vec2`], so canvas positions and pointer deltas cannot be mixed up.

use serde::Deserialize;

pub use kurbo::{Point, Vec2};

/// Category tag of a life event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
	/// A single point in time.
	Moment,
	/// A thought worth keeping.
	Idea,
	/// Ongoing work with a goal.
	Project,
	/// A longer period lived through.
	Experience,
}

impl NodeKind {
	/// Lowercase name shown on the card badge.
	pub fn label(self) -> &'static str {
		match self {
			NodeKind::Moment => "moment",
			NodeKind::Idea => "idea",
			NodeKind::Project => "project",
			NodeKind::Experience => "experience",
		}
	}
}

/// Node identifiers are opaque strings chosen by the node source.
pub type NodeId = String;

/// A life event placed on the canvas.
///
/// Field names follow the camelCase JSON produced by the node source.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
	/// Unique identifier, referenced by other nodes' `connections`.
	pub id: NodeId,
	/// Card heading.
	pub title: String,
	/// Free text; only an excerpt is drawn.
	#[serde(default)]
	pub content: String,
	/// Category, serialized as `type`.
	#[serde(rename = "type")]
	pub kind: NodeKind,
	/// Private nodes get a dashed outline and a closed lock.
	#[serde(default)]
	pub is_private: bool,
	/// Canvas-space position of the card center.
	pub position: Point,
	/// Directed edges to other nodes, unique within a node. Targets that do
	/// not exist are skipped when drawing.
	#[serde(default)]
	pub connections: Vec<NodeId>,
	/// Creation date as given by the source, shown verbatim.
	#[serde(default)]
	pub created_at: String,
	/// Last edit date as given by the source.
	#[serde(default)]
	pub updated_at: String,
	/// Attached photos, videos or links.
	#[serde(default)]
	pub media_urls: Vec<String>,
}

impl Node {
	/// Whether any media is attached.
	pub fn has_media(&self) -> bool {
		!self.media_urls.is_empty()
	}

	/// Drop repeated connection targets, keeping the first occurrence.
	pub fn dedup_connections(&mut self) {
		let mut seen = Vec::with_capacity(self.connections.len());
		self.connections.retain(|target| {
			if seen.contains(target) {
				false
			} else {
				seen.push(target.clone());
				true
			}
		});
	}
}

/// Built-in nodes used when the page does not provide any.
pub fn sample_nodes() -> Vec<Node> {
	vec![
		Node {
			id: "1".into(),
			title: "Started Programming".into(),
			content: "My journey into the world of coding began here...".into(),
			kind: NodeKind::Moment,
			is_private: false,
			position: Point::new(400.0, 300.0),
			connections: vec!["2".into()],
			created_at: "2020-01-01".into(),
			updated_at: "2020-01-01".into(),
			media_urls: vec!["https://images.unsplash.com/photo-1461749280684-dccba630e2f6".into()],
		},
		Node {
			id: "2".into(),
			title: "First Tech Job".into(),
			content: "Landed my dream position as a software developer".into(),
			kind: NodeKind::Experience,
			is_private: false,
			position: Point::new(600.0, 400.0),
			connections: vec!["1".into()],
			created_at: "2021-06-15".into(),
			updated_at: "2021-06-15".into(),
			media_urls: Vec::new(),
		},
	]
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn deserializes_camel_case_node() {
		let json = r#"{
			"id": "7",
			"title": "Moved abroad",
			"type": "experience",
			"isPrivate": true,
			"position": { "x": 10.5, "y": -4 },
			"connections": ["1", "2"],
			"createdAt": "2022-03-01",
			"mediaUrls": ["https://example.com/a.jpg"]
		}"#;
		let node: Node = serde_json::from_str(json).unwrap();

		assert_eq!(node.kind, NodeKind::Experience);
		assert!(node.is_private);
		assert_eq!(node.position, Point::new(10.5, -4.0));
		assert_eq!(node.connections, vec!["1", "2"]);
		assert!(node.has_media());
		assert!(node.content.is_empty());
		assert!(node.updated_at.is_empty());
	}

	#[test]
	fn rejects_unknown_kind() {
		let json = r#"{ "id": "1", "title": "x", "type": "dream", "position": { "x": 0, "y": 0 } }"#;
		assert!(serde_json::from_str::<Node>(json).is_err());
	}

	#[test]
	fn dedup_keeps_first_occurrence_order() {
		let mut node = sample_nodes().remove(0);
		node.connections = vec!["3".into(), "2".into(), "3".into(), "4".into(), "2".into()];
		node.dedup_connections();
		assert_eq!(node.connections, vec!["3", "2", "4"]);
	}

	#[test]
	fn positions_and_displacements_stay_distinct() {
		let a = Point::new(3.0, 4.0);
		let b = Point::new(1.0, 1.0);
		let delta: Vec2 = a - b;
		assert_eq!(delta, Vec2::new(2.0, 3.0));
		assert_eq!(b + delta * 2.0, Point::new(5.0, 7.0));
		assert_eq!((a - Point::ZERO).hypot(), 5.0);
		assert!(!Point::new(f64::NAN, 0.0).is_finite());
	}
}
