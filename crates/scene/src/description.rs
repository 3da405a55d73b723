//! Declarative scene descriptions.
//!
//! A [`NodeDescription`] tree is walked once at startup to create the live
//! [`SceneGraph`]. Descriptions deserialize from JSON:
//!
//! ```
//! use orrery_scene::{NodeDescription, SceneGraph};
//!
//! let description = NodeDescription::from_json_str(r#"{
//!     "name": "system",
//!     "draw": false,
//!     "children": [
//!         { "name": "planetOrbit", "nodeType": "RTS", "draw": false,
//!           "translation": [100.0, 0.0, 0.0],
//!           "children": [ { "name": "planet", "scale": [5.0, 5.0, 5.0] } ] }
//!     ]
//! }"#).unwrap();
//!
//! let (graph, root) = SceneGraph::from_description(&description).unwrap();
//! assert_eq!(graph.len(), 3);
//! assert_eq!(graph.drawables().len(), 1);
//! assert!(graph.lookup("planet").is_some());
//! # let _ = root;
//! ```

use std::collections::HashSet;

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{SceneError, SceneResult};
use crate::graph::SceneGraph;
use crate::node::{CullMode, DrawInfo, NodeId, Shape};
use crate::transform::{Transform, TransformKind};

fn default_draw() -> bool {
    true
}

/// One node of a scene description tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescription {
    pub name: String,
    /// Composition order; bodies default to TRS
    #[serde(default)]
    pub node_type: TransformKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<Vec3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Vec3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<Vec3>,
    /// Whether the node is handed to the renderer
    #[serde(default = "default_draw")]
    pub draw: bool,
    #[serde(default)]
    pub shape: Shape,
    #[serde(default)]
    pub cull: CullMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_offset: Option<Vec4>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_mult: Option<Vec4>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDescription>,
}

impl NodeDescription {
    /// A drawable TRS node with no overrides.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node_type: TransformKind::Trs,
            translation: None,
            rotation: None,
            scale: None,
            draw: true,
            shape: Shape::default(),
            cull: CullMode::default(),
            surface: None,
            color_offset: None,
            color_mult: None,
            children: Vec::new(),
        }
    }

    /// A non-drawn node, e.g. an orbit pivot or grouping node.
    pub fn group(name: impl Into<String>, node_type: TransformKind) -> Self {
        Self {
            node_type,
            draw: false,
            ..Self::new(name)
        }
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = Some(translation);
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_surface(mut self, surface: impl Into<String>) -> Self {
        self.surface = Some(surface.into());
        self
    }

    pub fn with_colors(mut self, offset: Vec4, mult: Vec4) -> Self {
        self.color_offset = Some(offset);
        self.color_mult = Some(mult);
        self
    }

    pub fn with_child(mut self, child: NodeDescription) -> Self {
        self.children.push(child);
        self
    }

    /// Parse a description tree from JSON.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Initial transform for the node this description creates.
    pub fn transform(&self) -> Transform {
        let mut transform = Transform::new(self.node_type);
        if let Some(translation) = self.translation {
            transform.translation = translation;
        }
        if let Some(rotation) = self.rotation {
            transform.rotation = rotation;
        }
        if let Some(scale) = self.scale {
            transform.scale = scale;
        }
        transform
    }

    /// Render state for the node, or `None` when it is not drawn.
    pub fn draw_info(&self) -> Option<DrawInfo> {
        if !self.draw {
            return None;
        }
        let defaults = DrawInfo::default();
        Some(DrawInfo {
            shape: self.shape,
            cull: self.cull,
            surface: self.surface.clone(),
            color_offset: self.color_offset.unwrap_or(defaults.color_offset),
            color_mult: self.color_mult.unwrap_or(defaults.color_mult),
            ..defaults
        })
    }

    /// Total number of nodes in this tree.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }
}

impl SceneGraph {
    /// Build a new graph from a description tree, returning it with the root.
    pub fn from_description(description: &NodeDescription) -> SceneResult<(Self, NodeId)> {
        let mut graph = Self::new();
        let root = graph.insert_description(description)?;
        info!(
            root = %description.name,
            nodes = graph.len(),
            drawables = graph.drawables().len(),
            "Built scene graph"
        );
        Ok((graph, root))
    }

    /// Create nodes for `description` and its subtree in this graph.
    ///
    /// Nodes are created depth-first, parent before children, and every
    /// child is attached to its parent in description order. The returned
    /// root is left parentless. All names are checked first, so a duplicate
    /// anywhere in the tree leaves the graph unchanged.
    ///
    /// Recurses once per tree level; extremely deep descriptions can exhaust
    /// the stack.
    pub fn insert_description(&mut self, description: &NodeDescription) -> SceneResult<NodeId> {
        let mut seen = HashSet::new();
        self.check_names(description, &mut seen)?;
        self.build_subtree(description)
    }

    fn check_names<'a>(
        &self,
        description: &'a NodeDescription,
        seen: &mut HashSet<&'a str>,
    ) -> SceneResult<()> {
        let name = description.name.as_str();
        if self.lookup(name).is_some() || !seen.insert(name) {
            return Err(SceneError::DuplicateName(name.to_string()));
        }
        description
            .children
            .iter()
            .try_for_each(|child| self.check_names(child, seen))
    }

    fn build_subtree(&mut self, description: &NodeDescription) -> SceneResult<NodeId> {
        let id = self.add_node(description.name.clone(), description.transform())?;
        if let Some(draw) = description.draw_info() {
            self.set_draw_info(id, draw)?;
        }
        for child in &description.children {
            let child_id = self.build_subtree(child)?;
            self.set_parent(child_id, Some(id))?;
        }
        Ok(id)
    }
}
