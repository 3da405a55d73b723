//! # Scene Graph
//!
//! Nodes live in a slot map owned by [`SceneGraph`]. Each node stores its
//! children as an ordered list of handles and its parent as a non-owning
//! handle, so reparenting never creates ownership cycles.
//!
//! World matrices are recomputed once per frame by a pre-order traversal:
//! every node recomposes its local matrix from its [`Transform`], multiplies
//! it onto the parent's freshly computed world matrix, then recurses into its
//! children in list order.
//!
//! Nodes are also registered by unique name; the name lookup is how the
//! animation driver and callers reach interior nodes.

use std::collections::HashMap;

use glam::{Mat4, Vec3};
use slotmap::SlotMap;
use tracing::debug;

use crate::error::{SceneError, SceneResult};
use crate::node::{DrawInfo, NodeId, SceneNode};
use crate::transform::Transform;
use crate::uniforms::ObjectUniforms;

/// Hierarchy of transform nodes with a name lookup.
#[derive(Debug, Default)]
pub struct SceneGraph {
    /// Storage for all nodes
    nodes: SlotMap<NodeId, SceneNode>,
    /// Name -> node handle
    names: HashMap<String, NodeId>,
    /// Parentless nodes, in the order they became roots
    roots: Vec<NodeId>,
    /// Drawable nodes, in the order they were marked drawable
    drawables: Vec<NodeId>,
}

impl SceneGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert a new parentless node registered under `name`.
    pub fn add_node(&mut self, name: impl Into<String>, transform: Transform) -> SceneResult<NodeId> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(SceneError::DuplicateName(name));
        }

        let id = self.nodes.insert(SceneNode::new(name.clone(), transform));
        debug!(node = %name, kind = ?transform.kind, "Created scene node");
        self.names.insert(name, id);
        self.roots.push(id);
        Ok(id)
    }

    /// Attach render state to a node, making it drawable.
    pub fn set_draw_info(&mut self, id: NodeId, draw: DrawInfo) -> SceneResult<()> {
        let node = self.nodes.get_mut(id).ok_or(SceneError::UnknownNode)?;
        if node.draw.is_none() {
            self.drawables.push(id);
        }
        node.draw = Some(draw);
        Ok(())
    }

    /// Get a node by handle.
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    /// Get a node mutably by handle.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id)
    }

    /// Look up a node handle by name.
    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    /// Look up a node handle by name, failing if it is not registered.
    pub fn require(&self, name: &str) -> SceneResult<NodeId> {
        self.lookup(name)
            .ok_or_else(|| SceneError::MissingNode(name.to_string()))
    }

    /// Get a node by name.
    pub fn node_by_name(&self, name: &str) -> Option<&SceneNode> {
        self.lookup(name).and_then(|id| self.nodes.get(id))
    }

    /// Mutable access to a node's transform.
    pub fn transform_mut(&mut self, id: NodeId) -> Option<&mut Transform> {
        self.nodes.get_mut(id).map(|node| &mut node.transform)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    /// Children of a node in traversal order; empty for unknown handles.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    /// Parentless nodes.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Drawable nodes in the order they were registered.
    pub fn drawables(&self) -> &[NodeId] {
        &self.drawables
    }

    /// World-space origin of a node as of the last propagation.
    pub fn world_position(&self, id: NodeId) -> Option<Vec3> {
        self.nodes.get(id).map(SceneNode::world_position)
    }

    /// Move `id` under `parent`, or detach it when `parent` is `None`.
    ///
    /// The node is removed from its old parent's child list and appended to
    /// the new one. Setting the current parent again is a no-op. Parents that
    /// are the node itself or one of its descendants are rejected, leaving the
    /// graph unchanged.
    pub fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) -> SceneResult<()> {
        let old_parent = self.nodes.get(id).ok_or(SceneError::UnknownNode)?.parent;
        if let Some(parent_id) = parent {
            if !self.nodes.contains_key(parent_id) {
                return Err(SceneError::UnknownNode);
            }
            if self.is_ancestor(id, parent_id) {
                return Err(SceneError::Cycle {
                    node: self.nodes[id].name.clone(),
                    parent: self.nodes[parent_id].name.clone(),
                });
            }
        }

        if old_parent == parent {
            return Ok(());
        }

        match old_parent {
            Some(old_id) => self.nodes[old_id].children.retain(|&child| child != id),
            None => self.roots.retain(|&root| root != id),
        }

        match parent {
            Some(parent_id) => self.nodes[parent_id].children.push(id),
            None => self.roots.push(id),
        }
        self.nodes[id].parent = parent;

        debug!(
            node = %self.nodes[id].name,
            parent = parent.map(|p| self.nodes[p].name.as_str()).unwrap_or("<none>"),
            "Reparented scene node"
        );
        Ok(())
    }

    /// Recompute matrices for `id` and its whole subtree.
    ///
    /// With a parent matrix the node's world matrix becomes
    /// `parent_world * local`; without one it is a copy of the local matrix.
    ///
    /// Propagation recurses once per level, so chains thousands of nodes
    /// deep can exhaust the stack.
    pub fn update_world_matrix(&mut self, id: NodeId, parent_world: Option<Mat4>) -> SceneResult<()> {
        if !self.nodes.contains_key(id) {
            return Err(SceneError::UnknownNode);
        }
        self.propagate(id, parent_world);
        Ok(())
    }

    /// Recompute matrices for every tree in the graph.
    pub fn update_world_matrices(&mut self) {
        for i in 0..self.roots.len() {
            let root = self.roots[i];
            self.propagate(root, None);
        }
    }

    /// Write object uniforms for every drawable from its world matrix.
    ///
    /// Call after propagation so the world matrices are current.
    pub fn write_uniforms(&mut self, view_projection: &Mat4) {
        for &id in &self.drawables {
            let node = &mut self.nodes[id];
            let world = node.world_matrix;
            if let Some(draw) = node.draw.as_mut() {
                draw.uniforms = ObjectUniforms::new(view_projection, world);
            }
        }
    }

    // Handles stored in `children` and `roots` always refer to live nodes.
    fn propagate(&mut self, id: NodeId, parent_world: Option<Mat4>) {
        let node = &mut self.nodes[id];
        node.local_matrix = node.transform.compose();
        node.world_matrix = match parent_world {
            Some(parent) => parent * node.local_matrix,
            None => node.local_matrix,
        };

        let world = node.world_matrix;
        for i in 0..self.nodes[id].children.len() {
            let child = self.nodes[id].children[i];
            self.propagate(child, Some(world));
        }
    }

    /// Whether `node_id` is `descendant_id` or one of its ancestors.
    fn is_ancestor(&self, node_id: NodeId, descendant_id: NodeId) -> bool {
        let mut current = Some(descendant_id);
        while let Some(id) = current {
            if id == node_id {
                return true;
            }
            current = self.nodes.get(id).and_then(|node| node.parent);
        }
        false
    }
}
