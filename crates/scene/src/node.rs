//! Scene graph nodes and their drawable bindings.

use glam::{Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::transform::Transform;
use crate::uniforms::ObjectUniforms;

slotmap::new_key_type! {
    /// Handle to a node stored in a [`SceneGraph`](crate::SceneGraph).
    pub struct NodeId;
}

/// Mesh the renderer should draw for a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Sphere,
    Cube,
}

/// Face culling requested for a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CullMode {
    #[default]
    Back,
    Front,
    None,
}

/// Render state attached to a drawable node.
///
/// The engine only writes [`DrawInfo::uniforms`]; the remaining fields are
/// passed through to the renderer untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawInfo {
    pub shape: Shape,
    pub cull: CullMode,
    /// Texture path for the surface, if any
    pub surface: Option<String>,
    pub color_offset: Vec4,
    pub color_mult: Vec4,
    /// Matrices written every frame
    pub uniforms: ObjectUniforms,
}

impl Default for DrawInfo {
    fn default() -> Self {
        Self {
            shape: Shape::Sphere,
            cull: CullMode::Back,
            surface: None,
            color_offset: Vec4::new(0.0, 0.0, 0.0, 1.0),
            color_mult: Vec4::ONE,
            uniforms: ObjectUniforms::default(),
        }
    }
}

/// A single node in the scene graph.
///
/// The graph owns nodes; `parent` is a plain handle and never keeps a node
/// alive.
#[derive(Clone, Debug)]
pub struct SceneNode {
    pub(crate) name: String,
    pub(crate) transform: Transform,
    pub(crate) local_matrix: Mat4,
    pub(crate) world_matrix: Mat4,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) draw: Option<DrawInfo>,
}

impl SceneNode {
    pub(crate) fn new(name: String, transform: Transform) -> Self {
        Self {
            name,
            transform,
            local_matrix: Mat4::IDENTITY,
            world_matrix: Mat4::IDENTITY,
            parent: None,
            children: Vec::new(),
            draw: None,
        }
    }

    /// Name the node is registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Local matrix from the last propagation.
    pub fn local_matrix(&self) -> Mat4 {
        self.local_matrix
    }

    /// World matrix from the last propagation.
    pub fn world_matrix(&self) -> Mat4 {
        self.world_matrix
    }

    /// Origin of the node in world space, as of the last propagation.
    pub fn world_position(&self) -> Vec3 {
        self.world_matrix.w_axis.truncate()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn draw_info(&self) -> Option<&DrawInfo> {
        self.draw.as_ref()
    }

    pub fn is_drawable(&self) -> bool {
        self.draw.is_some()
    }
}
