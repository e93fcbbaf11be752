use std::f32::consts::TAU;

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::api::types::NodeId;
use crate::components::mesh::MeshComponent;

/// What a node represents in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The single scene root.
    Root,
    /// Invisible anchor used to compose orbital motion.
    Pivot,
    /// Drawable node carrying a `MeshComponent`.
    Mesh,
}

/// Transform relative to the parent node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    pub position: Vec3,
    /// Euler angles in radians, applied in X-Y-Z order.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl LocalTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Parent-space matrix: translate · rotate · scale.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.position)
    }

    /// Add `angle` about the local Y axis, wrapped into [0, 2π).
    pub fn rotate_y(&mut self, angle: f32) {
        self.rotation.y = wrap_angle(self.rotation.y + angle);
    }
}

/// Wrap an angle into [0, 2π).
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// A node in the scene graph arena.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    /// Name for lookups ("sun", "saturn", "saturn-ring", ...).
    pub tag: String,
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub local: LocalTransform,
    /// World matrix, refreshed by `SceneGraph::propagate`.
    pub world: Mat4,
    pub mesh: Option<MeshComponent>,
    /// Invisible nodes and their subtrees are skipped when drawing.
    pub visible: bool,
}

impl Node {
    pub fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            tag: String::new(),
            kind,
            parent: None,
            children: Vec::new(),
            local: LocalTransform::default(),
            world: Mat4::IDENTITY,
            mesh: None,
            visible: true,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_local(mut self, local: LocalTransform) -> Self {
        self.local = local;
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.local.position = position;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self.kind = NodeKind::Mesh;
        self
    }

    pub fn is_mesh(&self) -> bool {
        self.kind == NodeKind::Mesh
    }

    /// Translation component of the world matrix.
    pub fn world_position(&self) -> Vec3 {
        self.world.w_axis.truncate()
    }
}
