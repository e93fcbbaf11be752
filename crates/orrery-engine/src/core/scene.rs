use glam::{Mat4, Vec3};

use crate::api::types::{Color, CubeTextureId, NodeId};
use crate::components::mesh::MeshComponent;
use crate::components::node::{LocalTransform, Node, NodeKind};

/// What the renderer paints behind all meshes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    Color(Color),
    CubeMap(CubeTextureId),
}

impl Default for Background {
    fn default() -> Self {
        Background::Color(Color::BLACK)
    }
}

/// Arena-backed scene graph.
///
/// Nodes are only ever appended, and a parent must exist before its child,
/// so a parent's index is always lower than its children's. World matrices
/// are therefore computed in a single forward pass.
pub struct SceneGraph {
    nodes: Vec<Node>,
    background: Background,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    /// Create a scene with room for `capacity` nodes (root included).
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(Node::new(NodeId::ROOT, NodeKind::Root).with_tag("root"));
        Self {
            nodes,
            background: Background::default(),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Attach `node` under `parent` and return its id.
    /// The node's own `id`/`parent` fields are overwritten.
    /// Unknown parents fall back to the root.
    pub fn add(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        let parent = if parent.index() < self.nodes.len() { parent } else { NodeId::ROOT };
        let id = NodeId(self.nodes.len() as u32);
        node.id = id;
        node.parent = Some(parent);
        node.children.clear();
        self.nodes.push(node);
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Add an invisible pivot at `parent`'s origin.
    pub fn add_pivot(&mut self, parent: NodeId, tag: impl Into<String>) -> NodeId {
        self.add(parent, Node::new(NodeId::ROOT, NodeKind::Pivot).with_tag(tag))
    }

    /// Add a mesh node with the given local transform.
    pub fn add_mesh(
        &mut self,
        parent: NodeId,
        tag: impl Into<String>,
        mesh: MeshComponent,
        local: LocalTransform,
    ) -> NodeId {
        self.add(
            parent,
            Node::new(NodeId::ROOT, NodeKind::Mesh)
                .with_tag(tag)
                .with_local(local)
                .with_mesh(mesh),
        )
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Number of nodes of the given kind.
    pub fn count(&self, kind: NodeKind) -> usize {
        self.nodes.iter().filter(|n| n.kind == kind).count()
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A scene holding only its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Accumulate rotation about the node's local Y axis.
    pub fn rotate_y(&mut self, id: NodeId, angle: f32) {
        if let Some(node) = self.get_mut(id) {
            node.local.rotate_y(angle);
        }
    }

    pub fn set_background(&mut self, background: Background) {
        self.background = background;
    }

    pub fn background(&self) -> Background {
        self.background
    }

    /// Recompute every node's world matrix from the local transforms.
    pub fn propagate(&mut self) {
        for i in 0..self.nodes.len() {
            let local = self.nodes[i].local.matrix();
            let world = match self.nodes[i].parent {
                Some(p) if p.index() < i => self.nodes[p.index()].world * local,
                _ => local,
            };
            self.nodes[i].world = world;
        }
    }

    /// World matrix as of the last `propagate`.
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        self.get(id).map(|n| n.world).unwrap_or(Mat4::IDENTITY)
    }

    /// World-space position as of the last `propagate`.
    pub fn world_position(&self, id: NodeId) -> Vec3 {
        self.get(id).map(|n| n.world_position()).unwrap_or(Vec3::ZERO)
    }

    /// True when `id` and all its ancestors are visible.
    pub fn is_visible(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(cur) = current {
            match self.get(cur) {
                Some(node) if node.visible => current = node.parent,
                _ => return false,
            }
        }
        true
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::TextureId;
    use std::f32::consts::FRAC_PI_2;

    fn sphere() -> MeshComponent {
        MeshComponent::lit_sphere(1.0, TextureId(0))
    }

    #[test]
    fn new_scene_has_only_root() {
        let scene = SceneGraph::new();
        assert_eq!(scene.len(), 1);
        assert!(scene.is_empty());
        assert_eq!(scene.get(scene.root()).unwrap().kind, NodeKind::Root);
    }

    #[test]
    fn parent_child_relationship() {
        let mut scene = SceneGraph::new();
        let pivot = scene.add_pivot(scene.root(), "pivot");
        let mesh = scene.add_mesh(pivot, "mesh", sphere(), LocalTransform::new());

        assert_eq!(scene.parent(mesh), Some(pivot));
        assert_eq!(scene.children(pivot), &[mesh]);
        assert_eq!(scene.children(scene.root()), &[pivot]);
        assert_eq!(scene.count(NodeKind::Pivot), 1);
        assert_eq!(scene.count(NodeKind::Mesh), 1);
    }

    #[test]
    fn unknown_parent_falls_back_to_root() {
        let mut scene = SceneGraph::new();
        let id = scene.add_pivot(NodeId(99), "orphan");
        assert_eq!(scene.parent(id), Some(NodeId::ROOT));
    }

    #[test]
    fn propagate_composes_pivot_rotation() {
        let mut scene = SceneGraph::new();
        let pivot = scene.add_pivot(scene.root(), "pivot");
        let mesh = scene.add_mesh(
            pivot,
            "mesh",
            sphere(),
            LocalTransform::new().with_position(Vec3::new(10.0, 0.0, 0.0)),
        );

        scene.rotate_y(pivot, FRAC_PI_2);
        scene.propagate();

        // +X rotated a quarter turn about +Y lands on -Z.
        let p = scene.world_position(mesh);
        assert!((p - Vec3::new(0.0, 0.0, -10.0)).length() < 1e-4, "got {:?}", p);
    }

    #[test]
    fn self_rotation_does_not_move_mesh() {
        let mut scene = SceneGraph::new();
        let pivot = scene.add_pivot(scene.root(), "pivot");
        let mesh = scene.add_mesh(
            pivot,
            "mesh",
            sphere(),
            LocalTransform::new().with_position(Vec3::new(10.0, 0.0, 0.0)),
        );

        scene.rotate_y(mesh, 1.0);
        scene.propagate();

        let p = scene.world_position(mesh);
        assert!((p - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn hidden_ancestor_hides_subtree() {
        let mut scene = SceneGraph::new();
        let pivot = scene.add_pivot(scene.root(), "pivot");
        let mesh = scene.add_mesh(pivot, "mesh", sphere(), LocalTransform::new());
        assert!(scene.is_visible(mesh));
        scene.get_mut(pivot).unwrap().visible = false;
        assert!(!scene.is_visible(mesh));
    }
}
