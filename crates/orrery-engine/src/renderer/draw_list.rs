use crate::core::scene::SceneGraph;
use crate::renderer::traits::DrawItem;

/// Collect every visible mesh node into `items`, in arena order.
/// Call after `SceneGraph::propagate` so world matrices are current.
pub fn build_draw_list(scene: &SceneGraph, items: &mut Vec<DrawItem>) {
    items.clear();
    for node in scene.iter() {
        let Some(mesh) = node.mesh else { continue };
        if !scene.is_visible(node.id) {
            continue;
        }
        items.push(DrawItem {
            node: node.id,
            model: node.world,
            mesh,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::TextureId;
    use crate::components::mesh::MeshComponent;
    use crate::components::node::LocalTransform;
    use glam::Vec3;

    #[test]
    fn collects_meshes_with_world_matrices() {
        let mut scene = SceneGraph::new();
        let pivot = scene.add_pivot(scene.root(), "pivot");
        let planet = scene.add_mesh(
            pivot,
            "planet",
            MeshComponent::lit_sphere(2.0, TextureId(0)),
            LocalTransform::new().with_position(Vec3::new(5.0, 0.0, 0.0)),
        );
        scene.propagate();

        let mut items = Vec::new();
        build_draw_list(&scene, &mut items);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].node, planet);
        let p = items[0].model.w_axis.truncate();
        assert!((p - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn skips_hidden_subtrees() {
        let mut scene = SceneGraph::new();
        let pivot = scene.add_pivot(scene.root(), "pivot");
        scene.add_mesh(pivot, "a", MeshComponent::lit_sphere(1.0, TextureId(0)), LocalTransform::new());
        scene.add_mesh(scene.root(), "b", MeshComponent::lit_sphere(1.0, TextureId(0)), LocalTransform::new());
        scene.get_mut(pivot).unwrap().visible = false;
        scene.propagate();

        let mut items = Vec::new();
        build_draw_list(&scene, &mut items);
        assert_eq!(items.len(), 1);
    }
}
