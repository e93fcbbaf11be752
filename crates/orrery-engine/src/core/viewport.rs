use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::traits::Renderer;

/// Size of the drawing surface in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Zero dimensions are bumped to 1 so the aspect stays finite.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// React to a window resize: camera aspect, projection and surface size
/// all follow the new dimensions. Runs on every event, no debouncing.
pub fn apply_resize<R: Renderer + ?Sized>(
    viewport: &mut Viewport,
    camera: &mut PerspectiveCamera,
    renderer: &mut R,
    width: u32,
    height: u32,
) {
    *viewport = Viewport::new(width, height);
    camera.set_aspect(viewport.aspect());
    renderer.resize(viewport.width, viewport.height);
    log::debug!("viewport resized to {}x{}", viewport.width, viewport.height);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::buffer::BufferRenderer;

    #[test]
    fn resize_updates_camera_and_surface() {
        let mut viewport = Viewport::new(800, 600);
        let mut camera = PerspectiveCamera::new(75.0, viewport.aspect(), 0.1, 1000.0);
        let mut renderer = BufferRenderer::new(800, 600);

        apply_resize(&mut viewport, &mut camera, &mut renderer, 1280, 720);

        assert_eq!(viewport, Viewport::new(1280, 720));
        assert!((camera.aspect - 1280.0 / 720.0).abs() < 1e-6);
        assert_eq!(renderer.surface_size(), (1280, 720));
    }

    #[test]
    fn zero_height_is_clamped() {
        let v = Viewport::new(640, 0);
        assert_eq!(v.height, 1);
        assert!(v.aspect().is_finite());
    }
}
