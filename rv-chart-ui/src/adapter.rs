//! Render adapter forwarding scenes to the D3 scripts.

use crate::js_bridge;
use rv_core::adapter::RenderAdapter;
use rv_core::Scene;

#[derive(Debug, Clone, Copy, Default)]
pub struct D3Adapter;

impl RenderAdapter for D3Adapter {
    fn draw(&mut self, container_id: &str, scene: &Scene) {
        log::debug!(
            "[RV] {} -> {} ({} marks)",
            js_bridge::render_function(scene),
            container_id,
            scene.mark_count()
        );
        js_bridge::render_scene(container_id, scene);
    }

    fn show_error(&mut self, container_id: &str, message: &str) {
        js_bridge::show_chart_error(container_id, message);
    }

    fn clear(&mut self, container_id: &str) {
        js_bridge::destroy_chart(container_id);
    }
}
