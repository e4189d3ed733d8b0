//! Seam between the core and whatever draws the marks.

use crate::scene::Scene;
use std::cell::RefCell;
use std::rc::Rc;

/// Binds a prepared scene to visual marks. The web front-end forwards scenes
/// to D3.js; tests record the calls.
pub trait RenderAdapter {
    fn draw(&mut self, container_id: &str, scene: &Scene);

    /// Inline error indicator in place of the chart.
    fn show_error(&mut self, container_id: &str, message: &str);

    /// Remove everything drawn in the container.
    fn clear(&mut self, container_id: &str);
}

/// One call received by a [`RecordingAdapter`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Draw { container_id: String, scene: Scene },
    Error { container_id: String, message: String },
    Clear { container_id: String },
}

/// Adapter that only records what it was asked to do. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingAdapter {
    calls: Rc<RefCell<Vec<DrawCall>>>,
}

impl RecordingAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<DrawCall> {
        self.calls.borrow().clone()
    }

    /// Number of `draw` calls so far.
    pub fn draw_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, DrawCall::Draw { .. }))
            .count()
    }

    pub fn last_scene(&self) -> Option<Scene> {
        self.calls.borrow().iter().rev().find_map(|c| match c {
            DrawCall::Draw { scene, .. } => Some(scene.clone()),
            _ => None,
        })
    }

    pub fn errors(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                DrawCall::Error { message, .. } => Some(message.clone()),
                _ => None,
            })
            .collect()
    }
}

impl RenderAdapter for RecordingAdapter {
    fn draw(&mut self, container_id: &str, scene: &Scene) {
        self.calls.borrow_mut().push(DrawCall::Draw {
            container_id: container_id.to_string(),
            scene: scene.clone(),
        });
    }

    fn show_error(&mut self, container_id: &str, message: &str) {
        self.calls.borrow_mut().push(DrawCall::Error {
            container_id: container_id.to_string(),
            message: message.to_string(),
        });
    }

    fn clear(&mut self, container_id: &str) {
        self.calls.borrow_mut().push(DrawCall::Clear {
            container_id: container_id.to_string(),
        });
    }
}
