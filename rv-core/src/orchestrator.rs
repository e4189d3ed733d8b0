//! Update orchestration: re-render every registered visualization on a
//! selection change or a viewport resize.
//!
//! Each registered view gets exactly one selection listener, so a change
//! renders every view once, in registration order. Views are held weakly; a
//! view dropped by its owner is skipped and pruned.

use crate::chart::{RenderOutcome, SkipReason, Visualization};
use crate::selection::{ListenerId, Selection, SelectionState, WeakSelectionState};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub type ViewHandle = Rc<RefCell<dyn Visualization>>;
type WeakView = Weak<RefCell<dyn Visualization>>;

#[derive(Clone)]
pub struct Orchestrator {
    selection: SelectionState,
    views: Views,
}

fn remove_view(views: &Views, selection: &SelectionState, id: &ListenerId) {
    views.borrow_mut().retain(|(existing, _)| existing != id);
    selection.unsubscribe(id);
}

type Views = Rc<RefCell<Vec<(ListenerId, WeakView)>>>;

fn render_view(view: &WeakView, id: &ListenerId, selection: &Selection) -> RenderOutcome {
    let Some(view) = view.upgrade() else {
        return RenderOutcome::Skipped(SkipReason::TornDown);
    };
    // A view that is mid-render (e.g. still finishing its load) is skipped
    // rather than re-entered.
    let Ok(mut view) = view.try_borrow_mut() else {
        log::warn!("[{}] busy, skipping update", id);
        return RenderOutcome::Skipped(SkipReason::Busy);
    };
    let outcome = view.render(selection);
    log::debug!("[{}] update -> {:?}", id, outcome);
    outcome
}

impl Orchestrator {
    pub fn new(selection: SelectionState) -> Self {
        Self {
            selection,
            views: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Register a view and subscribe it to selection changes. Returns `false`
    /// when a view with the same id is already registered.
    pub fn register(&self, view: ViewHandle) -> bool {
        let id = ListenerId::new(view.borrow().id());
        if self.is_registered(&id) {
            log::debug!("[{}] already registered", id);
            return false;
        }

        let weak = Rc::downgrade(&view);
        self.views.borrow_mut().push((id.clone(), weak.clone()));

        let listener_id = id.clone();
        let views = Rc::clone(&self.views);
        let state: WeakSelectionState = self.selection.downgrade();
        self.selection.subscribe(id, move |selection| {
            if weak.strong_count() == 0 {
                log::debug!("[{}] view dropped, unsubscribing", listener_id);
                if let Some(state) = state.upgrade() {
                    remove_view(&views, &state, &listener_id);
                }
                return;
            }
            render_view(&weak, &listener_id, selection);
        });
        true
    }

    pub fn unregister(&self, id: &str) {
        remove_view(&self.views, &self.selection, &ListenerId::new(id));
    }

    pub fn is_registered(&self, id: &ListenerId) -> bool {
        self.views.borrow().iter().any(|(existing, _)| existing == id)
    }

    /// Ids of registered views, in registration order.
    pub fn view_ids(&self) -> Vec<String> {
        self.views
            .borrow()
            .iter()
            .map(|(id, _)| id.as_str().to_string())
            .collect()
    }

    /// Render every live view once with the current selection.
    pub fn render_all(&self) -> Vec<RenderOutcome> {
        let selection = self.selection.get();
        self.live_views()
            .iter()
            .map(|(id, view)| render_view(view, id, &selection))
            .collect()
    }

    /// Viewport resize: give each view its container width (as reported by
    /// `width_of(container_id)`), then render each once.
    pub fn resize(&self, width_of: impl Fn(&str) -> Option<f64>) -> Vec<RenderOutcome> {
        for (id, view) in self.live_views() {
            let Some(view) = view.upgrade() else {
                continue;
            };
            let Ok(mut view) = view.try_borrow_mut() else {
                log::warn!("[{}] busy, skipping resize", id);
                continue;
            };
            if let Some(width) = width_of(view.container_id()) {
                view.resize(width);
            }
        }
        self.render_all()
    }

    /// Drop views whose owner has released them, unsubscribing their
    /// listeners, and return the survivors.
    fn live_views(&self) -> Vec<(ListenerId, WeakView)> {
        let dead: Vec<ListenerId> = self
            .views
            .borrow()
            .iter()
            .filter(|(_, view)| view.strong_count() == 0)
            .map(|(id, _)| id.clone())
            .collect();
        for id in &dead {
            self.unregister(id.as_str());
        }
        self.views.borrow().clone()
    }
}
