//! Shared selection state: the chosen metric and continent filter.
//!
//! `SelectionState` is a cheaply cloneable handle (`Rc<RefCell<..>>`) for the
//! single-threaded WASM environment. Every setter notifies all listeners
//! synchronously, in registration order, before it returns. A mutation made
//! from inside a listener is queued and dispatched once the current pass has
//! finished, so two listener passes never interleave.

use serde::Serialize;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

/// Value of the continent selector that disables filtering.
pub const ALL_CONTINENTS: &str = "all";

/// Continent filter: everything, or one named continent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ContinentFilter {
    #[default]
    All,
    Only(String),
}

impl ContinentFilter {
    /// Parse a selector value; `"all"` and the empty string mean no filter.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(ALL_CONTINENTS) {
            ContinentFilter::All
        } else {
            ContinentFilter::Only(value.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, ContinentFilter::All)
    }

    /// Whether a record with the given continent passes the filter.
    pub fn matches(&self, continent: Option<&str>) -> bool {
        match self {
            ContinentFilter::All => true,
            ContinentFilter::Only(wanted) => continent == Some(wanted.as_str()),
        }
    }

    /// Selector value for this filter.
    pub fn as_str(&self) -> &str {
        match self {
            ContinentFilter::All => ALL_CONTINENTS,
            ContinentFilter::Only(name) => name,
        }
    }
}

impl fmt::Display for ContinentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of what the user has selected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    /// Metric display label
    pub metric: String,
    pub continent: ContinentFilter,
}

impl Selection {
    pub fn new(metric: &str) -> Self {
        Self {
            metric: metric.to_string(),
            continent: ContinentFilter::All,
        }
    }

    pub fn with_continent(mut self, continent: ContinentFilter) -> Self {
        self.continent = continent;
        self
    }
}

/// Identifies a listener; one per live visualization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListenerId(String);

impl ListenerId {
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

type Listener = Rc<RefCell<dyn FnMut(&Selection)>>;

enum Mutation {
    Metric(String),
    Continent(ContinentFilter),
}

struct Inner {
    selection: Selection,
    listeners: Vec<(ListenerId, Listener)>,
    dispatching: bool,
    pending: VecDeque<Mutation>,
}

impl Inner {
    fn apply(&mut self, mutation: Mutation) {
        match mutation {
            Mutation::Metric(label) => self.selection.metric = label,
            Mutation::Continent(filter) => self.selection.continent = filter,
        }
    }
}

/// Process-wide selection with synchronous change notification.
#[derive(Clone)]
pub struct SelectionState {
    inner: Rc<RefCell<Inner>>,
}

/// Non-owning handle, for listeners that need to reach back into the state.
#[derive(Clone)]
pub struct WeakSelectionState {
    inner: Weak<RefCell<Inner>>,
}

impl WeakSelectionState {
    pub fn upgrade(&self) -> Option<SelectionState> {
        self.inner.upgrade().map(|inner| SelectionState { inner })
    }
}

impl SelectionState {
    pub fn new(initial: Selection) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                selection: initial,
                listeners: Vec::new(),
                dispatching: false,
                pending: VecDeque::new(),
            })),
        }
    }

    pub fn downgrade(&self) -> WeakSelectionState {
        WeakSelectionState {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Current selection.
    pub fn get(&self) -> Selection {
        self.inner.borrow().selection.clone()
    }

    pub fn set_metric(&self, label: &str) {
        log::info!("selection: metric -> {}", label);
        self.mutate(Mutation::Metric(label.to_string()));
    }

    pub fn set_continent(&self, filter: ContinentFilter) {
        log::info!("selection: continent -> {}", filter);
        self.mutate(Mutation::Continent(filter));
    }

    /// Register a listener under `id`. Registering an id that is already
    /// present replaces its callback in place, so it still fires once per
    /// change and keeps its original position.
    pub fn subscribe(&self, id: ListenerId, listener: impl FnMut(&Selection) + 'static) {
        let listener: Listener = Rc::new(RefCell::new(listener));
        let mut inner = self.inner.borrow_mut();
        match inner.listeners.iter_mut().find(|(existing, _)| *existing == id) {
            Some(slot) => slot.1 = listener,
            None => inner.listeners.push((id, listener)),
        }
    }

    /// Remove a listener. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: &ListenerId) {
        self.inner
            .borrow_mut()
            .listeners
            .retain(|(existing, _)| existing != id);
    }

    pub fn is_subscribed(&self, id: &ListenerId) -> bool {
        self.inner
            .borrow()
            .listeners
            .iter()
            .any(|(existing, _)| existing == id)
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    fn mutate(&self, mutation: Mutation) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.dispatching {
                inner.pending.push_back(mutation);
                return;
            }
            inner.apply(mutation);
            inner.dispatching = true;
        }

        loop {
            // Snapshot so listeners may read or mutate the state freely.
            let (snapshot, listeners) = {
                let inner = self.inner.borrow();
                let listeners: Vec<Listener> =
                    inner.listeners.iter().map(|(_, l)| Rc::clone(l)).collect();
                (inner.selection.clone(), listeners)
            };

            for listener in listeners {
                (&mut *listener.borrow_mut())(&snapshot);
            }

            let mut inner = self.inner.borrow_mut();
            match inner.pending.pop_front() {
                Some(next) => inner.apply(next),
                None => {
                    inner.dispatching = false;
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> SelectionState {
        SelectionState::new(Selection::new("Recycling Score (2022)"))
    }

    #[test]
    fn parse_continent_filter() {
        assert_eq!(ContinentFilter::parse("all"), ContinentFilter::All);
        assert_eq!(ContinentFilter::parse(""), ContinentFilter::All);
        assert_eq!(
            ContinentFilter::parse("Asia"),
            ContinentFilter::Only("Asia".to_string())
        );
        assert_eq!(ContinentFilter::Only("Asia".into()).as_str(), "Asia");
        assert_eq!(ContinentFilter::All.to_string(), "all");
    }

    #[test]
    fn filter_matches() {
        let asia = ContinentFilter::parse("Asia");
        assert!(asia.matches(Some("Asia")));
        assert!(!asia.matches(Some("Europe")));
        assert!(!asia.matches(None));
        assert!(ContinentFilter::All.matches(None));
    }

    #[test]
    fn listeners_fire_in_registration_order() {
        let s = state();
        let log = Rc::new(RefCell::new(Vec::new()));
        for name in ["map", "bar", "scatter"] {
            let log = Rc::clone(&log);
            s.subscribe(ListenerId::new(name), move |_| log.borrow_mut().push(name));
        }
        s.set_metric("Waste Recovery Rate (2024)");
        assert_eq!(*log.borrow(), vec!["map", "bar", "scatter"]);
        assert_eq!(s.get().metric, "Waste Recovery Rate (2024)");
    }

    #[test]
    fn duplicate_subscription_fires_once() {
        let s = state();
        let count = Rc::new(RefCell::new(0));
        for _ in 0..2 {
            let count = Rc::clone(&count);
            s.subscribe(ListenerId::new("bar"), move |_| *count.borrow_mut() += 1);
        }
        assert_eq!(s.listener_count(), 1);
        s.set_continent(ContinentFilter::parse("Asia"));
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let s = state();
        let id = ListenerId::new("map");
        s.subscribe(id.clone(), |_| {});
        s.unsubscribe(&id);
        s.unsubscribe(&id);
        assert!(!s.is_subscribed(&id));
        s.set_metric("x");
    }

    #[test]
    fn every_change_notifies() {
        let s = state();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        s.subscribe(ListenerId::new("a"), move |sel| {
            sink.borrow_mut().push(sel.metric.clone())
        });
        s.set_metric("A");
        s.set_metric("A");
        s.set_metric("B");
        assert_eq!(*seen.borrow(), vec!["A", "A", "B"]);
    }

    #[test]
    fn nested_mutation_is_queued_after_current_pass() {
        let s = state();
        let log = Rc::new(RefCell::new(Vec::new()));

        let handle = s.clone();
        let first = Rc::clone(&log);
        s.subscribe(ListenerId::new("first"), move |sel| {
            first.borrow_mut().push(format!("first:{}", sel.continent));
            if sel.continent.is_all() {
                handle.set_continent(ContinentFilter::parse("Europe"));
            }
        });
        let second = Rc::clone(&log);
        s.subscribe(ListenerId::new("second"), move |sel| {
            second.borrow_mut().push(format!("second:{}", sel.continent));
        });

        s.set_continent(ContinentFilter::All);
        assert_eq!(
            *log.borrow(),
            vec!["first:all", "second:all", "first:Europe", "second:Europe"]
        );
        assert_eq!(s.get().continent, ContinentFilter::parse("Europe"));
    }
}
