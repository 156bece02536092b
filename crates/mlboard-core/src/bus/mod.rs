//! Dashboard-wide notifications: manual reload requests, the global loading
//! flag and the error banner.
//!
//! A [`DashboardBus`] is built by whoever owns the page and handed to the
//! components that need it. Handlers run synchronously, in subscription
//! order, on the calling thread.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::Serialize;
use tracing::debug;

/// Handle for removing a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Payload of the error channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorNotice {
    pub has_error: bool,
    pub message: Option<String>,
    pub title: Option<String>,
}

type Handler<T> = Rc<dyn Fn(&T)>;

struct Channel<T> {
    name: &'static str,
    handlers: RefCell<Vec<(SubscriptionId, Handler<T>)>>,
}

impl<T> Channel<T> {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            handlers: RefCell::new(Vec::new()),
        }
    }

    fn subscribe(&self, id: SubscriptionId, handler: Handler<T>) {
        self.handlers.borrow_mut().push((id, handler));
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(handler_id, _)| *handler_id != id);
        handlers.len() != before
    }

    fn emit(&self, payload: &T) {
        // Snapshot so handlers may (un)subscribe while the event is delivered.
        let handlers: Vec<Handler<T>> = self
            .handlers
            .borrow()
            .iter()
            .map(|(_, h)| h.clone())
            .collect();
        debug!(
            event = "core.bus.emitted",
            channel = self.name,
            handler_count = handlers.len(),
        );
        for handler in handlers {
            handler(payload);
        }
    }

    fn clear(&self) {
        self.handlers.borrow_mut().clear();
    }

    fn len(&self) -> usize {
        self.handlers.borrow().len()
    }
}

pub struct DashboardBus {
    next_id: Cell<u64>,
    reload: Channel<()>,
    loading: Channel<bool>,
    error: Channel<ErrorNotice>,
}

impl DashboardBus {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(1),
            reload: Channel::new("reload"),
            loading: Channel::new("loading_flag"),
            error: Channel::new("error"),
        }
    }

    fn next_id(&self) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        id
    }

    pub fn add_reloader<F: Fn() + 'static>(&self, handler: F) -> SubscriptionId {
        let id = self.next_id();
        self.reload.subscribe(id, Rc::new(move |_: &()| handler()));
        id
    }

    pub fn remove_reloader(&self, id: SubscriptionId) -> bool {
        self.reload.unsubscribe(id)
    }

    /// Ask every reloader to refetch its data.
    pub fn call_reloader(&self) {
        self.reload.emit(&());
    }

    pub fn watch_loading_flag<F: Fn(bool) + 'static>(&self, handler: F) -> SubscriptionId {
        let id = self.next_id();
        self.loading
            .subscribe(id, Rc::new(move |loading: &bool| handler(*loading)));
        id
    }

    pub fn unwatch_loading_flag(&self, id: SubscriptionId) -> bool {
        self.loading.unsubscribe(id)
    }

    pub fn set_loading_flag(&self, loading: bool) {
        self.loading.emit(&loading);
    }

    pub fn add_error_handler<F: Fn(&ErrorNotice) + 'static>(&self, handler: F) -> SubscriptionId {
        let id = self.next_id();
        self.error.subscribe(id, Rc::new(handler));
        id
    }

    pub fn remove_error_handler(&self, id: SubscriptionId) -> bool {
        self.error.unsubscribe(id)
    }

    /// Show an error banner. An empty or missing message clears it instead.
    pub fn set_error(&self, message: Option<&str>, title: Option<&str>) {
        let message = message.filter(|m| !m.is_empty());
        self.error.emit(&ErrorNotice {
            has_error: message.is_some(),
            message: message.map(str::to_string),
            title: title.map(str::to_string),
        });
    }

    pub fn unset_error(&self) {
        self.error.emit(&ErrorNotice::default());
    }

    /// Total number of live subscriptions across all channels.
    pub fn subscription_count(&self) -> usize {
        self.reload.len() + self.loading.len() + self.error.len()
    }

    /// Drop every subscription (page teardown).
    pub fn clear(&self) {
        self.reload.clear();
        self.loading.clear();
        self.error.clear();
    }
}

impl Default for DashboardBus {
    fn default() -> Self {
        Self::new()
    }
}
