use super::result::MeasurementResult;

/// What changed to produce a measurement update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    PointAdded,
    PointRemoved,
    Cleared,
    Completed,
}

/// A measurement snapshot delivered to listeners after a change.
#[derive(Debug, Clone, Copy)]
pub struct MeasurementUpdate<'a> {
    pub kind: UpdateKind,
    pub result: &'a MeasurementResult,
}

/// Observer of measurement changes, invoked synchronously on the mutating thread.
pub trait MeasurementListener: Send + Sync {
    fn on_update(&mut self, update: &MeasurementUpdate<'_>);
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Subscription list notified in subscription order.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Vec<(ListenerId, Box<dyn MeasurementListener>)>,
    next_id: u64,
}

impl ListenerRegistry {
    pub fn subscribe(&mut self, listener: impl MeasurementListener + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn notify(&mut self, kind: UpdateKind, result: &MeasurementResult) {
        let update = MeasurementUpdate { kind, result };
        for (_, listener) in self.listeners.iter_mut() {
            listener.on_update(&update);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
