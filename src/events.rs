use crate::models::ViewMode;

/// Resource
///
/// The CRUD tables that refresh themselves when one of their records changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    ExcludePatterns,
    AdminUsers,
    AdminGroups,
}

impl Resource {
    /// The topic name the screens publish table refreshes under.
    pub fn topic(&self) -> &'static str {
        match self {
            Resource::ExcludePatterns => "excludepatterns:table-updated",
            Resource::AdminUsers => "admin-users:table-updated",
            Resource::AdminGroups => "admin-groups:table-updated",
        }
    }
}

/// AppEvent
///
/// Everything that travels over the event bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A navigation committed on `route` with the given view mode.
    Navigated { route: String, view_mode: ViewMode },
    /// Records of `Resource` were created, edited or deleted.
    TableUpdated(Resource),
}

pub type Subscriber = Box<dyn FnMut(&AppEvent) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// EventBus
///
/// Typed publish/subscribe registry. Delivery is synchronous and in
/// subscription order; every subscriber sees every event.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, subscriber: Subscriber) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, subscriber));
        id
    }

    /// Returns false when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    /// Delivers `event` to every subscriber and returns how many received it.
    pub fn publish(&mut self, event: AppEvent) -> usize {
        tracing::trace!(?event, subscribers = self.subscribers.len(), "publishing event");
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&event);
        }
        self.subscribers.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
