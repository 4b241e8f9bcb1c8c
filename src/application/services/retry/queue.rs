use uuid::Uuid;

use crate::domain::models::Notification;

/// Pending notifications in insertion order, which is also retry order.
#[derive(Debug, Default)]
pub struct RetryQueue {
    items: Vec<Notification>,
}

impl RetryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) -> Uuid {
        let id = notification.id;
        self.items.push(notification);
        id
    }

    /// Copy of the current contents; a drain iterates this instead of the
    /// live queue.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.items.clone()
    }

    pub fn remove(&mut self, id: Uuid) -> Option<Notification> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Bumps the attempt counter of the notifications in `attempted` and
    /// returns the ones that used up `max_attempts`, removing them from the
    /// queue. Items that were not attempted keep their counter.
    pub fn age(&mut self, attempted: &[Uuid], max_attempts: u32) -> Vec<Notification> {
        for item in self.items.iter_mut().filter(|item| attempted.contains(&item.id)) {
            item.attempts += 1;
        }
        let (expired, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.items)
            .into_iter()
            .partition(|item| item.attempts >= max_attempts);
        self.items = kept;
        expired
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
