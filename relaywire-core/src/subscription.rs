//! Subscriptions: an id plus the filters it requests

use uuid::Uuid;

use crate::filter::Filter;

/// A subscription as sent in a `REQ` message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub id: String,
    pub filters: Vec<Filter>,
}

impl Subscription {
    /// Subscription with a random UUID v4 id
    pub fn new(filters: Vec<Filter>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), filters)
    }

    pub fn with_id(id: impl Into<String>, filters: Vec<Filter>) -> Self {
        Subscription {
            id: id.into(),
            filters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_ids_are_unique() {
        let a = Subscription::new(vec![]);
        let b = Subscription::new(vec![]);

        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn test_with_id() {
        let sub = Subscription::with_id("feed", vec![Filter::default()]);
        assert_eq!(sub.id, "feed");
        assert_eq!(sub.filters.len(), 1);
    }
}
