use std::collections::HashMap;

use crate::models::{Blog, BookingRecord, BookingStatus, EmergencyAlert, Subscription};

/// Text an admin table row can be searched by.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for BookingRecord {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.id.as_str(),
            self.user_id.as_str(),
            self.service_id.as_str(),
            self.status.as_str(),
        ];
        if let Some(requests) = &self.special_requests {
            fields.push(requests);
        }
        fields
    }
}

impl Searchable for Blog {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.author_name(), self.content.as_str()]
    }
}

impl Searchable for Subscription {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.email.as_str()];
        if let Some(plan) = &self.plan {
            fields.push(plan);
        }
        fields
    }
}

impl Searchable for EmergencyAlert {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.message.as_str()]
    }
}

/// Case-insensitive search; every whitespace-separated term must appear in some field.
/// A blank query matches everything.
pub fn matches_query<T: Searchable>(item: &T, query: &str) -> bool {
    let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
    if terms.is_empty() {
        return true;
    }

    let haystack: Vec<String> = item
        .search_fields()
        .into_iter()
        .map(str::to_lowercase)
        .collect();
    terms
        .iter()
        .all(|term| haystack.iter().any(|field| field.contains(term.as_str())))
}

pub fn search<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| matches_query(*item, query))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub query: String,
}

impl BookingFilter {
    /// Build a filter from the admin table's tab and search box. `all`, an empty
    /// tab or an unrecognised status shows every booking.
    pub fn from_params(status: Option<&str>, query: Option<&str>) -> Self {
        Self {
            status: status.and_then(BookingStatus::parse),
            query: query.unwrap_or_default().to_string(),
        }
    }

    pub fn apply<'a>(&self, bookings: &'a [BookingRecord]) -> Vec<&'a BookingRecord> {
        bookings
            .iter()
            .filter(|b| self.status.map_or(true, |status| b.status == status))
            .filter(|b| matches_query(*b, &self.query))
            .collect()
    }
}

/// Per-status tallies for the admin tab badges.
pub fn status_counts(bookings: &[BookingRecord]) -> HashMap<BookingStatus, usize> {
    let mut counts: HashMap<BookingStatus, usize> =
        BookingStatus::ALL.iter().map(|s| (*s, 0)).collect();
    for booking in bookings {
        *counts.entry(booking.status).or_default() += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(id: &str, status: BookingStatus, requests: Option<&str>) -> BookingRecord {
        BookingRecord {
            id: id.to_string(),
            user_id: format!("user-{id}"),
            service_id: "chauffeur".to_string(),
            booking_date_time: "2025-06-15T14:00:00Z".parse().unwrap(),
            status,
            special_requests: requests.map(str::to_string),
            created_at: None,
            updated_at: None,
        }
    }

    fn bookings() -> Vec<BookingRecord> {
        vec![
            booking("a1", BookingStatus::Pending, Some("Child seat please")),
            booking("b2", BookingStatus::Confirmed, None),
            booking("c3", BookingStatus::Pending, None),
            booking("d4", BookingStatus::Cancelled, Some("VIP lounge")),
        ]
    }

    #[test]
    fn test_blank_filter_keeps_everything() {
        let all = bookings();
        assert_eq!(BookingFilter::default().apply(&all).len(), 4);
    }

    #[test]
    fn test_status_filter() {
        let all = bookings();
        let filter = BookingFilter {
            status: Some(BookingStatus::Pending),
            query: String::new(),
        };
        let ids: Vec<&str> = filter.apply(&all).iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "c3"]);
    }

    #[test]
    fn test_query_is_case_insensitive_and_all_terms() {
        let all = bookings();
        let filter = BookingFilter {
            status: None,
            query: "  CHILD  seat ".to_string(),
        };
        let found = filter.apply(&all);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "a1");

        let none = BookingFilter {
            status: None,
            query: "child lounge".to_string(),
        };
        assert!(none.apply(&all).is_empty());
    }

    #[test]
    fn test_filter_from_params() {
        let all = bookings();
        let pending = BookingFilter::from_params(Some("Pending"), None);
        assert_eq!(pending.status, Some(BookingStatus::Pending));
        assert_eq!(pending.apply(&all).len(), 2);

        for tab in [None, Some("all"), Some(""), Some("archived")] {
            let filter = BookingFilter::from_params(tab, Some(""));
            assert_eq!(filter.status, None);
            assert_eq!(filter.apply(&all).len(), 4);
        }

        let canceled = BookingFilter::from_params(Some("canceled"), Some("vip"));
        assert_eq!(canceled.apply(&all).len(), 1);
    }

    #[test]
    fn test_status_and_query_combine() {
        let all = bookings();
        let filter = BookingFilter {
            status: Some(BookingStatus::Cancelled),
            query: "vip".to_string(),
        };
        assert_eq!(filter.apply(&all).len(), 1);
    }

    #[test]
    fn test_search_subscriptions() {
        let subs = vec![
            Subscription {
                id: "1".to_string(),
                email: "ada@example.com".to_string(),
                plan: Some("gold".to_string()),
                created_at: None,
            },
            Subscription {
                id: "2".to_string(),
                email: "tunde@example.org".to_string(),
                plan: None,
                created_at: None,
            },
        ];
        assert_eq!(search(&subs, "example").len(), 2);
        assert_eq!(search(&subs, "GOLD")[0].id, "1");
        assert!(search(&subs, "platinum").is_empty());
    }

    #[test]
    fn test_status_counts_include_empty_statuses() {
        let counts = status_counts(&bookings());
        assert_eq!(counts[&BookingStatus::Pending], 2);
        assert_eq!(counts[&BookingStatus::Completed], 0);
    }
}
