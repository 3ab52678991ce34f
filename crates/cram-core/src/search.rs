//! Search across planner collections
//!
//! In-memory text matching over declared record fields. Each searchable
//! type states which of its fields participate, so the filter never
//! inspects arbitrary shapes.

use crate::models::{Assignment, ClassSession, Event, Note, Reminder};

/// A record that exposes its searchable text fields.
pub trait Searchable {
    /// The text fields a query is matched against.
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for ClassSession {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.course, &self.location, &self.instructor]
    }
}

impl Searchable for Assignment {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.course]
    }
}

impl Searchable for Event {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        if let Some(ref description) = self.description {
            fields.push(description);
        }
        if let Some(ref location) = self.location {
            fields.push(location);
        }
        fields
    }
}

impl Searchable for Note {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.content]
    }
}

impl Searchable for Reminder {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title]
    }
}

/// Case-insensitive substring filter over any searchable collection.
///
/// An empty (or whitespace) query matches everything.
pub fn filter_matching<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return items.iter().collect();
    }

    items
        .iter()
        .filter(|item| {
            item.search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&query))
        })
        .collect()
}
