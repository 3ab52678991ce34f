//! Event repository implementation

use chrono::{NaiveDate, NaiveTime};
use libsql::{params, Connection};

use crate::error::{Error, Result};
use crate::models::{Event, EventId, NewEvent};

/// Trait for event storage operations (async)
#[allow(async_fn_in_trait)]
pub trait EventRepository {
    /// List all events, earliest first
    async fn list(&self) -> Result<Vec<Event>>;

    /// Get an event by ID
    async fn get(&self, id: &EventId) -> Result<Option<Event>>;

    /// Insert a new event and return the stored row
    async fn insert(&self, new: NewEvent) -> Result<Event>;

    /// Delete an event by ID
    async fn delete(&self, id: &EventId) -> Result<()>;
}

/// libSQL implementation of `EventRepository`
pub struct LibSqlEventRepository<'a> {
    conn: &'a Connection,
}

impl<'a> LibSqlEventRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn parse_event(row: &libsql::Row) -> Result<Event> {
        let id: String = row.get(0)?;
        let title: String = row.get(1)?;
        let date: String = row.get(2)?;
        let event_type: String = row.get(3)?;
        let description: Option<String> = row.get(4)?;
        let location: Option<String> = row.get(5)?;
        let time: Option<String> = row.get(6)?;
        let created_at: i64 = row.get(7)?;

        Ok(Event {
            id: id
                .parse()
                .map_err(|_| Error::Database(format!("invalid event id: {id}")))?,
            title,
            date: parse_date(&date)?,
            event_type: event_type.parse()?,
            description,
            location,
            time: time.as_deref().map(parse_time).transpose()?,
            created_at,
        })
    }
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    value
        .parse()
        .map_err(|_| Error::Database(format!("invalid date value: {value}")))
}

fn parse_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| Error::Database(format!("invalid time value: {value}")))
}

impl EventRepository for LibSqlEventRepository<'_> {
    async fn list(&self) -> Result<Vec<Event>> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, title, date, event_type, description, location, time, created_at
                 FROM events
                 ORDER BY date ASC, created_at ASC",
                (),
            )
            .await?;

        let mut events = Vec::new();
        while let Some(row) = rows.next().await? {
            events.push(Self::parse_event(&row)?);
        }

        Ok(events)
    }

    async fn get(&self, id: &EventId) -> Result<Option<Event>> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, title, date, event_type, description, location, time, created_at
                 FROM events WHERE id = ?",
                params![id.as_str()],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(Self::parse_event(&row)?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, new: NewEvent) -> Result<Event> {
        let event = Event::from_new(new);

        self.conn
            .execute(
                "INSERT INTO events
                 (id, title, date, event_type, description, location, time, created_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    event.id.as_str(),
                    event.title.clone(),
                    event.date.to_string(),
                    event.event_type.as_str(),
                    event.description.clone(),
                    event.location.clone(),
                    event.time.map(|time| time.format("%H:%M").to_string()),
                    event.created_at
                ],
            )
            .await?;

        self.get(&event.id)
            .await?
            .ok_or_else(|| Error::NotFound(event.id.to_string()))
    }

    async fn delete(&self, id: &EventId) -> Result<()> {
        let rows = self
            .conn
            .execute("DELETE FROM events WHERE id = ?", params![id.as_str()])
            .await?;

        if rows == 0 {
            return Err(Error::NotFound(id.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::EventType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample(title: &str, on: NaiveDate) -> NewEvent {
        NewEvent::new(
            title,
            on,
            EventType::Exam,
            Some("Covers weeks 1-6".to_string()),
            Some("Hall A".to_string()),
            NaiveTime::from_hms_opt(10, 0, 0),
        )
        .unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_insert_round_trips_optionals() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = LibSqlEventRepository::new(db.connection());

        let inserted = repo
            .insert(sample("Midterm", date(2099, 10, 12)))
            .await
            .unwrap();
        assert_eq!(inserted.location.as_deref(), Some("Hall A"));
        assert_eq!(inserted.time, NaiveTime::from_hms_opt(10, 0, 0));

        let bare = repo
            .insert(
                NewEvent::new("Club fair", date(2099, 11, 1), EventType::Other, None, None, None)
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(bare.description, None);
        assert_eq!(bare.time, None);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_list_earliest_first() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = LibSqlEventRepository::new(db.connection());

        repo.insert(sample("Finals", date(2099, 12, 1)))
            .await
            .unwrap();
        repo.insert(sample("Midterm", date(2099, 10, 12)))
            .await
            .unwrap();

        let events = repo.list().await.unwrap();
        assert_eq!(events[0].title, "Midterm");
        assert_eq!(events[1].title, "Finals");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_delete() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = LibSqlEventRepository::new(db.connection());

        let event = repo
            .insert(sample("Midterm", date(2099, 10, 12)))
            .await
            .unwrap();
        repo.delete(&event.id).await.unwrap();

        assert!(repo.get(&event.id).await.unwrap().is_none());

        let error = repo.delete(&event.id).await.unwrap_err();
        assert!(matches!(error, Error::NotFound(_)));
    }
}
