//! Class session repository implementation

use chrono::NaiveTime;
use libsql::{params, Connection};

use crate::error::{Error, Result};
use crate::models::{ClassSession, ClassSessionId, NewClassSession};

/// Trait for class session storage operations (async)
#[allow(async_fn_in_trait)]
pub trait ClassSessionRepository {
    /// List all class sessions, ordered by weekday then start time
    async fn list(&self) -> Result<Vec<ClassSession>>;

    /// Get a class session by ID
    async fn get(&self, id: &ClassSessionId) -> Result<Option<ClassSession>>;

    /// Insert a new class session and return the stored row
    async fn insert(&self, new: NewClassSession) -> Result<ClassSession>;

    /// Delete a class session by ID
    async fn delete(&self, id: &ClassSessionId) -> Result<()>;
}

/// libSQL implementation of `ClassSessionRepository`
pub struct LibSqlClassSessionRepository<'a> {
    conn: &'a Connection,
}

impl<'a> LibSqlClassSessionRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn parse_session(row: &libsql::Row) -> Result<ClassSession> {
        let id: String = row.get(0)?;
        let course: String = row.get(1)?;
        let day: String = row.get(2)?;
        let start_time: String = row.get(3)?;
        let end_time: String = row.get(4)?;
        let location: String = row.get(5)?;
        let instructor: String = row.get(6)?;
        let created_at: i64 = row.get(7)?;

        Ok(ClassSession {
            id: id
                .parse()
                .map_err(|_| Error::Database(format!("invalid class session id: {id}")))?,
            course,
            day: day.parse()?,
            start_time: parse_time(&start_time)?,
            end_time: parse_time(&end_time)?,
            location,
            instructor,
            created_at,
        })
    }
}

fn parse_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| Error::Database(format!("invalid time value: {value}")))
}

fn format_time(value: NaiveTime) -> String {
    value.format("%H:%M").to_string()
}

impl ClassSessionRepository for LibSqlClassSessionRepository<'_> {
    async fn list(&self) -> Result<Vec<ClassSession>> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, course, day, start_time, end_time, location, instructor, created_at
                 FROM class_sessions",
                (),
            )
            .await?;

        let mut sessions = Vec::new();
        while let Some(row) = rows.next().await? {
            sessions.push(Self::parse_session(&row)?);
        }

        // Weekday is stored as text, so ordering happens here
        sessions.sort_by_key(|session| (session.day, session.start_time));
        Ok(sessions)
    }

    async fn get(&self, id: &ClassSessionId) -> Result<Option<ClassSession>> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, course, day, start_time, end_time, location, instructor, created_at
                 FROM class_sessions WHERE id = ?",
                params![id.as_str()],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(Self::parse_session(&row)?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, new: NewClassSession) -> Result<ClassSession> {
        let session = ClassSession::from_new(new);

        self.conn
            .execute(
                "INSERT INTO class_sessions
                 (id, course, day, start_time, end_time, location, instructor, created_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    session.id.as_str(),
                    session.course.clone(),
                    session.day.as_str(),
                    format_time(session.start_time),
                    format_time(session.end_time),
                    session.location.clone(),
                    session.instructor.clone(),
                    session.created_at
                ],
            )
            .await?;

        self.get(&session.id)
            .await?
            .ok_or_else(|| Error::NotFound(session.id.to_string()))
    }

    async fn delete(&self, id: &ClassSessionId) -> Result<()> {
        let rows = self
            .conn
            .execute(
                "DELETE FROM class_sessions WHERE id = ?",
                params![id.as_str()],
            )
            .await?;

        if rows == 0 {
            return Err(Error::NotFound(id.to_string()));
        }

        Ok(())
    }
}
