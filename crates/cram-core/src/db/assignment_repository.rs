//! Assignment repository implementation

use chrono::NaiveDate;
use libsql::{params, Connection};

use crate::error::{Error, Result};
use crate::models::{Assignment, AssignmentId, AssignmentStatus, NewAssignment};

/// Trait for assignment storage operations (async)
///
/// Assignments are never hard-deleted; the status update is the only
/// mutation after insert.
#[allow(async_fn_in_trait)]
pub trait AssignmentRepository {
    /// List all assignments, soonest due first
    async fn list(&self) -> Result<Vec<Assignment>>;

    /// Get an assignment by ID
    async fn get(&self, id: &AssignmentId) -> Result<Option<Assignment>>;

    /// Insert a new assignment and return the stored row
    async fn insert(&self, new: NewAssignment) -> Result<Assignment>;

    /// Update only the status column of an assignment
    async fn update_status(&self, id: &AssignmentId, status: AssignmentStatus) -> Result<()>;
}

/// libSQL implementation of `AssignmentRepository`
pub struct LibSqlAssignmentRepository<'a> {
    conn: &'a Connection,
}

impl<'a> LibSqlAssignmentRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn parse_assignment(row: &libsql::Row) -> Result<Assignment> {
        let id: String = row.get(0)?;
        let title: String = row.get(1)?;
        let course: String = row.get(2)?;
        let due_date: String = row.get(3)?;
        let priority: String = row.get(4)?;
        let status: String = row.get(5)?;
        let created_at: i64 = row.get(6)?;

        Ok(Assignment {
            id: id
                .parse()
                .map_err(|_| Error::Database(format!("invalid assignment id: {id}")))?,
            title,
            course,
            due_date: parse_date(&due_date)?,
            priority: priority.parse()?,
            status: status.parse()?,
            created_at,
        })
    }
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    value
        .parse()
        .map_err(|_| Error::Database(format!("invalid date value: {value}")))
}

impl AssignmentRepository for LibSqlAssignmentRepository<'_> {
    async fn list(&self) -> Result<Vec<Assignment>> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, title, course, due_date, priority, status, created_at
                 FROM assignments
                 ORDER BY due_date ASC, created_at ASC",
                (),
            )
            .await?;

        let mut assignments = Vec::new();
        while let Some(row) = rows.next().await? {
            assignments.push(Self::parse_assignment(&row)?);
        }

        Ok(assignments)
    }

    async fn get(&self, id: &AssignmentId) -> Result<Option<Assignment>> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, title, course, due_date, priority, status, created_at
                 FROM assignments WHERE id = ?",
                params![id.as_str()],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(Self::parse_assignment(&row)?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, new: NewAssignment) -> Result<Assignment> {
        let assignment = Assignment::from_new(new);

        self.conn
            .execute(
                "INSERT INTO assignments
                 (id, title, course, due_date, priority, status, created_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
                params![
                    assignment.id.as_str(),
                    assignment.title.clone(),
                    assignment.course.clone(),
                    assignment.due_date.to_string(),
                    assignment.priority.as_str(),
                    assignment.status.as_str(),
                    assignment.created_at
                ],
            )
            .await?;

        self.get(&assignment.id)
            .await?
            .ok_or_else(|| Error::NotFound(assignment.id.to_string()))
    }

    async fn update_status(&self, id: &AssignmentId, status: AssignmentStatus) -> Result<()> {
        let rows = self
            .conn
            .execute(
                "UPDATE assignments SET status = ? WHERE id = ?",
                params![status.as_str(), id.as_str()],
            )
            .await?;

        if rows == 0 {
            return Err(Error::NotFound(id.to_string()));
        }

        Ok(())
    }
}
