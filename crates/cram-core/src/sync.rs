//! Remote sync coordination
//!
//! The coordinator owns the in-memory snapshot of the three remote
//! collections and is the only way they change: a full all-or-nothing
//! refresh, an optimistic single-row append after a successful insert, a
//! single-field status patch, or a delete followed by a refresh.
//!
//! Every method takes `&mut self`, so a mutation can never interleave with
//! a refresh.

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::models::{
    Assignment, AssignmentId, AssignmentStatus, ClassSession, ClassSessionId, Event, EventId,
    NewAssignment, NewClassSession, NewEvent,
};
use crate::notify::Notifier;

/// Assignments due within this many days of today trigger a reminder
/// notification after a successful refresh.
const DUE_SOON_DAYS: i64 = 3;

/// The remote operations the coordinator depends on.
///
/// Implemented by `PlannerService` over libSQL and by in-memory fakes in
/// tests; the coordinator never talks to a connection directly.
#[allow(async_fn_in_trait)]
pub trait PlannerStore {
    async fn list_class_sessions(&self) -> Result<Vec<ClassSession>>;
    async fn insert_class_session(&self, new: NewClassSession) -> Result<ClassSession>;
    async fn delete_class_session(&self, id: &ClassSessionId) -> Result<()>;

    async fn list_assignments(&self) -> Result<Vec<Assignment>>;
    async fn insert_assignment(&self, new: NewAssignment) -> Result<Assignment>;
    async fn update_assignment_status(
        &self,
        id: &AssignmentId,
        status: AssignmentStatus,
    ) -> Result<()>;

    async fn list_events(&self) -> Result<Vec<Event>>;
    async fn insert_event(&self, new: NewEvent) -> Result<Event>;
    async fn delete_event(&self, id: &EventId) -> Result<()>;
}

/// In-memory snapshot of the three remote collections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlannerData {
    pub class_sessions: Vec<ClassSession>,
    pub assignments: Vec<Assignment>,
    pub events: Vec<Event>,
}

/// Fetches and mutates the remote collections, keeping the local snapshot
/// consistent with what the store reported.
pub struct SyncCoordinator<S, N> {
    store: S,
    notifier: N,
    data: PlannerData,
    loading: bool,
    error: Option<String>,
}

impl<S: PlannerStore, N: Notifier> SyncCoordinator<S, N> {
    pub const fn new(store: S, notifier: N) -> Self {
        Self {
            store,
            notifier,
            data: PlannerData {
                class_sessions: Vec::new(),
                assignments: Vec::new(),
                events: Vec::new(),
            },
            loading: false,
            error: None,
        }
    }

    /// The current snapshot.
    pub const fn data(&self) -> &PlannerData {
        &self.data
    }

    /// Whether a refresh is in flight.
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The last refresh failure, if the most recent refresh failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Fetch all three collections and replace the snapshot.
    ///
    /// The three queries run concurrently and fail independently. Any
    /// failure aborts the whole refresh: failure messages are joined into
    /// one aggregate error and no collection is touched. On success all
    /// three collections are replaced and assignments due within the next
    /// three days (not yet overdue) each emit a reminder notification.
    pub async fn refresh_all(&mut self, today: NaiveDate) -> Result<()> {
        self.loading = true;

        let (class_sessions, assignments, events) = tokio::join!(
            self.store.list_class_sessions(),
            self.store.list_assignments(),
            self.store.list_events(),
        );

        let outcome = match (class_sessions, assignments, events) {
            (Ok(class_sessions), Ok(assignments), Ok(events)) => {
                self.data.class_sessions = class_sessions;
                self.data.assignments = assignments;
                self.data.events = events;
                self.error = None;
                tracing::info!(
                    classes = self.data.class_sessions.len(),
                    assignments = self.data.assignments.len(),
                    events = self.data.events.len(),
                    "Planner data refreshed"
                );
                Ok(())
            }
            (class_sessions, assignments, events) => {
                let mut failures = Vec::new();
                if let Err(error) = class_sessions {
                    failures.push(format!("Classes: {error}"));
                }
                if let Err(error) = assignments {
                    failures.push(format!("Assignments: {error}"));
                }
                if let Err(error) = events {
                    failures.push(format!("Events: {error}"));
                }

                let message = failures.join("; ");
                tracing::error!("Failed to refresh planner data: {message}");
                self.error = Some(message.clone());
                Err(Error::Sync(message))
            }
        };

        self.loading = false;

        if outcome.is_ok() {
            self.notify_due_soon(today);
        }

        outcome
    }

    fn notify_due_soon(&self, today: NaiveDate) {
        for assignment in &self.data.assignments {
            let days_left = (assignment.due_date - today).num_days();
            if days_left > 0 && days_left <= DUE_SOON_DAYS {
                self.notifier
                    .assignment_due(&assignment.title, assignment.due_date);
            }
        }
    }

    /// Insert a class session remotely and append the stored row.
    pub async fn add_class_session(&mut self, new: NewClassSession) -> Result<ClassSession> {
        match self.store.insert_class_session(new).await {
            Ok(session) => {
                self.notifier
                    .class_reminder(&session.course, session.start_time);
                self.data.class_sessions.push(session.clone());
                tracing::info!("Added class session {}", session.id);
                Ok(session)
            }
            Err(error) => {
                tracing::error!("Failed to add class session: {error}");
                Err(error)
            }
        }
    }

    /// Insert an assignment remotely and append the stored row.
    pub async fn add_assignment(&mut self, new: NewAssignment) -> Result<Assignment> {
        match self.store.insert_assignment(new).await {
            Ok(assignment) => {
                self.notifier
                    .assignment_due(&assignment.title, assignment.due_date);
                self.data.assignments.push(assignment.clone());
                tracing::info!("Added assignment {}", assignment.id);
                Ok(assignment)
            }
            Err(error) => {
                tracing::error!("Failed to add assignment: {error}");
                Err(error)
            }
        }
    }

    /// Insert an event remotely and append the stored row.
    pub async fn add_event(&mut self, new: NewEvent) -> Result<Event> {
        match self.store.insert_event(new).await {
            Ok(event) => {
                self.notifier
                    .event_reminder(&event.title, event.date, event.time);
                self.data.events.push(event.clone());
                tracing::info!("Added event {}", event.id);
                Ok(event)
            }
            Err(error) => {
                tracing::error!("Failed to add event: {error}");
                Err(error)
            }
        }
    }

    /// Update an assignment's status remotely, then patch only that field
    /// in the snapshot.
    pub async fn update_assignment_status(
        &mut self,
        id: &AssignmentId,
        status: AssignmentStatus,
    ) -> Result<()> {
        match self.store.update_assignment_status(id, status).await {
            Ok(()) => {
                if let Some(assignment) = self
                    .data
                    .assignments
                    .iter_mut()
                    .find(|assignment| assignment.id == *id)
                {
                    assignment.status = status;
                }
                tracing::info!("Assignment {id} status changed to {status}");
                Ok(())
            }
            Err(error) => {
                tracing::error!("Failed to update assignment status: {error}");
                Err(error)
            }
        }
    }

    /// Delete a class session remotely, then resynchronize.
    ///
    /// No optimistic removal: the snapshot changes only via the follow-up
    /// refresh.
    pub async fn delete_class_session(
        &mut self,
        id: &ClassSessionId,
        today: NaiveDate,
    ) -> Result<()> {
        match self.store.delete_class_session(id).await {
            Ok(()) => self.refresh_all(today).await,
            Err(error) => {
                tracing::error!("Failed to delete class session: {error}");
                Err(error)
            }
        }
    }

    /// Delete an event remotely, then resynchronize.
    pub async fn delete_event(&mut self, id: &EventId, today: NaiveDate) -> Result<()> {
        match self.store.delete_event(id).await {
            Ok(()) => self.refresh_all(today).await,
            Err(error) => {
                tracing::error!("Failed to delete event: {error}");
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventType, Priority, Weekday};
    use chrono::{NaiveTime, Utc};
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeStore {
        class_sessions: Mutex<Vec<ClassSession>>,
        assignments: Mutex<Vec<Assignment>>,
        events: Mutex<Vec<Event>>,
        fail_class_list: bool,
        fail_assignment_list: bool,
        fail_event_list: bool,
        fail_mutations: bool,
    }

    impl FakeStore {
        fn mutation_guard(&self) -> Result<()> {
            if self.fail_mutations {
                Err(Error::Database("connection reset".to_string()))
            } else {
                Ok(())
            }
        }
    }

    impl PlannerStore for FakeStore {
        async fn list_class_sessions(&self) -> Result<Vec<ClassSession>> {
            if self.fail_class_list {
                return Err(Error::Database("table missing".to_string()));
            }
            Ok(self.class_sessions.lock().unwrap().clone())
        }

        async fn insert_class_session(&self, new: NewClassSession) -> Result<ClassSession> {
            self.mutation_guard()?;
            let session = ClassSession::from_new(new);
            self.class_sessions.lock().unwrap().push(session.clone());
            Ok(session)
        }

        async fn delete_class_session(&self, id: &ClassSessionId) -> Result<()> {
            self.mutation_guard()?;
            self.class_sessions
                .lock()
                .unwrap()
                .retain(|session| session.id != *id);
            Ok(())
        }

        async fn list_assignments(&self) -> Result<Vec<Assignment>> {
            if self.fail_assignment_list {
                return Err(Error::Database("timeout".to_string()));
            }
            Ok(self.assignments.lock().unwrap().clone())
        }

        async fn insert_assignment(&self, new: NewAssignment) -> Result<Assignment> {
            self.mutation_guard()?;
            let assignment = Assignment::from_new(new);
            self.assignments.lock().unwrap().push(assignment.clone());
            Ok(assignment)
        }

        async fn update_assignment_status(
            &self,
            id: &AssignmentId,
            status: AssignmentStatus,
        ) -> Result<()> {
            self.mutation_guard()?;
            let mut assignments = self.assignments.lock().unwrap();
            let assignment = assignments
                .iter_mut()
                .find(|assignment| assignment.id == *id)
                .ok_or_else(|| Error::NotFound(id.to_string()))?;
            assignment.status = status;
            Ok(())
        }

        async fn list_events(&self) -> Result<Vec<Event>> {
            if self.fail_event_list {
                return Err(Error::Database("permission denied".to_string()));
            }
            Ok(self.events.lock().unwrap().clone())
        }

        async fn insert_event(&self, new: NewEvent) -> Result<Event> {
            self.mutation_guard()?;
            let event = Event::from_new(new);
            self.events.lock().unwrap().push(event.clone());
            Ok(event)
        }

        async fn delete_event(&self, id: &EventId) -> Result<()> {
            self.mutation_guard()?;
            self.events.lock().unwrap().retain(|event| event.id != *id);
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<(String, String)>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, title: &str, body: &str) {
            self.sent
                .lock()
                .unwrap()
                .push((title.to_string(), body.to_string()));
        }
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    fn new_class(course: &str) -> NewClassSession {
        NewClassSession::new(
            course,
            Weekday::Monday,
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            "B201",
            "Dr. Okoro",
        )
        .unwrap()
    }

    fn new_assignment(title: &str, due: NaiveDate) -> NewAssignment {
        NewAssignment::new(title, "Physics", due, Priority::High).unwrap()
    }

    fn new_event(title: &str, on: NaiveDate) -> NewEvent {
        NewEvent::new(title, on, EventType::Exam, None, None, None).unwrap()
    }

    fn seeded_store() -> FakeStore {
        let store = FakeStore::default();
        store
            .class_sessions
            .lock()
            .unwrap()
            .push(ClassSession::from_new(new_class("Calculus")));
        store
            .assignments
            .lock()
            .unwrap()
            .push(Assignment::from_new(new_assignment(
                "Essay",
                today() + chrono::Duration::days(30),
            )));
        store
            .events
            .lock()
            .unwrap()
            .push(Event::from_new(new_event(
                "Midterm",
                today() + chrono::Duration::days(30),
            )));
        store
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn refresh_replaces_all_collections() {
        let mut coordinator = SyncCoordinator::new(seeded_store(), RecordingNotifier::default());

        coordinator.refresh_all(today()).await.unwrap();

        assert_eq!(coordinator.data().class_sessions.len(), 1);
        assert_eq!(coordinator.data().assignments.len(), 1);
        assert_eq!(coordinator.data().events.len(), 1);
        assert_eq!(coordinator.error(), None);
        assert!(!coordinator.is_loading());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn refresh_failure_leaves_all_collections_untouched() {
        let mut coordinator = SyncCoordinator::new(seeded_store(), RecordingNotifier::default());
        coordinator.refresh_all(today()).await.unwrap();
        let before = coordinator.data().clone();

        coordinator.store.fail_event_list = true;
        // New rows appear remotely, but the refresh must not partially apply
        coordinator
            .store
            .class_sessions
            .lock()
            .unwrap()
            .push(ClassSession::from_new(new_class("Chemistry")));

        let error = coordinator.refresh_all(today()).await.unwrap_err();
        assert!(matches!(error, Error::Sync(_)));
        assert_eq!(coordinator.data(), &before);
        assert_eq!(
            coordinator.error(),
            Some("Events: Database error: permission denied")
        );
        assert!(!coordinator.is_loading());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn refresh_aggregates_every_failure() {
        let mut store = FakeStore::default();
        store.fail_class_list = true;
        store.fail_assignment_list = true;
        store.fail_event_list = true;
        let mut coordinator = SyncCoordinator::new(store, RecordingNotifier::default());

        let error = coordinator.refresh_all(today()).await.unwrap_err();
        let message = error.to_string();
        assert!(message.contains("Classes: Database error: table missing"));
        assert!(message.contains("; Assignments: Database error: timeout"));
        assert!(message.contains("; Events: Database error: permission denied"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn refresh_notifies_assignments_due_soon() {
        let store = FakeStore::default();
        {
            let mut assignments = store.assignments.lock().unwrap();
            // Overdue, due today, due in range, past the window
            assignments.push(Assignment::from_new(new_assignment(
                "Overdue",
                today() - chrono::Duration::days(1),
            )));
            assignments.push(Assignment::from_new(new_assignment("Due today", today())));
            assignments.push(Assignment::from_new(new_assignment(
                "Due soon",
                today() + chrono::Duration::days(3),
            )));
            assignments.push(Assignment::from_new(new_assignment(
                "Far off",
                today() + chrono::Duration::days(4),
            )));
        }
        let mut coordinator = SyncCoordinator::new(store, RecordingNotifier::default());

        coordinator.refresh_all(today()).await.unwrap();

        let sent = coordinator.notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].1.starts_with("Due soon is due on"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn add_assignment_appends_exactly_the_stored_row() {
        let mut coordinator = SyncCoordinator::new(seeded_store(), RecordingNotifier::default());
        coordinator.refresh_all(today()).await.unwrap();
        let before = coordinator.data().assignments.clone();

        let due = NaiveDate::from_ymd_opt(2099, 1, 1).unwrap();
        let added = coordinator
            .add_assignment(NewAssignment::new("X", "Y", due, Priority::High).unwrap())
            .await
            .unwrap();

        let after = &coordinator.data().assignments;
        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(after[..before.len()], before[..]);
        assert_eq!(after[before.len()], added);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn add_assignment_failure_leaves_state_unchanged() {
        let mut coordinator = SyncCoordinator::new(seeded_store(), RecordingNotifier::default());
        coordinator.refresh_all(today()).await.unwrap();
        let before = coordinator.data().clone();

        coordinator.store.fail_mutations = true;
        let due = NaiveDate::from_ymd_opt(2099, 1, 1).unwrap();
        let error = coordinator
            .add_assignment(NewAssignment::new("X", "Y", due, Priority::High).unwrap())
            .await
            .unwrap_err();

        assert!(matches!(error, Error::Database(_)));
        assert_eq!(coordinator.data(), &before);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn add_class_session_and_event_notify() {
        let mut coordinator =
            SyncCoordinator::new(FakeStore::default(), RecordingNotifier::default());

        coordinator.add_class_session(new_class("Physics")).await.unwrap();
        coordinator
            .add_event(new_event("Career fair", today() + chrono::Duration::days(10)))
            .await
            .unwrap();

        let sent = coordinator.notifier.sent.lock().unwrap();
        assert_eq!(sent[0].0, "Upcoming Class");
        assert_eq!(sent[1].0, "Event Reminder");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn update_status_patches_only_the_target() {
        let mut coordinator = SyncCoordinator::new(seeded_store(), RecordingNotifier::default());
        coordinator.refresh_all(today()).await.unwrap();

        let extra = coordinator
            .add_assignment(new_assignment(
                "Second",
                today() + chrono::Duration::days(20),
            ))
            .await
            .unwrap();
        let untouched = coordinator.data().assignments[0].clone();

        coordinator
            .update_assignment_status(&extra.id, AssignmentStatus::Completed)
            .await
            .unwrap();

        let assignments = &coordinator.data().assignments;
        assert_eq!(assignments[0], untouched);
        assert_eq!(assignments[1].status, AssignmentStatus::Completed);
        assert_eq!(assignments[1].title, extra.title);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn update_status_failure_leaves_snapshot_unchanged() {
        let mut coordinator = SyncCoordinator::new(seeded_store(), RecordingNotifier::default());
        coordinator.refresh_all(today()).await.unwrap();
        let before = coordinator.data().clone();
        let id = before.assignments[0].id;

        coordinator.store.fail_mutations = true;
        let error = coordinator
            .update_assignment_status(&id, AssignmentStatus::Completed)
            .await
            .unwrap_err();

        assert!(matches!(error, Error::Database(_)));
        assert_eq!(coordinator.data(), &before);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn delete_event_resynchronizes() {
        let mut coordinator = SyncCoordinator::new(seeded_store(), RecordingNotifier::default());
        coordinator.refresh_all(today()).await.unwrap();
        let id = coordinator.data().events[0].id;

        coordinator.delete_event(&id, today()).await.unwrap();
        assert!(coordinator.data().events.is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn delete_class_session_failure_keeps_snapshot() {
        let mut coordinator = SyncCoordinator::new(seeded_store(), RecordingNotifier::default());
        coordinator.refresh_all(today()).await.unwrap();
        let before = coordinator.data().clone();
        let id = before.class_sessions[0].id;

        coordinator.store.fail_mutations = true;
        let error = coordinator
            .delete_class_session(&id, today())
            .await
            .unwrap_err();

        assert!(matches!(error, Error::Database(_)));
        assert_eq!(coordinator.data(), &before);
    }
}
