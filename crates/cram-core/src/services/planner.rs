//! Shared planner database service wrapper used across clients.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::db::{
    AssignmentRepository, ClassSessionRepository, Database, EventRepository,
    LibSqlAssignmentRepository, LibSqlClassSessionRepository, LibSqlEventRepository, SyncConfig,
};
use crate::models::{
    Assignment, AssignmentId, AssignmentStatus, ClassSession, ClassSessionId, Event, EventId,
    NewAssignment, NewClassSession, NewEvent,
};
use crate::sync::PlannerStore;
use crate::Result;

/// Thread-safe service for DB and repository operations.
///
/// This is the concrete `PlannerStore` handed to the sync coordinator; it
/// is constructed explicitly and passed down so tests can substitute a
/// fake.
#[derive(Clone)]
pub struct PlannerService {
    db: Arc<Mutex<Database>>,
}

impl PlannerService {
    /// Open a planner service at the given filesystem path.
    pub async fn open_path(
        db_path: impl Into<PathBuf>,
        sync_config: Option<SyncConfig>,
    ) -> Result<Self> {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = if let Some(config) = sync_config {
            tracing::info!(
                "Sync enabled with Turso: {}",
                config.url.as_deref().unwrap_or("unknown")
            );
            Self::open_database_with_sync_thread(db_path, config)?
        } else {
            tracing::info!("Running in local-only mode (no sync config)");
            Database::open(&db_path).await?
        };

        Ok(Self {
            db: Arc::new(Mutex::new(db)),
        })
    }

    /// Open a local-only planner service at the given path.
    pub async fn open_local_path(db_path: impl Into<PathBuf>) -> Result<Self> {
        Self::open_path(db_path, None).await
    }

    /// Open a sync-enabled planner service at the given path.
    pub async fn open_sync_path(
        db_path: impl Into<PathBuf>,
        sync_config: SyncConfig,
    ) -> Result<Self> {
        Self::open_path(db_path, Some(sync_config)).await
    }

    /// Open an in-memory planner service (primarily for tests).
    pub async fn open_in_memory() -> Result<Self> {
        let db = Database::open_in_memory().await?;
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
        })
    }

    // The embedded-replica open needs its own runtime thread: the initial
    // sync blocks, and must not run on the caller's runtime.
    fn open_database_with_sync_thread(
        db_path: PathBuf,
        sync_config: SyncConfig,
    ) -> Result<Database> {
        std::thread::Builder::new()
            .stack_size(8 * 1024 * 1024)
            .spawn(move || {
                tokio::runtime::Builder::new_multi_thread()
                    .enable_all()
                    .build()
                    .map_err(|error| crate::Error::Database(error.to_string()))?
                    .block_on(Database::open_with_sync(&db_path, sync_config))
            })
            .map_err(|error| crate::Error::Database(error.to_string()))?
            .join()
            .map_err(|_| crate::Error::Database("Thread panicked".to_string()))?
    }

    /// Sync with remote DB when sync is enabled.
    pub async fn sync(&self) -> Result<()> {
        let db = self.db.lock().await;
        db.sync().await
    }

    /// Returns whether sync is configured for this DB.
    pub async fn is_sync_enabled(&self) -> bool {
        let db = self.db.lock().await;
        db.is_sync_enabled()
    }
}

impl PlannerStore for PlannerService {
    async fn list_class_sessions(&self) -> Result<Vec<ClassSession>> {
        let db = self.db.lock().await;
        let repo = LibSqlClassSessionRepository::new(db.connection());
        repo.list().await
    }

    async fn insert_class_session(&self, new: NewClassSession) -> Result<ClassSession> {
        let db = self.db.lock().await;
        let repo = LibSqlClassSessionRepository::new(db.connection());
        repo.insert(new).await
    }

    async fn delete_class_session(&self, id: &ClassSessionId) -> Result<()> {
        let db = self.db.lock().await;
        let repo = LibSqlClassSessionRepository::new(db.connection());
        repo.delete(id).await
    }

    async fn list_assignments(&self) -> Result<Vec<Assignment>> {
        let db = self.db.lock().await;
        let repo = LibSqlAssignmentRepository::new(db.connection());
        repo.list().await
    }

    async fn insert_assignment(&self, new: NewAssignment) -> Result<Assignment> {
        let db = self.db.lock().await;
        let repo = LibSqlAssignmentRepository::new(db.connection());
        repo.insert(new).await
    }

    async fn update_assignment_status(
        &self,
        id: &AssignmentId,
        status: AssignmentStatus,
    ) -> Result<()> {
        let db = self.db.lock().await;
        let repo = LibSqlAssignmentRepository::new(db.connection());
        repo.update_status(id, status).await
    }

    async fn list_events(&self) -> Result<Vec<Event>> {
        let db = self.db.lock().await;
        let repo = LibSqlEventRepository::new(db.connection());
        repo.list().await
    }

    async fn insert_event(&self, new: NewEvent) -> Result<Event> {
        let db = self.db.lock().await;
        let repo = LibSqlEventRepository::new(db.connection());
        repo.insert(new).await
    }

    async fn delete_event(&self, id: &EventId) -> Result<()> {
        let db = self.db.lock().await;
        let repo = LibSqlEventRepository::new(db.connection());
        repo.delete(id).await
    }
}
