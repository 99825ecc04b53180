//! `PostgreSQL` repository implementation for task lifecycle storage.

use super::{
    models::{TaskProgressChangeset, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{
        PageCount, PersistedTaskData, Platform, QcReview, RequestType, Task, TaskId, TaskStatus,
        TaskVersion,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            tracing::debug!(%task_id, "stored task row");
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task, expected: TaskVersion) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = to_changeset(task)?;

        self.run_blocking(move |connection| {
            let updated = diesel::update(
                tasks::table
                    .filter(tasks::id.eq(task_id.into_inner()))
                    .filter(tasks::status.eq(expected.status.as_str()))
                    .filter(tasks::revision.eq(i64::from(expected.revision))),
            )
            .set(&changeset)
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;

            if updated == 0 {
                let persisted = tasks::table
                    .filter(tasks::id.eq(task_id.into_inner()))
                    .select((tasks::status, tasks::revision))
                    .first::<(String, i64)>(connection)
                    .optional()
                    .map_err(TaskRepositoryError::persistence)?;
                return Err(match persisted {
                    None => TaskRepositoryError::NotFound(task_id),
                    Some((status, revision)) => TaskRepositoryError::VersionConflict {
                        task_id,
                        expected,
                        actual: TaskVersion {
                            status: TaskStatus::try_from(status.as_str())
                                .map_err(TaskRepositoryError::persistence)?,
                            revision: u32::try_from(revision)
                                .map_err(TaskRepositoryError::persistence)?,
                        },
                    },
                });
            }
            tracing::debug!(
                %task_id,
                status = %changeset.status,
                revision = changeset.revision,
                "updated task row"
            );
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .order((tasks::created_at.desc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

fn to_row(task: &Task) -> TaskRepositoryResult<TaskRow> {
    Ok(TaskRow {
        id: task.id().into_inner(),
        job_name: task.job_name().to_owned(),
        site_id: task.site_id().to_owned(),
        platform: task.platform().as_str().to_owned(),
        developer: task.developer().to_owned(),
        type_of_request: task.type_of_request().as_str().to_owned(),
        number_of_pages: i64::from(task.number_of_pages().value()),
        salesforce_link: task.salesforce_link().to_owned(),
        comments_required: task.comments_required(),
        comments: task.comments().map(str::to_owned),
        additional_comments: task.additional_comments().map(str::to_owned),
        status: task.status().as_str().to_owned(),
        revision: i64::from(task.revision()),
        dev_notes: task.dev_notes().map(str::to_owned),
        qc_notes: task.qc_notes().map(str::to_owned),
        dev_start_time: task.dev_start_time(),
        dev_completed_time: task.dev_completed_time(),
        qc_start_time: task.qc_start_time(),
        qc_completed_time: task.qc_completed_time(),
        previous_review: review_to_json(task.previous_review())?,
        created_at: task.created_at(),
    })
}

fn to_changeset(task: &Task) -> TaskRepositoryResult<TaskProgressChangeset> {
    Ok(TaskProgressChangeset {
        status: task.status().as_str().to_owned(),
        revision: i64::from(task.revision()),
        dev_notes: task.dev_notes().map(str::to_owned),
        qc_notes: task.qc_notes().map(str::to_owned),
        dev_start_time: task.dev_start_time(),
        dev_completed_time: task.dev_completed_time(),
        qc_start_time: task.qc_start_time(),
        qc_completed_time: task.qc_completed_time(),
        previous_review: review_to_json(task.previous_review())?,
    })
}

fn review_to_json(review: Option<&QcReview>) -> TaskRepositoryResult<Option<serde_json::Value>> {
    review
        .map(serde_json::to_value)
        .transpose()
        .map_err(TaskRepositoryError::persistence)
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        job_name,
        site_id,
        platform: persisted_platform,
        developer,
        type_of_request: persisted_type,
        number_of_pages: persisted_pages,
        salesforce_link,
        comments_required,
        comments,
        additional_comments,
        status: persisted_status,
        revision: persisted_revision,
        dev_notes,
        qc_notes,
        dev_start_time,
        dev_completed_time,
        qc_start_time,
        qc_completed_time,
        previous_review: persisted_review,
        created_at,
    } = row;

    let platform = Platform::try_from(persisted_platform.as_str())
        .map_err(TaskRepositoryError::persistence)?;
    let type_of_request = RequestType::try_from(persisted_type.as_str())
        .map_err(TaskRepositoryError::persistence)?;
    let number_of_pages = PageCount::new(persisted_pages).ok_or_else(|| {
        TaskRepositoryError::persistence(std::io::Error::other(format!(
            "invalid persisted page count {persisted_pages}"
        )))
    })?;
    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::persistence)?;
    let revision = u32::try_from(persisted_revision).map_err(TaskRepositoryError::persistence)?;
    let previous_review = persisted_review
        .map(serde_json::from_value::<QcReview>)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;

    Task::try_from(PersistedTaskData {
        id: TaskId::from_uuid(id),
        job_name,
        site_id,
        platform,
        developer,
        type_of_request,
        number_of_pages,
        salesforce_link,
        comments_required,
        comments,
        additional_comments,
        status,
        revision,
        dev_notes,
        qc_notes,
        dev_start_time,
        dev_completed_time,
        qc_start_time,
        qc_completed_time,
        previous_review,
        created_at,
    })
    .map_err(TaskRepositoryError::persistence)
}
