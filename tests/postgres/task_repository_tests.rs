//! `PostgreSQL` integration tests for task storage and workflow transitions.

use buildtrack::task::{
    domain::{Actor, Task, TaskDomainError, TaskForm, TaskStatus, TaskVersion},
    ports::{TaskRepository, TaskRepositoryError},
    services::{TaskLifecycleError, TransitionTaskRequest},
};
use mockable::DefaultClock;
use rstest::rstest;

use super::helpers::{BoxError, PgContext, context};

fn acme_form(developer: &str) -> TaskForm {
    TaskForm::new("Acme Site", "S1", "WP", developer)
        .with_type_of_request("Bug Fix")
        .with_number_of_pages(3)
        .with_salesforce_link("https://sf/x")
        .with_comments_required(true)
        .with_comments("Match the brand guide")
}

fn micros(task: &Task) -> [Option<i64>; 5] {
    [
        Some(task.created_at()),
        task.dev_start_time(),
        task.dev_completed_time(),
        task.qc_start_time(),
        task.qc_completed_time(),
    ]
    .map(|stamp| stamp.map(|at| at.timestamp_micros()))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_create_and_find_round_trips_task(
    #[future] context: Result<Option<PgContext>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = context.await? else {
        return Ok(());
    };
    ctx.register_developer("Jane")?;

    let created = ctx.service.create_task(&Actor::Admin, acme_form("Jane")).await?;
    let fetched = ctx
        .repository
        .find_by_id(created.id())
        .await?
        .ok_or("task should be found")?;

    assert_eq!(fetched.id(), created.id());
    assert_eq!(fetched.job_name(), "Acme Site");
    assert_eq!(fetched.platform(), created.platform());
    assert_eq!(fetched.type_of_request(), created.type_of_request());
    assert_eq!(fetched.number_of_pages(), created.number_of_pages());
    assert_eq!(fetched.comments(), Some("Match the brand guide"));
    assert_eq!(fetched.status(), TaskStatus::Pending);
    assert_eq!(micros(&fetched), micros(&created));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_rework_cycle_persists_archived_review(
    #[future] context: Result<Option<PgContext>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = context.await? else {
        return Ok(());
    };
    ctx.register_developer("Jane")?;
    let jane = Actor::developer("Jane");
    let id = ctx
        .service
        .create_task(&Actor::Admin, acme_form("Jane"))
        .await?
        .id();

    for request in [
        TransitionTaskRequest::new(id, "in_progress", jane.clone()),
        TransitionTaskRequest::new(id, "dev_complete", jane.clone()).with_note("fixed css"),
        TransitionTaskRequest::new(id, "in_qc", Actor::QualityControl),
        TransitionTaskRequest::new(id, "qc_failed", Actor::QualityControl)
            .with_note("missing footer"),
        TransitionTaskRequest::new(id, "dev_complete", jane.clone()).with_note("footer added"),
    ] {
        ctx.service.transition_task(request).await?;
    }

    let stored = ctx
        .service
        .find_by_id(id)
        .await?
        .ok_or("task should be found")?;
    assert_eq!(stored.status(), TaskStatus::DevComplete);
    assert_eq!(stored.dev_notes(), Some("footer added"));
    assert_eq!(stored.qc_notes(), None);
    assert_eq!(stored.qc_start_time(), None);
    let review = stored.previous_review().ok_or("review should be archived")?;
    assert_eq!(review.notes.as_deref(), Some("missing footer"));
    assert!(review.completed_at.is_some());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_update_with_stale_status_is_a_conflict(
    #[future] context: Result<Option<PgContext>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = context.await? else {
        return Ok(());
    };
    let mut task = Task::create(acme_form("Jane"), &Actor::Admin, &DefaultClock)?;
    ctx.repository.store(&task).await?;
    let before = task.version();
    task.transition_to(
        TaskStatus::InProgress,
        &Actor::developer("Jane"),
        None,
        &DefaultClock,
    )?;

    ctx.repository.update(&task, before).await?;
    let result = ctx.repository.update(&task, before).await;

    assert!(matches!(
        result,
        Err(TaskRepositoryError::VersionConflict {
            expected: TaskVersion {
                status: TaskStatus::Pending,
                revision: 0,
            },
            actual: TaskVersion {
                status: TaskStatus::InProgress,
                revision: 1,
            },
            ..
        })
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_stale_write_after_rework_round_is_a_conflict(
    #[future] context: Result<Option<PgContext>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = context.await? else {
        return Ok(());
    };
    let jane = Actor::developer("Jane");
    let mut task = Task::create(acme_form("Jane"), &Actor::Admin, &DefaultClock)?;
    ctx.repository.store(&task).await?;
    for (target, actor) in [
        (TaskStatus::InProgress, &jane),
        (TaskStatus::DevComplete, &jane),
        (TaskStatus::InQc, &Actor::QualityControl),
        (TaskStatus::QcFailed, &Actor::QualityControl),
    ] {
        let before = task.version();
        task.transition_to(target, actor, None, &DefaultClock)?;
        ctx.repository.update(&task, before).await?;
    }
    let stale = task.clone();
    for (target, actor) in [
        (TaskStatus::DevComplete, &jane),
        (TaskStatus::InQc, &Actor::QualityControl),
        (TaskStatus::QcFailed, &Actor::QualityControl),
    ] {
        let before = task.version();
        task.transition_to(target, actor, None, &DefaultClock)?;
        ctx.repository.update(&task, before).await?;
    }

    let mut resubmitted = stale.clone();
    resubmitted.transition_to(TaskStatus::DevComplete, &jane, None, &DefaultClock)?;
    let result = ctx.repository.update(&resubmitted, stale.version()).await;

    assert!(matches!(
        result,
        Err(TaskRepositoryError::VersionConflict { actual, .. })
            if actual.status == TaskStatus::QcFailed && actual.revision == 7
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_long_names_round_trip(
    #[future] context: Result<Option<PgContext>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = context.await? else {
        return Ok(());
    };
    let developer = "D".repeat(300);
    ctx.register_developer(&developer)?;
    let form = TaskForm::new("J".repeat(300), "S".repeat(300), "WP", developer.clone())
        .with_type_of_request("Bug Fix")
        .with_salesforce_link("https://sf/x");

    let created = ctx.service.create_task(&Actor::Admin, form).await?;
    let fetched = ctx
        .repository
        .find_by_id(created.id())
        .await?
        .ok_or("task should be found")?;

    assert_eq!(fetched.job_name().len(), 300);
    assert_eq!(fetched.site_id().len(), 300);
    assert_eq!(fetched.developer(), developer);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_update_of_missing_task_reports_not_found(
    #[future] context: Result<Option<PgContext>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = context.await? else {
        return Ok(());
    };
    let task = Task::create(acme_form("Jane"), &Actor::Admin, &DefaultClock)?;

    let result = ctx.repository.update(&task, task.version()).await;

    assert!(matches!(result, Err(TaskRepositoryError::NotFound(id)) if id == task.id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_duplicate_store_is_rejected(
    #[future] context: Result<Option<PgContext>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = context.await? else {
        return Ok(());
    };
    let task = Task::create(acme_form("Jane"), &Actor::Admin, &DefaultClock)?;
    ctx.repository.store(&task).await?;

    let result = ctx.repository.store(&task).await;

    assert!(matches!(result, Err(TaskRepositoryError::DuplicateTask(id)) if id == task.id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_service_rejects_unlisted_developer(
    #[future] context: Result<Option<PgContext>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = context.await? else {
        return Ok(());
    };
    ctx.register_developer("Omar")?;

    let result = ctx.service.create_task(&Actor::Admin, acme_form("Jane")).await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::Domain(TaskDomainError::Validation(_)))
    ));
    assert!(ctx.service.list_tasks().await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_developers_are_listed_by_name(
    #[future] context: Result<Option<PgContext>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = context.await? else {
        return Ok(());
    };
    for name in ["Omar", "Ana", "Jane"] {
        ctx.register_developer(name)?;
    }

    let names: Vec<String> = ctx
        .service
        .list_developers()
        .await?
        .into_iter()
        .map(|developer| developer.name().to_owned())
        .collect();

    assert_eq!(names, ["Ana", "Jane", "Omar"]);
    Ok(())
}
