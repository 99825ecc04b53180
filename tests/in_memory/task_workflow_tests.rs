//! In-memory integration tests for the full task workflow.

use buildtrack::task::{
    domain::{Actor, TaskDomainError, TaskStatus},
    services::{TaskLifecycleError, TransitionTaskRequest},
    views::TaskView,
};
use rstest::rstest;

use super::helpers::{TestService, build_form, jane, service};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_moves_from_intake_to_qc_pass_after_rework(
    service: TestService,
) -> Result<(), eyre::Report> {
    let task = service
        .create_task(&Actor::Admin, build_form("Acme Site", "Jane"))
        .await?;
    let id = task.id();

    for request in [
        TransitionTaskRequest::new(id, "in_progress", jane()),
        TransitionTaskRequest::new(id, "dev_complete", jane()).with_note("fixed css"),
        TransitionTaskRequest::new(id, "in_qc", Actor::QualityControl),
        TransitionTaskRequest::new(id, "qc_failed", Actor::QualityControl)
            .with_note("missing footer"),
        TransitionTaskRequest::new(id, "dev_complete", jane()).with_note("footer added"),
        TransitionTaskRequest::new(id, "in_qc", Actor::QualityControl),
        TransitionTaskRequest::new(id, "qc_passed", Actor::QualityControl).with_note("approved"),
    ] {
        service.transition_task(request).await?;
    }

    let finished = service
        .find_by_id(id)
        .await?
        .ok_or_else(|| eyre::eyre!("task {id} missing"))?;
    eyre::ensure!(finished.status() == TaskStatus::QcPassed);
    eyre::ensure!(finished.dev_notes() == Some("footer added"));
    eyre::ensure!(finished.qc_notes() == Some("approved"));
    let review = finished
        .previous_review()
        .ok_or_else(|| eyre::eyre!("failed review was not archived"))?;
    eyre::ensure!(review.notes.as_deref() == Some("missing footer"));
    eyre::ensure!(finished.dev_start_time() <= finished.dev_completed_time());
    eyre::ensure!(finished.dev_completed_time() <= finished.qc_start_time());
    eyre::ensure!(finished.qc_start_time() <= finished.qc_completed_time());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dashboards_follow_task_through_workflow(
    service: TestService,
) -> Result<(), eyre::Report> {
    let task = service
        .create_task(&Actor::Admin, build_form("Acme Site", "Jane"))
        .await?;
    let id = task.id();
    let developer_view = TaskView::developer("Jane");

    eyre::ensure!(service.list_tasks_for(&developer_view).await?.len() == 1);
    eyre::ensure!(service.list_tasks_for(&TaskView::QualityControl).await?.is_empty());

    service
        .transition_task(TransitionTaskRequest::new(id, "in_progress", jane()))
        .await?;
    service
        .transition_task(TransitionTaskRequest::new(id, "dev_complete", jane()))
        .await?;
    service
        .transition_task(TransitionTaskRequest::new(id, "in_qc", Actor::QualityControl))
        .await?;

    eyre::ensure!(service.list_tasks_for(&developer_view).await?.is_empty());
    let review_queue = service.list_tasks_for(&TaskView::QualityControl).await?;
    let reviewing = review_queue
        .first()
        .ok_or_else(|| eyre::eyre!("QC queue is empty"))?;
    eyre::ensure!(
        TaskView::QualityControl.available_actions(reviewing)
            == vec![TaskStatus::QcPassed, TaskStatus::QcFailed]
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn qc_cannot_start_development(service: TestService) -> Result<(), eyre::Report> {
    let task = service
        .create_task(&Actor::Admin, build_form("Acme Site", "Jane"))
        .await?;

    let result = service
        .transition_task(TransitionTaskRequest::new(
            task.id(),
            "in_progress",
            Actor::QualityControl,
        ))
        .await;

    eyre::ensure!(
        matches!(
            result,
            Err(TaskLifecycleError::Domain(
                TaskDomainError::TransitionNotPermitted { .. }
            ))
        ),
        "expected role rejection, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn passed_task_rejects_every_further_request(
    service: TestService,
) -> Result<(), eyre::Report> {
    let task = service
        .create_task(&Actor::Admin, build_form("Acme Site", "Jane"))
        .await?;
    let id = task.id();
    for request in [
        TransitionTaskRequest::new(id, "in_progress", jane()),
        TransitionTaskRequest::new(id, "dev_complete", jane()),
        TransitionTaskRequest::new(id, "in_qc", Actor::QualityControl),
        TransitionTaskRequest::new(id, "qc_passed", Actor::QualityControl),
    ] {
        service.transition_task(request).await?;
    }

    for status in TaskStatus::ALL {
        let result = service
            .transition_task(TransitionTaskRequest::new(
                id,
                status.as_str(),
                Actor::QualityControl,
            ))
            .await;
        eyre::ensure!(
            matches!(
                result,
                Err(TaskLifecycleError::Domain(
                    TaskDomainError::InvalidTransition { .. }
                ))
            ),
            "qc_passed -> {status} was not rejected: {result:?}"
        );
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn developers_are_listed_for_assignment(service: TestService) -> Result<(), eyre::Report> {
    let names: Vec<String> = service
        .list_developers()
        .await?
        .into_iter()
        .map(|developer| developer.name().to_owned())
        .collect();

    eyre::ensure!(names == ["Jane", "Omar"], "unexpected developers: {names:?}");
    Ok(())
}
