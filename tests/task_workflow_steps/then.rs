//! Then steps for task workflow BDD scenarios.

use super::world::{TaskWorkflowWorld, run_async};
use buildtrack::task::{
    domain::{TaskDomainError, TaskStatus},
    services::TaskLifecycleError,
};
use rstest_bdd_macros::then;

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskWorkflowWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task_id = world.task()?.id();

    let stored = run_async(world.service.find_by_id(task_id))?
        .ok_or_else(|| eyre::eyre!("task {task_id} missing from repository"))?;

    eyre::ensure!(
        stored.status() == expected,
        "expected status {expected}, found {}",
        stored.status()
    );
    Ok(())
}

#[then("the dev start time is recorded")]
fn dev_start_time_recorded(world: &TaskWorkflowWorld) -> Result<(), eyre::Report> {
    let task = world.task()?;
    eyre::ensure!(
        task.dev_start_time().is_some(),
        "dev start time was not recorded"
    );
    Ok(())
}

#[then(r#"the dev notes are "{notes}""#)]
fn dev_notes_are(world: &TaskWorkflowWorld, notes: String) -> Result<(), eyre::Report> {
    let task = world.task()?;
    eyre::ensure!(
        task.dev_notes() == Some(notes.as_str()),
        "expected dev notes {notes:?}, found {:?}",
        task.dev_notes()
    );
    Ok(())
}

#[then(r#"the QC notes are "{notes}""#)]
fn qc_notes_are(world: &TaskWorkflowWorld, notes: String) -> Result<(), eyre::Report> {
    let task = world.task()?;
    eyre::ensure!(
        task.qc_notes() == Some(notes.as_str()),
        "expected QC notes {notes:?}, found {:?}",
        task.qc_notes()
    );
    Ok(())
}

#[then(r#"the archived review notes are "{notes}""#)]
fn archived_review_notes_are(world: &TaskWorkflowWorld, notes: String) -> Result<(), eyre::Report> {
    let task = world.task()?;
    let archived = task
        .previous_review()
        .and_then(|review| review.notes.as_deref());
    eyre::ensure!(
        archived == Some(notes.as_str()),
        "expected archived review notes {notes:?}, found {archived:?}"
    );
    eyre::ensure!(task.qc_notes().is_none(), "live QC notes were not cleared");
    Ok(())
}

#[then("the task accepts no further transitions")]
fn task_accepts_no_further_transitions(world: &TaskWorkflowWorld) -> Result<(), eyre::Report> {
    let status = world.task()?.status();
    eyre::ensure!(status.is_terminal(), "status {status} still has exits");
    Ok(())
}

#[then("the transition fails with an invalid transition error")]
fn transition_fails_with_invalid_transition(
    world: &TaskWorkflowWorld,
) -> Result<(), eyre::Report> {
    let result = world.transition_result()?;

    if !matches!(
        result,
        Err(TaskLifecycleError::Domain(
            TaskDomainError::InvalidTransition { .. }
        ))
    ) {
        return Err(eyre::eyre!(
            "expected InvalidTransition error, got {result:?}"
        ));
    }
    Ok(())
}

#[then("the transition fails with an invalid status error")]
fn transition_fails_with_invalid_status(world: &TaskWorkflowWorld) -> Result<(), eyre::Report> {
    let result = world.transition_result()?;

    if !matches!(result, Err(TaskLifecycleError::InvalidState(_))) {
        return Err(eyre::eyre!("expected InvalidState error, got {result:?}"));
    }
    Ok(())
}

#[then("the transition fails because the developer is not assigned")]
fn transition_fails_for_unassigned_developer(
    world: &TaskWorkflowWorld,
) -> Result<(), eyre::Report> {
    let result = world.transition_result()?;

    if !matches!(
        result,
        Err(TaskLifecycleError::Domain(
            TaskDomainError::NotAssignedDeveloper { .. }
        ))
    ) {
        return Err(eyre::eyre!(
            "expected NotAssignedDeveloper error, got {result:?}"
        ));
    }
    Ok(())
}

#[then(r#"creation fails naming the field "{field}""#)]
fn creation_fails_naming_field(world: &TaskWorkflowWorld, field: String) -> Result<(), eyre::Report> {
    let result = world
        .last_creation_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing creation result"))?;

    let Err(TaskLifecycleError::Domain(TaskDomainError::Validation(fields))) = result else {
        return Err(eyre::eyre!("expected validation error, got {result:?}"));
    };
    eyre::ensure!(
        fields.fields().iter().any(|named| named.as_str() == field),
        "validation error did not name {field}: {fields}"
    );
    Ok(())
}
