//! Facade integration tests against the in-memory notifier

use std::time::Duration as StdDuration;

use notification_facade::application::{FireOutcome, NotificationFacade};
use notification_facade::domain::{DeniedPolicy, NotificationRequest, PermissionStatus};
use notification_facade::infrastructure::MemoryNotifier;

fn request() -> NotificationRequest {
    NotificationRequest::new("Backup", "Finished")
}

#[tokio::test]
async fn deferred_notification_waits_for_grant() {
    let facade = NotificationFacade::new(MemoryNotifier::new());

    let outcome = facade.fire(request().with_tag("backup")).await;
    let FireOutcome::Pending(mut pending) = outcome else {
        panic!("expected pending outcome");
    };

    tokio::task::yield_now().await;
    assert!(!pending.is_finished());
    assert!(facade.notifier().notifications().is_empty());
    assert_eq!(facade.notifier().prompt_count(), 1);

    facade.notifier().answer_prompts_with(PermissionStatus::Granted);
    let handle = pending.wait().await.expect("notification should be shown");

    let shown = facade.notifier().notifications();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].id, handle.id());
    assert_eq!(shown[0].options.tag.as_deref(), Some("backup"));
    assert_eq!(facade.current_permission(), PermissionStatus::Granted);

    // Waiting again returns the settled result without showing twice
    assert!(pending.wait().await.is_some());
    assert_eq!(facade.notifier().notifications().len(), 1);
}

#[tokio::test]
async fn options_carry_only_present_fields() {
    let facade = NotificationFacade::new(MemoryNotifier::with_permission("granted"));

    let outcome = facade.fire(request().with_icon("dialog-information")).await;
    assert!(matches!(outcome, FireOutcome::Shown(_)));

    let shown = facade.notifier().notifications();
    let options = serde_json::to_value(&shown[0].options).unwrap();
    let keys: Vec<&str> = options
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, ["body", "icon"]);
    assert_eq!(options["body"], "Finished");
}

#[tokio::test]
async fn denied_permission_is_asked_again_by_default() {
    let facade = NotificationFacade::new(MemoryNotifier::with_permission("denied"));
    facade.notifier().answer_prompts_with(PermissionStatus::Denied);

    let FireOutcome::Pending(mut pending) = facade.fire(request()).await else {
        panic!("expected pending outcome");
    };

    assert!(pending.wait().await.is_none());
    assert_eq!(facade.notifier().prompt_count(), 1);
    assert!(facade.notifier().notifications().is_empty());
}

#[tokio::test]
async fn denied_permission_skipped_when_configured() {
    let facade = NotificationFacade::new(MemoryNotifier::with_permission("denied"))
        .with_denied_policy(DeniedPolicy::Skip);

    let outcome = facade.fire(request()).await;

    assert!(matches!(outcome, FireOutcome::Suppressed));
    assert_eq!(facade.notifier().prompt_count(), 0);
    assert!(facade.notifier().notifications().is_empty());
}

#[tokio::test]
async fn unrecognized_permission_counts_as_default() {
    let facade = NotificationFacade::new(MemoryNotifier::with_permission("prompt"));
    assert_eq!(facade.current_permission(), PermissionStatus::Default);

    facade.notifier().answer_prompts_with(PermissionStatus::Granted);
    let outcome = facade.fire(request()).await;
    assert!(outcome.is_pending());
}

#[tokio::test]
async fn unsupported_host_does_nothing() {
    let facade = NotificationFacade::new(MemoryNotifier::unsupported());

    assert!(!facade.are_supported());
    assert_eq!(facade.current_permission(), PermissionStatus::Default);
    assert!(facade.ask_for_permission().is_none());
    assert!(facade.create(request()).await.is_none());
    assert!(matches!(
        facade.fire(request()).await,
        FireOutcome::Unsupported
    ));
    assert_eq!(facade.notifier().prompt_count(), 0);
}

#[tokio::test]
async fn ask_for_permission_resolves_to_answer() {
    let facade = NotificationFacade::new(MemoryNotifier::new());

    let pending = facade.ask_for_permission().expect("supported host");
    tokio::task::yield_now().await;
    assert!(!pending.is_finished());

    facade.notifier().answer_prompts_with(PermissionStatus::Denied);
    assert_eq!(pending.wait().await, PermissionStatus::Denied);
    assert_eq!(facade.current_permission(), PermissionStatus::Denied);
}

#[tokio::test]
async fn cancelled_pending_never_shows() {
    let facade = NotificationFacade::new(MemoryNotifier::new());

    let FireOutcome::Pending(mut pending) = facade.fire(request()).await else {
        panic!("expected pending outcome");
    };
    pending.cancel();
    assert!(pending.wait().await.is_none());

    facade.notifier().answer_prompts_with(PermissionStatus::Granted);
    tokio::task::yield_now().await;
    assert!(facade.notifier().notifications().is_empty());
}

#[tokio::test(start_paused = true)]
async fn auto_close_targets_the_shown_notification() {
    let facade = NotificationFacade::new(MemoryNotifier::with_permission("granted"));

    let first = facade
        .fire(request().with_auto_close_ms(1000))
        .await
        .handle()
        .cloned()
        .expect("first notification shown");
    let second = facade
        .fire(request().with_auto_close_ms(5000))
        .await
        .handle()
        .cloned()
        .expect("second notification shown");
    assert_ne!(first.id(), second.id());

    tokio::time::sleep(StdDuration::from_millis(1500)).await;
    let shown = facade.notifier().notifications();
    assert!(shown[0].is_closed());
    assert!(!shown[1].is_closed());

    // Closing early does not stop the scheduled close from running safely
    second.close();
    tokio::time::sleep(StdDuration::from_millis(4000)).await;
    let shown = facade.notifier().notifications();
    assert!(shown[1].is_closed());
    assert_eq!(shown[1].close_calls(), 2);
}

#[tokio::test]
async fn failed_display_reports_failure() {
    let facade = NotificationFacade::new(MemoryNotifier::with_permission("granted"));
    facade.notifier().fail_show(true);

    assert!(matches!(facade.fire(request()).await, FireOutcome::Failed));
    assert!(facade.create(request()).await.is_none());
}
