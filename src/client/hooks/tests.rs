use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

fn counting_query() -> (QueryHook<u32, String>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let hook = QueryHook::new(move |key: u32| {
        counter.fetch_add(1, Ordering::SeqCst);
        async move {
            if key == 0 {
                Err(ApiError {
                    message: "Team with key '0' was not found".to_string(),
                    status_code: Some(404),
                    validation_errors: None,
                })
            } else {
                Ok(format!("team-{}", key))
            }
        }
    });
    (hook, calls)
}

#[tokio::test]
async fn test_query_starts_idle() {
    let (hook, calls) = counting_query();
    assert_eq!(hook.state(), QueryState::Idle);
    assert!(hook.data().is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_set_key_fetches_once_per_key() {
    let (mut hook, calls) = counting_query();

    hook.set_key(Some(1)).await;
    hook.set_key(Some(1)).await;
    assert_eq!(hook.data().as_deref(), Some("team-1"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    hook.set_key(Some(2)).await;
    assert_eq!(hook.data().as_deref(), Some("team-2"));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_no_key_resolves_to_no_data_without_fetching() {
    let (mut hook, calls) = counting_query();

    hook.set_key(None).await;
    assert_eq!(hook.state(), QueryState::NoData);
    assert!(!hook.is_loading());
    assert!(hook.error().is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_clearing_key_drops_previous_data() {
    let (mut hook, _) = counting_query();
    hook.set_key(Some(3)).await;
    hook.set_key(None).await;
    assert_eq!(hook.state(), QueryState::NoData);
    assert!(hook.key().is_none());
}

#[tokio::test]
async fn test_refetch_calls_again_for_same_key() {
    let (mut hook, calls) = counting_query();
    hook.set_key(Some(4)).await;
    hook.refetch().await;
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_failure_is_recorded_not_retried() {
    let (mut hook, calls) = counting_query();
    hook.set_key(Some(0)).await;

    let error = hook.error().unwrap();
    assert!(error.is_not_found());
    assert!(hook.data().is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_view_observes_loading() {
    let gate = Arc::new(Notify::new());
    let release = Arc::clone(&gate);
    let mut hook = QueryHook::new(move |key: u32| {
        let gate = Arc::clone(&gate);
        async move {
            gate.notified().await;
            Ok(key * 2)
        }
    });
    let view = hook.view();

    let task = tokio::spawn(async move {
        hook.set_key(Some(21)).await;
        hook
    });
    while !view.is_loading() {
        tokio::task::yield_now().await;
    }
    release.notify_one();
    task.await.unwrap();

    assert!(!view.is_loading());
    assert_eq!(view.data(), Some(42));
}

#[tokio::test]
async fn test_mutation_records_outcome() {
    let mutation = MutationHook::new(|squad_number: u32| async move {
        if squad_number > 99 {
            let mut errors = std::collections::BTreeMap::new();
            errors.insert(
                "squadNumber".to_string(),
                vec!["Must be between 1 and 99".to_string()],
            );
            Err(ApiError {
                message: "Validation failed".to_string(),
                status_code: Some(400),
                validation_errors: Some(errors),
            })
        } else {
            Ok(squad_number)
        }
    });

    assert_eq!(mutation.execute(7).await.unwrap(), 7);
    assert_eq!(mutation.data(), Some(7));
    assert!(!mutation.is_submitting());

    let err = mutation.execute(120).await.unwrap_err();
    assert_eq!(err.status_code, Some(400));
    assert!(mutation.error().unwrap().validation_errors.is_some());
    // The last successful payload is kept
    assert_eq!(mutation.data(), Some(7));

    mutation.execute(8).await.unwrap();
    assert!(mutation.error().is_none());
}
