//! Concurrency behavior of the credit reservation.
//!
//! Two requests observing the same balance of 1 must not both be admitted:
//! the reservation's conditional UPDATE makes the affected-row count the
//! admission signal.

use crate::{setup_test_db, test_credits_config};
use careerforge::error::ApiError;
use careerforge::services::CreditsService;
use std::sync::Arc;
use tokio::task::JoinSet;
use uuid::Uuid;

#[tokio::test]
#[ignore] // Run only when database is available
async fn test_concurrent_reserves_with_single_credit() {
    let db = setup_test_db().await;
    let service = Arc::new(CreditsService::new(db, &test_credits_config()));

    let user_id = Uuid::new_v4();
    service.ensure_entry(user_id).await.unwrap();
    service.set_paid_status(user_id, false, 1).await.unwrap();

    let mut tasks = JoinSet::new();
    for i in 0..5 {
        let service_clone = service.clone();
        tasks.spawn(async move {
            let result = service_clone.reserve(user_id).await;
            (i, result)
        });
    }

    let mut admitted_count = 0;
    let mut rejected_count = 0;
    let mut other_error_count = 0;

    while let Some(result) = tasks.join_next().await {
        match result {
            Ok((task_id, reserve_result)) => match reserve_result {
                Ok(status) => {
                    println!("Task {} admitted (balance {})", task_id, status.balance);
                    admitted_count += 1;
                }
                Err(ApiError::OutOfBalance) => {
                    println!("Task {} rejected out of balance", task_id);
                    rejected_count += 1;
                }
                Err(e) => {
                    println!("Task {} got unexpected error: {}", task_id, e);
                    other_error_count += 1;
                }
            },
            Err(e) => {
                println!("Task panicked: {:?}", e);
                other_error_count += 1;
            }
        }
    }

    assert_eq!(admitted_count, 1, "Expected exactly 1 admitted reservation");
    assert_eq!(rejected_count, 4, "Expected 4 out-of-balance rejections");
    assert_eq!(other_error_count, 0, "Expected no other errors or panics");

    // Balance must end at exactly zero, never negative
    let entry = service.get_entry(user_id).await.unwrap();
    assert_eq!(entry.balance, 0);
}

#[tokio::test]
#[ignore] // Run only when database is available
async fn test_concurrent_reserves_drain_to_zero() {
    let db = setup_test_db().await;
    let service = Arc::new(CreditsService::new(db, &test_credits_config()));

    let user_id = Uuid::new_v4();
    service.ensure_entry(user_id).await.unwrap();
    service.set_paid_status(user_id, false, 3).await.unwrap();

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let service_clone = service.clone();
            tokio::spawn(async move { service_clone.reserve(user_id).await })
        })
        .collect();

    let results: Vec<_> = futures::future::join_all(handles).await;
    let admitted = results
        .into_iter()
        .filter(|r| matches!(r, Ok(Ok(_))))
        .count();

    assert_eq!(admitted, 3, "Admissions must equal the starting balance");

    let entry = service.get_entry(user_id).await.unwrap();
    assert_eq!(entry.balance, 0);
}
