//! Readiness endpoint

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use mongodb::Database;
use serde_json::Value;

pub fn router(db: Database) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(db)
}

/// 200 when MongoDB answers a ping, 503 otherwise.
async fn readiness_check(State(db): State<Database>) -> (StatusCode, Json<Value>) {
    let mongodb: HealthCheckFuture<'_> = Box::pin(async {
        let status = database::mongodb::check_health_detailed(&db).await;
        if status.healthy {
            Ok(())
        } else {
            Err(status
                .message
                .unwrap_or_else(|| "MongoDB ping failed".to_string()))
        }
    });

    run_health_checks(vec![("mongodb", mongodb)]).await
}
