//! HTTP routes for the intake endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{cancel_intake, get_intake, start_intake, submit_answer, IntakeHandlers};

/// Creates the intake router; nested under `/api/v1/intake`.
pub fn intake_routes(handlers: IntakeHandlers) -> Router {
    Router::new()
        .route("/", post(start_intake))
        .route("/:id", get(get_intake))
        .route("/:id/answers", post(submit_answer))
        .route("/:id/cancel", post(cancel_intake))
        .with_state(handlers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::scoring::MockChurnScorer;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::application::handlers::intake::{
        CancelIntakeHandler, GetIntakeProgressHandler, StartIntakeHandler, SubmitAnswerHandler,
    };
    use crate::application::ScoringService;
    use crate::domain::foundation::SessionId;
    use crate::domain::intake::{churn_schema, CollectionStateMachine};
    use crate::ports::SessionStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    fn app() -> Router {
        let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        let machine = CollectionStateMachine::new(churn_schema());
        let scoring = ScoringService::new(
            Arc::new(MockChurnScorer::returning(40.0)),
            Duration::from_secs(1),
        );
        let handlers = IntakeHandlers::new(
            Arc::new(StartIntakeHandler::new(store.clone(), machine.clone(), scoring.clone())),
            Arc::new(SubmitAnswerHandler::new(store.clone(), machine.clone(), scoring)),
            Arc::new(CancelIntakeHandler::new(store.clone(), machine.clone())),
            Arc::new(GetIntakeProgressHandler::new(store, machine)),
            18,
        );
        Router::new().nest("/api/v1/intake", intake_routes(handlers))
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn start(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/intake")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = json_body(response).await;
        assert_eq!(json["outcome"], "prompt");
        assert_eq!(json["progress"]["prompt"]["field"], "SeniorCitizen");
        json["session_id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn start_then_answer_advances() {
        let app = app();
        let id = start(&app).await;

        let response = app
            .clone()
            .oneshot(post_json(
                &format!("/api/v1/intake/{}/answers", id),
                serde_json::json!({ "value": 1 }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["progress"]["filled"], 1);
        assert_eq!(json["progress"]["prompt"]["field"], "Partner");
    }

    #[tokio::test]
    async fn invalid_answer_is_422_with_reprompt() {
        let app = app();
        let id = start(&app).await;

        let response = app
            .clone()
            .oneshot(post_json(
                &format!("/api/v1/intake/{}/answers", id),
                serde_json::json!({ "value": "maybe" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = json_body(response).await;
        assert_eq!(json["rejection"]["code"], "INVALID_CHOICE");
        assert_eq!(json["progress"]["prompt"]["field"], "SeniorCitizen");
        assert_eq!(json["progress"]["filled"], 0);
    }

    #[tokio::test]
    async fn answer_for_wrong_field_is_409() {
        let app = app();
        let id = start(&app).await;

        let response = app
            .clone()
            .oneshot(post_json(
                &format!("/api/v1/intake/{}/answers", id),
                serde_json::json!({ "field": "Contract", "value": "One year" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let json = json_body(response).await;
        assert_eq!(json["code"], "OUT_OF_ORDER_INPUT");
    }

    #[tokio::test]
    async fn unknown_session_is_404() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/intake/{}", SessionId::new()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cancel_resets_progress() {
        let app = app();
        let id = start(&app).await;
        app.clone()
            .oneshot(post_json(
                &format!("/api/v1/intake/{}/answers", id),
                serde_json::json!({ "value": "0" }),
            ))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(post_json(&format!("/api/v1/intake/{}/cancel", id), serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["outcome"], "cancelled");

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/intake/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = json_body(response).await;
        assert_eq!(json["filled"], 0);
        assert_eq!(json["complete"], false);
    }

    #[tokio::test]
    async fn full_intake_returns_verdict() {
        let app = app();
        let id = start(&app).await;
        let answers = [
            "0", "No", "No", "Yes", "No", "DSL", "Yes", "Yes", "No", "Yes", "No", "No",
            "Two year", "No", "Mailed check", "48", "45.5", "2184",
        ];

        let mut last = None;
        for value in answers {
            last = Some(
                app.clone()
                    .oneshot(post_json(
                        &format!("/api/v1/intake/{}/answers", id),
                        serde_json::json!({ "value": value }),
                    ))
                    .await
                    .unwrap(),
            );
        }

        let response = last.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["outcome"], "completed");
        assert_eq!(json["verdict"]["label"], "STAYS");
        assert_eq!(json["verdict"]["summary"], "Prediction: STAYS (60.0% confidence)");
    }
}
