//! Wiring of ports, handlers and transports from configuration.

use std::sync::Arc;
use std::time::Duration;

use crate::adapters::http::{FormHandlers, HttpSettings, IntakeHandlers};
use crate::adapters::scoring::{HttpChurnScorer, MockChurnScorer};
use crate::adapters::telegram::TelegramHandlers;
use crate::application::handlers::intake::{
    CancelIntakeHandler, GetIntakeProgressHandler, StartIntakeHandler, SubmitAnswerHandler,
};
use crate::application::handlers::prediction::SubmitFormHandler;
use crate::application::ScoringService;
use crate::config::{ScoringConfig, ScoringProvider, ServerConfig};
use crate::domain::intake::{churn_schema, CollectionStateMachine};
use crate::ports::{ChurnScorer, ScorerError, SessionStore};

/// Everything the transports need, built once at startup.
pub struct Services {
    pub intake: IntakeHandlers,
    pub form: FormHandlers,
    pub telegram: Arc<TelegramHandlers>,
}

/// Builds the configured scorer adapter.
pub fn build_scorer(config: &ScoringConfig) -> Result<Arc<dyn ChurnScorer>, ScorerError> {
    match config.provider {
        ScoringProvider::Http => {
            let endpoint = config
                .endpoint
                .clone()
                .ok_or_else(|| ScorerError::unavailable("No scoring endpoint configured"))?;
            Ok(Arc::new(HttpChurnScorer::new(endpoint, config.timeout())?))
        }
        ScoringProvider::Mock => {
            tracing::warn!(
                probability = config.mock_probability,
                "Using mock scorer; predictions are not real"
            );
            Ok(Arc::new(MockChurnScorer::returning(config.mock_probability)))
        }
    }
}

/// Builds every handler over the churn field set.
pub fn build_services(
    scorer: Arc<dyn ChurnScorer>,
    store: Arc<dyn SessionStore>,
    scoring_timeout: Duration,
) -> Services {
    let schema = churn_schema();
    let machine = CollectionStateMachine::new(schema.clone());
    let scoring = ScoringService::new(scorer, scoring_timeout);

    let start = Arc::new(StartIntakeHandler::new(
        store.clone(),
        machine.clone(),
        scoring.clone(),
    ));
    let answer = Arc::new(SubmitAnswerHandler::new(
        store.clone(),
        machine.clone(),
        scoring.clone(),
    ));
    let cancel = Arc::new(CancelIntakeHandler::new(store.clone(), machine.clone()));
    let progress = Arc::new(GetIntakeProgressHandler::new(store, machine.clone()));

    Services {
        intake: IntakeHandlers::new(
            start.clone(),
            answer.clone(),
            cancel.clone(),
            progress,
            schema.len(),
        ),
        form: FormHandlers::new(
            Arc::new(SubmitFormHandler::new(machine, scoring)),
            schema,
        ),
        telegram: Arc::new(TelegramHandlers {
            start,
            answer,
            cancel,
        }),
    }
}

/// HTTP settings derived from server configuration.
pub fn http_settings(config: &ServerConfig) -> HttpSettings {
    HttpSettings {
        cors_origins: config.cors_origins_list(),
        request_timeout: config.request_timeout(),
    }
}
