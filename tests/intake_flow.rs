//! Integration tests for the chat intake flow.
//!
//! These tests drive the intake handlers end to end over the in-memory
//! session store and the mock scorer:
//! 1. A full conversation reaches the scorer with every value in order
//! 2. Rejected values leave the cursor where it was
//! 3. Scorer failures end the session without exposing a record
//! 4. Conversations never observe one another

use std::sync::Arc;
use std::time::Duration;

use churn_intake::adapters::scoring::MockChurnScorer;
use churn_intake::adapters::storage::InMemorySessionStore;
use churn_intake::application::handlers::intake::{
    AnswerTarget, CancelIntakeCommand, CancelIntakeHandler, IntakeError, IntakeReply,
    StartIntakeCommand, StartIntakeHandler, SubmitAnswerCommand, SubmitAnswerHandler,
};
use churn_intake::application::ScoringService;
use churn_intake::domain::foundation::{ConversationKey, ErrorCode};
use churn_intake::domain::intake::{
    churn_schema, CollectionStateMachine, Cursor, ProtocolError, RawInput, RejectionReason,
    TypedValue,
};
use churn_intake::domain::scoring::ChurnLabel;
use churn_intake::ports::{ScorerError, SessionStore};

// =============================================================================
// Test Infrastructure
// =============================================================================

const ANSWERS: [(&str, &str); 18] = [
    ("SeniorCitizen", "0"),
    ("Partner", "Yes"),
    ("Dependents", "No"),
    ("PhoneService", "Yes"),
    ("MultipleLines", "No"),
    ("InternetService", "Fiber optic"),
    ("OnlineSecurity", "No"),
    ("OnlineBackup", "Yes"),
    ("DeviceProtection", "No"),
    ("TechSupport", "No"),
    ("StreamingTV", "Yes"),
    ("StreamingMovies", "Yes"),
    ("Contract", "Month-to-month"),
    ("PaperlessBilling", "Yes"),
    ("PaymentMethod", "Electronic check"),
    ("tenure", "12"),
    ("MonthlyCharges", "70.5"),
    ("TotalCharges", "840.0"),
];

struct Harness {
    store: Arc<InMemorySessionStore>,
    scorer: Arc<MockChurnScorer>,
    start: StartIntakeHandler,
    answer: SubmitAnswerHandler,
    cancel: CancelIntakeHandler,
}

impl Harness {
    fn new(scorer: MockChurnScorer) -> Self {
        let store = Arc::new(InMemorySessionStore::new());
        let scorer = Arc::new(scorer);
        let machine = CollectionStateMachine::new(churn_schema());
        let scoring = ScoringService::new(scorer.clone(), Duration::from_secs(1));

        Self {
            start: StartIntakeHandler::new(store.clone(), machine.clone(), scoring.clone()),
            answer: SubmitAnswerHandler::new(store.clone(), machine.clone(), scoring),
            cancel: CancelIntakeHandler::new(store.clone(), machine),
            store,
            scorer,
        }
    }

    async fn start(&self, key: &ConversationKey) -> IntakeReply {
        self.start
            .handle(StartIntakeCommand { key: key.clone() })
            .await
            .unwrap()
    }

    async fn send(&self, key: &ConversationKey, text: &str) -> Result<IntakeReply, IntakeError> {
        self.answer
            .handle(SubmitAnswerCommand {
                key: key.clone(),
                target: AnswerTarget::Current,
                input: RawInput::text(text),
            })
            .await
    }

    async fn press(
        &self,
        key: &ConversationKey,
        order: usize,
        value: &str,
    ) -> Result<IntakeReply, IntakeError> {
        self.answer
            .handle(SubmitAnswerCommand {
                key: key.clone(),
                target: AnswerTarget::Order(order),
                input: RawInput::selection(value),
            })
            .await
    }

    /// Answers every field up to, but not including, `field`.
    async fn answer_until(&self, key: &ConversationKey, field: &str) {
        for (name, value) in ANSWERS.iter().take_while(|(name, _)| *name != field) {
            let reply = self.send(key, value).await.unwrap();
            assert!(
                matches!(reply, IntakeReply::Prompt { .. }),
                "{} should advance",
                name
            );
        }
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn full_conversation_scores_every_value_in_order() {
    let harness = Harness::new(MockChurnScorer::returning(73.5));
    let key = ConversationKey::chat(1001);
    harness.start(&key).await;

    let mut last = None;
    for (_, value) in ANSWERS {
        last = Some(harness.send(&key, value).await.unwrap());
    }

    match last.unwrap() {
        IntakeReply::Completed { record, verdict, .. } => {
            assert_eq!(verdict.label, ChurnLabel::Leaves);
            assert_eq!(verdict.summary(), "Prediction: LEAVES (73.5% confidence)");

            let names: Vec<&str> = record.entries().map(|(name, _)| name).collect();
            let expected: Vec<&str> = ANSWERS.iter().map(|(name, _)| *name).collect();
            assert_eq!(names, expected);
            assert_eq!(record.get("SeniorCitizen"), Some(&TypedValue::Integer(0)));
            assert_eq!(record.get("tenure"), Some(&TypedValue::Integer(12)));
            assert_eq!(record.get("MonthlyCharges"), Some(&TypedValue::Float(70.5)));
            assert_eq!(
                record.get("PaymentMethod"),
                Some(&TypedValue::Text("Electronic check".to_string()))
            );
        }
        other => panic!("expected completion, got {:?}", other),
    }

    assert_eq!(harness.scorer.call_count(), 1);
    assert_eq!(harness.scorer.get_calls()[0].len(), 18);
    assert_eq!(harness.store.session_count().await, 0);
}

#[tokio::test]
async fn negative_tenure_is_rejected_and_cursor_stays() {
    let harness = Harness::new(MockChurnScorer::returning(10.0));
    let key = ConversationKey::chat(1002);
    harness.start(&key).await;
    harness.answer_until(&key, "tenure").await;

    let reply = harness.send(&key, "-5").await.unwrap();
    match reply {
        IntakeReply::Rejected { reason, prompt, .. } => {
            assert!(matches!(reason, RejectionReason::BelowMinimum { .. }));
            assert_eq!(prompt.field, "tenure");
        }
        other => panic!("expected rejection, got {:?}", other),
    }

    let stored = harness.store.load(&key).await.unwrap().unwrap();
    assert_eq!(stored.cursor(), Cursor::At(15));
    assert_eq!(stored.value("tenure"), None);
}

#[tokio::test]
async fn unknown_contract_is_rejected_with_same_prompt() {
    let harness = Harness::new(MockChurnScorer::returning(10.0));
    let key = ConversationKey::chat(1003);
    harness.start(&key).await;
    harness.answer_until(&key, "Contract").await;

    let before = match harness.send(&key, "Three year").await.unwrap() {
        IntakeReply::Rejected { reason, prompt, .. } => {
            assert_eq!(
                reason,
                RejectionReason::InvalidChoice {
                    value: "Three year".to_string()
                }
            );
            prompt
        }
        other => panic!("expected rejection, got {:?}", other),
    };

    let again = match harness.send(&key, "Three year").await.unwrap() {
        IntakeReply::Rejected { prompt, .. } => prompt,
        other => panic!("expected rejection, got {:?}", other),
    };
    assert_eq!(before, again);
    assert_eq!(before.field, "Contract");
}

#[tokio::test]
async fn scorer_failure_ends_session_without_record() {
    let harness = Harness::new(MockChurnScorer::failing(ScorerError::unavailable(
        "model offline",
    )));
    let key = ConversationKey::chat(1004);
    harness.start(&key).await;

    let mut last = None;
    for (_, value) in ANSWERS {
        last = Some(harness.send(&key, value).await.unwrap());
    }

    match last.unwrap() {
        IntakeReply::ScoringFailed { error, .. } => {
            assert_eq!(error.code(), ErrorCode::ScoringUnavailable);
        }
        other => panic!("expected scoring failure, got {:?}", other),
    }
    assert_eq!(harness.store.session_count().await, 0);

    let after = harness.send(&key, "0").await;
    assert!(matches!(after, Err(IntakeError::NotFound(_))));
}

#[tokio::test]
async fn slow_scorer_times_out_as_unavailable() {
    let harness = Harness::new(
        MockChurnScorer::returning(90.0).with_delay(Duration::from_secs(5)),
    );
    let key = ConversationKey::chat(1005);
    harness.start(&key).await;

    let mut last = None;
    for (_, value) in ANSWERS {
        last = Some(harness.send(&key, value).await.unwrap());
    }

    assert!(matches!(last.unwrap(), IntakeReply::ScoringFailed { .. }));
    assert_eq!(harness.store.session_count().await, 0);
}

// =============================================================================
// Protocol and isolation
// =============================================================================

#[tokio::test]
async fn stale_button_press_is_a_protocol_error() {
    let harness = Harness::new(MockChurnScorer::returning(10.0));
    let key = ConversationKey::chat(1006);
    harness.start(&key).await;
    harness.press(&key, 0, "1").await.unwrap();

    let stale = harness.press(&key, 0, "0").await;
    assert!(matches!(
        stale,
        Err(IntakeError::Protocol(ProtocolError::OutOfOrder { .. }))
    ));

    let stored = harness.store.load(&key).await.unwrap().unwrap();
    assert_eq!(stored.value("SeniorCitizen"), Some(&TypedValue::Integer(1)));
    assert_eq!(stored.cursor(), Cursor::At(1));
}

#[tokio::test]
async fn restart_discards_previous_answers() {
    let harness = Harness::new(MockChurnScorer::returning(10.0));
    let key = ConversationKey::chat(1007);
    harness.start(&key).await;
    harness.answer_until(&key, "InternetService").await;

    match harness.start(&key).await {
        IntakeReply::Prompt { session, prompt } => {
            assert_eq!(session.filled_count(), 0);
            assert_eq!(prompt.field, "SeniorCitizen");
        }
        other => panic!("expected prompt, got {:?}", other),
    }
}

#[tokio::test]
async fn cancel_clears_answers_and_waits_at_first_field() {
    let harness = Harness::new(MockChurnScorer::returning(10.0));
    let key = ConversationKey::chat(1008);
    harness.start(&key).await;
    harness.answer_until(&key, "Contract").await;

    let reply = harness
        .cancel
        .handle(CancelIntakeCommand { key: key.clone() })
        .await
        .unwrap();
    match reply {
        IntakeReply::Cancelled { session, prompt } => {
            assert_eq!(session.filled_count(), 0);
            assert_eq!(prompt.unwrap().field, "SeniorCitizen");
        }
        other => panic!("expected cancellation, got {:?}", other),
    }
    assert_eq!(harness.scorer.call_count(), 0);
}

#[tokio::test]
async fn concurrent_conversations_do_not_interfere() {
    let harness = Arc::new(Harness::new(MockChurnScorer::returning(20.0)));
    let first = ConversationKey::chat(2001);
    let second = ConversationKey::chat(2002);
    harness.start(&first).await;
    harness.start(&second).await;

    let a = {
        let harness = harness.clone();
        let key = first.clone();
        tokio::spawn(async move { harness.answer_until(&key, "Contract").await })
    };
    let b = {
        let harness = harness.clone();
        let key = second.clone();
        tokio::spawn(async move { harness.answer_until(&key, "PhoneService").await })
    };
    a.await.unwrap();
    b.await.unwrap();

    let first_session = harness.store.load(&first).await.unwrap().unwrap();
    let second_session = harness.store.load(&second).await.unwrap().unwrap();
    assert_eq!(first_session.cursor(), Cursor::At(12));
    assert_eq!(second_session.cursor(), Cursor::At(3));
    assert_ne!(first_session.id(), second_session.id());
}
