//! Property tests for per-session invariants.
//!
//! Random conversations built from a fixed vocabulary of realistic turns
//! (greetings, venting, exercise replies, mood values, crisis language)
//! must keep history bounded and never clear the escalation flag.

use proptest::prelude::*;

use sergeai::application::{AgentSettings, SupportAgent};
use sergeai::domain::dialogue::DialogueState;
use sergeai::domain::signals::RiskLevel;

const TURNS: &[&str] = &[
    "hello",
    "",
    "I had an awful day and I just need to vent",
    "I'm so anxious I can't focus",
    "yes",
    "no",
    "next",
    "2",
    "exercises",
    "log my mood",
    "feeling great",
    "I can't sleep",
    "crisis",
    "journal",
    "I want to kill myself",
    "I feel hopeless",
    "I'm safe now",
    "what?",
];

fn conversation() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(TURNS), 0..40)
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn history_never_exceeds_capacity(turns in conversation(), capacity in 1usize..8) {
        runtime().block_on(async {
            let agent = SupportAgent::builder()
                .settings(AgentSettings { history_capacity: capacity, ..AgentSettings::default() })
                .build()
                .unwrap();
            let id = agent.start_session().await.unwrap().session_id;
            for text in &turns {
                agent.submit_message(id, *text).await.unwrap();
            }

            let store = agent.session_store();
            let handle = store.get(&id).await.unwrap();
            let context = handle.lock().await;
            prop_assert!(context.turn_history().len() <= capacity);
            prop_assert_eq!(context.turns_processed(), turns.len() as u64);
            Ok::<(), TestCaseError>(())
        })?;
    }

    #[test]
    fn escalation_is_monotonic(turns in conversation()) {
        runtime().block_on(async {
            let agent = SupportAgent::builder().build().unwrap();
            let id = agent.start_session().await.unwrap().session_id;
            let mut escalated = false;
            for text in &turns {
                let result = agent.submit_message(id, *text).await.unwrap();
                if escalated {
                    prop_assert!(result.risk_escalated, "cleared after {:?}", text);
                }
                escalated = result.risk_escalated;
            }
            Ok::<(), TestCaseError>(())
        })?;
    }

    #[test]
    fn high_risk_always_lands_in_crisis(turns in conversation()) {
        runtime().block_on(async {
            let agent = SupportAgent::builder().build().unwrap();
            let id = agent.start_session().await.unwrap().session_id;
            for text in &turns {
                agent.submit_message(id, *text).await.unwrap();
            }

            let result = agent.submit_message(id, "I want to kill myself").await.unwrap();
            prop_assert_eq!(result.risk_level, RiskLevel::High);
            prop_assert_eq!(result.state, DialogueState::CrisisFlow);
            prop_assert!(result.response_text.contains("741741"));
            Ok::<(), TestCaseError>(())
        })?;
    }
}
