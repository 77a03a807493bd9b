use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use newsdesk_core::{
    update, Completion, Dispatcher, Effect, FetchOutcome, Msg, QueryDescriptor, RequestToken,
};
use newsdesk_engine::{EngineEvent, EngineHandle, Gateway};

/// Answers "slow" searches after a long delay and everything else at once.
struct ScriptedGateway;

#[async_trait::async_trait]
impl Gateway for ScriptedGateway {
    async fn execute(&self, token: RequestToken, descriptor: &QueryDescriptor) -> Completion {
        if matches!(descriptor, QueryDescriptor::Search { term } if term == "slow") {
            tokio::time::sleep(Duration::from_millis(400)).await;
        }
        Completion::new(token, FetchOutcome::Articles(Vec::new()))
    }
}

fn start() -> (EngineHandle, mpsc::Receiver<EngineEvent>) {
    newsdesk_logging::initialize_for_tests();
    let (tx, rx) = mpsc::channel();
    let engine = EngineHandle::with_gateway(Arc::new(ScriptedGateway), tx).unwrap();
    (engine, rx)
}

fn issued_tokens(effects: &[Effect]) -> Vec<RequestToken> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Fetch { token, .. } => Some(*token),
            _ => None,
        })
        .collect()
}

#[test]
fn completion_is_reported_with_its_token() {
    let (engine, rx) = start();
    let (_state, effects) = update(Dispatcher::default(), Msg::Activated);
    let token = issued_tokens(&effects)[0];

    for effect in effects {
        if let Effect::Fetch { token, descriptor } = effect {
            engine.execute(token, descriptor);
        }
    }

    let EngineEvent::Completed(completion) = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(completion.token, token);
}

#[test]
fn cancelled_request_reports_nothing() {
    let (engine, rx) = start();
    let (state, first) = update(Dispatcher::default(), Msg::Activated);
    let slow_token = issued_tokens(&first)[0];
    engine.execute(slow_token, QueryDescriptor::search("slow"));

    let (_state, second) = update(state, Msg::CategoryChanged(newsdesk_core::Category::Sports));
    let fast_token = issued_tokens(&second)[0];
    assert!(second.contains(&Effect::CancelSuperseded { before: fast_token }));
    engine.cancel_before(fast_token);
    engine.execute(fast_token, QueryDescriptor::search("fast"));

    let EngineEvent::Completed(completion) = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(completion.token, fast_token);
    assert!(rx.recv_timeout(Duration::from_millis(800)).is_err());
}
