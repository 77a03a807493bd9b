use std::collections::BTreeMap;
use std::sync::{mpsc, Arc, Mutex, PoisonError};
use std::thread;

use newsdesk_core::{QueryDescriptor, RequestToken};
use newsdesk_logging::{news_debug, news_info};
use tokio_util::sync::CancellationToken;

use crate::gateway::{Gateway, NewsApiGateway};
use crate::{EngineError, EngineEvent, GatewaySettings};

enum EngineCommand {
    Execute {
        token: RequestToken,
        descriptor: QueryDescriptor,
    },
    CancelBefore(RequestToken),
}

type InFlight = Arc<Mutex<BTreeMap<RequestToken, CancellationToken>>>;

/// Runs gateway calls on a background tokio runtime.
///
/// Completions come back on the `event_tx` channel in whatever order the
/// network delivers them. Dropping the handle stops the runtime.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(
        settings: GatewaySettings,
        event_tx: mpsc::Sender<EngineEvent>,
    ) -> Result<Self, EngineError> {
        let gateway = NewsApiGateway::new(settings)?;
        Self::with_gateway(Arc::new(gateway), event_tx)
    }

    pub fn with_gateway(
        gateway: Arc<dyn Gateway>,
        event_tx: mpsc::Sender<EngineEvent>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .map_err(EngineError::Runtime)?;

        thread::Builder::new()
            .name("newsdesk-engine".to_string())
            .spawn(move || {
                let in_flight: InFlight = Arc::default();
                while let Ok(command) = cmd_rx.recv() {
                    match command {
                        EngineCommand::Execute { token, descriptor } => {
                            let cancel = CancellationToken::new();
                            lock(&in_flight).insert(token, cancel.clone());
                            runtime.spawn(run_request(
                                gateway.clone(),
                                token,
                                descriptor,
                                cancel,
                                in_flight.clone(),
                                event_tx.clone(),
                            ));
                        }
                        EngineCommand::CancelBefore(before) => {
                            cancel_before(&in_flight, before);
                        }
                    }
                }
                news_debug!("Engine command channel closed; shutting down runtime");
            })
            .map_err(EngineError::Thread)?;

        Ok(Self { cmd_tx })
    }

    pub fn execute(&self, token: RequestToken, descriptor: QueryDescriptor) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::Execute { token, descriptor });
    }

    /// Aborts every in-flight request issued before `before`. Advisory only.
    pub fn cancel_before(&self, before: RequestToken) {
        let _ = self.cmd_tx.send(EngineCommand::CancelBefore(before));
    }
}

async fn run_request(
    gateway: Arc<dyn Gateway>,
    token: RequestToken,
    descriptor: QueryDescriptor,
    cancel: CancellationToken,
    in_flight: InFlight,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    tokio::select! {
        _ = cancel.cancelled() => {
            news_debug!("Request {} aborted as superseded", token);
        }
        completion = gateway.execute(token, &descriptor) => {
            let _ = event_tx.send(EngineEvent::Completed(completion));
        }
    }
    lock(&in_flight).remove(&token);
}

fn cancel_before(in_flight: &InFlight, before: RequestToken) {
    let mut map = lock(in_flight);
    let keep = map.split_off(&before);
    let superseded = std::mem::replace(&mut *map, keep);
    drop(map);

    if !superseded.is_empty() {
        news_info!(
            "Cancelling {} superseded request(s) older than {}",
            superseded.len(),
            before
        );
    }
    for cancel in superseded.into_values() {
        cancel.cancel();
    }
}

fn lock(
    in_flight: &InFlight,
) -> std::sync::MutexGuard<'_, BTreeMap<RequestToken, CancellationToken>> {
    in_flight.lock().unwrap_or_else(PoisonError::into_inner)
}
