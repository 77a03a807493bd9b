use std::sync::mpsc;
use std::thread;

use newsdesk_core::{Effect, Msg};
use newsdesk_engine::{EngineError, EngineEvent, EngineHandle, GatewaySettings};
use newsdesk_logging::{news_debug, news_info};

use crate::input::Command;

/// Executes core effects on the engine and feeds completions back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(
        settings: GatewaySettings,
        msg_tx: mpsc::Sender<Command>,
    ) -> Result<Self, EngineError> {
        news_info!("Starting engine with {:?}", settings);
        let (event_tx, event_rx) = mpsc::channel();
        let engine = EngineHandle::new(settings, event_tx)?;
        spawn_event_forwarder(event_rx, msg_tx);
        Ok(Self { engine })
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Fetch { token, descriptor } => {
                    news_debug!("Fetch {} {}", token, descriptor);
                    self.engine.execute(token, descriptor);
                }
                Effect::CancelSuperseded { before } => {
                    self.engine.cancel_before(before);
                }
            }
        }
    }
}

fn spawn_event_forwarder(
    event_rx: mpsc::Receiver<EngineEvent>,
    msg_tx: mpsc::Sender<Command>,
) {
    thread::spawn(move || {
        for event in event_rx {
            let msg = match event {
                EngineEvent::Completed(completion) => Msg::FetchCompleted(completion),
            };
            if msg_tx.send(Command::Dispatch(msg)).is_err() {
                break;
            }
        }
    });
}
