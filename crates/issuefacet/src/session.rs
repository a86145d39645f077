//! Trigger-driven search session
//!
//! All triggers arrive on one channel. Each trigger updates the controls,
//! takes a ticket from the ledger, marks the view as loading and spawns one
//! fetch. Completed fetches report back with their ticket and only the latest
//! ticket's outcome reaches the view. A superseded fetch is aborted, and if it
//! finishes anyway its outcome is dropped.

use crate::transport::{FetchError, Transport};
use issuefacet_core::controls::{SearchControls, Trigger};
use issuefacet_core::github::SearchResponse;
use issuefacet_core::ledger::{RequestLedger, RequestTicket};
use issuefacet_core::view::ViewState;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

type Outcome = (RequestTicket, Result<SearchResponse, FetchError>);

/// Sending side of the trigger channel
#[derive(Debug, Clone)]
pub struct SessionHandle {
    triggers: async_channel::Sender<Trigger>,
}

impl SessionHandle {
    /// Queue a trigger. Returns `false` once the session has stopped.
    pub async fn send(&self, trigger: Trigger) -> bool {
        self.triggers.send(trigger).await.is_ok()
    }
}

pub struct SearchSession<T: Transport> {
    transport: T,
    controls: SearchControls,
    ledger: RequestLedger,
    state: ViewState,
    publisher: watch::Sender<ViewState>,
    in_flight: Option<JoinHandle<()>>,
}

impl<T: Transport> SearchSession<T> {
    /// Create a session and a receiver that sees every published view state
    pub fn new(transport: T, controls: SearchControls) -> (Self, watch::Receiver<ViewState>) {
        let state = ViewState::new();
        let (publisher, receiver) = watch::channel(state.clone());

        let session = Self {
            transport,
            controls,
            ledger: RequestLedger::new(),
            state,
            publisher,
            in_flight: None,
        };

        (session, receiver)
    }

    /// Spawn the session loop with the start-up trigger already queued.
    ///
    /// The loop stops once every [`SessionHandle`] is dropped and the latest
    /// request has settled; the task yields the final view state.
    pub fn spawn(self) -> (SessionHandle, JoinHandle<ViewState>) {
        let (sender, receiver) = async_channel::unbounded();
        // Cannot fail: the receiver is alive and the channel is unbounded.
        let _ = sender.try_send(Trigger::Initial);

        let task = tokio::spawn(self.run(receiver));

        (SessionHandle { triggers: sender }, task)
    }

    pub async fn run(mut self, triggers: async_channel::Receiver<Trigger>) -> ViewState {
        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Outcome>();
        let mut triggers_open = true;

        loop {
            tokio::select! {
                trigger = triggers.recv(), if triggers_open => match trigger {
                    Ok(trigger) => {
                        self.handle_trigger(trigger, &done_tx);
                    }
                    Err(_) => triggers_open = false,
                },
                Some((ticket, outcome)) = done_rx.recv() => self.handle_outcome(ticket, outcome),
                else => break,
            }

            if !triggers_open && !self.is_pending() {
                break;
            }
        }

        if let Some(task) = self.in_flight.take() {
            task.abort();
        }

        self.state
    }

    /// Whether the latest request is still waiting for its outcome
    fn is_pending(&self) -> bool {
        self.ledger.latest().is_some() && self.state.is_loading()
    }

    fn handle_trigger(
        &mut self,
        trigger: Trigger,
        done: &mpsc::UnboundedSender<Outcome>,
    ) -> RequestTicket {
        let kind = trigger.kind();
        let params = self.controls.apply(trigger);
        let url = params.to_url();
        let ticket = self.ledger.issue();

        self.state.begin_loading();
        self.publish();

        log::debug!("{kind} trigger {ticket}: GET {url}");

        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }

        let fetch = self.transport.fetch(&url);
        let done = done.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let outcome = fetch.await;
            // The session may already be gone; nothing left to update then.
            let _ = done.send((ticket, outcome));
        }));

        ticket
    }

    fn handle_outcome(&mut self, ticket: RequestTicket, outcome: Result<SearchResponse, FetchError>) {
        if !self.ledger.is_current(ticket) {
            log::debug!("ignoring stale outcome of request {ticket}");
            return;
        }

        self.in_flight = None;

        match outcome {
            Ok(response) => {
                log::debug!(
                    "request {ticket} returned {} of {} issues",
                    response.items.len(),
                    response.total_count
                );
                self.state.apply_success(response);
            }
            Err(err) => {
                log::warn!("search request {ticket} failed: {err}");
                self.state.apply_failure();
            }
        }

        self.publish();
    }

    fn publish(&self) {
        self.publisher.send_replace(self.state.clone());
    }
}
