//! # Filter Manager
//!
//! A task that owns a [`FilterSet`] and turns edits into list fetches.
//!
//! ```text
//! Idle --edit--> PendingDebounce --quiet period--> Fetching --result--> Idle
//!                     ^    |                           |
//!                     +----+ edit (timer restarts)     | edit
//!                     +--------------------------------+
//! ```
//!
//! At most one deadline is pending; every edit replaces it. Each fetch gets the next
//! sequence number and only the result carrying the latest number is applied. Fetches run on
//! their own tasks so a slow response never blocks edits.

use crate::filter::FilterSet;
use crate::framework::{GatewayError, Record, ResourceClient};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

/// Quiet period between the last edit and the fetch.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Where the manager is in its fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPhase {
    Idle,
    PendingDebounce,
    Fetching,
}

/// What subscribers see.
#[derive(Debug, Clone)]
pub struct FilterSnapshot<T> {
    pub phase: FilterPhase,
    pub filters: FilterSet,
    /// Records from the latest applied fetch.
    pub records: Vec<T>,
    /// Sequence number of the latest issued fetch.
    pub seq: u64,
    /// Set when the latest fetch failed; `records` then still holds the previous result.
    pub error: Option<String>,
}

enum Command {
    Set {
        field: String,
        value: String,
        ack: oneshot::Sender<()>,
    },
    Refresh {
        ack: oneshot::Sender<()>,
    },
}

type Completion<T> = (u64, Result<Vec<T>, GatewayError>);

pub struct FilterManager<T: Record> {
    client: ResourceClient<T>,
    debounce: Duration,
    commands: mpsc::Receiver<Command>,
    state: watch::Sender<FilterSnapshot<T>>,
    filters: FilterSet,
    deadline: Option<Instant>,
    latest_seq: u64,
    done_tx: mpsc::UnboundedSender<Completion<T>>,
    done_rx: mpsc::UnboundedReceiver<Completion<T>>,
}

impl<T: Record> FilterManager<T> {
    /// Creates the manager and its handle. Nothing is fetched until [`run`](Self::run).
    pub fn new(
        client: ResourceClient<T>,
        filters: FilterSet,
        debounce: Duration,
    ) -> (Self, FilterHandle<T>) {
        let (command_tx, commands) = mpsc::channel(32);
        let (state, snapshot) = watch::channel(FilterSnapshot {
            phase: FilterPhase::Idle,
            filters: filters.clone(),
            records: Vec::new(),
            seq: 0,
            error: None,
        });
        let (done_tx, done_rx) = mpsc::unbounded_channel();
        let manager = Self {
            client,
            debounce,
            commands,
            state,
            filters,
            deadline: None,
            latest_seq: 0,
            done_tx,
            done_rx,
        };
        let handle = FilterHandle {
            commands: command_tx,
            snapshot,
        };
        (manager, handle)
    }

    /// Fetches the initial state at once, then runs until every handle is dropped.
    pub async fn run(mut self) {
        let kind = T::KIND;
        info!(%kind, debounce_ms = self.debounce.as_millis() as u64, "Filter manager started");
        self.fetch();

        loop {
            let wake_at = self
                .deadline
                .unwrap_or_else(|| Instant::now() + Duration::from_secs(3600));

            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(Command::Set { field, value, ack }) => {
                        self.on_edit(field, value);
                        let _ = ack.send(());
                    }
                    Some(Command::Refresh { ack }) => {
                        self.deadline = None;
                        self.fetch();
                        let _ = ack.send(());
                    }
                    None => break,
                },
                _ = sleep_until(wake_at), if self.deadline.is_some() => {
                    self.deadline = None;
                    self.fetch();
                }
                Some((seq, result)) = self.done_rx.recv() => {
                    self.complete(seq, result);
                }
            }
        }

        info!(%kind, "Filter manager stopped");
    }

    fn on_edit(&mut self, field: String, value: String) {
        debug!(kind = %T::KIND, %field, %value, "Filter edited");
        self.filters.set(&field, value);
        self.deadline = Some(Instant::now() + self.debounce);
        let filters = self.filters.clone();
        self.state.send_modify(|snapshot| {
            snapshot.filters = filters;
            snapshot.phase = FilterPhase::PendingDebounce;
        });
    }

    fn fetch(&mut self) {
        self.latest_seq += 1;
        let seq = self.latest_seq;
        let query = self.filters.to_query();
        debug!(kind = %T::KIND, seq, ?query, "Fetching");

        let client = self.client.clone();
        let done = self.done_tx.clone();
        tokio::spawn(async move {
            let result = client.list(query).await;
            let _ = done.send((seq, result));
        });

        self.state.send_modify(|snapshot| {
            snapshot.phase = FilterPhase::Fetching;
            snapshot.seq = seq;
        });
    }

    fn complete(&mut self, seq: u64, result: Result<Vec<T>, GatewayError>) {
        let kind = T::KIND;
        if seq != self.latest_seq {
            debug!(%kind, seq, latest = self.latest_seq, "Discarding stale result");
            return;
        }
        let phase = if self.deadline.is_some() {
            FilterPhase::PendingDebounce
        } else {
            FilterPhase::Idle
        };
        match result {
            Ok(records) => {
                debug!(%kind, seq, count = records.len(), "Fetched");
                self.state.send_modify(|snapshot| {
                    snapshot.records = records;
                    snapshot.error = None;
                    snapshot.phase = phase;
                });
            }
            Err(e) => {
                warn!(%kind, seq, error = %e, "Fetch failed, keeping previous records");
                self.state.send_modify(|snapshot| {
                    snapshot.error = Some(e.to_string());
                    snapshot.phase = phase;
                });
            }
        }
    }
}

/// Cloneable handle to a running [`FilterManager`].
pub struct FilterHandle<T: Record> {
    commands: mpsc::Sender<Command>,
    snapshot: watch::Receiver<FilterSnapshot<T>>,
}

impl<T: Record> Clone for FilterHandle<T> {
    fn clone(&self) -> Self {
        Self {
            commands: self.commands.clone(),
            snapshot: self.snapshot.clone(),
        }
    }
}

impl<T: Record> FilterHandle<T> {
    /// Updates one field. Returns once the manager holds the new value; the fetch follows
    /// after the quiet period.
    pub async fn set(&self, field: &str, value: impl Into<String>) -> Result<(), GatewayError> {
        let (ack, acked) = oneshot::channel();
        self.commands
            .send(Command::Set {
                field: field.to_string(),
                value: value.into(),
                ack,
            })
            .await
            .map_err(|_| GatewayError::ServiceClosed)?;
        acked.await.map_err(|_| GatewayError::ServiceDropped)
    }

    /// Fetches now with the current filters, cancelling any pending deadline.
    pub async fn refresh(&self) -> Result<(), GatewayError> {
        let (ack, acked) = oneshot::channel();
        self.commands
            .send(Command::Refresh { ack })
            .await
            .map_err(|_| GatewayError::ServiceClosed)?;
        acked.await.map_err(|_| GatewayError::ServiceDropped)
    }

    pub fn subscribe(&self) -> watch::Receiver<FilterSnapshot<T>> {
        self.snapshot.clone()
    }

    pub fn snapshot(&self) -> FilterSnapshot<T> {
        self.snapshot.borrow().clone()
    }

    /// Waits until no edit is pending and the latest fetch has been applied.
    pub async fn settled(&self) -> Result<FilterSnapshot<T>, GatewayError> {
        let mut receiver = self.snapshot.clone();
        let snapshot = receiver
            .wait_for(|s| s.phase == FilterPhase::Idle && s.seq > 0)
            .await
            .map_err(|_| GatewayError::ServiceDropped)?;
        Ok(snapshot.clone())
    }
}
