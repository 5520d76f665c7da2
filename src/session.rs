// ABOUTME: Session task serializing power and configuration streams onto one W' engine
// ABOUTME: Publishes atomic snapshots to any number of concurrent read-only subscribers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # W' Session
//!
//! One engine per ride. [`WPrimeSession::spawn`] moves the engine into a tokio
//! task that waits on both the power stream and the configuration stream and
//! applies whichever delivers first, one at a time. Every update publishes a
//! complete [`EngineSnapshot`] through a `watch` channel, so display fields
//! and recorders read the same value without ever seeing a half-applied
//! update.
//!
//! The task ends when the power stream ends, when [`WPrimeSession::shutdown`]
//! is called, or when the session handle is dropped. A closed configuration
//! stream only stops configuration updates.

use crate::engine::{WPrimeEngine, WPrimeOutput};
use crate::errors::{AppError, AppResult};
use crate::models::{ConfigurationSnapshot, EngineSnapshot, PowerReading};
use futures_util::{Stream, StreamExt};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_stream::wrappers::WatchStream;
use tracing::debug;

/// Handle to a running W' session task
#[derive(Debug)]
pub struct WPrimeSession {
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<WPrimeEngine>,
    snapshots: watch::Receiver<EngineSnapshot>,
}

impl WPrimeSession {
    /// Start the update task for `engine`
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<S, C>(engine: WPrimeEngine, samples: S, configs: C) -> Self
    where
        S: Stream<Item = PowerReading> + Send + 'static,
        C: Stream<Item = ConfigurationSnapshot> + Send + 'static,
    {
        let (publisher, snapshots) = watch::channel(engine.snapshot());
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);
        let task = tokio::spawn(Self::run(engine, samples, configs, publisher, shutdown_rx));

        Self {
            shutdown_tx,
            task,
            snapshots,
        }
    }

    async fn run<S, C>(
        mut engine: WPrimeEngine,
        samples: S,
        configs: C,
        publisher: watch::Sender<EngineSnapshot>,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) -> WPrimeEngine
    where
        S: Stream<Item = PowerReading> + Send + 'static,
        C: Stream<Item = ConfigurationSnapshot> + Send + 'static,
    {
        tokio::pin!(samples);
        tokio::pin!(configs);
        let mut configs_open = true;

        debug!(config = %engine.config().summary(), "W' session started");
        loop {
            tokio::select! {
                biased;
                _ = shutdown_rx.recv() => {
                    debug!("W' session received shutdown signal");
                    break;
                }
                config = configs.next(), if configs_open => {
                    if let Some(config) = config {
                        publisher.send_replace(engine.apply_configuration(&config));
                    } else {
                        debug!("Configuration stream closed, keeping current settings");
                        configs_open = false;
                    }
                }
                reading = samples.next() => {
                    if let Some(reading) = reading {
                        publisher.send_replace(engine.ingest_reading(reading));
                    } else {
                        debug!("Power stream ended, stopping W' session");
                        break;
                    }
                }
            }
        }
        engine
    }

    /// New read-only subscriber to the published snapshots
    #[must_use]
    pub fn reader(&self) -> SnapshotReader {
        SnapshotReader {
            receiver: self.snapshots.clone(),
        }
    }

    /// Whether the update task has stopped
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the update task and take back the engine
    ///
    /// # Errors
    ///
    /// Returns an error if the update task panicked or was aborted
    pub async fn shutdown(self) -> AppResult<WPrimeEngine> {
        // A send error only means the task already stopped on its own
        let _ = self.shutdown_tx.send(()).await;
        Self::join_task(self.task).await
    }

    /// Wait for the power stream to end and take back the engine
    ///
    /// # Errors
    ///
    /// Returns an error if the update task panicked or was aborted
    pub async fn finished(self) -> AppResult<WPrimeEngine> {
        let Self {
            shutdown_tx, task, ..
        } = self;
        // Holding the sender keeps the shutdown branch idle until the task ends
        let engine = Self::join_task(task).await;
        drop(shutdown_tx);
        engine
    }

    async fn join_task(task: JoinHandle<WPrimeEngine>) -> AppResult<WPrimeEngine> {
        task.await.map_err(|e| {
            AppError::internal(format!("W' session task failed: {e}")).with_source(e)
        })
    }
}

/// Read-only subscriber to a session's snapshots
///
/// Cheap to clone; each display field or recorder holds its own.
#[derive(Debug, Clone)]
pub struct SnapshotReader {
    receiver: watch::Receiver<EngineSnapshot>,
}

impl SnapshotReader {
    /// Wait for a snapshot newer than the last one seen by this reader
    ///
    /// Returns `false` once the session has stopped and no update will follow.
    pub async fn changed(&mut self) -> bool {
        self.receiver.changed().await.is_ok()
    }

    /// Latest snapshot, marking it as seen
    #[must_use]
    pub fn latest(&mut self) -> EngineSnapshot {
        *self.receiver.borrow_and_update()
    }

    /// Stream of snapshots, starting with the current one
    #[must_use]
    pub fn into_stream(self) -> WatchStream<EngineSnapshot> {
        WatchStream::new(self.receiver)
    }
}

impl WPrimeOutput for SnapshotReader {
    fn snapshot(&self) -> EngineSnapshot {
        *self.receiver.borrow()
    }
}
