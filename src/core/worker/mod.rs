//! core/worker/mod.rs
//! The single background thread for file jobs.
//!
//! The GUI owns a [`WorkerHandle`] and a `Receiver<WorkerEvent>`; it sends
//! commands and drains events on a timer tick. Commands run strictly in order.
//! No Iced imports.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

mod engine;

use engine::WorkerEngine;

use super::batch::{LoadReport, RenameReport, SaveReport};
use super::types::{CoverArt, TagEdit};
use crate::musicbrainz::Release;

#[derive(Debug)]
pub enum WorkerCommand {
    LoadFiles(Vec<PathBuf>),
    SaveEdits(Vec<(PathBuf, TagEdit)>),
    ApplyRelease {
        paths: Vec<PathBuf>,
        release: Box<Release>,
        cover: Option<CoverArt>,
    },
    RenameFiles {
        paths: Vec<PathBuf>,
        pattern: String,
    },
    Shutdown,
}

#[derive(Debug)]
pub enum WorkerEvent {
    Progress { done: usize, total: usize },
    Loaded(LoadReport),
    Saved(SaveReport),
    Renamed(RenameReport),
    /// The whole job failed: nothing was written, or the job crashed.
    Failed(String),
}

pub struct WorkerHandle {
    command_tx: Sender<WorkerCommand>,
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for WorkerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerHandle")
            .field("running", &self.thread.is_some())
            .finish()
    }
}

impl WorkerHandle {
    /// Best-effort send. If the worker died, the command is dropped.
    pub fn send(&self, cmd: WorkerCommand) {
        if self.command_tx.send(cmd).is_err() {
            tracing::warn!("worker is gone; command dropped");
        }
    }

    /// Ask the running (or next queued) job to stop before its next file.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// Stop the current job, end the loop and wait for the thread.
    pub fn shutdown(mut self) {
        self.request_stop();
        let _ = self.command_tx.send(WorkerCommand::Shutdown);
        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                tracing::error!("worker thread panicked");
            }
        }
    }
}

/// Spawns the worker thread and returns:
/// - WorkerHandle (store in GUI state)
/// - Receiver<WorkerEvent> (drained by the GUI tick)
pub fn start_worker() -> (WorkerHandle, Receiver<WorkerEvent>) {
    let (command_tx, command_rx) = mpsc::channel::<WorkerCommand>();
    let (event_tx, event_rx) = mpsc::channel::<WorkerEvent>();
    let stop = Arc::new(AtomicBool::new(false));

    let engine_stop = Arc::clone(&stop);
    let thread = thread::Builder::new()
        .name("tagwright-worker".to_string())
        .spawn(move || WorkerEngine::new(event_tx, engine_stop).run(command_rx));

    let thread = match thread {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::error!(error = %e, "could not start worker thread");
            None
        }
    };

    (
        WorkerHandle {
            command_tx,
            stop,
            thread,
        },
        event_rx,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::{flac_bytes, write_fixture};
    use crate::core::types::TagField;
    use std::time::Duration;

    fn next_report(rx: &Receiver<WorkerEvent>) -> WorkerEvent {
        loop {
            match rx.recv_timeout(Duration::from_secs(10)).unwrap() {
                WorkerEvent::Progress { .. } => continue,
                other => return other,
            }
        }
    }

    #[test]
    fn jobs_run_in_order_and_report_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.mp3");
        std::fs::write(&path, vec![0u8; 256]).unwrap();

        let (worker, events) = start_worker();

        worker.send(WorkerCommand::SaveEdits(vec![(
            path.clone(),
            TagEdit::default().with(TagField::Album, "Record"),
        )]));
        worker.send(WorkerCommand::LoadFiles(vec![path.clone()]));

        match next_report(&events) {
            WorkerEvent::Saved(report) => {
                assert_eq!(report.saved, 1);
                assert!(report.errors.is_empty());
            }
            other => panic!("expected Saved, got {other:?}"),
        }
        match next_report(&events) {
            WorkerEvent::Loaded(report) => {
                assert_eq!(report.rows.len(), 1);
                assert_eq!(report.rows[0].tags.get(TagField::Album), Some("Record"));
            }
            other => panic!("expected Loaded, got {other:?}"),
        }

        worker.shutdown();
    }

    #[test]
    fn progress_is_reported_per_file() {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<PathBuf> = (0..3)
            .map(|i| {
                let p = dir.path().join(format!("{i}.mp3"));
                std::fs::write(&p, vec![0u8; 64]).unwrap();
                p
            })
            .collect();

        let (worker, events) = start_worker();
        worker.send(WorkerCommand::LoadFiles(paths));

        let mut progress = Vec::new();
        loop {
            match events.recv_timeout(Duration::from_secs(10)).unwrap() {
                WorkerEvent::Progress { done, total } => progress.push((done, total)),
                WorkerEvent::Loaded(report) => {
                    assert_eq!(report.rows.len(), 3);
                    break;
                }
                other => panic!("unexpected {other:?}"),
            }
        }
        assert_eq!(progress, vec![(1, 3), (2, 3), (3, 3)]);

        worker.shutdown();
    }

    #[test]
    fn stop_pressed_before_a_queued_job_stops_that_job_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.mp3");
        std::fs::write(&path, vec![0u8; 64]).unwrap();

        let (worker, events) = start_worker();
        worker.request_stop();
        worker.send(WorkerCommand::LoadFiles(vec![path.clone()]));
        worker.send(WorkerCommand::LoadFiles(vec![path]));

        match next_report(&events) {
            WorkerEvent::Loaded(report) => {
                assert!(report.stopped);
                assert!(report.rows.is_empty());
            }
            other => panic!("expected Loaded, got {other:?}"),
        }
        match next_report(&events) {
            WorkerEvent::Loaded(report) => {
                assert!(!report.stopped);
                assert_eq!(report.rows.len(), 1);
            }
            other => panic!("expected Loaded, got {other:?}"),
        }

        worker.shutdown();
    }

    #[test]
    fn flac_without_padding_saves_and_the_worker_keeps_going() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(dir.path(), "bare.flac", &flac_bytes(false));

        let (worker, events) = start_worker();
        worker.send(WorkerCommand::SaveEdits(vec![(
            path.clone(),
            TagEdit::default().with(TagField::Title, "Bare"),
        )]));
        worker.send(WorkerCommand::LoadFiles(vec![path]));

        match next_report(&events) {
            WorkerEvent::Saved(report) => {
                assert_eq!(report.saved, 1);
                assert!(report.errors.is_empty());
            }
            other => panic!("expected Saved, got {other:?}"),
        }
        match next_report(&events) {
            WorkerEvent::Loaded(report) => {
                assert_eq!(report.rows[0].tags.get(TagField::Title), Some("Bare"));
            }
            other => panic!("expected Loaded, got {other:?}"),
        }

        worker.shutdown();
    }
}
