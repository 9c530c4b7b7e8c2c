//! core/worker/engine.rs
//! Worker loop: one command at a time, events back over a channel.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender};

use super::super::batch;
use super::{WorkerCommand, WorkerEvent};

pub(super) struct WorkerEngine {
    event_tx: Sender<WorkerEvent>,
    stop: Arc<AtomicBool>,
}

impl WorkerEngine {
    pub(super) fn new(event_tx: Sender<WorkerEvent>, stop: Arc<AtomicBool>) -> Self {
        Self { event_tx, stop }
    }

    pub(super) fn run(&mut self, command_rx: Receiver<WorkerCommand>) {
        // Ends on Shutdown or when the GUI drops its handle.
        while let Ok(cmd) = command_rx.recv() {
            if self.handle_command(cmd) {
                break;
            }
        }
        tracing::debug!("worker stopped");
    }

    fn emit(&self, event: WorkerEvent) {
        let _ = self.event_tx.send(event);
    }

    /// Returns true when the loop should end.
    fn handle_command(&mut self, cmd: WorkerCommand) -> bool {
        if matches!(cmd, WorkerCommand::Shutdown) {
            return true;
        }

        let event = match run_guarded(|| self.run_job(cmd)) {
            Ok(event) => event,
            Err(reason) => {
                tracing::error!(%reason, "worker job panicked");
                WorkerEvent::Failed(format!("The job stopped unexpectedly: {reason}"))
            }
        };

        // A stop request covers the job that was running or waiting to run.
        self.stop.store(false, Ordering::Relaxed);

        self.emit(event);
        false
    }

    fn run_job(&self, cmd: WorkerCommand) -> WorkerEvent {
        let tx = self.event_tx.clone();
        let mut progress = move |done: usize, total: usize| {
            let _ = tx.send(WorkerEvent::Progress { done, total });
        };
        let stop = self.stop.as_ref();

        match cmd {
            WorkerCommand::LoadFiles(paths) => {
                WorkerEvent::Loaded(batch::load_files(paths, &mut progress, stop))
            }
            WorkerCommand::SaveEdits(jobs) => {
                WorkerEvent::Saved(batch::save_edits(jobs, &mut progress, stop))
            }
            WorkerCommand::ApplyRelease {
                paths,
                release,
                cover,
            } => match batch::apply_release(paths, &release, cover, &mut progress, stop) {
                Ok(report) => WorkerEvent::Saved(report),
                Err(e) => WorkerEvent::Failed(e.to_string()),
            },
            WorkerCommand::RenameFiles { paths, pattern } => {
                WorkerEvent::Renamed(batch::rename_files(paths, &pattern, &mut progress, stop))
            }
            WorkerCommand::Shutdown => WorkerEvent::Failed("worker is shutting down".to_string()),
        }
    }
}

/// Run one job. A panic comes back as its message and the loop keeps running.
fn run_guarded<T>(job: impl FnOnce() -> T) -> Result<T, String> {
    panic::catch_unwind(AssertUnwindSafe(job)).map_err(|payload| panic_message(payload.as_ref()))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        return (*s).to_string();
    }
    match payload.downcast_ref::<String>() {
        Some(s) => s.clone(),
        None => "unknown panic".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_inside_a_job_becomes_an_error() {
        assert_eq!(run_guarded(|| 7), Ok(7));
        assert_eq!(
            run_guarded(|| -> u32 { panic!("index out of range") }),
            Err("index out of range".to_string())
        );

        let code = 3;
        assert_eq!(
            run_guarded(|| -> u32 { panic!("bad block {code}") }),
            Err("bad block 3".to_string())
        );
    }
}
