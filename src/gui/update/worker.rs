//! gui/update/worker.rs
//! GUI <-> worker bridge
//!
//! - Jobs go out as `WorkerCommand`s; only one runs at a time (`busy`).
//! - Results come back as `WorkerEvent`s, drained on `Message::Tick`.
//! - Rows keep their `TrackId` across save/rename; the path is the join key.

use std::path::PathBuf;
use std::sync::mpsc::TryRecvError;

use iced::Task;

use super::super::state::{JobKind, Message, Tagwright};
use super::art::maybe_load_cover;
use super::editor::load_editor_from_selection;
use super::selection::selection_changed;
use crate::core::batch::{LoadReport, RenameReport, SaveReport};
use crate::core::formats::{expand_dropped, filter_new_paths};
use crate::core::worker::{WorkerCommand, WorkerEvent, start_worker};

/// Send a job if nothing else is running. Returns whether it was sent.
pub(crate) fn start_job(state: &mut Tagwright, kind: JobKind, cmd: WorkerCommand) -> bool {
    if let Some(running) = state.busy {
        state.status = format!("{} is still running.", running.label());
        return false;
    }

    let Some(worker) = &state.worker else {
        state.status = "Background worker is not running.".to_string();
        return false;
    };

    worker.send(cmd);
    state.busy = Some(kind);
    state.progress = Some((0, 0));
    state.confirm = None;
    true
}

/// Load paths that are not in the list yet.
pub(crate) fn start_load(state: &mut Tagwright, paths: Vec<PathBuf>) {
    let existing: Vec<PathBuf> = state.tracks.iter().map(|t| t.path.clone()).collect();
    let new_paths = filter_new_paths(paths, &existing);

    if new_paths.is_empty() {
        state.status = "No new supported files to load.".to_string();
        return;
    }

    let count = new_paths.len();
    if start_job(state, JobKind::Loading, WorkerCommand::LoadFiles(new_paths)) {
        state.status = format!("Loading {count} file(s)...");
    }
}

pub(crate) fn stop_job(state: &mut Tagwright) -> Task<Message> {
    if state.busy.is_none() {
        return Task::none();
    }
    if let Some(worker) = &state.worker {
        worker.request_stop();
        state.status = "Stopping after the current file...".to_string();
    }
    Task::none()
}

pub(crate) fn tick(state: &mut Tagwright) -> Task<Message> {
    let mut drained: Vec<WorkerEvent> = Vec::new();
    let mut worker_gone = false;
    if let Some(rx) = &state.worker_events {
        loop {
            match rx.try_recv() {
                Ok(ev) => drained.push(ev),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    worker_gone = true;
                    break;
                }
            }
        }
    }

    let mut tasks = Vec::new();
    for ev in drained {
        tasks.push(handle_event(state, ev));
    }

    if worker_gone {
        restart_worker(state);
    }

    if state.busy.is_none() && !state.pending_drops.is_empty() {
        let dropped = std::mem::take(&mut state.pending_drops);
        start_load(state, expand_dropped(dropped));
    }

    Task::batch(tasks)
}

/// The worker thread ended without reporting back. Fail the running job and
/// start a fresh worker.
fn restart_worker(state: &mut Tagwright) {
    tracing::error!(job = ?state.busy, "background worker stopped; restarting");

    if let Some(old) = state.worker.take() {
        old.shutdown();
    }
    let (worker, events) = start_worker();
    state.worker = Some(worker);
    state.worker_events = Some(events);

    state.status = match state.busy {
        Some(kind) => format!(
            "{} failed: the background worker stopped. Please try again.",
            kind.label()
        ),
        None => "The background worker stopped and was restarted.".to_string(),
    };
    finish_job(state);
}

fn handle_event(state: &mut Tagwright, ev: WorkerEvent) -> Task<Message> {
    match ev {
        WorkerEvent::Progress { done, total } => {
            state.progress = Some((done, total));
            Task::none()
        }
        WorkerEvent::Loaded(report) => {
            finish_job(state);
            files_loaded(state, report)
        }
        WorkerEvent::Saved(report) => {
            let kind = state.busy;
            finish_job(state);
            files_saved(state, report, kind)
        }
        WorkerEvent::Renamed(report) => {
            finish_job(state);
            files_renamed(state, report)
        }
        WorkerEvent::Failed(reason) => {
            finish_job(state);
            tracing::warn!(%reason, "worker job failed");
            state.status = reason;
            Task::none()
        }
    }
}

fn finish_job(state: &mut Tagwright) {
    state.busy = None;
    state.progress = None;
}

fn outcome_suffix(errors: &[String], stopped: bool) -> String {
    let mut out = String::new();
    if stopped {
        out.push_str(" Stopped.");
    }
    match errors.len() {
        0 => {}
        1 => out.push_str(&format!(" Failed: {}", errors[0])),
        n => out.push_str(&format!(" {n} failed (first: {}).", errors[0])),
    }
    out
}

fn files_loaded(state: &mut Tagwright, report: LoadReport) -> Task<Message> {
    let loaded = report.rows.len();

    for mut row in report.rows {
        row.id = Some(state.next_id);
        state.next_id += 1;
        state.tracks.push(row);
    }

    state.status = format!(
        "Loaded {loaded} file(s).{}",
        outcome_suffix(&report.errors, report.stopped)
    );
    Task::none()
}

fn files_saved(state: &mut Tagwright, report: SaveReport, kind: Option<JobKind>) -> Task<Message> {
    for fresh in report.rows {
        if let Some(row) = state.tracks.iter_mut().find(|t| t.path == fresh.path) {
            let id = row.id;
            *row = fresh;
            row.id = id;
            if let Some(id) = id {
                state.cover_cache.remove(&id);
            }
        }
    }

    let verb = match kind {
        Some(JobKind::Applying) => "Applied release to",
        _ => "Saved",
    };
    state.status = format!(
        "{verb} {}/{} file(s).{}",
        report.saved,
        report.total,
        outcome_suffix(&report.errors, report.stopped)
    );

    load_editor_from_selection(state);
    match state.single_selected().and_then(|t| t.id) {
        Some(id) => maybe_load_cover(state, id),
        None => Task::none(),
    }
}

fn files_renamed(state: &mut Tagwright, report: RenameReport) -> Task<Message> {
    let renamed = report.renamed.len();

    for (from, fresh) in report.renamed {
        if let Some(row) = state.tracks.iter_mut().find(|t| t.path == from) {
            let id = row.id;
            *row = fresh;
            row.id = id;
        }
    }

    state.status = format!(
        "Renamed {renamed} file(s), {} unchanged.{}",
        report.unchanged,
        outcome_suffix(&report.errors, report.stopped)
    );
    selection_changed(state)
}
