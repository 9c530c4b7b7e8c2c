//! GUI state + messages.
//! Pure data definitions used by update + view.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use iced::keyboard::Modifiers;
use iced::widget::image::Handle;
use iced::{Point, Size, window};

use crate::config::{Settings, WindowGeometry};
use crate::core::types::{ArtChange, CoverArt, TagField, TrackId, TrackRow};
use crate::core::worker::{WorkerEvent, WorkerHandle, start_worker};
use crate::musicbrainz::submit::{ReleaseType, SubmissionDraft};
use crate::musicbrainz::{ClientConfig, MusicBrainzClient, Release, ReleaseSummary};

use super::help;

/// What the right-hand area shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Panel {
    Editor,
    Search,
    Submit,
    Rename,
    Setup,
}

/// Destructive actions wait for a yes/no.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfirmAction {
    RemoveSelected,
    ClearAll,
    DeleteArt,
}

impl ConfirmAction {
    pub(crate) fn question(self, selected: usize) -> String {
        match self {
            ConfirmAction::RemoveSelected => {
                format!("Remove {selected} selected file(s) from the list?")
            }
            ConfirmAction::ClearAll => "Remove all files from the list?".to_string(),
            ConfirmAction::DeleteArt => {
                "Delete the album art? It is removed from the file(s) on save.".to_string()
            }
        }
    }
}

/// Which worker job is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum JobKind {
    Loading,
    Saving,
    Applying,
    Renaming,
}

impl JobKind {
    pub(crate) fn label(self) -> &'static str {
        match self {
            JobKind::Loading => "Loading files",
            JobKind::Saving => "Saving",
            JobKind::Applying => "Applying release",
            JobKind::Renaming => "Renaming",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MoveDir {
    Up,
    Down,
}

/// Editable field values for the current selection.
///
/// Single selection: every field shown and written.
/// Batch selection: values start empty and only `apply` fields are written.
#[derive(Debug, Default, Clone)]
pub(crate) struct EditorDraft {
    pub values: BTreeMap<TagField, String>,
    pub apply: BTreeSet<TagField>,
    pub batch: bool,
    pub art: Option<ArtChange>,
    pub dirty: bool,
}

impl EditorDraft {
    pub(crate) fn value(&self, field: TagField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }
}

/// Search panel state.
#[derive(Debug, Default, Clone)]
pub(crate) struct SearchState {
    pub artist: String,
    pub album: String,
    pub results: Vec<ReleaseSummary>,
    pub selected: Option<usize>,
    pub searching: bool,
    pub fetching: bool,
    /// Shown under the result list ("No results found..." or an error).
    pub message: Option<String>,
}

/// App state
pub(crate) struct Tagwright {
    pub settings: Settings,

    pub status: String,
    /// Hover help line.
    pub info: &'static str,

    // File list (display order)
    pub tracks: Vec<TrackRow>,
    pub next_id: TrackId,

    // Selection
    pub selected: BTreeSet<TrackId>,
    pub anchor: Option<TrackId>,
    pub modifiers: Modifiers,

    // Right-hand area
    pub panel: Panel,
    pub editor: EditorDraft,
    pub cover_cache: HashMap<TrackId, Handle>,
    pub confirm: Option<ConfirmAction>,

    // Worker
    pub worker: Option<WorkerHandle>,
    pub worker_events: Option<Receiver<WorkerEvent>>,
    pub busy: Option<JobKind>,
    pub progress: Option<(usize, usize)>,
    /// Dropped paths waiting for the next tick (drops arrive one event per file).
    pub pending_drops: Vec<PathBuf>,

    // MusicBrainz
    pub mb_client: Option<MusicBrainzClient>,
    pub search: SearchState,
    pub submit: SubmissionDraft,

    // Rename + setup
    pub rename_input: String,
    pub setup_email: String,

    // Tracked for saving on close
    pub window: WindowGeometry,
}

impl Tagwright {
    pub(crate) fn new(settings: Settings) -> Self {
        let (worker, events) = start_worker();

        let mb_client = settings.contact().and_then(|email| {
            ClientConfig::new(email)
                .and_then(MusicBrainzClient::new)
                .map_err(|e| tracing::warn!(error = %e, "MusicBrainz disabled"))
                .ok()
        });

        let panel = if settings.contact().is_some() {
            Panel::Editor
        } else {
            Panel::Setup
        };

        Self {
            status: "Load files or drop them onto the window.".to_string(),
            info: help::IDLE,

            tracks: Vec::new(),
            next_id: 1,

            selected: BTreeSet::new(),
            anchor: None,
            modifiers: Modifiers::default(),

            panel,
            editor: EditorDraft::default(),
            cover_cache: HashMap::new(),
            confirm: None,

            worker: Some(worker),
            worker_events: Some(events),
            busy: None,
            progress: None,
            pending_drops: Vec::new(),

            mb_client,
            search: SearchState::default(),
            submit: SubmissionDraft::default(),

            rename_input: settings.rename_pattern.clone(),
            setup_email: settings.contact_email.clone().unwrap_or_default(),

            window: settings.window.clone(),
            settings,
        }
    }

    pub(crate) fn track_by_id(&self, id: TrackId) -> Option<&TrackRow> {
        self.tracks.iter().find(|t| t.id == Some(id))
    }

    pub(crate) fn index_of_id(&self, id: TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == Some(id))
    }

    pub(crate) fn is_selected(&self, row: &TrackRow) -> bool {
        row.id.is_some_and(|id| self.selected.contains(&id))
    }

    /// Selected rows in list order.
    pub(crate) fn selected_rows(&self) -> Vec<&TrackRow> {
        self.tracks.iter().filter(|t| self.is_selected(t)).collect()
    }

    pub(crate) fn selected_paths(&self) -> Vec<PathBuf> {
        self.selected_rows().into_iter().map(|t| t.path.clone()).collect()
    }

    /// The one selected row, when exactly one is selected.
    pub(crate) fn single_selected(&self) -> Option<&TrackRow> {
        if self.selected.len() != 1 {
            return None;
        }
        let id = *self.selected.iter().next()?;
        self.track_by_id(id)
    }

    pub(crate) fn musicbrainz_enabled(&self) -> bool {
        self.mb_client.is_some()
    }

    pub(crate) fn can_apply_release(&self) -> bool {
        self.busy.is_none()
            && !self.search.fetching
            && self.search.selected.is_some()
            && !self.selected.is_empty()
    }

    /// Art shown in the editor: staged replacement, nothing when removal is
    /// staged, else the cached embedded art of a single selection.
    pub(crate) fn art_preview(&self) -> Option<Handle> {
        match &self.editor.art {
            Some(ArtChange::Replace(art)) => Some(Handle::from_bytes(art.data.clone())),
            Some(ArtChange::Remove) => None,
            None => self
                .single_selected()
                .and_then(|t| t.id)
                .and_then(|id| self.cover_cache.get(&id).cloned()),
        }
    }
}

/// Message = "something happened".
#[derive(Debug, Clone)]
pub(crate) enum Message {
    /// Worker polling + queued drops.
    Tick,

    // Window
    FileDropped(PathBuf),
    WindowResized(Size),
    WindowMoved(Point),
    CloseRequested(window::Id),
    ModifiersChanged(Modifiers),

    // Hover help
    Hover(&'static str),
    HoverEnd,

    // File list
    LoadFilesPressed,
    FilesPicked(Vec<PathBuf>),
    RowClicked(TrackId),
    MoveSelection(MoveDir),
    RemoveSelectedPressed,
    ClearAllPressed,
    ConfirmYes,
    ConfirmNo,
    StopJob,

    // Editor
    ShowPanel(Panel),
    FieldChanged(TagField, String),
    ApplyToggled(TagField, bool),
    SaveEdits,
    RevertEdits,
    ChangeArtPressed,
    ArtPicked(Option<PathBuf>),
    ArtPrepared(Result<CoverArt, String>),
    DeleteArtPressed,
    CoverLoaded(TrackId, Option<Handle>),

    // Search
    SearchArtistChanged(String),
    SearchAlbumChanged(String),
    RunSearch,
    SearchFinished(Result<Vec<ReleaseSummary>, String>),
    ResultSelected(usize),
    ApplyRelease,
    ReleaseFetched(Result<(Release, Option<CoverArt>), String>),

    // Submit
    SubmitArtistChanged(String),
    SubmitTitleChanged(String),
    SubmitDateChanged(String),
    SubmitTypeChanged(ReleaseType),
    SubmitTrackTitleChanged(usize, String),
    OpenReleaseEditor,
    ReleaseEditorOpened(Result<PathBuf, String>),

    // Rename
    RenamePatternChanged(String),
    RunRename,

    // Setup
    SetupEmailChanged(String),
    SaveContactEmail,
    SkipSetup,
}
