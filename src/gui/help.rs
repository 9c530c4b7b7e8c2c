//! One-line help shown in the info line while hovering a control.

use crate::core::types::TagField;

pub(crate) const IDLE: &str = "Hover over a control to see what it does.";

pub(crate) const LOAD: &str = "Load one or more audio files for editing.";
pub(crate) const SEARCH: &str =
    "Search for a release in the MusicBrainz database to automatically fetch tags.";
pub(crate) const SUBMIT: &str =
    "Submit metadata for your files to MusicBrainz for community review.";
pub(crate) const RENAME: &str = "Rename the selected files from their tags using a pattern.";
pub(crate) const FILE_LIST: &str = "The loaded files. Ctrl-click or Shift-click to select several for batch editing; use Move up/down to reorder.";
pub(crate) const REMOVE: &str = "Remove selected files from the list.";
pub(crate) const CLEAR: &str = "Remove all files from the current list.";
pub(crate) const MOVE: &str = "Move the selected files up or down in the list.";
pub(crate) const SAVE: &str = "Save metadata changes and album art to the audio file.";
pub(crate) const ART: &str = "Displays the album art. If there is none, you can add one.";
pub(crate) const CHANGE_ART: &str = "Select an image from your computer to use as the album art.";
pub(crate) const DELETE_ART: &str = "Delete the album art from the audio file.";
pub(crate) const STOP: &str = "Stop the running job after the current file.";
pub(crate) const SETTINGS: &str = "Set the contact email MusicBrainz requests are sent with.";
pub(crate) const APPLY: &str =
    "Write the selected release's tags and cover to the selected files, in file name order.";
pub(crate) const RELEASE_EDITOR: &str =
    "Open the MusicBrainz release editor in your browser, pre-filled with this draft.";

pub(crate) fn field_help(field: TagField) -> &'static str {
    match field {
        TagField::Title => "Enter the song title.",
        TagField::Artist => "Enter the name of the main artist.",
        TagField::Album => "Enter the album name.",
        TagField::AlbumArtist => "Enter the album artist name (useful for compilations).",
        TagField::Year => "Enter the year of release.",
        TagField::Genre => "Enter the musical genre.",
        TagField::TrackNumber => "Enter the track number.",
        TagField::Composer => "Enter the composer of the track.",
        TagField::Producer => "Enter the producer of the track.",
        TagField::Copyright => "Enter the copyright information.",
        TagField::Comment => "Add a comment or personal note to the file.",
        TagField::Bpm => "Enter the beats per minute (BPM).",
        TagField::Isrc => "Enter the International Standard Recording Code (ISRC).",
        TagField::CatalogNumber => "Enter the record label's catalog number.",
    }
}
