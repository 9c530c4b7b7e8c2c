//! Pattern-based file renaming.
//!
//! Placeholders: `%artist%`, `%album%`, `%title%`, `%track%`, `%year%`.
//! Missing tags fall back to `N_A` (text), `0000` (year) and `00` (track).

use std::path::{Path, PathBuf};

use super::error::{Error, Result};
use super::tags::util::number_part;
use super::types::{TagField, TagSet, TrackRow};

pub const DEFAULT_PATTERN: &str = "%artist% - %title%";

/// Shown next to the pattern input.
pub const PLACEHOLDER_LEGEND: &str = "%artist%, %album%, %title%, %track%, %year%";

const FORBIDDEN: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

fn or_default<'a>(tags: &'a TagSet, field: TagField, default: &'a str) -> &'a str {
    tags.get(field).unwrap_or(default)
}

/// Two-digit track number from "n" or "n/total".
fn track_token(tags: &TagSet) -> String {
    match tags.get(TagField::TrackNumber).map(number_part) {
        Some(n) if !n.is_empty() => format!("{n:0>2}"),
        _ => "00".to_string(),
    }
}

/// Substitute placeholders and strip characters that are not allowed in file names.
pub fn expand_pattern(pattern: &str, tags: &TagSet) -> String {
    let expanded = pattern
        .replace("%artist%", or_default(tags, TagField::Artist, "N_A"))
        .replace("%album%", or_default(tags, TagField::Album, "N_A"))
        .replace("%title%", or_default(tags, TagField::Title, "N_A"))
        .replace("%track%", &track_token(tags))
        .replace("%year%", or_default(tags, TagField::Year, "0000"));

    expanded
        .chars()
        .filter(|c| !FORBIDDEN.contains(c) && !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Target path for `row` under `pattern`, in the same folder with the same extension.
/// `Ok(None)` means the name would not change.
pub fn plan_rename(row: &TrackRow, pattern: &str) -> Result<Option<PathBuf>> {
    let stem = expand_pattern(pattern, &row.tags);
    if stem.is_empty() || stem.chars().all(|c| c == '.') {
        return Err(Error::Rename {
            from: row.path.clone(),
            to: PathBuf::from(&stem),
            reason: "pattern produced an empty file name".to_string(),
        });
    }

    let file_name = match row.path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem,
    };
    let target = row.path.with_file_name(file_name);

    if target == row.path {
        Ok(None)
    } else {
        Ok(Some(target))
    }
}

/// Rename on disk. Never overwrites another file.
pub fn rename_file(from: &Path, to: &Path) -> Result<()> {
    if to.exists() {
        return Err(Error::Rename {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            reason: "a file with that name already exists".to_string(),
        });
    }

    std::fs::rename(from, to).map_err(|e| Error::Rename {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::AudioFormat;

    fn row(path: &str, tags: &[(TagField, &str)]) -> TrackRow {
        let mut set = TagSet::default();
        for (f, v) in tags {
            set.set(*f, *v);
        }
        TrackRow {
            id: Some(1),
            path: PathBuf::from(path),
            format: AudioFormat::from_path(Path::new(path)).unwrap(),
            tags: set,
            duration_ms: None,
            has_art: false,
            dirty: false,
        }
    }

    #[test]
    fn expands_every_placeholder() {
        let r = row(
            "/m/x.mp3",
            &[
                (TagField::Artist, "Band"),
                (TagField::Album, "Record"),
                (TagField::Title, "Song"),
                (TagField::TrackNumber, "3/12"),
                (TagField::Year, "1999"),
            ],
        );
        assert_eq!(
            expand_pattern("%track%. %artist% - %album% (%year%) - %title%", &r.tags),
            "03. Band - Record (1999) - Song"
        );
    }

    #[test]
    fn missing_tags_use_defaults() {
        let r = row("/m/x.mp3", &[]);
        assert_eq!(
            expand_pattern("%track% %artist% %album% %title% %year%", &r.tags),
            "00 N_A N_A N_A 0000"
        );
    }

    #[test]
    fn forbidden_characters_are_stripped() {
        let r = row("/m/x.flac", &[(TagField::Artist, "AC/DC"), (TagField::Title, "What?*")]);
        assert_eq!(expand_pattern(DEFAULT_PATTERN, &r.tags), "ACDC - What");
    }

    #[test]
    fn plan_keeps_folder_and_extension() {
        let r = row("/m/old.flac", &[(TagField::Artist, "A"), (TagField::Title, "B")]);
        assert_eq!(
            plan_rename(&r, DEFAULT_PATTERN).unwrap(),
            Some(PathBuf::from("/m/A - B.flac"))
        );
    }

    #[test]
    fn plan_skips_unchanged_and_refuses_empty() {
        let r = row("/m/A - B.ogg", &[(TagField::Artist, "A"), (TagField::Title, "B")]);
        assert_eq!(plan_rename(&r, DEFAULT_PATTERN).unwrap(), None);

        assert!(matches!(plan_rename(&r, "???"), Err(Error::Rename { .. })));
    }

    #[test]
    fn rename_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.mp3");
        let b = dir.path().join("b.mp3");
        std::fs::write(&a, b"a").unwrap();
        std::fs::write(&b, b"b").unwrap();

        assert!(rename_file(&a, &b).is_err());
        assert_eq!(std::fs::read(&b).unwrap(), b"b");

        let c = dir.path().join("c.mp3");
        rename_file(&a, &c).unwrap();
        assert!(!a.exists());
        assert_eq!(std::fs::read(&c).unwrap(), b"a");
    }
}
