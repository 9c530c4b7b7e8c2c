//! core/tags/mp4.rs
//! M4A through lofty's `Ilst`.
//!
//! Text fields and pictures go through the generic `Tag` (see `generic`).
//! Splitting the ilst keeps the atoms a generic tag cannot hold, so they
//! survive a save. BPM lives in the integer `tmpo` atom and is handled here.

use std::borrow::Cow;
use std::fs::File;
use std::path::Path;

use lofty::config::{ParseOptions, WriteOptions};
use lofty::file::AudioFile;
use lofty::mp4::{Atom, AtomData, AtomIdent, Ilst, Mp4File};
use lofty::tag::{MergeTag, SplitTag, Tag, TagExt};

use super::super::error::{Error, Result};
use super::super::types::{TagEdit, TagField, TagSet};
use super::generic;

const TMPO: AtomIdent<'static> = AtomIdent::Fourcc(*b"tmpo");
const BPM_FREEFORM: AtomIdent<'static> = AtomIdent::Freeform {
    mean: Cow::Borrowed("com.apple.iTunes"),
    name: Cow::Borrowed("BPM"),
};

fn open(path: &Path) -> Result<Mp4File> {
    let mut file = File::open(path).map_err(|e| Error::io(path, e))?;
    Ok(Mp4File::read_from(&mut file, ParseOptions::new())?)
}

fn tmpo_of(ilst: &Ilst) -> Option<String> {
    ilst.get(&TMPO)?.data().find_map(|data| match data {
        AtomData::SignedInteger(n) if *n > 0 => Some(n.to_string()),
        AtomData::UnsignedInteger(n) if *n > 0 => Some(n.to_string()),
        AtomData::UTF8(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    })
}

/// Whole-number tempo for `tmpo`; fractional values are rounded.
fn parse_tempo(raw: &str) -> Option<i32> {
    let value = raw.trim().parse::<f64>().ok()?;
    (value.is_finite() && value >= 1.0 && value <= f64::from(u16::MAX))
        .then(|| value.round() as i32)
}

/// Returns (tags, has_art, duration_ms).
pub(super) fn read_tags(path: &Path) -> Result<(TagSet, bool, Option<u64>)> {
    let file = open(path)?;
    let ms = file.properties().duration().as_millis();
    let duration_ms = (ms > 0).then(|| ms as u64);

    let Some(ilst) = file.ilst() else {
        return Ok((TagSet::default(), false, duration_ms));
    };

    let tempo = tmpo_of(ilst);
    let tag: Tag = ilst.clone().into();
    let mut tags = generic::tagset_from_tag(&tag);
    if tags.get(TagField::Bpm).is_none() {
        if let Some(bpm) = tempo {
            tags.set(TagField::Bpm, bpm);
        }
    }

    Ok((tags, !tag.pictures().is_empty(), duration_ms))
}

fn write_bpm(ilst: &mut Ilst, value: Option<&str>) {
    let _ = ilst.remove(&TMPO);
    let _ = ilst.remove(&BPM_FREEFORM);

    let Some(raw) = value.map(str::trim).filter(|s| !s.is_empty()) else {
        return;
    };
    match parse_tempo(raw) {
        Some(n) => ilst.replace_atom(Atom::new(TMPO, AtomData::SignedInteger(n))),
        None => ilst.replace_atom(Atom::new(BPM_FREEFORM, AtomData::UTF8(raw.to_string()))),
    }
}

/// Apply the edit to an ilst. Atoms outside the edit are kept.
fn apply_edit_to_ilst(ilst: Ilst, edit: &TagEdit) -> Result<Ilst> {
    let mut text_edit = edit.clone();
    let bpm = text_edit.fields.remove(&TagField::Bpm);

    let (remainder, mut tag) = ilst.split_tag();
    generic::apply_edit_to_tag(&mut tag, &text_edit)?;
    let mut ilst = remainder.merge_tag(tag);

    if let Some(value) = bpm {
        write_bpm(&mut ilst, value.as_deref());
    }
    Ok(ilst)
}

pub(super) fn write_edit(path: &Path, edit: &TagEdit) -> Result<()> {
    let mut file = open(path)?;
    let ilst = apply_edit_to_ilst(file.remove_ilst().unwrap_or_default(), edit)?;
    ilst.save_to_path(path, WriteOptions::default())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tempo_atom(ilst: &Ilst) -> Option<&AtomData> {
        ilst.get(&TMPO).and_then(|a| a.data().next())
    }

    #[test]
    fn integer_tempo_is_read_as_bpm() {
        let mut ilst = Ilst::new();
        ilst.insert(Atom::new(TMPO, AtomData::SignedInteger(120)));
        assert_eq!(tmpo_of(&ilst).as_deref(), Some("120"));

        let mut ilst = Ilst::new();
        ilst.insert(Atom::new(TMPO, AtomData::SignedInteger(0)));
        assert_eq!(tmpo_of(&ilst), None);
    }

    #[test]
    fn bpm_edit_writes_integer_tempo_and_keeps_other_atoms() {
        let mut ilst = Ilst::new();
        ilst.insert(Atom::new(
            BPM_FREEFORM,
            AtomData::UTF8("90".to_string()),
        ));
        ilst.insert(Atom::new(
            AtomIdent::Fourcc(*b"rtng"),
            AtomData::SignedInteger(1),
        ));

        let edit = TagEdit::default()
            .with(TagField::Bpm, "128.4")
            .with(TagField::Title, "Song");
        let ilst = apply_edit_to_ilst(ilst, &edit).unwrap();

        assert_eq!(tempo_atom(&ilst), Some(&AtomData::SignedInteger(128)));
        assert!(ilst.get(&BPM_FREEFORM).is_none());
        assert!(ilst.get(&AtomIdent::Fourcc(*b"rtng")).is_some());

        let tag: Tag = ilst.into();
        assert_eq!(generic::tagset_from_tag(&tag).get(TagField::Title), Some("Song"));
    }

    #[test]
    fn blank_bpm_removes_tempo_and_text_bpm_goes_freeform() {
        let mut ilst = Ilst::new();
        ilst.insert(Atom::new(TMPO, AtomData::SignedInteger(100)));

        let cleared = apply_edit_to_ilst(ilst, &TagEdit::default().with(TagField::Bpm, "")).unwrap();
        assert!(cleared.get(&TMPO).is_none());

        let text = apply_edit_to_ilst(cleared, &TagEdit::default().with(TagField::Bpm, "fast"))
            .unwrap();
        assert!(text.get(&TMPO).is_none());
        assert_eq!(
            text.get(&BPM_FREEFORM).and_then(|a| a.data().next()),
            Some(&AtomData::UTF8("fast".to_string()))
        );
    }

    #[test]
    fn edits_without_bpm_leave_tempo_alone() {
        let mut ilst = Ilst::new();
        ilst.insert(Atom::new(TMPO, AtomData::SignedInteger(140)));

        let ilst = apply_edit_to_ilst(ilst, &TagEdit::default().with(TagField::Album, "A")).unwrap();
        assert_eq!(tempo_atom(&ilst), Some(&AtomData::SignedInteger(140)));
    }
}
