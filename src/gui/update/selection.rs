//! gui/update/selection.rs
//!
//! File-list selection.
//!
//! - All selection is keyed by `TrackId` (stable), not `Vec` indices.
//! - Click selects one, Ctrl/Cmd-click toggles, Shift-click selects a range
//!   from the anchor (the last plain or toggled click).

use std::collections::BTreeSet;

use iced::Task;
use iced::keyboard::Modifiers;

use super::super::state::{Message, Tagwright};
use super::art::maybe_load_cover;
use super::editor::load_editor_from_selection;
use crate::core::types::TrackId;

/// New (selection, anchor) after clicking `clicked`.
pub(crate) fn compute_selection(
    order: &[TrackId],
    current: &BTreeSet<TrackId>,
    anchor: Option<TrackId>,
    clicked: TrackId,
    toggle: bool,
    range: bool,
) -> (BTreeSet<TrackId>, Option<TrackId>) {
    if range {
        let from = anchor.and_then(|a| order.iter().position(|&id| id == a));
        let to = order.iter().position(|&id| id == clicked);

        if let (Some(from), Some(to)) = (from, to) {
            let (lo, hi) = if from <= to { (from, to) } else { (to, from) };
            let mut next: BTreeSet<TrackId> = if toggle {
                current.clone()
            } else {
                BTreeSet::new()
            };
            next.extend(order[lo..=hi].iter().copied());
            return (next, anchor);
        }
    }

    if toggle {
        let mut next = current.clone();
        if !next.remove(&clicked) {
            next.insert(clicked);
        }
        return (next, Some(clicked));
    }

    (BTreeSet::from([clicked]), Some(clicked))
}

pub(crate) fn modifiers_changed(state: &mut Tagwright, mods: Modifiers) -> Task<Message> {
    state.modifiers = mods;
    Task::none()
}

pub(crate) fn row_clicked(state: &mut Tagwright, id: TrackId) -> Task<Message> {
    if state.index_of_id(id).is_none() {
        return Task::none();
    }

    let order: Vec<TrackId> = state.tracks.iter().filter_map(|t| t.id).collect();
    let (selected, anchor) = compute_selection(
        &order,
        &state.selected,
        state.anchor,
        id,
        state.modifiers.command(),
        state.modifiers.shift(),
    );
    state.selected = selected;
    state.anchor = anchor;

    selection_changed(state)
}

/// Refresh everything that depends on the selection.
pub(crate) fn selection_changed(state: &mut Tagwright) -> Task<Message> {
    state.confirm = None;
    load_editor_from_selection(state);

    match state.single_selected().and_then(|t| t.id) {
        Some(id) => maybe_load_cover(state, id),
        None => Task::none(),
    }
}

/// Drop ids that are no longer in the list.
pub(crate) fn prune_selection(state: &mut Tagwright) {
    let live: BTreeSet<TrackId> = state.tracks.iter().filter_map(|t| t.id).collect();
    state.selected.retain(|id| live.contains(id));
    if state.anchor.is_some_and(|a| !live.contains(&a)) {
        state.anchor = None;
    }
    state.cover_cache.retain(|id, _| live.contains(id));
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDER: [TrackId; 5] = [10, 11, 12, 13, 14];

    fn set(ids: &[TrackId]) -> BTreeSet<TrackId> {
        ids.iter().copied().collect()
    }

    #[test]
    fn plain_click_selects_only_clicked() {
        let (sel, anchor) = compute_selection(&ORDER, &set(&[10, 11]), Some(10), 13, false, false);
        assert_eq!(sel, set(&[13]));
        assert_eq!(anchor, Some(13));
    }

    #[test]
    fn toggle_click_adds_and_removes() {
        let (sel, anchor) = compute_selection(&ORDER, &set(&[10]), Some(10), 12, true, false);
        assert_eq!(sel, set(&[10, 12]));
        assert_eq!(anchor, Some(12));

        let (sel, _) = compute_selection(&ORDER, &sel, anchor, 10, true, false);
        assert_eq!(sel, set(&[12]));
    }

    #[test]
    fn shift_click_selects_range_in_list_order() {
        let (sel, anchor) = compute_selection(&ORDER, &set(&[13]), Some(13), 11, false, true);
        assert_eq!(sel, set(&[11, 12, 13]));
        assert_eq!(anchor, Some(13));

        // Ctrl+Shift keeps what was already selected.
        let (sel, _) = compute_selection(&ORDER, &set(&[10]), Some(12), 14, true, true);
        assert_eq!(sel, set(&[10, 12, 13, 14]));
    }

    #[test]
    fn shift_click_without_anchor_acts_like_click() {
        let (sel, anchor) = compute_selection(&ORDER, &BTreeSet::new(), None, 12, false, true);
        assert_eq!(sel, set(&[12]));
        assert_eq!(anchor, Some(12));
    }
}
