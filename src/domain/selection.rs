//! Multi-select helpers shared by the checkbox-style steps.
//!
//! [`normalize`] is what the bundled front ends use, through
//! `FormData::normalize_selections`. [`toggle`] and [`toggle_from_silhouette`]
//! are per-click operations for front ends that report individual picks,
//! such as a body silhouette.

use super::options::{Choice, ProblemArea};

/// Toggles `item` in a multi-select answer.
///
/// Picking the "none" sentinel clears every other selection; picking any
/// other item removes the sentinel.
pub fn toggle<T: Choice>(selection: &mut Vec<T>, item: T) {
    if item.is_none_sentinel() {
        if selection.len() == 1 && selection[0] == item {
            selection.clear();
        } else {
            selection.clear();
            selection.push(item);
        }
        return;
    }

    selection.retain(|existing| !existing.is_none_sentinel());
    if let Some(position) = selection.iter().position(|existing| *existing == item) {
        selection.remove(position);
    } else {
        selection.push(item);
    }
}

/// Replaces a whole multi-select answer, applying the same "none" rule.
///
/// Used when a front end hands over a complete list at once rather than
/// individual clicks.
pub fn normalize<T: Choice>(items: Vec<T>) -> Vec<T> {
    let mut selection = Vec::with_capacity(items.len());
    for item in items {
        if selection.contains(&item) {
            continue;
        }
        if item.is_none_sentinel() {
            return vec![item];
        }
        selection.push(item);
    }
    selection
}

/// Toggle triggered from the body silhouette: front and back thighs share a
/// region on the figure, so they always switch together and end in the same
/// state.
pub fn toggle_from_silhouette(areas: &mut Vec<ProblemArea>, area: ProblemArea) {
    let Some(partner) = thigh_partner(area) else {
        toggle(areas, area);
        return;
    };

    let select = !areas.contains(&area);
    for target in [area, partner] {
        let present = areas.contains(&target);
        if present != select {
            toggle(areas, target);
        }
    }
}

fn thigh_partner(area: ProblemArea) -> Option<ProblemArea> {
    match area {
        ProblemArea::FrontThighs => Some(ProblemArea::BackThighs),
        ProblemArea::BackThighs => Some(ProblemArea::FrontThighs),
        _ => None,
    }
}
