//! Per-document diff predicates.
//!
//! Everything here is a field-level [`merge_ordered`] over the two
//! documents' field sets, filtered through the allow-list.

use crate::config::{BatchConfig, FieldAllowList};
use crate::diff::model::{DocumentAction, FieldChange};
use crate::merge::Merged;
use crate::model::{Document, Field};
use crate::ordered::merge_ordered;

/// Allow-listed fields that differ between `old` and `new`, ascending by key.
pub fn field_changes<'a>(
    old: &'a Document,
    new: &'a Document,
    allowed: &'a FieldAllowList,
) -> impl Iterator<Item = FieldChange<'a>> + 'a {
    merge_ordered(old.fields(), new.fields()).filter_map(move |merged| match merged {
        Merged::Left(f) if allowed.allows(&f.key) => Some(FieldChange::Removed(f)),
        Merged::Right(f) if allowed.allows(&f.key) => Some(FieldChange::Added(f)),
        Merged::Both(o, n) if allowed.allows(&n.key) && !o.same_value(n) => {
            Some(FieldChange::Modified { old: o, new: n })
        }
        _ => None,
    })
}

/// Whether the pair needs any update at all.
///
/// A missing side always counts as an update: there is either no baseline
/// to compare against or the document went away.
pub fn has_updates(
    old: Option<&Document>,
    new: Option<&Document>,
    allowed: &FieldAllowList,
) -> bool {
    match (old, new) {
        (Some(old), Some(new)) => field_changes(old, new, allowed).next().is_some(),
        _ => true,
    }
}

/// Whether the change from `old` to `new` can be sent as partial updates.
///
/// Requires a baseline, every changed field to be in-place eligible, and no
/// allow-listed field to have been removed.
pub fn can_in_place_update(old: Option<&Document>, new: &Document, config: &BatchConfig) -> bool {
    let Some(old) = old else {
        return false;
    };

    field_changes(old, new, config.allowed_fields()).all(|change| match change {
        FieldChange::Removed(_) => false,
        FieldChange::Added(f) | FieldChange::Modified { new: f, .. } => config.is_in_place(&f.key),
    })
}

/// New-side fields that were added or modified, ascending by key.
pub fn changed_fields<'a>(
    old: &'a Document,
    new: &'a Document,
    allowed: &'a FieldAllowList,
) -> impl Iterator<Item = &'a Field> + 'a {
    field_changes(old, new, allowed).filter_map(|change| change.new_field())
}

/// Decide what a merged document pair turns into.
pub fn classify<'a>(
    old: Option<&'a Document>,
    new: Option<&'a Document>,
    config: &BatchConfig,
) -> DocumentAction<'a> {
    match (old, new) {
        (None, None) => DocumentAction::Unchanged,
        (Some(old), None) => DocumentAction::NoNewDocument { old },
        (None, Some(new)) => DocumentAction::FullAdd { new },
        (Some(old), Some(new)) => {
            if !has_updates(Some(old), Some(new), config.allowed_fields()) {
                DocumentAction::Unchanged
            } else if can_in_place_update(Some(old), new, config) {
                DocumentAction::InPlaceAdd { old, new }
            } else {
                DocumentAction::FullAdd { new }
            }
        }
    }
}
