use serde::{Deserialize, Serialize};

use crate::group::DayGroup;
use crate::timezone::DateKey;

/// Long-lived UI state: which day is selected and which item card is
/// expanded. Owned by the screen, reconciled against every re-derivation
/// rather than recomputed from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub selected_key: Option<DateKey>,
    pub expanded_item_id: Option<String>,
}

/// Carries the previous selection across a re-grouping.
///
/// A selected day survives as long as its key still exists; otherwise the
/// first group is selected (or nothing, when there are no groups). An
/// expanded item whose underlying record vanished is collapsed.
pub fn reconcile(groups: &[DayGroup], prev: Selection) -> Selection {
    let selected_key = match prev.selected_key {
        Some(key) if groups.iter().any(|day| day.date_key == key) => Some(key),
        _ => groups.first().map(|day| day.date_key),
    };

    let expanded_item_id = prev.expanded_item_id.filter(|id| {
        groups
            .iter()
            .any(|day| day.items.iter().any(|item| &item.id == id))
    });

    Selection {
        selected_key,
        expanded_item_id,
    }
}
