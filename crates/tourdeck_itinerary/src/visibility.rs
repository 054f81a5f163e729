use crate::model::GenericItem;

/// Removes schedule items the viewer may not see.
///
/// Items without a visibility marker, or marked for everyone, always pass.
/// Restricted items pass only when the viewer is listed; a restricted item
/// with no list is hidden from everyone. The source snapshot is never
/// mutated.
pub fn filter_visible(items: &[GenericItem], viewer_id: &str) -> Vec<GenericItem> {
    items
        .iter()
        .filter(|item| item.is_visible_to(viewer_id))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemKind, Visibility};
    use chrono::{TimeZone, Utc};

    fn item(id: &str, visibility: Option<Visibility>, visible_to: &[&str]) -> GenericItem {
        GenericItem {
            id: id.to_owned(),
            kind: ItemKind::Custom,
            title: id.to_owned(),
            subtitle: None,
            note: None,
            time_utc: Utc.with_ymd_and_hms(2025, 6, 18, 12, 0, 0).unwrap(),
            timezone: None,
            visibility,
            visible_to: visible_to.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_unmarked_and_everyone_pass() {
        let items = vec![
            item("a", None, &[]),
            item("b", Some(Visibility::Everyone), &[]),
        ];
        let visible = filter_visible(&items, "u2");
        assert_eq!(visible.len(), 2);
    }

    #[test]
    fn test_restricted_requires_membership() {
        let items = vec![item("a", Some(Visibility::Restricted), &["u1"])];

        assert_eq!(filter_visible(&items, "u1").len(), 1);
        assert!(filter_visible(&items, "u2").is_empty());
    }

    #[test]
    fn test_restricted_without_list_hides_from_everyone() {
        let items = vec![item("a", Some(Visibility::Restricted), &[])];
        assert!(filter_visible(&items, "u1").is_empty());
    }

    #[test]
    fn test_filter_does_not_reorder_survivors() {
        let items = vec![
            item("a", None, &[]),
            item("b", Some(Visibility::Restricted), &["u2"]),
            item("c", None, &[]),
        ];
        let visible = filter_visible(&items, "u1");
        let ids: Vec<&str> = visible.iter().map(|it| it.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
