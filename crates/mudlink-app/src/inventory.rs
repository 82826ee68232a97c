//! Inventory panel cache and item selection.

use mudlink_proto::payloads::{GameObject, Inventory, ItemRef};

/// Last inventory snapshot plus the player's selection.
#[derive(Debug, Clone, Default)]
pub struct InventoryState {
    data: Option<Inventory>,
    selected: Option<String>,
    details: Option<String>,
}

impl InventoryState {
    /// Replace the snapshot. The detail text is hidden until the next
    /// selection; the selection itself is kept.
    pub fn replace(&mut self, data: Option<Inventory>) {
        self.data = data;
        self.details = None;
    }

    /// Current snapshot. `None` before the first inventory frame.
    pub fn data(&self) -> Option<&Inventory> {
        self.data.as_ref()
    }

    /// Selected item id.
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Selected item, if it is still in the snapshot.
    pub fn selected_item(&self) -> Option<ItemRef<'_>> {
        let id = self.selected.as_deref()?;
        self.data.as_ref()?.find(id)
    }

    /// Detail text of the selected item, when shown.
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Select an item and show its description.
    pub fn select(&mut self, id: &str) {
        self.selected = Some(id.to_owned());
        self.details =
            self.data.as_ref().and_then(|d| d.find(id)).map(|item| item.description().to_owned());
    }

    /// Move the selection through carried then equipped items, wrapping.
    pub fn cycle(&mut self, forward: bool) {
        let Some(data) = self.data.as_ref() else {
            return;
        };
        let ids: Vec<&str> = data.ids().collect();
        let len = ids.len();
        if len == 0 {
            return;
        }

        let current = self.selected.as_deref().and_then(|s| ids.iter().position(|id| *id == s));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        };
        if let Some(id) = ids.get(next).map(|id| (*id).to_owned()) {
            self.select(&id);
        }
    }

    /// Show fresh object details if they describe the selected item.
    pub fn apply_object(&mut self, object: &GameObject) {
        if self.selected.as_deref() == Some(object.id.as_str()) {
            self.details = Some(object.description.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use mudlink_proto::payloads::{EquippedItem, Item};

    use super::*;

    fn kit() -> Inventory {
        Inventory {
            items: vec![Item { id: "w".into(), name: "Wrench".into(), description: "Heavy.".into() }],
            equipment: vec![EquippedItem {
                slot: "head".into(),
                id: "h".into(),
                name: "Helmet".into(),
                description: "Dented.".into(),
            }],
        }
    }

    #[test]
    fn selection_shows_description() {
        let mut inv = InventoryState::default();
        inv.replace(Some(kit()));
        inv.select("h");

        assert_eq!(inv.details(), Some("Dented."));
        assert_eq!(inv.selected_item().map(ItemRef::name), Some("Helmet"));
    }

    #[test]
    fn refresh_hides_details_keeps_selection() {
        let mut inv = InventoryState::default();
        inv.replace(Some(kit()));
        inv.select("w");
        inv.replace(Some(kit()));

        assert_eq!(inv.selected_id(), Some("w"));
        assert!(inv.details().is_none());
    }

    #[test]
    fn cycle_wraps() {
        let mut inv = InventoryState::default();
        inv.replace(Some(kit()));
        inv.cycle(true);
        assert_eq!(inv.selected_id(), Some("w"));
        inv.cycle(true);
        assert_eq!(inv.selected_id(), Some("h"));
        inv.cycle(true);
        assert_eq!(inv.selected_id(), Some("w"));
    }
}
