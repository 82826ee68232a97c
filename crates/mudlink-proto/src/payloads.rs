//! Structured payloads carried by map, inventory and object frames.
//!
//! The server owns the meaning of every field here. The client only caches
//! and renders them, so all text fields are optional where the server may
//! omit them.

use serde::{Deserialize, Deserializer, Serialize};

/// A room position on the map grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapRoom {
    /// Server-assigned room id.
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    /// Grid column.
    pub x: i32,
    /// Grid row.
    pub y: i32,
    /// Display name.
    pub name: String,
}

/// The player's carried and equipped items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    /// Carried items.
    #[serde(default)]
    pub items: Vec<Item>,
    /// Equipped items, one per slot.
    #[serde(default)]
    pub equipment: Vec<EquippedItem>,
}

impl Inventory {
    /// Look up a carried or equipped item by id.
    pub fn find(&self, id: &str) -> Option<ItemRef<'_>> {
        self.items
            .iter()
            .find(|it| it.id == id)
            .map(ItemRef::Carried)
            .or_else(|| self.equipment.iter().find(|eq| eq.id == id).map(ItemRef::Equipped))
    }

    /// Ids of all items in display order: carried first, then equipped.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|it| it.id.as_str()).chain(self.equipment.iter().map(|eq| eq.id.as_str()))
    }
}

/// A carried item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Server-assigned object id.
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Long description shown when the item is selected.
    #[serde(default)]
    pub description: String,
}

/// An item worn or wielded in an equipment slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquippedItem {
    /// Slot name, e.g. `head` or `hands`.
    pub slot: String,
    /// Server-assigned object id.
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Long description shown when the item is selected.
    #[serde(default)]
    pub description: String,
}

/// Borrowed view of either kind of inventory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemRef<'a> {
    /// A carried item.
    Carried(&'a Item),
    /// An equipped item.
    Equipped(&'a EquippedItem),
}

impl<'a> ItemRef<'a> {
    /// Display name.
    pub fn name(self) -> &'a str {
        match self {
            ItemRef::Carried(it) => &it.name,
            ItemRef::Equipped(eq) => &eq.name,
        }
    }

    /// Long description.
    pub fn description(self) -> &'a str {
        match self {
            ItemRef::Carried(it) => &it.description,
            ItemRef::Equipped(eq) => &eq.description,
        }
    }
}

/// Detailed view of one game object, sent in reply to an object request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameObject {
    /// Server-assigned object id.
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Opaque component state keyed by component name.
    #[serde(default)]
    pub components: serde_json::Map<String, serde_json::Value>,
}

/// Accept ids sent either as JSON strings or as JSON numbers.
pub(crate) fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}
