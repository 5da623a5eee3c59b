//! Habit icon catalog.
//!
//! The presentation layer owns the icon assets; core only needs the set of
//! known ids to decide whether a form selection is acceptable.

use std::collections::BTreeMap;

/// One selectable icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    /// Asset reference, e.g. `icon-book`.
    pub id: String,
    /// Human-readable description shown next to the asset.
    pub label: String,
}

const BUILTIN_ICONS: &[(&str, &str)] = &[
    ("icon-star", "star"),
    ("icon-heart", "Time for your loved one"),
    ("icon-alarm-clock", "Wake up"),
    ("icon-sleep", "Go to bed"),
    ("icon-water", "Drink water"),
    ("icon-vegetables", "Eat vegetables"),
    ("icon-book", "Read book"),
    ("icon-computer", "Let's work"),
    ("icon-study-cap", "Let's study"),
    ("icon-dumbbell", "Do sports exercises"),
    ("icon-ball", "Sport ball"),
    ("icon-running", "Sport running"),
];

/// Ordered set of known icons keyed by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconCatalog {
    icons: Vec<Icon>,
    positions: BTreeMap<String, usize>,
}

impl IconCatalog {
    /// Builds a catalog from `(id, label)` pairs. Later duplicates are ignored.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut catalog = Self {
            icons: Vec::new(),
            positions: BTreeMap::new(),
        };
        for (id, label) in pairs {
            let id = id.trim();
            if id.is_empty() || catalog.positions.contains_key(id) {
                continue;
            }
            catalog.positions.insert(id.to_string(), catalog.icons.len());
            catalog.icons.push(Icon {
                id: id.to_string(),
                label: label.to_string(),
            });
        }
        catalog
    }

    /// The built-in icon set shipped with the app.
    pub fn builtin() -> Self {
        Self::from_pairs(BUILTIN_ICONS.iter().copied())
    }

    pub fn contains(&self, icon_id: &str) -> bool {
        self.positions.contains_key(icon_id)
    }

    pub fn get(&self, icon_id: &str) -> Option<&Icon> {
        self.positions.get(icon_id).map(|position| &self.icons[*position])
    }

    /// Icons in declaration order.
    pub fn icons(&self) -> &[Icon] {
        &self.icons
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

impl Default for IconCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
