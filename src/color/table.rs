use std::sync::OnceLock;

use super::LedValue;

/// A named color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorEntry {
    pub name: &'static str,
    pub value: LedValue,
}

impl ColorEntry {
    pub const fn new(name: &'static str, value: LedValue) -> Self {
        Self { name, value }
    }
}

const BUILTIN_COLORS: [ColorEntry; 8] = [
    ColorEntry::new("blue", LedValue::rgb(0, 0, 255)),
    ColorEntry::new("full", LedValue::rgb(255, 255, 255)),
    ColorEntry::new("green", LedValue::rgb(0, 255, 0)),
    ColorEntry::new("orange", LedValue::rgb(255, 100, 0)),
    ColorEntry::new("purple", LedValue::rgb(200, 0, 255)),
    ColorEntry::new("red", LedValue::rgb(255, 0, 0)),
    ColorEntry::new("white", LedValue::rgb(255, 240, 240)),
    ColorEntry::new("yellow", LedValue::rgb(255, 180, 0)),
];

/// Read-only name to color registry, sorted by name for binary search.
#[derive(Debug, Clone)]
pub struct ColorTable {
    entries: Vec<ColorEntry>,
}

impl ColorTable {
    pub fn new(entries: impl IntoIterator<Item = ColorEntry>) -> Self {
        let mut entries: Vec<ColorEntry> = entries.into_iter().collect();
        entries.sort_unstable_by(|a, b| a.name.cmp(b.name));

        Self { entries }
    }

    /// The process-wide table of named colors.
    pub fn builtin() -> &'static ColorTable {
        static TABLE: OnceLock<ColorTable> = OnceLock::new();
        TABLE.get_or_init(|| ColorTable::new(BUILTIN_COLORS))
    }

    /// Exact, case-sensitive lookup.
    pub fn lookup(&self, name: &str) -> Option<LedValue> {
        self.entries
            .binary_search_by(|entry| entry.name.cmp(name))
            .ok()
            .map(|i| self.entries[i].value)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
