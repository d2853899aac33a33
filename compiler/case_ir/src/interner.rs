//! String interner for identifiers and string literals.
//!
//! Interning takes `&self`, so the interner can be borrowed by a pass and
//! by the evaluator at the same time as the arena is borrowed mutably.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::Name;

#[derive(Default)]
struct Table {
    ids: FxHashMap<&'static str, Name>,
    strings: Vec<&'static str>,
}

/// Maps strings to [`Name`]s and back.
///
/// Strings are leaked on first sight and never freed, so
/// [`lookup`](Self::lookup) returns `&'static str` without holding a lock.
pub struct StringInterner {
    table: RwLock<Table>,
}

impl StringInterner {
    /// Create an interner holding the empty string and the names generated
    /// code refers to.
    pub fn new() -> Self {
        let interner = StringInterner {
            table: RwLock::new(Table::default()),
        };
        for word in VOCABULARY {
            interner.intern(word);
        }
        interner
    }

    /// Intern `s`, returning the existing name if it was seen before.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` distinct strings are interned.
    pub fn intern(&self, s: &str) -> Name {
        if let Some(&name) = self.table.read().ids.get(s) {
            return name;
        }

        let mut table = self.table.write();
        // Checked again: another caller may have interned `s` in between.
        if let Some(&name) = table.ids.get(s) {
            return name;
        }
        let raw = u32::try_from(table.strings.len())
            .unwrap_or_else(|_| panic!("interner overflow: too many strings"));
        let name = Name::from_raw(raw);
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        table.strings.push(leaked);
        table.ids.insert(leaked, name);
        name
    }

    /// The string behind `name`.
    ///
    /// # Panics
    /// Panics if `name` was issued by a different interner with more strings.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.table.read().strings[name.index()]
    }

    /// Number of distinct strings interned so far.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    /// Always false: the empty string is interned on creation.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Interned up front, in this order, by every interner. The empty string
/// comes first so that it is [`Name::EMPTY`].
const VOCABULARY: &[&str] = &[
    "",
    "_",
    "undefined",
    "null",
    "Array",
    "isArray",
    "length",
    "slice",
    "object",
    "emit",
    "caseVal",
    "case",
    "rest",
];
