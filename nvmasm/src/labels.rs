use indexmap::{map::Entry, IndexMap};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub name: String,
    pub address: u32,
    pub line_no: usize,
}

/// Every label definition in source order. Lookups see only the first
/// definition of a name; later ones are kept but shadowed.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    definitions: Vec<Label>,
    first: IndexMap<String, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a definition. Returns false if the name was already taken, in
    /// which case this definition will never be resolved.
    pub fn define(&mut self, name: &str, address: u32, line_no: usize) -> bool {
        let idx = self.definitions.len();
        self.definitions.push(Label {
            name: name.to_owned(),
            address,
            line_no,
        });

        match self.first.entry(name.to_owned()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(idx);
                true
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Label> {
        self.first.get(name).map(|&idx| &self.definitions[idx])
    }

    pub fn resolve(&self, name: &str) -> Option<u32> {
        self.get(name).map(|label| label.address)
    }

    /// All definitions, duplicates included, in the order they were made.
    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.definitions.iter()
    }

    /// The authoritative definition of each name, in first-seen order.
    pub fn resolved(&self) -> impl Iterator<Item = &Label> {
        self.first.values().map(|&idx| &self.definitions[idx])
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
