use std::collections::HashMap;

use serde::{Deserialize, Serialize};
pub use serde_json::Error;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NdbLine {
    pub address: u32,
    pub size: u32,
    pub text: String,
    pub line_number: usize,
}

/// Debug symbols for one assembled program: where each source line landed
/// and what every label resolved to.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Ndb {
    pub name: String,
    pub lines: Vec<NdbLine>,
    pub address_map: HashMap<u32, usize>,
    pub labels: HashMap<String, u32>,
}

impl Ndb {
    pub fn new(name: &str) -> Self {
        Ndb {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn to_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_string(dbg: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(dbg)
    }

    /// Only the first definition of a label is kept.
    pub fn add_label(&mut self, label: &str, address: u32) {
        self.labels.entry(label.to_owned()).or_insert(address);
    }

    pub fn add_line(&mut self, address: u32, size: u32, text: String, line_number: usize) {
        self.lines.push(NdbLine {
            address,
            size,
            text,
            line_number,
        });
        self.address_map.insert(address, self.lines.len() - 1);
    }

    pub fn line_at(&self, address: u32) -> Option<&NdbLine> {
        self.address_map.get(&address).map(|&idx| &self.lines[idx])
    }

    pub fn label(&self, name: &str) -> Option<u32> {
        self.labels.get(name).copied()
    }
}
