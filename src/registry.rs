//! Groups scanner output by (kind, name) with last-wins duplicate resolution.

use std::collections::HashMap;

use crate::scan::{ConfigKind, Definition};

/// The effective definition per (kind, name), rebuilt fresh from a scan on
/// every operation and never shared across calls.
///
/// When a name is defined more than once, the occurrence with the highest
/// file-order index wins. For variables this mirrors assignment execution
/// order; constants use the same rule so that operations against a redefined
/// constant act on a predictable occurrence.
#[derive(Debug, Default)]
pub struct Registry {
    constants: HashMap<String, Definition>,
    variables: HashMap<String, Definition>,
}

impl Registry {
    pub fn build(definitions: Vec<Definition>) -> Self {
        let mut registry = Registry::default();
        for def in definitions {
            let table = match def.kind {
                ConfigKind::Constant => &mut registry.constants,
                ConfigKind::Variable => &mut registry.variables,
            };
            match table.entry(def.name.clone()) {
                std::collections::hash_map::Entry::Occupied(mut entry) => {
                    if def.index >= entry.get().index {
                        entry.insert(def);
                    }
                }
                std::collections::hash_map::Entry::Vacant(entry) => {
                    entry.insert(def);
                }
            }
        }
        registry
    }

    pub fn lookup(&self, kind: ConfigKind, name: &str) -> Option<&Definition> {
        self.table(kind).get(name)
    }

    pub fn contains(&self, kind: ConfigKind, name: &str) -> bool {
        self.table(kind).contains_key(name)
    }

    fn table(&self, kind: ConfigKind) -> &HashMap<String, Definition> {
        match kind {
            ConfigKind::Constant => &self.constants,
            ConfigKind::Variable => &self.variables,
        }
    }
}
