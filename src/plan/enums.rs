//! Enum collection
//!
//! Records each enum's member names, in declaration order, for use as the
//! allowed-values list of enum columns.

use std::collections::HashMap;

use serde::Serialize;

use crate::schema::{EnumType, TypeGraph};

pub fn collect(node: &EnumType) -> (String, Vec<String>) {
    (node.name.clone(), node.values.clone())
}

/// Enum name -> ordered values, for one schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EnumTable {
    values: HashMap<String, Vec<String>>,
}

impl EnumTable {
    pub fn from_graph(graph: &TypeGraph) -> Self {
        let mut table = Self::default();
        for node in graph.enums() {
            table.insert(node);
        }
        table
    }

    pub fn insert(&mut self, node: &EnumType) {
        let (name, values) = collect(node);
        self.values.entry(name).or_insert(values);
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.values.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
