//! Call graph accumulation, merging, and unused-node filtering.
//!
//! A [`CallGraph`] is a mapping from function name to the ordered list of
//! names it calls. Entries iterate in discovery order so exported output is
//! reproducible for a given file order. Call lists are NOT deduplicated:
//! a caller invoking the same callee twice keeps two entries, one per call
//! site, so multiplicity stays available to exporters.

use std::collections::{HashMap, HashSet};

/// Directed relation from caller names to callee names.
///
/// Keys are unique. A name may be a key with an empty call list (a leaf
/// function) or appear only inside call lists (a callee never seen as a
/// definition in the analyzed tree).
#[derive(Debug, Clone, Default)]
pub struct CallGraph {
    /// Keys in first-seen order
    order: Vec<String>,
    /// Key -> ordered outgoing call names
    calls: HashMap<String, Vec<String>>,
}

impl CallGraph {
    /// Create a new empty call graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure `name` exists as a key, creating an empty call list on first
    /// sighting. Returns true if the key was newly inserted.
    pub fn ensure_node(&mut self, name: &str) -> bool {
        if self.calls.contains_key(name) {
            return false;
        }
        self.order.push(name.to_string());
        self.calls.insert(name.to_string(), Vec::new());
        true
    }

    /// Record that `caller` invokes `callee`.
    ///
    /// Appends unconditionally: repeated calls produce repeated entries.
    pub fn record_call(&mut self, caller: &str, callee: &str) {
        self.ensure_node(caller);
        if let Some(list) = self.calls.get_mut(caller) {
            list.push(callee.to_string());
        }
    }

    /// Outgoing calls of `name`, or None if it is not a key.
    pub fn calls_of(&self, name: &str) -> Option<&[String]> {
        self.calls.get(name).map(Vec::as_slice)
    }

    /// Whether `name` exists as a key.
    pub fn contains(&self, name: &str) -> bool {
        self.calls.contains_key(name)
    }

    /// Iterate entries in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.order
            .iter()
            .map(move |name| (name.as_str(), self.calls[name].as_slice()))
    }

    /// Number of keys in the graph.
    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    /// Total number of (caller, callee) pairs, counting multiplicity.
    pub fn edge_count(&self) -> usize {
        self.calls.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Fold another partial graph into this one.
    ///
    /// Unknown keys are inserted with their list; known keys get the new
    /// list concatenated onto the existing one. Key order is first-seen
    /// across all merged partials.
    pub fn merge_from(&mut self, mut partial: CallGraph) {
        for name in partial.order {
            let incoming = partial.calls.remove(&name).unwrap_or_default();
            if self.ensure_node(&name) {
                if let Some(list) = self.calls.get_mut(&name) {
                    *list = incoming;
                }
            } else if let Some(list) = self.calls.get_mut(&name) {
                list.extend(incoming);
            }
        }
    }

    /// Merge a sequence of per-file partial graphs in discovery order.
    pub fn merge(partials: impl IntoIterator<Item = CallGraph>) -> Self {
        let mut merged = Self::new();
        for partial in partials {
            merged.merge_from(partial);
        }
        merged
    }

    /// Set of all names appearing in any call list.
    pub fn referenced_names(&self) -> HashSet<&str> {
        self.calls
            .values()
            .flatten()
            .map(String::as_str)
            .collect()
    }

    /// Drop entries that are never called and call nothing themselves.
    ///
    /// An entry survives iff its name appears in at least one call list
    /// anywhere in the graph, or its own call list is non-empty. Entry
    /// order is preserved. No keys are synthesized for referenced names
    /// that were never defined. Idempotent.
    pub fn retain_referenced(&self) -> CallGraph {
        let referenced: HashSet<&str> = self.referenced_names();

        let mut filtered = CallGraph::new();
        for (name, calls) in self.iter() {
            if referenced.contains(name) || !calls.is_empty() {
                filtered.ensure_node(name);
                for callee in calls {
                    filtered.record_call(name, callee);
                }
            }
        }
        filtered
    }
}
