//! The cross-reference graph behind "Referenced by" sections.
//!
//! While members are rendered, every concrete named type met in a signature registers an
//! edge "target is mentioned inside owner". After a namespace finishes, the graph is
//! drained for that namespace and each target's owners are appended to its already-written
//! document as a back-reference list.

use std::collections::BTreeMap;

use crate::catalog::{TypeName, TypeSignature};

/// Accumulates "type A is mentioned inside type B" edges during rendering.
///
/// Owners are deduplicated per target and self-references are dropped on insertion; the
/// graph itself stores owners unsorted, sorting happens at drain time.
#[derive(Debug, Default)]
pub struct CrossReferenceGraph {
    // target namespace -> target type name -> owners in insertion order
    edges: BTreeMap<String, BTreeMap<String, Vec<TypeName>>>,
}

impl CrossReferenceGraph {
    /// An empty graph.
    #[must_use]
    pub fn new() -> Self {
        CrossReferenceGraph::default()
    }

    /// Record that `owner` mentions `target`.
    ///
    /// Repeated mentions from the same owner collapse to one edge; a type referencing
    /// itself records nothing.
    pub fn add(&mut self, target: &TypeName, owner: &TypeName) {
        if target == owner {
            return;
        }
        let owners = self
            .edges
            .entry(target.namespace.clone())
            .or_default()
            .entry(target.name.clone())
            .or_default();
        if !owners.contains(owner) {
            owners.push(owner.clone());
        }
    }

    /// Record every concrete named type mentioned by `signature`, recursing through
    /// generic instantiations (both the outer type and each argument).
    pub fn add_signature(&mut self, signature: &TypeSignature, owner: &TypeName) {
        match signature {
            TypeSignature::Named(target) => self.add(target, owner),
            TypeSignature::GenericInst { outer, args, .. } => {
                self.add(outer, owner);
                for arg in args {
                    self.add_signature(arg, owner);
                }
            }
            _ => {}
        }
    }

    /// Remove and return the back-references for every target declared in `namespace`.
    ///
    /// Targets come out in name order; each target's owner list is sorted alphabetically
    /// by simple name.
    pub fn drain(&mut self, namespace: &str) -> BTreeMap<String, Vec<String>> {
        let Some(targets) = self.edges.remove(namespace) else {
            return BTreeMap::new();
        };
        targets
            .into_iter()
            .map(|(target, owners)| {
                let mut names: Vec<String> = owners.into_iter().map(|o| o.name).collect();
                names.sort();
                (target, names)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(namespace: &str, name: &str) -> TypeName {
        TypeName::new(namespace, name)
    }

    #[test]
    fn test_owners_are_deduplicated_and_sorted() {
        let mut graph = CrossReferenceGraph::new();
        let target = name("Test", "Interface1");
        graph.add(&target, &name("Test", "Zebra"));
        graph.add(&target, &name("Test", "Alpha"));
        graph.add(&target, &name("Test", "Zebra"));

        let drained = graph.drain("Test");
        assert_eq!(drained["Interface1"], ["Alpha", "Zebra"]);
    }

    #[test]
    fn test_self_references_are_dropped() {
        let mut graph = CrossReferenceGraph::new();
        let me = name("Test", "Class1");
        graph.add(&me, &me);
        assert!(graph.drain("Test").is_empty());
    }

    #[test]
    fn test_signature_registration_recurses_into_generics() {
        let mut graph = CrossReferenceGraph::new();
        let owner = name("Test", "Owner");
        let sig = TypeSignature::generic(
            "Windows.Foundation.Collections",
            "IVector`1",
            vec![TypeSignature::named("Test", "Element")],
        );
        graph.add_signature(&sig, &owner);

        let local = graph.drain("Test");
        assert_eq!(local["Element"], ["Owner"]);
        let foreign = graph.drain("Windows.Foundation.Collections");
        assert_eq!(foreign["IVector`1"], ["Owner"]);
    }

    #[test]
    fn test_primitive_signatures_record_nothing() {
        let mut graph = CrossReferenceGraph::new();
        graph.add_signature(&TypeSignature::I4, &name("Test", "Owner"));
        graph.add_signature(&TypeSignature::GenericParam(0), &name("Test", "Owner"));
        assert!(graph.drain("Test").is_empty());
    }

    #[test]
    fn test_drain_is_scoped_to_one_namespace() {
        let mut graph = CrossReferenceGraph::new();
        graph.add(&name("A", "T1"), &name("B", "Owner"));
        graph.add(&name("B", "T2"), &name("A", "Owner"));

        let a = graph.drain("A");
        assert_eq!(a.len(), 1);
        assert!(a.contains_key("T1"));

        let b = graph.drain("B");
        assert_eq!(b.len(), 1);
        assert!(b.contains_key("T2"));
    }
}
