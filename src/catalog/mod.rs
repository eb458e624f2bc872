//! The read-only type catalog the render pass runs against.
//!
//! A metadata reader materializes one [`TypeCatalog`] per input: namespaces in sorted
//! order, each holding its declared types bucketed by kind, mirroring how ECMA-335
//! readers group `namespace_members`. The core only ever needs two operations from it:
//! iteration in namespace order, and [`TypeCatalog::find`] for reference disambiguation.

mod signatures;
mod types;

pub use signatures::TypeSignature;
pub use types::{
    CustomAttribute, Documented, Event, Field, MemberFlags, Method, MethodSignature, Parameter,
    Property, TypeDef, TypeKind, TypeName,
};

use std::collections::BTreeMap;

/// The declared types of one namespace, bucketed by kind.
#[derive(Debug, Clone, Default)]
pub struct NamespaceMembers {
    /// Enumerations
    pub enums: Vec<TypeDef>,
    /// Classes
    pub classes: Vec<TypeDef>,
    /// Interfaces
    pub interfaces: Vec<TypeDef>,
    /// Value types
    pub structs: Vec<TypeDef>,
    /// Delegates
    pub delegates: Vec<TypeDef>,
}

impl NamespaceMembers {
    /// All kind buckets, in the order they are processed and indexed.
    pub(crate) fn buckets(&self) -> [&Vec<TypeDef>; 5] {
        [
            &self.enums,
            &self.classes,
            &self.interfaces,
            &self.structs,
            &self.delegates,
        ]
    }
}

/// Read-only index of declared types grouped by namespace.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    namespaces: BTreeMap<String, NamespaceMembers>,
}

impl TypeCatalog {
    /// An empty catalog.
    #[must_use]
    pub fn new() -> Self {
        TypeCatalog::default()
    }

    /// Register a declared type, bucketing it by namespace and kind.
    pub fn add_type(&mut self, type_def: TypeDef) {
        let members = self.namespaces.entry(type_def.namespace.clone()).or_default();
        match type_def.kind {
            TypeKind::Enum => members.enums.push(type_def),
            TypeKind::Class => members.classes.push(type_def),
            TypeKind::Interface => members.interfaces.push(type_def),
            TypeKind::Struct => members.structs.push(type_def),
            TypeKind::Delegate => members.delegates.push(type_def),
        }
    }

    /// Iterate namespaces in ascending name order.
    pub fn namespaces(&self) -> impl Iterator<Item = (&String, &NamespaceMembers)> {
        self.namespaces.iter()
    }

    /// Look up a declared type by (namespace, name).
    ///
    /// Searches every kind bucket of the namespace. Returns `None` for unknown namespaces,
    /// unknown names, and empty name parts.
    #[must_use]
    pub fn find(&self, namespace: &str, name: &str) -> Option<&TypeDef> {
        if namespace.is_empty() || name.is_empty() {
            return None;
        }
        let members = self.namespaces.get(namespace)?;
        members
            .buckets()
            .into_iter()
            .flatten()
            .find(|t| t.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TypeCatalog {
        let mut catalog = TypeCatalog::new();
        catalog.add_type(TypeDef::new("Test", "Class1", TypeKind::Class));
        catalog.add_type(TypeDef::new("Test", "Interface1", TypeKind::Interface));
        catalog.add_type(TypeDef::new("Test", "Color", TypeKind::Enum));
        catalog.add_type(TypeDef::new("Other.Nested", "Thing", TypeKind::Struct));
        catalog
    }

    #[test]
    fn test_find_across_kind_buckets() {
        let catalog = sample();
        assert_eq!(catalog.find("Test", "Class1").unwrap().kind, TypeKind::Class);
        assert_eq!(
            catalog.find("Test", "Interface1").unwrap().kind,
            TypeKind::Interface
        );
        assert_eq!(catalog.find("Test", "Color").unwrap().kind, TypeKind::Enum);
        assert_eq!(
            catalog.find("Other.Nested", "Thing").unwrap().kind,
            TypeKind::Struct
        );
        assert!(catalog.find("Test", "Missing").is_none());
        assert!(catalog.find("", "Class1").is_none());
        assert!(catalog.find("Test", "").is_none());
    }

    #[test]
    fn test_namespace_iteration_is_sorted() {
        let catalog = sample();
        let names: Vec<&String> = catalog.namespaces().map(|(ns, _)| ns).collect();
        assert_eq!(names, ["Other.Nested", "Test"]);
    }
}
