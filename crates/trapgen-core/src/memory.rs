//! In-memory [`MibSource`].
//!
//! Holds module definitions that an engine front-end has already extracted
//! (or that a test has built by hand) and answers pipeline queries from them.
//! Named type references are resolved through textual-convention typedefs,
//! following `parent` links for derived enumerations.

use crate::model::{BaseType, EnumValues, MibNode, NodeKind, Oid, Syntax};
use crate::source::{MibSource, SourceError};
use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;

/// Maximum typedef parent chain followed when resolving a named type.
const MAX_TYPE_DEPTH: usize = 16;

/// A `module::name` reference.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    /// Module name.
    pub module: String,
    /// Descriptor.
    pub name: String,
}

impl QualifiedName {
    /// Create a new reference.
    #[must_use]
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
        }
    }
}

/// Syntax of an object as declared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyntaxRef {
    /// Inline syntax, already resolved.
    Resolved(Syntax),
    /// Reference to a (possibly imported) type definition.
    Named(QualifiedName),
}

impl From<Syntax> for SyntaxRef {
    fn from(syntax: Syntax) -> Self {
        Self::Resolved(syntax)
    }
}

/// A definition node in a module.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeDefinition {
    /// Descriptor.
    pub name: String,
    /// Definition kind.
    pub kind: NodeKind,
    /// Numeric OID.
    pub oid: Oid,
    /// DESCRIPTION text.
    pub description: String,
    /// SYNTAX of OBJECT-TYPE definitions.
    pub syntax: Option<SyntaxRef>,
    /// OBJECTS / VARIABLES of notification definitions.
    pub objects: Vec<QualifiedName>,
}

impl NodeDefinition {
    /// Create a node definition.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    /// Create a scalar OBJECT-TYPE with the given syntax.
    #[must_use]
    pub fn scalar(name: impl Into<String>, syntax: impl Into<SyntaxRef>) -> Self {
        Self::new(name, NodeKind::Scalar).with_syntax(syntax)
    }

    /// Create a notification without objects.
    #[must_use]
    pub fn notification(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Notification)
    }

    /// Set the OID.
    #[must_use]
    pub fn with_oid(mut self, oid: Oid) -> Self {
        self.oid = oid;
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the syntax.
    #[must_use]
    pub fn with_syntax(mut self, syntax: impl Into<SyntaxRef>) -> Self {
        self.syntax = Some(syntax.into());
        self
    }

    /// Append a carried object.
    #[must_use]
    pub fn with_object(mut self, module: impl Into<String>, name: impl Into<String>) -> Self {
        self.objects.push(QualifiedName::new(module, name));
        self
    }

    fn to_node(&self, module: &str) -> MibNode {
        MibNode {
            module: module.into(),
            name: self.name.clone(),
            kind: self.kind,
            oid: self.oid.clone(),
            description: self.description.clone(),
        }
    }
}

/// A TEXTUAL-CONVENTION or type assignment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeDefinition {
    /// Type name.
    pub name: String,
    /// Base type.
    pub base: BaseType,
    /// Named numbers declared on this type.
    pub values: EnumValues,
    /// Type this one is derived from.
    pub parent: Option<QualifiedName>,
}

impl TypeDefinition {
    /// Create a type definition.
    #[must_use]
    pub fn new(name: impl Into<String>, base: BaseType) -> Self {
        Self {
            name: name.into(),
            base,
            ..Self::default()
        }
    }

    /// Set the named numbers.
    #[must_use]
    pub fn with_values(mut self, values: EnumValues) -> Self {
        self.values = values;
        self
    }

    /// Set the parent type.
    #[must_use]
    pub fn with_parent(mut self, parent: QualifiedName) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// Everything known about one module.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModuleDefinition {
    /// Module name.
    pub name: String,
    /// Definition nodes in engine order.
    pub nodes: Vec<NodeDefinition>,
    /// Type definitions.
    pub typedefs: Vec<TypeDefinition>,
}

impl ModuleDefinition {
    /// Create an empty module.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Append a node.
    #[must_use]
    pub fn with_node(mut self, node: NodeDefinition) -> Self {
        self.nodes.push(node);
        self
    }

    /// Append a type definition.
    #[must_use]
    pub fn with_typedef(mut self, typedef: TypeDefinition) -> Self {
        self.typedefs.push(typedef);
        self
    }

    /// Find a node by descriptor.
    #[must_use]
    pub fn node(&self, name: &str) -> Option<&NodeDefinition> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Find a type definition by name.
    #[must_use]
    pub fn typedef(&self, name: &str) -> Option<&TypeDefinition> {
        self.typedefs.iter().find(|t| t.name == name)
    }
}

/// A [`MibSource`] backed by module definitions held in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    modules: Vec<ModuleDefinition>,
}

impl MemorySource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module, replacing any module with the same name.
    pub fn insert(&mut self, module: ModuleDefinition) {
        match self.modules.iter_mut().find(|m| m.name == module.name) {
            Some(existing) => *existing = module,
            None => self.modules.push(module),
        }
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with_module(mut self, module: ModuleDefinition) -> Self {
        self.insert(module);
        self
    }

    /// Look up a module by name.
    #[must_use]
    pub fn module(&self, name: &str) -> Option<&ModuleDefinition> {
        self.modules.iter().find(|m| m.name == name)
    }

    /// Check if a module is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.module(name).is_some()
    }

    /// Number of modules held.
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    fn node_def(&self, reference: &QualifiedName) -> Option<&NodeDefinition> {
        self.module(&reference.module)?.node(&reference.name)
    }

    fn typedef(&self, reference: &QualifiedName) -> Option<&TypeDefinition> {
        self.module(&reference.module)?.typedef(&reference.name)
    }

    /// Modules that are not present but are needed to resolve the
    /// notifications of `root`: modules declaring carried objects, modules
    /// declaring their types, and modules declaring typedef parents.
    #[must_use]
    pub fn missing_modules(&self, root: &str) -> BTreeSet<String> {
        let mut missing = BTreeSet::new();
        let Some(module) = self.module(root) else {
            return missing;
        };

        let objects = module
            .nodes
            .iter()
            .filter(|n| n.kind.is_notification())
            .flat_map(|n| n.objects.iter());

        for object in objects {
            if !self.contains(&object.module) {
                missing.insert(object.module.clone());
                continue;
            }
            if let Some(NodeDefinition {
                syntax: Some(SyntaxRef::Named(type_ref)),
                ..
            }) = self.node_def(object)
            {
                self.collect_missing_types(type_ref, &mut missing);
            }
        }
        missing
    }

    fn collect_missing_types(&self, type_ref: &QualifiedName, missing: &mut BTreeSet<String>) {
        let mut current = type_ref;
        for _ in 0..MAX_TYPE_DEPTH {
            if !self.contains(&current.module) {
                // SMI application types resolve by name without their module.
                if BaseType::from_smi_name(&current.name) == BaseType::Unknown {
                    missing.insert(current.module.clone());
                }
                return;
            }
            match self.typedef(current).and_then(|t| t.parent.as_ref()) {
                Some(parent) => current = parent,
                None => return,
            }
        }
    }

    fn resolve_named(&self, type_ref: &QualifiedName, depth: usize) -> Syntax {
        if depth >= MAX_TYPE_DEPTH {
            return Syntax::default();
        }
        let Some(typedef) = self.typedef(type_ref) else {
            // Base types of the SMI modules are not typedefs.
            return Syntax::Other(BaseType::from_smi_name(&type_ref.name));
        };

        let inherited = || {
            typedef
                .parent
                .as_ref()
                .map(|parent| self.resolve_named(parent, depth + 1))
        };

        match typedef.base {
            BaseType::Enumeration if !typedef.values.is_empty() => {
                Syntax::Enumeration(typedef.values.clone())
            }
            BaseType::Enumeration => match inherited() {
                Some(syntax @ Syntax::Enumeration(_)) => syntax,
                _ => Syntax::Enumeration(EnumValues::default()),
            },
            BaseType::Unknown => inherited().unwrap_or_default(),
            base => Syntax::Other(base),
        }
    }
}

impl MibSource for MemorySource {
    fn load_module(&mut self, name: &str) -> Result<String, SourceError> {
        self.module(name)
            .map(|m| m.name.clone())
            .ok_or_else(|| SourceError::ModuleNotFound {
                module: name.into(),
            })
    }

    fn module_nodes(&self, module: &str) -> Result<Vec<MibNode>, SourceError> {
        let definition = self.module(module).ok_or_else(|| SourceError::ModuleNotFound {
            module: module.into(),
        })?;
        Ok(definition
            .nodes
            .iter()
            .map(|n| n.to_node(&definition.name))
            .collect())
    }

    fn notification_objects(&self, notification: &MibNode) -> Vec<MibNode> {
        let Some(definition) = self
            .module(&notification.module)
            .and_then(|m| m.node(&notification.name))
        else {
            return Vec::new();
        };

        definition
            .objects
            .iter()
            .map(|object| match self.node_def(object) {
                Some(def) => def.to_node(&object.module),
                None => MibNode::new(object.module.clone(), object.name.clone(), NodeKind::Unknown),
            })
            .collect()
    }

    fn object_syntax(&self, object: &MibNode) -> Syntax {
        let reference = QualifiedName::new(object.module.clone(), object.name.clone());
        match self.node_def(&reference).and_then(|n| n.syntax.as_ref()) {
            Some(SyntaxRef::Resolved(syntax)) => syntax.clone(),
            Some(SyntaxRef::Named(type_ref)) => self.resolve_named(type_ref, 0),
            None => Syntax::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn truth_value() -> TypeDefinition {
        TypeDefinition::new("TruthValue", BaseType::Enumeration)
            .with_values([(1, "true"), (2, "false")].into_iter().collect())
    }

    fn source() -> MemorySource {
        MemorySource::new()
            .with_module(ModuleDefinition::new("SNMPv2-TC").with_typedef(truth_value()))
            .with_module(
                ModuleDefinition::new("TEST-MIB")
                    .with_typedef(
                        TypeDefinition::new("TestFlag", BaseType::Enumeration)
                            .with_parent(QualifiedName::new("SNMPv2-TC", "TruthValue")),
                    )
                    .with_node(NodeDefinition::scalar(
                        "testEnabled",
                        SyntaxRef::Named(QualifiedName::new("SNMPv2-TC", "TruthValue")),
                    ))
                    .with_node(NodeDefinition::scalar(
                        "testFlag",
                        SyntaxRef::Named(QualifiedName::new("TEST-MIB", "TestFlag")),
                    ))
                    .with_node(NodeDefinition::scalar(
                        "testCount",
                        SyntaxRef::Named(QualifiedName::new("SNMPv2-SMI", "Counter32")),
                    ))
                    .with_node(
                        NodeDefinition::notification("testEvent")
                            .with_object("TEST-MIB", "testEnabled")
                            .with_object("OTHER-MIB", "otherIndex"),
                    ),
            )
    }

    fn object(module: &str, name: &str) -> MibNode {
        MibNode::new(module, name, NodeKind::Scalar)
    }

    #[test]
    fn test_load_module() {
        let mut source = source();
        assert_eq!(source.load_module("TEST-MIB").unwrap(), "TEST-MIB");
        assert_eq!(
            source.load_module("NO-SUCH-MIB"),
            Err(SourceError::ModuleNotFound {
                module: "NO-SUCH-MIB".into()
            })
        );
    }

    #[test]
    fn test_module_nodes_in_order() {
        let source = source();
        let names: Vec<_> = source
            .module_nodes("TEST-MIB")
            .unwrap()
            .into_iter()
            .map(|n| n.name)
            .collect();
        assert_eq!(names, ["testEnabled", "testFlag", "testCount", "testEvent"]);
    }

    #[test]
    fn test_named_enumeration_resolves_through_typedef() {
        let syntax = source().object_syntax(&object("TEST-MIB", "testEnabled"));
        assert_eq!(syntax.enum_values().map(EnumValues::len), Some(2));
    }

    #[test]
    fn test_derived_enumeration_inherits_parent_values() {
        let syntax = source().object_syntax(&object("TEST-MIB", "testFlag"));
        let values = syntax.enum_values().unwrap();
        assert_eq!(values.get_label(1), Some("true"));
    }

    #[test]
    fn test_smi_base_type_without_typedef() {
        let syntax = source().object_syntax(&object("TEST-MIB", "testCount"));
        assert_eq!(syntax, Syntax::Other(BaseType::Unsigned32));
    }

    #[test]
    fn test_unresolved_object_keeps_position() {
        let source = source();
        let notification = MibNode::new("TEST-MIB", "testEvent", NodeKind::Notification);
        let objects = source.notification_objects(&notification);

        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].kind, NodeKind::Scalar);
        assert_eq!(objects[1].name, "otherIndex");
        assert_eq!(objects[1].kind, NodeKind::Unknown);
        assert_eq!(source.object_syntax(&objects[1]), Syntax::default());
    }

    #[test]
    fn test_missing_modules() {
        let missing = source().missing_modules("TEST-MIB");
        assert_eq!(missing.into_iter().collect::<Vec<_>>(), ["OTHER-MIB"]);
    }

    #[test]
    fn test_missing_type_module() {
        let source = MemorySource::new().with_module(
            ModuleDefinition::new("A-MIB")
                .with_node(NodeDefinition::scalar(
                    "aStatus",
                    SyntaxRef::Named(QualifiedName::new("A-TC", "AStatus")),
                ))
                .with_node(NodeDefinition::notification("aEvent").with_object("A-MIB", "aStatus")),
        );
        assert!(source.missing_modules("A-MIB").contains("A-TC"));
        assert!(source.missing_modules("NO-SUCH-MIB").is_empty());
    }

    #[test]
    fn test_smi_base_type_module_not_required() {
        let source = MemorySource::new().with_module(
            ModuleDefinition::new("A-MIB")
                .with_node(NodeDefinition::scalar(
                    "aCount",
                    SyntaxRef::Named(QualifiedName::new("SNMPv2-SMI", "Counter32")),
                ))
                .with_node(NodeDefinition::notification("aEvent").with_object("A-MIB", "aCount")),
        );
        assert!(source.missing_modules("A-MIB").is_empty());
    }

    #[test]
    fn test_insert_replaces_module() {
        let mut source = source();
        let count = source.module_count();
        source.insert(ModuleDefinition::new("TEST-MIB"));
        assert_eq!(source.module_count(), count);
        assert!(source.module_nodes("TEST-MIB").unwrap().is_empty());
    }
}
