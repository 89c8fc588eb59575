//! Definition nodes as exposed by a [`MibSource`](crate::source::MibSource).

use super::oid::Oid;
use super::types::NodeKind;
use alloc::string::String;

/// A definition node belonging to a loaded module.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MibNode {
    /// Declaring module.
    pub module: String,
    /// Descriptor (local name).
    pub name: String,
    /// Definition kind.
    pub kind: NodeKind,
    /// Numeric OID (empty if not resolved).
    pub oid: Oid,
    /// DESCRIPTION text, empty when absent.
    pub description: String,
}

impl MibNode {
    /// Create a node with an empty OID and description.
    #[must_use]
    pub fn new(module: impl Into<String>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
            kind,
            oid: Oid::default(),
            description: String::new(),
        }
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let oid = Oid::from_dotted("1.3.6.1.6.3.1.1.5.3").unwrap();
        let node = MibNode::new("IF-MIB", "linkDown", NodeKind::Notification)
            .with_oid(oid.clone())
            .with_description("link went down");
        assert_eq!(node.oid, oid);
        assert_eq!(node.description, "link went down");
    }
}
