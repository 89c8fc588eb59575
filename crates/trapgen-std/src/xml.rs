//! Reader for libsmi's `smidump -f xml` output.
//!
//! Extracts just what the trap pipeline needs from one dumped module: the
//! definition nodes (with their syntax), the notifications (with their
//! objects), and the type definitions used to resolve named syntaxes.
//!
//! ```text
//! <smi>
//!   <module name="IF-MIB" .../>
//!   <typedefs>      <typedef name basetype><parent/><namednumber/>...
//!   <nodes>         <node|scalar|table><row><column><syntax>...
//!   <notifications> <notification name oid><objects><object module name/>...
//!   <groups>        <group name oid/>
//!   <compliances>   <compliance name oid/>
//! </smi>
//! ```

use roxmltree::{Document, Node, ParsingOptions};
use std::fmt;
use trapgen_core::memory::{
    ModuleDefinition, NodeDefinition, QualifiedName, SyntaxRef, TypeDefinition,
};
use trapgen_core::model::{BaseType, EnumValues, NodeKind, Oid, Syntax};

/// Error reading a smidump XML document.
#[derive(Debug)]
pub enum XmlError {
    /// The document is not well-formed XML.
    Malformed(roxmltree::Error),
    /// The document has no named `<module>` element.
    MissingModule,
}

impl fmt::Display for XmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(e) => write!(f, "malformed smidump output: {e}"),
            Self::MissingModule => write!(f, "smidump output contains no module"),
        }
    }
}

impl std::error::Error for XmlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Malformed(e) => Some(e),
            Self::MissingModule => None,
        }
    }
}

impl From<roxmltree::Error> for XmlError {
    fn from(e: roxmltree::Error) -> Self {
        Self::Malformed(e)
    }
}

/// Parse one module dumped by `smidump -f xml`.
///
/// # Errors
///
/// Returns an error if the text is not XML or names no module.
pub fn parse_module(text: &str) -> Result<ModuleDefinition, XmlError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(text, options)?;
    let root = doc.root_element();

    let name = child(root, "module")
        .and_then(|m| m.attribute("name"))
        .filter(|name| !name.is_empty())
        .ok_or(XmlError::MissingModule)?;
    let mut module = ModuleDefinition::new(name);

    if let Some(typedefs) = child(root, "typedefs") {
        module.typedefs = elements(typedefs, "typedef")
            .map(|t| parse_typedef(t, name))
            .collect();
    }
    if let Some(nodes) = child(root, "nodes") {
        collect_nodes(nodes, name, &mut module.nodes);
    }
    if let Some(notifications) = child(root, "notifications") {
        module.nodes.extend(
            elements(notifications, "notification").map(|n| parse_notification(n, name)),
        );
    }
    for (section, tag, kind) in [
        ("groups", "group", NodeKind::Group),
        ("compliances", "compliance", NodeKind::Compliance),
    ] {
        if let Some(list) = child(root, section) {
            module
                .nodes
                .extend(elements(list, tag).map(|n| parse_node(n, kind, name)));
        }
    }

    Ok(module)
}

/// Walk `<nodes>`, flattening tables, rows and columns in document order.
fn collect_nodes(parent: Node<'_, '_>, module: &str, out: &mut Vec<NodeDefinition>) {
    for node in parent.children().filter(Node::is_element) {
        let kind = match node.tag_name().name() {
            "node" => NodeKind::Node,
            "scalar" => NodeKind::Scalar,
            "table" => NodeKind::Table,
            "row" => NodeKind::Row,
            "column" => NodeKind::Column,
            _ => continue,
        };
        out.push(parse_node(node, kind, module));
        if matches!(kind, NodeKind::Table | NodeKind::Row) {
            collect_nodes(node, module, out);
        }
    }
}

fn parse_node(node: Node<'_, '_>, kind: NodeKind, module: &str) -> NodeDefinition {
    let mut definition = NodeDefinition::new(node.attribute("name").unwrap_or_default(), kind)
        .with_oid(parse_oid(node))
        .with_description(description(node));
    definition.syntax = child(node, "syntax").and_then(|s| parse_syntax(s, module));
    definition
}

fn parse_notification(node: Node<'_, '_>, module: &str) -> NodeDefinition {
    let mut definition = parse_node(node, NodeKind::Notification, module);
    if let Some(objects) = child(node, "objects") {
        definition.objects = elements(objects, "object")
            .filter_map(|o| qualified(o, module))
            .collect();
    }
    definition
}

fn parse_syntax(syntax: Node<'_, '_>, module: &str) -> Option<SyntaxRef> {
    if let Some(reference) = child(syntax, "type").and_then(|t| qualified(t, module)) {
        return Some(SyntaxRef::Named(reference));
    }

    let inline = child(syntax, "typedef")?;
    let base = BaseType::from_smi_name(inline.attribute("basetype").unwrap_or_default());
    let values = named_numbers(inline);
    let parent = child(inline, "parent").and_then(|p| qualified(p, module));

    let resolved = match (base, parent) {
        (BaseType::Enumeration, _) if !values.is_empty() => Syntax::Enumeration(values),
        // A restriction of a named type without its own labels.
        (_, Some(parent)) => return Some(SyntaxRef::Named(parent)),
        (BaseType::Enumeration, None) => Syntax::Enumeration(values),
        (base, None) => Syntax::Other(base),
    };
    Some(SyntaxRef::Resolved(resolved))
}

fn parse_typedef(node: Node<'_, '_>, module: &str) -> TypeDefinition {
    let base = BaseType::from_smi_name(node.attribute("basetype").unwrap_or_default());
    let mut typedef = TypeDefinition::new(node.attribute("name").unwrap_or_default(), base)
        .with_values(named_numbers(node));
    typedef.parent = child(node, "parent").and_then(|p| qualified(p, module));
    typedef
}

fn named_numbers(node: Node<'_, '_>) -> EnumValues {
    elements(node, "namednumber")
        .filter_map(|n| {
            let label = n.attribute("name")?;
            let value = n.attribute("number")?.trim().parse::<i64>().ok()?;
            Some((value, label))
        })
        .collect()
}

/// `module`/`name` attribute pair; the module defaults to the current one.
fn qualified(node: Node<'_, '_>, module: &str) -> Option<QualifiedName> {
    let name = node.attribute("name").filter(|n| !n.is_empty())?;
    let module = node
        .attribute("module")
        .filter(|m| !m.is_empty())
        .unwrap_or(module);
    Some(QualifiedName::new(module, name))
}

fn parse_oid(node: Node<'_, '_>) -> Oid {
    node.attribute("oid")
        .and_then(Oid::from_dotted)
        .unwrap_or_default()
}

/// DESCRIPTION text with smidump's indentation stripped.
fn description(node: Node<'_, '_>) -> String {
    let text = child(node, "description")
        .and_then(|d| d.text())
        .unwrap_or_default();
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let start = lines.iter().position(|l| !l.is_empty()).unwrap_or(lines.len());
    let end = lines.iter().rposition(|l| !l.is_empty()).map_or(start, |i| i + 1);
    lines[start..end].join("\n")
}

fn elements<'a, 'input>(
    parent: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    parent
        .children()
        .filter(move |n| n.is_element() && n.tag_name().name() == tag)
}

fn child<'a, 'input>(parent: Node<'a, 'input>, tag: &'a str) -> Option<Node<'a, 'input>> {
    elements(parent, tag).next()
}
