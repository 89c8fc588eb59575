//! Telegraf configuration rendering.
//!
//! Output layout:
//!
//! ```toml
//! # Generated by trapgen 0.1.0 for module EXAMPLE-MIB.
//! # ...
//!
//! [[processors.enum]]
//! namepass = ["snmp_trap"]
//!
//! [processors.enum.tagpass]
//! mib = ["EXAMPLE-MIB"]
//!
//! [[processors.enum.mapping]]
//! field = "ifAdminStatus"
//!
//! [processors.enum.mapping.value_mappings]
//! 1 = "up"
//! 2 = "down"
//! ```

use serde::ser::{Serialize, Serializer};
use std::fmt::{self, Write};
use trapgen_core::model::{EnumTable, TrapConfig};

/// Measurement name Telegraf's SNMP trap input reports.
pub const TRAP_MEASUREMENT: &str = "snmp_trap";

/// Error rendering a configuration.
#[derive(Debug)]
pub struct RenderError(toml::ser::Error);

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "serializing config failed: {}", self.0)
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

#[derive(serde::Serialize)]
struct TelegrafConfig<'a> {
    processors: Processors<'a>,
}

#[derive(serde::Serialize)]
struct Processors<'a> {
    #[serde(rename = "enum")]
    enums: Vec<EnumProcessor<'a>>,
}

#[derive(serde::Serialize)]
struct EnumProcessor<'a> {
    namepass: [&'a str; 1],
    tagpass: TagPass<'a>,
    mapping: Vec<Mapping<'a>>,
}

#[derive(serde::Serialize)]
struct TagPass<'a> {
    mib: [&'a str; 1],
}

#[derive(serde::Serialize)]
struct Mapping<'a> {
    field: &'a str,
    value_mappings: ValueMappings<'a>,
}

/// Serializes as a table keyed by the decimal value, in ascending order.
struct ValueMappings<'a>(&'a EnumTable);

impl Serialize for ValueMappings<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(value, label)| (value.to_string(), label)))
    }
}

/// Render `config` as a Telegraf configuration.
///
/// # Errors
///
/// Returns an error if the TOML serializer rejects the document.
pub fn render(config: &TrapConfig) -> Result<String, RenderError> {
    let mut out = header(config);

    if config.enums.is_empty() {
        return Ok(out);
    }

    let document = TelegrafConfig {
        processors: Processors {
            enums: vec![EnumProcessor {
                namepass: [TRAP_MEASUREMENT],
                tagpass: TagPass {
                    mib: [config.module.as_str()],
                },
                mapping: config
                    .enums
                    .iter()
                    .map(|(field, table)| Mapping {
                        field: field.as_str(),
                        value_mappings: ValueMappings(table),
                    })
                    .collect(),
            }],
        },
    };

    out.push('\n');
    out.push_str(&toml::to_string(&document).map_err(RenderError)?);
    Ok(out)
}

fn header(config: &TrapConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "# Generated by trapgen {} for module {}.",
        env!("CARGO_PKG_VERSION"),
        config.module
    );
    let _ = writeln!(out, "#");
    let _ = writeln!(out, "# Fields: {}", config.fields.join(", "));

    for trap in &config.traps {
        let _ = writeln!(out, "#");
        let _ = writeln!(out, "# {} ({})", trap.name, trap.oid);
        let _ = writeln!(out, "#   fields: {}", trap.fields.join(", "));
        for line in trap.description.lines() {
            if line.is_empty() {
                let _ = writeln!(out, "#");
            } else {
                let _ = writeln!(out, "#   {line}");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use trapgen_core::model::{Oid, Trap};

    fn config() -> TrapConfig {
        let status: EnumTable = [(3, "testing"), (1, "up"), (2, "down")].into_iter().collect();
        TrapConfig {
            module: "EXAMPLE-MIB".into(),
            fields: vec!["ifAdminStatus".into(), "ifIndex".into()],
            enums: [("ifAdminStatus".to_string(), status)].into_iter().collect(),
            traps: vec![Trap {
                name: "linkDown".into(),
                oid: Oid::new(vec![1, 3, 6, 1, 4, 1, 99999, 0, 1]),
                description: "Link went down.\n\nSee ifAdminStatus.".into(),
                fields: vec!["ifIndex".into(), "ifAdminStatus".into()],
            }],
        }
    }

    #[test]
    fn test_render_structure() {
        let text = render(&config()).unwrap();
        let value: toml::Value = toml::from_str(&text).unwrap();

        let processor = &value["processors"]["enum"][0];
        assert_eq!(processor["namepass"][0].as_str(), Some("snmp_trap"));
        assert_eq!(processor["tagpass"]["mib"][0].as_str(), Some("EXAMPLE-MIB"));

        let mappings = processor["mapping"].as_array().unwrap();
        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings[0]["field"].as_str(), Some("ifAdminStatus"));
        let values = mappings[0]["value_mappings"].as_table().unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(values["1"].as_str(), Some("up"));
        assert_eq!(values["3"].as_str(), Some("testing"));
    }

    #[test]
    fn test_value_mappings_ascending() {
        let text = render(&config()).unwrap();
        let up = text.find("= \"up\"").unwrap();
        let down = text.find("= \"down\"").unwrap();
        let testing = text.find("= \"testing\"").unwrap();
        assert!(up < down && down < testing);
    }

    #[test]
    fn test_negative_values_quoted_keys() {
        let mut config = config();
        config
            .enums
            .insert("offset".into(), [(-1, "below"), (0, "zero")].into_iter().collect());
        let value: toml::Value = toml::from_str(&render(&config).unwrap()).unwrap();

        let mappings = value["processors"]["enum"][0]["mapping"].as_array().unwrap();
        assert_eq!(mappings[1]["field"].as_str(), Some("offset"));
        assert_eq!(mappings[1]["value_mappings"]["-1"].as_str(), Some("below"));
    }

    #[test]
    fn test_header() {
        let text = render(&config()).unwrap();
        let header: Vec<&str> = text.lines().take_while(|l| l.starts_with('#')).collect();

        assert!(header[0].starts_with("# Generated by trapgen "));
        assert!(header[0].ends_with(" for module EXAMPLE-MIB."));
        assert!(header.contains(&"# Fields: ifAdminStatus, ifIndex"));
        assert!(header.contains(&"# linkDown (1.3.6.1.4.1.99999.0.1)"));
        assert!(header.contains(&"#   fields: ifIndex, ifAdminStatus"));
        assert!(header.contains(&"#   See ifAdminStatus."));
    }

    #[test]
    fn test_no_enums_header_only() {
        let mut config = config();
        config.enums.clear();
        let text = render(&config).unwrap();

        assert!(text.lines().all(|l| l.starts_with('#')));
        assert!(!text.contains("processors"));
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(render(&config()).unwrap(), render(&config()).unwrap());
    }
}
