//! Shared helpers for the integration tests.
#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Directory holding the smidump XML fixtures.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// A stand-in for `smidump` that serves the fixtures.
///
/// It prints `<fixtures>/<module>.xml` for the last argument, or fails the
/// way libsmi does for unknown modules. `SMIPATH-MIB` echoes `SMIPATH` in a
/// notification description. `BROKEN-MIB` fails on an unresolvable
/// import. Every requested module is appended to
/// `dumped.log` in the first `SMIPATH` directory when that directory exists.
pub fn smidump_stub() -> &'static Path {
    static STUB: OnceLock<PathBuf> = OnceLock::new();
    STUB.get_or_init(|| {
        let path = Path::new(env!("CARGO_TARGET_TMPDIR"))
            .join(format!("smidump-stub-{}", std::process::id()));
        let script = format!(
            r#"#!/bin/sh
for module; do :; done
first="${{SMIPATH%%:*}}"
if [ -n "$first" ] && [ -d "$first" ]; then
    echo "$module" >> "$first/dumped.log"
fi
if [ "$module" = "SMIPATH-MIB" ]; then
    cat <<XML
<?xml version="1.0"?>
<smi>
  <module name="SMIPATH-MIB"/>
  <notifications>
    <notification name="searchPath" oid="1.3.6.1.4.1.99999.99.0.1">
      <description>$SMIPATH</description>
    </notification>
  </notifications>
</smi>
XML
    exit 0
fi
if [ "$module" = "BROKEN-MIB" ]; then
    echo "smidump: cannot locate module \`MISSING-TC'" >&2
    echo "BROKEN-MIB:12: failed to locate MIB module \`MISSING-TC'" >&2
    exit 1
fi
if [ -f "{fixtures}/$module.xml" ]; then
    cat "{fixtures}/$module.xml"
    exit 0
fi
echo "smidump: cannot locate module \`$module'" >&2
exit 1
"#,
            fixtures = fixtures_dir().display()
        );
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    })
}

/// Modules the stub was asked for, in order.
pub fn dumped_modules(search_dir: &Path) -> Vec<String> {
    fs::read_to_string(search_dir.join("dumped.log"))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}
