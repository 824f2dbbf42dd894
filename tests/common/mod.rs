#![allow(dead_code)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// A config file adding one license and an alias for it.
pub const ACME_CONFIG: &str = concat!(
  "[[licenses]]\n",
  "identifier = \"Acme_1_0\"\n",
  "name = \"The Acme Public License 1.0\"\n",
  "meta-name = \"open_source\"\n",
  "meta2-name = \"acme_1\"\n",
  "spdx = \"Acme-1.0\"\n",
  "\n",
  "[short-names]\n",
  "\"Acme\" = \"Acme_1_0\"\n",
);

/// Wraps `body` in a POD document whose license section contains it.
pub fn pod_with_license(body: &str) -> String {
  format!(
    "package Foo;\n\n1;\n\n__END__\n\n=head1 NAME\n\nFoo - does foo things\n\n=head1 COPYRIGHT AND LICENSE\n\n{body}\n\n=head1 AUTHOR\n\nJane Doe\n\n=cut\n"
  )
}

/// Writes `content` to `name` inside `dir` and returns the path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
  let path = dir.join(name);
  std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
  Ok(path)
}
