//! # Built-in Licenses
//!
//! The license definitions compiled into the crate, exposed as a
//! [`PluginCatalog`]. Metadata keys follow the CPAN::Meta conventions: v1 keys
//! name license families (`gpl`, `lgpl`, `open_source`), v2 keys usually name
//! a single version (`gpl_2`, `lgpl_2_1`).

use crate::plugin::{LicensePlugin, PluginCatalog, PluginSlot};

/// A compiled-in license definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinLicense {
  pub identifier: &'static str,
  pub name: &'static str,
  pub meta_name: &'static str,
  pub meta2_name: &'static str,
  pub spdx: Option<&'static str>,
  pub url: Option<&'static str>,
  pub or_later: bool,
}

impl LicensePlugin for BuiltinLicense {
  fn identifier(&self) -> &str {
    self.identifier
  }

  fn v1_key(&self) -> &str {
    self.meta_name
  }

  fn v2_key(&self) -> &str {
    self.meta2_name
  }

  fn canonical_name(&self) -> &str {
    self.name
  }

  fn spdx_expression(&self) -> Option<&str> {
    self.spdx
  }

  fn url(&self) -> Option<&str> {
    self.url
  }

  fn allows_or_later(&self) -> bool {
    self.or_later
  }
}

const fn license(
  identifier: &'static str,
  name: &'static str,
  meta_name: &'static str,
  meta2_name: &'static str,
  spdx: Option<&'static str>,
  url: Option<&'static str>,
  or_later: bool,
) -> BuiltinLicense {
  BuiltinLicense {
    identifier,
    name,
    meta_name,
    meta2_name,
    spdx,
    url,
    or_later,
  }
}

/// Every license the crate knows without configuration.
pub const BUILTIN_LICENSES: &[BuiltinLicense] = &[
  license(
    "AGPL_3",
    "The GNU Affero General Public License, Version 3, November 2007",
    "open_source",
    "agpl_3",
    Some("AGPL-3.0"),
    Some("https://www.gnu.org/licenses/agpl-3.0.txt"),
    true,
  ),
  license(
    "Apache_1_1",
    "The Apache Software License, Version 1.1",
    "apache",
    "apache_1_1",
    Some("Apache-1.1"),
    Some("https://www.apache.org/licenses/LICENSE-1.1"),
    false,
  ),
  license(
    "Apache_2_0",
    "The Apache License, Version 2.0, January 2004",
    "apache",
    "apache_2_0",
    Some("Apache-2.0"),
    Some("https://www.apache.org/licenses/LICENSE-2.0.txt"),
    false,
  ),
  license(
    "Artistic_1_0",
    "The Artistic License 1.0",
    "artistic",
    "artistic_1",
    Some("Artistic-1.0"),
    Some("https://www.perlfoundation.org/artistic-license-10.html"),
    false,
  ),
  license(
    "Artistic_2_0",
    "The Artistic License 2.0 (GPL Compatible)",
    "artistic_2",
    "artistic_2",
    Some("Artistic-2.0"),
    Some("https://www.perlfoundation.org/artistic-license-20.html"),
    false,
  ),
  license(
    "BSD",
    "The (three-clause) BSD License",
    "bsd",
    "bsd",
    Some("BSD-3-Clause"),
    Some("https://opensource.org/licenses/BSD-3-Clause"),
    false,
  ),
  license(
    "CC0_1_0",
    "the CC0 1.0 Universal License",
    "unrestricted",
    "unrestricted",
    Some("CC0-1.0"),
    Some("https://creativecommons.org/publicdomain/zero/1.0/legalcode"),
    false,
  ),
  license(
    "EUPL_1_1",
    "The European Union Public License (EUPL) v1.1",
    "open_source",
    "open_source",
    Some("EUPL-1.1"),
    Some("https://joinup.ec.europa.eu/collection/eupl/eupl-text-11-12"),
    false,
  ),
  license(
    "EUPL_1_2",
    "The European Union Public License (EUPL) v1.2",
    "open_source",
    "open_source",
    Some("EUPL-1.2"),
    Some("https://joinup.ec.europa.eu/collection/eupl/eupl-text-eupl-12"),
    false,
  ),
  license(
    "FreeBSD",
    "The FreeBSD License",
    "bsd",
    "freebsd",
    Some("BSD-2-Clause-FreeBSD"),
    Some("https://www.freebsd.org/copyright/freebsd-license/"),
    false,
  ),
  license(
    "GFDL_1_2",
    "GNU Free Documentation License v1.2",
    "open_source",
    "gfdl_1_2",
    Some("GFDL-1.2"),
    Some("https://www.gnu.org/licenses/old-licenses/fdl-1.2.txt"),
    true,
  ),
  license(
    "GFDL_1_3",
    "GNU Free Documentation License v1.3",
    "open_source",
    "gfdl_1_3",
    Some("GFDL-1.3"),
    Some("https://www.gnu.org/licenses/fdl-1.3.txt"),
    true,
  ),
  license(
    "GPL_1",
    "The GNU General Public License, Version 1, February 1989",
    "gpl",
    "gpl_1",
    Some("GPL-1.0"),
    Some("https://www.gnu.org/licenses/old-licenses/gpl-1.0.txt"),
    true,
  ),
  license(
    "GPL_2",
    "The GNU General Public License, Version 2, June 1991",
    "gpl",
    "gpl_2",
    Some("GPL-2.0"),
    Some("https://www.gnu.org/licenses/old-licenses/gpl-2.0.txt"),
    true,
  ),
  license(
    "GPL_3",
    "The GNU General Public License, Version 3, June 2007",
    "gpl",
    "gpl_3",
    Some("GPL-3.0"),
    Some("https://www.gnu.org/licenses/gpl-3.0.txt"),
    true,
  ),
  license(
    "ISC",
    "The ISC License",
    "open_source",
    "open_source",
    Some("ISC"),
    Some("https://www.isc.org/licenses/"),
    false,
  ),
  license(
    "LGPL_2",
    "GNU Library General Public License, Version 2, June 1991",
    "lgpl",
    "open_source",
    Some("LGPL-2.0"),
    Some("https://www.gnu.org/licenses/old-licenses/lgpl-2.0.txt"),
    true,
  ),
  license(
    "LGPL_2_1",
    "The GNU Lesser General Public License, Version 2.1, February 1999",
    "lgpl",
    "lgpl_2_1",
    Some("LGPL-2.1"),
    Some("https://www.gnu.org/licenses/old-licenses/lgpl-2.1.txt"),
    true,
  ),
  license(
    "LGPL_3_0",
    "The GNU Lesser General Public License, Version 3, June 2007",
    "lgpl",
    "lgpl_3_0",
    Some("LGPL-3.0"),
    Some("https://www.gnu.org/licenses/lgpl-3.0.txt"),
    true,
  ),
  license(
    "MIT",
    "The MIT (X11) License",
    "mit",
    "mit",
    Some("MIT"),
    Some("https://opensource.org/licenses/MIT"),
    false,
  ),
  license(
    "Mozilla_1_0",
    "The Mozilla Public License 1.0",
    "mozilla",
    "mozilla_1_0",
    Some("MPL-1.0"),
    Some("https://www.mozilla.org/MPL/1.0/"),
    false,
  ),
  license(
    "Mozilla_1_1",
    "The Mozilla Public License 1.1",
    "mozilla",
    "mozilla_1_1",
    Some("MPL-1.1"),
    Some("https://www.mozilla.org/MPL/1.1/"),
    false,
  ),
  license(
    "Mozilla_2_0",
    "Mozilla Public License Version 2.0",
    "mozilla",
    "open_source",
    Some("MPL-2.0"),
    Some("https://www.mozilla.org/MPL/2.0/"),
    false,
  ),
  license("None", "no license", "restrictive", "restricted", None, None, false),
  license(
    "OpenSSL",
    "The OpenSSL License",
    "open_source",
    "open_source",
    Some("OpenSSL"),
    Some("https://www.openssl.org/source/license.html"),
    false,
  ),
  license(
    "Perl_5",
    "the same terms as the perl 5 programming language system itself",
    "perl",
    "perl_5",
    Some("Artistic-1.0-Perl OR GPL-1.0-or-later"),
    None,
    false,
  ),
  license(
    "PostgreSQL",
    "The PostgreSQL License",
    "open_source",
    "open_source",
    Some("PostgreSQL"),
    Some("https://www.postgresql.org/about/licence/"),
    false,
  ),
  license(
    "QPL_1_0",
    "The Q Public License, Version 1.0",
    "open_source",
    "qpl_1_0",
    Some("QPL-1.0"),
    Some("https://opensource.org/licenses/QPL-1.0"),
    false,
  ),
  license(
    "SSLeay",
    "Original SSLeay License",
    "bsd",
    "open_source",
    None,
    Some("https://www.openssl.org/source/license.html"),
    false,
  ),
  license(
    "Sun",
    "Sun Internet Standards Source License (SISSL)",
    "open_source",
    "sun",
    Some("SISSL"),
    Some("https://opensource.org/licenses/sisslpl"),
    false,
  ),
  license(
    "Unlicense",
    "The Unlicense",
    "unrestricted",
    "unrestricted",
    Some("Unlicense"),
    Some("https://unlicense.org/"),
    false,
  ),
  license(
    "Zlib",
    "The zlib License",
    "open_source",
    "zlib",
    Some("Zlib"),
    Some("https://zlib.net/zlib_license.html"),
    false,
  ),
];

/// The compiled-in license definitions as a plugin catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl PluginCatalog for BuiltinCatalog {
  fn discover(&self) -> Vec<PluginSlot> {
    BUILTIN_LICENSES
      .iter()
      .map(|license| Ok(Box::new(*license) as Box<dyn LicensePlugin>))
      .collect()
  }
}
