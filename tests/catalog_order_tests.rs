//! Results must not depend on the order in which plugins are enumerated.

mod common;

use common::pod_with_license;
use licguess::Engine;
use licguess::builtin::{BUILTIN_LICENSES, BuiltinLicense};
use licguess::plugin::{LicensePlugin, PluginCatalog, PluginSlot};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

struct ShuffledCatalog(Vec<BuiltinLicense>);

impl ShuffledCatalog {
  fn new(seed: u64) -> Self {
    let mut licenses = BUILTIN_LICENSES.to_vec();
    licenses.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));
    Self(licenses)
  }
}

impl PluginCatalog for ShuffledCatalog {
  fn discover(&self) -> Vec<PluginSlot> {
    self
      .0
      .iter()
      .map(|license| Ok(Box::new(*license) as Box<dyn LicensePlugin>))
      .collect()
  }
}

fn samples() -> Vec<String> {
  [
    "the same terms as Perl itself",
    "the same terms as the perl 5 programming language system itself",
    "The MIT (X11) License",
    "The MIT License",
    "the GNU General Public License",
    "the GNU General Public License, version 3",
    "The GNU Lesser General Public License, Version 2.1, February 1999",
    "The Artistic License 1.0",
    "The (three-clause) BSD License",
    "The FreeBSD License",
    "Mozilla Public License Version 2.0",
    "The European Union Public License (EUPL) v1.2",
    "no license",
    "something else entirely",
  ]
  .iter()
  .map(|body| pod_with_license(body))
  .collect()
}

#[test]
fn test_enumeration_order_does_not_change_results() {
  let reference = Engine::global();

  for seed in 0..16 {
    let engine = Engine::from_catalog(&ShuffledCatalog::new(seed));

    for sample in samples() {
      assert_eq!(
        engine.classify_from_text(&sample),
        reference.classify_from_text(&sample),
        "seed {seed} changed the text guess for {sample:?}"
      );
    }

    for (key, ids) in reference.catalog().keys(None) {
      let guess = engine.lookup_by_key(key, None).expect("unversioned lookup");
      assert_eq!(guess.len(), ids.len(), "seed {seed} changed key {key}");
    }

    let reference_sources: Vec<&str> = reference.phrases().iter().map(|entry| entry.source()).collect();
    let sources: Vec<&str> = engine.phrases().iter().map(|entry| entry.source()).collect();
    assert_eq!(sources, reference_sources, "seed {seed} changed the phrase table");
  }
}
