//! Guessing from embedded documentation.
//!
//! Only the license section is examined: the text from the first heading
//! whose title starts with "license", "licence", "licensing", "copyright" or
//! "legal" up to the next heading or the end of the documentation block.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::LicenseClassifier;
use crate::guess::Guess;
use crate::phrases::PhraseTable;

static SECTION_HEADER: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?im)=head\d\s+(?:licen[cs]e|licensing|copyright|legal)\b").expect("section header pattern is valid")
});

static SECTION_END: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?i)=head\d|=cut").expect("section end pattern is valid"));

/// The license section of `text`: its header followed by its body.
///
/// Returns `None` when the text has no license-like header.
pub fn license_section(text: &str) -> Option<&str> {
  let header = SECTION_HEADER.find(text)?;
  let rest = &text[header.end()..];
  let body_len = SECTION_END.find(rest).map_or(rest.len(), |end| end.start());
  Some(&text[header.start()..header.end() + body_len])
}

/// Classifies documentation text against a phrase table.
#[derive(Debug, Clone, Copy)]
pub struct TextClassifier<'a> {
  phrases: &'a PhraseTable,
}

impl<'a> TextClassifier<'a> {
  pub const fn new(phrases: &'a PhraseTable) -> Self {
    Self { phrases }
  }
}

impl LicenseClassifier for TextClassifier<'_> {
  fn classify(&self, input: &str) -> Guess {
    let Some(section) = license_section(input) else {
      debug!("No license section found");
      return Guess::none();
    };
    self.phrases.classify(section)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_section_runs_to_next_heading() {
    let pod = "=head1 NAME\n\nFoo\n\n=head1 LICENSE\n\nMIT terms.\n\n=head1 AUTHOR\n\nGPL Person\n";
    assert_eq!(license_section(pod), Some("=head1 LICENSE\n\nMIT terms.\n\n"));
  }

  #[test]
  fn test_section_runs_to_cut() {
    let pod = "=head2 Copyright and License\n\nBSD.\n\n=cut\n\nsub gpl {}\n";
    assert_eq!(license_section(pod), Some("=head2 Copyright and License\n\nBSD.\n\n"));
  }

  #[test]
  fn test_section_runs_to_end_of_text() {
    let pod = "=head1 LEGAL\n\nSee LICENSE.";
    assert_eq!(license_section(pod), Some(pod));
  }

  #[test]
  fn test_header_keywords() {
    for header in ["LICENCE", "Licensing", "COPYRIGHT AND LICENSE", "legal notice"] {
      let pod = format!("=head1 {header}\n\ntext\n");
      assert!(license_section(&pod).is_some(), "{header} should start a section");
    }
    assert!(license_section("=head1 LICENSES_ELSEWHERE\n").is_none());
    assert!(license_section("=head1 DESCRIPTION\n\nLicensed under MIT.\n").is_none());
  }

  #[test]
  fn test_classifier_ignores_text_outside_section() {
    let phrases = PhraseTable::authored();
    let classifier = TextClassifier::new(&phrases);

    let pod = "=head1 DESCRIPTION\n\nNot GPL.\n\n=head1 LICENSE\n\nthe MIT license\n\n=head1 SEE ALSO\n\nGPL\n";
    assert_eq!(classifier.classify(pod).to_string(), "MIT");
    assert!(classifier.classify("no documentation here").is_empty());
  }
}
