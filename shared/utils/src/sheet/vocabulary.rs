//! Header vocabularies: the words that identify a header row and each column role.

use packtally_models::FieldRole;
use std::collections::BTreeMap;

/// Substring patterns matched against normalized header text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderVocabulary {
    /// Any of these inside a row's joined text marks it as the header row.
    pub detection_terms: Vec<String>,
    /// Role patterns, tried against each header label in column order.
    pub role_patterns: BTreeMap<FieldRole, Vec<String>>,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

impl Default for HeaderVocabulary {
    fn default() -> Self {
        Self::packing()
    }
}

impl HeaderVocabulary {
    /// Purchase-order and packing exports: S.No / Company / Reference / Description of goods / Packing ...
    pub fn packing() -> Self {
        let role_patterns = BTreeMap::from([
            (FieldRole::Ordinal, words(&["s.no", "sno", "s no", "sl no", "serial"])),
            (FieldRole::Date, words(&["date", "dt"])),
            (FieldRole::Party, words(&["company", "party", "supplier"])),
            (FieldRole::Reference, words(&["reference", "ref"])),
            (
                FieldRole::Description,
                words(&[
                    "description of goods",
                    "description",
                    "descripton",
                    "descrption",
                    "descrip",
                    "descr",
                    "desc",
                    "variety",
                ]),
            ),
            (
                FieldRole::Packing,
                words(&["packing size", "packing", "pack", "size", "weight", "kg"]),
            ),
            (FieldRole::Quantity, words(&["quantity", "qty", "qnty"])),
            (FieldRole::Rate, words(&["rate"])),
            (FieldRole::Amount, words(&["amount", "amt", "total"])),
        ]);

        Self {
            detection_terms: words(&["company", "description", "s.no", "reference", "packing"]),
            role_patterns,
        }
    }

    /// Used-bags sheets: Variety / Packing Size / No of bags used.
    pub fn usage() -> Self {
        let mut vocabulary = Self::packing();
        vocabulary.detection_terms.extend(words(&["variety", "used"]));
        vocabulary.role_patterns.insert(
            FieldRole::Description,
            words(&["variety", "description", "descrption", "desc"]),
        );
        vocabulary.role_patterns.insert(
            FieldRole::Quantity,
            words(&["no of bags used", "bags used", "used"]),
        );
        vocabulary
    }

    pub fn patterns(&self, role: FieldRole) -> &[String] {
        self.role_patterns
            .get(&role)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether a normalized header label matches any pattern of `role`.
    pub fn label_matches(&self, role: FieldRole, normalized_label: &str) -> bool {
        !normalized_label.is_empty()
            && self
                .patterns(role)
                .iter()
                .any(|p| normalized_label.contains(p.as_str()))
    }

    /// Whether a row's joined, normalized text looks like a header row.
    pub fn is_header_text(&self, normalized_row: &str) -> bool {
        self.detection_terms
            .iter()
            .any(|term| normalized_row.contains(term.as_str()))
    }
}
