//! Cultural lexicon: terms grouped by category.

use ces_core::enums::CulturalCategory;

/// Terms known to the cultural detector, grouped by category.
///
/// Categories are scanned in [`CulturalCategory::ALL`] order and terms in
/// insertion order, so detector output order follows the lexicon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    entries: Vec<(CulturalCategory, Vec<String>)>,
}

impl Lexicon {
    /// Build a lexicon from `(category, terms)` pairs.
    ///
    /// Entries are reordered into category order. Terms for a category listed
    /// twice are appended to the first entry. Blank terms are dropped.
    #[must_use]
    pub fn new<I, T, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (CulturalCategory, T)>,
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut grouped: Vec<(CulturalCategory, Vec<String>)> = Vec::new();
        for (category, terms) in entries {
            let terms = terms
                .into_iter()
                .map(Into::<String>::into)
                .filter(|t: &String| !t.trim().is_empty());
            match grouped.iter_mut().find(|(c, _)| *c == category) {
                Some((_, existing)) => existing.extend(terms),
                None => grouped.push((category, terms.collect())),
            }
        }
        grouped.sort_by_key(|(category, _)| *category);
        Self { entries: grouped }
    }

    /// The Filipino lexicon used by default.
    #[must_use]
    pub fn filipino() -> Self {
        Self::new([
            (
                CulturalCategory::Values,
                vec![
                    "bayanihan",
                    "kapwa",
                    "pakikipagkapwa",
                    "utang na loob",
                    "hiya",
                    "bahala na",
                    "malasakit",
                ],
            ),
            (
                CulturalCategory::Festivals,
                vec![
                    "fiesta",
                    "pasko",
                    "mahal na araw",
                    "flores de mayo",
                    "sinulog",
                    "ati-atihan",
                ],
            ),
            (
                CulturalCategory::Family,
                vec![
                    "pamilya", "nanay", "tatay", "lola", "lolo", "ate", "kuya", "bunso",
                ],
            ),
            (
                CulturalCategory::Food,
                vec![
                    "adobo",
                    "sinigang",
                    "lechon",
                    "lumpia",
                    "halo-halo",
                    "balut",
                    "taho",
                    "sisig",
                ],
            ),
            (
                CulturalCategory::Expressions,
                vec![
                    "salamat",
                    "kumusta",
                    "pasensya na",
                    "kaya natin to",
                    "sige",
                    "ingat",
                    "mahal kita",
                ],
            ),
            (
                CulturalCategory::Places,
                vec![
                    "barangay",
                    "palengke",
                    "sari-sari store",
                    "jeepney",
                    "tricycle",
                    "kalye",
                ],
            ),
            (
                CulturalCategory::Occasions,
                vec![
                    "noche buena",
                    "media noche",
                    "handaan",
                    "binyag",
                    "kasal",
                    "birthday",
                ],
            ),
        ])
    }

    /// `(category, term)` pairs in scan order.
    pub fn terms(&self) -> impl Iterator<Item = (CulturalCategory, &str)> {
        self.entries
            .iter()
            .flat_map(|(category, terms)| terms.iter().map(move |t| (*category, t.as_str())))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, terms)| terms.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::filipino()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn filipino_lexicon_covers_every_category() {
        let lexicon = Lexicon::filipino();
        for category in CulturalCategory::ALL {
            assert!(
                lexicon.terms().any(|(c, _)| c == category),
                "no terms for {category}"
            );
        }
        assert_eq!(lexicon.len(), 48);
    }

    #[test]
    fn entries_are_reordered_by_category() {
        let lexicon = Lexicon::new([
            (CulturalCategory::Food, vec!["adobo"]),
            (CulturalCategory::Values, vec!["kapwa"]),
            (CulturalCategory::Food, vec!["taho", "  "]),
        ]);
        let terms: Vec<_> = lexicon.terms().collect();
        assert_eq!(
            terms,
            vec![
                (CulturalCategory::Values, "kapwa"),
                (CulturalCategory::Food, "adobo"),
                (CulturalCategory::Food, "taho"),
            ]
        );
    }

    #[test]
    fn empty_lexicon() {
        let lexicon = Lexicon::new(Vec::<(CulturalCategory, Vec<&str>)>::new());
        assert!(lexicon.is_empty());
    }
}
