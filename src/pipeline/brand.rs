use once_cell::sync::Lazy;

use crate::models::UNKNOWN;

/// Brands recognised when no vocabulary is configured
pub const DEFAULT_BRANDS: [&str; 15] = [
    "Ferrari",
    "Lamborghini",
    "Aston Martin",
    "Bentley",
    "Rolls Royce",
    "Porsche",
    "Mercedes",
    "Mercedes Benz",
    "BMW",
    "Audi",
    "McLaren",
    "Jaguar",
    "Bugatti",
    "Maserati",
    "Pagani",
];

pub static DEFAULT_VOCABULARY: Lazy<BrandVocabulary> =
    Lazy::new(|| BrandVocabulary::new(DEFAULT_BRANDS));

/// Canonical brand names, ordered longest first.
///
/// Sorting happens once here so a short entry ("Mercedes") can never shadow a
/// longer one that contains it ("Mercedes Benz"). Equal lengths keep their
/// configured order.
#[derive(Debug, Clone)]
pub struct BrandVocabulary {
    entries: Vec<(String, String)>,
}

impl BrandVocabulary {
    pub fn new<I, S>(brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut entries: Vec<(String, String)> = brands
            .into_iter()
            .map(|brand| {
                let brand: String = brand.into();
                brand.trim().to_string()
            })
            .filter(|brand| !brand.is_empty())
            .map(|brand| {
                let folded = brand.to_lowercase();
                (brand, folded)
            })
            .collect();

        entries.sort_by(|a, b| b.1.chars().count().cmp(&a.1.chars().count()));

        Self { entries }
    }

    /// Canonical spellings in match order
    pub fn brands(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(brand, _)| brand.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Longest vocabulary entry found (case-insensitively) inside `name`,
    /// in its canonical spelling, or `"Unknown"`.
    ///
    /// A name mentioning two brands resolves to the longer entry, whichever
    /// brand the car actually is.
    pub fn resolve(&self, name: &str) -> &str {
        let folded = name.to_lowercase();
        self.entries
            .iter()
            .find(|(_, needle)| folded.contains(needle.as_str()))
            .map(|(brand, _)| brand.as_str())
            .unwrap_or(UNKNOWN)
    }
}

impl Default for BrandVocabulary {
    fn default() -> Self {
        (*DEFAULT_VOCABULARY).clone()
    }
}
