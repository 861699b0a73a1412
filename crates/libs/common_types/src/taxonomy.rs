use serde::Serialize;
use utoipa::ToSchema;

/// Maximum number of colors stored per item.
pub const MAX_ITEM_COLORS: usize = 3;

/// The closed vocabularies used for tagging and filtering clothing items.
///
/// The vocabulary is advisory: it constrains what the AI tagger is allowed to
/// generate, but the storage layer does not enforce it. It is passed in as
/// configuration wherever tags are produced or sanitized, so it can evolve
/// without touching query logic.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Taxonomy {
    pub categories: Vec<String>,
    pub sub_categories: Vec<String>,
    pub colors: Vec<String>,
    pub seasons: Vec<String>,
    pub occasions: Vec<String>,
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self {
            categories: to_strings(&[
                "Tops",
                "Bottoms",
                "Outerwear",
                "Shoes",
                "Accessories",
                "Dresses",
            ]),
            sub_categories: to_strings(&[
                // Tops
                "T-Shirt",
                "Shirt",
                "Blouse",
                "Sweater",
                "Hoodie",
                "Tank Top",
                // Bottoms
                "Jeans",
                "Pants",
                "Shorts",
                "Skirt",
                "Leggings",
                // Outerwear
                "Jacket",
                "Coat",
                "Blazer",
                "Vest",
                // Shoes
                "Sneakers",
                "Boots",
                "Sandals",
                "Heels",
                "Loafers",
                // Accessories
                "Scarf",
                "Belt",
                "Jewelry",
                "Watch",
                "Gloves",
                "Hat",
                "Bag",
            ]),
            colors: to_strings(&[
                "Black",
                "White",
                "Grey",
                "Beige",
                "Brown",
                "Red",
                "Blue",
                "Green",
                "Yellow",
                "Orange",
                "Purple",
                "Pink",
                "Gold",
                "Silver",
                "Multi-colored",
            ]),
            seasons: to_strings(&["Spring", "Summer", "Fall", "Winter", "All Season"]),
            occasions: to_strings(&[
                "Casual",
                "Business Casual",
                "Formal",
                "Party",
                "Sport/Active",
                "Lounge",
            ]),
        }
    }
}

impl Taxonomy {
    /// Looks a value up in a vocabulary, ignoring case, and returns the
    /// canonical spelling when present.
    #[must_use]
    pub fn canonical<'a>(vocabulary: &'a [String], value: &str) -> Option<&'a str> {
        vocabulary
            .iter()
            .find(|entry| entry.eq_ignore_ascii_case(value.trim()))
            .map(String::as_str)
    }

    /// Filters a list of generated tags down to known vocabulary entries,
    /// normalized to canonical spelling. Order is preserved, duplicates
    /// collapse to the first occurrence.
    #[must_use]
    pub fn retain_known(vocabulary: &[String], values: &[String]) -> Vec<String> {
        let mut kept: Vec<String> = Vec::new();
        for value in values {
            if let Some(canonical) = Self::canonical(vocabulary, value)
                && !kept.iter().any(|existing| existing == canonical)
            {
                kept.push(canonical.to_string());
            }
        }
        kept
    }

    /// Comma-joined vocabulary list for inclusion in a generation prompt.
    #[must_use]
    pub fn prompt_list(vocabulary: &[String]) -> String {
        vocabulary.join(", ")
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_is_case_insensitive() {
        let taxonomy = Taxonomy::default();
        assert_eq!(
            Taxonomy::canonical(&taxonomy.categories, "tops"),
            Some("Tops")
        );
        assert_eq!(
            Taxonomy::canonical(&taxonomy.colors, " multi-COLORED "),
            Some("Multi-colored")
        );
        assert_eq!(Taxonomy::canonical(&taxonomy.categories, "Spaceships"), None);
    }

    #[test]
    fn retain_known_drops_invented_tags_and_duplicates() {
        let taxonomy = Taxonomy::default();
        let generated = to_strings(&["red", "Neon", "Blue", "RED"]);
        assert_eq!(
            Taxonomy::retain_known(&taxonomy.colors, &generated),
            to_strings(&["Red", "Blue"])
        );
    }
}
