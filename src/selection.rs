use crate::catalog::{self, Category};

/// Everything the user picked for one dress-up request.
///
/// Lives for a single request only; nothing here is shared or cached
/// across requests. Single-select categories hold the chosen display
/// label, colors hold zero or more labels, and the addendum is free text
/// passed through opaque.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub animal: Option<String>,
    pub gender: Option<String>,
    pub outfit: Option<String>,
    pub colors: Vec<String>,
    pub accessory: Option<String>,
    pub mood: Option<String>,
    pub addendum: Option<String>,
}

impl Selection {
    /// Selection preloaded with the first option of each single-select
    /// category, the same defaults the upload form shows. Colors start
    /// empty so the composer's fallback applies until the user picks one.
    pub fn with_defaults() -> Self {
        let first = |category| {
            catalog::options(category)
                .first()
                .map(|opt| opt.label.to_string())
        };
        Self {
            animal: first(Category::Animal),
            gender: first(Category::Gender),
            outfit: first(Category::OutfitStyle),
            colors: Vec::new(),
            accessory: first(Category::Accessory),
            mood: first(Category::Mood),
            addendum: None,
        }
    }

    pub fn label_for(&self, category: Category) -> Option<&str> {
        match category {
            Category::Animal => self.animal.as_deref(),
            Category::Gender => self.gender.as_deref(),
            Category::OutfitStyle => self.outfit.as_deref(),
            Category::Accessory => self.accessory.as_deref(),
            Category::Mood => self.mood.as_deref(),
            Category::ColorScheme => None,
        }
    }

    pub fn choose(&mut self, category: Category, label: String) {
        match category {
            Category::Animal => self.animal = Some(label),
            Category::Gender => self.gender = Some(label),
            Category::OutfitStyle => self.outfit = Some(label),
            Category::Accessory => self.accessory = Some(label),
            Category::Mood => self.mood = Some(label),
            Category::ColorScheme => self.colors.push(label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_single_select_category() {
        let selection = Selection::with_defaults();
        for &category in catalog::categories() {
            if !category.is_multi_select() {
                assert!(selection.label_for(category).is_some());
            }
        }
        assert!(selection.colors.is_empty());
        assert!(selection.addendum.is_none());
    }

    #[test]
    fn choosing_a_color_appends_instead_of_replacing() {
        let mut selection = Selection::default();
        selection.choose(Category::ColorScheme, "a".to_string());
        selection.choose(Category::ColorScheme, "b".to_string());
        assert_eq!(selection.colors, vec!["a", "b"]);
    }
}
