use thiserror::Error;

use crate::catalog::{self, CatalogError, Category};
use crate::selection::Selection;

/// Substituted for the color line whenever the user picked no color
/// scheme at all. The line is never emitted empty.
pub const COLOR_FALLBACK_FRAGMENT: &str = "soft pastel colors";

/// Fixed preamble for the edit backend: this is an in-place clothing
/// overlay, not a regeneration of the photo.
const EDIT_TASK_HEADER: &str = "Edit this image.";

/// Constant across all requests; biases the backend toward a minimal,
/// localized edit instead of a full re-synthesis.
const STRICT_RULES_BLOCK: &str = "STRICT RULES:\n\
Add a realistic traditional Korean hanbok outfit to this pet.\n\
Preserve the original face, fur texture, lighting, and photo realism.\n\
Do not redraw the face.\n\
Do not change the body shape, pose, or anatomy.\n\
Only modify the clothing area.\n\
Keep the image photographic and natural.\n\
Do not change the background.\n\
Keep original lighting and shadows.";

const EDIT_CLOSING_CONSTRAINT: &str = "The result must look like the original photo \
with the hanbok composited onto the pet, not an artistic reinterpretation.";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComposeError {
    #[error("no option selected for category '{category}'")]
    IncompleteSelection { category: &'static str },
    #[error(transparent)]
    UnknownOption(#[from] CatalogError),
}

/// Build the instruction string for the edit backend.
///
/// Deterministic: same selection in, byte-identical prompt out. The
/// animal category is not consulted here since the uploaded photo
/// already shows the animal.
pub fn compose_edit_prompt(selection: &Selection) -> Result<String, ComposeError> {
    let mut sections = vec![
        EDIT_TASK_HEADER.to_string(),
        STRICT_RULES_BLOCK.to_string(),
        style_block(selection)?,
    ];
    if let Some(note) = trimmed_addendum(selection) {
        sections.push(note);
    }
    sections.push(EDIT_CLOSING_CONSTRAINT.to_string());
    Ok(sections.join("\n\n"))
}

/// Build the text-only prompt for the generate backend, which has no
/// source photo and therefore needs the animal described as well.
pub fn compose_generation_prompt(selection: &Selection) -> Result<String, ComposeError> {
    let animal = resolve_single(selection, Category::Animal)?;
    let mut sections = vec![
        format!(
            "A high-quality, photorealistic portrait of a {animal} wearing a traditional Korean hanbok."
        ),
        style_block(selection)?,
    ];
    if let Some(note) = trimmed_addendum(selection) {
        sections.push(note);
    }
    Ok(sections.join("\n\n"))
}

fn style_block(selection: &Selection) -> Result<String, ComposeError> {
    let gender = resolve_single(selection, Category::Gender)?;
    let outfit = resolve_single(selection, Category::OutfitStyle)?;
    let accessory = resolve_single(selection, Category::Accessory)?;
    let mood = resolve_single(selection, Category::Mood)?;
    Ok([
        format!("Hanbok style: {gender}, {outfit}"),
        format!("Color: {}", color_fragments(selection)?),
        format!("Accessories: {accessory}"),
        format!("Atmosphere: {mood}"),
    ]
    .join("\n"))
}

fn resolve_single(
    selection: &Selection,
    category: Category,
) -> Result<&'static str, ComposeError> {
    let label = selection
        .label_for(category)
        .ok_or(ComposeError::IncompleteSelection {
            category: category.display_name(),
        })?;
    Ok(catalog::resolve_fragment(category, label)?)
}

fn color_fragments(selection: &Selection) -> Result<String, ComposeError> {
    if selection.colors.is_empty() {
        return Ok(COLOR_FALLBACK_FRAGMENT.to_string());
    }
    let mut fragments = Vec::with_capacity(selection.colors.len());
    for label in &selection.colors {
        fragments.push(catalog::resolve_fragment(Category::ColorScheme, label)?);
    }
    Ok(fragments.join(", "))
}

fn trimmed_addendum(selection: &Selection) -> Option<String> {
    let note = selection.addendum.as_deref()?.trim();
    if note.is_empty() {
        None
    } else {
        Some(note.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;

    fn full_selection() -> Selection {
        Selection {
            animal: Some("고양이 🐱".to_string()),
            gender: Some("여자 한복 (여아)".to_string()),
            outfit: Some("왕족 👑".to_string()),
            colors: vec![
                "홍청 (빨강+파랑) 🔴🔵".to_string(),
                "하늘+연분홍 ☁️🌸".to_string(),
            ],
            accessory: Some("장신구 없음".to_string()),
            mood: Some("우아하고 품위있음 🦢".to_string()),
            addendum: None,
        }
    }

    #[test]
    fn same_selection_yields_byte_identical_prompts() {
        let selection = full_selection();
        let first = compose_edit_prompt(&selection).unwrap();
        let second = compose_edit_prompt(&selection).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn edit_prompt_carries_strict_rules_and_joined_colors() {
        let prompt = compose_edit_prompt(&full_selection()).unwrap();
        assert!(prompt.starts_with(EDIT_TASK_HEADER));
        assert!(prompt.contains(STRICT_RULES_BLOCK));
        assert!(prompt.contains(
            "Color: red and blue traditional colors, sky blue and light pink soft colors"
        ));
        assert!(prompt.contains("Hanbok style: female, royal Korean king/queen hanbok"));
        assert!(prompt.ends_with(EDIT_CLOSING_CONSTRAINT));
    }

    #[test]
    fn empty_color_set_falls_back_to_pastel() {
        let mut selection = full_selection();
        selection.colors.clear();
        let prompt = compose_edit_prompt(&selection).unwrap();
        assert!(prompt.contains("Color: soft pastel colors"));
        assert!(!prompt.contains("Color: \n"));
    }

    #[test]
    fn addendum_is_trimmed_and_included() {
        let mut selection = full_selection();
        selection.addendum = Some("  cherry blossom background  ".to_string());
        let prompt = compose_edit_prompt(&selection).unwrap();
        assert!(prompt.contains("\n\ncherry blossom background\n\n"));
    }

    #[test]
    fn whitespace_only_addendum_is_omitted_entirely() {
        let mut selection = full_selection();
        selection.addendum = Some("   \n\t ".to_string());
        let with_blank = compose_edit_prompt(&selection).unwrap();
        selection.addendum = None;
        let without = compose_edit_prompt(&selection).unwrap();
        assert_eq!(with_blank, without);
    }

    #[test]
    fn missing_required_category_is_an_error_not_a_default() {
        let mut selection = full_selection();
        selection.mood = None;
        let err = compose_edit_prompt(&selection).unwrap_err();
        assert_eq!(
            err,
            ComposeError::IncompleteSelection { category: "분위기" }
        );
    }

    #[test]
    fn forged_color_label_is_rejected() {
        let mut selection = full_selection();
        selection.colors = vec!["무지개".to_string()];
        let err = compose_edit_prompt(&selection).unwrap_err();
        assert!(matches!(err, ComposeError::UnknownOption(_)));
    }

    #[test]
    fn generation_prompt_describes_the_animal() {
        let prompt = compose_generation_prompt(&full_selection()).unwrap();
        assert!(prompt.contains("portrait of a cute cat wearing a traditional Korean hanbok"));
        assert!(prompt.contains("Atmosphere: elegant and graceful atmosphere"));
        assert!(!prompt.contains("Edit this image"));
    }

    #[test]
    fn generation_prompt_requires_the_animal_category() {
        let mut selection = full_selection();
        selection.animal = None;
        let err = compose_generation_prompt(&selection).unwrap_err();
        assert_eq!(
            err,
            ComposeError::IncompleteSelection {
                category: Category::Animal.display_name()
            }
        );
    }
}
