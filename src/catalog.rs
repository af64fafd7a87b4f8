use thiserror::Error;

/// A dimension of hanbok styling the user picks from.
///
/// Display labels are Korean (they face the user); prompt fragments are
/// English (they face the image backend). The two are kept separate so
/// either side can be localized without touching the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Animal,
    Gender,
    OutfitStyle,
    ColorScheme,
    Accessory,
    Mood,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogOption {
    pub label: &'static str,
    pub fragment: &'static str,
}

const fn option(label: &'static str, fragment: &'static str) -> CatalogOption {
    CatalogOption { label, fragment }
}

static ANIMAL_OPTIONS: &[CatalogOption] = &[
    option("강아지 🐕", "cute puppy dog"),
    option("고양이 🐱", "cute cat"),
];

static GENDER_OPTIONS: &[CatalogOption] = &[
    option("남자 한복 (남아)", "male"),
    option("여자 한복 (여아)", "female"),
];

static OUTFIT_OPTIONS: &[CatalogOption] = &[
    option(
        "세자/공주 ✨",
        "Korean prince/princess hanbok with elegant silk and jeweled ornaments",
    ),
    option(
        "왕족 👑",
        "royal Korean king/queen hanbok with elaborate gold patterns and jade accessories",
    ),
    option(
        "신랑신부 💒",
        "traditional Korean wedding hanbok with vibrant colors and ceremonial decorations",
    ),
    option("무관 ⚔️", "Korean military officer hanbok with armor-inspired details"),
    option(
        "돌쇠 🪵",
        "traditional Korean servant (dolssoe) hanbok with simple cotton fabric, rolled sleeves, waist belt, straw shoes, and rustic countryside vibe",
    ),
];

static COLOR_OPTIONS: &[CatalogOption] = &[
    option("홍청 (빨강+파랑) 🔴🔵", "red and blue traditional colors"),
    option("분홍+연두 🌸💚", "pink and light green soft colors"),
    option("보라+노랑 💜💛", "purple and yellow royal colors"),
    option("흰색+금색 🤍✨", "white and gold elegant colors"),
    option("검정+금색 🖤✨", "black and gold sophisticated colors"),
    option("연두+살구 💚🍑", "light green and apricot spring colors"),
    option("하늘+연분홍 ☁️🌸", "sky blue and light pink soft colors"),
];

static ACCESSORY_OPTIONS: &[CatalogOption] = &[
    option("장신구 없음", "no accessories, simple and clean"),
    option("화려한 금관 👑", "elaborate golden crown with jewels"),
    option("전통 갓 🎩", "traditional Korean gat hat"),
    option("댕기/비녀 💎", "traditional Korean hair ribbon daenggi or binyeo hairpin"),
    option("노리개 🎀", "traditional Korean norigae ornamental tassel"),
    option("꽃 장식 🌺", "flower decorations in hair"),
];

static MOOD_OPTIONS: &[CatalogOption] = &[
    option("귀엽고 사랑스러움 🥰", "cute and adorable atmosphere"),
    option("위엄있고 당당함 🦁", "dignified and majestic atmosphere"),
    option("우아하고 품위있음 🦢", "elegant and graceful atmosphere"),
    option("화려하고 눈부심 ✨", "gorgeous and dazzling atmosphere"),
    option("단아하고 차분함 🌿", "refined and calm atmosphere"),
    option("발랄하고 생기있음 🌈", "lively and vibrant atmosphere"),
];

static CATEGORIES: &[Category] = &[
    Category::Animal,
    Category::Gender,
    Category::OutfitStyle,
    Category::ColorScheme,
    Category::Accessory,
    Category::Mood,
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown option '{label}' in category '{category}'")]
    UnknownOption { category: &'static str, label: String },
}

impl Category {
    pub fn display_name(self) -> &'static str {
        match self {
            Category::Animal => "동물 종류",
            Category::Gender => "성별",
            Category::OutfitStyle => "한복 스타일",
            Category::ColorScheme => "색상 조합",
            Category::Accessory => "장신구",
            Category::Mood => "분위기",
        }
    }

    /// Color schemes can be combined; every other category is a single pick.
    pub fn is_multi_select(self) -> bool {
        matches!(self, Category::ColorScheme)
    }
}

/// Fixed display order of the catalog.
pub fn categories() -> &'static [Category] {
    CATEGORIES
}

pub fn options(category: Category) -> &'static [CatalogOption] {
    match category {
        Category::Animal => ANIMAL_OPTIONS,
        Category::Gender => GENDER_OPTIONS,
        Category::OutfitStyle => OUTFIT_OPTIONS,
        Category::ColorScheme => COLOR_OPTIONS,
        Category::Accessory => ACCESSORY_OPTIONS,
        Category::Mood => MOOD_OPTIONS,
    }
}

/// Map a display label back to its prompt fragment.
///
/// Labels normally come straight out of this catalog, so a miss means the
/// caller handed us stale or forged input and gets an error, never a guess.
pub fn resolve_fragment(category: Category, label: &str) -> Result<&'static str, CatalogError> {
    options(category)
        .iter()
        .find(|opt| opt.label == label)
        .map(|opt| opt.fragment)
        .ok_or_else(|| CatalogError::UnknownOption {
            category: category.display_name(),
            label: label.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_options_with_nonempty_fragments() {
        for &category in categories() {
            let opts = options(category);
            assert!(!opts.is_empty(), "{} is empty", category.display_name());
            for opt in opts {
                assert!(!opt.label.trim().is_empty());
                assert!(!opt.fragment.trim().is_empty());
            }
        }
    }

    #[test]
    fn labels_are_unique_within_their_category() {
        for &category in categories() {
            let opts = options(category);
            for (i, a) in opts.iter().enumerate() {
                for b in &opts[i + 1..] {
                    assert_ne!(a.label, b.label);
                }
            }
        }
    }

    #[test]
    fn resolves_known_labels() {
        assert_eq!(
            resolve_fragment(Category::Animal, "고양이 🐱"),
            Ok("cute cat")
        );
        assert_eq!(
            resolve_fragment(Category::Gender, "여자 한복 (여아)"),
            Ok("female")
        );
    }

    #[test]
    fn rejects_labels_outside_the_catalog() {
        let err = resolve_fragment(Category::Mood, "신나는").unwrap_err();
        assert_eq!(
            err,
            CatalogError::UnknownOption {
                category: "분위기",
                label: "신나는".to_string(),
            }
        );
    }

    #[test]
    fn only_color_scheme_is_multi_select() {
        for &category in categories() {
            assert_eq!(
                category.is_multi_select(),
                category == Category::ColorScheme
            );
        }
    }
}
