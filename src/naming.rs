//! # Naming Module
//!
//! Naming-convention transforms used to turn table and column names into class,
//! method and route-segment identifiers.
//!
//! Case conversion is delegated to [`convert_case`]; English singular/plural
//! inflection is rule based and operates on the last word of the input, so
//! `product_category` pluralizes to `product_categories` and `ProductTag` to
//! `ProductTags`.
//!
//! ```rust
//! use crudgen::naming::{plural, singular, studly, camel};
//!
//! assert_eq!(plural("category"), "categories");
//! assert_eq!(singular("people"), "person");
//! assert_eq!(studly("product_tags"), "ProductTags");
//! assert_eq!(camel("product_tag"), "productTag");
//! ```

use convert_case::{Case, Casing};

const UNCOUNTABLE: &[&str] = &[
    "audio",
    "data",
    "equipment",
    "feedback",
    "fish",
    "information",
    "metadata",
    "money",
    "news",
    "rice",
    "series",
    "sheep",
    "species",
    "deer",
];

/// (singular, plural)
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("tooth", "teeth"),
    ("foot", "feet"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("ox", "oxen"),
    ("movie", "movies"),
    ("cookie", "cookies"),
    ("zombie", "zombies"),
    ("pie", "pies"),
    ("tie", "ties"),
    ("hero", "heroes"),
    ("potato", "potatoes"),
    ("tomato", "tomatoes"),
    ("echo", "echoes"),
    ("criterion", "criteria"),
    ("medium", "media"),
];

/// `-sis` nouns whose plural is `-ses`
const SIS_STEMS: &[&str] = &[
    "analy", "ba", "cri", "diagno", "parenthe", "progno", "synop", "the",
];

/// `-us` nouns that take `-es` and must not lose their trailing `s` when singularized
const US_ES: &[&str] = &["alias", "bus", "campus", "status", "virus", "bonus"];

/// StudlyCase (`product_tag` → `ProductTag`)
pub fn studly(s: &str) -> String {
    s.to_case(Case::Pascal)
}

/// camelCase (`product_tag` → `productTag`)
pub fn camel(s: &str) -> String {
    s.to_case(Case::Camel)
}

/// snake_case (`ProductTag` → `product_tag`)
pub fn snake(s: &str) -> String {
    s.to_case(Case::Snake)
}

/// kebab-case (`ProductTag` → `product-tag`)
pub fn kebab(s: &str) -> String {
    s.to_case(Case::Kebab)
}

/// Title Case words (`product_category` → `Product Category`)
pub fn title(s: &str) -> String {
    s.to_case(Case::Title)
}

/// Pluralize the last word of `s`.
///
/// Already-plural regular nouns are returned unchanged, so the function is
/// safe to apply to table names.
pub fn plural(s: &str) -> String {
    inflect_last_word(s, plural_word)
}

/// Singularize the last word of `s`.
pub fn singular(s: &str) -> String {
    inflect_last_word(s, singular_word)
}

/// Snake-cased plural table name for a model name (`ProductTag` → `product_tags`).
pub fn table_for_model(model: &str) -> String {
    plural(&snake(model))
}

/// Studly singular model name for a table name (`product_tags` → `ProductTag`).
pub fn model_for_table(table: &str) -> String {
    studly(&singular(table))
}

fn inflect_last_word(s: &str, f: fn(&str) -> String) -> String {
    if s.is_empty() {
        return String::new();
    }
    let split = last_word_start(s);
    let (head, tail) = s.split_at(split);
    let capitalized = tail.chars().next().is_some_and(char::is_uppercase);
    let inflected = f(&tail.to_lowercase());
    if capitalized {
        let mut chars = inflected.chars();
        match chars.next() {
            Some(first) => format!("{head}{}{}", first.to_uppercase(), chars.as_str()),
            None => head.to_string(),
        }
    } else {
        format!("{head}{inflected}")
    }
}

fn last_word_start(s: &str) -> usize {
    let mut start = 0;
    for (idx, c) in s.char_indices() {
        if c == '_' || c == '-' || c == ' ' {
            start = idx + c.len_utf8();
        } else if c.is_uppercase() && idx > 0 {
            start = idx;
        }
    }
    start
}

fn plural_word(word: &str) -> String {
    if word.is_empty() || UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }
    if let Some((_, p)) = IRREGULAR.iter().find(|(s, p)| *s == word || *p == word) {
        return (*p).to_string();
    }
    if US_ES.contains(&word) {
        return format!("{word}es");
    }
    if word.ends_with("quiz") {
        return format!("{word}zes");
    }
    if let Some(stem) = word.strip_suffix("sis") {
        return format!("{stem}ses");
    }
    if ["x", "ch", "ss", "sh", "z"].iter().any(|suf| word.ends_with(suf)) {
        return format!("{word}es");
    }
    if word.ends_with("us") {
        return format!("{word}es");
    }
    if word.ends_with('s') {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix('y') {
        if !stem.ends_with(['a', 'e', 'i', 'o', 'u', 'y']) || stem.ends_with("qu") {
            return format!("{stem}ies");
        }
    }
    if let Some(stem) = word.strip_suffix("fe") {
        if !stem.ends_with('f') {
            return format!("{stem}ves");
        }
    }
    if let Some(stem) = word.strip_suffix('f') {
        if stem.ends_with('l') || stem.ends_with('r') {
            return format!("{stem}ves");
        }
    }
    format!("{word}s")
}

fn singular_word(word: &str) -> String {
    if word.is_empty() || UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }
    if let Some((s, _)) = IRREGULAR.iter().find(|(s, p)| *p == word || *s == word) {
        return (*s).to_string();
    }
    if US_ES.contains(&word) {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("es") {
        if US_ES.contains(&stem) {
            return stem.to_string();
        }
        if let Some(base) = stem.strip_suffix("quizz") {
            return format!("{base}quiz");
        }
    }
    if let Some(stem) = word.strip_suffix("ses") {
        if SIS_STEMS.contains(&stem) {
            return format!("{stem}sis");
        }
    }
    if let Some(stem) = word.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }
    for (plural_suffix, singular_suffix) in [("knives", "knife"), ("wives", "wife"), ("lives", "life")] {
        if let Some(stem) = word.strip_suffix(plural_suffix) {
            return format!("{stem}{singular_suffix}");
        }
    }
    if let Some(stem) = word.strip_suffix("lves") {
        return format!("{stem}lf");
    }
    if ["xes", "ches", "sses", "shes", "zes"].iter().any(|suf| word.ends_with(suf)) {
        return word[..word.len() - 2].to_string();
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix('s') {
        return stem.to_string();
    }
    word.to_string()
}
