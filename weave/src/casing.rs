//! Key and type name casing for generated constants.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Naming transformation applied to constant keys and type names on mobile platforms.
///
/// Deserializes leniently: `"camel"`/`"camelcase"`, `"pascal"`/`"pascalcase"`,
/// `"snake"`/`"snakecase"` and `"caps"` (any case); anything else is [`Casing::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum Casing {
    #[default]
    None,
    Camel,
    Pascal,
    Snake,
    Caps,
}

impl Casing {
    pub(crate) fn key_default() -> Self {
        Casing::Camel
    }

    pub(crate) fn type_default() -> Self {
        Casing::Pascal
    }

    /// Applies this casing to `name`.
    ///
    /// ```rust
    /// use weave::casing::Casing;
    /// assert_eq!(Casing::Camel.apply("home_screen"), "homeScreen");
    /// assert_eq!(Casing::Pascal.apply("home_screen"), "HomeScreen");
    /// assert_eq!(Casing::Snake.apply("homeScreen"), "home_screen");
    /// assert_eq!(Casing::Caps.apply("homeScreen"), "HOME_SCREEN");
    /// ```
    pub fn apply(&self, name: &str) -> String {
        if *self == Casing::None {
            return name.to_string();
        }

        let words = split_words(name);
        match self {
            Casing::None => name.to_string(),
            Casing::Camel => words
                .iter()
                .enumerate()
                .map(|(i, word)| {
                    if i == 0 {
                        word.to_lowercase()
                    } else {
                        capitalize(word)
                    }
                })
                .collect(),
            Casing::Pascal => words.iter().map(|word| capitalize(word)).collect(),
            Casing::Snake => words
                .iter()
                .map(|word| word.to_lowercase())
                .collect::<Vec<_>>()
                .join("_"),
            Casing::Caps => words
                .iter()
                .map(|word| word.to_uppercase())
                .collect::<Vec<_>>()
                .join("_"),
        }
    }
}

impl From<String> for Casing {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "camel" | "camelcase" => Casing::Camel,
            "pascal" | "pascalcase" => Casing::Pascal,
            "snake" | "snakecase" => Casing::Snake,
            "caps" => Casing::Caps,
            _ => Casing::None,
        }
    }
}

impl From<Casing> for String {
    fn from(value: Casing) -> Self {
        value.to_string()
    }
}

impl Display for Casing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Casing::None => write!(f, "none"),
            Casing::Camel => write!(f, "camel"),
            Casing::Pascal => write!(f, "pascal"),
            Casing::Snake => write!(f, "snake"),
            Casing::Caps => write!(f, "caps"),
        }
    }
}

// Splits on separators and on lower-to-upper boundaries, keeping acronyms together
// ("HTTPServer" -> ["HTTP", "Server"]).
fn split_words(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
