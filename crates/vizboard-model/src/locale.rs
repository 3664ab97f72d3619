//! User interface locales and the locale selector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A supported user interface locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
    Fr,
}

impl Locale {
    /// Locales offered in the user menu, in display order.
    pub const ALL: [Locale; 3] = [Self::En, Self::Es, Self::Fr];

    /// Language tag.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
            Self::Fr => "fr",
        }
    }

    /// Name shown in the selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Es => "Espanol",
            Self::Fr => "Francais",
        }
    }
}

impl FromStr for Locale {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|locale| locale.tag() == s)
            .ok_or_else(|| ModelError::UnknownLocale(s.to_string()))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One entry in the locale selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleItem {
    pub locale: Locale,
    pub selected: bool,
}

/// Selector state: which locale is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocaleSelector {
    current: Locale,
}

impl LocaleSelector {
    #[must_use]
    pub fn new(current: Locale) -> Self {
        Self { current }
    }

    #[must_use]
    pub fn current(&self) -> Locale {
        self.current
    }

    /// Entries to render, with the current locale marked.
    #[must_use]
    pub fn items(&self) -> Vec<LocaleItem> {
        Locale::ALL
            .into_iter()
            .map(|locale| LocaleItem {
                locale,
                selected: locale == self.current,
            })
            .collect()
    }

    /// Handle a click on the entry with the given tag.
    ///
    /// Returns the new locale when it differs from the current one; picking
    /// the current locale again changes nothing.
    pub fn select(&mut self, tag: &str) -> Result<Option<Locale>, ModelError> {
        let chosen: Locale = tag.parse()?;
        if chosen == self.current {
            return Ok(None);
        }
        self.current = chosen;
        Ok(Some(chosen))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_mark_current() {
        let selector = LocaleSelector::new(Locale::Es);
        let selected: Vec<_> = selector
            .items()
            .into_iter()
            .filter(|item| item.selected)
            .map(|item| item.locale)
            .collect();
        assert_eq!(selected, vec![Locale::Es]);
    }

    #[test]
    fn test_select_same_locale_is_noop() {
        let mut selector = LocaleSelector::new(Locale::En);
        assert_eq!(selector.select("en").unwrap(), None);
        assert_eq!(selector.select("fr").unwrap(), Some(Locale::Fr));
        assert_eq!(selector.current(), Locale::Fr);
    }

    #[test]
    fn test_select_unknown_tag() {
        let mut selector = LocaleSelector::default();
        assert!(matches!(
            selector.select("de"),
            Err(ModelError::UnknownLocale(tag)) if tag == "de"
        ));
        assert_eq!(selector.current(), Locale::En);
    }
}
