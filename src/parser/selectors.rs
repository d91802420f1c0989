//! Compiled CSS selector catalog
//!
//! The [`SelectorConfig`](crate::config::SelectorConfig) lists are pure data;
//! this module compiles them into `scraper::Selector` values once at startup
//! so a bad selector is a configuration error, not a silent runtime skip.

use scraper::Selector;

use crate::config::SelectorConfig;
use crate::utils::error::ParseError;

/// Compiled selector lists per page-element kind, in priority order
pub struct SelectorCatalog {
    /// Candidate chapter-content regions
    pub content: Vec<Selector>,

    /// Candidate chapter-title elements
    pub title: Vec<Selector>,

    /// Candidate next-chapter links
    pub next_link: Vec<Selector>,

    /// Paragraph-like descendants inside a matched content region
    pub paragraph: Selector,

    /// Block-level candidates for the largest-text-block fallback
    pub block: Selector,
}

impl SelectorCatalog {
    /// Compile a selector catalog from configured selector strings
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidSelector` for the first selector string
    /// that fails to compile.
    pub fn compile(config: &SelectorConfig) -> Result<Self, ParseError> {
        Ok(Self {
            content: compile_list(&config.content)?,
            title: compile_list(&config.title)?,
            next_link: compile_list(&config.next_link)?,
            // Both are compile-time constants, so a parse failure is a bug
            paragraph: Selector::parse("p, div").expect("valid paragraph selector"),
            block: Selector::parse("div, article, section").expect("valid block selector"),
        })
    }
}

fn compile_list(raw: &[String]) -> Result<Vec<Selector>, ParseError> {
    raw.iter()
        .map(|s| Selector::parse(s).map_err(|_| ParseError::InvalidSelector(s.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_default_catalog() {
        let config = SelectorConfig::default();
        let catalog = SelectorCatalog::compile(&config).unwrap();
        assert_eq!(catalog.content.len(), 5);
        assert_eq!(catalog.title.len(), 3);
        assert_eq!(catalog.next_link.len(), 3);
    }

    #[test]
    fn test_compile_invalid_selector() {
        let config = SelectorConfig {
            content: vec!["div[".to_string()],
            ..Default::default()
        };

        let err = SelectorCatalog::compile(&config)
            .err()
            .expect("invalid selector should fail to compile");
        match err {
            ParseError::InvalidSelector(s) => assert_eq!(s, "div["),
            other => panic!("expected InvalidSelector, got {other:?}"),
        }
    }

    #[test]
    fn test_compile_empty_list() {
        let config = SelectorConfig {
            next_link: Vec::new(),
            ..Default::default()
        };

        let catalog = SelectorCatalog::compile(&config).unwrap();
        assert!(catalog.next_link.is_empty());
    }
}
