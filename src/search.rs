// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use crate::models::{CryptoCurrency, Currency, FiatCurrency};

/// Anything the currency search can match against
pub trait Searchable {
    fn name(&self) -> &str;
    fn symbol(&self) -> &str;
}

impl Searchable for CryptoCurrency {
    fn name(&self) -> &str {
        &self.name
    }

    fn symbol(&self) -> &str {
        &self.symbol
    }
}

impl Searchable for FiatCurrency {
    fn name(&self) -> &str {
        &self.name
    }

    fn symbol(&self) -> &str {
        &self.symbol
    }
}

impl Searchable for Currency {
    fn name(&self) -> &str {
        Currency::name(self)
    }

    fn symbol(&self) -> &str {
        Currency::symbol(self)
    }
}

/// A normalized, non-blank query, built once per filter pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    prefix: String,
    word_prefix: String,
}

impl SearchTerm {
    /// `None` when the query is empty after trimming
    pub fn new(query: &str) -> Option<Self> {
        let term = query.trim();
        if term.is_empty() {
            return None;
        }

        let prefix = term.to_lowercase();
        let word_prefix = format!(" {}", prefix);
        Some(Self {
            prefix,
            word_prefix,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.prefix
    }

    /// The name starts with the term, a later word of the name starts with
    /// the term, or the symbol starts with the term.
    pub fn matches<T: Searchable + ?Sized>(&self, item: &T) -> bool {
        let name = item.name().to_lowercase();
        name.starts_with(&self.prefix)
            || name.contains(&self.word_prefix)
            || item.symbol().to_lowercase().starts_with(&self.prefix)
    }
}

/// Filter `items` by a raw query as typed by the user.
///
/// A blank query returns every item. Matches keep their original order.
pub fn filter_currencies<'a, T: Searchable>(query: &str, items: &'a [T]) -> Vec<&'a T> {
    match SearchTerm::new(query) {
        None => items.iter().collect(),
        Some(term) => items.iter().filter(|item| term.matches(*item)).collect(),
    }
}
