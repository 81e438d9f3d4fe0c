// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which table a currency belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyKind {
    Crypto,
    Fiat,
}

impl CurrencyKind {
    pub fn table(self) -> &'static str {
        match self {
            CurrencyKind::Crypto => "crypto",
            CurrencyKind::Fiat => "fiat",
        }
    }
}

impl fmt::Display for CurrencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoCurrency {
    pub id: String,
    pub name: String,
    pub symbol: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiatCurrency {
    pub id: String,
    pub name: String,
    pub symbol: String,
    /// ISO code; an empty string is a valid stored value
    #[serde(default)]
    pub code: String,
}

/// A row from either table. The variant is decided by the table the row was
/// read from, never by inspecting `code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Currency {
    Crypto(CryptoCurrency),
    Fiat(FiatCurrency),
}

impl Currency {
    pub fn kind(&self) -> CurrencyKind {
        match self {
            Currency::Crypto(_) => CurrencyKind::Crypto,
            Currency::Fiat(_) => CurrencyKind::Fiat,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Currency::Crypto(c) => &c.id,
            Currency::Fiat(f) => &f.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Currency::Crypto(c) => &c.name,
            Currency::Fiat(f) => &f.name,
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Currency::Crypto(c) => &c.symbol,
            Currency::Fiat(f) => &f.symbol,
        }
    }

    /// Empty for crypto rows, matching the synthesized column of the union read
    pub fn code(&self) -> &str {
        match self {
            Currency::Crypto(_) => "",
            Currency::Fiat(f) => &f.code,
        }
    }
}

impl From<CryptoCurrency> for Currency {
    fn from(value: CryptoCurrency) -> Self {
        Currency::Crypto(value)
    }
}

impl From<FiatCurrency> for Currency {
    fn from(value: FiatCurrency) -> Self {
        Currency::Fiat(value)
    }
}

/// Loose shape of the mock data files: `code` may be missing or null
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyInfo {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub code: Option<String>,
}

impl From<CurrencyInfo> for CryptoCurrency {
    fn from(info: CurrencyInfo) -> Self {
        CryptoCurrency {
            id: info.id,
            name: info.name,
            symbol: info.symbol,
        }
    }
}

impl From<CurrencyInfo> for FiatCurrency {
    fn from(info: CurrencyInfo) -> Self {
        FiatCurrency {
            id: info.id,
            name: info.name,
            symbol: info.symbol,
            code: info.code.unwrap_or_default(),
        }
    }
}
