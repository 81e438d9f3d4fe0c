// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use crate::models::{CryptoCurrency, CurrencyInfo, FiatCurrency};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const BUNDLED_CRYPTO: &str = include_str!("../fixtures/crypto_currencies.json");
const BUNDLED_FIAT: &str = include_str!("../fixtures/fiat_currencies.json");

/// Mock data written by the `insert` command
#[derive(Debug, Clone)]
pub struct Fixtures {
    pub crypto: Vec<CryptoCurrency>,
    pub fiat: Vec<FiatCurrency>,
}

impl Fixtures {
    /// Bundled lists, each replaced by its file when a path is given
    pub fn load(crypto_path: Option<&Path>, fiat_path: Option<&Path>) -> Result<Self> {
        let crypto = match crypto_path {
            Some(path) => parse_crypto(&read(path)?)
                .with_context(|| format!("Invalid crypto fixture {}", path.display()))?,
            None => parse_crypto(BUNDLED_CRYPTO).context("Invalid bundled crypto fixture")?,
        };
        let fiat = match fiat_path {
            Some(path) => parse_fiat(&read(path)?)
                .with_context(|| format!("Invalid fiat fixture {}", path.display()))?,
            None => parse_fiat(BUNDLED_FIAT).context("Invalid bundled fiat fixture")?,
        };
        Ok(Self { crypto, fiat })
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub fn parse_crypto(json: &str) -> Result<Vec<CryptoCurrency>> {
    let infos: Vec<CurrencyInfo> = serde_json::from_str(json)?;
    Ok(infos.into_iter().map(CryptoCurrency::from).collect())
}

pub fn parse_fiat(json: &str) -> Result<Vec<FiatCurrency>> {
    let infos: Vec<CurrencyInfo> = serde_json::from_str(json)?;
    Ok(infos.into_iter().map(FiatCurrency::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_bundled_fixtures_parse() -> Result<()> {
        let fixtures = Fixtures::load(None, None)?;
        assert!(!fixtures.crypto.is_empty());
        assert!(!fixtures.fiat.is_empty());
        assert!(fixtures.crypto.iter().any(|c| c.symbol == "CRO"));
        assert!(fixtures
            .crypto
            .iter()
            .all(|c| !c.name.is_empty() && !c.symbol.is_empty()));
        assert!(fixtures
            .fiat
            .iter()
            .all(|f| !f.name.is_empty() && !f.symbol.is_empty() && !f.code.is_empty()));
        Ok(())
    }

    #[test]
    fn test_parse_fiat_without_code() -> Result<()> {
        let fiat = parse_fiat(r#"[{"id":"EUR","name":"Euro","symbol":"€"}]"#)?;
        assert_eq!(fiat[0].code, "");
        Ok(())
    }

    #[test]
    fn test_load_from_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, r#"[{{"id":"DOGE","name":"Dogecoin","symbol":"DOGE"}}]"#)?;

        let fixtures = Fixtures::load(Some(file.path()), None)?;
        assert_eq!(fixtures.crypto.len(), 1);
        assert_eq!(fixtures.crypto[0].name, "Dogecoin");
        assert_eq!(fixtures.fiat.len(), Fixtures::load(None, None)?.fiat.len());
        Ok(())
    }

    #[test]
    fn test_load_missing_file() {
        let result = Fixtures::load(None, Some(Path::new("/definitely/not/here.json")));
        assert!(result.is_err());
    }
}
