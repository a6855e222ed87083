// src/common/serde_utils.rs

use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer};

/// Query strings de formulário mandam `?campo=` quando o filtro fica em branco;
/// tratamos isso como ausente em vez de erro de parsing.
pub fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => FromStr::from_str(s).map_err(de::Error::custom).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Params {
        #[serde(default, deserialize_with = "empty_string_as_none")]
        start: Option<NaiveDate>,
        #[serde(default, deserialize_with = "empty_string_as_none")]
        page: Option<u32>,
    }

    #[test]
    fn blank_values_become_none() {
        let p: Params = serde_json::from_str(r#"{"start": "", "page": "  "}"#).unwrap();
        assert!(p.start.is_none());
        assert!(p.page.is_none());
    }

    #[test]
    fn filled_values_are_parsed() {
        let p: Params = serde_json::from_str(r#"{"start": "2024-01-31", "page": "2"}"#).unwrap();
        assert_eq!(p.start, NaiveDate::from_ymd_opt(2024, 1, 31));
        assert_eq!(p.page, Some(2));
    }

    #[test]
    fn missing_values_default_to_none() {
        let p: Params = serde_json::from_str("{}").unwrap();
        assert!(p.start.is_none() && p.page.is_none());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(serde_json::from_str::<Params>(r#"{"page": "abc"}"#).is_err());
    }
}
