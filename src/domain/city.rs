// City domain model
use std::fmt;

const MAX_CITY_LEN: usize = 100;

/// A validated city name, passed verbatim to the upstream `q` parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityQuery(String);

impl CityQuery {
    /// Returns `None` for blank names, names longer than 100 characters,
    /// or names containing control characters.
    pub fn parse(raw: &str) -> Option<Self> {
        let name = raw.trim();
        if name.is_empty()
            || name.chars().count() > MAX_CITY_LEN
            || name.chars().any(char::is_control)
        {
            return None;
        }
        Some(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
