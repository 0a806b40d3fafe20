use glob::{MatchOptions, Pattern};
use url::Url;

use crate::{config_bail, config_error, path::RelativePath};

pub const DEFAULT_API_URL: &str = "https://neocities.org/api";

/// Glob patterns matched against relative paths (without directory marker).
#[derive(Debug, Default, Clone)]
pub struct PatternList(Vec<Pattern>, MatchOptions);

impl PatternList {
    pub fn new<I>(patterns: I) -> crate::Result<PatternList>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let patterns: crate::Result<Vec<_>> = patterns
            .into_iter()
            .map(|p| {
                let p = p.as_ref();
                Pattern::new(p).map_err(|err| config_error!("Invalid ignore pattern '{p}': {err}"))
            })
            .collect();
        let opts = MatchOptions {
            case_sensitive: true,
            require_literal_separator: false,
            require_literal_leading_dot: false,
        };
        Ok(PatternList(patterns?, opts))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn matches(&self, path: &RelativePath) -> bool {
        self.0
            .iter()
            .any(|p| p.matches_with(path.without_marker(), self.1))
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub api_url: Url,
}

impl Config {
    /// Build a configuration from optional credentials.
    /// Both the user name and the password must be provided.
    pub fn new(username: Option<String>, password: Option<String>) -> crate::Result<Self> {
        let username = match username {
            Some(u) if !u.is_empty() => u,
            _ => config_bail!("The Neocities user name is not provided"),
        };
        let password = match password {
            Some(p) if !p.is_empty() => p,
            _ => config_bail!("The Neocities password is not provided"),
        };
        let api_url = Url::parse(DEFAULT_API_URL)
            .map_err(|err| config_error!("Invalid API URL '{DEFAULT_API_URL}': {err}"))?;
        Ok(Config {
            credentials: Credentials { username, password },
            api_url,
        })
    }

    pub fn with_api_url(self, api_url: &str) -> crate::Result<Self> {
        let api_url = match Url::parse(api_url.trim_end_matches('/')) {
            Ok(url) => url,
            Err(err) => config_bail!("Invalid API URL '{api_url}': {err}"),
        };
        Ok(Config { api_url, ..self })
    }
}
