//! Environment provider for `BALAU_*` variables.
//!
//! Wraps `figment::providers::Env`, leaving every value as a plain string
//! except list-valued keys, which are split on commas into arrays. A single
//! `BALAU_PATTERNS=*Test::*` therefore still deserializes as a one-element
//! `Vec<String>`. Blank list entries are dropped.

use figment::providers::Env;
use figment::{
    Profile, Provider,
    error::Error,
    util::nest,
    value::{Dict, Map, Value},
};

/// Prefix shared by every launcher environment variable.
pub const ENV_PREFIX: &str = "BALAU_";

/// Environment provider that splits list-valued keys on commas.
#[derive(Clone)]
pub struct ListEnv {
    inner: Env,
    list_keys: &'static [&'static str],
}

impl ListEnv {
    /// Creates a provider reading variables that start with `prefix`.
    ///
    /// Keys named in `list_keys` (compared after prefix removal and
    /// lowercasing) are parsed as comma-separated lists.
    #[must_use]
    pub fn prefixed(prefix: &str, list_keys: &'static [&'static str]) -> Self {
        Self {
            inner: Env::prefixed(prefix),
            list_keys,
        }
    }

    fn is_list_key(&self, key: &str) -> bool {
        self.list_keys
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(key))
    }

    fn parse_list(raw: &str) -> Value {
        raw.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| Value::from(item.to_owned()))
            .collect::<Vec<_>>()
            .into()
    }
}

impl Provider for ListEnv {
    fn metadata(&self) -> figment::Metadata {
        self.inner.metadata()
    }

    fn profile(&self) -> Option<Profile> {
        Some(self.inner.profile.clone())
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();
        for (key, raw) in self.inner.iter() {
            let value = if self.is_list_key(key.as_str()) {
                Self::parse_list(&raw)
            } else {
                Value::from(raw.trim().to_owned())
            };
            let Some(nested) = nest(key.as_str(), value).into_dict() else {
                return Err(Error::from(format!(
                    "environment key `{key}` produced a non-object value"
                )));
            };
            dict.extend(nested);
        }
        Ok(self.inner.profile.collect(dict))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Figment;
    use rstest::rstest;
    use serde::Deserialize;
    use test_helpers::figment::with_jail;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default)]
        patterns: Vec<String>,
        app_path: Option<String>,
    }

    #[rstest]
    #[case("*Test::*", vec!["*Test::*"])]
    #[case("*Test::*,*IT::*", vec!["*Test::*", "*IT::*"])]
    #[case(" a , b ,", vec!["a", "b"])]
    #[case("", vec![])]
    fn splits_list_keys(#[case] raw: &str, #[case] expected: Vec<&str>) -> anyhow::Result<()> {
        let sample: Sample = with_jail(|j| {
            j.set_env("BALAU_PATTERNS", raw);
            Figment::from(ListEnv::prefixed(ENV_PREFIX, &["patterns"])).extract()
        })?;
        anyhow::ensure!(sample.patterns == expected, "got {:?}", sample.patterns);
        Ok(())
    }

    #[rstest]
    fn keeps_other_keys_as_strings() -> anyhow::Result<()> {
        let sample: Sample = with_jail(|j| {
            j.set_env("BALAU_APP_PATH", "bin/1,2");
            Figment::from(ListEnv::prefixed(ENV_PREFIX, &["patterns"])).extract()
        })?;
        anyhow::ensure!(sample.app_path.as_deref() == Some("bin/1,2"));
        Ok(())
    }
}
