//! Decoder configuration: the global matcher choice and per-DTO overrides,
//! loaded from TOML and parsed once at this boundary.

use derive_more::{Deref, Display};
use serde::{Deserialize, Deserializer, de};
use std::{collections::BTreeMap, fs, path::Path};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("update method list '{input}' contains an empty method name")]
    EmptyMethodName { input: String },
}

///
/// NameMatcherKind
///
/// Which name comparison the decoder uses.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum NameMatcherKind {
    /// Case and naming-convention tolerant, `Id` suffix aware.
    #[default]
    Convention,

    /// ASCII case-insensitive equality only.
    Strict,
}

///
/// DecoderConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DecoderConfig {
    #[serde(default)]
    pub name_matcher: NameMatcherKind,

    #[serde(default, rename = "dto")]
    pub dtos: BTreeMap<String, DtoConfig>,
}

impl DecoderConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    #[must_use]
    pub const fn with_name_matcher(mut self, kind: NameMatcherKind) -> Self {
        self.name_matcher = kind;
        self
    }

    #[must_use]
    pub fn with_dto(mut self, dto: impl Into<String>, config: DtoConfig) -> Self {
        self.dtos.insert(dto.into(), config);
        self
    }

    #[must_use]
    pub fn dto(&self, name: &str) -> Option<&DtoConfig> {
        self.dtos.get(name)
    }

    /// Explicit update methods configured for `dto`, if any.
    #[must_use]
    pub fn update_methods_for(&self, dto: &str) -> Option<&UpdateMethods> {
        self.dto(dto).and_then(|config| config.update_methods.as_ref())
    }
}

/// Load a `DecoderConfig` from a TOML file.
pub fn load_config(path: impl AsRef<Path>) -> Result<DecoderConfig, ConfigError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;

    DecoderConfig::from_toml_str(&text)
}

///
/// DtoConfig
/// Per-DTO overrides.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DtoConfig {
    #[serde(default)]
    pub update_methods: Option<UpdateMethods>,
}

impl DtoConfig {
    #[must_use]
    pub const fn with_update_methods(methods: UpdateMethods) -> Self {
        Self {
            update_methods: Some(methods),
        }
    }
}

///
/// UpdateMethods
///
/// Ordered, trimmed list of mutator names a DTO must bind to. Accepts the
/// comma-separated form (`"Order, SetStatus"`) or a TOML array.
///

#[derive(Clone, Debug, Deref, Eq, PartialEq)]
pub struct UpdateMethods(Vec<String>);

impl UpdateMethods {
    /// Parse the comma-separated form.
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        Self::from_tokens(input, input.split(','))
    }

    /// Build from already separated names; each is trimmed.
    pub fn from_names<I, S>(names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = names.into_iter().map(|s| s.as_ref().to_string()).collect();
        let input = names.join(",");

        Self::from_tokens(&input, names.iter().map(String::as_str))
    }

    fn from_tokens<'a>(
        input: &str,
        tokens: impl Iterator<Item = &'a str>,
    ) -> Result<Self, ConfigError> {
        let mut names = Vec::new();
        for token in tokens {
            let token = token.trim();
            if token.is_empty() {
                return Err(ConfigError::EmptyMethodName {
                    input: input.to_string(),
                });
            }
            names.push(token.to_string());
        }

        if names.is_empty() {
            return Err(ConfigError::EmptyMethodName {
                input: input.to_string(),
            });
        }

        Ok(Self(names))
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.0
    }
}

impl<'de> Deserialize<'de> for UpdateMethods {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            List(Vec<String>),
        }

        let parsed = match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Self::parse(&text),
            Raw::List(list) => Self::from_names(list),
        };

        parsed.map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_separated_methods_are_trimmed_in_order() {
        let methods = UpdateMethods::parse(" SetStatus ,Order").unwrap();

        assert_eq!(methods.names(), ["SetStatus", "Order"]);
        assert_eq!(methods.len(), 2);
    }

    #[test]
    fn empty_tokens_are_rejected() {
        assert!(matches!(
            UpdateMethods::parse("Order,,SetStatus"),
            Err(ConfigError::EmptyMethodName { .. })
        ));
        assert!(UpdateMethods::parse("   ").is_err());
        assert!(UpdateMethods::from_names(Vec::<String>::new()).is_err());
    }

    #[test]
    fn toml_accepts_string_and_array_forms() {
        let config = DecoderConfig::from_toml_str(
            r#"
            name_matcher = "strict"

            [dto.OrderDto]
            update_methods = "Order, SetStatus"

            [dto.CustomerDto]
            update_methods = ["Rename"]

            [dto.ProductDto]
            "#,
        )
        .unwrap();

        assert_eq!(config.name_matcher, NameMatcherKind::Strict);
        assert_eq!(
            config.update_methods_for("OrderDto").unwrap().names(),
            ["Order", "SetStatus"]
        );
        assert_eq!(
            config.update_methods_for("CustomerDto").unwrap().names(),
            ["Rename"]
        );
        assert!(config.dto("ProductDto").is_some());
        assert!(config.update_methods_for("ProductDto").is_none());
        assert!(config.update_methods_for("Unknown").is_none());
    }

    #[test]
    fn defaults_apply_to_empty_document() {
        let config = DecoderConfig::from_toml_str("").unwrap();

        assert_eq!(config, DecoderConfig::default());
        assert_eq!(config.name_matcher, NameMatcherKind::Convention);
    }

    #[test]
    fn bad_method_list_fails_parse() {
        let err = DecoderConfig::from_toml_str(
            r#"
            [dto.OrderDto]
            update_methods = "Order,"
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("empty method name"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(DecoderConfig::from_toml_str("matcher = \"strict\"").is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_config("/definitely/not/here/dtolink.toml").unwrap_err();

        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here/dtolink.toml"));
    }
}
