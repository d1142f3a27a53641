use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::common::error::ConfigError;

/// The only placeholder a fetch template may contain.
pub const NAME_PLACEHOLDER: &str = "%(name)s";

/// Matches `%%` escapes and `%(key)s` placeholders.
fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"%%|%\(([^)]*)\)s").expect("token pattern is valid"))
}

/// A remote fetch URL with exactly one `%(name)s` slot for the upstream project name.
///
/// `%%` stands for a literal percent sign.
///
/// ```
/// use crepo::domain::value_objects::fetch_template::FetchTemplate;
///
/// let template = FetchTemplate::parse("git://host/%(name)s.git").unwrap();
/// assert_eq!(template.render("foo"), "git://host/foo.git");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FetchTemplate(String);

impl FetchTemplate {
    /// Validate `template` and wrap it.
    pub fn parse(template: impl Into<String>) -> Result<Self, ConfigError> {
        let template = template.into();

        let keys: Vec<String> = token_regex()
            .captures_iter(&template)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
            .collect();

        match keys.as_slice() {
            [key] if key == "name" => Ok(Self(template)),
            [key] => {
                let reason = format!("unknown placeholder '%({key})s', expected '{NAME_PLACEHOLDER}'");
                Err(ConfigError::invalid_fetch_template(template, reason))
            }
            [] => {
                let reason = format!("missing '{NAME_PLACEHOLDER}' placeholder");
                Err(ConfigError::invalid_fetch_template(template, reason))
            }
            many => {
                let reason = format!(
                    "expected exactly one '{NAME_PLACEHOLDER}' placeholder, found {}",
                    many.len()
                );
                Err(ConfigError::invalid_fetch_template(template, reason))
            }
        }
    }

    /// Substitute `project_name` into the slot.
    pub fn render(&self, project_name: &str) -> String {
        token_regex()
            .replace_all(&self.0, |caps: &Captures| {
                if caps.get(1).is_some() {
                    project_name.to_string()
                } else {
                    "%".to_string()
                }
            })
            .into_owned()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for FetchTemplate {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<FetchTemplate> for String {
    fn from(template: FetchTemplate) -> Self {
        template.0
    }
}

impl fmt::Display for FetchTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
