use fancy_regex::Regex;

use crate::{Error, Result};

// CSS identifier: no leading digit, and no digit right after a leading hyphen.
const CSS_IDENT_PATTERN: &str = r"^(?!-?\d)-?[A-Za-z0-9_-]+$";

/// What `initialize` does when the page lacks an element it was told to wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingElementPolicy {
    /// Return `Error::MissingElement`.
    #[default]
    FailFast,
    /// Leave the behavior unattached and note it in the trace.
    Skip,
}

/// Names the elements the home-page behaviors attach to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeConfig {
    pub join_form_id: String,
    pub code_field: String,
    pub base_path: String,
    pub trigger_class: String,
    pub message_class: String,
    pub shown_class: String,
    pub missing_elements: MissingElementPolicy,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            join_form_id: "join".into(),
            code_field: "input[name=\"code\"]".into(),
            base_path: "/play/".into(),
            trigger_class: "help".into(),
            message_class: "message".into(),
            shown_class: "show".into(),
            missing_elements: MissingElementPolicy::FailFast,
        }
    }
}

impl HomeConfig {
    pub fn with_join_form_id(mut self, id: impl Into<String>) -> Self {
        self.join_form_id = id.into();
        self
    }

    pub fn with_code_field(mut self, selector: impl Into<String>) -> Self {
        self.code_field = selector.into();
        self
    }

    pub fn with_base_path(mut self, path: impl Into<String>) -> Self {
        self.base_path = path.into();
        self
    }

    pub fn with_trigger_class(mut self, class_name: impl Into<String>) -> Self {
        self.trigger_class = class_name.into();
        self
    }

    pub fn with_message_class(mut self, class_name: impl Into<String>) -> Self {
        self.message_class = class_name.into();
        self
    }

    pub fn with_shown_class(mut self, class_name: impl Into<String>) -> Self {
        self.shown_class = class_name.into();
        self
    }

    pub fn with_missing_elements(mut self, policy: MissingElementPolicy) -> Self {
        self.missing_elements = policy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let ident = Regex::new(CSS_IDENT_PATTERN)
            .map_err(|err| Error::InvalidConfig(format!("identifier pattern: {err}")))?;

        for (field, value) in [
            ("join_form_id", &self.join_form_id),
            ("trigger_class", &self.trigger_class),
            ("message_class", &self.message_class),
            ("shown_class", &self.shown_class),
        ] {
            let valid = ident
                .is_match(value)
                .map_err(|err| Error::InvalidConfig(format!("{field}: {err}")))?;
            if !valid {
                return Err(Error::InvalidConfig(format!(
                    "{field} is not a CSS identifier: {value:?}"
                )));
            }
        }

        if self.trigger_class == self.message_class {
            return Err(Error::InvalidConfig(
                "trigger_class and message_class must differ".into(),
            ));
        }

        if !self.base_path.starts_with('/') || !self.base_path.ends_with('/') {
            return Err(Error::InvalidConfig(format!(
                "base_path must start and end with '/': {:?}",
                self.base_path
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_the_home_page() -> Result<()> {
        let config = HomeConfig::default();
        config.validate()?;
        assert_eq!(config.base_path, "/play/");
        assert_eq!(config.missing_elements, MissingElementPolicy::FailFast);
        Ok(())
    }

    #[test]
    fn setters_chain() -> Result<()> {
        let config = HomeConfig::default()
            .with_join_form_id("join-game")
            .with_base_path("/room/")
            .with_shown_class("is-open")
            .with_missing_elements(MissingElementPolicy::Skip);
        config.validate()?;
        assert_eq!(config.join_form_id, "join-game");
        assert_eq!(config.missing_elements, MissingElementPolicy::Skip);
        Ok(())
    }

    #[test]
    fn rejects_non_identifiers() {
        for config in [
            HomeConfig::default().with_join_form_id("join form"),
            HomeConfig::default().with_trigger_class("1help"),
            HomeConfig::default().with_message_class(".message"),
            HomeConfig::default().with_shown_class(""),
            HomeConfig::default().with_shown_class("-2x"),
        ] {
            assert!(
                matches!(config.validate(), Err(Error::InvalidConfig(_))),
                "{config:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_clashing_classes_and_bad_base_path() {
        let clash = HomeConfig::default().with_message_class("help");
        assert!(matches!(clash.validate(), Err(Error::InvalidConfig(_))));

        for path in ["play/", "/play", ""] {
            let config = HomeConfig::default().with_base_path(path);
            assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
        }
    }
}
