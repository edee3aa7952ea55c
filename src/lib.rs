use std::error::Error as StdError;
use std::fmt;

mod config;
mod dom;
mod events;
mod help;
mod home;
mod html;
mod join;
mod page;
mod selector;
mod trace;
mod uri;

pub use config::{HomeConfig, MissingElementPolicy};
pub use home::initialize;
pub use join::Navigation;
pub use page::Page;
pub use uri::{decode_uri_component, encode_uri_component};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    HtmlParse(String),
    SelectorNotFound(String),
    UnsupportedSelector(String),
    TypeMismatch {
        selector: String,
        expected: String,
        actual: String,
    },
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
    MalformedUri(String),
    MissingElement {
        role: String,
        selector: String,
    },
    UnpairedHelpTrigger {
        trigger: String,
        messages: usize,
    },
    AlreadyInitialized,
    InvalidConfig(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HtmlParse(msg) => write!(f, "html parse error: {msg}"),
            Self::SelectorNotFound(selector) => write!(f, "selector not found: {selector}"),
            Self::UnsupportedSelector(selector) => write!(f, "unsupported selector: {selector}"),
            Self::TypeMismatch {
                selector,
                expected,
                actual,
            } => write!(
                f,
                "type mismatch for {selector}: expected {expected}, actual {actual}"
            ),
            Self::AssertionFailed {
                selector,
                expected,
                actual,
                dom_snippet,
            } => write!(
                f,
                "assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}"
            ),
            Self::MalformedUri(msg) => write!(f, "malformed URI: {msg}"),
            Self::MissingElement { role, selector } => {
                write!(f, "missing {role}: nothing matches {selector}")
            }
            Self::UnpairedHelpTrigger { trigger, messages } => write!(
                f,
                "help trigger {trigger} must share its container with exactly one message, found {messages}"
            ),
            Self::AlreadyInitialized => write!(f, "page is already initialized"),
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl StdError for Error {}
