use crate::config::{HomeConfig, MissingElementPolicy};
use crate::dom::Dom;
use crate::help::HelpController;
use crate::join::JoinFormRedirector;
use crate::page::Page;
use crate::{Error, Result};

/// Behaviors attached to a page by [`initialize`].
#[derive(Debug, Clone)]
pub(crate) struct HomeBehaviors {
    pub(crate) join: Option<JoinFormRedirector>,
    pub(crate) help: HelpController,
}

/// Wires the join-form redirector and the help toggles into `page`.
///
/// Runs once per page; a second call returns [`Error::AlreadyInitialized`].
/// Element lookups happen here, not on every event: a help trigger without
/// exactly one message in its container always fails, while a missing join
/// form or code field follows [`HomeConfig::missing_elements`].
pub fn initialize(page: &mut Page, config: &HomeConfig) -> Result<()> {
    if page.is_initialized() {
        return Err(Error::AlreadyInitialized);
    }
    config.validate()?;

    let mut skipped = Vec::new();
    let join = wire_join_form(page.dom(), config, &mut skipped)?;
    let help = HelpController::build(
        page.dom(),
        &config.trigger_class,
        &config.message_class,
        &config.shown_class,
    )?;

    for note in skipped {
        page.trace_line(note);
    }
    page.trace_line(format!(
        "[init] join_form={} help_items={}",
        join.is_some(),
        help.items().len()
    ));
    page.attach(HomeBehaviors { join, help })
}

// Skip notes are collected in `skipped` and only traced once every behavior is built.
fn wire_join_form(
    dom: &Dom,
    config: &HomeConfig,
    skipped: &mut Vec<String>,
) -> Result<Option<JoinFormRedirector>> {
    let form_selector = format!("#{}", config.join_form_id);
    let Some(form) = dom.by_id(&config.join_form_id) else {
        return skip_or_fail(skipped, config.missing_elements, "join form", &form_selector);
    };
    if !dom.is_tag(form, "form") {
        return Err(Error::TypeMismatch {
            selector: form_selector,
            expected: "form".into(),
            actual: dom.tag_name(form).unwrap_or_default().to_string(),
        });
    }

    let Some(code_field) = dom.query_selector_from(form, &config.code_field)? else {
        let selector = format!("{form_selector} {}", config.code_field);
        return skip_or_fail(skipped, config.missing_elements, "code field", &selector);
    };
    let tag = dom.tag_name(code_field).unwrap_or_default();
    if tag != "input" && tag != "textarea" {
        return Err(Error::TypeMismatch {
            selector: config.code_field.clone(),
            expected: "input or textarea".into(),
            actual: tag.to_string(),
        });
    }

    Ok(Some(JoinFormRedirector::new(
        form,
        code_field,
        config.base_path.clone(),
    )))
}

fn skip_or_fail(
    skipped: &mut Vec<String>,
    policy: MissingElementPolicy,
    role: &str,
    selector: &str,
) -> Result<Option<JoinFormRedirector>> {
    match policy {
        MissingElementPolicy::FailFast => Err(Error::MissingElement {
            role: role.to_string(),
            selector: selector.to_string(),
        }),
        MissingElementPolicy::Skip => {
            skipped.push(format!("[init] skipped {role}: nothing matches {selector}"));
            Ok(None)
        }
    }
}
