use tinyquiz_home::{Error, HomeConfig, MissingElementPolicy, Navigation, Page, initialize};

const HOME_HTML: &str = r#"
<!DOCTYPE html>
<html lang="cs">
<head>
  <title>tinyquiz</title>
  <script src="/static/home.js"></script>
</head>
<body>
  <header><h1 id="title">tinyquiz</h1></header>
  <main>
    <form id="join" method="post">
      <h2>Připojit se ke hře</h2>
      <div class="field">
        <label for="join-code">Kód hry</label>
        <input id="join-code" name="code">
        <span id="code-help" class="help">?</span>
        <p id="code-msg" class="message">Kód dostanete od organizátora.</p>
      </div>
      <div class="field">
        <label for="join-name">Jméno</label>
        <input id="join-name" name="player">
        <span id="name-help" class="help">?</span>
        <p id="name-msg" class="message">Jméno uvidí ostatní hráči.</p>
      </div>
      <button id="join-submit" type="submit">Hrát</button>
    </form>
    <form id="new-session" method="post" action="/session">
      <input name="code">
      <input name="organiser">
      <button id="session-submit">Založit</button>
    </form>
  </main>
  <footer id="footer">stats</footer>
</body>
</html>
"#;

fn home_page() -> tinyquiz_home::Result<Page> {
    let mut page = Page::from_html(HOME_HTML)?;
    page.set_trace_stderr(false);
    initialize(&mut page, &HomeConfig::default())?;
    Ok(page)
}

fn shown(page: &Page, selector: &str) -> tinyquiz_home::Result<bool> {
    page.has_class(selector, "show")
}

#[test]
fn join_submission_embeds_encoded_code_in_path() -> tinyquiz_home::Result<()> {
    let mut page = home_page()?;
    page.type_text("#join-code", "ab cd/ef")?;
    page.type_text("#join-name", "Pepa")?;
    page.click("#join-submit")?;

    page.assert_attr("#join", "action", "/play/ab%20cd%2Fef")?;
    let navigation = page.take_navigation();
    assert_eq!(
        navigation,
        Some(Navigation {
            method: "post".into(),
            action: "/play/ab%20cd%2Fef".into(),
        })
    );
    Ok(())
}

#[test]
fn submit_reads_the_value_at_submission_time() -> tinyquiz_home::Result<()> {
    let mut page = home_page()?;
    page.type_text("#join-code", "first")?;
    page.submit("#join")?;
    page.assert_attr("#join", "action", "/play/first")?;

    page.type_text("#join-code", "A#1?x")?;
    page.submit("#join-code")?;
    page.assert_attr("#join", "action", "/play/A%231%3Fx")?;
    Ok(())
}

#[test]
fn empty_code_submits_to_bare_base_path() -> tinyquiz_home::Result<()> {
    let mut page = home_page()?;
    page.submit("#join")?;
    let navigation = page.take_navigation();
    assert_eq!(navigation.map(|nav| nav.action), Some("/play/".to_string()));
    Ok(())
}

#[test]
fn other_forms_keep_their_destination() -> tinyquiz_home::Result<()> {
    let mut page = home_page()?;
    page.type_text("#new-session input[name=code]", "xyz")?;
    page.click("#session-submit")?;
    page.assert_attr("#new-session", "action", "/session")?;
    page.assert_attr("#join", "action", "(absent)")?;
    Ok(())
}

#[test]
fn room_code_round_trips_through_destination() -> tinyquiz_home::Result<()> {
    let mut page = home_page()?;
    page.type_text("#join-code", "kvíz 2/3")?;
    page.submit("#join")?;
    let navigation = page
        .take_navigation()
        .ok_or_else(|| Error::SelectorNotFound("navigation".into()))?;
    assert_eq!(navigation.room_code("/play/"), Some(Ok("kvíz 2/3".to_string())));
    Ok(())
}

#[test]
fn two_help_items_scenario() -> tinyquiz_home::Result<()> {
    let mut page = home_page()?;
    assert!(!shown(&page, "#code-msg")?);
    assert!(!shown(&page, "#name-msg")?);

    page.click("#code-help")?;
    assert!(shown(&page, "#code-msg")?);
    assert!(!shown(&page, "#name-msg")?);

    page.click("#name-help")?;
    assert!(shown(&page, "#code-msg")?);
    assert!(shown(&page, "#name-msg")?);

    page.click("#footer")?;
    assert!(!shown(&page, "#code-msg")?);
    assert!(!shown(&page, "#name-msg")?);
    Ok(())
}

#[test]
fn trigger_click_toggles_back_to_hidden() -> tinyquiz_home::Result<()> {
    let mut page = home_page()?;
    page.click("#code-help")?;
    page.click("#name-help")?;
    page.click("#code-help")?;
    assert!(!shown(&page, "#code-msg")?);
    assert!(shown(&page, "#name-msg")?);
    Ok(())
}

#[test]
fn clicking_a_message_itself_hides_it() -> tinyquiz_home::Result<()> {
    let mut page = home_page()?;
    page.click("#code-help")?;
    page.click("#code-msg")?;
    assert!(!shown(&page, "#code-msg")?);
    Ok(())
}

#[test]
fn clicking_submit_hides_help_and_still_submits() -> tinyquiz_home::Result<()> {
    let mut page = home_page()?;
    page.click("#code-help")?;
    page.type_text("#join-code", "q1")?;
    page.click("#join-submit")?;
    assert!(!shown(&page, "#code-msg")?);
    assert!(page.last_navigation().is_some());
    Ok(())
}

#[test]
fn clicks_outside_body_do_not_reach_the_page_listener() -> tinyquiz_home::Result<()> {
    let mut page = home_page()?;
    page.click("#code-help")?;
    page.click("head")?;
    assert!(shown(&page, "#code-msg")?);
    Ok(())
}

#[test]
fn shown_class_written_by_server_is_cleared_by_outside_click() -> tinyquiz_home::Result<()> {
    let html = r#"
    <body>
      <div><span class="help">?</span><p id="msg" class="message show">preset</p></div>
      <p id="elsewhere">x</p>
    </body>
    "#;
    let mut page = Page::from_html(html)?;
    let config = HomeConfig::default().with_missing_elements(MissingElementPolicy::Skip);
    initialize(&mut page, &config)?;
    page.click("#elsewhere")?;
    assert!(!page.has_class("#msg", "show")?);
    Ok(())
}

#[test]
fn trace_records_activation_and_hide_all() -> tinyquiz_home::Result<()> {
    let mut page = home_page()?;
    page.enable_trace(true);
    page.click("#code-help")?;
    page.click("#footer")?;

    let logs = page.take_trace_logs();
    assert_eq!(
        logs,
        vec![
            r#"[help] activated <span class="help" id="code-help"> message=<p class="message show" id="code-msg"> shown=true"#.to_string(),
            r#"[event] done click target=<span class="help" id="code-help"> outcome=consumed consumed=true"#.to_string(),
            "[help] hide_all hidden=1".to_string(),
            r#"[event] done click target=<footer id="footer"> outcome=completed consumed=false"#.to_string(),
        ]
    );
    Ok(())
}

#[test]
fn trace_records_join_rewrite() -> tinyquiz_home::Result<()> {
    let mut page = home_page()?;
    page.enable_trace(true);
    page.type_text("#join-code", "a b")?;
    page.submit("#join")?;

    let logs = page.take_trace_logs();
    assert_eq!(logs.first().map(String::as_str), Some("[join] action=/play/a%20b"));
    assert_eq!(
        logs.last().map(String::as_str),
        Some("[event] navigate method=post action=/play/a%20b")
    );
    Ok(())
}

#[test]
fn custom_config_targets_other_markup() -> tinyquiz_home::Result<()> {
    let html = r#"
    <body>
      <form id="enter"><textarea class="room"></textarea></form>
      <section><i class="hint-icon">i</i><small id="hint" class="hint">hint</small></section>
      <p id="other">x</p>
    </body>
    "#;
    let mut page = Page::from_html(html)?;
    let config = HomeConfig::default()
        .with_join_form_id("enter")
        .with_code_field("textarea.room")
        .with_base_path("/room/")
        .with_trigger_class("hint-icon")
        .with_message_class("hint")
        .with_shown_class("open");
    initialize(&mut page, &config)?;

    page.type_text("textarea.room", "x/y")?;
    page.submit("#enter")?;
    page.assert_attr("#enter", "action", "/room/x%2Fy")?;

    page.click(".hint-icon")?;
    assert!(page.has_class("#hint", "open")?);
    page.click("#other")?;
    assert!(!page.has_class("#hint", "open")?);
    Ok(())
}

#[test]
fn unpaired_trigger_fails_initialization() -> tinyquiz_home::Result<()> {
    let html = r#"
    <body>
      <form id="join"><input name="code"></form>
      <div><span class="help">?</span></div>
    </body>
    "#;
    let mut page = Page::from_html(html)?;
    let err = initialize(&mut page, &HomeConfig::default()).err();
    assert_eq!(
        err,
        Some(Error::UnpairedHelpTrigger {
            trigger: r#"<span class="help">"#.into(),
            messages: 0,
        })
    );
    assert!(!page.is_initialized());
    Ok(())
}

#[test]
fn skipped_join_form_leaves_help_working() -> tinyquiz_home::Result<()> {
    let html = r#"
    <body>
      <div><span id="t" class="help">?</span><p id="m" class="message">m</p></div>
    </body>
    "#;
    let mut page = Page::from_html(html)?;
    let config = HomeConfig::default().with_missing_elements(MissingElementPolicy::Skip);
    initialize(&mut page, &config)?;
    page.click("#t")?;
    assert!(page.has_class("#m", "show")?);
    Ok(())
}

#[test]
fn uninitialized_page_ignores_help_triggers() -> tinyquiz_home::Result<()> {
    let mut page = Page::from_html(HOME_HTML)?;
    page.click("#code-help")?;
    assert!(!shown(&page, "#code-msg")?);
    Ok(())
}

#[test]
fn disabled_attribute_on_plain_elements_does_not_swallow_clicks() -> tinyquiz_home::Result<()> {
    let html = r#"
    <body>
      <div><span id="t" class="help" disabled>?</span><p id="m" class="message">m</p></div>
      <div id="note" disabled>note</div>
    </body>
    "#;
    let mut page = Page::from_html(html)?;
    let config = HomeConfig::default().with_missing_elements(MissingElementPolicy::Skip);
    initialize(&mut page, &config)?;

    page.click("#t")?;
    assert!(page.has_class("#m", "show")?);
    page.click("#note")?;
    assert!(!page.has_class("#m", "show")?);
    Ok(())
}

#[test]
fn disabled_submit_button_does_nothing() -> tinyquiz_home::Result<()> {
    let html = r#"
    <body>
      <form id="join"><input name="code"><button id="go" disabled>go</button></form>
      <div><span id="t" class="help">?</span><p id="m" class="message">m</p></div>
    </body>
    "#;
    let mut page = Page::from_html(html)?;
    initialize(&mut page, &HomeConfig::default())?;
    page.click("#t")?;
    page.click("#go")?;
    assert!(page.last_navigation().is_none());
    assert!(page.has_class("#m", "show")?);
    Ok(())
}

#[test]
fn assert_exists_reports_missing_elements() -> tinyquiz_home::Result<()> {
    let page = home_page()?;
    page.assert_exists("#join-code")?;
    page.assert_exists("form#join .field > span.help")?;
    assert_eq!(
        page.assert_exists("#join .missing"),
        Err(Error::SelectorNotFound("#join .missing".into()))
    );
    Ok(())
}

#[test]
fn dump_dom_serializes_current_state() -> tinyquiz_home::Result<()> {
    let mut page = home_page()?;
    assert_eq!(
        page.dump_dom("#code-msg")?,
        r#"<p class="message" id="code-msg">Kód dostanete od organizátora.</p>"#
    );
    page.click("#code-help")?;
    assert_eq!(
        page.dump_dom("#code-msg")?,
        r#"<p class="message show" id="code-msg">Kód dostanete od organizátora.</p>"#
    );
    assert_eq!(
        page.dump_dom("#nope"),
        Err(Error::SelectorNotFound("#nope".into()))
    );
    Ok(())
}
