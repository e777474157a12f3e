use super::*;

const LANDING_HTML: &str = r#"
    <section class="fade-in" id="hero"></section>
    <section class="fade-in" id="sobre"></section>
    <section class="fade-in" id="contato"></section>
    <article class="reveal" id="alto" data-top="200"></article>
    <article class="reveal" id="fundo" data-top="1500"></article>
"#;

#[test]
fn entrance_cascade_fires_in_document_order() -> Result<()> {
    let mut page = Page::from_html(LANDING_HTML)?;
    page.boot()?;

    page.run_due_timers()?;
    page.assert_style("#hero", "opacity", "1")?;
    assert_eq!(page.style_of("#sobre", "opacity")?, "");

    page.advance_time(150)?;
    page.assert_style("#sobre", "opacity", "1")?;
    page.assert_style("#sobre", "transform", "translateY(0)")?;
    assert_eq!(page.style_of("#contato", "opacity")?, "");

    page.advance_time(150)?;
    page.assert_style("#contato", "opacity", "1")?;
    Ok(())
}

#[test]
fn entrance_steps_never_run_out_of_order() -> Result<()> {
    let mut page = Page::from_html(LANDING_HTML)?;
    page.boot()?;

    let mut revealed_at = Vec::new();
    while page
        .pending_timers()
        .iter()
        .any(|timer| timer.due_at <= 300)
    {
        page.run_next_timer()?;
        for id in ["#hero", "#sobre", "#contato"] {
            if page.style_of(id, "opacity")? == "1" && !revealed_at.contains(&id) {
                revealed_at.push(id);
            }
        }
    }
    assert_eq!(revealed_at, vec!["#hero", "#sobre", "#contato"]);
    Ok(())
}

#[test]
fn elements_above_the_activation_line_reveal_on_boot() -> Result<()> {
    let mut page = Page::from_html(LANDING_HTML)?;
    page.boot()?;

    // 200 < 800 - 100, so the top article activates immediately.
    page.assert_class("#alto", "active", true)?;
    page.assert_class("#fundo", "active", false)?;
    Ok(())
}

#[test]
fn scrolling_past_the_threshold_activates_and_never_deactivates() -> Result<()> {
    let mut page = Page::from_html(LANDING_HTML)?;
    page.boot()?;

    // 1500 - 700 = 800, right at the line: not yet revealed.
    page.scroll_to(700)?;
    page.assert_class("#fundo", "active", false)?;

    page.scroll_to(801)?;
    page.assert_class("#fundo", "active", true)?;

    // Scrolling back up keeps the activation.
    page.scroll_to(0)?;
    page.assert_class("#fundo", "active", true)?;
    page.assert_class("#alto", "active", true)?;
    Ok(())
}

#[test]
fn layout_top_can_be_injected_after_construction() -> Result<()> {
    let mut page = Page::from_html(r#"<div class="reveal" id="bloco"></div>"#)?;
    page.set_layout_top("#bloco", 2000)?;
    page.boot()?;
    page.assert_class("#bloco", "active", false)?;

    page.scroll_to(1400)?;
    page.assert_class("#bloco", "active", true)?;
    Ok(())
}

#[test]
fn scroll_before_boot_does_not_scan() -> Result<()> {
    let mut page = Page::from_html(r#"<div class="reveal" id="bloco" data-top="0"></div>"#)?;
    page.scroll_to(500)?;
    page.assert_class("#bloco", "active", false)?;

    page.boot()?;
    page.assert_class("#bloco", "active", true)?;
    Ok(())
}

#[test]
fn viewport_height_feeds_the_activation_line() -> Result<()> {
    let mut page = Page::from_html(r#"<div class="reveal" id="bloco" data-top="500"></div>"#)?;
    page.set_viewport_height(400);
    page.boot()?;
    // 500 is below 400 - 100 = 300.
    page.assert_class("#bloco", "active", false)?;

    page.scroll_to(201)?;
    page.assert_class("#bloco", "active", true)?;
    Ok(())
}
