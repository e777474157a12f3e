use trilha_ui::{Page, PageConfig, ToastSeverity};

const LANDING_PAGE_HTML: &str = r#"
<!DOCTYPE html>
<html>
<head><title>Trilha Futuro</title></head>
<body>
  <header class="fade-in" id="topo">
    <h1>Trilha Futuro</h1>
  </header>
  <section class="fade-in" id="intro">
    <p>Descubra seu perfil profissional.</p>
  </section>
  <section class="reveal" id="depoimentos" data-top="1400">
    <p>O teste mudou minha escolha de curso.</p>
  </section>

  <canvas id="statsChart"></canvas>

  <form id="contato">
    <input type="text" id="nome" name="nome" required>
    <textarea id="mensagem" name="mensagem" required></textarea>
    <button type="submit">Enviar</button>
  </form>

  <form id="quizForm">
    <input type="radio" id="q1c" name="q1" value="criativo">
    <input type="radio" id="q1a" name="q1" value="analitico">
    <input type="radio" id="q2c" name="q2" value="criativo">
    <input type="radio" id="q2a" name="q2" value="analitico">
    <input type="radio" id="q3c" name="q3" value="criativo">
    <input type="radio" id="q3a" name="q3" value="analitico">
    <button type="submit">Ver resultado</button>
  </form>
</body>
</html>
"#;

#[test]
fn a_full_visit_exercises_every_behavior() -> trilha_ui::Result<()> {
    let mut page = Page::from_html(LANDING_PAGE_HTML)?;
    page.set_fetch_mock("/api/stats", 200, r#"{"criativo": 5, "analitico": 3}"#);
    page.boot()?;

    // The feedback stylesheet landed in the head.
    page.assert_exists("#uiFeedbackStyles")?;

    // Entrance cascade: header first, intro 150ms later.
    page.run_due_timers()?;
    page.assert_style("#topo", "opacity", "1")?;
    assert_eq!(page.style_of("#intro", "opacity")?, "");
    page.advance_time(150)?;
    page.assert_style("#intro", "opacity", "1")?;

    // The stats chart resolved from the mocked endpoint.
    let chart = page.rendered_chart().expect("chart rendered");
    assert_eq!(chart.values, vec![5, 3, 0]);

    // Scrolling reveals the testimonials and the activation sticks.
    page.assert_class("#depoimentos", "active", false)?;
    page.scroll_to(800)?;
    page.assert_class("#depoimentos", "active", true)?;
    page.scroll_to(0)?;
    page.assert_class("#depoimentos", "active", true)?;

    // A premature contact submission is blocked with a warning.
    page.submit("#contato")?;
    assert!(page.take_form_submissions().is_empty());
    assert_eq!(page.query_all(".toast.toast-warning")?.len(), 1);

    // Filled out, it goes through.
    page.type_text("#nome", "Ana")?;
    page.type_text("#mensagem", "Quero saber mais.")?;
    page.submit("#contato")?;
    let submissions = page.take_form_submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].form, "#contato");

    // The quiz announces the profile, then submits on its own delay.
    page.set_checked("#q1c", true)?;
    page.set_checked("#q2c", true)?;
    page.set_checked("#q3a", true)?;
    page.submit("#quizForm")?;
    assert!(
        page.toast_messages()
            .iter()
            .any(|message| message == "Seu perfil é: CRIATIVO ✨")
    );
    assert!(page.take_form_submissions().is_empty());
    page.advance_time(700)?;
    let submissions = page.take_form_submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].form, "#quizForm");

    // Everything drains; no timer leaks past the toast lifecycles.
    page.flush()?;
    assert!(page.pending_timers().is_empty());
    assert!(page.toast_messages().is_empty());
    Ok(())
}

#[test]
fn a_page_without_markers_boots_to_a_quiet_no_op() -> trilha_ui::Result<()> {
    let mut page = Page::from_html("<main><h1>Sobre o projeto</h1></main>")?;
    page.boot()?;
    page.flush()?;
    page.scroll_to(2000)?;

    assert!(page.pending_timers().is_empty());
    assert!(page.rendered_chart().is_none());
    assert!(page.take_fetch_calls().is_empty());
    assert!(page.toast_messages().is_empty());
    Ok(())
}

#[test]
fn booting_twice_is_rejected() {
    let mut page = Page::from_html("<div></div>").unwrap();
    page.boot().unwrap();
    assert!(page.boot().is_err());
}

#[test]
fn notify_is_usable_directly_as_a_utility() -> trilha_ui::Result<()> {
    let mut page = Page::from_html("<div></div>")?;
    page.notify("bem-vindo", ToastSeverity::Info)?;
    page.advance_time(100)?;
    assert_eq!(page.query_all(".toast.show")?.len(), 1);
    page.advance_time(3900)?;
    assert!(page.query_all(".toast")?.is_empty());
    Ok(())
}

#[test]
fn custom_timings_reshape_the_whole_schedule() -> trilha_ui::Result<()> {
    let config = PageConfig {
        entrance_step_ms: 200,
        quiz_submit_delay_ms: 1000,
        ..PageConfig::default()
    };
    let mut page = Page::from_html_with_config(
        r#"
        <div class="fade-in" id="a"></div>
        <div class="fade-in" id="b"></div>
        <form id="quizForm">
          <input type="radio" id="r" name="q1" value="criativo">
        </form>
        "#,
        config,
    )?;
    page.boot()?;

    page.advance_time(199)?;
    assert_eq!(page.style_of("#b", "opacity")?, "");
    page.advance_time(1)?;
    page.assert_style("#b", "opacity", "1")?;

    page.set_checked("#r", true)?;
    page.submit("#quizForm")?;
    page.advance_time(999)?;
    assert!(page.take_form_submissions().is_empty());
    page.advance_time(1)?;
    assert_eq!(page.take_form_submissions().len(), 1);
    Ok(())
}

#[test]
fn teardown_cancels_the_outstanding_schedule() -> trilha_ui::Result<()> {
    let mut page = Page::from_html(
        r#"
        <div class="fade-in" id="a"></div>
        <form id="quizForm"><input type="radio" id="r" name="q" value="criativo"></form>
        "#,
    )?;
    page.boot()?;
    page.submit("#quizForm")?;
    assert!(!page.pending_timers().is_empty());

    let cleared = page.clear_all_timers();
    assert!(cleared >= 4);
    page.flush()?;
    assert!(page.take_form_submissions().is_empty());
    Ok(())
}
