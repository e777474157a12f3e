use super::*;

const DASHBOARD_HTML: &str = r#"
    <section>
      <canvas id="statsChart"></canvas>
    </section>
"#;

#[test]
fn a_successful_fetch_renders_the_doughnut_spec() -> Result<()> {
    let mut page = Page::from_html(DASHBOARD_HTML)?;
    page.set_fetch_mock(
        "/api/stats",
        200,
        r#"{"criativo": 12, "analitico": 7, "equilibrado": 4}"#,
    );
    page.boot()?;
    page.run_due_timers()?;

    let chart = page.rendered_chart().expect("chart rendered");
    assert_eq!(chart.kind, ChartKind::Doughnut);
    assert_eq!(chart.anchor, "#statsChart");
    assert_eq!(chart.labels, vec!["Criativo", "Analítico", "Equilibrado"]);
    assert_eq!(chart.values, vec![12, 7, 4]);
    assert_eq!(chart.segment_colors.len(), 3);
    assert_eq!(chart.legend_position, LegendPosition::Bottom);
    assert!(page.toast_messages().is_empty());

    assert_eq!(page.take_fetch_calls(), vec!["/api/stats".to_string()]);
    Ok(())
}

#[test]
fn missing_payload_fields_default_to_zero() -> Result<()> {
    let mut page = Page::from_html(DASHBOARD_HTML)?;
    page.set_fetch_mock("/api/stats", 200, r#"{"criativo": 5, "analitico": 3}"#);
    page.boot()?;
    page.run_due_timers()?;

    let chart = page.rendered_chart().expect("chart rendered");
    assert_eq!(chart.values, vec![5, 3, 0]);
    Ok(())
}

#[test]
fn a_server_error_produces_one_warning_toast_and_no_chart() -> Result<()> {
    let mut page = Page::from_html(DASHBOARD_HTML)?;
    page.set_fetch_mock("/api/stats", 500, r#"{"error": "interno"}"#);
    page.boot()?;
    page.run_due_timers()?;

    assert!(page.rendered_chart().is_none());
    assert_eq!(page.query_all(".toast.toast-warning")?.len(), 1);
    assert_eq!(
        page.toast_messages(),
        vec![STATS_UNAVAILABLE_MESSAGE.to_string()]
    );
    Ok(())
}

#[test]
fn a_network_failure_produces_the_same_generic_toast() -> Result<()> {
    let mut page = Page::from_html(DASHBOARD_HTML)?;
    // No mock registered: the request never reaches a server.
    page.boot()?;
    page.run_due_timers()?;

    assert!(page.rendered_chart().is_none());
    assert_eq!(
        page.toast_messages(),
        vec![STATS_UNAVAILABLE_MESSAGE.to_string()]
    );
    Ok(())
}

#[test]
fn a_malformed_body_is_reported_like_any_other_failure() -> Result<()> {
    let mut page = Page::from_html(DASHBOARD_HTML)?;
    page.set_fetch_mock("/api/stats", 200, "<!doctype html><p>login</p>");
    page.boot()?;
    page.run_due_timers()?;

    assert!(page.rendered_chart().is_none());
    assert_eq!(page.query_all(".toast.toast-warning")?.len(), 1);
    Ok(())
}

#[test]
fn the_loader_stays_idle_without_a_chart_anchor() -> Result<()> {
    let mut page = Page::from_html("<section><h1>Sobre</h1></section>")?;
    page.set_fetch_mock("/api/stats", 200, r#"{"criativo": 1}"#);
    page.boot()?;
    page.flush()?;

    assert!(page.rendered_chart().is_none());
    assert!(page.take_fetch_calls().is_empty());
    assert!(page.toast_messages().is_empty());
    Ok(())
}

#[test]
fn the_endpoint_is_fetched_exactly_once() -> Result<()> {
    let mut page = Page::from_html(DASHBOARD_HTML)?;
    page.set_fetch_mock("/api/stats", 200, r#"{"criativo": 1}"#);
    page.boot()?;
    page.flush()?;

    assert_eq!(page.take_fetch_calls().len(), 1);
    assert!(page.take_fetch_calls().is_empty());
    Ok(())
}

#[test]
fn the_configured_stats_url_is_honored() -> Result<()> {
    let config = PageConfig {
        stats_url: "/api/v2/estatisticas".to_string(),
        ..PageConfig::default()
    };
    let mut page = Page::from_html_with_config(DASHBOARD_HTML, config)?;
    page.set_fetch_mock("/api/v2/estatisticas", 200, r#"{"equilibrado": 9}"#);
    page.boot()?;
    page.run_due_timers()?;

    let chart = page.rendered_chart().expect("chart rendered");
    assert_eq!(chart.values, vec![0, 0, 9]);
    assert_eq!(page.take_fetch_calls(), vec!["/api/v2/estatisticas".to_string()]);
    Ok(())
}

#[test]
fn fetch_trace_lines_distinguish_status_failures() -> Result<()> {
    let mut page = Page::from_html(DASHBOARD_HTML)?;
    page.set_trace_enabled(true);
    page.set_fetch_mock("/api/stats", 500, "{}");
    page.boot()?;
    page.run_due_timers()?;

    let logs = page.take_trace_logs();
    assert!(logs.iter().any(|line| line.contains("http status 500")));
    Ok(())
}
