use super::*;

/// Aggregate profile counts served by the stats endpoint. Fields the
/// backend omits default to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct StatsPayload {
    #[serde(default)]
    pub criativo: u64,
    #[serde(default)]
    pub analitico: u64,
    #[serde(default)]
    pub equilibrado: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Doughnut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Bottom,
}

/// Chart configuration handed to the rendering layer. Rendering itself is
/// outside this crate; tests assert on the spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub anchor: String,
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    pub segment_colors: Vec<String>,
    pub legend_position: LegendPosition,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FetchMock {
    pub(crate) status: u16,
    pub(crate) body: String,
}

impl Page {
    /// Issues the single stats request when the chart anchor is present.
    /// Resolution runs as an immediately-due scheduled task.
    pub(crate) fn start_stats_loader(&mut self) {
        if self.dom.by_id(CHART_ANCHOR_ID).is_none() {
            return;
        }
        let url = self.config.stats_url.clone();
        self.fetch_calls.push(url.clone());
        self.trace_fetch_line(format!("[fetch] GET {url} issued"));
        self.scheduler.schedule(TaskKind::StatsResolve, 0);
    }

    /// Continuation of the stats fetch. Success renders the chart spec;
    /// every failure mode collapses into one generic warning toast.
    pub(crate) fn resolve_stats(&mut self) -> Result<()> {
        match self.perform_stats_fetch() {
            Ok(payload) => {
                self.trace_fetch_line(format!(
                    "[fetch] GET {} resolved criativo={} analitico={} equilibrado={}",
                    self.config.stats_url, payload.criativo, payload.analitico, payload.equilibrado
                ));
                self.chart = Some(ChartSpec {
                    kind: ChartKind::Doughnut,
                    anchor: format!("#{CHART_ANCHOR_ID}"),
                    labels: CHART_LABELS.iter().map(|label| label.to_string()).collect(),
                    values: vec![payload.criativo, payload.analitico, payload.equilibrado],
                    segment_colors: CHART_SEGMENT_COLORS
                        .iter()
                        .map(|color| color.to_string())
                        .collect(),
                    legend_position: LegendPosition::Bottom,
                });
            }
            Err(err) => {
                self.trace_fetch_line(format!("[fetch] {err}"));
                self.notify(STATS_UNAVAILABLE_MESSAGE, ToastSeverity::Warning)?;
            }
        }
        Ok(())
    }

    fn perform_stats_fetch(&self) -> Result<StatsPayload> {
        let url = &self.config.stats_url;
        let mock = self.fetch_mocks.get(url).ok_or_else(|| Error::FetchFailed {
            url: url.clone(),
            status: None,
        })?;
        if !(200..300).contains(&mock.status) {
            return Err(Error::FetchFailed {
                url: url.clone(),
                status: Some(mock.status),
            });
        }
        serde_json::from_str(&mock.body).map_err(|err| Error::StatsPayload(err.to_string()))
    }
}
