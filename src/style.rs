use super::*;

pub(crate) const FADE_IN_CLASS: &str = "fade-in";
pub(crate) const REVEAL_CLASS: &str = "reveal";
pub(crate) const REVEAL_ACTIVE_CLASS: &str = "active";
pub(crate) const INPUT_ERROR_CLASS: &str = "input-error";
pub(crate) const TOAST_CLASS: &str = "toast";
pub(crate) const TOAST_SHOW_CLASS: &str = "show";
pub(crate) const CHART_ANCHOR_ID: &str = "statsChart";
pub(crate) const QUIZ_FORM_ID: &str = "quizForm";
pub(crate) const STYLE_ELEMENT_ID: &str = "uiFeedbackStyles";

pub(crate) const REQUIRED_FIELDS_MESSAGE: &str =
    "Por favor, preencha todos os campos obrigatórios.";
pub(crate) const STATS_UNAVAILABLE_MESSAGE: &str =
    "Não foi possível carregar as estatísticas agora.";
pub(crate) const QUIZ_RESULT_PREFIX: &str = "Seu perfil é: ";
pub(crate) const QUIZ_RESULT_SUFFIX: &str = " ✨";

pub(crate) const CHART_LABELS: [&str; 3] = ["Criativo", "Analítico", "Equilibrado"];
pub(crate) const CHART_SEGMENT_COLORS: [&str; 3] = ["#9b59b6", "#3498db", "#2ecc71"];

pub(crate) const INFO_COLOR: &str = "#3498db";
pub(crate) const WARNING_COLOR: &str = "#f39c12";
pub(crate) const SUCCESS_COLOR: &str = "#2ecc71";
pub(crate) const ERROR_BORDER_COLOR: &str = "#e74c3c";

/// Stylesheet injected once at boot: toast placement and severity colors,
/// plus the invalid-field indicator.
pub(crate) fn feedback_stylesheet() -> String {
    format!(
        "\
.{TOAST_CLASS} {{ position: fixed; bottom: 24px; left: 50%; \
transform: translate(-50%, 12px); opacity: 0; padding: 12px 20px; \
border-radius: 6px; color: #fff; z-index: 1000; \
transition: opacity 0.3s ease, transform 0.3s ease; }}
.{TOAST_CLASS}.{TOAST_SHOW_CLASS} {{ opacity: 1; transform: translate(-50%, 0); }}
.{TOAST_CLASS}-info {{ background-color: {INFO_COLOR}; }}
.{TOAST_CLASS}-warning {{ background-color: {WARNING_COLOR}; }}
.{TOAST_CLASS}-success {{ background-color: {SUCCESS_COLOR}; }}
.{INPUT_ERROR_CLASS} {{ border: 1px solid {ERROR_BORDER_COLOR}; }}
"
    )
}
