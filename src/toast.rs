use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastSeverity {
    Info,
    Warning,
    Success,
}

impl ToastSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Success => "success",
        }
    }

    pub(crate) fn as_class(&self) -> &'static str {
        match self {
            Self::Info => "toast-info",
            Self::Warning => "toast-warning",
            Self::Success => "toast-success",
        }
    }
}

impl fmt::Display for ToastSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Page {
    /// Creates a toast element under the body and schedules its lifecycle:
    /// shown after a short delay, hidden after the display window, removed
    /// shortly after that. Concurrent toasts run their timers independently.
    pub fn notify(&mut self, message: &str, severity: ToastSeverity) -> Result<NodeId> {
        let body = self.dom.ensure_body();
        let toast = self.dom.create_element(body, "div");
        self.dom.class_add(toast, TOAST_CLASS)?;
        self.dom.class_add(toast, severity.as_class())?;
        self.dom.set_text_content(toast, message);

        let show_delay = self.config.toast_show_delay_ms;
        let hide_after = self.config.toast_hide_after_ms;
        let remove_after = self.config.toast_remove_after_ms;
        self.scheduler.schedule(TaskKind::ToastShow(toast), show_delay);
        self.scheduler.schedule(TaskKind::ToastHide(toast), hide_after);
        self.scheduler.schedule(TaskKind::ToastRemove(toast), remove_after);

        self.trace_event_line(format!("[toast] notify severity={severity} message={message:?}"));
        Ok(toast)
    }

    pub(crate) fn toast_show(&mut self, toast: NodeId) -> Result<()> {
        self.dom.class_add(toast, TOAST_SHOW_CLASS)
    }

    pub(crate) fn toast_hide(&mut self, toast: NodeId) -> Result<()> {
        self.dom.class_remove(toast, TOAST_SHOW_CLASS)
    }

    pub(crate) fn toast_remove(&mut self, toast: NodeId) {
        self.dom.remove_node(toast);
    }

    /// Message text of every toast currently in the document, in creation
    /// order.
    pub fn toast_messages(&self) -> Vec<String> {
        self.dom
            .elements_by_class(TOAST_CLASS)
            .into_iter()
            .map(|toast| self.dom.text_content(toast).trim().to_string())
            .collect()
    }
}
