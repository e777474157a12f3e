use super::*;

impl Page {
    /// One entrance step per marked element, staggered by document position.
    pub(crate) fn schedule_entrance_cascade(&mut self) {
        let step = self.config.entrance_step_ms;
        let marked = self.dom.elements_by_class(FADE_IN_CLASS);
        for (index, node) in marked.into_iter().enumerate() {
            let id = self
                .scheduler
                .schedule(TaskKind::EntranceStep(node), index as i64 * step);
            self.trace_timer_line(format!(
                "[timer] schedule id={id} kind=entrance-step index={index}"
            ));
        }
    }

    pub(crate) fn entrance_step(&mut self, node: NodeId) -> Result<()> {
        self.dom.style_set(node, "opacity", "1")?;
        self.dom.style_set(node, "transform", "translateY(0)")
    }

    /// Activates every reveal-marked element whose top edge has scrolled
    /// above the activation line. Activation never reverts; the scan always
    /// walks the full marked set.
    pub(crate) fn reveal_scan(&mut self) -> Result<()> {
        let activation_line = self.config.viewport_height - self.config.reveal_margin_px;
        for node in self.dom.elements_by_class(REVEAL_CLASS) {
            let layout_top = self
                .dom
                .element(node)
                .map(|element| element.layout_top)
                .unwrap_or(0);
            if layout_top - self.scroll_y < activation_line {
                self.dom.class_add(node, REVEAL_ACTIVE_CLASS)?;
            }
        }
        Ok(())
    }
}
