use super::*;

/// Timing and geometry knobs. Defaults match the site's shipped constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageConfig {
    pub viewport_height: i64,
    pub reveal_margin_px: i64,
    pub entrance_step_ms: i64,
    pub toast_show_delay_ms: i64,
    pub toast_hide_after_ms: i64,
    pub toast_remove_after_ms: i64,
    pub quiz_submit_delay_ms: i64,
    pub stats_url: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            viewport_height: 800,
            reveal_margin_px: 100,
            entrance_step_ms: 150,
            toast_show_delay_ms: 100,
            toast_hide_after_ms: 3500,
            toast_remove_after_ms: 4000,
            quiz_submit_delay_ms: 700,
            stats_url: "/api/stats".to_string(),
        }
    }
}

/// A native form submission observed by the harness: the form's label
/// (`#id` when it has one) and its successful name/value pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub form: String,
    pub fields: Vec<(String, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EventKind {
    Submit,
    Scroll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HookKind {
    Validate,
    Quiz,
    RevealScan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HookTarget {
    Window,
    Node(NodeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Listener {
    pub(crate) target: HookTarget,
    pub(crate) event: EventKind,
    pub(crate) hook: HookKind,
}

/// One loaded page: document, listener bindings, virtual clock, toast and
/// chart state, and the mocked platform edges. Nothing binds until
/// [`Page::boot`] runs.
#[derive(Debug)]
pub struct Page {
    pub(crate) dom: Dom,
    pub(crate) listeners: Vec<Listener>,
    pub(crate) scheduler: SchedulerState,
    pub(crate) trace: TraceState,
    pub(crate) config: PageConfig,
    pub(crate) scroll_y: i64,
    pub(crate) chart: Option<ChartSpec>,
    pub(crate) fetch_mocks: HashMap<String, FetchMock>,
    pub(crate) fetch_calls: Vec<String>,
    pub(crate) form_submissions: Vec<FormSubmission>,
    pub(crate) booted: bool,
}

impl Page {
    pub fn from_html(html: &str) -> Result<Self> {
        Self::from_html_with_config(html, PageConfig::default())
    }

    pub fn from_html_with_config(html: &str, config: PageConfig) -> Result<Self> {
        let mut dom = crate::html::parse_html(html)?;
        dom.ensure_head();
        dom.ensure_body();
        Ok(Self {
            dom,
            listeners: Vec::new(),
            scheduler: SchedulerState::default(),
            trace: TraceState::default(),
            config,
            scroll_y: 0,
            chart: None,
            fetch_mocks: HashMap::new(),
            fetch_calls: Vec::new(),
            form_submissions: Vec::new(),
            booted: false,
        })
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut PageConfig {
        &mut self.config
    }

    /// The load sequence, in source order: inject the feedback stylesheet,
    /// schedule the entrance cascade, bind and run the reveal scan, bind
    /// the validators, start the stats loader, bind the quiz hook.
    pub fn boot(&mut self) -> Result<()> {
        if self.booted {
            return Err(Error::Runtime("page already booted".into()));
        }
        self.booted = true;

        self.inject_feedback_stylesheet()?;
        self.schedule_entrance_cascade();

        self.listeners.push(Listener {
            target: HookTarget::Window,
            event: EventKind::Scroll,
            hook: HookKind::RevealScan,
        });
        self.reveal_scan()?;

        for form in self.dom.elements_by_tag("form") {
            self.listeners.push(Listener {
                target: HookTarget::Node(form),
                event: EventKind::Submit,
                hook: HookKind::Validate,
            });
        }

        self.start_stats_loader();

        if let Some(form) = self.dom.by_id(QUIZ_FORM_ID) {
            if self
                .dom
                .tag_name(form)
                .map(|tag| tag.eq_ignore_ascii_case("form"))
                .unwrap_or(false)
            {
                self.listeners.push(Listener {
                    target: HookTarget::Node(form),
                    event: EventKind::Submit,
                    hook: HookKind::Quiz,
                });
            }
        }
        Ok(())
    }

    fn inject_feedback_stylesheet(&mut self) -> Result<()> {
        let head = self.dom.ensure_head();
        let style = self.dom.create_element(head, "style");
        self.dom.set_attr(style, "id", STYLE_ELEMENT_ID)?;
        self.dom.set_text_content(style, &feedback_stylesheet());
        Ok(())
    }

    // --- user actions -----------------------------------------------------

    /// Scrolls the window and fires the scroll listeners.
    pub fn scroll_to(&mut self, y: i64) -> Result<()> {
        if y < 0 {
            return Err(Error::Runtime(
                "scroll_to requires a non-negative offset".into(),
            ));
        }
        self.scroll_y = y;
        self.trace_event_line(format!("[event] scroll y={y}"));
        let scan_bound = self.listeners.iter().any(|listener| {
            listener.target == HookTarget::Window && listener.event == EventKind::Scroll
        });
        if scan_bound {
            self.reveal_scan()?;
        }
        Ok(())
    }

    /// Dispatches a submit event against the form owning `selector`.
    pub fn submit(&mut self, selector: &str) -> Result<()> {
        let target = self.dom.select_one(selector)?;
        let form = self.dom.owning_form(target).ok_or_else(|| {
            Error::Runtime(format!("submit target has no owning form: {selector}"))
        })?;
        self.submit_form(form)
    }

    pub fn dispatch(&mut self, selector: &str, event: &str) -> Result<()> {
        match event {
            "submit" => self.submit(selector),
            "scroll" => {
                self.dom.select_one(selector)?;
                self.scroll_to(self.scroll_y)
            }
            other => Err(Error::Runtime(format!("unsupported event: {other}"))),
        }
    }

    pub(crate) fn submit_form(&mut self, form: NodeId) -> Result<()> {
        let hooks = self
            .listeners
            .iter()
            .filter(|listener| {
                listener.target == HookTarget::Node(form) && listener.event == EventKind::Submit
            })
            .map(|listener| listener.hook)
            .collect::<Vec<_>>();

        let mut prevented = false;
        for hook in hooks {
            match hook {
                HookKind::Validate => {
                    if !self.validate_form(form)? {
                        prevented = true;
                        self.notify(REQUIRED_FIELDS_MESSAGE, ToastSeverity::Warning)?;
                    }
                }
                HookKind::Quiz => {
                    self.quiz_intercept(form)?;
                    prevented = true;
                }
                HookKind::RevealScan => {}
            }
        }

        let label = self.form_label(form);
        self.trace_event_line(format!("[event] submit {label} prevented={prevented}"));
        if !prevented {
            let submission = self.collect_form_submission(form);
            self.form_submissions.push(submission);
        }
        Ok(())
    }

    /// Sets the value of an `input` or `textarea` control.
    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let target = self.dom.select_one(selector)?;
        let element = self
            .dom
            .element_mut(target)
            .filter(|element| matches!(element.tag_name.as_str(), "input" | "textarea"))
            .ok_or_else(|| {
                Error::Runtime(format!("type_text target is not a text control: {selector}"))
            })?;
        element.value = text.to_string();
        Ok(())
    }

    /// Checks or unchecks a radio/checkbox input. Checking a named radio
    /// releases the rest of its group.
    pub fn set_checked(&mut self, selector: &str, checked: bool) -> Result<()> {
        let target = self.dom.select_one(selector)?;
        let (input_type, group) = {
            let element = self
                .dom
                .element(target)
                .filter(|element| element.tag_name == "input")
                .ok_or_else(|| {
                    Error::Runtime(format!("set_checked target is not an input: {selector}"))
                })?;
            (element.input_type(), element.attrs.get("name").cloned())
        };
        if checked && input_type == "radio" {
            if let Some(name) = group {
                let scope = self.dom.owning_form(target).unwrap_or(self.dom.root);
                let mut members = Vec::new();
                self.dom.collect_elements_dfs(scope, &mut members);
                for member in members {
                    let Some(element) = self.dom.element_mut(member) else {
                        continue;
                    };
                    if element.tag_name == "input"
                        && element.input_type() == "radio"
                        && element.attrs.get("name") == Some(&name)
                    {
                        element.checked = false;
                    }
                }
            }
        }
        if let Some(element) = self.dom.element_mut(target) {
            element.checked = checked;
        }
        Ok(())
    }

    /// Injects the document-space top coordinate used by the reveal scan.
    pub fn set_layout_top(&mut self, selector: &str, top: i64) -> Result<()> {
        let target = self.dom.select_one(selector)?;
        let element = self
            .dom
            .element_mut(target)
            .ok_or_else(|| Error::Runtime(format!("layout target is not an element: {selector}")))?;
        element.layout_top = top;
        Ok(())
    }

    pub fn set_viewport_height(&mut self, height: i64) {
        self.config.viewport_height = height;
    }

    // --- virtual clock ----------------------------------------------------

    pub fn now_ms(&self) -> i64 {
        self.scheduler.now_ms
    }

    pub fn advance_time(&mut self, delta_ms: i64) -> Result<()> {
        if delta_ms < 0 {
            return Err(Error::Runtime(
                "advance_time requires non-negative milliseconds".into(),
            ));
        }
        let from = self.scheduler.now_ms;
        self.scheduler.now_ms = self.scheduler.now_ms.saturating_add(delta_ms);
        let ran = self.run_due_timers_internal()?;
        self.trace_timer_line(format!(
            "[timer] advance delta_ms={} from={} to={} ran_due={}",
            delta_ms, from, self.scheduler.now_ms, ran
        ));
        Ok(())
    }

    pub fn advance_time_to(&mut self, target_ms: i64) -> Result<()> {
        if target_ms < self.scheduler.now_ms {
            return Err(Error::Runtime(format!(
                "advance_time_to requires target >= now_ms (target={target_ms}, now_ms={})",
                self.scheduler.now_ms
            )));
        }
        let from = self.scheduler.now_ms;
        self.scheduler.now_ms = target_ms;
        let ran = self.run_due_timers_internal()?;
        self.trace_timer_line(format!(
            "[timer] advance_to from={} to={} ran_due={}",
            from, self.scheduler.now_ms, ran
        ));
        Ok(())
    }

    /// Runs every pending task, advancing the clock as needed.
    pub fn flush(&mut self) -> Result<()> {
        let from = self.scheduler.now_ms;
        let ran = self.run_timer_queue(None, true)?;
        self.trace_timer_line(format!(
            "[timer] flush from={} to={} ran={}",
            from, self.scheduler.now_ms, ran
        ));
        Ok(())
    }

    pub fn run_due_timers(&mut self) -> Result<usize> {
        let ran = self.run_due_timers_internal()?;
        self.trace_timer_line(format!(
            "[timer] run_due now_ms={} ran={}",
            self.scheduler.now_ms, ran
        ));
        Ok(ran)
    }

    pub fn run_next_timer(&mut self) -> Result<bool> {
        let Some(next_idx) = self.scheduler.next_task_index(None) else {
            self.trace_timer_line("[timer] run_next none".into());
            return Ok(false);
        };
        let task = self.scheduler.task_queue.remove(next_idx);
        if task.due_at > self.scheduler.now_ms {
            self.scheduler.now_ms = task.due_at;
        }
        self.execute_task(task)?;
        Ok(true)
    }

    fn run_due_timers_internal(&mut self) -> Result<usize> {
        self.run_timer_queue(Some(self.scheduler.now_ms), false)
    }

    fn run_timer_queue(&mut self, due_limit: Option<i64>, advance_clock: bool) -> Result<usize> {
        let mut steps = 0usize;
        while let Some(next_idx) = self.scheduler.next_task_index(due_limit) {
            steps += 1;
            if steps > self.scheduler.timer_step_limit {
                return Err(Error::Runtime(format!(
                    "timer queue exceeded max task steps: limit={}, now_ms={}, pending={}",
                    self.scheduler.timer_step_limit,
                    self.scheduler.now_ms,
                    self.scheduler.task_queue.len()
                )));
            }
            let task = self.scheduler.task_queue.remove(next_idx);
            if advance_clock && task.due_at > self.scheduler.now_ms {
                self.scheduler.now_ms = task.due_at;
            }
            self.execute_task(task)?;
        }
        Ok(steps)
    }

    fn execute_task(&mut self, task: ScheduledTask) -> Result<()> {
        self.trace_timer_line(format!(
            "[timer] run id={} kind={} due_at={} now_ms={}",
            task.id,
            task.kind.label(),
            task.due_at,
            self.scheduler.now_ms
        ));
        match task.kind {
            TaskKind::EntranceStep(node) => self.entrance_step(node),
            TaskKind::ToastShow(node) => self.toast_show(node),
            TaskKind::ToastHide(node) => self.toast_hide(node),
            TaskKind::ToastRemove(node) => {
                self.toast_remove(node);
                Ok(())
            }
            TaskKind::StatsResolve => self.resolve_stats(),
            TaskKind::QuizSubmit(form) => self.quiz_native_submit(form),
        }
    }

    pub fn pending_timers(&self) -> Vec<PendingTimer> {
        self.scheduler.pending()
    }

    pub fn clear_timer(&mut self, timer_id: i64) -> bool {
        let existed = self.scheduler.clear(timer_id);
        self.trace_timer_line(format!("[timer] clear id={timer_id} existed={existed}"));
        existed
    }

    pub fn clear_all_timers(&mut self) -> usize {
        let cleared = self.scheduler.clear_all();
        self.trace_timer_line(format!("[timer] clear_all cleared={cleared}"));
        cleared
    }

    // --- platform mocks and records ---------------------------------------

    pub fn set_fetch_mock(&mut self, url: &str, status: u16, body: &str) {
        self.fetch_mocks.insert(
            url.to_string(),
            FetchMock {
                status,
                body: body.to_string(),
            },
        );
    }

    pub fn clear_fetch_mocks(&mut self) {
        self.fetch_mocks.clear();
    }

    pub fn take_fetch_calls(&mut self) -> Vec<String> {
        std::mem::take(&mut self.fetch_calls)
    }

    pub fn take_form_submissions(&mut self) -> Vec<FormSubmission> {
        std::mem::take(&mut self.form_submissions)
    }

    pub fn rendered_chart(&self) -> Option<&ChartSpec> {
        self.chart.as_ref()
    }

    // --- queries and assertions -------------------------------------------

    pub fn query(&self, selector: &str) -> Result<Option<NodeId>> {
        self.dom.query_selector(selector)
    }

    pub fn query_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        self.dom.query_selector_all(selector)
    }

    pub fn text(&self, selector: &str) -> Result<String> {
        let target = self.dom.select_one(selector)?;
        Ok(self.dom.text_content(target).trim().to_string())
    }

    pub fn class_contains(&self, selector: &str, class_name: &str) -> Result<bool> {
        let target = self.dom.select_one(selector)?;
        Ok(self.dom.class_contains(target, class_name))
    }

    pub fn style_of(&self, selector: &str, prop: &str) -> Result<String> {
        let target = self.dom.select_one(selector)?;
        Ok(self.dom.style_get(target, prop))
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        self.dom.select_one(selector).map(|_| ())
    }

    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        let actual = self.text(selector)?;
        if actual != expected.trim() {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.trim().to_string(),
                actual,
            });
        }
        Ok(())
    }

    pub fn assert_class(&self, selector: &str, class_name: &str, expected: bool) -> Result<()> {
        let actual = self.class_contains(selector, class_name)?;
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: format!("class {class_name} present={expected}"),
                actual: format!("class {class_name} present={actual}"),
            });
        }
        Ok(())
    }

    pub fn assert_style(&self, selector: &str, prop: &str, expected: &str) -> Result<()> {
        let actual = self.style_of(selector, prop)?;
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: format!("{prop}: {expected}"),
                actual: format!("{prop}: {actual}"),
            });
        }
        Ok(())
    }

    // --- trace ------------------------------------------------------------

    pub fn set_trace_enabled(&mut self, enabled: bool) {
        self.trace.enabled = enabled;
    }

    pub fn set_trace_stderr(&mut self, enabled: bool) {
        self.trace.to_stderr = enabled;
    }

    pub fn set_trace_events(&mut self, enabled: bool) {
        self.trace.events = enabled;
    }

    pub fn set_trace_timers(&mut self, enabled: bool) {
        self.trace.timers = enabled;
    }

    pub fn set_trace_fetch(&mut self, enabled: bool) {
        self.trace.fetch = enabled;
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        if max_entries == 0 {
            return Err(Error::Runtime(
                "set_trace_log_limit requires at least 1 entry".into(),
            ));
        }
        self.trace.log_limit = max_entries;
        while self.trace.logs.len() > self.trace.log_limit {
            self.trace.logs.pop_front();
        }
        Ok(())
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.trace.logs).into()
    }

    pub(crate) fn trace_timer_line(&mut self, line: String) {
        if self.trace.timers {
            self.trace.push(line);
        }
    }

    pub(crate) fn trace_event_line(&mut self, line: String) {
        if self.trace.events {
            self.trace.push(line);
        }
    }

    pub(crate) fn trace_fetch_line(&mut self, line: String) {
        if self.trace.fetch {
            self.trace.push(line);
        }
    }
}
