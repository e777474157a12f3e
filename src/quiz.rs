use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Criativo,
    Analitico,
    Equilibrado,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Criativo => "criativo",
            Self::Analitico => "analitico",
            Self::Equilibrado => "equilibrado",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict majority wins; a tie (including zero answers) is balanced.
pub(crate) fn classify(criativo: usize, analitico: usize) -> Profile {
    if criativo > analitico {
        Profile::Criativo
    } else if analitico > criativo {
        Profile::Analitico
    } else {
        Profile::Equilibrado
    }
}

impl Page {
    /// Submit hook of the quiz form: always cancels the native submission,
    /// announces the computed profile, and schedules the real submission
    /// after the read-the-toast delay.
    pub(crate) fn quiz_intercept(&mut self, form: NodeId) -> Result<()> {
        let (criativo, analitico) = self.tally_quiz_answers(form);
        let profile = classify(criativo, analitico);
        self.trace_event_line(format!(
            "[quiz] tally criativo={criativo} analitico={analitico} profile={profile}"
        ));

        let message = format!(
            "{QUIZ_RESULT_PREFIX}{}{QUIZ_RESULT_SUFFIX}",
            profile.as_str().to_uppercase()
        );
        self.notify(&message, ToastSeverity::Success)?;

        let id = self
            .scheduler
            .schedule(TaskKind::QuizSubmit(form), self.config.quiz_submit_delay_ms);
        self.trace_timer_line(format!("[timer] schedule id={id} kind=quiz-submit"));
        Ok(())
    }

    fn tally_quiz_answers(&self, form: NodeId) -> (usize, usize) {
        let mut criativo = 0usize;
        let mut analitico = 0usize;
        for control in self.dom.form_controls(form) {
            let Some(element) = self.dom.element(control) else {
                continue;
            };
            if element.tag_name != "input" || element.input_type() != "radio" || !element.checked {
                continue;
            }
            match element.value.as_str() {
                "criativo" => criativo += 1,
                "analitico" => analitico += 1,
                _ => {}
            }
        }
        (criativo, analitico)
    }

    /// The delayed real submission. Direct submit path: bypasses the submit
    /// hooks, so the interception does not re-trigger.
    pub(crate) fn quiz_native_submit(&mut self, form: NodeId) -> Result<()> {
        let submission = self.collect_form_submission(form);
        self.trace_event_line(format!("[event] direct submit {}", submission.form));
        self.form_submissions.push(submission);
        Ok(())
    }
}
