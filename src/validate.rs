use super::*;

impl Page {
    /// Recomputes the error indicator on every required text control of the
    /// form. Returns whether the form may submit.
    pub(crate) fn validate_form(&mut self, form: NodeId) -> Result<bool> {
        let mut all_filled = true;
        for control in self.dom.form_controls(form) {
            let Some(element) = self.dom.element(control) else {
                continue;
            };
            if !matches!(element.tag_name.as_str(), "input" | "textarea") || !element.required {
                continue;
            }
            if element.value.trim().is_empty() {
                self.dom.class_add(control, INPUT_ERROR_CLASS)?;
                all_filled = false;
            } else {
                self.dom.class_remove(control, INPUT_ERROR_CLASS)?;
            }
        }
        Ok(all_filled)
    }

    /// Name/value pairs of the form's named controls, in document order.
    /// Radio and checkbox inputs contribute only while checked.
    pub(crate) fn collect_form_submission(&self, form: NodeId) -> FormSubmission {
        let label = self.form_label(form);
        let mut fields = Vec::new();
        for control in self.dom.form_controls(form) {
            let Some(element) = self.dom.element(control) else {
                continue;
            };
            let Some(name) = element.attrs.get("name") else {
                continue;
            };
            if element.tag_name == "input"
                && matches!(element.input_type().as_str(), "radio" | "checkbox")
                && !element.checked
            {
                continue;
            }
            fields.push((name.clone(), element.value.clone()));
        }
        FormSubmission {
            form: label,
            fields,
        }
    }

    pub(crate) fn form_label(&self, form: NodeId) -> String {
        match self.dom.attr(form, "id") {
            Some(id) => format!("#{id}"),
            None => "form".to_string(),
        }
    }
}
