use crate::domain::RegistrationField;
use crate::use_cases::register::{FormState, RETRY_PROMPT, RegistrationForm};

pub const SUBMIT_LABEL: &str = "Register";
pub const HELP_TEXT_ROLE: &str = "help-text";
pub const REJECTED_NOTICE: &str = "Please correct the highlighted fields.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Success(String),
    Notice(String),
    Failure(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub field: RegistrationField,
    pub label: &'static str,
    pub input_type: &'static str,
    pub value: String,
    // One inline element under the input; a field's messages are joined in server order.
    pub help_text: Option<String>,
}

// Render tree for the registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub fields: Vec<FieldView>,
    pub banner: Option<Banner>,
    pub submitting: bool,
}

impl FormView {
    pub fn from_form(form: &RegistrationForm) -> Self {
        let fields = RegistrationField::ALL
            .into_iter()
            .map(|field| FieldView {
                field,
                label: field.label(),
                input_type: field.input_type(),
                // Secrets never leave the payload.
                value: if field.is_secret() {
                    String::new()
                } else {
                    form.value(field).to_string()
                },
                help_text: help_text(form, field),
            })
            .collect();

        let banner = match form.state() {
            FormState::Editing | FormState::Submitting => None,
            FormState::Succeeded { message } => Some(Banner::Success(message.clone())),
            FormState::Rejected { .. } => Some(Banner::Notice(REJECTED_NOTICE.to_string())),
            FormState::Failed { .. } => Some(Banner::Failure(RETRY_PROMPT.to_string())),
        };

        Self {
            fields,
            banner,
            submitting: matches!(form.state(), FormState::Submitting),
        }
    }

    pub fn help_text_count(&self) -> usize {
        self.fields
            .iter()
            .filter(|field| field.help_text.is_some())
            .count()
    }

    pub fn to_html(&self) -> String {
        let mut html = String::from("<form class=\"registration\">\n");

        if let Some(banner) = &self.banner {
            let (class, text) = match banner {
                Banner::Success(text) => ("success", text),
                Banner::Notice(text) => ("notice", text),
                Banner::Failure(text) => ("failure", text),
            };
            line(
                &mut html,
                &format!(
                    "  <div class=\"banner {class}\" role=\"status\">{}</div>",
                    escape_html(text)
                ),
            );
        }

        for field in &self.fields {
            let name = field.field.as_str();
            line(&mut html, "  <div class=\"field\">");
            line(
                &mut html,
                &format!(
                    "    <label for=\"{name}\">{}</label>",
                    escape_html(field.label)
                ),
            );
            line(
                &mut html,
                &format!(
                    "    <input id=\"{name}\" name=\"{name}\" type=\"{}\" value=\"{}\">",
                    field.input_type,
                    escape_html(&field.value)
                ),
            );
            if let Some(message) = &field.help_text {
                line(
                    &mut html,
                    &format!(
                        "    <p class=\"help\" role=\"{HELP_TEXT_ROLE}\">{}</p>",
                        escape_html(message)
                    ),
                );
            }
            line(&mut html, "  </div>");
        }

        let disabled = if self.submitting { " disabled" } else { "" };
        line(
            &mut html,
            &format!("  <button type=\"submit\"{disabled}>{SUBMIT_LABEL}</button>"),
        );
        html.push_str("</form>\n");
        html
    }
}

fn help_text(form: &RegistrationForm, field: RegistrationField) -> Option<String> {
    let messages: Vec<&str> = form
        .field_errors(field)
        .iter()
        .map(|error| error.message.as_str())
        .collect();
    if messages.is_empty() {
        None
    } else {
        Some(messages.join(" "))
    }
}

fn line(html: &mut String, text: &str) {
    html.push_str(text);
    html.push('\n');
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
