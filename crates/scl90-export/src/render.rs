use serde::Serialize;
use tera::{Context, Tera};

use crate::error::ExportError;
use crate::report::ReportContent;

const SUMMARY_TEMPLATE: &str = include_str!("../templates/summary.md.tera");

/// Render the built-in Markdown summary of a report.
pub fn render_summary(content: &ReportContent) -> Result<String, ExportError> {
    render_template("summary.md", SUMMARY_TEMPLATE, content)
}

/// Render a Tera template with any serialisable context.
///
/// The `template_content` is the raw template string (Jinja2 syntax).
/// The fields of `data` become the template context variables.
pub fn render_template<T: Serialize>(
    template_name: &str,
    template_content: &str,
    data: &T,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let value = serde_json::to_value(data)?;
    let context = Context::from_value(value)
        .map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(template_name, &context)?;
    Ok(rendered)
}
