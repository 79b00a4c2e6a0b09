//! `StatusLogger` backed by `tracing`

use crate::application::ApplicationError;
use crate::infrastructure::traits::{LogProperty, StatusLogger};

/// Emits status events through the global tracing subscriber.
#[derive(Debug, Default)]
pub struct TracingStatusLogger;

impl StatusLogger for TracingStatusLogger {
    fn error(&self, cause: &ApplicationError, template: &str, properties: &[LogProperty]) {
        let message = render_template(template, properties);
        let environment = properties
            .iter()
            .find(|p| p.name == "Environment")
            .map(|p| p.value.as_str())
            .unwrap_or_default();
        tracing::error!(
            template,
            environment,
            error = %cause,
            "{}",
            message
        );
    }
}

/// Substitute `{Name}` placeholders with property values.
///
/// Placeholders without a matching property are left as they are.
pub fn render_template(template: &str, properties: &[LogProperty]) -> String {
    properties.iter().fold(template.to_string(), |acc, p| {
        acc.replace(&format!("{{{}}}", p.name), &p.value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_template_substitutes_named_properties() {
        let rendered = render_template(
            "Could not get status of {Environment}",
            &[LogProperty::new("Environment", "staging")],
        );
        assert_eq!(rendered, "Could not get status of staging");
    }

    #[test]
    fn render_template_keeps_unknown_placeholders() {
        let rendered = render_template("{Service} is down", &[]);
        assert_eq!(rendered, "{Service} is down");
    }
}
