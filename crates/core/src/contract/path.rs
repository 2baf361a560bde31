//! Path template handling.
//!
//! Templates use `:name` segments (`/api/automation-rules/:id/toggle`).

/// Names of the `:name` placeholders in `template`, in order.
pub fn placeholders(template: &str) -> impl Iterator<Item = &str> {
    template.split('/').filter_map(|segment| segment.strip_prefix(':'))
}

/// Substitute `:name` placeholders with concrete values.
///
/// Parameters that do not appear in the template are ignored.
///
/// # Panics
///
/// Panics if a placeholder has no matching parameter. Every caller builds its
/// parameter list next to a known route, so a gap is a programming mistake
/// rather than something to report at runtime.
pub fn build_url(template: &str, params: &[(&str, String)]) -> String {
    let lookup = |name: &str| {
        params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    };
    if let Some(name) = placeholders(template).find(|name| lookup(*name).is_none()) {
        panic!("unresolved placeholder ':{name}' in '{template}'");
    }

    template
        .split('/')
        .map(|segment| {
            segment
                .strip_prefix(':')
                .and_then(lookup)
                .unwrap_or(segment)
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Render a template in axum's `{name}` capture syntax.
pub fn router_path(template: &str) -> String {
    template
        .split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) => format!("{{{name}}}"),
            None => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}
