//! HTTP span helpers.

use uuid::Uuid;

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) route: String,
    pub(super) otel_span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let route = normalise_path(path);
    let otel_span_name = format!("{method} {route}");

    RequestSpanName {
        route,
        otel_span_name,
    }
}

/// Replace identifiers in a request path with placeholders so routes stay low-cardinality.
///
/// Session tokens follow `cart`, item slugs follow `items`, and any bare UUID becomes `{uuid}`.
fn normalise_path(path: &str) -> String {
    let mut previous: Option<&str> = None;
    let mut normalised = String::new();

    for segment in path.split('/').filter(|segment| !segment.is_empty()) {
        normalised.push('/');

        let placeholder = match previous {
            Some("cart") => Some("{session}"),
            Some("items") => Some("{slug}"),
            _ if Uuid::parse_str(segment).is_ok() => Some("{uuid}"),
            _ => None,
        };

        normalised.push_str(placeholder.unwrap_or(segment));
        previous = Some(segment);
    }

    if normalised.is_empty() {
        normalised.push('/');
    }

    normalised
}
