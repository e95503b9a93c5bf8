use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, Uri},
    response::Response,
};

use crate::views::detail::{found, not_found, upstream_error};

use super::AppState;

/// `GET /comercio/{slug}`.
pub(super) async fn detail_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Response {
    let back = back_href(&headers);

    match state.client.get_comercio(&slug).await {
        Ok(Some(detail)) => found(&detail, back),
        Ok(None) => {
            tracing::info!(slug = %slug, "comercio not found");
            not_found(back)
        }
        Err(e) => {
            tracing::error!(error = %e, slug = %slug, "comercio lookup failed");
            upstream_error(&e.to_string(), back)
        }
    }
}

/// Listing URL the visitor came from, so the filter survives the round
/// trip. Anything but a same-host listing page falls back to `/`.
fn back_href(headers: &HeaderMap) -> String {
    let header_str = |name: header::HeaderName| headers.get(name).and_then(|v| v.to_str().ok());

    header_str(header::HOST)
        .zip(header_str(header::REFERER))
        .and_then(|(host, referer)| listing_path(referer, host))
        .unwrap_or_else(|| "/".to_owned())
}

fn listing_path(referer: &str, host: &str) -> Option<String> {
    let without_fragment = referer.split('#').next().unwrap_or(referer);
    let uri: Uri = without_fragment.parse().ok()?;

    if !matches!(uri.scheme_str(), Some("http" | "https")) {
        return None;
    }
    if !uri.authority()?.as_str().eq_ignore_ascii_case(host) {
        return None;
    }
    if uri.path() != "/" {
        return None;
    }

    Some(match uri.query() {
        Some(query) if !query.is_empty() => format!("/?{query}"),
        _ => "/".to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(host: &str, referer: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_str(host).unwrap());
        headers.insert(header::REFERER, HeaderValue::from_str(referer).unwrap());
        headers
    }

    #[test]
    fn same_host_listing_referer_is_kept() {
        let h = headers("guia.test", "http://guia.test/?q=pan&cat=Food%3A%20Bakery#top");
        assert_eq!(back_href(&h), "/?q=pan&cat=Food%3A%20Bakery");
        assert_eq!(back_href(&headers("guia.test:3000", "https://guia.test:3000")), "/");
    }

    #[test]
    fn foreign_or_non_listing_referer_falls_back() {
        assert_eq!(back_href(&headers("guia.test", "https://evil.test/?q=x")), "/");
        assert_eq!(back_href(&headers("guia.test", "http://guia.test/comercio/x")), "/");
        assert_eq!(back_href(&headers("guia.test", "javascript:alert(1)")), "/");
        assert_eq!(back_href(&headers("guia.test", "http://guia.test@evil.test/?q=x")), "/");
        assert_eq!(back_href(&headers("guia.test", "ftp://guia.test/?q=x")), "/");
        assert_eq!(back_href(&HeaderMap::new()), "/");
    }
}
