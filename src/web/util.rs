use axum::http::HeaderMap;
use axum::http::header::HOST;

use super::config::{ServerConfig, UrlStyle};

pub fn upload_path(file_name: &str) -> String {
    format!("/uploads/{}", urlencoding::encode(file_name))
}

/// Builds the URL a client can fetch `file_name` from.
///
/// Absolute URLs fall back to the relative path when neither a public URL is
/// configured nor a Host header was sent.
pub fn upload_url(config: &ServerConfig, headers: &HeaderMap, file_name: &str) -> String {
    let path = upload_path(file_name);
    match config.url_style {
        UrlStyle::Relative => path,
        UrlStyle::Absolute => match base_url(config, headers) {
            Some(base) => format!("{}{}", base.trim_end_matches('/'), path),
            None => path,
        },
    }
}

fn base_url(config: &ServerConfig, headers: &HeaderMap) -> Option<String> {
    if let Some(public) = config.public_url.as_deref() {
        return Some(public.to_string());
    }
    let host = first_header_value(headers, "x-forwarded-host")
        .or_else(|| first_header_value(headers, HOST.as_str()))?;
    let scheme = first_header_value(headers, "x-forwarded-proto").unwrap_or("http");
    Some(format!("{scheme}://{host}"))
}

// Proxies may append comma separated values; the first one is the client facing hop.
fn first_header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    let value = headers.get(name)?.to_str().ok()?;
    let first = value.split(',').next()?.trim();
    (!first.is_empty()).then_some(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn absolute(public_url: Option<&str>) -> ServerConfig {
        ServerConfig {
            url_style: UrlStyle::Absolute,
            public_url: public_url.map(str::to_string),
            ..ServerConfig::default()
        }
    }

    #[test]
    fn relative_url_ignores_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("files.local:5000"));
        let url = upload_url(&ServerConfig::default(), &headers, "a.txt");
        assert_eq!(url, "/uploads/a.txt");
    }

    #[test]
    fn names_are_percent_encoded() {
        assert_eq!(upload_path("my song.mp3"), "/uploads/my%20song.mp3");
    }

    #[test]
    fn absolute_url_uses_host_header() {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("files.local:5001"));
        let url = upload_url(&absolute(None), &headers, "a.txt");
        assert_eq!(url, "http://files.local:5001/uploads/a.txt");
    }

    #[test]
    fn absolute_url_prefers_forwarded_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("127.0.0.1:5001"));
        headers.insert("x-forwarded-host", HeaderValue::from_static("drop.example.com, proxy.internal"));
        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        let url = upload_url(&absolute(None), &headers, "clip.m4a");
        assert_eq!(url, "https://drop.example.com/uploads/clip.m4a");
    }

    #[test]
    fn absolute_url_prefers_public_url() {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("127.0.0.1:5001"));
        let url = upload_url(&absolute(Some("https://cdn.example.com/")), &headers, "a.txt");
        assert_eq!(url, "https://cdn.example.com/uploads/a.txt");
    }

    #[test]
    fn absolute_url_without_host_is_relative() {
        let url = upload_url(&absolute(None), &HeaderMap::new(), "a.txt");
        assert_eq!(url, "/uploads/a.txt");
    }
}
