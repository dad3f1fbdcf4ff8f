//! Remote documents fetched on request.
//!
//! Each fetch is a single blocking GET with no retry and no cache. Failures
//! are logged under the `error` prefix and returned to the caller.

pub mod changelog;
pub mod news;

pub use changelog::fetch_changelog_html;
pub use news::{FeedItem, fetch_news};

use crate::log;
use thiserror::Error;

/// Errors from fetching or parsing a remote document.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("GET {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("GET {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to parse document from {url}: {message}")]
    Parse { url: String, message: String },
}

/// GET `url` and return the body of a 2xx response.
fn fetch_text(url: &str) -> Result<String, FetchError> {
    let transport = |source: reqwest::Error| FetchError::Transport {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("scribe/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(transport)?;
    let response = client.get(url).send().map_err(transport)?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    response.text().map_err(transport)
}

/// Log a fetch failure with its source chain.
fn log_error(err: &FetchError) {
    match std::error::Error::source(err) {
        Some(source) => log!("error"; "{err}: {source}"),
        None => log!("error"; "{err}"),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tiny_http::{Response, Server, StatusCode};

    /// Serve a single request with a fixed response, return the URL.
    pub(crate) fn serve_once(status: u16, body: &'static str) -> String {
        let server = Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        std::thread::spawn(move || {
            if let Ok(request) = server.recv() {
                let response = Response::from_string(body).with_status_code(StatusCode(status));
                let _ = request.respond(response);
            }
        });
        format!("http://{addr}/document")
    }

    /// A URL nothing listens on.
    pub(crate) fn closed_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}/document")
    }

    #[test]
    fn test_fetch_text_ok() {
        let url = serve_once(200, "hello");
        assert_eq!(fetch_text(&url).unwrap(), "hello");
    }

    #[test]
    fn test_fetch_text_status() {
        let url = serve_once(503, "down");
        let err = fetch_text(&url).unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 503, .. }));
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_fetch_text_transport() {
        let err = fetch_text(&closed_url()).unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
    }
}
