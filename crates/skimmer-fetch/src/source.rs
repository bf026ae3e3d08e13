//! Page sources: the fetch trait and the plain-HTTP implementation.

use std::io::{Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use crate::error::FetchError;

/// Supplies raw page content for a URL.
///
/// `Sync` is a supertrait so a single source can be shared by the
/// worker pool in [`fetch_all`](crate::fetch_all).
pub trait PageSource: Sync {
    /// Fetches the body of the document at `url`.
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// HTTP/1.0 GET over TCP.
///
/// Only `http://` URLs are supported; redirects are not followed and
/// any non-200 status is an error. This is all the scraping core needs,
/// anything fancier belongs in a custom [`PageSource`].
#[derive(Debug, Clone)]
pub struct HttpSource {
    timeout: Duration,
}

impl HttpSource {
    /// Creates a source with the given read/write timeout.
    pub fn new(timeout: Duration) -> Self {
        HttpSource { timeout }
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        HttpSource::new(Duration::from_secs(15))
    }
}

impl PageSource for HttpSource {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        http_get(url, self.timeout)
    }
}

/// Performs a single HTTP/1.0 GET and returns the response body.
pub fn http_get(url: &str, timeout: Duration) -> Result<String, FetchError> {
    let (host, port, path) = split_url(url)?;

    let io_err = |source| FetchError::Io {
        url: url.to_string(),
        source,
    };

    let mut stream = TcpStream::connect((host, port)).map_err(io_err)?;
    stream.set_read_timeout(Some(timeout)).map_err(io_err)?;
    stream.set_write_timeout(Some(timeout)).map_err(io_err)?;

    let request = format!(
        "GET {path} HTTP/1.0\r\nHost: {host}\r\nUser-Agent: skimmer/0.3\r\nConnection: close\r\n\r\n"
    );
    stream.write_all(request.as_bytes()).map_err(io_err)?;
    stream.flush().map_err(io_err)?;

    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).map_err(io_err)?;
    let response = String::from_utf8_lossy(&buf);

    let status = response.split("\r\n").next().unwrap_or("");
    if status.split(' ').nth(1) != Some("200") {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.to_string(),
        });
    }

    let body_start = response
        .find("\r\n\r\n")
        .ok_or_else(|| FetchError::Malformed(url.to_string()))?
        + 4;

    Ok(response[body_start..].to_string())
}

/// Splits `http://host[:port]/path` into its parts.
fn split_url(url: &str) -> Result<(&str, u16, &str), FetchError> {
    let rest = match url.strip_prefix("http://") {
        Some(rest) => rest,
        None if url.starts_with("https://") => {
            return Err(FetchError::BadUrl(format!(
                "{url} (https is not supported; supply a custom PageSource)"
            )));
        }
        None => return Err(FetchError::BadUrl(url.to_string())),
    };

    let (host_port, path) = match rest.find('/') {
        Some(i) => (&rest[..i], &rest[i..]),
        None => (rest, "/"),
    };
    if host_port.is_empty() {
        return Err(FetchError::BadUrl(url.to_string()));
    }

    let (host, port) = match host_port.split_once(':') {
        Some((host, port)) => {
            let port = port
                .parse::<u16>()
                .map_err(|_| FetchError::BadUrl(url.to_string()))?;
            (host, port)
        }
        None => (host_port, 80),
    };

    Ok((host, port, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_plain_url() {
        let (host, port, path) = split_url("http://example.com/teams/3").unwrap();
        assert_eq!(host, "example.com");
        assert_eq!(port, 80);
        assert_eq!(path, "/teams/3");
    }

    #[test]
    fn split_url_without_path() {
        let (host, port, path) = split_url("http://example.com").unwrap();
        assert_eq!(host, "example.com");
        assert_eq!(port, 80);
        assert_eq!(path, "/");
    }

    #[test]
    fn split_url_with_port() {
        let (host, port, path) = split_url("http://localhost:8080/x").unwrap();
        assert_eq!(host, "localhost");
        assert_eq!(port, 8080);
        assert_eq!(path, "/x");
    }

    #[test]
    fn https_is_rejected_with_a_hint() {
        let err = split_url("https://example.com").unwrap_err();
        assert!(err.to_string().contains("https is not supported"));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(split_url("example.com").is_err());
        assert!(split_url("http://").is_err());
        assert!(split_url("http://host:notaport/").is_err());
    }
}
