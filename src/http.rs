use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;

use crate::error::RemoteError;
use crate::model::{DirectoryEntry, ListingRecord, PickerConfig};

const ACCEPT_JSON: &str = "application/vnd.github+json";

pub(crate) fn build_client(config: &PickerConfig) -> Result<Client, RemoteError> {
    let mut builder = Client::builder().user_agent(config.user_agent.clone());
    if let Some(secs) = config.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder
        .build()
        .map_err(|err| RemoteError::Network(format!("create HTTP client: {err}")))
}

/// Issues one authorized GET and returns the body verbatim.
pub(crate) fn get(client: &Client, url: &str, token: &str) -> Result<Vec<u8>, RemoteError> {
    let response = client
        .get(url)
        .bearer_auth(token)
        .header(ACCEPT, ACCEPT_JSON)
        .send()
        .map_err(|err| RemoteError::Network(err.to_string()))?;
    let status = response.status();
    if !status.is_success() {
        return Err(status_error(status));
    }
    let body = response
        .bytes()
        .map_err(|err| RemoteError::Network(format!("read body: {err}")))?;
    Ok(body.to_vec())
}

fn status_error(status: StatusCode) -> RemoteError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => RemoteError::Auth {
            status: status.as_u16(),
        },
        _ => RemoteError::Http {
            status: status.as_u16(),
        },
    }
}

pub(crate) fn parse_listing(body: &[u8]) -> Result<Vec<DirectoryEntry>, RemoteError> {
    let records: Vec<ListingRecord> =
        serde_json::from_slice(body).map_err(|err| RemoteError::Decode(err.to_string()))?;
    Ok(records.into_iter().map(DirectoryEntry::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntryKind;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;

    /// Serves a single canned response and reports the raw request head.
    fn serve_once(status_line: &str, body: &str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let count = stream.read(&mut buf).unwrap();
                if count == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..count]);
            }
            let _ = tx.send(String::from_utf8_lossy(&head).into_owned());
            stream.write_all(response.as_bytes()).unwrap();
        });
        (format!("http://{addr}/repos/o/r/contents"), rx)
    }

    fn client() -> Client {
        build_client(&PickerConfig::default()).unwrap()
    }

    #[test]
    fn parse_listing_maps_types() {
        let body = br#"[{"name":"a.txt","type":"file","url":"U1"},{"name":"sub","type":"dir","url":"U2"}]"#;
        let entries = parse_listing(body).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, EntryKind::File);
        assert_eq!(entries[0].content_url.as_deref(), Some("U1"));
        assert_eq!(entries[1].kind, EntryKind::Directory);
        assert_eq!(entries[1].listing_url.as_deref(), Some("U2"));
    }

    #[test]
    fn parse_listing_keeps_unknown_types_as_other() {
        let body = br#"[{"name":"m","type":"submodule","url":"U"},{"name":"s","type":"symlink"}]"#;
        let entries = parse_listing(body).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.kind == EntryKind::Other));
    }

    #[test]
    fn parse_listing_rejects_object_body() {
        let body = br#"{"name":"a.txt","type":"file","content":"aGk="}"#;
        assert!(matches!(parse_listing(body), Err(RemoteError::Decode(_))));
    }

    #[test]
    fn get_sends_bearer_token() {
        let (url, head) = serve_once("200 OK", "[]");
        let body = get(&client(), &url, "secret-token").unwrap();
        assert_eq!(body, b"[]");
        let head = head.recv().unwrap().to_lowercase();
        assert!(head.contains("authorization: bearer secret-token"));
        assert!(head.contains("user-agent: repo-file-picker"));
    }

    #[test]
    fn get_maps_not_found_to_http_error() {
        let (url, _head) = serve_once("404 Not Found", r#"{"message":"Not Found"}"#);
        assert_eq!(
            get(&client(), &url, "t").unwrap_err(),
            RemoteError::Http { status: 404 }
        );
    }

    #[test]
    fn get_maps_unauthorized_to_auth_error() {
        let (url, _head) = serve_once("401 Unauthorized", r#"{"message":"Bad credentials"}"#);
        assert_eq!(
            get(&client(), &url, "t").unwrap_err(),
            RemoteError::Auth { status: 401 }
        );
    }

    #[test]
    fn get_reports_refused_connection_as_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let err = get(&client(), &format!("http://{addr}/"), "t").unwrap_err();
        assert!(matches!(err, RemoteError::Network(_)));
    }
}
