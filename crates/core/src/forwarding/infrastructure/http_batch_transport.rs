use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;

use crate::detection::domain::detection_batch::DetectionBatch;
use crate::forwarding::domain::batch_transport::{BatchTransport, ForwardError};

/// Posts batches as JSON to a fixed `.../process_faces` endpoint.
///
/// The endpoint is resolved once by the caller (see
/// `ViewerConfig::endpoint`) and reused for every request. No timeout is
/// set beyond the client's default.
pub struct HttpBatchTransport {
    client: Client,
    endpoint: Url,
}

impl HttpBatchTransport {
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl BatchTransport for HttpBatchTransport {
    fn send(&self, batch: &DetectionBatch) -> Result<String, ForwardError> {
        let body = serde_json::to_vec(batch)?;
        let url = self.endpoint.to_string();

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(|e| ForwardError::Request {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        let text = response.text().map_err(|e| ForwardError::Request {
            url: url.clone(),
            source: e,
        })?;

        if !status.is_success() {
            return Err(ForwardError::Status {
                url,
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::face_geometry::{Bounds, FaceGeometry};
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    struct CapturedRequest {
        request_line: String,
        content_type: Option<String>,
        body: String,
    }

    /// Serves exactly one request with the given status line and body.
    fn one_shot_server(status: &'static str, reply: &'static str) -> (Url, mpsc::Receiver<CapturedRequest>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();

            let mut content_length = 0usize;
            let mut content_type = None;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    let name = name.trim().to_ascii_lowercase();
                    if name == "content-length" {
                        content_length = value.trim().parse().unwrap();
                    } else if name == "content-type" {
                        content_type = Some(value.trim().to_string());
                    }
                }
            }

            let mut body = vec![0u8; content_length];
            reader.read_exact(&mut body).unwrap();

            let mut stream = stream;
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{reply}",
                reply.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();

            let _ = tx.send(CapturedRequest {
                request_line: request_line.trim_end().to_string(),
                content_type,
                body: String::from_utf8(body).unwrap(),
            });
        });

        let url = Url::parse(&format!("http://{addr}/process_faces")).unwrap();
        (url, rx)
    }

    fn single_face_batch() -> DetectionBatch {
        DetectionBatch::new(vec![FaceGeometry::new(Bounds::new(10.0, 20.0, 50.0, 60.0))])
    }

    #[test]
    fn test_posts_json_batch_to_process_faces() {
        let (url, captured) = one_shot_server("200 OK", "{\"ok\":true}");
        let transport = HttpBatchTransport::new(url);

        let reply = transport.send(&single_face_batch()).unwrap();
        assert_eq!(reply, "{\"ok\":true}");

        let request = captured.recv().unwrap();
        assert_eq!(request.request_line, "POST /process_faces HTTP/1.1");
        assert_eq!(request.content_type.as_deref(), Some("application/json"));

        let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
        assert_eq!(body["faces"].as_array().unwrap().len(), 1);
        assert_eq!(body["faces"][0]["bounds"]["origin"]["x"], 10.0);
        assert_eq!(body["faces"][0]["bounds"]["size"]["height"], 60.0);
    }

    #[test]
    fn test_non_2xx_is_status_error() {
        let (url, _captured) = one_shot_server("500 Internal Server Error", "boom");
        let transport = HttpBatchTransport::new(url);

        match transport.send(&single_face_batch()) {
            Err(ForwardError::Status { status, body, .. }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn test_connection_refused_is_request_error() {
        // Bind then drop to get a port with nothing listening.
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let url = Url::parse(&format!("http://127.0.0.1:{port}/process_faces")).unwrap();
        let transport = HttpBatchTransport::new(url);

        let result = transport.send(&single_face_batch());
        assert!(matches!(result, Err(ForwardError::Request { .. })));
    }

    #[test]
    fn test_endpoint_is_kept_verbatim() {
        let url = Url::parse("http://10.0.0.5:8080/api/process_faces").unwrap();
        let transport = HttpBatchTransport::new(url.clone());
        assert_eq!(transport.endpoint(), &url);
    }
}
