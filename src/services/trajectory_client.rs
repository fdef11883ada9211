// src/services/trajectory_client.rs
// TrajectoryClient asks the backend for the trajectories of a piece of text.
// Each request gets its own worker thread so the window never waits on the
// network; finished requests come back over a channel that `poll` drains.
//
// Requests are neither cancelled nor ordered: whichever reply arrives last
// wins, even if it answers an older request.

use log::{debug, info, warn};
use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        mpsc::{channel, Receiver, Sender},
        Arc,
    },
    thread,
    time::Duration,
};

use crate::config::BackendConfig;
use crate::models::{TagPolicy, TrajectoryError, TrajectoryResponse};

#[derive(Debug)]
pub struct FetchResult {
    pub request_id: u64,
    pub text: String,
    pub outcome: Result<TrajectoryResponse, TrajectoryError>,
}

pub struct TrajectoryClient {
    url: String,
    timeout: Duration,
    policy: TagPolicy,
    next_request_id: u64,
    in_flight: Arc<AtomicUsize>,
    result_sender: Sender<FetchResult>,
    result_receiver: Receiver<FetchResult>,
}

impl TrajectoryClient {
    pub fn new(config: &BackendConfig, policy: TagPolicy) -> Self {
        let (result_sender, result_receiver) = channel();
        Self {
            url: config.url.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            policy,
            next_request_id: 0,
            in_flight: Arc::new(AtomicUsize::new(0)),
            result_sender,
            result_receiver,
        }
    }

    /// Start fetching `text` in the background, returns the request id.
    pub fn request(&mut self, text: &str) -> u64 {
        let request_id = self.next_request_id;
        self.next_request_id += 1;

        let url = self.url.clone();
        let timeout = self.timeout;
        let policy = self.policy;
        let text = text.to_string();
        let sender = self.result_sender.clone();
        let in_flight = Arc::clone(&self.in_flight);

        in_flight.fetch_add(1, Ordering::SeqCst);
        debug!("Request {} -> {}", request_id, url);

        thread::spawn(move || {
            let outcome = fetch_trajectories(&url, &text, timeout, policy);
            in_flight.fetch_sub(1, Ordering::SeqCst);
            // the receiver only goes away when the app is shutting down
            let _ = sender.send(FetchResult {
                request_id,
                text,
                outcome,
            });
        });

        request_id
    }

    /// Finished requests in arrival order. Never blocks.
    pub fn poll(&self) -> Vec<FetchResult> {
        self.result_receiver.try_iter().collect()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

/// POST `{"text": text}` to `url` and decode the reply.
pub fn fetch_trajectories(
    url: &str,
    text: &str,
    timeout: Duration,
    policy: TagPolicy,
) -> Result<TrajectoryResponse, TrajectoryError> {
    let body = serde_json::json!({ "text": text }).to_string();
    let agent = ureq::AgentBuilder::new().timeout(timeout).build();

    let (status, reply) = match agent
        .post(url)
        .set("Content-Type", "application/json")
        .send_string(&body)
    {
        Ok(response) => (response.status(), response.into_string()),
        Err(ureq::Error::Status(status, response)) => (status, response.into_string()),
        Err(ureq::Error::Transport(transport)) => {
            warn!("Request to {} failed: {}", url, transport);
            return Err(TrajectoryError::Transport(transport.to_string()));
        }
    };

    let reply = reply.map_err(|e| TrajectoryError::Transport(e.to_string()))?;
    info!("Backend answered {} ({} bytes)", status, reply.len());
    decode_reply(status, &reply, policy)
}

/// Turn a status and body into trajectories. Failing statuses surface the
/// backend's `{"error": ...}` message when there is one.
pub fn decode_reply(
    status: u16,
    body: &str,
    policy: TagPolicy,
) -> Result<TrajectoryResponse, TrajectoryError> {
    if (200..300).contains(&status) {
        return TrajectoryResponse::parse(body, policy);
    }
    match TrajectoryResponse::parse(body, policy) {
        Err(TrajectoryError::Backend(message)) => Err(TrajectoryError::Backend(message)),
        _ => Err(TrajectoryError::Backend(format!(
            "backend returned HTTP {}",
            status
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::time::Instant;

    #[test]
    fn test_decode_success() {
        let body = r#"{"山": [["M", [0, 0]], ["Z"]]}"#;
        let response = decode_reply(200, body, TagPolicy::Lenient).unwrap();
        assert_eq!(response.canvas_count(), 1);
    }

    #[test]
    fn test_decode_error_status_with_message() {
        let body = r#"{"error": "Font file not found at /System/Library/Fonts"}"#;
        match decode_reply(500, body, TagPolicy::Lenient) {
            Err(TrajectoryError::Backend(message)) => assert!(message.starts_with("Font file")),
            other => panic!("expected backend error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_error_status_without_message() {
        match decode_reply(502, "<html>Bad Gateway</html>", TagPolicy::Lenient) {
            Err(TrajectoryError::Backend(message)) => assert_eq!(message, "backend returned HTTP 502"),
            other => panic!("expected backend error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_error_body_with_ok_status() {
        let result = decode_reply(200, r#"{"error": "boom"}"#, TagPolicy::Lenient);
        assert!(matches!(result, Err(TrajectoryError::Backend(m)) if m == "boom"));
    }

    // Serves `reply` once and hands back the request body it received.
    fn serve_once(reply: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!(
            "http://{}/get_trajectories",
            listener.local_addr().unwrap()
        );

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);

            let mut content_length = 0;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                let lower = line.to_ascii_lowercase();
                if let Some(value) = lower.strip_prefix("content-length:") {
                    content_length = value.trim().parse().unwrap();
                }
            }
            let mut body = vec![0; content_length];
            reader.read_exact(&mut body).unwrap();

            let mut stream = reader.into_inner();
            write!(
                stream,
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                reply.len(),
                reply
            )
            .unwrap();
            String::from_utf8(body).unwrap()
        });

        (url, handle)
    }

    #[test]
    fn test_client_round_trip() {
        let (url, server) = serve_once(r#"{"居": [["M", [1, 2]], ["L", [3, 4]]]}"#);
        let config = BackendConfig {
            url,
            timeout_secs: 5,
            default_text: String::new(),
        };
        let mut client = TrajectoryClient::new(&config, TagPolicy::Strict);

        let id = client.request("居");

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut results = Vec::new();
        while results.is_empty() && Instant::now() < deadline {
            results = client.poll();
            thread::sleep(Duration::from_millis(10));
        }

        let sent: serde_json::Value = serde_json::from_str(&server.join().unwrap()).unwrap();
        assert_eq!(sent, serde_json::json!({ "text": "居" }));

        assert_eq!(results.len(), 1);
        let result = results.pop().unwrap();
        assert_eq!(result.request_id, id);
        assert_eq!(result.text, "居");
        let response = result.outcome.unwrap();
        assert_eq!(response.sets()[0].map.get("居").unwrap().len(), 2);
        assert_eq!(client.in_flight(), 0);
    }

    #[test]
    fn test_connection_refused() {
        // bind then drop to get a port nobody listens on
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let url = format!("http://127.0.0.1:{}/get_trajectories", port);

        let result = fetch_trajectories(&url, "山", Duration::from_secs(2), TagPolicy::Lenient);
        assert!(matches!(result, Err(TrajectoryError::Transport(_))));
    }
}
