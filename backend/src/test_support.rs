//! In-process HTTP upstream for testing the outbound clients.

use actix_web::http::StatusCode;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::Value;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: String,
    pub content_type: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    pub fn json(status: u16, value: Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: value.to_string(),
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: body.to_string(),
        }
    }
}

pub type Log = Arc<Mutex<Vec<Recorded>>>;

/// Starts a server on an ephemeral port answering every request with
/// `reply`. Returns its base URL and the log of received requests.
pub async fn spawn_upstream<F>(reply: F) -> (String, Log)
where
    F: Fn(&Recorded) -> Reply + Send + Sync + Clone + 'static,
{
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let recorder = log.clone();
    let server = HttpServer::new(move || {
        let recorder = recorder.clone();
        let reply = reply.clone();
        App::new()
            .app_data(web::PayloadConfig::new(16 * 1024 * 1024))
            .default_service(web::to(move |req: HttpRequest, body: web::Bytes| {
                let recorder = recorder.clone();
                let reply = reply.clone();
                async move {
                    let recorded = Recorded {
                        method: req.method().to_string(),
                        path: req.path().to_string(),
                        query: req.query_string().to_string(),
                        content_type: req
                            .headers()
                            .get("content-type")
                            .and_then(|v| v.to_str().ok())
                            .unwrap_or_default()
                            .to_string(),
                        headers: req
                            .headers()
                            .iter()
                            .map(|(k, v)| {
                                (k.to_string(), v.to_str().unwrap_or_default().to_string())
                            })
                            .collect(),
                        body: body.to_vec(),
                    };
                    let answer = reply(&recorded);
                    recorder.lock().unwrap().push(recorded);
                    HttpResponse::build(
                        StatusCode::from_u16(answer.status).unwrap_or(StatusCode::OK),
                    )
                    .content_type(answer.content_type)
                    .body(answer.body)
                }
            }))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    (format!("http://{addr}"), log)
}
