use crate::console::Console;
use crate::gateway::{ProposalGateway, StaticToken};
use astra::{Body, Request, Response, ResponseBuilder, Server};
use http::Method;
use std::io::Read;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use url::Url;

/// One request as the mock API saw it.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
    pub body: String,
}

/// Stand-in for the remote proposals API. Answers every request with
/// `respond(path, body)` and records what it received.
pub struct MockApi {
    addr: SocketAddr,
    seen: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockApi {
    pub fn start<F>(respond: F) -> Self
    where
        F: Fn(&str, &str) -> (u16, String) + Send + Sync + 'static,
    {
        // Grab a free port, then hand it to the server.
        let addr = TcpListener::bind("127.0.0.1:0")
            .and_then(|l| l.local_addr())
            .expect("no free port");
        let seen = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&seen);
        thread::spawn(move || {
            let server = Server::bind(&addr).max_workers(2);
            let _ = server.serve(move |mut req: Request, _info| {
                let mut body = String::new();
                let _ = req.body_mut().reader().read_to_string(&mut body);
                let captured = CapturedRequest {
                    method: req.method().as_str().to_string(),
                    path: req.uri().path().to_string(),
                    query: req.uri().query().unwrap_or("").to_string(),
                    authorization: req
                        .headers()
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string),
                    body,
                };
                let (status, reply) = respond(&captured.path, &captured.body);
                log.lock().unwrap().push(captured);

                ResponseBuilder::new()
                    .status(status)
                    .header("Content-Type", "application/json")
                    .body(Body::from(reply))
                    .unwrap()
            });
        });

        for _ in 0..100 {
            if TcpStream::connect(addr).is_ok() {
                break;
            }
            thread::sleep(Duration::from_millis(20));
        }

        Self { addr, seen }
    }

    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}/api", self.addr)).unwrap()
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.seen.lock().unwrap().clone()
    }

    /// A console talking to this API without a token.
    pub fn console(&self) -> Console {
        let gateway = ProposalGateway::new(
            self.base_url(),
            Arc::new(StaticToken::new(None)),
            Duration::from_secs(5),
        )
        .unwrap();
        Console::new(Box::new(gateway))
    }
}

pub fn get(uri: &str) -> Request {
    http::Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_form(uri: &str, form: &str) -> Request {
    http::Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(form.as_bytes().to_vec()))
        .unwrap()
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn location(resp: &Response) -> String {
    resp.headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
