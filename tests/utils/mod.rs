//! In-process HTTP server used by the integration tests.
//!
//! Every request is counted and handed, with its collected body, to a shared
//! handler so tests can assert on exactly what the binary sent — or that it
//! sent nothing at all.

use assert_cmd::prelude::*;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Request, Response, StatusCode, body::Incoming, service::service_fn};
use hyper_util::{rt::TokioExecutor, server::conn::auto};
use std::io::ErrorKind;
use std::{
    net::SocketAddr,
    process::Command,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

/// Shared handler invoked for each incoming request with its body collected.
pub type Handler = Arc<Mutex<Box<dyn Fn(&Request<Bytes>) -> Response<Full<Bytes>> + Send + Sync>>>;

/// A running mock server plus the state tests assert against.
pub struct MockServer {
    pub addr: SocketAddr,
    pub handler: Handler,
    hits: Arc<AtomicUsize>,
    join: JoinHandle<()>,
    stop: oneshot::Sender<()>,
}

impl MockServer {
    /// Number of requests the server has received.
    #[allow(dead_code, reason = "helper used in some test files only")]
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Signal the server to stop and await shutdown.
    pub async fn shutdown(self) {
        let _ = self.stop.send(());
        let _ = self.join.await;
    }
}

/// Start the mock server on an ephemeral local port.
///
/// # Errors
///
/// Returns an error if the server fails to bind to a local port.
///
/// # Panics
///
/// Panics if the default response cannot be constructed.
#[expect(
    clippy::integer_division_remainder_used,
    reason = "tokio::select! uses % internally"
)]
pub async fn start_server() -> Result<MockServer, std::io::Error> {
    let handler: Handler = Arc::new(Mutex::new(Box::new(|_req| {
        Response::builder()
            .status(404)
            .body(Full::from(Bytes::from_static(b"No handler")))
            .expect("failed to create default response")
    })));
    let handler_clone = handler.clone();
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_clone = hits.clone();

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (tx, mut rx) = oneshot::channel();

    let join = tokio::spawn(async move {
        let builder = auto::Builder::new(TokioExecutor::new());
        loop {
            tokio::select! {
                res = listener.accept() => match res {
                    Ok((stream, _)) => {
                        let io = hyper_util::rt::TokioIo::new(stream);
                        let h = handler_clone.clone();
                        let hits = hits_clone.clone();
                        let service = service_fn(move |req: Request<Incoming>| {
                            let h = h.clone();
                            let hits = hits.clone();
                            async move {
                                hits.fetch_add(1, Ordering::SeqCst);
                                let (parts, body) = req.into_parts();
                                let bytes = body.collect().await.unwrap_or_default().to_bytes();
                                let req = Request::from_parts(parts, bytes);
                                let f = h.lock().expect("lock handler in service");
                                let resp = (f)(&req);
                                Ok::<_, std::convert::Infallible>(resp)
                            }
                        });
                        let builder = builder.clone();
                        tokio::spawn(async move {
                            let _ = builder.serve_connection(io, service).await;
                        });
                    }
                    Err(e) => {
                        eprintln!("accept error: {e}");
                        match e.kind() {
                            ErrorKind::ConnectionAborted
                            | ErrorKind::ConnectionReset
                            | ErrorKind::Interrupted
                            | ErrorKind::WouldBlock => {}
                            _ => break,
                        }
                    }
                },
                _ = &mut rx => break,
            }
        }
    });

    Ok(MockServer {
        addr,
        handler,
        hits,
        join,
        stop: tx,
    })
}

/// Configure the handler to answer every request with `status` and `body`.
#[allow(dead_code, reason = "helper used in some test files only")]
pub fn set_json_responder(handler: &Handler, status: StatusCode, body: String) {
    *handler.lock().expect("lock handler") = Box::new(move |_req| {
        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Full::from(body.clone()))
            .expect("build response")
    });
}

/// Create a `bqsnap` command pointed at the mock server.
///
/// The token defaults to `dummy`; tests override or remove it as needed.
#[allow(
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    dead_code,
    reason = "helper for integration tests"
)]
pub fn bqsnap_cmd(addr: SocketAddr) -> Command {
    let mut cmd = Command::cargo_bin("bqsnap").expect("binary");
    cmd.env("BITQUERY_API_URL", format!("http://{addr}"))
        .env("BITQUERY_API_TOKEN", "dummy")
        .env("RUST_LOG", "warn");
    cmd
}
