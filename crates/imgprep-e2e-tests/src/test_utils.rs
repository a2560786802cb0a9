use axum::Router;
use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use eyre::Result;
use imgprep_lib::download::{DownloadItem, DownloadOptions, FileNaming, Throttle, plan_downloads};
use imgprep_lib::search::SearchTemplate;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::task::JoinHandle;

struct ServerState {
    responses: HashMap<String, (StatusCode, Vec<u8>)>,
    requests: Arc<Mutex<Vec<String>>>,
}

/// Local stand-in for the image-search endpoint.
///
/// Requests are keyed by their raw query string, which with an empty category and region
/// is just the formatted restaurant name, e.g. `zen-garden`. Unknown keys get a 404.
pub struct ImageServer {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
    handle: JoinHandle<()>,
}

impl ImageServer {
    pub async fn start<I, K>(responses: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, StatusCode, Vec<u8>)>,
        K: Into<String>,
    {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = Arc::new(ServerState {
            responses: responses
                .into_iter()
                .map(|(key, status, body)| (key.into(), (status, body)))
                .collect(),
            requests: requests.clone(),
        });

        let app = Router::new()
            .route("/featured/", get(serve_image))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                tracing::error!("Test image server stopped: {}", err);
            }
        });

        Ok(Self {
            addr,
            requests,
            handle,
        })
    }

    pub fn template(&self) -> String {
        format!("http://{}/featured/?{{keywords}}", self.addr)
    }

    pub fn search(&self) -> SearchTemplate {
        SearchTemplate::new(self.template(), "", "").expect("test template must be valid")
    }

    /// Raw query strings in the order the server received them.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("request log poisoned").clone()
    }

    pub fn request_log(&self) -> Arc<Mutex<Vec<String>>> {
        self.requests.clone()
    }
}

impl Drop for ImageServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve_image(
    State(state): State<Arc<ServerState>>,
    RawQuery(query): RawQuery,
) -> Response {
    let key = query.unwrap_or_default();
    state
        .requests
        .lock()
        .expect("request log poisoned")
        .push(key.clone());

    match state.responses.get(&key) {
        Some((status, body)) => (*status, body.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Serves one hand-written HTTP/1.1 response per connection, then closes the socket.
///
/// With `declared_length` larger than the body the client sees the connection end mid-body.
/// Without it the body is delimited by the connection closing, so no Content-Length is sent.
pub struct RawServer {
    pub addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl RawServer {
    pub async fn start(declared_length: Option<usize>, body: Vec<u8>) -> Result<Self> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let mut head = String::from("HTTP/1.1 200 OK\r\nContent-Type: image/jpeg\r\n");
        match declared_length {
            Some(length) => head.push_str(&format!("Content-Length: {length}\r\n")),
            None => head.push_str("Connection: close\r\n"),
        }
        head.push_str("\r\n");

        let handle = tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut request = vec![0u8; 4096];
                if socket.read(&mut request).await.is_err() {
                    continue;
                }
                let _ = socket.write_all(head.as_bytes()).await;
                let _ = socket.write_all(&body).await;
                let _ = socket.shutdown().await;
            }
        });

        Ok(Self { addr, handle })
    }

    pub fn url(&self, query: &str) -> url::Url {
        format!("http://{}/featured/?{query}", self.addr)
            .parse()
            .expect("raw server url must be valid")
    }
}

impl Drop for RawServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Log output captured for the current thread while the guard from `install` is alive.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter("imgprep_lib=info")
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().expect("log buffer poisoned").clone();
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn count_containing(&self, needle: &str) -> usize {
        self.lines().iter().filter(|l| l.contains(needle)).count()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0
            .lock()
            .expect("log buffer poisoned")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Throttle that records how many requests the server had seen each time it was asked to pause.
pub struct RecordingThrottle {
    request_log: Arc<Mutex<Vec<String>>>,
    snapshots: Mutex<Vec<usize>>,
}

impl RecordingThrottle {
    pub fn new(server: &ImageServer) -> Self {
        Self {
            request_log: server.request_log(),
            snapshots: Mutex::new(Vec::new()),
        }
    }

    pub fn snapshots(&self) -> Vec<usize> {
        self.snapshots.lock().expect("snapshots poisoned").clone()
    }

    pub fn pauses(&self) -> usize {
        self.snapshots().len()
    }
}

impl Throttle for RecordingThrottle {
    async fn pause(&self) {
        let seen = self.request_log.lock().expect("request log poisoned").len();
        self.snapshots.lock().expect("snapshots poisoned").push(seen);
    }
}

pub fn plan_for(server: &ImageServer, queries: &[&str], output_dir: &Path) -> Vec<DownloadItem> {
    let queries: Vec<String> = queries.iter().map(|q| q.to_string()).collect();
    plan_downloads(
        &queries,
        &server.search(),
        &FileNaming::default(),
        output_dir,
    )
    .expect("planning test downloads")
}

pub fn quiet_options() -> DownloadOptions {
    DownloadOptions {
        chunk_size: 1024,
        show_progress: false,
    }
}

/// An address nothing is listening on.
pub fn unreachable_addr() -> Result<SocketAddr> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(addr)
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter("imgprep_lib=debug,imgprep_e2e_tests=debug")
        .with_test_writer()
        .try_init()
        .ok();
}
