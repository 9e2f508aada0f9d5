//! Local API server.
//!
//! A small HTTP/1.1 listener exposing the VM inventory read-only:
//!
//! - `GET /health`
//! - `GET /vms`
//! - `GET /vms/{name}`
//!
//! Each connection carries one request and is closed after the response.

use serde_json::{json, Value};
use std::future::Future;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info, warn};

use crate::error::{Result, RoostError};
use crate::settings::SettingsManager;
use crate::vm::VmStore;

/// Longest request head accepted, in bytes.
const MAX_HEAD_BYTES: u64 = 16 * 1024;

/// Where the server listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` as passed to the listener.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Bind the listener described by `config`.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener> {
    let addr = config.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| RoostError::ServerBind {
            addr: addr.clone(),
            source,
        })?;
    info!(listen = %addr, "API server listening");
    Ok(listener)
}

/// Serve on an already bound listener until Ctrl-C.
pub async fn serve(listener: TcpListener, settings: Arc<SettingsManager>) -> Result<()> {
    run(listener, settings, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for ctrl-c");
        }
    })
    .await
}

/// Accept connections on `listener` until `shutdown` resolves.
pub async fn run<F>(listener: TcpListener, settings: Arc<SettingsManager>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    let settings = Arc::clone(&settings);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, &settings).await {
                            warn!(peer = %peer, error = %e, "Connection handler error");
                        }
                    });
                }
                Err(e) => error!(error = %e, "Accept error"),
            },
            _ = &mut shutdown => {
                info!("API server stopping");
                break;
            }
        }
    }

    Ok(())
}

async fn handle_connection(mut stream: TcpStream, settings: &SettingsManager) -> Result<()> {
    let (reader, mut writer) = stream.split();
    let mut reader = BufReader::new(reader.take(MAX_HEAD_BYTES));

    let mut request_line = String::new();
    reader.read_line(&mut request_line).await?;

    // Drain headers; nothing in them changes the response.
    let mut header = String::new();
    loop {
        header.clear();
        let read = reader.read_line(&mut header).await?;
        if read == 0 || header.trim_end().is_empty() {
            break;
        }
    }

    let mut parts = request_line.split_whitespace();
    let response = match (parts.next(), parts.next()) {
        (Some(method), Some(target)) => {
            debug!(method, target, "API request");
            route(method, target, settings).await
        }
        _ => Response::error(400, "malformed request line"),
    };

    writer.write_all(&response.to_bytes()).await?;
    writer.shutdown().await?;
    Ok(())
}

/// An API response: a status code and a JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Value,
}

impl Response {
    fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "error": message.into() }),
        }
    }

    fn from_error(err: RoostError) -> Self {
        let status = match err {
            RoostError::VmNotFound { .. } => 404,
            RoostError::InvalidVmName { .. } => 400,
            _ => 500,
        };
        Self::error(status, err.to_string())
    }

    /// Serialize as an HTTP/1.1 response.
    pub fn to_bytes(&self) -> Vec<u8> {
        let body = self.body.to_string();
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status,
            reason(self.status),
            body.len(),
            body
        )
        .into_bytes()
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        _ => "Internal Server Error",
    }
}

/// Resolve one request to a response.
pub async fn route(method: &str, target: &str, settings: &SettingsManager) -> Response {
    let path = target.split('?').next().unwrap_or_default();
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    let result = match (method, segments.as_slice()) {
        ("GET", ["health"]) => Ok(json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
        })),
        ("GET", ["vms"]) => list_vms(settings).await,
        ("GET", ["vms", name]) => get_vm(settings, name).await,
        (_, ["health"] | ["vms"] | ["vms", _]) => {
            return Response::error(405, format!("{} is not allowed on {}", method, path));
        }
        _ => return Response::error(404, format!("no route for {}", path)),
    };

    match result {
        Ok(body) => Response::ok(body),
        Err(e) => Response::from_error(e),
    }
}

async fn list_vms(settings: &SettingsManager) -> Result<Value> {
    let vms = VmStore::new(settings.vm_dir().await?).list().await?;
    Ok(serde_json::to_value(vms)?)
}

async fn get_vm(settings: &SettingsManager, name: &str) -> Result<Value> {
    let vm = VmStore::new(settings.vm_dir().await?).get(name).await?;
    Ok(serde_json::to_value(vm)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingsPaths;
    use crate::vm::CreateOptions;
    use tempfile::TempDir;
    use tokio::sync::oneshot;

    fn settings(temp: &TempDir) -> Arc<SettingsManager> {
        Arc::new(SettingsManager::new(SettingsPaths::new(
            temp.path().join("home"),
            temp.path().join("config"),
            temp.path().join("cache"),
        )))
    }

    async fn with_vm(temp: &TempDir) -> Arc<SettingsManager> {
        let settings = settings(temp);
        VmStore::new(settings.vm_dir().await.unwrap())
            .create("dev", CreateOptions::default())
            .await
            .unwrap();
        settings
    }

    #[test]
    fn config_addr() {
        let config = ServerConfig {
            host: "127.0.0.1".into(),
            port: 7777,
        };
        assert_eq!(config.addr(), "127.0.0.1:7777");
    }

    #[test]
    fn response_bytes() {
        let bytes = Response::error(404, "nope").to_bytes();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(text.contains("Connection: close\r\n"));
        assert!(text.ends_with("\r\n\r\n{\"error\":\"nope\"}"));
    }

    #[tokio::test]
    async fn health_route() {
        let temp = TempDir::new().unwrap();
        let response = route("GET", "/health", &settings(&temp)).await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body["status"], "ok");
    }

    #[tokio::test]
    async fn vms_routes() {
        let temp = TempDir::new().unwrap();
        let settings = with_vm(&temp).await;

        let list = route("GET", "/vms?verbose=1", &settings).await;
        assert_eq!(list.status, 200);
        assert_eq!(list.body[0]["name"], "dev");

        let one = route("GET", "/vms/dev", &settings).await;
        assert_eq!(one.status, 200);
        assert_eq!(one.body["cpu_count"], 4);

        let missing = route("GET", "/vms/ghost", &settings).await;
        assert_eq!(missing.status, 404);
    }

    #[tokio::test]
    async fn unknown_route_and_method() {
        let temp = TempDir::new().unwrap();
        let settings = settings(&temp);

        assert_eq!(route("GET", "/nope", &settings).await.status, 404);
        assert_eq!(route("GET", "/vms/a/b", &settings).await.status, 404);
        assert_eq!(route("DELETE", "/vms/dev", &settings).await.status, 405);
    }

    #[tokio::test]
    async fn serves_over_tcp_until_shutdown() {
        let temp = TempDir::new().unwrap();
        let settings = with_vm(&temp).await;
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();

        let server = tokio::spawn(run(listener, settings, async {
            let _ = rx.await;
        }));

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /vms HTTP/1.1\r\nHost: localhost\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();

        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(response.contains("\"name\":\"dev\""));

        tx.send(()).unwrap();
        server.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn bind_failure_is_server_bind_error() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config = ServerConfig {
            host: "127.0.0.1".into(),
            port: taken.local_addr().unwrap().port(),
        };

        let err = bind(&config).await.unwrap_err();
        assert!(matches!(err, RoostError::ServerBind { .. }));
    }
}
