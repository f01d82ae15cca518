//! Shared mocks for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use url::Url;

use alloy::primitives::Address;
use miniapp_protect::config::AppConfig;
use miniapp_protect::flow::{ConnectAndProtect, FlowSettings};
use miniapp_protect::host::{Environment, HostBridge};
use miniapp_protect::protection::{ProtectedData, ProtectionReceipt, ProtectionService};
use miniapp_protect::wallet::{
    Eip1193Provider, LinkOpener, NegotiatorFactory, NegotiatorOptions, RpcRequest, SessionNegotiator,
    UriSink, WalletError, WalletResult,
};

pub const ACCOUNT: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";
pub const OTHER_ACCOUNT: &str = "0x70997970c51812dc3a010c7d01b50e0d17dc79c8";
pub const SESSION_URI: &str = "wc:7f6e504bfad60b485450578e05678ed3@2?relay-protocol=irn&symKey=587d5484ce2a2a6e";
pub const HASH_A: &str = "0x5b4a8a7c1e43c0a3e7a8b29b5ae0a0d1f4f5b1c2d3e4f5a6b7c8d9e0f1a2b3c4";
pub const HASH_B: &str = "0x0a1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3d4e5f60718293a4b5c6d7e8f9";

pub fn account() -> Address {
    ACCOUNT.parse().unwrap()
}

pub fn hash(s: &str) -> String {
    s.to_string()
}

/// Wallet that answers account requests from a script.
///
/// Each account request takes the next scripted list; the last one repeats.
pub struct ScriptedWallet {
    accounts: Mutex<VecDeque<Vec<String>>>,
    rejection: Option<(i64, String)>,
    pub requests: Mutex<Vec<String>>,
}

impl ScriptedWallet {
    pub fn with_accounts(accounts: &[&str]) -> Arc<Self> {
        Self::scripted(vec![accounts.iter().map(|a| a.to_string()).collect()], None)
    }

    /// One single-account answer per request, in order.
    pub fn with_account_sequence(accounts: &[&str]) -> Arc<Self> {
        Self::scripted(accounts.iter().map(|a| vec![a.to_string()]).collect(), None)
    }

    pub fn rejecting(code: i64, message: &str) -> Arc<Self> {
        Self::scripted(Vec::new(), Some((code, message.to_string())))
    }

    fn scripted(accounts: Vec<Vec<String>>, rejection: Option<(i64, String)>) -> Arc<Self> {
        Arc::new(Self {
            accounts: Mutex::new(accounts.into()),
            rejection,
            requests: Mutex::new(Vec::new()),
        })
    }

    fn next_accounts(&self) -> Vec<String> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.len() > 1 {
            accounts.pop_front().unwrap()
        } else {
            accounts.front().cloned().unwrap_or_default()
        }
    }

    pub fn count(&self, method: &str) -> usize {
        self.requests.lock().unwrap().iter().filter(|m| *m == method).count()
    }
}

#[async_trait]
impl Eip1193Provider for ScriptedWallet {
    async fn request(&self, request: RpcRequest) -> WalletResult<Value> {
        self.requests.lock().unwrap().push(request.method.clone());
        match request.method.as_str() {
            "eth_requestAccounts" | "eth_accounts" => match &self.rejection {
                Some((code, message)) => Err(WalletError::Rpc {
                    code: *code,
                    message: message.clone(),
                }),
                None => Ok(json!(self.next_accounts())),
            },
            "personal_sign" => Ok(json!("0xsigned")),
            other => Err(WalletError::unsupported(other)),
        }
    }
}

/// How a mock negotiator behaves once `connect()` is called.
#[derive(Debug, Clone)]
pub enum SessionScript {
    /// Emit each URI, yield, then approve.
    EmitThenApprove(Vec<String>),
    /// Emit a URI and approve within the same poll.
    EmitAndApprove(String),
    /// Approve without ever emitting a URI.
    ApproveWithoutUri,
    /// Never emit, never resolve.
    Silent,
    /// Emit, then have the wallet decline.
    EmitThenDecline(String),
}

pub struct MockNegotiator {
    script: SessionScript,
    sink: Mutex<Option<UriSink>>,
    accounts_tx: Mutex<Option<mpsc::UnboundedSender<Vec<String>>>>,
    provider: Arc<ScriptedWallet>,
}

impl MockNegotiator {
    /// Push an "accounts changed" event, as the remote wallet would.
    pub fn push_accounts(&self, accounts: &[&str]) {
        if let Some(tx) = self.accounts_tx.lock().unwrap().as_ref() {
            let _ = tx.send(accounts.iter().map(|a| a.to_string()).collect());
        }
    }

    fn emit(&self, uri: &str) {
        if let Some(sink) = self.sink.lock().unwrap().as_ref() {
            sink.emit(uri);
        }
    }
}

#[async_trait]
impl SessionNegotiator for MockNegotiator {
    fn on_display_uri(&self, sink: UriSink) {
        *self.sink.lock().unwrap() = Some(sink);
    }

    fn on_accounts_changed(&self, tx: mpsc::UnboundedSender<Vec<String>>) {
        *self.accounts_tx.lock().unwrap() = Some(tx);
    }

    async fn connect(&self) -> WalletResult<()> {
        match &self.script {
            SessionScript::EmitThenApprove(uris) => {
                for uri in uris {
                    self.emit(uri);
                }
                tokio::task::yield_now().await;
                Ok(())
            }
            SessionScript::EmitAndApprove(uri) => {
                self.emit(uri);
                Ok(())
            }
            SessionScript::ApproveWithoutUri => Ok(()),
            SessionScript::Silent => std::future::pending().await,
            SessionScript::EmitThenDecline(uri) => {
                self.emit(uri);
                tokio::task::yield_now().await;
                Err(WalletError::Rejected("user closed the wallet".to_string()))
            }
        }
    }

    fn provider(&self) -> Arc<dyn Eip1193Provider> {
        self.provider.clone()
    }
}

/// Factory recording every construction.
pub struct MockFactory {
    script: SessionScript,
    session_accounts: Vec<String>,
    pub inits: Mutex<Vec<NegotiatorOptions>>,
    pub last: Mutex<Option<Arc<MockNegotiator>>>,
}

impl MockFactory {
    pub fn new(script: SessionScript) -> Arc<Self> {
        Arc::new(Self {
            script,
            session_accounts: vec![ACCOUNT.to_string()],
            inits: Mutex::new(Vec::new()),
            last: Mutex::new(None),
        })
    }

    pub fn init_count(&self) -> usize {
        self.inits.lock().unwrap().len()
    }

    pub fn last_negotiator(&self) -> Arc<MockNegotiator> {
        self.last.lock().unwrap().clone().unwrap()
    }
}

#[async_trait]
impl NegotiatorFactory for MockFactory {
    async fn init(&self, options: &NegotiatorOptions) -> WalletResult<Arc<dyn SessionNegotiator>> {
        self.inits.lock().unwrap().push(options.clone());
        let accounts: Vec<&str> = self.session_accounts.iter().map(String::as_str).collect();
        let negotiator = Arc::new(MockNegotiator {
            script: self.script.clone(),
            sink: Mutex::new(None),
            accounts_tx: Mutex::new(None),
            provider: ScriptedWallet::with_accounts(&accounts),
        });
        *self.last.lock().unwrap() = Some(negotiator.clone());
        Ok(negotiator as Arc<dyn SessionNegotiator>)
    }
}

/// Opener recording every link.
#[derive(Default)]
pub struct RecordingOpener {
    pub opened: Mutex<Vec<Url>>,
    pub navigated: Mutex<Vec<Url>>,
}

impl RecordingOpener {
    pub fn total(&self) -> usize {
        self.opened.lock().unwrap().len() + self.navigated.lock().unwrap().len()
    }
}

impl LinkOpener for RecordingOpener {
    fn open(&self, url: &Url) {
        self.opened.lock().unwrap().push(url.clone());
    }

    fn navigate(&self, url: &Url) {
        self.navigated.lock().unwrap().push(url.clone());
    }
}

/// Protection service answering from a queue of outcomes.
pub struct ScriptedProtector {
    outcomes: Mutex<VecDeque<Result<String, String>>>,
    stalled: usize,
    pub calls: AtomicUsize,
    pub payloads: Mutex<Vec<ProtectedData>>,
}

impl ScriptedProtector {
    pub fn new(outcomes: Vec<Result<&str, &str>>) -> Arc<Self> {
        Self::stalling(0, outcomes)
    }

    /// The first `stalled` calls never return; later calls take `outcomes` in order.
    pub fn stalling(stalled: usize, outcomes: Vec<Result<&str, &str>>) -> Arc<Self> {
        Arc::new(Self {
            stalled,
            outcomes: Mutex::new(
                outcomes
                    .into_iter()
                    .map(|o| o.map(hash).map_err(str::to_string))
                    .collect(),
            ),
            calls: AtomicUsize::new(0),
            payloads: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProtectionService for ScriptedProtector {
    async fn protect_data(
        &self,
        provider: Arc<dyn Eip1193Provider>,
        data: &ProtectedData,
    ) -> WalletResult<ProtectionReceipt> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.payloads.lock().unwrap().push(data.clone());
        // Exercise the handle the way a real SDK would.
        provider.request(RpcRequest::new("eth_accounts")).await?;
        if call < self.stalled {
            std::future::pending::<()>().await;
        }

        let next = self
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err("no scripted outcome".to_string()));
        match next {
            Ok(transaction_hash) => Ok(ProtectionReceipt { transaction_hash }),
            Err(message) => Err(WalletError::Protection(message)),
        }
    }
}

/// Host bridge counting `ready()` calls.
#[derive(Default)]
pub struct CountingBridge {
    pub ready_calls: AtomicUsize,
}

impl HostBridge for CountingBridge {
    fn ready(&self) {
        self.ready_calls.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn settings() -> FlowSettings {
    FlowSettings::from_config(&AppConfig::default()).unwrap()
}

pub fn component(
    env: Environment,
    factory: Arc<MockFactory>,
    protector: Arc<ScriptedProtector>,
    opener: Arc<RecordingOpener>,
) -> ConnectAndProtect {
    component_with_config(env, factory, protector, opener, &AppConfig::default())
}

pub fn component_with_config(
    env: Environment,
    factory: Arc<MockFactory>,
    protector: Arc<ScriptedProtector>,
    opener: Arc<RecordingOpener>,
    config: &AppConfig,
) -> ConnectAndProtect {
    let settings = FlowSettings::from_config(config).unwrap();
    ConnectAndProtect::new(env, factory, protector, opener, settings)
}

/// Start a mock HTTP backend answering every request with `status` and `body`.
///
/// Returns the bound address and the request bodies received so far.
pub async fn start_json_backend(status: u16, body: &'static str) -> (SocketAddr, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let received = Arc::new(Mutex::new(Vec::new()));
    let seen = received.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let seen = seen.clone();
                    tokio::spawn(async move {
                        let request_body = read_request_body(&mut socket).await;
                        seen.lock().unwrap().push(request_body);

                        let status_text = match status {
                            200 => "200 OK",
                            400 => "400 Bad Request",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, received)
}

async fn read_request_body(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                return String::from_utf8_lossy(&buf[header_end + 4..header_end + 4 + content_length]).to_string();
            }
        }
    }

    String::new()
}
