//! Controller integration tests
//!
//! These tests drive the public controller API end to end against a
//! scripted command invoker, asserting the exact command sequences sent
//! to the platform tool.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use os_proxy::config::DeviceStrategy;
use os_proxy::platform::macos;
use os_proxy::proxy::DeviceResolver;
use os_proxy::{CommandInvoker, ProxyController, ProxyError, ProxyRequest, Result};

/// Command invoker that replays canned results and records every call.
#[derive(Clone, Default)]
struct ScriptedInvoker {
    inner: Arc<ScriptedInner>,
}

#[derive(Default)]
struct ScriptedInner {
    script: Mutex<VecDeque<Result<String>>>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedInvoker {
    fn new() -> Self {
        Self::default()
    }

    /// Queue the result for the next invocation
    fn push(&self, result: Result<String>) {
        self.inner.script.lock().unwrap().push_back(result);
    }

    /// Argument lists of every invocation so far
    fn calls(&self) -> Vec<Vec<String>> {
        self.inner.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandInvoker for ScriptedInvoker {
    async fn invoke(&self, program: &str, args: &[String]) -> Result<String> {
        assert_eq!(program, "networksetup");
        self.inner.calls.lock().unwrap().push(args.to_vec());
        self.inner
            .script
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected command invocation")
    }
}

fn controller(invoker: &ScriptedInvoker) -> ProxyController<ScriptedInvoker> {
    ProxyController::with_invoker(
        invoker.clone(),
        &macos::COMMANDS,
        DeviceResolver::new(DeviceStrategy::Static, "Wi-Fi"),
    )
}

#[tokio::test]
async fn test_get_returns_canonical_config() {
    let invoker = ScriptedInvoker::new();
    invoker.push(Ok(
        "Enabled: Yes\nServer: proxy.example.com\nPort: 8080\n".to_string()
    ));

    let proxy = controller(&invoker)
        .get(None)
        .await
        .expect("Failed to get proxy configuration");

    assert_eq!(proxy.hostname, "proxy.example.com");
    assert_eq!(proxy.port, 8080);
    assert!(proxy.enabled);
    assert_eq!(invoker.calls(), vec![vec!["-getwebproxy", "Wi-Fi"]]);
}

#[tokio::test]
async fn test_get_wraps_empty_output() {
    let invoker = ScriptedInvoker::new();
    invoker.push(Ok(String::new()));

    let err = controller(&invoker)
        .get(None)
        .await
        .expect_err("get should fail");

    assert_eq!(
        err.to_string(),
        "Unable to get proxy configuration. No output to parse."
    );
}

#[tokio::test]
async fn test_get_wraps_exit_code() {
    let invoker = ScriptedInvoker::new();
    invoker.push(Err(ProxyError::CommandFailed { code: Some(7) }));

    let err = controller(&invoker)
        .get(None)
        .await
        .expect_err("get should fail");

    assert_eq!(err.to_string(), "Unable to get proxy configuration. Exit code 7.");
}

#[tokio::test]
async fn test_set_disabled_issues_write_then_disable() {
    let invoker = ScriptedInvoker::new();
    invoker.push(Ok(String::new()));
    invoker.push(Ok(String::new()));

    controller(&invoker)
        .set(ProxyRequest {
            hostname: Some("localhost".to_string()),
            port: Some(8000),
            enabled: Some(false),
            ..ProxyRequest::default()
        })
        .await
        .expect("Failed to set proxy configuration");

    assert_eq!(
        invoker.calls(),
        vec![
            vec!["-setwebproxy", "Wi-Fi", "localhost", "8000"],
            vec!["-setwebproxystate", "Wi-Fi", "off"],
        ]
    );
}

#[tokio::test]
async fn test_set_without_enabled_issues_single_write() {
    let invoker = ScriptedInvoker::new();
    invoker.push(Ok(String::new()));

    controller(&invoker)
        .set(ProxyRequest {
            hostname: Some("localhost".to_string()),
            port: Some(8000),
            ..ProxyRequest::default()
        })
        .await
        .expect("Failed to set proxy configuration");

    assert_eq!(
        invoker.calls(),
        vec![vec!["-setwebproxy", "Wi-Fi", "localhost", "8000"]]
    );
}

#[tokio::test]
async fn test_set_honors_request_device() {
    let invoker = ScriptedInvoker::new();
    invoker.push(Ok(String::new()));

    controller(&invoker)
        .set(ProxyRequest {
            device: Some("Built-In Ethernet".to_string()),
            hostname: Some("localhost".to_string()),
            port: Some(8000),
            ..ProxyRequest::default()
        })
        .await
        .expect("Failed to set proxy configuration");

    assert_eq!(
        invoker.calls(),
        vec![vec!["-setwebproxy", "Built-In Ethernet", "localhost", "8000"]]
    );
}

#[tokio::test]
async fn test_set_validation_failure_runs_no_command() {
    let invoker = ScriptedInvoker::new();

    let err = controller(&invoker)
        .set(ProxyRequest {
            port: Some(80),
            ..ProxyRequest::default()
        })
        .await
        .expect_err("set should fail");

    assert!(matches!(err, ProxyError::Validation(_)));
    assert!(invoker.calls().is_empty());
}

#[tokio::test]
async fn test_clear_issues_empty_write_and_disable() {
    let invoker = ScriptedInvoker::new();
    invoker.push(Ok(String::new()));
    invoker.push(Ok(String::new()));

    controller(&invoker).clear().await.expect("Failed to clear");

    assert_eq!(
        invoker.calls(),
        vec![
            vec!["-setwebproxy", "Wi-Fi", "", ""],
            vec!["-setwebproxystate", "Wi-Fi", "off"],
        ]
    );
}

#[tokio::test]
async fn test_toggle_disables_when_enabled() {
    let invoker = ScriptedInvoker::new();
    invoker.push(Ok("Enabled: Yes\nServer: localhost\nPort: 8000\n".to_string()));
    invoker.push(Ok(String::new()));

    controller(&invoker).toggle().await.expect("Failed to toggle");

    assert_eq!(
        invoker.calls(),
        vec![
            vec!["-getwebproxy", "Wi-Fi"],
            vec!["-setwebproxystate", "Wi-Fi", "off"],
        ]
    );
}

#[tokio::test]
async fn test_toggle_enables_when_disabled() {
    let invoker = ScriptedInvoker::new();
    invoker.push(Ok("Enabled: No\nServer: localhost\nPort: 8000\n".to_string()));
    invoker.push(Ok(String::new()));

    controller(&invoker).toggle().await.expect("Failed to toggle");

    assert_eq!(
        invoker.calls(),
        vec![
            vec!["-getwebproxy", "Wi-Fi"],
            vec!["-setwebproxystate", "Wi-Fi", "on"],
        ]
    );
}

#[tokio::test]
async fn test_discover_strategy_resolves_before_mutation() {
    let invoker = ScriptedInvoker::new();
    invoker.push(Ok("(1) Wi-Fi\n(Hardware Port: Wi-Fi, Device: en0)\n".to_string()));
    invoker.push(Ok(String::new()));

    let controller = ProxyController::with_invoker(
        invoker.clone(),
        &macos::COMMANDS,
        DeviceResolver::new(DeviceStrategy::Discover, "unused"),
    );

    controller.enable().await.expect("Failed to enable");

    assert_eq!(
        invoker.calls(),
        vec![
            vec!["-listnetworkserviceorder"],
            vec!["-setwebproxystate", "Wi-Fi", "on"],
        ]
    );
}

#[tokio::test]
async fn test_concurrent_operations_are_independent() {
    // Two controllers with independent invokers running at once; neither
    // call sequence bleeds into the other.
    let first = ScriptedInvoker::new();
    first.push(Ok("Enabled: Yes\nServer: a\nPort: 1\n".to_string()));
    let second = ScriptedInvoker::new();
    second.push(Ok("Enabled: No\nServer: b\nPort: 2\n".to_string()));

    let c1 = controller(&first);
    let c2 = controller(&second);
    let (one, two) = tokio::join!(c1.get(None), c2.get(None));

    assert!(one.expect("Failed to get").enabled);
    assert!(!two.expect("Failed to get").enabled);
}
