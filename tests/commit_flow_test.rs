//! commit 命令主流程集成测试
//!
//! 通过注入 mock 的 GitOperations 和 LLMProvider 测试 run_with_deps()：
//! - 端到端生成、trim、提交
//! - 无暂存文件错误处理
//! - diff 为空时退回 name-status payload
//! - API key 缺失在任何 provider 调用前短路
//! - dry-run 模式

use async_trait::async_trait;
use gcmt_rs::commands::{CommitOptions, commit::run_with_deps};
use gcmt_rs::config::{AppConfig, ProviderKind};
use gcmt_rs::error::{GcmtError, Result};
use gcmt_rs::git::GitOperations;
use gcmt_rs::llm::{CancellationToken, LLMProvider, PromptRequest};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// === Mock GitOperations ===

struct MockGitOps {
    has_staged: bool,
    diff: String,
    name_status: String,
    committed: Mutex<Option<String>>,
}

impl MockGitOps {
    fn new(diff: &str) -> Self {
        Self {
            has_staged: true,
            diff: diff.to_string(),
            name_status: "M\ttest.rs\n".to_string(),
            committed: Mutex::new(None),
        }
    }

    fn no_staged_changes() -> Self {
        Self {
            has_staged: false,
            diff: String::new(),
            name_status: String::new(),
            committed: Mutex::new(None),
        }
    }

    fn with_empty_patch(name_status: &str) -> Self {
        Self {
            has_staged: true,
            diff: String::new(),
            name_status: name_status.to_string(),
            committed: Mutex::new(None),
        }
    }

    fn committed_message(&self) -> Option<String> {
        self.committed.lock().unwrap().clone()
    }
}

impl GitOperations for MockGitOps {
    fn has_staged_changes(&self) -> Result<bool> {
        Ok(self.has_staged)
    }

    fn get_staged_diff(&self) -> Result<String> {
        Ok(self.diff.clone())
    }

    fn get_staged_name_status(&self) -> Result<String> {
        Ok(self.name_status.clone())
    }

    fn commit(&self, message: &str) -> Result<()> {
        *self.committed.lock().unwrap() = Some(message.to_string());
        Ok(())
    }
}

// === Mock LLMProvider ===

#[derive(Debug)]
struct SeenRequest {
    instructions: String,
    diff: String,
    max_tokens: u32,
}

#[derive(Debug)]
struct MockProvider {
    response: Result<String>,
    seen: Mutex<Option<SeenRequest>>,
    calls: AtomicUsize,
}

impl MockProvider {
    fn returning(response: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(response.to_string()),
            seen: Mutex::new(None),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing(provider: &str, message: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Err(GcmtError::Provider {
                provider: provider.to_string(),
                message: message.to_string(),
            }),
            seen: Mutex::new(None),
            calls: AtomicUsize::new(0),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn seen_request(&self) -> Option<SeenRequest> {
        self.seen.lock().unwrap().take()
    }
}

#[async_trait]
impl LLMProvider for MockProvider {
    async fn send_prompt(
        &self,
        request: &PromptRequest<'_>,
        _cancel: Option<&CancellationToken>,
    ) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.seen.lock().unwrap() = Some(SeenRequest {
            instructions: request.instructions.to_string(),
            diff: request.diff.to_string(),
            max_tokens: request.max_tokens,
        });

        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(GcmtError::Provider { provider, message }) => Err(GcmtError::Provider {
                provider: provider.clone(),
                message: message.clone(),
            }),
            Err(_) => unreachable!(),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

// === 测试 ===

#[tokio::test]
async fn test_end_to_end_generates_trims_and_commits() {
    let repo = MockGitOps::new("diff --git a/x b/x\n+hello\n");
    let provider = MockProvider::returning("feat: add hello line.\n");
    let requested_kinds: Mutex<Vec<ProviderKind>> = Mutex::new(Vec::new());

    let options = CommitOptions {
        yes: true,
        style: Some("Concise - Up to 100 characters".to_string()),
        ..Default::default()
    };
    let config = AppConfig::default();

    let provider_for_factory = provider.clone();
    let factory = |kind: ProviderKind| {
        requested_kinds.lock().unwrap().push(kind);
        Ok(provider_for_factory.clone() as Arc<dyn LLMProvider>)
    };

    run_with_deps(&options, &config, &repo, &factory)
        .await
        .unwrap();

    // 结果已 trim 并提交
    assert_eq!(
        repo.committed_message().as_deref(),
        Some("feat: add hello line.")
    );

    // 默认配置走 openai
    assert_eq!(*requested_kinds.lock().unwrap(), vec![ProviderKind::OpenAI]);

    // 风格覆盖生效：concise 模板 + 75 token 预算，diff 原样传递
    let seen = provider.seen_request().unwrap();
    assert_eq!(seen.max_tokens, 75);
    assert!(seen.instructions.contains("under 100 characters"));
    assert_eq!(seen.diff, "diff --git a/x b/x\n+hello\n");
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_no_staged_changes_short_circuits() {
    let repo = MockGitOps::no_staged_changes();
    let provider = MockProvider::returning("feat: unused");

    let options = CommitOptions {
        yes: true,
        ..Default::default()
    };
    let config = AppConfig::default();

    let factory_calls = AtomicUsize::new(0);
    let provider_for_factory = provider.clone();
    let factory = |_kind: ProviderKind| {
        factory_calls.fetch_add(1, Ordering::SeqCst);
        Ok(provider_for_factory.clone() as Arc<dyn LLMProvider>)
    };

    let err = run_with_deps(&options, &config, &repo, &factory)
        .await
        .unwrap_err();

    assert!(matches!(err, GcmtError::NoStagedChanges));
    assert_eq!(factory_calls.load(Ordering::SeqCst), 0);
    assert_eq!(provider.call_count(), 0);
    assert!(repo.committed_message().is_none());
}

#[tokio::test]
async fn test_empty_patch_falls_back_to_name_status_payload() {
    let repo = MockGitOps::with_empty_patch("M\tsrc/main.rs\nA\tsrc/new.rs\n");
    let provider = MockProvider::returning("chore: update sources");

    let options = CommitOptions {
        yes: true,
        ..Default::default()
    };
    let config = AppConfig::default();

    let provider_for_factory = provider.clone();
    let factory =
        |_kind: ProviderKind| Ok(provider_for_factory.clone() as Arc<dyn LLMProvider>);

    run_with_deps(&options, &config, &repo, &factory)
        .await
        .unwrap();

    let seen = provider.seen_request().unwrap();
    assert_eq!(seen.diff, "M\tsrc/main.rs\nA\tsrc/new.rs\n");
    assert_eq!(
        repo.committed_message().as_deref(),
        Some("chore: update sources")
    );
}

#[tokio::test]
async fn test_missing_api_key_short_circuits_regardless_of_diff_size() {
    // 20 KiB diff，超过费用阈值
    let big_diff = format!("diff --git a/big b/big\n{}", "+x\n".repeat(20 * 1024 / 3));
    let repo = MockGitOps::new(&big_diff);
    let provider = MockProvider::returning("feat: unused");

    let options = CommitOptions {
        yes: true,
        ..Default::default()
    };
    let config = AppConfig::default();

    let factory = |kind: ProviderKind| -> Result<Arc<dyn LLMProvider>> {
        Err(GcmtError::MissingApiKey(kind.as_str().to_string()))
    };

    let err = run_with_deps(&options, &config, &repo, &factory)
        .await
        .unwrap_err();

    match err {
        GcmtError::MissingApiKey(name) => assert_eq!(name, "openai"),
        other => panic!("Expected MissingApiKey, got {other:?}"),
    }
    // 没有任何 HTTP/provider 调用，也没有提交
    assert_eq!(provider.call_count(), 0);
    assert!(repo.committed_message().is_none());
}

#[tokio::test]
async fn test_dry_run_prints_without_committing() {
    let repo = MockGitOps::new("diff --git a/x b/x\n+hello\n");
    let provider = MockProvider::returning("docs: update readme\n");

    let options = CommitOptions {
        dry_run: true,
        ..Default::default()
    };
    let config = AppConfig::default();

    let provider_for_factory = provider.clone();
    let factory =
        |_kind: ProviderKind| Ok(provider_for_factory.clone() as Arc<dyn LLMProvider>);

    run_with_deps(&options, &config, &repo, &factory)
        .await
        .unwrap();

    assert_eq!(provider.call_count(), 1);
    assert!(repo.committed_message().is_none());
}

#[tokio::test]
async fn test_provider_failure_propagates_and_skips_commit() {
    let repo = MockGitOps::new("diff --git a/x b/x\n+hello\n");
    let provider = MockProvider::failing("openai", "(429) rate limited");

    let options = CommitOptions {
        yes: true,
        ..Default::default()
    };
    let config = AppConfig::default();

    let provider_for_factory = provider.clone();
    let factory =
        |_kind: ProviderKind| Ok(provider_for_factory.clone() as Arc<dyn LLMProvider>);

    let err = run_with_deps(&options, &config, &repo, &factory)
        .await
        .unwrap_err();

    match err {
        GcmtError::Provider { provider, message } => {
            assert_eq!(provider, "openai");
            assert!(message.contains("429"));
        }
        other => panic!("Expected Provider error, got {other:?}"),
    }
    assert!(repo.committed_message().is_none());
}

#[tokio::test]
async fn test_unsupported_configured_provider_fails_before_generation() {
    let repo = MockGitOps::new("diff --git a/x b/x\n+hello\n");
    let provider = MockProvider::returning("feat: unused");

    let options = CommitOptions {
        yes: true,
        provider: Some("llama-local".to_string()),
        ..Default::default()
    };
    let config = AppConfig::default();

    let provider_for_factory = provider.clone();
    let factory =
        |_kind: ProviderKind| Ok(provider_for_factory.clone() as Arc<dyn LLMProvider>);

    let err = run_with_deps(&options, &config, &repo, &factory)
        .await
        .unwrap_err();

    assert!(matches!(err, GcmtError::UnsupportedProvider(_)));
    assert_eq!(provider.call_count(), 0);
}
