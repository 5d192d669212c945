//! Serve flow against a real project directory with a recording runner.

use std::sync::Mutex;

use async_trait::async_trait;
use storefront_project::{
    ExtensionProject, InvocationConfig, PackageManager, ProcessRunner, ProjectError, Result,
    Runtime, ServeExtension, ServeOptions, messages,
    runtime::CHECKOUT_DEFAULT_RESOURCE_URL,
    tasks::{EnsureDevStore, EnsureEnv},
};
use tempfile::TempDir;

struct RecordingRunner {
    success: bool,
    calls: Mutex<Vec<(PackageManager, InvocationConfig)>>,
}

impl RecordingRunner {
    fn new(success: bool) -> Self {
        Self {
            success,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn single_call(&self) -> (PackageManager, InvocationConfig) {
        let calls = self.calls.lock().unwrap();
        assert_eq!(calls.len(), 1, "runner should be called exactly once");
        calls[0].clone()
    }
}

#[async_trait]
impl ProcessRunner for RecordingRunner {
    async fn call(
        &self,
        package_manager: PackageManager,
        config: &InvocationConfig,
    ) -> Result<bool> {
        self.calls
            .lock()
            .unwrap()
            .push((package_manager, config.clone()));
        Ok(self.success)
    }
}

struct Pass;

#[async_trait]
impl EnsureDevStore for Pass {
    async fn call(&self, _project: &mut ExtensionProject) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl EnsureEnv for Pass {
    async fn call(&self, _project: &mut ExtensionProject) -> Result<()> {
        Ok(())
    }
}

struct FailingDevStore;

#[async_trait]
impl EnsureDevStore for FailingDevStore {
    async fn call(&self, _project: &mut ExtensionProject) -> Result<()> {
        Err(ProjectError::precondition("no store"))
    }
}

const BASE_ENV: &str = "SHOPIFY_API_KEY=key\nSHOPIFY_API_SECRET=secret\nSHOP=dev.example.com\nEXTENSION_TITLE=\"My Extension\"\nEXTENSION_UUID=dev-1234\n";

async fn setup(extra: &str) -> (TempDir, ExtensionProject) {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".env"), format!("{BASE_ENV}{extra}")).unwrap();
    let project = ExtensionProject::load(dir.path()).await.unwrap();
    (dir, project)
}

fn options(resource_url: Option<&str>) -> ServeOptions {
    ServeOptions {
        resource_url: resource_url.map(str::to_string),
        package_manager: Some(PackageManager::Yarn),
        ..ServeOptions::default()
    }
}

fn assert_forwards(config: &InvocationConfig, flag: &str) {
    for package_manager in PackageManager::ALL {
        let args = config.fetch(package_manager).unwrap();
        assert!(
            args.iter().any(|arg| arg == flag),
            "{package_manager} args {args:?} should contain {flag}"
        );
    }
}

#[tokio::test]
async fn test_forwards_persisted_resource_url() {
    let (_dir, mut project) = setup("EXTENSION_RESOURCE_URL=/test\n").await;
    let runner = RecordingRunner::new(true);

    ServeExtension::new(Runtime::Admin, &runner, &Pass, &Pass, options(None))
        .call(&mut project)
        .await
        .unwrap();

    let (package_manager, config) = runner.single_call();
    assert_eq!(package_manager, PackageManager::Yarn);
    assert_forwards(&config, "--resourceUrl=/test");
}

#[tokio::test]
async fn test_builds_resource_url_if_necessary() {
    let (_dir, mut project) = setup("").await;
    let runner = RecordingRunner::new(true);

    ServeExtension::new(
        Runtime::CheckoutUiExtension,
        &runner,
        &Pass,
        &Pass,
        options(None),
    )
    .call(&mut project)
    .await
    .unwrap();

    assert_eq!(
        project.resource_url().unwrap(),
        Some(CHECKOUT_DEFAULT_RESOURCE_URL)
    );

    // A fresh handle sees the same value without recomputing it.
    let reloaded = ExtensionProject::load(project.directory()).await.unwrap();
    assert_eq!(
        reloaded.resource_url().unwrap(),
        Some(CHECKOUT_DEFAULT_RESOURCE_URL)
    );

    let (_, config) = runner.single_call();
    assert_forwards(
        &config,
        &format!("--resourceUrl={CHECKOUT_DEFAULT_RESOURCE_URL}"),
    );
}

#[tokio::test]
async fn test_resource_url_is_used_if_given() {
    let (_dir, mut project) = setup("EXTENSION_RESOURCE_URL=/persisted\n").await;
    let runner = RecordingRunner::new(true);

    ServeExtension::new(
        Runtime::CheckoutUiExtension,
        &runner,
        &Pass,
        &Pass,
        options(Some("/provided")),
    )
    .call(&mut project)
    .await
    .unwrap();

    let (_, config) = runner.single_call();
    assert_forwards(&config, "--resourceUrl=/provided");
    assert_eq!(project.resource_url().unwrap(), Some("/provided"));
}

#[tokio::test]
async fn test_no_resource_url_when_nothing_supplies_one() {
    let (_dir, mut project) = setup("").await;
    let runner = RecordingRunner::new(true);

    ServeExtension::new(Runtime::Admin, &runner, &Pass, &Pass, options(None))
        .call(&mut project)
        .await
        .unwrap();

    let (_, config) = runner.single_call();
    for (_, args) in config.iter() {
        assert!(!args.iter().any(|arg| arg.starts_with("--resourceUrl")));
    }
    assert_eq!(project.resource_url().unwrap(), None);
}

#[tokio::test]
async fn test_empty_persisted_resource_url_falls_through_to_default() {
    let (_dir, mut project) = setup("EXTENSION_RESOURCE_URL=\n").await;
    let runner = RecordingRunner::new(true);
    let serve = ServeExtension::new(
        Runtime::CheckoutUiExtension,
        &runner,
        &Pass,
        &Pass,
        options(None),
    );

    assert_eq!(
        serve.resolve_resource_url(&project).unwrap().as_deref(),
        Some(CHECKOUT_DEFAULT_RESOURCE_URL)
    );
    serve.call(&mut project).await.unwrap();
}

#[tokio::test]
async fn test_persisting_twice_writes_once() {
    let (_dir, mut project) = setup("").await;
    let runner = RecordingRunner::new(true);
    let serve = ServeExtension::new(
        Runtime::CheckoutUiExtension,
        &runner,
        &Pass,
        &Pass,
        options(Some("/provided")),
    );

    let first = serve.resolve_resource_url(&project).unwrap();
    assert!(serve
        .persist_resource_url(&mut project, first.as_deref())
        .await
        .unwrap());

    let second = serve.resolve_resource_url(&project).unwrap();
    assert_eq!(first, second);
    assert!(!serve
        .persist_resource_url(&mut project, second.as_deref())
        .await
        .unwrap());
    assert_eq!(project.resource_url().unwrap(), Some("/provided"));
}

#[tokio::test]
async fn test_abort_when_server_start_failed() {
    let (dir, mut project) = setup("EXTENSION_RESOURCE_URL=/test\n").await;
    let before = std::fs::read_to_string(dir.path().join(".env")).unwrap();
    let runner = RecordingRunner::new(false);

    let err = ServeExtension::new(Runtime::Admin, &runner, &Pass, &Pass, options(None))
        .call(&mut project)
        .await
        .unwrap_err();

    assert!(matches!(err, ProjectError::LaunchFailure));
    assert_eq!(err.to_string(), messages::abort_line(messages::SERVE_FAILURE));

    let after = std::fs::read_to_string(dir.path().join(".env")).unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_missing_env_aborts_with_directory_message() {
    let dir = TempDir::new().unwrap();
    let mut project = ExtensionProject::load(dir.path()).await.unwrap();
    let runner = RecordingRunner::new(true);

    let err = ServeExtension::new(Runtime::Admin, &runner, &Pass, &Pass, options(None))
        .call(&mut project)
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        messages::abort_line(messages::MISSING_PROJECT_CONTEXT)
    );
    assert!(runner.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_precondition_failure_propagates_unchanged() {
    let (_dir, mut project) = setup("").await;
    let runner = RecordingRunner::new(true);

    let err = ServeExtension::new(
        Runtime::Admin,
        &runner,
        &FailingDevStore,
        &Pass,
        options(None),
    )
    .call(&mut project)
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "✗ no store");
    assert!(runner.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_flags_follow_runtime_support() {
    let (_dir, project) = setup("EXTENSION_ID=42\n").await;
    let runner = RecordingRunner::new(true);
    let serve = ServeExtension::new(
        Runtime::CheckoutPostPurchase,
        &runner,
        &Pass,
        &Pass,
        ServeOptions {
            tunnel_url: Some("https://tunnel.example.com".parse().unwrap()),
            ..options(None)
        },
    );

    let config = serve.invocation_config(&project, None).unwrap();
    assert_eq!(
        config.fetch(PackageManager::Yarn).unwrap(),
        [
            "server",
            "--shop=dev.example.com",
            "--apiKey=key",
            "--port=39351"
        ]
    );

    let admin = ServeExtension::new(
        Runtime::Admin,
        &runner,
        &Pass,
        &Pass,
        ServeOptions {
            tunnel_url: Some("https://tunnel.example.com".parse().unwrap()),
            ..options(None)
        },
    );
    let config = admin.invocation_config(&project, Some("/cart")).unwrap();
    assert_eq!(
        config.fetch(PackageManager::Npm).unwrap(),
        [
            "run",
            "server",
            "--",
            "--shop=dev.example.com",
            "--apiKey=key",
            "--port=39351",
            "--publicUrl=https://tunnel.example.com/",
            "--name=My Extension",
            "--uuid=dev-1234",
            "--resourceUrl=/cart"
        ]
    );
}
