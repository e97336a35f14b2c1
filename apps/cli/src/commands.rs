//! Subcommand implementations.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tollgate_action::{Item, JsonObject, NodeOutputs, NodeParameters, WebhookCallback};
use tollgate_approval::{
    ACCOUNT_ID_CREDENTIAL, APPROVAL_ACTION_KEY, ApprovalNode, ApprovalNotifier, ApprovalParameters,
    ApprovalRequest, ChannelNotifier, HttpNotifier, Lane, resolve_lanes,
};
use tollgate_runtime::{ActionRegistry, ActionRuntime, RuntimeConfig, StartRequest, StaticCredentials};

use crate::config::CliConfig;

/// What `run` prints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RunReport {
    /// Request handed to the in-process notifier; absent when sent over HTTP.
    #[serde(skip_serializing_if = "Option::is_none")]
    request: Option<ApprovalRequest>,
    acknowledgement: String,
    outputs: NodeOutputs,
}

/// Print the lanes a configuration produces.
pub fn outputs(params: &Path) -> anyhow::Result<()> {
    let parameters = read_parameters(params)?;
    let lanes: Vec<Lane> = resolve_lanes(&ApprovalParameters::actions(&parameters)?);
    print_json(&lanes)
}

/// Start the node, deliver one callback, print the routed result.
pub async fn run(
    config: &CliConfig,
    params: &Path,
    input: Option<&Path>,
    callback: &Path,
) -> anyhow::Result<()> {
    let parameters = read_parameters(params)?;
    let input: Vec<Item> = match input {
        Some(path) => read_json::<Vec<JsonObject>>(path)?
            .into_iter()
            .map(Item::new)
            .collect(),
        None => Vec::new(),
    };
    let body: serde_json::Value = read_json(callback)?;

    let (channel, mut requests) = ChannelNotifier::new();
    let notifier: Arc<dyn ApprovalNotifier> = match &config.notify_endpoint {
        Some(endpoint) => Arc::new(HttpNotifier::new(endpoint.clone())),
        None => Arc::new(channel),
    };
    let runtime = build_runtime(config, notifier)?;

    let outcome = runtime
        .start(
            APPROVAL_ACTION_KEY,
            StartRequest::new(parameters).with_input(input),
        )
        .await?;
    let key = outcome
        .wait_key()
        .context("approval node finished without waiting for a callback")?;
    let request = requests.try_recv().ok();

    let resumed = runtime.resume(key, WebhookCallback::post(body)).await?;
    tracing::debug!(wait_key = %key, "callback delivered");

    print_json(&RunReport {
        request,
        acknowledgement: resumed.acknowledgement,
        outputs: resumed.outputs,
    })
}

fn build_runtime(
    config: &CliConfig,
    notifier: Arc<dyn ApprovalNotifier>,
) -> anyhow::Result<ActionRuntime> {
    let registry = ActionRegistry::new();
    registry.register(Arc::new(ApprovalNode::new(notifier)));

    let credentials = StaticCredentials::new();
    if !config.account_id.is_empty() {
        credentials.insert(ACCOUNT_ID_CREDENTIAL, config.account_id.clone());
    }

    Ok(ActionRuntime::new(
        Arc::new(registry),
        RuntimeConfig::from_public_url(&config.public_url)?,
    )
    .with_credentials(Arc::new(credentials)))
}

fn read_parameters(path: &Path) -> anyhow::Result<NodeParameters> {
    let value = read_json(path)?;
    NodeParameters::from_value(value)
        .with_context(|| format!("invalid node parameters in {}", path.display()))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
