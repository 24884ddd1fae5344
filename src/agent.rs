//! Agent core — channel registry, message history, workflow table, dashboard.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::channels::Channel;
use crate::config::AgentConfig;
use crate::responder::generate_response;

/// How many history records the dashboard reports as recent.
const RECENT_WINDOW: usize = 10;

/// One recorded inbound/outbound exchange. Append-only; insertion order is
/// chronological order.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryRecord {
    pub timestamp: DateTime<Utc>,
    pub channel: String,
    pub sender: String,
    pub inbound: String,
    pub outbound: String,
}

/// A stored automation workflow. Inert: nothing in this core reads or
/// executes it after registration.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowDefinition {
    pub config: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub active: bool,
}

/// What happened to the outbound leg of a processed message.
///
/// The exchange is recorded in history in every case; this only reports
/// whether the response actually left through a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The named channel accepted the response.
    Delivered,
    /// The named channel exists but its transport reported failure.
    SendFailed,
    /// No channel is registered under the given name; the response was
    /// dropped.
    UnknownChannel,
}

/// Admin dashboard snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_messages: usize,
    pub channels: Vec<String>,
    pub workflows: BTreeMap<String, WorkflowDefinition>,
    pub recent_messages: Vec<HistoryRecord>,
}

/// The message-routing agent.
///
/// Owns all mutable state behind `&mut self` — one request at a time.
/// Concurrent callers need their own synchronization around the agent.
pub struct Agent {
    config: AgentConfig,
    channels: HashMap<String, Box<dyn Channel>>,
    history: Vec<HistoryRecord>,
    workflows: BTreeMap<String, WorkflowDefinition>,
}

impl Agent {
    pub fn new(config: AgentConfig) -> Self {
        Self {
            config,
            channels: HashMap::new(),
            history: Vec::new(),
            workflows: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    /// Register a channel under `name`, replacing any previous entry.
    ///
    /// The name is the routing key used by `process_message`; it may differ
    /// from the channel's native `name()`.
    pub fn register_channel(&mut self, name: impl Into<String>, channel: Box<dyn Channel>) {
        let name = name.into();
        tracing::info!(name = %name, transport = channel.name(), "Channel registered");
        self.channels.insert(name, channel);
    }

    /// Store a workflow definition, replacing any previous entry with the
    /// same id. Workflows are never executed here; there is no engine.
    pub fn add_workflow(&mut self, id: impl Into<String>, config: serde_json::Value) {
        let id = id.into();
        tracing::info!(id = %id, "Workflow registered");
        self.workflows.insert(
            id,
            WorkflowDefinition {
                config,
                created_at: Utc::now(),
                active: true,
            },
        );
    }

    /// Process one inbound message: generate a response, record the
    /// exchange, and send the response back through the originating channel.
    ///
    /// Exactly one history record is appended per call, whatever happens on
    /// the outbound leg. Delivery problems are reported in the returned
    /// outcome and logged; they are never raised as errors.
    pub async fn process_message(
        &mut self,
        channel_name: &str,
        sender: &str,
        text: &str,
    ) -> DeliveryOutcome {
        let response = generate_response(&self.config.personality, text);

        self.history.push(HistoryRecord {
            timestamp: Utc::now(),
            channel: channel_name.to_string(),
            sender: sender.to_string(),
            inbound: text.to_string(),
            outbound: response.clone(),
        });

        let Some(channel) = self.channels.get(channel_name) else {
            tracing::warn!(
                channel = channel_name,
                sender,
                "No channel registered under this name; response dropped"
            );
            return DeliveryOutcome::UnknownChannel;
        };

        if channel.send(sender, &response).await {
            DeliveryOutcome::Delivered
        } else {
            tracing::warn!(channel = channel_name, sender, "Response delivery failed");
            DeliveryOutcome::SendFailed
        }
    }

    /// Snapshot the agent state for the admin dashboard.
    pub fn get_dashboard_summary(&self) -> DashboardSummary {
        let mut channels: Vec<String> = self.channels.keys().cloned().collect();
        channels.sort();

        let recent_start = self.history.len().saturating_sub(RECENT_WINDOW);

        DashboardSummary {
            total_messages: self.history.len(),
            channels,
            workflows: self.workflows.clone(),
            recent_messages: self.history[recent_start..].to_vec(),
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────
