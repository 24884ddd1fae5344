use support_relay::agent::Agent;
use support_relay::channels::{
    CarrierChannel, CarrierConfig, MailChannel, MailConfig, WebhookChannel, WebhookConfig,
};
use support_relay::config::{AgentConfig, PersonalityProfile};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Install rustls crypto provider before any TLS usage
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    eprintln!("🤖 Support Relay v{}", env!("CARGO_PKG_VERSION"));

    let mut agent = Agent::new(AgentConfig {
        name: "support-relay".to_string(),
        admin_id: "admin@example.com".to_string(),
        personality: PersonalityProfile::new()
            .with("name", "Support Bot")
            .with("tone", "professional and friendly")
            .with("expertise", "customer support"),
    });

    let mut active_channels = Vec::new();

    // Conditionally add the carrier channel if Twilio credentials are set
    match CarrierConfig::from_env() {
        Ok(config) => {
            agent.register_channel("whatsapp", Box::new(CarrierChannel::new(config)));
            active_channels.push("whatsapp");
        }
        Err(e) => eprintln!("   WhatsApp: disabled ({e})"),
    }

    // Conditionally add the mail channel if SMTP credentials are set
    match MailConfig::from_env() {
        Ok(config) => {
            eprintln!("   Email: enabled (SMTP: {})", config.smtp_host);
            agent.register_channel("email", Box::new(MailChannel::new(config)));
            active_channels.push("email");
        }
        Err(e) => eprintln!("   Email: disabled ({e})"),
    }

    // Always add the website channel; without WEBHOOK_URL it buffers only
    let webhook_config = WebhookConfig::from_env();
    if webhook_config.url.is_none() {
        eprintln!("   Website: no WEBHOOK_URL set, sends will fail");
    }
    agent.register_channel("website", Box::new(WebhookChannel::new(webhook_config)));
    active_channels.push("website");

    eprintln!("   Channels: {}\n", active_channels.join(", "));

    agent.add_workflow(
        "greeting",
        serde_json::json!({
            "trigger": "contact_received",
            "action": "send_greeting",
        }),
    );

    // Process one example message
    let outcome = agent
        .process_message("whatsapp", "+1234567890", "Hello, I need help")
        .await;
    tracing::info!(?outcome, "Example message processed");

    // Admin dashboard
    let summary = agent.get_dashboard_summary();
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
