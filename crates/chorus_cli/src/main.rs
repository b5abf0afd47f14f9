mod console;

use anyhow::Context;
use chorus_core::tools::mock::{MockImageTool, MockSearchTool};
use chorus_core::{
    AgentContext, AgentService, ChorusConfig, EmitSink, Metadata, MockAgent, Preset,
};
use chorus_voice::{MockSynthesizer, SpeakText, SpeechTool};
use clap::{Parser, Subcommand};
use console::ConsoleSink;
use std::io::{self, Write};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the config file
    #[arg(short, long, default_value = "chorus.toml", env = "CHORUS_CONFIG")]
    config: String,

    /// Built-in agent setup (buddy, voice_captain); overrides the config file
    #[arg(short, long, global = true)]
    preset: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the assembled system prompt
    Prompt,
    /// List the enabled tools as JSON schemas
    Tools,
    /// Chat with a local mock agent over stdin
    Chat {
        /// Speak text replies instead of printing them
        #[arg(long)]
        voice: bool,
    },
}

fn load_config(args: &Args) -> anyhow::Result<ChorusConfig> {
    let preset = args
        .preset
        .as_deref()
        .map(|name| Preset::parse(name).with_context(|| format!("Unknown preset: {}", name)))
        .transpose()?;
    Ok(ChorusConfig::load_or_default_with_preset(&args.config, preset))
}

fn build_service(config: ChorusConfig) -> AgentService {
    let agent = Arc::new(MockAgent::new(&config.agent.model_name));
    AgentService::new(config, agent)
        .with_tool(Arc::new(MockSearchTool))
        .with_tool(Arc::new(MockImageTool))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();
    let config = load_config(&args)?;

    match args.command.unwrap_or(Command::Chat { voice: false }) {
        Command::Prompt => {
            println!("{}", config.system_prompt());
        }
        Command::Tools => {
            let service = build_service(config);
            let schemas = service.tools().available_tools();
            println!("{}", serde_json::to_string_pretty(&schemas)?);
        }
        Command::Chat { voice } => {
            let voice = voice || config.voice.enabled;
            chat(config, voice).await?;
        }
    }

    Ok(())
}

async fn chat(config: ChorusConfig, voice: bool) -> anyhow::Result<()> {
    let voice_id = config.voice.voice_id.clone();
    let mut service = build_service(config);

    let console: Arc<dyn EmitSink> = Arc::new(ConsoleSink::stdout());
    let context = AgentContext::new(vec![console])
        .with_metadata(Metadata::new(serde_json::json!({ "transport": "terminal" })));

    if voice {
        info!("Voice output enabled (voice {})", voice_id);
        let speech = Arc::new(SpeechTool::new(Arc::new(MockSynthesizer::new(&voice_id))));
        service = service.with_output_transform(Arc::new(SpeakText::new(
            speech,
            context.tool_context(),
        )));
    }

    info!("Chat session {} started", context.id);
    println!("Chorus online. Type 'quit' to exit.");
    print!("> ");
    io::stdout().flush()?;

    let stdin = io::stdin();
    let mut input = String::new();

    loop {
        input.clear();
        if stdin.read_line(&mut input)? == 0 {
            break;
        }
        let trimmed = input.trim();

        if trimmed == "quit" || trimmed == "exit" {
            break;
        }

        if !trimmed.is_empty() {
            if let Err(e) = service.run_agent(trimmed, &context).await {
                error!("Agent run failed: {:#}", e);
                println!("\n[System Error]: {}\n", e);
            }
        }

        print!("> ");
        io::stdout().flush()?;
    }

    Ok(())
}
