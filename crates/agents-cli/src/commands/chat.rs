//! Chat command - send chat completion requests.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::io::{self, BufRead};

use agents_sdk::Client;

use crate::output::{self, CommandResult, OutputFormat};

/// Arguments for the chat command.
#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Message to send (if not provided, reads from stdin)
    #[arg(short, long)]
    pub message: Option<String>,

    /// Model to use
    #[arg(short = 'M', long, default_value = "deployed-llm")]
    pub model: String,

    /// Deployment to target; omit to use the shared gateway
    #[arg(short = 'd', long, env = "AGENTS_DEPLOYMENT_ID")]
    pub deployment_id: Option<String>,

    /// System prompt
    #[arg(short, long)]
    pub system: Option<String>,

    /// Temperature (0.0 to 2.0)
    #[arg(short, long)]
    pub temperature: Option<f32>,

    /// Maximum tokens to generate
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Top-p sampling parameter
    #[arg(long)]
    pub top_p: Option<f32>,

    /// Seed for deterministic outputs
    #[arg(long)]
    pub seed: Option<i64>,

    /// Show token usage
    #[arg(long)]
    pub show_usage: bool,
}

/// Chat response for output.
#[derive(Debug, Serialize)]
pub struct ChatOutput {
    pub model: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsageOutput>,
}

/// Token usage output.
#[derive(Debug, Serialize)]
pub struct UsageOutput {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Execute the chat command.
pub async fn execute(
    args: ChatArgs,
    base_url: &str,
    api_token: Option<&str>,
    json: bool,
) -> Result<()> {
    let format = OutputFormat::from_json_flag(json);

    let message = if let Some(ref msg) = args.message {
        msg.clone()
    } else {
        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
        input.trim().to_string()
    };

    if message.is_empty() {
        let result: CommandResult<ChatOutput> = CommandResult::failure("No message provided");
        result.print(format)?;
        return Ok(());
    }

    let client = build_client(&args, base_url, api_token)?;
    let request = build_request(&args, &message)?;

    let spinner = if matches!(format, OutputFormat::Text) {
        Some(output::spinner("Generating response..."))
    } else {
        None
    };
    let result = client.chat_completion(&request).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    match result {
        Ok(completion) => {
            if matches!(format, OutputFormat::Json) {
                let chat_output = ChatOutput {
                    model: completion.model.clone(),
                    content: completion.content().to_string(),
                    finish_reason: completion.finish_reason().map(String::from),
                    usage: completion.usage.as_ref().map(|u| UsageOutput {
                        prompt_tokens: u.prompt_tokens,
                        completion_tokens: u.completion_tokens,
                        total_tokens: u.total_tokens,
                    }),
                };
                CommandResult::success(chat_output).print(format)?;
            } else {
                println!("{}", completion.content());

                if args.show_usage {
                    if let Some(usage) = &completion.usage {
                        output::section("Token Usage");
                        output::key_value("Prompt", &usage.prompt_tokens.to_string());
                        output::key_value("Completion", &usage.completion_tokens.to_string());
                        output::key_value("Total", &usage.total_tokens.to_string());
                    }
                }
            }
        }
        Err(e) => {
            let result: CommandResult<ChatOutput> =
                CommandResult::failure(format!("Request failed: {e}"));
            result.print(format)?;
        }
    }

    Ok(())
}

/// Build the SDK client.
fn build_client(args: &ChatArgs, base_url: &str, api_token: Option<&str>) -> Result<Client> {
    let mut builder = Client::builder().base_url(base_url);

    if let Some(ref deployment_id) = args.deployment_id {
        builder = builder.deployment_id(deployment_id);
    }
    if let Some(token) = api_token {
        builder = builder.api_token(token);
    }

    Ok(builder.build()?)
}

/// Build the chat request from the parsed flags.
fn build_request(args: &ChatArgs, message: &str) -> Result<agents_core::ChatRequest> {
    let mut request = agents_core::ChatRequest::builder()
        .model(&args.model)
        .user_message(message);

    if let Some(ref system) = args.system {
        request = request.system_message(system);
    }
    if let Some(temp) = args.temperature {
        request = request.temperature(temp);
    }
    if let Some(max) = args.max_tokens {
        request = request.max_tokens(max);
    }
    if let Some(top_p) = args.top_p {
        request = request.top_p(top_p);
    }
    if let Some(seed) = args.seed {
        request = request.seed(seed);
    }

    Ok(request.build()?)
}
