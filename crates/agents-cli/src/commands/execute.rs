//! Execute command - run an agent custom model as an asynchronous job.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::io::{self, BufRead};
use std::time::Duration;

use agents_core::JobRequest;
use agents_sdk::Client;

use crate::output::{self, CommandResult, OutputFormat};

/// Arguments for the execute command.
#[derive(Args, Debug)]
pub struct ExecuteArgs {
    /// Custom model ID of the agent to run
    #[arg(short = 'm', long, env = "AGENTS_CUSTOM_MODEL_ID")]
    pub custom_model_id: String,

    /// Prompt to send (if not provided, reads from stdin)
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Delay between status polls (e.g. "1s", "500ms")
    #[arg(long, value_parser = humantime::parse_duration, default_value = "1s")]
    pub poll_interval: Duration,

    /// Give up waiting after this long (e.g. "5m"); waits forever when unset
    #[arg(long, value_parser = humantime::parse_duration)]
    pub poll_deadline: Option<Duration>,

    /// Request timeout
    #[arg(long, value_parser = humantime::parse_duration, default_value = "90s")]
    pub timeout: Duration,
}

/// Agent run output.
#[derive(Debug, Serialize)]
pub struct ExecuteOutput {
    pub custom_model_id: String,
    pub content: String,
    pub application_error: bool,
}

/// Execute the execute command.
pub async fn execute(
    args: ExecuteArgs,
    base_url: &str,
    api_token: Option<&str>,
    json: bool,
) -> Result<()> {
    let format = OutputFormat::from_json_flag(json);

    let prompt = match read_prompt(&args)? {
        Some(prompt) => prompt,
        None => {
            let result: CommandResult<ExecuteOutput> = CommandResult::failure("No prompt provided");
            result.print(format)?;
            return Ok(());
        }
    };

    let client = build_client(&args, base_url, api_token)?;
    let request = JobRequest::from_prompt(&prompt);

    let spinner = if matches!(format, OutputFormat::Text) {
        Some(output::spinner("Waiting for the agent to finish..."))
    } else {
        None
    };
    let result = client.run_agent(&args.custom_model_id, &request).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    match result {
        Ok(outcome) => {
            let application_error = outcome.is_application_error();
            let content = outcome.into_text();

            if matches!(format, OutputFormat::Json) {
                let result = CommandResult::success(ExecuteOutput {
                    custom_model_id: args.custom_model_id,
                    content,
                    application_error,
                });
                result.print(format)?;
            } else if application_error {
                // The agent itself failed; the payload is the diagnosis
                output::error(&content);
            } else {
                println!("{content}");
            }
        }
        Err(e) => {
            let result: CommandResult<ExecuteOutput> =
                CommandResult::failure(format!("Agent run failed: {e}"));
            result.print(format)?;
        }
    }

    Ok(())
}

/// Build the SDK client for the job poller.
fn build_client(args: &ExecuteArgs, base_url: &str, api_token: Option<&str>) -> Result<Client> {
    let mut builder = Client::builder()
        .base_url(base_url)
        .timeout(args.timeout)
        .poll_interval(args.poll_interval);

    if let Some(deadline) = args.poll_deadline {
        builder = builder.poll_deadline(deadline);
    }
    if let Some(token) = api_token {
        builder = builder.api_token(token);
    }

    Ok(builder.build()?)
}

/// Read the prompt from the flag or stdin.
fn read_prompt(args: &ExecuteArgs) -> Result<Option<String>> {
    let prompt = if let Some(ref prompt) = args.prompt {
        prompt.clone()
    } else {
        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
        input.trim().to_string()
    };

    if prompt.is_empty() {
        Ok(None)
    } else {
        Ok(Some(prompt))
    }
}
