//! Writes a blog post with a real LLM provider.
//!
//! ```text
//! BLOGFLOW_PROVIDER=ollama BLOGFLOW_LANGUAGE=french \
//!     cargo run --example blog_flow --features llm -- "the history of tea"
//! ```
//!
//! Settings come from the environment (or a `.env` file):
//! - `BLOGFLOW_PROVIDER`: `ollama` (default) or `deepseek`
//! - `BLOGFLOW_MODEL`, `BLOGFLOW_HOST`: override the provider defaults
//! - `DEEPSEEK_API_KEY`: required for `deepseek`
//! - `BLOGFLOW_LANGUAGE`: `hindi` or `french` to translate the post
//!
//! Set `RUST_LOG=blogflow=debug` to follow the run step by step.

use blogflow::prelude::*;
use blogflow::MemoryTelemetry;
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    env_logger::init();

    let topic = std::env::args()
        .skip(1)
        .collect::<Vec<_>>()
        .join(" ");
    if topic.trim().is_empty() {
        eprintln!("usage: blog_flow <topic>");
        std::process::exit(2);
    }

    let config = BlogConfig::from_env()?;
    let client = Client::from_config(&config)?;
    log::info!("Using model {}", client.model_name());

    let flow = match config.default_language {
        Some(_) => language_flow(Arc::new(client)),
        None => topic_flow(Arc::new(client)),
    };

    let telemetry = MemoryTelemetry::new();
    let mut state = config.initial_state(topic);
    let action = flow.run_with_telemetry(&mut state, Some(&telemetry))?;

    for trace in telemetry.traces() {
        log::info!("step {} -> {}", trace.step, trace.action);
    }
    log::info!("Finished with action '{}'", action);

    println!("# {}\n", state.title());
    println!("{}", state.content());
    Ok(())
}
