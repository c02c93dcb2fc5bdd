use tracing_subscriber::EnvFilter;

use hotelbook::cli::{self, StdinPrompter};
use hotelbook::config::AppConfig;
use hotelbook::errors::AppError;
use hotelbook::services::ai::gemini::GeminiProvider;
use hotelbook::services::ai::ollama::OllamaProvider;
use hotelbook::services::ai::LlmProvider;
use hotelbook::services::session::{Session, SessionOutcome};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let llm: Box<dyn LlmProvider> = match config.llm_provider.as_str() {
        "ollama" => {
            tracing::info!(
                "using Ollama LLM provider (url: {}, model: {})",
                config.ollama_url,
                config.ollama_model
            );
            Box::new(OllamaProvider::new(
                config.ollama_url.clone(),
                config.ollama_model.clone(),
            ))
        }
        _ => {
            if config.gemini_api_key.is_empty() {
                return Err(AppError::Config(
                    "GEMINI_API_KEY must be set when LLM_PROVIDER=gemini".to_string(),
                )
                .into());
            }
            tracing::info!("using Gemini LLM provider (model: {})", config.gemini_model);
            Box::new(GeminiProvider::new(
                config.gemini_api_key.clone(),
                config.gemini_model.clone(),
            ))
        }
    };

    cli::print_welcome();

    let initial = loop {
        match cli::read_initial_input()? {
            None => {
                println!("\nSampai jumpa.");
                return Ok(());
            }
            Some(line) if line.trim().is_empty() => {
                println!("Input tidak boleh kosong.");
            }
            Some(line) => break line,
        }
    };

    let mut prompter = StdinPrompter;
    let outcome = Session::new(llm.as_ref(), &mut prompter)
        .run(&initial)
        .await?;

    match outcome {
        SessionOutcome::Finalized(_) => {}
        SessionOutcome::Aborted => println!("Sesi dibatalkan, tidak ada booking yang dibuat."),
    }

    Ok(())
}
