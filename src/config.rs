use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub llm_provider: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub ollama_url: String,
    pub ollama_model: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            llm_provider: env::var("LLM_PROVIDER").unwrap_or_else(|_| "gemini".to_string()),
            // GOOGLE_API_KEY kept as a fallback name for compatibility
            gemini_api_key: env::var("GEMINI_API_KEY")
                .or_else(|_| env::var("GOOGLE_API_KEY"))
                .unwrap_or_default(),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
            ollama_url: env::var("OLLAMA_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            ollama_model: env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3.2".to_string()),
        }
    }
}
