use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::error::{FinanceError, Result};
use crate::settings::Settings;

/// Quick-action questions offered next to the free-text prompt.
pub const SUGGESTED_QUESTIONS: &[&str] = &[
    "Monthly savings tips",
    "Investment basics",
    "Budgeting guide",
    "Expense reduction",
    "Understanding interest",
    "Retirement planning",
];

/// Anything that can turn a prompt into advice text. Never fails: errors come back as text.
pub trait AdviceGenerator {
    fn generate(&self, prompt: &str) -> String;
}

#[derive(Error, Debug)]
pub enum AdviceError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("model endpoint returned HTTP {0}: {1}")]
    Status(u16, String),

    #[error("{0}")]
    Model(String),

    #[error("unexpected response: {0}")]
    Malformed(String),

    #[error("model returned no text")]
    Empty,
}

fn error_text(err: &AdviceError) -> String {
    format!("Error generating advice: {err}")
}

// ---------------------------------------------------------------------------
// Request state
// ---------------------------------------------------------------------------

/// The question for one advice request. A typed question wins over a quick pick.
#[derive(Debug, Clone, PartialEq)]
pub struct AdviceRequest {
    pub question: String,
}

impl AdviceRequest {
    /// `quick` is the 1-based position in [`SUGGESTED_QUESTIONS`].
    pub fn resolve(question: Option<&str>, quick: Option<usize>) -> Result<Self> {
        if let Some(q) = question.map(str::trim).filter(|q| !q.is_empty()) {
            return Ok(Self { question: q.to_string() });
        }
        match quick {
            Some(n) => n
                .checked_sub(1)
                .and_then(|i| SUGGESTED_QUESTIONS.get(i))
                .map(|q| Self { question: q.to_string() })
                .ok_or(FinanceError::UnknownQuickQuestion(n)),
            None => Err(FinanceError::EmptyQuestion),
        }
    }
}

pub fn build_prompt(report: &str, question: &str) -> String {
    format!("Financial Context:\n{report}\n\nUser Question:\n{question}\n\nFinancial Advice:\n")
}

// ---------------------------------------------------------------------------
// Hugging Face Inference API
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    pub endpoint: String,
    pub model: String,
    pub max_length: u32,
    pub token: Option<String>,
}

impl AdvisorConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            endpoint: settings.advice_endpoint.trim_end_matches('/').to_string(),
            model: settings.advice_model.clone(),
            max_length: settings.advice_max_length,
            token: std::env::var("HF_TOKEN").ok().filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn url(&self) -> String {
        format!("{}/{}", self.endpoint, self.model)
    }
}

#[derive(Serialize)]
struct Parameters {
    max_length: u32,
    num_return_sequences: u32,
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: Parameters,
}

#[derive(Deserialize)]
struct Generated {
    generated_text: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Generated(Vec<Generated>),
    Failed { error: String },
}

fn parse_response(body: &str) -> std::result::Result<String, AdviceError> {
    let parsed: InferenceResponse = serde_json::from_str(body)
        .map_err(|_| AdviceError::Malformed(snippet(body)))?;
    match parsed {
        InferenceResponse::Generated(seqs) => seqs
            .into_iter()
            .next()
            .map(|g| g.generated_text)
            .filter(|t| !t.trim().is_empty())
            .ok_or(AdviceError::Empty),
        InferenceResponse::Failed { error } => Err(AdviceError::Model(error)),
    }
}

fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(200) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

pub struct HuggingFaceGenerator {
    client: reqwest::blocking::Client,
    config: AdvisorConfig,
}

impl HuggingFaceGenerator {
    pub fn new(config: AdvisorConfig) -> std::result::Result<Self, AdviceError> {
        let client = reqwest::blocking::Client::builder().build()?;
        Ok(Self { client, config })
    }

    fn try_generate(&self, prompt: &str) -> std::result::Result<String, AdviceError> {
        let body = InferenceRequest {
            inputs: prompt,
            parameters: Parameters {
                max_length: self.config.max_length,
                num_return_sequences: 1,
            },
        };
        let mut req = self.client.post(self.config.url()).json(&body);
        if let Some(token) = &self.config.token {
            req = req.bearer_auth(token);
        }
        let resp = req.send()?;
        let status = resp.status();
        let text = resp.text()?;
        debug!(status = status.as_u16(), bytes = text.len(), "model response");

        if !status.is_success() {
            return match parse_response(&text) {
                Err(AdviceError::Model(msg)) => Err(AdviceError::Model(msg)),
                _ => Err(AdviceError::Status(status.as_u16(), snippet(&text))),
            };
        }
        parse_response(&text)
    }
}

impl AdviceGenerator for HuggingFaceGenerator {
    fn generate(&self, prompt: &str) -> String {
        self.try_generate(prompt).unwrap_or_else(|e| {
            warn!(error = %e, model = %self.config.model, "advice generation failed");
            error_text(&e)
        })
    }
}

static GENERATOR: OnceCell<HuggingFaceGenerator> = OnceCell::new();

/// The process-wide generator, built on first use.
pub fn shared(settings: &Settings) -> std::result::Result<&'static HuggingFaceGenerator, AdviceError> {
    GENERATOR.get_or_try_init(|| {
        let config = AdvisorConfig::from_settings(settings);
        info!(url = %config.url(), "loading advice model client");
        HuggingFaceGenerator::new(config)
    })
}

/// Generate advice for a prompt with the shared generator.
pub fn get_advice(settings: &Settings, prompt: &str) -> String {
    match shared(settings) {
        Ok(generator) => generator.generate(prompt),
        Err(e) => error_text(&e),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    struct Recording {
        prompts: RefCell<Vec<String>>,
    }

    impl AdviceGenerator for Recording {
        fn generate(&self, prompt: &str) -> String {
            self.prompts.borrow_mut().push(prompt.to_string());
            format!("{prompt}Spend less on food.")
        }
    }

    #[test]
    fn test_build_prompt_layout() {
        let prompt = build_prompt("Monthly Income: ₹1.00", "Budgeting guide");
        assert_eq!(
            prompt,
            "Financial Context:\nMonthly Income: ₹1.00\n\nUser Question:\nBudgeting guide\n\nFinancial Advice:\n"
        );
    }

    #[test]
    fn test_generator_receives_prompt() {
        let generator = Recording { prompts: RefCell::new(Vec::new()) };
        let prompt = build_prompt("report", "question");
        let out = generator.generate(&prompt);
        assert!(out.ends_with("Spend less on food."));
        assert_eq!(generator.prompts.borrow().as_slice(), &[prompt]);
    }

    #[test]
    fn test_request_prefers_typed_question() {
        let req = AdviceRequest::resolve(Some("  How do I save?  "), Some(2)).unwrap();
        assert_eq!(req.question, "How do I save?");
    }

    #[test]
    fn test_request_from_quick_pick() {
        assert_eq!(AdviceRequest::resolve(None, Some(1)).unwrap().question, "Monthly savings tips");
        assert_eq!(AdviceRequest::resolve(Some("   "), Some(6)).unwrap().question, "Retirement planning");
    }

    #[test]
    fn test_request_errors() {
        assert!(matches!(AdviceRequest::resolve(None, None), Err(FinanceError::EmptyQuestion)));
        assert!(matches!(AdviceRequest::resolve(Some(""), None), Err(FinanceError::EmptyQuestion)));
        assert!(matches!(AdviceRequest::resolve(None, Some(0)), Err(FinanceError::UnknownQuickQuestion(0))));
        assert!(matches!(AdviceRequest::resolve(None, Some(7)), Err(FinanceError::UnknownQuickQuestion(7))));
    }

    #[test]
    fn test_parse_generated_text() {
        let body = r#"[{"generated_text": "Financial Advice: save more"}]"#;
        assert_eq!(parse_response(body).unwrap(), "Financial Advice: save more");
    }

    #[test]
    fn test_parse_model_error() {
        let body = r#"{"error": "Model gpt2 is currently loading", "estimated_time": 20.0}"#;
        let err = parse_response(body).unwrap_err();
        assert_eq!(
            error_text(&err),
            "Error generating advice: Model gpt2 is currently loading"
        );
    }

    #[test]
    fn test_parse_empty_and_malformed() {
        assert!(matches!(parse_response("[]"), Err(AdviceError::Empty)));
        assert!(matches!(parse_response("<html>"), Err(AdviceError::Malformed(_))));
        assert!(matches!(parse_response(r#"{"foo": 1}"#), Err(AdviceError::Malformed(_))));
    }

    #[test]
    fn test_unreachable_endpoint_becomes_message() {
        let generator = HuggingFaceGenerator::new(AdvisorConfig {
            endpoint: "http://127.0.0.1:9".to_string(),
            model: "gpt2".to_string(),
            max_length: 100,
            token: None,
        })
        .unwrap();
        let out = generator.generate("prompt");
        assert!(out.starts_with("Error generating advice: "), "{out}");
    }

    #[test]
    fn test_shared_generator_is_built_once() {
        let first = Settings {
            advice_model: "first-model".to_string(),
            ..Settings::default()
        };
        let second = Settings {
            advice_model: "second-model".to_string(),
            advice_endpoint: "http://127.0.0.1:9".to_string(),
            ..Settings::default()
        };
        let a = shared(&first).unwrap();
        let b = shared(&second).unwrap();
        assert!(std::ptr::eq(a, b));
        assert_eq!(b.config.model, "first-model");
        assert_eq!(b.config.url(), a.config.url());
    }

    #[test]
    fn test_config_url() {
        let settings = Settings {
            advice_endpoint: "https://example.test/models/".to_string(),
            advice_model: "distilgpt2".to_string(),
            ..Settings::default()
        };
        assert_eq!(AdvisorConfig::from_settings(&settings).url(), "https://example.test/models/distilgpt2");
    }

    #[test]
    fn test_snippet_truncates() {
        let long = "x".repeat(500);
        assert_eq!(snippet(&long).len(), 203);
        assert_eq!(snippet(" short "), "short");
    }
}
