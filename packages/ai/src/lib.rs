// ABOUTME: LLM gateway for receipt OCR, tax advice and report drafting
// ABOUTME: Messages API client, data URI handling, prompts and the tax assistant

pub mod data_uri;
pub mod gateway;
pub mod prompts;
pub mod service;

// Re-export service types
pub use service::{strip_code_fences, AIResponse, AIService, AIServiceError, AIServiceResult, Usage};

// Re-export gateway types
pub use data_uri::{DataUri, DataUriError};
pub use gateway::{
    ExtractedIncome, GatewayError, TaxAssistant, MANUAL_ENTRY_FALLBACK_MESSAGE,
    OCR_FAILURE_MESSAGE,
};
