// ABOUTME: Tax assistant gateway: receipt OCR, dashboard advice and report drafting
// ABOUTME: Advice and report calls never fail; they fall back to fixed Ukrainian text

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use taxify_core::{Currency, IncomeDraft, UserProfile};
use thiserror::Error;
use tracing::{error, warn};

use crate::data_uri::{DataUri, DataUriError};
use crate::prompts::{
    build_advice_prompt, build_report_prompt, OCR_INSTRUCTION, SYSTEM_INSTRUCTION_ADVISOR,
    SYSTEM_INSTRUCTION_OCR, SYSTEM_INSTRUCTION_REPORT,
};
use crate::service::{AIService, AIServiceError};

pub const OCR_FAILURE_MESSAGE: &str = "Не вдалося обробити документ.";
pub const MANUAL_ENTRY_FALLBACK_MESSAGE: &str =
    "Не вдалося розпізнати документ. Будь ласка, введіть дані вручну.";
pub const ADVICE_EMPTY_FALLBACK: &str = "Статус нормальний.";
pub const ADVICE_ERROR_FALLBACK: &str = "Система працює. Слідкуйте за лімітами.";
pub const REPORT_EMPTY_FALLBACK: &str = "Помилка генерації звіту.";
pub const REPORT_ERROR_FALLBACK: &str = "Сервіс звітності тимчасово недоступний.";

const ADVICE_MAX_TOKENS: u32 = 150;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Не вдалося обробити документ.")]
    DocumentNotRecognized(#[source] AIServiceError),

    #[error("Не вдалося обробити документ.")]
    InvalidDocument(#[from] DataUriError),
}

/// Income fields read off a receipt or invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedIncome {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub currency: Currency,
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

/// Models often answer `"description": null` when nothing is legible
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ExtractedIncome {
    /// Prefills the income form; the document is kept as the record's source
    pub fn into_draft(self, document: Option<String>) -> IncomeDraft {
        IncomeDraft {
            amount: self.amount.normalize().to_string(),
            currency: self.currency,
            date: self.date.format("%Y-%m-%d").to_string(),
            description: self.description,
            document,
        }
    }
}

pub struct TaxAssistant {
    service: AIService,
}

impl TaxAssistant {
    pub fn new(service: AIService) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &AIService {
        &self.service
    }

    /// Reads amount, currency, date and description from a document data URI
    pub async fn extract_income_from_image(
        &self,
        data_uri: &str,
    ) -> Result<ExtractedIncome, GatewayError> {
        let document = DataUri::parse(data_uri).map_err(|e| {
            error!("Rejected document for OCR: {}", e);
            e
        })?;

        let response = self
            .service
            .generate_structured_from_document::<ExtractedIncome>(
                &document,
                OCR_INSTRUCTION.to_string(),
                Some(SYSTEM_INSTRUCTION_OCR.to_string()),
            )
            .await
            .map_err(|e| {
                error!("OCR extraction failed: {}", e);
                GatewayError::DocumentNotRecognized(e)
            })?;

        Ok(response.data)
    }

    /// Two-sentence status for the dashboard
    pub async fn generate_tax_advice(&self, profile: &UserProfile, total_income: Decimal) -> String {
        let prompt = build_advice_prompt(profile, total_income);
        match self
            .service
            .generate_text(
                prompt,
                Some(SYSTEM_INSTRUCTION_ADVISOR.to_string()),
                Some(ADVICE_MAX_TOKENS),
            )
            .await
        {
            Ok(response) if !response.data.trim().is_empty() => response.data.trim().to_string(),
            Ok(_) | Err(AIServiceError::InvalidResponse) => ADVICE_EMPTY_FALLBACK.to_string(),
            Err(e) => {
                warn!("Tax advice unavailable: {}", e);
                ADVICE_ERROR_FALLBACK.to_string()
            }
        }
    }

    pub async fn generate_report_content(&self, report_type: &str, data_summary: &str) -> String {
        let prompt = build_report_prompt(report_type, data_summary);
        match self
            .service
            .generate_text(prompt, Some(SYSTEM_INSTRUCTION_REPORT.to_string()), None)
            .await
        {
            Ok(response) if !response.data.trim().is_empty() => response.data,
            Ok(_) | Err(AIServiceError::InvalidResponse) => REPORT_EMPTY_FALLBACK.to_string(),
            Err(e) => {
                warn!("Report generation unavailable: {}", e);
                REPORT_ERROR_FALLBACK.to_string()
            }
        }
    }
}
