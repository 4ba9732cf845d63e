// ABOUTME: Core types, constants and tax calculations for Taxify
// ABOUTME: Foundational package shared by storage, AI gateway, reports and the CLI

pub mod constants;
pub mod tax;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export main types
pub use types::{
    Alert, AlertLevel, Currency, FopGroup, Income, IncomeSource, TaxRate, UserProfile,
};

// Re-export calculations
pub use tax::{summarize, tax_obligation, total_income, ObligationKind, TaxObligation, TaxSummary};

// Re-export utilities
pub use utils::{generate_income_id, today};

// Re-export validation
pub use validation::{IncomeDraft, ValidationError};
