// ABOUTME: Onboarding answers and their validation
// ABOUTME: Group, single-tax rate (group 3 only) and employee flag

use serde::{Deserialize, Serialize};
use taxify_core::{FopGroup, TaxRate};

use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingInput {
    pub group: FopGroup,
    /// Only meaningful for group 3; defaults to 5%
    pub tax_rate: Option<TaxRate>,
    pub has_employees: bool,
}

impl OnboardingInput {
    pub fn effective_tax_rate(&self) -> TaxRate {
        match self.group {
            FopGroup::Group3 => self.tax_rate.unwrap_or(TaxRate::Percent5),
            FopGroup::Group1 | FopGroup::Group2 => TaxRate::Percent5,
        }
    }
}

pub(crate) fn validate_onboarding(input: &OnboardingInput) -> AuthResult<()> {
    // Group 1 entrepreneurs may not hire
    if input.group == FopGroup::Group1 && input.has_employees {
        return Err(AuthError::InvalidOnboarding(
            "Група 1 не може мати найманих працівників".to_string(),
        ));
    }
    if input.group != FopGroup::Group3 && input.tax_rate == Some(TaxRate::Percent3) {
        return Err(AuthError::InvalidOnboarding(
            "Ставка 3% (з ПДВ) доступна лише для 3 групи".to_string(),
        ));
    }
    Ok(())
}
