// ABOUTME: System instructions and prompt builders for the tax assistant
// ABOUTME: All model-facing text is Ukrainian except the OCR instruction

use rust_decimal::Decimal;
use taxify_core::constants::{annual_limit, MILITARY_LEVY_FIXED, MILITARY_LEVY_RATE_GROUP_3};
use taxify_core::tax::limit_usage_percent;
use taxify_core::{FopGroup, UserProfile};

pub const SYSTEM_INSTRUCTION_OCR: &str = r#"Ти асистент бухгалтера ФОП в Україні. Ти читаєш чеки, рахунки та банківські виписки.
Знайди в документі суму доходу, валюту, дату операції та короткий опис.
Відповідай ЛИШЕ одним JSON-об'єктом без пояснень за схемою:
{
  "amount": number,
  "currency": "UAH" | "USD" | "EUR",
  "date": "YYYY-MM-DD",
  "description": string
}
Поля amount, currency та date обов'язкові. Якщо валюта не вказана, використовуй "UAH"."#;

pub const SYSTEM_INSTRUCTION_ADVISOR: &str = "Ти дружній податковий консультант для ФОП в Україні у 2026 році. \
Відповідай коротко, українською мовою, без юридичних застережень і без вигаданих цифр.";

pub const SYSTEM_INSTRUCTION_REPORT: &str = "Ти бухгалтер, який готує звітність ФОП в Україні. \
Формуй документи українською мовою, в офіційно-діловому стилі, з чіткими заголовками та підсумковими сумами. \
Використовуй лише надані дані.";

/// Instruction sent next to the scanned document
pub const OCR_INSTRUCTION: &str =
    "Extract amount, currency, date, and description. Return strictly JSON.";

fn tax_context(profile: &UserProfile, total_income: Decimal) -> String {
    match profile.group {
        FopGroup::Group3 => {
            let single_tax = total_income * profile.tax_rate.fraction();
            let military_levy = total_income * MILITARY_LEVY_RATE_GROUP_3;
            format!(
                "Єдиний податок: {} грн. Військовий збір (1%): {} грн.",
                single_tax.round_dp(0),
                military_levy.round_dp(0)
            )
        }
        FopGroup::Group1 | FopGroup::Group2 => {
            format!("Фіксований Військовий збір: {} грн/міс.", MILITARY_LEVY_FIXED)
        }
    }
}

pub fn build_advice_prompt(profile: &UserProfile, total_income: Decimal) -> String {
    let limit = annual_limit(profile.group);
    let percent_used = limit_usage_percent(total_income, limit).round_dp(2);

    format!(
        "Профіль користувача (2026 рік):
- Група ФОП: {group}
- Ставка податку: {rate}%
- Наявність співробітників: {employees}

Поточний стан:
- Загальний дохід (з початку року): {total} UAH
- Розрахункові податки: {taxes}
- Ліміт групи: {limit} UAH
- Використано ліміту: {percent:.2}%

Надай короткий (2 речення) статус українською мовою.
Якщо ліміт близький (>80%), попередь ввічливо.",
        group = profile.group.number(),
        rate = profile.tax_rate.percent(),
        employees = if profile.has_employees { "Так" } else { "Ні" },
        total = total_income,
        taxes = tax_context(profile, total_income),
        limit = limit,
        percent = percent_used,
    )
}

pub fn build_report_prompt(report_type: &str, data_summary: &str) -> String {
    format!(
        "Згенеруй текст для звіту: \"{report_type}\".
Дані для звіту:
{data_summary}

Сформуй це як офіційний текстовий документ з заголовками та підсумками."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use taxify_core::TaxRate;

    #[test]
    fn test_advice_prompt_group_3() {
        let profile = UserProfile {
            group: FopGroup::Group3,
            tax_rate: TaxRate::Percent5,
            has_employees: true,
            ..UserProfile::default()
        };
        let prompt = build_advice_prompt(&profile, dec!(100000));

        assert!(prompt.contains("- Група ФОП: 3"));
        assert!(prompt.contains("- Ставка податку: 5%"));
        assert!(prompt.contains("- Наявність співробітників: Так"));
        assert!(prompt.contains("Єдиний податок: 5000 грн. Військовий збір (1%): 1000 грн."));
        assert!(prompt.contains("- Ліміт групи: 10091049 UAH"));
        assert!(prompt.contains("- Використано ліміту: 0.99%"));
        assert!(prompt.contains("(>80%)"));
    }

    #[test]
    fn test_advice_prompt_fixed_group() {
        let profile = UserProfile {
            group: FopGroup::Group2,
            ..UserProfile::default()
        };
        let prompt = build_advice_prompt(&profile, Decimal::ZERO);

        assert!(prompt.contains("Фіксований Військовий збір: 864.70 грн/міс."));
        assert!(prompt.contains("- Наявність співробітників: Ні"));
        assert!(prompt.contains("- Використано ліміту: 0.00%"));
    }

    #[test]
    fn test_report_prompt() {
        let prompt = build_report_prompt("Звіт_ЄСВ", "Група: 3");
        assert!(prompt.starts_with("Згенеруй текст для звіту: \"Звіт_ЄСВ\"."));
        assert!(prompt.contains("Група: 3"));
    }
}
