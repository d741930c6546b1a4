//! Income, expense and fee domain models.
//!
//! All monetary amounts are `i64` in the smallest currency unit. Storage is
//! currency-agnostic; display formatting is a client concern.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Payment status of a fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeStatus {
    Paid,
    Pending,
    Overdue,
    Partial,
}

impl FeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeeStatus::Paid => "paid",
            FeeStatus::Pending => "pending",
            FeeStatus::Overdue => "overdue",
            FeeStatus::Partial => "partial",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "paid" => Some(FeeStatus::Paid),
            "pending" => Some(FeeStatus::Pending),
            "overdue" => Some(FeeStatus::Overdue),
            "partial" => Some(FeeStatus::Partial),
            _ => None,
        }
    }
}

impl std::fmt::Display for FeeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request to record a donation or other income.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpsertIncomeRequest {
    #[validate(length(min = 1, max = 100, message = "Donor name is required"))]
    pub donor_name: String,

    #[validate(custom(function = "shared::validation::validate_contact_number"))]
    pub donor_contact: Option<String>,

    #[validate(custom(function = "shared::validation::validate_positive_amount"))]
    pub amount: i64,

    #[validate(length(min = 1, max = 50, message = "Income type is required"))]
    pub income_type: String,

    #[validate(length(min = 1, max = 50, message = "Frequency is required"))]
    pub frequency: String,

    #[validate(custom(function = "shared::validation::validate_record_date"))]
    pub date: NaiveDate,

    #[validate(length(max = 50, message = "Receipt number must be at most 50 characters"))]
    pub receipt_number: Option<String>,

    #[validate(length(max = 500, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,
}

/// Income as returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct IncomeResponse {
    pub id: Uuid,
    pub donor_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donor_contact: Option<String>,
    pub amount: i64,
    pub income_type: String,
    pub frequency: String,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Request to record an expense.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpsertExpenseRequest {
    #[validate(length(min = 1, max = 50, message = "Expense type is required"))]
    pub expense_type: String,

    #[validate(length(max = 50, message = "Category must be at most 50 characters"))]
    pub category: Option<String>,

    #[validate(custom(function = "shared::validation::validate_positive_amount"))]
    pub amount: i64,

    #[validate(custom(function = "shared::validation::validate_record_date"))]
    pub date: NaiveDate,

    #[validate(length(min = 1, max = 100, message = "Recipient name is required"))]
    pub recipient_name: String,

    #[validate(custom(function = "shared::validation::validate_contact_number"))]
    pub recipient_contact: Option<String>,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 50, message = "Receipt number must be at most 50 characters"))]
    pub receipt_number: Option<String>,

    #[validate(length(max = 50, message = "Payment method must be at most 50 characters"))]
    pub payment_method: Option<String>,
}

/// Expense as returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ExpenseResponse {
    pub id: Uuid,
    pub expense_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub amount: i64,
    pub date: NaiveDate,
    pub recipient_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Request to create or update a fee.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpsertFeeRequest {
    pub student_id: Option<Uuid>,

    #[validate(length(min = 1, max = 50, message = "Fee type is required"))]
    pub fee_type: String,

    #[validate(custom(function = "shared::validation::validate_academic_year"))]
    pub academic_year: String,

    #[validate(custom(function = "shared::validation::validate_positive_amount"))]
    pub amount: i64,

    pub due_date: NaiveDate,

    pub status: FeeStatus,
}

/// Fee as returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FeeResponse {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<Uuid>,
    pub fee_type: String,
    pub academic_year: String,
    pub amount: i64,
    pub due_date: NaiveDate,
    pub status: FeeStatus,
    pub created_at: DateTime<Utc>,
}

/// Date-range / type filter shared by income and expense list endpoints.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct LedgerFilter {
    /// Entry type; absent or "all" means no type filter.
    pub entry_type: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl LedgerFilter {
    /// The effective type filter, treating "all" as no filter.
    pub fn type_filter(&self) -> Option<&str> {
        match self.entry_type.as_deref() {
            None | Some("all") | Some("") => None,
            Some(t) => Some(t),
        }
    }

    /// Human-readable filter description used in export headers.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(t) = self.type_filter() {
            parts.push(format!("Type: {}", t));
        }
        if let Some(from) = self.date_from {
            parts.push(format!("From: {}", from.format("%d/%m/%Y")));
        }
        if let Some(to) = self.date_to {
            parts.push(format!("To: {}", to.format("%d/%m/%Y")));
        }
        parts.join("  ")
    }
}

/// Totals backing the dashboard summary cards.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FinancialSummaryResponse {
    pub total_income: i64,
    pub total_expenses: i64,
    pub balance: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn income_requires_positive_amount() {
        let mut request = UpsertIncomeRequest {
            donor_name: "Hamid".to_string(),
            donor_contact: None,
            amount: 1000,
            income_type: "donation".to_string(),
            frequency: "one_time".to_string(),
            date: day(2024, 3, 1),
            receipt_number: None,
            notes: None,
        };
        assert!(request.validate().is_ok());

        request.amount = 0;
        assert!(request.validate().is_err());
        request.amount = -500;
        assert!(request.validate().is_err());
    }

    #[test]
    fn expense_requires_recipient() {
        let request = UpsertExpenseRequest {
            expense_type: "utility".to_string(),
            category: None,
            amount: 2500,
            date: day(2024, 3, 1),
            recipient_name: String::new(),
            recipient_contact: None,
            description: None,
            receipt_number: None,
            payment_method: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn fee_status_round_trips() {
        for status in [
            FeeStatus::Paid,
            FeeStatus::Pending,
            FeeStatus::Overdue,
            FeeStatus::Partial,
        ] {
            assert_eq!(FeeStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(FeeStatus::parse("waived"), None);
    }

    #[test]
    fn ledger_filter_treats_all_as_no_filter() {
        let filter = LedgerFilter {
            entry_type: Some("all".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.type_filter(), None);

        let filter = LedgerFilter {
            entry_type: Some("donation".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.type_filter(), Some("donation"));
    }

    #[test]
    fn filter_description_lists_active_parts() {
        let filter = LedgerFilter {
            entry_type: Some("zakat".to_string()),
            date_from: Some(day(2024, 1, 1)),
            date_to: None,
        };
        let text = filter.describe();
        assert!(text.contains("Type: zakat"));
        assert!(text.contains("From: 01/01/2024"));
        assert!(!text.contains("To:"));
    }
}
