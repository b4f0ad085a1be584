use serde::{Deserialize, Serialize};

mod amount;

pub use amount::{Amount, AmountError};

pub type UserId = i64;
pub type AccountId = i64;
pub type CategoryId = i64;
pub type BudgetId = i64;
pub type TransactionId = i64;

/// Body of a non-2xx backend response.
///
/// The backend reports failures as `{"detail": "..."}`; some proxies use
/// `{"error": "..."}`. `detail` may also be a structured validation list, so
/// it is kept as raw JSON.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Returns the human-readable message, if the body carries one.
    pub fn message(self) -> Option<String> {
        match self.detail {
            Some(serde_json::Value::String(detail)) if !detail.trim().is_empty() => Some(detail),
            _ => self.error.filter(|error| !error.trim().is_empty()),
        }
    }
}

pub mod user {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct User {
        pub id: UserId,
        pub username: String,
        pub email: String,
        pub created_at: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SignupNew {
        pub username: String,
        pub email: String,
        pub password: String,
    }

    /// Login accepts either an email or a username next to the password.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Login {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub email: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub username: Option<String>,
        pub password: String,
    }
}

pub mod account {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Account {
        pub id: AccountId,
        pub name: String,
        #[serde(rename = "type")]
        pub kind: String,
        #[serde(default)]
        pub description: Option<String>,
        pub starting_balance: Amount,
        pub current_balance: Amount,
        pub user_id: UserId,
        #[serde(default)]
        pub created_at: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountNew {
        pub name: String,
        #[serde(rename = "type")]
        pub kind: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
        pub starting_balance: Amount,
        pub user_id: UserId,
    }

    /// Account types offered by the create form. The backend stores the type
    /// as free text, so listed accounts keep it as a `String`.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub enum AccountKind {
        #[default]
        Checking,
        Savings,
        CreditCard,
        Investment,
        Cash,
    }

    impl AccountKind {
        pub const ALL: [AccountKind; 5] = [
            Self::Checking,
            Self::Savings,
            Self::CreditCard,
            Self::Investment,
            Self::Cash,
        ];

        pub fn as_str(self) -> &'static str {
            match self {
                Self::Checking => "checking",
                Self::Savings => "savings",
                Self::CreditCard => "credit_card",
                Self::Investment => "investment",
                Self::Cash => "cash",
            }
        }

        pub fn label(self) -> &'static str {
            match self {
                Self::Checking => "Checking",
                Self::Savings => "Savings",
                Self::CreditCard => "Credit Card",
                Self::Investment => "Investment",
                Self::Cash => "Cash",
            }
        }
    }
}

pub mod category {
    use super::*;

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum CategoryKind {
        Income,
        #[default]
        Expense,
    }

    impl CategoryKind {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Income => "income",
                Self::Expense => "expense",
            }
        }

        pub fn toggle(self) -> Self {
            match self {
                Self::Income => Self::Expense,
                Self::Expense => Self::Income,
            }
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Category {
        pub id: CategoryId,
        pub name: String,
        #[serde(rename = "type")]
        pub kind: CategoryKind,
        #[serde(default)]
        pub description: Option<String>,
        pub user_id: UserId,
        #[serde(default)]
        pub created_at: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryNew {
        pub name: String,
        #[serde(rename = "type")]
        pub kind: CategoryKind,
        pub user_id: UserId,
    }
}

pub mod budget {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Budget {
        pub id: BudgetId,
        pub name: String,
        pub target_amount: Amount,
        pub period: String,
        pub user_id: UserId,
        pub category_id: CategoryId,
        /// Server-computed; `current_spent + remaining == target_amount`.
        pub current_spent: Amount,
        pub remaining: Amount,
        #[serde(default)]
        pub created_at: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetNew {
        pub name: String,
        pub target_amount: Amount,
        pub period: String,
        pub user_id: UserId,
        pub category_id: CategoryId,
    }

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub enum BudgetPeriod {
        #[default]
        Monthly,
        Weekly,
        Yearly,
    }

    impl BudgetPeriod {
        pub const ALL: [BudgetPeriod; 3] = [Self::Monthly, Self::Weekly, Self::Yearly];

        pub fn as_str(self) -> &'static str {
            match self {
                Self::Monthly => "monthly",
                Self::Weekly => "weekly",
                Self::Yearly => "yearly",
            }
        }
    }
}

pub mod transaction {
    use super::*;
    use chrono::NaiveDate;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Transaction {
        pub id: TransactionId,
        pub amount: Amount,
        /// Calendar date, `YYYY-MM-DD`.
        pub date: NaiveDate,
        #[serde(default)]
        pub description: Option<String>,
        pub is_income: bool,
        pub user_id: UserId,
        pub account_id: AccountId,
        #[serde(default)]
        pub category_id: Option<CategoryId>,
        #[serde(default)]
        pub created_at: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        pub amount: Amount,
        pub date: NaiveDate,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
        pub is_income: bool,
        pub user_id: UserId,
        pub account_id: AccountId,
        pub category_id: Option<CategoryId>,
    }
}

pub mod dashboard {
    use super::*;

    /// Income and expenses for the current month.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Summary {
        pub income: Amount,
        pub expenses: Amount,
        #[serde(default)]
        pub net: Option<Amount>,
        /// `YYYY-MM` of the period the backend summarized.
        #[serde(default)]
        pub month: Option<String>,
    }

    impl Summary {
        pub fn net(&self) -> Amount {
            self.net.unwrap_or(self.income - self.expenses)
        }
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct CategoryTotal {
        pub category: String,
        pub total: Amount,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct MonthTotal {
        pub month: String,
        pub income: Amount,
        pub expenses: Amount,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct BudgetSummary {
        pub budget_id: BudgetId,
        pub name: String,
        pub spent: Amount,
        pub target: Amount,
        /// Percentage of `target` already spent, as reported by the backend.
        pub pct: f64,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum BudgetStatus {
        OnTrack,
        Approaching,
        Over,
    }

    impl BudgetSummary {
        pub fn status(&self) -> BudgetStatus {
            if self.pct >= 100.0 {
                BudgetStatus::Over
            } else if self.pct >= 75.0 {
                BudgetStatus::Approaching
            } else {
                BudgetStatus::OnTrack
            }
        }
    }
}
