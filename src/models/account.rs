use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountType {
    Checking,
    Savings,
    CreditCard,
    Investment,
    Cash,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Checking => "checking",
            Self::Savings => "savings",
            Self::CreditCard => "credit_card",
            Self::Investment => "investment",
            Self::Cash => "cash",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "checking" => Some(Self::Checking),
            "savings" => Some(Self::Savings),
            "credit_card" | "creditcard" | "credit" => Some(Self::CreditCard),
            "investment" => Some(Self::Investment),
            "cash" => Some(Self::Cash),
            _ => None,
        }
    }

    /// Display name, e.g. "Credit Card".
    pub fn label(&self) -> &'static str {
        match self {
            Self::Checking => "Checking",
            Self::Savings => "Savings",
            Self::CreditCard => "Credit Card",
            Self::Investment => "Investment",
            Self::Cash => "Cash",
        }
    }

    pub fn all() -> &'static [AccountType] {
        &[
            Self::Checking,
            Self::Savings,
            Self::CreditCard,
            Self::Investment,
            Self::Cash,
        ]
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone)]
pub struct Account {
    pub id: Option<i64>,
    pub name: String,
    pub account_type: AccountType,
    pub currency: String,
    pub initial_balance: Decimal,
    pub created_at: String,
}

impl Account {
    pub fn new(name: String, account_type: AccountType) -> Self {
        Self {
            id: None,
            name,
            account_type,
            currency: "BRL".to_string(),
            initial_balance: Decimal::ZERO,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
