//! Expense domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitledger_shared::types::{ExpenseId, UserId};

/// How an expense amount is divided among participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMethod {
    /// Every registered user owes the same share.
    Equal,
    /// Caller states each participant's amount.
    Exact,
    /// Caller states each participant's percentage of the total.
    Percentage,
}

impl SplitMethod {
    /// Stored and wire form of the method.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Exact => "exact",
            Self::Percentage => "percentage",
        }
    }
}

impl std::fmt::Display for SplitMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SplitMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equal" => Ok(Self::Equal),
            "exact" => Ok(Self::Exact),
            "percentage" => Ok(Self::Percentage),
            other => Err(format!("unknown split method: {other}")),
        }
    }
}

/// One caller-stated amount under [`SplitMethod::Exact`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExactShare {
    /// Participant.
    pub user: UserId,
    /// Amount owed by the participant.
    pub split_amount: Decimal,
}

/// One caller-stated percentage under [`SplitMethod::Percentage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentageShare {
    /// Participant.
    pub user: UserId,
    /// Share of the total, in percent.
    pub percentage: Decimal,
}

/// Input for recording an expense.
///
/// An absent share list and an empty one mean the same thing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateExpenseInput {
    /// Authenticated user who paid.
    pub owner: UserId,
    /// Total amount paid.
    pub amount: Decimal,
    /// Short label.
    pub title: String,
    /// Free text, may be empty.
    pub description: String,
    /// Split method.
    pub split_method: SplitMethod,
    /// Shares for [`SplitMethod::Exact`].
    pub exact_splits: Vec<ExactShare>,
    /// Shares for [`SplitMethod::Percentage`].
    pub percentage_splits: Vec<PercentageShare>,
}

impl CreateExpenseInput {
    /// Participants named by the list the method reads, in input order.
    ///
    /// Empty for [`SplitMethod::Equal`], whose participants come from the directory.
    #[must_use]
    pub fn named_participants(&self) -> Vec<UserId> {
        match self.split_method {
            SplitMethod::Equal => Vec::new(),
            SplitMethod::Exact => self.exact_splits.iter().map(|s| s.user).collect(),
            SplitMethod::Percentage => self.percentage_splits.iter().map(|s| s.user).collect(),
        }
    }
}

/// A participant's computed share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputedSplit {
    /// Participant.
    pub user: UserId,
    /// Amount owed, at money scale.
    pub split_amount: Decimal,
}

/// A validated expense with its splits, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpensePlan {
    /// Id the expense row will carry.
    pub id: ExpenseId,
    /// Payer.
    pub owner: UserId,
    /// Total amount.
    pub amount: Decimal,
    /// Short label.
    pub title: String,
    /// Free text.
    pub description: String,
    /// Method the splits were computed with.
    pub split_method: SplitMethod,
    /// One entry per participant, in participant order.
    pub splits: Vec<ComputedSplit>,
}

impl ExpensePlan {
    /// Sum of all split amounts.
    #[must_use]
    pub fn split_total(&self) -> Decimal {
        self.splits.iter().map(|s| s.split_amount).sum()
    }

    /// Difference between the total and the splits.
    ///
    /// Zero for exact splits; may be a few cents for equal and percentage
    /// splits because each share is rounded on its own.
    #[must_use]
    pub fn rounding_residue(&self) -> Decimal {
        self.amount - self.split_total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_split_method_round_trips_through_str() {
        for method in [SplitMethod::Equal, SplitMethod::Exact, SplitMethod::Percentage] {
            assert_eq!(method.to_string().parse::<SplitMethod>().unwrap(), method);
        }
        assert!("EQUAL".parse::<SplitMethod>().is_err());
    }

    #[test]
    fn test_split_method_serde() {
        let json = serde_json::to_string(&SplitMethod::Percentage).unwrap();
        assert_eq!(json, "\"percentage\"");
        let parsed: SplitMethod = serde_json::from_str("\"exact\"").unwrap();
        assert_eq!(parsed, SplitMethod::Exact);
    }

    #[test]
    fn test_named_participants_reads_method_list() {
        let a = UserId::new();
        let b = UserId::new();
        let mut input = CreateExpenseInput {
            owner: a,
            amount: dec!(10),
            title: "t".to_string(),
            description: String::new(),
            split_method: SplitMethod::Exact,
            exact_splits: vec![
                ExactShare { user: b, split_amount: dec!(4) },
                ExactShare { user: a, split_amount: dec!(6) },
            ],
            percentage_splits: vec![PercentageShare { user: a, percentage: dec!(100) }],
        };
        assert_eq!(input.named_participants(), vec![b, a]);

        input.split_method = SplitMethod::Percentage;
        assert_eq!(input.named_participants(), vec![a]);

        input.split_method = SplitMethod::Equal;
        assert!(input.named_participants().is_empty());
    }

    #[test]
    fn test_rounding_residue() {
        let user = UserId::new();
        let plan = ExpensePlan {
            id: ExpenseId::new(),
            owner: user,
            amount: dec!(100),
            title: "t".to_string(),
            description: String::new(),
            split_method: SplitMethod::Equal,
            splits: vec![
                ComputedSplit { user, split_amount: dec!(33.33) },
                ComputedSplit { user: UserId::new(), split_amount: dec!(33.33) },
                ComputedSplit { user: UserId::new(), split_amount: dec!(33.33) },
            ],
        };
        assert_eq!(plan.split_total(), dec!(99.99));
        assert_eq!(plan.rounding_residue(), dec!(0.01));
    }
}
