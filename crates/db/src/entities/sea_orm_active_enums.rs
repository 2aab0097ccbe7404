//! `SeaORM` active enums.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use splitledger_core::expense::SplitMethod as CoreSplitMethod;

/// Stored split method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum SplitMethod {
    /// Equal split.
    #[sea_orm(string_value = "equal")]
    Equal,
    /// Exact split.
    #[sea_orm(string_value = "exact")]
    Exact,
    /// Percentage split.
    #[sea_orm(string_value = "percentage")]
    Percentage,
}

impl From<CoreSplitMethod> for SplitMethod {
    fn from(method: CoreSplitMethod) -> Self {
        match method {
            CoreSplitMethod::Equal => Self::Equal,
            CoreSplitMethod::Exact => Self::Exact,
            CoreSplitMethod::Percentage => Self::Percentage,
        }
    }
}

impl From<SplitMethod> for CoreSplitMethod {
    fn from(method: SplitMethod) -> Self {
        match method {
            SplitMethod::Equal => Self::Equal,
            SplitMethod::Exact => Self::Exact,
            SplitMethod::Percentage => Self::Percentage,
        }
    }
}
