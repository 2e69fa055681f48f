use serde::{Deserialize, Serialize};
use validator::Validate;

use super::common::SuccessResponse;

pub type CreditStatusResponse = SuccessResponse<CreditStatusData>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditStatusData {
    pub balance: i32,
    pub is_paid: bool,
}

impl From<entity::user_credits::Model> for CreditStatusData {
    fn from(entry: entity::user_credits::Model) -> Self {
        Self {
            balance: entry.balance,
            is_paid: entry.is_paid,
        }
    }
}

/// Payload from the payment webhook receiver after a verified payment
/// event. Applied verbatim; this service does not validate payment events.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BillingActivateRequest {
    pub user_id: uuid::Uuid,
    pub is_paid: bool,
    #[validate(range(min = 0))]
    pub balance: i32,
}
