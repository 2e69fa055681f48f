use crate::{
    config::CreditsConfig,
    error::{ApiError, Result},
};
use sea_orm::{
    entity::*,
    query::*,
    sea_query::{Expr, OnConflict},
    DatabaseConnection,
};
use tracing::{info, instrument};
use uuid::Uuid;

/// Per-user credit ledger. The balance is a plain counter, not an
/// event-sourced ledger: individual debits leave no audit trail.
pub struct CreditsService {
    db: DatabaseConnection,
    signup_balance: i32,
}

/// Ledger readout returned by admission checks and reservations.
#[derive(Debug, Clone)]
pub struct CreditStatus {
    pub admitted: bool,
    pub balance: i32,
    pub is_paid: bool,
}

impl CreditsService {
    pub fn new(db: DatabaseConnection, config: &CreditsConfig) -> Self {
        Self {
            db,
            signup_balance: config.signup_balance,
        }
    }

    /// Create the ledger entry for a freshly provisioned account.
    ///
    /// Idempotent: a second call (or a concurrent one) is a no-op thanks to
    /// the unique index on user_id.
    #[instrument(skip(self))]
    pub async fn ensure_entry(&self, user_id: Uuid) -> Result<entity::user_credits::Model> {
        let now = time::OffsetDateTime::now_utc();

        let new_entry = entity::user_credits::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            balance: Set(self.signup_balance),
            is_paid: Set(false),
            metadata: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        entity::user_credits::Entity::insert(new_entry)
            .on_conflict(
                OnConflict::column(entity::user_credits::Column::UserId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        // Return the existing or newly-inserted row
        self.find_entry(user_id).await
    }

    /// Read-only admission gate. Fails closed: an unpaid user with a
    /// non-positive balance is not admitted. A missing row is a hard
    /// "User not found", never treated as a zero balance.
    #[instrument(skip(self))]
    pub async fn check_admission(&self, user_id: Uuid) -> Result<CreditStatus> {
        let entry = self.find_entry(user_id).await?;

        Ok(CreditStatus {
            admitted: entry.is_paid || entry.balance > 0,
            balance: entry.balance,
            is_paid: entry.is_paid,
        })
    }

    /// Reserve one credit ahead of an AI call.
    ///
    /// The decrement and the balance check are a single conditional UPDATE,
    /// so two concurrent requests observing balance = 1 cannot both be
    /// admitted: the affected-row count is the admission signal. Paid users
    /// are admitted without any decrement.
    #[instrument(skip(self))]
    pub async fn reserve(&self, user_id: Uuid) -> Result<CreditStatus> {
        let entry = self.find_entry(user_id).await?;

        if entry.is_paid {
            return Ok(CreditStatus {
                admitted: true,
                balance: entry.balance,
                is_paid: true,
            });
        }

        let now = time::OffsetDateTime::now_utc();
        let result = entity::user_credits::Entity::update_many()
            .col_expr(
                entity::user_credits::Column::Balance,
                Expr::col(entity::user_credits::Column::Balance).sub(1),
            )
            .col_expr(entity::user_credits::Column::UpdatedAt, Expr::value(now))
            .filter(entity::user_credits::Column::UserId.eq(user_id))
            .filter(entity::user_credits::Column::IsPaid.eq(false))
            .filter(entity::user_credits::Column::Balance.gt(0))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(ApiError::OutOfBalance);
        }

        info!(
            "Reserved 1 credit for user {} (balance now {})",
            user_id,
            entry.balance - 1
        );

        Ok(CreditStatus {
            admitted: true,
            balance: entry.balance - 1,
            is_paid: false,
        })
    }

    /// Return a reserved credit after a failed provider call, so a failed
    /// generation never consumes balance. No-op for paid users, whose
    /// reservations never decrement.
    #[instrument(skip(self))]
    pub async fn refund(&self, user_id: Uuid) -> Result<()> {
        let now = time::OffsetDateTime::now_utc();
        let result = entity::user_credits::Entity::update_many()
            .col_expr(
                entity::user_credits::Column::Balance,
                Expr::col(entity::user_credits::Column::Balance).add(1),
            )
            .col_expr(entity::user_credits::Column::UpdatedAt, Expr::value(now))
            .filter(entity::user_credits::Column::UserId.eq(user_id))
            .filter(entity::user_credits::Column::IsPaid.eq(false))
            .exec(&self.db)
            .await?;

        if result.rows_affected > 0 {
            info!("Refunded 1 credit to user {}", user_id);
        }

        Ok(())
    }

    /// Unconditional overwrite of paid status and balance. Writers are the
    /// payment webhook receiver and admin tooling only.
    #[instrument(skip(self))]
    pub async fn set_paid_status(
        &self,
        user_id: Uuid,
        is_paid: bool,
        balance: i32,
    ) -> Result<entity::user_credits::Model> {
        let now = time::OffsetDateTime::now_utc();
        let result = entity::user_credits::Entity::update_many()
            .col_expr(entity::user_credits::Column::IsPaid, Expr::value(is_paid))
            .col_expr(entity::user_credits::Column::Balance, Expr::value(balance))
            .col_expr(entity::user_credits::Column::UpdatedAt, Expr::value(now))
            .filter(entity::user_credits::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(ApiError::NotFound("User not found".to_string()));
        }

        info!(
            "Set paid status for user {}: is_paid={}, balance={}",
            user_id, is_paid, balance
        );

        self.find_entry(user_id).await
    }

    /// Current ledger entry for the UI balance readout.
    #[instrument(skip(self))]
    pub async fn get_entry(&self, user_id: Uuid) -> Result<entity::user_credits::Model> {
        self.find_entry(user_id).await
    }

    async fn find_entry(&self, user_id: Uuid) -> Result<entity::user_credits::Model> {
        entity::user_credits::Entity::find()
            .filter(entity::user_credits::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }
}
