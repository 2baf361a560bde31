//! Repository for the `automation_rules` table.

use commerce_core::schema::{AutomationRule, NewAutomationRule};
use commerce_core::types::DbId;
use sqlx::PgPool;

const COLUMNS: &str = "id, name, trigger_event, action_type, is_active, config, last_run_at";

/// Provides CRUD operations for automation rules. There is no delete.
pub struct AutomationRuleRepo;

impl AutomationRuleRepo {
    /// Insert a new rule, returning the created row. `is_active` defaults to `true`.
    pub async fn create(
        pool: &PgPool,
        input: &NewAutomationRule,
    ) -> Result<AutomationRule, sqlx::Error> {
        let query = format!(
            "INSERT INTO automation_rules (name, trigger_event, action_type, is_active, config)
             VALUES ($1, $2, $3, COALESCE($4, TRUE), $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AutomationRule>(&query)
            .bind(&input.name)
            .bind(&input.trigger_event)
            .bind(&input.action_type)
            .bind(input.is_active)
            .bind(&input.config)
            .fetch_one(pool)
            .await
    }

    /// List all rules in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<AutomationRule>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM automation_rules ORDER BY id");
        sqlx::query_as::<_, AutomationRule>(&query)
            .fetch_all(pool)
            .await
    }

    /// Set `is_active` on one rule.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_active(
        pool: &PgPool,
        id: DbId,
        is_active: bool,
    ) -> Result<Option<AutomationRule>, sqlx::Error> {
        let query = format!(
            "UPDATE automation_rules SET is_active = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AutomationRule>(&query)
            .bind(id)
            .bind(is_active)
            .fetch_optional(pool)
            .await
    }
}
