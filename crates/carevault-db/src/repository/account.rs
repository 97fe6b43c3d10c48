//! SurrealDB implementation of [`AccountRepository`].
//!
//! Account records are keyed by a UUID string. The unique index
//! `idx_account_email` enforces one account per normalized email; a
//! CREATE that trips it is reported as [`DbError::AlreadyExists`], an
//! expected outcome under concurrent duplicate signups.

use carevault_core::error::VaultResult;
use carevault_core::models::account::{Account, CreateAccount, UpdateAccount};
use carevault_core::repository::AccountRepository;
use serde::Deserialize;
use surrealdb::sql::Datetime;
use surrealdb::{Connection, Surreal};
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, Deserialize)]
struct AccountRow {
    first_name: String,
    last_name: String,
    email: String,
    password_digest: String,
    profile: serde_json::Value,
    created_at: Datetime,
    updated_at: Datetime,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, Deserialize)]
struct AccountRowWithId {
    record_id: String,
    first_name: String,
    last_name: String,
    email: String,
    password_digest: String,
    profile: serde_json::Value,
    created_at: Datetime,
    updated_at: Datetime,
}

impl AccountRow {
    fn into_account(self, id: Uuid) -> Account {
        Account {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password_digest: self.password_digest,
            profile: self.profile,
            created_at: self.created_at.0,
            updated_at: self.updated_at.0,
        }
    }
}

impl AccountRowWithId {
    fn try_into_account(self) -> Result<Account, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Query(format!("invalid account UUID: {e}")))?;
        Ok(Account {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password_digest: self.password_digest,
            profile: self.profile,
            created_at: self.created_at.0,
            updated_at: self.updated_at.0,
        })
    }
}

/// Map a statement-level error from a CREATE, distinguishing a unique
/// email index rejection from everything else.
fn map_create_error(e: surrealdb::Error) -> DbError {
    let msg = e.to_string();
    if msg.contains("idx_account_email") {
        DbError::AlreadyExists {
            entity: "account".into(),
        }
    } else {
        DbError::Query(msg)
    }
}

/// SurrealDB implementation of the account repository.
#[derive(Clone)]
pub struct SurrealAccountRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealAccountRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> AccountRepository for SurrealAccountRepository<C> {
    async fn create(&self, input: CreateAccount) -> VaultResult<Account> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let profile = input
            .profile
            .unwrap_or(serde_json::Value::Object(Default::default()));

        let result = self
            .db
            .query(
                "CREATE type::thing('account', $id) SET \
                 first_name = $first_name, \
                 last_name = $last_name, \
                 email = $email, \
                 password_digest = $password_digest, \
                 profile = $profile",
            )
            .bind(("id", id_str.clone()))
            .bind(("first_name", input.first_name))
            .bind(("last_name", input.last_name))
            .bind(("email", input.email))
            .bind(("password_digest", input.password_digest))
            .bind(("profile", profile))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(map_create_error)?;

        let rows: Vec<AccountRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "account".into(),
            id: id_str,
        })?;

        Ok(row.into_account(id))
    }

    async fn get_by_id(&self, id: Uuid) -> VaultResult<Account> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::thing('account', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AccountRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "account".into(),
            id: id_str,
        })?;

        Ok(row.into_account(id))
    }

    async fn get_by_email(&self, email: &str) -> VaultResult<Account> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM account \
                 WHERE email = $email",
            )
            .bind(("email", email.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AccountRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "account".into(),
            id: format!("email={email}"),
        })?;

        Ok(row.try_into_account()?)
    }

    async fn update(&self, id: Uuid, input: UpdateAccount) -> VaultResult<Account> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.first_name.is_some() {
            sets.push("first_name = $first_name");
        }
        if input.last_name.is_some() {
            sets.push("last_name = $last_name");
        }
        if input.profile.is_some() {
            sets.push("profile = $profile");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::thing('account', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(query).bind(("id", id_str.clone()));

        if let Some(first_name) = input.first_name {
            builder = builder.bind(("first_name", first_name));
        }
        if let Some(last_name) = input.last_name {
            builder = builder.bind(("last_name", last_name));
        }
        if let Some(profile) = input.profile {
            builder = builder.bind(("profile", profile));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<AccountRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "account".into(),
            id: id_str,
        })?;

        Ok(row.into_account(id))
    }
}
