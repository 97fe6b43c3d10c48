//! Account service — signup, signin, and profile orchestration.

use carevault_core::error::{VaultError, VaultResult};
use carevault_core::models::account::{CreateAccount, PublicAccount, UpdateAccount};
use carevault_core::repository::AccountRepository;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::token;

/// Input for the signup flow.
#[derive(Debug)]
pub struct SignUpInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Input for the signin flow.
#[derive(Debug)]
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Successful signup/signin result: a bearer token plus the
/// digest-stripped account.
#[derive(Debug)]
pub struct AuthOutput {
    pub token: String,
    pub account: PublicAccount,
}

/// Trim and lowercase an email so that `"A@x.com"` and `"a@x.com "`
/// resolve to the same account.
fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn require(field: &'static str, value: &str) -> VaultResult<()> {
    if value.trim().is_empty() {
        return Err(VaultError::Validation {
            message: format!("{field} is required"),
        });
    }
    Ok(())
}

/// Account service.
///
/// Generic over the repository implementation so that this crate has no
/// dependency on the database crate. The only component that touches
/// both the credential store and the token issuer.
pub struct AccountService<R: AccountRepository> {
    repo: R,
    config: AuthConfig,
}

impl<R: AccountRepository> AccountService<R> {
    pub fn new(repo: R, config: AuthConfig) -> Self {
        Self { repo, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Register a new account and issue its first token.
    pub async fn sign_up(&self, input: SignUpInput) -> VaultResult<AuthOutput> {
        // 1. Required fields.
        require("firstName", &input.first_name)?;
        require("lastName", &input.last_name)?;
        require("email", &input.email)?;
        require("password", &input.password)?;
        require("confirmPassword", &input.confirm_password)?;

        // 2. Confirmation must match.
        if input.password != input.confirm_password {
            return Err(VaultError::Validation {
                message: "passwords do not match".into(),
            });
        }

        // 3. Minimum length policy.
        if input.password.len() < self.config.min_password_length {
            return Err(VaultError::Validation {
                message: format!(
                    "password must be at least {} characters",
                    self.config.min_password_length
                ),
            });
        }

        let email = normalize_email(&input.email);

        // 4. Duplicate pre-check. This is a fast-path UX improvement
        //    only — it races against concurrent signups, and the unique
        //    email index in the store is the actual guarantee. An insert
        //    that trips the index also comes back as AlreadyExists.
        match self.repo.get_by_email(&email).await {
            Ok(_) => {
                return Err(VaultError::AlreadyExists {
                    entity: "account".into(),
                });
            }
            Err(VaultError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        // 5. Hash and persist. The store only ever sees the digest.
        let password_digest = password::hash_password(
            &input.password,
            &self.config.hash_params,
            self.config.pepper.as_deref(),
        )?;

        let account = self
            .repo
            .create(CreateAccount {
                first_name: input.first_name.trim().to_string(),
                last_name: input.last_name.trim().to_string(),
                email: email.clone(),
                password_digest,
                profile: None,
            })
            .await?;

        // 6. Issue token.
        let token = token::issue_access_token(account.id, &email, &self.config)?;

        Ok(AuthOutput {
            token,
            account: account.into(),
        })
    }

    /// Authenticate with email + password and issue a fresh token.
    pub async fn sign_in(&self, input: SignInInput) -> VaultResult<AuthOutput> {
        let email = normalize_email(&input.email);

        // Unknown email and wrong password must be indistinguishable to
        // the caller, so both paths fail through InvalidCredentials.
        // Store failures still propagate as such.
        let account = match self.repo.get_by_email(&email).await {
            Ok(account) => account,
            Err(VaultError::NotFound { .. }) => {
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        let valid = password::verify_password(
            &input.password,
            &account.password_digest,
            self.config.pepper.as_deref(),
        );
        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = token::issue_access_token(account.id, &account.email, &self.config)?;

        Ok(AuthOutput {
            token,
            account: account.into(),
        })
    }

    /// Fetch an account for an authenticated caller.
    pub async fn get_account(&self, account_id: Uuid) -> VaultResult<PublicAccount> {
        Ok(self.repo.get_by_id(account_id).await?.into())
    }

    /// Apply a partial update to an account's non-credential fields.
    ///
    /// `password` and `email` keys in the patch are discarded silently —
    /// explicit policy, so this operation can never double as a
    /// credential-change endpoint. `firstName`/`lastName` update the
    /// scalar fields; every remaining key merges into the opaque
    /// profile document.
    pub async fn update_profile(
        &self,
        account_id: Uuid,
        patch: serde_json::Value,
    ) -> VaultResult<PublicAccount> {
        let serde_json::Value::Object(mut patch) = patch else {
            return Err(VaultError::Validation {
                message: "patch must be a JSON object".into(),
            });
        };

        patch.remove("password");
        patch.remove("email");

        let first_name = take_string_field(&mut patch, "firstName")?;
        let last_name = take_string_field(&mut patch, "lastName")?;

        // Merge the remaining keys into the stored profile so that a
        // partial patch never wipes untouched sub-structures.
        let profile = if patch.is_empty() {
            None
        } else {
            let current = self.repo.get_by_id(account_id).await?;
            let mut merged = match current.profile {
                serde_json::Value::Object(map) => map,
                _ => serde_json::Map::new(),
            };
            for (key, value) in patch {
                merged.insert(key, value);
            }
            Some(serde_json::Value::Object(merged))
        };

        let updated = self
            .repo
            .update(
                account_id,
                UpdateAccount {
                    first_name,
                    last_name,
                    profile,
                },
            )
            .await?;

        Ok(updated.into())
    }
}

fn take_string_field(
    patch: &mut serde_json::Map<String, serde_json::Value>,
    field: &'static str,
) -> VaultResult<Option<String>> {
    match patch.remove(field) {
        None => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(VaultError::Validation {
            message: format!("{field} must be a string"),
        }),
    }
}
