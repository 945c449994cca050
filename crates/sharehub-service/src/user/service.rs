//! Account management: registration, login, roles, password resets.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};
use uuid::Uuid;
use validator::ValidateEmail;

use sharehub_auth::jwt::JwtCodec;
use sharehub_auth::password::{PasswordHasher, PasswordValidator};
use sharehub_auth::policy;
use sharehub_core::config::auth::AuthConfig;
use sharehub_core::error::AppError;
use sharehub_core::result::AppResult;
use sharehub_core::types::pagination::{PageRequest, PageResponse};
use sharehub_entity::store::UserStore;
use sharehub_entity::user::{User, UserRole};

use crate::context::RequestContext;
use crate::email::EmailService;
use crate::share::LinkGenerator;

/// Handles account registration, authentication, role changes, and
/// password resets.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User store.
    users: Arc<dyn UserStore>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Account password policy.
    validator: Arc<PasswordValidator>,
    /// JWT codec for access tokens.
    jwt: Arc<JwtCodec>,
    /// Outbound email.
    email: Arc<EmailService>,
    /// Link builder (for reset URLs).
    links: Arc<LinkGenerator>,
    /// Designated owner email from configuration.
    owner_email: Option<String>,
    /// Reset token TTL in minutes.
    reset_token_ttl_minutes: i64,
}

/// Registration request.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RegisterRequest {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Role change direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleAction {
    /// Grant the admin role.
    Promote,
    /// Revert to the user role.
    Demote,
}

impl FromStr for RoleAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "promote" => Ok(Self::Promote),
            "demote" => Ok(Self::Demote),
            _ => Err(AppError::validation(format!(
                "Invalid role action: '{s}'. Expected 'promote' or 'demote'"
            ))),
        }
    }
}

impl UserService {
    /// Creates a new user service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        jwt: Arc<JwtCodec>,
        email: Arc<EmailService>,
        links: Arc<LinkGenerator>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            users,
            hasher,
            validator,
            jwt,
            email,
            links,
            owner_email: config.owner_email.clone(),
            reset_token_ttl_minutes: config.reset_token_ttl_minutes as i64,
        }
    }

    /// Whether the given email belongs to the designated owner identity.
    fn is_designated_owner(&self, email: &str) -> bool {
        self.owner_email
            .as_deref()
            .is_some_and(|owner| owner.eq_ignore_ascii_case(email))
    }

    /// Flag the configured owner identity at startup.
    ///
    /// If the owner account already exists without the flag (for example
    /// after the configuration changed), it is promoted here, never
    /// through the role API.
    pub async fn bootstrap_owner(&self) -> AppResult<()> {
        let Some(owner_email) = self.owner_email.clone() else {
            info!("No owner identity configured");
            return Ok(());
        };

        match self.users.find_by_email(&owner_email).await? {
            Some(mut user) if !user.is_owner => {
                user.is_owner = true;
                user.role = UserRole::Owner;
                self.users.update(&user).await?;
                info!(email = %owner_email, "Owner identity flagged");
            }
            Some(_) => {}
            None => {
                info!(email = %owner_email, "Owner identity not registered yet");
            }
        }
        Ok(())
    }

    /// Registers a new account and sends a welcome email (best effort).
    pub async fn register(&self, req: RegisterRequest) -> AppResult<User> {
        if req.name.trim().is_empty() {
            return Err(AppError::validation("Name is required"));
        }
        if !req.email.validate_email() {
            return Err(AppError::validation("Please enter a valid email address"));
        }
        self.validator.validate(&req.password)?;

        let email = req.email.trim().to_lowercase();
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email is already registered"));
        }

        let is_owner = self.is_designated_owner(&email);
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: req.name.trim().to_string(),
            email: email.clone(),
            password_hash: self.hasher.hash_password(&req.password)?,
            role: if is_owner {
                UserRole::Owner
            } else {
                UserRole::User
            },
            is_owner,
            is_active: true,
            reset_token: None,
            reset_token_expires_at: None,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        };

        let user = self.users.insert(&user).await?;

        if let Err(e) = self.email.send_welcome(&user.email, &user.name).await {
            warn!(error = %e, "Failed to send welcome email");
        }

        info!(user_id = %user.id, owner = user.is_owner, "User registered");
        Ok(user)
    }

    /// Authenticates by email and password, returning the user and a
    /// signed access token.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> AppResult<(User, String, DateTime<Utc>)> {
        let mut user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if !user.is_active {
            return Err(AppError::unauthorized("Account is disabled"));
        }

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        user.last_login_at = Some(Utc::now());
        let user = self.users.update(&user).await?;

        let (token, expires_at) = self.jwt.issue(&user)?;
        info!(user_id = %user.id, "User logged in");
        Ok((user, token, expires_at))
    }

    /// Fetches a user by ID.
    pub async fn get(&self, id: Uuid) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Lists users (administrative).
    pub async fn list_users(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<PageResponse<User>> {
        policy::require_admin(ctx.identity())?;
        self.users.list(&page).await
    }

    /// Counts all users.
    pub async fn count(&self) -> AppResult<u64> {
        self.users.count().await
    }

    /// Promotes a user to admin, or demotes one back to user.
    ///
    /// The designated owner is a sticky upper bound: its role can never
    /// change through this path, and only the owner identity itself may
    /// target its own record (as a no-op).
    pub async fn promote_or_demote(
        &self,
        ctx: &RequestContext,
        target_email: &str,
        action: RoleAction,
    ) -> AppResult<User> {
        let requester = policy::require_admin(ctx.identity())?;

        let mut target = self
            .users
            .find_by_email(target_email)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if target.is_owner {
            if !requester.email.eq_ignore_ascii_case(&target.email) {
                return Err(AppError::forbidden("Cannot modify owner account"));
            }
            return Ok(target);
        }

        let old_role = target.role;
        target.role = match action {
            RoleAction::Promote => UserRole::Admin,
            RoleAction::Demote => UserRole::User,
        };
        let target = self.users.update(&target).await?;

        info!(
            admin = %requester.email,
            target = %target.email,
            old_role = %old_role,
            new_role = %target.role,
            "User role changed"
        );
        Ok(target)
    }

    /// Issues a password reset token and emails the reset link.
    ///
    /// Succeeds silently for unknown addresses to avoid leaking which
    /// emails are registered.
    pub async fn request_password_reset(&self, email: &str) -> AppResult<()> {
        let Some(mut user) = self.users.find_by_email(email).await? else {
            info!("Password reset requested for unknown email");
            return Ok(());
        };

        let token = generate_reset_token();
        user.reset_token = Some(token.clone());
        user.reset_token_expires_at =
            Some(Utc::now() + Duration::minutes(self.reset_token_ttl_minutes));
        let user = self.users.update(&user).await?;

        let reset_url = self.links.reset_password_url(&token);

        if let Err(e) = self.email.send_password_reset(&user.email, &reset_url).await {
            warn!(error = %e, "Failed to send password reset email");
        }

        info!(user_id = %user.id, "Password reset token issued");
        Ok(())
    }

    /// Checks whether a reset token is outstanding and unexpired.
    pub async fn verify_reset_token(&self, token: &str) -> AppResult<User> {
        let user = self
            .users
            .find_by_reset_token(token)
            .await?
            .filter(User::reset_token_valid)
            .ok_or_else(|| AppError::unauthorized("Invalid or expired reset token"))?;
        Ok(user)
    }

    /// Consumes a reset token and sets a new password.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> AppResult<()> {
        let mut user = self.verify_reset_token(token).await?;

        self.validator.validate(new_password)?;
        user.password_hash = self.hasher.hash_password(new_password)?;
        user.reset_token = None;
        user.reset_token_expires_at = None;
        self.users.update(&user).await?;

        info!(user_id = %user.id, "Password reset completed");
        Ok(())
    }
}

/// Generate a 32-character hex reset token.
fn generate_reset_token() -> String {
    let bytes: [u8; 16] = rand::random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
