//! User operations: registration, profile updates and email
//! verification with one-time passwords.
//!
//! The OTP flow: `send_otp` stores a fresh 6-digit code with an expiry
//! and delivers it through the configured [`crate::mailer::Mailer`];
//! resending overwrites any earlier code. `verify_otp` accepts the code
//! once - expiry and code are cleared on success, so a code can never be
//! replayed.

use anyhow::Result;
use sea_orm::{ActiveValue::Set, TransactionTrait};
use uuid::Uuid;

use crate::constants::{
    MSG_DELETE_USER_FAILED, MSG_EMAIL_VERIFIED, MSG_INVALID_EMAIL, MSG_OTP_EXPIRED,
    MSG_OTP_INCORRECT, MSG_OTP_SENT, MSG_REGISTER_FAILED, MSG_SEND_OTP_FAILED,
    MSG_UPDATE_USER_FAILED, MSG_USER_EXISTS, MSG_USER_IS_TEAM_LEAD, MSG_USER_NOT_FOUND,
    MSG_VERIFY_OTP_FAILED,
};
use crate::entities::user;
use crate::repositories::{NoteRepository, TeamRepository, UserRepository};
use crate::service::{invalid, not_found, ActionResult, AppService, ServiceError};
use crate::utils::datetime;

/// Input for registering a user.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
}

/// Field updates for a user; `None` leaves a field unchanged.
#[derive(Clone, Debug, Default)]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub phone: Option<String>,
    pub image: Option<String>,
}

/// One page of users.
#[derive(Clone, Debug)]
pub struct UserPage {
    pub users: Vec<user::Model>,
    pub total_pages: u64,
}

/// Generate a 6-digit verification code.
///
/// A v4 UUID carries 122 random bits, plenty for a short-lived
/// single-use code without pulling in a dedicated RNG dependency.
fn generate_otp() -> String {
    let n = (Uuid::new_v4().as_u128() % 900_000) + 100_000;
    n.to_string()
}

impl AppService {
    /// Register a user and send a verification code to their email.
    pub async fn register(&self, input: NewUser) -> ActionResult {
        match self.register_inner(input).await {
            Ok(id) => ActionResult::created("User registered successfully.", id),
            Err(err) => Self::failure("register", MSG_REGISTER_FAILED, err),
        }
    }

    async fn register_inner(&self, input: NewUser) -> Result<Uuid, ServiceError> {
        let email = input.email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(invalid(MSG_INVALID_EMAIL));
        }

        let created = {
            let storage = self.storage().lock().await;
            if UserRepository::get_by_email(&storage.conn, &email)
                .await?
                .is_some()
            {
                return Err(invalid(MSG_USER_EXISTS));
            }

            UserRepository::insert(
                &storage.conn,
                user::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    first_name: Set(input.first_name.trim().to_string()),
                    last_name: Set(input.last_name.trim().to_string()),
                    email: Set(email.clone()),
                    role: Set(input.role),
                    phone: Set(None),
                    image: Set(None),
                    email_verified: Set(false),
                    otp_code: Set(None),
                    otp_expires_at: Set(None),
                    created_at: Set(datetime::now_rfc3339()),
                },
            )
            .await?
        };

        // Lock released above; send_otp_inner takes it again.
        self.send_otp_inner(&email).await?;
        Ok(created.id)
    }

    /// Generate and deliver a fresh verification code. Overwrites any
    /// previously issued code.
    pub async fn send_otp(&self, email: &str) -> ActionResult {
        match self.send_otp_inner(email).await {
            Ok(()) => ActionResult::ok(MSG_OTP_SENT),
            Err(err) => Self::failure("send otp", MSG_SEND_OTP_FAILED, err),
        }
    }

    async fn send_otp_inner(&self, email: &str) -> Result<(), ServiceError> {
        let otp = generate_otp();
        let ttl = self.otp_config().ttl_minutes;

        let (first_name, address) = {
            let storage = self.storage().lock().await;
            let user = UserRepository::get_by_email(&storage.conn, email)
                .await?
                .ok_or_else(|| not_found(MSG_USER_NOT_FOUND))?;

            let first_name = user.first_name.clone();
            let address = user.email.clone();
            let mut active: user::ActiveModel = user.into();
            active.otp_code = Set(Some(otp.clone()));
            active.otp_expires_at = Set(Some(datetime::rfc3339_in_minutes(ttl)));
            UserRepository::update(&storage.conn, active).await?;
            (first_name, address)
        };

        let sender = &self.otp_config().sender;
        let body = format!(
            "Dear {first_name},\n\n\
             To complete the email verification process, please use the following \
             One-Time Password (OTP):\n\
             Your OTP code: {otp}\n\
             This code will expire in {ttl} minutes.\n\n\
             If you did not initiate this request, please disregard this email.\n\n\
             Best regards,\n{sender}"
        );
        self.mailer()
            .send(&address, "Verify Your Account", &body)
            .await?;
        Ok(())
    }

    /// Verify an emailed code. A correct, unexpired code marks the email
    /// verified and is consumed in the same step.
    pub async fn verify_otp(&self, email: &str, code: &str) -> ActionResult {
        match self.verify_otp_inner(email, code).await {
            Ok(()) => ActionResult::ok(MSG_EMAIL_VERIFIED),
            Err(err) => Self::failure("verify otp", MSG_VERIFY_OTP_FAILED, err),
        }
    }

    async fn verify_otp_inner(&self, email: &str, code: &str) -> Result<(), ServiceError> {
        let storage = self.storage().lock().await;
        let user = UserRepository::get_by_email(&storage.conn, email)
            .await?
            .ok_or_else(|| not_found(MSG_USER_NOT_FOUND))?;

        match &user.otp_code {
            Some(stored) if stored == code => {}
            _ => return Err(invalid(MSG_OTP_INCORRECT)),
        }
        match &user.otp_expires_at {
            Some(expiry) if !datetime::is_expired(expiry) => {}
            _ => return Err(invalid(MSG_OTP_EXPIRED)),
        }

        let mut active: user::ActiveModel = user.into();
        active.email_verified = Set(true);
        active.otp_code = Set(None);
        active.otp_expires_at = Set(None);
        UserRepository::update(&storage.conn, active).await?;
        Ok(())
    }

    /// Update a user's profile fields.
    pub async fn update_user(&self, user_id: Uuid, update: UserUpdate) -> ActionResult {
        match self.update_user_inner(user_id, update).await {
            Ok(()) => ActionResult::ok("User updated successfully."),
            Err(err) => Self::failure("update user", MSG_UPDATE_USER_FAILED, err),
        }
    }

    async fn update_user_inner(&self, user_id: Uuid, update: UserUpdate) -> Result<(), ServiceError> {
        let storage = self.storage().lock().await;
        let user = UserRepository::get_by_id(&storage.conn, &user_id)
            .await?
            .ok_or_else(|| not_found(MSG_USER_NOT_FOUND))?;

        let mut active: user::ActiveModel = user.into();
        if let Some(first_name) = update.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = update.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(role) = update.role {
            active.role = Set(role);
        }
        if let Some(phone) = update.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(image) = update.image {
            active.image = Set(Some(image));
        }
        UserRepository::update(&storage.conn, active).await?;
        Ok(())
    }

    /// Delete a user and their notes. Team leads must be reassigned
    /// first.
    pub async fn delete_user(&self, user_id: Uuid) -> ActionResult {
        match self.delete_user_inner(user_id).await {
            Ok(()) => ActionResult::ok("User and associated data deleted successfully."),
            Err(err) => Self::failure("delete user", MSG_DELETE_USER_FAILED, err),
        }
    }

    async fn delete_user_inner(&self, user_id: Uuid) -> Result<(), ServiceError> {
        let storage = self.storage().lock().await;
        let txn = storage.conn.begin().await?;

        let user = UserRepository::get_by_id(&txn, &user_id)
            .await?
            .ok_or_else(|| not_found(MSG_USER_NOT_FOUND))?;

        if TeamRepository::get_led_by(&txn, &user_id).await?.is_some() {
            return Err(invalid(MSG_USER_IS_TEAM_LEAD));
        }

        NoteRepository::delete_for_author(&txn, &user_id).await?;
        UserRepository::delete(&txn, user).await?;

        txn.commit().await?;
        Ok(())
    }

    /// Get a single user.
    pub async fn fetch_user(&self, user_id: Uuid) -> Result<user::Model, ServiceError> {
        let storage = self.storage().lock().await;
        UserRepository::get_by_id(&storage.conn, &user_id)
            .await?
            .ok_or_else(|| not_found(MSG_USER_NOT_FOUND))
    }

    /// Get a single user by email address.
    pub async fn fetch_user_by_email(&self, email: &str) -> Result<user::Model, ServiceError> {
        let storage = self.storage().lock().await;
        UserRepository::get_by_email(&storage.conn, email)
            .await?
            .ok_or_else(|| not_found(MSG_USER_NOT_FOUND))
    }

    /// Get one page of users. `page` is 1-based.
    pub async fn fetch_users(&self, page: u64, per_page: u64) -> Result<UserPage> {
        let storage = self.storage().lock().await;
        let (users, total_pages) =
            UserRepository::get_page(&storage.conn, page.saturating_sub(1), per_page).await?;
        Ok(UserPage { users, total_pages })
    }

    /// Get all users with a given role.
    pub async fn fetch_users_by_role(&self, role: &str) -> Result<Vec<user::Model>> {
        let storage = self.storage().lock().await;
        UserRepository::get_by_role(&storage.conn, role).await
    }
}
