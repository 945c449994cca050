//! Centralized authorization policy.
//!
//! Every mutating share operation funnels through [`can_manage`] rather
//! than re-deriving role checks at each call site.

use sharehub_core::error::AppError;
use sharehub_entity::share::ShareRecord;
use sharehub_entity::user::IdentityRef;

/// Whether the requester may manage (update, deactivate, delete) the
/// given record: the record's owner, or any administrative role.
///
/// Anonymous requesters can manage nothing, including anonymously
/// uploaded records, which have no owner to prove.
pub fn can_manage(requester: Option<&IdentityRef>, record: &ShareRecord) -> bool {
    match requester {
        None => false,
        Some(identity) => {
            identity.role.can_administer() || record.owner_id == Some(identity.id)
        }
    }
}

/// Enforce [`can_manage`], returning `Forbidden` on failure.
pub fn require_manage(requester: Option<&IdentityRef>, record: &ShareRecord) -> Result<(), AppError> {
    if can_manage(requester, record) {
        Ok(())
    } else {
        Err(AppError::forbidden(
            "You do not have permission to manage this file",
        ))
    }
}

/// Enforce an administrative role, returning the identity on success.
pub fn require_admin(requester: Option<&IdentityRef>) -> Result<&IdentityRef, AppError> {
    match requester {
        Some(identity) if identity.role.can_administer() => Ok(identity),
        Some(_) => Err(AppError::forbidden("Admin access required")),
        None => Err(AppError::unauthorized("Authentication required")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sharehub_entity::user::UserRole;
    use uuid::Uuid;

    fn identity(role: UserRole) -> IdentityRef {
        IdentityRef {
            id: Uuid::new_v4(),
            email: "someone@example.com".to_string(),
            name: "Someone".to_string(),
            role,
        }
    }

    fn record(owner_id: Option<Uuid>) -> ShareRecord {
        let now = Utc::now();
        ShareRecord {
            id: Uuid::new_v4(),
            download_id: "dl123456".to_string(),
            cid: "bafyexample".to_string(),
            gateway_url: "https://gateway.example/ipfs/bafyexample".to_string(),
            original_name: "notes.txt".to_string(),
            mime_type: "text/plain".to_string(),
            size_bytes: 10,
            owner_id,
            password_hash: None,
            expires_at: None,
            max_downloads: None,
            download_count: 0,
            is_active: true,
            upload_ip: "127.0.0.1".to_string(),
            user_agent: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_owner_can_manage_own_record() {
        let who = identity(UserRole::User);
        let rec = record(Some(who.id));
        assert!(can_manage(Some(&who), &rec));
    }

    #[test]
    fn test_other_user_cannot_manage() {
        let who = identity(UserRole::User);
        let rec = record(Some(Uuid::new_v4()));
        assert!(!can_manage(Some(&who), &rec));
        assert!(require_manage(Some(&who), &rec).is_err());
    }

    #[test]
    fn test_admin_and_owner_roles_can_manage_any_record() {
        let rec = record(Some(Uuid::new_v4()));
        assert!(can_manage(Some(&identity(UserRole::Admin)), &rec));
        assert!(can_manage(Some(&identity(UserRole::Owner)), &rec));
    }

    #[test]
    fn test_anonymous_record_needs_admin() {
        let rec = record(None);
        assert!(!can_manage(None, &rec));
        assert!(!can_manage(Some(&identity(UserRole::User)), &rec));
        assert!(can_manage(Some(&identity(UserRole::Admin)), &rec));
    }

    #[test]
    fn test_require_admin() {
        assert!(require_admin(Some(&identity(UserRole::Admin))).is_ok());
        assert!(require_admin(Some(&identity(UserRole::Owner))).is_ok());
        assert!(require_admin(Some(&identity(UserRole::User))).is_err());
        assert!(require_admin(None).is_err());
    }
}
