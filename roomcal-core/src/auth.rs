//! Editor authorization.
//!
//! One admin identity may mutate bookings; everyone else is a read-only
//! viewer. Reads and exports are never gated.

/// Authorization predicate for mutating operations.
///
/// With no admin email configured the calendar is view-only for everyone,
/// so a misconfigured deployment fails closed.
#[derive(Debug, Clone, Default)]
pub struct AuthPolicy {
    admin_email: Option<String>,
}

impl AuthPolicy {
    pub fn new(admin_email: Option<String>) -> Self {
        AuthPolicy {
            admin_email: admin_email.filter(|e| !e.trim().is_empty()),
        }
    }

    /// Case-insensitive match against the configured admin email.
    pub fn is_authorized_editor(&self, identity: Option<&str>) -> bool {
        match (&self.admin_email, identity) {
            (Some(admin), Some(email)) => admin.eq_ignore_ascii_case(email.trim()),
            _ => false,
        }
    }
}
