//! Staff access derivation.
//!
//! The elevated-access flag on an account controls entry to the back-office
//! panel. It is a function of the account's role, except for superusers whose
//! flag is set once at creation and never recomputed. Handlers call these
//! functions explicitly at the write boundary instead of hiding the rule in a
//! save hook, so the invariant can be tested without a database.

use tracing::{debug, instrument, trace};

use crate::entities::account::Role;

/// Roles that grant elevated (back-office) access on their own.
pub const ELEVATED_ROLES: [Role; 3] = [Role::Manager, Role::Server, Role::Cashier];

/// Compute the elevated-access flag for an account about to be persisted.
///
/// Superusers keep whatever flag they currently carry; recomputing it from
/// the role would silently demote them on every save. Everyone else gets the
/// flag derived from role membership in [`ELEVATED_ROLES`].
#[instrument]
pub fn derive_elevated_access(role: Role, is_superuser: bool, current_flag: bool) -> bool {
    trace!("Deriving elevated access for role {:?}", role);

    if is_superuser {
        debug!("Superuser account keeps its current flag: {}", current_flag);
        current_flag
    } else {
        let elevated = ELEVATED_ROLES.contains(&role);
        debug!("Role {:?} derives elevated access: {}", role, elevated);
        elevated
    }
}

/// Whether an account may open an admin panel session.
#[instrument]
pub fn can_access_admin(is_active: bool, is_elevated: bool, is_superuser: bool) -> bool {
    trace!("Checking admin panel access");
    (is_active && is_elevated) || is_superuser
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elevated_roles_derive_the_flag() {
        assert!(derive_elevated_access(Role::Manager, false, false));
        assert!(derive_elevated_access(Role::Server, false, false));
        assert!(derive_elevated_access(Role::Cashier, false, false));
        assert!(!derive_elevated_access(Role::Cook, false, false));
        assert!(!derive_elevated_access(Role::Staff, false, false));
    }

    #[test]
    fn derivation_ignores_the_previous_flag_for_regular_accounts() {
        // A stale true flag on a cook must be cleared on save.
        assert!(!derive_elevated_access(Role::Cook, false, true));
        // And a manager regains it even if it was somehow cleared.
        assert!(derive_elevated_access(Role::Manager, false, false));
    }

    #[test]
    fn superusers_keep_their_flag_regardless_of_role() {
        for role in [Role::Manager, Role::Server, Role::Cook, Role::Cashier, Role::Staff] {
            assert!(derive_elevated_access(role, true, true));
        }
    }

    #[test]
    fn role_change_flips_the_flag_for_regular_accounts() {
        let mut flag = derive_elevated_access(Role::Manager, false, false);
        assert!(flag);
        flag = derive_elevated_access(Role::Cook, false, flag);
        assert!(!flag);
    }

    #[test]
    fn admin_access_truth_table() {
        // Active and elevated.
        assert!(can_access_admin(true, true, false));
        // Superuser overrides everything, even inactive.
        assert!(can_access_admin(false, false, true));
        // Elevated but deactivated.
        assert!(!can_access_admin(false, true, false));
        // Active but not elevated.
        assert!(!can_access_admin(true, false, false));
    }
}
