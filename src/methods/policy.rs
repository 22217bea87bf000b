use crate::model::{User, UserRole};

// The single tenant-isolation predicate. Every organization-scoped handler
// goes through here instead of re-deriving the comparison inline, so one
// omitted check cannot become a cross-tenant leak.
pub fn can_access_org(user: &User, resource_org_id: i32) -> bool {
    if user.role == UserRole::SuperAdmin {
        return true;
    }
    user.organization_id == Some(resource_org_id)
}

pub fn role_in(user: &User, allowed: &[UserRole]) -> bool {
    allowed.contains(&user.role)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrgContextError {
    Missing,
    Forbidden,
}

// Resolves which organization an org-scoped request operates on. Members
// always get their own organization; a super_admin must name one via the
// query string since they belong to none.
pub fn resolve_org_context(
    user: &User,
    requested: Option<i32>,
) -> Result<i32, OrgContextError> {
    match requested {
        Some(org_id) => {
            if can_access_org(user, org_id) {
                Ok(org_id)
            } else {
                Err(OrgContextError::Forbidden)
            }
        }
        None => user.organization_id.ok_or(OrgContextError::Missing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(role: UserRole, org: Option<i32>) -> User {
        User {
            id: 1,
            organization_id: org,
            email: "t@example.com".into(),
            password: "hash".into(),
            first_name: "T".into(),
            last_name: "U".into(),
            phone: None,
            role,
            last_login_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn super_admin_bypasses_org_scope() {
        let admin = user(UserRole::SuperAdmin, None);
        assert!(can_access_org(&admin, 1));
        assert!(can_access_org(&admin, 999));
    }

    #[test]
    fn org_roles_must_match_exactly() {
        for role in [UserRole::OrgOwner, UserRole::OrgAdmin, UserRole::Customer] {
            let member = user(role, Some(4));
            assert!(can_access_org(&member, 4));
            assert!(!can_access_org(&member, 5));
        }
    }

    #[test]
    fn user_without_org_gets_nothing() {
        let orphan = user(UserRole::Customer, None);
        assert!(!can_access_org(&orphan, 1));
    }

    #[test]
    fn org_context_resolution() {
        let member = user(UserRole::OrgAdmin, Some(4));
        assert_eq!(resolve_org_context(&member, None), Ok(4));
        assert_eq!(resolve_org_context(&member, Some(4)), Ok(4));
        assert_eq!(
            resolve_org_context(&member, Some(5)),
            Err(OrgContextError::Forbidden)
        );

        let admin = user(UserRole::SuperAdmin, None);
        assert_eq!(resolve_org_context(&admin, Some(9)), Ok(9));
        assert_eq!(
            resolve_org_context(&admin, None),
            Err(OrgContextError::Missing)
        );
    }

    #[test]
    fn role_guard_checks_membership() {
        let staff = user(UserRole::OrgAdmin, Some(1));
        assert!(role_in(&staff, &[UserRole::OrgOwner, UserRole::OrgAdmin]));
        assert!(!role_in(&staff, &[UserRole::SuperAdmin]));
    }
}
