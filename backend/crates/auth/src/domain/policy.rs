//! Permission Evaluator
//!
//! Pure, transport-free authorization rules. Request-level checks run
//! before any row is loaded; the object-level check needs the loaded
//! row's author. Callers convert [`Decision::Deny`] into a 403 with a
//! generic denial message.

use kernel::id::UserId;

use crate::domain::value_object::UserRole;

/// The acting principal, resolved from the bearer token (or absent)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Principal {
    /// No (valid) credential presented
    Anonymous,
    /// Authenticated user
    Known {
        user_id: UserId,
        role: UserRole,
        is_staff: bool,
    },
}

impl Principal {
    #[inline]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Principal::Known { .. })
    }

    /// Admin role, or the platform staff override
    #[inline]
    pub const fn has_admin_rights(&self) -> bool {
        match self {
            Principal::Known { role, is_staff, .. } => role.is_admin() || *is_staff,
            Principal::Anonymous => false,
        }
    }

    /// Moderator capability (moderator role; admin/staff qualify too)
    #[inline]
    pub const fn has_moderator_rights(&self) -> bool {
        match self {
            Principal::Known { role, .. } => role.is_moderator() || self.has_admin_rights(),
            Principal::Anonymous => false,
        }
    }

    #[inline]
    pub const fn user_id(&self) -> Option<&UserId> {
        match self {
            Principal::Known { user_id, .. } => Some(user_id),
            Principal::Anonymous => None,
        }
    }
}

/// Operation class: safe (read-only) or mutating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Write,
}

impl Action {
    #[inline]
    pub const fn is_safe(&self) -> bool {
        matches!(self, Action::Read)
    }
}

/// Authorization outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    #[inline]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    #[inline]
    const fn from_bool(allowed: bool) -> Self {
        if allowed { Decision::Allow } else { Decision::Deny }
    }
}

/// Reference data (categories, genres, titles): anyone reads,
/// admin-or-staff writes
pub const fn allow_reference(principal: &Principal, action: Action) -> Decision {
    Decision::from_bool(action.is_safe() || principal.has_admin_rights())
}

/// User-generated content (reviews, comments), request level:
/// anyone reads, any authenticated principal may attempt a write
///
/// Finer-grained authorship rules apply at object level.
pub const fn allow_content(principal: &Principal, action: Action) -> Decision {
    Decision::from_bool(action.is_safe() || principal.is_authenticated())
}

/// User-generated content, object level: safe methods bypass; a write
/// needs authorship, moderator capability, or admin/staff capability
pub fn allow_content_object(principal: &Principal, action: Action, author_id: &UserId) -> Decision {
    if action.is_safe() {
        return Decision::Allow;
    }
    let allowed = match principal.user_id() {
        Some(user_id) => {
            user_id == author_id
                || principal.has_moderator_rights()
                || principal.has_admin_rights()
        }
        None => false,
    };
    Decision::from_bool(allowed)
}

/// The `/users/` collection: admin-or-staff only, reads included
pub const fn allow_user_admin(principal: &Principal) -> Decision {
    Decision::from_bool(principal.has_admin_rights())
}

/// The `/users/me/` self-service subset: exactly the acting principal
pub const fn allow_self(principal: &Principal) -> Decision {
    Decision::from_bool(principal.is_authenticated())
}
