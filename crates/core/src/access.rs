//! Note access policy.
//!
//! Decides, for a `(requester, note, operation)` triple, whether a request
//! may proceed, must be bounced to the login page, or must be answered as if
//! the note did not exist. Denials on owner-only operations are always
//! reported as [`Decision::NotFound`], so a non-owner cannot tell "not mine"
//! from "doesn't exist".

use crate::types::UserId;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Who is making the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requester {
    Anonymous,
    User(UserId),
}

impl Requester {
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Requester::Anonymous => None,
            Requester::User(id) => Some(*id),
        }
    }
}

/// Every page the service exposes, by what it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Home,
    Login,
    Logout,
    Signup,
    List,
    Create,
    Success,
    View,
    Edit,
    Delete,
}

impl Operation {
    /// Pages anyone may open, logged in or not.
    pub fn is_public(self) -> bool {
        matches!(
            self,
            Operation::Home | Operation::Login | Operation::Logout | Operation::Signup
        )
    }

    /// Operations scoped to a single note that only its author may perform.
    pub fn is_owner_only(self) -> bool {
        matches!(self, Operation::View | Operation::Edit | Operation::Delete)
    }
}

/// Outcome of [`authorize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    RequireLogin,
    NotFound,
}

/// Anything that has exactly one owning user.
pub trait Owned {
    fn owner_id(&self) -> UserId;
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Decide whether `requester` may perform `operation`.
///
/// `note` is the target of owner-only operations; it is ignored otherwise.
/// A missing note on an owner-only operation yields [`Decision::NotFound`]
/// for authenticated requesters, exactly like a note owned by someone else.
pub fn authorize<N: Owned + ?Sized>(
    requester: Requester,
    note: Option<&N>,
    operation: Operation,
) -> Decision {
    if operation.is_public() {
        return Decision::Allow;
    }

    let Requester::User(user_id) = requester else {
        return Decision::RequireLogin;
    };

    if !operation.is_owner_only() {
        return Decision::Allow;
    }

    match note {
        Some(note) if note.owner_id() == user_id => Decision::Allow,
        _ => Decision::NotFound,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    struct Owner(UserId);

    impl Owned for Owner {
        fn owner_id(&self) -> UserId {
            self.0
        }
    }

    const AUTHOR: UserId = 1;
    const OTHER: UserId = 2;

    const ALL: [Operation; 10] = [
        Operation::Home,
        Operation::Login,
        Operation::Logout,
        Operation::Signup,
        Operation::List,
        Operation::Create,
        Operation::Success,
        Operation::View,
        Operation::Edit,
        Operation::Delete,
    ];

    const OWNER_ONLY: [Operation; 3] = [Operation::View, Operation::Edit, Operation::Delete];

    #[test]
    fn public_pages_allow_everyone() {
        let note = Owner(AUTHOR);
        for op in ALL.into_iter().filter(|op| op.is_public()) {
            assert_eq!(authorize(Requester::Anonymous, Some(&note), op), Decision::Allow);
            assert_eq!(authorize(Requester::User(OTHER), Some(&note), op), Decision::Allow);
        }
    }

    #[test]
    fn anonymous_requires_login_everywhere_else() {
        let note = Owner(AUTHOR);
        for op in ALL.into_iter().filter(|op| !op.is_public()) {
            assert_eq!(
                authorize(Requester::Anonymous, Some(&note), op),
                Decision::RequireLogin,
                "{op:?}"
            );
            assert_eq!(
                authorize::<Owner>(Requester::Anonymous, None, op),
                Decision::RequireLogin,
                "{op:?}"
            );
        }
    }

    #[test]
    fn any_user_may_list_create_and_see_success() {
        for op in [Operation::List, Operation::Create, Operation::Success] {
            assert_eq!(authorize::<Owner>(Requester::User(OTHER), None, op), Decision::Allow);
        }
    }

    #[test]
    fn author_is_allowed_on_own_note() {
        let note = Owner(AUTHOR);
        for op in OWNER_ONLY {
            assert_eq!(authorize(Requester::User(AUTHOR), Some(&note), op), Decision::Allow);
        }
    }

    #[test]
    fn other_user_gets_not_found_never_forbidden() {
        let note = Owner(AUTHOR);
        for op in OWNER_ONLY {
            assert_eq!(authorize(Requester::User(OTHER), Some(&note), op), Decision::NotFound);
        }
    }

    #[test]
    fn missing_note_is_not_found() {
        for op in OWNER_ONLY {
            assert_eq!(
                authorize::<Owner>(Requester::User(AUTHOR), None, op),
                Decision::NotFound
            );
        }
    }

    #[test]
    fn requester_helpers() {
        assert_eq!(Requester::Anonymous.user_id(), None);
        assert_eq!(Requester::User(7).user_id(), Some(7));
    }
}
