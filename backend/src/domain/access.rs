//! Caller identity and complaint visibility rules.

use super::{Complaint, UserId};

/// Who is making a request, as resolved from the presented secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    /// Holder of the administrator secret.
    Admin,
    /// Registered user identified by their secret.
    User(UserId),
}

impl Caller {
    /// Whether this caller may read `complaint`.
    ///
    /// Administrators see every complaint; users only their own.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use complaint_desk::domain::{Caller, Complaint, ComplaintDraft, ComplaintId, UserId};
    ///
    /// let owner = UserId::new("owner").expect("valid id");
    /// let draft = ComplaintDraft::try_from_parts("Noise", "", 3).expect("valid draft");
    /// let id = ComplaintId::new("c1").expect("valid id");
    /// let complaint = Complaint::open(id, owner.clone(), draft, Utc::now());
    ///
    /// assert!(Caller::Admin.may_view(&complaint));
    /// assert!(Caller::User(owner).may_view(&complaint));
    /// let stranger = UserId::new("stranger").expect("valid id");
    /// assert!(!Caller::User(stranger).may_view(&complaint));
    /// ```
    pub fn may_view(&self, complaint: &Complaint) -> bool {
        match self {
            Self::Admin => true,
            Self::User(id) => complaint.user_id() == id,
        }
    }

    /// Whether this caller holds the administrator secret.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ComplaintDraft, ComplaintId};
    use chrono::Utc;
    use rstest::{fixture, rstest};

    fn user(id: &str) -> UserId {
        UserId::new(id).expect("valid user id")
    }

    #[fixture]
    fn complaint() -> Complaint {
        let draft = ComplaintDraft::try_from_parts("Cold soup", "", 1).expect("valid draft");
        Complaint::open(
            ComplaintId::new("c-1").expect("valid id"),
            user("owner"),
            draft,
            Utc::now(),
        )
    }

    #[rstest]
    #[case(Caller::Admin, true)]
    #[case(Caller::User(user("owner")), true)]
    #[case(Caller::User(user("someone-else")), false)]
    fn visibility_follows_ownership(
        complaint: Complaint,
        #[case] caller: Caller,
        #[case] expected: bool,
    ) {
        assert_eq!(caller.may_view(&complaint), expected);
    }

    #[rstest]
    fn only_admin_reports_admin() {
        assert!(Caller::Admin.is_admin());
        assert!(!Caller::User(user("owner")).is_admin());
    }
}
