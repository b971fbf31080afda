//! Submission planning: the pure decision of what placing an order means
//! right now.
//!
//! The root reducer calls [`plan_submission`] when the caller asks to
//! place an order, then turns the verdict into effects. Refusals are
//! checked before the identity requirement, so an unsubmittable
//! composition never produces a sign-in demand.

use crate::constructor::ConstructorState;
use crate::types::{IngredientId, User};

/// Why a submission request was refused outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefusalReason {
    /// The composition has no bun
    MissingBun,
    /// Another submission has not finished yet
    SubmissionInFlight,
}

/// Verdict on a submission request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionPlan {
    /// Nothing happens; the composition stays as it is
    Refused(RefusalReason),
    /// The composition is submittable but nobody is signed in
    AuthRequired,
    /// Submit these catalog ids, in transmission order
    Proceed(Vec<IngredientId>),
}

/// Decide what a submission request should do.
#[must_use]
pub fn plan_submission(
    composition: &ConstructorState,
    user: Option<&User>,
    in_flight: bool,
) -> SubmissionPlan {
    let Some(ids) = composition.ordered_ids() else {
        return SubmissionPlan::Refused(RefusalReason::MissingBun);
    };
    if in_flight {
        return SubmissionPlan::Refused(RefusalReason::SubmissionInFlight);
    }
    if user.is_none() {
        return SubmissionPlan::AuthRequired;
    }
    SubmissionPlan::Proceed(ids)
}
