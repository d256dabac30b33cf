use serde::Serialize;
use thiserror::Error;

use courier_core::{MessageRecord, UserId};

use crate::{Principal, Role};

/// The action being authorized.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessAction {
    Read,
    Create,
    Update,
    Delete,
}

impl AccessAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            AccessAction::Read => "read",
            AccessAction::Create => "create",
            AccessAction::Update => "update",
            AccessAction::Delete => "delete",
        }
    }
}

impl core::fmt::Display for AccessAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of an access decision. There are no conditional grants.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    Allow,
    Forbid,
}

impl AccessDecision {
    pub fn is_allowed(self) -> bool {
        self == AccessDecision::Allow
    }
}

/// Ownership anchor of an existing message: who sent it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MessageOwnership {
    pub sender_id: UserId,
}

impl From<&MessageRecord> for MessageOwnership {
    fn from(value: &MessageRecord) -> Self {
        Self {
            sender_id: value.sender_id(),
        }
    }
}

/// An action together with the context it needs.
///
/// Read/update/delete carry the ownership of a message the caller has already
/// fetched; a missing message is the caller's not-found outcome and never
/// reaches the engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AccessRequest {
    Read(MessageOwnership),
    Create {
        /// Explicit sender requested by the client, if any.
        sender_override: Option<UserId>,
    },
    Update(MessageOwnership),
    Delete(MessageOwnership),
}

impl AccessRequest {
    pub fn read(message: &MessageRecord) -> Self {
        Self::Read(message.into())
    }

    pub fn create(sender_override: Option<UserId>) -> Self {
        Self::Create { sender_override }
    }

    pub fn update(message: &MessageRecord) -> Self {
        Self::Update(message.into())
    }

    pub fn delete(message: &MessageRecord) -> Self {
        Self::Delete(message.into())
    }

    pub fn action(&self) -> AccessAction {
        match self {
            AccessRequest::Read(_) => AccessAction::Read,
            AccessRequest::Create { .. } => AccessAction::Create,
            AccessRequest::Update(_) => AccessAction::Update,
            AccessRequest::Delete(_) => AccessAction::Delete,
        }
    }
}

/// The rule that produced a decision.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionRule {
    /// Admins may read, update and delete any message.
    AdminRole,
    /// The principal sent the message.
    Owner,
    /// A non-admin principal who did not send the message.
    NotOwner,
    /// Create without an explicit sender; the principal is the sender.
    NoOverride,
    /// Create with an explicit sender equal to the principal.
    SelfOverride,
    /// Create with an explicit sender that is someone else.
    Impersonation,
}

impl DecisionRule {
    pub const fn decision(self) -> AccessDecision {
        match self {
            DecisionRule::AdminRole
            | DecisionRule::Owner
            | DecisionRule::NoOverride
            | DecisionRule::SelfOverride => AccessDecision::Allow,
            DecisionRule::NotOwner | DecisionRule::Impersonation => AccessDecision::Forbid,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: principal {principal_id} may not {action} this message")]
    AccessDenied {
        principal_id: UserId,
        action: AccessAction,
    },

    #[error("forbidden: principal {principal_id} may not send as user {requested_sender}")]
    ImpersonationAttempt {
        principal_id: UserId,
        requested_sender: UserId,
    },
}

fn rule_for(principal: &Principal, request: &AccessRequest) -> DecisionRule {
    match *request {
        AccessRequest::Create { sender_override } => match sender_override {
            None => DecisionRule::NoOverride,
            Some(sender) if sender == principal.id => DecisionRule::SelfOverride,
            // Applies to admins too: nobody sends as someone else.
            Some(_) => DecisionRule::Impersonation,
        },
        AccessRequest::Read(owner) | AccessRequest::Update(owner) | AccessRequest::Delete(owner) => {
            if principal.role == Role::Admin {
                DecisionRule::AdminRole
            } else if principal.id == owner.sender_id {
                DecisionRule::Owner
            } else {
                DecisionRule::NotOwner
            }
        }
    }
}

/// Decide whether `principal` may perform `request`.
///
/// - No IO
/// - No panics
/// - Role is checked before ownership
pub fn decide(principal: &Principal, request: &AccessRequest) -> AccessDecision {
    rule_for(principal, request).decision()
}

/// Like [`decide`], but turns a forbid into the matching error.
pub fn enforce(principal: &Principal, request: &AccessRequest) -> Result<(), AuthzError> {
    match rule_for(principal, request) {
        DecisionRule::NotOwner => Err(AuthzError::AccessDenied {
            principal_id: principal.id,
            action: request.action(),
        }),
        DecisionRule::Impersonation => {
            let requested_sender = match *request {
                AccessRequest::Create {
                    sender_override: Some(sender),
                } => sender,
                _ => principal.id,
            };
            Err(AuthzError::ImpersonationAttempt {
                principal_id: principal.id,
                requested_sender,
            })
        }
        _ => Ok(()),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Decision Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of an access decision.
///
/// This structure provides transparent, debuggable information about why
/// a request was allowed or denied.
#[derive(Debug, Clone, Serialize)]
pub struct AccessExplanation {
    pub principal: Principal,
    pub request: AccessRequest,
    pub action: AccessAction,
    pub decision: AccessDecision,
    pub rule: DecisionRule,

    /// Human-readable reason for the decision.
    pub reason: String,
}

/// Explain why a decision was made (or would be made).
pub fn explain(principal: &Principal, request: &AccessRequest) -> AccessExplanation {
    let rule = rule_for(principal, request);
    let action = request.action();

    let reason = match (rule, request) {
        (DecisionRule::AdminRole, _) => {
            format!("principal {} has role '{}'", principal.id, principal.role)
        }
        (DecisionRule::Owner, _) => format!("principal {} sent the message", principal.id),
        (DecisionRule::NotOwner, AccessRequest::Read(o))
        | (DecisionRule::NotOwner, AccessRequest::Update(o))
        | (DecisionRule::NotOwner, AccessRequest::Delete(o)) => format!(
            "message was sent by {}, principal {} has role '{}'",
            o.sender_id, principal.id, principal.role
        ),
        (DecisionRule::NoOverride, _) => {
            format!("no sender requested; principal {} is the sender", principal.id)
        }
        (DecisionRule::SelfOverride, _) => {
            format!("requested sender matches principal {}", principal.id)
        }
        (
            DecisionRule::Impersonation,
            AccessRequest::Create {
                sender_override: Some(sender),
            },
        ) => format!("principal {} requested to send as {}", principal.id, sender),
        (rule, _) => format!("{rule:?}"),
    };

    AccessExplanation {
        principal: *principal,
        request: *request,
        action,
        decision: rule.decision(),
        rule,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use courier_core::MessageId;
    use proptest::prelude::*;

    use super::*;

    fn message_from(sender: i64) -> MessageRecord {
        MessageRecord::new(MessageId::new(1), UserId::new(sender), UserId::new(99), "hello")
    }

    fn existing(sender: i64) -> [AccessRequest; 3] {
        let m = message_from(sender);
        [AccessRequest::read(&m), AccessRequest::update(&m), AccessRequest::delete(&m)]
    }

    #[test]
    fn owner_may_delete_own_message() {
        let p = Principal::user(UserId::new(5));
        let m = message_from(5);
        assert_eq!(decide(&p, &AccessRequest::delete(&m)), AccessDecision::Allow);
    }

    #[test]
    fn user_may_not_update_someone_elses_message() {
        let p = Principal::user(UserId::new(5));
        let m = message_from(9);
        assert_eq!(decide(&p, &AccessRequest::update(&m)), AccessDecision::Forbid);
        assert_eq!(
            enforce(&p, &AccessRequest::update(&m)),
            Err(AuthzError::AccessDenied {
                principal_id: UserId::new(5),
                action: AccessAction::Update,
            })
        );
    }

    #[test]
    fn admin_may_read_any_message() {
        let p = Principal::admin(UserId::new(1));
        let m = message_from(9);
        assert_eq!(decide(&p, &AccessRequest::read(&m)), AccessDecision::Allow);
    }

    #[test]
    fn admin_may_not_send_as_another_user() {
        let p = Principal::admin(UserId::new(5));
        let req = AccessRequest::create(Some(UserId::new(7)));

        assert_eq!(decide(&p, &req), AccessDecision::Forbid);
        assert_eq!(
            enforce(&p, &req),
            Err(AuthzError::ImpersonationAttempt {
                principal_id: UserId::new(5),
                requested_sender: UserId::new(7),
            })
        );
    }

    #[test]
    fn create_without_or_with_own_override_is_allowed() {
        for p in [Principal::admin(UserId::new(5)), Principal::user(UserId::new(5))] {
            assert_eq!(decide(&p, &AccessRequest::create(None)), AccessDecision::Allow);
            assert_eq!(
                decide(&p, &AccessRequest::create(Some(UserId::new(5)))),
                AccessDecision::Allow
            );
        }
    }

    #[test]
    fn explanation_names_the_rule() {
        let p = Principal::user(UserId::new(5));
        let m = message_from(9);

        let e = explain(&p, &AccessRequest::read(&m));
        assert_eq!(e.rule, DecisionRule::NotOwner);
        assert_eq!(e.decision, AccessDecision::Forbid);
        assert_eq!(e.action, AccessAction::Read);
        assert_eq!(e.reason, "message was sent by 9, principal 5 has role 'user'");

        let e = explain(&p, &AccessRequest::create(Some(UserId::new(8))));
        assert_eq!(e.rule, DecisionRule::Impersonation);
        assert_eq!(e.reason, "principal 5 requested to send as 8");
    }

    #[test]
    fn explanation_serializes_for_audit() {
        let p = Principal::admin(UserId::new(1));
        let e = explain(&p, &AccessRequest::delete(&message_from(3)));
        let json = serde_json::to_value(&e).unwrap();

        assert_eq!(json["decision"], "allow");
        assert_eq!(json["rule"], "admin_role");
        assert_eq!(json["principal"]["role"], "admin");
        assert_eq!(json["request"]["action"], "delete");
        assert_eq!(json["request"]["sender_id"], 3);
    }

    fn any_role() -> impl Strategy<Value = Role> {
        prop_oneof![Just(Role::Admin), Just(Role::User)]
    }

    proptest! {
        #[test]
        fn admins_pass_every_existing_message_check(id in any::<i64>(), sender in any::<i64>()) {
            let p = Principal::admin(UserId::new(id));
            for req in existing(sender) {
                prop_assert_eq!(decide(&p, &req), AccessDecision::Allow);
            }
        }

        #[test]
        fn users_pass_only_as_owner(id in -50i64..50, sender in -50i64..50) {
            let p = Principal::user(UserId::new(id));
            let expected = if id == sender { AccessDecision::Allow } else { AccessDecision::Forbid };
            for req in existing(sender) {
                prop_assert_eq!(decide(&p, &req), expected);
                prop_assert_eq!(enforce(&p, &req).is_ok(), expected.is_allowed());
            }
        }

        #[test]
        fn create_forbids_only_foreign_overrides(
            role in any_role(),
            id in -50i64..50,
            sender in proptest::option::of(-50i64..50),
        ) {
            let p = Principal::new(UserId::new(id), role);
            let req = AccessRequest::create(sender.map(UserId::new));
            let expected = match sender {
                Some(s) if s != id => AccessDecision::Forbid,
                _ => AccessDecision::Allow,
            };
            prop_assert_eq!(decide(&p, &req), expected);
            // Pure: repeated calls agree.
            prop_assert_eq!(decide(&p, &req), decide(&p, &req));
        }

        #[test]
        fn explanation_agrees_with_decide(role in any_role(), id in -5i64..5, sender in -5i64..5) {
            let p = Principal::new(UserId::new(id), role);
            for req in existing(sender) {
                prop_assert_eq!(explain(&p, &req).decision, decide(&p, &req));
            }
        }
    }
}
