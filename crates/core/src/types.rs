/// Profile and caller identifiers are opaque strings (Firebase-style uids).
pub type UserId = String;

/// Provider-assigned identifier of an accepted push message.
pub type MessageId = String;

/// The authenticated principal making a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub uid: UserId,
}

impl CallerIdentity {
    pub fn new(uid: impl Into<UserId>) -> Self {
        Self { uid: uid.into() }
    }
}
