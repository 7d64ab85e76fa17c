use storefront_core::SessionId;

/// Browsing session a request belongs to.
///
/// Resolved by the session middleware from the session cookie; a request
/// without a valid cookie gets a fresh session.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SessionContext {
    session_id: SessionId,
    is_new: bool,
}

impl SessionContext {
    pub fn existing(session_id: SessionId) -> Self {
        Self {
            session_id,
            is_new: false,
        }
    }

    pub fn fresh() -> Self {
        Self {
            session_id: SessionId::new(),
            is_new: true,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// True when the cookie still has to be issued.
    pub fn is_new(&self) -> bool {
        self.is_new
    }
}
