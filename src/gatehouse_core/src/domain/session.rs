use serde::Serialize;

use super::account::AccountId;

/// Identity carried by a verified session token.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionIdentity {
    pub account_id: AccountId,
    pub username: String,
    pub email: Option<String>,
}

impl SessionIdentity {
    /// Name shown in the navigation partial: username, falling back to the
    /// email address, falling back to an empty string.
    pub fn display_name(&self) -> &str {
        if !self.username.is_empty() {
            return &self.username;
        }
        self.email.as_deref().unwrap_or("")
    }
}

/// What the sign-in corner of a page needs to know. An anonymous request
/// renders the same shape with the flag off rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub is_authenticated: bool,
    pub display_name: String,
}

impl SessionView {
    pub fn anonymous() -> Self {
        Self {
            is_authenticated: false,
            display_name: String::new(),
        }
    }
}

impl From<Option<SessionIdentity>> for SessionView {
    fn from(identity: Option<SessionIdentity>) -> Self {
        match identity {
            Some(identity) => Self {
                is_authenticated: true,
                display_name: identity.display_name().to_owned(),
            },
            None => Self::anonymous(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(username: &str, email: Option<&str>) -> SessionIdentity {
        SessionIdentity {
            account_id: AccountId::new(),
            username: username.to_owned(),
            email: email.map(str::to_owned),
        }
    }

    #[test]
    fn display_name_prefers_the_username() {
        assert_eq!(identity("alice", Some("a@x.com")).display_name(), "alice");
    }

    #[test]
    fn display_name_falls_back_to_email_then_empty() {
        assert_eq!(identity("", Some("a@x.com")).display_name(), "a@x.com");
        assert_eq!(identity("", None).display_name(), "");
    }

    #[test]
    fn view_from_no_identity_is_anonymous() {
        let view = SessionView::from(None);
        assert!(!view.is_authenticated);
        assert_eq!(view.display_name, "");
    }

    #[test]
    fn view_serializes_with_camel_case_keys() {
        let view = SessionView::from(Some(identity("alice", None)));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["isAuthenticated"], true);
        assert_eq!(json["displayName"], "alice");
    }
}
