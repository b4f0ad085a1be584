//! Login and signup forms. Both write the [`SessionStore`] on success.

use api_types::user::{Login, SignupNew, User};

use crate::{
    error::{ClientError, StoreError},
    remote::Backend,
    session::SessionStore,
};

pub const LOGIN_FAILED: &str = "Login failed.";
pub const SIGNUP_FAILED: &str = "Signup failed. Try different values.";

/// Submission flags shared by the auth forms.
#[derive(Debug, Default)]
pub struct AuthState {
    pub submitting: bool,
    pub error: Option<String>,
}

impl AuthState {
    fn begin(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.submitting = true;
        self.error = None;
        true
    }

    fn finish(
        &mut self,
        result: Result<User, ClientError>,
        session: &mut SessionStore,
        fallback: &str,
    ) -> bool {
        self.submitting = false;
        match result {
            Ok(user) => {
                tracing::info!(user_id = user.id, "logged in");
                if let Err(err) = session.set(Some(user)) {
                    tracing::warn!("failed to persist session: {err}");
                }
                true
            }
            Err(err) => {
                tracing::info!("authentication failed: {err}");
                self.error = Some(err.user_message(fallback));
                false
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoginField {
    #[default]
    Identifier,
    Password,
}

#[derive(Debug, Default)]
pub struct LoginForm {
    /// Email or username.
    pub identifier: String,
    pub password: String,
    pub focus: LoginField,
    pub state: AuthState,
}

impl LoginForm {
    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            LoginField::Identifier => LoginField::Password,
            LoginField::Password => LoginField::Identifier,
        };
    }

    pub fn active_field_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Identifier => &mut self.identifier,
            LoginField::Password => &mut self.password,
        }
    }

    /// Validates required fields. An identifier with `@` is sent as email.
    pub fn payload(&self) -> Result<Login, String> {
        let identifier = self.identifier.trim();
        if identifier.is_empty() || self.password.is_empty() {
            return Err("Fill in all fields.".to_string());
        }
        let (email, username) = if identifier.contains('@') {
            (Some(identifier.to_string()), None)
        } else {
            (None, Some(identifier.to_string()))
        };
        Ok(Login {
            email,
            username,
            password: self.password.clone(),
        })
    }

    /// Returns the request to send, or `None` when the form is busy or
    /// incomplete (the error is set in that case).
    pub fn begin(&mut self) -> Option<Login> {
        if self.state.submitting {
            return None;
        }
        match self.payload() {
            Ok(payload) => self.state.begin().then_some(payload),
            Err(message) => {
                self.state.error = Some(message);
                None
            }
        }
    }

    /// Applies the backend response; `true` when the user is now logged in.
    pub fn finish(&mut self, result: Result<User, ClientError>, session: &mut SessionStore) -> bool {
        let logged_in = self.state.finish(result, session, LOGIN_FAILED);
        if logged_in {
            self.password.clear();
        }
        logged_in
    }

    pub async fn submit<B: Backend>(&mut self, backend: &B, session: &mut SessionStore) -> bool {
        let Some(payload) = self.begin() else {
            return false;
        };
        let result = backend.login(&payload).await;
        self.finish(result, session)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SignupField {
    #[default]
    Username,
    Email,
    Password,
}

#[derive(Debug, Default)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub focus: SignupField,
    pub state: AuthState,
}

impl SignupForm {
    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            SignupField::Username => SignupField::Email,
            SignupField::Email => SignupField::Password,
            SignupField::Password => SignupField::Username,
        };
    }

    pub fn active_field_mut(&mut self) -> &mut String {
        match self.focus {
            SignupField::Username => &mut self.username,
            SignupField::Email => &mut self.email,
            SignupField::Password => &mut self.password,
        }
    }

    pub fn payload(&self) -> Result<SignupNew, String> {
        let username = self.username.trim();
        let email = self.email.trim();
        if username.is_empty() || email.is_empty() || self.password.is_empty() {
            return Err("Fill in all fields.".to_string());
        }
        Ok(SignupNew {
            username: username.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
        })
    }

    pub fn begin(&mut self) -> Option<SignupNew> {
        if self.state.submitting {
            return None;
        }
        match self.payload() {
            Ok(payload) => self.state.begin().then_some(payload),
            Err(message) => {
                self.state.error = Some(message);
                None
            }
        }
    }

    pub fn finish(&mut self, result: Result<User, ClientError>, session: &mut SessionStore) -> bool {
        let logged_in = self.state.finish(result, session, SIGNUP_FAILED);
        if logged_in {
            self.password.clear();
        }
        logged_in
    }

    pub async fn submit<B: Backend>(&mut self, backend: &B, session: &mut SessionStore) -> bool {
        let Some(payload) = self.begin() else {
            return false;
        };
        let result = backend.signup(&payload).await;
        self.finish(result, session)
    }
}

/// Ends the session. Page controllers notice the change on their next mount.
///
/// The in-memory session is always cleared. An error means the persisted
/// record is still on disk and would log the user back in on the next start.
pub fn logout(session: &mut SessionStore) -> Result<(), StoreError> {
    if let Some(user) = session.get() {
        tracing::info!(user_id = user.id, "logged out");
    }
    session.clear().inspect_err(|err| {
        tracing::warn!("failed to clear persisted session: {err}");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        session::SESSION_KEY,
        storage::{MemoryStorage, Storage},
    };

    fn alice() -> User {
        User {
            id: 1,
            username: "alice".to_string(),
            email: "a@b.com".to_string(),
            created_at: "2024-01-01T00:00:00".to_string(),
        }
    }

    #[test]
    fn login_routes_identifier_by_shape() {
        let mut form = LoginForm {
            identifier: "a@b.com".to_string(),
            password: "x".to_string(),
            ..LoginForm::default()
        };
        let payload = form.payload().unwrap();
        assert_eq!(payload.email.as_deref(), Some("a@b.com"));
        assert!(payload.username.is_none());

        form.identifier = " alice ".to_string();
        let payload = form.payload().unwrap();
        assert_eq!(payload.username.as_deref(), Some("alice"));
        assert!(payload.email.is_none());
    }

    #[test]
    fn login_requires_both_fields() {
        let mut form = LoginForm {
            identifier: "alice".to_string(),
            ..LoginForm::default()
        };
        assert!(form.begin().is_none());
        assert!(form.state.error.is_some());
        assert!(!form.state.submitting);
    }

    #[test]
    fn successful_login_writes_the_session() {
        let storage = MemoryStorage::new();
        let mut session = SessionStore::restore(storage.clone());
        let mut form = LoginForm {
            identifier: "a@b.com".to_string(),
            password: "x".to_string(),
            ..LoginForm::default()
        };

        assert!(form.begin().is_some());
        assert!(form.begin().is_none(), "second submit while busy is refused");
        assert!(form.finish(Ok(alice()), &mut session));
        assert_eq!(session.user_id(), Some(1));
        assert!(storage.contains(SESSION_KEY));
        assert!(form.password.is_empty());
    }

    #[test]
    fn failed_signup_uses_backend_detail_or_fallback() {
        let mut session = SessionStore::restore(MemoryStorage::new());
        let mut form = SignupForm {
            username: "alice".to_string(),
            email: "a@b.com".to_string(),
            password: "pw".to_string(),
            ..SignupForm::default()
        };

        form.begin();
        let err = ClientError::from_status(400, Some("Username or email already taken".to_string()));
        assert!(!form.finish(Err(err), &mut session));
        assert_eq!(form.state.error.as_deref(), Some("Username or email already taken"));

        form.begin();
        assert!(!form.finish(Err(ClientError::from_status(500, None)), &mut session));
        assert_eq!(form.state.error.as_deref(), Some(SIGNUP_FAILED));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn logout_clears_the_session() {
        let storage = MemoryStorage::new();
        let mut session = SessionStore::restore(storage.clone());
        session.set(Some(alice())).unwrap();
        logout(&mut session).unwrap();
        assert!(!session.is_authenticated());
        assert!(!storage.contains(SESSION_KEY));
    }

    struct StuckStorage(MemoryStorage);

    impl Storage for StuckStorage {
        fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.0.read(key)
        }

        fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.0.write(key, value)
        }

        fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Poisoned)
        }
    }

    #[test]
    fn logout_reports_a_record_left_on_disk() {
        let storage = MemoryStorage::new();
        let mut session = SessionStore::restore(StuckStorage(storage.clone()));
        session.set(Some(alice())).unwrap();

        assert!(logout(&mut session).is_err());
        assert!(!session.is_authenticated());
        assert!(storage.contains(SESSION_KEY));
    }
}
