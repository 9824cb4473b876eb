use api_types::auth::Credentials;

use crate::client::{Client, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Debug)]
pub struct LoginView {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
    pub message: Option<String>,
}

impl LoginView {
    pub fn new() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            focus: LoginField::Email,
            message: None,
        }
    }

    pub fn advance_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }

    pub fn active_field_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    /// Exchanges the credentials for a token and stores it in `session`.
    /// Returns `true` once signed in.
    pub async fn submit(&mut self, client: &Client, session: &mut Session) -> bool {
        let email = self.email.trim();
        let password = self.password.as_str();
        if email.is_empty() || password.is_empty() {
            self.message = Some("Please fill in all fields".to_string());
            return false;
        }

        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        match client.login(session, &credentials).await {
            Ok(auth) => {
                session.sign_in(auth.token);
                if session.is_authenticated() {
                    self.password.clear();
                    self.message = None;
                    true
                } else {
                    self.message = Some("Login returned an empty token".to_string());
                    false
                }
            }
            Err(err) => {
                self.message = Some(err.to_string());
                false
            }
        }
    }
}

impl Default for LoginView {
    fn default() -> Self {
        Self::new()
    }
}
