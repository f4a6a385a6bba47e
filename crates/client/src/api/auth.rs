use chrono::Utc;
use lightbox_core::record::validate::require;
use lightbox_core::session::{Credentials, LoginResponse, Session};
use reqwest::Method;

use crate::error::ClientResult;
use crate::http::StudioClient;

const LOGIN_PATH: &str = "/api/auth/login";

impl StudioClient {
    /// `POST /api/auth/login`. On success the session is stored on this
    /// client (and every clone of it) until [`logout`](Self::logout).
    pub async fn login(&self, credentials: &Credentials) -> ClientResult<Session> {
        require("email", credentials.email.as_str())?;
        require("password", credentials.password.as_str())?;

        let request = self.request(Method::POST, LOGIN_PATH).json(credentials);
        let response: LoginResponse = self.send_json(request, LOGIN_PATH).await?;
        let session = Session::issue(response, Utc::now());
        tracing::info!(user_id = %session.user_id, role = ?session.role, "signed in");
        self.session().set(session.clone());
        Ok(session)
    }

    /// Drop the session locally. Returns it if one was active.
    pub fn logout(&self) -> Option<Session> {
        let ended = self.session().clear();
        if let Some(session) = &ended {
            tracing::info!(user_id = %session.user_id, "signed out");
        }
        ended
    }
}
