//! Google OAuth: consent in the browser, code exchange on a local callback.

use std::path::PathBuf;

use anyhow::{Context, Result};
use google_calendar::Client;
use holiday_core::{AuthError, Credential, IdentityProvider};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

use crate::GoogleCredentials;
use crate::session::Session;

const REDIRECT_PORT: u16 = 8085;

pub fn redirect_uri() -> String {
    format!("http://localhost:{}/callback", REDIRECT_PORT)
}

pub fn redirect_address() -> String {
    format!("127.0.0.1:{}", REDIRECT_PORT)
}

/// Issues Google access tokens, reusing the stored session when possible.
pub struct GoogleIdentity {
    client_secret: String,
    session_path: PathBuf,
    force_consent: bool,
}

impl GoogleIdentity {
    pub fn new(client_secret: impl Into<String>) -> Result<Self> {
        Ok(GoogleIdentity {
            client_secret: client_secret.into(),
            session_path: Session::default_path()?,
            force_consent: false,
        })
    }

    /// Ignore any stored session and always ask the user again.
    pub fn force_consent(mut self) -> Self {
        self.force_consent = true;
        self
    }

    async fn credential(&self, client_id: &str, scope: &str) -> Result<Credential> {
        let creds = GoogleCredentials {
            client_id: client_id.to_string(),
            client_secret: self.client_secret.clone(),
        };

        let stored = if self.force_consent {
            None
        } else {
            Session::load(&self.session_path)?
        };

        if let Some(mut session) = stored {
            if !session.is_expired() {
                tracing::debug!("reusing stored Google session");
                return Ok(Credential::new(session.access_token()));
            }

            if session.can_refresh() {
                tracing::info!("access token expired, refreshing");
                match session.refresh(&creds).await {
                    Ok(()) => {
                        session.save(&self.session_path)?;
                        return Ok(Credential::new(session.access_token()));
                    }
                    Err(e) => tracing::warn!("{:#}, asking for consent again", e),
                }
            }
        }

        let session = consent(&creds, scope).await?;
        session.save(&self.session_path)?;

        Ok(Credential::new(session.access_token()))
    }
}

impl IdentityProvider for GoogleIdentity {
    async fn request_credential(
        &self,
        client_id: &str,
        scope: &str,
    ) -> Result<Credential, AuthError> {
        self.credential(client_id, scope)
            .await
            .map_err(|e| AuthError::Unavailable(format!("{:#}", e)))
    }
}

/// Run the browser consent flow and exchange the code for tokens.
async fn consent(creds: &GoogleCredentials, scope: &str) -> Result<Session> {
    let scopes: Vec<String> = scope.split_whitespace().map(str::to_string).collect();

    let mut client = Client::new(
        creds.client_id.clone(),
        creds.client_secret.clone(),
        redirect_uri(),
        String::new(),
        String::new(),
    );

    let auth_url = client.user_consent_url(&scopes);

    // Bind before opening the browser so the redirect can't beat us
    let listener = TcpListener::bind(redirect_address())
        .await
        .context("Failed to bind OAuth callback listener")?;

    eprintln!("\nOpen this URL in your browser to authenticate:\n");
    eprintln!("{}\n", auth_url);

    if open::that(&auth_url).is_err() {
        eprintln!("(Could not open browser automatically, please copy the URL above)");
    }

    let callback = wait_for_callback(listener).await?;
    let (code, state) = match callback {
        Callback::Code { code, state } => (code, state),
        Callback::Denied(reason) => anyhow::bail!("Authorization denied: {}", reason),
    };

    tracing::info!("received authorization code, exchanging for tokens");

    let tokens = client
        .get_access_token(&code, &state)
        .await
        .context("Failed to exchange code for tokens")?;

    Ok((&tokens).into())
}

#[derive(Debug, PartialEq)]
enum Callback {
    Code { code: String, state: String },
    Denied(String),
}

async fn wait_for_callback(listener: TcpListener) -> Result<Callback> {
    let (stream, _) = listener
        .accept()
        .await
        .context("Failed to accept OAuth callback")?;

    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader
        .read_line(&mut request_line)
        .await
        .context("Failed to read OAuth callback request line")?;

    let callback = parse_callback(&request_line)?;

    let body = match callback {
        Callback::Code { .. } => {
            "<h1>Authentication successful!</h1>\
            <p>You can close this window and return to the terminal.</p>"
        }
        Callback::Denied(_) => "<h1>Authentication cancelled.</h1>",
    };

    let response = format!(
        "HTTP/1.1 200 OK\r\n\
        Content-Type: text/html\r\n\
        Connection: close\r\n\
        \r\n\
        <html><body>{}</body></html>",
        body
    );

    let mut stream = reader.into_inner();
    stream
        .write_all(response.as_bytes())
        .await
        .context("Failed to write OAuth callback response")?;
    stream.flush().await?;

    Ok(callback)
}

/// Parse `GET /callback?code=...&state=... HTTP/1.1`.
fn parse_callback(request_line: &str) -> Result<Callback> {
    let url_part = request_line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("Invalid HTTP request"))?;

    let url = url::Url::parse(&format!("http://localhost{}", url_part))?;
    let param = |name: &str| {
        url.query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.to_string())
    };

    if let Some(error) = param("error") {
        return Ok(Callback::Denied(error));
    }

    let code = param("code").ok_or_else(|| anyhow::anyhow!("No code in callback"))?;
    let state = param("state").ok_or_else(|| anyhow::anyhow!("No state in callback"))?;

    Ok(Callback::Code { code, state })
}
