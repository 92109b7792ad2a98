use anyhow::Result;
use tracing::{info, warn};

use gym_domain::{AuthSession, Context, Credentials, Theme};

use crate::Connection;

pub const AUTH_KEY: &str = "auth";
pub const THEME_KEY: &str = "theme";

impl Connection {
    /// Check the credentials and persist the login flag. Returns
    /// `false`, writing nothing, when they do not match.
    pub async fn login(
        &self,
        ctx: &Context,
        credentials: &Credentials,
        username: &str,
        password: &str,
    ) -> Result<bool> {
        if !credentials.accepts(username, password) {
            warn!(username, "rejected login");
            return Ok(false);
        }
        let session = AuthSession {
            username: username.to_string(),
            login_time: ctx.now,
            is_authenticated: true,
        };
        let data = serde_json::to_string(&session)?;
        self.lock().await.set_raw(AUTH_KEY, &data).await?;
        info!(username, "logged in");
        Ok(true)
    }

    pub async fn logout(&self) -> Result<()> {
        self.lock().await.remove_raw(AUTH_KEY).await?;
        info!("logged out");
        Ok(())
    }

    /// The stored login, if any and readable.
    pub async fn session(&self) -> Option<AuthSession> {
        let data = self.raw(AUTH_KEY).await?;
        serde_json::from_str(&data).ok()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session()
            .await
            .map(|s| s.is_authenticated)
            .unwrap_or(false)
    }

    /// Stored theme. Anything but "dark" counts as light.
    pub async fn theme(&self) -> Theme {
        match self.raw(THEME_KEY).await {
            Some(data) if data.trim().trim_matches('"') == "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<()> {
        self.lock().await.set_raw(THEME_KEY, theme.as_str()).await?;
        Ok(())
    }

    pub async fn toggle_theme(&self) -> Result<Theme> {
        let theme = self.theme().await.toggled();
        self.set_theme(theme).await?;
        Ok(theme)
    }
}
