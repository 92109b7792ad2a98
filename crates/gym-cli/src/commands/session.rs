use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use inquire::{Password, Text};

use gym_domain::{Context, Credentials, Theme};
use gym_store::Connection;

#[derive(Args, Debug)]
pub struct Login {
    #[clap(short, long)]
    pub username: Option<String>,
    /// Prompted for when omitted
    #[clap(short, long)]
    pub password: Option<String>,
}

impl Login {
    pub async fn run(self, db: &Connection, ctx: &Context, credentials: &Credentials) -> Result<()> {
        let username = match self.username {
            Some(username) => username,
            None => Text::new("Username:").prompt()?,
        };
        let password = match self.password {
            Some(password) => password,
            None => Password::new("Password:").without_confirmation().prompt()?,
        };

        if !db.login(ctx, credentials, &username, &password).await? {
            bail!("Invalid username or password.");
        }
        println!("Logged in as {}.", username);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct Logout {}

impl Logout {
    pub async fn run(self, db: &Connection) -> Result<()> {
        db.logout().await?;
        println!("Logged out.");
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct Whoami {}

impl Whoami {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match db.session().await {
            Some(session) if session.is_authenticated => println!(
                "{} (since {})",
                session.username,
                session.login_time.format("%Y-%m-%d %H:%M")
            ),
            _ => println!("Not logged in."),
        }
        Ok(())
    }
}

#[derive(Subcommand, Debug)]
pub enum ThemeCommand {
    /// Show the stored theme
    #[clap(name = "show")]
    Show,
    #[clap(name = "toggle")]
    Toggle,
    #[clap(name = "set")]
    Set {
        /// `dark` or `light`
        theme: Theme,
    },
}

impl ThemeCommand {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let theme = match self {
            ThemeCommand::Show => db.theme().await,
            ThemeCommand::Toggle => db.toggle_theme().await?,
            ThemeCommand::Set { theme } => {
                db.set_theme(theme).await?;
                theme
            }
        };
        println!("Theme: {}", theme);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;

    fn credentials() -> Credentials {
        Credentials {
            username: "admin".to_string(),
            password: "secret".to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_logout() {
        let db = Connection::open_test().await;
        let ctx = Context::at(DateTime::parse_from_rfc3339("2024-03-15T10:00:00+00:00").unwrap());

        let wrong = Login {
            username: Some("admin".to_string()),
            password: Some("nope".to_string()),
        };
        assert!(wrong.run(&db, &ctx, &credentials()).await.is_err());
        assert!(!db.is_authenticated().await);

        let right = Login {
            username: Some("admin".to_string()),
            password: Some("secret".to_string()),
        };
        right.run(&db, &ctx, &credentials()).await.unwrap();
        assert!(db.is_authenticated().await);

        Logout {}.run(&db).await.unwrap();
        assert!(!db.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_theme_commands() {
        let db = Connection::open_test().await;
        ThemeCommand::Toggle.run(&db).await.unwrap();
        assert_eq!(db.theme().await, Theme::Dark);
        ThemeCommand::Set { theme: Theme::Light }.run(&db).await.unwrap();
        assert_eq!(db.theme().await, Theme::Light);
    }
}
