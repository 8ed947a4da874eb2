//! Account commands: register, login, logout, whoami.

use anyhow::Result;
use taskdeck_client::SessionStore;

use super::friendly;

pub async fn register(
    session: &SessionStore,
    username: &str,
    email: &str,
    password: &str,
    password_confirm: &str,
) -> Result<()> {
    let auth = session
        .register(username, email, password, password_confirm)
        .await
        .map_err(friendly)?;
    println!("Registered and signed in as {}", auth.user.username);
    Ok(())
}

pub async fn login(session: &SessionStore, username: &str, password: &str) -> Result<()> {
    let auth = session.login(username, password).await.map_err(friendly)?;
    println!("Signed in as {}", auth.user.username);
    Ok(())
}

pub async fn logout(session: &SessionStore) -> Result<()> {
    session.logout().await;
    println!("Signed out");
    Ok(())
}

pub fn whoami(session: &SessionStore) -> Result<()> {
    match session.current_user() {
        Some(user) if session.is_authenticated() => {
            println!("{} <{}>", user.username, user.email);
        }
        _ => println!("Not signed in"),
    }
    Ok(())
}
