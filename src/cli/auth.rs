//! CLI handlers for login, whoami, info, and logout.

use crate::auth::service::AuthService;
use crate::auth::AuthError;
use crate::error::{GgiError, Result};

/// Handle `ggi login`.
pub async fn handle_login(service: &AuthService) -> Result<()> {
    println!("Please follow the prompts to log in...");
    let summary = service
        .login(|prompt| {
            println!("🔗 Please visit: {}", prompt.verification_uri);
            println!("📋 and enter code: {}", prompt.user_code);
            println!("⏳ Waiting for authorization...");
        })
        .await?;
    println!("✅ Successfully authenticated as {}!", summary.login);
    Ok(())
}

/// Handle `ggi whoami`.
pub async fn handle_whoami(service: &AuthService) -> Result<()> {
    let login = service.whoami().await?;
    println!("You are {login}");
    Ok(())
}

/// Handle `ggi info`.
pub async fn handle_info(service: &AuthService) -> Result<()> {
    let status = service.status()?;

    if status.logged_in {
        println!("✅ GitHub token exists!");
        match service.whoami().await {
            Ok(login) => println!("You are {login}"),
            Err(GgiError::Auth(err @ AuthError::Unauthorized)) => println!("⚠️  {err}"),
            Err(e) => return Err(e),
        }
    } else {
        println!("❌ GitHub token does not exist. Please use `ggi login` to authorize first.");
    }

    let profile = status.profile;
    if profile.to_do_repos.is_empty() {
        println!("No to-do repos in your profile yet.");
    } else {
        println!("Existing to-do repos:");
        for repo in &profile.to_do_repos {
            println!("  {repo}");
        }
    }
    match profile.current_repo {
        Some(repo) => println!("Current to-do repo: {repo}"),
        None => println!("Current to-do repo: (none)"),
    }
    Ok(())
}

/// Handle `ggi logout`.
pub fn handle_logout(service: &AuthService) -> Result<()> {
    service.logout()?;
    println!("✅ Logged out");
    Ok(())
}
