//! Setup and session commands
//!
//! `init` writes the backend configuration; the rest inspect or reset the
//! saved session.

use clap::Args;

use super::context::CliContext;
use crate::config::{BackendConfig, PlannerPaths, Settings};
use crate::error::{PlannerError, PlannerResult};

/// Arguments for `init`
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Application id that namespaces all stored documents
    #[arg(long, default_value = "wedding-planner")]
    pub app_id: String,

    /// Accepted sign-in token, as TOKEN=USER_ID (repeatable)
    #[arg(long = "token-grant", value_name = "TOKEN=USER_ID")]
    pub token_grants: Vec<String>,

    /// Token to sign in with when no session is saved
    #[arg(long)]
    pub bootstrap_token: Option<String>,

    /// Refuse anonymous sign-in
    #[arg(long)]
    pub no_anonymous: bool,

    /// Overwrite an existing configuration
    #[arg(short, long)]
    pub force: bool,
}

fn parse_grant(grant: &str) -> PlannerResult<(String, String)> {
    match grant.split_once('=') {
        Some((token, uid)) if !token.trim().is_empty() && !uid.trim().is_empty() => {
            Ok((token.trim().to_string(), uid.trim().to_string()))
        }
        _ => Err(PlannerError::Validation(format!(
            "Token harus berbentuk TOKEN=USER_ID: {}",
            grant
        ))),
    }
}

/// Write the backend configuration and default settings
pub fn handle_init_command(paths: &PlannerPaths, args: InitArgs) -> PlannerResult<()> {
    if paths.backend_file().exists() && !args.force {
        return Err(PlannerError::Config(format!(
            "Sudah diinisialisasi di {}. Gunakan --force untuk menimpa.",
            paths.base_dir().display()
        )));
    }

    let mut backend = BackendConfig::new(args.app_id);
    backend.anonymous_sign_in = !args.no_anonymous;
    for grant in &args.token_grants {
        let (token, uid) = parse_grant(grant)?;
        backend.tokens.insert(token, uid);
    }
    backend.save(paths)?;

    let mut settings = Settings::load_or_create(paths)?;
    settings.session_uid = None;
    settings.bootstrap_token = args.bootstrap_token;
    settings.save(paths)?;

    println!("Wedding Planner diinisialisasi di: {}", paths.base_dir().display());
    println!("App ID: {}", backend.app_id);
    if !backend.tokens.is_empty() {
        println!("Token terdaftar: {}", backend.tokens.len());
    }
    Ok(())
}

/// Show paths and settings
pub fn handle_config_command(paths: &PlannerPaths) -> PlannerResult<()> {
    let settings = Settings::load_or_create(paths)?;

    println!("Wedding Planner Configuration");
    println!("=============================");
    println!("Base directory: {}", paths.base_dir().display());
    println!("Store file:     {}", paths.store_file().display());
    println!("Audit log:      {}", paths.audit_log().display());
    println!();

    match BackendConfig::load(paths) {
        Ok(backend) => {
            println!("Backend:");
            println!("  App ID:            {}", backend.app_id);
            println!("  Tokens:            {}", backend.tokens.len());
            println!("  Anonymous sign-in: {}", backend.anonymous_sign_in);
        }
        Err(e) => println!("Backend: {}", e),
    }
    println!();
    println!("Settings:");
    println!(
        "  Session:            {}",
        settings.session_uid.as_deref().unwrap_or("(none)")
    );
    println!("  Near-limit percent: {}", settings.near_limit_percent);
    println!("  Due-soon days:      {}", settings.due_soon_days);
    Ok(())
}

/// Show the signed-in user and how they signed in
pub fn handle_whoami_command(ctx: &CliContext) -> PlannerResult<()> {
    let signed_in = ctx.app.signed_in();
    println!("Pengguna Aktif: {}", signed_in.user_id);
    println!("{}", signed_in.method.message());
    if let Some(namespace) = ctx.app.namespace() {
        println!("Namespace: artifacts/{}/users/{}", namespace.app_id(), namespace.user_id());
    }
    Ok(())
}

/// Forget the saved session; the next command signs in again
pub fn handle_signout_command(paths: &PlannerPaths) -> PlannerResult<()> {
    let mut settings = Settings::load_or_create(paths)?;
    match settings.session_uid.take() {
        Some(uid) => {
            settings.save(paths)?;
            println!("Keluar dari sesi {}.", uid);
        }
        None => println!("Tidak ada sesi aktif."),
    }
    Ok(())
}
