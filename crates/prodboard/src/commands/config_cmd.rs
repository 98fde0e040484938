//! `prodboard config …`: profile wizard and config-file housekeeping.

use dialoguer::{Confirm, Input, Password, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

const REDACTED: &str = "****";

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(),
        ConfigCommand::Show => {
            let cfg = redacted(config::load_config_or_default());
            let out = output::render_single(global.output, &cfg, as_toml, |_| "config".into());
            output::print_output(&out, global.quiet);
            Ok(())
        }
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
        ConfigCommand::Profiles => {
            list_profiles(global);
            Ok(())
        }
        ConfigCommand::Use { name } => use_profile(name),
        ConfigCommand::SetToken { profile } => {
            let cfg = config::load_config_or_default();
            let name = profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));
            let token = ask_token(&format!("API token for '{name}'"))?;
            config::store_api_token(&name, &token)?;
            eprintln!("✓ Token for '{name}' saved to the system keyring");
            Ok(())
        }
    }
}

fn list_profiles(global: &GlobalOpts) {
    let cfg = config::load_config_or_default();
    if cfg.profiles.is_empty() {
        eprintln!("No profiles yet. Create one with: prodboard config init");
        return;
    }

    let active = config::active_profile_name(global, &cfg);
    let mut names: Vec<&String> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        if *name == active {
            println!("{name} *");
        } else {
            println!("{name}");
        }
    }
}

fn use_profile(name: String) -> Result<(), CliError> {
    let mut cfg = config::load_config_or_default();
    if !cfg.profiles.contains_key(&name) {
        return Err(CliError::ProfileNotFound {
            available: config::available_profiles(&cfg),
            name,
        });
    }

    eprintln!("✓ Now using profile '{name}'");
    cfg.default_profile = Some(name);
    config::save_config(&cfg)?;
    Ok(())
}

/// Adds or replaces one profile and makes it the default; the rest of the
/// file is left alone.
fn init() -> Result<(), CliError> {
    let path = config::config_path();
    eprintln!("Setting up prodboard ({})\n", path.display());
    let mut cfg = config::load_config_or_default();

    let name: String = Input::new()
        .with_prompt("Profile")
        .default(prodboard_config::DEFAULT_PROFILE.into())
        .interact_text()
        .map_err(prompt_failed)?;

    let endpoint: String = Input::new()
        .with_prompt("Server URL")
        .default(prodboard_core::DEFAULT_ENDPOINT.into())
        .validate_with(|input: &String| match url::Url::parse(input) {
            Ok(_) => Ok(()),
            Err(e) => Err(format!("not a URL: {e}")),
        })
        .interact_text()
        .map_err(prompt_failed)?;

    let needs_token = Confirm::new()
        .with_prompt("Send a bearer token with requests?")
        .default(false)
        .interact()
        .map_err(prompt_failed)?;

    let mut api_token = None;
    if needs_token {
        let token = ask_token("API token")?;
        if keep_in_file()? {
            api_token = Some(token);
        } else {
            config::store_api_token(&name, &token)?;
            eprintln!("✓ Token saved to the system keyring");
        }
    }

    cfg.profiles.insert(
        name.clone(),
        Profile {
            endpoint,
            api_token,
            ..Profile::default()
        },
    );
    cfg.default_profile = Some(name.clone());
    config::save_config(&cfg)?;

    eprintln!("\n✓ Wrote {} (default profile: {name})", path.display());
    eprintln!("  Try: prodboard products list");
    Ok(())
}

fn ask_token(prompt: &str) -> Result<String, CliError> {
    let token = Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(prompt_failed)?;
    if token.is_empty() {
        return Err(CliError::Validation {
            field: "api_token".into(),
            reason: "token cannot be empty".into(),
        });
    }
    Ok(token)
}

/// `true` when the user picks the plaintext config file over the keyring.
fn keep_in_file() -> Result<bool, CliError> {
    let choice = Select::new()
        .with_prompt("Store the token in")
        .items(&["system keyring", "config file (plaintext)"])
        .default(0)
        .interact()
        .map_err(prompt_failed)?;
    Ok(choice == 1)
}

fn prompt_failed(e: dialoguer::Error) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn redacted(mut cfg: Config) -> Config {
    for token in cfg.profiles.values_mut().filter_map(|p| p.api_token.as_mut()) {
        REDACTED.clone_into(token);
    }
    cfg
}

fn as_toml(cfg: &Config) -> String {
    toml::to_string_pretty(cfg).expect("config always serializes to TOML")
}
