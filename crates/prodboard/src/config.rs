//! CLI configuration: thin wrapper around `prodboard_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--endpoint, --api-token, etc.).

use std::time::Duration;

use secrecy::SecretString;

use prodboard_config::ConfigError;
use prodboard_core::{ControllerConfig, TlsVerification};

use clap::ValueEnum;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use prodboard_config::{
    Config, Defaults, Profile, config_path, load_config, load_config_or_default, resolve_profile,
    save_config, store_api_token,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| prodboard_config::DEFAULT_PROFILE.into())
}

/// Sorted, comma-separated profile names for help text.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<&str> = config.profiles.keys().map(String::as_str).collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort_unstable();
    names.join(", ")
}

/// Fill `output` and `color` from the flags, falling back to `[defaults]`.
pub fn apply_output_defaults(global: &mut GlobalOpts, defaults: &Defaults) -> Result<(), CliError> {
    global.output = match global.output_flag {
        Some(format) => format,
        None => parse_setting::<OutputFormat>("defaults.output", &defaults.output)?,
    };
    global.color = match global.color_flag {
        Some(mode) => mode,
        None => parse_setting::<ColorMode>("defaults.color", &defaults.color)?,
    };
    Ok(())
}

fn parse_setting<T: ValueEnum>(key: &str, value: &str) -> Result<T, CliError> {
    T::from_str(value, true).map_err(|_| {
        let allowed: Vec<String> = T::value_variants()
            .iter()
            .filter_map(T::to_possible_value)
            .map(|v| v.get_name().to_owned())
            .collect();
        CliError::Config {
            message: format!("{key} = \"{value}\" is not one of: {}", allowed.join(", ")),
        }
    })
}

/// Build a `ControllerConfig` from the config file, profile, and flags.
///
/// Flag values take priority over profile values, which take priority
/// over `[defaults]`.
pub fn build_controller_config(global: &GlobalOpts) -> Result<ControllerConfig, CliError> {
    let cfg = load_config()?;
    let (profile_name, profile) =
        resolve_profile(&cfg, global.profile.as_deref()).map_err(|e| match e {
            ConfigError::ProfileNotFound { name } => CliError::ProfileNotFound {
                name,
                available: available_profiles(&cfg),
            },
            other => other.into(),
        })?;

    // 1. Endpoint (flag > env > profile)
    let url_str = global.endpoint.as_deref().unwrap_or(&profile.endpoint);
    let url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
        field: "endpoint".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    // 2. Token (flag > profile env var > keyring > plaintext)
    let api_token = match global.api_token {
        Some(ref token) => Some(SecretString::from(token.clone())),
        None => prodboard_config::resolve_api_token(&profile, &profile_name),
    };

    // 3. TLS verification
    let tls = if global.insecure || profile.insecure.unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    // 4. Timeout and page size
    let timeout = global
        .timeout
        .or(profile.timeout)
        .unwrap_or(cfg.defaults.timeout);
    let page_size = match global.page_size {
        Some(n) => usize::try_from(n).map_err(|_| CliError::Validation {
            field: "page-size".into(),
            reason: format!("{n} is too large"),
        })?,
        None => profile.page_size.unwrap_or(cfg.defaults.page_size),
    };

    Ok(ControllerConfig {
        url,
        api_token,
        tls,
        timeout: Duration::from_secs(timeout),
        page_size,
    })
}
