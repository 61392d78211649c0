use hg_config::GuardConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &GuardConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &GuardConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.notify.is_configured() && has_env_prefix(&env_keys, "HEALTHGUARD_NOTIFY") {
        warnings.push(
            "Notification gateway appears unset while HEALTHGUARD_NOTIFY* env vars exist. Use double underscores (example: HEALTHGUARD_NOTIFY__GATEWAY_URL)."
                .to_string(),
        );
    }

    if has_single_underscore_key(&env_keys, "HEALTHGUARD_MONITOR") {
        warnings.push(
            "HEALTHGUARD_MONITOR_* env vars are ignored. Use double underscores (example: HEALTHGUARD_MONITOR__SYNTHESIS_PROBABILITY)."
                .to_string(),
        );
    }

    if has_single_underscore_key(&env_keys, "HEALTHGUARD_STORAGE") {
        warnings.push(
            "HEALTHGUARD_STORAGE_* env vars are ignored. Use double underscores (example: HEALTHGUARD_STORAGE__STATE_PATH)."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}

fn has_single_underscore_key(keys: &[String], prefix: &str) -> bool {
    let single = format!("{prefix}_");
    let double = format!("{prefix}__");
    keys.iter()
        .any(|key| key.starts_with(&single) && !key.starts_with(&double))
}
