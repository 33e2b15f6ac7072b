use config::ConfigError;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub tokens: TokenSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    pub port: u16,
}

/// Token signing settings
///
/// Access and refresh tokens are signed with distinct secrets so that a
/// token of one kind can never verify as the other.
#[derive(serde::Deserialize, Clone)]
pub struct TokenSettings {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl: i64,  // seconds (e.g., 900 for 15 minutes)
    pub refresh_ttl: i64, // seconds (e.g., 604800 for 7 days)
    /// Clock-skew tolerance in seconds applied during verification.
    pub leeway: i64,
}

/// Environment layout: ACCESS_SECRET, REFRESH_SECRET, ACCESS_TTL,
/// REFRESH_TTL are required; PORT and LEEWAY are optional.
#[derive(serde::Deserialize)]
struct EnvSettings {
    #[serde(default = "default_port")]
    port: u16,
    access_secret: String,
    refresh_secret: String,
    access_ttl: i64,
    refresh_ttl: i64,
    #[serde(default)]
    leeway: i64,
}

fn default_port() -> u16 {
    3000
}

/// Load settings from the environment.
///
/// Any missing or invalid required variable is a fatal startup error;
/// configuration is never checked per request.
pub fn get_configuration() -> Result<Settings, ConfigError> {
    let source = config::Config::builder()
        .add_source(config::Environment::default())
        .build()?;
    let env: EnvSettings = source.try_deserialize()?;

    let settings = Settings {
        application: ApplicationSettings { port: env.port },
        tokens: TokenSettings {
            access_secret: env.access_secret,
            refresh_secret: env.refresh_secret,
            access_ttl: env.access_ttl,
            refresh_ttl: env.refresh_ttl,
            leeway: env.leeway,
        },
    };
    validate(&settings.tokens)?;

    Ok(settings)
}

fn validate(tokens: &TokenSettings) -> Result<(), ConfigError> {
    if tokens.access_secret.is_empty() {
        return Err(ConfigError::Message(
            "ACCESS_SECRET must not be empty".to_string(),
        ));
    }
    if tokens.refresh_secret.is_empty() {
        return Err(ConfigError::Message(
            "REFRESH_SECRET must not be empty".to_string(),
        ));
    }
    // Kind separation depends on the secrets differing.
    if tokens.access_secret == tokens.refresh_secret {
        return Err(ConfigError::Message(
            "ACCESS_SECRET and REFRESH_SECRET must differ".to_string(),
        ));
    }
    if tokens.access_ttl <= 0 {
        return Err(ConfigError::Message(
            "ACCESS_TTL must be a positive number of seconds".to_string(),
        ));
    }
    if tokens.refresh_ttl <= 0 {
        return Err(ConfigError::Message(
            "REFRESH_TTL must be a positive number of seconds".to_string(),
        ));
    }
    if tokens.leeway < 0 {
        return Err(ConfigError::Message(
            "LEEWAY must not be negative".to_string(),
        ));
    }
    Ok(())
}
