use anyhow::{Context, Result};

/// Smallest and largest accepted thumbnail pixel ratio.
const PIXEL_RATIO_RANGE: (f32, f32) = (0.25, 4.0);

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub s3_bucket: String,
    pub s3_endpoint: String,
    /// Base of public asset links. Defaults to the S3 endpoint.
    pub s3_public_url: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub thumbnail_pixel_ratio: f32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let s3_endpoint = require_env("S3_ENDPOINT")?;
        Ok(Config {
            s3_bucket: require_env("S3_BUCKET")?,
            s3_public_url: optional_env("S3_PUBLIC_URL").unwrap_or_else(|| s3_endpoint.clone()),
            s3_endpoint,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: parse_port(optional_env("PORT").as_deref())?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            thumbnail_pixel_ratio: parse_pixel_ratio(
                optional_env("THUMBNAIL_PIXEL_RATIO").as_deref(),
            )?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank are the same thing.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_port(raw: Option<&str>) -> Result<u16> {
    raw.unwrap_or("8080")
        .trim()
        .parse::<u16>()
        .context("PORT must be a valid port number")
}

fn parse_pixel_ratio(raw: Option<&str>) -> Result<f32> {
    let Some(raw) = raw else {
        return Ok(1.0);
    };
    let ratio = raw
        .trim()
        .parse::<f32>()
        .context("THUMBNAIL_PIXEL_RATIO must be a number")?;
    anyhow::ensure!(ratio.is_finite(), "THUMBNAIL_PIXEL_RATIO must be finite");
    Ok(ratio.clamp(PIXEL_RATIO_RANGE.0, PIXEL_RATIO_RANGE.1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port(None).unwrap(), 8080);
        assert_eq!(parse_port(Some(" 3000 ")).unwrap(), 3000);
        assert!(parse_port(Some("http")).is_err());
        assert!(parse_port(Some("70000")).is_err());
    }

    #[test]
    fn test_parse_pixel_ratio_defaults_and_clamps() {
        assert_eq!(parse_pixel_ratio(None).unwrap(), 1.0);
        assert_eq!(parse_pixel_ratio(Some("2")).unwrap(), 2.0);
        assert_eq!(parse_pixel_ratio(Some("0.01")).unwrap(), 0.25);
        assert_eq!(parse_pixel_ratio(Some("16")).unwrap(), 4.0);
    }

    #[test]
    fn test_parse_pixel_ratio_rejects_garbage() {
        assert!(parse_pixel_ratio(Some("retina")).is_err());
        assert!(parse_pixel_ratio(Some("NaN")).is_err());
    }
}
