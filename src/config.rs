use std::{env, path::PathBuf};

use anyhow::Context;

/// Password accepted until the admin sets one through the settings screen.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub public_dir: PathBuf,
    pub uploads_dir: PathBuf,
    pub jwt_secret: String,
    pub initial_admin_password: String,
    pub max_upload_bytes: usize,
    pub public_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET is not set")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .or_else(|_| env::var("PORT"))
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let data_dir = env::var("DATA_DIR").map_or_else(|_| PathBuf::from("data"), PathBuf::from);
        let public_dir =
            env::var("PUBLIC_DIR").map_or_else(|_| PathBuf::from("public"), PathBuf::from);
        let uploads_dir = env::var("UPLOADS_DIR")
            .map_or_else(|_| public_dir.join("uploads"), PathBuf::from);
        let initial_admin_password =
            env::var("ADMIN_PASSWORD").unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string());
        let max_upload_bytes = env::var("MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);
        let public_url = env::var("PUBLIC_URL").ok().filter(|u| !u.is_empty());

        Ok(Self {
            host,
            port,
            data_dir,
            public_dir,
            uploads_dir,
            jwt_secret,
            initial_admin_password,
            max_upload_bytes,
            public_url,
        })
    }

    pub fn rooted_at(root: impl Into<PathBuf>, jwt_secret: impl Into<String>) -> Self {
        let root = root.into();
        let public_dir = root.join("public");
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            data_dir: root.join("data"),
            uploads_dir: public_dir.join("uploads"),
            public_dir,
            jwt_secret: jwt_secret.into(),
            initial_admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            public_url: None,
        }
    }

    pub fn base_url(&self) -> String {
        self.public_url
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.port))
    }
}
