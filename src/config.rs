use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How passwords are written to and compared against the credentials file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PasswordScheme {
    /// Clear text, compatible with existing credential files
    Plain,
    /// Salted bcrypt hash
    Bcrypt,
}

#[derive(Debug, Clone, Parser)]
#[clap(version, about = "Signup and login pages backed by a JSON credentials file")]
pub struct Config {
    /// Sets the address the server will listen on
    #[clap(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Sets the port number the server will try to bind to
    #[clap(short, long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Sets the path of the JSON credentials file
    #[clap(long = "data-file", env = "CREDENTIALS_FILE", default_value = "credentials.json")]
    pub data_file: PathBuf,

    /// Sets the directory holding the HTML views
    #[clap(long = "templates-dir", env = "TEMPLATES_DIR", default_value = "templates")]
    pub templates_dir: PathBuf,

    /// Sets how passwords are stored
    #[clap(long = "password-scheme", env = "PASSWORD_SCHEME", value_enum, default_value = "plain")]
    pub password_scheme: PasswordScheme,
}

impl Config {
    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
