use clap::Parser;
use std::path::PathBuf;

const DEFAULT_PASSWORD: &str = "2580";

#[derive(Debug, Clone, Parser)]
#[command(about = "Appointment booking service for a small clinic")]
pub struct Configuration {
    /// Port the HTTP server listens on.
    #[arg(long, default_value_t = 3000)]
    pub port: u16,

    /// JSON data file holding the catalog and the bookings. Everything is
    /// impersistent when omitted.
    #[arg(long)]
    pub data_file: Option<PathBuf>,

    /// Operator password for the admin routes.
    #[arg(long)]
    pub password: Option<String>,

    /// Re-check reschedules for collisions instead of trusting the
    /// operator to override double-booking protection.
    #[arg(long)]
    pub strict_reschedule: bool,
}

impl Configuration {
    pub fn parse_arguments() -> Self {
        Self::parse()
    }

    /// Explicit flag first, then the ADMIN_PASSWORD environment variable,
    /// then the built-in default.
    pub fn admin_password(&self) -> String {
        self.password
            .clone()
            .or_else(|| std::env::var("ADMIN_PASSWORD").ok())
            .unwrap_or_else(|| DEFAULT_PASSWORD.into())
    }
}
