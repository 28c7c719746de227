use clap::Parser;

/// Connect to a MySQL server and run SQL commands.
#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// The MySQL server host (IP address or domain name)
    pub host: String,

    /// The MySQL username
    pub user: String,

    /// The MySQL password
    pub password: String,
}
