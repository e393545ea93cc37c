//! # Hash Password Utility
//!
//! Prints the Argon2 hash to put in `ADMIN_PASSWORD_HASH`.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --package hash-password --bin hash_password -- 'my-admin-password'
//! ```
//!
//! Without an argument the password is read from the first line of stdin.

use anyhow::{bail, Context};
use std::io::{self, BufRead, Write};

fn main() -> anyhow::Result<()> {
    let password = match std::env::args().nth(1) {
        Some(password) => password,
        None => read_password()?,
    };

    if password.is_empty() {
        bail!("Password must not be empty");
    }

    let hash = lib_auth::hash_password(&password).context("Failed to hash password")?;
    println!("{}", hash);
    Ok(())
}

fn read_password() -> anyhow::Result<String> {
    eprint!("Admin password: ");
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
