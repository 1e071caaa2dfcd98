//! Print a `users.password_hash` value for a password read from stdin
//!
//! `echo -n 'P@ssw0rd!' | cargo run --bin hash_password`

use std::io::{self, Read};

use codecamp_common::hash_secret;

fn main() -> anyhow::Result<()> {
    let mut password = String::new();
    io::stdin().read_to_string(&mut password)?;
    let password = password.trim_end_matches(['\r', '\n']);

    if password.is_empty() {
        anyhow::bail!("expected a password on stdin");
    }

    let hash = hash_secret(password).map_err(|e| anyhow::anyhow!("salt generation failed: {e}"))?;
    println!("{hash}");
    Ok(())
}
