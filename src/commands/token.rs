use crate::keyring;
use anyhow::Result;

pub fn set(token: &str) -> Result<()> {
    keyring::store_sync_token(token)?;
    println!("✓ Sync token stored in keyring");
    Ok(())
}

pub fn clear() -> Result<()> {
    keyring::delete_sync_token()?;
    println!("✓ Sync token removed from keyring");
    Ok(())
}
