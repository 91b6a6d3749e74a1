use std::path::PathBuf;

use anyhow::Result;
use uuid::Uuid;

use balcao::session::store::{CredentialStore, FileCredentialStore, TOKEN_KEY, USER_KEY};
use balcao::session::SessionContext;
use balcao::types::UserProfile;

fn temp_store() -> Result<FileCredentialStore> {
    let dir: PathBuf = std::env::temp_dir()
        .join("balcao-tests")
        .join(format!("session_{}", Uuid::new_v4().simple()));
    Ok(FileCredentialStore::new(dir)?)
}

fn sample_user() -> UserProfile {
    UserProfile {
        id: Some(42),
        nome_completo: Some("Carla Mendes".to_string()),
        email: Some("carla@loja.com".to_string()),
        loja_id: Some(3),
        ..Default::default()
    }
}

#[test]
fn login_survives_a_simulated_reload() -> Result<()> {
    let store = temp_store()?;
    let mut session = SessionContext::new(store.clone());
    session.login(sample_user(), "tok-abc".to_string())?;

    // Fresh context over the same directory, as a new process would build.
    let mut reloaded = SessionContext::new(store);
    reloaded.init();

    assert!(reloaded.is_authenticated());
    assert_eq!(reloaded.token(), Some("tok-abc"));
    assert_eq!(reloaded.user(), Some(&sample_user()));
    assert!(!reloaded.is_loading());
    Ok(())
}

#[test]
fn logout_clears_the_directory() -> Result<()> {
    let store = temp_store()?;
    let mut session = SessionContext::new(store.clone());
    session.login(sample_user(), "tok-abc".to_string())?;
    session.logout()?;

    assert_eq!(store.get(TOKEN_KEY)?, None);
    assert_eq!(store.get(USER_KEY)?, None);

    let mut reloaded = SessionContext::new(store);
    reloaded.init();
    assert!(!reloaded.is_authenticated());
    assert!(reloaded.token().is_none());
    assert!(reloaded.user().is_none());
    Ok(())
}

#[test]
fn stray_token_file_does_not_authenticate() -> Result<()> {
    let store = temp_store()?;
    store.put(TOKEN_KEY, "orphan-token")?;

    let mut session = SessionContext::new(store);
    session.init();
    assert!(!session.is_authenticated());
    assert!(session.token().is_none());
    Ok(())
}

#[test]
fn corrupt_user_file_degrades_to_unauthenticated() -> Result<()> {
    let store = temp_store()?;
    store.put(TOKEN_KEY, "tok")?;
    store.put(USER_KEY, "][ not json")?;

    let mut session = SessionContext::new(store);
    session.init();
    assert!(!session.is_authenticated());
    assert!(!session.is_loading());
    Ok(())
}

#[test]
fn repeated_login_writes_identical_files() -> Result<()> {
    let store = temp_store()?;
    let mut session = SessionContext::new(store.clone());

    session.login(sample_user(), "tok-abc".to_string())?;
    let token_once = store.get(TOKEN_KEY)?;
    let user_once = store.get(USER_KEY)?;

    session.login(sample_user(), "tok-abc".to_string())?;
    assert_eq!(store.get(TOKEN_KEY)?, token_once);
    assert_eq!(store.get(USER_KEY)?, user_once);
    assert!(session.is_authenticated());
    Ok(())
}

#[test]
fn stored_profile_keeps_fields_the_client_does_not_model() -> Result<()> {
    let store = temp_store()?;
    let raw = serde_json::json!({
        "id": 1,
        "email": "x@y.com",
        "cargo": "gerente",
        "turno": "noite"
    });
    let user: UserProfile = serde_json::from_value(raw.clone())?;

    let mut session = SessionContext::new(store.clone());
    session.login(user, "tok".to_string())?;

    let persisted: serde_json::Value = serde_json::from_str(&store.get(USER_KEY)?.unwrap())?;
    assert_eq!(persisted, raw);
    Ok(())
}
