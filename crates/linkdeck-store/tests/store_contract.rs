use chrono::{TimeZone, Utc};
use linkdeck_model::{Configuration, User, Username};
use linkdeck_store::{LocalFsStore, MemoryStore, ProfileStore, StoreErrorCode, UserRecord};
use tempfile::tempdir;

fn mk_username(name: &str) -> Username {
    Username::parse(name).expect("username")
}

fn mk_config(name: &str) -> Configuration {
    Configuration::default_for(mk_username(name), format!("User {name}"))
}

fn mk_record(name: &str, email: &str) -> UserRecord {
    UserRecord {
        user: User {
            id: format!("u-{name}"),
            username: mk_username(name),
            email: email.to_string(),
            name: format!("User {name}"),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().expect("timestamp"),
        },
        password_salt: "00".repeat(16),
        password_hash: "11".repeat(32),
    }
}

#[tokio::test]
async fn localfs_config_roundtrip_and_exists() {
    let root = tempdir().expect("tempdir");
    let store = LocalFsStore::new(root.path().to_path_buf());
    let username = mk_username("nitesh");
    let config = mk_config("nitesh");

    assert!(!store.config_exists(&username).await.expect("exists"));
    store.put_config(&username, &config).await.expect("put");
    assert!(store.config_exists(&username).await.expect("exists"));
    let loaded = store.fetch_config(&username).await.expect("fetch");
    assert_eq!(loaded, config);
}

#[tokio::test]
async fn localfs_fetch_missing_config_reports_not_found() {
    let root = tempdir().expect("tempdir");
    let store = LocalFsStore::new(root.path().to_path_buf());
    let err = store
        .fetch_config(&mk_username("ghost"))
        .await
        .expect_err("missing key");
    assert_eq!(err.code, StoreErrorCode::NotFound);
    assert!(err.is_not_found());
}

#[tokio::test]
async fn localfs_put_overwrites_whole_document() {
    let root = tempdir().expect("tempdir");
    let store = LocalFsStore::new(root.path().to_path_buf());
    let username = mk_username("nitesh");

    let mut first = mk_config("nitesh");
    first.profile.bio = "first".to_string();
    store.put_config(&username, &first).await.expect("put");

    let mut second = mk_config("nitesh");
    second.profile.bio = "second".to_string();
    store.put_config(&username, &second).await.expect("overwrite");

    let loaded = store.fetch_config(&username).await.expect("fetch");
    assert_eq!(loaded.profile.bio, "second");
}

#[tokio::test]
async fn localfs_leaves_no_temp_files_behind() {
    let root = tempdir().expect("tempdir");
    let store = LocalFsStore::new(root.path().to_path_buf());
    let username = mk_username("nitesh");
    store
        .put_config(&username, &mk_config("nitesh"))
        .await
        .expect("put");

    let configs_dir = root.path().join("configs");
    let leftovers: Vec<_> = std::fs::read_dir(&configs_dir)
        .expect("read dir")
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp files must be renamed away");
}

#[tokio::test]
async fn localfs_user_lookup_by_email_is_case_insensitive() {
    let root = tempdir().expect("tempdir");
    let store = LocalFsStore::new(root.path().to_path_buf());
    let record = mk_record("nitesh", "nitesh@example.com");
    store.put_user(&record).await.expect("put user");

    let by_username = store.fetch_user(&mk_username("nitesh")).await.expect("fetch");
    assert_eq!(by_username, record);

    let by_email = store
        .fetch_user_by_email("Nitesh@Example.COM")
        .await
        .expect("fetch by email");
    assert_eq!(by_email.user.id, record.user.id);

    let err = store
        .fetch_user_by_email("unknown@example.com")
        .await
        .expect_err("unknown email");
    assert!(err.is_not_found());
}

#[tokio::test]
async fn memory_store_honors_the_same_contract() {
    let store = MemoryStore::new();
    let username = mk_username("akshay");
    let config = mk_config("akshay");

    assert!(store
        .fetch_config(&username)
        .await
        .expect_err("missing")
        .is_not_found());
    store.put_config(&username, &config).await.expect("put");
    assert!(store.config_exists(&username).await.expect("exists"));
    assert_eq!(store.fetch_config(&username).await.expect("fetch"), config);

    let record = mk_record("akshay", "akshay@example.com");
    store.put_user(&record).await.expect("put user");
    assert_eq!(
        store
            .fetch_user_by_email("AKSHAY@example.com")
            .await
            .expect("by email")
            .user
            .username
            .as_str(),
        "akshay"
    );
}
