static INIT: std::sync::Once = std::sync::Once::new();

pub fn setup_env() {
    INIT.call_once(|| {
        dotenvy::dotenv().ok();
    })
}

pub async fn test_database() -> crate::database::Database {
    setup_env();
    let settings = crate::settings::OpsConfig::load(None).unwrap();

    crate::database::Database::connect(&settings.database)
        .await
        .expect("Failed to connect to db")
}
