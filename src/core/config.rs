use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub storage_path: String,
    pub db_path: String,
    pub unsplash_access_key: Option<String>,
    pub pexels_api_key: Option<String>,
    pub unsplash_api_url: String,
    pub pexels_api_url: String,
    pub picsum_url: String,
    pub unsplash_source_url: String,
    pub auth_api_url: String,
    pub auth_service_key: String,
}

/// Treat unset and blank variables the same so an empty key in a
/// `.env` file doesn't enable a paid source.
fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Default for AppConfig {
    fn default() -> Self {
        let storage_path = env::var("ASSETHUB_STORAGE_PATH").unwrap_or("./".to_string());
        let db_path = format!("{}/db", storage_path);
        let unsplash_access_key = optional_var("ASSETHUB_UNSPLASH_ACCESS_KEY");
        let pexels_api_key = optional_var("ASSETHUB_PEXELS_API_KEY");
        let unsplash_api_url = env::var("ASSETHUB_UNSPLASH_API_URL")
            .unwrap_or_else(|_| "https://api.unsplash.com".to_string());
        let pexels_api_url = env::var("ASSETHUB_PEXELS_API_URL")
            .unwrap_or_else(|_| "https://api.pexels.com/v1".to_string());
        let picsum_url =
            env::var("ASSETHUB_PICSUM_URL").unwrap_or_else(|_| "https://picsum.photos".to_string());
        let unsplash_source_url = env::var("ASSETHUB_UNSPLASH_SOURCE_URL")
            .unwrap_or_else(|_| "https://source.unsplash.com".to_string());
        let auth_api_url = env::var("ASSETHUB_AUTH_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:54321".to_string());
        let auth_service_key = env::var("ASSETHUB_AUTH_SERVICE_KEY").unwrap_or_default();

        Self {
            storage_path,
            db_path,
            unsplash_access_key,
            pexels_api_key,
            unsplash_api_url,
            pexels_api_url,
            picsum_url,
            unsplash_source_url,
            auth_api_url,
            auth_service_key,
        }
    }
}
