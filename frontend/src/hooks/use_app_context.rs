use shared::{FullReload, ReloadPolicy};
use std::rc::Rc;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::config::AppConfig;

/// Dependencies every view reads, provided once at the root
#[derive(Clone)]
pub struct AppContext {
    pub api: ApiClient,
    pub config: Rc<AppConfig>,
    pub reload_policy: Rc<dyn ReloadPolicy>,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        Self {
            api: ApiClient::with_base_url(config.api_base_url.clone()),
            config: Rc::new(config),
            reload_policy: Rc::new(FullReload),
        }
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl PartialEq for AppContext {
    fn eq(&self, other: &Self) -> bool {
        self.api == other.api
            && Rc::ptr_eq(&self.config, &other.config)
            && std::ptr::eq(
                Rc::as_ptr(&self.reload_policy) as *const (),
                Rc::as_ptr(&other.reload_policy) as *const (),
            )
    }
}

/// The root context, or defaults when rendered outside the provider
#[hook]
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_follows_configured_base_url() {
        let context = AppContext::new(AppConfig {
            api_base_url: "https://bank.example.org/api".to_string(),
            ..AppConfig::default()
        });
        assert_eq!(context.api.base_url(), "https://bank.example.org/api");
    }

    #[test]
    fn test_clones_compare_equal() {
        let context = AppContext::default();
        assert!(context == context.clone());
        assert!(context != AppContext::default());
    }
}
