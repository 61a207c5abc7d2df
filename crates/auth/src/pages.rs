//! Default [`PageMapper`] implementation.

use url::form_urlencoded;

use gatehouse_core::auth::PageMapper;

/// Maps flow outcomes to three fixed page paths, carrying the outcome
/// details as query parameters (`service`, `state`, `code`, `error`).
#[derive(Debug, Clone)]
pub struct SimplePageMapper {
    login_page: String,
    logout_page: String,
    error_page: String,
}

impl SimplePageMapper {
    pub fn new(login_page: &str, logout_page: &str, error_page: &str) -> Self {
        Self {
            login_page: login_page.to_string(),
            logout_page: logout_page.to_string(),
            error_page: error_page.to_string(),
        }
    }
}

impl Default for SimplePageMapper {
    fn default() -> Self {
        Self::new("/login.html", "/logout.html", "/error.html")
    }
}

impl PageMapper for SimplePageMapper {
    fn login_landing_page(&self, provider: &str, state: &str, code: &str) -> String {
        let query: String = form_urlencoded::Serializer::new(String::new())
            .append_pair("service", provider)
            .append_pair("state", state)
            .append_pair("code", code)
            .finish();
        format!("{}?{}", self.login_page, query)
    }

    fn error_page(&self, provider: &str, message: &str) -> String {
        let query: String = form_urlencoded::Serializer::new(String::new())
            .append_pair("service", provider)
            .append_pair("error", message)
            .finish();
        format!("{}?{}", self.error_page, query)
    }

    fn logout_landing_page(&self, provider: &str) -> String {
        let query: String = form_urlencoded::Serializer::new(String::new())
            .append_pair("service", provider)
            .finish();
        format!("{}?{}", self.logout_page, query)
    }
}
