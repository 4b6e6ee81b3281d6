//! Request headers
//!
//! The platform only serves its web API to something that looks like a
//! desktop browser carrying a logged-in session cookie.

use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, COOKIE, HeaderMap, HeaderValue,
    UPGRADE_INSECURE_REQUESTS, USER_AGENT,
};
use scout_core::domain::credential::SessionCredential;

use crate::error::{PlatformError, Result};

const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3";
const BROWSER_LANGUAGE: &str = "zh-CN,zh;q=0.9,en;q=0.8";
const BROWSER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_14_0) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/73.0.3683.103 Safari/537.36";

/// Builds the header set sent with every platform request
pub fn browser_headers(credential: &SessionCredential) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let cookie =
        HeaderValue::from_str(credential.expose()).map_err(|_| PlatformError::InvalidCredential)?;
    headers.insert(COOKIE, cookie);
    headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(BROWSER_LANGUAGE));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_AGENT));
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_carry_cookie() {
        let headers = browser_headers(&SessionCredential::new("wt2=abc")).unwrap();
        assert_eq!(headers.get(COOKIE).unwrap(), "wt2=abc");
        assert!(headers.get(USER_AGENT).is_some());
    }

    #[test]
    fn test_invalid_cookie_is_rejected() {
        let result = browser_headers(&SessionCredential::new("bad\ncookie"));
        assert!(matches!(result, Err(PlatformError::InvalidCredential)));
    }
}
