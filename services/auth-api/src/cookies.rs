//! Refresh cookie construction
//!
//! The refresh token only ever travels in an httpOnly cookie; it is
//! never exposed to page scripts.

use std::time::Duration;

use crate::extractors::REFRESH_COOKIE;

/// Build the Set-Cookie value that installs a refresh token
pub fn refresh_cookie(token: &str, max_age: Duration, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; SameSite=Strict; Path=/; Max-Age={}",
        REFRESH_COOKIE,
        token,
        max_age.as_secs()
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Build the Set-Cookie value that removes the refresh cookie
pub fn clear_refresh_cookie(secure: bool) -> String {
    let mut cookie = format!(
        "{}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0",
        REFRESH_COOKIE
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}
