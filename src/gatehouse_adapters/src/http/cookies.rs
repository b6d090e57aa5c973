use axum_extra::extract::cookie::{Cookie, SameSite};

// Create cookie and set the value to the passed-in token string
pub fn create_auth_cookie(token: String, cookie_name: &str) -> Cookie<'static> {
    Cookie::build((cookie_name.to_owned(), token))
        .path("/") // apply cookie to all URLs on the server
        .http_only(true) // prevent JavaScript from accessing the cookie
        .secure(true)
        .same_site(SameSite::Lax) // send cookie with "same-site" requests, and with "cross-site" top-level navigations.
        .build()
}

pub fn create_removal_cookie(cookie_name: &str) -> Cookie<'static> {
    let mut cookie = create_auth_cookie(String::new(), cookie_name);
    cookie.make_removal();
    cookie
}
