//! One-shot user-visible messages carried across a redirect in a cookie.

use actix_web::HttpRequest;
use actix_web::cookie::{Cookie, SameSite, time::Duration};

/// Cookie holding a pending flash message.
pub const FLASH_COOKIE: &str = "foodblog_flash";

/// Flash messages only need to survive one redirect.
const FLASH_MAX_AGE_SECS: i64 = 60;

/// Build a cookie carrying `message` to the next page view.
pub fn flash_cookie(message: &str) -> Cookie<'static> {
    let mut cookie = Cookie::new(FLASH_COOKIE, urlencoding::encode(message).into_owned());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_max_age(Duration::seconds(FLASH_MAX_AGE_SECS));
    cookie
}

/// Read the pending flash message, if any.
///
/// Returns the messages and, when one was present, a removal cookie the
/// caller must attach to its response so the message shows only once.
pub fn take_messages(req: &HttpRequest) -> (Vec<String>, Option<Cookie<'static>>) {
    let Some(cookie) = req.cookie(FLASH_COOKIE) else {
        return (Vec::new(), None);
    };

    let message = urlencoding::decode(cookie.value())
        .map(|m| m.into_owned())
        .unwrap_or_default();

    let mut removal = Cookie::new(FLASH_COOKIE, "");
    removal.set_path("/");
    removal.make_removal();

    let messages = if message.is_empty() {
        Vec::new()
    } else {
        vec![message]
    };

    (messages, Some(removal))
}
