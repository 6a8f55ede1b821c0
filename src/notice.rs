//! One-shot messages carried across a redirect in a cookie.

use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};

pub const NOTICE_COOKIE: &str = "notice";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    PostCreated,
    PostUpdated,
    PostDeleted,
}

impl Notice {
    pub fn code(self) -> &'static str {
        match self {
            Notice::PostCreated => "created",
            Notice::PostUpdated => "updated",
            Notice::PostDeleted => "deleted",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "created" => Some(Notice::PostCreated),
            "updated" => Some(Notice::PostUpdated),
            "deleted" => Some(Notice::PostDeleted),
            _ => None,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Notice::PostCreated => "Post was successfully created!",
            Notice::PostUpdated => "Post was successfully updated!",
            Notice::PostDeleted => "Post was successfully deleted!",
        }
    }
}

pub fn queue(jar: CookieJar, notice: Notice) -> CookieJar {
    jar.add(
        Cookie::build((NOTICE_COOKIE, notice.code()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

/// Remove the pending notice, if any, from the jar.
pub fn take(jar: CookieJar) -> (CookieJar, Option<Notice>) {
    let Some(code) = jar.get(NOTICE_COOKIE).map(|c| c.value_trimmed().to_string()) else {
        return (jar, None);
    };
    let jar = jar.remove(Cookie::build(NOTICE_COOKIE).path("/"));
    (jar, Notice::from_code(&code))
}
