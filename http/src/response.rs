use bytes::Bytes;
use http::{Response, StatusCode, header};
use http_body_util::Full;

/// `302 Found` to `location`, carrying a `Set-Cookie` header.
pub fn redirect(location: &str, set_cookie: &str) -> Result<Response<Full<Bytes>>, http::Error> {
    Response::builder()
        .status(StatusCode::FOUND)
        .header(header::LOCATION, location)
        .header(header::SET_COOKIE, set_cookie)
        .body(Full::new(Bytes::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_headers() {
        let res = redirect("/signup/profile", "signup=abc; Path=/").unwrap();
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(res.headers()[header::LOCATION], "/signup/profile");
        assert_eq!(res.headers()[header::SET_COOKIE], "signup=abc; Path=/");
    }

    #[test]
    fn test_redirect_rejects_invalid_header_values() {
        assert!(redirect("/step\n2", "signup=abc").is_err());
    }
}
