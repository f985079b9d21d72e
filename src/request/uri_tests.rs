//! Tests for `RequestUri`.

use super::{BaseRequest, Request, RequestError};
use crate::test_fixtures::MockWire;
use std::sync::Arc;

fn request(uri: &str) -> BaseRequest {
    BaseRequest::new(Arc::new(MockWire::ok()), uri).unwrap()
}

mod view {
    use super::*;

    #[test]
    fn back_returns_equal_request() {
        let req = request("http://example.com/a?b=c");
        assert_eq!(req.uri().back(), req);
    }

    #[test]
    fn get_returns_current_uri() {
        let req = request("http://example.com/a");
        assert_eq!(req.uri().get().as_str(), "http://example.com/a");
        assert_eq!(req.uri().to_string(), "http://example.com/a");
    }

    #[test]
    fn set_replaces_uri_only() {
        let req = request("http://example.com/a")
            .with_header("Accept", "text/plain")
            .unwrap();
        let moved = req
            .uri()
            .set("https://other.org/b".parse().unwrap())
            .back();

        assert_eq!(moved.home().as_str(), "https://other.org/b");
        assert_eq!(moved.headers(), req.headers());
        assert_eq!(req.home().as_str(), "http://example.com/a");
    }
}

mod query {
    use super::*;

    #[test]
    fn appends_in_call_order() {
        let req = request("http://example.com/")
            .uri()
            .query_param("a", 1)
            .query_param("b", 2)
            .back();

        assert_eq!(req.home().query(), Some("a=1&b=2"));
    }

    #[test]
    fn keeps_existing_query() {
        let req = request("http://example.com/?x=0")
            .uri()
            .query_param("y", "1")
            .back();

        assert_eq!(req.home().as_str(), "http://example.com/?x=0&y=1");
    }

    #[test]
    fn encodes_names_and_values() {
        let req = request("http://example.com/")
            .uri()
            .query_param("full name", "a&b=c d")
            .back();

        assert_eq!(req.home().query(), Some("full%20name=a%26b%3Dc%20d"));
    }

    #[test]
    fn encodes_non_ascii_as_utf8() {
        let req = request("http://example.com/")
            .uri()
            .query_param("q", "é")
            .back();

        assert_eq!(req.home().query(), Some("q=%C3%A9"));
    }

    #[test]
    fn batch_matches_repeated_single_calls() {
        let batch = request("http://example.com/")
            .uri()
            .query_params([("a", "1"), ("b", "2"), ("a", "3")])
            .back();
        let single = request("http://example.com/")
            .uri()
            .query_param("a", "1")
            .query_param("b", "2")
            .query_param("a", "3")
            .back();

        assert_eq!(batch, single);
    }

    #[test]
    fn empty_batch_changes_nothing() {
        let req = request("http://example.com/?keep=1");
        let same = req
            .uri()
            .query_params(std::iter::empty::<(&str, &str)>())
            .back();

        assert_eq!(same, req);
    }

    #[test]
    fn unreserved_characters_stay_literal() {
        let req = request("http://example.com/")
            .uri()
            .query_param("k", "a-b.c_d~e")
            .back();

        assert_eq!(req.home().query(), Some("k=a-b.c_d~e"));
    }
}

mod path {
    use super::*;

    #[test]
    fn appends_to_existing_path() {
        let req = request("http://example.com/api")
            .uri()
            .path("users")
            .unwrap()
            .back();

        assert_eq!(req.home().path(), "/api/users");
    }

    #[test]
    fn collapses_joining_slashes() {
        let a = request("http://example.com/api/")
            .uri()
            .path("/users")
            .unwrap()
            .back();
        let b = request("http://example.com/api")
            .uri()
            .path("/users")
            .unwrap()
            .back();

        assert_eq!(a.home().path(), "/api/users");
        assert_eq!(b.home().path(), "/api/users");
    }

    #[test]
    fn appends_to_root() {
        let req = request("http://example.com")
            .uri()
            .path("/x")
            .unwrap()
            .back();

        assert_eq!(req.home().as_str(), "http://example.com/x");
    }

    #[test]
    fn keeps_query_when_appending_path() {
        let req = request("http://example.com/a?q=1")
            .uri()
            .path("b/c")
            .unwrap()
            .back();

        assert_eq!(req.home().as_str(), "http://example.com/a/b/c?q=1");
    }

    #[test]
    fn keeps_trailing_slash() {
        let req = request("http://example.com/")
            .uri()
            .path("dir/")
            .unwrap()
            .back();

        assert_eq!(req.home().path(), "/dir/");
    }

    #[test]
    fn encodes_segment_characters() {
        let req = request("http://example.com/")
            .uri()
            .path("a b")
            .unwrap()
            .back();

        assert_eq!(req.home().path(), "/a%20b");
    }

    #[test]
    fn empty_segment_changes_nothing() {
        let req = request("http://example.com/a");
        assert_eq!(req.uri().path("").unwrap().back(), req);
    }

    #[test]
    fn keeps_existing_escapes() {
        let req = request("http://example.com/a")
            .uri()
            .path("x%20y")
            .unwrap()
            .back();

        assert_eq!(req.home().path(), "/a/x%20y");
    }

    #[test]
    fn encodes_stray_percent() {
        let req = request("http://example.com/")
            .uri()
            .path("100%/5%zz")
            .unwrap()
            .back();

        assert_eq!(req.home().path(), "/100%25/5%25zz");
    }

    #[test]
    fn keeps_sub_delims_and_colon() {
        let req = request("http://example.com/")
            .uri()
            .path("a:b@c;d=e")
            .unwrap()
            .back();

        assert_eq!(req.home().path(), "/a:b@c;d=e");
    }

    #[test]
    fn resolves_parent_segment() {
        let req = request("http://example.com/a/b")
            .uri()
            .path("../c")
            .unwrap()
            .back();

        assert_eq!(req.home().as_str(), "http://example.com/a/c");
    }

    #[test]
    fn resolves_current_segment() {
        let req = request("http://example.com/a")
            .uri()
            .path("./b")
            .unwrap()
            .back();

        assert_eq!(req.home().path(), "/a/b");
    }

    #[test]
    fn rejects_uri_without_path() {
        let err = request("mailto:someone@example.com")
            .uri()
            .path("x")
            .unwrap_err();

        assert!(matches!(err, RequestError::CannotBeABase(_)));
    }
}

mod user_info {
    use super::*;

    #[test]
    fn sets_user_and_password() {
        let req = request("http://example.com/")
            .uri()
            .user_info("alice:secret")
            .unwrap()
            .back();

        assert_eq!(req.home().username(), "alice");
        assert_eq!(req.home().password(), Some("secret"));
    }

    #[test]
    fn sets_user_only() {
        let req = request("http://old:pw@example.com/")
            .uri()
            .user_info("bob")
            .unwrap()
            .back();

        assert_eq!(req.home().username(), "bob");
        assert_eq!(req.home().password(), None);
    }

    #[test]
    fn rejects_uri_without_host() {
        let err = request("mailto:someone@example.com")
            .uri()
            .user_info("alice")
            .unwrap_err();

        assert!(matches!(err, RequestError::CannotBeABase(_)));
    }
}
