//! End-to-end behaviour of the identity model as the server uses it: header
//! parsing, resolution and the tracking-session backfill.

use auth::{Identity, IdentityCookies, IdentityError, Role, SessionIdentity};
use entity::sea_orm_active_enums::UserType;
use http::{header, HeaderMap, HeaderValue};

fn headers(cookie: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
    headers
}

#[test]
fn test_login_cookie_is_read_back() {
    let set_cookie = Role::Employer.set_cookie("ckemployer0001", false);
    // a browser sends back only the name=value pair
    let pair = set_cookie.split(';').next().unwrap();
    let identity = Identity::resolve(&IdentityCookies::from_headers(&headers(pair)));
    assert_eq!(identity.user_type(), UserType::Employer);
    assert_eq!(identity.user_id(), Some("ckemployer0001"));
}

#[test]
fn test_student_wins_over_admin_regardless_of_order() {
    for cookie in ["adminId=a; studentId=s", "studentId=s; adminId=a"] {
        let identity = Identity::resolve(&IdentityCookies::from_headers(&headers(cookie)));
        assert_eq!(identity.id_for(Role::Student), Some("s"));
    }
}

#[test]
fn test_backfill_from_stored_anonymous_row() {
    let stored = SessionIdentity::from_stored(&UserType::Anonymous, None);
    let caller = Identity::resolve(&IdentityCookies::parse("studentId=stu_42"));

    let next = stored.identify(&caller).unwrap();
    assert_eq!(next, Some(SessionIdentity::Identified(caller)));
}

#[test]
fn test_identified_row_never_changes_identity() {
    let stored = SessionIdentity::from_stored(&UserType::Student, Some("stu_42"));
    let other = Identity::resolve(&IdentityCookies::parse("employerId=emp_1"));
    assert_eq!(stored.identify(&other), Err(IdentityError::AlreadyIdentified));
}
