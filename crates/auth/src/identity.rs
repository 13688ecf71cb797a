//! # Identity
//!
//! Who is calling, derived from the three identity cookies, and the one-way
//! identity state of a tracking session.

use std::fmt;

use entity::sea_orm_active_enums::UserType;
use http::{header, HeaderMap};
use thiserror::Error;

/// Lifetime of an identity cookie.
pub const COOKIE_MAX_AGE_SECS: u64 = 60 * 60 * 24 * 7;

/// Account kind carried by an identity cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Student,
    Employer,
    Admin,
}

impl Role {
    /// Resolution priority, highest first.
    pub const PRIORITY: [Role; 3] = [Role::Student, Role::Employer, Role::Admin];

    pub fn cookie_name(self) -> &'static str {
        match self {
            Role::Student => "studentId",
            Role::Employer => "employerId",
            Role::Admin => "adminId",
        }
    }

    pub fn user_type(self) -> UserType {
        match self {
            Role::Student => UserType::Student,
            Role::Employer => UserType::Employer,
            Role::Admin => UserType::Admin,
        }
    }

    /// `Set-Cookie` value that stores `id` for this role.
    pub fn set_cookie(self, id: &str, secure: bool) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.cookie_name(),
            id,
            COOKIE_MAX_AGE_SECS
        );
        if secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    /// `Set-Cookie` value that removes this role's cookie.
    pub fn clear_cookie(self, secure: bool) -> String {
        let mut cookie = format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", self.cookie_name());
        if secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Student => "student",
            Role::Employer => "employer",
            Role::Admin => "admin",
        };
        f.write_str(name)
    }
}

/// The identity cookies present on a request. Empty values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityCookies {
    pub student_id:  Option<String>,
    pub employer_id: Option<String>,
    pub admin_id:    Option<String>,
}

impl IdentityCookies {
    /// Parse a single `Cookie` header value (`a=1; b=2`).
    pub fn parse(header_value: &str) -> Self {
        let mut cookies = Self::default();
        cookies.absorb(header_value);
        cookies
    }

    /// Collect identity cookies from every `Cookie` header of a request.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut cookies = Self::default();
        for value in headers.get_all(header::COOKIE) {
            if let Ok(value) = value.to_str() {
                cookies.absorb(value);
            }
        }
        cookies
    }

    fn absorb(&mut self, header_value: &str) {
        for pair in header_value.split(';') {
            let Some((name, value)) = pair.trim().split_once('=')
            else {
                continue;
            };
            let value = value.trim().trim_matches('"');
            if value.is_empty() {
                continue;
            }
            let slot = match name.trim() {
                "studentId" => &mut self.student_id,
                "employerId" => &mut self.employer_id,
                "adminId" => &mut self.admin_id,
                _ => continue,
            };
            // first occurrence wins, as in browsers' most-specific-path-first order
            if slot.is_none() {
                *slot = Some(value.to_string());
            }
        }
    }

    /// The cookie value for `role`, if present.
    pub fn get(&self, role: Role) -> Option<&str> {
        match role {
            Role::Student => self.student_id.as_deref(),
            Role::Employer => self.employer_id.as_deref(),
            Role::Admin => self.admin_id.as_deref(),
        }
    }
}

/// The resolved caller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Identity {
    #[default]
    Anonymous,
    Identified {
        role: Role,
        id:   String,
    },
}

impl Identity {
    /// Resolve the caller from the cookie set.
    ///
    /// Total and ordered: the first role in [`Role::PRIORITY`] with a cookie
    /// wins, so a request carrying several identity cookies always resolves to
    /// the same identity.
    pub fn resolve(cookies: &IdentityCookies) -> Self {
        Role::PRIORITY
            .into_iter()
            .find_map(|role| {
                cookies.get(role).map(|id| {
                    Identity::Identified {
                        role,
                        id: id.to_string(),
                    }
                })
            })
            .unwrap_or(Identity::Anonymous)
    }

    pub fn user_type(&self) -> UserType {
        match self {
            Identity::Anonymous => UserType::Anonymous,
            Identity::Identified {
                role, ..
            } => role.user_type(),
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            Identity::Anonymous => None,
            Identity::Identified {
                id, ..
            } => Some(id),
        }
    }

    /// The id, if this identity has the given role.
    pub fn id_for(&self, wanted: Role) -> Option<&str> {
        match self {
            Identity::Identified {
                role,
                id,
            } if *role == wanted => Some(id),
            _ => None,
        }
    }

    pub fn is_anonymous(&self) -> bool { matches!(self, Identity::Anonymous) }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("session is already identified")]
    AlreadyIdentified,
}

/// Identity state of a stored tracking session.
///
/// The only transition is `Anonymous -> Identified`. Once identified, the
/// identity is fixed for the life of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionIdentity {
    Anonymous,
    Identified(Identity),
}

impl SessionIdentity {
    /// Rebuild the state from the stored `user_type` and `user_id` columns.
    ///
    /// A row counts as identified as soon as it has a user id.
    pub fn from_stored(user_type: &UserType, user_id: Option<&str>) -> Self {
        let role = match user_type {
            UserType::Student => Some(Role::Student),
            UserType::Employer => Some(Role::Employer),
            UserType::Admin => Some(Role::Admin),
            UserType::Anonymous => None,
        };
        match (role, user_id) {
            (Some(role), Some(id)) => {
                SessionIdentity::Identified(Identity::Identified {
                    role,
                    id: id.to_string(),
                })
            },
            (None, Some(id)) => {
                // identified row with an inconsistent tag; keep it immutable
                SessionIdentity::Identified(Identity::Identified {
                    role: Role::Student,
                    id:   id.to_string(),
                })
            },
            (_, None) => SessionIdentity::Anonymous,
        }
    }

    pub fn is_identified(&self) -> bool { matches!(self, SessionIdentity::Identified(_)) }

    /// Attempt the backfill transition.
    ///
    /// Returns `Ok(None)` when there is nothing to do (the caller is still
    /// anonymous), `Ok(Some(next))` with the new state on a transition, and
    /// `Err(AlreadyIdentified)` for any attempt to move out of `Identified`.
    pub fn identify(&self, caller: &Identity) -> Result<Option<SessionIdentity>, IdentityError> {
        match self {
            SessionIdentity::Identified(_) => Err(IdentityError::AlreadyIdentified),
            SessionIdentity::Anonymous if caller.is_anonymous() => Ok(None),
            SessionIdentity::Anonymous => Ok(Some(SessionIdentity::Identified(caller.clone()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identified(role: Role, id: &str) -> Identity {
        Identity::Identified {
            role,
            id: id.to_string(),
        }
    }

    #[test]
    fn test_parse_cookie_header() {
        let cookies = IdentityCookies::parse("theme=dark; studentId=stu_1; adminId=adm_9");
        assert_eq!(cookies.student_id.as_deref(), Some("stu_1"));
        assert_eq!(cookies.employer_id, None);
        assert_eq!(cookies.admin_id.as_deref(), Some("adm_9"));
    }

    #[test]
    fn test_empty_cookie_is_absent() {
        let cookies = IdentityCookies::parse("studentId=; employerId=emp_2");
        assert_eq!(cookies.student_id, None);
        assert_eq!(Identity::resolve(&cookies), identified(Role::Employer, "emp_2"));
    }

    #[test]
    fn test_from_headers_reads_every_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, "a=1".parse().unwrap());
        headers.append(header::COOKIE, "adminId=adm_3".parse().unwrap());
        let cookies = IdentityCookies::from_headers(&headers);
        assert_eq!(cookies.admin_id.as_deref(), Some("adm_3"));
    }

    #[test]
    fn test_resolve_priority() {
        let all = IdentityCookies {
            student_id:  Some("s".into()),
            employer_id: Some("e".into()),
            admin_id:    Some("a".into()),
        };
        assert_eq!(Identity::resolve(&all), identified(Role::Student, "s"));

        let employer_and_admin = IdentityCookies {
            student_id: None,
            ..all.clone()
        };
        assert_eq!(
            Identity::resolve(&employer_and_admin),
            identified(Role::Employer, "e")
        );

        let admin_only = IdentityCookies {
            admin_id: Some("a".into()),
            ..IdentityCookies::default()
        };
        assert_eq!(Identity::resolve(&admin_only), identified(Role::Admin, "a"));
        assert_eq!(
            Identity::resolve(&IdentityCookies::default()),
            Identity::Anonymous
        );
    }

    #[test]
    fn test_identity_accessors() {
        let student = identified(Role::Student, "s1");
        assert_eq!(student.user_type(), UserType::Student);
        assert_eq!(student.user_id(), Some("s1"));
        assert_eq!(student.id_for(Role::Student), Some("s1"));
        assert_eq!(student.id_for(Role::Employer), None);
        assert_eq!(Identity::Anonymous.user_type(), UserType::Anonymous);
    }

    #[test]
    fn test_backfill_transition() {
        let state = SessionIdentity::Anonymous;
        assert_eq!(state.identify(&Identity::Anonymous), Ok(None));

        let next = state
            .identify(&identified(Role::Student, "s1"))
            .unwrap()
            .unwrap();
        assert!(next.is_identified());

        assert_eq!(
            next.identify(&identified(Role::Admin, "a1")),
            Err(IdentityError::AlreadyIdentified)
        );
        assert_eq!(
            next.identify(&Identity::Anonymous),
            Err(IdentityError::AlreadyIdentified)
        );
    }

    #[test]
    fn test_from_stored() {
        assert_eq!(
            SessionIdentity::from_stored(&UserType::Anonymous, None),
            SessionIdentity::Anonymous
        );
        assert_eq!(
            SessionIdentity::from_stored(&UserType::Employer, Some("e1")),
            SessionIdentity::Identified(identified(Role::Employer, "e1"))
        );
        assert!(SessionIdentity::from_stored(&UserType::Anonymous, Some("x")).is_identified());
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = Role::Student.set_cookie("stu_1", false);
        assert_eq!(
            cookie,
            "studentId=stu_1; Path=/; HttpOnly; SameSite=Lax; Max-Age=604800"
        );
        assert!(Role::Admin.set_cookie("a", true).ends_with("; Secure"));
        assert!(Role::Employer.clear_cookie(false).contains("Max-Age=0"));
    }
}
