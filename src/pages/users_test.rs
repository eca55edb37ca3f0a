use super::*;

fn user(username: &str, email: &str, role: Role) -> User {
    User {
        id: 1,
        username: username.to_owned(),
        email: email.to_owned(),
        role,
        status: None,
        first_name: None,
        last_name: None,
    }
}

#[test]
fn role_filter_splits_admins_from_everyone_else() {
    let admin = user("root", "root@example.com", Role::Admin);
    let plain = user("grace", "grace@example.com", Role::User);
    let odd = user("bot", "bot@example.com", Role::Other);

    assert!(RoleFilter::All.keeps(&admin) && RoleFilter::All.keeps(&plain));
    assert!(RoleFilter::Admins.keeps(&admin));
    assert!(!RoleFilter::Admins.keeps(&plain));
    assert!(RoleFilter::Users.keeps(&plain));
    assert!(RoleFilter::Users.keeps(&odd));
    assert!(!RoleFilter::Users.keeps(&admin));
}

#[test]
fn query_matches_username_or_email_case_insensitively() {
    let grace = user("Grace", "grace.hopper@navy.mil", Role::User);

    assert!(matches_query(&grace, ""));
    assert!(matches_query(&grace, "   "));
    assert!(matches_query(&grace, "gra"));
    assert!(matches_query(&grace, "NAVY"));
    assert!(!matches_query(&grace, "ada"));
}
