use mockito::{Matcher, Server, ServerGuard};
use moodle_client::{Error, Membership, MoodleClient};

fn client_for(server: &ServerGuard) -> MoodleClient {
    MoodleClient::new(format!("{}/", server.url()), "test-token").unwrap()
}

async fn ws_mock(server: &mut ServerGuard, function: &str, body: &str) -> mockito::Mock {
    server
        .mock("GET", "/webservice/rest/server.php")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("wstoken".into(), "test-token".into()),
            Matcher::UrlEncoded("wsfunction".into(), function.into()),
            Matcher::UrlEncoded("moodlewsrestformat".into(), "json".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

#[tokio::test]
async fn search_courses_sorts_by_code() {
    let mut server = Server::new_async().await;
    let mock = ws_mock(
        &mut server,
        "core_course_search_courses",
        r#"{"courses":[
            {"id":2,"shortname":"HIS201","fullname":"History 201"},
            {"id":1,"shortname":"HIS101","fullname":"History 101"}
        ],"total":2}"#,
    ).await;

    let courses = client_for(&server).get_courses("History").await.unwrap();
    assert_eq!(courses.len(), 2);
    assert_eq!(courses[0].code, "HIS101");
    assert_eq!(courses[1].code, "HIS201");
    mock.assert();
}

#[tokio::test]
async fn exception_envelope_surfaces_as_upstream_error() {
    let mut server = Server::new_async().await;
    let _mock = ws_mock(
        &mut server,
        "core_course_search_courses",
        r#"{"exception":"moodle_exception","errorcode":"invalidtoken","message":"Invalid token - token not found"}"#,
    ).await;

    let err = client_for(&server).get_courses("History").await.unwrap_err();
    match err {
        Error::Upstream {
            message,
            error_code,
            ..
        } => {
            assert_eq!(message, "Invalid token - token not found");
            assert_eq!(error_code, "invalidtoken");
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn person_lookup_not_found_is_none() {
    let mut server = Server::new_async().await;
    let _mock = ws_mock(&mut server, "core_user_get_users_by_field", "[]").await;

    let person = client_for(&server)
        .get_person_by_email("nobody@example.com")
        .await
        .unwrap();
    assert!(person.is_none());
}

#[tokio::test]
async fn person_lookup_lifts_custom_fields() {
    let mut server = Server::new_async().await;
    let _mock = ws_mock(
        &mut server,
        "core_user_get_users_by_field",
        r#"[{
            "id": 7,
            "firstname": "Jan",
            "lastname": "Smith",
            "email": "jan@example.com",
            "username": "jsmith",
            "profileimageurl": "https://moodle.example.com/pic/7",
            "customfields": [{"shortname": "personalemail", "value": "jan@home.net", "type": "text"}]
        }]"#,
    ).await;

    let person = client_for(&server)
        .get_person_by_username("jsmith")
        .await
        .unwrap()
        .expect("person should be found");
    assert_eq!(person.id, 7);
    assert_eq!(person.personal_email, "jan@home.net");
    assert_eq!(person.custom_field("personalemail"), Some("jan@home.net"));
    assert_eq!(person.profile_image_url, "https://moodle.example.com/pic/7");
}

#[tokio::test]
async fn person_lookup_multiple_matches_is_an_error() {
    let mut server = Server::new_async().await;
    let _mock = ws_mock(
        &mut server,
        "core_user_get_users_by_field",
        r#"[{"id":1,"email":"a@example.com"},{"id":2,"email":"a@example.com"}]"#,
    ).await;

    let err = client_for(&server)
        .get_person_by_email("a@example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::AmbiguousMatch("email address")));
}

#[tokio::test]
async fn reset_password_requires_null_body() {
    let mut server = Server::new_async().await;
    let _mock = ws_mock(&mut server, "core_user_update_users", "null").await;
    client_for(&server)
        .reset_password(7, "nEw-9pass")
        .await
        .unwrap();
}

#[tokio::test]
async fn reset_password_rejects_unexpected_body() {
    let mut server = Server::new_async().await;
    let _mock = ws_mock(&mut server, "core_user_update_users", r#"[{"warnings":[]}]"#).await;
    let err = client_for(&server)
        .reset_password(7, "nEw-9pass")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnexpectedResponse(_)));
}

#[tokio::test]
async fn group_membership_write_requires_null_body() {
    let mut server = Server::new_async().await;
    let _mock = ws_mock(&mut server, "core_group_add_group_members", "null").await;
    client_for(&server).add_group_member(7, 191).await.unwrap();
}

#[tokio::test]
async fn add_user_rejects_invalid_email() {
    let server = Server::new_async().await;
    let err = client_for(&server)
        .add_user("Jan", "Smith", "not-an-email", "jsmith", None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidEmail(_)));
}

#[tokio::test]
async fn add_user_returns_new_id() {
    let mut server = Server::new_async().await;
    let _mock = ws_mock(
        &mut server,
        "core_user_create_users",
        r#"[{"id":42,"username":"jsmith"}]"#,
    ).await;
    let id = client_for(&server)
        .add_user("Jan", "Smith", "jan@example.com", "jsmith", Some("pw-X1abc"))
        .await
        .unwrap();
    assert_eq!(id, 42);
}

// The whole flow the evaluator exists for: fetch a module, decode its
// availability rule, list course groups, evaluate a learner's membership.
#[tokio::test]
async fn course_module_restriction_end_to_end() {
    let mut server = Server::new_async().await;
    let _module = ws_mock(
        &mut server,
        "core_course_get_course_module",
        r#"{"cm":{
            "id": 1155,
            "course": 36,
            "name": "Audit-only notes",
            "modname": "resource",
            "instance": 90,
            "section": 3,
            "visible": 1,
            "availability": "{\"op\":\"&\",\"c\":[{\"type\":\"group\",\"id\":191}],\"showc\":[true]}"
        }}"#,
    ).await;

    let api = client_for(&server);
    let module = api.get_course_module(1155).await.unwrap();
    let rule = module
        .restriction()
        .unwrap()
        .expect("module should carry a rule");

    let auditor: Membership = [191, 200].into_iter().collect();
    let outsider: Membership = [200].into_iter().collect();
    assert!(!rule.is_restricted(&auditor));
    assert!(rule.is_restricted(&outsider));
}

#[tokio::test]
async fn site_info_decodes() {
    let mut server = Server::new_async().await;
    let _mock = ws_mock(
        &mut server,
        "core_webservice_get_site_info",
        r#"{"sitename":"Example College","firstname":"Web","lastname":"Service","userid":3}"#,
    ).await;

    let info = client_for(&server).get_site_info().await.unwrap();
    assert_eq!(info.site_name, "Example College");
    assert_eq!(info.user_id, 3);
}

#[tokio::test]
async fn enrolled_users_carry_groups_for_evaluation() {
    let mut server = Server::new_async().await;
    let _mock = ws_mock(
        &mut server,
        "core_enrol_get_enrolled_users",
        r#"[{
            "id": 7,
            "username": "jsmith",
            "firstname": "Jan",
            "lastname": "Smith",
            "email": "jan@example.com",
            "firstaccess": 1541682000,
            "lastaccess": 1541690000,
            "groups": [{"id": 191, "name": "Audit", "shortname": "audit"}],
            "roles": [{"roleid": 5, "name": "Student", "shortname": "student"}]
        }]"#,
    ).await;

    let people = client_for(&server).get_course_roles(36).await.unwrap();
    assert_eq!(people.len(), 1);
    assert!(people[0].has_group_named("Audit"));
    assert!(people[0].membership().contains(191));
    assert_eq!(people[0].roles[0].short_name, "student");
}
