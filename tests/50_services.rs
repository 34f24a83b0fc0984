mod common;

use common::{json_response, mint_token, Harness};
use institution_admin::api::{FormPart, RequestBody};
use institution_admin::error::ErrorKind;
use institution_admin::services::{
    Address, AuthService, ClassSubjectAssignment, Contacts, CredentialService, DashboardService,
    MappingService, NewStaff, NewStudent, Registration, ResourceService, Resource, StaffService,
    StudentService,
};
use institution_admin::session::{
    UserType, INSTITUTION_CODE_KEY, LOGIN_ID_KEY, TOKEN_KEY, USER_TYPE_KEY,
};
use serde_json::json;

#[tokio::test]
async fn institution_login_stores_the_session() {
    let h = Harness::with_store(institution_admin::session::MemorySessionStore::with_entries([
        (LOGIN_ID_KEY, "9876543210"),
    ]));
    let token = mint_token(3600);
    h.transport
        .respond(json_response(200, json!({ "success": true, "token": token, "message": "Welcome" })));

    let result = AuthService::new(h.client.clone())
        .login_institution(" INST001 ", "secret1")
        .await
        .unwrap();

    assert_eq!(result.user_type, UserType::Institution);
    assert_eq!(h.stored(TOKEN_KEY).as_deref(), Some(token.as_str()));
    assert_eq!(h.stored(USER_TYPE_KEY).as_deref(), Some("institution"));
    assert_eq!(h.stored(INSTITUTION_CODE_KEY).as_deref(), Some("INST001"));
    assert_eq!(h.stored(LOGIN_ID_KEY), None);

    let call = &h.transport.calls()[0];
    assert!(call.url.ends_with("/auth/institution/login"));
    assert_eq!(call.bearer_token, None);
    assert_eq!(
        call.body,
        RequestBody::Json(json!({ "institutionCode": "INST001", "password": "secret1" }))
    );
}

#[tokio::test]
async fn failed_login_stores_nothing() {
    let h = Harness::anonymous();
    h.transport
        .respond(json_response(200, json!({ "success": false, "message": "Invalid credentials" })));

    let err = AuthService::new(h.client.clone())
        .login_staff("9876543210", "wrong")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Domain);
    assert_eq!(err.message(), "Invalid credentials");
    assert!(h.session_cleared());
}

#[tokio::test]
async fn staff_login_rejects_malformed_mobile_before_sending() {
    let h = Harness::anonymous();

    let err = AuthService::new(h.client.clone())
        .login_staff("12345", "secret1")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Domain);
    assert_eq!(h.transport.call_count(), 0);
}

#[tokio::test]
async fn logout_clears_and_is_repeatable() {
    let h = Harness::staff();
    let auth = AuthService::new(h.client.clone());

    auth.logout().unwrap();
    auth.logout().unwrap();

    assert!(h.session_cleared());
    assert!(auth.status().is_empty());
    assert_eq!(h.transport.call_count(), 0);
}

#[tokio::test]
async fn registration_goes_out_as_multipart() {
    let h = Harness::anonymous();
    h.transport
        .respond(json_response(201, json!({ "success": true, "message": "OTP sent" })));

    let registration = Registration {
        name: "Green Valley School".to_string(),
        institution_type: "school".to_string(),
        address: Address {
            state: "Kerala".to_string(),
            district: "Ernakulam".to_string(),
            city: "Kochi".to_string(),
            location: "Kakkanad".to_string(),
        },
        contacts: Contacts {
            mobile1: "9876543210".to_string(),
            mobile2: Some(String::new()),
            email: "office@greenvalley.edu".to_string(),
        },
        logo: None,
    };
    AuthService::new(h.client.clone()).register(registration).await.unwrap();

    let call = &h.transport.calls()[0];
    assert_eq!(call.content_type(), None);
    let RequestBody::Multipart(form) = &call.body else {
        panic!("expected multipart body, got {:?}", call.body);
    };
    assert_eq!(form.text_value("name"), Some("Green Valley School"));
    let contacts: serde_json::Value =
        serde_json::from_str(form.text_value("contacts").unwrap()).unwrap();
    assert_eq!(contacts["mobile1"], "9876543210");
    assert!(contacts["mobile2"].is_null());
    assert!(!form.parts().iter().any(|p| matches!(p, FormPart::File { .. })));
}

#[tokio::test]
async fn bulk_upload_over_limit_is_rejected_locally() {
    let h = Harness::institution();
    let bytes = vec![0u8; 10 * 1024 * 1024 + 1];

    let err = StudentService::new(h.client.clone())
        .bulk_upload("c1", "students.xlsx", bytes)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Domain);
    assert_eq!(h.transport.call_count(), 0);
}

#[tokio::test]
async fn bulk_upload_reports_stats() {
    let h = Harness::institution();
    h.transport.respond(json_response(
        200,
        json!({ "success": true, "stats": { "totalProcessed": 3, "successful": 2, "failed": 1 } }),
    ));

    let stats = StudentService::new(h.client.clone())
        .bulk_upload("c1", "students.csv", b"name\nA\nB\nC\n".to_vec())
        .await
        .unwrap();

    assert_eq!((stats.total_processed, stats.successful, stats.failed), (3, 2, 1));
}

#[tokio::test]
async fn student_search_encodes_the_query() {
    let h = Harness::institution();

    StudentService::new(h.client.clone()).search("Asha K").await.unwrap();

    assert_eq!(
        h.transport.calls()[0].url,
        format!("{}/students?search=Asha%20K", common::BASE_URL)
    );
}

#[tokio::test]
async fn hierarchy_levels_are_numbered_from_one() {
    let h = Harness::institution();

    ResourceService::new(h.client.clone())
        .save_hierarchy(&["Principal".to_string(), "HOD".to_string()])
        .await
        .unwrap();

    assert_eq!(
        h.transport.calls()[0].body,
        RequestBody::Json(json!({ "levels": [
            { "levelNumber": 1, "name": "Principal" },
            { "levelNumber": 2, "name": "HOD" },
        ]}))
    );
}

#[tokio::test]
async fn resource_crud_hits_item_paths() {
    let h = Harness::institution();
    let resources = ResourceService::new(h.client.clone());

    resources.get(Resource::Designations, "d 1").await.unwrap();
    resources.delete(Resource::Classes, "c1").await.unwrap();

    let calls = h.transport.calls();
    assert_eq!(calls[0].url, format!("{}/designations/d%201", common::BASE_URL));
    assert_eq!(calls[1].url, format!("{}/classes/c1", common::BASE_URL));
}

#[tokio::test]
async fn class_subject_mapping_needs_a_subject() {
    let h = Harness::institution();

    let err = MappingService::new(h.client.clone())
        .assign_class_subjects(&ClassSubjectAssignment {
            class_id: "c1".to_string(),
            subject_ids: vec![],
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Domain);
    assert_eq!(h.transport.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn staff_cannot_open_institution_dashboard() {
    let h = Harness::staff();

    let err = DashboardService::new(h.client.clone())
        .institution_profile()
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Domain);
    assert_eq!(h.transport.call_count(), 0);
    assert!(h.stored(TOKEN_KEY).is_some());
}

#[tokio::test(start_paused = true)]
async fn dashboard_without_role_runs_recovery() {
    let h = Harness::with_store(institution_admin::session::MemorySessionStore::with_entries([
        (TOKEN_KEY, mint_token(3600)),
    ]));

    let err = DashboardService::new(h.client.clone()).stats().await.unwrap_err();

    assert!(err.is_auth());
    assert!(h.session_cleared());
    h.client.recovery().settle().await;
    assert_eq!(h.navigator.redirects().len(), 1);
}

#[tokio::test]
async fn overview_loads_every_list() {
    let h = Harness::institution();
    for _ in 0..4 {
        h.transport
            .respond(json_response(200, json!({ "success": true, "data": [{ "_id": "x" }] })));
    }
    h.transport
        .respond(json_response(200, json!({ "success": true, "data": { "staffClass": [] } })));

    let overview = DashboardService::new(h.client.clone()).overview().await.unwrap();

    assert_eq!(h.transport.call_count(), 5);
    assert_eq!(overview.staff.len() + overview.classes.len() + overview.subjects.len() + overview.designations.len(), 4);
    assert_eq!(overview.mappings, json!({ "staffClass": [] }));
}

fn student(name: &str, father_name: &str, mobile_no: &str) -> NewStudent {
    NewStudent {
        name: name.to_string(),
        father_name: father_name.to_string(),
        class_id: "c1".to_string(),
        mobile_no: mobile_no.to_string(),
    }
}

#[tokio::test]
async fn student_add_checks_father_name_and_mobile_locally() {
    let h = Harness::institution();
    let students = StudentService::new(h.client.clone());

    let missing_father = students
        .add(&student("Asha", "", "9876543210"))
        .await
        .unwrap_err();
    let bad_prefix = students
        .add(&student("Asha", "Ravi", "0123456789"))
        .await
        .unwrap_err();

    assert_eq!(missing_father.message(), "Father name is required");
    assert_eq!(bad_prefix.kind(), ErrorKind::Domain);
    assert_eq!(h.transport.call_count(), 0);
}

#[tokio::test]
async fn student_add_sends_bare_mobile_digits() {
    let h = Harness::institution();

    StudentService::new(h.client.clone())
        .add(&student(" Asha ", "Ravi", "98765 43210"))
        .await
        .unwrap();

    assert_eq!(
        h.transport.calls()[0].body,
        RequestBody::Json(json!({
            "name": "Asha",
            "fatherName": "Ravi",
            "classId": "c1",
            "mobileNo": "9876543210",
        }))
    );
}

#[tokio::test]
async fn staff_add_rejects_bad_mobile_or_missing_designation() {
    let h = Harness::institution();
    let staff = StaffService::new(h.client.clone());

    let bad_mobile = staff
        .add(&NewStaff {
            name: "Meera".to_string(),
            mobile_no: "5123456789".to_string(),
            designation_id: "d1".to_string(),
        })
        .await
        .unwrap_err();
    let no_designation = staff
        .add(&NewStaff {
            name: "Meera".to_string(),
            mobile_no: "9876543210".to_string(),
            designation_id: " ".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(bad_mobile.kind(), ErrorKind::Domain);
    assert_eq!(no_designation.message(), "Designation is required");
    assert_eq!(h.transport.call_count(), 0);
}

#[tokio::test]
async fn staff_add_posts_typed_payload() {
    let h = Harness::institution();

    StaffService::new(h.client.clone())
        .add(&NewStaff {
            name: "Meera".to_string(),
            mobile_no: "9876543210".to_string(),
            designation_id: "d1".to_string(),
        })
        .await
        .unwrap();

    let call = &h.transport.calls()[0];
    assert_eq!(call.url, format!("{}/staff", common::BASE_URL));
    assert_eq!(
        call.body,
        RequestBody::Json(json!({ "name": "Meera", "mobileNo": "9876543210", "designationId": "d1" }))
    );
}

#[tokio::test]
async fn credential_changes_surface_success_false() {
    let h = Harness::institution();
    for _ in 0..3 {
        h.transport
            .respond(json_response(200, json!({ "success": false, "message": "Credential is locked" })));
    }
    let credentials = CredentialService::new(h.client.clone());

    let errors = [
        credentials.update_password("cr1", "newpass1").await.unwrap_err(),
        credentials.set_active("cr1", false).await.unwrap_err(),
        credentials.delete("cr1").await.unwrap_err(),
    ];

    for err in errors {
        assert_eq!(err.kind(), ErrorKind::Domain);
        assert_eq!(err.message(), "Credential is locked");
    }
    assert_eq!(h.transport.call_count(), 3);
}
