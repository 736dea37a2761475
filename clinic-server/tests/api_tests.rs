use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use clinic_server::{create_app, ClinicServer};
use inventory_service::LedgerPolicy;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

fn test_app() -> Router {
    create_app(ClinicServer::in_memory(LedgerPolicy::default()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn seed_user(app: &Router) -> Uuid {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/users",
        Some(json!({ "email": "ana.reyes@example.com", "family_name": "Reyes", "given_name": "Ana" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    serde_json::from_value(body["data"]["id"].clone()).unwrap()
}

/// Books an appointment, a 250.00 service and an ERIG vial with 5 stocks and 10 buffer
async fn seed_visit(app: &Router) -> (Uuid, Uuid, Uuid, Uuid) {
    let user_id = seed_user(app).await;

    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/appointments",
        Some(json!({ "user_id": user_id, "date": "2024-11-05", "time": "9:30 AM" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "Pending");
    let appointment_id: Uuid = serde_json::from_value(body["data"]["id"].clone()).unwrap();

    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/services",
        Some(json!({ "name": "Consultation", "description": "Bite wound assessment", "price": "250.00" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let service_id: Uuid = serde_json::from_value(body["data"]["id"].clone()).unwrap();

    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/inventory",
        Some(json!({ "name": "ERIG", "stocks": 5, "buffer": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let inventory_id: Uuid = serde_json::from_value(body["data"]["id"].clone()).unwrap();

    (user_id, appointment_id, service_id, inventory_id)
}

fn settlement(user_id: Uuid, status: &str, service_id: Uuid, inventory_id: Uuid, quantity: i32) -> Value {
    json!({
        "user_id": user_id,
        "status": status,
        "form": {
            "name": "Ana Reyes",
            "for_insurance": "true",
            "user_category": "SENIOR CITIZEN"
        },
        "services": [{ "service_id": service_id }],
        "vaccinations": [{ "inventory_id": inventory_id, "quantity": quantity }]
    })
}

#[tokio::test]
async fn test_health_check() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/api/v1/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["database"], "healthy");
}

#[tokio::test]
async fn test_settle_appointment_end_to_end() {
    let app = test_app();
    let (user_id, appointment_id, service_id, inventory_id) = seed_visit(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/v1/appointments/{appointment_id}/settle"),
        Some(settlement(user_id, "Completed", service_id, inventory_id, 8)),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["success"], true);
    let data = &body["data"];
    assert_eq!(data["success"], "Appointment completed successfully");
    assert_eq!(data["appointment"]["status"], "Completed");
    assert_eq!(data["billing"]["billing"]["user_category"], "SENIOR CITIZEN");
    assert_eq!(data["billing"]["billing"]["for_insurance"], true);
    assert_eq!(data["billing"]["billing"]["for_aics"], false);
    assert_eq!(data["billing"]["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(data["billing"]["items"][0]["status"], "Completed");
    assert_eq!(data["vaccinations"][0]["quantity"], 8);
    assert_eq!(data["deductions"][0]["drew_from_buffer"], true);

    let (_, body) = send(&app, Method::GET, "/api/v1/inventory", None).await;
    let erig = &body["data"][0];
    assert_eq!(erig["stocks"], 0);
    assert_eq!(erig["buffer"], 7);
    // legacy accounting counts the stock portion twice on a buffer draw
    assert_eq!(erig["consumed"], 10);
    assert_eq!(body["metadata"]["total_count"], 1);
}

#[tokio::test]
async fn test_settlement_validation_is_one_message() {
    let app = test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/v1/appointments/{}/settle", Uuid::new_v4()),
        Some(json!({ "user_id": Uuid::new_v4(), "status": "Completed", "form": {} })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "validation_error");
    assert_eq!(body["message"], "Validation Error: Name is required., User category is required.");
}

#[tokio::test]
async fn test_settlement_unknown_user_and_appointment() {
    let app = test_app();
    let (user_id, _, service_id, inventory_id) = seed_visit(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/v1/appointments/{}/settle", Uuid::new_v4()),
        Some(settlement(Uuid::new_v4(), "Completed", service_id, inventory_id, 1)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/v1/appointments/{}/settle", Uuid::new_v4()),
        Some(settlement(user_id, "Completed", service_id, inventory_id, 1)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_status_cannot_move_back() {
    let app = test_app();
    let (user_id, appointment_id, service_id, inventory_id) = seed_visit(&app).await;
    let uri = format!("/api/v1/appointments/{appointment_id}/settle");

    let (status, _) = send(
        &app,
        Method::POST,
        &uri,
        Some(settlement(user_id, "Completed", service_id, inventory_id, 1)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::POST,
        &uri,
        Some(settlement(user_id, "On Going", service_id, inventory_id, 1)),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error_code"], "BUSINESS_3004");
}

#[tokio::test]
async fn test_settlement_with_unknown_service_is_not_found() {
    let app = test_app();
    let (user_id, appointment_id, _, inventory_id) = seed_visit(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/v1/appointments/{appointment_id}/settle"),
        Some(settlement(user_id, "Completed", Uuid::new_v4(), inventory_id, 1)),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "BUSINESS_3003");

    // the status update ran before billing failed
    let (_, body) = send(&app, Method::GET, &format!("/api/v1/appointments/{appointment_id}"), None).await;
    assert_eq!(body["data"]["status"], "Completed");
}

#[tokio::test]
async fn test_standalone_deduction() {
    let app = test_app();
    let (_, _, _, inventory_id) = seed_visit(&app).await;
    let uri = format!("/api/v1/inventory/{inventory_id}/deduct");

    let (status, body) = send(&app, Method::POST, &uri, Some(json!({ "quantity": 3 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["after"]["stocks"], 2);
    assert_eq!(body["data"]["after"]["buffer"], 10);
    assert_eq!(body["data"]["after"]["consumed"], 3);

    let (status, body) = send(&app, Method::POST, &uri, Some(json!({ "quantity": 0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation Error: Quantity must be at least 1.");

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/v1/inventory/{}/deduct", Uuid::new_v4()),
        Some(json!({ "quantity": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_inventory_form_validation() {
    let app = test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/inventory",
        Some(json!({ "name": "", "stocks": 0, "buffer": 4 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation Error: Name is required., Stocks is required.");
}

#[tokio::test]
async fn test_service_catalog_crud() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/services",
        Some(json!({ "name": "Wound care", "description": "Cleaning and dressing", "price": "0" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation Error: Service price is required.");

    let (_, body) = send(
        &app,
        Method::POST,
        "/api/v1/services",
        Some(json!({ "name": "Wound care", "description": "Cleaning and dressing", "price": "150" })),
    )
    .await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/services/{id}"),
        Some(json!({ "name": "Wound care", "description": "Cleaning, dressing", "price": "175" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["description"], "Cleaning, dressing");

    let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/services/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/services/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_branch_and_employee_administration() {
    let app = test_app();

    let (status, body) = send(&app, Method::POST, "/api/v1/branches", Some(json!({ "name": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Validation Error: Branch name is required., Branch contact is required., Branch address is required."
    );
    assert_eq!(body["field_errors"]["name"][0], "Branch name is required.");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/branches",
        Some(json!({ "name": "Marikina", "contact": "09171234567", "address": "J.P. Rizal St." })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let branch_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/branches/{branch_id}"),
        Some(json!({ "name": "Marikina Main", "contact": "09171234567", "address": "J.P. Rizal St." })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Marikina Main");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/employees",
        Some(json!({ "first_name": "Jose", "last_name": "Cruz", "email": "jose@example.com", "role": "Nurse" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation Error: Branch is required.");

    for first_name in ["Maria", "Carlo"] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/employees",
            Some(json!({
                "first_name": first_name,
                "last_name": "Santos",
                "email": format!("{}@example.com", first_name.to_lowercase()),
                "role": "Nurse",
                "branch_id": branch_id
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = send(&app, Method::GET, "/api/v1/employees", None).await;
    assert_eq!(body["data"][0]["first_name"], "Carlo");
    assert_eq!(body["data"][1]["first_name"], "Maria");

    let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/branches/{branch_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/branches/{branch_id}"),
        Some(json!({ "name": "Gone", "contact": "n/a", "address": "n/a" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patient_intake_and_cascade_delete() {
    let app = test_app();
    let (user_id, appointment_id, _, _) = seed_visit(&app).await;

    let (status, body) = send(&app, Method::POST, "/api/v1/patients", Some(json!({ "user_id": user_id }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Validation Error: Age is required., Sex is required., Civil status is required."));

    let patient_form = json!({
        "user_id": user_id,
        "age": "34",
        "sex": "Female",
        "civil_status": "Single",
        "next_kin": "Luz Reyes",
        "contact_number": "09171234567",
        "home_address": "8 Shaw Blvd.",
        "region": "NCR",
        "province": "Metro Manila",
        "municipality": "Pasig",
        "barangay": "Kapitolyo"
    });
    let mut stranger = patient_form.clone();
    stranger["user_id"] = json!(Uuid::new_v4());
    let (status, body) = send(&app, Method::POST, "/api/v1/patients", Some(stranger)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");

    let (status, body) = send(&app, Method::POST, "/api/v1/patients", Some(patient_form)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["address"], "8 Shaw Blvd., Kapitolyo, Pasig, Metro Manila, NCR");
    let patient_id: Uuid = serde_json::from_value(body["data"]["id"].clone()).unwrap();

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/v1/patients/{patient_id}/medical-history"),
        Some(json!([{ "illness": "Asthma", "post_surgeries": "None", "medication": "Salbutamol", "dosage": "2 puffs" }])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metadata"]["total_count"], 1);

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/v1/patients/{patient_id}/vital-signs"),
        Some(json!({ "temperature": 36.9, "weight": 58.0, "pulse": 80, "respiration": 18 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Validation Error: Blood pressure is required., Last intake is required., Last output is required."
    );

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/v1/patients/{patient_id}/incidents"),
        Some(json!({
            "nature_of_incident": "Bite",
            "date": "2024-11-03",
            "location": "Pasig",
            "site_of_bite": "Right hand",
            "biting_animal": "Cat",
            "action_taken": "Washed with soap and water",
            "clinical_impression": "Category III exposure",
            "category": "Category III"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::GET, &format!("/api/v1/patients/{patient_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["first_name"], "Ana");
    assert_eq!(body["data"]["incidents"][0]["biting_animal"], "Cat");
    assert_eq!(body["data"]["vital_signs"], json!([]));

    let (status, body) = send(&app, Method::DELETE, &format!("/api/v1/patients/{patient_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user_id"], json!(user_id));

    let (status, _) = send(&app, Method::GET, &format!("/api/v1/appointments/{appointment_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::GET, &format!("/api/v1/patients/{patient_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Patient does not exist");

    let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/patients/{patient_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_registration_requires_every_field() {
    let app = test_app();
    let (status, body) = send(&app, Method::POST, "/api/v1/users", Some(json!({ "email": "ana@example.com" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "All fields are required.");
}
#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "BiteCare Clinic API");
    assert!(body["paths"]["/api/v1/appointments/{id}/settle"].is_object());
}
