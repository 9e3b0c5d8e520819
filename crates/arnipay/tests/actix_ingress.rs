#![cfg(feature = "actix")]

use actix_web::{test, web, App, HttpRequest, HttpResponse};
use arnipay::{ArnipayError, SignatureService, WebhookHandler};

const SECRET: &str = "test-webhook-secret";

async fn receive(
    req: HttpRequest,
    body: web::Bytes,
    handler: web::Data<WebhookHandler>,
) -> Result<HttpResponse, ArnipayError> {
    let event = handler.process_actix(&req, &body)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "event": event.as_ref().and_then(|e| e.kind()),
        "payment_id": event.as_ref().and_then(|e| e.get_str("payment_id")),
    })))
}

fn app_data() -> web::Data<WebhookHandler> {
    web::Data::new(WebhookHandler::new(SECRET))
}

#[actix_rt::test]
async fn signed_webhook_is_accepted() {
    let app = test::init_service(
        App::new()
            .app_data(app_data())
            .route("/webhook/test", web::post().to(receive)),
    )
    .await;

    let payload = r#"{"event":"payment.completed","data":{"payment_id":"12345"}}"#;
    let sig = SignatureService::new().sign(
        "POST",
        "/webhook/test?foo=bar",
        1690000000,
        "demo-client",
        SECRET.as_bytes(),
        payload,
    );

    let req = test::TestRequest::post()
        .uri("/webhook/test?foo=bar")
        .insert_header(("X-Timestamp", "1690000000"))
        .insert_header(("X-Client-ID", "demo-client"))
        .insert_header(("X-Signature", sig))
        .set_payload(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["event"], "payment.completed");
    assert_eq!(body["payment_id"], "12345");
}

#[actix_rt::test]
async fn unsigned_webhook_is_rejected_with_401() {
    let app = test::init_service(
        App::new()
            .app_data(app_data())
            .route("/webhook/test", web::post().to(receive)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/webhook/test")
        .set_payload(r#"{"event":"payment.completed","data":{}}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_signature");
}

#[actix_rt::test]
async fn signed_garbage_is_rejected_with_400() {
    let app = test::init_service(
        App::new()
            .app_data(app_data())
            .route("/webhook/test", web::post().to(receive)),
    )
    .await;

    let payload = "not-a-json-string";
    let sig = SignatureService::new().sign(
        "POST",
        "/webhook/test",
        1690000004,
        "demo-client",
        SECRET.as_bytes(),
        payload,
    );

    let req = test::TestRequest::post()
        .uri("/webhook/test")
        .insert_header(("X-Timestamp", "1690000004"))
        .insert_header(("X-Client-ID", "demo-client"))
        .insert_header(("X-Signature", sig))
        .set_payload(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
async fn signed_non_utf8_body_is_rejected_with_400() {
    let app = test::init_service(
        App::new()
            .app_data(app_data())
            .route("/webhook/test", web::post().to(receive)),
    )
    .await;

    let payload: &[u8] = b"{\"event\":\"x\",\"data\":\"\xff\"}";
    let sig = SignatureService::new().sign(
        "POST",
        "/webhook/test",
        1690000005,
        "demo-client",
        SECRET.as_bytes(),
        payload,
    );

    let req = test::TestRequest::post()
        .uri("/webhook/test")
        .insert_header(("X-Timestamp", "1690000005"))
        .insert_header(("X-Client-ID", "demo-client"))
        .insert_header(("X-Signature", sig))
        .set_payload(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "malformed_payload");
}

#[actix_rt::test]
async fn non_utf8_body_with_bad_signature_is_rejected_with_401() {
    let app = test::init_service(
        App::new()
            .app_data(app_data())
            .route("/webhook/test", web::post().to(receive)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/webhook/test")
        .insert_header(("X-Timestamp", "1690000005"))
        .insert_header(("X-Client-ID", "demo-client"))
        .insert_header(("X-Signature", "0".repeat(64)))
        .set_payload(&b"{\"data\":\"\xff\"}"[..])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}
