use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::contacts::{ContactListQuery, CreateContactRequest, UpdateContactRequest};
use crate::domain::dto::{IdQuery, MessageResponse};
use crate::domain::models::auth::AdminUser;
use crate::services::contacts::ContactService;

/// Public contact form.
#[post("/contacts")]
pub async fn create_contact(
    payload: web::Json<CreateContactRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = ContactService::instance().create(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

#[get("/contacts")]
pub async fn list_contacts(
    _admin: AdminUser,
    query: web::Query<ContactListQuery>,
) -> Result<HttpResponse, AppError> {
    let response = ContactService::instance()
        .list(query.status.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[put("/contacts")]
pub async fn update_contact(
    _admin: AdminUser,
    payload: web::Json<UpdateContactRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = ContactService::instance()
        .update_status(payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[delete("/contacts")]
pub async fn delete_contact(
    _admin: AdminUser,
    query: web::Query<IdQuery>,
) -> Result<HttpResponse, AppError> {
    let id = query
        .id
        .as_deref()
        .ok_or_else(|| AppError::ValidationError("Contact ID is required".to_string()))?;

    ContactService::instance().delete(id).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::ok("Contact deleted successfully")))
}

#[cfg(test)]
mod tests {
    use actix_web::{test, App};
    use actix_web::http::StatusCode;
    use mongodb::bson::oid::ObjectId;
    use serde_json::json;
    use crate::config::JwtConfig;
    use crate::domain::entities::User;
    use crate::routes::configure_all_routes;
    use crate::services::auth::TokenService;

    fn admin_token() -> String {
        let mut user = User::new_admin(
            "Owner".to_string(),
            "owner@example.com".to_string(),
            "hash".to_string(),
        );
        user.id = Some(ObjectId::new());
        TokenService::with_secret(JwtConfig::secret()).generate_token(&user).unwrap()
    }

    #[actix_web::test]
    async fn test_create_contact_reports_every_missing_field() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/contacts")
            .set_json(json!({ "name": "  ", "email": "nope" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Validation error");
        assert_eq!(body["errors"]["name"][0], "Name is required");
        assert_eq!(body["errors"]["email"][0], "Invalid email format");
        assert_eq!(body["errors"]["phone"][0], "Phone is required");
        assert_eq!(body["errors"]["message"][0], "Message is required");
    }

    #[actix_web::test]
    async fn test_admin_endpoints_require_session() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let list = test::TestRequest::get().uri("/api/v1/contacts").to_request();
        assert_eq!(test::call_service(&app, list).await.status(), StatusCode::UNAUTHORIZED);

        let update = test::TestRequest::put()
            .uri("/api/v1/contacts")
            .set_json(json!({ "id": "65f1c0a2b3d4e5f6a7b8c9d0", "status": "resolved" }))
            .to_request();
        assert_eq!(test::call_service(&app, update).await.status(), StatusCode::UNAUTHORIZED);

        let delete = test::TestRequest::delete()
            .uri("/api/v1/contacts?id=65f1c0a2b3d4e5f6a7b8c9d0")
            .to_request();
        assert_eq!(test::call_service(&app, delete).await.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_delete_without_id_is_rejected() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::delete()
            .uri("/api/v1/contacts")
            .insert_header(("Authorization", format!("Bearer {}", admin_token())))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Contact ID is required");
    }
}
