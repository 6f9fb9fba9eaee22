use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::faqs::{CreateFaqRequest, FaqQuery, UpdateFaqRequest};
use crate::domain::dto::{IdQuery, MessageResponse};
use crate::domain::models::auth::{AdminUser, OptionalUser};
use crate::services::faqs::FaqService;

/// `?id=` returns one entry; otherwise a list, filtered by `?category=`.
#[get("/faq")]
pub async fn get_faqs(
    user: OptionalUser,
    query: web::Query<FaqQuery>,
) -> Result<HttpResponse, AppError> {
    let service = FaqService::instance();

    if let Some(id) = query.id.as_deref() {
        return Ok(HttpResponse::Ok().json(service.get(id).await?));
    }

    let response = service
        .list(query.category.as_deref(), user.is_admin())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[post("/faq")]
pub async fn create_faq(
    _admin: AdminUser,
    payload: web::Json<CreateFaqRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = FaqService::instance().create(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

#[put("/faq")]
pub async fn update_faq(
    _admin: AdminUser,
    payload: web::Json<UpdateFaqRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = FaqService::instance().update(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

#[delete("/faq")]
pub async fn delete_faq(
    _admin: AdminUser,
    query: web::Query<IdQuery>,
) -> Result<HttpResponse, AppError> {
    let id = query
        .id
        .as_deref()
        .ok_or_else(|| AppError::ValidationError("FAQ ID is required".to_string()))?;

    FaqService::instance().delete(id).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::ok("FAQ deleted successfully")))
}

#[cfg(test)]
mod tests {
    use actix_web::{test, App};
    use actix_web::http::StatusCode;
    use serde_json::json;
    use crate::routes::configure_all_routes;

    #[actix_web::test]
    async fn test_faq_writes_require_admin() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let create = test::TestRequest::post()
            .uri("/api/v1/faq")
            .set_json(json!({ "question": "Q?", "answer": "A.", "category": "General" }))
            .to_request();
        assert_eq!(test::call_service(&app, create).await.status(), StatusCode::UNAUTHORIZED);

        let update = test::TestRequest::put()
            .uri("/api/v1/faq")
            .set_json(json!({ "id": "65f1c0a2b3d4e5f6a7b8c9d0", "order": 2 }))
            .to_request();
        assert_eq!(test::call_service(&app, update).await.status(), StatusCode::UNAUTHORIZED);

        let delete = test::TestRequest::delete().uri("/api/v1/faq?id=65f1c0a2b3d4e5f6a7b8c9d0").to_request();
        assert_eq!(test::call_service(&app, delete).await.status(), StatusCode::UNAUTHORIZED);
    }
}
