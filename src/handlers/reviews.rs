use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::reviews::{CreateReviewRequest, UpdateReviewRequest};
use crate::domain::dto::{IdQuery, MessageResponse};
use crate::domain::models::auth::AdminUser;
use crate::services::reviews::ReviewService;

/// One review with `?id=`, otherwise all of them.
#[get("/reviews")]
pub async fn get_reviews(query: web::Query<IdQuery>) -> Result<HttpResponse, AppError> {
    let service = ReviewService::instance();

    match query.id.as_deref() {
        Some(id) => Ok(HttpResponse::Ok().json(service.get(id).await?)),
        None => Ok(HttpResponse::Ok().json(service.list().await?)),
    }
}

#[post("/reviews")]
pub async fn create_review(
    payload: web::Json<CreateReviewRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = ReviewService::instance().create(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

#[put("/reviews")]
pub async fn update_review(
    _admin: AdminUser,
    payload: web::Json<UpdateReviewRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = ReviewService::instance().update(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

#[delete("/reviews")]
pub async fn delete_review(
    _admin: AdminUser,
    query: web::Query<IdQuery>,
) -> Result<HttpResponse, AppError> {
    let id = query
        .id
        .as_deref()
        .ok_or_else(|| AppError::ValidationError("Review ID is required".to_string()))?;

    ReviewService::instance().delete(id).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::ok("Review deleted successfully")))
}

#[cfg(test)]
mod tests {
    use actix_web::{test, App};
    use actix_web::http::StatusCode;
    use serde_json::json;
    use crate::routes::configure_all_routes;

    #[actix_web::test]
    async fn test_create_review_validation() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/reviews")
            .set_json(json!({ "name": "Sam", "rating": 6, "comment": "Great crew", "source": "MySpace" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["errors"]["rating"][0], "Rating must be between 1 and 5");
        assert_eq!(body["errors"]["source"][0], "Invalid review source");
    }

    #[actix_web::test]
    async fn test_malformed_json_is_bad_request() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/reviews")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{\"name\": ")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
    }

    #[actix_web::test]
    async fn test_delete_review_requires_admin() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::delete().uri("/api/v1/reviews?id=abc").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }
}
