/// Example guarded route
///
/// Stands in for the resource server the access token protects. The guard
/// middleware has already verified the token and resolved the subject by the
/// time this handler runs.

use actix_web::{web, HttpResponse};

use crate::middleware::CurrentUser;

/// GET /protected
pub async fn protected(user: web::ReqData<CurrentUser>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Hello user {}, this is protected.", user.user_id)
    }))
}
