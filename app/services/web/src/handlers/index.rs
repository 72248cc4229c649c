use app_dto::MessageOutput;
use axum::Json;

pub async fn get_test() -> Json<MessageOutput> {
    Json(MessageOutput::new("Backend funcionando correctamente!"))
}
