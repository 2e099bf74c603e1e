use actix_web::{get, web, HttpResponse, Responder};
use crate::models::{AppState, ConfigResponse};
use log::info;

#[get("/config")]
pub async fn get_config(data: web::Data<AppState>) -> impl Responder {
    let config = ConfigResponse::from_state(&data);

    info!(
        "Served config: {} tiles, {} vowels, {} words in {} buckets",
        config.tiles, config.default_vowels, config.word_count, config.bucket_count
    );

    HttpResponse::Ok().json(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::dictionary::DictionaryIndex;
    use crate::services::distribution::LetterPools;
    use actix_web::{test, App};
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_get_config() {
        let index = Arc::new(DictionaryIndex::from_words(["chien", "niche", "chat", "42"]));
        let state = web::Data::new(AppState::new(index, LetterPools::french()));
        let app = test::init_service(App::new().app_data(state).service(get_config)).await;

        let req = test::TestRequest::get().uri("/config").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["tiles"], 10);
        assert_eq!(body["default_vowels"], 4);
        assert_eq!(body["word_count"], 3);
        assert_eq!(body["bucket_count"], 2);
        assert_eq!(body["build"]["rejected"], 1);
        assert_eq!(body["vowels"]["e"], 15);
    }
}
