use actix_web::{get, web, HttpResponse, Responder};
use crate::models::{AppState, DrawQuery, DrawResponse};
use crate::services::generator::generate_draw;
use crate::services::solver::MAX_DRAW_LEN;
use log::info;

#[get("/draw")]
pub async fn rand_draw(
    data: web::Data<AppState>,
    query: web::Query<DrawQuery>,
) -> impl Responder {
    let tiles = query.tiles.unwrap_or(data.tile_count);
    if tiles > MAX_DRAW_LEN {
        return HttpResponse::BadRequest().body(format!("At most {} tiles per draw", MAX_DRAW_LEN));
    }
    let vowels = query.vowels.unwrap_or(data.default_vowels);

    let draw = generate_draw(&data.pools, vowels, tiles, &mut rand::thread_rng());
    info!("Dealt {} ({} tiles, {} vowels requested)", draw, tiles, vowels);

    HttpResponse::Ok().json(DrawResponse {
        vowels: draw.vowel_count(),
        letters: draw.letters().to_vec(),
    })
}
