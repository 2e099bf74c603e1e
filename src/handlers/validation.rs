use actix_web::{get, web, HttpResponse, Responder};
use crate::error::MotError;
use crate::models::{AppState, SolveResponse};
use crate::services::generator::Draw;
use crate::services::solver::solve;
use crate::utils::contains_only_letters;
use log::{info, warn};

#[get("/word/{word}")]
pub async fn check_word(
    data: web::Data<AppState>,
    word: web::Path<String>,
) -> impl Responder {
    let word = word.into_inner();

    if !data.index.contains(&word) {
        info!("Invalid word queried: {}", word.to_lowercase());
        return HttpResponse::NotFound().finish();
    }

    info!("Valid word queried: {}", word.to_uppercase());
    HttpResponse::Ok().body(format!("Valid word: {}", word.to_uppercase()))
}

/// A proposal is valid when it is a dictionary word formable from the draw
#[get("/validate/{letters}/{word}")]
pub async fn validate_word(
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (letters, word) = path.into_inner();

    if data.index.contains(&word) && contains_only_letters(&word, &letters) {
        HttpResponse::Ok().finish()
    } else {
        HttpResponse::NotFound().finish()
    }
}

#[get("/solve/{letters}")]
pub async fn solve_draw(
    data: web::Data<AppState>,
    letters: web::Path<String>,
) -> impl Responder {
    let draw = Draw::from(letters.as_str());
    let state = data.clone();
    let solver_draw = draw.clone();

    let result = match web::block(move || solve(&solver_draw, &state.index)).await {
        Ok(result) => result,
        Err(e) => {
            warn!("Solver task failed: {}", e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    match result {
        Ok(solution) => {
            info!("Solved {}: {} word(s) of {} letters", draw, solution.best_words.len(), solution.best_length);
            HttpResponse::Ok().json(SolveResponse { draw: draw.as_string(), solution })
        }
        Err(e @ MotError::InvalidDraw { .. }) => {
            info!("Rejected draw: {}", e);
            HttpResponse::BadRequest().body(e.to_string())
        }
        Err(e) => {
            warn!("Unexpected solver error: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}
