//! Route handlers.
//!
//! Handlers own the boundary work: coerce form fields and URL parameters
//! into the types the services expect, invoke the action, then turn its
//! structured result into a notice plus redirect (or a rendered page).
//!
//! Response policy per error kind:
//! - `Validation` and `Chain` failures flash a notice and take the same
//!   redirect as success; reads fall back to an empty default.
//! - `Conversion` faults (malformed number or address) return 400 directly.

use alloy::primitives::{Address, TxHash, U256};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use serde::Deserialize;
use std::str::FromStr;

use crate::http::flash::{Notice, Session};
use crate::http::pages;
use crate::http::server::AppState;
use crate::market::types::{ActionError, ActionResult, EstateKind};

// ── Boundary coercion ───────────────────────────────────────────────────

/// Query parameter carrying the acting address on the six action routes.
#[derive(Debug, Deserialize)]
pub struct ActorQuery {
    pub public_key: Option<String>,
}

fn parse_address(field: &str, value: &str) -> Result<Address, ActionError> {
    Address::from_str(value.trim())
        .map_err(|e| ActionError::Conversion(format!("{}: {}", field, e)))
}

fn parse_number(field: &str, value: &str) -> Result<U256, ActionError> {
    value
        .trim()
        .parse::<U256>()
        .map_err(|e| ActionError::Conversion(format!("{}: {}", field, e)))
}

fn actor_from_query(query: &ActorQuery) -> Result<Address, ActionError> {
    let raw = query
        .public_key
        .as_deref()
        .ok_or_else(|| ActionError::Conversion("public_key: missing query parameter".to_string()))?;
    parse_address("public_key", raw)
}

// ── Response helpers ────────────────────────────────────────────────────

fn with_session_cookie(mut response: Response, session: &Session) -> Response {
    if let Some(cookie) = session.set_cookie() {
        response.headers_mut().append(header::SET_COOKIE, cookie);
    }
    response
}

/// Render a page, draining the session's pending notices into it.
fn render(state: &AppState, session: &Session, title: &str, body: &str) -> Response {
    let notices = state.flash.take(session.id);
    let html = pages::page(title, &notices, body);
    with_session_cookie(Html(html).into_response(), session)
}

/// Queue a notice and redirect.
fn flash_redirect(
    state: &AppState,
    session: &Session,
    notice: Notice,
    location: &str,
) -> Response {
    state.flash.push(session.id, notice);
    with_session_cookie(Redirect::to(location).into_response(), session)
}

/// 400 page for malformed input; the one error kind that skips the
/// flash-and-redirect cycle.
fn conversion_response(err: ActionError) -> Response {
    let body = format!("<p>{}</p>", pages::escape(&err.to_string()));
    let html = pages::page("Некорректный запрос", &[], &body);
    (StatusCode::BAD_REQUEST, Html(html)).into_response()
}

fn dashboard_path(actor: Address) -> String {
    format!("/dashboard/{}", actor)
}

/// Map a write action's result onto the uniform notice-plus-redirect shape.
/// Failure redirects exactly where success does.
fn write_outcome(
    state: &AppState,
    session: &Session,
    result: ActionResult<TxHash>,
    success_text: &str,
    error_text: &str,
    location: &str,
) -> Response {
    match result {
        Ok(tx_hash) => flash_redirect(
            state,
            session,
            Notice::success(format!("{} Хеш транзакции: {}", success_text, tx_hash)),
            location,
        ),
        Err(e) => flash_redirect(
            state,
            session,
            Notice::danger(format!("{}: {}", error_text, e)),
            location,
        ),
    }
}

// ── Landing, registration, login ────────────────────────────────────────

pub async fn index(State(state): State<AppState>, session: Session) -> Response {
    render(&state, &session, "Портал недвижимости", &pages::landing())
}

pub async fn register_form(State(state): State<AppState>, session: Session) -> Response {
    render(&state, &session, "Регистрация", &pages::register_form())
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub password: String,
}

pub async fn register_submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    let notice = match state.accounts.register(&form.password).await {
        Ok(address) => Notice::success(format!("Адрес нового аккаунта: {}", address)),
        Err(ActionError::Validation(_)) => {
            Notice::danger("Пароль не соответствует требованиям. Попробуйте еще раз.")
        }
        Err(e) => Notice::danger(format!("Ошибка при создании аккаунта: {}", e)),
    };
    flash_redirect(&state, &session, notice, "/")
}

pub async fn login_form(State(state): State<AppState>, session: Session) -> Response {
    render(&state, &session, "Вход", &pages::login_form())
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub public_key: String,
    pub password: String,
}

pub async fn login_submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, Response> {
    let address = parse_address("public_key", &form.public_key).map_err(conversion_response)?;

    match state.accounts.authorize(address, &form.password).await {
        Ok(()) => Ok(with_session_cookie(
            Redirect::to(&dashboard_path(address)).into_response(),
            &session,
        )),
        Err(e) => {
            state
                .flash
                .push(session.id, Notice::danger(format!("Ошибка авторизации: {}", e)));
            Ok(render(&state, &session, "Вход", &pages::login_form()))
        }
    }
}

pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
    Path(address): Path<String>,
) -> Result<Response, Response> {
    let address = parse_address("address", &address).map_err(conversion_response)?;
    Ok(render(
        &state,
        &session,
        "Личный кабинет",
        &pages::dashboard(address),
    ))
}

// ── Write actions ───────────────────────────────────────────────────────

pub async fn create_estate_form(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ActorQuery>,
) -> Result<Response, Response> {
    let actor = actor_from_query(&query).map_err(conversion_response)?;
    Ok(render(
        &state,
        &session,
        "Создание недвижимости",
        &pages::create_estate_form(&actor.to_string()),
    ))
}

#[derive(Debug, Deserialize)]
pub struct CreateEstateForm {
    pub size: String,
    pub photo: String,
    pub rooms: String,
    pub estate_type: String,
}

pub async fn create_estate_submit(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ActorQuery>,
    Form(form): Form<CreateEstateForm>,
) -> Result<Response, Response> {
    let actor = actor_from_query(&query).map_err(conversion_response)?;
    let size = parse_number("size", &form.size).map_err(conversion_response)?;
    let rooms = parse_number("rooms", &form.rooms).map_err(conversion_response)?;
    let kind = EstateKind::from_label(&form.estate_type);

    let result = state
        .market
        .create_estate(actor, size, form.photo, rooms, kind)
        .await;
    Ok(write_outcome(
        &state,
        &session,
        result,
        "Недвижимость создана успешно.",
        "Ошибка при создании недвижимости",
        &dashboard_path(actor),
    ))
}

pub async fn create_ad_form(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ActorQuery>,
) -> Result<Response, Response> {
    let actor = actor_from_query(&query).map_err(conversion_response)?;
    Ok(render(
        &state,
        &session,
        "Создание объявления",
        &pages::create_ad_form(&actor.to_string()),
    ))
}

#[derive(Debug, Deserialize)]
pub struct CreateAdForm {
    pub estate_id: String,
    pub price: String,
}

pub async fn create_ad_submit(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ActorQuery>,
    Form(form): Form<CreateAdForm>,
) -> Result<Response, Response> {
    let actor = actor_from_query(&query).map_err(conversion_response)?;
    let estate_id = parse_number("estate_id", &form.estate_id).map_err(conversion_response)?;
    let price = parse_number("price", &form.price).map_err(conversion_response)?;

    let result = state.market.create_ad(actor, estate_id, price).await;
    Ok(write_outcome(
        &state,
        &session,
        result,
        "Объявление создано успешно.",
        "Ошибка при создании объявления",
        &dashboard_path(actor),
    ))
}

pub async fn buy_estate_form(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ActorQuery>,
) -> Result<Response, Response> {
    let actor = actor_from_query(&query).map_err(conversion_response)?;
    Ok(render(
        &state,
        &session,
        "Покупка недвижимости",
        &pages::buy_estate_form(&actor.to_string()),
    ))
}

#[derive(Debug, Deserialize)]
pub struct BuyEstateForm {
    pub ad_id: String,
    pub price: String,
}

pub async fn buy_estate_submit(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ActorQuery>,
    Form(form): Form<BuyEstateForm>,
) -> Result<Response, Response> {
    let actor = actor_from_query(&query).map_err(conversion_response)?;
    let ad_id = parse_number("ad_id", &form.ad_id).map_err(conversion_response)?;
    let price = parse_number("price", &form.price).map_err(conversion_response)?;

    let result = state.market.buy_estate(actor, ad_id, price).await;
    Ok(write_outcome(
        &state,
        &session,
        result,
        "Недвижимость успешно куплена.",
        "Ошибка при покупке недвижимости",
        &dashboard_path(actor),
    ))
}

pub async fn withdraw_funds_form(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ActorQuery>,
) -> Result<Response, Response> {
    let actor = actor_from_query(&query).map_err(conversion_response)?;
    Ok(render(
        &state,
        &session,
        "Вывод средств",
        &pages::withdraw_funds_form(&actor.to_string()),
    ))
}

#[derive(Debug, Deserialize)]
pub struct WithdrawForm {
    pub amount: String,
}

pub async fn withdraw_funds_submit(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ActorQuery>,
    Form(form): Form<WithdrawForm>,
) -> Result<Response, Response> {
    let actor = actor_from_query(&query).map_err(conversion_response)?;
    let amount = parse_number("amount", &form.amount).map_err(conversion_response)?;

    let result = state.market.withdraw(actor, amount).await;
    Ok(write_outcome(
        &state,
        &session,
        result,
        "Средства успешно выведены.",
        "Ошибка при выводе средств",
        &dashboard_path(actor),
    ))
}

pub async fn change_estate_status_form(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ActorQuery>,
) -> Result<Response, Response> {
    let actor = actor_from_query(&query).map_err(conversion_response)?;
    Ok(render(
        &state,
        &session,
        "Статус недвижимости",
        &pages::change_estate_status_form(&actor.to_string()),
    ))
}

#[derive(Debug, Deserialize)]
pub struct EstateStatusForm {
    pub estate_id: String,
}

pub async fn change_estate_status_submit(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ActorQuery>,
    Form(form): Form<EstateStatusForm>,
) -> Result<Response, Response> {
    let actor = actor_from_query(&query).map_err(conversion_response)?;
    let estate_id = parse_number("estate_id", &form.estate_id).map_err(conversion_response)?;

    let result = state.market.change_estate_status(actor, estate_id).await;
    Ok(write_outcome(
        &state,
        &session,
        result,
        "Статус недвижимости успешно изменен.",
        "Ошибка при изменении статуса недвижимости",
        &dashboard_path(actor),
    ))
}

pub async fn change_ad_status_form(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ActorQuery>,
) -> Result<Response, Response> {
    let actor = actor_from_query(&query).map_err(conversion_response)?;
    Ok(render(
        &state,
        &session,
        "Статус объявления",
        &pages::change_ad_status_form(&actor.to_string()),
    ))
}

#[derive(Debug, Deserialize)]
pub struct AdStatusForm {
    pub ad_id: String,
}

pub async fn change_ad_status_submit(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ActorQuery>,
    Form(form): Form<AdStatusForm>,
) -> Result<Response, Response> {
    let actor = actor_from_query(&query).map_err(conversion_response)?;
    let ad_id = parse_number("ad_id", &form.ad_id).map_err(conversion_response)?;

    let result = state.market.change_ad_status(actor, ad_id).await;
    Ok(write_outcome(
        &state,
        &session,
        result,
        "Статус объявления успешно изменен.",
        "Ошибка при изменении статуса объявления",
        &dashboard_path(actor),
    ))
}

// ── Read views ──────────────────────────────────────────────────────────

pub async fn estates_view(State(state): State<AppState>, session: Session) -> Response {
    let estates = match state.market.get_estates().await {
        Ok(estates) => estates,
        Err(e) => {
            state.flash.push(
                session.id,
                Notice::danger(format!(
                    "Ошибка при получении информации о недвижимости: {}",
                    e
                )),
            );
            Vec::new()
        }
    };
    render(
        &state,
        &session,
        "Недвижимость",
        &pages::estates_table(&estates),
    )
}

pub async fn ads_view(State(state): State<AppState>, session: Session) -> Response {
    let ads = match state.market.get_ads().await {
        Ok(ads) => ads,
        Err(e) => {
            state.flash.push(
                session.id,
                Notice::danger(format!("Ошибка при получении информации о объявлениях: {}", e)),
            );
            Vec::new()
        }
    };
    render(&state, &session, "Объявления", &pages::ads_table(&ads))
}

pub async fn balance_view(
    State(state): State<AppState>,
    session: Session,
    Path(address): Path<String>,
) -> Result<Response, Response> {
    let address = parse_address("address", &address).map_err(conversion_response)?;

    let balance = match state.market.get_balance(address).await {
        Ok(balance) => balance,
        Err(e) => {
            state.flash.push(
                session.id,
                Notice::danger(format!("Ошибка при получении баланса: {}", e)),
            );
            U256::ZERO
        }
    };
    Ok(render(
        &state,
        &session,
        "Баланс",
        &pages::balance_view(address, balance),
    ))
}

// ── Health ──────────────────────────────────────────────────────────────

pub async fn health(State(state): State<AppState>) -> Response {
    if state.chain.is_healthy().await {
        (StatusCode::OK, Json(serde_json::json!({ "status": "ok" }))).into_response()
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "status": "degraded" })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_parse_with_whitespace() {
        assert_eq!(parse_number("size", " 42 ").unwrap(), U256::from(42));
        assert!(parse_number("size", "4x2").is_err());
        assert!(parse_number("size", "").is_err());
    }

    #[test]
    fn conversion_errors_name_the_field() {
        let err = parse_number("price", "abc").unwrap_err();
        assert!(err.to_string().contains("price"));

        let err = parse_address("public_key", "0x123").unwrap_err();
        assert!(err.to_string().contains("public_key"));
    }

    #[test]
    fn missing_actor_is_a_conversion_error() {
        let query = ActorQuery { public_key: None };
        assert!(matches!(
            actor_from_query(&query),
            Err(ActionError::Conversion(_))
        ));
    }

    #[test]
    fn checksummed_address_round_trips_through_query() {
        let address = Address::from_str("0xd8da6bf26964af9d7eed9e03e53415d37aa96045").unwrap();
        let query = ActorQuery {
            public_key: Some(address.to_string()),
        };
        assert_eq!(actor_from_query(&query).unwrap(), address);
    }
}
