//! Экстракторы, чьи отказы отдаются через [`AppError`]: кривое тело
//! или строка запроса получают обычный конверт ошибки.

use axum::extract::{FromRequest, FromRequestParts};

use crate::shared::error::AppError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);
