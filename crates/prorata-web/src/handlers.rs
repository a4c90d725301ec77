use askama::Template;
use axum::{
    Form, Json,
    extract::{
        State,
        rejection::{FormRejection, JsonRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use prorata_calculator::{
    CalculationInput, ProrationError, ProrationReport, ProrationResult, month_name,
};
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;
use tracing::info;

use crate::{AppState, error::WebError};

/// One entry of the move-in month select.
pub struct MonthOption {
    pub number: u32,
    pub name: &'static str,
    pub selected: bool,
}

fn month_options(selected: u32) -> Vec<MonthOption> {
    (1..=12)
        .filter_map(|number| {
            month_name(number).map(|name| MonthOption { number, name, selected: number == selected })
        })
        .collect()
}

/// Input form, optionally with an error banner.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub area: String,
    pub year: String,
    pub months: Vec<MonthOption>,
    pub min_area: f64,
    pub max_area: f64,
    pub min_year: i32,
    pub max_year: i32,
    pub error: Option<String>,
}

impl IndexTemplate {
    fn new(state: &AppState, form: &CalculateForm, error: Option<String>) -> Self {
        let bounds = &state.config.bounds;
        let selected = form.move_in_month.trim().parse().unwrap_or(1);
        Self {
            area: form.area.clone(),
            year: form.move_in_year.clone(),
            months: month_options(selected),
            min_area: bounds.min_area,
            max_area: bounds.max_area,
            min_year: bounds.min_year,
            max_year: bounds.max_year,
            error,
        }
    }

    fn with_defaults(state: &AppState, error: Option<String>) -> Self {
        let defaults = &state.config.form;
        let form = CalculateForm {
            area: defaults.default_area.to_string(),
            move_in_month: "1".to_string(),
            move_in_year: defaults.default_year.to_string(),
        };
        Self::new(state, &form, error)
    }
}

/// Result panels for a successful calculation.
#[derive(Template)]
#[template(path = "result.html")]
pub struct ResultTemplate {
    pub report: ProrationReport,
}

/// Form fields exactly as submitted; parsed per field so errors can name it.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct CalculateForm {
    pub area: String,
    pub move_in_month: String,
    pub move_in_year: String,
}

impl TryFrom<&CalculateForm> for CalculationInput {
    type Error = ProrationError;

    fn try_from(form: &CalculateForm) -> Result<Self, Self::Error> {
        Ok(CalculationInput::new(
            parse_field("area", &form.area)?,
            parse_field("move_in_month", &form.move_in_month)?,
            parse_field("move_in_year", &form.move_in_year)?,
        ))
    }
}

fn parse_field<T: FromStr>(field: &'static str, raw: &str) -> Result<T, ProrationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ProrationError::invalid(field, "a value is required"));
    }
    raw.parse()
        .map_err(|_| ProrationError::invalid(field, format!("'{raw}' is not a valid number")))
}

/// JSON body of the API; fields stay untyped until each is checked.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct ApiInput {
    pub area: Value,
    pub move_in_month: Value,
    pub move_in_year: Value,
}

impl TryFrom<&ApiInput> for CalculationInput {
    type Error = ProrationError;

    fn try_from(body: &ApiInput) -> Result<Self, Self::Error> {
        Ok(CalculationInput::new(
            json_number("area", &body.area, Value::as_f64)?,
            json_number("move_in_month", &body.move_in_month, |v| {
                v.as_u64().and_then(|m| u32::try_from(m).ok())
            })?,
            json_number("move_in_year", &body.move_in_year, |v| {
                v.as_i64().and_then(|y| i32::try_from(y).ok())
            })?,
        ))
    }
}

fn json_number<T>(
    field: &'static str,
    value: &Value,
    convert: impl Fn(&Value) -> Option<T>,
) -> Result<T, ProrationError> {
    if value.is_null() {
        return Err(ProrationError::invalid(field, "a value is required"));
    }
    convert(value)
        .ok_or_else(|| ProrationError::invalid(field, format!("expected a number, got {value}")))
}

pub async fn index(State(state): State<AppState>) -> IndexTemplate {
    IndexTemplate::with_defaults(&state, None)
}

/// Handles the form post, re-rendering the form with a message on bad input.
pub async fn calculate(
    State(state): State<AppState>,
    form: Result<Form<CalculateForm>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            let err = WebError::from(rejection);
            let page = IndexTemplate::with_defaults(&state, Some(err.to_string()));
            return (err.status_code(), page).into_response();
        }
    };

    let outcome = CalculationInput::try_from(&form)
        .and_then(|input| state.calculator.calculate(&input));
    match outcome {
        Ok(result) => {
            info!(next_due = %result.next_due, "Rendered proration for form submission");
            let report = ProrationReport::new(
                &result,
                state.calculator.rates(),
                state.calculator.changeover(),
                &state.config.rates.currency_symbol,
            );
            ResultTemplate { report }.into_response()
        }
        Err(err) => {
            let page = IndexTemplate::new(&state, &form, Some(err.to_string()));
            (StatusCode::UNPROCESSABLE_ENTITY, page).into_response()
        }
    }
}

/// JSON variant of `calculate`.
pub async fn api_proration(
    State(state): State<AppState>,
    body: Result<Json<ApiInput>, JsonRejection>,
) -> Result<Json<ProrationResult>, WebError> {
    let Json(body) = body?;
    let input = CalculationInput::try_from(&body)?;
    let result = state.calculator.calculate(&input)?;
    Ok(Json(result))
}

pub async fn health() -> &'static str {
    "OK"
}
