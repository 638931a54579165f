//! In-memory student-records API used by integration tests and local dev.
//!
//! Mirrors the production backend's observable contract: every response body
//! is a `{success, data?, error?}` envelope (list adds `count`, delete adds
//! `message`), ids are sequential and server-assigned, and create/update
//! validate fields before touching the store. Name fields are trimmed and
//! `amount_due` is coerced to a float before storing, so clients may send it
//! as either a JSON string or a number.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Student {
    pub student_id: u32,
    pub first_name: String,
    pub last_name: String,
    pub dob: NaiveDate,
    pub amount_due: f64,
}

/// Incoming create/update payload. Every field is optional so that update
/// can validate and apply only what the client sent; create enforces
/// presence in `validate`.
#[derive(Debug, Deserialize)]
pub struct StudentPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub dob: Option<String>,
    pub amount_due: Option<Amount>,
}

/// `amount_due` on the wire: the browser form submits text, other clients
/// send numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    fn to_f64(&self) -> Result<f64, ()> {
        match self {
            Amount::Number(n) => Ok(*n),
            Amount::Text(s) => s.trim().parse::<f64>().map_err(|_| ()),
        }
    }
}

/// Response envelope. `data`/`error`/`count`/`message` are emitted only when
/// set, matching the backend's per-endpoint shapes.
#[derive(Debug, Serialize)]
pub struct Reply {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Reply {
    fn data(data: Value) -> Self {
        Reply {
            success: true,
            data: Some(data),
            error: None,
            count: None,
            message: None,
        }
    }

    fn error(text: &str) -> Self {
        Reply {
            success: false,
            data: None,
            error: Some(text.to_string()),
            count: None,
            message: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct Registry {
    next_id: u32,
    students: BTreeMap<u32, Student>,
}

pub type Db = Arc<RwLock<Registry>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Registry::default()));
    Router::new()
        .route("/students", get(list_students).post(create_student))
        .route(
            "/students/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// First failing field as a single "field: message" string, in the order the
/// production backend checked them. Create requires the three identity
/// fields; update checks only what is present.
fn validate(payload: &StudentPayload, is_update: bool) -> Result<(), String> {
    if !is_update || payload.first_name.is_some() {
        if payload.first_name.as_deref().unwrap_or("").trim().is_empty() {
            return Err("first_name: First name is required".to_string());
        }
    }
    if !is_update || payload.last_name.is_some() {
        if payload.last_name.as_deref().unwrap_or("").trim().is_empty() {
            return Err("last_name: Last name is required".to_string());
        }
    }
    if !is_update || payload.dob.is_some() {
        let dob = payload.dob.as_deref().unwrap_or("");
        if NaiveDate::parse_from_str(dob, "%Y-%m-%d").is_err() {
            return Err("dob: Valid date (YYYY-MM-DD) required".to_string());
        }
    }
    if let Some(amount) = &payload.amount_due {
        match amount.to_f64() {
            Ok(n) if n < 0.0 => return Err("amount_due: Cannot be negative".to_string()),
            Ok(_) => {}
            Err(()) => return Err("amount_due: Must be a number".to_string()),
        }
    }
    Ok(())
}

fn student_json(student: &Student) -> Value {
    serde_json::to_value(student).expect("student serializes")
}

async fn list_students(State(db): State<Db>) -> Json<Reply> {
    let registry = db.read().await;
    let students: Vec<Value> = registry.students.values().map(student_json).collect();
    let count = students.len();
    let mut reply = Reply::data(Value::Array(students));
    reply.count = Some(count);
    Json(reply)
}

async fn get_student(
    State(db): State<Db>,
    Path(id): Path<u32>,
) -> (StatusCode, Json<Reply>) {
    let registry = db.read().await;
    match registry.students.get(&id) {
        Some(student) => (StatusCode::OK, Json(Reply::data(student_json(student)))),
        None => (StatusCode::NOT_FOUND, Json(Reply::error("Not found"))),
    }
}

async fn create_student(
    State(db): State<Db>,
    Json(payload): Json<StudentPayload>,
) -> (StatusCode, Json<Reply>) {
    if let Err(text) = validate(&payload, false) {
        return (StatusCode::BAD_REQUEST, Json(Reply::error(&text)));
    }

    // Presence and shape were just validated.
    let dob = NaiveDate::parse_from_str(payload.dob.as_deref().unwrap_or(""), "%Y-%m-%d")
        .expect("validated dob");
    let amount_due = payload
        .amount_due
        .map(|a| a.to_f64().expect("validated amount"))
        .unwrap_or(0.0);

    let mut registry = db.write().await;
    registry.next_id += 1;
    let student = Student {
        student_id: registry.next_id,
        first_name: payload.first_name.unwrap_or_default().trim().to_string(),
        last_name: payload.last_name.unwrap_or_default().trim().to_string(),
        dob,
        amount_due,
    };
    registry.students.insert(student.student_id, student.clone());

    (StatusCode::CREATED, Json(Reply::data(student_json(&student))))
}

async fn update_student(
    State(db): State<Db>,
    Path(id): Path<u32>,
    Json(payload): Json<StudentPayload>,
) -> (StatusCode, Json<Reply>) {
    let mut registry = db.write().await;
    if !registry.students.contains_key(&id) {
        return (StatusCode::NOT_FOUND, Json(Reply::error("Not found")));
    }
    if let Err(text) = validate(&payload, true) {
        return (StatusCode::BAD_REQUEST, Json(Reply::error(&text)));
    }

    let student = registry.students.get_mut(&id).expect("checked above");
    if let Some(first_name) = payload.first_name {
        student.first_name = first_name.trim().to_string();
    }
    if let Some(last_name) = payload.last_name {
        student.last_name = last_name.trim().to_string();
    }
    if let Some(dob) = payload.dob {
        student.dob = NaiveDate::parse_from_str(&dob, "%Y-%m-%d").expect("validated dob");
    }
    if let Some(amount) = payload.amount_due {
        student.amount_due = amount.to_f64().expect("validated amount");
    }

    (StatusCode::OK, Json(Reply::data(student_json(student))))
}

async fn delete_student(
    State(db): State<Db>,
    Path(id): Path<u32>,
) -> (StatusCode, Json<Reply>) {
    let mut registry = db.write().await;
    if registry.students.remove(&id).is_none() {
        return (StatusCode::NOT_FOUND, Json(Reply::error("Not found")));
    }
    let reply = Reply {
        success: true,
        data: None,
        error: None,
        count: None,
        message: Some("Deleted successfully".to_string()),
    };
    (StatusCode::OK, Json(reply))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_serializes_with_iso_dob() {
        let student = Student {
            student_id: 1,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            dob: NaiveDate::from_ymd_opt(1815, 12, 10).unwrap(),
            amount_due: 5.0,
        };
        let json = serde_json::to_value(&student).unwrap();
        assert_eq!(json["student_id"], 1);
        assert_eq!(json["dob"], "1815-12-10");
        assert_eq!(json["amount_due"], 5.0);
    }

    #[test]
    fn amount_accepts_string_and_number() {
        let payload: StudentPayload =
            serde_json::from_str(r#"{"amount_due":"12.5"}"#).unwrap();
        assert_eq!(payload.amount_due.unwrap().to_f64(), Ok(12.5));

        let payload: StudentPayload = serde_json::from_str(r#"{"amount_due":12.5}"#).unwrap();
        assert_eq!(payload.amount_due.unwrap().to_f64(), Ok(12.5));
    }

    #[test]
    fn amount_rejects_non_numeric_text() {
        let payload: StudentPayload =
            serde_json::from_str(r#"{"amount_due":"twelve"}"#).unwrap();
        assert!(payload.amount_due.unwrap().to_f64().is_err());
    }

    #[test]
    fn create_requires_identity_fields() {
        let payload: StudentPayload = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(
            validate(&payload, false).unwrap_err(),
            "first_name: First name is required"
        );
    }

    #[test]
    fn whitespace_name_fails_validation() {
        let payload: StudentPayload = serde_json::from_str(
            r#"{"first_name":"   ","last_name":"Lovelace","dob":"1815-12-10"}"#,
        )
        .unwrap();
        assert_eq!(
            validate(&payload, false).unwrap_err(),
            "first_name: First name is required"
        );
    }

    #[test]
    fn create_rejects_malformed_dob() {
        let payload: StudentPayload = serde_json::from_str(
            r#"{"first_name":"Ada","last_name":"Lovelace","dob":"12/10/1815"}"#,
        )
        .unwrap();
        assert_eq!(
            validate(&payload, false).unwrap_err(),
            "dob: Valid date (YYYY-MM-DD) required"
        );
    }

    #[test]
    fn negative_amount_fails_validation() {
        let payload: StudentPayload = serde_json::from_str(
            r#"{"first_name":"Ada","last_name":"Lovelace","dob":"1815-12-10","amount_due":"-1"}"#,
        )
        .unwrap();
        assert_eq!(
            validate(&payload, false).unwrap_err(),
            "amount_due: Cannot be negative"
        );
    }

    #[test]
    fn update_validates_only_present_fields() {
        let payload: StudentPayload =
            serde_json::from_str(r#"{"amount_due":"3"}"#).unwrap();
        assert!(validate(&payload, true).is_ok());
    }

    #[test]
    fn failure_reply_has_no_data_field() {
        let json = serde_json::to_value(Reply::error("Not found")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Not found");
        assert!(json.get("data").is_none());
    }
}
