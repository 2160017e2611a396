#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::{Value, json};
use steam_ingest_store::{AppDetailsResponse, AppDetailsSource, StoreError};

/// Serves canned `appdetails` bodies. AppIDs without a body answer with a
/// 503, like an unavailable storefront.
pub struct CannedSource {
    bodies: HashMap<u32, String>,
    language: String,
    pub requests: RefCell<Vec<u32>>,
}

impl CannedSource {
    pub fn new(language: &str) -> Self {
        Self {
            bodies: HashMap::new(),
            language: language.to_string(),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Respond to `app_id` with a successful entry wrapping `data`.
    pub fn with_app(mut self, app_id: u32, data: Value) -> Self {
        let body = json!({ app_id.to_string(): { "success": true, "data": data } });
        self.bodies.insert(app_id, body.to_string());
        self
    }

    /// Respond to `app_id` with `success: false`.
    pub fn with_unavailable(mut self, app_id: u32) -> Self {
        let body = json!({ app_id.to_string(): { "success": false } });
        self.bodies.insert(app_id, body.to_string());
        self
    }

    pub fn with_raw(mut self, app_id: u32, body: &str) -> Self {
        self.bodies.insert(app_id, body.to_string());
        self
    }
}

impl AppDetailsSource for CannedSource {
    fn app_details(&self, app_id: u32) -> Result<AppDetailsResponse, StoreError> {
        self.requests.borrow_mut().push(app_id);
        match self.bodies.get(&app_id) {
            Some(body) => AppDetailsResponse::from_json(body),
            None => Err(StoreError::ServerError {
                status: 503,
                message: "Service Unavailable".to_string(),
            }),
        }
    }

    fn language(&self) -> &str {
        &self.language
    }
}

pub fn elden_ring() -> Value {
    json!({
        "name": "ELDEN RING",
        "release_date": { "coming_soon": false, "date": "2022년 2월 25일" },
        "developers": ["FromSoftware, Inc.", "Bandai Namco"],
        "price_overview": { "currency": "KRW", "initial": 6480000, "final": 6480000 },
        "short_description": "새로운 판타지 액션 RPG.",
        "header_image": "https://cdn.example/1245620/header.jpg",
        "screenshots": [
            { "id": 0, "path_full": "https://cdn.example/1245620/ss_0.jpg" },
            { "id": 1, "path_full": "https://cdn.example/1245620/ss_1.jpg" },
            { "id": 2, "path_full": "https://cdn.example/1245620/ss_2.jpg" },
            { "id": 3, "path_full": "https://cdn.example/1245620/ss_3.jpg" }
        ],
        "genres": [
            { "id": "1", "description": "액션" },
            { "id": "3", "description": "RPG" }
        ]
    })
}

pub fn baldurs_gate() -> Value {
    json!({
        "name": "Baldur's Gate 3",
        "release_date": { "coming_soon": false, "date": "2023년 8월 3일" },
        "developers": ["Larian Studios"],
        "price_overview": { "currency": "KRW", "initial": 6600000, "final": 6600000 },
        "short_description": "파티를 모아 포가튼 렐름으로 돌아가세요.",
        "header_image": "https://cdn.example/1086940/header.jpg",
        "screenshots": [
            { "id": 0, "path_full": "https://cdn.example/1086940/ss_0.jpg" }
        ],
        "genres": [
            { "id": "3", "description": "RPG" },
            { "id": "25", "description": "어드벤처" }
        ]
    })
}

pub fn count(conn: &rusqlite::Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
        .unwrap()
}
