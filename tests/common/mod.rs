#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Form;
use axum::extract::State;
use axum::routing::post;
use fhir_orderbridge::{ComposedOrder, MemoryRecordProvider, OrderEncoder, Result};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::sync::Mutex;

pub const PATIENT_ID: &str = "HOSP1.A123456";
pub const ENCOUNTER_ID: &str = "E.2024.0007";
pub const PRACTITIONER_ID: &str = "DR.77";

pub fn sample_patient() -> Value {
    json!({
        "resourceType": "Patient",
        "id": PATIENT_ID,
        "name": [{"text": "Chen, Mei"}],
    })
}

pub fn sample_practitioner() -> Value {
    json!({
        "resourceType": "Practitioner",
        "id": PRACTITIONER_ID,
        "name": {"text": "Dr. Wu"},
    })
}

pub fn sample_encounter() -> Value {
    json!({
        "resourceType": "Encounter",
        "id": ENCOUNTER_ID,
        "type": [{
            "coding": [{
                "system": "http://www.datacom.com.tw/TWRCore/Encounter",
                "code": "CT",
            }],
        }],
    })
}

pub fn sample_list() -> Value {
    json!({
        "resourceType": "List",
        "id": "V.2024.0007",
        "code": {"coding": [{"code": "OPD"}]},
        "identifier": [{"system": "Creator", "value": "EMR"}],
        "subject": {"reference": format!("Patient/{PATIENT_ID}")},
        "source": {"reference": format!("Practitioner/{PRACTITIONER_ID}")},
        "encounter": {"reference": format!("Encounter/{ENCOUNTER_ID}")},
    })
}

pub fn order_station_org(base_url: &str) -> Value {
    json!({
        "resourceType": "Organization",
        "id": "lv2",
        "identifier": [
            {"system": "MedLevel", "value": "03"},
            {"system": "OrderStationUrl", "value": base_url},
        ],
    })
}

/// Provider seeded with the full referenced graph of `sample_list`.
pub async fn seeded_provider() -> MemoryRecordProvider {
    let provider = MemoryRecordProvider::new();
    provider.insert(sample_patient()).await;
    provider.insert(sample_practitioner()).await;
    provider.insert(sample_encounter()).await;
    provider
}

/// Encoder stub standing in for the record server's wire parser.
pub struct JsonEncoder;

impl OrderEncoder for JsonEncoder {
    fn encode(&self, order: &ComposedOrder) -> Result<String> {
        Ok(serde_json::to_string(order)?)
    }
}

#[derive(Debug, Deserialize)]
pub struct OrderForm {
    pub xml: String,
    pub modality: String,
}

#[derive(Clone, Default)]
pub struct StationState {
    pub reply: Arc<Mutex<String>>,
    pub requests: Arc<AtomicUsize>,
    pub last_form: Arc<Mutex<Option<(String, String)>>>,
}

/// In-process order-station stub. Returns the bound address and shared state
/// controlling the canned reply.
pub async fn spawn_order_station(reply: &str) -> (SocketAddr, StationState) {
    let state = StationState {
        reply: Arc::new(Mutex::new(reply.to_string())),
        ..StationState::default()
    };

    let app = axum::Router::new()
        .route(
            "/DxOrder/create",
            post(
                |State(state): State<StationState>, Form(form): Form<OrderForm>| async move {
                    state.requests.fetch_add(1, Ordering::SeqCst);
                    *state.last_form.lock().await = Some((form.xml, form.modality));
                    state.reply.lock().await.clone()
                },
            ),
        )
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, state)
}
