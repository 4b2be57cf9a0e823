//! In-memory mock of the GOFO open API.
//!
//! Every route answers HTTP 200 with the provider's `{code, msg, msgEn,
//! data}` envelope; business failures live in the envelope `code`, exactly
//! as the real service behaves. Orders are kept in an in-memory map keyed
//! by waybill number, so tracking output is stable across calls.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Order number whose label endpoint answers success with an empty payload.
pub const EMPTY_LABEL_ORDER_NO: &str = "EMPTY-LABEL";

/// Order number whose track endpoint stalls long enough to trip a short
/// client timeout.
pub const SLOW_ORDER_NO: &str = "SLOW";

/// Fixed base64 PDF prefix served as the label payload.
pub const LABEL_BASE64: &str = "JVBERi0xLjUNCiXi48/TDQo=";

#[derive(Clone, Debug)]
pub struct OrderRecord {
    pub waybill_no: String,
    pub c_order_no: String,
    pub verification_pin: String,
    pub cancelled: bool,
}

pub type Db = Arc<RwLock<HashMap<String, OrderRecord>>>;

#[derive(Deserialize)]
pub struct CreateOrder {
    #[serde(rename = "cOrderNo")]
    pub c_order_no: Option<String>,
}

#[derive(Deserialize)]
pub struct CancelOrder {
    #[serde(rename = "orderNo")]
    pub order_no: String,
}

#[derive(Deserialize)]
pub struct LabelQuery {
    #[serde(rename = "orderNo")]
    pub order_no: String,
}

fn envelope(code: i64, msg: &str, msg_en: &str, data: Value) -> Json<Value> {
    Json(json!({ "code": code, "msg": msg, "msgEn": msg_en, "data": data }))
}

fn not_found() -> Json<Value> {
    envelope(404, "单号不存在", "order does not exist", Value::Null)
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/open-api/v2/order/create", post(create_order))
        .route("/open-api/v2/order/cancel", post(cancel_order))
        .route("/open-api/v2/order/getOrderLabelUrlV2", get(order_label))
        .route("/open-api/v2/order/track/{order_no}", get(track_order))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn create_order(State(db): State<Db>, Json(input): Json<CreateOrder>) -> Json<Value> {
    let id = Uuid::new_v4().simple().to_string();
    let record = OrderRecord {
        waybill_no: format!("GF{}", id[..12].to_uppercase()),
        c_order_no: input.c_order_no.unwrap_or_default(),
        verification_pin: id[id.len() - 4..].to_string(),
        cancelled: false,
    };
    db.write()
        .await
        .insert(record.waybill_no.clone(), record.clone());
    envelope(
        200,
        "操作成功",
        "success",
        json!({
            "fourSegmentCode": "SZX-LAX-ONT-90",
            "cOrderNo": record.c_order_no,
            "verificationPin": record.verification_pin,
            "type": "create",
            "waybillNo": record.waybill_no,
        }),
    )
}

async fn cancel_order(State(db): State<Db>, Json(input): Json<CancelOrder>) -> Json<Value> {
    let mut orders = db.write().await;
    match orders.get_mut(&input.order_no) {
        Some(record) => {
            record.cancelled = true;
            envelope(200, "操作成功", "success", Value::Null)
        }
        None => not_found(),
    }
}

async fn order_label(State(db): State<Db>, Query(query): Query<LabelQuery>) -> Json<Value> {
    if query.order_no == EMPTY_LABEL_ORDER_NO {
        return envelope(200, "操作成功", "success", json!({ "base64code": "" }));
    }
    let orders = db.read().await;
    if orders.contains_key(&query.order_no) {
        envelope(200, "操作成功", "success", json!({ "base64code": LABEL_BASE64 }))
    } else {
        not_found()
    }
}

async fn track_order(State(db): State<Db>, Path(order_no): Path<String>) -> Json<Value> {
    if order_no == SLOW_ORDER_NO {
        tokio::time::sleep(std::time::Duration::from_secs(5)).await;
        return envelope(200, "操作成功", "success", json!([]));
    }
    let orders = db.read().await;
    if !orders.contains_key(&order_no) {
        return envelope(200, "操作成功", "success", json!([]));
    }
    envelope(
        200,
        "操作成功",
        "success",
        json!([
            {
                "pubEsContext": "包裹已揽收",
                "enContext": "Parcel collected",
                "operationMove": "GOT",
                "orderNo": order_no,
                "thirdWaybillNo": "",
                "operator": "depot",
                "operationTime": "2024-05-01 09:12:00",
                "groupTimeZone": "GMT+8",
                "pin": "N",
                "signerType": "",
                "location": "Shenzhen",
                "dept_id": 1,
                "signer": "",
                "errorCode": 0,
                "processCity": "Shenzhen",
                "processProvince": "Guangdong",
                "processPostCode": "518000"
            },
            {
                "pubEsContext": "包裹已签收",
                "enContext": "Delivered",
                "operationMove": "SIGNED",
                "orderNo": order_no,
                "thirdWaybillNo": "",
                "operator": "courier",
                "operationTime": "2024-05-09 16:40:00",
                "groupTimeZone": "GMT-8",
                "pin": "Y",
                "signerType": "consignee",
                "location": "Los Angeles",
                "dept_id": 2,
                "signer": "J. Doe",
                "errorCode": 0,
                "processCity": "Los Angeles",
                "processProvince": "California",
                "processPostCode": "90001"
            }
        ]),
    )
}
