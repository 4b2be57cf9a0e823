//! Response payload types decoded from the envelope `data` slot.
//!
//! All fields are serde-defaulted: the provider omits slots freely, and a
//! missing string decodes as empty rather than failing the whole payload.

use serde::{Deserialize, Serialize};

/// Identifiers returned when an order is created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderCreateResult {
    pub four_segment_code: String,
    /// Customer order number, echoed back.
    pub c_order_no: String,
    /// PIN the consignee presents at delivery.
    pub verification_pin: String,
    /// Operation type reported by the provider.
    #[serde(rename = "type")]
    pub kind: String,
    /// Provider waybill number; the handle for cancel, label and track.
    pub waybill_no: String,
}

/// One tracking event in a shipment's history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackEvent {
    /// Event description.
    pub pub_es_context: String,
    /// Event code.
    pub operation_move: String,
    /// Waybill number.
    pub order_no: String,
    /// Customer order number.
    pub third_waybill_no: String,
    /// Name of the operator who recorded the event.
    pub operator: String,
    /// Local time of the event, `yyyy-MM-dd HH:mm:ss`.
    pub operation_time: String,
    pub group_time_zone: String,
    /// Whether delivery was confirmed by PIN.
    pub pin: String,
    /// English event description.
    pub en_context: String,
    pub signer_type: String,
    /// Where the event happened.
    pub location: String,
    #[serde(rename = "dept_id")]
    pub dept_id: i64,
    pub signer: String,
    /// Exception class, zero when the event is normal.
    pub error_code: i64,
    pub process_city: String,
    pub process_province: String,
    pub process_post_code: String,
}
