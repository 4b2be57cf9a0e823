//! Order operations: create, cancel, shipping label, tracking.
//!
//! # Design
//! Every operation is the same fixed pipeline: validate the request value
//! in-process (parameter-only reads skip this), send it through the shared
//! transport, accept or reject the response envelope, then decode the
//! operation's payload from the same body. Validation rules mirror the
//! provider's published field constraints; violations aggregate per field
//! in field-name order (see [`crate::validate`]).

use serde::{Deserialize, Serialize};

use crate::envelope::{self, DataEnvelope};
use crate::error::Error;
use crate::transport::Transport;
use crate::types::{OrderCreateResult, TrackEvent};
use crate::validate::{self, Violations};

/// Request to create a shipment order.
///
/// Optional fields are sent only when present; a present empty string is
/// validated (and rejected by the length rules), never silently dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateOrderRequest {
    /// Customer order number, 1-30 chars.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub c_order_no: Option<String>,
    /// Reference number, 1-30 chars.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_no: Option<String>,
    /// Free slot printed below the label, 1-255 chars; commonly SKU info.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference4: Option<String>,
    /// Content of the label's Reference column, 1-30 chars.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yt_reference: Option<String>,
    /// Delivery type: `HDN` (home delivery, the default) or `ZT` (pickup).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_type: Option<String>,
    /// Product code, 1-100 chars.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_code: Option<String>,
    /// Declared parcel value in USD, 0.0001-100.00.
    pub declared_value: f64,
    /// Collection window start, `yyyy-MM-dd HH:mm:ss`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_collect_start_time: Option<String>,
    /// Collection window end, `yyyy-MM-dd HH:mm:ss`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_collect_end_time: Option<String>,
    pub order_shipper: OrderShipper,
    pub order_consignee: OrderConsignee,
    pub order_goods: OrderGoods,
    pub order_item_list: Vec<OrderItem>,
    /// Port of entry.
    pub entry_port: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_insurance: Option<OrderInsurance>,
}

impl CreateOrderRequest {
    pub fn validate(&self) -> Result<(), Error> {
        let mut v = Violations::new();
        validate::length_if_present(
            &mut v,
            "cOrderNo",
            "customer order number",
            self.c_order_no.as_deref(),
            1,
            30,
        );
        validate::length_if_present(
            &mut v,
            "referenceNo",
            "reference number",
            self.reference_no.as_deref(),
            1,
            30,
        );
        validate::length_if_present(
            &mut v,
            "reference4",
            "reserved reference",
            self.reference4.as_deref(),
            1,
            255,
        );
        validate::length_if_present(
            &mut v,
            "ytReference",
            "label reference",
            self.yt_reference.as_deref(),
            1,
            30,
        );
        validate::length_if_present(
            &mut v,
            "productCode",
            "product code",
            self.product_code.as_deref(),
            1,
            100,
        );
        validate::bounded_f64(
            &mut v,
            "declaredValue",
            "declared value",
            self.declared_value,
            0.0001,
            100.0,
        );
        v.fold("orderShipper", self.order_shipper.check());
        v.fold("orderConsignee", self.order_consignee.check());
        v.fold("orderGoods", self.order_goods.check());
        if self.order_item_list.is_empty() {
            v.note("orderItemList", "order item list must not be empty");
        } else {
            for (index, item) in self.order_item_list.iter().enumerate() {
                v.fold(&format!("orderItemList.{index}"), item.check());
            }
        }
        if let Some(insurance) = &self.order_insurance {
            v.fold("orderInsurance", insurance.check());
        }
        v.into_result()
    }
}

/// Shipper (sender) details.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderShipper {
    /// Name, 1-50 chars.
    pub shipper_name: String,
    /// Phone number, 10-14 chars.
    pub shipper_phone: String,
    pub shipper_country: String,
    /// State or province, 1-35 chars.
    pub shipper_state: String,
    /// City, 1-50 chars.
    pub shipper_city: String,
    /// District, 1-50 chars.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipper_area: Option<String>,
    /// Street address, 1-100 chars.
    pub shipper_street: String,
    /// Postcode.
    pub shipper_code: String,
    /// Email, 1-100 chars.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipper_email: Option<String>,
}

impl OrderShipper {
    fn check(&self) -> Violations {
        let mut v = Violations::new();
        validate::required(&mut v, "shipperName", "shipper name", &self.shipper_name);
        validate::length(&mut v, "shipperName", "shipper name", &self.shipper_name, 1, 50);
        validate::required(&mut v, "shipperPhone", "shipper phone", &self.shipper_phone);
        validate::length(&mut v, "shipperPhone", "shipper phone", &self.shipper_phone, 10, 14);
        validate::required(&mut v, "shipperCountry", "shipper country", &self.shipper_country);
        validate::required(&mut v, "shipperState", "shipper state", &self.shipper_state);
        validate::length(&mut v, "shipperState", "shipper state", &self.shipper_state, 1, 35);
        validate::required(&mut v, "shipperCity", "shipper city", &self.shipper_city);
        validate::length(&mut v, "shipperCity", "shipper city", &self.shipper_city, 1, 50);
        validate::length_if_present(
            &mut v,
            "shipperArea",
            "shipper area",
            self.shipper_area.as_deref(),
            1,
            50,
        );
        validate::required(&mut v, "shipperStreet", "shipper street", &self.shipper_street);
        validate::length(&mut v, "shipperStreet", "shipper street", &self.shipper_street, 1, 100);
        validate::required(&mut v, "shipperCode", "shipper postcode", &self.shipper_code);
        validate::length_if_present(
            &mut v,
            "shipperEmail",
            "shipper email",
            self.shipper_email.as_deref(),
            1,
            100,
        );
        v
    }
}

/// Consignee (recipient) details.
///
/// Phone and postcode are carried on the wire but not validated locally;
/// the provider accepts regional formats the published bounds would
/// reject.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderConsignee {
    /// Name, 1-100 chars.
    pub consignee_name: String,
    pub consignee_phone: String,
    pub consignee_country: String,
    /// State, 1-35 chars.
    pub consignee_state: String,
    /// City, 1-50 chars.
    pub consignee_city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consignee_area: Option<String>,
    /// Address line 1, 1-255 chars.
    pub address1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address3: Option<String>,
    pub consignee_code: String,
    /// Interior door number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consignee_num_in: Option<String>,
    /// Exterior door number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consignee_num_ext: Option<String>,
    /// Extra delivery notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consignee_email: Option<String>,
}

impl OrderConsignee {
    fn check(&self) -> Violations {
        let mut v = Violations::new();
        validate::required(&mut v, "consigneeName", "consignee name", &self.consignee_name);
        validate::length(&mut v, "consigneeName", "consignee name", &self.consignee_name, 1, 100);
        validate::required(
            &mut v,
            "consigneeCountry",
            "consignee country",
            &self.consignee_country,
        );
        validate::required(&mut v, "consigneeState", "consignee state", &self.consignee_state);
        validate::length(&mut v, "consigneeState", "consignee state", &self.consignee_state, 1, 35);
        validate::required(&mut v, "consigneeCity", "consignee city", &self.consignee_city);
        validate::length(&mut v, "consigneeCity", "consignee city", &self.consignee_city, 1, 50);
        validate::required(&mut v, "address1", "address line 1", &self.address1);
        validate::length(&mut v, "address1", "address line 1", &self.address1, 1, 255);
        v
    }
}

/// Parcel dimensions and weight.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderGoods {
    /// Declared weight, 0.001-99.00; unit per `weight_unit`, default KG.
    pub weight: f64,
    /// Length, 0.01-999; unit per `length_unit`, default CM.
    pub length: f64,
    /// Height, 0.01-999.
    pub height: f64,
    /// Width, 0.01-999.
    pub width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_unit: Option<String>,
}

impl OrderGoods {
    fn check(&self) -> Violations {
        let mut v = Violations::new();
        validate::bounded_f64(&mut v, "weight", "parcel weight", self.weight, 0.001, 99.0);
        validate::bounded_f64(&mut v, "length", "parcel length", self.length, 0.01, 999.0);
        validate::bounded_f64(&mut v, "height", "parcel height", self.height, 0.01, 999.0);
        validate::bounded_f64(&mut v, "width", "parcel width", self.width, 0.01, 999.0);
        v
    }
}

/// One line item in the parcel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderItem {
    /// English item name, 1-128 chars.
    pub item_name_en: String,
    /// Chinese item name, 1-60 chars.
    pub item_name_zh: String,
    /// Piece count, 1-9999.
    pub item_qty: i64,
}

impl OrderItem {
    fn check(&self) -> Violations {
        let mut v = Violations::new();
        validate::required(&mut v, "itemNameEn", "item name", &self.item_name_en);
        validate::length(&mut v, "itemNameEn", "item name", &self.item_name_en, 1, 128);
        validate::required(&mut v, "itemNameZh", "item chinese name", &self.item_name_zh);
        validate::length(&mut v, "itemNameZh", "item chinese name", &self.item_name_zh, 1, 60);
        validate::bounded_i64(&mut v, "itemQty", "item quantity", self.item_qty, 1, 9999);
        v
    }
}

/// Optional declared-value insurance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderInsurance {
    /// Insured amount, 0.0001-10000.
    pub insured_amount: f64,
}

impl OrderInsurance {
    fn check(&self) -> Violations {
        let mut v = Violations::new();
        validate::bounded_f64(
            &mut v,
            "insuredAmount",
            "insured amount",
            self.insured_amount,
            0.0001,
            10000.0,
        );
        v
    }
}

/// Request to cancel an existing order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CancelOrderRequest {
    /// GOFO waybill number.
    pub order_no: String,
    /// Cancellation note, 1-100 chars.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl CancelOrderRequest {
    pub fn validate(&self) -> Result<(), Error> {
        let mut v = Violations::new();
        validate::required(&mut v, "orderNo", "order number", &self.order_no);
        validate::length_if_present(
            &mut v,
            "remarks",
            "cancel remarks",
            self.remarks.as_deref(),
            1,
            100,
        );
        v.into_result()
    }
}

#[derive(Debug, Default, Deserialize)]
struct LabelData {
    #[serde(default)]
    base64code: String,
}

/// Order API operations. Obtained from [`Client::order`](crate::Client::order);
/// cheap to clone, safe to share across threads.
#[derive(Debug, Clone)]
pub struct OrderService {
    transport: Transport,
}

impl OrderService {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Create a shipment order and return the provider-assigned
    /// identifiers.
    pub fn create(&self, request: &CreateOrderRequest) -> Result<OrderCreateResult, Error> {
        request.validate()?;
        let body = self
            .transport
            .post_json("/open-api/v2/order/create", request)?;
        envelope::unwrap_body(&body)?;
        let result: DataEnvelope<OrderCreateResult> = serde_json::from_str(&body)?;
        Ok(result.data.unwrap_or_default())
    }

    /// Cancel an order by waybill number.
    pub fn cancel(&self, request: &CancelOrderRequest) -> Result<(), Error> {
        request.validate()?;
        let body = self
            .transport
            .post_json("/open-api/v2/order/cancel", request)?;
        envelope::unwrap_body(&body)?;
        Ok(())
    }

    /// Fetch the shipping label for `order_no` as a base64-encoded PDF.
    ///
    /// A successful envelope carrying an empty label classifies as
    /// [`Error::EmptyLabel`].
    pub fn shipping_label(&self, order_no: &str) -> Result<String, Error> {
        let body = self.transport.get(
            "/open-api/v2/order/getOrderLabelUrlV2",
            &[("orderNo", order_no)],
        )?;
        envelope::unwrap_body(&body)?;
        let result: DataEnvelope<LabelData> = serde_json::from_str(&body)?;
        let label = result.data.unwrap_or_default().base64code;
        if label.is_empty() {
            return Err(Error::EmptyLabel);
        }
        Ok(label)
    }

    /// Fetch the tracking events recorded for `order_no`, oldest first as
    /// the provider returns them.
    pub fn track(&self, order_no: &str) -> Result<Vec<TrackEvent>, Error> {
        let body = self
            .transport
            .get(&format!("/open-api/v2/order/track/{order_no}"), &[])?;
        envelope::unwrap_body(&body)?;
        let result: DataEnvelope<Vec<TrackEvent>> = serde_json::from_str(&body)?;
        Ok(result.data.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create_request() -> CreateOrderRequest {
        CreateOrderRequest {
            c_order_no: Some("TEST_ORDER_001".to_string()),
            declared_value: 12.0,
            order_shipper: OrderShipper {
                shipper_name: "Shenzhen Depot".to_string(),
                shipper_phone: "13000000000".to_string(),
                shipper_country: "CN".to_string(),
                shipper_state: "Guangdong".to_string(),
                shipper_city: "Shenzhen".to_string(),
                shipper_street: "1 Warehouse Road".to_string(),
                shipper_code: "518000".to_string(),
                ..Default::default()
            },
            order_consignee: OrderConsignee {
                consignee_name: "Jane Doe".to_string(),
                consignee_phone: "13000000000".to_string(),
                consignee_country: "US".to_string(),
                consignee_state: "California".to_string(),
                consignee_city: "Los Angeles".to_string(),
                address1: "100 Main St".to_string(),
                consignee_code: "90001".to_string(),
                ..Default::default()
            },
            order_goods: OrderGoods {
                weight: 1.0,
                length: 10.0,
                height: 10.0,
                width: 10.0,
                ..Default::default()
            },
            order_item_list: vec![OrderItem {
                item_name_en: "Socks".to_string(),
                item_name_zh: "袜子".to_string(),
                item_qty: 2,
            }],
            entry_port: "LAX".to_string(),
            ..Default::default()
        }
    }

    fn message_of(err: Error) -> String {
        match err {
            Error::Validation(message) => message,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn fully_populated_request_validates() {
        assert!(valid_create_request().validate().is_ok());
    }

    #[test]
    fn zero_declared_value_is_reported_as_empty() {
        let mut request = valid_create_request();
        request.declared_value = 0.0;
        let message = message_of(request.validate().unwrap_err());
        assert_eq!(message, "declared value must not be empty");
    }

    #[test]
    fn declared_value_bounds_are_inclusive() {
        let mut request = valid_create_request();
        request.declared_value = 100.0;
        assert!(request.validate().is_ok());

        request.declared_value = 100.01;
        let message = message_of(request.validate().unwrap_err());
        assert_eq!(message, "declared value must not be greater than 100");
    }

    #[test]
    fn violations_are_ordered_by_field_name() {
        let mut request = valid_create_request();
        request.c_order_no = Some(String::new());
        request.declared_value = 0.0;
        let message = message_of(request.validate().unwrap_err());
        assert_eq!(
            message,
            "customer order number length must be between 1 and 30; declared value must not be empty"
        );
    }

    #[test]
    fn nested_shipper_violations_fold_under_parent() {
        let mut request = valid_create_request();
        request.order_shipper.shipper_name = String::new();
        request.order_shipper.shipper_phone = "123".to_string();
        let message = message_of(request.validate().unwrap_err());
        assert_eq!(
            message,
            "shipper name must not be empty; shipper phone length must be between 10 and 14"
        );
    }

    #[test]
    fn missing_items_are_required() {
        let mut request = valid_create_request();
        request.order_item_list.clear();
        let message = message_of(request.validate().unwrap_err());
        assert_eq!(message, "order item list must not be empty");
    }

    #[test]
    fn each_item_is_validated() {
        let mut request = valid_create_request();
        request.order_item_list.push(OrderItem {
            item_name_en: "Gloves".to_string(),
            item_name_zh: "手套".to_string(),
            item_qty: 0,
        });
        let message = message_of(request.validate().unwrap_err());
        assert_eq!(message, "item quantity must not be empty");
    }

    #[test]
    fn insurance_is_checked_only_when_present() {
        let mut request = valid_create_request();
        request.order_insurance = None;
        assert!(request.validate().is_ok());

        request.order_insurance = Some(OrderInsurance { insured_amount: 0.0 });
        let message = message_of(request.validate().unwrap_err());
        assert_eq!(message, "insured amount must not be empty");
    }

    #[test]
    fn present_empty_optional_string_fails_length() {
        let mut request = valid_create_request();
        request.product_code = Some(String::new());
        let message = message_of(request.validate().unwrap_err());
        assert_eq!(message, "product code length must be between 1 and 100");
    }

    #[test]
    fn absent_optional_fields_are_skipped() {
        let mut request = valid_create_request();
        request.c_order_no = None;
        request.product_code = None;
        assert!(request.validate().is_ok());
    }

    #[test]
    fn cancel_requires_order_number() {
        let request = CancelOrderRequest::default();
        let message = message_of(request.validate().unwrap_err());
        assert_eq!(message, "order number must not be empty");
    }

    #[test]
    fn cancel_remarks_checked_when_present() {
        let request = CancelOrderRequest {
            order_no: "GF1".to_string(),
            remarks: Some("x".repeat(101)),
        };
        let message = message_of(request.validate().unwrap_err());
        assert_eq!(message, "cancel remarks length must be between 1 and 100");

        let request = CancelOrderRequest {
            order_no: "GF1".to_string(),
            remarks: Some("no longer needed".to_string()),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn create_request_serializes_wire_field_names() {
        let json = serde_json::to_value(valid_create_request()).unwrap();
        assert_eq!(json["cOrderNo"], "TEST_ORDER_001");
        assert_eq!(json["declaredValue"], 12.0);
        assert_eq!(json["orderShipper"]["shipperName"], "Shenzhen Depot");
        assert_eq!(json["orderItemList"][0]["itemNameEn"], "Socks");
        assert_eq!(json["entryPort"], "LAX");
    }

    #[test]
    fn absent_optional_fields_are_omitted_from_json() {
        let mut request = valid_create_request();
        request.reference_no = None;
        request.order_insurance = None;
        let json = serde_json::to_value(request).unwrap();
        assert!(json.get("referenceNo").is_none());
        assert!(json.get("orderInsurance").is_none());
    }

    #[test]
    fn label_data_decodes_lowercase_wire_name() {
        let data: LabelData = serde_json::from_str(r#"{"base64code":"JVBERi0x"}"#).unwrap();
        assert_eq!(data.base64code, "JVBERi0x");
    }
}
