use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Guest, GuestKey, UNGROUPED_HOUSEHOLD};

/// One element of the directory listing as the remote service returns it.
///
/// Every field is optional on the wire; validation into a [`Guest`] decides
/// what is usable. Elements are parsed individually so one malformed record
/// drops out instead of failing the whole load.
#[derive(Debug, Clone, Deserialize)]
pub struct GuestRecord {
    #[serde(default)]
    pub id: Option<GuestKey>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub household: Option<String>,
    #[serde(default)]
    pub attending: Option<Value>,
}

impl GuestRecord {
    /// Validates the record into a domain guest. `None` means the record is
    /// unusable and must be dropped silently, never surfaced to the user.
    pub fn into_guest(self) -> Option<Guest> {
        let id = self.id?;
        let name = self.name.filter(|name| !name.is_empty())?;
        let household = self
            .household
            .filter(|household| !household.is_empty())
            .unwrap_or_else(|| UNGROUPED_HOUSEHOLD.to_string());
        let attending = self.attending.as_ref().map(truthy).unwrap_or(false);
        Some(Guest {
            id,
            name,
            household,
            attending,
        })
    }
}

/// Boolean coercion for the `attending` flag, which the service has been
/// seen returning as a bool, a 0/1 number, or a string.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty() && s != "false" && s != "0",
        _ => false,
    }
}

/// One checkbox worth of submitted state. `attending` reflects the checkbox
/// at submit time, not the directory value it started from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    pub id: GuestKey,
    pub attending: bool,
}

/// Envelope shape the confirmation intake expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmationEnvelope {
    pub info: Vec<AttendanceEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> GuestRecord {
        serde_json::from_value(value).expect("guest record")
    }

    #[test]
    fn record_missing_id_is_dropped() {
        assert!(record(json!({ "name": "Ana" })).into_guest().is_none());
    }

    #[test]
    fn record_with_empty_name_is_dropped() {
        assert!(record(json!({ "id": 1, "name": "" })).into_guest().is_none());
    }

    #[test]
    fn missing_household_falls_back_to_the_sentinel() {
        let guest = record(json!({ "id": 1, "name": "Ana" }))
            .into_guest()
            .expect("valid guest");
        assert_eq!(guest.household, UNGROUPED_HOUSEHOLD);
        assert!(!guest.attending);
    }

    #[test]
    fn attending_coerces_loose_service_values() {
        for raw in [json!(true), json!(1), json!("sim")] {
            let guest = record(json!({ "id": 1, "name": "Ana", "attending": raw }))
                .into_guest()
                .expect("valid guest");
            assert!(guest.attending);
        }
        for raw in [json!(false), json!(0), json!(""), json!(null)] {
            let guest = record(json!({ "id": 1, "name": "Ana", "attending": raw }))
                .into_guest()
                .expect("valid guest");
            assert!(!guest.attending);
        }
    }

    #[test]
    fn envelope_serializes_under_the_info_key() {
        let envelope = ConfirmationEnvelope {
            info: vec![
                AttendanceEntry {
                    id: GuestKey::Number(1),
                    attending: true,
                },
                AttendanceEntry {
                    id: GuestKey::Text("vip-7".into()),
                    attending: false,
                },
            ],
        };
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({ "info": [
                { "id": 1, "attending": true },
                { "id": "vip-7", "attending": false },
            ]})
        );
    }
}
