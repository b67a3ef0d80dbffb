//! Request and response types for the `lookout` API.

use serde::{Deserialize, Serialize};

use crate::{SectorId, SensorId, TagId};

/// The envelope every list endpoint responds with.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub response: Vec<T>,
}

impl<T> ApiResponse<T> {
    pub fn new(response: Vec<T>) -> Self {
        Self { response }
    }
}

/// Response for mutations that report how the operation went.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

impl SuccessResponse {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Error body for `400` and `406` responses.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

/// One entry of the `GET /notifications/visit/:timestamp` response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SectorVisits {
    pub sector_id: SectorId,
    pub visits: u64,
}

/// The JSON payload sensors publish on the broker topic.
///
/// Unknown fields are ignored, devices are free to attach extra
/// metadata.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DetectionMessage {
    pub tag_id: TagId,
    pub sensor_id: SensorId,
}

/// Body of `POST /sensors/`.
///
/// Every field defaults so that validation can report which ones are
/// missing instead of failing deserialization wholesale.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct CreateSensorRequest {
    #[serde(default)]
    pub sensor_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub pos_x: Option<f64>,
    #[serde(default)]
    pub pos_y: Option<f64>,
    #[serde(default)]
    pub map_id: String,
    #[serde(default)]
    pub sector_id: String,
}

/// Body of `PATCH /sensors/:sensor_id`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct UpdateSensorRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub pos_x: Option<f64>,
    #[serde(default)]
    pub pos_y: Option<f64>,
    #[serde(default)]
    pub map_id: String,
    #[serde(default)]
    pub sector_id: String,
}
