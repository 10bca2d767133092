//! Wire types for the REST API.
//!
//! Request bodies deserialize straight into service inputs; responses are
//! built from service outputs. Times are RFC 3339 on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use remind_service::{
    CancelByTaskInput, CreateRemindsInput, DeviceInput, RemindOutput, RemindsOutput,
    TimeRangeInput,
};

/// One delivery target in a create request.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceRequest {
    pub device_id: String,
    pub delivery_token: String,
}

/// `POST /reminds` request body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRemindsRequest {
    pub times: Vec<DateTime<Utc>>,
    pub user_id: String,
    #[serde(default)]
    pub devices: Vec<DeviceRequest>,
    pub task_id: String,
    pub task_type: String,
}

impl From<CreateRemindsRequest> for CreateRemindsInput {
    fn from(req: CreateRemindsRequest) -> Self {
        Self {
            times: req.times,
            user_id: req.user_id,
            devices: req
                .devices
                .into_iter()
                .map(|d| DeviceInput {
                    device_id: d.device_id,
                    delivery_token: d.delivery_token,
                })
                .collect(),
            task_id: req.task_id,
            task_type: req.task_type,
        }
    }
}

/// `GET /reminds` query string. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TimeRangeQuery {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl From<TimeRangeQuery> for TimeRangeInput {
    fn from(query: TimeRangeQuery) -> Self {
        Self {
            start: query.start,
            end: query.end,
        }
    }
}

/// `POST /reminds/{id}/throttled` request body.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateThrottledRequest {
    pub throttled: bool,
}

/// `POST /reminds/cancel` request body.
#[derive(Debug, Clone, Deserialize)]
pub struct CancelRemindsRequest {
    pub task_id: String,
    pub user_id: String,
}

impl From<CancelRemindsRequest> for CancelByTaskInput {
    fn from(req: CancelRemindsRequest) -> Self {
        Self {
            task_id: req.task_id,
            user_id: req.user_id,
        }
    }
}

/// One delivery target in a response.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceResponse {
    pub device_id: String,
    pub delivery_token: String,
}

/// A single reminder on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct RemindResponse {
    pub id: String,
    pub time: DateTime<Utc>,
    pub user_id: String,
    pub devices: Vec<DeviceResponse>,
    pub task_id: String,
    pub task_type: String,
    pub slide_window_seconds: i64,
    pub throttled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RemindOutput> for RemindResponse {
    fn from(out: RemindOutput) -> Self {
        Self {
            id: out.id,
            time: out.time,
            user_id: out.user_id,
            devices: out
                .devices
                .into_iter()
                .map(|d| DeviceResponse {
                    device_id: d.device_id,
                    delivery_token: d.delivery_token,
                })
                .collect(),
            task_id: out.task_id,
            task_type: out.task_type,
            slide_window_seconds: out.slide_window_seconds,
            throttled: out.throttled,
            created_at: out.created_at,
            updated_at: out.updated_at,
        }
    }
}

/// A reminder batch on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct RemindsResponse {
    pub reminds: Vec<RemindResponse>,
    pub count: usize,
}

impl From<RemindsOutput> for RemindsResponse {
    fn from(out: RemindsOutput) -> Self {
        let reminds: Vec<RemindResponse> =
            out.reminds.into_iter().map(RemindResponse::from).collect();
        Self {
            reminds,
            count: out.count,
        }
    }
}
