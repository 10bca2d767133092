//! Delivery targets for a reminder.
//!
//! A [`Device`] is a `(device_id, delivery_token)` pair, both non-empty.
//! [`Devices`] is a non-empty ordered collection — every reminder must have
//! at least one place to deliver to.

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A single delivery target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    device_id: String,
    delivery_token: String,
}

impl Device {
    /// Construct a device; both fields must be non-empty.
    pub fn new(
        device_id: impl Into<String>,
        delivery_token: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let device_id = device_id.into();
        let delivery_token = delivery_token.into();

        if device_id.is_empty() {
            return Err(DomainError::EmptyDeviceId);
        }
        if delivery_token.is_empty() {
            return Err(DomainError::EmptyDeliveryToken);
        }

        Ok(Self {
            device_id,
            delivery_token,
        })
    }

    /// The device identifier.
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// The push delivery token.
    pub fn delivery_token(&self) -> &str {
        &self.delivery_token
    }
}

/// Non-empty ordered collection of devices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Devices(Vec<Device>);

impl Devices {
    /// Wrap a device list; fails on an empty list.
    pub fn new(devices: Vec<Device>) -> Result<Self, DomainError> {
        if devices.is_empty() {
            return Err(DomainError::EmptyDevices);
        }
        Ok(Self(devices))
    }

    /// Number of devices.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false — construction rejects empty lists.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Slice view in insertion order.
    pub fn as_slice(&self) -> &[Device] {
        &self.0
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Device> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Devices {
    type Item = &'a Device;
    type IntoIter = std::slice::Iter<'a, Device>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
