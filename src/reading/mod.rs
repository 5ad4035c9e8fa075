//! Sensor readings
//!
//! Sources produce [`RawReading`]s, which may be partial or carry garbage
//! values. Only a [`Reading`] (obtained through [`RawReading::validate`]) is
//! ever stored in a window, so every stored sample carries all seven metrics
//! with finite values.
//!
//! # Examples
//!
//! ```rust
//! use std::time::SystemTime;
//! use airgradient_metrics::core::types::MetricKind;
//! use airgradient_metrics::reading::RawReading;
//!
//! let payload = r#"{"rco2": 640, "atmp": 21.4, "rhum": 48, "tvoc_index": 1,
//!                  "pm01": 3, "pm02": 5, "pm10": 7, "wifi": -61}"#;
//! let raw = RawReading::from_json_str(payload, SystemTime::now()).unwrap();
//! let reading = raw.validate().unwrap();
//! assert_eq!(reading.value(MetricKind::Co2), 640.0);
//! ```

mod types;

pub use types::*;
