/// Default CO2 ceiling in ppm
pub const DEFAULT_CO2_THRESHOLD: f64 = 1000.0;

/// Default temperature ceiling in degrees Celsius
pub const DEFAULT_TEMPERATURE_THRESHOLD: f64 = 30.0;

/// Default relative humidity ceiling in percent
pub const DEFAULT_HUMIDITY_THRESHOLD: f64 = 70.0;

/// Default VOC index ceiling
pub const DEFAULT_VOC_INDEX_THRESHOLD: f64 = 3.0;

/// Default PM1 ceiling in µg/m³
pub const DEFAULT_PM1_THRESHOLD: f64 = 35.0;

/// Default PM2.5 ceiling in µg/m³
pub const DEFAULT_PM25_THRESHOLD: f64 = 25.0;

/// Default PM10 ceiling in µg/m³
pub const DEFAULT_PM10_THRESHOLD: f64 = 50.0;

/// Prefix of the human readable alert message
pub const ALERT_MESSAGE_PREFIX: &str = "Alert! High levels detected for: ";
