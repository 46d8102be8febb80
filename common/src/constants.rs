/// Mean Earth radius in meters (IUGG).
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// Location request cadence requested from the platform.
pub const LOCATION_INTERVAL_MILLIS: u64 = 1000;
pub const LOCATION_FASTEST_INTERVAL_MILLIS: u64 = 500;

/// Defaults of the "create document" interaction used to export a track.
pub const EXPORT_SUGGESTED_NAME: &str = "location_data.json";
pub const EXPORT_MIME_TYPE: &str = "application/json";

/// Map view shown before the first fix arrives (Berlin).
pub const DEFAULT_MAP_CENTER: (f64, f64) = (52.5200, 13.4050);
pub const DEFAULT_MAP_ZOOM: f64 = 15.0;
