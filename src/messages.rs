//! JSON message types for remote smoothing control.
//!
//! A host frontend can carry the `SET_SMOOTH_AXIS` parameters as JSON
//! instead of a command line. The request type is `no_std` friendly
//! (heapless smoother name) and deserializes with either `serde_json`
//! (desktop) or `serde-json-core` (embedded frontends).
//!
//! # Example
//!
//! ```rust
//! use smooth_axis::messages::SetSmoothAxisRequest;
//! use smooth_axis::SmoothAxisCommand;
//!
//! let json = r#"{"smoother": "di", "target_freq_x": 40.0, "damping_ratio_x": 0.1}"#;
//! let req: SetSmoothAxisRequest = serde_json::from_str(json).unwrap();
//! let cmd = SmoothAxisCommand::from(req);
//! assert_eq!(cmd.target_freq_x, Some(40.0));
//! assert_eq!(cmd.target_freq_y, None);
//! ```

use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};

use crate::commands::SmoothAxisCommand;

/// Longest accepted smoother name.
const SMOOTHER_NAME_LEN: usize = 16;

/// JSON form of a `SET_SMOOTH_AXIS` command. Every field is optional;
/// absent fields keep their current values, mirroring the command line.
///
/// # JSON Examples
///
/// Retune X only:
/// ```json
/// {"target_freq_x": 40.0, "damping_ratio_x": 0.1}
/// ```
///
/// Switch smoother and set both axes at once:
/// ```json
/// {"smoother": "accel", "target_freq_xy": 45.0}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetSmoothAxisRequest {
    /// Requested smoother name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smoother: Option<HeaplessString<SMOOTHER_NAME_LEN>>,
    /// Target resonant frequency for X, Hz.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_freq_x: Option<f64>,
    /// Target resonant frequency for Y, Hz.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_freq_y: Option<f64>,
    /// Target resonant frequency for both axes; wins over per-axis fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_freq_xy: Option<f64>,
    /// Damping ratio for X.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damping_ratio_x: Option<f64>,
    /// Damping ratio for Y.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damping_ratio_y: Option<f64>,
    /// Damping ratio for both axes; wins over per-axis fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damping_ratio_xy: Option<f64>,
}

impl From<SetSmoothAxisRequest> for SmoothAxisCommand {
    fn from(req: SetSmoothAxisRequest) -> Self {
        Self {
            smoother: req.smoother.map(|name| name.as_str().to_string()),
            target_freq_x: req.target_freq_x,
            target_freq_y: req.target_freq_y,
            target_freq_xy: req.target_freq_xy,
            damping_ratio_x: req.damping_ratio_x,
            damping_ratio_y: req.damping_ratio_y,
            damping_ratio_xy: req.damping_ratio_xy,
        }
    }
}

/// Parse a smoothing request from JSON bytes.
///
/// Works in both `std` and `no_std` environments using `serde-json-core`.
///
/// # Example
///
/// ```rust
/// use smooth_axis::messages::parse_smooth_axis_request;
///
/// let json = br#"{"target_freq_xy": 45.0}"#;
/// let req = parse_smooth_axis_request(json).unwrap();
/// assert_eq!(req.target_freq_xy, Some(45.0));
/// ```
#[cfg(feature = "serde-json-core")]
pub fn parse_smooth_axis_request(json: &[u8]) -> Option<SetSmoothAxisRequest> {
    serde_json_core::from_slice(json).ok().map(|(req, _)| req)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full_request() {
        let json = r#"{
            "smoother": "accel",
            "target_freq_x": 40.0,
            "target_freq_y": 35.0,
            "damping_ratio_x": 0.1,
            "damping_ratio_y": 0.2
        }"#;
        let req: SetSmoothAxisRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.smoother.as_deref(), Some("accel"));
        assert_eq!(req.target_freq_x, Some(40.0));
        assert_eq!(req.target_freq_y, Some(35.0));
        assert_eq!(req.damping_ratio_x, Some(0.1));
        assert_eq!(req.damping_ratio_y, Some(0.2));
        assert_eq!(req.target_freq_xy, None);
    }

    #[test]
    fn deserialize_defaults_to_keep_current() {
        let req: SetSmoothAxisRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req, SetSmoothAxisRequest::default());
    }

    #[test]
    fn serialize_skips_absent_fields() {
        let req = SetSmoothAxisRequest {
            target_freq_xy: Some(45.0),
            ..Default::default()
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"target_freq_xy":45.0}"#);
    }

    #[test]
    fn converts_to_command() {
        let json = r#"{"smoother": "di", "target_freq_xy": 45.0, "damping_ratio_x": 0.15}"#;
        let req: SetSmoothAxisRequest = serde_json::from_str(json).unwrap();
        let cmd = SmoothAxisCommand::from(req);
        assert_eq!(cmd.smoother.as_deref(), Some("di"));
        assert_eq!(cmd.target_freq_xy, Some(45.0));
        assert_eq!(cmd.damping_ratio_x, Some(0.15));
        assert_eq!(cmd.damping_ratio_y, None);
    }

    #[test]
    fn round_trips_through_json() {
        let req = SetSmoothAxisRequest {
            smoother: Some(HeaplessString::try_from("position").unwrap()),
            target_freq_x: Some(40.0),
            damping_ratio_xy: Some(0.1),
            ..Default::default()
        };
        let json = serde_json::to_string(&req).unwrap();
        let back: SetSmoothAxisRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, req);
    }
}
