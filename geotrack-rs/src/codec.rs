//! Newline-delimited JSON encoding of a track.
//!
//! One `{"latitude": <float>, "longitude": <float>}` object per line, lines joined
//! by `\n`, no trailing newline. The file as a whole is not a JSON document.

use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;

use common::types::{PositionFix, Track};

use crate::models::errors::TrackerError;

/// Compact JSON with a space after every `:` and `,` inside objects.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Encodes `track` as newline-delimited JSON records.
pub fn serialize(track: &Track) -> Result<Vec<u8>, TrackerError> {
    let mut bytes = Vec::with_capacity(track.len() * 48);
    for (i, fix) in track.iter().enumerate() {
        if !fix.latitude().is_finite() || !fix.longitude().is_finite() {
            return Err(TrackerError::Encode(format!(
                "Fix {} is not finite: {:?}",
                i, fix
            )));
        }
        if i > 0 {
            bytes.push(b'\n');
        }
        let mut serializer = serde_json::Serializer::with_formatter(&mut bytes, SpacedFormatter);
        fix.serialize(&mut serializer)
            .map_err(|e| TrackerError::Encode(e.to_string()))?;
    }
    Ok(bytes)
}

/// Decodes newline-delimited JSON records back into a track.
pub fn deserialize(bytes: &[u8]) -> Result<Track, TrackerError> {
    serde_json::Deserializer::from_slice(bytes)
        .into_iter::<PositionFix>()
        .map(|fix| fix.map_err(|e| TrackerError::Decode(e.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(points: &[(f64, f64)]) -> Track {
        points.iter().copied().map(PositionFix::from).collect()
    }

    #[test]
    fn test_serialize_two_fixes() {
        let bytes = serialize(&track(&[(52.52, 13.405), (52.53, 13.41)])).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "{\"latitude\": 52.52, \"longitude\": 13.405}\n{\"latitude\": 52.53, \"longitude\": 13.41}"
        );
    }

    #[test]
    fn test_serialize_empty_track() {
        assert!(serialize(&Track::new()).unwrap().is_empty());
    }

    #[test]
    fn test_serialize_whole_and_negative_degrees() {
        let bytes = serialize(&track(&[(-33.0, 151.2093)])).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "{\"latitude\": -33.0, \"longitude\": 151.2093}"
        );
    }

    #[test]
    fn test_serialize_has_no_trailing_newline() {
        let bytes = serialize(&track(&[(1.5, 2.5), (3.5, 4.5), (5.5, 6.5)])).unwrap();
        assert_eq!(bytes.iter().filter(|b| **b == b'\n').count(), 2);
        assert_ne!(bytes.last(), Some(&b'\n'));
    }

    #[test]
    fn test_serialize_rejects_non_finite_coordinates() {
        for point in [(f64::NAN, 13.405), (52.52, f64::INFINITY)] {
            let result = serialize(&track(&[(52.52, 13.405), point]));
            assert!(matches!(result, Err(TrackerError::Encode(_))));
        }
    }

    #[test]
    fn test_deserialize_saved_track() {
        let original = track(&[(51.44545, 7.26042), (51.44538, 7.26013), (51.44538, 7.26013)]);
        let bytes = serialize(&original).unwrap();
        assert_eq!(deserialize(&bytes).unwrap(), original);
    }

    #[test]
    fn test_deserialize_tolerates_trailing_newline_and_compact_objects() {
        let text = "{\"latitude\":1.0,\"longitude\":2.0}\n{\"latitude\": 3.0, \"longitude\": 4.0}\n";
        assert_eq!(
            deserialize(text.as_bytes()).unwrap(),
            track(&[(1.0, 2.0), (3.0, 4.0)])
        );
    }

    #[test]
    fn test_deserialize_rejects_missing_field() {
        let result = deserialize(b"{\"latitude\": 1.0}");
        assert!(matches!(result, Err(TrackerError::Decode(_))));
    }
}
