//! Serde support for tracks and clips
//!
//! Deserialization goes through the validating constructors, so a persisted
//! clip is checked exactly like a hand-built one. Clips serialize their tracks
//! as a list because JSON object keys must be strings.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tesserax_core::{Property, TargetId};

use crate::clip::{Clip, TrackKey};
use crate::keyframe::{Keyframe, KeyframeTrack};

#[derive(Serialize)]
struct TrackRef<'a> {
    keyframes: &'a [Keyframe],
}

#[derive(Deserialize)]
struct TrackData {
    keyframes: Vec<Keyframe>,
}

impl Serialize for KeyframeTrack {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TrackRef {
            keyframes: self.keyframes(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for KeyframeTrack {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let data = TrackData::deserialize(deserializer)?;
        KeyframeTrack::new(data.keyframes).map_err(D::Error::custom)
    }
}

#[derive(Serialize)]
struct TrackEntryRef<'a> {
    target: TargetId,
    property: Property,
    keyframes: &'a [Keyframe],
}

#[derive(Serialize)]
struct ClipRef<'a> {
    name: &'a str,
    duration: f64,
    tracks: Vec<TrackEntryRef<'a>>,
}

#[derive(Deserialize)]
struct TrackEntry {
    target: TargetId,
    property: Property,
    keyframes: Vec<Keyframe>,
}

#[derive(Deserialize)]
struct ClipData {
    #[serde(default)]
    name: String,
    duration: f64,
    #[serde(default)]
    tracks: Vec<TrackEntry>,
}

impl Serialize for Clip {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let tracks = self
            .tracks()
            .iter()
            .map(|(key, track)| TrackEntryRef {
                target: key.target,
                property: key.property,
                keyframes: track.keyframes(),
            })
            .collect();
        ClipRef {
            name: self.name(),
            duration: self.duration(),
            tracks,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Clip {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let data = ClipData::deserialize(deserializer)?;
        let tracks = data
            .tracks
            .into_iter()
            .map(|entry| {
                let track = KeyframeTrack::new(entry.keyframes)?;
                Ok((TrackKey::new(entry.target, entry.property), track))
            })
            .collect::<crate::Result<Vec<_>>>()
            .map_err(D::Error::custom)?;
        Clip::new(data.name, data.duration, tracks).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::timeline::sequential;
    use pretty_assertions::assert_eq;
    use tesserax_core::{Color, Vec2};

    #[test]
    fn clip_survives_json() {
        let dot = TargetId(4);
        let slide = Clip::tween(dot, Property::Position, Vec2::ZERO, Vec2::new(3.0, 1.0), 1.0, Easing::EaseOut)
            .unwrap();
        let tint = Clip::tween(dot, Property::Fill, Color::RED, Color::BLUE, 0.5, Easing::Linear).unwrap();
        let clip = sequential(&slide, &tint).unwrap();

        let json = serde_json::to_string(&clip).unwrap();
        let restored: Clip = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, clip);
    }

    #[test]
    fn invalid_track_is_rejected_on_load() {
        let json = r#"{
            "name": "broken",
            "duration": 1.0,
            "tracks": [{
                "target": 1,
                "property": "opacity",
                "keyframes": [
                    {"time": 0.5, "value": {"scalar": 0.0}, "interpolation": "linear"},
                    {"time": 0.5, "value": {"scalar": 1.0}, "interpolation": "linear"}
                ]
            }]
        }"#;
        let err = serde_json::from_str::<Clip>(json).unwrap_err();
        assert!(err.to_string().contains("duplicate keyframe timestamp"), "{err}");
    }

    #[test]
    fn track_past_duration_is_rejected_on_load() {
        let json = r#"{
            "duration": 0.25,
            "tracks": [{
                "target": 1,
                "property": "scale",
                "keyframes": [{"time": 0.5, "value": {"scalar": 2.0}, "interpolation": "step"}]
            }]
        }"#;
        assert!(serde_json::from_str::<Clip>(json).is_err());
    }

    #[test]
    fn eased_interpolation_encoding() {
        let json = serde_json::to_string(&crate::Interpolation::Eased(Easing::EaseInOut)).unwrap();
        assert_eq!(json, r#"{"eased":"ease_in_out"}"#);
    }
}
