//! YAML encoding for [`StateRecord`]

use std::io::Write;

use super::record::StateRecord;

/// Outcome of decoding a save file
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// File parsed (missing keys already defaulted)
    Record(StateRecord),
    /// Nothing usable in the file, keep whatever state the caller has
    Defaulted,
}

impl Decoded {
    pub fn record(self) -> Option<StateRecord> {
        match self {
            Decoded::Record(record) => Some(record),
            Decoded::Defaulted => None,
        }
    }
}

/// Stateless encoder/decoder, built once and shared by every load/save
#[derive(Debug, Clone, Copy, Default)]
pub struct StateCodec;

impl StateCodec {
    pub const fn new() -> Self {
        Self
    }

    /// Encode to a YAML string
    pub fn encode(&self, record: &StateRecord) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(record)
    }

    /// Encode straight into a writer
    pub fn encode_to<W: Write>(
        &self,
        writer: W,
        record: &StateRecord,
    ) -> Result<(), serde_yaml::Error> {
        serde_yaml::to_writer(writer, record)
    }

    /// Decode YAML text. Malformed input is logged and becomes `Defaulted`.
    pub fn decode(&self, text: &str) -> Decoded {
        if text.trim().is_empty() {
            log::debug!("Save file is empty");
            return Decoded::Defaulted;
        }

        match serde_yaml::from_str::<StateRecord>(text) {
            Ok(record) => Decoded::Record(record),
            Err(e) => {
                log::warn!("Ignoring malformed save data: {}", e);
                Decoded::Defaulted
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};
    use proptest::prelude::*;

    #[test]
    fn test_encode_writes_every_key() {
        let record = StateRecord::new(Vec3::new(1.0, 2.0, 3.0), None, 1.5)
            .with_fly(true)
            .with_grid_radius(4)
            .with_time_factor_index(2);
        let yaml = StateCodec::new().encode(&record).unwrap();

        for key in [
            "posx:",
            "posy:",
            "posz:",
            "rotx:",
            "roty:",
            "rotz:",
            "rotw:",
            "time:",
            "fly: true",
            "gridRadius: 4",
            "timeFactorIndex: 2",
        ] {
            assert!(yaml.contains(key), "missing {key} in:\n{yaml}");
        }
    }

    #[test]
    fn test_decode_partial_uses_defaults() {
        let decoded = StateCodec::new().decode("time: 1.0\n");
        let record = decoded.record().expect("should decode");
        assert_eq!(record.time, 1.0);
        assert_eq!(record.position(), None);
        assert_eq!(record.rotation(), None);
        assert!(!record.fly);
        assert_eq!(record.grid_radius, 0);
        assert_eq!(record.time_factor_index, 0);
    }

    #[test]
    fn test_decode_ignores_unknown_keys() {
        let decoded = StateCodec::new().decode("fly: true\nweather: rain\nextra:\n  nested: 1\n");
        let record = decoded.record().expect("should decode");
        assert!(record.fly);
    }

    #[test]
    fn test_decode_integer_as_float() {
        let record = StateCodec::new().decode("posx: 3\ntime: 2\n").record().unwrap();
        assert_eq!(record.posx, Some(3.0));
        assert_eq!(record.time, 2.0);
    }

    #[test]
    fn test_decode_malformed_is_defaulted() {
        let codec = StateCodec::new();
        assert_eq!(codec.decode("posx: [1, 2\n"), Decoded::Defaulted);
        assert_eq!(codec.decode("fly: not-a-bool\n"), Decoded::Defaulted);
        assert_eq!(codec.decode("- just\n- a list\n"), Decoded::Defaulted);
    }

    #[test]
    fn test_decode_empty_is_defaulted() {
        let codec = StateCodec::new();
        assert_eq!(codec.decode(""), Decoded::Defaulted);
        assert_eq!(codec.decode("  \n\n"), Decoded::Defaulted);
    }

    #[test]
    fn test_encode_to_writer_matches_string() {
        let codec = StateCodec::new();
        let record = StateRecord::new(Vec3::X, Some(Quat::IDENTITY), 0.25);
        let mut buf = Vec::new();
        codec.encode_to(&mut buf, &record).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), codec.encode(&record).unwrap());
    }

    fn component() -> impl Strategy<Value = Option<f32>> {
        proptest::option::of(-1.0e6f32..1.0e6f32)
    }

    prop_compose! {
        fn arb_record()(
            pos in (component(), component(), component()),
            rot in (component(), component(), component(), component()),
            time in -1.0e6f32..1.0e6f32,
            fly in any::<bool>(),
            grid_radius in any::<i32>(),
            time_factor_index in any::<i32>(),
        ) -> StateRecord {
            StateRecord {
                posx: pos.0,
                posy: pos.1,
                posz: pos.2,
                rotx: rot.0,
                roty: rot.1,
                rotz: rot.2,
                rotw: rot.3,
                time,
                fly,
                grid_radius,
                time_factor_index,
            }
        }
    }

    proptest! {
        #[test]
        fn prop_decode_inverts_encode(record in arb_record()) {
            let codec = StateCodec::new();
            let yaml = codec.encode(&record).unwrap();
            prop_assert_eq!(codec.decode(&yaml), Decoded::Record(record));
        }
    }
}
