//! Compact property encoding of one animation group:
//!
//! `name;ticksStart;ticksEnd;handle1;handle2;...`
//!
//! A group without members still carries the fourth field, empty.
//! Names are validated on encode only, so legacy values keep loading.

use std::fmt::Write as _;

use crate::error::{AnimGroupError, Result};
use crate::ids::NodeHandle;

pub const SEPARATOR: char = ';';

/// Characters the host refuses in property values, plus our separator.
const FORBIDDEN_NAME_CHARS: [char; 3] = [' ', '=', SEPARATOR];

/// Fields of a decoded group value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedValue {
    pub name: String,
    pub ticks_start: i32,
    pub ticks_end: i32,
    pub members: Vec<NodeHandle>,
}

pub fn validate_name(name: &str) -> Result<()> {
    if name.contains(&FORBIDDEN_NAME_CHARS[..]) {
        return Err(AnimGroupError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Join the fields without validating `name`.
pub fn encode_value(name: &str, ticks_start: i32, ticks_end: i32, members: &[NodeHandle]) -> String {
    let mut out = String::with_capacity(name.len() + 24 + members.len() * 6);
    let _ = write!(out, "{name}{SEPARATOR}{ticks_start}{SEPARATOR}{ticks_end}{SEPARATOR}");
    for (i, handle) in members.iter().enumerate() {
        if i > 0 {
            out.push(SEPARATOR);
        }
        let _ = write!(out, "{}", handle.0);
    }
    out
}

pub fn decode_value(value: &str) -> Result<DecodedValue> {
    let fields: Vec<&str> = value.split(SEPARATOR).collect();
    if fields.len() < 4 {
        return Err(AnimGroupError::FieldCount {
            found: fields.len(),
        });
    }

    let name = fields[0].to_string();
    let ticks_start = parse_tick("ticksStart", fields[1])?;
    let ticks_end = parse_tick("ticksEnd", fields[2])?;

    // An empty first member field means "no members", whatever follows it.
    if fields[3].is_empty() {
        return Ok(DecodedValue {
            name,
            ticks_start,
            ticks_end,
            members: Vec::new(),
        });
    }

    let mut members = Vec::with_capacity(fields.len() - 3);
    let mut failed = 0usize;
    for raw in &fields[3..] {
        match raw.trim().parse::<u32>() {
            Ok(h) => members.push(NodeHandle(h)),
            Err(_) => failed += 1,
        }
    }
    if failed > 0 {
        return Err(AnimGroupError::MemberHandles { failed });
    }

    Ok(DecodedValue {
        name,
        ticks_start,
        ticks_end,
        members,
    })
}

fn parse_tick(field: &'static str, raw: &str) -> Result<i32> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| AnimGroupError::InvalidTick {
            field,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn encodes_members_in_order() {
        let s = encode_value("Walk", 0, 4800, &[NodeHandle(3), NodeHandle(1), NodeHandle(3)]);
        assert_eq!(s, "Walk;0;4800;3;1;3");
    }

    #[test]
    fn empty_member_list_keeps_trailing_field() {
        assert_eq!(encode_value("Idle", -160, 320, &[]), "Idle;-160;320;");
        let d = decode_value("Idle;-160;320;").unwrap();
        assert_eq!(d.ticks_start, -160);
        assert!(d.members.is_empty());
    }

    #[test]
    fn too_few_fields_is_a_format_error() {
        for bad in ["", "Walk", "Walk;0", "Walk;0;100"] {
            let err = decode_value(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Format, "input {bad:?}");
        }
    }

    #[test]
    fn bad_tick_is_a_parse_error() {
        let err = decode_value("Walk;zero;100;").unwrap_err();
        assert!(matches!(
            err,
            AnimGroupError::InvalidTick { field: "ticksStart", ref value } if value == "zero"
        ));
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn single_bad_member_reports_one_failure() {
        let err = decode_value("Walk;0;100;1;x;3").unwrap_err();
        assert!(matches!(err, AnimGroupError::MemberHandles { failed: 1 }));
    }

    #[test]
    fn member_failures_are_counted_not_short_circuited() {
        let err = decode_value("Walk;0;100;a;2;-1;4;c").unwrap_err();
        assert!(matches!(err, AnimGroupError::MemberHandles { failed: 3 }));
        assert_eq!(err.to_string(), "failed to parse 3 node handle(s)");
    }

    #[test]
    fn empty_first_member_field_ignores_the_rest() {
        let d = decode_value("Walk;0;100;;7").unwrap();
        assert!(d.members.is_empty());
    }

    #[test]
    fn decode_keeps_legacy_names_verbatim() {
        let d = decode_value("Old Name=1;0;100;5").unwrap();
        assert_eq!(d.name, "Old Name=1");
        assert_eq!(d.members, vec![NodeHandle(5)]);
    }

    #[test]
    fn name_validation_rejects_reserved_characters() {
        assert!(validate_name("Run_Cycle").is_ok());
        for bad in ["Run Cycle", "a=b", "a;b"] {
            assert_eq!(validate_name(bad).unwrap_err().kind(), ErrorKind::Format);
        }
    }
}
