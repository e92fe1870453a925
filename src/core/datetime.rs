use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;

/*-------------------------------------------------------------------------------------------------
  DateTime Format
-------------------------------------------------------------------------------------------------*/

// RFC 3339 in UTC with a `Z` suffix. Fractions are written as 3, 6, or 9 digits; whole seconds
// have none.
pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let s = date.to_rfc3339_opts(SecondsFormat::AutoSi, true);
    serializer.serialize_str(&s)
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use serde::Serialize;

    #[derive(Serialize)]
    struct Stamp {
        #[serde(with = "crate::core::datetime")]
        at: DateTime<Utc>,
    }

    #[test]
    fn test_serialize_whole_seconds() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let json = serde_json::to_string(&Stamp { at }).unwrap();
        assert_eq!(json, r#"{"at":"2024-01-01T00:00:00Z"}"#);
    }

    #[test]
    fn test_serialize_fractional_seconds() {
        let at = Utc.timestamp_opt(1_704_067_200, 250_000_000).unwrap();
        let json = serde_json::to_string(&Stamp { at }).unwrap();
        assert_eq!(json, r#"{"at":"2024-01-01T00:00:00.250Z"}"#);

        let at = Utc.timestamp_opt(1_704_067_200, 1_500).unwrap();
        let json = serde_json::to_string(&Stamp { at }).unwrap();
        assert_eq!(json, r#"{"at":"2024-01-01T00:00:00.000001500Z"}"#);
    }
}
