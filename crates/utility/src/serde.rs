pub mod date_time {
    use chrono::{DateTime, Local, NaiveDateTime, TimeZone as _, Utc};
    use serde::{
        de::{Error, IntoDeserializer},
        Deserialize as _, Deserializer,
    };

    /// Formats produced by `<input type="datetime-local">`, without offset.
    const LOCAL_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

    pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
        if let Ok(date_time) = DateTime::parse_from_rfc3339(s) {
            return Some(date_time.with_timezone(&Utc));
        }
        LOCAL_FORMATS.iter().find_map(|format| {
            let naive = NaiveDateTime::parse_from_str(s, format).ok()?;
            Local
                .from_local_datetime(&naive)
                .single()
                .map(|local| local.with_timezone(&Utc))
        })
    }

    /// Accepts RFC 3339 timestamps as well as offset-less browser form values,
    /// which are interpreted in the local time zone.
    pub fn deserialize_instant<'de, D>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_instant(&s)
            .ok_or_else(|| Error::custom(format!("invalid date time: {}", s)))
    }

    /// Like `deserialize_instant`, but `null` and empty strings map to `None`.
    pub fn deserialize_instant_option<'de, D>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        match s {
            Some(s) if !s.trim().is_empty() => {
                let instant = deserialize_instant(s.as_str().into_deserializer())?;
                Ok(Some(instant))
            }
            _ => Ok(None),
        }
    }
}

pub mod date {
    use chrono::NaiveDate;
    use serde::{de::Error, Deserialize as _, Deserializer};

    /// `YYYY-MM-DD`, also accepting a full timestamp of which only the date is
    /// kept.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let date_part = s.split('T').next().unwrap_or_default();
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            .map_err(|_| Error::custom(format!("invalid date: {}", s)))
    }

    pub fn deserialize_option<'de, D>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        match s {
            Some(s) if !s.trim().is_empty() => {
                let date_part = s.split('T').next().unwrap_or_default();
                NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
                    .map(Some)
                    .map_err(|_| Error::custom(format!("invalid date: {}", s)))
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Refill {
        #[serde(deserialize_with = "super::date_time::deserialize_instant")]
        at: DateTime<Utc>,
        #[serde(
            deserialize_with = "super::date_time::deserialize_instant_option",
            default
        )]
        until: Option<DateTime<Utc>>,
        #[serde(deserialize_with = "super::date::deserialize")]
        on: NaiveDate,
    }

    #[test]
    fn parses_rfc3339() {
        let refill: Refill = serde_json::from_str(
            r#"{"at": "2024-03-01T10:15:00.000Z", "on": "2024-03-01"}"#,
        )
        .unwrap();
        assert_eq!(
            refill.at,
            Utc.with_ymd_and_hms(2024, 3, 1, 10, 15, 0).unwrap()
        );
        assert_eq!(refill.until, None);
        assert_eq!(refill.on, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn parses_browser_form_values() {
        let refill: Refill = serde_json::from_str(
            r#"{"at": "2024-03-01T10:15", "until": "", "on": "2024-03-01T10:15"}"#,
        )
        .unwrap();
        assert!(super::date_time::parse_instant("2024-03-01T10:15").is_some());
        assert_eq!(refill.until, None);
        assert_eq!(refill.on, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        let result = serde_json::from_str::<Refill>(
            r#"{"at": "yesterday", "on": "2024-03-01"}"#,
        );
        assert!(result.is_err());
        let result = serde_json::from_str::<Refill>(
            r#"{"at": "2024-03-01T10:15:00Z", "on": "03/01/2024"}"#,
        );
        assert!(result.is_err());
    }
}
