//! Serde helpers that map chrono datetimes onto BSON datetimes, so the
//! driver stores native dates we can range-query with `$lte`.

pub mod bson_datetime {
    use chrono::{DateTime, Utc};
    use mongodb::bson::DateTime as BsonDateTime;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        BsonDateTime::from_millis(date.timestamp_millis()).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        BsonDateTime::deserialize(deserializer).map(|bson_dt| {
            DateTime::from_timestamp_millis(bson_dt.timestamp_millis()).unwrap_or_default()
        })
    }
}

pub mod bson_datetime_option {
    use chrono::{DateTime, Utc};
    use mongodb::bson::DateTime as BsonDateTime;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(date: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        date.map(|d| BsonDateTime::from_millis(d.timestamp_millis()))
            .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<BsonDateTime>::deserialize(deserializer).map(|opt| {
            opt.map(|bson_dt| {
                DateTime::from_timestamp_millis(bson_dt.timestamp_millis()).unwrap_or_default()
            })
        })
    }
}
