//! Column-by-column JSON encoding of Postgres rows.
//!
//! Values are rendered the way the dashboard clients have always received
//! them: 64-bit integers and numerics as strings, dates and timestamps as
//! UTC ISO-8601 with milliseconds, everything else as its natural JSON type.
//! Date and timestamp columns without a zone are read as UTC.

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use sqlx::postgres::PgRow;
use sqlx::{Column, Row, TypeInfo};

/// Encode a whole row as a JSON object in column order.
pub fn encode_row(row: &PgRow) -> Result<Value, sqlx::Error> {
    let mut object = Map::with_capacity(row.len());
    for column in row.columns() {
        let value = encode_column(row, column.ordinal(), column.type_info().name())?;
        object.insert(column.name().to_string(), value);
    }
    Ok(Value::Object(object))
}

fn encode_column(row: &PgRow, index: usize, type_name: &str) -> Result<Value, sqlx::Error> {
    let value = match type_name {
        "BOOL" => row.try_get::<Option<bool>, _>(index)?.map(Value::from),
        "INT2" => row.try_get::<Option<i16>, _>(index)?.map(Value::from),
        "INT4" => row.try_get::<Option<i32>, _>(index)?.map(Value::from),
        "INT8" => row.try_get::<Option<i64>, _>(index)?.map(bigint),
        "NUMERIC" => row
            .try_get::<Option<BigDecimal>, _>(index)?
            .map(|n| numeric(&n)),
        "FLOAT4" => row
            .try_get::<Option<f32>, _>(index)?
            .map(|n| Value::from(f64::from(n))),
        "FLOAT8" => row.try_get::<Option<f64>, _>(index)?.map(Value::from),
        "DATE" => row.try_get::<Option<NaiveDate>, _>(index)?.map(date),
        "TIMESTAMP" => row
            .try_get::<Option<NaiveDateTime>, _>(index)?
            .map(timestamp),
        "TIMESTAMPTZ" => row
            .try_get::<Option<DateTime<Utc>>, _>(index)?
            .map(timestamptz),
        "JSON" | "JSONB" => row.try_get::<Option<Value>, _>(index)?,
        _ => row.try_get::<Option<String>, _>(index)?.map(Value::String),
    };
    Ok(value.unwrap_or(Value::Null))
}

fn bigint(n: i64) -> Value {
    Value::String(n.to_string())
}

fn numeric(n: &BigDecimal) -> Value {
    Value::String(n.to_string())
}

fn date(d: NaiveDate) -> Value {
    timestamp(d.and_time(NaiveTime::default()))
}

fn timestamp(ts: NaiveDateTime) -> Value {
    timestamptz(ts.and_utc())
}

fn timestamptz(ts: DateTime<Utc>) -> Value {
    Value::String(ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}
