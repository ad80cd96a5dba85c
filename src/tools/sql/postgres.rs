use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sqlx::{
    postgres::{
        types::{Oid, PgInterval, PgMoney},
        PgPool, PgPoolOptions, PgRow, PgTypeKind, PgValueFormat,
    },
    Column, Decode, Postgres, Row, Type, TypeInfo, ValueRef,
};

use super::{Engine, QueryResult, SQLDatabaseError, SqlValue};

pub const DEFAULT_SCHEMA: &str = "public";

/// Fractional digits of `money` under the usual `lc_monetary` locales.
const MONEY_FRAC_DIGITS: u32 = 2;

/// [`Engine`] backed by a sqlx PostgreSQL pool.
#[derive(Clone)]
pub struct PostgreSQLEngine {
    pool: PgPool,
    schema: String,
}

impl PostgreSQLEngine {
    pub async fn new(uri: &str) -> Result<Self, SQLDatabaseError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(10))
            .connect(uri)
            .await?;

        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            pool,
            schema: DEFAULT_SCHEMA.into(),
        }
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn qualified(&self, table: &str) -> String {
        format!("{}.{}", quote_ident(&self.schema), quote_ident(table))
    }

    async fn columns(&self, table: &str) -> Result<Vec<ColumnInfo>, SQLDatabaseError> {
        let rows: Vec<(String, String, String, Option<i32>, String, Option<String>)> =
            sqlx::query_as(
                r#"
                SELECT
                    column_name::text,
                    data_type::text,
                    udt_name::text,
                    character_maximum_length::int4,
                    is_nullable::text,
                    column_default::text
                FROM information_schema.columns
                WHERE table_schema = $1 AND table_name = $2
                ORDER BY ordinal_position
                "#,
            )
            .bind(&self.schema)
            .bind(table)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(
                |(name, data_type, udt_name, char_max_length, is_nullable, default)| ColumnInfo {
                    name,
                    data_type,
                    udt_name,
                    char_max_length,
                    nullable: is_nullable == "YES",
                    default,
                },
            )
            .collect())
    }

    async fn primary_key(&self, table: &str) -> Result<Vec<String>, SQLDatabaseError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT a.attname::text
            FROM pg_index i
            JOIN pg_attribute a ON a.attrelid = i.indrelid AND a.attnum = ANY(i.indkey)
            JOIN pg_class c ON c.oid = i.indrelid
            JOIN pg_namespace n ON n.oid = c.relnamespace
            WHERE i.indisprimary
              AND n.nspname = $1
              AND c.relname = $2
            ORDER BY array_position(i.indkey, a.attnum)
            "#,
        )
        .bind(&self.schema)
        .bind(table)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    async fn enum_types(&self, names: Vec<String>) -> Result<Vec<EnumType>, SQLDatabaseError> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<(String, Vec<String>)> = sqlx::query_as(
            r#"
            SELECT t.typname::text, array_agg(e.enumlabel::text ORDER BY e.enumsortorder)
            FROM pg_type t
            JOIN pg_enum e ON e.enumtypid = t.oid
            WHERE t.typname = ANY($1)
            GROUP BY t.typname
            ORDER BY t.typname
            "#,
        )
        .bind(names)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(name, labels)| EnumType { name, labels })
            .collect())
    }
}

#[async_trait]
impl Engine for PostgreSQLEngine {
    fn dialect(&self) -> &str {
        "postgresql"
    }

    async fn table_names(&self) -> Result<Vec<String>, SQLDatabaseError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT table_name::text
            FROM information_schema.tables
            WHERE table_schema = $1 AND table_type = 'BASE TABLE'
            ORDER BY table_name
            "#,
        )
        .bind(&self.schema)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    async fn table_info(&self, table: &str) -> Result<String, SQLDatabaseError> {
        let columns = self.columns(table).await?;
        let primary_key = self.primary_key(table).await?;

        let mut candidates = columns
            .iter()
            .filter_map(ColumnInfo::user_type)
            .map(str::to_string)
            .collect::<Vec<_>>();
        candidates.sort();
        candidates.dedup();
        let enums = self.enum_types(candidates).await?;

        Ok(render_create_table(table, &columns, &primary_key, &enums))
    }

    async fn sample_rows(
        &self,
        table: &str,
        limit: usize,
    ) -> Result<QueryResult, SQLDatabaseError> {
        let query = format!("SELECT * FROM {} LIMIT {limit}", self.qualified(table));
        self.execute(&query).await
    }

    async fn execute(&self, query: &str) -> Result<QueryResult, SQLDatabaseError> {
        log::debug!("Executing SQL: {query}");
        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        let columns = rows
            .first()
            .map(|row| {
                row.columns()
                    .iter()
                    .map(|c| c.name().to_string())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let rows = rows
            .iter()
            .map(decode_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(QueryResult::new(columns, rows))
    }

    async fn close(&self) {
        self.pool.close().await
    }
}

/// One row of `information_schema.columns`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
    pub udt_name: String,
    pub char_max_length: Option<i32>,
    pub nullable: bool,
    pub default: Option<String>,
}

impl ColumnInfo {
    fn is_serial(&self) -> bool {
        self.default
            .as_deref()
            .is_some_and(|d| d.starts_with("nextval("))
    }

    pub fn type_name(&self) -> String {
        match self.data_type.as_str() {
            "ARRAY" => format!("{}[]", self.udt_name.trim_start_matches('_')),
            "USER-DEFINED" => self.udt_name.clone(),
            "integer" if self.is_serial() => "SERIAL".into(),
            "bigint" if self.is_serial() => "BIGSERIAL".into(),
            data_type => {
                let upper = data_type.to_uppercase();
                match self.char_max_length {
                    Some(len) => format!("{upper}({len})"),
                    None => upper,
                }
            }
        }
    }

    /// Name of the user-defined type this column uses, if any.
    fn user_type(&self) -> Option<&str> {
        match self.data_type.as_str() {
            "ARRAY" => Some(self.udt_name.trim_start_matches('_')),
            "USER-DEFINED" => Some(&self.udt_name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    pub name: String,
    pub labels: Vec<String>,
}

pub fn render_create_table(
    table: &str,
    columns: &[ColumnInfo],
    primary_key: &[String],
    enums: &[EnumType],
) -> String {
    let mut statements = enums
        .iter()
        .map(|e| {
            let labels = e
                .labels
                .iter()
                .map(|l| format!("'{}'", l.replace('\'', "''")))
                .collect::<Vec<_>>()
                .join(", ");
            format!("CREATE TYPE {} AS ENUM ({labels})", e.name)
        })
        .collect::<Vec<_>>();

    let mut lines = columns
        .iter()
        .map(|c| {
            let mut line = format!("\t{} {}", c.name, c.type_name());
            if !c.nullable {
                line.push_str(" NOT NULL");
            }
            match &c.default {
                Some(default) if !c.is_serial() => line.push_str(&format!(" DEFAULT {default}")),
                _ => {}
            }
            line
        })
        .collect::<Vec<_>>();

    if !primary_key.is_empty() {
        lines.push(format!("\tPRIMARY KEY ({})", primary_key.join(", ")));
    }

    statements.push(format!("CREATE TABLE {table} (\n{}\n)", lines.join(", \n")));
    statements.join("\n\n")
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn decode_row(row: &PgRow) -> Result<Vec<SqlValue>, SQLDatabaseError> {
    (0..row.columns().len())
        .map(|index| decode_column(row, index))
        .collect()
}

fn get<'r, T>(row: &'r PgRow, index: usize) -> Result<Option<T>, sqlx::Error>
where
    T: Decode<'r, Postgres> + Type<Postgres>,
{
    row.try_get::<Option<T>, _>(index)
}

fn get_array<'r, T>(
    row: &'r PgRow,
    index: usize,
    f: impl Fn(T) -> SqlValue,
) -> Result<Option<SqlValue>, sqlx::Error>
where
    Vec<Option<T>>: Decode<'r, Postgres> + Type<Postgres>,
{
    Ok(get::<Vec<Option<T>>>(row, index)?.map(|items| {
        SqlValue::Array(
            items
                .into_iter()
                .map(|item| item.map_or(SqlValue::Null, &f))
                .collect(),
        )
    }))
}

fn decode_column(row: &PgRow, index: usize) -> Result<SqlValue, SQLDatabaseError> {
    let type_info = row.columns()[index].type_info();

    let value = match type_info.name() {
        "BOOL" => get::<bool>(row, index)?.map(SqlValue::Bool),
        "INT2" => get::<i16>(row, index)?.map(|v| SqlValue::Int(v.into())),
        "INT4" => get::<i32>(row, index)?.map(|v| SqlValue::Int(v.into())),
        "INT8" => get::<i64>(row, index)?.map(SqlValue::Int),
        "OID" => get::<Oid>(row, index)?.map(|v| SqlValue::Int(v.0.into())),
        "FLOAT4" => get::<f32>(row, index)?.map(|v| SqlValue::Float(widen_f32(v))),
        "FLOAT8" => get::<f64>(row, index)?.map(SqlValue::Float),
        "NUMERIC" => get::<Decimal>(row, index)?.map(SqlValue::Decimal),
        "MONEY" => get::<PgMoney>(row, index)?
            .map(|v| SqlValue::Decimal(v.to_decimal(MONEY_FRAC_DIGITS))),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => get::<String>(row, index)?.map(SqlValue::Text),
        "BYTEA" => get::<Vec<u8>>(row, index)?.map(|v| SqlValue::Text(format_bytea(&v))),
        "UUID" => get::<uuid::Uuid>(row, index)?.map(|v| SqlValue::Text(v.to_string())),
        "JSON" | "JSONB" => get::<serde_json::Value>(row, index)?.map(SqlValue::Json),
        "TIMESTAMPTZ" => get::<DateTime<Utc>>(row, index)?.map(|v| SqlValue::Text(v.to_string())),
        "TIMESTAMP" => get::<NaiveDateTime>(row, index)?.map(|v| SqlValue::Text(v.to_string())),
        "DATE" => get::<NaiveDate>(row, index)?.map(|v| SqlValue::Text(v.to_string())),
        "TIME" => get::<NaiveTime>(row, index)?.map(|v| SqlValue::Text(v.to_string())),
        "INTERVAL" => get::<PgInterval>(row, index)?.map(|v| SqlValue::Text(format_interval(&v))),
        "BOOL[]" => get_array::<bool>(row, index, SqlValue::Bool)?,
        "INT2[]" => get_array::<i16>(row, index, |v| SqlValue::Int(v.into()))?,
        "INT4[]" => get_array::<i32>(row, index, |v| SqlValue::Int(v.into()))?,
        "INT8[]" => get_array::<i64>(row, index, SqlValue::Int)?,
        "FLOAT4[]" => get_array::<f32>(row, index, |v| SqlValue::Float(widen_f32(v)))?,
        "FLOAT8[]" => get_array::<f64>(row, index, SqlValue::Float)?,
        "NUMERIC[]" => get_array::<Decimal>(row, index, SqlValue::Decimal)?,
        "TEXT[]" | "VARCHAR[]" | "BPCHAR[]" | "NAME[]" => {
            get_array::<String>(row, index, SqlValue::Text)?
        }
        "UUID[]" => get_array::<uuid::Uuid>(row, index, |v| SqlValue::Text(v.to_string()))?,
        "JSON[]" | "JSONB[]" => get_array::<serde_json::Value>(row, index, SqlValue::Json)?,
        "TIMESTAMPTZ[]" => {
            get_array::<DateTime<Utc>>(row, index, |v| SqlValue::Text(v.to_string()))?
        }
        "TIMESTAMP[]" => get_array::<NaiveDateTime>(row, index, |v| SqlValue::Text(v.to_string()))?,
        "DATE[]" => get_array::<NaiveDate>(row, index, |v| SqlValue::Text(v.to_string()))?,
        "TIME[]" => get_array::<NaiveTime>(row, index, |v| SqlValue::Text(v.to_string()))?,
        "INTERVAL[]" => {
            get_array::<PgInterval>(row, index, |v| SqlValue::Text(format_interval(&v)))?
        }
        name => match type_info.kind() {
            // The binary form of an enum is its label.
            PgTypeKind::Enum(_) => row
                .try_get_unchecked::<Option<String>, _>(index)
                .map_err(|e| decode_error(row, index, e.to_string()))?
                .map(SqlValue::Text),
            PgTypeKind::Array(element) if matches!(element.kind(), PgTypeKind::Enum(_)) => {
                decode_text_array(row, index).map_err(|reason| decode_error(row, index, reason))?
            }
            _ => {
                let raw = row.try_get_raw(index)?;
                if raw.is_null() {
                    None
                } else {
                    log::debug!("No decoder for column type {name}");
                    Some(SqlValue::Text(format!("<{name} value>")))
                }
            }
        },
    };

    Ok(value.unwrap_or(SqlValue::Null))
}

/// Goes through the shortest decimal form so `0.1::real` stays `0.1`.
fn widen_f32(value: f32) -> f64 {
    value
        .to_string()
        .parse()
        .unwrap_or_else(|_| f64::from(value))
}

/// PostgreSQL's hex output format, e.g. `\xdeadbeef`.
fn format_bytea(bytes: &[u8]) -> String {
    bytes
        .iter()
        .fold(String::from("\\x"), |mut out, byte| {
            out.push_str(&format!("{byte:02x}"));
            out
        })
}

/// Renders an interval the way PostgreSQL prints it by default, e.g.
/// `1 year 2 mons 3 days 04:05:06.5`.
fn format_interval(interval: &PgInterval) -> String {
    let mut parts = Vec::new();

    let (years, months) = (interval.months / 12, interval.months % 12);
    for (value, unit) in [(years, "year"), (months, "mon"), (interval.days, "day")] {
        if value != 0 {
            let plural = if value.abs() == 1 { "" } else { "s" };
            parts.push(format!("{value} {unit}{plural}"));
        }
    }

    let micros = interval.microseconds;
    if micros != 0 || parts.is_empty() {
        let sign = if micros < 0 { "-" } else { "" };
        let micros = micros.unsigned_abs();
        let (secs, frac) = (micros / 1_000_000, micros % 1_000_000);
        let mut time = format!(
            "{sign}{:02}:{:02}:{:02}",
            secs / 3600,
            secs % 3600 / 60,
            secs % 60
        );
        if frac != 0 {
            let frac = format!("{frac:06}");
            time.push('.');
            time.push_str(frac.trim_end_matches('0'));
        }
        parts.push(time);
    }

    parts.join(" ")
}

fn decode_error(row: &PgRow, index: usize, reason: String) -> SQLDatabaseError {
    let column = &row.columns()[index];
    SQLDatabaseError::Decode {
        column: column.name().to_string(),
        type_name: column.type_info().name().to_string(),
        reason,
    }
}

fn decode_text_array(row: &PgRow, index: usize) -> Result<Option<SqlValue>, String> {
    let raw = row.try_get_raw(index).map_err(|e| e.to_string())?;
    if raw.is_null() {
        return Ok(None);
    }
    if matches!(raw.format(), PgValueFormat::Text) {
        return Ok(Some(SqlValue::Text(
            raw.as_str().map_err(|e| e.to_string())?.to_string(),
        )));
    }

    let bytes = raw.as_bytes().map_err(|e| e.to_string())?;
    let items = parse_binary_text_array(bytes)?
        .into_iter()
        .map(|item| item.map_or(SqlValue::Null, SqlValue::Text))
        .collect();

    Ok(Some(SqlValue::Array(items)))
}

fn take<'a>(buf: &mut &'a [u8], len: usize) -> Result<&'a [u8], String> {
    if buf.len() < len {
        return Err(format!(
            "array value truncated: wanted {len} bytes, {} left",
            buf.len()
        ));
    }
    let (head, tail) = buf.split_at(len);
    *buf = tail;
    Ok(head)
}

fn read_i32(buf: &mut &[u8]) -> Result<i32, String> {
    let bytes = take(buf, 4)?;
    Ok(i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Decodes the binary wire format of a PostgreSQL array whose elements are
/// sent as UTF-8 text (enums, citext and similar). Multi-dimensional arrays
/// are flattened.
pub fn parse_binary_text_array(mut buf: &[u8]) -> Result<Vec<Option<String>>, String> {
    let ndim = read_i32(&mut buf)?;
    let _has_nulls = read_i32(&mut buf)?;
    let _element_oid = read_i32(&mut buf)?;

    if ndim == 0 {
        return Ok(Vec::new());
    }

    let mut count = 1usize;
    for _ in 0..ndim {
        let len = read_i32(&mut buf)?;
        let _lower_bound = read_i32(&mut buf)?;
        let len = usize::try_from(len).map_err(|_| format!("negative dimension {len}"))?;
        count = count.saturating_mul(len);
    }

    let mut items = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        let len = read_i32(&mut buf)?;
        if len < 0 {
            items.push(None);
            continue;
        }
        let bytes = take(&mut buf, len as usize)?;
        let text = std::str::from_utf8(bytes).map_err(|e| e.to_string())?;
        items.push(Some(text.to_string()));
    }

    Ok(items)
}
