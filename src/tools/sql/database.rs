use std::collections::BTreeSet;

use url::Url;

use super::{render_rows, Engine, PostgreSQLEngine, SQLDatabaseError};

const SAMPLE_VALUE_MAX_CHARS: usize = 100;

/// Wraps an [`Engine`] and restricts it to a set of usable tables.
pub struct SQLDatabase {
    engine: Box<dyn Engine>,
    usable_tables: BTreeSet<String>,
    sample_rows_in_table_info: usize,
    max_string_length: usize,
}

impl SQLDatabase {
    pub fn builder(engine: impl Engine + 'static) -> SQLDatabaseBuilder {
        SQLDatabaseBuilder::new(engine)
    }

    /// Connects to the database at `uri`, limited to `include_tables` when
    /// it is non-empty.
    pub async fn from_uri(uri: &str, include_tables: &[String]) -> Result<Self, SQLDatabaseError> {
        Self::builder_from_uri(uri)
            .await?
            .include_tables(include_tables.iter().cloned())
            .build()
            .await
    }

    /// Connects to the database at `uri` and returns a builder for further
    /// configuration.
    pub async fn builder_from_uri(uri: &str) -> Result<SQLDatabaseBuilder, SQLDatabaseError> {
        let url = normalize_uri(uri)?;

        log::debug!(
            "Connecting to PostgreSQL at {}{}",
            url.host_str().unwrap_or("localhost"),
            url.path()
        );
        let engine = PostgreSQLEngine::new(url.as_str()).await?;

        Ok(SQLDatabaseBuilder::new(engine))
    }

    pub fn dialect(&self) -> &str {
        self.engine.dialect()
    }

    /// Names of the tables the database is allowed to use, sorted.
    pub fn usable_table_names(&self) -> Vec<&str> {
        self.usable_tables.iter().map(String::as_str).collect()
    }

    /// Describes `tables` (all usable tables when empty): each table's DDL
    /// followed by a few sample rows in a comment block.
    pub async fn table_info(&self, tables: &[String]) -> Result<String, SQLDatabaseError> {
        let tables: Vec<&str> = if tables.is_empty() {
            self.usable_table_names()
        } else {
            let missing = tables
                .iter()
                .filter(|t| !self.usable_tables.contains(*t))
                .cloned()
                .collect::<Vec<_>>();
            if !missing.is_empty() {
                return Err(SQLDatabaseError::TablesNotFound(missing));
            }
            tables.iter().map(String::as_str).collect()
        };

        let mut infos = Vec::with_capacity(tables.len());
        for table in tables {
            let mut info = self.engine.table_info(table).await?.trim_end().to_string();
            if self.sample_rows_in_table_info > 0 {
                info.push_str("\n\n/*\n");
                info.push_str(&self.sample_rows(table).await);
                info.push_str("\n*/");
            }
            infos.push(info);
        }

        Ok(infos.join("\n\n"))
    }

    async fn sample_rows(&self, table: &str) -> String {
        let header = format!(
            "{} rows from {table} table:",
            self.sample_rows_in_table_info
        );

        let result = match self
            .engine
            .sample_rows(table, self.sample_rows_in_table_info)
            .await
        {
            Ok(result) => result,
            Err(e) => {
                log::warn!("Could not fetch sample rows from {table}: {e}");
                return format!("{header}\n");
            }
        };

        let rows = result
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|v| {
                        v.to_string()
                            .chars()
                            .take(SAMPLE_VALUE_MAX_CHARS)
                            .collect::<String>()
                    })
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!("{header}\n{}\n{rows}", result.columns.join("\t"))
    }

    /// Runs `sql` and renders the rows as a list of tuples, with long text
    /// values shortened. Returns an empty string when no rows come back.
    pub async fn query(&self, sql: &str) -> Result<String, SQLDatabaseError> {
        let result = self.engine.execute(sql).await?;

        let rows = result
            .rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|v| v.truncated(self.max_string_length))
                    .collect()
            })
            .collect::<Vec<_>>();

        Ok(render_rows(&rows))
    }

    pub async fn close(&self) {
        self.engine.close().await
    }
}

/// Checks that `uri` points at PostgreSQL and drops any SQLAlchemy style
/// driver suffix, e.g. `postgresql+psycopg2://` becomes `postgresql://`.
fn normalize_uri(uri: &str) -> Result<Url, SQLDatabaseError> {
    let mut url = Url::parse(uri)?;

    let scheme = url.scheme().to_string();
    match scheme.as_str() {
        "postgres" | "postgresql" => {}
        s if s.starts_with("postgresql+") => {
            url.set_scheme("postgresql")
                .map_err(|_| SQLDatabaseError::UnsupportedUri(scheme.clone()))?;
        }
        _ => return Err(SQLDatabaseError::UnsupportedUri(scheme)),
    }

    Ok(url)
}

pub struct SQLDatabaseBuilder {
    engine: Box<dyn Engine>,
    include_tables: BTreeSet<String>,
    ignore_tables: BTreeSet<String>,
    sample_rows_in_table_info: usize,
    max_string_length: usize,
}

impl SQLDatabaseBuilder {
    pub fn new(engine: impl Engine + 'static) -> Self {
        Self {
            engine: Box::new(engine),
            include_tables: BTreeSet::new(),
            ignore_tables: BTreeSet::new(),
            sample_rows_in_table_info: 3,
            max_string_length: 300,
        }
    }

    pub fn include_tables<S: Into<String>>(
        mut self,
        tables: impl IntoIterator<Item = S>,
    ) -> Self {
        self.include_tables.extend(tables.into_iter().map(Into::into));
        self
    }

    pub fn ignore_tables<S: Into<String>>(
        mut self,
        tables: impl IntoIterator<Item = S>,
    ) -> Self {
        self.ignore_tables.extend(tables.into_iter().map(Into::into));
        self
    }

    pub fn sample_rows_in_table_info(mut self, rows: usize) -> Self {
        self.sample_rows_in_table_info = rows;
        self
    }

    pub fn max_string_length(mut self, max_string_length: usize) -> Self {
        self.max_string_length = max_string_length;
        self
    }

    /// Resolves the usable tables. The engine is closed if that fails.
    pub async fn build(self) -> Result<SQLDatabase, SQLDatabaseError> {
        match self.usable_tables().await {
            Ok(usable_tables) => Ok(SQLDatabase {
                engine: self.engine,
                usable_tables,
                sample_rows_in_table_info: self.sample_rows_in_table_info,
                max_string_length: self.max_string_length,
            }),
            Err(e) => {
                self.engine.close().await;
                Err(e)
            }
        }
    }

    async fn usable_tables(&self) -> Result<BTreeSet<String>, SQLDatabaseError> {
        if !self.include_tables.is_empty() && !self.ignore_tables.is_empty() {
            return Err(SQLDatabaseError::ConflictingTableFilters);
        }

        let all_tables: BTreeSet<String> =
            self.engine.table_names().await?.into_iter().collect();

        for requested in [&self.include_tables, &self.ignore_tables] {
            let missing = requested
                .difference(&all_tables)
                .cloned()
                .collect::<Vec<_>>();
            if !missing.is_empty() {
                return Err(SQLDatabaseError::TablesNotFound(missing));
            }
        }

        Ok(if self.include_tables.is_empty() {
            all_tables.difference(&self.ignore_tables).cloned().collect()
        } else {
            self.include_tables.clone()
        })
    }
}
