//! Assembles scopes into full statements and runs them through a backend
//! adapter.

use crate::{
    filter,
    sql::{
        base::{
            adapter::{DatabaseKind, SqlAdapter},
            error::{ConnectorError, DbError},
        },
        mysql::adapter::MySqlAdapter,
        postgres::adapter::PgAdapter,
        sqlite::adapter::SqliteAdapter,
    },
};
use model::{
    core::value::Value,
    filter::expr::FilterExpr,
    records::row::RowData,
    scope::{Scope, SortDirection},
};
use query_builder::{
    ast::{common::OrderDir, expr::Expr, select::Select},
    build::{
        delete::DeleteBuilder, insert::InsertBuilder, select::SelectBuilder,
        update::UpdateBuilder,
    },
    count_star, ident,
    render::{Render, Renderer},
    value,
};
use std::sync::Arc;
use tracing::debug;

/// Attribute mapping for mutation calls; pairs keep column order stable.
pub type Attrs = Vec<(String, Value)>;

/// Mediates between scopes from the model layer and one SQL backend. The
/// backend strategy is fixed at construction and never re-checked per call.
pub struct Connector {
    adapter: Arc<dyn SqlAdapter>,
}

impl Connector {
    pub fn new(adapter: Arc<dyn SqlAdapter>) -> Self {
        Connector { adapter }
    }

    /// Picks the backend from the URL scheme.
    pub async fn connect(url: &str) -> Result<Self, ConnectorError> {
        if url.starts_with("sqlite:") {
            Ok(Connector::new(Arc::new(SqliteAdapter::connect(url).await?)))
        } else if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(Connector::new(Arc::new(PgAdapter::connect(url).await?)))
        } else if url.starts_with("mysql://") {
            Ok(Connector::new(Arc::new(MySqlAdapter::connect(url).await?)))
        } else {
            Err(ConnectorError::UnsupportedScheme(url.to_string()))
        }
    }

    /// The backend this connector was built against.
    pub fn kind(&self) -> DatabaseKind {
        self.adapter.kind()
    }

    /// Runs the scope as a full-row select and materializes the rows.
    pub async fn query(&self, scope: Scope) -> Result<Vec<RowData>, DbError> {
        let table = scope.table.clone();
        let ast = self.collection(scope, vec![Expr::Wildcard], true).await?;
        let (sql, params) = self.render(&ast);
        let rows = self.adapter.fetch(&sql, &params).await?;
        Ok(tag_rows(rows, &table))
    }

    /// As `query`, selecting only the named columns.
    pub async fn select(&self, scope: Scope, columns: &[&str]) -> Result<Vec<RowData>, DbError> {
        let table = scope.table.clone();
        let columns = columns.iter().map(|column| ident(column)).collect();
        let ast = self.collection(scope, columns, true).await?;
        let (sql, params) = self.render(&ast);
        let rows = self.adapter.fetch(&sql, &params).await?;
        Ok(tag_rows(rows, &table))
    }

    /// Counts the rows the scope matches. Ordering is irrelevant to a count
    /// and is skipped.
    pub async fn count(&self, scope: Scope) -> Result<u64, DbError> {
        let ast = self.collection(scope, vec![count_star()], false).await?;
        let (sql, params) = self.render(&ast);
        let rows = self.adapter.fetch(&sql, &params).await?;
        rows.first()
            .and_then(RowData::first_value)
            .and_then(Value::as_u64)
            .ok_or_else(|| DbError::ResultShape("count did not yield an integer".to_string()))
    }

    /// Bulk update of every row the scope's filter matches; reports the
    /// affected-row count.
    pub async fn update_all(&self, scope: Scope, attrs: Attrs) -> Result<u64, DbError> {
        let (sql, params) = self.update_statement(scope, attrs, false).await?;
        self.adapter.execute(&sql, &params).await
    }

    /// As `update_all`, handing the updated rows back on backends with
    /// RETURNING.
    pub async fn update_all_returning(
        &self,
        scope: Scope,
        attrs: Attrs,
    ) -> Result<Vec<RowData>, DbError> {
        self.require_returning()?;
        let table = scope.table.clone();
        let (sql, params) = self.update_statement(scope, attrs, true).await?;
        let rows = self.adapter.fetch(&sql, &params).await?;
        Ok(tag_rows(rows, &table))
    }

    /// Bulk delete of every row the scope's filter matches; reports the
    /// affected-row count.
    pub async fn delete_all(&self, scope: Scope) -> Result<u64, DbError> {
        let (sql, params) = self.delete_statement(scope, false).await?;
        self.adapter.execute(&sql, &params).await
    }

    /// As `delete_all`, handing the deleted rows back on backends with
    /// RETURNING.
    pub async fn delete_all_returning(&self, scope: Scope) -> Result<Vec<RowData>, DbError> {
        self.require_returning()?;
        let table = scope.table.clone();
        let (sql, params) = self.delete_statement(scope, true).await?;
        let rows = self.adapter.fetch(&sql, &params).await?;
        Ok(tag_rows(rows, &table))
    }

    /// Inserts all items in one statement and returns the stored rows in
    /// input order.
    ///
    /// Backends without RETURNING only report the first generated id, so the
    /// rows are fetched back by key and re-associated to their input
    /// position by id correlation.
    pub async fn batch_insert(
        &self,
        table: &str,
        key: &str,
        items: Vec<Attrs>,
    ) -> Result<Vec<RowData>, DbError> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        // Union of the item columns, in first-seen order; absent columns
        // insert NULL.
        let mut columns: Vec<String> = Vec::new();
        for item in &items {
            for (column, _) in item {
                if !columns.iter().any(|c| c == column) {
                    columns.push(column.clone());
                }
            }
        }

        let column_refs: Vec<&str> = columns.iter().map(String::as_str).collect();
        let mut builder = InsertBuilder::new(table).columns(&column_refs);
        for item in &items {
            let row = columns
                .iter()
                .map(|column| {
                    let val = item
                        .iter()
                        .find(|(name, _)| name == column)
                        .map(|(_, val)| val.clone())
                        .unwrap_or(Value::Null);
                    value(val)
                })
                .collect();
            builder = builder.values(row);
        }

        if self.adapter.dialect().supports_returning() {
            let ast = builder.returning(vec![Expr::Wildcard]).build();
            let (sql, params) = self.render(&ast);
            let rows = self.adapter.fetch(&sql, &params).await?;
            return Ok(tag_rows(rows, table));
        }

        let ast = builder.build();
        let (sql, params) = self.render(&ast);
        let outcome = self.adapter.insert(&sql, &params).await?;
        let first = outcome.first_insert_id.ok_or_else(|| {
            DbError::ResultShape("backend reported no generated identifier".to_string())
        })?;
        let ids: Vec<i64> = (0..outcome.rows_affected as i64)
            .map(|offset| first + offset)
            .collect();

        let refetch = SelectBuilder::new()
            .select(vec![Expr::Wildcard])
            .from(table)
            .where_clause(Expr::InList {
                expr: Box::new(ident(key)),
                list: ids.iter().map(|id| value(Value::Int(*id))).collect(),
                negated: false,
            })
            .build();
        let (sql, params) = self.render(&refetch);
        let rows = self.adapter.fetch(&sql, &params).await?;

        let mut ordered = Vec::with_capacity(ids.len());
        for id in &ids {
            let row = rows
                .iter()
                .find(|row| row.get_value(key).as_i64() == Some(*id))
                .ok_or_else(|| {
                    DbError::ResultShape(format!("inserted row {id} not found by {key}"))
                })?;
            ordered.push(row.clone());
        }
        Ok(tag_rows(ordered, table))
    }

    /// Inserts one row. The identifier is server-generated: it is stripped
    /// from the payload and comes back filled in on the returned row.
    pub async fn create(
        &self,
        table: &str,
        id_column: &str,
        mut attrs: Attrs,
    ) -> Result<RowData, DbError> {
        attrs.retain(|(column, _)| column != id_column);
        let rows = self.batch_insert(table, id_column, vec![attrs]).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| DbError::ResultShape("insert returned no row".to_string()))
    }

    /// Updates one row by identifier equality.
    pub async fn update(
        &self,
        table: &str,
        id_column: &str,
        id: Value,
        attrs: Attrs,
    ) -> Result<u64, DbError> {
        let scope = Scope::table(table)
            .filter(FilterExpr::property(id_column, id))
            .build();
        self.update_all(scope, attrs).await
    }

    /// Deletes one row by identifier equality. Clearing the in-memory
    /// identifier is the model layer's job.
    pub async fn delete(&self, table: &str, id_column: &str, id: Value) -> Result<u64, DbError> {
        let scope = Scope::table(table)
            .filter(FilterExpr::property(id_column, id))
            .build();
        self.delete_all(scope).await
    }

    /// Raw SQL passthrough. The statement uses the backend's native
    /// placeholder syntax; the adapter normalizes the result shape.
    pub async fn execute(&self, query: &str, bindings: &[Value]) -> Result<Vec<RowData>, DbError> {
        debug!("raw SQL: {} ({} bindings)", query, bindings.len());
        self.adapter.raw(query, bindings).await
    }

    /// table → filter → limit → offset, as a composable statement. Limit
    /// and offset only appear when the scope set them.
    async fn collection(
        &self,
        scope: Scope,
        columns: Vec<Expr>,
        ordered: bool,
    ) -> Result<Select, DbError> {
        let Scope {
            table,
            filter,
            order,
            limit,
            skip,
        } = scope;

        let mut builder = SelectBuilder::new().select(columns).from(&table);
        if let Some(predicate) = self.predicate(filter).await? {
            builder = builder.where_clause(predicate);
        }
        if ordered {
            for spec in &order {
                builder = builder.order_by(ident(&spec.key), order_dir(spec.direction));
            }
        }
        if let Some(limit) = limit {
            builder = builder.limit(value(Value::Int(limit as i64)));
        }
        if let Some(skip) = skip {
            builder = builder.offset(value(Value::Int(skip as i64)));
        }
        Ok(builder.build())
    }

    async fn update_statement(
        &self,
        scope: Scope,
        attrs: Attrs,
        returning: bool,
    ) -> Result<(String, Vec<Value>), DbError> {
        let predicate = self.predicate(scope.filter).await?;
        let mut builder = UpdateBuilder::new(&scope.table);
        for (column, val) in attrs {
            builder = builder.set(&column, value(val));
        }
        if let Some(predicate) = predicate {
            builder = builder.where_clause(predicate);
        }
        if returning {
            builder = builder.returning(vec![Expr::Wildcard]);
        }
        Ok(self.render(&builder.build()))
    }

    async fn delete_statement(
        &self,
        scope: Scope,
        returning: bool,
    ) -> Result<(String, Vec<Value>), DbError> {
        let predicate = self.predicate(scope.filter).await?;
        let mut builder = DeleteBuilder::new(&scope.table);
        if let Some(predicate) = predicate {
            builder = builder.where_clause(predicate);
        }
        if returning {
            builder = builder.returning(vec![Expr::Wildcard]);
        }
        Ok(self.render(&builder.build()))
    }

    async fn predicate(&self, filter: Option<FilterExpr>) -> Result<Option<Expr>, DbError> {
        match filter {
            Some(filter) => Ok(filter::compile(filter).await?),
            None => Ok(None),
        }
    }

    fn require_returning(&self) -> Result<(), DbError> {
        let dialect = self.adapter.dialect();
        if dialect.supports_returning() {
            Ok(())
        } else {
            Err(DbError::UnsupportedReturning(dialect.name().to_string()))
        }
    }

    fn render<S: Render>(&self, statement: &S) -> (String, Vec<Value>) {
        let mut renderer = Renderer::new(self.adapter.dialect());
        statement.render(&mut renderer);
        let (sql, params) = renderer.finish();
        debug!("SQL: {} ({} params)", sql, params.len());
        (sql, params)
    }
}

fn order_dir(direction: SortDirection) -> OrderDir {
    match direction {
        SortDirection::Ascending => OrderDir::Asc,
        SortDirection::Descending => OrderDir::Desc,
    }
}

fn tag_rows(rows: Vec<RowData>, table: &str) -> Vec<RowData> {
    rows.into_iter()
        .map(|row| RowData {
            table: table.to_string(),
            field_values: row.field_values,
        })
        .collect()
}
