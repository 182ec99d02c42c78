use crate::{
    ast::{
        common::OrderDir,
        select::{OrderByExpr, Select},
    },
    render::{Render, Renderer},
};

impl Render for Select {
    fn render(&self, r: &mut Renderer) {
        // 1. SELECT clause
        r.sql.push_str("SELECT ");
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                r.sql.push_str(", ");
            }
            col.render(r);
        }

        // 2. FROM
        if let Some(from) = &self.from {
            r.sql.push_str(" FROM ");
            r.sql.push_str(&r.dialect.quote_identifier(from));
        }

        // 3. WHERE
        if let Some(where_clause) = &self.where_clause {
            r.sql.push_str(" WHERE ");
            where_clause.render(r);
        }

        // 4. ORDER BY
        if !self.order_by.is_empty() {
            r.sql.push_str(" ORDER BY ");
            for (i, order) in self.order_by.iter().enumerate() {
                if i > 0 {
                    r.sql.push_str(", ");
                }
                order.render(r);
            }
        }

        // 5. LIMIT
        if let Some(limit) = &self.limit {
            r.sql.push_str(" LIMIT ");
            limit.render(r);
        } else if self.offset.is_some()
            && let Some(unbounded) = r.dialect.unbounded_limit()
        {
            // Dialects without a bare OFFSET still need a LIMIT clause.
            r.sql.push_str(" LIMIT ");
            r.sql.push_str(unbounded);
        }

        // 6. OFFSET
        if let Some(offset) = &self.offset {
            r.sql.push_str(" OFFSET ");
            offset.render(r);
        }
    }
}

impl Render for OrderByExpr {
    fn render(&self, r: &mut Renderer) {
        self.expr.render(r);
        let dir_str = match self.direction {
            OrderDir::Asc => "ASC",
            OrderDir::Desc => "DESC",
        };
        r.sql.push(' ');
        r.sql.push_str(dir_str);
    }
}
