use crate::{
    ast::delete::Delete,
    render::{Render, Renderer},
};

impl Render for Delete {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("DELETE FROM ");
        r.sql.push_str(&r.dialect.quote_identifier(&self.table));

        if let Some(where_clause) = &self.where_clause {
            r.sql.push_str(" WHERE ");
            where_clause.render(r);
        }

        if !self.returning.is_empty() {
            r.sql.push_str(" RETURNING ");
            for (i, col) in self.returning.iter().enumerate() {
                if i > 0 {
                    r.sql.push_str(", ");
                }
                col.render(r);
            }
        }
    }
}
